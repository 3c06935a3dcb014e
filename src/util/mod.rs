//! Shared formatting utilities.

pub mod hex;
