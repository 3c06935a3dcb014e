//! InnoDB on-disk page layout decoding.
//!
//! Everything here reads through a [`store::PageStore`], which turns a
//! 1-based page number and an in-page offset into a big-endian field read.
//! [`page`] and [`index`] decode the FIL and INDEX headers on top of it,
//! [`page_types`] names the page type codes, and [`scan`] folds every page of
//! a file into aggregate statistics.

pub mod constants;
pub mod index;
pub mod inspect;
pub mod page;
pub mod page_types;
pub mod scan;
pub mod store;
