//! Hex formatting utilities.
//!
//! Helpers for rendering byte offsets and header values in reports.

/// Format a byte offset as "decimal (0xhex)".
pub fn format_offset(offset: u64) -> String {
    format!("{} (0x{:x})", offset, offset)
}

/// Format a u32 value as hex with 0x prefix.
pub fn format_hex32(value: u32) -> String {
    format!("0x{:08x}", value)
}
