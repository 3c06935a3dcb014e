//! CLI subcommand implementations for the `ibdstat` binary.
//!
//! CLI argument parsing uses clap derive macros, with the top-level
//! [`app::Cli`] struct and [`app::Commands`] enum defined in [`app`] and
//! shared between `main.rs` and `build.rs` (for man page generation) via
//! `include!()`.
//!
//! Each subcommand module follows the same pattern: an `Options` struct holding
//! the parsed arguments and a `pub fn execute(opts, writer) -> Result<(), IbdError>`
//! entry point. The `writer: &mut dyn Write` parameter allows output to be
//! captured in tests or redirected to a file via the global `--output` flag.
//!
//! # Subcommands
//!
//! | Command | Module | Purpose |
//! |---------|--------|---------|
//! | `ibdstat stats` | [`stats`] | Page-type histogram and per-index level/type counts |
//! | `ibdstat header` | [`header`] | FIL, INDEX and FSEG headers of a single page |
//!
//! The `wprintln!` macro wraps `writeln!` to convert `io::Error` into `IbdError`.

pub mod app;
pub mod header;
pub mod stats;

/// Write a line to the given writer, converting io::Error to IbdError.
macro_rules! wprintln {
    ($w:expr) => {
        writeln!($w).map_err(|e| $crate::IbdError::Io(e.to_string()))
    };
    ($w:expr, $($arg:tt)*) => {
        writeln!($w, $($arg)*).map_err(|e| $crate::IbdError::Io(e.to_string()))
    };
}

pub(crate) use wprintln;

use crate::innodb::store::PageStore;
use crate::IbdError;
use indicatif::{ProgressBar, ProgressStyle};

/// Build a page store, applying the `--page-size` override when given.
pub(crate) fn open_store(path: &str, page_size: Option<u32>) -> Result<PageStore, IbdError> {
    match page_size {
        Some(ps) => PageStore::with_page_size(path, ps),
        None => Ok(PageStore::new(path)),
    }
}

/// Create a styled progress bar for iterating over pages.
pub(crate) fn create_progress_bar(count: u64, unit: &str) -> ProgressBar {
    let pb = ProgressBar::new(count);
    if let Ok(style) = ProgressStyle::default_bar().template(&format!(
        "{{spinner:.green}} [{{bar:40.cyan/blue}}] {{pos}}/{{len}} {} ({{eta}})",
        unit
    )) {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}
