//! Offline page-layout statistics for InnoDB tablespace files.
//!
//! The `ibd-stats` crate (library name `ibdstat`) reads the per-page headers
//! of a fixed-page-size InnoDB tablespace (`.ibd`, `ibdata1`) without running
//! MySQL, and folds them into aggregate statistics: a page-type histogram and,
//! for every B+Tree index found in the file, its page counts per tree level.
//!
//! # CLI Reference
//!
//! | Command | Purpose |
//! |---------|---------|
//! | [`ibdstat stats`](cli::app::Commands::Stats) | Scan every page and report page-type and per-index statistics |
//! | [`ibdstat header`](cli::app::Commands::Header) | Dump the file, index and segment headers of one page |
//!
//! All subcommands accept `--color <auto|always|never>`, `--output <file>` and
//! `--log-level <level>`, plus `--json` and `--page-size`.
//!
//! # Library API
//!
//! ```no_run
//! use ibdstat::innodb::scan::scan;
//!
//! let stats = scan("table.ibd").unwrap();
//! println!("space {} has {} pages", stats.space_id, stats.total_pages);
//! for (index_id, index) in &stats.indexes {
//!     println!("index {}: {:?}", index_id, index.counters());
//! }
//! ```
//!
//! Page numbers are 1-based throughout: page 1 is the first 16 KiB of the
//! file, and a field at offset `f` of page `p` lives at byte
//! `(p - 1) * page_size + f`.
//!
//! ## Module overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`innodb::store`] | Page geometry, lazy file handle, big-endian field reads |
//! | [`innodb::page`] | FIL header (first 38 bytes of every page) |
//! | [`innodb::index`] | INDEX page header and FSEG segment headers |
//! | [`innodb::page_types`] | Page type codes and their labels |
//! | [`innodb::scan`] | Whole-tablespace scan and aggregation |
//! | [`innodb::inspect`] | Single-page header report |
//! | [`innodb::constants`] | On-disk offsets and sizes |

#[cfg(feature = "cli")]
pub mod cli;
pub mod innodb;
pub mod util;

use std::fmt;

use thiserror::Error;

/// Errors returned by `ibdstat` operations.
#[derive(Error, Debug)]
pub enum IbdError {
    /// An I/O error occurred (file open, stat, seek, read, or write failure).
    #[error("I/O error: {0}")]
    Io(String),

    /// An invalid argument was supplied (page number 0, bad field width, empty file, etc.).
    #[error("Invalid argument: {0}")]
    Argument(String),
}

impl IbdError {
    /// Prefix the message with the identity of the operation that failed.
    ///
    /// The variant is preserved, so callers can still distinguish I/O
    /// failures from invalid arguments after several layers of wrapping.
    ///
    /// ```
    /// use ibdstat::IbdError;
    ///
    /// let err = IbdError::Argument("page number 0".to_string()).context("page_type");
    /// assert_eq!(err.to_string(), "Invalid argument: page_type: page number 0");
    /// ```
    pub fn context(self, op: impl fmt::Display) -> Self {
        match self {
            IbdError::Io(msg) => IbdError::Io(format!("{}: {}", op, msg)),
            IbdError::Argument(msg) => IbdError::Argument(format!("{}: {}", op, msg)),
        }
    }
}
