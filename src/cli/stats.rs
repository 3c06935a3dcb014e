use std::io::Write;

use colored::Colorize;

use crate::cli::{create_progress_bar, open_store, wprintln};
use crate::innodb::page_types::describe;
use crate::innodb::scan::{level_key, TablespaceScanner, TablespaceStats};
use crate::IbdError;

/// Options for the `ibdstat stats` subcommand.
pub struct StatsOptions {
    /// Path to the tablespace file.
    pub file: String,
    /// Emit output as JSON.
    pub json: bool,
    /// Override the default 16 KiB page size.
    pub page_size: Option<u32>,
}

/// Scan a tablespace and report page-type and per-index statistics.
///
/// Every page from 1 through the last whole page is visited. The report has
/// three sections: tablespace totals (space ID, page size, page counts), a
/// histogram of page types rendered as `<label> (<code>): <count>`, and one
/// block per index ID listing its tree height and its pages per B+Tree level
/// and per page type.
/// All sections are sorted by key so reports of the same file compare equal.
///
/// A progress bar is drawn on stderr while the scan runs. If any page fails
/// to decode, the scan stops and nothing is written.
pub fn execute(opts: &StatsOptions, writer: &mut dyn Write) -> Result<(), IbdError> {
    let mut store = open_store(&opts.file, opts.page_size)?;
    let total = store.page_count()?;

    let pb = create_progress_bar(total as u64, "pages");
    let stats = TablespaceScanner::new(&mut store)
        .with_progress(|_| pb.inc(1))
        .run();
    pb.finish_and_clear();
    let stats = stats?;

    if opts.json {
        let json = serde_json::to_string_pretty(&stats)
            .map_err(|e| IbdError::Io(format!("JSON serialization error: {}", e)))?;
        wprintln!(writer, "{}", json)?;
        return Ok(());
    }

    print_stats(writer, &opts.file, &stats)
}

fn print_stats(writer: &mut dyn Write, file: &str, stats: &TablespaceStats) -> Result<(), IbdError> {
    wprintln!(writer, "{}", format!("Stats ({}):", file).bold())?;
    wprintln!(writer, "    index_pages: {}", stats.index_pages)?;
    wprintln!(writer, "    page_size: {}", stats.page_size)?;
    wprintln!(writer, "    scanned_pages: {}", stats.scanned_pages)?;
    wprintln!(writer, "    space_id: {}", stats.space_id)?;
    wprintln!(writer, "    total_pages: {}", stats.total_pages)?;
    wprintln!(writer)?;

    wprintln!(writer, "{}", "Page Type Stats:".bold())?;
    for (&code, &count) in &stats.page_types {
        wprintln!(writer, "    {}: {}", describe(code), count)?;
    }
    wprintln!(writer)?;

    wprintln!(
        writer,
        "{}",
        format!("Index Stats ({} indexes):", stats.indexes.len()).bold()
    )?;
    for (index_id, index) in &stats.indexes {
        wprintln!(writer, "    {}:", index_id.to_string().cyan())?;
        if let Some(root) = index.root_page {
            wprintln!(writer, "        root_page: {}", root)?;
        }
        wprintln!(writer, "        height: {}", index.height())?;
        for (&level, &count) in &index.levels {
            wprintln!(writer, "        {}: {}", level_key(level), count)?;
        }
        for (&code, &count) in &index.page_types {
            wprintln!(writer, "        {}: {}", describe(code), count)?;
        }
    }
    wprintln!(writer)?;

    Ok(())
}
