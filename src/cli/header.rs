use std::io::Write;

use colored::Colorize;

use crate::cli::{open_store, wprintln};
use crate::innodb::index::{FsegHeader, IndexHeader};
use crate::innodb::inspect::PageReport;
use crate::util::hex::{format_hex32, format_offset};
use crate::IbdError;

/// Options for the `ibdstat header` subcommand.
pub struct HeaderOptions {
    /// Path to the tablespace file.
    pub file: String,
    /// 1-based page number to inspect.
    pub page: u32,
    /// Emit output as JSON.
    pub json: bool,
    /// Override the default 16 KiB page size.
    pub page_size: Option<u32>,
}

/// Dump the headers of a single page.
///
/// Always shows the FIL header (checksum, stored page number, prev/next
/// links, LSNs, page type, space ID). For INDEX pages the B+Tree header and
/// the two segment headers follow; a segment header that is not present on
/// the page (anything but an index root) is reported as such.
pub fn execute(opts: &HeaderOptions, writer: &mut dyn Write) -> Result<(), IbdError> {
    let mut store = open_store(&opts.file, opts.page_size)?;
    let report = PageReport::read(&mut store, opts.page)?;

    if opts.json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| IbdError::Io(format!("JSON serialization error: {}", e)))?;
        wprintln!(writer, "{}", json)?;
        return Ok(());
    }

    print_fil_header(writer, &report)?;

    if let Some(idx) = &report.index_header {
        wprintln!(writer)?;
        print_index_header(writer, idx, report.page)?;
        wprintln!(writer)?;
        wprintln!(
            writer,
            "{}",
            format!("=== FSEG_HDR - File Segment Header: Page {}", report.page).bold()
        )?;
        print_segment(writer, "Leaf", report.leaf_segment.as_ref())?;
        print_segment(writer, "Non-leaf", report.top_segment.as_ref())?;
    }

    Ok(())
}

fn print_fil_header(writer: &mut dyn Write, report: &PageReport) -> Result<(), IbdError> {
    let hdr = &report.header;
    wprintln!(writer, "{}", format!("=== HEADER: Page {}", report.page).bold())?;
    wprintln!(writer, "Byte Start: {}", format_offset(report.byte_start))?;
    wprintln!(writer, "Byte End: {}", format_offset(report.byte_end))?;
    wprintln!(writer, "Stored Page Number: {}", hdr.page_number)?;
    wprintln!(
        writer,
        "Page Type: {} - {} ({})",
        hdr.page_type.as_u16(),
        report.page_type_label.unwrap_or("Unknown"),
        hdr.page_type.name()
    )?;

    if hdr.has_prev() {
        wprintln!(writer, "Prev Page: {}", hdr.prev_page)?;
    } else {
        wprintln!(writer, "Prev Page: Not used.")?;
    }
    if hdr.has_next() {
        wprintln!(writer, "Next Page: {}", hdr.next_page)?;
    } else {
        wprintln!(writer, "Next Page: Not used.")?;
    }

    wprintln!(writer, "LSN: {}", hdr.lsn)?;
    wprintln!(writer, "Flushed LSN: {}", hdr.flush_lsn)?;
    wprintln!(writer, "Space ID: {}", hdr.space_id)?;
    wprintln!(writer, "Checksum: {}", format_hex32(hdr.checksum))?;
    Ok(())
}

fn print_index_header(writer: &mut dyn Write, idx: &IndexHeader, page: u32) -> Result<(), IbdError> {
    wprintln!(writer, "{}", format!("=== INDEX Header: Page {}", page).bold())?;
    wprintln!(writer, "Index ID: {}", idx.index_id)?;
    wprintln!(
        writer,
        "Node Level: {}{}",
        idx.level,
        if idx.is_leaf() { " (leaf)" } else { "" }
    )?;
    match idx.max_trx_id() {
        Some(trx) => wprintln!(writer, "Max Transaction ID: {}", trx)?,
        None => wprintln!(writer, "Max Transaction ID: -")?,
    }
    wprintln!(writer, "Directory Slots: {}", idx.n_dir_slots)?;
    wprintln!(writer, "Heap Top: {}", idx.heap_top)?;
    wprintln!(
        writer,
        "Records in Heap: {} (compact: {})",
        idx.n_heap,
        idx.compact
    )?;
    wprintln!(writer, "Records in Page: {}", idx.n_recs)?;
    wprintln!(writer, "Start of Free Record List: {}", idx.free)?;
    wprintln!(writer, "Garbage Bytes: {}", idx.garbage)?;
    wprintln!(writer, "Last Insert: {}", idx.last_insert)?;
    wprintln!(
        writer,
        "Last Insert Direction: {} - {}",
        idx.direction,
        idx.direction_name()
    )?;
    wprintln!(writer, "Inserts in this direction: {}", idx.n_direction)?;
    Ok(())
}

fn print_segment(
    writer: &mut dyn Write,
    label: &str,
    segment: Option<&FsegHeader>,
) -> Result<(), IbdError> {
    match segment {
        Some(seg) => wprintln!(
            writer,
            "{} Segment: space {}, page {}, offset {}",
            label,
            seg.space_id,
            seg.page_no,
            seg.offset
        ),
        None => wprintln!(writer, "{} Segment: not present on this page", label),
    }
}
