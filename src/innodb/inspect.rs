//! Single-page header report.
//!
//! [`PageReport`] gathers everything the decoders know about one page: the
//! FIL header, its resolved type, where the page sits in the file and, for
//! INDEX pages, the index header and both segment headers.

use serde::Serialize;

use crate::innodb::index::{FsegHeader, IndexHeader, SegmentKind};
use crate::innodb::page::FilHeader;
use crate::innodb::store::PageStore;
use crate::IbdError;

/// Decoded headers of a single page.
#[derive(Debug, Clone, Serialize)]
pub struct PageReport {
    /// 1-based page number that was requested.
    pub page: u32,
    pub header: FilHeader,
    /// Label from the page type catalog, `None` for codes outside it.
    pub page_type_label: Option<&'static str>,
    pub byte_start: u64,
    pub byte_end: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_header: Option<IndexHeader>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leaf_segment: Option<FsegHeader>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_segment: Option<FsegHeader>,
}

impl PageReport {
    /// Decode the headers of `page` (1-based).
    pub fn read(store: &mut PageStore, page: u32) -> Result<Self, IbdError> {
        let ctx = |e: IbdError| e.context(format!("page {}", page));

        let header = FilHeader::read(store, page).map_err(ctx)?;
        let byte_start = store.page_offset(page, 0, 0).map_err(ctx)?;
        let byte_end = byte_start + store.page_size() as u64;

        let (index_header, leaf_segment, top_segment) = if header.page_type.is_index() {
            (
                Some(IndexHeader::read(store, page).map_err(ctx)?),
                FsegHeader::read(store, page, SegmentKind::Leaf).map_err(ctx)?,
                FsegHeader::read(store, page, SegmentKind::Top).map_err(ctx)?,
            )
        } else {
            (None, None, None)
        };

        Ok(PageReport {
            page,
            page_type_label: header.page_type.label(),
            header,
            byte_start,
            byte_end,
            index_header,
            leaf_segment,
            top_segment,
        })
    }
}
