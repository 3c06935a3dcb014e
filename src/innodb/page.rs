//! InnoDB FIL header decoding.
//!
//! Every InnoDB page begins with a 38-byte FIL header ([`FilHeader`]) holding
//! the checksum, page number, prev/next pointers, LSN, page type, flush LSN,
//! and space ID. Each field can be decoded on its own through the free
//! functions in this module; none depends on another field having been read.

use serde::Serialize;

use crate::innodb::constants::*;
use crate::innodb::page_types::PageType;
use crate::innodb::store::PageStore;
use crate::IbdError;

/// Parsed FIL header (38 bytes, present at the start of every InnoDB page).
#[derive(Debug, Clone, Serialize)]
pub struct FilHeader {
    /// Checksum. Bytes 0-3.
    pub checksum: u32,
    /// Page number as stored in the page (0-based). Bytes 4-7.
    pub page_number: u32,
    /// Previous page in the doubly-linked list. Bytes 8-11.
    /// FIL_NULL (0xFFFFFFFF) if not used.
    pub prev_page: u32,
    /// Next page in the doubly-linked list. Bytes 12-15.
    /// FIL_NULL (0xFFFFFFFF) if not used.
    pub next_page: u32,
    /// LSN of newest modification to this page. Bytes 16-23.
    pub lsn: u64,
    /// Page type. Bytes 24-25.
    pub page_type: PageType,
    /// Flush LSN (only meaningful for the first page of the system tablespace). Bytes 26-33.
    pub flush_lsn: u64,
    /// Space ID this page belongs to. Bytes 34-37.
    pub space_id: u32,
}

impl FilHeader {
    /// Decode the FIL header of `page` (1-based).
    pub fn read(store: &mut PageStore, page: u32) -> Result<Self, IbdError> {
        Ok(FilHeader {
            checksum: checksum(store, page)?,
            page_number: stored_page_number(store, page)?,
            prev_page: prev_page(store, page)?,
            next_page: next_page(store, page)?,
            lsn: lsn(store, page)?,
            page_type: PageType::from_u16(page_type(store, page)?),
            flush_lsn: flush_lsn(store, page)?,
            space_id: space_id(store, page)?,
        })
    }

    /// Returns true if prev_page points at another page.
    pub fn has_prev(&self) -> bool {
        self.prev_page != FIL_NULL && self.prev_page != 0
    }

    /// Returns true if next_page points at another page.
    pub fn has_next(&self) -> bool {
        self.next_page != FIL_NULL && self.next_page != 0
    }
}

/// Page checksum (bytes 0-3).
pub fn checksum(store: &mut PageStore, page: u32) -> Result<u32, IbdError> {
    store
        .read(page, FIL_PAGE_SPACE_OR_CHKSUM)
        .map_err(|e| e.context("checksum"))
}

/// Page number as written in the page itself (bytes 4-7).
pub fn stored_page_number(store: &mut PageStore, page: u32) -> Result<u32, IbdError> {
    store
        .read(page, FIL_PAGE_OFFSET)
        .map_err(|e| e.context("page_number"))
}

pub fn prev_page(store: &mut PageStore, page: u32) -> Result<u32, IbdError> {
    store
        .read(page, FIL_PAGE_PREV)
        .map_err(|e| e.context("prev_page"))
}

pub fn next_page(store: &mut PageStore, page: u32) -> Result<u32, IbdError> {
    store
        .read(page, FIL_PAGE_NEXT)
        .map_err(|e| e.context("next_page"))
}

pub fn lsn(store: &mut PageStore, page: u32) -> Result<u64, IbdError> {
    store.read(page, FIL_PAGE_LSN).map_err(|e| e.context("lsn"))
}

/// Raw page type code (bytes 24-25). See [`PageType::from_u16`].
pub fn page_type(store: &mut PageStore, page: u32) -> Result<u16, IbdError> {
    store
        .read(page, FIL_PAGE_TYPE)
        .map_err(|e| e.context("page_type"))
}

pub fn flush_lsn(store: &mut PageStore, page: u32) -> Result<u64, IbdError> {
    store
        .read(page, FIL_PAGE_FILE_FLUSH_LSN)
        .map_err(|e| e.context("flush_lsn"))
}

/// Space ID (bytes 34-37).
pub fn space_id(store: &mut PageStore, page: u32) -> Result<u32, IbdError> {
    store
        .read(page, FIL_PAGE_SPACE_ID)
        .map_err(|e| e.context("space_id"))
}
