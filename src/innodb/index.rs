//! INDEX page header decoding.
//!
//! INDEX pages (page type 17855 / `FIL_PAGE_INDEX`) are the B+Tree nodes that
//! store table data and secondary index entries. Each INDEX page contains a
//! 36-byte [`IndexHeader`] at `FIL_PAGE_DATA` (byte 38), followed by two
//! 10-byte FSEG inode pointers ([`FsegHeader`]) for the leaf and non-leaf
//! segments. The FSEG pointers are only filled in on the root page of an
//! index; elsewhere they decode as absent.
//!
//! The heap record count shares its two bytes with the compact-format flag
//! (bit 15). Decoding separates the two, so no consumer ever sees the raw
//! value.

use serde::Serialize;

use crate::innodb::constants::*;
use crate::innodb::store::{BeField, PageStore};
use crate::IbdError;

/// Parsed INDEX page header (36 bytes, at FIL_PAGE_DATA offset within an INDEX page).
#[derive(Debug, Clone, Serialize)]
pub struct IndexHeader {
    /// Number of directory slots in the page directory.
    pub n_dir_slots: u16,
    /// Pointer to record heap top.
    pub heap_top: u16,
    /// Number of records in the heap, including infimum/supremum and deleted records.
    pub n_heap: u16,
    /// Bit 15 of the heap count: the page uses the compact record format.
    pub compact: bool,
    /// Pointer to start of free record list (0 if none).
    pub free: u16,
    /// Number of bytes in deleted records (garbage).
    pub garbage: u16,
    /// Pointer to the last inserted record (0 if reset).
    pub last_insert: u16,
    /// Last insert direction.
    pub direction: u16,
    /// Number of consecutive inserts in the same direction.
    pub n_direction: u16,
    /// Number of user records on the page.
    pub n_recs: u16,
    /// Highest trx id that may have modified a record (secondary index and
    /// change buffer pages only, 0 elsewhere).
    pub max_trx_id: u64,
    /// Level in the B+Tree (0 = leaf).
    pub level: u16,
    /// Index ID where the page belongs.
    pub index_id: u64,
}

impl IndexHeader {
    /// Decode the INDEX header of `page` (1-based).
    pub fn read(store: &mut PageStore, page: u32) -> Result<Self, IbdError> {
        let (n_heap, compact) = heap_record_count(store, page)?;
        Ok(IndexHeader {
            n_dir_slots: slot_count(store, page)?,
            heap_top: read_field(store, page, PAGE_HEAP_TOP, "heap_top")?,
            n_heap,
            compact,
            free: read_field(store, page, PAGE_FREE, "free")?,
            garbage: read_field(store, page, PAGE_GARBAGE, "garbage")?,
            last_insert: read_field(store, page, PAGE_LAST_INSERT, "last_insert")?,
            direction: read_field(store, page, PAGE_DIRECTION, "direction")?,
            n_direction: read_field(store, page, PAGE_N_DIRECTION, "n_direction")?,
            n_recs: read_field(store, page, PAGE_N_RECS, "n_recs")?,
            max_trx_id: read_field(store, page, PAGE_MAX_TRX_ID, "max_trx_id")?,
            level: page_level(store, page)?,
            index_id: index_id(store, page)?,
        })
    }

    /// Max transaction ID, `None` on pages that do not track one.
    pub fn max_trx_id(&self) -> Option<u64> {
        (self.max_trx_id != 0).then_some(self.max_trx_id)
    }

    /// Returns a human-readable description of the insert direction.
    pub fn direction_name(&self) -> &'static str {
        match self.direction {
            PAGE_LEFT => "Left",
            PAGE_RIGHT => "Right",
            PAGE_SAME_REC => "Same Record",
            PAGE_SAME_PAGE => "Same Page",
            PAGE_NO_DIRECTION => "No Direction",
            _ => "Unknown",
        }
    }

    /// Returns true if this is a leaf-level page.
    pub fn is_leaf(&self) -> bool {
        self.level == 0
    }
}

fn read_field<T: BeField>(
    store: &mut PageStore,
    page: u32,
    field: usize,
    name: &str,
) -> Result<T, IbdError> {
    store
        .read(page, FIL_PAGE_DATA + field)
        .map_err(|e| e.context(name))
}

/// Number of page directory slots.
pub fn slot_count(store: &mut PageStore, page: u32) -> Result<u16, IbdError> {
    read_field(store, page, PAGE_N_DIR_SLOTS, "n_dir_slots")
}

/// Heap record count with the format flag cleared, and the flag itself.
///
/// A raw value of `0x8005` decodes to `(5, true)`.
pub fn heap_record_count(store: &mut PageStore, page: u32) -> Result<(u16, bool), IbdError> {
    let raw: u16 = read_field(store, page, PAGE_N_HEAP, "n_heap")?;
    Ok((
        raw & !PAGE_N_HEAP_COMPACT_FLAG,
        (raw & PAGE_N_HEAP_COMPACT_FLAG) != 0,
    ))
}

/// B+Tree level of the page (0 = leaf).
pub fn page_level(store: &mut PageStore, page: u32) -> Result<u16, IbdError> {
    read_field(store, page, PAGE_LEVEL, "page_level")
}

/// ID of the index the page belongs to.
pub fn index_id(store: &mut PageStore, page: u32) -> Result<u64, IbdError> {
    read_field(store, page, PAGE_INDEX_ID, "index_id")
}

/// Which of the two segments an FSEG header points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SegmentKind {
    /// Segment holding the leaf pages.
    Leaf,
    /// Segment holding the non-leaf (internal) pages.
    Top,
}

impl SegmentKind {
    fn offset(self) -> usize {
        match self {
            SegmentKind::Leaf => PAGE_BTR_SEG_LEAF,
            SegmentKind::Top => PAGE_BTR_SEG_TOP,
        }
    }

    fn name(self) -> &'static str {
        match self {
            SegmentKind::Leaf => "leaf segment",
            SegmentKind::Top => "top segment",
        }
    }
}

/// FSEG (File Segment) header pointer (10 bytes each).
///
/// Locates the inode entry describing one of the index's two segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FsegHeader {
    /// Space ID of the inode.
    pub space_id: u32,
    /// Page number of the inode.
    pub page_no: u32,
    /// Byte offset of the inode within the page.
    pub offset: u16,
}

impl FsegHeader {
    /// Decode the `kind` segment header of `page`.
    ///
    /// Returns `Ok(None)` when the inode offset is zero, which is how every
    /// page other than an index root leaves these bytes.
    pub fn read(
        store: &mut PageStore,
        page: u32,
        kind: SegmentKind,
    ) -> Result<Option<Self>, IbdError> {
        let base = kind.offset();
        let offset: u16 = read_field(store, page, base + FSEG_HDR_OFFSET, kind.name())?;
        if offset == 0 {
            return Ok(None);
        }
        Ok(Some(FsegHeader {
            space_id: read_field(store, page, base + FSEG_HDR_SPACE, kind.name())?,
            page_no: read_field(store, page, base + FSEG_HDR_PAGE_NO, kind.name())?,
            offset,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::{BigEndian, ByteOrder};

    const PS: usize = SIZE_PAGE_DEFAULT as usize;

    fn index_page() -> Vec<u8> {
        let mut page = vec![0u8; PS];
        let base = FIL_PAGE_DATA;
        BigEndian::write_u16(&mut page[FIL_PAGE_TYPE..], 17855);
        BigEndian::write_u16(&mut page[base + PAGE_N_DIR_SLOTS..], 4);
        BigEndian::write_u16(&mut page[base + PAGE_HEAP_TOP..], 0x01A0);
        BigEndian::write_u16(&mut page[base + PAGE_N_HEAP..], 0x8005); // compact, 5 records
        BigEndian::write_u16(&mut page[base + PAGE_FREE..], 0x0120);
        BigEndian::write_u16(&mut page[base + PAGE_GARBAGE..], 64);
        BigEndian::write_u16(&mut page[base + PAGE_LAST_INSERT..], 0x0190);
        BigEndian::write_u16(&mut page[base + PAGE_DIRECTION..], PAGE_RIGHT);
        BigEndian::write_u16(&mut page[base + PAGE_N_DIRECTION..], 2);
        BigEndian::write_u16(&mut page[base + PAGE_N_RECS..], 3);
        BigEndian::write_u64(&mut page[base + PAGE_MAX_TRX_ID..], 0);
        BigEndian::write_u16(&mut page[base + PAGE_LEVEL..], 1);
        BigEndian::write_u64(&mut page[base + PAGE_INDEX_ID..], 42);
        page
    }

    #[test]
    fn test_index_header_read() {
        let mut store = PageStore::from_bytes(index_page());
        let hdr = IndexHeader::read(&mut store, 1).unwrap();

        assert_eq!(hdr.n_dir_slots, 4);
        assert_eq!(hdr.heap_top, 0x01A0);
        assert_eq!(hdr.n_heap, 5);
        assert!(hdr.compact);
        assert_eq!(hdr.free, 0x0120);
        assert_eq!(hdr.garbage, 64);
        assert_eq!(hdr.last_insert, 0x0190);
        assert_eq!(hdr.direction_name(), "Right");
        assert_eq!(hdr.n_direction, 2);
        assert_eq!(hdr.n_recs, 3);
        assert_eq!(hdr.max_trx_id(), None);
        assert_eq!(hdr.level, 1);
        assert!(!hdr.is_leaf());
        assert_eq!(hdr.index_id, 42);
    }

    #[test]
    fn test_heap_count_compact_flag_masked() {
        let mut store = PageStore::from_bytes(index_page());
        assert_eq!(heap_record_count(&mut store, 1).unwrap(), (5, true));
    }

    #[test]
    fn test_heap_count_redundant_format() {
        let mut page = index_page();
        BigEndian::write_u16(&mut page[FIL_PAGE_DATA + PAGE_N_HEAP..], 0x0005);
        let mut store = PageStore::from_bytes(page);
        let hdr = IndexHeader::read(&mut store, 1).unwrap();
        assert_eq!(hdr.n_heap, 5);
        assert!(!hdr.compact);
    }

    #[test]
    fn test_max_trx_id_present() {
        let mut page = index_page();
        BigEndian::write_u64(&mut page[FIL_PAGE_DATA + PAGE_MAX_TRX_ID..], 0x1234);
        let mut store = PageStore::from_bytes(page);
        let hdr = IndexHeader::read(&mut store, 1).unwrap();
        assert_eq!(hdr.max_trx_id(), Some(0x1234));
    }

    #[test]
    fn test_segment_headers_absent_on_non_root() {
        let mut store = PageStore::from_bytes(index_page());
        assert_eq!(FsegHeader::read(&mut store, 1, SegmentKind::Leaf).unwrap(), None);
        assert_eq!(FsegHeader::read(&mut store, 1, SegmentKind::Top).unwrap(), None);
    }

    #[test]
    fn test_segment_headers_on_root() {
        let mut page = index_page();
        let leaf = FIL_PAGE_DATA + PAGE_BTR_SEG_LEAF;
        BigEndian::write_u32(&mut page[leaf..], 9);
        BigEndian::write_u32(&mut page[leaf + 4..], 2);
        BigEndian::write_u16(&mut page[leaf + 8..], 242);
        let top = FIL_PAGE_DATA + PAGE_BTR_SEG_TOP;
        BigEndian::write_u32(&mut page[top..], 9);
        BigEndian::write_u32(&mut page[top + 4..], 2);
        BigEndian::write_u16(&mut page[top + 8..], 50);
        let mut store = PageStore::from_bytes(page);

        let leaf_hdr = FsegHeader::read(&mut store, 1, SegmentKind::Leaf).unwrap();
        assert_eq!(
            leaf_hdr,
            Some(FsegHeader {
                space_id: 9,
                page_no: 2,
                offset: 242
            })
        );
        let top_hdr = FsegHeader::read(&mut store, 1, SegmentKind::Top)
            .unwrap()
            .unwrap();
        assert_eq!(top_hdr.offset, 50);
    }

    #[test]
    fn test_segment_absolute_offsets() {
        assert_eq!(FIL_PAGE_DATA + PAGE_BTR_SEG_LEAF, 74);
        assert_eq!(FIL_PAGE_DATA + PAGE_BTR_SEG_TOP, 84);
        assert_eq!(FIL_PAGE_DATA + PAGE_INDEX_ID, 66);
        assert_eq!(FIL_PAGE_DATA + PAGE_LEVEL, 64);
    }
}
