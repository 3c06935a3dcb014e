/// InnoDB page and file structure constants.
///
/// All offsets are relative to the start of a page. Index header fields are
/// given relative to `FIL_PAGE_DATA`, the end of the FIL header, matching
/// the layout of `page0page.h`:
/// - fil0fil.h (FIL header)
/// - page0page.h (index page header)
/// - fsp0types.h (FSEG header)
// Page sizes
pub const SIZE_PAGE_DEFAULT: u32 = 16384;
pub const SIZE_PAGE_4K: u32 = 4096;
pub const SIZE_PAGE_8K: u32 = 8192;
pub const SIZE_PAGE_16K: u32 = 16384;
pub const SIZE_PAGE_32K: u32 = 32768;
pub const SIZE_PAGE_64K: u32 = 65536;

// FIL Header (38 bytes total)
pub const SIZE_FIL_HEAD: usize = 38;
pub const FIL_PAGE_SPACE_OR_CHKSUM: usize = 0; // 4 bytes - checksum
pub const FIL_PAGE_OFFSET: usize = 4; // 4 bytes - page number as stored
pub const FIL_PAGE_PREV: usize = 8; // 4 bytes - previous page
pub const FIL_PAGE_NEXT: usize = 12; // 4 bytes - next page
pub const FIL_PAGE_LSN: usize = 16; // 8 bytes - LSN of newest modification
pub const FIL_PAGE_TYPE: usize = 24; // 2 bytes - page type
pub const FIL_PAGE_FILE_FLUSH_LSN: usize = 26; // 8 bytes - flushed LSN
pub const FIL_PAGE_SPACE_ID: usize = 34; // 4 bytes - space id

// Start of page data (immediately after FIL header)
pub const FIL_PAGE_DATA: usize = 38;

// Page Header (INDEX page specific, relative to FIL_PAGE_DATA)
pub const PAGE_N_DIR_SLOTS: usize = 0; // 2 bytes - number of directory slots
pub const PAGE_HEAP_TOP: usize = 2; // 2 bytes - pointer to record heap top
pub const PAGE_N_HEAP: usize = 4; // 2 bytes - records in heap (bit 15 = compact flag)
pub const PAGE_FREE: usize = 6; // 2 bytes - start of free record list
pub const PAGE_GARBAGE: usize = 8; // 2 bytes - bytes in deleted records
pub const PAGE_LAST_INSERT: usize = 10; // 2 bytes - last inserted record
pub const PAGE_DIRECTION: usize = 12; // 2 bytes - last insert direction
pub const PAGE_N_DIRECTION: usize = 14; // 2 bytes - consecutive inserts in same direction
pub const PAGE_N_RECS: usize = 16; // 2 bytes - number of user records
pub const PAGE_MAX_TRX_ID: usize = 18; // 8 bytes - max trx id (secondary indexes only)
pub const PAGE_LEVEL: usize = 26; // 2 bytes - level in B+tree (0 = leaf)
pub const PAGE_INDEX_ID: usize = 28; // 8 bytes - index id
pub const PAGE_BTR_SEG_LEAF: usize = 36; // 10 bytes - leaf segment header
pub const PAGE_BTR_SEG_TOP: usize = 46; // 10 bytes - non-leaf segment header

// FSEG header (space id 4 + page number 4 + inode offset 2)
pub const FSEG_HEADER_SIZE: usize = 10;
pub const FSEG_HDR_SPACE: usize = 0;
pub const FSEG_HDR_PAGE_NO: usize = 4;
pub const FSEG_HDR_OFFSET: usize = 8;

// Bit 15 of PAGE_N_HEAP marks the compact record format
pub const PAGE_N_HEAP_COMPACT_FLAG: u16 = 0x8000;

// Special page number values
pub const FIL_NULL: u32 = 0xFFFFFFFF; // "null" page reference (4294967295)

// Insert direction values
pub const PAGE_LEFT: u16 = 1;
pub const PAGE_RIGHT: u16 = 2;
pub const PAGE_SAME_REC: u16 = 3;
pub const PAGE_SAME_PAGE: u16 = 4;
pub const PAGE_NO_DIRECTION: u16 = 5;
