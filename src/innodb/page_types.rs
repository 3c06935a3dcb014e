//! InnoDB page type catalog.
//!
//! Maps the 2-byte page type field (bytes 24-25 of the FIL header) to a
//! [`PageType`]. Each catalogued variant carries its MySQL source name and a
//! human-readable label. Codes outside the catalog decode to
//! [`PageType::Undefined`], which keeps the raw value and has no label, so
//! classifying a page can never fail.

use serde::Serialize;
use std::fmt;

/// Page types found in file-per-table and system tablespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum PageType {
    /// Freshly allocated, type field not initialized (FIL_PAGE_TYPE_ALLOCATED = 0)
    Allocated,
    /// Undo log page (FIL_PAGE_UNDO_LOG = 2)
    UndoLog,
    /// File segment inode (FIL_PAGE_INODE = 3)
    Inode,
    /// Change buffer free list (FIL_PAGE_IBUF_FREE_LIST = 4)
    IbufFreeList,
    /// Change buffer bitmap (FIL_PAGE_IBUF_BITMAP = 5)
    IbufBitmap,
    /// System internal page (FIL_PAGE_TYPE_SYS = 6)
    Sys,
    /// Transaction system header (FIL_PAGE_TYPE_TRX_SYS = 7)
    TrxSys,
    /// File space header, first page of each tablespace (FIL_PAGE_TYPE_FSP_HDR = 8)
    FspHdr,
    /// Extent descriptor (FIL_PAGE_TYPE_XDES = 9)
    Xdes,
    /// Uncompressed BLOB page (FIL_PAGE_TYPE_BLOB = 10)
    Blob,
    /// First compressed BLOB page (FIL_PAGE_TYPE_ZBLOB = 11)
    ZBlob,
    /// Subsequent compressed BLOB page (FIL_PAGE_TYPE_ZBLOB2 = 12)
    ZBlob2,
    /// Unknown/reserved (FIL_PAGE_TYPE_UNKNOWN = 13)
    Unknown,
    /// Compressed page (FIL_PAGE_COMPRESSED = 14)
    Compressed,
    /// Encrypted page (FIL_PAGE_ENCRYPTED = 15)
    Encrypted,
    /// Compressed and encrypted page (FIL_PAGE_COMPRESSED_AND_ENCRYPTED = 16)
    CompressedEncrypted,
    /// Encrypted R-tree page (FIL_PAGE_ENCRYPTED_RTREE = 17)
    EncryptedRtree,
    /// R-tree index page for spatial indexes (FIL_PAGE_RTREE = 17854)
    Rtree,
    /// B+Tree index page for table and index data (FIL_PAGE_INDEX = 17855)
    Index,
    /// Any code outside the catalog.
    Undefined(u16),
}

impl PageType {
    /// Parse a page type from a u16 value read from the FIL header.
    ///
    /// # Examples
    ///
    /// ```
    /// use ibdstat::innodb::page_types::PageType;
    ///
    /// assert_eq!(PageType::from_u16(17855), PageType::Index);
    /// assert_eq!(PageType::from_u16(8), PageType::FspHdr);
    ///
    /// // Unrecognized values keep their code
    /// assert_eq!(PageType::from_u16(9999), PageType::Undefined(9999));
    /// ```
    pub fn from_u16(value: u16) -> Self {
        match value {
            0 => PageType::Allocated,
            2 => PageType::UndoLog,
            3 => PageType::Inode,
            4 => PageType::IbufFreeList,
            5 => PageType::IbufBitmap,
            6 => PageType::Sys,
            7 => PageType::TrxSys,
            8 => PageType::FspHdr,
            9 => PageType::Xdes,
            10 => PageType::Blob,
            11 => PageType::ZBlob,
            12 => PageType::ZBlob2,
            13 => PageType::Unknown,
            14 => PageType::Compressed,
            15 => PageType::Encrypted,
            16 => PageType::CompressedEncrypted,
            17 => PageType::EncryptedRtree,
            17854 => PageType::Rtree,
            17855 => PageType::Index,
            other => PageType::Undefined(other),
        }
    }

    /// Returns the raw u16 value of this page type.
    pub fn as_u16(self) -> u16 {
        match self {
            PageType::Allocated => 0,
            PageType::UndoLog => 2,
            PageType::Inode => 3,
            PageType::IbufFreeList => 4,
            PageType::IbufBitmap => 5,
            PageType::Sys => 6,
            PageType::TrxSys => 7,
            PageType::FspHdr => 8,
            PageType::Xdes => 9,
            PageType::Blob => 10,
            PageType::ZBlob => 11,
            PageType::ZBlob2 => 12,
            PageType::Unknown => 13,
            PageType::Compressed => 14,
            PageType::Encrypted => 15,
            PageType::CompressedEncrypted => 16,
            PageType::EncryptedRtree => 17,
            PageType::Rtree => 17854,
            PageType::Index => 17855,
            PageType::Undefined(code) => code,
        }
    }

    /// Returns (name, label) for catalogued types.
    fn metadata(self) -> Option<(&'static str, &'static str)> {
        let entry = match self {
            PageType::Allocated => ("ALLOCATED", "Freshly Allocated"),
            PageType::UndoLog => ("UNDO_LOG", "Undo Log"),
            PageType::Inode => ("INODE", "Inode"),
            PageType::IbufFreeList => ("IBUF_FREE_LIST", "Change Buffer Free List"),
            PageType::IbufBitmap => ("IBUF_BITMAP", "Change Buffer Bitmap"),
            PageType::Sys => ("SYS", "System Page"),
            PageType::TrxSys => ("TRX_SYS", "Transaction Page"),
            PageType::FspHdr => ("FSP_HDR", "File Space Header"),
            PageType::Xdes => ("XDES", "Extent Descriptor"),
            PageType::Blob => ("BLOB", "Uncompressed Blob Page"),
            PageType::ZBlob => ("ZBLOB", "First Compressed Blob"),
            PageType::ZBlob2 => ("ZBLOB2", "Subsequent Compressed Blob"),
            PageType::Unknown => ("UNKNOWN", "Unknown Page"),
            PageType::Compressed => ("COMPRESSED", "Compressed Page"),
            PageType::Encrypted => ("ENCRYPTED", "Encrypted Page"),
            PageType::CompressedEncrypted => {
                ("COMPRESSED_ENCRYPTED", "Compressed And Encrypted Page")
            }
            PageType::EncryptedRtree => ("ENCRYPTED_RTREE", "Encrypted RTree Page"),
            PageType::Rtree => ("RTREE", "RTree Page"),
            PageType::Index => ("INDEX", "BTree Page"),
            PageType::Undefined(_) => return None,
        };
        Some(entry)
    }

    /// Human-readable label, or `None` for codes outside the catalog.
    ///
    /// # Examples
    ///
    /// ```
    /// use ibdstat::innodb::page_types::PageType;
    ///
    /// assert_eq!(PageType::Index.label(), Some("BTree Page"));
    /// assert_eq!(PageType::from_u16(9999).label(), None);
    /// ```
    pub fn label(self) -> Option<&'static str> {
        self.metadata().map(|(_, label)| label)
    }

    /// Name of this page type as used in MySQL source (`UNDEFINED` outside the catalog).
    pub fn name(self) -> &'static str {
        self.metadata().map_or("UNDEFINED", |(name, _)| name)
    }

    /// Returns true for B+Tree index pages, the only pages carrying an index header.
    pub fn is_index(self) -> bool {
        self == PageType::Index
    }
}

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Render a raw page type code as `"<label> (<code>)"`.
///
/// ```
/// use ibdstat::innodb::page_types::describe;
///
/// assert_eq!(describe(8), "File Space Header (8)");
/// assert_eq!(describe(9999), "Unknown (9999)");
/// ```
pub fn describe(code: u16) -> String {
    let label = PageType::from_u16(code).label().unwrap_or("Unknown");
    format!("{} ({})", label, code)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: [u16; 19] = [
        0, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 17854, 17855,
    ];

    #[test]
    fn test_page_type_from_u16() {
        assert_eq!(PageType::from_u16(0), PageType::Allocated);
        assert_eq!(PageType::from_u16(2), PageType::UndoLog);
        assert_eq!(PageType::from_u16(8), PageType::FspHdr);
        assert_eq!(PageType::from_u16(17854), PageType::Rtree);
        assert_eq!(PageType::from_u16(17855), PageType::Index);
    }

    #[test]
    fn test_every_catalogued_code_has_a_label() {
        for code in CATALOG {
            let pt = PageType::from_u16(code);
            assert!(pt.label().is_some(), "code {} has no label", code);
            assert_eq!(pt.as_u16(), code);
        }
    }

    #[test]
    fn test_codes_outside_catalog() {
        for code in [1u16, 18, 29, 17853, 9999, u16::MAX] {
            let pt = PageType::from_u16(code);
            assert_eq!(pt, PageType::Undefined(code));
            assert_eq!(pt.label(), None);
            assert_eq!(pt.as_u16(), code);
            assert_eq!(pt.name(), "UNDEFINED");
        }
    }

    #[test]
    fn test_index_label() {
        assert_eq!(PageType::from_u16(17855).label(), Some("BTree Page"));
        assert!(PageType::Index.is_index());
        assert!(!PageType::Rtree.is_index());
    }

    #[test]
    fn test_page_type_display() {
        assert_eq!(format!("{}", PageType::Index), "INDEX");
        assert_eq!(format!("{}", PageType::FspHdr), "FSP_HDR");
        assert_eq!(format!("{}", PageType::Undefined(42)), "UNDEFINED");
    }

    #[test]
    fn test_describe() {
        assert_eq!(describe(17855), "BTree Page (17855)");
        assert_eq!(describe(0), "Freshly Allocated (0)");
        assert_eq!(describe(1), "Unknown (1)");
    }
}
