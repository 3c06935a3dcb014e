//! Page-addressed access to a tablespace file.
//!
//! [`PageStore`] owns the file handle and the page geometry. Every read names
//! its page explicitly: there is no "current page" kept between calls, so a
//! store can be handed from one decoder to the next without any of them
//! observing state left behind by another. Page numbers are 1-based; a field
//! at offset `f` of page `p` is read from byte `(p - 1) * page_size + f`.
//!
//! The handle is opened lazily, on the first read or size query, and stays
//! open until the store is dropped. Independent scans of the same file use
//! independent stores.

use std::fs::File;
use std::io::{Cursor, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use byteorder::{BigEndian, ByteOrder};
use tracing::debug;

use crate::innodb::constants::*;
use crate::IbdError;

/// Supertrait combining `Read + Seek` for type-erased readers.
pub(crate) trait ReadSeek: Read + Seek {}
impl<T: Read + Seek> ReadSeek for T {}

mod private {
    pub trait Sealed {}
    impl Sealed for u16 {}
    impl Sealed for u32 {}
    impl Sealed for u64 {}
}

/// An unsigned big-endian scalar that can be decoded from a page field.
///
/// Implemented for `u16`, `u32` and `u64`, the only widths used by the
/// FIL and INDEX headers.
pub trait BeField: private::Sealed + Copy {
    /// Width of the field in bytes.
    const WIDTH: usize;

    /// Decode from the first `WIDTH` bytes of `buf`.
    fn decode(buf: &[u8]) -> Self;
}

impl BeField for u16 {
    const WIDTH: usize = 2;
    fn decode(buf: &[u8]) -> Self {
        BigEndian::read_u16(buf)
    }
}

impl BeField for u32 {
    const WIDTH: usize = 4;
    fn decode(buf: &[u8]) -> Self {
        BigEndian::read_u32(buf)
    }
}

impl BeField for u64 {
    const WIDTH: usize = 8;
    fn decode(buf: &[u8]) -> Self {
        BigEndian::read_u64(buf)
    }
}

/// Supported field widths for untyped reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldWidth {
    Two,
    Four,
    Eight,
}

impl FieldWidth {
    /// Map a byte count to a width, rejecting anything but 2, 4 or 8.
    pub fn from_bytes(width: usize) -> Result<Self, IbdError> {
        match width {
            2 => Ok(FieldWidth::Two),
            4 => Ok(FieldWidth::Four),
            8 => Ok(FieldWidth::Eight),
            other => Err(IbdError::Argument(format!(
                "unsupported field width {} (expected 2, 4 or 8)",
                other
            ))),
        }
    }

}

/// A tablespace file viewed as a sequence of fixed-size pages.
pub struct PageStore {
    path: Option<PathBuf>,
    page_size: u32,
    reader: Option<Box<dyn ReadSeek>>,
    file_size: Option<u64>,
}

impl PageStore {
    /// Create a store for the file at `path` with the default 16 KiB page size.
    ///
    /// Nothing is opened until the first read.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        PageStore {
            path: Some(path.as_ref().to_path_buf()),
            page_size: SIZE_PAGE_DEFAULT,
            reader: None,
            file_size: None,
        }
    }

    /// Create a store with an explicit page size (4, 8, 16, 32 or 64 KiB).
    pub fn with_page_size<P: AsRef<Path>>(path: P, page_size: u32) -> Result<Self, IbdError> {
        validate_page_size(page_size)?;
        let mut store = Self::new(path);
        store.page_size = page_size;
        Ok(store)
    }

    /// Create a store over an in-memory tablespace image.
    pub fn from_bytes(data: Vec<u8>) -> Self {
        let file_size = data.len() as u64;
        PageStore {
            path: None,
            page_size: SIZE_PAGE_DEFAULT,
            reader: Some(Box::new(Cursor::new(data))),
            file_size: Some(file_size),
        }
    }

    /// Create an in-memory store with an explicit page size.
    pub fn from_bytes_with_page_size(data: Vec<u8>, page_size: u32) -> Result<Self, IbdError> {
        validate_page_size(page_size)?;
        let mut store = Self::from_bytes(data);
        store.page_size = page_size;
        Ok(store)
    }

    /// Path of the underlying file, `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Page size in bytes. Fixed for the lifetime of the store.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Size of the underlying file in bytes.
    pub fn file_size(&mut self) -> Result<u64, IbdError> {
        self.reader()?;
        self.file_size
            .ok_or_else(|| IbdError::Io("file size unavailable".to_string()))
    }

    /// Number of whole pages in the file. A trailing partial page is not counted.
    ///
    /// Fails with [`IbdError::Argument`] if the file is empty.
    pub fn page_count(&mut self) -> Result<u32, IbdError> {
        let size = self.file_size()?;
        if size == 0 {
            return Err(IbdError::Argument(format!(
                "file size is zero: {}",
                self.display_name()
            )));
        }
        let count = size / self.page_size as u64;
        u32::try_from(count)
            .map_err(|_| IbdError::Argument(format!("too many pages in file: {}", count)))
    }

    /// Absolute byte offset of a `width`-byte field at `field` within `page`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ibdstat::innodb::store::PageStore;
    ///
    /// let store = PageStore::from_bytes(vec![0u8; 16384 * 3]);
    /// assert_eq!(store.page_offset(1, 24, 2).unwrap(), 24);
    /// assert_eq!(store.page_offset(3, 34, 4).unwrap(), 2 * 16384 + 34);
    /// assert!(store.page_offset(0, 24, 2).is_err());
    /// ```
    pub fn page_offset(&self, page: u32, field: usize, width: usize) -> Result<u64, IbdError> {
        if page < 1 {
            return Err(IbdError::Argument(format!(
                "invalid page number {} (page numbers start at 1)",
                page
            )));
        }
        let past_end = field
            .checked_add(width)
            .map_or(true, |end| end > self.page_size as usize);
        if past_end {
            return Err(IbdError::Argument(format!(
                "field at offset {} (width {}) lies outside a {}-byte page",
                field, width, self.page_size
            )));
        }
        Ok((page as u64 - 1) * self.page_size as u64 + field as u64)
    }

    /// Read a big-endian field of type `T` at `field` within `page`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ibdstat::innodb::store::PageStore;
    ///
    /// let mut data = vec![0u8; 16384 * 2];
    /// data[16384 + 24] = 0x45;
    /// data[16384 + 25] = 0xBF;
    /// let mut store = PageStore::from_bytes(data);
    /// assert_eq!(store.read::<u16>(2, 24).unwrap(), 17855);
    /// ```
    pub fn read<T: BeField>(&mut self, page: u32, field: usize) -> Result<T, IbdError> {
        let offset = self.page_offset(page, field, T::WIDTH)?;
        if self.file_size()? == 0 {
            return Err(IbdError::Argument(format!(
                "file size is zero: {}",
                self.display_name()
            )));
        }
        let reader = self.reader()?;

        reader.seek(SeekFrom::Start(offset)).map_err(|e| {
            IbdError::Io(format!(
                "Cannot seek to page {} at offset {}: {}",
                page, offset, e
            ))
        })?;

        let mut buf = [0u8; 8];
        reader.read_exact(&mut buf[..T::WIDTH]).map_err(|e| {
            IbdError::Io(format!(
                "Cannot read page {} at offset {}: {}",
                page, offset, e
            ))
        })?;

        Ok(T::decode(&buf[..T::WIDTH]))
    }

    /// Read a field whose width is only known at runtime.
    ///
    /// `width` must be 2, 4 or 8; the value is widened to `u64`.
    pub fn read_field(&mut self, page: u32, field: usize, width: usize) -> Result<u64, IbdError> {
        match FieldWidth::from_bytes(width)? {
            FieldWidth::Two => self.read::<u16>(page, field).map(u64::from),
            FieldWidth::Four => self.read::<u32>(page, field).map(u64::from),
            FieldWidth::Eight => self.read::<u64>(page, field),
        }
    }

    /// Return the open reader, opening the file on first use.
    fn reader(&mut self) -> Result<&mut Box<dyn ReadSeek>, IbdError> {
        if self.reader.is_none() {
            let path = self
                .path
                .as_ref()
                .ok_or_else(|| IbdError::Io("no file backs this page store".to_string()))?;

            let file = File::open(path)
                .map_err(|e| IbdError::Io(format!("Cannot open {}: {}", path.display(), e)))?;
            let file_size = file
                .metadata()
                .map_err(|e| IbdError::Io(format!("Cannot stat {}: {}", path.display(), e)))?
                .len();

            debug!(
                path = %path.display(),
                file_size,
                page_size = self.page_size,
                "opened tablespace"
            );

            self.file_size = Some(file_size);
            self.reader = Some(Box::new(file));
        }

        self.reader
            .as_mut()
            .ok_or_else(|| IbdError::Io("tablespace reader unavailable".to_string()))
    }

    fn display_name(&self) -> String {
        match &self.path {
            Some(p) => p.display().to_string(),
            None => "<memory>".to_string(),
        }
    }
}

fn validate_page_size(page_size: u32) -> Result<(), IbdError> {
    match page_size {
        SIZE_PAGE_4K | SIZE_PAGE_8K | SIZE_PAGE_16K | SIZE_PAGE_32K | SIZE_PAGE_64K => Ok(()),
        other => Err(IbdError::Argument(format!(
            "unsupported page size {} (expected 4096, 8192, 16384, 32768 or 65536)",
            other
        ))),
    }
}
