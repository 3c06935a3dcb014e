//! Whole-tablespace scan and aggregation.
//!
//! [`TablespaceScanner`] walks every page of a [`PageStore`] in ascending
//! order, counts page types, and for each B+Tree INDEX page folds its level
//! and type into the statistics of the index it belongs to. The result is
//! fully materialized before it is returned; any decode failure aborts the
//! scan and no partial statistics are surfaced.
//!
//! Every page from 1 through the page count is visited, the last page
//! included.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, trace};

use crate::innodb::index::{self, FsegHeader, SegmentKind};
use crate::innodb::page;
use crate::innodb::page_types::PageType;
use crate::innodb::store::PageStore;
use crate::IbdError;

/// Counter key for pages of an index at B+Tree level `level`.
pub fn level_key(level: u16) -> String {
    format!("level_{}_page", level)
}

/// Counter key for pages of an index with page type `code`.
pub fn page_type_key(code: u16) -> String {
    format!("page_type_{}", code)
}

/// Statistics for a single index, keyed by index ID in [`TablespaceStats`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    /// Pages attributed to this index.
    pub pages: u64,
    /// Page count per B+Tree level (0 = leaf).
    pub levels: BTreeMap<u16, u64>,
    /// Page count per page type code.
    pub page_types: BTreeMap<u16, u64>,
    /// 1-based number of the first page whose leaf segment header is present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_page: Option<u32>,
}

impl IndexStats {
    fn record(&mut self, level: u16, page_type: u16) {
        self.pages += 1;
        *self.levels.entry(level).or_insert(0) += 1;
        *self.page_types.entry(page_type).or_insert(0) += 1;
    }

    /// Counters keyed `level_<N>_page` and `page_type_<code>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ibdstat::innodb::scan::IndexStats;
    ///
    /// let mut stats = IndexStats::default();
    /// stats.levels.insert(0, 3);
    /// stats.page_types.insert(17855, 3);
    ///
    /// let counters = stats.counters();
    /// assert_eq!(counters["level_0_page"], 3);
    /// assert_eq!(counters["page_type_17855"], 3);
    /// ```
    pub fn counters(&self) -> BTreeMap<String, u64> {
        let levels = self.levels.iter().map(|(&l, &n)| (level_key(l), n));
        let types = self.page_types.iter().map(|(&t, &n)| (page_type_key(t), n));
        levels.chain(types).collect()
    }

    /// Look up a single counter by its key.
    pub fn counter(&self, key: &str) -> Option<u64> {
        if let Some(level) = parse_key(key, "level_", "_page") {
            return self.levels.get(&level).copied();
        }
        if let Some(code) = parse_key(key, "page_type_", "") {
            return self.page_types.get(&code).copied();
        }
        None
    }

    /// Number of levels seen (highest level + 1), 0 if no pages were recorded.
    pub fn height(&self) -> u16 {
        self.levels
            .keys()
            .next_back()
            .map_or(0, |&top| top.saturating_add(1))
    }
}

fn parse_key(key: &str, prefix: &str, suffix: &str) -> Option<u16> {
    key.strip_prefix(prefix)?.strip_suffix(suffix)?.parse().ok()
}

/// Aggregate statistics for a whole tablespace.
#[derive(Debug, Clone, Serialize)]
pub struct TablespaceStats {
    /// File that was scanned (`<memory>` for in-memory stores).
    pub path: String,
    /// Space ID read from the FIL header of page 1.
    pub space_id: u32,
    pub page_size: u32,
    /// Whole pages in the file.
    pub total_pages: u32,
    /// Pages visited by the scan.
    pub scanned_pages: u32,
    /// Pages whose type is INDEX, whether or not they belong to an index.
    pub index_pages: u64,
    /// Page count per page type code.
    pub page_types: BTreeMap<u16, u64>,
    /// Per-index statistics keyed by index ID.
    pub indexes: BTreeMap<u64, IndexStats>,
}

/// Drives a full scan over a [`PageStore`].
pub struct TablespaceScanner<'a> {
    store: &'a mut PageStore,
    progress: Option<Box<dyn FnMut(u32) + 'a>>,
}

impl<'a> TablespaceScanner<'a> {
    pub fn new(store: &'a mut PageStore) -> Self {
        TablespaceScanner {
            store,
            progress: None,
        }
    }

    /// Call `callback` with each page number after the page has been folded in.
    pub fn with_progress<F>(mut self, callback: F) -> Self
    where
        F: FnMut(u32) + 'a,
    {
        self.progress = Some(Box::new(callback));
        self
    }

    /// Visit every page and return the aggregated statistics.
    ///
    /// The page count is established before any page is read, so an empty
    /// file fails with [`IbdError::Argument`] without touching page 1.
    pub fn run(mut self) -> Result<TablespaceStats, IbdError> {
        let total_pages = self.store.page_count().map_err(|e| e.context("scan"))?;
        let space_id = page::space_id(self.store, 1).map_err(|e| e.context("scan page 1"))?;
        let path = self
            .store
            .path()
            .map_or_else(|| "<memory>".to_string(), |p| p.display().to_string());

        debug!(%path, space_id, total_pages, "scanning tablespace");

        let mut stats = TablespaceStats {
            path,
            space_id,
            page_size: self.store.page_size(),
            total_pages,
            scanned_pages: 0,
            index_pages: 0,
            page_types: BTreeMap::new(),
            indexes: BTreeMap::new(),
        };

        for page_no in 1..=total_pages {
            self.visit(page_no, &mut stats)
                .map_err(|e| e.context(format!("scan page {}", page_no)))?;
            stats.scanned_pages += 1;
            if let Some(progress) = self.progress.as_mut() {
                progress(page_no);
            }
        }

        debug!(
            scanned = stats.scanned_pages,
            index_pages = stats.index_pages,
            indexes = stats.indexes.len(),
            "scan complete"
        );

        Ok(stats)
    }

    fn visit(&mut self, page_no: u32, stats: &mut TablespaceStats) -> Result<(), IbdError> {
        let code = page::page_type(self.store, page_no)?;
        *stats.page_types.entry(code).or_insert(0) += 1;

        if !PageType::from_u16(code).is_index() {
            trace!(page = page_no, page_type = code, "skipping non-index page");
            return Ok(());
        }
        stats.index_pages += 1;

        // Freshly allocated index pages carry index id 0 and belong to no index
        let index_id = index::index_id(self.store, page_no)?;
        if index_id == 0 {
            trace!(page = page_no, "index page without index id");
            return Ok(());
        }

        let level = index::page_level(self.store, page_no)?;
        trace!(page = page_no, index_id, level, "index page");

        let entry = stats.indexes.entry(index_id).or_default();
        entry.record(level, code);
        if entry.root_page.is_none()
            && FsegHeader::read(self.store, page_no, SegmentKind::Leaf)?.is_some()
        {
            entry.root_page = Some(page_no);
        }

        Ok(())
    }
}

/// Scan the tablespace at `path` with the default page size.
pub fn scan<P: AsRef<Path>>(path: P) -> Result<TablespaceStats, IbdError> {
    let mut store = PageStore::new(path);
    TablespaceScanner::new(&mut store).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::innodb::constants::*;
    use byteorder::{BigEndian, ByteOrder};

    const PS: usize = SIZE_PAGE_DEFAULT as usize;

    fn page_of_type(page_type: u16) -> Vec<u8> {
        let mut page = vec![0u8; PS];
        BigEndian::write_u16(&mut page[FIL_PAGE_TYPE..], page_type);
        page
    }

    fn index_page(index_id: u64, level: u16) -> Vec<u8> {
        let mut page = page_of_type(17855);
        BigEndian::write_u16(&mut page[FIL_PAGE_DATA + PAGE_LEVEL..], level);
        BigEndian::write_u64(&mut page[FIL_PAGE_DATA + PAGE_INDEX_ID..], index_id);
        page
    }

    #[test]
    fn test_keys() {
        assert_eq!(level_key(0), "level_0_page");
        assert_eq!(page_type_key(17855), "page_type_17855");
    }

    #[test]
    fn test_counter_lookup() {
        let mut stats = IndexStats::default();
        stats.record(0, 17855);
        stats.record(0, 17855);
        stats.record(2, 17855);
        assert_eq!(stats.counter("level_0_page"), Some(2));
        assert_eq!(stats.counter("level_2_page"), Some(1));
        assert_eq!(stats.counter("level_1_page"), None);
        assert_eq!(stats.counter("page_type_17855"), Some(3));
        assert_eq!(stats.counter("bogus"), None);
        assert_eq!(stats.height(), 3);
        assert_eq!(stats.pages, 3);
    }

    #[test]
    fn test_scan_in_memory() {
        let mut data = page_of_type(8);
        data.extend(index_page(7, 1));
        data.extend(index_page(7, 0));
        data.extend(page_of_type(0));
        let mut store = PageStore::from_bytes(data);

        let stats = TablespaceScanner::new(&mut store).run().unwrap();
        assert_eq!(stats.path, "<memory>");
        assert_eq!(stats.total_pages, 4);
        assert_eq!(stats.scanned_pages, 4);
        assert_eq!(stats.page_types.values().sum::<u64>(), 4);
        assert_eq!(stats.page_types[&17855], 2);

        let idx = &stats.indexes[&7];
        assert_eq!(idx.counter("level_0_page"), Some(1));
        assert_eq!(idx.counter("level_1_page"), Some(1));
        assert_eq!(idx.counter("page_type_17855"), Some(2));
        assert_eq!(idx.root_page, None);
    }

    #[test]
    fn test_progress_sees_every_page() {
        let mut data = page_of_type(8);
        data.extend(page_of_type(0));
        data.extend(page_of_type(0));
        let mut store = PageStore::from_bytes(data);

        let mut seen = Vec::new();
        TablespaceScanner::new(&mut store)
            .with_progress(|p| seen.push(p))
            .run()
            .unwrap();
        assert_eq!(seen, vec![1, 2, 3]);
    }
}
