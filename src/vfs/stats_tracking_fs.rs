//! A decorator that counts the files and bytes moved through it.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::core::encoding::Encoding;
use crate::core::utils::extension_of;
use crate::core::{FsBackend, Result, SearchOption};
use crate::vfs::stats::{FileSystemStats, StatsReport};

/// A backend that can report how much I/O has passed through it.
pub trait CountingBackend: FsBackend {
    /// Counters summed over every file.
    fn total_stats(&self) -> FileSystemStats;

    /// Counters keyed by lower-cased file extension (leading dot included, `""` for none).
    fn stats_by_extension(&self) -> BTreeMap<String, FileSystemStats>;

    /// Snapshot of the current counters as a printable report.
    fn report(&self) -> StatsReport {
        StatsReport::new(self.total_stats(), self.stats_by_extension())
    }
}

/// Wraps another backend and tallies every successful whole-file read and write,
/// both in total and per extension.
///
/// Text operations are counted by the encoded length of the text, without any
/// byte-order mark. Operations that fail in the wrapped backend leave the counters
/// untouched, and everything other than reads and writes is passed through uncounted.
///
/// Counters live behind `Cell`/`RefCell` so reads can be tallied through `&self`;
/// the type is therefore not `Sync`.
#[derive(Debug, Default)]
pub struct StatsTrackingFS<F> {
    inner: F,
    total: Cell<FileSystemStats>,
    by_extension: RefCell<BTreeMap<String, FileSystemStats>>,
}

impl<F: FsBackend> StatsTrackingFS<F> {
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            total: Cell::new(FileSystemStats::default()),
            by_extension: RefCell::new(BTreeMap::new()),
        }
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }

    pub fn into_inner(self) -> F {
        self.inner
    }

    /// Counters for one extension, in any case, if a file with it has been read or written.
    pub fn stats_for_extension(&self, extension: &str) -> Option<FileSystemStats> {
        self.by_extension
            .borrow()
            .get(&extension.to_lowercase())
            .copied()
    }

    fn record(&self, path: &Path, update: impl Fn(&mut FileSystemStats)) {
        let path = path.to_string_lossy();
        let extension = extension_of(&path).to_lowercase();

        let mut total = self.total.get();
        update(&mut total);
        self.total.set(total);

        let mut by_extension = self.by_extension.borrow_mut();
        trace!(path = %path, extension = %extension, "counted");
        update(by_extension.entry(extension).or_default());
    }

    fn record_read(&self, path: &Path, bytes: usize) {
        self.record(path, |stats| stats.record_read(bytes));
    }

    fn record_write(&self, path: &Path, bytes: usize) {
        self.record(path, |stats| stats.record_write(bytes));
    }
}

impl<F: FsBackend> CountingBackend for StatsTrackingFS<F> {
    fn total_stats(&self) -> FileSystemStats {
        self.total.get()
    }

    fn stats_by_extension(&self) -> BTreeMap<String, FileSystemStats> {
        self.by_extension.borrow().clone()
    }
}

impl<F: FsBackend> FsBackend for StatsTrackingFS<F> {
    fn file_exists(&self, path: &Path) -> Result<bool> {
        self.inner.file_exists(path)
    }

    fn directory_exists(&self, path: &Path) -> Result<bool> {
        self.inner.directory_exists(path)
    }

    fn create_directory(&mut self, path: &Path) -> Result<()> {
        self.inner.create_directory(path)
    }

    fn create_parent_directory(&mut self, path: &Path) -> Result<()> {
        self.inner.create_parent_directory(path)
    }

    fn write_all_bytes(&mut self, path: &Path, bytes: &[u8]) -> Result<()> {
        self.inner.write_all_bytes(path, bytes)?;
        self.record_write(path, bytes.len());
        Ok(())
    }

    fn read_all_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        let bytes = self.inner.read_all_bytes(path)?;
        self.record_read(path, bytes.len());
        Ok(bytes)
    }

    fn delete_file(&mut self, path: &Path) -> Result<()> {
        self.inner.delete_file(path)
    }

    fn delete_directory(&mut self, path: &Path) -> Result<()> {
        self.inner.delete_directory(path)
    }

    fn enumerate_files(
        &self,
        directory: &Path,
        pattern: &str,
        option: SearchOption,
    ) -> Result<Vec<PathBuf>> {
        self.inner.enumerate_files(directory, pattern, option)
    }

    fn read_all_text(&self, path: &Path) -> Result<String> {
        self.read_all_text_with(path, Encoding::default())
    }

    fn read_all_text_with(&self, path: &Path, encoding: Encoding) -> Result<String> {
        let text = self.inner.read_all_text_with(path, encoding)?;
        self.record_read(path, encoding.byte_count(&text));
        Ok(text)
    }

    fn write_all_text(&mut self, path: &Path, text: &str) -> Result<()> {
        self.write_all_text_with(path, text, Encoding::default())
    }

    fn write_all_text_with(&mut self, path: &Path, text: &str, encoding: Encoding) -> Result<()> {
        self.inner.write_all_text_with(path, text, encoding)?;
        self.record_write(path, encoding.byte_count(text));
        Ok(())
    }
}
