//! A decorator that forces every file and directory name to lower case.

use std::path::{Path, PathBuf};

use tracing::trace;

use crate::core::encoding::Encoding;
use crate::core::{Error, FsBackend, Result, SearchOption};

/// Wraps another backend and lower-cases every path before handing it on, and every path
/// that enumeration hands back.
///
/// Useful in front of a case-sensitive store (or `MemoryFS`) when the build must behave
/// the same as on a case-insensitive host. The search pattern is passed through untouched.
///
/// Apart from rejecting a non-Unicode path (it could not be lower-cased), all argument
/// checking is left to the wrapped backend.
#[derive(Debug, Clone, Default)]
pub struct CaseNormalizingFS<F> {
    inner: F,
}

impl<F: FsBackend> CaseNormalizingFS<F> {
    pub fn new(inner: F) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }

    pub fn into_inner(self) -> F {
        self.inner
    }

    fn lower(path: &Path) -> Result<PathBuf> {
        let Some(text) = path.to_str() else {
            return Err(Error::invalid_argument(
                "path",
                format!("{:?} is not valid unicode", path),
            ));
        };
        Ok(PathBuf::from(text.to_lowercase()))
    }
}

impl<F: FsBackend> FsBackend for CaseNormalizingFS<F> {
    fn file_exists(&self, path: &Path) -> Result<bool> {
        self.inner.file_exists(&Self::lower(path)?)
    }

    fn directory_exists(&self, path: &Path) -> Result<bool> {
        self.inner.directory_exists(&Self::lower(path)?)
    }

    fn create_directory(&mut self, path: &Path) -> Result<()> {
        self.inner.create_directory(&Self::lower(path)?)
    }

    fn create_parent_directory(&mut self, path: &Path) -> Result<()> {
        self.inner.create_parent_directory(&Self::lower(path)?)
    }

    fn write_all_bytes(&mut self, path: &Path, bytes: &[u8]) -> Result<()> {
        self.inner.write_all_bytes(&Self::lower(path)?, bytes)
    }

    fn read_all_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        self.inner.read_all_bytes(&Self::lower(path)?)
    }

    fn delete_file(&mut self, path: &Path) -> Result<()> {
        self.inner.delete_file(&Self::lower(path)?)
    }

    fn delete_directory(&mut self, path: &Path) -> Result<()> {
        self.inner.delete_directory(&Self::lower(path)?)
    }

    fn enumerate_files(
        &self,
        directory: &Path,
        pattern: &str,
        option: SearchOption,
    ) -> Result<Vec<PathBuf>> {
        let directory = Self::lower(directory)?;
        let files = self.inner.enumerate_files(&directory, pattern, option)?;
        trace!(directory = %directory.display(), found = files.len(), "lower-casing results");
        files.iter().map(|file| Self::lower(file)).collect()
    }

    fn read_all_text(&self, path: &Path) -> Result<String> {
        self.inner.read_all_text(&Self::lower(path)?)
    }

    fn read_all_text_with(&self, path: &Path, encoding: Encoding) -> Result<String> {
        self.inner.read_all_text_with(&Self::lower(path)?, encoding)
    }

    fn write_all_text(&mut self, path: &Path, text: &str) -> Result<()> {
        self.inner.write_all_text(&Self::lower(path)?, text)
    }

    fn write_all_text_with(&mut self, path: &Path, text: &str, encoding: Encoding) -> Result<()> {
        self.inner
            .write_all_text_with(&Self::lower(path)?, text, encoding)
    }
}
