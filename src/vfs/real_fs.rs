//! This module provides a file system backend that works directly on the host's storage.
//!
//! ### Key Features:
//! - **Stateless**: every call goes straight to `std::fs`; nothing is cached.
//! - **Parent creation**: writes create missing parent directories first.
//! - **Idempotent deletes**: deleting something that is not there is a success.
//! - **Portable wildcards**: file names are matched with the same pattern rules as
//!   `MemoryFS`, independent of what the host shell would do.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::core::pattern::SearchPattern;
use crate::core::utils;
use crate::core::{Error, FsBackend, Result, SearchOption};

/// A file system backend backed by the host's real directories and files.
///
/// ### Usage notes:
/// - Paths are used as given: relative paths resolve against the process working
///   directory.
/// - Host failures (permissions, full disk, a file where a directory is expected) are
///   returned as `Error::Io`.
///
/// ### Example:
/// ```no_run
/// use std::path::Path;
/// use site_vfs::{FsBackend, RealFS};
///
/// let mut fs = RealFS::new();
/// fs.write_all_text(Path::new("/tmp/site/out/index.html"), "<html/>").unwrap();
/// assert!(fs.directory_exists(Path::new("/tmp/site/out")).unwrap());
/// fs.delete_directory(Path::new("/tmp/site")).unwrap();
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFS;

impl RealFS {
    pub fn new() -> Self {
        Self
    }

    fn top_level_files(directory: &Path, pattern: &SearchPattern) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(directory)? {
            let entry = entry?;
            if entry.file_type()?.is_file() && pattern.is_match(&entry.file_name().to_string_lossy())
            {
                files.push(entry.path());
            }
        }
        Ok(files)
    }

    fn all_files(directory: &Path, pattern: &SearchPattern) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(directory).min_depth(1) {
            let entry = entry.map_err(std::io::Error::from)?;
            if entry.file_type().is_file() && pattern.is_match(&entry.file_name().to_string_lossy())
            {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }
}

impl FsBackend for RealFS {
    fn file_exists(&self, path: &Path) -> Result<bool> {
        utils::validate_path(path, "path")?;
        Ok(path.is_file())
    }

    fn directory_exists(&self, path: &Path) -> Result<bool> {
        utils::validate_path(path, "directory")?;
        Ok(path.is_dir())
    }

    /// Creates `path` and all its parents, if necessary.
    fn create_directory(&mut self, path: &Path) -> Result<()> {
        utils::validate_path(path, "directory")?;
        if !path.is_dir() {
            fs::create_dir_all(path)?;
            debug!(directory = %path.display(), "created directory");
        }
        Ok(())
    }

    fn create_parent_directory(&mut self, path: &Path) -> Result<()> {
        utils::validate_path(path, "path")?;
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => self.create_directory(parent),
            _ => Ok(()),
        }
    }

    fn write_all_bytes(&mut self, path: &Path, bytes: &[u8]) -> Result<()> {
        utils::validate_path(path, "path")?;
        self.create_parent_directory(path)?;
        fs::write(path, bytes)?;
        debug!(path = %path.display(), bytes = bytes.len(), "wrote file");
        Ok(())
    }

    fn read_all_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        utils::validate_path(path, "path")?;
        if !path.is_file() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        trace!(path = %path.display(), "reading file");
        Ok(fs::read(path)?)
    }

    fn delete_file(&mut self, path: &Path) -> Result<()> {
        utils::validate_path(path, "path")?;
        if path.is_file() {
            fs::remove_file(path)?;
            debug!(path = %path.display(), "deleted file");
        }
        Ok(())
    }

    fn delete_directory(&mut self, path: &Path) -> Result<()> {
        utils::validate_path(path, "directory")?;
        if path.is_dir() {
            fs::remove_dir_all(path)?;
            debug!(directory = %path.display(), "deleted directory");
        }
        Ok(())
    }

    fn enumerate_files(
        &self,
        directory: &Path,
        pattern: &str,
        option: SearchOption,
    ) -> Result<Vec<PathBuf>> {
        utils::validate_path(directory, "directory")?;
        let pattern = SearchPattern::new(pattern)?;
        if !directory.is_dir() {
            return Err(Error::DirectoryNotFound {
                path: directory.to_path_buf(),
            });
        }

        let mut files = match option {
            SearchOption::TopDirectoryOnly => Self::top_level_files(directory, &pattern)?,
            SearchOption::AllDirectories => Self::all_files(directory, &pattern)?,
        };
        files.sort();

        trace!(
            directory = %directory.display(),
            pattern = pattern.as_str(),
            %option,
            found = files.len(),
            "enumerated files"
        );
        Ok(files)
    }
}
