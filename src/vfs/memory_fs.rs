//! This module provides a file system backend that keeps everything in process memory.

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::iter;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use tracing::{debug, trace};

use crate::core::pattern::SearchPattern;
use crate::core::utils;
use crate::core::{Error, FsBackend, Result, SearchOption};

/// A file system backend that stores file contents in memory and emulates the directory
/// hierarchy on top of plain string keys.
///
/// `MemoryFS` is meant for tests of code that is written against [`FsBackend`]: it never
/// touches the host file system, needs no teardown, and two instances never share state.
///
/// ### Internal state
///
/// * `separator`: the path separator of the emulated host. It drives parent derivation,
///   prefix checks and top-level scoping during enumeration. Defaults to the separator of
///   the platform the crate is compiled for.
///
/// * `files`: file path → content. Presence of a key is what makes a file exist.
///   Keys are stored exactly as given (case preserving, case sensitive).
///
/// * `directories`: directories that were created explicitly by `create_directory()` or
///   `create_parent_directory()`, together with all their ancestors. Writing a file
///   records nothing here.
///
/// ### Directory existence
///
/// A directory exists if it was created explicitly, **or** if any file lies below it.
/// The ancestors of a written file therefore exist implicitly:
///
/// ```
/// use std::path::Path;
/// use site_vfs::{FsBackend, MemoryFS};
///
/// let mut fs = MemoryFS::with_separator('/');
/// fs.write_all_bytes(Path::new("/site/css/main.css"), b"body{}").unwrap();
///
/// assert!(fs.directory_exists(Path::new("/site/css")).unwrap());
/// assert!(fs.directory_exists(Path::new("/site")).unwrap());
/// assert!(!fs.directory_exists(Path::new("/site/css/main.css")).unwrap());
/// ```
///
/// A consequence worth knowing: a directory that only existed because of the files below
/// it disappears once those files are deleted, unless it was also created explicitly
/// (directly, or as the ancestor of an explicitly created directory).
///
/// ### Thread Safety
///
/// Not synchronized. Wrap it in a `Mutex` if it has to be shared between threads.
#[derive(Debug, Clone)]
pub struct MemoryFS {
    separator: char,
    files: BTreeMap<String, Vec<u8>>,
    directories: BTreeSet<String>,
}

impl MemoryFS {
    /// Creates an empty file system using the platform separator.
    pub fn new() -> Self {
        Self::with_separator(MAIN_SEPARATOR)
    }

    /// Creates an empty file system that splits paths on `separator`.
    pub fn with_separator(separator: char) -> Self {
        Self {
            separator,
            files: BTreeMap::new(),
            directories: BTreeSet::new(),
        }
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    /// Number of stored files.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Returns true if `directory` was created explicitly (as opposed to existing only
    /// because something lies below it).
    pub fn is_explicit_directory<P: AsRef<Path>>(&self, directory: P) -> bool {
        directory
            .as_ref()
            .to_str()
            .is_some_and(|dir| self.directories.contains(self.dir_key(dir)))
    }

    fn dir_key<'a>(&self, directory: &'a str) -> &'a str {
        utils::trim_trailing_separators(directory, self.separator)
    }

    fn is_below(&self, candidate: &str, directory: &str) -> bool {
        utils::strip_dir_prefix(candidate, directory, self.separator).is_some()
    }

    fn has_files_below(&self, directory: &str) -> bool {
        self.files.keys().any(|key| self.is_below(key, directory))
    }

    /// `directory` followed by each of its ancestors, nearest first.
    fn with_ancestors<'a>(&self, directory: &'a str) -> impl Iterator<Item = &'a str> {
        let separator = self.separator;
        iter::successors(Some(directory), move |dir| utils::parent_of(*dir, separator))
    }

    /// The stored file that occupies `directory` or one of its ancestors, if any.
    fn file_in_the_way<'a>(&self, directory: &'a str) -> Option<&'a str> {
        self.with_ancestors(directory)
            .find(|dir| self.files.contains_key(*dir))
    }
}

fn not_a_directory(path: &str) -> Error {
    Error::Io(io::Error::new(
        io::ErrorKind::NotADirectory,
        format!("{} is a file", path),
    ))
}

fn is_a_directory(path: &str) -> Error {
    Error::Io(io::Error::new(
        io::ErrorKind::IsADirectory,
        format!("{} is a directory", path),
    ))
}

impl Default for MemoryFS {
    fn default() -> Self {
        Self::new()
    }
}

impl FsBackend for MemoryFS {
    fn file_exists(&self, path: &Path) -> Result<bool> {
        let path = utils::validate_path(path, "path")?;
        Ok(self.files.contains_key(path))
    }

    fn directory_exists(&self, path: &Path) -> Result<bool> {
        let dir = self.dir_key(utils::validate_path(path, "directory")?);
        Ok(self.directories.contains(dir) || self.has_files_below(dir))
    }

    /// Records `path` and all its ancestors as explicit directories.
    /// Fails with [`ErrorKind::Io`](crate::ErrorKind::Io) if a file occupies any of them.
    fn create_directory(&mut self, path: &Path) -> Result<()> {
        let dir = self.dir_key(utils::validate_path(path, "directory")?);
        if let Some(file) = self.file_in_the_way(dir) {
            return Err(not_a_directory(file));
        }
        let missing: Vec<String> = self
            .with_ancestors(dir)
            .filter(|dir| !self.directories.contains(*dir))
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            self.directories.extend(missing);
            debug!(directory = dir, "created directory");
        }
        Ok(())
    }

    /// A path without a parent (a bare name or a root) is left alone.
    fn create_parent_directory(&mut self, path: &Path) -> Result<()> {
        let path = utils::validate_path(path, "path")?;
        if let Some(parent) = utils::parent_of(path, self.separator) {
            self.create_directory(Path::new(parent))?;
        }
        Ok(())
    }

    /// The parent directories are not recorded: they exist only as long as some file lies
    /// below them. Writing onto a directory, or below a file, fails with
    /// [`ErrorKind::Io`](crate::ErrorKind::Io).
    fn write_all_bytes(&mut self, path: &Path, bytes: &[u8]) -> Result<()> {
        let key = utils::validate_path(path, "path")?;
        if self.directory_exists(path)? {
            return Err(is_a_directory(key));
        }
        let parent = utils::parent_of(key, self.separator);
        if let Some(file) = parent.and_then(|parent| self.file_in_the_way(parent)) {
            return Err(not_a_directory(file));
        }
        self.files.insert(key.to_string(), bytes.to_vec());
        debug!(path = key, bytes = bytes.len(), "wrote file");
        Ok(())
    }

    fn read_all_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        let key = utils::validate_path(path, "path")?;
        trace!(path = key, "reading file");
        self.files
            .get(key)
            .cloned()
            .ok_or_else(|| Error::FileNotFound {
                path: path.to_path_buf(),
            })
    }

    fn delete_file(&mut self, path: &Path) -> Result<()> {
        let key = utils::validate_path(path, "path")?;
        if self.files.remove(key).is_some() {
            debug!(path = key, "deleted file");
        }
        Ok(())
    }

    fn delete_directory(&mut self, path: &Path) -> Result<()> {
        let dir = self.dir_key(utils::validate_path(path, "directory")?).to_string();
        let separator = self.separator;
        let below = |key: &String| utils::strip_dir_prefix(key, &dir, separator).is_some();

        let files_before = self.files.len();
        self.files.retain(|key, _| !below(key));
        let explicit = self.directories.remove(&dir);
        self.directories.retain(|key| !below(key));

        let removed = files_before - self.files.len();
        if explicit || removed > 0 {
            debug!(directory = %dir, files = removed, "deleted directory");
        }
        Ok(())
    }

    fn enumerate_files(
        &self,
        directory: &Path,
        pattern: &str,
        option: SearchOption,
    ) -> Result<Vec<PathBuf>> {
        let dir = self.dir_key(utils::validate_path(directory, "directory")?);
        let pattern = SearchPattern::new(pattern)?;
        if !self.directory_exists(directory)? {
            return Err(Error::DirectoryNotFound {
                path: directory.to_path_buf(),
            });
        }

        let files: Vec<PathBuf> = self
            .files
            .keys()
            .filter(|key| {
                let Some(rest) = utils::strip_dir_prefix(key, dir, self.separator) else {
                    return false;
                };
                if option == SearchOption::TopDirectoryOnly && rest.contains(self.separator) {
                    return false;
                }
                pattern.is_match(utils::file_name_of(rest, self.separator))
            })
            .map(PathBuf::from)
            .collect();

        trace!(
            directory = dir,
            pattern = pattern.as_str(),
            %option,
            found = files.len(),
            "enumerated files"
        );
        Ok(files)
    }
}
