use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub mod encoding;
pub mod error;
pub mod pattern;
pub mod utils;

use encoding::Encoding;
pub use error::{Error, ErrorKind, Result};

/// Scope of an `enumerate_files` call.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum SearchOption {
    /// Only files directly inside the directory.
    #[default]
    TopDirectoryOnly,
    /// Files anywhere below the directory.
    AllDirectories,
}

impl TryFrom<i32> for SearchOption {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            0 => Ok(SearchOption::TopDirectoryOnly),
            1 => Ok(SearchOption::AllDirectories),
            _ => Err(Error::out_of_range(
                "search_option",
                format!("{} is not a valid search option", value),
            )),
        }
    }
}

impl FromStr for SearchOption {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "top" | "TopDirectoryOnly" => Ok(SearchOption::TopDirectoryOnly),
            "all" | "AllDirectories" => Ok(SearchOption::AllDirectories),
            _ => Err(Error::out_of_range(
                "search_option",
                format!("{:?} is not a valid search option", s),
            )),
        }
    }
}

impl fmt::Display for SearchOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchOption::TopDirectoryOnly => f.write_str("TopDirectoryOnly"),
            SearchOption::AllDirectories => f.write_str("AllDirectories"),
        }
    }
}

/// The capability set shared by every backend and decorator.
///
/// Every path argument is validated the same way by every implementation: a path that is
/// not valid Unicode yields [`ErrorKind::InvalidArgument`], an empty or whitespace-only
/// path yields [`ErrorKind::OutOfRange`].
///
/// Creating a directory that exists, or deleting a file/directory that does not, succeeds.
pub trait FsBackend {
    fn file_exists(&self, path: &Path) -> Result<bool>;

    /// Returns true if `path` is an existing directory.
    fn directory_exists(&self, path: &Path) -> Result<bool>;

    /// Creates `path` (and its ancestors) if needed.
    fn create_directory(&mut self, path: &Path) -> Result<()>;

    /// Creates the parent directory of `path`; `path` itself is not created.
    fn create_parent_directory(&mut self, path: &Path) -> Result<()>;

    /// Writes `bytes` to `path`, creating parent directories and replacing any previous
    /// content. An empty slice produces an empty file.
    fn write_all_bytes(&mut self, path: &Path, bytes: &[u8]) -> Result<()>;

    /// Reads the whole file. Fails with [`ErrorKind::NotFound`] if it does not exist.
    fn read_all_bytes(&self, path: &Path) -> Result<Vec<u8>>;

    fn delete_file(&mut self, path: &Path) -> Result<()>;

    /// Removes `path` and everything below it.
    fn delete_directory(&mut self, path: &Path) -> Result<()>;

    /// Lists files in `directory` whose name matches the wildcard `pattern`.
    /// Returned paths start with `directory`. Directories themselves are never returned.
    /// Fails with [`ErrorKind::NotFound`] if `directory` does not exist.
    fn enumerate_files(
        &self,
        directory: &Path,
        pattern: &str,
        option: SearchOption,
    ) -> Result<Vec<PathBuf>>;

    /// All files directly inside `directory`.
    fn enumerate_all(&self, directory: &Path) -> Result<Vec<PathBuf>> {
        self.enumerate_files(directory, "*", SearchOption::TopDirectoryOnly)
    }

    /// Files directly inside `directory` matching `pattern`.
    fn enumerate_matching(&self, directory: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
        self.enumerate_files(directory, pattern, SearchOption::TopDirectoryOnly)
    }

    /// Reads the file as UTF-8 text.
    fn read_all_text(&self, path: &Path) -> Result<String> {
        self.read_all_text_with(path, Encoding::default())
    }

    fn read_all_text_with(&self, path: &Path, encoding: Encoding) -> Result<String> {
        let bytes = self.read_all_bytes(path)?;
        encoding.decode(path, &bytes)
    }

    /// Writes `text` as UTF-8 without a byte-order mark.
    fn write_all_text(&mut self, path: &Path, text: &str) -> Result<()> {
        self.write_all_text_with(path, text, Encoding::default())
    }

    fn write_all_text_with(&mut self, path: &Path, text: &str, encoding: Encoding) -> Result<()> {
        self.write_all_bytes(path, &encoding.encode(text))
    }
}

macro_rules! forward_fs_backend {
    ($($target:ty),+) => {$(
        impl<F: FsBackend + ?Sized> FsBackend for $target {
            fn file_exists(&self, path: &Path) -> Result<bool> {
                (**self).file_exists(path)
            }

            fn directory_exists(&self, path: &Path) -> Result<bool> {
                (**self).directory_exists(path)
            }

            fn create_directory(&mut self, path: &Path) -> Result<()> {
                (**self).create_directory(path)
            }

            fn create_parent_directory(&mut self, path: &Path) -> Result<()> {
                (**self).create_parent_directory(path)
            }

            fn write_all_bytes(&mut self, path: &Path, bytes: &[u8]) -> Result<()> {
                (**self).write_all_bytes(path, bytes)
            }

            fn read_all_bytes(&self, path: &Path) -> Result<Vec<u8>> {
                (**self).read_all_bytes(path)
            }

            fn delete_file(&mut self, path: &Path) -> Result<()> {
                (**self).delete_file(path)
            }

            fn delete_directory(&mut self, path: &Path) -> Result<()> {
                (**self).delete_directory(path)
            }

            fn enumerate_files(
                &self,
                directory: &Path,
                pattern: &str,
                option: SearchOption,
            ) -> Result<Vec<PathBuf>> {
                (**self).enumerate_files(directory, pattern, option)
            }

            fn read_all_text(&self, path: &Path) -> Result<String> {
                (**self).read_all_text(path)
            }

            fn read_all_text_with(&self, path: &Path, encoding: Encoding) -> Result<String> {
                (**self).read_all_text_with(path, encoding)
            }

            fn write_all_text(&mut self, path: &Path, text: &str) -> Result<()> {
                (**self).write_all_text(path, text)
            }

            fn write_all_text_with(
                &mut self,
                path: &Path,
                text: &str,
                encoding: Encoding,
            ) -> Result<()> {
                (**self).write_all_text_with(path, text, encoding)
            }
        }
    )+};
}

forward_fs_backend!(Box<F>, &mut F);
