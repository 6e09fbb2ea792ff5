//! Virtual file systems for static-site builds.
//! Lets a site generator read sources and write output through one abstraction, so the
//! same build can run against the disk, against memory in tests, or through decorators
//! that normalize names and count I/O.
//!
//! ### Overview
//!
//! Every backend implements the [`FsBackend`] trait: existence checks, directory creation
//! and removal, whole-file byte and text I/O, and wildcard file enumeration.
//!
//! - [`RealFS`] maps straight onto the host file system.
//! - [`MemoryFS`] keeps everything in a map; directories are emulated from path prefixes.
//! - [`CaseNormalizingFS`] lower-cases every path on its way in and out.
//! - [`StatsTrackingFS`] counts files and bytes read and written, per extension.
//!
//! Decorators wrap any backend, so they compose:
//!
//! ```
//! use std::path::Path;
//! use site_vfs::{CaseNormalizingFS, CountingBackend, FsBackend, MemoryFS, StatsTrackingFS};
//!
//! let mut fs = StatsTrackingFS::new(CaseNormalizingFS::new(MemoryFS::with_separator('/')));
//! fs.write_all_text(Path::new("/Out/Index.HTML"), "<h1>hi</h1>").unwrap();
//!
//! assert!(fs.inner().inner().file_exists(Path::new("/out/index.html")).unwrap());
//! assert_eq!(fs.total_stats().bytes_written, 11);
//! ```
//!
//! **Key ideas**:
//! - **One contract**: every backend validates arguments the same way and reports the same
//!   [`ErrorKind`]s, so tests written against `MemoryFS` hold for `RealFS`.
//! - **Forgiving mutations**: creating an existing directory or deleting a missing file is
//!   not an error.
//! - **Text is UTF-8**: text operations default to UTF-8 without a byte-order mark; other
//!   [`Encoding`]s are opt-in.

mod core;
mod vfs;

pub use self::core::encoding::Encoding;
pub use self::core::pattern::SearchPattern;
pub use self::core::{Error, ErrorKind, FsBackend, Result, SearchOption};
pub use vfs::{
    CaseNormalizingFS, CountingBackend, FileSystemStats, MemoryFS, RealFS, StatsReport,
    StatsTrackingFS,
};

/// The stack a site build runs on: the host disk, lower-cased names, counted I/O.
pub type ProductionFS = StatsTrackingFS<CaseNormalizingFS<RealFS>>;

/// Builds a [`ProductionFS`].
pub fn production() -> ProductionFS {
    StatsTrackingFS::new(CaseNormalizingFS::new(RealFS::new()))
}
