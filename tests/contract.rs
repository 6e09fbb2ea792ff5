//! Behaviour every backend and decorator must share, run against each of them.

use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use anyhow::Result;
use site_vfs::{
    CaseNormalizingFS, Encoding, ErrorKind, FsBackend, MemoryFS, RealFS, SearchOption,
    StatsTrackingFS,
};
use tempdir::TempDir;

/// A backend under test, its root directory, and whatever keeps that root alive.
struct Fixture<F> {
    fs: F,
    root: PathBuf,
    _guard: Option<TempDir>,
}

impl<F: FsBackend> Fixture<F> {
    fn path(&self, relative: &str) -> PathBuf {
        relative.split('/').fold(self.root.clone(), |acc, part| acc.join(part))
    }
}

fn memory_root() -> PathBuf {
    PathBuf::from(format!("{}site_vfs", MAIN_SEPARATOR))
}

fn setup_memory() -> Result<Fixture<MemoryFS>> {
    Ok(Fixture {
        fs: MemoryFS::new(),
        root: memory_root(),
        _guard: None,
    })
}

fn setup_real() -> Result<Fixture<RealFS>> {
    let tmp = TempDir::new("site_vfs")?;
    Ok(Fixture {
        fs: RealFS::new(),
        root: tmp.path().join("root"),
        _guard: Some(tmp),
    })
}

fn setup_case_normalizing() -> Result<Fixture<CaseNormalizingFS<MemoryFS>>> {
    Ok(Fixture {
        fs: CaseNormalizingFS::new(MemoryFS::new()),
        root: memory_root(),
        _guard: None,
    })
}

fn setup_stats_tracking() -> Result<Fixture<StatsTrackingFS<RealFS>>> {
    let tmp = TempDir::new("site_vfs")?;
    Ok(Fixture {
        fs: StatsTrackingFS::new(RealFS::new()),
        root: tmp.path().join("root"),
        _guard: Some(tmp),
    })
}

fn sorted(mut files: Vec<PathBuf>) -> Vec<PathBuf> {
    files.sort();
    files
}

macro_rules! contract_suite {
    ($name:ident, $setup:ident) => {
        mod $name {
            use super::*;

            #[test]
            fn test_blank_arguments_are_out_of_range() -> Result<()> {
                let mut t = $setup()?;
                for blank in ["", " ", "\t\n"] {
                    let path = Path::new(blank);
                    let kinds = [
                        t.fs.file_exists(path).map(drop),
                        t.fs.directory_exists(path).map(drop),
                        t.fs.create_directory(path),
                        t.fs.create_parent_directory(path),
                        t.fs.write_all_bytes(path, b"x"),
                        t.fs.read_all_bytes(path).map(drop),
                        t.fs.write_all_text(path, "x"),
                        t.fs.read_all_text(path).map(drop),
                        t.fs.delete_file(path),
                        t.fs.delete_directory(path),
                        t.fs.enumerate_all(path).map(drop),
                    ];
                    for result in kinds {
                        assert_eq!(result.unwrap_err().kind(), ErrorKind::OutOfRange);
                    }
                }

                t.fs.create_directory(&t.root)?;
                let err = t.fs.enumerate_matching(&t.root, " ").unwrap_err();
                assert_eq!(err.kind(), ErrorKind::OutOfRange);
                Ok(())
            }

            #[cfg(unix)]
            #[test]
            fn test_non_unicode_paths_are_invalid() -> Result<()> {
                use std::ffi::OsStr;
                use std::os::unix::ffi::OsStrExt;

                let mut t = $setup()?;
                let path = t.root.join(OsStr::from_bytes(b"bad\xff.dat"));
                let kinds = [
                    t.fs.file_exists(&path).map(drop),
                    t.fs.directory_exists(&path).map(drop),
                    t.fs.create_directory(&path),
                    t.fs.create_parent_directory(&path),
                    t.fs.write_all_bytes(&path, b"x"),
                    t.fs.read_all_bytes(&path).map(drop),
                    t.fs.write_all_text(&path, "x"),
                    t.fs.read_all_text(&path).map(drop),
                    t.fs.write_all_text_with(&path, "x", Encoding::Utf16Le),
                    t.fs.read_all_text_with(&path, Encoding::Utf16Le).map(drop),
                    t.fs.delete_file(&path),
                    t.fs.delete_directory(&path),
                    t.fs.enumerate_all(&path).map(drop),
                    t.fs
                        .enumerate_files(&path, "*", SearchOption::AllDirectories)
                        .map(drop),
                ];
                for result in kinds {
                    assert_eq!(result.unwrap_err().kind(), ErrorKind::InvalidArgument);
                }
                Ok(())
            }

            #[test]
            fn test_missing_entries() -> Result<()> {
                let t = $setup()?;
                let file = t.path("nowhere/file1.dat");
                assert!(!t.fs.file_exists(&file)?);
                assert!(!t.fs.directory_exists(&t.path("nowhere"))?);
                assert_eq!(
                    t.fs.read_all_bytes(&file).unwrap_err().kind(),
                    ErrorKind::NotFound
                );
                assert_eq!(
                    t.fs.enumerate_all(&t.path("nowhere")).unwrap_err().kind(),
                    ErrorKind::NotFound
                );
                Ok(())
            }

            #[test]
            fn test_create_directory_is_idempotent() -> Result<()> {
                let mut t = $setup()?;
                let dir = t.path("out/css");
                t.fs.create_directory(&dir)?;
                t.fs.create_directory(&dir)?;
                assert!(t.fs.directory_exists(&dir)?);
                assert!(t.fs.directory_exists(&t.path("out"))?);
                assert!(!t.fs.file_exists(&dir)?);
                Ok(())
            }

            #[test]
            fn test_create_parent_directory_creates_parent_only() -> Result<()> {
                let mut t = $setup()?;
                let file = t.path("out/index.html");
                t.fs.create_parent_directory(&file)?;
                assert!(t.fs.directory_exists(&t.path("out"))?);
                assert!(!t.fs.directory_exists(&file)?);
                assert!(!t.fs.file_exists(&file)?);
                Ok(())
            }

            #[test]
            fn test_bytes_round_trip() -> Result<()> {
                let mut t = $setup()?;
                let file = t.path("deep/er/file1.dat");
                let cases: [&[u8]; 3] = [b"", &[0], &[1, 2, 3, 255]];
                for bytes in cases {
                    t.fs.write_all_bytes(&file, bytes)?;
                    assert_eq!(t.fs.read_all_bytes(&file)?, bytes);
                }
                assert!(t.fs.file_exists(&file)?);
                assert!(t.fs.directory_exists(&t.path("deep/er"))?);
                Ok(())
            }

            #[test]
            fn test_text_round_trip() -> Result<()> {
                let mut t = $setup()?;
                let file = t.path("text/page.html");
                t.fs.write_all_text(&file, "caf\u{e9} \u{2603}")?;
                assert_eq!(t.fs.read_all_bytes(&file)?, "caf\u{e9} \u{2603}".as_bytes());
                assert_eq!(t.fs.read_all_text(&file)?, "caf\u{e9} \u{2603}");

                t.fs.write_all_text_with(&file, "abc", Encoding::Utf16Le)?;
                assert_eq!(t.fs.read_all_bytes(&file)?.len(), 8);
                assert_eq!(t.fs.read_all_text_with(&file, Encoding::Utf16Le)?, "abc");
                Ok(())
            }

            #[test]
            fn test_files_and_directories_do_not_collide() -> Result<()> {
                let mut t = $setup()?;
                let dir = t.path("out/css");
                let file = t.path("out/index.html");
                t.fs.create_directory(&dir)?;
                t.fs.write_all_bytes(&file, b"<p>")?;

                let kinds = [
                    t.fs.write_all_bytes(&dir, b"x"),
                    t.fs.write_all_bytes(&t.path("out/index.html/a.css"), b"x"),
                    t.fs.write_all_bytes(&t.path("out/index.html/sub/a.css"), b"x"),
                    t.fs.create_directory(&file),
                ];
                for result in kinds {
                    assert_eq!(result.unwrap_err().kind(), ErrorKind::Io);
                }
                assert!(t.fs.directory_exists(&dir)?);
                assert!(!t.fs.file_exists(&dir)?);
                assert!(!t.fs.directory_exists(&file)?);
                assert_eq!(t.fs.read_all_bytes(&file)?, b"<p>");
                Ok(())
            }

            #[test]
            fn test_deletes_are_idempotent() -> Result<()> {
                let mut t = $setup()?;
                let file = t.path("out/file1.dat");
                t.fs.delete_file(&file)?;
                t.fs.delete_directory(&t.path("out"))?;

                t.fs.write_all_bytes(&file, &[1])?;
                t.fs.delete_file(&file)?;
                t.fs.delete_file(&file)?;
                assert!(!t.fs.file_exists(&file)?);
                Ok(())
            }

            #[test]
            fn test_delete_directory_is_recursive() -> Result<()> {
                let mut t = $setup()?;
                t.fs.write_all_bytes(&t.path("out/a.dat"), &[1])?;
                t.fs.write_all_bytes(&t.path("out/sub/b.dat"), &[2])?;
                t.fs.write_all_bytes(&t.path("keep/c.dat"), &[3])?;

                t.fs.delete_directory(&t.path("out"))?;
                assert!(!t.fs.directory_exists(&t.path("out"))?);
                assert!(!t.fs.file_exists(&t.path("out/sub/b.dat"))?);
                assert!(t.fs.file_exists(&t.path("keep/c.dat"))?);
                Ok(())
            }

            #[test]
            fn test_enumerate_scopes_and_patterns() -> Result<()> {
                let mut t = $setup()?;
                for name in ["file1.dat", "file2.dat", "file3.txt", "sub/file4.dat"] {
                    t.fs.write_all_bytes(&t.path(&format!("site/{}", name)), b"")?;
                }
                let site = t.path("site");

                assert_eq!(
                    sorted(t.fs.enumerate_all(&site)?),
                    [
                        t.path("site/file1.dat"),
                        t.path("site/file2.dat"),
                        t.path("site/file3.txt"),
                    ]
                );
                assert_eq!(
                    sorted(t.fs.enumerate_matching(&site, "*.dat")?),
                    [t.path("site/file1.dat"), t.path("site/file2.dat")]
                );
                assert_eq!(
                    sorted(t.fs.enumerate_matching(&site, "file?.txt")?),
                    [t.path("site/file3.txt")]
                );
                assert!(t.fs.enumerate_matching(&site, "*.bbb")?.is_empty());
                assert_eq!(
                    sorted(t.fs.enumerate_files(&site, "*.dat", SearchOption::AllDirectories)?),
                    [
                        t.path("site/file1.dat"),
                        t.path("site/file2.dat"),
                        t.path("site/sub/file4.dat"),
                    ]
                );
                assert_eq!(t.fs.enumerate_all(&t.path("site/sub"))?.len(), 1);
                Ok(())
            }

            #[test]
            fn test_enumerate_empty_directory() -> Result<()> {
                let mut t = $setup()?;
                let dir = t.path("empty");
                t.fs.create_directory(&dir)?;
                assert!(t.fs.enumerate_all(&dir)?.is_empty());
                assert!(
                    t.fs.enumerate_files(&dir, "*", SearchOption::AllDirectories)?
                        .is_empty()
                );
                Ok(())
            }
        }
    };
}

contract_suite!(memory_fs, setup_memory);
contract_suite!(real_fs, setup_real);
contract_suite!(case_normalizing_fs, setup_case_normalizing);
contract_suite!(stats_tracking_fs, setup_stats_tracking);
