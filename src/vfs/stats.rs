use std::collections::BTreeMap;
use std::fmt;

use tracing::info;

/// Files and bytes read and written through a counting backend.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct FileSystemStats {
    pub files_read: u64,
    pub files_written: u64,
    pub bytes_read: u64,
    pub bytes_written: u64,
}

impl FileSystemStats {
    pub fn record_read(&mut self, bytes: usize) {
        self.files_read += 1;
        self.bytes_read += bytes as u64;
    }

    pub fn record_write(&mut self, bytes: usize) {
        self.files_written += 1;
        self.bytes_written += bytes as u64;
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

const RULE: &str = "===========================================================";
const HEADER: &str = "Extension  FilesRead  FilesWritten  BytesRead  BytesWritten";
const DIVIDER: &str = "---------  ---------  ------------  ---------  ------------";

/// End-of-build table of I/O counters, one row per extension plus a totals row.
///
/// ```text
/// File I/O Report
/// ===========================================================
/// Extension  FilesRead  FilesWritten  BytesRead  BytesWritten
/// ---------  ---------  ------------  ---------  ------------
///      .css          1             0        120             0
/// ---------  ---------  ------------  ---------  ------------
///   Totals:          1             0        120             0
/// ===========================================================
/// ```
#[derive(Debug, Clone)]
pub struct StatsReport {
    total: FileSystemStats,
    by_extension: BTreeMap<String, FileSystemStats>,
}

impl StatsReport {
    pub fn new(total: FileSystemStats, by_extension: BTreeMap<String, FileSystemStats>) -> Self {
        Self {
            total,
            by_extension,
        }
    }

    /// Writes the report through `tracing`, one event per line.
    pub fn log(&self) {
        for line in self.to_string().lines() {
            info!("{}", line);
        }
    }

    fn counters(stats: &FileSystemStats) -> String {
        format!(
            "{:>9}  {:>12}  {:>9}  {:>12}",
            stats.files_read, stats.files_written, stats.bytes_read, stats.bytes_written
        )
    }
}

impl fmt::Display for StatsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "File I/O Report")?;
        writeln!(f, "{}", RULE)?;
        writeln!(f, "{}", HEADER)?;
        writeln!(f, "{}", DIVIDER)?;
        for (extension, stats) in &self.by_extension {
            writeln!(f, "{:>9}  {}", extension, Self::counters(stats))?;
        }
        writeln!(f, "{}", DIVIDER)?;
        writeln!(f, "{:>9}  {}", "Totals:", Self::counters(&self.total))?;
        writeln!(f, "{}", RULE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_accumulates() {
        let mut stats = FileSystemStats::default();
        assert!(stats.is_zero());
        stats.record_write(3);
        stats.record_write(0);
        stats.record_read(10);
        assert_eq!(
            stats,
            FileSystemStats {
                files_read: 1,
                files_written: 2,
                bytes_read: 10,
                bytes_written: 3,
            }
        );
        assert!(!stats.is_zero());
    }

    #[test]
    fn test_report_layout() {
        let mut css = FileSystemStats::default();
        css.record_read(120);
        let mut none = FileSystemStats::default();
        none.record_write(7);
        let mut total = css;
        total.record_write(7);

        let by_extension = BTreeMap::from([(".css".to_string(), css), (String::new(), none)]);
        let report = StatsReport::new(total, by_extension).to_string();
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "File I/O Report");
        assert_eq!(lines[2], HEADER);
        // extensionless files sort first, under an empty key
        assert_eq!(
            lines[4],
            "                   0             1          0             7"
        );
        assert_eq!(
            lines[5],
            "     .css          1             0        120             0"
        );
        assert_eq!(
            lines[7],
            "  Totals:          1             1        120             7"
        );
        assert_eq!(lines[8], RULE);
        for line in &lines[2..8] {
            assert_eq!(line.len(), HEADER.len(), "{:?}", line);
        }
    }

    #[test]
    fn test_empty_report_has_only_totals() {
        let report = StatsReport::new(FileSystemStats::default(), BTreeMap::new()).to_string();
        assert_eq!(report.lines().count(), 7);
        assert!(report.contains("  Totals:          0"));
    }
}
