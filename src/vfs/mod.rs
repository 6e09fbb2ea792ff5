mod case_normalizing_fs;
mod memory_fs;
mod real_fs;
mod stats;
mod stats_tracking_fs;

pub use case_normalizing_fs::CaseNormalizingFS;
pub use memory_fs::MemoryFS;
pub use real_fs::RealFS;
pub use stats::{FileSystemStats, StatsReport};
pub use stats_tracking_fs::{CountingBackend, StatsTrackingFS};
