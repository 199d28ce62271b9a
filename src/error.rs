use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("no CPU information available")]
    CpuUnavailable,

    #[error("total memory reported as zero")]
    MemoryUnavailable,

    #[error("no filesystem found for {}", path.display())]
    DiskNotFound { path: PathBuf },

    #[cfg(unix)]
    #[error("statvfs failed on {}", path.display())]
    Statvfs {
        path: PathBuf,
        #[source]
        source: nix::Error,
    },

    #[error("failed to serialize snapshot")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SnapshotError>;
