use std::fs;
use std::path::{Path, PathBuf};

use sysinfo::Disks;

use crate::error::{Result, SnapshotError};
use crate::metrics::{Percent, usage_percent};

#[derive(Debug, Clone, PartialEq)]
pub struct FilesystemUsage {
    pub mount_point: PathBuf,
    pub used_bytes: u64,
    /// Capacity as seen by an unprivileged user (used + available).
    pub total_bytes: u64,
}

impl FilesystemUsage {
    pub fn usage_percent(&self) -> Option<Percent> {
        usage_percent(self.used_bytes, self.total_bytes)
    }

    /// `df` accounting: blocks reserved for root count as neither used nor available.
    pub fn from_block_counts(
        mount_point: PathBuf,
        blocks: u64,
        blocks_free: u64,
        blocks_available: u64,
        fragment_size: u64,
    ) -> Self {
        let used = blocks.saturating_sub(blocks_free) * fragment_size;
        let available = blocks_available * fragment_size;
        FilesystemUsage {
            mount_point,
            used_bytes: used,
            total_bytes: used + available,
        }
    }
}

/// Picks the filesystem whose mount point is the longest prefix of `target`.
pub fn containing_filesystem<'a>(
    filesystems: &'a [FilesystemUsage],
    target: &Path,
) -> Option<&'a FilesystemUsage> {
    filesystems
        .iter()
        .filter(|candidate| target.starts_with(&candidate.mount_point))
        .max_by_key(|candidate| candidate.mount_point.components().count())
}

fn listed_filesystems() -> Vec<FilesystemUsage> {
    let disks = Disks::new_with_refreshed_list();
    disks
        .list()
        .iter()
        .filter(|d| d.total_space() > 0)
        .map(|d| FilesystemUsage {
            mount_point: d.mount_point().to_path_buf(),
            used_bytes: d.total_space().saturating_sub(d.available_space()),
            total_bytes: d.total_space(),
        })
        .collect()
}

#[cfg(unix)]
fn statvfs_usage(target: &Path) -> Result<FilesystemUsage> {
    use nix::sys::statvfs::statvfs;

    let stat = statvfs(target).map_err(|source| SnapshotError::Statvfs {
        path: target.to_path_buf(),
        source,
    })?;
    Ok(FilesystemUsage::from_block_counts(
        target.to_path_buf(),
        stat.blocks() as u64,
        stat.blocks_free() as u64,
        stat.blocks_available() as u64,
        stat.fragment_size() as u64,
    ))
}

/// On Unix the numbers always come from statvfs; the disk list only names the mount.
#[cfg(unix)]
fn filesystem_usage(target: &Path) -> Result<FilesystemUsage> {
    let listed = listed_filesystems();
    let mount_point = match containing_filesystem(&listed, target) {
        Some(hit) => hit.mount_point.clone(),
        None => {
            tracing::info!(path = %target.display(), "no listed disk holds path");
            target.to_path_buf()
        }
    };
    Ok(FilesystemUsage {
        mount_point,
        ..statvfs_usage(target)?
    })
}

#[cfg(not(unix))]
fn filesystem_usage(target: &Path) -> Result<FilesystemUsage> {
    let listed = listed_filesystems();
    containing_filesystem(&listed, target)
        .cloned()
        .ok_or_else(|| SnapshotError::DiskNotFound {
            path: target.to_path_buf(),
        })
}

/// Usage of the filesystem holding `target`.
pub fn sample_disk_usage(target: &Path) -> Result<Percent> {
    let target = fs::canonicalize(target)?;
    let usage = filesystem_usage(&target)?;

    tracing::debug!(
        mount_point = %usage.mount_point.display(),
        used = usage.used_bytes,
        total = usage.total_bytes,
        "sampled disk"
    );
    usage
        .usage_percent()
        .ok_or(SnapshotError::DiskNotFound { path: target })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mounted(mount: &str, used: u64, total: u64) -> FilesystemUsage {
        FilesystemUsage {
            mount_point: PathBuf::from(mount),
            used_bytes: used,
            total_bytes: total,
        }
    }

    #[test]
    fn longest_mount_prefix_wins() {
        let all = vec![mounted("/", 1, 2), mounted("/home", 3, 4), mounted("/home/user/data", 5, 6)];

        let hit = containing_filesystem(&all, Path::new("/home/user/notes.txt")).unwrap();
        assert_eq!(hit.mount_point, PathBuf::from("/home"));

        let hit = containing_filesystem(&all, Path::new("/home/user/data/x")).unwrap();
        assert_eq!(hit.mount_point, PathBuf::from("/home/user/data"));

        let hit = containing_filesystem(&all, Path::new("/")).unwrap();
        assert_eq!(hit.mount_point, PathBuf::from("/"));
    }

    #[test]
    fn prefix_match_is_by_component() {
        let all = vec![mounted("/", 1, 2), mounted("/home", 3, 4)];
        let hit = containing_filesystem(&all, Path::new("/homework")).unwrap();
        assert_eq!(hit.mount_point, PathBuf::from("/"));
    }

    #[test]
    fn no_match_without_root() {
        let all = vec![mounted("/boot", 1, 2)];
        assert!(containing_filesystem(&all, Path::new("/var")).is_none());
    }

    #[test]
    fn empty_filesystem_has_no_percentage() {
        assert_eq!(mounted("/", 0, 0).usage_percent(), None);
        assert_eq!(mounted("/", 50, 200).usage_percent(), Some(25.0));
    }

    #[test]
    fn reserved_blocks_are_excluded_from_capacity() {
        let usage = FilesystemUsage::from_block_counts(PathBuf::from("/"), 100, 10, 5, 4096);
        assert_eq!(usage.used_bytes, 90 * 4096);
        assert_eq!(usage.total_bytes, 95 * 4096);
        assert_eq!(usage.usage_percent(), Some(94.74));
    }

    #[test]
    fn fully_free_filesystem_is_zero_percent() {
        let usage = FilesystemUsage::from_block_counts(PathBuf::from("/"), 100, 100, 95, 512);
        assert_eq!(usage.usage_percent(), Some(0.0));
    }

    #[cfg(unix)]
    #[test]
    fn root_sample_matches_statvfs() {
        let expected = statvfs_usage(Path::new("/"))
            .unwrap()
            .usage_percent()
            .expect("root filesystem reports capacity");
        let sampled = sample_disk_usage(Path::new("/")).unwrap();
        // Other processes may write between the two reads.
        assert!((sampled - expected).abs() <= 0.05, "sampled {sampled}, statvfs {expected}");
        assert!((0.0..=100.0).contains(&sampled));
    }
}
