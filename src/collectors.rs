pub mod cpu;
pub mod disk;
pub mod memory;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use sysinfo::System;

use crate::error::Result;
use crate::metrics::MetricsSnapshot;

/// Minute granularity: two runs inside the same minute share a file.
const FILENAME_TIMESTAMP: &str = "%Y-%m-%d_%H-%M";

pub struct SampleOptions<'a> {
    pub cpu_interval: Duration,
    pub disk_path: &'a Path,
}

pub fn take_health_snapshot(system: &mut System, options: &SampleOptions) -> Result<MetricsSnapshot> {
    let cpu_usage_percent = cpu::sample_cpu_usage(system, options.cpu_interval)?;
    let ram_usage_percent = memory::sample_memory_usage(system)?;
    let disk_usage_percent = disk::sample_disk_usage(options.disk_path)?;

    Ok(MetricsSnapshot {
        cpu_usage_percent,
        ram_usage_percent,
        disk_usage_percent,
    })
}

pub fn snapshot_filename(taken_at: NaiveDateTime) -> String {
    format!("health_{}.json", taken_at.format(FILENAME_TIMESTAMP))
}

fn to_indented_json(snapshot: &MetricsSnapshot) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    snapshot.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(buf)
}

/// Writes `snapshot` into `output_folder`, replacing any file from the same minute.
pub fn save_snapshot(
    snapshot: &MetricsSnapshot,
    output_folder: &Path,
    taken_at: NaiveDateTime,
) -> Result<PathBuf> {
    // Create output folder if it doesn't exist
    fs::create_dir_all(output_folder)?;

    let filepath = output_folder.join(snapshot_filename(taken_at));
    fs::write(&filepath, to_indented_json(snapshot)?)?;
    Ok(filepath)
}
