use sysinfo::System;

use crate::error::{Result, SnapshotError};
use crate::metrics::{Percent, usage_percent};

pub fn sample_memory_usage(system: &mut System) -> Result<Percent> {
    system.refresh_memory();
    let used = system.used_memory();
    let total = system.total_memory();
    tracing::debug!(used, total, "sampled memory");
    usage_percent(used, total).ok_or(SnapshotError::MemoryUnavailable)
}
