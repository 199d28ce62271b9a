use std::time::Duration;

use sysinfo::{MINIMUM_CPU_UPDATE_INTERVAL, System};

use crate::error::{Result, SnapshotError};
use crate::metrics::{Percent, normalize_percent};

/// Never sample faster than sysinfo can diff two refreshes.
pub fn effective_interval(requested: Duration) -> Duration {
    requested.max(MINIMUM_CPU_UPDATE_INTERVAL)
}

/// Global CPU usage measured across `interval`. Blocks for the whole interval.
pub fn sample_cpu_usage(system: &mut System, interval: Duration) -> Result<Percent> {
    // First refresh to initialize counters
    system.refresh_cpu_usage();
    if system.cpus().is_empty() {
        return Err(SnapshotError::CpuUnavailable);
    }

    std::thread::sleep(effective_interval(interval));
    system.refresh_cpu_usage();

    let usage = system.global_cpu_usage();
    if !usage.is_finite() {
        return Err(SnapshotError::CpuUnavailable);
    }
    tracing::debug!(usage, cpus = system.cpus().len(), "sampled cpu usage");
    Ok(normalize_percent(f64::from(usage)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_is_raised_to_platform_minimum() {
        assert_eq!(effective_interval(Duration::ZERO), MINIMUM_CPU_UPDATE_INTERVAL);
        let long = MINIMUM_CPU_UPDATE_INTERVAL + Duration::from_secs(1);
        assert_eq!(effective_interval(long), long);
    }
}
