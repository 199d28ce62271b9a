use serde::{Deserialize, Serialize};

pub type Percent = f64;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub cpu_usage_percent: Percent,
    pub ram_usage_percent: Percent,
    pub disk_usage_percent: Percent,
}

/// Clamps a raw percentage into `[0, 100]` and rounds it to two decimals.
pub fn normalize_percent(raw: f64) -> Percent {
    (raw.clamp(0.0, 100.0) * 100.0).round() / 100.0
}

/// `used / total` as a percentage, or `None` when the ratio is meaningless.
pub fn usage_percent(used: u64, total: u64) -> Option<Percent> {
    if total == 0 {
        return None;
    }
    let ratio = used as f64 / total as f64 * 100.0;
    ratio.is_finite().then(|| normalize_percent(ratio))
}
