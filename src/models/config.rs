//! Configuration model loaded from external sources.

use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Settings for the maintenance binary.
pub struct GatewayConfig {
    pub database_url: String,
    #[serde(default = "default_enable_wal")]
    pub enable_wal: bool,
    #[serde(default = "default_busy_timeout_secs")]
    pub busy_timeout_secs: u64,
    /// Maximum pooled connections; r2d2's default when absent.
    #[serde(default)]
    pub pool_max_size: Option<u32>,
    pub report: ReportConfig,
}

#[derive(Clone, Debug, Deserialize)]
/// Thresholds used for the startup statistics.
pub struct ReportConfig {
    pub min_income: f64,
    #[serde(default)]
    pub name_part: String,
    pub min_birth_date: DateTime<Utc>,
}

fn default_enable_wal() -> bool {
    true
}

fn default_busy_timeout_secs() -> u64 {
    30
}
