//! Environment-driven configuration for the dashboard loop.

#[derive(Debug, Clone)]
pub struct Config {
    /// Period of the dashboard tick in milliseconds.
    pub tick_ms: u64,
    /// Artificial delay on manual refresh, standing in for a network round
    /// trip.
    pub refresh_delay_ms: u64,
    /// Touching this file requests a manual refresh (removed once consumed).
    pub refresh_file: String,
    /// Directory for CSV / report / series exports.
    pub export_dir: String,
    /// Default campaign-table page size.
    pub page_size: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            tick_ms: std::env::var("TICK_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(5000),
            refresh_delay_ms: std::env::var("REFRESH_DELAY_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(1000),
            refresh_file: std::env::var("REFRESH_FILE").unwrap_or_else(|_| "/tmp/REFRESH".to_string()),
            export_dir: std::env::var("EXPORT_DIR").unwrap_or_else(|_| "out/exports".to_string()),
            page_size: std::env::var("PAGE_SIZE").ok().and_then(|v| v.parse().ok()).unwrap_or(5),
        }
    }
}
