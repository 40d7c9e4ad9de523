use std::time::Duration;

/// Default cap on SQL text copied into monitor events.
const DEFAULT_MAX_SQL_LENGTH: usize = 1024;

/// Configuration for [`InstrumentedConnection`](super::InstrumentedConnection).
///
/// Monitoring is off until [`enable_monitoring`](Self::enable_monitoring) is
/// called.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Statements slower than this trigger `on_slow_query`.
    pub slow_query_threshold: Option<Duration>,
    /// Whether monitors receive events.
    pub monitoring_enabled: bool,
    /// Longest SQL text, in bytes, placed in a [`QueryContext`](super::QueryContext).
    pub max_sql_length: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            slow_query_threshold: None,
            monitoring_enabled: false,
            max_sql_length: DEFAULT_MAX_SQL_LENGTH,
        }
    }
}

impl MonitorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the slow query threshold.
    pub fn with_slow_query_threshold(mut self, threshold: Duration) -> Self {
        self.slow_query_threshold = Some(threshold);
        self
    }

    /// Cap the SQL text handed to monitors.
    pub fn with_max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = len;
        self
    }

    pub fn enable_monitoring(mut self) -> Self {
        self.monitoring_enabled = true;
        self
    }

    pub fn disable_monitoring(mut self) -> Self {
        self.monitoring_enabled = false;
        self
    }
}
