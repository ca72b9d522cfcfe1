//! Run configuration for record and event generation.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Error type for invalid configuration values.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Timestamp string could not be parsed
    #[error("Invalid timestamp '{0}': expected ISO 8601 (e.g. 2021-01-01T00:00:00) or YYYY-MM-DD")]
    InvalidTimestamp(String),

    /// Window start is after window end
    #[error("Invalid time window: start {start} is after end {end}")]
    InvalidWindow {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    /// Record count range is empty or starts at zero
    #[error("Invalid record count range: {min}..={max}")]
    InvalidRecordRange { min: usize, max: usize },
}

/// Inclusive time window for datetime fields and event timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeWindow {
    /// Create a window, rejecting `start > end`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, ConfigError> {
        if start > end {
            return Err(ConfigError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parse a window from two ISO 8601 strings.
    pub fn parse(start: &str, end: &str) -> Result<Self, ConfigError> {
        Self::new(parse_timestamp(start)?, parse_timestamp(end)?)
    }

    /// Length of the window in whole seconds.
    pub fn span_secs(&self) -> i64 {
        (self.end - self.start).num_seconds()
    }

    pub fn contains(&self, ts: &NaiveDateTime) -> bool {
        *ts >= self.start && *ts <= self.end
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        // 2021-01-01T00:00:00 .. 2023-09-14T23:59:59
        let start = NaiveDate::from_ymd_opt(2021, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap_or_default();
        let end = NaiveDate::from_ymd_opt(2023, 9, 14)
            .and_then(|d| d.and_hms_opt(23, 59, 59))
            .unwrap_or_default();
        Self { start, end }
    }
}

/// Parse a timestamp in ISO 8601 (with or without offset) or date-only form.
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime, ConfigError> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_utc());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt);
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return Ok(dt);
        }
    }

    Err(ConfigError::InvalidTimestamp(s.to_string()))
}

/// How primary-key fields are filled.
///
/// One policy applies to a whole run; the two are never mixed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyPolicy {
    /// Per-bucket increasing integers with random steps of 1 to 3
    #[default]
    Counter,
    /// Fresh random v4 UUID per record
    Uuid,
}

/// Bounds on the event sampler's rejection loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplingLimits {
    /// Type-pair draws allowed for a single event attempt
    pub max_draws_per_event: u32,
    /// Type-pair draws allowed across the whole run; `None` scales the
    /// budget with the run as `max_draws_per_event * event_count`
    pub max_total_draws: Option<u64>,
}

impl SamplingLimits {
    /// Run-wide draw budget for `event_count` attempts.
    pub fn total_budget(&self, event_count: usize) -> u64 {
        self.max_total_draws.unwrap_or_else(|| {
            u64::from(self.max_draws_per_event).saturating_mul(event_count as u64)
        })
    }
}

impl Default for SamplingLimits {
    fn default() -> Self {
        Self {
            max_draws_per_event: 1000,
            max_total_draws: None,
        }
    }
}

/// Configuration for one generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    /// Inclusive bounds of records generated per entity definition.
    pub records_per_entity: RangeInclusive<usize>,
    /// Number of event attempts.
    pub event_count: usize,
    /// Window for datetime fields and event timestamps.
    pub window: TimeWindow,
    /// Primary-key policy.
    pub key_policy: KeyPolicy,
    /// Rejection loop bounds.
    pub sampling: SamplingLimits,
    /// Seed for reproducible runs (entropy when absent).
    pub seed: Option<u64>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            records_per_entity: 50..=200,
            event_count: 20_000,
            window: TimeWindow::default(),
            key_policy: KeyPolicy::Counter,
            sampling: SamplingLimits::default(),
            seed: None,
        }
    }
}

impl GenerationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-entity record count bounds.
    pub fn with_records_per_entity(mut self, min: usize, max: usize) -> Result<Self, ConfigError> {
        if min == 0 || min > max {
            return Err(ConfigError::InvalidRecordRange { min, max });
        }
        self.records_per_entity = min..=max;
        Ok(self)
    }

    /// Set the number of event attempts.
    pub fn with_event_count(mut self, count: usize) -> Self {
        self.event_count = count;
        self
    }

    pub fn with_window(mut self, window: TimeWindow) -> Self {
        self.window = window;
        self
    }

    pub fn with_key_policy(mut self, policy: KeyPolicy) -> Self {
        self.key_policy = policy;
        self
    }

    pub fn with_sampling(mut self, sampling: SamplingLimits) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
