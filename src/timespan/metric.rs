//! Wall-clock duration

use std::fmt;
use std::ops::Add;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::defaults::{
    MICROSECONDS_PER_HOUR, MICROSECONDS_PER_MILLISECOND, MICROSECONDS_PER_MINUTE, MICROSECONDS_PER_SECOND,
};
use crate::error::{Result, TimeSpanError};

/// Wall-clock duration.
///
/// Stored as whole microseconds so that converting ticks at a fine
/// resolution and back is exact; hours, minutes, seconds and milliseconds
/// are derived.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MetricTimeSpan {
    total_microseconds: u64,
}

impl MetricTimeSpan {
    pub fn new(hours: u64, minutes: u64, seconds: u64, milliseconds: u64) -> Self {
        let total = hours
            .saturating_mul(MICROSECONDS_PER_HOUR)
            .saturating_add(minutes.saturating_mul(MICROSECONDS_PER_MINUTE))
            .saturating_add(seconds.saturating_mul(MICROSECONDS_PER_SECOND))
            .saturating_add(milliseconds.saturating_mul(MICROSECONDS_PER_MILLISECOND));
        MetricTimeSpan::from_microseconds(total)
    }

    pub fn from_microseconds(total_microseconds: u64) -> Self {
        MetricTimeSpan { total_microseconds }
    }

    pub fn total_microseconds(&self) -> u64 {
        self.total_microseconds
    }

    pub fn hours(&self) -> u64 {
        self.total_microseconds / MICROSECONDS_PER_HOUR
    }

    pub fn minutes(&self) -> u64 {
        self.total_microseconds % MICROSECONDS_PER_HOUR / MICROSECONDS_PER_MINUTE
    }

    pub fn seconds(&self) -> u64 {
        self.total_microseconds % MICROSECONDS_PER_MINUTE / MICROSECONDS_PER_SECOND
    }

    pub fn milliseconds(&self) -> u64 {
        self.total_microseconds % MICROSECONDS_PER_SECOND / MICROSECONDS_PER_MILLISECOND
    }

    /// Microseconds left over below whole milliseconds
    pub fn microseconds(&self) -> u64 {
        self.total_microseconds % MICROSECONDS_PER_MILLISECOND
    }

    pub fn as_duration(&self) -> Duration {
        Duration::from_micros(self.total_microseconds)
    }

    pub fn checked_sub(self, other: MetricTimeSpan) -> Option<MetricTimeSpan> {
        self.total_microseconds
            .checked_sub(other.total_microseconds)
            .map(MetricTimeSpan::from_microseconds)
    }
}

impl Add for MetricTimeSpan {
    type Output = MetricTimeSpan;

    fn add(self, other: MetricTimeSpan) -> MetricTimeSpan {
        MetricTimeSpan::from_microseconds(self.total_microseconds.saturating_add(other.total_microseconds))
    }
}

impl TryFrom<Duration> for MetricTimeSpan {
    type Error = TimeSpanError;

    fn try_from(duration: Duration) -> Result<Self> {
        u64::try_from(duration.as_micros())
            .map(MetricTimeSpan::from_microseconds)
            .map_err(|_| TimeSpanError::InvalidRepresentation(format!("{:?} is too long", duration)))
    }
}

impl From<MetricTimeSpan> for Duration {
    fn from(span: MetricTimeSpan) -> Duration {
        span.as_duration()
    }
}

impl fmt::Display for MetricTimeSpan {
    /// `h:m:s:ms`; sub-millisecond precision is not shown
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.hours(),
            self.minutes(),
            self.seconds(),
            self.milliseconds()
        )
    }
}
