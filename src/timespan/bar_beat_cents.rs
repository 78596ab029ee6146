//! Bars, beats and hundredths of a beat

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::defaults::CENTS_PER_BEAT;
use crate::error::{Result, TimeSpanError};

/// Bars, beats and hundredths of a beat.
///
/// Cents are always finite and in `[0, 100)`; the constructor and
/// deserialization both enforce it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BarBeatCentsFields")]
pub struct BarBeatCentsTimeSpan {
    bars: u64,
    beats: u64,
    cents: f64,
}

#[derive(Deserialize)]
struct BarBeatCentsFields {
    bars: u64,
    beats: u64,
    cents: f64,
}

impl TryFrom<BarBeatCentsFields> for BarBeatCentsTimeSpan {
    type Error = TimeSpanError;

    fn try_from(fields: BarBeatCentsFields) -> Result<Self> {
        BarBeatCentsTimeSpan::new(fields.bars, fields.beats, fields.cents)
    }
}

impl BarBeatCentsTimeSpan {
    pub fn new(bars: u64, beats: u64, cents: f64) -> Result<Self> {
        if !cents.is_finite() || !(0.0..CENTS_PER_BEAT).contains(&cents) {
            return Err(TimeSpanError::InvalidRepresentation(format!(
                "cents must be in [0, 100), got {}",
                cents
            )));
        }
        Ok(BarBeatCentsTimeSpan { bars, beats, cents })
    }

    pub fn bars(&self) -> u64 {
        self.bars
    }

    pub fn beats(&self) -> u64 {
        self.beats
    }

    pub fn cents(&self) -> f64 {
        self.cents
    }
}

impl fmt::Display for BarBeatCentsTimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}c", self.bars, self.beats, self.cents)
    }
}
