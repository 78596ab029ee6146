//! Tempo: microseconds per quarter note

use serde::{Deserialize, Serialize};

use crate::defaults::{DEFAULT_MICROSECONDS_PER_QUARTER_NOTE, MICROSECONDS_PER_MINUTE};
use crate::error::{Result, TimeSpanError};

/// Instantaneous tempo as stored in an SMF Set Tempo meta event
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Tempo {
    microseconds_per_quarter_note: u64,
}

impl Tempo {
    pub fn new(microseconds_per_quarter_note: u64) -> Result<Self> {
        if microseconds_per_quarter_note == 0 {
            return Err(TimeSpanError::InvalidTempo(microseconds_per_quarter_note));
        }
        Ok(Tempo { microseconds_per_quarter_note })
    }

    /// Tempo from beats (quarter notes) per minute, rounded to the nearest microsecond
    pub fn from_bpm(bpm: f64) -> Result<Self> {
        if !bpm.is_finite() || bpm <= 0.0 {
            return Err(TimeSpanError::InvalidTempo(0));
        }
        let micros = (MICROSECONDS_PER_MINUTE as f64 / bpm).round();
        if micros > u64::MAX as f64 {
            return Err(TimeSpanError::InvalidTempo(u64::MAX));
        }
        Self::new(micros as u64)
    }

    pub fn microseconds_per_quarter_note(&self) -> u64 {
        self.microseconds_per_quarter_note
    }

    pub fn bpm(&self) -> f64 {
        MICROSECONDS_PER_MINUTE as f64 / self.microseconds_per_quarter_note as f64
    }
}

impl Default for Tempo {
    fn default() -> Self {
        Tempo {
            microseconds_per_quarter_note: DEFAULT_MICROSECONDS_PER_QUARTER_NOTE,
        }
    }
}

impl TryFrom<u64> for Tempo {
    type Error = TimeSpanError;

    fn try_from(microseconds_per_quarter_note: u64) -> Result<Self> {
        Self::new(microseconds_per_quarter_note)
    }
}

impl From<Tempo> for u64 {
    fn from(tempo: Tempo) -> u64 {
        tempo.microseconds_per_quarter_note
    }
}
