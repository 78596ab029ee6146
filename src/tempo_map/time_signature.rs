//! Time signature and the bar/beat lengths it implies

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::defaults::{
    DEFAULT_TIME_SIGNATURE_DENOMINATOR, DEFAULT_TIME_SIGNATURE_NUMERATOR,
    QUARTER_NOTES_PER_WHOLE_NOTE,
};
use crate::error::{Result, TimeSpanError};

/// Beats per bar over the note value of one beat (e.g. 6/8)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TimeSignatureFields", into = "TimeSignatureFields")]
pub struct TimeSignature {
    numerator: u32,
    denominator: u32,
}

/// Unvalidated mirror used for deserialization
#[derive(Serialize, Deserialize)]
struct TimeSignatureFields {
    numerator: u32,
    denominator: u32,
}

impl TimeSignature {
    /// Create a time signature
    ///
    /// # Arguments
    /// * `numerator` - Beats per bar, must be positive
    /// * `denominator` - Note value of one beat, must be a power of two
    pub fn new(numerator: u32, denominator: u32) -> Result<Self> {
        if numerator == 0 || !denominator.is_power_of_two() {
            return Err(TimeSpanError::InvalidTimeSignature { numerator, denominator });
        }
        Ok(TimeSignature { numerator, denominator })
    }

    pub fn numerator(&self) -> u32 {
        self.numerator
    }

    pub fn denominator(&self) -> u32 {
        self.denominator
    }

    /// Length of one beat in ticks: `4 * tpq / denominator`
    ///
    /// Zero when the beat is shorter than a tick at this resolution.
    pub fn beat_length(&self, ticks_per_quarter_note: u64) -> u64 {
        QUARTER_NOTES_PER_WHOLE_NOTE * ticks_per_quarter_note / self.denominator as u64
    }

    /// Length of one bar in ticks: `numerator * beat_length`
    pub fn bar_length(&self, ticks_per_quarter_note: u64) -> u64 {
        self.numerator as u64 * self.beat_length(ticks_per_quarter_note)
    }
}

impl Default for TimeSignature {
    fn default() -> Self {
        TimeSignature {
            numerator: DEFAULT_TIME_SIGNATURE_NUMERATOR,
            denominator: DEFAULT_TIME_SIGNATURE_DENOMINATOR,
        }
    }
}

impl fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

impl TryFrom<TimeSignatureFields> for TimeSignature {
    type Error = TimeSpanError;

    fn try_from(fields: TimeSignatureFields) -> Result<Self> {
        Self::new(fields.numerator, fields.denominator)
    }
}

impl From<TimeSignature> for TimeSignatureFields {
    fn from(signature: TimeSignature) -> Self {
        TimeSignatureFields {
            numerator: signature.numerator,
            denominator: signature.denominator,
        }
    }
}
