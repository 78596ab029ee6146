//! Time division: how ticks relate to quarter notes or SMPTE frames

use serde::{Deserialize, Serialize};

use crate::defaults::{DEFAULT_TICKS_PER_QUARTER_NOTE, MAX_TICKS_PER_QUARTER_NOTE};
use crate::error::{Result, TimeSpanError};

/// SMPTE frame rates an SMF header can declare
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SmpteFormat {
    /// 24 fps (film)
    TwentyFour,
    /// 25 fps (PAL/SECAM)
    TwentyFive,
    /// 29.97 fps (NTSC drop-frame)
    ThirtyDrop,
    /// 30 fps
    Thirty,
}

impl SmpteFormat {
    /// Frame rate as an exact ratio `(frames, seconds)`
    pub fn frames_per_second_ratio(&self) -> (u64, u64) {
        match self {
            SmpteFormat::TwentyFour => (24, 1),
            SmpteFormat::TwentyFive => (25, 1),
            SmpteFormat::ThirtyDrop => (30_000, 1_001),
            SmpteFormat::Thirty => (30, 1),
        }
    }

    pub fn frames_per_second(&self) -> f64 {
        let (frames, seconds) = self.frames_per_second_ratio();
        frames as f64 / seconds as f64
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TimeDivisionFields", into = "TimeDivisionFields")]
pub enum TimeDivision {
    /// Metrical timing: ticks per quarter note
    TicksPerQuarterNote(u16),
    /// Timecode timing: ticks per SMPTE frame
    Smpte { format: SmpteFormat, ticks_per_frame: u8 },
}

// Serialized form, checked by the constructors on the way in
#[derive(Serialize, Deserialize)]
enum TimeDivisionFields {
    TicksPerQuarterNote(u16),
    Smpte { format: SmpteFormat, ticks_per_frame: u8 },
}

impl TryFrom<TimeDivisionFields> for TimeDivision {
    type Error = TimeSpanError;

    fn try_from(fields: TimeDivisionFields) -> Result<Self> {
        match fields {
            TimeDivisionFields::TicksPerQuarterNote(tpq) => TimeDivision::ticks_per_quarter_note(tpq),
            TimeDivisionFields::Smpte { format, ticks_per_frame } => TimeDivision::smpte(format, ticks_per_frame),
        }
    }
}

impl From<TimeDivision> for TimeDivisionFields {
    fn from(division: TimeDivision) -> Self {
        match division {
            TimeDivision::TicksPerQuarterNote(tpq) => TimeDivisionFields::TicksPerQuarterNote(tpq),
            TimeDivision::Smpte { format, ticks_per_frame } => TimeDivisionFields::Smpte { format, ticks_per_frame },
        }
    }
}

impl TimeDivision {
    /// Metrical division, 1..=32767 ticks per quarter note
    pub fn ticks_per_quarter_note(ticks_per_quarter_note: u16) -> Result<Self> {
        if ticks_per_quarter_note == 0 || ticks_per_quarter_note > MAX_TICKS_PER_QUARTER_NOTE {
            return Err(TimeSpanError::InvalidTimeDivision(format!(
                "{} ticks per quarter note is outside 1..={}",
                ticks_per_quarter_note, MAX_TICKS_PER_QUARTER_NOTE
            )));
        }
        Ok(TimeDivision::TicksPerQuarterNote(ticks_per_quarter_note))
    }

    /// Timecode division with a positive tick count per frame
    pub fn smpte(format: SmpteFormat, ticks_per_frame: u8) -> Result<Self> {
        if ticks_per_frame == 0 {
            return Err(TimeSpanError::InvalidTimeDivision(
                "SMPTE division needs at least one tick per frame".to_string(),
            ));
        }
        Ok(TimeDivision::Smpte { format, ticks_per_frame })
    }

    /// Resolution for metrical divisions, `None` for SMPTE
    pub fn as_ticks_per_quarter_note(&self) -> Option<u16> {
        match self {
            TimeDivision::TicksPerQuarterNote(tpq) => Some(*tpq),
            TimeDivision::Smpte { .. } => None,
        }
    }

    pub fn is_smpte(&self) -> bool {
        matches!(self, TimeDivision::Smpte { .. })
    }
}

impl Default for TimeDivision {
    fn default() -> Self {
        TimeDivision::TicksPerQuarterNote(DEFAULT_TICKS_PER_QUARTER_NOTE)
    }
}
