//! Tempo map: time division plus tempo and time signature timelines
//!
//! A `TempoMap` is an immutable snapshot. Conversions borrow it for the
//! duration of a call; edits go through [`TempoMapManager`], which works on
//! its own copy and hands back a fresh snapshot on commit, so readers of
//! the old snapshot are never affected.
//!
//! # Usage
//! ```rust
//! use midi_timespan::{TempoMap, TimeDivision, Tempo, TimeSignature};
//!
//! let division = TimeDivision::ticks_per_quarter_note(480).unwrap();
//! let map = TempoMap::new(division)
//!     .manage()
//!     .set_tempo(1920, Tempo::from_bpm(90.0).unwrap())
//!     .set_time_signature(1920, TimeSignature::new(3, 4).unwrap())
//!     .commit();
//!
//! assert_eq!(map.time_signature_at(2000).numerator(), 3);
//! ```

pub mod manager;
#[cfg(feature = "smf")]
pub mod smf;
pub mod tempo;
pub mod time_division;
pub mod time_signature;
pub mod value_line;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use manager::TempoMapManager;
pub use tempo::Tempo;
pub use time_division::{SmpteFormat, TimeDivision};
pub use time_signature::TimeSignature;
pub use value_line::{Tick, ValueLine};

use crate::error::{Result, TimeSpanError};
use crate::timespan::TimeSpanKind;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TempoMap {
    time_division: TimeDivision,
    tempo: ValueLine<Tempo>,
    time_signature: ValueLine<TimeSignature>,
}

impl TempoMap {
    /// Tempo map with no changes: 120 BPM and 4/4 everywhere
    pub fn new(time_division: TimeDivision) -> Self {
        TempoMap {
            time_division,
            tempo: ValueLine::default(),
            time_signature: ValueLine::default(),
        }
    }

    /// Build a tempo map from change points in ascending tick order
    ///
    /// # Arguments
    /// * `time_division` - Resolution of the sequence
    /// * `tempos` - (tick, tempo) pairs, unique and non-decreasing
    /// * `time_signatures` - (tick, signature) pairs, unique and non-decreasing
    pub fn from_changes<A, B>(time_division: TimeDivision, tempos: A, time_signatures: B) -> Self
    where
        A: IntoIterator<Item = (Tick, Tempo)>,
        B: IntoIterator<Item = (Tick, TimeSignature)>,
    {
        TempoMap {
            time_division,
            tempo: ValueLine::from_changes(Tempo::default(), tempos),
            time_signature: ValueLine::from_changes(TimeSignature::default(), time_signatures),
        }
    }

    pub fn time_division(&self) -> TimeDivision {
        self.time_division
    }

    pub fn tempo_at(&self, time: Tick) -> Tempo {
        *self.tempo.at_time(time)
    }

    pub fn time_signature_at(&self, time: Tick) -> TimeSignature {
        *self.time_signature.at_time(time)
    }

    pub fn tempo_line(&self) -> &ValueLine<Tempo> {
        &self.tempo
    }

    pub fn time_signature_line(&self) -> &ValueLine<TimeSignature> {
        &self.time_signature
    }

    /// Resolution required by a `kind` conversion.
    ///
    /// Fails with `UnsupportedTimeDivision` for SMPTE maps, before any
    /// conversion work is done.
    pub fn ticks_per_quarter_note(&self, kind: TimeSpanKind) -> Result<u64> {
        match self.time_division {
            TimeDivision::TicksPerQuarterNote(0) => Err(TimeSpanError::InvalidTimeDivision(
                "zero ticks per quarter note".to_string(),
            )),
            TimeDivision::TicksPerQuarterNote(tpq) => Ok(tpq as u64),
            TimeDivision::Smpte { .. } => Err(TimeSpanError::UnsupportedTimeDivision(kind)),
        }
    }

    /// Start editing a copy of this map
    pub fn manage(&self) -> TempoMapManager {
        TempoMapManager::new(self.clone())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| TimeSpanError::Serialization(format!("Failed to parse tempo map: {}", e)))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| TimeSpanError::Serialization(format!("Failed to write tempo map: {}", e)))
    }

    /// Read a tempo map saved with [`TempoMap::save`]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            TimeSpanError::Serialization(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?).map_err(|e| {
            TimeSpanError::Serialization(format!("Failed to write {}: {}", path.display(), e))
        })
    }
}
