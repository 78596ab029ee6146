//! Objects placed on the tick timeline
//!
//! Anything with a time (and optionally a length) in ticks can report them
//! in any time span representation through the conversion functions. A
//! length is always measured from the object's own time, so a bar/beat
//! length reflects the time signatures the object actually spans.

use serde::{Deserialize, Serialize};

use crate::convert::{convert_length, convert_length_to_ticks, convert_time, convert_time_to_ticks};
use crate::defaults::DEFAULT_VELOCITY;
use crate::error::{Result, TimeSpanError};
use crate::tempo_map::{TempoMap, Tick};
use crate::timespan::{TimeSpan, TimeSpanKind};
use crate::utils::math;

const MAX_DATA_BYTE: u8 = 0x7F;

pub trait TimedObject {
    fn time(&self) -> Tick;

    fn time_as(&self, kind: TimeSpanKind, tempo_map: &TempoMap) -> Result<TimeSpan> {
        convert_time(self.time(), kind, tempo_map)
    }
}

pub trait LengthedObject: TimedObject {
    fn length(&self) -> Tick;

    /// Length as a `kind` span, measured from this object's time
    fn length_as(&self, kind: TimeSpanKind, tempo_map: &TempoMap) -> Result<TimeSpan> {
        convert_length(self.length(), self.time(), kind, tempo_map)
    }

    fn end_time(&self) -> Result<Tick> {
        math::end_time(self.time(), self.length())
    }

    fn end_time_as(&self, kind: TimeSpanKind, tempo_map: &TempoMap) -> Result<TimeSpan> {
        convert_time(self.end_time()?, kind, tempo_map)
    }
}

fn data_byte(value: u8, what: &str) -> Result<u8> {
    if value > MAX_DATA_BYTE {
        return Err(TimeSpanError::InvalidRepresentation(format!(
            "{} {} is above {}",
            what, value, MAX_DATA_BYTE
        )));
    }
    Ok(value)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Note {
    number: u8,
    velocity: u8,
    time: Tick,
    length: Tick,
}

impl Note {
    pub fn new(number: u8, time: Tick, length: Tick) -> Result<Self> {
        Ok(Note {
            number: data_byte(number, "note number")?,
            velocity: DEFAULT_VELOCITY,
            time,
            length,
        })
    }

    /// Note placed with time spans of any kind
    ///
    /// # Arguments
    /// * `time` - Position of the note
    /// * `length` - Length of the note, measured from its position
    pub fn from_spans(number: u8, time: &TimeSpan, length: &TimeSpan, tempo_map: &TempoMap) -> Result<Self> {
        let time = convert_time_to_ticks(time, tempo_map)?;
        let length = convert_length_to_ticks(length, time, tempo_map)?;
        Note::new(number, time, length)
    }

    pub fn with_velocity(mut self, velocity: u8) -> Result<Self> {
        self.velocity = data_byte(velocity, "velocity")?;
        Ok(self)
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    pub fn velocity(&self) -> u8 {
        self.velocity
    }
}

impl TimedObject for Note {
    fn time(&self) -> Tick {
        self.time
    }
}

impl LengthedObject for Note {
    fn length(&self) -> Tick {
        self.length
    }
}

/// Notes sounding together.
///
/// The chord starts at its earliest note and lasts until its latest note
/// ends.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chord {
    notes: Vec<Note>,
}

impl Chord {
    pub fn new(notes: Vec<Note>) -> Self {
        Chord { notes }
    }

    /// Chord of `numbers` sharing a position and length given as time spans
    pub fn from_spans(numbers: &[u8], time: &TimeSpan, length: &TimeSpan, tempo_map: &TempoMap) -> Result<Self> {
        let time = convert_time_to_ticks(time, tempo_map)?;
        let length = convert_length_to_ticks(length, time, tempo_map)?;
        let notes = numbers
            .iter()
            .map(|&number| Note::new(number, time, length))
            .collect::<Result<Vec<_>>>()?;
        Ok(Chord { notes })
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

impl TimedObject for Chord {
    fn time(&self) -> Tick {
        self.notes.iter().map(|note| note.time).min().unwrap_or(0)
    }
}

impl LengthedObject for Chord {
    fn length(&self) -> Tick {
        let end = self
            .notes
            .iter()
            .map(|note| note.time.saturating_add(note.length))
            .max()
            .unwrap_or(0);
        end - self.time()
    }
}
