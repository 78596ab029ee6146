//! Tempo maps and time span conversion for Standard MIDI File data
//!
//! Events in a MIDI sequence sit at integer tick positions. This crate
//! translates tick positions and lengths to and from wall-clock time, note
//! fractions or bar/beat positions, following every tempo and time
//! signature change inside the span.

pub mod convert;
pub mod defaults;
pub mod error;
pub mod tempo_map;
pub mod timed;
pub mod timespan;
mod utils;

// Re-export commonly used types
pub use convert::bar_beat::{bar_length_at, beat_length_at};
pub use convert::{
    convert_length, convert_length_as, convert_length_to_ticks, convert_time, convert_time_as,
    convert_time_to_ticks, ConverterEntry, ConverterRegistry,
};
pub use error::{Result, TimeSpanError};
pub use tempo_map::{SmpteFormat, Tempo, TempoMap, TempoMapManager, Tick, TimeDivision, TimeSignature, ValueLine};
pub use timed::{Chord, LengthedObject, Note, TimedObject};
pub use timespan::{
    BarBeatCentsTimeSpan, BarBeatTicksTimeSpan, KindedTimeSpan, MathOperation, MathOperationMode, MathTimeSpan,
    MetricTimeSpan, MidiTimeSpan, MusicalTimeSpan, TimeSpan, TimeSpanKind,
};
