//! Conversion between ticks and time spans
//!
//! Two entry points, each in both directions:
//! - *time*: an absolute position, measured from tick 0
//! - *length*: a duration starting at an anchor tick, measured against the
//!   tempo map in effect at and after that anchor
//!
//! The free functions dispatch through a process-wide
//! [`ConverterRegistry`] holding the built-in algorithms. Build a registry
//! of your own to restrict or replace them.
//!
//! # Example
//! ```rust
//! use midi_timespan::{convert_length, convert_length_to_ticks, TempoMap, TimeDivision, TimeSpanKind};
//!
//! let map = TempoMap::new(TimeDivision::ticks_per_quarter_note(480).unwrap());
//! let span = convert_length(2000, 0, TimeSpanKind::BarBeatTicks, &map).unwrap();
//! assert_eq!(span.to_string(), "1.0.80");
//! assert_eq!(convert_length_to_ticks(&span, 0, &map).unwrap(), 2000);
//! ```

pub mod bar_beat;
mod bar_beat_cents;
mod bar_beat_ticks;
mod math;
mod metric;
mod midi;
mod musical;
pub mod registry;

use once_cell::sync::Lazy;

pub use registry::{ConvertFrom, ConvertTo, ConverterEntry, ConverterRegistry};

use crate::error::Result;
use crate::tempo_map::{TempoMap, Tick};
use crate::timespan::{KindedTimeSpan, TimeSpan, TimeSpanKind};

static DEFAULT_REGISTRY: Lazy<ConverterRegistry> = Lazy::new(ConverterRegistry::default);

/// Registry used by the free conversion functions
pub fn default_registry() -> &'static ConverterRegistry {
    &DEFAULT_REGISTRY
}

/// Express tick position `time` as a `kind` span
pub fn convert_time(time: Tick, kind: TimeSpanKind, tempo_map: &TempoMap) -> Result<TimeSpan> {
    DEFAULT_REGISTRY.convert_time(time, kind, tempo_map)
}

/// Tick position of `span`
pub fn convert_time_to_ticks(span: &TimeSpan, tempo_map: &TempoMap) -> Result<Tick> {
    DEFAULT_REGISTRY.convert_time_to_ticks(span, tempo_map)
}

/// Express `length` ticks starting at `anchor` as a `kind` span
pub fn convert_length(length: Tick, anchor: Tick, kind: TimeSpanKind, tempo_map: &TempoMap) -> Result<TimeSpan> {
    DEFAULT_REGISTRY.convert_length(length, anchor, kind, tempo_map)
}

/// Number of ticks `span` covers when it starts at `anchor`
pub fn convert_length_to_ticks(span: &TimeSpan, anchor: Tick, tempo_map: &TempoMap) -> Result<Tick> {
    DEFAULT_REGISTRY.convert_length_to_ticks(span, anchor, tempo_map)
}

/// [`convert_time`] into a concrete span type
///
/// ```rust
/// use midi_timespan::{convert_time_as, MusicalTimeSpan, TempoMap};
///
/// let eighth: MusicalTimeSpan = convert_time_as(48, &TempoMap::default()).unwrap();
/// assert_eq!(eighth, MusicalTimeSpan::EIGHTH);
/// ```
pub fn convert_time_as<T: KindedTimeSpan>(time: Tick, tempo_map: &TempoMap) -> Result<T> {
    T::try_from(convert_time(time, T::KIND, tempo_map)?)
}

/// [`convert_length`] into a concrete span type
pub fn convert_length_as<T: KindedTimeSpan>(length: Tick, anchor: Tick, tempo_map: &TempoMap) -> Result<T> {
    T::try_from(convert_length(length, anchor, T::KIND, tempo_map)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TimeSpanError;
    use crate::tempo_map::{SmpteFormat, TimeDivision};
    use crate::timespan::{BarBeatCentsTimeSpan, MetricTimeSpan, MidiTimeSpan};

    #[test]
    fn test_time_is_length_from_zero() {
        let map = TempoMap::new(TimeDivision::ticks_per_quarter_note(480).unwrap());
        let time = convert_time(3000, TimeSpanKind::BarBeatCents, &map).unwrap();
        let length = convert_length(3000, 0, TimeSpanKind::BarBeatCents, &map).unwrap();
        assert_eq!(time, length);
        assert_eq!(convert_time_to_ticks(&time, &map).unwrap(), 3000);
    }

    #[test]
    fn test_typed_helpers() {
        let map = TempoMap::new(TimeDivision::ticks_per_quarter_note(480).unwrap());
        let metric: MetricTimeSpan = convert_length_as(480, 960, &map).unwrap();
        assert_eq!(metric, MetricTimeSpan::new(0, 0, 0, 500));

        let midi: MidiTimeSpan = convert_time_as(77, &map).unwrap();
        assert_eq!(midi, MidiTimeSpan::new(77));
    }

    #[test]
    fn test_smpte_rejects_bar_beat() {
        let map = TempoMap::new(TimeDivision::smpte(SmpteFormat::TwentyFive, 40).unwrap());
        assert_eq!(
            convert_length_as::<BarBeatCentsTimeSpan>(2000, 0, &map),
            Err(TimeSpanError::UnsupportedTimeDivision(TimeSpanKind::BarBeatCents))
        );
    }
}
