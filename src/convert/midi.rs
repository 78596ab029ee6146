//! Ticks ⇄ ticks

use super::ConverterRegistry;
use crate::error::Result;
use crate::tempo_map::{TempoMap, Tick};
use crate::timespan::{kind_mismatch, MidiTimeSpan, TimeSpan, TimeSpanKind};

pub(crate) fn to_span(length: Tick, _anchor: Tick, _tempo_map: &TempoMap) -> Result<TimeSpan> {
    Ok(MidiTimeSpan::new(length).into())
}

pub(crate) fn from_span(span: &TimeSpan, _anchor: Tick, _tempo_map: &TempoMap, _registry: &ConverterRegistry) -> Result<Tick> {
    match span {
        TimeSpan::Midi(midi) => Ok(midi.ticks),
        other => Err(kind_mismatch(TimeSpanKind::Midi, other.kind())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tempo_map::{SmpteFormat, TimeDivision};

    #[test]
    fn test_identity_under_any_division() {
        let registry = ConverterRegistry::default();
        let smpte = TempoMap::new(TimeDivision::smpte(SmpteFormat::Thirty, 4).unwrap());
        let span = to_span(1234, 99, &smpte).unwrap();
        assert_eq!(span, TimeSpan::Midi(MidiTimeSpan::new(1234)));
        assert_eq!(from_span(&span, 99, &smpte, &registry).unwrap(), 1234);
    }
}
