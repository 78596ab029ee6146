//! Ticks ⇄ fractions of a whole note

use num_rational::Ratio;

use super::ConverterRegistry;
use crate::defaults::QUARTER_NOTES_PER_WHOLE_NOTE;
use crate::error::Result;
use crate::tempo_map::{TempoMap, Tick};
use crate::timespan::{kind_mismatch, MusicalTimeSpan, TimeSpan, TimeSpanKind};
use crate::utils::math::{div_round, narrow};

pub(crate) fn to_span(length: Tick, _anchor: Tick, tempo_map: &TempoMap) -> Result<TimeSpan> {
    let whole = whole_note_length(tempo_map)?;
    Ok(MusicalTimeSpan::from_ratio(Ratio::new(length, whole)).into())
}

pub(crate) fn from_span(span: &TimeSpan, _anchor: Tick, tempo_map: &TempoMap, _registry: &ConverterRegistry) -> Result<Tick> {
    let musical = match span {
        TimeSpan::Musical(musical) => musical,
        other => return Err(kind_mismatch(TimeSpanKind::Musical, other.kind())),
    };
    let whole = whole_note_length(tempo_map)?;
    narrow(div_round(
        musical.numerator() as u128 * whole as u128,
        musical.denominator() as u128,
    ))
}

fn whole_note_length(tempo_map: &TempoMap) -> Result<u64> {
    Ok(QUARTER_NOTES_PER_WHOLE_NOTE * tempo_map.ticks_per_quarter_note(TimeSpanKind::Musical)?)
}
