//! Ticks ⇄ bars, beats and hundredths of a beat

use super::bar_beat::{Split, Walk};
use super::ConverterRegistry;
use crate::defaults::{CENTS_EPSILON, CENTS_PER_BEAT};
use crate::error::Result;
use crate::tempo_map::{TempoMap, Tick};
use crate::timespan::{kind_mismatch, BarBeatCentsTimeSpan, TimeSpan, TimeSpanKind};

pub(crate) fn to_span(length: Tick, anchor: Tick, tempo_map: &TempoMap) -> Result<TimeSpan> {
    let tpq = tempo_map.ticks_per_quarter_note(TimeSpanKind::BarBeatCents)?;
    ticks_to_bar_beat_cents(length, anchor, tempo_map, tpq).map(TimeSpan::from)
}

pub(crate) fn from_span(span: &TimeSpan, anchor: Tick, tempo_map: &TempoMap, _registry: &ConverterRegistry) -> Result<Tick> {
    let span = match span {
        TimeSpan::BarBeatCents(span) => span,
        other => return Err(kind_mismatch(TimeSpanKind::BarBeatCents, other.kind())),
    };
    let tpq = tempo_map.ticks_per_quarter_note(TimeSpanKind::BarBeatCents)?;
    bar_beat_cents_to_ticks(span, anchor, tempo_map, tpq)
}

fn cents(ticks: u64, beat_length: u64) -> f64 {
    ticks as f64 * CENTS_PER_BEAT / beat_length as f64
}

fn cents_to_ticks(cents: f64, beat_length: i128) -> i128 {
    (beat_length as f64 * cents / CENTS_PER_BEAT).round() as i128
}

fn ticks_to_bar_beat_cents(
    length: Tick,
    anchor: Tick,
    tempo_map: &TempoMap,
    ticks_per_quarter_note: u64,
) -> Result<BarBeatCentsTimeSpan> {
    if length == 0 {
        return Ok(BarBeatCentsTimeSpan::default());
    }

    let split = Split::new(length, anchor, tempo_map, ticks_per_quarter_note)?;
    let (bars, mut beats) = split.bars_and_beats();

    let mut total_cents = cents(split.ticks_before, split.start_beat_length)
        + cents(split.ticks_after, split.end_beat_length);
    let remainder = total_cents % CENTS_PER_BEAT;
    beats += ((total_cents - remainder) / CENTS_PER_BEAT).round() as u64;
    total_cents = remainder;

    BarBeatCentsTimeSpan::new(bars, beats, total_cents)
}

fn bar_beat_cents_to_ticks(
    span: &BarBeatCentsTimeSpan,
    anchor: Tick,
    tempo_map: &TempoMap,
    ticks_per_quarter_note: u64,
) -> Result<Tick> {
    let (bars, beats, cents_requested) = (span.bars(), span.beats(), span.cents());
    if bars == 0 && beats == 0 && cents_requested < CENTS_EPSILON {
        return Ok(0);
    }

    let start = tempo_map.time_signature_at(anchor);
    let start_beat_length = start.beat_length(ticks_per_quarter_note);
    let fraction_ticks = cents_to_ticks(cents_requested, start_beat_length as i128).max(0) as u64;

    let mut walk = Walk::bars(bars, beats, fraction_ticks, anchor, tempo_map, ticks_per_quarter_note)?;
    let cents_before = cents(walk.ticks_before, walk.start_beat_length);
    if beats == walk.beats_before && (cents_requested - cents_before).abs() < CENTS_EPSILON {
        return walk.length_from(anchor);
    }

    walk.balance_beats(beats, tempo_map, ticks_per_quarter_note)?;

    if cents_before > cents_requested && walk.beat_length > 0 {
        walk.time += -walk.beat_length
            + cents_to_ticks(cents_requested + CENTS_PER_BEAT - cents_before, walk.beat_length);
    }
    if cents_before < cents_requested {
        walk.beat_length = walk.beat_length_here(tempo_map, ticks_per_quarter_note)? as i128;
        walk.time += cents_to_ticks(cents_requested - cents_before, walk.beat_length);
    }

    walk.length_from(anchor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TimeSpanError;
    use crate::tempo_map::{SmpteFormat, TimeDivision, TimeSignature};

    fn assert_span(span: &BarBeatCentsTimeSpan, bars: u64, beats: u64, cents: f64) {
        assert_eq!((span.bars(), span.beats()), (bars, beats), "{}", span);
        assert!((span.cents() - cents).abs() < 1e-9, "{}", span);
    }

    #[test]
    fn test_single_signature() {
        let map = TempoMap::new(TimeDivision::ticks_per_quarter_note(480).unwrap());
        let span = ticks_to_bar_beat_cents(2000, 0, &map, 480).unwrap();
        assert_span(&span, 1, 0, 80.0 * 100.0 / 480.0);
        assert_eq!(bar_beat_cents_to_ticks(&span, 0, &map, 480).unwrap(), 2000);
    }

    #[test]
    fn test_signature_change() {
        let map = TempoMap::from_changes(
            TimeDivision::ticks_per_quarter_note(480).unwrap(),
            vec![],
            vec![(1920, TimeSignature::new(3, 4).unwrap())],
        );
        let span = ticks_to_bar_beat_cents(3000, 0, &map, 480).unwrap();
        assert_span(&span, 1, 2, 25.0);
        assert_eq!(bar_beat_cents_to_ticks(&span, 0, &map, 480).unwrap(), 3000);

        let span = ticks_to_bar_beat_cents(5000, 0, &map, 480).unwrap();
        assert_span(&span, 3, 0, 200.0 * 100.0 / 480.0);
        assert_eq!(bar_beat_cents_to_ticks(&span, 0, &map, 480).unwrap(), 5000);
    }

    #[test]
    fn test_cents_stay_normalized() {
        let map = TempoMap::from_changes(
            TimeDivision::ticks_per_quarter_note(480).unwrap(),
            vec![],
            vec![(1000, TimeSignature::new(3, 4).unwrap())],
        );
        for length in (1..8000).step_by(37) {
            let span = ticks_to_bar_beat_cents(length, 0, &map, 480).unwrap();
            assert!((0.0..100.0).contains(&span.cents()), "{} ticks -> {}", length, span);
        }
    }

    #[test]
    fn test_tiny_cents_count_as_zero() {
        let map = TempoMap::new(TimeDivision::ticks_per_quarter_note(480).unwrap());
        let span = BarBeatCentsTimeSpan::new(0, 0, 1e-9).unwrap();
        assert_eq!(bar_beat_cents_to_ticks(&span, 0, &map, 480).unwrap(), 0);
    }

    #[test]
    fn test_smpte_fails_before_any_work() {
        let registry = ConverterRegistry::default();
        let map = TempoMap::new(TimeDivision::smpte(SmpteFormat::TwentyFive, 40).unwrap());
        let expected = Err(TimeSpanError::UnsupportedTimeDivision(TimeSpanKind::BarBeatCents));
        assert_eq!(to_span(2000, 0, &map), expected);
        assert_eq!(to_span(0, 0, &map), expected);

        let span = TimeSpan::from(BarBeatCentsTimeSpan::new(1, 0, 0.0).unwrap());
        assert_eq!(
            from_span(&span, 0, &map, &registry),
            Err(TimeSpanError::UnsupportedTimeDivision(TimeSpanKind::BarBeatCents))
        );
    }
}
