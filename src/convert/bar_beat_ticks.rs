//! Ticks ⇄ bars, beats and leftover ticks

use super::bar_beat::{Split, Walk};
use super::ConverterRegistry;
use crate::error::Result;
use crate::tempo_map::{TempoMap, Tick};
use crate::timespan::{kind_mismatch, BarBeatTicksTimeSpan, TimeSpan, TimeSpanKind};

pub(crate) fn to_span(length: Tick, anchor: Tick, tempo_map: &TempoMap) -> Result<TimeSpan> {
    let tpq = tempo_map.ticks_per_quarter_note(TimeSpanKind::BarBeatTicks)?;
    ticks_to_bar_beat_ticks(length, anchor, tempo_map, tpq).map(TimeSpan::from)
}

pub(crate) fn from_span(span: &TimeSpan, anchor: Tick, tempo_map: &TempoMap, _registry: &ConverterRegistry) -> Result<Tick> {
    let span = match span {
        TimeSpan::BarBeatTicks(span) => span,
        other => return Err(kind_mismatch(TimeSpanKind::BarBeatTicks, other.kind())),
    };
    let tpq = tempo_map.ticks_per_quarter_note(TimeSpanKind::BarBeatTicks)?;
    bar_beat_ticks_to_ticks(span, anchor, tempo_map, tpq)
}

pub(crate) fn ticks_to_bar_beat_ticks(
    length: Tick,
    anchor: Tick,
    tempo_map: &TempoMap,
    ticks_per_quarter_note: u64,
) -> Result<BarBeatTicksTimeSpan> {
    if length == 0 {
        return Ok(BarBeatTicksTimeSpan::default());
    }

    let split = Split::new(length, anchor, tempo_map, ticks_per_quarter_note)?;
    let (bars, mut beats) = split.bars_and_beats();

    // Leftover ticks fill a beat of the starting signature only when some
    // of them come from before the first change
    let mut ticks = split.ticks_before + split.ticks_after;
    if split.ticks_before > 0 && ticks >= split.start_beat_length {
        beats += 1;
        ticks -= split.start_beat_length;
    }

    Ok(BarBeatTicksTimeSpan::new(bars, beats, ticks))
}

pub(crate) fn bar_beat_ticks_to_ticks(
    span: &BarBeatTicksTimeSpan,
    anchor: Tick,
    tempo_map: &TempoMap,
    ticks_per_quarter_note: u64,
) -> Result<Tick> {
    if *span == BarBeatTicksTimeSpan::default() {
        return Ok(0);
    }

    let mut walk = Walk::bars(span.bars, span.beats, span.ticks, anchor, tempo_map, ticks_per_quarter_note)?;
    if span.beats == walk.beats_before && span.ticks == walk.ticks_before {
        return walk.length_from(anchor);
    }

    walk.balance_beats(span.beats, tempo_map, ticks_per_quarter_note)?;

    let ticks = span.ticks as i128;
    let before = walk.ticks_before as i128;
    if before > ticks && walk.beat_length > 0 {
        walk.time += -walk.beat_length + ticks + walk.start_beat_length as i128 - before;
    }
    if before < ticks {
        walk.time += ticks - before;
    }

    walk.length_from(anchor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tempo_map::{TimeDivision, TimeSignature};

    fn three_four_at_1920() -> TempoMap {
        TempoMap::from_changes(
            TimeDivision::ticks_per_quarter_note(480).unwrap(),
            vec![],
            vec![(1920, TimeSignature::new(3, 4).unwrap())],
        )
    }

    #[test]
    fn test_single_signature() {
        let map = TempoMap::new(TimeDivision::ticks_per_quarter_note(480).unwrap());
        let span = ticks_to_bar_beat_ticks(2000, 0, &map, 480).unwrap();
        assert_eq!(span, BarBeatTicksTimeSpan::new(1, 0, 80));
        assert_eq!(bar_beat_ticks_to_ticks(&span, 0, &map, 480).unwrap(), 2000);
    }

    #[test]
    fn test_signature_change() {
        let map = three_four_at_1920();
        let cases = [
            (3000, BarBeatTicksTimeSpan::new(1, 2, 120)),
            (5000, BarBeatTicksTimeSpan::new(3, 0, 200)),
            (4800, BarBeatTicksTimeSpan::new(3, 0, 0)),
            (1440, BarBeatTicksTimeSpan::new(0, 3, 0)),
        ];
        for (ticks, expected) in cases {
            let span = ticks_to_bar_beat_ticks(ticks, 0, &map, 480).unwrap();
            assert_eq!(span, expected, "{} ticks", ticks);
            assert_eq!(bar_beat_ticks_to_ticks(&span, 0, &map, 480).unwrap(), ticks);
        }
    }

    #[test]
    fn test_zero() {
        let map = three_four_at_1920();
        assert_eq!(ticks_to_bar_beat_ticks(0, 1000, &map, 480).unwrap(), BarBeatTicksTimeSpan::default());
        assert_eq!(bar_beat_ticks_to_ticks(&BarBeatTicksTimeSpan::default(), 1000, &map, 480).unwrap(), 0);
    }

    #[test]
    fn test_round_trip_from_off_bar_anchor() {
        let map = three_four_at_1920();
        for anchor in [100, 480] {
            for length in (0..6000).step_by(11) {
                let span = ticks_to_bar_beat_ticks(length, anchor, &map, 480).unwrap();
                assert_eq!(bar_beat_ticks_to_ticks(&span, anchor, &map, 480).unwrap(), length);
            }
        }
    }
}
