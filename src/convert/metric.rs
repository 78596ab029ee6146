//! Ticks ⇄ wall-clock time
//!
//! With a metrical division the tempo can change inside the span, so the
//! tick→microsecond rate is integrated piecewise over every tempo change.
//! Each segment contributes `ticks * microseconds_per_quarter_note`; the
//! sum is divided by the resolution once, at the end, so no rounding error
//! accumulates across segments. SMPTE divisions have a fixed rate and
//! ignore tempo.

use super::ConverterRegistry;
use crate::defaults::MICROSECONDS_PER_SECOND;
use crate::error::{Result, TimeSpanError};
use crate::tempo_map::{SmpteFormat, TempoMap, Tick, TimeDivision};
use crate::timespan::{kind_mismatch, MetricTimeSpan, TimeSpan, TimeSpanKind};
use crate::utils::math::{div_round, end_time, narrow};

pub(crate) fn to_span(length: Tick, anchor: Tick, tempo_map: &TempoMap) -> Result<TimeSpan> {
    ticks_to_metric(length, anchor, tempo_map).map(TimeSpan::from)
}

pub(crate) fn from_span(span: &TimeSpan, anchor: Tick, tempo_map: &TempoMap, _registry: &ConverterRegistry) -> Result<Tick> {
    match span {
        TimeSpan::Metric(metric) => metric_to_ticks(metric, anchor, tempo_map),
        other => Err(kind_mismatch(TimeSpanKind::Metric, other.kind())),
    }
}

pub(crate) fn ticks_to_metric(length: Tick, anchor: Tick, tempo_map: &TempoMap) -> Result<MetricTimeSpan> {
    let microseconds = match tempo_map.time_division() {
        TimeDivision::Smpte { format, ticks_per_frame } => smpte_ticks_to_microseconds(length, format, ticks_per_frame)?,
        TimeDivision::TicksPerQuarterNote(_) => {
            let tpq = tempo_map.ticks_per_quarter_note(TimeSpanKind::Metric)?;
            integrate_tempo(length, anchor, tempo_map, tpq)?
        }
    };
    Ok(MetricTimeSpan::from_microseconds(microseconds))
}

pub(crate) fn metric_to_ticks(span: &MetricTimeSpan, anchor: Tick, tempo_map: &TempoMap) -> Result<Tick> {
    let microseconds = span.total_microseconds();
    match tempo_map.time_division() {
        TimeDivision::Smpte { format, ticks_per_frame } => smpte_microseconds_to_ticks(microseconds, format, ticks_per_frame),
        TimeDivision::TicksPerQuarterNote(_) => {
            let tpq = tempo_map.ticks_per_quarter_note(TimeSpanKind::Metric)?;
            walk_tempo(microseconds, anchor, tempo_map, tpq)
        }
    }
}

/// Microseconds covered by `[anchor, anchor + length)`
fn integrate_tempo(length: Tick, anchor: Tick, tempo_map: &TempoMap, tpq: u64) -> Result<u64> {
    let end = end_time(anchor, length)?;
    let mut time = anchor;
    let mut tempo = tempo_map.tempo_at(anchor).microseconds_per_quarter_note() as u128;
    let mut scaled: u128 = 0;

    for (change, next) in tempo_map.tempo_line().changes_between(anchor, end) {
        scaled = scaled.saturating_add((change - time) as u128 * tempo);
        time = change;
        tempo = next.microseconds_per_quarter_note() as u128;
    }
    scaled = scaled.saturating_add((end - time) as u128 * tempo);

    narrow(div_round(scaled, tpq as u128))
}

/// Ticks needed from `anchor` to cover `microseconds`, consuming whole
/// tempo segments first and resolving the remainder at the last rate
fn walk_tempo(microseconds: u64, anchor: Tick, tempo_map: &TempoMap, tpq: u64) -> Result<Tick> {
    let mut remaining = microseconds as u128 * tpq as u128;
    let mut time = anchor;
    let mut tempo = tempo_map.tempo_at(anchor).microseconds_per_quarter_note() as u128;

    for (change, next) in tempo_map.tempo_line().changes_after(anchor) {
        let segment = (change - time) as u128 * tempo;
        if segment >= remaining {
            break;
        }
        remaining -= segment;
        time = change;
        tempo = next.microseconds_per_quarter_note() as u128;
    }

    narrow((time - anchor) as u128 + div_round(remaining, tempo))
}

fn smpte_ticks_to_microseconds(ticks: Tick, format: SmpteFormat, ticks_per_frame: u8) -> Result<u64> {
    check_ticks_per_frame(ticks_per_frame)?;
    let (frames, seconds) = format.frames_per_second_ratio();
    let numerator = ticks as u128 * MICROSECONDS_PER_SECOND as u128 * seconds as u128;
    let denominator = frames as u128 * ticks_per_frame as u128;
    narrow(div_round(numerator, denominator))
}

fn smpte_microseconds_to_ticks(microseconds: u64, format: SmpteFormat, ticks_per_frame: u8) -> Result<Tick> {
    check_ticks_per_frame(ticks_per_frame)?;
    let (frames, seconds) = format.frames_per_second_ratio();
    let numerator = microseconds as u128 * frames as u128 * ticks_per_frame as u128;
    let denominator = MICROSECONDS_PER_SECOND as u128 * seconds as u128;
    narrow(div_round(numerator, denominator))
}

// The variant is public, so a zero can still be built by hand
fn check_ticks_per_frame(ticks_per_frame: u8) -> Result<()> {
    if ticks_per_frame == 0 {
        return Err(TimeSpanError::InvalidTimeDivision(
            "SMPTE division needs at least one tick per frame".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tempo_map::Tempo;

    fn map(tpq: u16, tempos: Vec<(Tick, u64)>) -> TempoMap {
        TempoMap::from_changes(
            TimeDivision::ticks_per_quarter_note(tpq).unwrap(),
            tempos.into_iter().map(|(t, us)| (t, Tempo::new(us).unwrap())),
            vec![],
        )
    }

    #[test]
    fn test_constant_tempo() {
        let map = map(480, vec![]);
        // 120 BPM: one quarter note is half a second
        assert_eq!(ticks_to_metric(480, 0, &map).unwrap(), MetricTimeSpan::new(0, 0, 0, 500));
        assert_eq!(ticks_to_metric(480 * 120, 0, &map).unwrap(), MetricTimeSpan::new(0, 1, 0, 0));
    }

    #[test]
    fn test_integrates_across_tempo_change() {
        let map = map(480, vec![(0, 500_000), (480, 1_000_000)]);
        assert_eq!(ticks_to_metric(960, 0, &map).unwrap().total_microseconds(), 1_500_000);
        // Starting inside the slow segment only sees the slow rate
        assert_eq!(ticks_to_metric(480, 480, &map).unwrap().total_microseconds(), 1_000_000);
        // Straddling the change
        assert_eq!(ticks_to_metric(480, 240, &map).unwrap().total_microseconds(), 750_000);
    }

    #[test]
    fn test_inverse_walks_segments() {
        let map = map(480, vec![(0, 500_000), (480, 1_000_000)]);
        let span = MetricTimeSpan::from_microseconds(1_500_000);
        assert_eq!(metric_to_ticks(&span, 0, &map).unwrap(), 960);
        let span = MetricTimeSpan::from_microseconds(750_000);
        assert_eq!(metric_to_ticks(&span, 240, &map).unwrap(), 480);
    }

    #[test]
    fn test_round_trip_with_uneven_tempos() {
        let map = map(96, vec![(100, 333_333), (700, 1_234_567), (2000, 250_000)]);
        for anchor in [0, 50, 480, 1000] {
            for length in (0..3000).step_by(7) {
                let span = ticks_to_metric(length, anchor, &map).unwrap();
                assert_eq!(metric_to_ticks(&span, anchor, &map).unwrap(), length, "anchor {}", anchor);
            }
        }
    }

    #[test]
    fn test_smpte_ignores_tempo() {
        let division = TimeDivision::smpte(SmpteFormat::TwentyFive, 40).unwrap();
        let map = TempoMap::from_changes(division, vec![(0, Tempo::new(1_000_000).unwrap())], vec![]);
        // 25 fps * 40 ticks per frame = 1000 ticks per second
        assert_eq!(ticks_to_metric(1000, 0, &map).unwrap(), MetricTimeSpan::new(0, 0, 1, 0));
        assert_eq!(metric_to_ticks(&MetricTimeSpan::new(0, 0, 2, 0), 500, &map).unwrap(), 2000);
    }

    #[test]
    fn test_smpte_drop_frame_round_trip() {
        let division = TimeDivision::smpte(SmpteFormat::ThirtyDrop, 80).unwrap();
        let map = TempoMap::new(division);
        for length in (0..20_000).step_by(13) {
            let span = ticks_to_metric(length, 0, &map).unwrap();
            assert_eq!(metric_to_ticks(&span, 0, &map).unwrap(), length);
        }
    }

    #[test]
    fn test_zero_ticks_per_frame_is_an_error() {
        let map = TempoMap::new(TimeDivision::Smpte { format: SmpteFormat::Thirty, ticks_per_frame: 0 });
        assert!(matches!(ticks_to_metric(100, 0, &map), Err(TimeSpanError::InvalidTimeDivision(_))));
        assert!(matches!(
            metric_to_ticks(&MetricTimeSpan::new(0, 0, 1, 0), 0, &map),
            Err(TimeSpanError::InvalidTimeDivision(_))
        ));
    }
}
