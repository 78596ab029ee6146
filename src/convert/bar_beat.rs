//! Shared walk for the bar/beat representations
//!
//! Both bar/beat/ticks and bar/beat/cents decompose a length the same way:
//! the part before the first time signature change in the span is measured
//! against the starting signature, whole bars are counted across the
//! internal segments, and the part after the last change is measured
//! against the final signature. They only differ in how the leftover below
//! one beat is expressed.
//!
//! Intermediate positions of the inverse walk are signed, since balancing
//! beats can step back by one bar before stepping forward again.
//!
//! The inverse gives back the original length for a single signature from
//! any anchor, and for signature changes on bar lines when the anchor is
//! itself a bar line. Elsewhere two lengths can share one span, and the
//! inverse picks one of them.

use crate::error::{Result, TimeSpanError};
use crate::tempo_map::{TempoMap, Tick, TimeSignature};
use crate::timespan::{BarBeatTicksTimeSpan, TimeSpanKind};
use crate::utils::math::end_time;

/// Bar and beat length of `time_signature` in ticks.
///
/// A signature whose beat is shorter than one tick at this resolution
/// cannot be measured in beats.
pub(crate) fn lengths(time_signature: &TimeSignature, ticks_per_quarter_note: u64) -> Result<(u64, u64)> {
    let beat = time_signature.beat_length(ticks_per_quarter_note);
    if beat == 0 {
        return Err(TimeSpanError::InvalidTimeSignature {
            numerator: time_signature.numerator(),
            denominator: time_signature.denominator(),
        });
    }
    Ok((time_signature.bar_length(ticks_per_quarter_note), beat))
}

/// Split `ticks` into whole bars, whole beats and leftover ticks
pub(crate) fn decompose(ticks: u64, time_signature: &TimeSignature, ticks_per_quarter_note: u64) -> Result<(u64, u64, u64)> {
    let (bar, beat) = lengths(time_signature, ticks_per_quarter_note)?;
    let remainder = ticks % bar;
    Ok((ticks / bar, remainder / beat, remainder % beat))
}

/// A length split around the time signature changes inside it
#[derive(Debug)]
pub(crate) struct Split {
    /// Whole bars before, between and after the changes
    pub bars: u64,
    pub beats_before: u64,
    pub beats_after: u64,
    pub ticks_before: u64,
    pub ticks_after: u64,
    pub start: TimeSignature,
    pub start_beat_length: u64,
    pub end_beat_length: u64,
}

impl Split {
    pub fn new(length: Tick, anchor: Tick, tempo_map: &TempoMap, ticks_per_quarter_note: u64) -> Result<Self> {
        let end = end_time(anchor, length)?;
        let changes: Vec<(Tick, TimeSignature)> = tempo_map
            .time_signature_line()
            .changes_between(anchor, end)
            .map(|(time, signature)| (time, *signature))
            .collect();

        // Internal segments contribute whole bars only
        let mut bars = 0;
        for pair in changes.windows(2) {
            let (time, signature) = pair[0];
            let (next, _) = pair[1];
            let (bar, _) = lengths(&signature, ticks_per_quarter_note)?;
            bars += (next - time) / bar;
        }

        let start = tempo_map.time_signature_at(anchor);
        let (first, last, end_signature) = match (changes.first(), changes.last()) {
            (Some(&(first, _)), Some(&(last, signature))) => (first, last, signature),
            _ => (end, end, start),
        };

        let (bars_before, beats_before, ticks_before) = decompose(first - anchor, &start, ticks_per_quarter_note)?;
        let (bars_after, beats_after, ticks_after) = decompose(end - last, &end_signature, ticks_per_quarter_note)?;
        let (_, start_beat_length) = lengths(&start, ticks_per_quarter_note)?;
        let (_, end_beat_length) = lengths(&end_signature, ticks_per_quarter_note)?;

        Ok(Split {
            bars: bars + bars_before + bars_after,
            beats_before,
            beats_after,
            ticks_before,
            ticks_after,
            start,
            start_beat_length,
            end_beat_length,
        })
    }

    /// Total bars and beats.
    ///
    /// Beats before and after the changes belong to bars of different
    /// lengths. They are promoted to a bar only when the part before the
    /// changes had at least one full beat and together they fill a bar of
    /// the starting signature.
    pub fn bars_and_beats(&self) -> (u64, u64) {
        let numerator = self.start.numerator() as u64;
        let beats = self.beats_before + self.beats_after;
        if self.beats_before > 0 && beats >= numerator {
            (self.bars + 1, beats - numerator)
        } else {
            (self.bars, beats)
        }
    }
}

/// State of the inverse walk after whole bars have been placed
#[derive(Debug)]
pub(crate) struct Walk {
    pub time: i128,
    pub beats_before: u64,
    pub ticks_before: u64,
    pub bar_length: i128,
    pub beat_length: i128,
    pub start: TimeSignature,
    pub start_beat_length: u64,
}

impl Walk {
    /// Place `bars` whole bars from `anchor`, following every time signature
    /// change they cross.
    ///
    /// # Arguments
    /// * `bars`, `beats`, `fraction_ticks` - Requested span, the fraction
    ///   already converted to ticks of the starting beat
    pub fn bars(
        bars: u64,
        beats: u64,
        fraction_ticks: u64,
        anchor: Tick,
        tempo_map: &TempoMap,
        ticks_per_quarter_note: u64,
    ) -> Result<Self> {
        let start = tempo_map.time_signature_at(anchor);
        let (start_bar_length, start_beat_length) = lengths(&start, ticks_per_quarter_note)?;

        // Only bounds which change is the first one the span can reach
        let estimate = bars
            .saturating_mul(start_bar_length)
            .saturating_add(beats.saturating_mul(start_beat_length))
            .saturating_add(fraction_ticks);

        let line = tempo_map.time_signature_line();
        let (first, mut signature) = line
            .changes_between(anchor, anchor.saturating_add(estimate))
            .next()
            .map(|(time, signature)| (time, *signature))
            .unwrap_or((anchor, start));

        let (bars_before, beats_before, ticks_before) = decompose(first - anchor, &start, ticks_per_quarter_note)?;
        let mut bars = bars as i128 - bars_before as i128;
        let mut time = first as i128;
        let mut bar_length = 0i128;
        let mut beat_length = 0i128;

        if bars > 0 {
            for (change, next) in line.changes_after(first) {
                let (bar, beat) = lengths(&signature, ticks_per_quarter_note)?;
                bar_length = bar as i128;
                beat_length = beat as i128;

                let whole = ((change as i128 - time) / bar_length).min(bars);
                bars -= whole;
                time += whole * bar_length;
                if bars == 0 {
                    break;
                }
                signature = *next;
            }

            if bars > 0 {
                let (bar, beat) = lengths(&signature, ticks_per_quarter_note)?;
                bar_length = bar as i128;
                beat_length = beat as i128;
                time += bars * bar_length;
            }
        }

        Ok(Walk {
            time,
            beats_before,
            ticks_before,
            bar_length,
            beat_length,
            start,
            start_beat_length,
        })
    }

    /// Move to the requested beat count.
    ///
    /// Fewer beats than were found before the first change means the target
    /// is inside the last bar placed, so step back one bar and forward by
    /// the beats that bar still had under the starting signature.
    pub fn balance_beats(&mut self, beats: u64, tempo_map: &TempoMap, ticks_per_quarter_note: u64) -> Result<()> {
        let beats = beats as i128;
        let mut before = self.beats_before as i128;

        if before > beats && self.bar_length > 0 {
            self.time += -self.bar_length + (self.start.numerator() as i128 - before) * self.beat_length;
            before = 0;
        }
        if before < beats {
            self.beat_length = self.beat_length_here(tempo_map, ticks_per_quarter_note)? as i128;
            self.time += (beats - before) * self.beat_length;
        }
        Ok(())
    }

    /// Beat length of the signature in effect at the current position
    pub fn beat_length_here(&self, tempo_map: &TempoMap, ticks_per_quarter_note: u64) -> Result<u64> {
        let time = self.position()?;
        lengths(&tempo_map.time_signature_at(time), ticks_per_quarter_note).map(|(_, beat)| beat)
    }

    /// Distance walked from `anchor`
    pub fn length_from(&self, anchor: Tick) -> Result<Tick> {
        Tick::try_from(self.time - anchor as i128).map_err(|_| {
            TimeSpanError::InvalidRepresentation(format!(
                "bar/beat span resolves to tick {} before its anchor {}",
                self.time, anchor
            ))
        })
    }

    fn position(&self) -> Result<Tick> {
        Tick::try_from(self.time)
            .map_err(|_| TimeSpanError::InvalidRepresentation(format!("tick {} is out of range", self.time)))
    }
}

/// Length in ticks of the zero-based `bar`
pub fn bar_length_at(bar: u64, tempo_map: &TempoMap) -> Result<Tick> {
    let tpq = tempo_map.ticks_per_quarter_note(TimeSpanKind::BarBeatTicks)?;
    let (bar_length, _) = lengths(&signature_of_bar(bar, tempo_map, tpq)?, tpq)?;
    Ok(bar_length)
}

/// Length in ticks of one beat in the zero-based `bar`
pub fn beat_length_at(bar: u64, tempo_map: &TempoMap) -> Result<Tick> {
    let tpq = tempo_map.ticks_per_quarter_note(TimeSpanKind::BarBeatTicks)?;
    let (_, beat_length) = lengths(&signature_of_bar(bar, tempo_map, tpq)?, tpq)?;
    Ok(beat_length)
}

fn signature_of_bar(bar: u64, tempo_map: &TempoMap, ticks_per_quarter_note: u64) -> Result<TimeSignature> {
    let start = super::bar_beat_ticks::bar_beat_ticks_to_ticks(
        &BarBeatTicksTimeSpan::new(bar, 0, 0),
        0,
        tempo_map,
        ticks_per_quarter_note,
    )?;
    Ok(tempo_map.time_signature_at(start))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tempo_map::{SmpteFormat, TimeDivision};

    fn sig(numerator: u32, denominator: u32) -> TimeSignature {
        TimeSignature::new(numerator, denominator).unwrap()
    }

    fn map(changes: Vec<(Tick, TimeSignature)>) -> TempoMap {
        TempoMap::from_changes(TimeDivision::ticks_per_quarter_note(480).unwrap(), vec![], changes)
    }

    #[test]
    fn test_decompose() {
        assert_eq!(decompose(2000, &sig(4, 4), 480).unwrap(), (1, 0, 80));
        assert_eq!(decompose(1080, &sig(3, 4), 480).unwrap(), (0, 2, 120));
        assert_eq!(decompose(1000, &sig(6, 8), 480).unwrap(), (0, 4, 40));
    }

    #[test]
    fn test_beat_shorter_than_a_tick() {
        let tiny = sig(4, 2048);
        assert_eq!(
            decompose(10, &tiny, 96),
            Err(TimeSpanError::InvalidTimeSignature { numerator: 4, denominator: 2048 })
        );
    }

    #[test]
    fn test_split_across_change() {
        let map = map(vec![(1920, sig(3, 4))]);
        let split = Split::new(3000, 0, &map, 480).unwrap();
        assert_eq!(split.bars, 1);
        assert_eq!((split.beats_before, split.ticks_before), (0, 0));
        assert_eq!((split.beats_after, split.ticks_after), (2, 120));
        assert_eq!(split.bars_and_beats(), (1, 2));
    }

    #[test]
    fn test_bar_and_beat_lengths() {
        let map = map(vec![(1920, sig(3, 4)), (4800, sig(6, 8))]);
        assert_eq!(bar_length_at(0, &map).unwrap(), 1920);
        assert_eq!(bar_length_at(1, &map).unwrap(), 1440);
        assert_eq!(bar_length_at(3, &map).unwrap(), 1440);
        assert_eq!(bar_length_at(4, &map).unwrap(), 1440);
        assert_eq!(beat_length_at(4, &map).unwrap(), 240);
        assert_eq!(beat_length_at(0, &map).unwrap(), 480);
    }

    #[test]
    fn test_bar_length_smpte() {
        let map = TempoMap::new(TimeDivision::smpte(SmpteFormat::Thirty, 8).unwrap());
        assert_eq!(
            bar_length_at(0, &map),
            Err(TimeSpanError::UnsupportedTimeDivision(TimeSpanKind::BarBeatTicks))
        );
    }
}
