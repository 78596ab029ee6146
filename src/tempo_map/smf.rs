//! Tempo map extraction from a decoded Standard MIDI File
//!
//! Decoding is done by `midly`; this module only reads the header timing
//! and the Set Tempo / Time Signature meta events of every track.

use midly::{Fps, Header, MetaMessage, Smf, Timing, Track, TrackEventKind};

use super::{SmpteFormat, Tempo, TempoMap, Tick, TimeDivision, TimeSignature};
use crate::error::{Result, TimeSpanError};

impl TryFrom<Timing> for TimeDivision {
    type Error = TimeSpanError;

    fn try_from(timing: Timing) -> Result<Self> {
        match timing {
            Timing::Metrical(tpq) => TimeDivision::ticks_per_quarter_note(tpq.as_int()),
            Timing::Timecode(fps, ticks_per_frame) => {
                let format = match fps {
                    Fps::Fps24 => SmpteFormat::TwentyFour,
                    Fps::Fps25 => SmpteFormat::TwentyFive,
                    Fps::Fps29 => SmpteFormat::ThirtyDrop,
                    Fps::Fps30 => SmpteFormat::Thirty,
                };
                TimeDivision::smpte(format, ticks_per_frame)
            }
        }
    }
}

impl TempoMap {
    pub fn from_smf(smf: &Smf) -> Result<Self> {
        Self::from_header_and_tracks(&smf.header, &smf.tracks)
    }

    /// Collect tempo and time signature changes from all tracks.
    ///
    /// Events are placed at absolute ticks accumulated from their deltas.
    /// When two tracks set the same parameter at the same tick, the event
    /// from the later track wins.
    pub fn from_header_and_tracks(header: &Header, tracks: &[Track]) -> Result<Self> {
        let time_division = TimeDivision::try_from(header.timing)?;

        let mut tempos: Vec<(Tick, Tempo)> = Vec::new();
        let mut time_signatures: Vec<(Tick, TimeSignature)> = Vec::new();

        for track in tracks {
            let mut tick: Tick = 0;
            for event in track {
                tick += event.delta.as_int() as Tick;
                match &event.kind {
                    TrackEventKind::Meta(MetaMessage::Tempo(micros)) => {
                        tempos.push((tick, Tempo::new(micros.as_int() as u64)?));
                    }
                    TrackEventKind::Meta(MetaMessage::TimeSignature(numerator, denominator_power, _, _)) => {
                        time_signatures.push((tick, decode_time_signature(*numerator, *denominator_power)?));
                    }
                    _ => {}
                }
            }
        }

        // Stable sort keeps track order among events at the same tick
        tempos.sort_by_key(|(tick, _)| *tick);
        time_signatures.sort_by_key(|(tick, _)| *tick);
        dedup_same_tick(&mut tempos, "tempo");
        dedup_same_tick(&mut time_signatures, "time signature");

        log::debug!(
            "Tempo map from SMF: {:?}, {} tempo changes, {} time signature changes",
            time_division,
            tempos.len(),
            time_signatures.len()
        );

        Ok(TempoMap::from_changes(time_division, tempos, time_signatures))
    }
}

/// Time signature from its SMF encoding (denominator as a power of two)
fn decode_time_signature(numerator: u8, denominator_power: u8) -> Result<TimeSignature> {
    let denominator = 1u32.checked_shl(denominator_power as u32).ok_or(
        TimeSpanError::InvalidTimeSignature {
            numerator: numerator as u32,
            denominator: 0,
        },
    )?;
    TimeSignature::new(numerator as u32, denominator)
}

/// Keep only the last change at each tick
fn dedup_same_tick<T>(changes: &mut Vec<(Tick, T)>, what: &str) {
    let before = changes.len();
    let mut deduped: Vec<(Tick, T)> = Vec::with_capacity(before);
    for change in changes.drain(..) {
        match deduped.last_mut() {
            Some(last) if last.0 == change.0 => *last = change,
            _ => deduped.push(change),
        }
    }
    if deduped.len() != before {
        log::warn!("Dropped {} {} events sharing a tick", before - deduped.len(), what);
    }
    *changes = deduped;
}
