#![cfg(feature = "smf")]

use midi_timespan::{SmpteFormat, Tempo, TempoMap, TimeDivision, TimeSignature};
use midly::num::{u15, u24, u28};
use midly::{Format, Fps, Header, MetaMessage, Smf, Timing, Track, TrackEvent, TrackEventKind};

fn meta(delta: u32, message: MetaMessage<'static>) -> TrackEvent<'static> {
    TrackEvent {
        delta: u28::new(delta),
        kind: TrackEventKind::Meta(message),
    }
}

#[test]
fn test_from_smf() {
    let conductor: Track = vec![
        meta(0, MetaMessage::Tempo(u24::new(600_000))),
        meta(0, MetaMessage::TimeSignature(4, 2, 24, 8)),
        meta(1920, MetaMessage::TimeSignature(6, 3, 24, 8)),
        meta(960, MetaMessage::Tempo(u24::new(400_000))),
        meta(0, MetaMessage::EndOfTrack),
    ];
    let melody: Track = vec![
        meta(480, MetaMessage::TrackName(b"melody")),
        meta(0, MetaMessage::EndOfTrack),
    ];
    let smf = Smf {
        header: Header::new(Format::Parallel, Timing::Metrical(u15::new(480))),
        tracks: vec![conductor, melody],
    };

    let map = TempoMap::from_smf(&smf).unwrap();
    assert_eq!(map.time_division(), TimeDivision::TicksPerQuarterNote(480));
    assert_eq!(map.tempo_at(0).microseconds_per_quarter_note(), 600_000);
    assert_eq!(map.tempo_at(2879).microseconds_per_quarter_note(), 600_000);
    assert_eq!(map.tempo_at(2880).microseconds_per_quarter_note(), 400_000);
    assert_eq!(map.time_signature_at(1919), TimeSignature::default());
    assert_eq!(map.time_signature_at(1920), TimeSignature::new(6, 8).unwrap());
}

#[test]
fn test_from_written_smf() {
    let track: Track = vec![
        meta(0, MetaMessage::Tempo(u24::new(750_000))),
        meta(1000, MetaMessage::TimeSignature(3, 2, 24, 8)),
        meta(0, MetaMessage::EndOfTrack),
    ];
    let smf = Smf {
        header: Header::new(Format::SingleTrack, Timing::Metrical(u15::new(96))),
        tracks: vec![track],
    };
    let mut bytes = Vec::new();
    smf.write_std(&mut bytes).unwrap();

    let parsed = Smf::parse(&bytes).unwrap();
    let map = TempoMap::from_smf(&parsed).unwrap();
    assert_eq!(map.tempo_at(500), Tempo::new(750_000).unwrap());
    assert_eq!(map.time_signature_at(1000).numerator(), 3);
}

#[test]
fn test_from_smpte_smf() {
    let smf = Smf {
        header: Header::new(Format::SingleTrack, Timing::Timecode(Fps::Fps25, 40)),
        tracks: vec![vec![meta(0, MetaMessage::EndOfTrack)]],
    };
    let map = TempoMap::from_smf(&smf).unwrap();
    assert!(map.time_division().is_smpte());
    assert_eq!(
        map.time_division(),
        TimeDivision::Smpte {
            format: SmpteFormat::TwentyFive,
            ticks_per_frame: 40
        }
    );
}
