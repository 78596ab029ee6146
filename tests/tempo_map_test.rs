use midi_timespan::{
    convert_length, BarBeatTicksTimeSpan, SmpteFormat, Tempo, TempoMap, TimeDivision, TimeSignature, TimeSpanError,
    TimeSpanKind,
};

#[test]
fn test_manager_commit_leaves_snapshot_alone() {
    let original = TempoMap::new(TimeDivision::ticks_per_quarter_note(480).unwrap());
    let mut manager = original.manage();
    manager.set_time_signature(1920, TimeSignature::new(3, 4).unwrap());
    let edited = manager.commit();

    assert_eq!(
        convert_length(3000, 0, TimeSpanKind::BarBeatTicks, &original).unwrap(),
        BarBeatTicksTimeSpan::new(1, 2, 120).into()
    );
    assert_eq!(
        convert_length(3000, 0, TimeSpanKind::BarBeatTicks, &edited).unwrap(),
        BarBeatTicksTimeSpan::new(1, 2, 120).into()
    );
    // Past the change the same length reads differently under the two snapshots
    assert_eq!(
        convert_length(4000, 0, TimeSpanKind::BarBeatTicks, &original).unwrap(),
        BarBeatTicksTimeSpan::new(2, 0, 160).into()
    );
    assert_eq!(
        convert_length(4000, 0, TimeSpanKind::BarBeatTicks, &edited).unwrap(),
        BarBeatTicksTimeSpan::new(2, 1, 160).into()
    );
}

#[test]
fn test_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tempo_map.json");

    let map = TempoMap::new(TimeDivision::ticks_per_quarter_note(960).unwrap())
        .manage()
        .set_tempo(0, Tempo::from_bpm(90.0).unwrap())
        .set_tempo(3840, Tempo::from_bpm(120.0).unwrap())
        .set_time_signature(0, TimeSignature::new(6, 8).unwrap())
        .commit();
    map.save(&path).unwrap();

    let loaded = TempoMap::load(&path).unwrap();
    assert_eq!(loaded, map);
    assert_eq!(loaded.tempo_at(4000).bpm(), 120.0);
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = TempoMap::load(dir.path().join("missing.json"));
    assert!(matches!(result, Err(TimeSpanError::Serialization(_))));
}

#[test]
fn test_load_rejects_zero_ticks_per_frame() {
    let map = TempoMap::new(TimeDivision::smpte(SmpteFormat::Thirty, 8).unwrap());
    let json = map.to_json().unwrap();
    assert_eq!(TempoMap::from_json(&json).unwrap(), map);

    let broken = json.replace("\"ticks_per_frame\": 8", "\"ticks_per_frame\": 0");
    assert_ne!(broken, json);
    assert!(matches!(TempoMap::from_json(&broken), Err(TimeSpanError::Serialization(_))));
}

#[test]
fn test_hand_built_zero_ticks_per_frame_does_not_panic() {
    let map = TempoMap::new(TimeDivision::Smpte { format: SmpteFormat::Thirty, ticks_per_frame: 0 });
    assert!(matches!(
        convert_length(100, 0, TimeSpanKind::Metric, &map),
        Err(TimeSpanError::InvalidTimeDivision(_))
    ));
}
