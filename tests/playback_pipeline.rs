use gendance::analysis::{analyze_file, OnsetConfig, PeakAnalyzer};
use gendance::choreography::{normalize, BeatGridSource, JsonFileSource};
use gendance::model::{AudioFeatures, PoseLibrary, TimelineStep};
use gendance::playback::{beat_pulse, resolve, run_ticks, SimulatedClock};
use gendance::validation::validate_timeline;
use gendance::{load_timeline, ChoreographyRequest, PlaybackSession, TimelineError};
use std::fs;
use std::ops::ControlFlow;
use std::path::Path;
use tempfile::TempDir;

const SAMPLE_RATE: u32 = 8000;

/// Write a mono 16-bit PCM WAV
fn write_wav(path: &Path, samples: &[i16]) -> std::io::Result<()> {
    let data_len = (samples.len() * 2) as u32;
    let mut bytes = Vec::with_capacity(44 + data_len as usize);

    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");

    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
    bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
    bytes.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    bytes.extend_from_slice(&(SAMPLE_RATE * 2).to_le_bytes());
    bytes.extend_from_slice(&2u16.to_le_bytes());
    bytes.extend_from_slice(&16u16.to_le_bytes());

    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());
    for sample in samples {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }

    fs::write(path, bytes)
}

/// Four seconds of full-scale clicks every half second (120 BPM)
fn click_track(dir: &TempDir) -> std::path::PathBuf {
    let period = (SAMPLE_RATE / 2) as usize;
    let samples: Vec<i16> = (0..SAMPLE_RATE as usize * 4)
        .map(|i| if i % period < 400 { i16::MAX } else { 0 })
        .collect();

    let path = dir.path().join("clicks.wav");
    write_wav(&path, &samples).unwrap();
    path
}

fn click_analyzer() -> PeakAnalyzer {
    // Refractory shorter than the click period so every click counts
    PeakAnalyzer::new().with_onset_config(OnsetConfig::default().with_refractory(2000))
}

#[test]
fn test_analyze_click_track() {
    let dir = TempDir::new().unwrap();
    let path = click_track(&dir);

    let features = analyze_file(&click_analyzer(), &path).unwrap();
    assert_eq!(features.bpm, 120.0);
    assert!((features.duration - 4.0).abs() < 0.01);
    assert_eq!(features.energy.len(), 100);
    assert!(features.energy.iter().all(|e| (0.0..=255.0).contains(e)));
    assert!(features.mean_energy() > 0.0);
}

#[test]
fn test_timeline_file_drives_playback() {
    let dir = TempDir::new().unwrap();
    let audio = click_track(&dir);
    let features = analyze_file(&click_analyzer(), &audio).unwrap();

    // Unsorted, no opening IDLE, one unknown pose
    let timeline_path = dir.path().join("timeline.json");
    fs::write(
        &timeline_path,
        r#"[
            {"timestamp": 2.0, "poseId": "KICK_LEFT"},
            {"timestamp": 1.0, "poseId": "DAB"},
            {"timestamp": 3.0, "poseId": "MOONWALK"}
        ]"#,
    )
    .unwrap();

    let poses = PoseLibrary::builtin();
    let request = ChoreographyRequest::new(&features, &poses);
    let loaded = load_timeline(&JsonFileSource::new(timeline_path), &request);
    assert!(loaded.notice.is_none());

    let names: Vec<&str> = loaded.timeline.steps().iter().map(|s| s.pose.as_str()).collect();
    assert_eq!(names, vec!["IDLE", "DAB", "KICK_LEFT", "MOONWALK"]);

    let report = validate_timeline(&loaded.timeline, &poses, features.duration);
    assert_eq!(report.unknown_poses.len(), 1);

    let session = PlaybackSession::new(features, loaded.timeline, poses);

    let frame = session.frame(1.1);
    assert_eq!(frame.cursor.active_index, 1);
    assert!((frame.cursor.blend_factor - 0.5).abs() < 1e-9);

    let early = session.frame(1.05);
    assert_eq!(early.current_move.as_str(), "DAB");
    assert_eq!(early.next_move.as_str(), "KICK_LEFT");

    let late = session.frame(1.15);
    assert_eq!(late.skeleton_from.as_str(), "DAB");
    assert_eq!(late.current_move.as_str(), "KICK_LEFT");
    assert_eq!(late.next_move.as_str(), "MOONWALK");

    let mut changes = Vec::new();
    let mut clock = SimulatedClock::new(0.0, 0.05, session.features().duration);
    let frames = run_ticks(&session, &mut clock, |frame| {
        let name = frame.current_move.to_string();
        if changes.last() != Some(&name) {
            changes.push(name);
        }
        ControlFlow::Continue(())
    });

    assert!(frames >= 80);
    assert_eq!(changes, vec!["IDLE", "DAB", "KICK_LEFT", "MOONWALK"]);
}

#[test]
fn test_missing_timeline_falls_back_to_idle() {
    let dir = TempDir::new().unwrap();
    let features = AudioFeatures {
        bpm: 120.0,
        energy: vec![0.0; 100],
        duration: 10.0,
        name: "missing".to_string(),
    };
    let poses = PoseLibrary::builtin();
    let request = ChoreographyRequest::new(&features, &poses);

    let loaded = load_timeline(&JsonFileSource::new(dir.path().join("nope.json")), &request);
    assert!(matches!(loaded.notice, Some(TimelineError::Source(_))));
    assert_eq!(loaded.timeline.len(), 1);

    let session = PlaybackSession::new(features, loaded.timeline, poses);
    for t in [0.0, 2.5, 9.9] {
        let frame = session.frame(t);
        assert_eq!(frame.cursor.active_index, 0);
        assert_eq!(frame.cursor.blend_factor, 0.0);
        assert!(frame.current_move.is_idle());
    }
}

#[test]
fn test_beat_grid_covers_track() {
    let features = AudioFeatures {
        bpm: 120.0,
        energy: vec![0.0; 100],
        duration: 8.0,
        name: "grid".to_string(),
    };
    let poses = PoseLibrary::builtin();
    let request = ChoreographyRequest::new(&features, &poses);

    let loaded = load_timeline(&BeatGridSource::new(2), &request);
    assert!(loaded.notice.is_none());

    let steps = loaded.timeline.steps();
    assert!(steps[0].pose.is_idle());
    assert_eq!(steps[0].timestamp, 0.0);
    // Moves at 1s, 2s, ... 7s
    assert_eq!(steps.len(), 8);
    assert!(steps.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    assert!(steps.iter().skip(1).all(|s| poses.contains(&s.pose)));
}

#[test]
fn test_reference_values() {
    let timeline = normalize(vec![
        TimelineStep::new(0.0, "IDLE"),
        TimelineStep::new(1.0, "DAB"),
        TimelineStep::new(2.0, "KICK_LEFT"),
    ]);
    let cursor = resolve(&timeline, 1.1, 5.0);
    assert_eq!(cursor.active_index, 1);
    assert!((cursor.blend_factor - 0.5).abs() < 1e-9);

    assert_eq!(beat_pulse(120.0, 0.5), 1.0);

    let empty = normalize(Vec::new());
    let cursor = resolve(&empty, 42.0, 5.0);
    assert_eq!(cursor.active_index, 0);
    assert_eq!(cursor.blend_factor, 0.0);
}
