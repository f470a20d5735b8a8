//! Batch pipeline tests.
//!
//! The OCR-only path never opens a decoder, so per-video failure isolation
//! can be exercised with a stub recognizer and plain files standing in for
//! videos.

use std::{fs, path::Path, time::Duration};

use snapscribe::{
    ProcessOptions, Recognizer, SnapscribeError, pipeline, snapshot_directory, snapshot_file_name,
    transcript_path,
};

struct StubEngine;

impl Recognizer for StubEngine {
    fn recognize(&self, image_path: &Path, _languages: &str) -> Result<String, SnapscribeError> {
        Ok(format!(
            "text from {}\n",
            image_path.file_name().unwrap().to_string_lossy(),
        ))
    }
}

fn ocr_only_options() -> ProcessOptions {
    ProcessOptions {
        snapshots: false,
        ocr: true,
        interval: Duration::from_secs(30),
        languages: "eng".to_string(),
    }
}

#[test]
fn batch_continues_past_a_failing_video() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let root = temporary_directory.path();

    // "good.mp4" has a snapshot directory; "broken.mp4" does not, so its
    // transcript step fails.
    let good = root.join("good.mp4");
    fs::write(&good, b"video bytes").expect("Failed to write video stand-in");
    let snapshots = snapshot_directory(&good);
    fs::create_dir_all(&snapshots).expect("Failed to create snapshot dir");
    fs::write(snapshots.join(snapshot_file_name(0)), b"jpeg bytes")
        .expect("Failed to write snapshot");

    fs::write(root.join("broken.mp4"), b"video bytes").expect("Failed to write video stand-in");

    let summary = pipeline::process_directory(root, &ocr_only_options(), &StubEngine)
        .expect("Batch run failed");

    assert_eq!(summary.processed, 1);
    assert_eq!(summary.failed, 1);

    // The good video still produced a complete transcript.
    let transcript = fs::read_to_string(transcript_path(&good)).expect("Missing transcript");
    assert!(transcript.contains("# Snapshot 0 — snapshot_00000.jpg"));
    assert!(!transcript_path(&root.join("broken.mp4")).exists());
}

#[test]
fn empty_directory_yields_an_empty_summary() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");

    let summary =
        pipeline::process_directory(temporary_directory.path(), &ocr_only_options(), &StubEngine)
            .expect("Batch run failed");

    assert_eq!(summary.processed, 0);
    assert_eq!(summary.failed, 0);
}

#[test]
fn non_video_files_are_not_processed() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let root = temporary_directory.path();
    fs::write(root.join("notes.txt"), b"not a video").expect("Failed to write file");

    let summary = pipeline::process_directory(root, &ocr_only_options(), &StubEngine)
        .expect("Batch run failed");
    assert_eq!(summary.processed + summary.failed, 0);
}

#[test]
fn process_video_propagates_missing_snapshot_directory() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let video = temporary_directory.path().join("talk.mp4");
    fs::write(&video, b"video bytes").expect("Failed to write video stand-in");

    let result = pipeline::process_video(&video, &ocr_only_options(), &StubEngine);
    assert!(matches!(
        result,
        Err(SnapscribeError::SnapshotDirMissing { .. }),
    ));
}

#[test]
fn snapshot_step_fails_on_an_unreadable_video() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let video = temporary_directory.path().join("garbage.mp4");
    fs::write(&video, b"this is not a media file").expect("Failed to write garbage video");

    let options = ProcessOptions {
        snapshots: true,
        ocr: false,
        interval: Duration::from_secs(30),
        languages: "eng".to_string(),
    };

    let result = pipeline::process_video(&video, &options, &StubEngine);
    assert!(result.is_err(), "Expected error for unreadable video");
}
