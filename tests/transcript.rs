//! Transcript building tests.
//!
//! These run entirely against a stub [`Recognizer`], so no video fixture or
//! Tesseract install is needed: the builder only reads the snapshot
//! directory and derives output names from the video path.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use snapscribe::{
    Recognizer, SnapscribeError, build_transcript, list_snapshots, snapshot_directory,
    snapshot_file_name, transcript_path,
};

/// Returns canned text per snapshot filename; empty string when unmapped.
struct StubEngine {
    responses: HashMap<String, String>,
}

impl StubEngine {
    fn new(responses: &[(&str, &str)]) -> Self {
        Self {
            responses: responses
                .iter()
                .map(|(name, text)| (name.to_string(), text.to_string()))
                .collect(),
        }
    }
}

impl Recognizer for StubEngine {
    fn recognize(&self, image_path: &Path, _languages: &str) -> Result<String, SnapscribeError> {
        let name = image_path.file_name().unwrap().to_string_lossy();
        Ok(self.responses.get(name.as_ref()).cloned().unwrap_or_default())
    }
}

/// Always fails, as a missing engine would.
struct BrokenEngine;

impl Recognizer for BrokenEngine {
    fn recognize(&self, image_path: &Path, _languages: &str) -> Result<String, SnapscribeError> {
        Err(SnapscribeError::Ocr {
            image: image_path.to_path_buf(),
            reason: "engine not installed".to_string(),
        })
    }
}

/// Lay out a fake video path and snapshot directory holding `count` files.
fn fixture_video(root: &Path, count: u64) -> PathBuf {
    let video = root.join("talk.mp4");
    let snapshots = snapshot_directory(&video);
    fs::create_dir_all(&snapshots).expect("Failed to create snapshot dir");
    for index in 0..count {
        fs::write(snapshots.join(snapshot_file_name(index)), b"jpeg bytes")
            .expect("Failed to write snapshot file");
    }
    video
}

#[test]
fn transcript_path_sits_next_to_the_video() {
    assert_eq!(
        transcript_path(Path::new("/media/talk.mp4")),
        Path::new("/media/talk_ocr.txt"),
    );
}

#[test]
fn missing_snapshot_directory_is_an_error() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let video = temporary_directory.path().join("talk.mp4");

    let result = build_transcript(&video, &StubEngine::new(&[]), "eng");
    assert!(matches!(
        result,
        Err(SnapscribeError::SnapshotDirMissing { .. }),
    ));
    assert!(
        !transcript_path(&video).exists(),
        "no transcript file may be created on failure",
    );
}

#[test]
fn empty_snapshot_directory_is_an_error_not_an_empty_transcript() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let video = fixture_video(temporary_directory.path(), 0);

    let result = build_transcript(&video, &StubEngine::new(&[]), "eng");
    assert!(matches!(result, Err(SnapscribeError::NoSnapshots { .. })));
    assert!(!transcript_path(&video).exists());
}

#[test]
fn one_block_per_snapshot_in_index_order() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let video = fixture_video(temporary_directory.path(), 3);

    let engine = StubEngine::new(&[
        ("snapshot_00000.jpg", "intro slide\n"),
        // snapshot_00001.jpg recognizes as empty.
        ("snapshot_00002.jpg", "closing slide\n"),
    ]);

    let path = build_transcript(&video, &engine, "eng").expect("Transcript build failed");
    let contents = fs::read_to_string(path).expect("Failed to read transcript");

    let expected = "# Snapshot 0 — snapshot_00000.jpg\nintro slide\n\n\n\
                    # Snapshot 1 — snapshot_00001.jpg\n\n\n\
                    # Snapshot 2 — snapshot_00002.jpg\nclosing slide\n\n";
    assert_eq!(contents, expected);
}

#[test]
fn blocks_count_matches_snapshot_count() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let video = fixture_video(temporary_directory.path(), 12);

    let path = build_transcript(&video, &StubEngine::new(&[]), "eng")
        .expect("Transcript build failed");
    let contents = fs::read_to_string(path).expect("Failed to read transcript");

    let headers = contents
        .lines()
        .filter(|line| line.starts_with("# Snapshot "))
        .count();
    assert_eq!(headers, 12);
}

#[test]
fn transcript_is_rewritten_not_appended() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let video = fixture_video(temporary_directory.path(), 1);

    fs::write(transcript_path(&video), "stale transcript from a previous run")
        .expect("Failed to seed stale transcript");

    let engine = StubEngine::new(&[("snapshot_00000.jpg", "fresh text\n")]);
    let path = build_transcript(&video, &engine, "eng").expect("Transcript build failed");
    let contents = fs::read_to_string(path).expect("Failed to read transcript");

    assert!(!contents.contains("stale transcript"));
    assert!(contents.contains("fresh text"));
}

#[test]
fn listing_sorts_by_numeric_index_not_string_order() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let directory = temporary_directory.path();

    // Unpadded names sort lexically as 10 < 2; the numeric sort must not.
    for name in ["snapshot_10.jpg", "snapshot_2.jpg", "snapshot_1.jpg"] {
        fs::write(directory.join(name), b"jpeg bytes").expect("Failed to write file");
    }
    // Non-matching files are ignored.
    fs::write(directory.join("notes.txt"), b"ignore me").expect("Failed to write file");
    fs::write(directory.join("snapshot_x.jpg"), b"ignore me").expect("Failed to write file");

    let listed = list_snapshots(directory).expect("Listing failed");
    let names: Vec<_> = listed
        .iter()
        .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["snapshot_1.jpg", "snapshot_2.jpg", "snapshot_10.jpg"]);
}

#[test]
fn engine_failure_propagates() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let video = fixture_video(temporary_directory.path(), 2);

    let result = build_transcript(&video, &BrokenEngine, "eng");
    assert!(matches!(result, Err(SnapscribeError::Ocr { .. })));

    let error_message = result.unwrap_err().to_string();
    assert!(
        error_message.contains("engine not installed"),
        "Error should carry the engine reason: {error_message}",
    );
}
