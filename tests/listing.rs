//! Video file enumeration tests.

use std::fs;

use snapscribe::{is_video_file, list_video_files};

#[test]
fn recognizes_extensions_case_insensitively() {
    assert!(is_video_file("movie.mp4".as_ref()));
    assert!(is_video_file("Movie.MP4".as_ref()));
    assert!(is_video_file("clip.WebM".as_ref()));
    assert!(!is_video_file("notes.txt".as_ref()));
    assert!(!is_video_file("archive.tar.gz".as_ref()));
    assert!(!is_video_file("no_extension".as_ref()));
}

#[test]
fn lists_only_videos_sorted_alphabetically() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let root = temporary_directory.path();

    for name in ["zebra.mp4", "alpha.mkv", "middle.AVI", "readme.md", "cover.jpg"] {
        fs::write(root.join(name), b"content").expect("Failed to write file");
    }
    // Subdirectories are never listed, even with a video-like name.
    fs::create_dir(root.join("nested.mp4")).expect("Failed to create subdir");

    let videos = list_video_files(root).expect("Listing failed");
    let names: Vec<_> = videos
        .iter()
        .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["alpha.mkv", "middle.AVI", "zebra.mp4"]);
}

#[test]
fn empty_directory_lists_nothing() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let videos = list_video_files(temporary_directory.path()).expect("Listing failed");
    assert!(videos.is_empty());
}

#[test]
fn missing_directory_is_an_io_error() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let missing = temporary_directory.path().join("does_not_exist");
    assert!(list_video_files(&missing).is_err());
}
