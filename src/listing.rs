//! Video file enumeration.
//!
//! Recognizes video files by extension and lists them for batch processing.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::SnapscribeError;

/// Extensions treated as video files, matched case-insensitively.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi", "mkv", "flv", "wmv", "webm"];

/// Whether a path looks like a video file, by extension alone.
pub fn is_video_file(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .map(|extension| {
            let lowered = extension.to_ascii_lowercase();
            VIDEO_EXTENSIONS.contains(&lowered.as_str())
        })
        .unwrap_or(false)
}

/// Every video file (by known extension) directly inside `directory`,
/// sorted alphabetically.
///
/// Subdirectories are not descended into.
///
/// # Errors
///
/// Returns [`SnapscribeError::IoError`] if the directory cannot be read.
pub fn list_video_files(directory: &Path) -> Result<Vec<PathBuf>, SnapscribeError> {
    let mut videos: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(directory)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && is_video_file(&path) {
            videos.push(path);
        }
    }
    videos.sort();

    log::debug!(
        "Found {} video file(s) in {}",
        videos.len(),
        directory.display(),
    );
    Ok(videos)
}
