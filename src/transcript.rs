//! Transcript assembly.
//!
//! Iterates a video's snapshot files in index order, runs each through a
//! [`Recognizer`], and concatenates the results into one labelled transcript
//! file, `<video-stem>_ocr.txt`, next to the video. The transcript is fully
//! rewritten on every run, never appended to.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{error::SnapscribeError, ocr::Recognizer, snapshot};

/// Suffix appended to the video stem to form the transcript filename.
pub const TRANSCRIPT_SUFFIX: &str = "_ocr.txt";

/// The transcript file for a video: `<video-stem>_ocr.txt`, next to the
/// video file.
pub fn transcript_path(video_path: &Path) -> PathBuf {
    let stem = video_path
        .file_stem()
        .unwrap_or_else(|| video_path.as_os_str())
        .to_string_lossy();
    video_path.with_file_name(format!("{stem}{TRANSCRIPT_SUFFIX}"))
}

/// Parse the numeric index out of a snapshot filename.
///
/// Accepts only the `snapshot_<digits>.jpg` template; anything else in the
/// directory is ignored by the listing.
fn snapshot_index(file_name: &str) -> Option<u64> {
    let digits = file_name
        .strip_prefix(snapshot::SNAPSHOT_FILE_PREFIX)?
        .strip_suffix(".jpg")?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// List the snapshot files in a directory, sorted by numeric index.
///
/// The sort key is the index embedded in the filename, not the filename
/// string, so ordering stays correct beyond the zero-padded range.
///
/// # Errors
///
/// - [`SnapscribeError::SnapshotDirMissing`] if `directory` does not exist.
/// - [`SnapscribeError::NoSnapshots`] if it holds no snapshot files.
pub fn list_snapshots(directory: &Path) -> Result<Vec<PathBuf>, SnapscribeError> {
    if !directory.is_dir() {
        return Err(SnapscribeError::SnapshotDirMissing {
            directory: directory.to_path_buf(),
        });
    }

    let mut snapshots: Vec<(u64, PathBuf)> = Vec::new();
    for entry in fs::read_dir(directory)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if let Some(index) = snapshot_index(name) {
            snapshots.push((index, path));
        }
    }

    if snapshots.is_empty() {
        return Err(SnapscribeError::NoSnapshots {
            directory: directory.to_path_buf(),
        });
    }

    snapshots.sort_unstable_by_key(|(index, _)| *index);
    Ok(snapshots.into_iter().map(|(_, path)| path).collect())
}

/// Render the transcript blocks for a list of snapshots.
///
/// One block per snapshot, in order, separated by a blank line:
///
/// ```text
/// # Snapshot <index> — <filename>
/// <recognized text>
/// ```
///
/// Empty recognized text is kept as an empty block body, not skipped.
fn render_transcript<R>(
    snapshots: &[PathBuf],
    recognizer: &R,
    languages: &str,
) -> Result<String, SnapscribeError>
where
    R: Recognizer + ?Sized,
{
    let mut blocks = Vec::with_capacity(snapshots.len());
    for (index, snapshot_path) in snapshots.iter().enumerate() {
        let name = snapshot_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let text = recognizer.recognize(snapshot_path, languages)?;
        if text.trim().is_empty() {
            log::debug!("Snapshot {index} ({name}): no text recognized");
        }

        blocks.push(format!("# Snapshot {index} — {name}\n{text}\n"));
    }
    Ok(blocks.join("\n"))
}

/// Build the OCR transcript for a video from its snapshot directory.
///
/// Lists `<video-stem>_snapshots/` in index order, recognizes each snapshot,
/// and writes the concatenated blocks to `<video-stem>_ocr.txt`, overwriting
/// any existing transcript. Returns the transcript path.
///
/// # Errors
///
/// Propagates listing errors ([`SnapscribeError::SnapshotDirMissing`],
/// [`SnapscribeError::NoSnapshots`]) and the first
/// [`SnapscribeError::Ocr`] from the engine; an empty snapshot directory is
/// reported, never silently turned into a zero-byte transcript.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
///
/// use snapscribe::{TesseractEngine, transcript};
///
/// let engine = TesseractEngine::new();
/// let path = transcript::build_transcript(Path::new("talk.mp4"), &engine, "eng")?;
/// println!("transcript at {}", path.display());
/// # Ok::<(), snapscribe::SnapscribeError>(())
/// ```
pub fn build_transcript<R>(
    video_path: &Path,
    recognizer: &R,
    languages: &str,
) -> Result<PathBuf, SnapscribeError>
where
    R: Recognizer + ?Sized,
{
    let snapshot_dir = snapshot::snapshot_directory(video_path);
    let snapshots = list_snapshots(&snapshot_dir)?;

    log::info!(
        "Transcribing {} snapshot(s) from {} (lang={languages})",
        snapshots.len(),
        snapshot_dir.display(),
    );

    let transcript = render_transcript(&snapshots, recognizer, languages)?;

    let output_path = transcript_path(video_path);
    fs::write(&output_path, transcript)?;

    log::info!("Wrote transcript to {}", output_path.display());
    Ok(output_path)
}
