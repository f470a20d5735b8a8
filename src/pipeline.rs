//! Per-video dispatch and batch processing.
//!
//! A video runs through up to two steps, strictly in order: snapshot
//! extraction, then transcript building. Directory batches process videos
//! sequentially, one fully completed before the next begins; a failure in
//! one video is logged and counted, and the batch moves on.

use std::{path::Path, time::Duration};

use crate::{
    error::SnapscribeError, listing, ocr::Recognizer, snapshot, transcript, video::VideoSource,
};

/// Which steps to run for each video, and with what parameters.
#[derive(Debug, Clone)]
#[must_use]
pub struct ProcessOptions {
    /// Extract periodic snapshots.
    pub snapshots: bool,
    /// Build the OCR transcript from the snapshot directory.
    pub ocr: bool,
    /// Time spacing between sampled timestamps.
    pub interval: Duration,
    /// Plus-joined OCR language codes, passed through to the engine.
    pub languages: String,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            snapshots: false,
            ocr: false,
            interval: Duration::from_secs(30),
            languages: "eng".to_string(),
        }
    }
}

/// Outcome of a directory batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct BatchSummary {
    /// Videos that completed every requested step.
    pub processed: usize,
    /// Videos that failed; their errors were logged and skipped over.
    pub failed: usize,
}

/// Apply the requested steps to a single video file.
///
/// With `snapshots` set, opens the video and extracts snapshots into
/// `<video-stem>_snapshots/`; the decode context is released before OCR
/// starts. With `ocr` set, builds the transcript from that directory, which
/// may have been generated by an earlier run.
///
/// # Errors
///
/// Any step error is terminal for this video and is returned as-is.
pub fn process_video<R>(
    video_path: &Path,
    options: &ProcessOptions,
    recognizer: &R,
) -> Result<(), SnapscribeError>
where
    R: Recognizer + ?Sized,
{
    log::info!("Processing {}", video_path.display());

    if options.snapshots {
        let mut source = VideoSource::open(video_path)?;
        let output_dir = snapshot::snapshot_directory(video_path);
        snapshot::extract_snapshots(&mut source, options.interval, &output_dir)?;
    }

    if options.ocr {
        transcript::build_transcript(video_path, recognizer, &options.languages)?;
    }

    Ok(())
}

/// Process every recognized video in a directory, sequentially.
///
/// Per-video failure isolation: an error in one video is logged and counted
/// in the summary rather than aborting the batch.
///
/// # Errors
///
/// Returns [`SnapscribeError::IoError`] only if the directory itself cannot
/// be listed; per-video errors never propagate.
pub fn process_directory<R>(
    directory: &Path,
    options: &ProcessOptions,
    recognizer: &R,
) -> Result<BatchSummary, SnapscribeError>
where
    R: Recognizer + ?Sized,
{
    let videos = listing::list_video_files(directory)?;
    log::info!(
        "Batch: {} video(s) in {}",
        videos.len(),
        directory.display(),
    );

    let mut summary = BatchSummary {
        processed: 0,
        failed: 0,
    };

    for video in &videos {
        match process_video(video, options, recognizer) {
            Ok(()) => summary.processed += 1,
            Err(error) => {
                log::error!("{}: {error}", video.display());
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}
