//! Error types for the `snapscribe` crate.
//!
//! This module defines [`SnapscribeError`], the unified error type returned by
//! all fallible operations in the crate. Variants carry enough context (file
//! paths, snapshot directories, upstream messages) to diagnose a failure
//! without extra logging at the call site.

use std::{io::Error as IoError, path::PathBuf};

use ffmpeg_next::Error as FfmpegError;
use image::ImageError;
use thiserror::Error;

/// The unified error type for all `snapscribe` operations.
///
/// Every public method that can fail returns `Result<T, SnapscribeError>`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SnapscribeError {
    /// The video file could not be opened.
    #[error("Failed to open video file at {path}: {reason}")]
    FileOpen {
        /// Path that was passed to [`crate::VideoSource::open`].
        path: PathBuf,
        /// Underlying reason the open failed.
        reason: String,
    },

    /// The file does not contain a video stream.
    #[error("No video stream found in file")]
    NoVideoStream,

    /// A video frame could not be decoded.
    #[error("Failed to decode video frame: {0}")]
    FrameDecode(String),

    /// The snapshot loop failed for a reason other than end-of-stream.
    #[error("Snapshot extraction failed: {0}")]
    Extraction(String),

    /// A zero or negative snapshot interval was provided.
    #[error("Snapshot interval must be greater than zero")]
    InvalidInterval,

    /// The OCR engine could not be invoked, or reported failure.
    #[error("OCR failed for {image}: {reason}")]
    Ocr {
        /// The image the engine was asked to read.
        image: PathBuf,
        /// What went wrong (spawn failure, non-zero exit, engine stderr).
        reason: String,
    },

    /// The snapshot directory for a video does not exist.
    #[error("Snapshot directory not found: {directory}")]
    SnapshotDirMissing {
        /// The directory that was expected to hold snapshots.
        directory: PathBuf,
    },

    /// The snapshot directory exists but holds no snapshots to transcribe.
    #[error("No snapshots found in {directory}")]
    NoSnapshots {
        /// The directory that was searched.
        directory: PathBuf,
    },

    /// Conflicting or missing command-line flags.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// An error originating from the FFmpeg libraries.
    #[error("FFmpeg error: {0}")]
    FfmpegError(String),

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    IoError(#[from] IoError),

    /// An error from the `image` crate during frame encoding.
    #[error("Image processing error: {0}")]
    ImageError(#[from] ImageError),
}

impl From<FfmpegError> for SnapscribeError {
    fn from(error: FfmpegError) -> Self {
        SnapscribeError::FfmpegError(error.to_string())
    }
}
