//! # snapscribe
//!
//! Batch-process video files: enumerate videos in a folder, extract periodic
//! JPEG snapshots, and run OCR over those snapshots to produce a transcript
//! file per video.
//!
//! Video decoding is powered by FFmpeg via the
//! [`ffmpeg-next`](https://crates.io/crates/ffmpeg-next) crate; text
//! recognition shells out to the Tesseract binary. The pipeline is linear,
//! synchronous, and single-threaded: list → extract → OCR.
//!
//! ## Quick Start
//!
//! ### Extract snapshots every 30 seconds
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use snapscribe::{VideoSource, snapshot};
//!
//! let mut source = VideoSource::open("lecture.mp4").unwrap();
//! let out_dir = snapshot::snapshot_directory(source.path());
//! let count = snapshot::extract_snapshots(
//!     &mut source,
//!     Duration::from_secs(30),
//!     &out_dir,
//! ).unwrap();
//! println!("{count} snapshots");
//! ```
//!
//! ### Transcribe the snapshots
//!
//! ```no_run
//! use std::path::Path;
//!
//! use snapscribe::{TesseractEngine, transcript};
//!
//! let engine = TesseractEngine::new();
//! transcript::build_transcript(Path::new("lecture.mp4"), &engine, "eng").unwrap();
//! ```
//!
//! ### Run the whole pipeline over a directory
//!
//! ```no_run
//! use std::{path::Path, time::Duration};
//!
//! use snapscribe::{ProcessOptions, TesseractEngine, pipeline};
//!
//! let options = ProcessOptions {
//!     snapshots: true,
//!     ocr: true,
//!     interval: Duration::from_secs(30),
//!     languages: "eng+fra".to_string(),
//! };
//! let summary = pipeline::process_directory(
//!     Path::new("recordings"),
//!     &options,
//!     &TesseractEngine::new(),
//! ).unwrap();
//! println!("{} ok, {} failed", summary.processed, summary.failed);
//! ```
//!
//! ## File layout
//!
//! - Snapshots: `<video-stem>_snapshots/snapshot_NNNNN.jpg`, 5-digit
//!   zero-padded, sequential from `00000`; index order equals temporal order.
//! - Transcript: `<video-stem>_ocr.txt`, UTF-8, one block per snapshot headed
//!   by `# Snapshot <index> — <filename>`, fully rewritten each run.
//!
//! ## Requirements
//!
//! FFmpeg development libraries must be installed on your system, and the
//! `tesseract` binary must be on the `PATH` (or pointed to with the
//! `TESSERACT_CMD` environment variable) for the OCR step.

pub mod error;
pub mod ffmpeg;
pub mod listing;
pub mod ocr;
pub mod pipeline;
pub mod snapshot;
pub mod transcript;
mod utilities;
pub mod video;

pub use error::SnapscribeError;
pub use ffmpeg::{FfmpegLogLevel, set_ffmpeg_log_level};
pub use listing::{VIDEO_EXTENSIONS, is_video_file, list_video_files};
pub use ocr::{Recognizer, TesseractEngine};
pub use pipeline::{BatchSummary, ProcessOptions};
pub use snapshot::{extract_snapshots, sample_timestamps, snapshot_directory, snapshot_file_name};
pub use transcript::{build_transcript, list_snapshots, transcript_path};
pub use video::VideoSource;
