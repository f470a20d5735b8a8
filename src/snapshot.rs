//! Periodic snapshot extraction.
//!
//! Walks a video at a fixed time interval, requests one frame per interval
//! from [`VideoSource`], encodes it as JPEG, and writes sequentially numbered
//! files into a snapshot directory. Snapshot index order equals temporal
//! order in the source video.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use snapscribe::{VideoSource, snapshot};
//!
//! let mut source = VideoSource::open("talk.mp4")?;
//! let out_dir = snapshot::snapshot_directory(source.path());
//! let count = snapshot::extract_snapshots(&mut source, Duration::from_secs(30), &out_dir)?;
//! println!("wrote {count} snapshots to {}", out_dir.display());
//! # Ok::<(), snapscribe::SnapscribeError>(())
//! ```

use std::{
    fs::{self, File},
    io::BufWriter,
    path::{Path, PathBuf},
    time::Duration,
};

use image::codecs::jpeg::JpegEncoder;

use crate::{error::SnapscribeError, video::VideoSource};

/// Suffix appended to the video stem to form the snapshot directory name.
pub const SNAPSHOT_DIR_SUFFIX: &str = "_snapshots";

/// Filename prefix shared by all snapshot files.
pub const SNAPSHOT_FILE_PREFIX: &str = "snapshot_";

/// JPEG quality used for all snapshots.
const JPEG_QUALITY: u8 = 90;

/// The snapshot directory for a video: `<video-stem>_snapshots`, next to the
/// video file.
pub fn snapshot_directory(video_path: &Path) -> PathBuf {
    let stem = video_path
        .file_stem()
        .unwrap_or_else(|| video_path.as_os_str())
        .to_string_lossy();
    video_path.with_file_name(format!("{stem}{SNAPSHOT_DIR_SUFFIX}"))
}

/// The filename for a snapshot index: `snapshot_NNNNN.jpg`, zero-indexed and
/// 5-digit zero-padded.
pub fn snapshot_file_name(index: u64) -> String {
    format!("{SNAPSHOT_FILE_PREFIX}{index:05}.jpg")
}

/// The sampling schedule for a video of the given duration.
///
/// Timestamps are t = 0, I, 2I, … while **t < duration**. The comparison is
/// strict, so the final partial interval is never sampled: a 95-second video
/// at a 30-second interval yields 0, 30, 60, 90 and nothing at 95.
pub fn sample_timestamps(duration: Duration, interval: Duration) -> Vec<Duration> {
    if interval.is_zero() {
        return Vec::new();
    }

    let mut timestamps = Vec::new();
    let mut current = Duration::ZERO;
    while current < duration {
        timestamps.push(current);
        current += interval;
    }
    timestamps
}

/// Extract periodic snapshots from a video into `output_dir`.
///
/// Creates the directory if needed (pre-existing directories are reused) and
/// writes one JPEG per sampled timestamp, overwriting any colliding indices
/// from a previous run. Returns the number of snapshots written.
///
/// # Errors
///
/// - [`SnapscribeError::InvalidInterval`] for a zero interval.
/// - [`SnapscribeError::Extraction`] if the directory cannot be created or a
///   frame fetch fails unexpectedly. End-of-stream is not an error; it
///   terminates the loop.
pub fn extract_snapshots(
    source: &mut VideoSource,
    interval: Duration,
    output_dir: &Path,
) -> Result<u64, SnapscribeError> {
    extract_snapshots_with(source, interval, output_dir, |_, _| {})
}

/// Like [`extract_snapshots`], invoking `on_snapshot` with the index and path
/// of each snapshot as it is written. Used by the CLI for progress reporting.
pub fn extract_snapshots_with<F>(
    source: &mut VideoSource,
    interval: Duration,
    output_dir: &Path,
    mut on_snapshot: F,
) -> Result<u64, SnapscribeError>
where
    F: FnMut(u64, &Path),
{
    if interval.is_zero() {
        return Err(SnapscribeError::InvalidInterval);
    }

    fs::create_dir_all(output_dir).map_err(|error| {
        SnapscribeError::Extraction(format!(
            "cannot create snapshot directory {}: {error}",
            output_dir.display(),
        ))
    })?;

    let duration = source.duration();
    log::info!(
        "Extracting snapshots from {} every {:.1}s (duration {:.1}s) into {}",
        source.path().display(),
        interval.as_secs_f64(),
        duration.as_secs_f64(),
        output_dir.display(),
    );

    let mut written = 0_u64;
    for (index, timestamp) in sample_timestamps(duration, interval).into_iter().enumerate() {
        let index = index as u64;
        let frame = source.frame_at(timestamp).map_err(|error| {
            SnapscribeError::Extraction(format!(
                "frame fetch at {:.1}s failed: {error}",
                timestamp.as_secs_f64(),
            ))
        })?;

        let Some(image) = frame else {
            // Stream ended before the estimated duration.
            log::debug!(
                "End of stream at {:.1}s after {written} snapshot(s)",
                timestamp.as_secs_f64(),
            );
            break;
        };

        let snapshot_path = output_dir.join(snapshot_file_name(index));
        write_jpeg(&image, &snapshot_path)?;
        written += 1;

        log::debug!(
            "Wrote snapshot {index} at {:.1}s -> {}",
            timestamp.as_secs_f64(),
            snapshot_path.display(),
        );
        on_snapshot(index, &snapshot_path);
    }

    log::info!("Wrote {written} snapshot(s) to {}", output_dir.display());
    Ok(written)
}

/// Encode an image as JPEG at the fixed snapshot quality, replacing any
/// existing file at `path`.
fn write_jpeg(image: &image::DynamicImage, path: &Path) -> Result<(), SnapscribeError> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let encoder = JpegEncoder::new_with_quality(writer, JPEG_QUALITY);
    image.write_with_encoder(encoder)?;
    Ok(())
}
