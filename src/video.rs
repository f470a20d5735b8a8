//! Video decoding via FFmpeg.
//!
//! [`VideoSource`] opens a video file, reports its frame rate and frame
//! count, and yields decoded frames by timestamp. Frames are returned as
//! [`image::DynamicImage`] values in RGB8 format, ready for JPEG encoding.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    path::{Path, PathBuf},
    time::Duration,
};

use ffmpeg_next::{
    codec::context::Context as CodecContext,
    format::{Pixel, context::Input},
    frame::Video as VideoFrame,
    media::Type,
    software::scaling::{Context as ScalingContext, Flags as ScalingFlags},
};
use image::{DynamicImage, RgbImage};

use crate::{error::SnapscribeError, utilities};

/// An opened video file.
///
/// Created via [`VideoSource::open`], this struct holds the FFmpeg demuxer
/// context for the lifetime of the value; the decode context is released when
/// the `VideoSource` is dropped, so release is guaranteed even if an
/// extraction loop bails out early.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
///
/// use snapscribe::VideoSource;
///
/// let mut source = VideoSource::open("lecture.mp4").unwrap();
/// println!("{} frames at {:.2} fps", source.frame_count(), source.frame_rate());
/// if let Some(frame) = source.frame_at(Duration::from_secs(30)).unwrap() {
///     frame.save("frame_30s.png").unwrap();
/// }
/// ```
pub struct VideoSource {
    /// The opened FFmpeg input (demuxer) context.
    input_context: Input,
    /// Index of the best video stream.
    stream_index: usize,
    /// Frames per second (may be approximate for variable-frame-rate content).
    frame_rate: f64,
    /// Total number of frames, reported by the stream or estimated from the
    /// container duration and frame rate.
    frame_count: u64,
    /// Path to the opened video file (kept for error messages).
    file_path: PathBuf,
}

impl Debug for VideoSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("VideoSource")
            .field("stream_index", &self.stream_index)
            .field("frame_rate", &self.frame_rate)
            .field("frame_count", &self.frame_count)
            .field("file_path", &self.file_path)
            .finish_non_exhaustive()
    }
}

impl VideoSource {
    /// Open a video file for frame extraction.
    ///
    /// Initializes FFmpeg (idempotent), opens the file, locates the best
    /// video stream, and caches its frame rate and frame count.
    ///
    /// # Errors
    ///
    /// Returns [`SnapscribeError::FileOpen`] if the file cannot be opened or
    /// is not a recognisable media container, and
    /// [`SnapscribeError::NoVideoStream`] if it carries no video stream.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use snapscribe::{SnapscribeError, VideoSource};
    ///
    /// let source = VideoSource::open("movie.mp4")?;
    /// # Ok::<(), SnapscribeError>(())
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SnapscribeError> {
        let path = path.as_ref();
        let file_path = path.to_path_buf();

        log::debug!("Opening video file: {}", file_path.display());

        // Initialise ffmpeg (safe to call multiple times).
        ffmpeg_next::init().map_err(|error| SnapscribeError::FileOpen {
            path: file_path.clone(),
            reason: format!("FFmpeg initialisation failed: {error}"),
        })?;

        let input_context =
            ffmpeg_next::format::input(&path).map_err(|error| SnapscribeError::FileOpen {
                path: file_path.clone(),
                reason: error.to_string(),
            })?;

        let stream = input_context
            .streams()
            .best(Type::Video)
            .ok_or(SnapscribeError::NoVideoStream)?;
        let stream_index = stream.index();

        // Compute frames per second from the stream's average frame rate,
        // falling back to the real base rate.
        let average_rate = stream.avg_frame_rate();
        let frame_rate = if average_rate.denominator() != 0 {
            average_rate.numerator() as f64 / average_rate.denominator() as f64
        } else {
            let rate = stream.rate();
            if rate.denominator() != 0 {
                rate.numerator() as f64 / rate.denominator() as f64
            } else {
                0.0
            }
        };

        // Container-level duration, used to estimate the frame count when the
        // stream does not report one.
        let duration_microseconds = input_context.duration();
        let container_seconds = if duration_microseconds > 0 {
            duration_microseconds as f64 / 1_000_000.0
        } else {
            0.0
        };

        let reported_frames = stream.frames();
        let frame_count = if reported_frames > 0 {
            reported_frames as u64
        } else if frame_rate > 0.0 {
            (container_seconds * frame_rate) as u64
        } else {
            0
        };

        if frame_rate <= 0.0 {
            log::warn!(
                "{}: stream reports no frame rate; duration will read as zero",
                file_path.display(),
            );
        }

        log::info!(
            "Opened video: {} ({:.2} fps, ~{} frames, {:.2}s)",
            file_path.display(),
            frame_rate,
            frame_count,
            container_seconds,
        );

        Ok(Self {
            input_context,
            stream_index,
            frame_rate,
            frame_count,
            file_path,
        })
    }

    /// Frames per second of the video stream.
    pub fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    /// Total number of frames in the video stream.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Duration of the video, derived as frame count over frame rate.
    pub fn duration(&self) -> Duration {
        if self.frame_rate > 0.0 {
            Duration::from_secs_f64(self.frame_count as f64 / self.frame_rate)
        } else {
            Duration::ZERO
        }
    }

    /// Path of the opened video file.
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Decode the frame nearest to (at or after) the given timestamp.
    ///
    /// Seeks to the nearest keyframe at or before the target, decodes
    /// forward, and returns the first frame whose presentation time reaches
    /// the target. Returns `Ok(None)` when the stream ends before the target
    /// timestamp, which is the normal terminator for a sampling loop.
    ///
    /// # Errors
    ///
    /// Returns [`SnapscribeError::FrameDecode`] or
    /// [`SnapscribeError::FfmpegError`] if seeking or decoding fails.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use std::time::Duration;
    ///
    /// use snapscribe::VideoSource;
    ///
    /// let mut source = VideoSource::open("input.mp4")?;
    /// match source.frame_at(Duration::from_secs(60))? {
    ///     Some(frame) => frame.save("minute_one.jpg")?,
    ///     None => println!("video is shorter than a minute"),
    /// }
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn frame_at(
        &mut self,
        timestamp: Duration,
    ) -> Result<Option<DynamicImage>, SnapscribeError> {
        // Build a fresh decoder from the stream parameters.
        let stream = self
            .input_context
            .stream(self.stream_index)
            .ok_or(SnapscribeError::NoVideoStream)?;
        let time_base = stream.time_base();
        let codec_parameters = stream.parameters();
        let decoder_context = CodecContext::from_parameters(codec_parameters)?;
        let mut decoder = decoder_context.decoder().video()?;

        let width = decoder.width();
        let height = decoder.height();

        // Set up the pixel-format converter (source format → RGB24).
        let mut scaler = ScalingContext::get(
            decoder.format(),
            width,
            height,
            Pixel::RGB24,
            width,
            height,
            ScalingFlags::BILINEAR,
        )?;

        // Fractional-frame targets must still accept the frame that covers
        // them, so the cutoff sits half a frame period before the target.
        let target_seconds = if self.frame_rate > 0.0 {
            timestamp.as_secs_f64() - 0.5 / self.frame_rate
        } else {
            timestamp.as_secs_f64()
        };

        log::debug!(
            "Seeking to {:.3}s in {}",
            timestamp.as_secs_f64(),
            self.file_path.display(),
        );

        // Seek to the nearest keyframe at or before the target.
        let seek_timestamp = utilities::duration_to_stream_timestamp(timestamp, time_base);
        self.input_context.seek(seek_timestamp, ..seek_timestamp)?;

        let mut decoded_frame = VideoFrame::empty();
        let mut rgb_frame = VideoFrame::empty();

        for (stream, packet) in self.input_context.packets() {
            if stream.index() != self.stream_index {
                continue;
            }

            decoder.send_packet(&packet)?;

            while decoder.receive_frame(&mut decoded_frame).is_ok() {
                let pts = decoded_frame.pts().unwrap_or(0);
                let frame_seconds = utilities::pts_to_seconds(pts, time_base);

                if frame_seconds >= target_seconds {
                    scaler.run(&decoded_frame, &mut rgb_frame)?;
                    return convert_frame_to_image(&rgb_frame, width, height).map(Some);
                }
            }
        }

        // Flush the decoder.
        decoder.send_eof()?;
        while decoder.receive_frame(&mut decoded_frame).is_ok() {
            let pts = decoded_frame.pts().unwrap_or(0);
            let frame_seconds = utilities::pts_to_seconds(pts, time_base);

            if frame_seconds >= target_seconds {
                scaler.run(&decoded_frame, &mut rgb_frame)?;
                return convert_frame_to_image(&rgb_frame, width, height).map(Some);
            }
        }

        // End of stream before the target timestamp.
        Ok(None)
    }
}

/// Convert a scaled RGB24 video frame to an [`image::DynamicImage`].
fn convert_frame_to_image(
    rgb_frame: &VideoFrame,
    width: u32,
    height: u32,
) -> Result<DynamicImage, SnapscribeError> {
    let buffer = utilities::frame_to_rgb_buffer(rgb_frame, width, height);
    let rgb_image = RgbImage::from_raw(width, height, buffer).ok_or_else(|| {
        SnapscribeError::FrameDecode(
            "Failed to construct RGB image from decoded frame data".to_string(),
        )
    })?;
    Ok(DynamicImage::ImageRgb8(rgb_image))
}
