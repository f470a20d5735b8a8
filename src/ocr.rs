//! Text recognition via an external OCR engine.
//!
//! The [`Recognizer`] trait is the seam between the transcript builder and
//! the OCR engine; [`TesseractEngine`] is the production implementation,
//! invoking the Tesseract binary once per image as a synchronous external
//! process. There is no enforced timeout: a hang in the engine hangs the run.

use std::{
    env,
    path::{Path, PathBuf},
    process::Command,
};

use crate::error::SnapscribeError;

/// Environment variable overriding the Tesseract binary location.
pub const TESSERACT_CMD_ENV: &str = "TESSERACT_CMD";

/// Recognizes text in an image file.
///
/// `languages` is a plus-joined set of engine language codes (e.g.
/// `"eng+fra"`), passed through verbatim; no local validation is performed,
/// so invalid codes surface as engine errors. Empty recognized text is a
/// valid, non-error result.
pub trait Recognizer {
    /// Run OCR over the image at `image_path` and return the recognized text.
    ///
    /// # Errors
    ///
    /// Returns [`SnapscribeError::Ocr`] if the engine cannot be invoked or
    /// reports failure (engine not installed, unreadable image, unknown
    /// language codes).
    fn recognize(&self, image_path: &Path, languages: &str) -> Result<String, SnapscribeError>;
}

/// The Tesseract OCR binary, invoked as `tesseract <image> stdout -l <langs>`.
///
/// The binary name defaults to `tesseract` on the `PATH` and can be
/// overridden with the `TESSERACT_CMD` environment variable.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
///
/// use snapscribe::{Recognizer, TesseractEngine};
///
/// let engine = TesseractEngine::new();
/// let text = engine.recognize(Path::new("snapshot_00000.jpg"), "eng+fra")?;
/// println!("{text}");
/// # Ok::<(), snapscribe::SnapscribeError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    binary: PathBuf,
}

impl TesseractEngine {
    /// Create an engine handle, honouring the `TESSERACT_CMD` override.
    pub fn new() -> Self {
        let binary = env::var_os(TESSERACT_CMD_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("tesseract"));
        Self { binary }
    }

    /// Create an engine handle for a specific binary path.
    pub fn with_binary<P: Into<PathBuf>>(binary: P) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for TesseractEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Recognizer for TesseractEngine {
    fn recognize(&self, image_path: &Path, languages: &str) -> Result<String, SnapscribeError> {
        log::debug!(
            "Running {} on {} (lang={languages})",
            self.binary.display(),
            image_path.display(),
        );

        let output = Command::new(&self.binary)
            .arg(image_path)
            .arg("stdout")
            .arg("-l")
            .arg(languages)
            .output()
            .map_err(|error| SnapscribeError::Ocr {
                image: image_path.to_path_buf(),
                reason: format!("failed to invoke {}: {error}", self.binary.display()),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SnapscribeError::Ocr {
                image: image_path.to_path_buf(),
                reason: format!("engine exited with {}: {}", output.status, stderr.trim()),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
