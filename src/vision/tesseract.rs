//! Tesseract command line backend
//!
//! The image is written to a temporary PNG which is removed when the call
//! returns, whether recognition succeeded or not.

use image::RgbImage;
use std::path::PathBuf;
use std::process::Command;
use tracing::{debug, info};

use super::{OcrError, OcrModel, TextExtractor, TextFragment};

/// Overrides the `tesseract` executable looked up on `PATH`
pub const TESSERACT_PATH_ENV: &str = "TESSERACT_PATH";

/// Word rows in TSV output have this level
const WORD_LEVEL: &str = "5";

#[derive(Debug, Clone)]
pub struct TesseractExtractor {
    binary: PathBuf,
}

impl TesseractExtractor {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Use `$TESSERACT_PATH`, or `tesseract` from `PATH`
    pub fn from_env() -> Result<Self, OcrError> {
        let binary = std::env::var_os(TESSERACT_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("tesseract"));
        Self::checked(binary)
    }

    /// Like `new`, but fails with `Unavailable` unless `binary --version` runs
    pub fn checked(binary: impl Into<PathBuf>) -> Result<Self, OcrError> {
        let extractor = Self::new(binary);
        let version = extractor.version()?;
        info!("Using {} ({:?})", version, extractor.binary);
        Ok(extractor)
    }

    /// First line of `tesseract --version`
    pub fn version(&self) -> Result<String, OcrError> {
        let output = Command::new(&self.binary)
            .arg("--version")
            .output()
            .map_err(|e| self.launch_error(e))?;

        if !output.status.success() {
            return Err(OcrError::Unavailable(format!(
                "{} --version exited with {}",
                self.binary.display(),
                output.status
            )));
        }

        // Older releases print the banner on stderr
        let banner = if output.stdout.is_empty() {
            &output.stderr
        } else {
            &output.stdout
        };
        Ok(String::from_utf8_lossy(banner)
            .lines()
            .next()
            .unwrap_or("tesseract")
            .trim()
            .to_string())
    }

    fn launch_error(&self, e: std::io::Error) -> OcrError {
        match e.kind() {
            std::io::ErrorKind::NotFound => {
                OcrError::Unavailable(format!("{} not found", self.binary.display()))
            }
            _ => OcrError::Io(e),
        }
    }
}

impl TextExtractor for TesseractExtractor {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    fn extract(&self, image: &RgbImage, model: OcrModel) -> Result<Vec<TextFragment>, OcrError> {
        let file = tempfile::Builder::new()
            .prefix("screen-translator-")
            .suffix(".png")
            .tempfile()?;
        image.save_with_format(file.path(), image::ImageFormat::Png)?;

        debug!(
            "Running {:?} on {:?} with languages {}",
            self.binary,
            file.path(),
            model.tesseract_languages()
        );

        let output = Command::new(&self.binary)
            .arg(file.path())
            .arg("stdout")
            .arg("-l")
            .arg(model.tesseract_languages())
            .arg("tsv")
            .output()
            .map_err(|e| self.launch_error(e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::Recognition(stderr.trim().to_string()));
        }

        Ok(parse_tsv(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Parse `tesseract ... tsv` output into word fragments
pub fn parse_tsv(tsv: &str) -> Vec<TextFragment> {
    tsv.lines()
        .skip(1)
        .filter_map(|line| {
            let cols: Vec<&str> = line.split('\t').collect();
            if cols.len() < 12 || cols[0] != WORD_LEVEL {
                return None;
            }
            let text = cols[11].trim();
            let confidence: f32 = cols[10].trim().parse().ok()?;
            if text.is_empty() || confidence < 0.0 {
                return None;
            }
            let num = |i: usize| cols[i].trim().parse::<u32>().unwrap_or(0);
            Some(TextFragment {
                text: text.to_string(),
                bounds: (num(6), num(7), num(8), num(9)),
                confidence: confidence / 100.0,
            })
        })
        .collect()
}
