//! Vision/OCR Layer
//!
//! Turns a captured image into text fragments. Backends:
//! - Windows OCR API (Windows)
//! - Tesseract command line (everywhere else)

#[cfg(not(windows))]
pub mod tesseract;
#[cfg(windows)]
pub mod windows_ocr;

use image::RgbImage;
use std::sync::Arc;
use thiserror::Error;

use crate::language::Language;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("OCR engine unavailable: {0}")]
    Unavailable(String),

    #[error("OCR recognition failed: {0}")]
    Recognition(String),

    #[error("OCR I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode image for OCR: {0}")]
    Encode(#[from] image::ImageError),
}

/// Recognition model, chosen from the source language
///
/// Every model also reads Latin text. There is no English-only model:
/// English sources use the Japanese model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OcrModel {
    JapaneseEnglish,
    KoreanEnglish,
    ChineseSimplifiedEnglish,
    ChineseTraditionalEnglish,
}

impl OcrModel {
    pub fn for_source(language: Language) -> Self {
        match language {
            Language::Japanese | Language::English => OcrModel::JapaneseEnglish,
            Language::Korean => OcrModel::KoreanEnglish,
            Language::ChineseSimplified => OcrModel::ChineseSimplifiedEnglish,
            Language::ChineseTraditional => OcrModel::ChineseTraditionalEnglish,
        }
    }

    /// BCP-47 tag understood by Windows.Media.Ocr
    pub fn language_tag(&self) -> &'static str {
        match self {
            OcrModel::JapaneseEnglish => "ja-JP",
            OcrModel::KoreanEnglish => "ko-KR",
            OcrModel::ChineseSimplifiedEnglish => "zh-Hans-CN",
            OcrModel::ChineseTraditionalEnglish => "zh-Hant-TW",
        }
    }

    /// Tesseract `-l` argument
    pub fn tesseract_languages(&self) -> &'static str {
        match self {
            OcrModel::JapaneseEnglish => "jpn+eng",
            OcrModel::KoreanEnglish => "kor+eng",
            OcrModel::ChineseSimplifiedEnglish => "chi_sim+eng",
            OcrModel::ChineseTraditionalEnglish => "chi_tra+eng",
        }
    }
}

/// One piece of recognized text, in detection order
#[derive(Debug, Clone, PartialEq)]
pub struct TextFragment {
    /// Recognized text
    pub text: String,
    /// Bounding box (x, y, width, height)
    pub bounds: (u32, u32, u32, u32),
    /// Confidence score (0.0 - 1.0)
    pub confidence: f32,
}

impl TextFragment {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bounds: (0, 0, 0, 0),
            confidence: 1.0,
        }
    }
}

/// OCR capability
pub trait TextExtractor: Send + Sync {
    /// Backend name for logs
    fn name(&self) -> &'static str;

    /// Recognize text fragments in `image`
    fn extract(&self, image: &RgbImage, model: OcrModel) -> Result<Vec<TextFragment>, OcrError>;
}

/// Join fragment texts with single spaces
///
/// Returns `None` when nothing usable was recognized.
pub fn join_fragments(fragments: &[TextFragment]) -> Option<String> {
    if fragments.is_empty() {
        return None;
    }
    let text = fragments
        .iter()
        .map(|f| f.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// The OCR backend for this platform, or `Unavailable` when it cannot run
pub fn default_extractor() -> Result<Arc<dyn TextExtractor>, OcrError> {
    #[cfg(windows)]
    {
        Ok(Arc::new(windows_ocr::WindowsOcrExtractor::new()))
    }
    #[cfg(not(windows))]
    {
        Ok(Arc::new(tesseract::TesseractExtractor::from_env()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_for_source() {
        assert_eq!(OcrModel::for_source(Language::English), OcrModel::JapaneseEnglish);
        assert_eq!(OcrModel::for_source(Language::Japanese), OcrModel::JapaneseEnglish);
        assert_eq!(OcrModel::for_source(Language::Korean), OcrModel::KoreanEnglish);
        assert_eq!(
            OcrModel::for_source(Language::ChineseSimplified),
            OcrModel::ChineseSimplifiedEnglish
        );
        assert_eq!(
            OcrModel::for_source(Language::ChineseTraditional),
            OcrModel::ChineseTraditionalEnglish
        );
    }

    #[test]
    fn test_model_identifiers() {
        assert_eq!(OcrModel::KoreanEnglish.language_tag(), "ko-KR");
        assert_eq!(OcrModel::ChineseTraditionalEnglish.tesseract_languages(), "chi_tra+eng");
    }

    #[test]
    fn test_join_fragments_single_space() {
        let fragments = vec![TextFragment::new("こんにちは"), TextFragment::new("世界")];
        assert_eq!(join_fragments(&fragments).as_deref(), Some("こんにちは 世界"));
    }

    #[test]
    fn test_join_fragments_keeps_order() {
        let fragments = vec![
            TextFragment::new("third"),
            TextFragment::new("first"),
            TextFragment::new("second"),
        ];
        assert_eq!(join_fragments(&fragments).as_deref(), Some("third first second"));
    }

    #[test]
    fn test_join_fragments_empty() {
        assert_eq!(join_fragments(&[]), None);
        assert_eq!(join_fragments(&[TextFragment::new(" "), TextFragment::new("")]), None);
    }
}
