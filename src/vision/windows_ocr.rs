//! Windows OCR API backend
//!
//! Uses the built-in Windows OCR (Media.Ocr). Language packs are installed
//! per user; when the requested one is missing the engine falls back to the
//! user profile languages.

use anyhow::{Context, Result};
use image::RgbImage;
use tracing::{debug, info, warn};
use windows::{
    core::HSTRING,
    Foundation::IAsyncOperation,
    Globalization::Language,
    Graphics::Imaging::{BitmapPixelFormat, SoftwareBitmap},
    Media::Ocr::{OcrEngine as WinOcrEngine, OcrResult as WinOcrResult},
};

use super::{OcrError, OcrModel, TextExtractor, TextFragment};

/// Windows OCR engine wrapper
pub struct WindowsOcr {
    engine: WinOcrEngine,
    language: String,
}

impl WindowsOcr {
    /// Create a new Windows OCR engine with the specified language
    pub fn new(language_tag: &str) -> Result<Self> {
        debug!("Initializing Windows OCR engine with language: {}", language_tag);

        let language = Language::CreateLanguage(&HSTRING::from(language_tag))
            .context("Failed to create language")?;

        if !WinOcrEngine::IsLanguageSupported(&language)
            .context("Failed to check language support")?
        {
            warn!("Language '{}' not supported, falling back to user profile languages", language_tag);
            let engine = WinOcrEngine::TryCreateFromUserProfileLanguages()
                .context("Failed to create OCR engine from user profile")?;

            let lang_tag = engine
                .RecognizerLanguage()
                .context("Failed to get recognizer language")?
                .LanguageTag()
                .context("Failed to get language tag")?
                .to_string();

            info!("Windows OCR initialized with language: {}", lang_tag);
            return Ok(Self {
                engine,
                language: lang_tag,
            });
        }

        let engine = WinOcrEngine::TryCreateFromLanguage(&language)
            .context("Failed to create OCR engine for language")?;

        Ok(Self {
            engine,
            language: language_tag.to_string(),
        })
    }

    /// Get the current language
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Recognize words in an RGB image, line by line
    pub fn recognize(&self, image: &RgbImage) -> Result<Vec<TextFragment>> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Ok(vec![]);
        }

        debug!("Windows OCR ({}): Processing {}x{} image", self.language, width, height);

        let bgra_data = rgb_to_bgra(image.as_raw());
        let bitmap = create_software_bitmap(&bgra_data, width, height)?;
        let ocr_result = run_ocr_sync(&self.engine, &bitmap)?;
        let results = extract_results(&ocr_result)?;

        debug!("Windows OCR: Found {} words", results.len());

        Ok(results)
    }
}

/// `TextExtractor` over Windows OCR, creating an engine per call
#[derive(Debug, Default)]
pub struct WindowsOcrExtractor;

impl WindowsOcrExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for WindowsOcrExtractor {
    fn name(&self) -> &'static str {
        "windows-ocr"
    }

    fn extract(&self, image: &RgbImage, model: OcrModel) -> Result<Vec<TextFragment>, OcrError> {
        let engine = WindowsOcr::new(model.language_tag())
            .map_err(|e| OcrError::Unavailable(format!("{:#}", e)))?;
        engine
            .recognize(image)
            .map_err(|e| OcrError::Recognition(format!("{:#}", e)))
    }
}

/// Expand RGB to BGRA (Windows expects BGRA)
fn rgb_to_bgra(rgb: &[u8]) -> Vec<u8> {
    let mut bgra = Vec::with_capacity(rgb.len() / 3 * 4);
    for chunk in rgb.chunks_exact(3) {
        bgra.extend_from_slice(&[chunk[2], chunk[1], chunk[0], 255]);
    }
    bgra
}

/// Create a SoftwareBitmap from BGRA data using CopyFromBuffer
fn create_software_bitmap(bgra_data: &[u8], width: u32, height: u32) -> Result<SoftwareBitmap> {
    use windows::Storage::Streams::{DataReader, DataWriter, InMemoryRandomAccessStream};

    let stream = InMemoryRandomAccessStream::new()
        .context("Failed to create in-memory stream")?;

    let writer = DataWriter::CreateDataWriter(&stream)
        .context("Failed to create data writer")?;

    writer.WriteBytes(bgra_data)
        .context("Failed to write pixel data")?;

    writer.StoreAsync()
        .context("Failed to start store operation")?
        .get()
        .context("Failed to store data")?;

    writer.FlushAsync()
        .context("Failed to start flush operation")?
        .get()
        .context("Failed to flush data")?;

    let bitmap = SoftwareBitmap::Create(
        BitmapPixelFormat::Bgra8,
        width as i32,
        height as i32,
    ).context("Failed to create SoftwareBitmap")?;

    let input_stream = stream.GetInputStreamAt(0)
        .context("Failed to get input stream")?;

    let reader = DataReader::CreateDataReader(&input_stream)
        .context("Failed to create data reader")?;

    reader.LoadAsync(bgra_data.len() as u32)
        .context("Failed to start load operation")?
        .get()
        .context("Failed to load data")?;

    let buffer = reader.ReadBuffer(bgra_data.len() as u32)
        .context("Failed to read buffer")?;

    bitmap.CopyFromBuffer(&buffer)
        .context("Failed to copy buffer to bitmap")?;

    Ok(bitmap)
}

/// Run OCR synchronously (blocks until complete)
fn run_ocr_sync(engine: &WinOcrEngine, bitmap: &SoftwareBitmap) -> Result<WinOcrResult> {
    let async_op: IAsyncOperation<WinOcrResult> = engine.RecognizeAsync(bitmap)
        .context("Failed to start OCR recognition")?;

    let result = async_op.get()
        .context("OCR recognition failed")?;

    Ok(result)
}

/// Flatten lines into words, preserving reading order
fn extract_results(ocr_result: &WinOcrResult) -> Result<Vec<TextFragment>> {
    let mut results = Vec::new();

    let lines = ocr_result.Lines()
        .context("Failed to get OCR lines")?;

    for i in 0..lines.Size().context("Failed to get lines size")? {
        let line = lines.GetAt(i)
            .context("Failed to get line")?;

        let words = line.Words()
            .context("Failed to get words")?;

        for j in 0..words.Size().context("Failed to get words size")? {
            let word = words.GetAt(j)
                .context("Failed to get word")?;

            let text = word.Text()
                .context("Failed to get word text")?
                .to_string();

            let rect = word.BoundingRect()
                .context("Failed to get bounding rect")?;

            results.push(TextFragment {
                text,
                bounds: (
                    rect.X as u32,
                    rect.Y as u32,
                    rect.Width as u32,
                    rect.Height as u32,
                ),
                confidence: 1.0, // Windows OCR doesn't provide confidence
            });
        }
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_to_bgra() {
        let bgra = rgb_to_bgra(&[1, 2, 3, 4, 5, 6]);
        assert_eq!(bgra, vec![3, 2, 1, 255, 6, 5, 4, 255]);
    }

    #[test]
    fn test_blank_image_has_no_text() {
        let engine = match WindowsOcr::new("en-US") {
            Ok(engine) => engine,
            // No OCR language pack on this machine
            Err(_) => return,
        };
        let image = RgbImage::from_pixel(200, 100, image::Rgb([255, 255, 255]));
        let results = engine.recognize(&image).unwrap();
        assert!(results.is_empty());
    }
}
