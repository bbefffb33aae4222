//! Capture → OCR → translate pipeline
//!
//! The UI thread performs the capture (it owns the windows that must be
//! hidden); everything after that runs here as one async task that reports
//! each stage through a callback.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::capture::CapturedFrame;
use crate::language::Language;
use crate::translation::{effective_context, Translator};
use crate::vision::{join_fragments, OcrModel, TextExtractor};

/// Shown in the result area when OCR finds nothing
pub const NO_TEXT_MESSAGE: &str = "No text was detected in the captured area";

/// Where the Translate action currently is
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PipelineState {
    #[default]
    Idle,
    Capturing,
    Extracting,
    Translating,
    /// Finished; carries the status message
    Done(String),
    /// Failed; carries the error text
    Error(String),
}

impl PipelineState {
    /// Text for the status indicator
    pub fn status_text(&self) -> &str {
        match self {
            PipelineState::Idle => "Ready",
            PipelineState::Capturing => "Capturing...",
            PipelineState::Extracting => "Performing OCR...",
            PipelineState::Translating => "Translating...",
            PipelineState::Done(message) => message,
            PipelineState::Error(_) => "Error occurred",
        }
    }

    /// A pipeline is in flight; the trigger must stay disabled
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            PipelineState::Capturing | PipelineState::Extracting | PipelineState::Translating
        )
    }
}

/// How a pipeline run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    Translated(String),
    NoText,
    Failed(String),
}

impl PipelineOutcome {
    /// Terminal state for the status indicator
    pub fn final_state(&self) -> PipelineState {
        match self {
            PipelineOutcome::Translated(_) => PipelineState::Done("Done".to_string()),
            PipelineOutcome::NoText => PipelineState::Done("No text detected".to_string()),
            PipelineOutcome::Failed(message) => PipelineState::Error(message.clone()),
        }
    }

    /// Text for the result area
    pub fn result_text(&self) -> String {
        match self {
            PipelineOutcome::Translated(text) => text.clone(),
            PipelineOutcome::NoText => NO_TEXT_MESSAGE.to_string(),
            PipelineOutcome::Failed(message) => format!("Error: {}", message),
        }
    }
}

/// The user's choices for one run, read when Translate is pressed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub source: Language,
    pub target: Language,
    pub context: Option<String>,
}

impl TranslationRequest {
    /// Build a request from the raw context box contents
    pub fn new(source: Language, target: Language, raw_context: &str) -> Self {
        Self {
            source,
            target,
            context: effective_context(raw_context).map(str::to_string),
        }
    }
}

/// OCR and translation services for one credential
pub struct TranslationPipeline {
    extractor: Arc<dyn TextExtractor>,
    translator: Arc<dyn Translator>,
}

impl TranslationPipeline {
    pub fn new(extractor: Arc<dyn TextExtractor>, translator: Arc<dyn Translator>) -> Self {
        Self {
            extractor,
            translator,
        }
    }

    /// Run OCR and translation over a captured frame
    ///
    /// `frame` is `None` when the capture failed, which ends the run the same
    /// way an empty OCR result does.
    pub async fn run<F>(
        &self,
        frame: Option<CapturedFrame>,
        request: &TranslationRequest,
        on_stage: F,
    ) -> PipelineOutcome
    where
        F: Fn(PipelineState),
    {
        let Some(frame) = frame else {
            info!("No captured frame, skipping OCR");
            return PipelineOutcome::NoText;
        };

        on_stage(PipelineState::Extracting);
        let text = match self.extract(frame, request.source).await {
            Some(text) => text,
            None => return PipelineOutcome::NoText,
        };
        debug!("Extracted {} characters", text.chars().count());

        on_stage(PipelineState::Translating);
        match self
            .translator
            .translate(&text, request.source, request.target, request.context.as_deref())
            .await
        {
            Ok(translation) => {
                info!("Translation complete ({} -> {})", request.source, request.target);
                PipelineOutcome::Translated(translation.trim().to_string())
            }
            Err(e) => {
                warn!("Error in translation: {}", e);
                PipelineOutcome::Failed(e.to_string())
            }
        }
    }

    async fn extract(&self, frame: CapturedFrame, source: Language) -> Option<String> {
        let extractor = self.extractor.clone();
        let model = OcrModel::for_source(source);
        let (width, height) = frame.dimensions();
        info!(
            "Running OCR ({}, {:?}) on {}x{} capture taken {:?} ago",
            extractor.name(),
            model,
            width,
            height,
            frame.timestamp.elapsed()
        );

        let result = tokio::task::spawn_blocking(move || {
            let image = frame.into_image();
            extractor.extract(&image, model)
        })
        .await;

        let fragments = match result {
            Ok(Ok(fragments)) => fragments,
            Ok(Err(e)) => {
                warn!("Error performing OCR: {}", e);
                return None;
            }
            Err(e) => {
                warn!("OCR task failed: {}", e);
                return None;
            }
        };

        info!("OCR found {} fragments", fragments.len());
        join_fragments(&fragments)
    }
}
