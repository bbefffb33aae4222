//! The credential and the services built from it

use std::sync::Arc;
use tracing::{info, warn};

use crate::config::TranslationSettings;
use crate::pipeline::TranslationPipeline;
use crate::storage::StoredSettings;
use crate::translation::{OpenAiTranslator, Translator};
use crate::vision::TextExtractor;

/// Everything a pipeline run needs, derived from the stored settings
///
/// Never mutated in place: a new credential produces a new context via
/// [`AppContext::reconfigure`], and runs already in flight keep the services
/// they started with.
#[derive(Clone)]
pub struct AppContext {
    settings: StoredSettings,
    extractor: Option<Arc<dyn TextExtractor>>,
    translator: Option<Arc<OpenAiTranslator>>,
    pipeline: Option<Arc<TranslationPipeline>>,
}

impl AppContext {
    /// Build services for `settings`; missing pieces leave the context not ready
    pub fn build(
        settings: StoredSettings,
        extractor: Option<Arc<dyn TextExtractor>>,
        translation: &TranslationSettings,
    ) -> Self {
        let translator = settings.credential().and_then(|key| {
            match OpenAiTranslator::new(key, settings.model.clone(), translation) {
                Ok(translator) => Some(Arc::new(translator)),
                Err(e) => {
                    warn!("Error initializing translator: {}", e);
                    None
                }
            }
        });

        let pipeline = match (&extractor, &translator) {
            (Some(extractor), Some(translator)) => {
                let translator: Arc<dyn Translator> = translator.clone();
                Some(Arc::new(TranslationPipeline::new(extractor.clone(), translator)))
            }
            _ => None,
        };

        info!(
            "Services configured (credential: {}, ocr: {}, model: {})",
            if translator.is_some() { "present" } else { "missing" },
            extractor.as_ref().map(|e| e.name()).unwrap_or("unavailable"),
            settings.model
        );

        Self {
            settings,
            extractor,
            translator,
            pipeline,
        }
    }

    /// A new context for a newly saved credential, reusing the OCR backend
    pub fn reconfigure(&self, settings: StoredSettings, translation: &TranslationSettings) -> Self {
        Self::build(settings, self.extractor.clone(), translation)
    }

    /// Services are in place and Translate may run
    pub fn is_ready(&self) -> bool {
        self.pipeline.is_some()
    }

    pub fn has_credential(&self) -> bool {
        self.translator.is_some()
    }

    pub fn settings(&self) -> &StoredSettings {
        &self.settings
    }

    pub fn model(&self) -> &str {
        &self.settings.model
    }

    pub fn translator(&self) -> Option<Arc<OpenAiTranslator>> {
        self.translator.clone()
    }

    pub fn pipeline(&self) -> Option<Arc<TranslationPipeline>> {
        self.pipeline.clone()
    }
}
