//! Dashboard view state management

use crate::language::Language;
use crate::pipeline::TranslationRequest;
use crate::translation::CONTEXT_PLACEHOLDER;

/// Overall dashboard state
#[derive(Debug)]
pub struct DashboardState {
    /// Main translate view
    pub translate: TranslateViewState,
    /// Settings dialog
    pub settings: SettingsDialogState,
}

impl DashboardState {
    pub fn new(source: Language, target: Language) -> Self {
        Self {
            translate: TranslateViewState::new(source, target),
            settings: SettingsDialogState::default(),
        }
    }
}

/// Translate view state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateViewState {
    /// Language OCR reads and the text is translated from
    pub source: Language,
    /// Language the result is written in
    pub target: Language,
    /// Context box contents; holds the placeholder while empty and unfocused
    pub context_text: String,
}

impl TranslateViewState {
    pub fn new(source: Language, target: Language) -> Self {
        Self {
            source,
            target,
            context_text: CONTEXT_PLACEHOLDER.to_string(),
        }
    }

    /// The context box gained focus
    pub fn focus_context(&mut self) {
        if self.showing_placeholder() {
            self.context_text.clear();
        }
    }

    /// The context box lost focus
    pub fn blur_context(&mut self) {
        if self.context_text.trim().is_empty() {
            self.context_text = CONTEXT_PLACEHOLDER.to_string();
        }
    }

    pub fn showing_placeholder(&self) -> bool {
        self.context_text == CONTEXT_PLACEHOLDER
    }

    pub fn swap_languages(&mut self) {
        std::mem::swap(&mut self.source, &mut self.target);
    }

    /// Snapshot of the current choices for a pipeline run
    pub fn request(&self) -> TranslationRequest {
        TranslationRequest::new(self.source, self.target, &self.context_text)
    }
}

/// Settings dialog state
#[derive(Debug, Default, Clone)]
pub struct SettingsDialogState {
    /// Dialog is open; the main view is disabled meanwhile
    pub open: bool,
    /// Key being edited
    pub api_key_input: String,
    /// Show the key in clear text
    pub show_key: bool,
    /// Inline error under the Save button
    pub error: Option<String>,
    /// Waiting for the connectivity check
    pub verifying: bool,
}

impl SettingsDialogState {
    /// Open the dialog, prefilled with the current key
    pub fn open_with(&mut self, current_key: Option<&str>) {
        self.open = true;
        self.api_key_input = current_key.unwrap_or_default().to_string();
        self.show_key = false;
        self.error = None;
        self.verifying = false;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.api_key_input.clear();
        self.error = None;
        self.verifying = false;
    }

    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
        self.verifying = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> TranslateViewState {
        TranslateViewState::new(Language::Japanese, Language::English)
    }

    #[test]
    fn test_starts_with_placeholder() {
        let view = view();
        assert!(view.showing_placeholder());
        assert_eq!(view.request().context, None);
    }

    #[test]
    fn test_focus_clears_placeholder_only() {
        let mut view = view();
        view.focus_context();
        assert_eq!(view.context_text, "");

        view.context_text = "boss fight".to_string();
        view.focus_context();
        assert_eq!(view.context_text, "boss fight");
    }

    #[test]
    fn test_blur_restores_placeholder_for_blank_text() {
        let mut view = view();
        view.focus_context();
        view.context_text = "  \n ".to_string();
        view.blur_context();
        assert!(view.showing_placeholder());

        view.focus_context();
        view.context_text = "menu text".to_string();
        view.blur_context();
        assert_eq!(view.context_text, "menu text");
        assert_eq!(view.request().context.as_deref(), Some("menu text"));
    }

    #[test]
    fn test_swap_languages() {
        let mut view = view();
        view.swap_languages();
        assert_eq!(view.source, Language::English);
        assert_eq!(view.target, Language::Japanese);
    }

    #[test]
    fn test_settings_dialog_lifecycle() {
        let mut dialog = SettingsDialogState::default();
        dialog.open_with(Some("sk-old"));
        assert!(dialog.open);
        assert_eq!(dialog.api_key_input, "sk-old");

        dialog.verifying = true;
        dialog.set_error("API key is required");
        assert!(!dialog.verifying);
        assert!(dialog.open);

        dialog.close();
        assert!(!dialog.open);
        assert!(dialog.api_key_input.is_empty());
        assert_eq!(dialog.error, None);
    }
}
