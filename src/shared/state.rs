//! Shared application state between the views and the app loop

use crate::config::AppConfig;
use crate::pipeline::{PipelineOutcome, PipelineState, TranslationRequest};
use crate::shared::AppContext;

/// Status line shown when no credential is configured
pub const MISSING_CREDENTIAL_STATUS: &str = "Please enter your OpenAI API key in Settings";

/// Status line shown when the OCR backend could not be created
pub const OCR_UNAVAILABLE_STATUS: &str = "Text recognition is unavailable";

/// Result area text after a successful settings save
pub const RESULT_PLACEHOLDER: &str = "Translation will appear here";

/// Central state shared by the views and the app loop
#[derive(Clone)]
pub struct SharedAppState {
    /// Application configuration
    pub config: AppConfig,
    /// Credential and services
    pub context: AppContext,
    /// Runtime state (not persisted)
    pub runtime: RuntimeState,
}

impl SharedAppState {
    pub fn new(config: AppConfig, context: AppContext) -> Self {
        Self {
            config,
            context,
            runtime: RuntimeState::default(),
        }
    }

    /// Translate may be pressed
    pub fn can_translate(&self) -> bool {
        self.context.is_ready() && !self.runtime.pipeline_state.is_busy()
    }

    /// What the status indicator shows right now
    pub fn status(&self) -> StatusLine {
        let state = &self.runtime.pipeline_state;
        if !state.is_busy() {
            if !self.context.has_credential() {
                return StatusLine::new(MISSING_CREDENTIAL_STATUS, StatusLevel::Error);
            }
            if !self.context.is_ready() {
                return StatusLine::new(OCR_UNAVAILABLE_STATUS, StatusLevel::Error);
            }
        }

        let level = match state {
            PipelineState::Idle => StatusLevel::Idle,
            PipelineState::Capturing | PipelineState::Extracting | PipelineState::Translating => {
                StatusLevel::Working
            }
            PipelineState::Done(_) => StatusLevel::Success,
            PipelineState::Error(_) => StatusLevel::Error,
        };
        StatusLine::new(state.status_text(), level)
    }

    /// Swap in the context built for a newly saved credential
    ///
    /// A run already in flight keeps its state and result; it finishes with
    /// the services it started with.
    pub fn install_context(&mut self, context: AppContext) {
        self.context = context;
        if !self.runtime.pipeline_state.is_busy() {
            self.runtime.pipeline_state = PipelineState::Idle;
            self.runtime.result_text = RESULT_PLACEHOLDER.to_string();
        }
    }
}

/// Severity of the status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Idle,
    Working,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub level: StatusLevel,
}

impl StatusLine {
    fn new(text: impl Into<String>, level: StatusLevel) -> Self {
        Self {
            text: text.into(),
            level,
        }
    }
}

/// Command from the views to the app loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    /// Capture the region and translate it
    Translate(TranslationRequest),
    /// Show or raise the region selector
    ShowCapture,
    /// Persist a new API key
    SaveSettings { api_key: String },
    /// Write the current configuration to disk
    SaveConfig,
}

/// Identifies one press of Translate
pub type RunId = u64;

/// Runtime state that is not persisted
#[derive(Debug, Clone, Default)]
pub struct RuntimeState {
    /// Where the Translate action is
    pub pipeline_state: PipelineState,
    /// Contents of the result area
    pub result_text: String,
    /// Pending command from the UI
    pub command: Option<UiCommand>,
    /// Latest run started; reports from older runs are dropped
    current_run: RunId,
}

impl RuntimeState {
    /// Queue a command; an earlier unprocessed command is replaced
    pub fn send(&mut self, command: UiCommand) {
        self.command = Some(command);
    }

    /// Start a new run in the capturing stage
    pub fn begin_run(&mut self) -> RunId {
        self.current_run += 1;
        self.pipeline_state = PipelineState::Capturing;
        self.current_run
    }

    /// Record a stage reported by `run`; returns false for a stale report
    pub fn set_stage(&mut self, run: RunId, state: PipelineState) -> bool {
        if run != self.current_run || !self.pipeline_state.is_busy() {
            return false;
        }
        self.pipeline_state = state;
        true
    }

    /// Record how `run` ended, replacing the previous result
    pub fn apply_outcome(&mut self, run: RunId, outcome: &PipelineOutcome) -> bool {
        if run != self.current_run || !self.pipeline_state.is_busy() {
            return false;
        }
        self.pipeline_state = outcome.final_state();
        self.result_text = outcome.result_text();
        true
    }
}
