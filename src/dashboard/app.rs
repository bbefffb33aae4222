//! Dashboard application entry point

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use egui::ViewportCommand;
use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::capture::{PixelRect, ScreenGrabber, XcapGrabber};
use crate::config;
use crate::dashboard::state::DashboardState;
use crate::dashboard::theme;
use crate::dashboard::views::{render_settings_dialog, render_translate_view};
use crate::overlay::{self, RegionSelector, SelectorStyle};
use crate::pipeline::TranslationRequest;
use crate::shared::{SharedAppState, UiCommand, WorkerMessage};
use crate::storage::{SettingsStore, StoredSettings};

/// Shown in the settings dialog when the connectivity check fails
pub const VERIFY_FAILED_MESSAGE: &str = "Failed to connect to OpenAI API. Please check your API key.";

/// The translator window
pub struct TranslatorApp {
    /// Shared application state
    shared_state: Arc<RwLock<SharedAppState>>,
    /// Dashboard-specific state
    dashboard_state: DashboardState,
    /// Whether theme has been applied
    theme_applied: bool,
    /// Runs extraction, translation and the connectivity check
    runtime: tokio::runtime::Runtime,
    worker_tx: Sender<WorkerMessage>,
    worker_rx: Receiver<WorkerMessage>,
    /// Region selector overlay
    selector: RegionSelector,
    selector_style: SelectorStyle,
    grabber: Arc<dyn ScreenGrabber>,
    settings_store: SettingsStore,
    /// Where preference changes are written
    config_path: Option<PathBuf>,
}

impl TranslatorApp {
    /// Create a new translator application
    pub fn new(
        shared_state: Arc<RwLock<SharedAppState>>,
        settings_store: SettingsStore,
        config_path: Option<PathBuf>,
    ) -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("translator-worker")
            .enable_all()
            .build()?;

        let (worker_tx, worker_rx) = crossbeam_channel::unbounded();

        let (dashboard_state, selector, selector_style) = {
            let state = shared_state.read();
            let translation = &state.config.translation;
            (
                DashboardState::new(translation.default_source, translation.default_target),
                overlay::create_selector(&state.config.overlay),
                SelectorStyle::from_settings(&state.config.overlay),
            )
        };

        Ok(Self {
            shared_state,
            dashboard_state,
            theme_applied: false,
            runtime,
            worker_tx,
            worker_rx,
            selector,
            selector_style,
            grabber: Arc::new(XcapGrabber),
            settings_store,
            config_path,
        })
    }

    /// Create eframe options for the main window
    pub fn options() -> eframe::NativeOptions {
        eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([420.0, 640.0])
                .with_min_inner_size([360.0, 520.0])
                .with_title("Screen Translator"),
            ..Default::default()
        }
    }
}

impl eframe::App for TranslatorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply theme once
        if !self.theme_applied {
            theme::apply_theme(ctx);
            self.theme_applied = true;
        }

        self.process_worker_messages(ctx);
        self.process_commands(ctx);

        // Until the selector reports its own monitor, assume the main window's scale
        if !self.selector.is_visible() {
            if let Some(ppp) = ctx.input(|i| i.viewport().native_pixels_per_point) {
                self.selector.set_pixels_per_point(ppp);
            }
        }
        overlay::render_region_selector(ctx, &mut self.selector, &self.selector_style);

        let dialog_open = self.dashboard_state.settings.open;
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::Frame::none().inner_margin(16.0).show(ui, |ui| {
                ui.add_enabled_ui(!dialog_open, |ui| {
                    render_translate_view(
                        ui,
                        &mut self.dashboard_state.translate,
                        &mut self.dashboard_state.settings,
                        &self.shared_state,
                    );
                });
            });
        });

        render_settings_dialog(ctx, &mut self.dashboard_state.settings, &self.shared_state);
    }
}

impl TranslatorApp {
    /// Apply results sent back by background tasks
    fn process_worker_messages(&mut self, ctx: &egui::Context) {
        while let Ok(message) = self.worker_rx.try_recv() {
            match message {
                WorkerMessage::Captured { run, succeeded } => {
                    debug!("Capture {} finished (succeeded: {}), restoring windows", run, succeeded);
                    self.selector.finish_capture();
                    ctx.send_viewport_cmd(ViewportCommand::Minimized(false));
                    ctx.send_viewport_cmd(ViewportCommand::Focus);
                }
                WorkerMessage::Stage { run, state } => {
                    if !self.shared_state.write().runtime.set_stage(run, state) {
                        debug!("Dropping stage report from stale run {}", run);
                    }
                }
                WorkerMessage::Finished { run, outcome } => {
                    if !self.shared_state.write().runtime.apply_outcome(run, &outcome) {
                        debug!("Dropping outcome of stale run {}", run);
                    }
                }
                WorkerMessage::CredentialChecked { settings, result } => match result {
                    Ok(()) => self.install_settings(settings),
                    Err(e) => {
                        warn!("Error testing API connection: {}", e);
                        self.dashboard_state.settings.set_error(VERIFY_FAILED_MESSAGE);
                    }
                },
            }
        }
    }

    /// Process commands from the UI
    fn process_commands(&mut self, ctx: &egui::Context) {
        let command = {
            let mut state = self.shared_state.write();
            state.runtime.command.take()
        };

        if let Some(cmd) = command {
            match cmd {
                UiCommand::Translate(request) => self.start_translation(ctx, request),
                UiCommand::ShowCapture => {
                    self.selector.show();
                    ctx.send_viewport_cmd_to(overlay::selector_viewport_id(), ViewportCommand::Focus);
                }
                UiCommand::SaveSettings { api_key } => self.save_settings(ctx, api_key),
                UiCommand::SaveConfig => self.save_config(),
            }
        }
    }

    /// Take both windows off screen, then capture and translate on the worker runtime
    ///
    /// The main window is minimized rather than hidden so eframe keeps
    /// running `update` and the restore message is handled.
    fn start_translation(&mut self, ctx: &egui::Context, request: TranslationRequest) {
        let (run, pipeline, settle) = {
            let mut state = self.shared_state.write();
            if !state.can_translate() {
                debug!("Translate ignored, pipeline busy or not configured");
                return;
            }
            let Some(pipeline) = state.context.pipeline() else {
                return;
            };
            (
                state.runtime.begin_run(),
                pipeline,
                Duration::from_millis(state.config.capture.settle_delay_ms),
            )
        };

        let rect = PixelRect::from_region(&self.selector.region(), self.selector.pixels_per_point());
        info!(
            "Capturing {}x{} at ({}, {}) for {} -> {}",
            rect.width, rect.height, rect.x, rect.y, request.source, request.target
        );

        self.selector.begin_capture();
        ctx.send_viewport_cmd(ViewportCommand::Minimized(true));

        let tx = self.worker_tx.clone();
        let ctx = ctx.clone();
        let grabber = self.grabber.clone();

        self.runtime.spawn(async move {
            tokio::time::sleep(settle).await;

            let frame = match tokio::task::spawn_blocking(move || grabber.grab(rect)).await {
                Ok(Ok(frame)) => Some(frame),
                Ok(Err(e)) => {
                    warn!("Error capturing screenshot: {}", e);
                    None
                }
                Err(e) => {
                    error!("Capture task failed: {}", e);
                    None
                }
            };
            notify(
                &tx,
                &ctx,
                WorkerMessage::Captured {
                    run,
                    succeeded: frame.is_some(),
                },
            );

            let outcome = pipeline
                .run(frame, &request, |state| {
                    notify(&tx, &ctx, WorkerMessage::Stage { run, state })
                })
                .await;
            notify(&tx, &ctx, WorkerMessage::Finished { run, outcome });
        });
    }

    /// Persist a new key, then verify it before switching services over
    fn save_settings(&mut self, ctx: &egui::Context, api_key: String) {
        let settings = StoredSettings::with_api_key(api_key);
        if let Err(e) = self.settings_store.save(&settings) {
            error!("Error saving settings: {}", e);
            self.dashboard_state.settings.set_error(e.to_string());
            return;
        }

        let (verify, candidate) = {
            let state = self.shared_state.read();
            let translation = &state.config.translation;
            (
                translation.verify_on_save,
                state.context.reconfigure(settings.clone(), translation),
            )
        };

        if !verify {
            self.install_settings(settings);
            return;
        }

        let Some(translator) = candidate.translator() else {
            self.dashboard_state.settings.set_error(VERIFY_FAILED_MESSAGE);
            return;
        };

        let tx = self.worker_tx.clone();
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            let result = translator.verify().await.map_err(|e| e.to_string());
            notify(&tx, &ctx, WorkerMessage::CredentialChecked { settings, result });
        });
    }

    /// Rebuild services for `settings` and close the dialog
    fn install_settings(&mut self, settings: StoredSettings) {
        {
            let mut state = self.shared_state.write();
            let context = state.context.reconfigure(settings, &state.config.translation);
            state.install_context(context);
        }
        self.dashboard_state.settings.close();
        info!("Settings applied");
    }

    fn save_config(&self) {
        let Some(path) = &self.config_path else {
            return;
        };
        let config = self.shared_state.read().config.clone();
        if let Err(e) = config::save_config(&config, path) {
            warn!("Failed to save configuration to {:?}: {}", path, e);
        }
    }
}

/// Send a message to the UI thread and wake it
fn notify(tx: &Sender<WorkerMessage>, ctx: &egui::Context, message: WorkerMessage) {
    if tx.send(message).is_err() {
        debug!("UI has gone away, dropping worker message");
    }
    ctx.request_repaint();
}

/// Run the translator application
pub fn run_dashboard(app: TranslatorApp) -> Result<(), eframe::Error> {
    eframe::run_native(
        "Screen Translator",
        TranslatorApp::options(),
        Box::new(|_cc| Ok(Box::new(app))),
    )
}
