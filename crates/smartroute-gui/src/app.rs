//! Main application structure for the SmartRoute GUI

use std::time::{Duration, Instant};

use chrono::Local;

use crate::async_bridge::{AsyncBridge, TaskOutcome};
use crate::dialogs;
use crate::state::{AppState, RequestState, ViewMode};
use crate::tasks::{self, GenerationRequest};
use crate::ui_state::{LogEntry, LogLevel, UiState};
use crate::widgets;
use crate::widgets::login::LoginEvent;
use crate::widgets::prospect_form::ProspectEvent;
use crate::widgets::result_display::ResultEvent;
use crate::widgets::route_form::RouteEvent;
use crate::widgets::saved_routes::HistoryEvent;
use smartroute_core::{ApiClient, KeyringStore, ThemePreference};

/// Main application struct implementing eframe::App
pub struct SmartRouteApp {
    /// Domain state
    state: AppState,

    /// UI state
    ui_state: UiState,

    /// Async runtime bridge
    async_bridge: AsyncBridge,

    /// Gateway client shared by all spawned tasks
    api: ApiClient,

    /// Last config save time
    last_save: Instant,

    /// Config dirty flag
    config_dirty: bool,
}

impl SmartRouteApp {
    /// Create a new SmartRouteApp, reading config and session exactly once.
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let load = smartroute_core::load_config();
        let state = AppState::new(load.config, Box::new(KeyringStore));
        let ui_state = UiState::new(state.config.ui.reference_city.clone());
        let api = ApiClient::new(state.config.api.base_url.clone());

        let mut app = Self {
            state,
            ui_state,
            async_bridge: AsyncBridge::new(),
            api,
            last_save: Instant::now(),
            config_dirty: false,
        };

        for warning in &load.warnings {
            app.add_log(LogLevel::Warning, warning.clone());
        }
        app.add_log(LogLevel::Info, "Application started");

        app
    }

    /// Add a log entry
    fn add_log(&mut self, level: LogLevel, message: impl Into<String>) {
        self.ui_state.add_log_entry(LogEntry {
            timestamp: Local::now().format("%H:%M:%S").to_string(),
            level,
            message: message.into(),
        });
    }

    /// Apply theme to egui context
    fn apply_theme(&self, ctx: &egui::Context) {
        let visuals = match self.state.config.ui.theme {
            ThemePreference::Dark => egui::Visuals::dark(),
            ThemePreference::Light => egui::Visuals::light(),
        };
        ctx.set_visuals(visuals);
    }

    /// Auto-save configuration if dirty and enough time has passed
    fn handle_auto_save(&mut self) {
        if self.config_dirty && self.last_save.elapsed() > Duration::from_millis(300) {
            if let Err(e) = smartroute_core::save_config(&self.state.config) {
                self.add_log(LogLevel::Error, format!("Failed to save config: {}", e));
            } else {
                self.config_dirty = false;
                self.last_save = Instant::now();
            }
        }
    }

    /// Persist UI preferences that are edited in place (reference city).
    fn sync_preferences(&mut self) {
        if self.state.config.ui.reference_city != self.ui_state.route.reference_city {
            self.state.config.ui.reference_city = self.ui_state.route.reference_city.clone();
            self.config_dirty = true;
        }
        if self.state.config.ui.show_technical_log != self.ui_state.technical_log_expanded {
            self.state.config.ui.show_technical_log = self.ui_state.technical_log_expanded;
            self.config_dirty = true;
        }
    }

    /// Handle a completed background task.
    fn handle_outcome(&mut self, outcome: TaskOutcome) {
        match outcome {
            TaskOutcome::AuthCompleted { result } => {
                self.ui_state.login.pending = false;
                match result {
                    Ok(credential) => {
                        self.add_log(LogLevel::Info, "Signed in");
                        self.ui_state.login.password.clear();
                        self.ui_state.login.error = None;
                        self.state.complete_sign_in(credential);
                    }
                    Err(err) => {
                        let message = err.display_message();
                        self.add_log(LogLevel::Error, format!("Sign-in failed: {message}"));
                        self.ui_state.login.error = Some(message);
                    }
                }
            }
            TaskOutcome::GenerationCompleted { token, result } => {
                match &result {
                    Ok(_) => self.add_log(LogLevel::Info, "Generation completed"),
                    Err(err) => self.add_log(
                        LogLevel::Error,
                        format!("Generation failed: {}", err.display_message()),
                    ),
                }
                if self.state.apply_generation(token, result) {
                    self.ui_state.reset_result_panel();
                }
            }
            TaskOutcome::HistoryLoaded { token, result } => {
                match &result {
                    Ok(routes) => {
                        self.add_log(LogLevel::Info, format!("Loaded {} saved routes", routes.len()))
                    }
                    Err(err) => self.add_log(
                        LogLevel::Error,
                        format!("Failed to load saved routes: {}", err.display_message()),
                    ),
                }
                if self.state.apply_history(token, result) {
                    self.ui_state.history_panel.selected = None;
                }
            }
            TaskOutcome::RouteSaved { result } => {
                self.ui_state.result_panel.saving = false;
                match result {
                    Ok(()) => {
                        self.ui_state.result_panel.saved = true;
                        self.add_log(LogLevel::Info, "Route saved");
                    }
                    Err(err) => {
                        let message = err.display_message();
                        self.add_log(LogLevel::Error, format!("Failed to save route: {message}"));
                        // The displayed result stays untouched; failure is a blocking alert.
                        dialogs::error("Erro ao salvar rota", &message);
                    }
                }
            }
        }
    }

    fn handle_login_event(&mut self, event: LoginEvent) {
        self.ui_state.login.pending = true;
        self.ui_state.login.error = None;
        match event {
            LoginEvent::SubmitLogin { username, password } => {
                self.add_log(LogLevel::Info, "Signing in...");
                tasks::spawn_login(&self.async_bridge, self.api.clone(), username, password);
            }
            LoginEvent::SubmitRegister { username, password } => {
                self.add_log(LogLevel::Info, "Creating account...");
                tasks::spawn_register_and_login(
                    &self.async_bridge,
                    self.api.clone(),
                    username,
                    password,
                );
            }
        }
    }

    /// Enter a screen from Home; a History selection starts its fetch.
    fn handle_selection(&mut self, mode: ViewMode) {
        if let Some(token) = self.state.select_view(mode) {
            if let Some(credential) = self.state.credential().cloned() {
                tasks::spawn_history(&self.async_bridge, self.api.clone(), credential, token);
            }
        }
    }

    /// Spawn a generation request for the active screen.
    fn submit_generation(&mut self, request: GenerationRequest) {
        let Some(credential) = self.state.credential().cloned() else {
            return;
        };
        // None means a request is already in flight; the submit is dropped.
        let Some(token) = self.state.begin_generation() else {
            return;
        };
        self.ui_state.reset_result_panel();
        self.add_log(LogLevel::Info, "Request sent");
        tasks::spawn_generation(&self.async_bridge, self.api.clone(), credential, request, token);
    }

    /// Replace the route form rows with addresses imported from a spreadsheet.
    fn import_spreadsheet(&mut self) {
        let Some(path) = dialogs::pick_spreadsheet() else {
            return;
        };
        match smartroute_core::addresses_from_spreadsheet(&path) {
            Ok(addresses) => {
                let count = addresses.len();
                self.ui_state.route.replace_rows(addresses);
                self.add_log(LogLevel::Info, format!("Imported {count} addresses"));
                dialogs::info(
                    "Importação concluída",
                    &format!(
                        "{count} locais importados! Não esqueça de definir a Cidade de Referência."
                    ),
                );
            }
            Err(err) => {
                self.add_log(LogLevel::Error, format!("Import failed: {err}"));
                dialogs::error("Importação falhou", &err.to_string());
            }
        }
    }

    fn start_save(&mut self) {
        let Some(credential) = self.state.credential().cloned() else {
            return;
        };
        let RequestState::Success { result } = &self.state.request else {
            return;
        };
        let title = format!("Rota - {}", Local::now().format("%d/%m/%Y %H:%M"));
        let route_data = result.text.clone();
        self.ui_state.result_panel.saving = true;
        tasks::spawn_save_route(&self.async_bridge, self.api.clone(), credential, title, route_data);
    }

    /// Render the top panel with title, theme toggle and logout.
    fn render_top_panel(&mut self, ctx: &egui::Context) {
        let mut logout = false;
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("SmartRoute");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let theme_label = match self.state.config.ui.theme {
                        ThemePreference::Dark => "☀ Claro",
                        ThemePreference::Light => "🌙 Escuro",
                    };
                    if ui.button(theme_label).clicked() {
                        self.state.config.ui.theme = match self.state.config.ui.theme {
                            ThemePreference::Dark => ThemePreference::Light,
                            ThemePreference::Light => ThemePreference::Dark,
                        };
                        self.config_dirty = true;
                    }

                    if self.state.is_authenticated() && ui.button("🚪 Sair").clicked() {
                        logout = true;
                    }
                });
            });
        });
        if logout {
            self.add_log(LogLevel::Info, "Signed out");
            self.state.logout();
        }
    }

    /// Render the main content area.
    fn render_main_ui(&mut self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if !self.state.is_authenticated() {
                    if let Some(event) = widgets::login::render(ui, &mut self.ui_state.login) {
                        self.handle_login_event(event);
                    }
                    return;
                }

                match self.state.view_mode {
                    ViewMode::Home => {
                        if let Some(mode) = widgets::home_cards::render(ui) {
                            self.handle_selection(mode);
                        }
                    }
                    ViewMode::Prospect => {
                        let is_loading = self.state.request.is_loading();
                        let event =
                            widgets::prospect_form::render(ui, &mut self.ui_state.prospect, is_loading);
                        match event {
                            Some(ProspectEvent::Back) => self.state.go_back(),
                            Some(ProspectEvent::Submit(params)) => {
                                self.submit_generation(GenerationRequest::Prospect(params));
                            }
                            None => {}
                        }
                        self.render_request_status(ui);
                    }
                    ViewMode::Route => {
                        let is_loading = self.state.request.is_loading();
                        let event =
                            widgets::route_form::render(ui, &mut self.ui_state.route, is_loading);
                        match event {
                            Some(RouteEvent::Back) => self.state.go_back(),
                            Some(RouteEvent::ImportSpreadsheet) => self.import_spreadsheet(),
                            Some(RouteEvent::Submit(params)) => {
                                self.submit_generation(GenerationRequest::Route(params));
                            }
                            None => {}
                        }
                        self.render_request_status(ui);
                    }
                    ViewMode::History => {
                        let event = widgets::saved_routes::render(
                            ui,
                            &self.state.history,
                            &mut self.ui_state.history_panel,
                        );
                        if let Some(HistoryEvent::Back) = event {
                            self.state.go_back();
                        }
                    }
                }

                ui.add_space(8.0);

                let log_response = egui::CollapsingHeader::new("Log Técnico")
                    .default_open(self.ui_state.technical_log_expanded)
                    .show(ui, |ui| {
                        widgets::technical_log::render(ui, &mut self.ui_state);
                    });
                if log_response.header_response.clicked() {
                    self.ui_state.technical_log_expanded = !self.ui_state.technical_log_expanded;
                }
            });
    }

    /// Render the status banner and, on success, the result display.
    fn render_request_status(&mut self, ui: &mut egui::Ui) {
        let mut save_requested = false;
        match &self.state.request {
            RequestState::Idle => {}
            RequestState::Loading { .. } => {
                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Processando...");
                });
            }
            RequestState::Error { message } => {
                ui.add_space(12.0);
                ui.group(|ui| {
                    ui.set_min_width(ui.available_width());
                    ui.colored_label(egui::Color32::RED, format!("⚠ {message}"));
                });
            }
            RequestState::Success { result } => {
                if let Some(ResultEvent::Save) =
                    widgets::result_display::render(ui, result, &mut self.ui_state.result_panel)
                {
                    save_requested = true;
                }
            }
        }
        if save_requested {
            self.start_save();
        }
    }
}

impl eframe::App for SmartRouteApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply theme
        self.apply_theme(ctx);

        // Poll for task outcomes - collect first to avoid borrow checker issues
        let mut outcomes = Vec::new();
        self.async_bridge.poll_outcomes(|outcome| {
            outcomes.push(outcome);
        });

        for outcome in outcomes {
            self.handle_outcome(outcome);
        }

        // Request continuous repaint so in-flight requests resolve promptly
        ctx.request_repaint();

        // Top panel
        self.render_top_panel(ctx);

        // Main content
        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_main_ui(ui);
        });

        self.sync_preferences();

        // Auto-save
        self.handle_auto_save();
    }
}
