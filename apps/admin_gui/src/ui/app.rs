//! Application shell: sign-in, sidebar navigation, the dashboard screen,
//! and the user-management screen.

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use serde::{Deserialize, Serialize};
use shared::{
    domain::{RegistrationStatus, UserId, UserRecord, UserType},
    protocol::{AdminProfile, DashboardOverview},
};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{classify_login_failure, UiErrorCategory, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::pagination::ViewMode;
use crate::controller::users::{LoadState, PageView, UsersController};
use crate::ui::overlay::{menu_max_height, place_menu, MenuOrientation, StatusMenuState};
use crate::ui::theme::{
    lighten_color, stat_card, status_badge, status_color, status_glyph, ConsolePalette,
};

pub const SETTINGS_STORAGE_KEY: &str = "auction_admin_console_settings";

const TOAST_LIFETIME_TICKS: u64 = 240;

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub server_url: String,
    pub admin_id: String,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8080".to_string(),
            admin_id: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedConsoleSettings {
    pub text_scale: f32,
    pub compact_density: bool,
    pub prefer_table_view: bool,
}

impl Default for PersistedConsoleSettings {
    fn default() -> Self {
        Self {
            text_scale: 1.0,
            compact_density: false,
            prefer_table_view: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusBannerSeverity {
    Error,
}

#[derive(Debug, Clone)]
struct StatusBanner {
    severity: StatusBannerSeverity,
    message: String,
}

fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Auth => "Authentication",
        UiErrorCategory::Transport => "Transport",
        UiErrorCategory::Validation => "Validation",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ToastSeverity {
    Success,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    severity: ToastSeverity,
    message: String,
    born_tick: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppViewState {
    Login,
    Main,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AdminScreen {
    Dashboard,
    Users,
}

impl AdminScreen {
    fn label(self) -> &'static str {
        match self {
            AdminScreen::Dashboard => "Dashboard",
            AdminScreen::Users => "Users",
        }
    }

    fn glyph(self) -> &'static str {
        match self {
            AdminScreen::Dashboard => "🏠",
            AdminScreen::Users => "👥",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoginFocusField {
    Server,
    AdminId,
    Password,
}

#[derive(Debug, Clone)]
struct LoginUiState {
    focus: Option<LoginFocusField>,
    attempted_auto_focus: bool,
}

impl Default for LoginUiState {
    fn default() -> Self {
        Self {
            focus: Some(LoginFocusField::AdminId),
            attempted_auto_focus: false,
        }
    }
}

pub struct AdminGuiApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    server_url: String,
    admin_id: String,
    password: String,
    session: Option<AdminProfile>,

    status: String,
    status_banner: Option<StatusBanner>,
    toasts: Vec<Toast>,

    view_state: AppViewState,
    active_screen: AdminScreen,
    dashboard: Option<DashboardOverview>,
    users: UsersController,
    status_menu: Option<StatusMenuState>,

    palette: ConsolePalette,
    settings: PersistedConsoleSettings,
    applied_settings: Option<PersistedConsoleSettings>,
    login_ui: LoginUiState,

    // Frame tick used for toast expiry and focus heuristics.
    tick: u64,
}

impl AdminGuiApp {
    pub fn bootstrap(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        persisted_settings: Option<PersistedConsoleSettings>,
        startup: StartupConfig,
    ) -> Self {
        let settings = persisted_settings.unwrap_or_default();
        let mut users = UsersController::new();
        if settings.prefer_table_view {
            users.set_view_mode(ViewMode::Table);
        }
        Self {
            cmd_tx,
            ui_rx,
            server_url: startup.server_url,
            admin_id: startup.admin_id,
            password: String::new(),
            session: None,
            status: "Not signed in".to_string(),
            status_banner: None,
            toasts: Vec::new(),
            view_state: AppViewState::Login,
            active_screen: AdminScreen::Dashboard,
            dashboard: None,
            users,
            status_menu: None,
            palette: ConsolePalette::dark(),
            settings,
            applied_settings: None,
            login_ui: LoginUiState::default(),
            tick: 0,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::LoginOk(profile) => {
                    self.session = Some(profile);
                    self.view_state = AppViewState::Main;
                    self.active_screen = AdminScreen::Dashboard;
                    self.status = "Signed in - loading workspace".to_string();
                    self.status_banner = None;
                    self.password.clear();
                    self.dashboard = None;
                    self.status_menu = None;
                    let mut users = UsersController::new();
                    if self.settings.prefer_table_view {
                        users.set_view_mode(ViewMode::Table);
                    }
                    self.users = users;
                    dispatch_backend_command(
                        &self.cmd_tx,
                        BackendCommand::LoadUsers,
                        &mut self.status,
                    );
                    dispatch_backend_command(
                        &self.cmd_tx,
                        BackendCommand::LoadDashboard,
                        &mut self.status,
                    );
                }
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::UsersLoaded(listing) => {
                    self.status = format!("Loaded {} users", listing.count);
                    self.users.set_loaded(listing.users);
                }
                UiEvent::UsersLoadFailed(message) => {
                    self.status = message.clone();
                    self.users.set_load_failed(message);
                }
                UiEvent::StatusSaved { user_id, status } => {
                    self.users.complete_save(&user_id, status);
                    self.push_toast(
                        ToastSeverity::Success,
                        format!("Status updated to \"{}\"", status.label()),
                    );
                }
                UiEvent::StatusSaveFailed { user_id, message } => {
                    self.users.fail_save(&user_id);
                    self.push_toast(ToastSeverity::Error, message);
                }
                UiEvent::DashboardLoaded(overview) => {
                    self.dashboard = Some(overview);
                }
                UiEvent::Error(err) => {
                    if err.requires_reauth() {
                        self.session = None;
                        self.view_state = AppViewState::Login;
                        self.status = format!("Authentication error: {}", err.message());
                        self.status_banner = Some(StatusBanner {
                            severity: StatusBannerSeverity::Error,
                            message:
                                "Session expired or invalid credentials. Please sign in again."
                                    .to_string(),
                        });
                        self.login_ui.focus = Some(LoginFocusField::Password);
                    } else {
                        self.status = if err.context() == UiErrorContext::Login {
                            classify_login_failure(err.message())
                        } else {
                            format!("{} error: {}", err_label(err.category()), err.message())
                        };
                        if matches!(
                            err.context(),
                            UiErrorContext::Login | UiErrorContext::BackendStartup
                        ) {
                            self.status_banner = Some(StatusBanner {
                                severity: StatusBannerSeverity::Error,
                                message: self.status.clone(),
                            });
                        }
                    }
                }
            }
        }
    }

    fn push_toast(&mut self, severity: ToastSeverity, message: impl Into<String>) {
        self.toasts.push(Toast {
            severity,
            message: message.into(),
            born_tick: self.tick,
        });
    }

    fn apply_style_if_needed(&mut self, ctx: &egui::Context) {
        if self.applied_settings == Some(self.settings) {
            return;
        }

        let text_scale = self.settings.text_scale.clamp(0.8, 1.4);
        let mut style = (*ctx.style()).clone();
        style.visuals = egui::Visuals::dark();
        style.visuals.panel_fill = self.palette.app_background;
        style.visuals.window_fill = self.palette.surface;
        style.visuals.extreme_bg_color = lighten_color(self.palette.app_background, 0.03);
        style.visuals.widgets.noninteractive.bg_stroke =
            egui::Stroke::new(1.0, self.palette.border);
        style.visuals.widgets.inactive.bg_stroke = egui::Stroke::new(1.0, self.palette.border);
        style.visuals.widgets.hovered.bg_stroke =
            egui::Stroke::new(1.0, lighten_color(self.palette.border, 0.2));
        style.visuals.selection.bg_fill = self.palette.primary.gamma_multiply(0.35);
        style.visuals.override_text_color = Some(self.palette.text);
        // Scale from the stock sizes so repeated applies do not compound.
        style.text_styles = egui::Style::default().text_styles;
        for font in style.text_styles.values_mut() {
            font.size *= text_scale;
        }

        if self.settings.compact_density {
            style.spacing.item_spacing = egui::vec2(6.0, 4.0);
            style.spacing.button_padding = egui::vec2(8.0, 5.0);
            style.spacing.interact_size = egui::vec2(40.0, 24.0);
        } else {
            style.spacing.item_spacing = egui::vec2(8.0, 6.0);
            style.spacing.button_padding = egui::vec2(10.0, 6.0);
            style.spacing.interact_size = egui::vec2(40.0, 30.0);
        }
        ctx.set_style(style);
        self.applied_settings = Some(self.settings);
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        if let Some(banner) = self.status_banner.clone() {
            let (fill, stroke) = match banner.severity {
                StatusBannerSeverity::Error => (
                    egui::Color32::from_rgb(111, 53, 53),
                    egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)),
                ),
            };

            egui::Frame::NONE
                .fill(fill)
                .stroke(stroke)
                .corner_radius(8.0)
                .inner_margin(egui::Margin::symmetric(10, 8))
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(egui::RichText::new(&banner.message).color(egui::Color32::WHITE));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("Dismiss").clicked() {
                                self.status_banner = None;
                            }
                        });
                    });
                });
            ui.add_space(6.0);
        }
    }

    fn show_toasts(&mut self, ctx: &egui::Context) {
        let tick = self.tick;
        self.toasts
            .retain(|toast| tick.wrapping_sub(toast.born_tick) < TOAST_LIFETIME_TICKS);
        if self.toasts.is_empty() {
            return;
        }

        let palette = self.palette;
        egui::Area::new(egui::Id::new("console_toasts"))
            .order(egui::Order::Foreground)
            .pivot(egui::Align2::RIGHT_TOP)
            .fixed_pos(ctx.screen_rect().right_top() + egui::vec2(-16.0, 16.0))
            .show(ctx, |ui| {
                for toast in &self.toasts {
                    let accent = match toast.severity {
                        ToastSeverity::Success => palette.success,
                        ToastSeverity::Error => palette.danger,
                    };
                    egui::Frame::NONE
                        .fill(palette.surface)
                        .stroke(egui::Stroke::new(1.0, accent))
                        .corner_radius(8.0)
                        .inner_margin(egui::Margin::symmetric(12, 8))
                        .show(ui, |ui| {
                            ui.set_max_width(320.0);
                            ui.label(egui::RichText::new(&toast.message).color(accent));
                        });
                    ui.add_space(6.0);
                }
            });
    }

    // ---------- sign-in ----------

    fn login_text_field(
        &mut self,
        ui: &mut egui::Ui,
        id: &'static str,
        label: &str,
        hint: &str,
        value: &mut String,
        password: bool,
        should_focus: bool,
    ) -> egui::Response {
        ui.label(egui::RichText::new(label).strong());
        let edit = egui::TextEdit::singleline(value)
            .id_salt(id)
            .password(password)
            .hint_text(
                egui::RichText::new(hint)
                    .color(ui.visuals().weak_text_color().gamma_multiply(0.85)),
            )
            .desired_width(f32::INFINITY);

        let response = ui.add_sized([ui.available_width(), 34.0], edit);
        if should_focus {
            response.request_focus();
        }
        response
    }

    fn show_login_screen(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let avail = ui.available_size();
            let card_width = avail.x.clamp(440.0, 560.0);
            let top_space = (avail.y * 0.12).clamp(18.0, 90.0);

            ui.add_space(top_space);

            ui.vertical_centered(|ui| {
                ui.set_width(card_width);

                egui::Frame::NONE
                    .fill(lighten_color(self.palette.app_background, 0.06))
                    .corner_radius(14.0)
                    .stroke(egui::Stroke::new(1.0, self.palette.border))
                    .inner_margin(egui::Margin::symmetric(20, 18))
                    .show(ui, |ui| {
                        ui.style_mut().spacing.item_spacing = egui::vec2(10.0, 10.0);

                        ui.horizontal(|ui| {
                            ui.label(egui::RichText::new("🔨").size(24.0));
                            ui.vertical(|ui| {
                                ui.heading("Auction Admin Console");
                                ui.weak("Sign in to manage the auction platform.");
                            });
                        });

                        ui.add_space(8.0);
                        self.show_status_banner(ui);

                        let mut focus_to_set = None;
                        if !self.login_ui.attempted_auto_focus {
                            self.login_ui.attempted_auto_focus = true;
                            focus_to_set = self.login_ui.focus;
                        } else if self.login_ui.focus.is_some() {
                            focus_to_set = self.login_ui.focus;
                            self.login_ui.focus = None;
                        }

                        egui::Frame::NONE
                            .fill(ui.visuals().faint_bg_color.gamma_multiply(0.55))
                            .corner_radius(12.0)
                            .inner_margin(egui::Margin::symmetric(14, 12))
                            .show(ui, |ui| {
                                ui.label(egui::RichText::new("Account").strong().size(18.0));
                                ui.add_space(6.0);

                                let mut server_url_buf = self.server_url.clone();
                                let mut admin_id_buf = self.admin_id.clone();
                                let mut password_buf = self.password.clone();

                                let server_resp = self.login_text_field(
                                    ui,
                                    "login_server_url",
                                    "Server URL",
                                    "http://127.0.0.1:8080",
                                    &mut server_url_buf,
                                    false,
                                    focus_to_set == Some(LoginFocusField::Server),
                                );
                                ui.add_space(6.0);
                                let admin_resp = self.login_text_field(
                                    ui,
                                    "login_admin_id",
                                    "Admin ID",
                                    "admin",
                                    &mut admin_id_buf,
                                    false,
                                    focus_to_set == Some(LoginFocusField::AdminId),
                                );
                                ui.add_space(6.0);
                                let password_resp = self.login_text_field(
                                    ui,
                                    "login_password",
                                    "Password",
                                    "",
                                    &mut password_buf,
                                    true,
                                    focus_to_set == Some(LoginFocusField::Password),
                                );

                                self.server_url = server_url_buf;
                                self.admin_id = admin_id_buf;
                                self.password = password_buf;

                                let enter_pressed =
                                    ctx.input(|i| i.key_pressed(egui::Key::Enter));
                                let can_submit = server_resp.has_focus()
                                    || admin_resp.has_focus()
                                    || password_resp.has_focus();
                                if can_submit && enter_pressed {
                                    self.try_login();
                                }
                            });

                        ui.add_space(10.0);

                        ui.horizontal(|ui| {
                            let is_busy = self.session.is_none()
                                && self.status.to_ascii_lowercase().contains("signing in");
                            let btn = egui::Button::new(
                                egui::RichText::new("Sign in").strong().size(16.0),
                            )
                            .fill(self.palette.primary)
                            .min_size(egui::vec2(ui.available_width(), 40.0));

                            if ui.add_enabled(!is_busy, btn).clicked() {
                                self.try_login();
                            }
                        });

                        ui.add_space(10.0);
                        ui.separator();
                        ui.add_space(6.0);

                        ui.horizontal_wrapped(|ui| {
                            ui.small("Status:");
                            ui.small(egui::RichText::new(&self.status).weak());
                        });
                    });
            });

            ui.add_space((avail.y * 0.08).clamp(12.0, 60.0));
        });
    }

    fn try_login(&mut self) {
        let admin_id = self.admin_id.trim().to_string();
        if admin_id.is_empty() {
            self.status = "Admin ID is required".to_string();
            self.status_banner = Some(StatusBanner {
                severity: StatusBannerSeverity::Error,
                message: "Please enter an admin ID.".to_string(),
            });
            self.login_ui.focus = Some(LoginFocusField::AdminId);
            return;
        }

        let server = self.server_url.trim().to_string();
        if server.is_empty() {
            self.status = "Server URL is required".to_string();
            self.status_banner = Some(StatusBanner {
                severity: StatusBannerSeverity::Error,
                message: "Please enter a server URL.".to_string(),
            });
            self.login_ui.focus = Some(LoginFocusField::Server);
            return;
        }

        if self.password.is_empty() {
            self.status = "Password is required".to_string();
            self.status_banner = Some(StatusBanner {
                severity: StatusBannerSeverity::Error,
                message: "Please enter the admin password.".to_string(),
            });
            self.login_ui.focus = Some(LoginFocusField::Password);
            return;
        }

        self.status = "Signing in...".to_string();
        self.status_banner = None;
        dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::Login {
                server_url: server,
                admin_id,
                password: self.password.clone(),
            },
            &mut self.status,
        );
    }

    fn sign_out(&mut self) {
        self.session = None;
        self.view_state = AppViewState::Login;
        self.status = "Signed out".to_string();
        self.status_banner = None;
        self.dashboard = None;
        self.status_menu = None;
        self.users = UsersController::new();
        self.login_ui.focus = Some(LoginFocusField::Password);
    }

    // ---------- main workspace ----------

    fn show_main_workspace(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("console_nav")
            .resizable(false)
            .exact_width(200.0)
            .show(ctx, |ui| {
                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("🔨").size(18.0));
                    ui.heading("Auction Admin");
                });
                ui.add_space(12.0);

                for screen in [AdminScreen::Dashboard, AdminScreen::Users] {
                    let active = self.active_screen == screen;
                    let fill = if active {
                        self.palette.primary.gamma_multiply(0.16)
                    } else {
                        egui::Color32::TRANSPARENT
                    };
                    let text = egui::RichText::new(format!("{}  {}", screen.glyph(), screen.label()))
                        .color(if active {
                            self.palette.primary
                        } else {
                            self.palette.text
                        });
                    let btn = egui::Button::new(text)
                        .fill(fill)
                        .min_size(egui::vec2(ui.available_width(), 32.0));
                    if ui.add(btn).clicked() {
                        self.active_screen = screen;
                        self.status_menu = None;
                    }
                }

                ui.with_layout(egui::Layout::bottom_up(egui::Align::Min), |ui| {
                    ui.add_space(10.0);
                    ui.small(egui::RichText::new(&self.status).weak());
                    ui.add_space(4.0);
                    if ui.button("⎋ Sign out").clicked() {
                        self.sign_out();
                    }
                    if let Some(session) = &self.session {
                        ui.horizontal(|ui| {
                            ui.label(
                                egui::RichText::new("●").color(self.palette.success).size(10.0),
                            );
                            ui.strong(&session.name);
                        });
                    }
                    ui.add_space(6.0);
                    ui.collapsing("Preferences", |ui| {
                        ui.add(
                            egui::Slider::new(&mut self.settings.text_scale, 0.8..=1.4)
                                .text("Text scale")
                                .step_by(0.05),
                        );
                        ui.checkbox(&mut self.settings.compact_density, "Compact density");
                    });
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_status_banner(ui);
            match self.active_screen {
                AdminScreen::Dashboard => self.show_dashboard_screen(ui),
                AdminScreen::Users => self.show_users_screen(ui),
            }
        });
    }

    // ---------- dashboard screen ----------

    fn show_dashboard_screen(&mut self, ui: &mut egui::Ui) {
        ui.heading("Auction Dashboard");
        ui.label(
            egui::RichText::new("Welcome to your auction management portal")
                .color(self.palette.hint_text),
        );
        ui.add_space(10.0);

        let Some(overview) = self.dashboard.clone() else {
            ui.add_space(30.0);
            ui.vertical_centered(|ui| {
                ui.add(egui::Spinner::new().size(28.0));
                ui.add_space(8.0);
                ui.label(egui::RichText::new("Loading dashboard...").color(self.palette.hint_text));
            });
            return;
        };

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let palette = self.palette;
                let card_width = ((ui.available_width() - 3.0 * 10.0) / 4.0).max(180.0);
                ui.horizontal_wrapped(|ui| {
                    stat_card(
                        ui,
                        &palette,
                        card_width,
                        "Live Auctions",
                        &overview.live_auctions.to_string(),
                        "Active right now",
                        "🔨",
                    );
                    stat_card(
                        ui,
                        &palette,
                        card_width,
                        "Total Bids",
                        &overview.total_bids.to_string(),
                        "Last 24 hours",
                        "💰",
                    );
                    stat_card(
                        ui,
                        &palette,
                        card_width,
                        "Items Listed",
                        &overview.items_listed.to_string(),
                        "New this week",
                        "📦",
                    );
                    stat_card(
                        ui,
                        &palette,
                        card_width,
                        "Successful Sales",
                        &overview.successful_sales.to_string(),
                        "Completed today",
                        "🏆",
                    );
                });
                ui.add_space(12.0);

                ui.columns(2, |columns| {
                    section_frame(&mut columns[0], &palette, "📊 Top Categories", |ui| {
                        if overview.categories.is_empty() {
                            ui.label(
                                egui::RichText::new("No category data yet.")
                                    .color(palette.hint_text),
                            );
                        }
                        let scale = overview.items_listed.max(1) as f32;
                        for category in &overview.categories {
                            ui.horizontal(|ui| {
                                ui.label(&category.name);
                                ui.with_layout(
                                    egui::Layout::right_to_left(egui::Align::Center),
                                    |ui| {
                                        ui.label(
                                            egui::RichText::new(format!(
                                                "{} items",
                                                category.items
                                            ))
                                            .color(palette.primary)
                                            .strong(),
                                        );
                                    },
                                );
                            });
                            ui.add(
                                egui::ProgressBar::new(category.items as f32 / scale)
                                    .fill(palette.primary)
                                    .desired_height(6.0),
                            );
                            ui.add_space(6.0);
                        }
                    });

                    section_frame(&mut columns[1], &palette, "⏰ Upcoming Auctions", |ui| {
                        if overview.upcoming_auctions.is_empty() {
                            ui.label(
                                egui::RichText::new("Nothing scheduled.").color(palette.hint_text),
                            );
                        }
                        for auction in &overview.upcoming_auctions {
                            egui::Frame::NONE
                                .fill(palette.app_background)
                                .stroke(egui::Stroke::new(1.0, palette.border))
                                .corner_radius(8.0)
                                .inner_margin(egui::Margin::symmetric(10, 8))
                                .show(ui, |ui| {
                                    ui.set_width(ui.available_width());
                                    ui.strong(&auction.title);
                                    ui.small(
                                        egui::RichText::new(format!(
                                            "{} · {}",
                                            auction.time, auction.date
                                        ))
                                        .color(palette.hint_text),
                                    );
                                });
                            ui.add_space(6.0);
                        }
                    });
                });
                ui.add_space(12.0);

                ui.columns(2, |columns| {
                    section_frame(&mut columns[0], &palette, "🕘 Recent Bids", |ui| {
                        if overview.recent_bids.is_empty() {
                            ui.label(
                                egui::RichText::new("No bids recorded yet.")
                                    .color(palette.hint_text),
                            );
                        }
                        for bid in &overview.recent_bids {
                            ui.horizontal_wrapped(|ui| {
                                ui.strong(&bid.user);
                                ui.label(format!("bid {} on {}", bid.amount, bid.item));
                            });
                            ui.small(egui::RichText::new(&bid.time).color(palette.hint_text));
                            ui.add_space(4.0);
                        }
                    });

                    section_frame(&mut columns[1], &palette, "⚙ Quick Actions", |ui| {
                        let actions = [
                            ("➕ Create Auction", palette.primary),
                            ("🔨 Place Bid", palette.success),
                            ("📈 View Reports", palette.info),
                            ("📅 Schedule Auction", palette.warning),
                        ];
                        let half = (ui.available_width() - 8.0) / 2.0;
                        ui.horizontal_wrapped(|ui| {
                            for (label, color) in actions {
                                let btn = egui::Button::new(
                                    egui::RichText::new(label).color(color),
                                )
                                .fill(palette.app_background)
                                .stroke(egui::Stroke::new(1.0, palette.border))
                                .min_size(egui::vec2(half, 44.0));
                                let _ = ui.add(btn);
                            }
                        });
                    });
                });
            });
    }

    // ---------- users screen ----------

    fn show_users_screen(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.heading("👥 User Management");
                ui.label(
                    egui::RichText::new(
                        "Search, filter, verify documents and update user status.",
                    )
                    .color(self.palette.hint_text),
                );
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                for mode in [ViewMode::Table, ViewMode::Cards] {
                    let active = self.users.view_mode() == mode;
                    let fill = if active {
                        self.palette.primary.gamma_multiply(0.16)
                    } else {
                        self.palette.surface
                    };
                    let glyph = match mode {
                        ViewMode::Cards => "🔲",
                        ViewMode::Table => "📋",
                    };
                    let text = egui::RichText::new(format!("{glyph} {}", mode.label())).color(
                        if active {
                            self.palette.primary
                        } else {
                            self.palette.text
                        },
                    );
                    if ui
                        .add(egui::Button::new(text).fill(fill).min_size(egui::vec2(82.0, 30.0)))
                        .clicked()
                    {
                        self.users.set_view_mode(mode);
                        self.status_menu = None;
                    }
                }
            });
        });
        ui.add_space(8.0);

        match self.users.load_state().clone() {
            LoadState::Loading => {
                ui.add_space(40.0);
                ui.vertical_centered(|ui| {
                    ui.add(egui::Spinner::new().size(32.0));
                    ui.add_space(8.0);
                    ui.label(
                        egui::RichText::new("Loading users...").color(self.palette.hint_text),
                    );
                });
                return;
            }
            LoadState::Failed(message) => {
                egui::Frame::NONE
                    .stroke(egui::Stroke::new(1.0, self.palette.danger))
                    .corner_radius(8.0)
                    .inner_margin(egui::Margin::symmetric(12, 10))
                    .show(ui, |ui| {
                        ui.label(egui::RichText::new(&message).color(self.palette.danger));
                        if ui.button("Retry").clicked() {
                            self.users.set_loading();
                            dispatch_backend_command(
                                &self.cmd_tx,
                                BackendCommand::LoadUsers,
                                &mut self.status,
                            );
                        }
                    });
                return;
            }
            LoadState::Ready => {}
        }

        self.show_users_filters(ui);
        ui.add_space(8.0);
        self.show_users_stats(ui);
        ui.add_space(8.0);

        let view = self.users.page_view();
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                match self.users.view_mode() {
                    ViewMode::Cards => self.show_users_cards(ui, &view),
                    ViewMode::Table => self.show_users_table(ui, &view),
                }
                ui.add_space(8.0);
                self.show_pager(ui, &view);
            });

        self.show_status_menu_overlay(ui.ctx());
    }

    fn show_users_filters(&mut self, ui: &mut egui::Ui) {
        let palette = self.palette;
        egui::Frame::NONE
            .fill(palette.surface)
            .stroke(egui::Stroke::new(1.0, palette.border))
            .corner_radius(10.0)
            .inner_margin(egui::Margin::symmetric(12, 10))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label("🔍");
                    let mut search = self.users.criteria().search.clone();
                    ui.add(
                        egui::TextEdit::singleline(&mut search)
                            .id_salt("users_search")
                            .hint_text("Search by name, email, phone or user id")
                            .desired_width(260.0),
                    );
                    self.users.set_search(search);

                    ui.separator();

                    ui.label(egui::RichText::new("Type").color(palette.hint_text));
                    let mut type_filter = self.users.criteria().user_type;
                    egui::ComboBox::from_id_salt("users_type_filter")
                        .selected_text(type_filter.map(UserType::label).unwrap_or("All"))
                        .show_ui(ui, |ui| {
                            ui.selectable_value(&mut type_filter, None, "All");
                            for user_type in UserType::ALL {
                                ui.selectable_value(
                                    &mut type_filter,
                                    Some(user_type),
                                    user_type.label(),
                                );
                            }
                        });
                    self.users.set_type_filter(type_filter);

                    ui.label(egui::RichText::new("Status").color(palette.hint_text));
                    let mut status_filter = self.users.criteria().status;
                    egui::ComboBox::from_id_salt("users_status_filter")
                        .selected_text(
                            status_filter.map(RegistrationStatus::label).unwrap_or("All"),
                        )
                        .show_ui(ui, |ui| {
                            ui.selectable_value(&mut status_filter, None, "All");
                            for status in RegistrationStatus::ALL {
                                ui.selectable_value(
                                    &mut status_filter,
                                    Some(status),
                                    status.label(),
                                );
                            }
                        });
                    self.users.set_status_filter(status_filter);

                    ui.separator();

                    let mut only_active = self.users.criteria().only_active_auctions;
                    ui.checkbox(&mut only_active, "Only active auctions");
                    self.users.set_only_active_auctions(only_active);
                });
            });
    }

    fn show_users_stats(&mut self, ui: &mut egui::Ui) {
        let stats = self.users.filtered_stats();
        let palette = self.palette;
        let card_width = ((ui.available_width() - 3.0 * 10.0) / 4.0).max(160.0);
        ui.horizontal_wrapped(|ui| {
            stat_card(
                ui,
                &palette,
                card_width,
                "Filtered Users",
                &stats.total.to_string(),
                "Visible after filters",
                "👥",
            );
            stat_card(
                ui,
                &palette,
                card_width,
                "Approved",
                &stats.approved.to_string(),
                "Verified users",
                "✔",
            );
            stat_card(
                ui,
                &palette,
                card_width,
                "Pending",
                &stats.pending.to_string(),
                "Awaiting review",
                "⏳",
            );
            stat_card(
                ui,
                &palette,
                card_width,
                "Active Auctions",
                &stats.active_auctions.to_string(),
                "Sum of active auctions",
                "📦",
            );
        });
    }

    fn show_users_cards(&mut self, ui: &mut egui::Ui, view: &PageView) {
        if view.users.is_empty() {
            self.show_users_empty_state(ui);
            return;
        }

        let palette = self.palette;
        let card_width = ((ui.available_width() - 2.0 * 10.0) / 3.0).max(260.0);
        for row in view.users.chunks(3) {
            ui.horizontal(|ui| {
                for user in row {
                    self.show_user_card(ui, user, card_width, &palette);
                }
            });
            ui.add_space(10.0);
        }
    }

    fn show_user_card(
        &mut self,
        ui: &mut egui::Ui,
        user: &UserRecord,
        width: f32,
        palette: &ConsolePalette,
    ) {
        egui::Frame::NONE
            .fill(palette.surface)
            .stroke(egui::Stroke::new(1.0, palette.border))
            .corner_radius(10.0)
            .inner_margin(egui::Margin::symmetric(12, 10))
            .show(ui, |ui| {
                ui.set_width(width);

                ui.horizontal(|ui| {
                    egui::Frame::NONE
                        .fill(palette.primary.gamma_multiply(0.25))
                        .corner_radius(egui::CornerRadius::same(16))
                        .inner_margin(egui::Margin::symmetric(9, 7))
                        .show(ui, |ui| {
                            ui.label(
                                egui::RichText::new(initials(&user.name))
                                    .color(palette.primary)
                                    .strong(),
                            );
                        });
                    ui.vertical(|ui| {
                        ui.strong(&user.name);
                        status_badge(ui, palette, user.registration_status);
                        ui.small(
                            egui::RichText::new(format!(
                                "{} · {}",
                                user.user_id,
                                user.user_type.label()
                            ))
                            .color(palette.hint_text),
                        );
                    });
                });
                ui.separator();

                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("📅").size(12.0));
                    ui.vertical(|ui| {
                        ui.small(egui::RichText::new("Join Date").color(palette.hint_text));
                        ui.label(user.created_at.format("%d %b %Y").to_string());
                    });
                });

                self.show_document_links(ui, user, palette);

                let activity = user.activity_stats;
                let cell = (width - 20.0) / 2.0;
                ui.horizontal(|ui| {
                    activity_cell(ui, palette, cell, "🔨", "Bids", activity.bids_count);
                    activity_cell(ui, palette, cell, "📦", "Auctions", activity.auctions_count);
                });
                ui.horizontal(|ui| {
                    activity_cell(
                        ui,
                        palette,
                        cell,
                        "📋",
                        "Active",
                        activity.active_auctions_count,
                    );
                    activity_cell(ui, palette, cell, "🏆", "Won", activity.won_auctions_count);
                });

                ui.separator();
                ui.horizontal(|ui| {
                    let select_width = (ui.available_width() - 70.0).max(120.0);
                    self.show_status_select(ui, user, select_width);
                    self.show_save_button(ui, user);
                });
            });
    }

    fn show_users_table(&mut self, ui: &mut egui::Ui, view: &PageView) {
        if view.users.is_empty() {
            self.show_users_empty_state(ui);
            return;
        }

        let palette = self.palette;
        egui::Frame::NONE
            .fill(palette.surface)
            .stroke(egui::Stroke::new(1.0, palette.border))
            .corner_radius(10.0)
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                egui::Grid::new("users_table")
                    .striped(true)
                    .min_col_width(64.0)
                    .spacing(egui::vec2(14.0, 10.0))
                    .show(ui, |ui| {
                        for head in [
                            "User", "Contact", "City", "Type", "Status", "Documents", "Bids",
                            "Auctions", "Active", "Won", "Joined", "Actions",
                        ] {
                            ui.label(
                                egui::RichText::new(head)
                                    .color(palette.hint_text)
                                    .small()
                                    .strong(),
                            );
                        }
                        ui.end_row();

                        for user in &view.users {
                            ui.vertical(|ui| {
                                ui.strong(&user.name);
                                ui.small(
                                    egui::RichText::new(user.user_id.to_string())
                                        .color(palette.hint_text),
                                );
                            });
                            ui.vertical(|ui| {
                                ui.label(&user.email);
                                ui.small(
                                    egui::RichText::new(&user.phone).color(palette.hint_text),
                                );
                            });
                            ui.label(&user.city);
                            ui.label(user.user_type.label());
                            ui.vertical(|ui| {
                                status_badge(ui, &palette, user.registration_status);
                                ui.add_space(2.0);
                                self.show_status_select(ui, user, 150.0);
                            });
                            self.show_document_links(ui, user, &palette);
                            ui.label(user.activity_stats.bids_count.to_string());
                            ui.label(user.activity_stats.auctions_count.to_string());
                            ui.label(user.activity_stats.active_auctions_count.to_string());
                            ui.label(user.activity_stats.won_auctions_count.to_string());
                            ui.label(user.created_at.format("%d %b %Y").to_string());
                            self.show_save_button(ui, user);
                            ui.end_row();
                        }
                    });
            });
    }

    fn show_users_empty_state(&self, ui: &mut egui::Ui) {
        egui::Frame::NONE
            .fill(self.palette.surface)
            .stroke(egui::Stroke::new(1.0, self.palette.border))
            .corner_radius(10.0)
            .inner_margin(egui::Margin::symmetric(16, 24))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    ui.label(
                        egui::RichText::new("No users for current filters.")
                            .color(self.palette.hint_text),
                    );
                });
            });
    }

    fn show_document_links(
        &mut self,
        ui: &mut egui::Ui,
        user: &UserRecord,
        palette: &ConsolePalette,
    ) {
        let pan = user.documents.pan.clone();
        let aadhar = user.documents.aadhar.clone();
        if pan.is_none() && aadhar.is_none() {
            ui.small(egui::RichText::new("No documents").color(palette.hint_text));
            return;
        }
        ui.horizontal(|ui| {
            if let Some(url) = pan {
                let btn = egui::Button::new(
                    egui::RichText::new("👁 PAN").color(palette.info).size(11.0),
                )
                .fill(palette.info.gamma_multiply(0.15));
                if ui.add(btn).on_hover_text("View PAN document").clicked() {
                    self.open_document_url(&url);
                }
            }
            if let Some(url) = aadhar {
                let btn = egui::Button::new(
                    egui::RichText::new("👁 Aadhaar").color(palette.info).size(11.0),
                )
                .fill(palette.info.gamma_multiply(0.15));
                if ui.add(btn).on_hover_text("View Aadhaar document").clicked() {
                    self.open_document_url(&url);
                }
            }
        });
    }

    fn show_pager(&mut self, ui: &mut egui::Ui, view: &PageView) {
        let palette = self.palette;
        let mode = self.users.view_mode();
        egui::Frame::NONE
            .fill(palette.surface)
            .stroke(egui::Stroke::new(1.0, palette.border))
            .corner_radius(10.0)
            .inner_margin(egui::Margin::symmetric(12, 8))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let first = if view.filtered_count == 0 {
                        0
                    } else {
                        view.start_index + 1
                    };
                    let last = view.start_index + view.users.len();
                    ui.label(
                        egui::RichText::new(format!(
                            "Showing {first}–{last} of {}",
                            view.filtered_count
                        ))
                        .color(palette.hint_text),
                    );

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui
                            .add_enabled(view.page < view.page_count, egui::Button::new("Next"))
                            .clicked()
                        {
                            self.users.set_page(mode, view.page + 1);
                        }
                        for n in (1..=view.page_count).rev() {
                            let active = n == view.page;
                            let text = egui::RichText::new(n.to_string()).color(if active {
                                palette.primary
                            } else {
                                palette.text
                            });
                            let btn = egui::Button::new(if active { text.strong() } else { text })
                                .fill(if active {
                                    palette.primary.gamma_multiply(0.12)
                                } else {
                                    egui::Color32::TRANSPARENT
                                });
                            if ui.add(btn).clicked() {
                                self.users.set_page(mode, n);
                            }
                        }
                        if ui
                            .add_enabled(view.page > 1, egui::Button::new("Previous"))
                            .clicked()
                        {
                            self.users.set_page(mode, view.page.saturating_sub(1));
                        }
                    });
                });
            });
    }

    // ---------- per-row status editing ----------

    fn show_status_select(&mut self, ui: &mut egui::Ui, user: &UserRecord, width: f32) {
        let palette = self.palette;
        let current = self.users.display_status(user);
        let saving = self.users.is_saving(&user.user_id);
        let open = matches!(&self.status_menu, Some(state) if state.user_id == user.user_id);

        // Chevron flips only while the menu hangs below, like a rotated
        // dropdown arrow; an upward menu keeps the resting chevron.
        let chevron = match &self.status_menu {
            Some(state)
                if state.user_id == user.user_id
                    && state.orientation == MenuOrientation::Below =>
            {
                "⌃"
            }
            _ => "⌄",
        };
        let text = egui::RichText::new(format!(
            "{} {}  {chevron}",
            status_glyph(current),
            current.label()
        ))
        .color(status_color(&palette, current));
        let btn = egui::Button::new(text)
            .fill(palette.app_background)
            .stroke(egui::Stroke::new(
                1.0,
                if open { palette.primary } else { palette.border },
            ))
            .min_size(egui::vec2(width, 26.0));

        let response = ui.add_enabled(!saving, btn);
        if response.clicked() {
            self.status_menu = match self.status_menu.take() {
                Some(state) if state.user_id == user.user_id => None,
                _ => Some(StatusMenuState::open(user.user_id.clone(), response.rect)),
            };
        } else if open {
            // The trigger re-renders every frame, so tracking its rect here
            // keeps the menu glued to it across scrolling and resizes.
            if let Some(state) = self.status_menu.as_mut() {
                if state.user_id == user.user_id {
                    state.anchor = response.rect;
                }
            }
        }
    }

    fn show_save_button(&mut self, ui: &mut egui::Ui, user: &UserRecord) {
        let saving = self.users.is_saving(&user.user_id);
        let btn = egui::Button::new(
            egui::RichText::new(if saving { "Saving..." } else { "Save" })
                .color(self.palette.on_primary),
        )
        .fill(self.palette.primary)
        .min_size(egui::vec2(60.0, 26.0));
        if ui.add_enabled(!saving, btn).clicked() {
            self.trigger_save(&user.user_id);
        }
    }

    fn trigger_save(&mut self, user_id: &UserId) {
        // Single-flight per user: a second trigger while a save is in flight
        // returns None and is dropped, not queued.
        let Some(status) = self.users.begin_save(user_id) else {
            return;
        };
        let dispatched = dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::UpdateUserStatus {
                user_id: user_id.clone(),
                status,
            },
            &mut self.status,
        );
        if !dispatched {
            self.users.fail_save(user_id);
        }
    }

    fn show_status_menu_overlay(&mut self, ctx: &egui::Context) {
        let Some(mut state) = self.status_menu.take() else {
            return;
        };
        // Row can disappear under the open menu (filter change); drop the menu.
        let Some(user) = self
            .users
            .filtered()
            .into_iter()
            .find(|u| u.user_id == state.user_id)
            .cloned()
        else {
            return;
        };

        let viewport = ctx.screen_rect();
        let placement = place_menu(state.anchor, viewport, state.measured_height);
        let current = self.users.display_status(&user);
        let palette = self.palette;
        let mut committed: Option<RegistrationStatus> = None;

        let area = egui::Area::new(egui::Id::new(("status_menu", state.user_id.0.as_str())))
            .order(egui::Order::Foreground)
            .fixed_pos(placement.pos())
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style())
                    .fill(palette.surface)
                    .stroke(egui::Stroke::new(1.0, palette.border))
                    .corner_radius(egui::CornerRadius::same(8))
                    .show(ui, |ui| {
                        ui.set_min_width(placement.width);
                        egui::ScrollArea::vertical()
                            .max_height(menu_max_height(viewport))
                            .show(ui, |ui| {
                                for status in RegistrationStatus::ALL {
                                    let active = status == current;
                                    let label = format!(
                                        "{} {}{}",
                                        status_glyph(status),
                                        status.label(),
                                        if active { "  ✔" } else { "" }
                                    );
                                    let mut text = egui::RichText::new(label)
                                        .color(status_color(&palette, status));
                                    if active {
                                        text = text.strong();
                                    }
                                    let row = egui::Button::new(text)
                                        .fill(if active {
                                            palette.primary.gamma_multiply(0.12)
                                        } else {
                                            egui::Color32::TRANSPARENT
                                        })
                                        .min_size(egui::vec2(placement.width - 12.0, 26.0));
                                    if ui.add(row).clicked() {
                                        committed = Some(status);
                                    }
                                }
                            });
                    });
            });

        // Next frame positions with the real height instead of the estimate.
        let menu_rect = area.response.rect;
        state.measured_height = Some(menu_rect.height());
        state.orientation = placement.orientation;

        if let Some(status) = committed {
            // Selection commit: record the draft and close.
            self.users.set_draft(user.user_id.clone(), status);
            return;
        }

        let pressed_outside = ctx.input(|i| {
            i.pointer.any_pressed()
                && i.pointer
                    .interact_pos()
                    .map(|pos| !menu_rect.contains(pos) && !state.anchor.contains(pos))
                    .unwrap_or(false)
        });
        if pressed_outside {
            return;
        }

        self.status_menu = Some(state);
    }

    fn open_document_url(&mut self, url: &str) {
        #[cfg(target_os = "windows")]
        let result = std::process::Command::new("cmd")
            .args(["/C", "start", "", url])
            .spawn();

        #[cfg(target_os = "macos")]
        let result = std::process::Command::new("open").arg(url).spawn();

        #[cfg(all(unix, not(target_os = "macos")))]
        let result = std::process::Command::new("xdg-open").arg(url).spawn();

        match result {
            Ok(_) => self.status = "Opened document in browser".to_string(),
            Err(err) => self.status = format!("Failed to open document: {err}"),
        }
    }
}

fn initials(name: &str) -> String {
    let picked: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .collect();
    if picked.is_empty() {
        "?".to_string()
    } else {
        picked.to_uppercase()
    }
}

fn activity_cell(
    ui: &mut egui::Ui,
    palette: &ConsolePalette,
    width: f32,
    glyph: &str,
    label: &str,
    value: u32,
) {
    egui::Frame::NONE
        .fill(palette.app_background)
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(8, 6))
        .show(ui, |ui| {
            ui.set_width(width);
            ui.vertical_centered(|ui| {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(glyph).size(11.0));
                    ui.label(
                        egui::RichText::new(value.to_string())
                            .color(palette.primary)
                            .strong(),
                    );
                });
                ui.small(egui::RichText::new(label).color(palette.hint_text));
            });
        });
}

fn section_frame(
    ui: &mut egui::Ui,
    palette: &ConsolePalette,
    title: &str,
    add_contents: impl FnOnce(&mut egui::Ui),
) {
    egui::Frame::NONE
        .fill(palette.surface)
        .stroke(egui::Stroke::new(1.0, palette.border))
        .corner_radius(10.0)
        .inner_margin(egui::Margin::symmetric(14, 12))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new(title).strong().size(15.0));
            ui.add_space(8.0);
            add_contents(ui);
        });
}

impl eframe::App for AdminGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.tick = self.tick.wrapping_add(1);

        self.process_ui_events();
        self.apply_style_if_needed(ctx);

        match self.view_state {
            AppViewState::Login => self.show_login_screen(ctx),
            AppViewState::Main => self.show_main_workspace(ctx),
        }

        self.show_toasts(ctx);

        if self.status_menu.is_some() || !self.toasts.is_empty() {
            ctx.request_repaint_after(std::time::Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.settings.prefer_table_view = self.users.view_mode() == ViewMode::Table;
        if let Ok(serialized) = serde_json::to_string(&self.settings) {
            storage.set_string(SETTINGS_STORAGE_KEY, serialized);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::initials;

    #[test]
    fn initials_take_the_first_two_words() {
        assert_eq!(initials("Asha Verma"), "AV");
        assert_eq!(initials("Bilal"), "B");
        assert_eq!(initials("jay dev anand"), "JD");
        assert_eq!(initials(""), "?");
    }
}
