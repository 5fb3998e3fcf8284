mod circuit_view;
pub(crate) mod config;
mod footer_view;
mod standings_view;

use std::time::Duration;

use config::AppConfig;
use egui::{Color32, Frame, Layout, Margin, RichText, Visuals, style::Widgets};
use velocity::FetchSession;
use velocity::state::{DashboardState, Phase};

pub(crate) const REFRESH_RATE_MS: u64 = 100;

pub(crate) const PALETTE_INK: Color32 = Color32::from_rgb(25, 25, 25);
pub(crate) const PALETTE_RED: Color32 = Color32::from_rgb(225, 6, 0);
pub(crate) const PALETTE_PAPER: Color32 = Color32::from_rgb(255, 255, 255);
pub(crate) const PALETTE_MIST: Color32 = Color32::from_rgb(248, 248, 248);
pub(crate) const PALETTE_GREY: Color32 = Color32::from_rgb(156, 163, 175);

const ERROR_BANNER_FILL: Color32 = Color32::from_rgb(254, 242, 242);

/// `DashboardApp` renders the standings and lap record dashboard.
///
/// The app owns the [`DashboardState`] and the [`FetchSession`] that delivers
/// the single startup fetch. Every frame it pumps the session and draws the
/// view for the current phase.
pub(crate) struct DashboardApp {
    state: DashboardState,
    session: FetchSession,
    app_config: AppConfig,
    /// Text of the circuit dropdown
    circuit_choice: String,
}

impl DashboardApp {
    pub(crate) fn new(
        session: FetchSession,
        app_config: AppConfig,
        cc: &eframe::CreationContext<'_>,
    ) -> Self {
        let default_visuals = Visuals {
            dark_mode: false,
            hyperlink_color: PALETTE_RED,
            faint_bg_color: PALETTE_MIST,
            extreme_bg_color: PALETTE_PAPER,
            panel_fill: PALETTE_PAPER,
            window_fill: PALETTE_PAPER,
            widgets: Widgets::light(),
            striped: true,
            ..Visuals::light()
        };
        cc.egui_ctx.set_visuals(default_visuals);
        egui_extras::install_image_loaders(&cc.egui_ctx);

        Self {
            state: DashboardState::new(),
            session,
            app_config,
            circuit_choice: String::new(),
        }
    }

    fn sync_circuit_choice(&mut self) {
        self.circuit_choice = self
            .state
            .selected_circuit()
            .map(|c| c.name.clone())
            .unwrap_or_default();
    }

    fn loading_view(&self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.with_layout(
                Layout::top_down(egui::Align::Center).with_main_align(egui::Align::Center),
                |ui| {
                    ui.add(egui::Spinner::new().size(48.).color(PALETTE_INK));
                    ui.add_space(32.);
                    ui.label(
                        RichText::new("CALIBRATING SYSTEMS")
                            .strong()
                            .size(14.)
                            .color(PALETTE_INK),
                    );
                    ui.add_space(16.);
                    ui.label(
                        RichText::new("ENGINEERING EXCELLENCE SINCE 2024")
                            .size(10.)
                            .color(PALETTE_GREY),
                    );
                },
            );
        });
    }

    fn header_view(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header")
            .min_height(48.)
            .frame(Frame::new().fill(PALETTE_PAPER).inner_margin(Margin::same(12)))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("F1").strong().italics().size(20.).color(PALETTE_INK));
                    ui.label(
                        RichText::new("VELOCITY")
                            .strong()
                            .italics()
                            .size(20.)
                            .color(PALETTE_RED),
                    );
                });

                if let Some(message) = self.state.error() {
                    ui.add_space(8.);
                    Frame::new()
                        .fill(ERROR_BANNER_FILL)
                        .inner_margin(Margin::same(12))
                        .show(ui, |ui| {
                            ui.label(RichText::new(format!("⚠ {}", message)).strong().color(PALETTE_RED));
                        });
                }
            });
    }
}

impl eframe::App for DashboardApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        // a fetch still in flight must not touch the state after this point
        self.session.teardown();
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.session.pump(&mut self.state) {
            self.sync_circuit_choice();
        }

        if matches!(self.state.phase(), Phase::Loading) {
            self.loading_view(ctx);
            ctx.request_repaint_after(Duration::from_millis(self.app_config.refresh_rate_ms));
            return;
        }

        self.header_view(ctx);
        self.footer_view(ctx);
        self.standings_view(ctx);
        self.circuit_view(ctx);
    }
}
