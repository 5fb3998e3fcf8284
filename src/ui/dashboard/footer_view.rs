use egui::{Frame, Margin, RichText};
use velocity::projection::citation_list;

use super::{DashboardApp, PALETTE_GREY, PALETTE_INK, PALETTE_RED};

impl DashboardApp {
    pub(crate) fn footer_view(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("footer")
            .frame(Frame::new().fill(egui::Color32::WHITE).inner_margin(Margin::same(16)))
            .show(ctx, |ui| {
                ui.horizontal_top(|ui| {
                    ui.vertical(|ui| {
                        ui.horizontal(|ui| {
                            ui.label(RichText::new("F1").strong().italics().color(PALETTE_INK));
                            ui.label(RichText::new("VELOCITY").strong().italics().color(PALETTE_RED));
                        });
                        ui.label(
                            RichText::new("PRECISION TELEMETRY")
                                .size(9.)
                                .color(PALETTE_GREY),
                        );
                    });
                    ui.add_space(48.);

                    ui.vertical(|ui| {
                        ui.label(RichText::new("SOURCES").size(10.).strong().color(PALETTE_GREY));
                        let citations =
                            citation_list(self.state.sources(), self.app_config.citation_limit);
                        if citations.is_empty() {
                            ui.label(RichText::new("-").color(PALETTE_GREY));
                        }
                        for citation in citations {
                            match citation.uri {
                                Some(uri) => {
                                    ui.hyperlink_to(citation.label(), uri);
                                }
                                None => {
                                    ui.label(RichText::new(citation.label()).color(PALETTE_INK));
                                }
                            }
                        }
                    });

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                        ui.label(
                            RichText::new("POWERED BY GEMINI AI")
                                .size(9.)
                                .color(PALETTE_GREY),
                        );
                    });
                });
            });
    }
}
