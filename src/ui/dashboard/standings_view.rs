use egui::{Frame, Image, Margin, RichText};
use egui_extras::{Column, TableBuilder};
use velocity::projection::{leader, leader_image_url};

use super::{DashboardApp, PALETTE_GREY, PALETTE_INK, PALETTE_MIST, PALETTE_RED};

const ROW_HEIGHT: f32 = 22.;

impl DashboardApp {
    pub(crate) fn standings_view(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("standings")
            .resizable(true)
            .default_width(self.app_config.standings_panel_width)
            .frame(Frame::new().fill(egui::Color32::WHITE).inner_margin(Margin::same(16)))
            .show(ctx, |ui| {
                let standings = self.state.standings();
                let current_leader = leader(standings);

                // leader hero
                Frame::new()
                    .fill(PALETTE_MIST)
                    .inner_margin(Margin::same(12))
                    .show(ui, |ui| {
                        ui.add(
                            Image::new(leader_image_url(current_leader).to_string())
                                .max_height(180.)
                                .maintain_aspect_ratio(true),
                        );
                        ui.label(
                            RichText::new("CHAMPIONSHIP LEADER")
                                .size(9.)
                                .color(PALETTE_GREY),
                        );
                        ui.label(
                            RichText::new(current_leader.map(|d| d.name.as_str()).unwrap_or("-"))
                                .strong()
                                .size(18.)
                                .color(PALETTE_INK),
                        );
                    });

                ui.add_space(16.);
                ui.label(RichText::new("DRIVER STANDINGS").strong().color(PALETTE_INK));
                ui.add_space(8.);

                if standings.is_empty() {
                    ui.label(RichText::new("No standings available").color(PALETTE_GREY));
                    return;
                }

                TableBuilder::new(ui)
                    .striped(true)
                    .column(Column::exact(36.))
                    .column(Column::remainder().at_least(120.))
                    .column(Column::auto().at_least(48.))
                    .column(Column::exact(36.))
                    .header(ROW_HEIGHT, |mut header| {
                        for title in ["POS", "DRIVER", "PTS", "WINS"] {
                            header.col(|ui| {
                                ui.label(RichText::new(title).size(9.).color(PALETTE_GREY));
                            });
                        }
                    })
                    .body(|mut body| {
                        for driver in standings {
                            body.row(ROW_HEIGHT * 1.6, |mut row| {
                                row.col(|ui| {
                                    ui.label(
                                        RichText::new(driver.position.to_string())
                                            .strong()
                                            .color(PALETTE_RED),
                                    );
                                });
                                row.col(|ui| {
                                    ui.vertical(|ui| {
                                        ui.label(RichText::new(&driver.name).strong());
                                        ui.label(
                                            RichText::new(driver.team.to_uppercase())
                                                .size(9.)
                                                .color(PALETTE_GREY),
                                        );
                                    });
                                });
                                row.col(|ui| {
                                    ui.label(RichText::new(format!("{}", driver.points)).strong());
                                });
                                row.col(|ui| {
                                    ui.label(driver.wins.to_string());
                                });
                            });
                        }
                    });
            });
    }
}
