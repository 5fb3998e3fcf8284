use egui::{Frame, Image, Margin, RichText, Ui};
use egui_dropdown::DropDownBox;
use egui_plot::{Line, PlotPoints, Points};
use velocity::model::CircuitData;
use velocity::projection::{FeaturedRecordView, format_lap_time, history_series};
use velocity::state::{Action, DashboardState};

use super::{DashboardApp, PALETTE_GREY, PALETTE_INK, PALETTE_MIST, PALETTE_RED};

impl DashboardApp {
    pub(crate) fn circuit_view(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(Frame::new().fill(egui::Color32::WHITE).inner_margin(Margin::same(24)))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.label(
                            RichText::new("Circuits & Telemetry")
                                .italics()
                                .size(28.)
                                .color(PALETTE_INK),
                        );
                        ui.label(
                            RichText::new("WORLD CLASS PROVING GROUNDS")
                                .size(10.)
                                .color(PALETTE_GREY),
                        );
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        self.circuit_selector(ui);
                        ui.label(RichText::new("SELECT TRACK").size(9.).color(PALETTE_GREY));
                    });
                });
                ui.separator();

                egui::ScrollArea::vertical().show(ui, |ui| match self.state.selected_circuit() {
                    Some(circuit) => {
                        circuit_details(ui, circuit);
                        if self.app_config.show_history_chart {
                            ui.add_space(24.);
                            history_chart(ui, circuit);
                        }
                    }
                    None => {
                        ui.add_space(24.);
                        ui.label(RichText::new("No circuit data available").color(PALETTE_GREY));
                    }
                });
            });
    }

    fn circuit_selector(&mut self, ui: &mut Ui) {
        let previous_choice = self.circuit_choice.clone();
        let names = self.state.circuits().iter().map(|c| c.name.as_str());
        let response = ui.add(
            DropDownBox::from_iter(
                names,
                "circuit_dropbox",
                &mut self.circuit_choice,
                |ui, text| ui.selectable_label(false, text),
            )
            .filter_by_input(false),
        );

        if previous_choice != self.circuit_choice {
            // unknown names leave the selection untouched
            self.state
                .apply(Action::SelectCircuit(self.circuit_choice.clone()));
        }
        if let Some(name) = settled_choice(&self.state, &self.circuit_choice, response.has_focus())
        {
            self.circuit_choice = name;
        }
    }
}

/// Text the selector should show once the user stops editing it, when the
/// typed text does not name the selected circuit.
fn settled_choice(state: &DashboardState, choice: &str, editing: bool) -> Option<String> {
    if editing {
        return None;
    }
    let selected = state.selected_circuit().map(|c| c.name.as_str()).unwrap_or_default();
    (selected != choice).then(|| selected.to_string())
}

fn circuit_details(ui: &mut Ui, circuit: &CircuitData) {
    let record = FeaturedRecordView::of(Some(circuit));

    ui.columns(2, |columns| {
        Frame::new()
            .fill(PALETTE_MIST)
            .inner_margin(Margin::same(24))
            .show(&mut columns[0], |ui| {
                ui.set_min_height(300.);
                match circuit.track_map_url.as_deref().filter(|u| !u.trim().is_empty()) {
                    Some(url) => {
                        ui.add(
                            Image::new(url.to_string())
                                .max_height(300.)
                                .maintain_aspect_ratio(true),
                        );
                    }
                    None => {
                        ui.centered_and_justified(|ui| {
                            ui.label(
                                RichText::new("LAYOUT TELEMETRY UNAVAILABLE")
                                    .size(10.)
                                    .color(PALETTE_GREY),
                            );
                        });
                    }
                }
            });

        let ui = &mut columns[1];
        ui.label(RichText::new("SPECIFICATIONS").size(10.).strong().color(PALETTE_RED));
        ui.label(
            RichText::new(circuit.name.to_uppercase())
                .strong()
                .italics()
                .size(28.)
                .color(PALETTE_INK),
        );
        ui.label(RichText::new(&circuit.location).color(PALETTE_GREY));
        ui.add_space(16.);

        egui::Grid::new("circuit_specs")
            .num_columns(2)
            .spacing([32., 16.])
            .show(ui, |ui| {
                spec_cell(ui, "LENGTH", RichText::new(&circuit.length).strong().size(20.));
                spec_cell(
                    ui,
                    "LAP RECORD",
                    RichText::new(record.time.unwrap_or("-"))
                        .strong()
                        .size(20.)
                        .color(PALETTE_RED),
                );
                ui.end_row();
                spec_cell(
                    ui,
                    "DRIVER",
                    RichText::new(record.driver.unwrap_or("-").to_uppercase()).strong(),
                );
                spec_cell(
                    ui,
                    "YEAR",
                    RichText::new(record.year.map(|y| y.to_string()).unwrap_or("-".to_string()))
                        .strong(),
                );
                ui.end_row();
            });
    });
}

fn spec_cell(ui: &mut Ui, title: &str, value: RichText) {
    ui.vertical(|ui| {
        ui.label(RichText::new(title).size(9.).color(PALETTE_GREY));
        ui.label(value);
    });
}

fn history_chart(ui: &mut Ui, circuit: &CircuitData) {
    ui.label(RichText::new("EFFICIENCY EVOLUTION").strong().color(PALETTE_INK));
    ui.label(
        RichText::new("HISTORIC PERFORMANCE METRICS")
            .size(10.)
            .color(PALETTE_GREY),
    );

    let series = history_series(circuit);
    if series.is_empty() {
        ui.label(RichText::new("No historic lap data").color(PALETTE_GREY));
        return;
    }

    egui_plot::Plot::new(format!("history_{}", circuit.name))
        .height(260.)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show_grid(false)
        .label_formatter(|_name, value| {
            format!("{:.0}: {}", value.x, format_lap_time(value.y))
        })
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new("Lap time", PlotPoints::new(series.clone()))
                    .color(PALETTE_RED)
                    .width(2.),
            );
            plot_ui.points(
                Points::new("Season", PlotPoints::new(series))
                    .color(PALETTE_INK)
                    .radius(3.),
            );
        });
}
