use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::aggregate::{site_options, PayloadRange, SiteSelection};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – selection controls
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Controls");
    ui.separator();

    let Some(table) = state.table.clone() else {
        ui.label("No launch data loaded.");
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Site dropdown ----
            ui.strong("Launch Site");
            let mut value = state.inputs.site.value().to_string();
            egui::ComboBox::from_id_salt("site_dropdown")
                .selected_text(state.inputs.site.to_string())
                .width(ui.available_width())
                .show_ui(ui, |ui: &mut Ui| {
                    ui.add(
                        egui::TextEdit::singleline(&mut state.site_search)
                            .hint_text("Select Launch Site"),
                    );
                    let needle = state.site_search.to_lowercase();
                    for option in site_options(&table) {
                        if !needle.is_empty() && !option.label.to_lowercase().contains(&needle) {
                            continue;
                        }
                        ui.selectable_value(&mut value, option.value, option.label);
                    }
                });
            state.set_site(SiteSelection::from_value(&value));
            ui.separator();

            // ---- Payload range ----
            ui.strong("Payload range (Kg):");
            let slider = state.config.payload_slider;
            let PayloadRange { mut low, mut high } = state.inputs.payload;
            ui.add(
                egui::Slider::new(&mut low, slider.min..=slider.max)
                    .step_by(slider.step)
                    .clamping(egui::SliderClamping::Edits)
                    .trailing_fill(true)
                    .text("min"),
            );
            ui.add(
                egui::Slider::new(&mut high, slider.min..=slider.max)
                    .step_by(slider.step)
                    .clamping(egui::SliderClamping::Edits)
                    .trailing_fill(true)
                    .text("max"),
            );
            ui.horizontal_wrapped(|ui| {
                ui.spacing_mut().item_spacing.x = 6.0;
                for mark in slider.marks() {
                    ui.label(RichText::new(format!("{mark:.0}")).small().weak());
                }
            });
            if ui.small_button("Reset").clicked() {
                if let Some((lo, hi)) = table.payload_bounds() {
                    low = lo;
                    high = hi;
                }
            }
            if low > high {
                ui.label(RichText::new("Minimum exceeds maximum: nothing selected.").weak());
            }
            state.set_payload_range(PayloadRange::new(low, high));
            ui.separator();

            // ---- Breakdown table ----
            breakdown_table(ui, state);
        });
}

/// Label / count / share for each pie slice.
fn breakdown_table(ui: &mut Ui, state: &AppState) {
    let Some(pie) = &state.pie else {
        return;
    };

    ui.strong("Breakdown");
    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::remainder())
        .column(Column::auto())
        .column(Column::auto())
        .header(18.0, |mut header| {
            header.col(|ui| {
                ui.strong("Slice");
            });
            header.col(|ui| {
                ui.strong("Count");
            });
            header.col(|ui| {
                ui.strong("Share");
            });
        })
        .body(|mut body| {
            for slice in &pie.slices {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(RichText::new(&slice.label).color(slice.color));
                    });
                    row.col(|ui| {
                        ui.label(slice.value.to_string());
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.1}%", slice.fraction * 100.0));
                    });
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(table) = &state.table {
            let shown = state.scatter.as_ref().map_or(0, |s| s.point_count());
            ui.label(format!(
                "{} launches loaded, {} in payload selection",
                table.len(),
                shown
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        load_into(state, &path);
    }
}

/// Load `path` and swap it in; on failure keep the current table and show
/// the error.
pub fn load_into(state: &mut AppState, path: &std::path::Path) {
    match crate::data::loader::load_file(path) {
        Ok(table) => {
            if table.is_empty() {
                log::warn!("{} contains no launches", path.display());
            }
            state.set_table(table);
        }
        Err(e) => {
            log::error!("Failed to load file: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
