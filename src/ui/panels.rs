use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::gender_options;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Patients");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Gender selector ----
            ui.strong("Select Gender");
            let options = gender_options(&state.dataset);
            let mut chosen = state.selection.gender.clone();
            egui::ComboBox::from_id_salt("gender")
                .selected_text(chosen.to_string())
                .show_ui(ui, |ui: &mut Ui| {
                    for option in &options {
                        let label = option.to_string();
                        ui.selectable_value(&mut chosen, option.clone(), label);
                    }
                });
            state.set_gender(chosen);

            // Colour legend shared by every gender-coloured chart.
            ui.label(RichText::new(format!("Colour by {}", state.color_map.column)).weak());
            ui.horizontal_wrapped(|ui: &mut Ui| {
                for (label, color) in state.color_map.legend_entries() {
                    ui.label(RichText::new(format!("● {label}")).color(color));
                }
            });
            ui.separator();

            // ---- Age range ----
            ui.strong("Age Range");
            let bounds = state.age_bounds;
            if bounds.is_degenerate() {
                ui.label(format!("All patients are {} years old", bounds.min));
            } else {
                let mut lo = state.selection.age.min;
                let mut hi = state.selection.age.max;
                if ui
                    .add(egui::Slider::new(&mut lo, bounds.min..=bounds.max).text("from"))
                    .changed()
                {
                    state.set_age_min(lo);
                }
                if ui
                    .add(egui::Slider::new(&mut hi, bounds.min..=bounds.max).text("to"))
                    .changed()
                {
                    state.set_age_max(hi);
                }
            }
            ui.label(
                RichText::new(format!("Selected: {} years", state.selection.age)).weak(),
            );
            ui.separator();

            ui.label(format!(
                "{} of {} patients match",
                state.view.len(),
                state.dataset.len()
            ));
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

        let source = state
            .source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        ui.label(format!(
            "{source}: {} patients loaded, {} visible",
            state.dataset.len(),
            state.view.len()
        ));

        ui.separator();

        if ui
            .selectable_label(state.minmax_scaling, "Min-Max Scaling")
            .on_hover_text("Show min-max scaled values in the data table")
            .clicked()
        {
            state.minmax_scaling = !state.minmax_scaling;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open patient data")
        .add_filter(
            "Supported files",
            &["xlsx", "xlsm", "xlsb", "xls", "ods", "csv", "parquet", "pq", "json"],
        )
        .add_filter("Spreadsheets", &["xlsx", "xlsm", "xlsb", "xls", "ods"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        state.open_file(&path);
    }
}
