use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::{GENDER_HEADER, NumericColumn, PATIENT_ID_HEADER, PatientRecord};
use crate::state::AppState;

/// Every row and column of the filtered view; scaled values when the
/// Min-Max Scaling toggle is on.
pub fn data_table(ui: &mut Ui, state: &AppState) {
    let scaled = state.minmax_scaling;
    let records = if scaled {
        &state.normalized.records
    } else {
        &state.dataset.records
    };
    let rows: Vec<&PatientRecord> = state.view.rows(records).collect();

    if scaled {
        ui.label(RichText::new("Showing min-max scaled values").weak());
    }

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .columns(Column::auto().at_least(80.0), 2 + NumericColumn::ALL.len())
        .max_scroll_height(400.0)
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong(PATIENT_ID_HEADER);
            });
            header.col(|ui| {
                ui.strong(GENDER_HEADER);
            });
            for column in NumericColumn::ALL {
                header.col(|ui| {
                    let label = ui.strong(column.header());
                    if let Some(range) = state.normalized.scaler.range(column) {
                        label.on_hover_text(format!(
                            "Scaled with min {} and max {} over all patients",
                            range.min, range.max
                        ));
                    }
                });
            }
        })
        .body(|body| {
            body.rows(18.0, rows.len(), |mut row| {
                let rec = rows[row.index()];
                row.col(|ui| {
                    ui.label(&rec.patient_id);
                });
                row.col(|ui| {
                    ui.label(&rec.gender);
                });
                for column in NumericColumn::ALL {
                    let value = column.value(rec);
                    row.col(|ui| {
                        ui.label(format_value(value, scaled));
                    });
                }
            });
        });
}

fn format_value(value: f64, scaled: bool) -> String {
    if scaled {
        format!("{value:.3}")
    } else if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}
