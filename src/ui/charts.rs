use eframe::egui::{Align2, Color32, FontId, Pos2, RichText, Sense, Stroke, Ui, Vec2};
use egui_plot::{
    Bar, BarChart, Legend, Line, Plot, PlotPoint, Points, Polygon, Text, VLine,
    uniform_grid_spacer,
};

use crate::color;
use crate::data::model::{NumericColumn, PATIENT_ID_HEADER, PatientRecord};
use crate::state::{AppState, OrbitCamera};
use crate::ui::table;

const CHART_HEIGHT: f32 = 300.0;

// ---------------------------------------------------------------------------
// Main panel
// ---------------------------------------------------------------------------

/// Title, the six charts in fixed order, then the data table.
pub fn dashboard(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Patient Data Dashboard");
    ui.label(format!(
        "Explore trends and correlations in clinical indicators of {} patients.",
        state.dataset.len()
    ));

    section(ui, "Hemoglobin Distribution");
    hemoglobin_histogram(ui, state);

    section(ui, "WBC Count vs Blast Cell %");
    wbc_vs_blast(ui, state);

    section(ui, "3D Scatter: Age, Hemoglobin, Survival Time");
    scatter_3d(ui, state);

    section(ui, "Multivariate: Parallel Coordinates Plot");
    parallel_coordinates(ui, state);

    section(ui, "Correlation Heatmap");
    correlation_heatmap(ui, state);

    section(ui, "Survival Time by Patient");
    survival_by_patient(ui, state);

    section(ui, "Filtered Data Table");
    table::data_table(ui, state);
}

fn section(ui: &mut Ui, title: &str) {
    ui.add_space(16.0);
    ui.label(RichText::new(title).strong().size(16.0));
    ui.separator();
}

// ---------------------------------------------------------------------------
// 1. Histogram
// ---------------------------------------------------------------------------

fn hemoglobin_histogram(ui: &mut Ui, state: &AppState) {
    let bars: Vec<Bar> = state
        .hemoglobin_bins
        .iter()
        .map(|bin| {
            Bar::new(bin.center(), bin.count as f64)
                .width(bin.width())
                .name(format!("{:.2} – {:.2}", bin.start, bin.end))
        })
        .collect();

    Plot::new("hemoglobin_histogram")
        .height(CHART_HEIGHT)
        .x_axis_label(NumericColumn::Hemoglobin.header())
        .y_axis_label("count")
        .include_y(0.0)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(bars)
                    .color(Color32::LIGHT_BLUE)
                    .name("patients"),
            );
        });
}

// ---------------------------------------------------------------------------
// 2. WBC vs Blast scatter
// ---------------------------------------------------------------------------

fn wbc_vs_blast(ui: &mut Ui, state: &AppState) {
    Plot::new("wbc_vs_blast")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(NumericColumn::WbcCount.header())
        .y_axis_label(NumericColumn::BlastCell.header())
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (gender, color) in state.color_map.legend_entries() {
                let points: Vec<[f64; 2]> = state
                    .view
                    .rows(&state.dataset.records)
                    .filter(|r| r.gender == gender)
                    .map(|r| [r.wbc_count, r.blast_cell_pct])
                    .collect();
                if points.is_empty() {
                    continue;
                }
                plot_ui.points(Points::new(points).name(&gender).color(color).radius(4.0));
            }
        });
}

// ---------------------------------------------------------------------------
// 3. 3D scatter (painter-projected)
// ---------------------------------------------------------------------------

const CUBE_EDGES: [([f32; 3], [f32; 3]); 12] = [
    ([-1.0, -1.0, -1.0], [1.0, -1.0, -1.0]),
    ([-1.0, 1.0, -1.0], [1.0, 1.0, -1.0]),
    ([-1.0, -1.0, 1.0], [1.0, -1.0, 1.0]),
    ([-1.0, 1.0, 1.0], [1.0, 1.0, 1.0]),
    ([-1.0, -1.0, -1.0], [-1.0, 1.0, -1.0]),
    ([1.0, -1.0, -1.0], [1.0, 1.0, -1.0]),
    ([-1.0, -1.0, 1.0], [-1.0, 1.0, 1.0]),
    ([1.0, -1.0, 1.0], [1.0, 1.0, 1.0]),
    ([-1.0, -1.0, -1.0], [-1.0, -1.0, 1.0]),
    ([1.0, -1.0, -1.0], [1.0, -1.0, 1.0]),
    ([-1.0, 1.0, -1.0], [-1.0, 1.0, 1.0]),
    ([1.0, 1.0, -1.0], [1.0, 1.0, 1.0]),
];

/// Rotate a point of the [-1,1]^3 cube by the camera and drop it onto the
/// screen. Returns the screen position and its depth (larger is farther).
fn project(camera: OrbitCamera, center: Pos2, scale: f32, p: [f32; 3]) -> (Pos2, f32) {
    let [x, y, z] = p;
    let (sy, cy) = camera.yaw.sin_cos();
    let (sp, cp) = camera.pitch.sin_cos();

    // yaw about the vertical axis, then pitch about the screen x axis
    let xr = x * cy - y * sy;
    let yr = x * sy + y * cy;
    let depth = yr * cp - z * sp;
    let up = yr * sp + z * cp;

    (Pos2::new(center.x + xr * scale, center.y - up * scale), depth)
}

/// Place `v` within `[lo, hi]` onto [-1, 1]; a flat range sits at 0.
fn to_cube(v: f64, (lo, hi): (f64, f64)) -> f32 {
    let span = hi - lo;
    if span.abs() < f64::EPSILON {
        0.0
    } else {
        ((v - lo) / span * 2.0 - 1.0) as f32
    }
}

fn scatter_3d(ui: &mut Ui, state: &mut AppState) {
    let axes = [
        NumericColumn::Age,
        NumericColumn::Hemoglobin,
        NumericColumn::SurvivalTime,
    ];
    let ranges: Vec<(f64, f64)> = axes
        .iter()
        .map(|&c| value_range(&state.view.column(&state.dataset, c)))
        .collect();

    let text_color = ui.visuals().text_color();
    let size = Vec2::new(ui.available_width(), CHART_HEIGHT + 100.0);
    let (response, painter) = ui.allocate_painter(size, Sense::drag());
    if response.dragged() {
        let delta = response.drag_delta();
        state.camera.rotate(delta.x, delta.y);
    }

    let rect = response.rect;
    let camera = state.camera;
    let center = rect.center();
    let scale = rect.width().min(rect.height()) * 0.3;
    let font = FontId::proportional(12.0);

    for (a, b) in CUBE_EDGES {
        let (pa, _) = project(camera, center, scale, a);
        let (pb, _) = project(camera, center, scale, b);
        painter.line_segment([pa, pb], Stroke::new(1.0, Color32::from_gray(110)));
    }

    let axis_ends = [[1.25, -1.0, -1.0], [-1.0, 1.25, -1.0], [-1.0, -1.0, 1.25]];
    for ((column, end), (lo, hi)) in axes.iter().zip(axis_ends).zip(&ranges) {
        let (pos, _) = project(camera, center, scale, end);
        painter.text(
            pos,
            Align2::CENTER_CENTER,
            format!("{} ({lo:.0}–{hi:.0})", column.short_label()),
            font.clone(),
            text_color,
        );
    }

    let mut projected: Vec<(Pos2, f32, Color32)> = state
        .view
        .rows(&state.dataset.records)
        .map(|r| {
            let p = [
                to_cube(r.age, ranges[0]),
                to_cube(r.hemoglobin, ranges[1]),
                to_cube(r.survival_months, ranges[2]),
            ];
            let (pos, depth) = project(camera, center, scale, p);
            (pos, depth, state.color_map.color_for(&r.gender))
        })
        .collect();
    // far points first so near ones are drawn on top
    projected.sort_by(|a, b| b.1.total_cmp(&a.1));
    for (pos, _, color) in projected {
        painter.circle_filled(pos, 4.0, color);
    }

    for (i, (label, color)) in state.color_map.legend_entries().into_iter().enumerate() {
        let y = rect.top() + 12.0 + i as f32 * 16.0;
        painter.circle_filled(Pos2::new(rect.right() - 96.0, y), 4.0, color);
        painter.text(
            Pos2::new(rect.right() - 86.0, y),
            Align2::LEFT_CENTER,
            label,
            font.clone(),
            text_color,
        );
    }

    ui.label(RichText::new("Drag to rotate").weak().small());
}

// ---------------------------------------------------------------------------
// 4. Parallel coordinates
// ---------------------------------------------------------------------------

/// Place `v` within `[lo, hi]` onto [0, 1]; a flat range sits mid-axis.
fn to_axis(v: f64, (lo, hi): (f64, f64)) -> f64 {
    let span = hi - lo;
    if span.abs() < f64::EPSILON {
        0.5
    } else {
        (v - lo) / span
    }
}

fn parallel_coordinates(ui: &mut Ui, state: &AppState) {
    let columns = NumericColumn::ALL;
    let ranges: Vec<(f64, f64)> = columns
        .iter()
        .map(|&c| value_range(&state.view.column(&state.dataset, c)))
        .collect();
    let (survival_lo, survival_hi) =
        value_range(&state.view.column(&state.dataset, NumericColumn::SurvivalTime));
    let labels: Vec<&'static str> = columns.iter().map(|c| c.short_label()).collect();

    Plot::new("parallel_coordinates")
        .height(CHART_HEIGHT)
        .show_grid(false)
        .show_axes([true, false])
        .include_y(-0.12)
        .include_y(1.12)
        .allow_scroll(false)
        .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 1.0, 1.0]))
        .x_axis_formatter(move |mark, _range| axis_label(&labels, mark.value))
        .show(ui, |plot_ui| {
            for (i, &(lo, hi)) in ranges.iter().enumerate() {
                let x = i as f64;
                plot_ui.vline(VLine::new(x).color(Color32::GRAY).width(1.0));
                plot_ui.text(Text::new(PlotPoint::new(x, 1.07), format!("{hi:.1}")));
                plot_ui.text(Text::new(PlotPoint::new(x, -0.07), format!("{lo:.1}")));
            }

            for rec in state.view.rows(&state.dataset.records) {
                let points: Vec<[f64; 2]> = columns
                    .iter()
                    .zip(&ranges)
                    .enumerate()
                    .map(|(i, (c, &range))| [i as f64, to_axis(c.value(rec), range)])
                    .collect();
                let color = color::sequential(rec.survival_months, survival_lo, survival_hi);
                plot_ui.line(Line::new(points).color(color).width(1.5));
            }
        });

    ui.label(
        RichText::new(format!(
            "Line colour: {} from {survival_lo:.0} (purple) to {survival_hi:.0} (yellow)",
            NumericColumn::SurvivalTime.header()
        ))
        .weak()
        .small(),
    );
}

// ---------------------------------------------------------------------------
// 5. Correlation heatmap
// ---------------------------------------------------------------------------

fn correlation_heatmap(ui: &mut Ui, state: &AppState) {
    let matrix = &state.correlation;
    let n = matrix.len();
    let x_labels: Vec<&'static str> = matrix.columns.iter().map(|c| c.short_label()).collect();
    // rows are drawn top-down, so the y axis reads the labels reversed
    let y_labels: Vec<&'static str> = x_labels.iter().rev().copied().collect();

    Plot::new("correlation_heatmap")
        .height(CHART_HEIGHT + 60.0)
        .data_aspect(1.0)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 1.0, 1.0]))
        .y_grid_spacer(uniform_grid_spacer(|_| [1.0, 1.0, 1.0]))
        .x_axis_formatter(move |mark, _range| axis_label(&x_labels, mark.value))
        .y_axis_formatter(move |mark, _range| axis_label(&y_labels, mark.value))
        .show(ui, |plot_ui| {
            for i in 0..n {
                for j in 0..n {
                    let x = j as f64;
                    let y = (n - 1 - i) as f64;
                    let r = matrix.get(i, j);

                    let fill = r.map(color::diverging).unwrap_or(Color32::DARK_GRAY);
                    let cell = vec![
                        [x - 0.5, y - 0.5],
                        [x + 0.5, y - 0.5],
                        [x + 0.5, y + 0.5],
                        [x - 0.5, y + 0.5],
                    ];
                    plot_ui.polygon(
                        Polygon::new(cell)
                            .fill_color(fill)
                            .stroke(Stroke::new(1.0, Color32::WHITE)),
                    );

                    let label = r.map_or_else(|| "NaN".to_string(), |v| format!("{v:.2}"));
                    let ink = if r.is_some_and(|v| v.abs() > 0.6) {
                        Color32::WHITE
                    } else {
                        Color32::BLACK
                    };
                    plot_ui.text(Text::new(PlotPoint::new(x, y), RichText::new(label).color(ink)));
                }
            }
        });

    ui.label(
        RichText::new("Pearson correlation, blue −1 · white 0 · red +1")
            .weak()
            .small(),
    );
}

// ---------------------------------------------------------------------------
// 6. Survival time per patient
// ---------------------------------------------------------------------------

fn survival_by_patient(ui: &mut Ui, state: &AppState) {
    let rows: Vec<&PatientRecord> = state.view.rows(&state.dataset.records).collect();
    let ids: Vec<String> = rows.iter().map(|r| r.patient_id.clone()).collect();

    Plot::new("survival_by_patient")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(PATIENT_ID_HEADER)
        .y_axis_label(NumericColumn::SurvivalTime.header())
        .include_y(0.0)
        .allow_scroll(false)
        .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 1.0, 1.0]))
        .x_axis_formatter(move |mark, _range| axis_label(&ids, mark.value))
        .show(ui, |plot_ui| {
            for (gender, color) in state.color_map.legend_entries() {
                let bars: Vec<Bar> = rows
                    .iter()
                    .enumerate()
                    .filter(|(_, r)| r.gender == gender)
                    .map(|(i, r)| {
                        Bar::new(i as f64, r.survival_months)
                            .width(0.8)
                            .name(&r.patient_id)
                    })
                    .collect();
                if bars.is_empty() {
                    continue;
                }
                plot_ui.bar_chart(BarChart::new(bars).color(color).name(&gender));
            }
        });
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Min and max of `values`; an empty slice gives (0, 1).
fn value_range(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold(None, |acc: Option<(f64, f64)>, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
        .unwrap_or((0.0, 1.0))
}

/// Category label for an integer grid mark, blank elsewhere.
fn axis_label<S: AsRef<str>>(labels: &[S], value: f64) -> String {
    let idx = value.round();
    if (value - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels
        .get(idx as usize)
        .map(|s| s.as_ref().to_string())
        .unwrap_or_default()
}
