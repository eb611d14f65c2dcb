use std::f64::consts::FRAC_PI_2;

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{GridMark, Legend, Line, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::figure::{hover_text, outcome_tick_label, PieFigure, PieSlice, ScatterFigure};

// ---------------------------------------------------------------------------
// Pie chart (success breakdown)
// ---------------------------------------------------------------------------

/// Arc points per quarter turn.
const ARC_SEGMENTS: usize = 24;

/// Render the success pie. egui_plot has no pie primitive, so each slice is
/// filled as convex wedges of at most a quarter turn.
pub fn pie_chart(ui: &mut Ui, figure: &PieFigure, height: f32) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(&figure.title);
    });

    if figure.total == 0 {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label(figure.empty_message);
        });
        return;
    }

    Plot::new("success_pie")
        .height(height)
        .legend(Legend::default())
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_x(false)
        .show_y(false)
        .include_x(-1.4)
        .include_x(1.4)
        .include_y(-1.1)
        .include_y(1.1)
        .show(ui, |plot_ui| {
            for slice in figure.slices.iter().filter(|s| s.fraction > 0.0) {
                for wedge in wedges(slice) {
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(wedge))
                            .name(&slice.label)
                            .fill_color(slice.color)
                            .stroke(Stroke::new(1.0, slice.color)),
                    );
                }
            }

            // Separators between slices.
            if figure.slices.iter().filter(|s| s.fraction > 0.0).count() > 1 {
                for slice in &figure.slices {
                    let (x, y) = (slice.start_angle.cos(), slice.start_angle.sin());
                    plot_ui.line(
                        Line::new(PlotPoints::from(vec![[0.0, 0.0], [x, y]]))
                            .color(Color32::WHITE)
                            .width(2.0),
                    );
                }
            }

            for slice in figure.slices.iter().filter(|s| s.fraction > 0.0) {
                let mid = slice.mid_angle();
                let pos = PlotPoint::new(0.65 * mid.cos(), 0.65 * mid.sin());
                plot_ui.text(Text::new(
                    pos,
                    RichText::new(format!("{:.1}%", slice.fraction * 100.0))
                        .color(Color32::BLACK)
                        .strong(),
                ));
            }
        });
}

/// Split a slice into wedges no wider than a quarter turn, each one a
/// closed polygon starting at the centre.
fn wedges(slice: &PieSlice) -> Vec<Vec<[f64; 2]>> {
    let sweep = slice.start_angle - slice.end_angle;
    // Tolerance keeps a full turn at four wedges despite rounding.
    let n_wedges = (sweep / FRAC_PI_2 - 1e-9).ceil().max(1.0) as usize;
    let step = sweep / n_wedges as f64;

    (0..n_wedges)
        .map(|w| {
            let from = slice.start_angle - step * w as f64;
            let mut pts = Vec::with_capacity(ARC_SEGMENTS + 2);
            pts.push([0.0, 0.0]);
            for k in 0..=ARC_SEGMENTS {
                let a = from - step * k as f64 / ARC_SEGMENTS as f64;
                pts.push([a.cos(), a.sin()]);
            }
            pts
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Scatter chart (payload vs outcome)
// ---------------------------------------------------------------------------

/// Render payload against outcome, one coloured series per booster category.
pub fn scatter_chart(ui: &mut Ui, figure: &ScatterFigure) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(&figure.title);
    });

    let hover_figure = figure.clone();

    Plot::new("payload_scatter")
        .legend(Legend::default())
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("class")
        .y_axis_formatter(|mark: GridMark, _range| {
            outcome_tick_label(mark.value)
                .map(String::from)
                .unwrap_or_default()
        })
        .include_y(-0.25)
        .include_y(1.25)
        .include_x(0.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .label_formatter(move |name, value| {
            hover_figure
                .nearest(name, value.x, value.y)
                .map(|p| hover_text(name, p))
                .unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            for series in &figure.series {
                let points: PlotPoints = series
                    .points
                    .iter()
                    .map(|p| [p.payload_mass_kg, f64::from(p.outcome.class())])
                    .collect();

                plot_ui.points(
                    Points::new(points)
                        .name(&series.category)
                        .color(series.color)
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(5.0),
                );
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slice(fraction: f64) -> PieSlice {
        PieSlice {
            label: "A".into(),
            value: 1,
            fraction,
            start_angle: FRAC_PI_2,
            end_angle: FRAC_PI_2 - fraction * std::f64::consts::TAU,
            color: Color32::GRAY,
        }
    }

    #[test]
    fn full_circle_is_four_quarter_wedges() {
        let w = wedges(&slice(1.0));
        assert_eq!(w.len(), 4);
        assert!(w.iter().all(|pts| pts.len() == ARC_SEGMENTS + 2));
        assert_eq!(w[0][0], [0.0, 0.0]);
    }

    #[test]
    fn small_slice_is_one_wedge() {
        let w = wedges(&slice(0.1));
        assert_eq!(w.len(), 1);
        // Starts at twelve o'clock.
        let first = w[0][1];
        assert!(first[0].abs() < 1e-12 && (first[1] - 1.0).abs() < 1e-12);
    }
}
