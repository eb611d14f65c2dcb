use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::Color32;

use crate::color::ColorSequence;
use crate::data::aggregate::{Breakdown, ScatterPoint, SiteSelection};
use crate::data::model::Outcome;

// ---------------------------------------------------------------------------
// Pie figure
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: u64,
    /// Share of the total, 0.0 ..= 1.0.
    pub fraction: f64,
    /// Angles in radians, counter-clockwise from +x. Slices run clockwise
    /// from twelve o'clock, so `end_angle < start_angle`.
    pub start_angle: f64,
    pub end_angle: f64,
    pub color: Color32,
}

impl PieSlice {
    pub fn mid_angle(&self) -> f64 {
        (self.start_angle + self.end_angle) / 2.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieFigure {
    pub title: String,
    pub slices: Vec<PieSlice>,
    pub total: u64,
    /// Shown instead of the pie when `total` is zero.
    pub empty_message: &'static str,
}

/// Lay out a breakdown as pie slices.
pub fn pie_figure(breakdown: &Breakdown, colors: &ColorSequence) -> PieFigure {
    let (title, rows): (String, Vec<(String, u64)>) = match breakdown {
        Breakdown::BySite(rows) => (
            "Total Successful Launches by Site".to_string(),
            rows.clone(),
        ),
        Breakdown::ByOutcome { site, counts } => (
            format!("Success vs Failure for {site}"),
            counts
                .iter()
                .map(|(outcome, n)| (outcome.label().to_string(), *n))
                .collect(),
        ),
    };

    let total = breakdown.total();
    let empty_message = match breakdown {
        Breakdown::BySite(_) if breakdown.is_empty() => "No launches loaded.",
        Breakdown::BySite(_) => "No successful launches.",
        Breakdown::ByOutcome { .. } => "No launches match this site.",
    };
    let mut angle = FRAC_PI_2;
    let slices = rows
        .into_iter()
        .enumerate()
        .map(|(i, (label, value))| {
            let fraction = if total == 0 {
                0.0
            } else {
                value as f64 / total as f64
            };
            let start_angle = angle;
            angle -= fraction * TAU;
            PieSlice {
                label,
                value,
                fraction,
                start_angle,
                end_angle: angle,
                color: colors.color_at(i),
            }
        })
        .collect();

    PieFigure {
        title,
        slices,
        total,
        empty_message,
    }
}

// ---------------------------------------------------------------------------
// Scatter figure
// ---------------------------------------------------------------------------

/// Points sharing one booster category, drawn in one colour.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub category: String,
    pub color: Color32,
    pub points: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterFigure {
    pub title: String,
    pub series: Vec<ScatterSeries>,
}

/// Group scatter points by booster category. Series follow `categories`
/// (the table's booster order) so a category keeps its colour whatever the
/// selection; categories missing from `categories` are appended in order of
/// first appearance.
pub fn scatter_figure(
    site: &SiteSelection,
    points: &[ScatterPoint],
    categories: &[String],
    colors: &ColorSequence,
) -> ScatterFigure {
    let title = match site {
        SiteSelection::All => "Payload vs. Outcome for All Sites".to_string(),
        SiteSelection::Site(s) => format!("Payload vs. Outcome for {s}"),
    };

    let mut order: Vec<&str> = categories.iter().map(String::as_str).collect();
    for point in points {
        if !order.contains(&point.booster_category.as_str()) {
            order.push(&point.booster_category);
        }
    }

    let series = order
        .iter()
        .enumerate()
        .filter_map(|(i, category)| {
            let members: Vec<ScatterPoint> = points
                .iter()
                .filter(|p| p.booster_category == *category)
                .cloned()
                .collect();
            (!members.is_empty()).then(|| ScatterSeries {
                category: category.to_string(),
                color: colors.color_at(i),
                points: members,
            })
        })
        .collect();

    ScatterFigure { title, series }
}

impl ScatterFigure {
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }

    /// The point of series `category` closest to `(payload, class)`.
    pub fn nearest(&self, category: &str, payload: f64, class: f64) -> Option<&ScatterPoint> {
        let series = self.series.iter().find(|s| s.category == category)?;
        series.points.iter().min_by(|a, b| {
            let da = (a.payload_mass_kg - payload).abs() + (f64::from(a.outcome.class()) - class).abs();
            let db = (b.payload_mass_kg - payload).abs() + (f64::from(b.outcome.class()) - class).abs();
            da.total_cmp(&db)
        })
    }
}

/// Y-axis tick text: 0 → Failure, 1 → Success, nothing elsewhere.
pub fn outcome_tick_label(value: f64) -> Option<&'static str> {
    if value == 0.0 {
        Some(Outcome::Failure.label())
    } else if value == 1.0 {
        Some(Outcome::Success.label())
    } else {
        None
    }
}

/// Hover text for one scatter point.
pub fn hover_text(category: &str, point: &ScatterPoint) -> String {
    format!(
        "Booster Version Category={category}\nPayload Mass (kg)={}\nclass={}\nLaunch Site={}",
        point.payload_mass_kg,
        point.outcome.class(),
        point.site
    )
}
