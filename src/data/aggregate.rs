use std::collections::BTreeMap;
use std::fmt;

use super::model::{LaunchRecord, LaunchTable, Outcome};

// ---------------------------------------------------------------------------
// Selection inputs
// ---------------------------------------------------------------------------

/// Dropdown value meaning "every site".
pub const ALL_SITES: &str = "ALL";

/// Which launch site(s) the charts are restricted to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    /// Build a selection from a dropdown value; `"ALL"` is the sentinel.
    pub fn from_value(value: &str) -> Self {
        if value == ALL_SITES {
            SiteSelection::All
        } else {
            SiteSelection::Site(value.to_string())
        }
    }

    /// The dropdown value for this selection; inverse of [`SiteSelection::from_value`].
    pub fn value(&self) -> &str {
        match self {
            SiteSelection::All => ALL_SITES,
            SiteSelection::Site(s) => s.as_str(),
        }
    }

    /// Whether a record at `site` passes this selection.
    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(s) => s == site,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelection::All => write!(f, "All Sites"),
            SiteSelection::Site(s) => write!(f, "{s}"),
        }
    }
}

/// One dropdown entry: display label and the value handed to callbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteOption {
    pub label: String,
    pub value: String,
}

/// "All Sites" followed by every site in order of first appearance.
pub fn site_options(table: &LaunchTable) -> Vec<SiteOption> {
    std::iter::once(SiteOption {
        label: SiteSelection::All.to_string(),
        value: ALL_SITES.to_string(),
    })
    .chain(table.sites().iter().map(|site| SiteOption {
        label: site.clone(),
        value: site.clone(),
    }))
    .collect()
}

/// Closed payload interval `[low, high]` in kilograms. An inverted range
/// (`low > high`) matches nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Boundary-inclusive on both ends.
    pub fn contains(&self, payload: f64) -> bool {
        self.low <= payload && payload <= self.high
    }
}

// ---------------------------------------------------------------------------
// Derived datasets
// ---------------------------------------------------------------------------

/// Pie-shaped result of [`site_outcome_breakdown`].
#[derive(Debug, Clone, PartialEq)]
pub enum Breakdown {
    /// Success count per site, sites in ascending name order.
    BySite(Vec<(String, u64)>),
    /// Launch count per outcome for one site. Outcomes that never occur at
    /// the site are omitted.
    ByOutcome {
        site: String,
        counts: Vec<(Outcome, u64)>,
    },
}

impl Breakdown {
    /// Sum of all slice values.
    pub fn total(&self) -> u64 {
        match self {
            Breakdown::BySite(rows) => rows.iter().map(|(_, n)| n).sum(),
            Breakdown::ByOutcome { counts, .. } => counts.iter().map(|(_, n)| n).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Breakdown::BySite(rows) => rows.is_empty(),
            Breakdown::ByOutcome { counts, .. } => counts.is_empty(),
        }
    }
}

/// One launch retained by [`payload_outcome_scatter`].
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    pub booster_category: String,
    /// Hover metadata only; not a grouping key.
    pub site: String,
}

impl From<&LaunchRecord> for ScatterPoint {
    fn from(rec: &LaunchRecord) -> Self {
        ScatterPoint {
            payload_mass_kg: rec.payload_mass_kg,
            outcome: rec.outcome,
            booster_category: rec.booster_category.clone(),
            site: rec.site.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregations
// ---------------------------------------------------------------------------

/// Pie data for the site dropdown.
///
/// * `All` → successes summed per site.
/// * `Site(s)` → occurrences of each outcome at `s`, most frequent first.
///   An unknown site yields an empty breakdown.
pub fn site_outcome_breakdown(table: &LaunchTable, site: &SiteSelection) -> Breakdown {
    match site {
        SiteSelection::All => {
            let mut per_site: BTreeMap<&str, u64> = BTreeMap::new();
            for rec in table.records() {
                *per_site.entry(rec.site.as_str()).or_default() += u64::from(rec.outcome.class());
            }
            Breakdown::BySite(
                per_site
                    .into_iter()
                    .map(|(s, n)| (s.to_string(), n))
                    .collect(),
            )
        }
        SiteSelection::Site(name) => {
            let mut per_outcome: BTreeMap<Outcome, u64> = BTreeMap::new();
            for rec in table.records().iter().filter(|r| r.site == *name) {
                *per_outcome.entry(rec.outcome).or_default() += 1;
            }
            let mut counts: Vec<(Outcome, u64)> = per_outcome.into_iter().collect();
            // Stable sort keeps class order for equal counts.
            counts.sort_by(|a, b| b.1.cmp(&a.1));
            Breakdown::ByOutcome {
                site: name.clone(),
                counts,
            }
        }
    }
}

/// Scatter data for the payload slider: payload filter first, then site.
pub fn payload_outcome_scatter(
    table: &LaunchTable,
    site: &SiteSelection,
    range: PayloadRange,
) -> Vec<ScatterPoint> {
    table
        .records()
        .iter()
        .filter(|rec| range.contains(rec.payload_mass_kg))
        .filter(|rec| site.matches(&rec.site))
        .map(ScatterPoint::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_table() -> LaunchTable {
        LaunchTable::from_records(vec![
            LaunchRecord::new("SiteA", 500.0, "v1.0", Outcome::Success),
            LaunchRecord::new("SiteA", 1500.0, "FT", Outcome::Failure),
            LaunchRecord::new("SiteB", 800.0, "FT", Outcome::Success),
        ])
    }

    fn larger_table() -> LaunchTable {
        LaunchTable::from_records(vec![
            LaunchRecord::new("CCAFS LC-40", 0.0, "v1.0", Outcome::Failure),
            LaunchRecord::new("CCAFS LC-40", 525.0, "v1.0", Outcome::Failure),
            LaunchRecord::new("CCAFS LC-40", 3170.0, "v1.1", Outcome::Success),
            LaunchRecord::new("VAFB SLC-4E", 500.0, "v1.1", Outcome::Failure),
            LaunchRecord::new("VAFB SLC-4E", 9600.0, "FT", Outcome::Success),
            LaunchRecord::new("KSC LC-39A", 2490.0, "FT", Outcome::Success),
            LaunchRecord::new("KSC LC-39A", 5300.0, "FT", Outcome::Success),
            LaunchRecord::new("KSC LC-39A", 6070.0, "B4", Outcome::Failure),
            LaunchRecord::new("CCAFS SLC-40", 4707.0, "B5", Outcome::Success),
        ])
    }

    // ── site_outcome_breakdown ───────────────────────────────────────────

    #[test]
    fn all_sites_counts_successes_per_site() {
        let breakdown = site_outcome_breakdown(&scenario_table(), &SiteSelection::All);
        assert_eq!(
            breakdown,
            Breakdown::BySite(vec![("SiteA".into(), 1), ("SiteB".into(), 1)])
        );
    }

    #[test]
    fn single_site_counts_each_outcome() {
        let breakdown =
            site_outcome_breakdown(&scenario_table(), &SiteSelection::from_value("SiteA"));
        let Breakdown::ByOutcome { site, counts } = breakdown else {
            panic!("expected outcome breakdown");
        };
        assert_eq!(site, "SiteA");
        assert_eq!(counts, vec![(Outcome::Failure, 1), (Outcome::Success, 1)]);
    }

    #[test]
    fn all_sites_total_equals_table_successes() {
        let table = larger_table();
        let successes = table
            .records()
            .iter()
            .filter(|r| r.outcome == Outcome::Success)
            .count() as u64;

        let breakdown = site_outcome_breakdown(&table, &SiteSelection::All);
        assert_eq!(breakdown.total(), successes);

        let Breakdown::BySite(rows) = breakdown else {
            panic!("expected site breakdown");
        };
        // One group per distinct site, each site exactly once.
        assert_eq!(rows.len(), table.sites().len());
        let names: Vec<&str> = rows.iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(
            names,
            ["CCAFS LC-40", "CCAFS SLC-40", "KSC LC-39A", "VAFB SLC-4E"]
        );
    }

    #[test]
    fn single_site_counts_sum_to_site_records() {
        let table = larger_table();
        for site in table.sites() {
            let expected = table.records().iter().filter(|r| &r.site == site).count() as u64;
            let breakdown = site_outcome_breakdown(&table, &SiteSelection::Site(site.clone()));
            assert_eq!(breakdown.total(), expected, "site {site}");
        }
    }

    #[test]
    fn single_site_orders_by_count_descending() {
        let breakdown =
            site_outcome_breakdown(&larger_table(), &SiteSelection::from_value("KSC LC-39A"));
        let Breakdown::ByOutcome { counts, .. } = breakdown else {
            panic!("expected outcome breakdown");
        };
        assert_eq!(counts, vec![(Outcome::Success, 2), (Outcome::Failure, 1)]);
    }

    /// A site with only successes yields a single slice, no zero-filled failure.
    #[test]
    fn absent_outcome_is_not_zero_filled() {
        let breakdown =
            site_outcome_breakdown(&larger_table(), &SiteSelection::from_value("CCAFS SLC-40"));
        let Breakdown::ByOutcome { counts, .. } = breakdown else {
            panic!("expected outcome breakdown");
        };
        assert_eq!(counts, vec![(Outcome::Success, 1)]);
    }

    #[test]
    fn unknown_site_yields_empty_breakdown() {
        let breakdown =
            site_outcome_breakdown(&larger_table(), &SiteSelection::from_value("Boca Chica"));
        assert!(breakdown.is_empty());
        assert_eq!(breakdown.total(), 0);
    }

    // ── dropdown values ──────────────────────────────────────────────────

    #[test]
    fn options_start_with_all_sentinel() {
        let options = site_options(&scenario_table());
        let values: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, [ALL_SITES, "SiteA", "SiteB"]);
        assert_eq!(options[0].label, "All Sites");
    }

    #[test]
    fn option_values_map_back_to_selections() {
        assert_eq!(SiteSelection::from_value("ALL"), SiteSelection::All);
        for option in site_options(&scenario_table()) {
            let selection = SiteSelection::from_value(&option.value);
            assert_eq!(selection.value(), option.value);
        }
        assert_eq!(
            SiteSelection::from_value("SiteB"),
            SiteSelection::Site("SiteB".into())
        );
    }

    // ── payload_outcome_scatter ──────────────────────────────────────────

    #[test]
    fn scatter_all_sites_filters_by_payload() {
        let points = payload_outcome_scatter(
            &scenario_table(),
            &SiteSelection::All,
            PayloadRange::new(0.0, 1000.0),
        );
        let got: Vec<(&str, f64, Outcome)> = points
            .iter()
            .map(|p| (p.site.as_str(), p.payload_mass_kg, p.outcome))
            .collect();
        assert_eq!(
            got,
            vec![
                ("SiteA", 500.0, Outcome::Success),
                ("SiteB", 800.0, Outcome::Success)
            ]
        );
    }

    #[test]
    fn scatter_bounds_are_inclusive() {
        let table = scenario_table();
        let points =
            payload_outcome_scatter(&table, &SiteSelection::All, PayloadRange::new(500.0, 800.0));
        assert_eq!(points.len(), 2);

        let exact = payload_outcome_scatter(
            &table,
            &SiteSelection::All,
            PayloadRange::new(1500.0, 1500.0),
        );
        assert_eq!(exact.len(), 1);
        assert_eq!(exact[0].outcome, Outcome::Failure);
    }

    #[test]
    fn scatter_inverted_range_is_empty() {
        let points = payload_outcome_scatter(
            &larger_table(),
            &SiteSelection::All,
            PayloadRange::new(10_000.0, 0.0),
        );
        assert!(points.is_empty());
    }

    #[test]
    fn scatter_restricts_to_selected_site() {
        let points = payload_outcome_scatter(
            &larger_table(),
            &SiteSelection::from_value("KSC LC-39A"),
            PayloadRange::new(0.0, 6000.0),
        );
        assert_eq!(points.len(), 2);
        assert!(points.iter().all(|p| p.site == "KSC LC-39A"));
        assert_eq!(points[0].booster_category, "FT");
    }

    #[test]
    fn scatter_unknown_site_is_empty() {
        let points = payload_outcome_scatter(
            &larger_table(),
            &SiteSelection::from_value("Nowhere"),
            PayloadRange::new(0.0, 10_000.0),
        );
        assert!(points.is_empty());
    }

    #[test]
    fn aggregations_are_idempotent() {
        let table = larger_table();
        let site = SiteSelection::from_value("CCAFS LC-40");
        let range = PayloadRange::new(0.0, 4000.0);

        assert_eq!(
            site_outcome_breakdown(&table, &site),
            site_outcome_breakdown(&table, &site)
        );
        assert_eq!(
            payload_outcome_scatter(&table, &site, range),
            payload_outcome_scatter(&table, &site, range)
        );
        // The table itself is untouched.
        assert_eq!(table.len(), 9);
    }
}
