use std::sync::Arc;

use crate::callbacks::{CallbackRegistry, ChartDataset, InputId, Inputs, OutputId};
use crate::color::ColorSequence;
use crate::config::DashboardConfig;
use crate::data::aggregate::{PayloadRange, SiteSelection};
use crate::data::model::LaunchTable;
use crate::figure::{pie_figure, scatter_figure, PieFigure, ScatterFigure};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Loaded launch table (None until a file loads). Replaced wholesale on
    /// reload, never mutated.
    pub table: Option<Arc<LaunchTable>>,

    /// Current widget values.
    pub inputs: Inputs,

    /// Filter text typed into the site dropdown.
    pub site_search: String,

    pub registry: CallbackRegistry,

    /// Latest figures produced by the callbacks.
    pub pie: Option<PieFigure>,
    pub scatter: Option<ScatterFigure>,

    pub colors: ColorSequence,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        let colors = ColorSequence::from_hex(&config.palette);
        Self {
            config,
            table: None,
            inputs: Inputs {
                site: SiteSelection::All,
                payload: PayloadRange::new(0.0, 0.0),
            },
            site_search: String::new(),
            registry: CallbackRegistry::dashboard(),
            pie: None,
            scatter: None,
            colors,
            status_message: None,
        }
    }

    /// Ingest a newly loaded table, reset the controls and render once.
    pub fn set_table(&mut self, table: LaunchTable) {
        let table = Arc::new(table);
        self.inputs = Inputs::for_table(&table);
        let results = self.registry.dispatch_all(&table, &self.inputs);
        self.table = Some(table);
        self.apply(results);
        self.status_message = None;
    }

    /// Dropdown changed.
    pub fn set_site(&mut self, site: SiteSelection) {
        if self.inputs.site != site {
            self.inputs.site = site;
            self.fire(InputId::SiteDropdown);
        }
    }

    /// Slider changed.
    pub fn set_payload_range(&mut self, range: PayloadRange) {
        if self.inputs.payload != range {
            self.inputs.payload = range;
            self.fire(InputId::PayloadSlider);
        }
    }

    fn fire(&mut self, changed: InputId) {
        let Some(table) = &self.table else {
            return;
        };
        let results = self.registry.dispatch(changed, table, &self.inputs);
        self.apply(results);
    }

    fn apply(&mut self, results: Vec<(OutputId, ChartDataset)>) {
        for (output, dataset) in results {
            match (output, dataset) {
                (OutputId::SuccessPie, ChartDataset::Breakdown(b)) => {
                    self.pie = Some(pie_figure(&b, &self.colors));
                }
                (OutputId::PayloadScatter, ChartDataset::Scatter { site, points }) => {
                    let categories = self
                        .table
                        .as_ref()
                        .map(|t| t.booster_categories())
                        .unwrap_or_default();
                    self.scatter =
                        Some(scatter_figure(&site, &points, categories, &self.colors));
                }
                (output, _) => log::warn!("Unexpected dataset shape for {output:?}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LaunchRecord, Outcome};

    fn loaded_state() -> AppState {
        let mut state = AppState::new(DashboardConfig::default());
        state.set_table(LaunchTable::from_records(vec![
            LaunchRecord::new("SiteA", 500.0, "v1.0", Outcome::Success),
            LaunchRecord::new("SiteA", 1500.0, "FT", Outcome::Failure),
            LaunchRecord::new("SiteB", 800.0, "FT", Outcome::Success),
        ]));
        state
    }

    #[test]
    fn loading_renders_both_charts() {
        let state = loaded_state();
        assert_eq!(state.inputs.payload, PayloadRange::new(500.0, 1500.0));
        assert_eq!(state.pie.as_ref().unwrap().total, 2);
        assert_eq!(state.scatter.as_ref().unwrap().point_count(), 3);
    }

    #[test]
    fn site_change_rebuilds_both_figures() {
        let mut state = loaded_state();
        state.set_site(SiteSelection::from_value("SiteA"));

        let pie = state.pie.as_ref().unwrap();
        assert_eq!(pie.title, "Success vs Failure for SiteA");
        assert_eq!(pie.total, 2);
        assert_eq!(state.scatter.as_ref().unwrap().point_count(), 2);
    }

    #[test]
    fn range_change_leaves_pie_alone() {
        let mut state = loaded_state();
        let pie_before = state.pie.clone();
        state.set_payload_range(PayloadRange::new(0.0, 1000.0));

        assert_eq!(state.pie, pie_before);
        assert_eq!(state.scatter.as_ref().unwrap().point_count(), 2);
    }

    #[test]
    fn inputs_without_table_are_recorded_only() {
        let mut state = AppState::new(DashboardConfig::default());
        state.set_site(SiteSelection::from_value("SiteA"));
        assert_eq!(state.inputs.site, SiteSelection::from_value("SiteA"));
        assert!(state.pie.is_none());
    }
}
