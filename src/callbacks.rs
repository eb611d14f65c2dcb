use crate::data::aggregate::{
    payload_outcome_scatter, site_outcome_breakdown, Breakdown, PayloadRange, ScatterPoint,
    SiteSelection,
};
use crate::data::model::LaunchTable;

// ---------------------------------------------------------------------------
// Input / output identifiers
// ---------------------------------------------------------------------------

/// Widgets whose value can trigger a callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputId {
    SiteDropdown,
    PayloadSlider,
}

/// Charts a callback can produce data for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OutputId {
    SuccessPie,
    PayloadScatter,
}

/// Current value of every input widget, handed to handlers on dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct Inputs {
    pub site: SiteSelection,
    pub payload: PayloadRange,
}

impl Inputs {
    /// Initial control values for a table: all sites, full payload span.
    pub fn for_table(table: &LaunchTable) -> Self {
        let (low, high) = table.payload_bounds().unwrap_or((0.0, 0.0));
        Inputs {
            site: SiteSelection::All,
            payload: PayloadRange::new(low, high),
        }
    }
}

/// Data produced by a callback for one chart.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartDataset {
    Breakdown(Breakdown),
    Scatter {
        site: SiteSelection,
        points: Vec<ScatterPoint>,
    },
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

pub type Handler = fn(&LaunchTable, &Inputs) -> ChartDataset;

/// A handler bound to the inputs it watches and the chart it feeds.
#[derive(Debug, Clone)]
pub struct Callback {
    pub inputs: Vec<InputId>,
    pub output: OutputId,
    pub handler: Handler,
}

/// Explicit input → handler → output wiring. The UI loop calls
/// [`CallbackRegistry::dispatch`] whenever a widget value changes.
#[derive(Debug, Clone, Default)]
pub struct CallbackRegistry {
    callbacks: Vec<Callback>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The dashboard's two callbacks: the pie watches the dropdown, the
    /// scatter watches the dropdown and the payload slider.
    pub fn dashboard() -> Self {
        let mut registry = Self::new();
        registry.register(&[InputId::SiteDropdown], OutputId::SuccessPie, pie_handler);
        registry.register(
            &[InputId::SiteDropdown, InputId::PayloadSlider],
            OutputId::PayloadScatter,
            scatter_handler,
        );
        registry
    }

    pub fn register(&mut self, inputs: &[InputId], output: OutputId, handler: Handler) {
        self.callbacks.push(Callback {
            inputs: inputs.to_vec(),
            output,
            handler,
        });
    }

    /// Run every callback watching `changed`, in registration order.
    pub fn dispatch(
        &self,
        changed: InputId,
        table: &LaunchTable,
        inputs: &Inputs,
    ) -> Vec<(OutputId, ChartDataset)> {
        log::debug!("dispatch {changed:?} with {inputs:?}");
        self.callbacks
            .iter()
            .filter(|cb| cb.inputs.contains(&changed))
            .map(|cb| (cb.output, (cb.handler)(table, inputs)))
            .collect()
    }

    /// Run every callback once; used for the initial render.
    pub fn dispatch_all(&self, table: &LaunchTable, inputs: &Inputs) -> Vec<(OutputId, ChartDataset)> {
        log::debug!("dispatch all with {inputs:?}");
        self.callbacks
            .iter()
            .map(|cb| (cb.output, (cb.handler)(table, inputs)))
            .collect()
    }
}

fn pie_handler(table: &LaunchTable, inputs: &Inputs) -> ChartDataset {
    ChartDataset::Breakdown(site_outcome_breakdown(table, &inputs.site))
}

fn scatter_handler(table: &LaunchTable, inputs: &Inputs) -> ChartDataset {
    ChartDataset::Scatter {
        site: inputs.site.clone(),
        points: payload_outcome_scatter(table, &inputs.site, inputs.payload),
    }
}
