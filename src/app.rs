use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashApp {
    pub state: AppState,
}

impl LaunchDashApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for LaunchDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: dropdown, slider, breakdown ----
        egui::SidePanel::left("control_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: pie above scatter ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(&self.state.config.title);
            });
            ui.separator();

            let (Some(pie), Some(scatter)) = (&self.state.pie, &self.state.scatter) else {
                ui.centered_and_justified(|ui| {
                    ui.heading("Open a launch file to view charts  (File → Open…)");
                });
                return;
            };

            let pie_height = (ui.available_height() * 0.45).max(160.0);
            plot::pie_chart(ui, pie, pie_height);
            ui.separator();
            plot::scatter_chart(ui, scatter);
        });
    }
}
