use eframe::egui;

use crate::config::DashboardConfig;
use crate::state::AppState;
use crate::ui::{charts, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SalaryDashboardApp {
    pub state: AppState,
}

impl SalaryDashboardApp {
    /// Build the app and load the configured dataset once.
    pub fn new(config: DashboardConfig) -> Self {
        let mut state = AppState::new(config);
        state.load_configured_source();
        Self { state }
    }
}

impl eframe::App for SalaryDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: metrics, charts, detail table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("🎲 Data Area Salary Analysis Dashboard");
                ui.label(
                    "Explore salary data in the data area over recent years. \
                     Use the filters on the left to refine your analysis.",
                );

                if self.state.dataset.is_none() {
                    ui.add_space(16.0);
                    ui.label("No dataset loaded. Use File → Open… or File → Reload.");
                    return;
                }

                ui.add_space(8.0);
                ui.strong("General Metrics (Annual Salary in USD)");
                panels::metrics_row(ui, &self.state);

                ui.separator();
                ui.strong("Charts");
                charts::chart_grid(ui, &self.state);

                ui.separator();
                ui.strong("Detailed Data");
                table::detail_table(ui, &self.state);
            });
        });
    }
}
