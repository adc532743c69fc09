use eframe::egui;

use customer_dashboard::session::Session;

use crate::state::{AppState, View};
use crate::ui::{dashboard, panels, prediction};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
}

impl DashboardApp {
    pub fn new(session: Session) -> Self {
        Self {
            state: AppState::new(session),
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: navigation and filters ----
        egui::SidePanel::left("side_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: current view ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| match self.state.view {
                View::Dashboard => dashboard::dashboard_view(ui, &self.state),
                View::Prediction => prediction::prediction_view(ui, &mut self.state),
            });
        });
    }
}
