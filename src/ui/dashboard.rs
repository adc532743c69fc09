use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use customer_dashboard::data::model::Table;

use crate::state::AppState;
use crate::ui::charts;

/// Rows of the data table are capped to this height before scrolling.
const TABLE_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// Dashboard view (central panel)
// ---------------------------------------------------------------------------

pub fn dashboard_view(ui: &mut Ui, state: &AppState) {
    ui.heading("E-commerce Customer Behavior Dashboard");

    let data = &state.dashboard;
    ui.push_id("customer_table", |ui: &mut Ui| data_table(ui, &data.filtered));
    ui.label(format!("Rows shown: {}", data.filtered.len()));
    ui.separator();

    ui.heading("Visualisation");
    ui.columns(2, |cols: &mut [Ui]| {
        cols[0].strong("Customers per City");
        charts::bar_chart(
            &mut cols[0],
            "city_counts",
            "City",
            &data.city_counts,
            &state.city_colors,
        );

        cols[1].strong("Membership Type Distribution");
        charts::pie_chart(
            &mut cols[1],
            "membership_counts",
            &data.membership_counts,
            &state.membership_colors,
        );
    });
}

/// Scrollable, striped view of the filtered rows.
fn data_table(ui: &mut Ui, table: &Table) {
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .max_scroll_height(TABLE_HEIGHT)
        .columns(Column::auto().at_least(60.0), table.columns().len())
        .header(20.0, |mut header| {
            for name in table.columns() {
                header.col(|ui: &mut Ui| {
                    ui.strong(name.as_str());
                });
            }
        })
        .body(|body| {
            body.rows(18.0, table.len(), |mut row| {
                let cells = &table.rows()[row.index()];
                for cell in cells {
                    row.col(|ui: &mut Ui| {
                        if !cell.is_null() {
                            ui.label(cell.to_string());
                        }
                    });
                }
            });
        });
}
