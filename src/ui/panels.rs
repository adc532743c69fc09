use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use customer_dashboard::data::filter::Selection;

use crate::state::{AppState, View};

// ---------------------------------------------------------------------------
// Left side panel – navigation and filter widgets
// ---------------------------------------------------------------------------

/// Render the left panel: view selector, then the filters of the dashboard.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Menu");
    ui.radio_value(&mut state.view, View::Dashboard, "Dashboard");
    ui.radio_value(&mut state.view, View::Prediction, "Predict Satisfaction");
    ui.separator();

    if state.view != View::Dashboard {
        return;
    }

    ui.heading("Filter Data");

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong("City");
            if let Some(city) = single_choice(ui, "city", &state.criteria.city, &state.city_choices)
            {
                state.set_city(city);
            }
            ui.add_space(8.0);

            gender_filter(ui, state);
            ui.add_space(8.0);

            ui.strong("Membership Type");
            if let Some(membership) = single_choice(
                ui,
                "membership",
                &state.criteria.membership,
                &state.membership_choices,
            ) {
                state.set_membership(membership);
            }
        });
}

/// Combo box with "All" followed by each choice. Returns the new selection
/// when the user picked a different one.
fn single_choice(
    ui: &mut Ui,
    id: &str,
    current: &Selection,
    choices: &[String],
) -> Option<Selection> {
    let mut picked = None;
    egui::ComboBox::from_id_salt(id)
        .selected_text(current.label())
        .show_ui(ui, |ui: &mut Ui| {
            if ui
                .selectable_label(*current == Selection::All, "All")
                .clicked()
            {
                picked = Some(Selection::All);
            }
            for choice in choices {
                let is_current = matches!(current, Selection::Only(v) if v == choice);
                if ui.selectable_label(is_current, choice.as_str()).clicked() {
                    picked = Some(Selection::Only(choice.clone()));
                }
            }
        });
    picked.filter(|p| p != current)
}

/// Multi-select of genders, all checked by default.
fn gender_filter(ui: &mut Ui, state: &mut AppState) {
    let n_selected = state.criteria.genders.len();
    let n_total = state.gender_choices.len();
    ui.strong(format!("Gender  ({n_selected}/{n_total})"));

    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all_genders();
        }
        if ui.small_button("None").clicked() {
            state.select_no_genders();
        }
    });

    let mut toggled = None;
    for gender in &state.gender_choices {
        let mut checked = state.criteria.genders.contains(gender);
        if ui.checkbox(&mut checked, gender.as_str()).changed() {
            toggled = Some(gender.clone());
        }
    }
    if let Some(gender) = toggled {
        state.toggle_gender(&gender);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open dataset…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} customers loaded, {} shown",
            state.session.table().len(),
            state.dashboard.filtered.len()
        ));

        ui.separator();

        if !state.session.artifacts().is_loaded() {
            ui.label(RichText::new("prediction disabled").color(Color32::YELLOW));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open customer data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open_dataset(&path);
    }
}
