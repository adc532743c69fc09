use eframe::egui::{self, Color32, DragValue, RichText, Ui};

use customer_dashboard::predict::pipeline::MAX_DISCOUNT;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Prediction view (central panel)
// ---------------------------------------------------------------------------

pub fn prediction_view(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Customer Satisfaction Prediction");

    let classes = match state.session.artifacts().bundle() {
        Ok(bundle) => bundle.membership_encoder().classes().to_vec(),
        Err(e) => {
            ui.label(
                RichText::new(format!(
                    "Model or encoders are not available ({e}). Train and export them first."
                ))
                .color(Color32::RED),
            );
            return;
        }
    };

    ui.label("Enter customer data to predict satisfaction");
    ui.add_space(6.0);

    egui::Grid::new("prediction_form")
        .num_columns(2)
        .spacing([12.0, 6.0])
        .show(ui, |ui: &mut Ui| {
            ui.label("Membership");
            egui::ComboBox::from_id_salt("membership_input")
                .selected_text(state.form.membership.as_str())
                .show_ui(ui, |ui: &mut Ui| {
                    for class in &classes {
                        ui.selectable_value(&mut state.form.membership, class.clone(), class.as_str());
                    }
                });
            ui.end_row();

            ui.label("Discount Applied");
            ui.add(DragValue::new(&mut state.form.discount_applied).range(0.0..=MAX_DISCOUNT));
            ui.end_row();

            ui.label("Days Since Last Purchase");
            ui.add(DragValue::new(&mut state.form.days_since_last_purchase).range(0..=u32::MAX));
            ui.end_row();

            ui.label("Items Purchased");
            ui.add(DragValue::new(&mut state.form.items_purchased).range(0..=u32::MAX));
            ui.end_row();
        });

    ui.add_space(6.0);
    if ui.button("Predict Satisfaction").clicked() {
        state.run_prediction();
    }

    match &state.form.outcome {
        Some(Ok(label)) => {
            ui.heading("Prediction Result");
            ui.label(RichText::new(format!("Predicted satisfaction: {label}")).color(Color32::GREEN));
        }
        Some(Err(msg)) => {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
        None => {}
    }
}
