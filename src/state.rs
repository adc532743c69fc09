use std::path::Path;

use customer_dashboard::data::filter::{FilterCriteria, Selection};
use customer_dashboard::data::model::{CITY, GENDER, MEMBERSHIP_TYPE};
use customer_dashboard::predict::pipeline::PredictionInput;
use customer_dashboard::session::{DashboardData, Session};

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The two pages reachable from the side panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Dashboard,
    Prediction,
}

/// Values currently typed into the prediction form.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionForm {
    pub membership: String,
    pub discount_applied: f64,
    pub days_since_last_purchase: u32,
    pub items_purchased: u32,
    /// Last result: the label, or the message to show instead.
    pub outcome: Option<Result<String, String>>,
}

impl PredictionForm {
    fn new(membership: String) -> Self {
        Self {
            membership,
            discount_applied: 0.0,
            days_since_last_purchase: 0,
            items_purchased: 0,
            outcome: None,
        }
    }
}

/// The full UI state, independent of rendering.
pub struct AppState {
    pub session: Session,

    pub view: View,

    /// Current filter selection.
    pub criteria: FilterCriteria,

    /// Choices offered by the filter controls (non-null distinct values).
    pub city_choices: Vec<String>,
    pub gender_choices: Vec<String>,
    pub membership_choices: Vec<String>,

    /// Filtered rows and their counts (cached, rebuilt on filter change).
    pub dashboard: DashboardData,

    pub city_colors: ColorMap,
    pub membership_colors: ColorMap,

    pub form: PredictionForm,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(session: Session) -> Self {
        let first_membership = session
            .artifacts()
            .bundle()
            .ok()
            .and_then(|b| b.membership_encoder().classes().first().cloned())
            .unwrap_or_default();

        let mut state = Self {
            session,
            view: View::default(),
            criteria: FilterCriteria::default(),
            city_choices: Vec::new(),
            gender_choices: Vec::new(),
            membership_choices: Vec::new(),
            dashboard: DashboardData::default(),
            city_colors: ColorMap::default(),
            membership_colors: ColorMap::default(),
            form: PredictionForm::new(first_membership),
            status_message: None,
        };
        state.reset_filters();
        state
    }

    /// Rebuild choices and colours from the table and select everything.
    fn reset_filters(&mut self) {
        let table = self.session.table();
        self.city_choices = table.distinct_values(CITY);
        self.gender_choices = table.distinct_values(GENDER);
        self.membership_choices = table.distinct_values(MEMBERSHIP_TYPE);
        self.city_colors = ColorMap::new(&self.city_choices);
        self.membership_colors = ColorMap::new(&self.membership_choices);
        self.criteria = FilterCriteria::select_all(table);
        self.refilter();
    }

    /// Recompute the dashboard after a filter change.
    pub fn refilter(&mut self) {
        self.dashboard = self.session.dashboard(&self.criteria);
    }

    /// Replace the dataset with another file; keeps the current one on error.
    pub fn open_dataset(&mut self, path: &Path) {
        match self.session.reload_dataset(path) {
            Ok(()) => {
                self.status_message = None;
                self.reset_filters();
            }
            Err(e) => {
                log::error!("Failed to load file: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    pub fn set_city(&mut self, city: Selection) {
        self.criteria.city = city;
        self.refilter();
    }

    pub fn set_membership(&mut self, membership: Selection) {
        self.criteria.membership = membership;
        self.refilter();
    }

    /// Toggle a single gender in the multi-select.
    pub fn toggle_gender(&mut self, gender: &str) {
        if !self.criteria.genders.remove(gender) {
            self.criteria.genders.insert(gender.to_string());
        }
        self.refilter();
    }

    pub fn select_all_genders(&mut self) {
        self.criteria.genders = self.gender_choices.iter().cloned().collect();
        self.refilter();
    }

    pub fn select_no_genders(&mut self) {
        self.criteria.genders.clear();
        self.refilter();
    }

    /// Run the prediction pipeline on the form values and store the outcome.
    pub fn run_prediction(&mut self) {
        let outcome = PredictionInput::new(
            self.form.membership.clone(),
            self.form.discount_applied,
            self.form.days_since_last_purchase,
            self.form.items_purchased,
        )
        .and_then(|input| self.session.predict(&input))
        .map_err(|e| {
            log::warn!("prediction rejected: {e}");
            e.to_string()
        });
        self.form.outcome = Some(outcome);
    }
}
