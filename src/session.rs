use std::path::Path;

use crate::config::DashboardConfig;
use crate::data::aggregate::{CategoryCount, count_by};
use crate::data::filter::{FilterCriteria, apply};
use crate::data::loader::load_dataset;
use crate::data::model::{CITY, MEMBERSHIP_TYPE, Table};
use crate::error::DashboardResult;
use crate::predict::artifacts::{ArtifactState, load_artifacts};
use crate::predict::pipeline::{PredictionInput, predict};

/// Everything loaded once at start-up: the customer table and the
/// prediction artifacts. Read-only afterwards.
#[derive(Debug)]
pub struct Session {
    table: Table,
    artifacts: ArtifactState,
}

/// What the dashboard view shows for one set of filter criteria.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardData {
    pub filtered: Table,
    pub city_counts: Vec<CategoryCount>,
    pub membership_counts: Vec<CategoryCount>,
}

impl Session {
    pub fn new(table: Table, artifacts: ArtifactState) -> Self {
        Self { table, artifacts }
    }

    /// Load the dataset and the artifacts named by `config`.
    ///
    /// A missing or unreadable dataset is an error; unavailable artifacts are
    /// not, they only disable prediction.
    pub fn init(config: &DashboardConfig) -> DashboardResult<Self> {
        let table = load_dataset(&config.dataset_path)?;
        let artifacts = load_artifacts(&config.artifact_paths());
        Ok(Self::new(table, artifacts))
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn artifacts(&self) -> &ArtifactState {
        &self.artifacts
    }

    /// Swap in another dataset file. On failure the current table is kept.
    pub fn reload_dataset(&mut self, path: &Path) -> DashboardResult<()> {
        self.table = load_dataset(path)?;
        Ok(())
    }

    /// Filter, then count by city and by membership type.
    pub fn dashboard(&self, criteria: &FilterCriteria) -> DashboardData {
        let filtered = apply(&self.table, criteria);
        DashboardData {
            city_counts: count_by(&filtered, CITY),
            membership_counts: count_by(&filtered, MEMBERSHIP_TYPE),
            filtered,
        }
    }

    pub fn predict(&self, input: &PredictionInput) -> DashboardResult<String> {
        predict(input, &self.artifacts)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::data::filter::Selection;
    use crate::data::model::{CellValue, GENDER};
    use crate::error::DashboardError;
    use crate::predict::artifacts::UnavailableReason;

    fn table() -> Table {
        let s = |v: &str| CellValue::String(v.to_string());
        Table::from_rows(
            vec![CITY.into(), GENDER.into(), MEMBERSHIP_TYPE.into()],
            vec![
                vec![s("A"), s("F"), s("Gold")],
                vec![s("B"), s("M"), s("Silver")],
                vec![s("A"), s("M"), s("Gold")],
            ],
        )
    }

    fn unavailable() -> ArtifactState {
        ArtifactState::Unavailable(UnavailableReason::Missing {
            path: "satisfied_model.json".into(),
        })
    }

    #[test]
    fn dashboard_counts_the_filtered_rows() {
        let session = Session::new(table(), unavailable());
        let mut criteria = FilterCriteria::select_all(session.table());

        let all = session.dashboard(&criteria);
        assert_eq!(all.filtered.len(), 3);
        assert_eq!(
            all.city_counts,
            vec![CategoryCount::new("A", 2), CategoryCount::new("B", 1)]
        );

        criteria.membership = Selection::Only("Silver".into());
        let silver = session.dashboard(&criteria);
        assert_eq!(silver.filtered.len(), 1);
        assert_eq!(silver.city_counts, vec![CategoryCount::new("B", 1)]);
        assert_eq!(silver.membership_counts, vec![CategoryCount::new("Silver", 1)]);
    }

    #[test]
    fn dashboard_works_without_artifacts() {
        let session = Session::new(table(), unavailable());
        assert!(!session.artifacts().is_loaded());
        let input = PredictionInput::new("Gold", 5.0, 1, 1).unwrap();
        assert!(matches!(
            session.predict(&input),
            Err(DashboardError::ModelUnavailable(_))
        ));
        assert_eq!(
            session
                .dashboard(&FilterCriteria::select_all(session.table()))
                .filtered
                .len(),
            3
        );
    }

    #[test]
    fn init_fails_without_dataset_and_tolerates_missing_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let config = DashboardConfig {
            dataset_path: dir.path().join("customers.csv"),
            artifact_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        assert!(matches!(
            Session::init(&config),
            Err(DashboardError::DatasetUnavailable { .. })
        ));

        std::fs::write(&config.dataset_path, "City,Gender,Membership Type\nA,F,Gold\n").unwrap();
        let session = Session::init(&config).unwrap();
        assert_eq!(session.table().len(), 1);
        assert!(!session.artifacts().is_loaded());
    }

    #[test]
    fn failed_reload_keeps_current_table() {
        let mut session = Session::new(table(), unavailable());
        assert!(session.reload_dataset(Path::new("/nope/customers.csv")).is_err());
        assert_eq!(session.table().len(), 3);
    }
}
