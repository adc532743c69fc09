use crate::data::model::{
    DAYS_SINCE_LAST_PURCHASE, DISCOUNT_APPLIED, ITEMS_PURCHASED, MEMBERSHIP_TYPE,
};
use crate::error::{DashboardError, DashboardResult};

/// Named, versioned column order of a model's input.
///
/// The order must be the one the model was trained with; a model artifact
/// declares the schema it expects and is rejected on load if it differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureSchema {
    pub version: u32,
    pub columns: &'static [&'static str],
}

/// Input of the satisfaction classifier.
pub const SATISFACTION_FEATURES: FeatureSchema = FeatureSchema {
    version: 1,
    columns: &[
        DISCOUNT_APPLIED,
        DAYS_SINCE_LAST_PURCHASE,
        ITEMS_PURCHASED,
        MEMBERSHIP_TYPE,
    ],
};

impl FeatureSchema {
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Whether a model trained on `(version, names)` fits this schema.
    pub fn matches(&self, version: u32, names: &[String]) -> bool {
        version == self.version
            && names.len() == self.columns.len()
            && names.iter().zip(self.columns).all(|(a, b)| a == b)
    }

    /// Build a vector by asking `value_of` for each column in schema order.
    pub fn assemble(&self, value_of: impl Fn(&str) -> Option<f64>) -> DashboardResult<FeatureVector> {
        self.columns
            .iter()
            .map(|&column| {
                value_of(column).ok_or_else(|| {
                    DashboardError::InvalidInput(format!("no value for feature '{column}'"))
                })
            })
            .collect::<DashboardResult<Vec<f64>>>()
            .map(FeatureVector)
    }
}

/// Fixed-order numeric input consumed by a classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn satisfaction_order_is_discount_days_items_membership() {
        assert_eq!(
            SATISFACTION_FEATURES.columns,
            &[
                "Discount Applied",
                "Days Since Last Purchase",
                "Items Purchased",
                "Membership Type"
            ]
        );
    }

    #[test]
    fn assemble_follows_schema_order() {
        let v = SATISFACTION_FEATURES
            .assemble(|c| match c {
                MEMBERSHIP_TYPE => Some(4.0),
                ITEMS_PURCHASED => Some(3.0),
                DAYS_SINCE_LAST_PURCHASE => Some(2.0),
                DISCOUNT_APPLIED => Some(1.0),
                _ => None,
            })
            .unwrap();
        assert_eq!(v.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn assemble_reports_missing_feature() {
        let err = SATISFACTION_FEATURES.assemble(|_| None).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidInput(msg) if msg.contains(DISCOUNT_APPLIED)));
    }

    #[test]
    fn schema_match_checks_version_and_names() {
        let names: Vec<String> = SATISFACTION_FEATURES
            .columns
            .iter()
            .map(|c| c.to_string())
            .collect();
        assert!(SATISFACTION_FEATURES.matches(1, &names));
        assert!(!SATISFACTION_FEATURES.matches(2, &names));

        let mut swapped = names.clone();
        swapped.swap(0, 3);
        assert!(!SATISFACTION_FEATURES.matches(1, &swapped));
        assert!(!SATISFACTION_FEATURES.matches(1, &names[..3]));
    }
}
