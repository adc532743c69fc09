use super::artifacts::{ArtifactBundle, ArtifactState};
use super::features::SATISFACTION_FEATURES;
use crate::data::model::{
    DAYS_SINCE_LAST_PURCHASE, DISCOUNT_APPLIED, ITEMS_PURCHASED, MEMBERSHIP_TYPE,
};
use crate::error::{DashboardError, DashboardResult};

/// Upper bound of the discount input, in percent.
pub const MAX_DISCOUNT: f64 = 100.0;

/// Raw values typed into the prediction form, validated on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionInput {
    membership: String,
    discount_applied: f64,
    days_since_last_purchase: u32,
    items_purchased: u32,
}

impl PredictionInput {
    /// Fails with [`DashboardError::InvalidInput`] unless the discount is a
    /// finite percentage in `0..=100`.
    pub fn new(
        membership: impl Into<String>,
        discount_applied: f64,
        days_since_last_purchase: u32,
        items_purchased: u32,
    ) -> DashboardResult<Self> {
        if !discount_applied.is_finite() || !(0.0..=MAX_DISCOUNT).contains(&discount_applied) {
            return Err(DashboardError::InvalidInput(format!(
                "discount must be between 0 and {MAX_DISCOUNT}, got {discount_applied}"
            )));
        }
        Ok(Self {
            membership: membership.into(),
            discount_applied,
            days_since_last_purchase,
            items_purchased,
        })
    }

    pub fn membership(&self) -> &str {
        &self.membership
    }

    pub fn discount_applied(&self) -> f64 {
        self.discount_applied
    }

    pub fn days_since_last_purchase(&self) -> u32 {
        self.days_since_last_purchase
    }

    pub fn items_purchased(&self) -> u32 {
        self.items_purchased
    }
}

/// Predict the satisfaction label for `input`.
///
/// Refuses with [`DashboardError::ModelUnavailable`] before touching any
/// encoder or the model when the bundle failed to load.
pub fn predict(input: &PredictionInput, artifacts: &ArtifactState) -> DashboardResult<String> {
    let bundle = artifacts.bundle()?;
    predict_with(input, bundle)
}

/// Encode → assemble → infer → decode against a loaded bundle.
pub fn predict_with(input: &PredictionInput, bundle: &ArtifactBundle) -> DashboardResult<String> {
    let membership_code = bundle.membership_encoder().encode(input.membership())?;

    let features = SATISFACTION_FEATURES.assemble(|column| match column {
        DISCOUNT_APPLIED => Some(input.discount_applied()),
        DAYS_SINCE_LAST_PURCHASE => Some(f64::from(input.days_since_last_purchase())),
        ITEMS_PURCHASED => Some(f64::from(input.items_purchased())),
        MEMBERSHIP_TYPE => Some(membership_code as f64),
        _ => None,
    })?;

    let code = bundle.model().predict(&features);
    let label = bundle.satisfaction_encoder().decode(code)?;

    log::info!(
        "predicted '{label}' (class {code}) for {input:?} features={:?}",
        features.as_slice()
    );
    Ok(label.to_string())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::predict::artifacts::UnavailableReason;
    use crate::predict::classifier::Classifier;
    use crate::predict::encoder::{CategoryEncoder, ClassCode};
    use crate::predict::features::FeatureVector;

    /// Returns a fixed code and records every vector it sees.
    #[derive(Debug)]
    struct FixedModel {
        code: ClassCode,
        seen: Rc<RefCell<Vec<Vec<f64>>>>,
    }

    impl Classifier for FixedModel {
        fn predict(&self, features: &FeatureVector) -> ClassCode {
            self.seen.borrow_mut().push(features.as_slice().to_vec());
            self.code
        }
    }

    fn encoder(name: &str, classes: &[&str]) -> CategoryEncoder {
        CategoryEncoder::new(name, classes.iter().map(|c| c.to_string()).collect()).unwrap()
    }

    fn bundle(code: ClassCode) -> (ArtifactState, Rc<RefCell<Vec<Vec<f64>>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let model = FixedModel {
            code,
            seen: Rc::clone(&seen),
        };
        let state = ArtifactState::Loaded(ArtifactBundle::new(
            Box::new(model),
            encoder("gender", &["F", "M"]),
            encoder("membership", &["Gold", "Silver"]),
            encoder("satisfaction", &["Unsatisfied", "Satisfied"]),
        ));
        (state, seen)
    }

    #[test]
    fn decodes_the_model_output() {
        let (state, seen) = bundle(1);
        let input = PredictionInput::new("Gold", 10.0, 5, 3).unwrap();

        assert_eq!(predict(&input, &state).unwrap(), "Satisfied");
        assert_eq!(*seen.borrow(), vec![vec![10.0, 5.0, 3.0, 0.0]]);
    }

    #[test]
    fn feature_vector_carries_encoded_membership_last() {
        let (state, seen) = bundle(0);
        let input = PredictionInput::new("Silver", 0.0, 30, 12).unwrap();

        assert_eq!(predict(&input, &state).unwrap(), "Unsatisfied");
        assert_eq!(seen.borrow()[0], vec![0.0, 30.0, 12.0, 1.0]);
    }

    #[test]
    fn unknown_membership_fails_before_the_model() {
        let (state, seen) = bundle(1);
        let input = PredictionInput::new("Platinum", 10.0, 5, 3).unwrap();

        let err = predict(&input, &state).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidCategory { ref label, .. } if label == "Platinum"));
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn out_of_range_model_output_is_invalid_code() {
        let (state, _) = bundle(5);
        let input = PredictionInput::new("Gold", 10.0, 5, 3).unwrap();

        assert_eq!(
            predict(&input, &state).unwrap_err(),
            DashboardError::InvalidCode {
                encoder: "satisfaction".into(),
                code: 5
            }
        );
    }

    #[test]
    fn unavailable_bundle_is_model_unavailable() {
        let reason = UnavailableReason::Missing {
            path: "satisfied_model.json".into(),
        };
        let state = ArtifactState::Unavailable(reason.clone());
        let input = PredictionInput::new("Gold", 10.0, 5, 3).unwrap();

        assert_eq!(
            predict(&input, &state).unwrap_err(),
            DashboardError::ModelUnavailable(reason)
        );
    }

    #[test]
    fn repeated_predictions_recompute() {
        let (state, seen) = bundle(1);
        let input = PredictionInput::new("Gold", 10.0, 5, 3).unwrap();
        predict(&input, &state).unwrap();
        predict(&input, &state).unwrap();
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn discount_is_bounded() {
        assert!(PredictionInput::new("Gold", 0.0, 0, 0).is_ok());
        assert!(PredictionInput::new("Gold", 100.0, 0, 0).is_ok());
        for bad in [-0.5, 100.5, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                PredictionInput::new("Gold", bad, 0, 0),
                Err(DashboardError::InvalidInput(_))
            ));
        }
    }
}
