use serde::Serialize;
use tracing::warn;

use super::domain::{LoanStatus, PredictionResult};
use super::encoding::FeatureVector;
use super::model::{CreditModel, ModelError};

/// Allowed deviation of the probability pair from summing to one.
pub const PROBABILITY_TOLERANCE: f64 = 1e-6;

/// Direct class prediction disagreed with the probability output.
///
/// Non-fatal: the probability-derived class is kept and this record is handed back for
/// diagnosis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, thiserror::Error)]
#[error(
    "model predicted {reported:?} but probabilities favour {derived:?} \
     (fully paid {fully_paid_probability:.4}, charged off {charged_off_probability:.4})"
)]
pub struct InconsistentModelOutput {
    pub reported: LoanStatus,
    pub derived: LoanStatus,
    pub fully_paid_probability: f64,
    pub charged_off_probability: f64,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictionError {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("model returned invalid class probabilities {probabilities:?}")]
    InvalidProbabilities { probabilities: [f64; 2] },
}

/// Run the classifier on one feature row, logging any class/probability disagreement.
pub fn predict(
    model: &dyn CreditModel,
    features: &FeatureVector,
) -> Result<PredictionResult, PredictionError> {
    predict_with_diagnostics(model, features).map(|(result, _)| result)
}

/// Like [`predict`], also returning the disagreement record when there is one.
pub fn predict_with_diagnostics(
    model: &dyn CreditModel,
    features: &FeatureVector,
) -> Result<(PredictionResult, Option<InconsistentModelOutput>), PredictionError> {
    let probabilities = model.predict_probabilities(features)?;
    validate_probabilities(probabilities)?;

    let [fully_paid_probability, charged_off_probability] = probabilities;
    // Ties resolve to the first class, as arg-max does.
    let derived = if charged_off_probability > fully_paid_probability {
        LoanStatus::ChargedOff
    } else {
        LoanStatus::FullyPaid
    };

    let reported = model.predict_class(features)?;
    let inconsistency = (reported != derived).then(|| InconsistentModelOutput {
        reported,
        derived,
        fully_paid_probability,
        charged_off_probability,
    });

    if let Some(detail) = &inconsistency {
        warn!(model = model.name(), %detail, "inconsistent model output");
    }

    let result = PredictionResult {
        predicted_class: derived,
        fully_paid_probability,
        charged_off_probability,
    };

    Ok((result, inconsistency))
}

fn validate_probabilities(probabilities: [f64; 2]) -> Result<(), PredictionError> {
    let in_range = probabilities
        .iter()
        .all(|p| p.is_finite() && (0.0..=1.0).contains(p));
    let total: f64 = probabilities.iter().sum();

    if in_range && (total - 1.0).abs() <= PROBABILITY_TOLERANCE {
        Ok(())
    } else {
        Err(PredictionError::InvalidProbabilities { probabilities })
    }
}
