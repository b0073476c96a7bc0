use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use super::domain::{ApplicantProfile, PredictionResult};
use super::encoding::{encode, EncodingError, FeatureVector};
use super::guard::{ProfileGuard, ProfileViolation};
use super::inference::{predict_with_diagnostics, InconsistentModelOutput, PredictionError};
use super::model::{ModelCache, ModelError};

/// Completed assessment for one applicant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub profile: ApplicantProfile,
    pub features: FeatureVector,
    pub result: PredictionResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inconsistency: Option<InconsistentModelOutput>,
}

/// Service composing the profile guard, feature encoder, and cached model.
#[derive(Debug)]
pub struct CreditRiskService {
    guard: ProfileGuard,
    models: Arc<ModelCache>,
}

impl CreditRiskService {
    pub fn new(models: Arc<ModelCache>) -> Self {
        Self::with_guard(ProfileGuard::default(), models)
    }

    pub fn with_guard(guard: ProfileGuard, models: Arc<ModelCache>) -> Self {
        Self { guard, models }
    }

    pub fn model_ready(&self) -> bool {
        self.models.is_loaded()
    }

    /// Load the model ahead of the first request.
    pub fn warm(&self) -> Result<(), AssessmentError> {
        self.models.warm().map_err(AssessmentError::from)
    }

    /// Validate, encode, and score a profile.
    ///
    /// Nothing is sent to the model unless the profile passes the guard and encodes.
    pub fn assess(&self, profile: ApplicantProfile) -> Result<Assessment, AssessmentError> {
        self.guard.check(&profile)?;
        let features = encode(&profile)?;

        let model = self.models.get()?;
        let (result, inconsistency) = predict_with_diagnostics(model.as_ref(), &features)?;

        debug!(
            model = model.name(),
            status = result.predicted_class.label(),
            charged_off = result.charged_off_probability,
            "assessment completed"
        );

        Ok(Assessment {
            profile,
            features,
            result,
            inconsistency,
        })
    }
}

/// Error raised by the assessment service.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AssessmentError {
    #[error(transparent)]
    Profile(#[from] ProfileViolation),
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    #[error(transparent)]
    Prediction(#[from] PredictionError),
}

impl From<ModelError> for AssessmentError {
    fn from(value: ModelError) -> Self {
        Self::Prediction(PredictionError::Model(value))
    }
}

impl AssessmentError {
    /// Whether the caller supplied input the pipeline refuses to score.
    pub fn is_rejected_input(&self) -> bool {
        matches!(
            self,
            AssessmentError::Profile(_) | AssessmentError::Encoding(_)
        )
    }

    pub fn is_model_unavailable(&self) -> bool {
        matches!(
            self,
            AssessmentError::Prediction(PredictionError::Model(ModelError::Unavailable(_)))
        )
    }
}
