//! Loan-applicant assessment: feature encoding, model inference, and report export.

pub mod domain;
pub mod encoding;
pub mod guard;
pub mod inference;
pub mod model;
pub mod report;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{ApplicantProfile, LoanStatus, PredictionResult};
pub use encoding::{
    encode, CategoricalField, CategoryTables, EncodingError, FeatureVector, FEATURE_COUNT,
    FEATURE_NAMES,
};
pub use guard::{ProfileGuard, ProfileLimits, ProfileViolation};
pub use inference::{
    predict, predict_with_diagnostics, InconsistentModelOutput, PredictionError,
    PROBABILITY_TOLERANCE,
};
pub use model::{CreditModel, ModelCache, ModelError, ModelLoader};
pub use report::{report_filename, PredictionReport, ReportError};
pub use router::{assessment_router, PredictionRequest, PredictionView};
pub use service::{Assessment, AssessmentError, CreditRiskService};
