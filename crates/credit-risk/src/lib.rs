//! Credit risk assessment core.
//!
//! Turns loan-applicant attributes into the fixed-order feature vector expected by a
//! pre-trained classifier, calls the classifier through the [`assessment::CreditModel`]
//! capability, and shapes its output into a typed prediction and a CSV report.

pub mod assessment;
pub mod config;
pub mod error;
pub mod telemetry;
