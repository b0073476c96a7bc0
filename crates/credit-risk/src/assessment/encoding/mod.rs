//! Applicant profile to model feature vector.
//!
//! The classifier is positionally sensitive: column order here is part of the contract
//! with the trained artifact and must not be rearranged.

mod tables;

pub use tables::CategoryTables;

use serde::Serialize;
use std::fmt;

use super::domain::ApplicantProfile;

/// Number of columns the classifier consumes.
pub const FEATURE_COUNT: usize = 10;

/// Column names, in model order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "Age",
    "Income",
    "Home",
    "Emp_length",
    "Intent",
    "Amount",
    "Rate",
    "Percent_income",
    "Default",
    "Cred_length",
];

/// Index of the derived loan-to-income ratio.
pub const PERCENT_INCOME_INDEX: usize = 7;

/// Single-row numeric input for the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        FEATURE_NAMES
            .iter()
            .position(|candidate| *candidate == name)
            .map(|index| self.0[index])
    }

    pub fn percent_income(&self) -> f64 {
        self.0[PERCENT_INCOME_INDEX]
    }

    /// `(name, value)` pairs in model order.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.0.iter().copied())
    }
}

impl From<[f64; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }
}

/// Categorical inputs with fixed vocabularies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoricalField {
    HomeOwnership,
    LoanIntent,
    PriorDefault,
}

impl CategoricalField {
    pub const fn label(self) -> &'static str {
        match self {
            CategoricalField::HomeOwnership => "home_ownership",
            CategoricalField::LoanIntent => "loan_intent",
            CategoricalField::PriorDefault => "prior_default",
        }
    }
}

impl fmt::Display for CategoricalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Conditions that stop a profile from being encoded.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EncodingError {
    #[error("annual income must be greater than 0 (found {annual_income})")]
    DivisionByZeroRisk { annual_income: f64 },
    #[error("unknown {field} category '{value}'")]
    UnknownCategory {
        field: CategoricalField,
        value: String,
    },
}

/// Build the model input row for a profile.
pub fn encode(profile: &ApplicantProfile) -> Result<FeatureVector, EncodingError> {
    if profile.annual_income.is_nan() || profile.annual_income <= 0.0 {
        return Err(EncodingError::DivisionByZeroRisk {
            annual_income: profile.annual_income,
        });
    }

    let tables = CategoryTables::shared();
    let home = lookup(tables, CategoricalField::HomeOwnership, &profile.home_ownership)?;
    let intent = lookup(tables, CategoricalField::LoanIntent, &profile.loan_intent)?;
    let default = lookup(tables, CategoricalField::PriorDefault, &profile.prior_default)?;

    let percent_income = profile.loan_amount / profile.annual_income;

    Ok(FeatureVector([
        f64::from(profile.age),
        profile.annual_income,
        home,
        f64::from(profile.employment_length_years),
        intent,
        profile.loan_amount,
        profile.interest_rate_pct,
        percent_income,
        default,
        f64::from(profile.credit_history_years),
    ]))
}

fn lookup(
    tables: &CategoryTables,
    field: CategoricalField,
    value: &str,
) -> Result<f64, EncodingError> {
    tables
        .code(field, value)
        .map(f64::from)
        .ok_or_else(|| EncodingError::UnknownCategory {
            field,
            value: value.to_string(),
        })
}
