use serde::{Deserialize, Serialize};

/// Raw applicant attributes as collected from an intake form or API payload.
///
/// Categorical fields keep their text labels so the encoder, not the transport layer,
/// decides whether a value belongs to the trained model's vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantProfile {
    pub age: u32,
    pub annual_income: f64,
    pub home_ownership: String,
    pub employment_length_years: u32,
    pub loan_intent: String,
    pub loan_amount: f64,
    pub interest_rate_pct: f64,
    pub prior_default: String,
    pub credit_history_years: u32,
}

/// Loan outcome classes, in the index order the classifier was trained with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    FullyPaid,
    ChargedOff,
}

impl LoanStatus {
    pub const fn label(self) -> &'static str {
        match self {
            LoanStatus::FullyPaid => "Fully Paid",
            LoanStatus::ChargedOff => "Charged Off",
        }
    }

    /// Class index in the model's probability output.
    pub const fn index(self) -> usize {
        match self {
            LoanStatus::FullyPaid => 0,
            LoanStatus::ChargedOff => 1,
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(LoanStatus::FullyPaid),
            1 => Some(LoanStatus::ChargedOff),
            _ => None,
        }
    }
}

/// Normalized classifier output for a single applicant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub predicted_class: LoanStatus,
    pub fully_paid_probability: f64,
    pub charged_off_probability: f64,
}

impl PredictionResult {
    /// Charged-off probability expressed as a percentage, shown as the loan risk score.
    pub fn risk_score_pct(&self) -> f64 {
        self.charged_off_probability * 100.0
    }

    pub fn fully_paid_pct(&self) -> f64 {
        round_pct(self.fully_paid_probability)
    }

    pub fn charged_off_pct(&self) -> f64 {
        round_pct(self.charged_off_probability)
    }

    pub fn eligibility_message(&self, applicant_name: Option<&str>) -> String {
        let name = applicant_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or("Applicant");

        match self.predicted_class {
            LoanStatus::FullyPaid => {
                format!("Congratulations, {name}! You are eligible to get the loan.")
            }
            LoanStatus::ChargedOff => format!(
                "Sorry, {name}. Based on our analysis, there is a high risk of default for this application."
            ),
        }
    }
}

/// Probability as a percentage rounded once to two decimals.
fn round_pct(probability: f64) -> f64 {
    let percent = probability * 100.0;
    format!("{percent:.2}").parse().unwrap_or(percent)
}
