use chrono::NaiveDateTime;
use serde::Serialize;

use super::service::Assessment;

/// One downloadable row: raw inputs, derived ratio, and the rounded prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionReport {
    #[serde(rename = "Age")]
    pub age: u32,
    #[serde(rename = "Income")]
    pub income: f64,
    #[serde(rename = "Home")]
    pub home: String,
    #[serde(rename = "Emp_length")]
    pub emp_length: u32,
    #[serde(rename = "Intent")]
    pub intent: String,
    #[serde(rename = "Amount")]
    pub amount: f64,
    #[serde(rename = "Rate")]
    pub rate: f64,
    #[serde(rename = "Percent_income")]
    pub percent_income: f64,
    #[serde(rename = "Default")]
    pub default: String,
    #[serde(rename = "Cred_length")]
    pub cred_length: u32,
    #[serde(rename = "Predicted Status")]
    pub predicted_status: &'static str,
    #[serde(rename = "Fully Paid Probability (%)")]
    pub fully_paid_pct: f64,
    #[serde(rename = "Charged Off Probability (%)")]
    pub charged_off_pct: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to write report row: {0}")]
    Csv(#[from] csv::Error),
    #[error("report buffer was not flushed: {0}")]
    Flush(String),
    #[error("report is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

impl PredictionReport {
    pub fn from_assessment(assessment: &Assessment) -> Self {
        let profile = &assessment.profile;
        let result = &assessment.result;

        Self {
            age: profile.age,
            income: profile.annual_income,
            home: profile.home_ownership.clone(),
            emp_length: profile.employment_length_years,
            intent: profile.loan_intent.clone(),
            amount: profile.loan_amount,
            rate: profile.interest_rate_pct,
            percent_income: assessment.features.percent_income(),
            default: profile.prior_default.clone(),
            cred_length: profile.credit_history_years,
            predicted_status: result.predicted_class.label(),
            fully_paid_pct: result.fully_paid_pct(),
            charged_off_pct: result.charged_off_pct(),
        }
    }

    /// Header plus this row as comma-separated text.
    pub fn to_csv(&self) -> Result<String, ReportError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.serialize(self)?;
        let bytes = writer
            .into_inner()
            .map_err(|err| ReportError::Flush(err.error().to_string()))?;
        Ok(String::from_utf8(bytes)?)
    }
}

/// Download name stamped with the local time the report was produced.
pub fn report_filename(timestamp: NaiveDateTime) -> String {
    format!(
        "credit_risk_prediction_{}.csv",
        timestamp.format("%Y%m%d_%H%M%S")
    )
}
