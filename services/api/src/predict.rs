use crate::infra::default_service;
use chrono::Local;
use clap::Args;
use credit_risk::assessment::{
    report_filename, ApplicantProfile, Assessment, CategoricalField, CategoryTables,
    PredictionReport,
};
use credit_risk::error::AppError;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct PredictArgs {
    /// Applicant name used in the eligibility message
    #[arg(long)]
    pub(crate) name: Option<String>,
    /// Applicant age in years (18-100)
    #[arg(long)]
    pub(crate) age: u32,
    /// Annual income; must be greater than 0
    #[arg(long)]
    pub(crate) annual_income: f64,
    /// Home ownership: Own, Mortgage, or Rent
    #[arg(long)]
    pub(crate) home_ownership: String,
    /// Employment length in years (0-50)
    #[arg(long)]
    pub(crate) employment_length: u32,
    /// Loan purpose: education, home_improvement, medical, personal, or venture
    #[arg(long)]
    pub(crate) loan_intent: String,
    /// Requested loan amount
    #[arg(long)]
    pub(crate) loan_amount: f64,
    /// Interest rate in percent (0-100)
    #[arg(long)]
    pub(crate) interest_rate: f64,
    /// Previous default on file: Yes or No
    #[arg(long)]
    pub(crate) prior_default: String,
    /// Credit history length in years (0-50)
    #[arg(long)]
    pub(crate) credit_history: u32,
    /// Write the CSV report to this file, or into this directory with a timestamped name
    #[arg(long)]
    pub(crate) report: Option<PathBuf>,
}

impl PredictArgs {
    fn profile(&self) -> ApplicantProfile {
        ApplicantProfile {
            age: self.age,
            annual_income: self.annual_income,
            home_ownership: self.home_ownership.clone(),
            employment_length_years: self.employment_length,
            loan_intent: self.loan_intent.clone(),
            loan_amount: self.loan_amount,
            interest_rate_pct: self.interest_rate,
            prior_default: self.prior_default.clone(),
            credit_history_years: self.credit_history,
        }
    }
}

pub(crate) fn run_predict(args: PredictArgs) -> Result<(), AppError> {
    let service = default_service();
    let assessment = match service.assess(args.profile()) {
        Ok(assessment) => assessment,
        Err(err) => {
            if err.is_rejected_input() {
                print_accepted_labels();
            }
            return Err(err.into());
        }
    };

    render_assessment(&assessment, args.name.as_deref());

    if let Some(target) = args.report {
        let path = report_path(&target);
        let csv = PredictionReport::from_assessment(&assessment).to_csv()?;
        std::fs::write(&path, csv)?;
        println!("\nReport written to {}", path.display());
    }

    Ok(())
}

fn render_assessment(assessment: &Assessment, name: Option<&str>) {
    let result = &assessment.result;

    println!("Credit risk assessment");
    println!("{}", result.eligibility_message(name));
    println!("Predicted loan status: {}", result.predicted_class.label());
    println!("Loan risk score (default): {:.1}%", result.risk_score_pct());

    println!("\nPrediction probabilities");
    println!("- Fully Paid: {:.2}%", result.fully_paid_probability * 100.0);
    println!("- Charged Off: {:.2}%", result.charged_off_probability * 100.0);

    println!("\nEncoded features");
    for (name, value) in assessment.features.named() {
        println!("- {name}: {value}");
    }

    if let Some(detail) = &assessment.inconsistency {
        println!("\nModel diagnostic: {detail}");
    }
}

fn print_accepted_labels() {
    eprintln!("Accepted categories:");
    for field in [
        CategoricalField::HomeOwnership,
        CategoricalField::LoanIntent,
        CategoricalField::PriorDefault,
    ] {
        let labels: Vec<_> = CategoryTables::labels(field).collect();
        eprintln!("- {field}: {}", labels.join(", "));
    }
}

fn report_path(target: &Path) -> PathBuf {
    if target.is_dir() {
        target.join(report_filename(Local::now().naive_local()))
    } else {
        target.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(report: Option<PathBuf>) -> PredictArgs {
        PredictArgs {
            name: Some("Riley".to_string()),
            age: 30,
            annual_income: 50_000.0,
            home_ownership: "Own".to_string(),
            employment_length: 5,
            loan_intent: "personal".to_string(),
            loan_amount: 10_000.0,
            interest_rate: 10.0,
            prior_default: "No".to_string(),
            credit_history: 10,
            report,
        }
    }

    #[test]
    fn writes_report_into_directory_with_timestamped_name() {
        let dir = std::env::temp_dir().join(format!("credit-risk-report-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("temp dir");

        run_predict(args(Some(dir.clone()))).expect("prediction runs");

        let written: Vec<_> = std::fs::read_dir(&dir)
            .expect("read dir")
            .filter_map(Result::ok)
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(written.len(), 1);
        assert!(written[0].starts_with("credit_risk_prediction_"));

        let csv = std::fs::read_to_string(dir.join(&written[0])).expect("report readable");
        assert!(csv.starts_with("Age,Income,Home,Emp_length,Intent"));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn zero_income_is_an_error() {
        let mut args = args(None);
        args.annual_income = 0.0;

        let err = run_predict(args).expect_err("zero income rejected");
        assert!(err.to_string().contains("annual income must be greater than 0"));
    }
}
