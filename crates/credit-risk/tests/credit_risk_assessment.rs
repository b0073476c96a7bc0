//! End-to-end scenarios for the assessment pipeline through the public crate surface.

mod common {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use credit_risk::assessment::{
        ApplicantProfile, CreditModel, FeatureVector, LoanStatus, ModelError,
    };

    pub(super) fn profile() -> ApplicantProfile {
        ApplicantProfile {
            age: 30,
            annual_income: 50_000.0,
            home_ownership: "Own".to_string(),
            employment_length_years: 5,
            loan_intent: "personal".to_string(),
            loan_amount: 10_000.0,
            interest_rate_pct: 10.0,
            prior_default: "No".to_string(),
            credit_history_years: 10,
        }
    }

    /// Scores applicants by percent income so different profiles land in different classes.
    #[derive(Default)]
    pub(super) struct RatioModel {
        invocations: AtomicUsize,
    }

    impl RatioModel {
        pub(super) fn invocations(&self) -> usize {
            self.invocations.load(Ordering::SeqCst)
        }

        fn charged_off(&self, features: &FeatureVector) -> f64 {
            self.invocations.fetch_add(1, Ordering::SeqCst);
            features.percent_income().clamp(0.0, 1.0)
        }
    }

    impl CreditModel for RatioModel {
        fn name(&self) -> &str {
            "ratio"
        }

        fn predict_class(&self, features: &FeatureVector) -> Result<LoanStatus, ModelError> {
            if self.charged_off(features) > 0.5 {
                Ok(LoanStatus::ChargedOff)
            } else {
                Ok(LoanStatus::FullyPaid)
            }
        }

        fn predict_probabilities(&self, features: &FeatureVector) -> Result<[f64; 2], ModelError> {
            let charged_off = self.charged_off(features);
            Ok([1.0 - charged_off, charged_off])
        }
    }

    pub(super) fn shared_model() -> Arc<RatioModel> {
        Arc::new(RatioModel::default())
    }
}

use std::sync::Arc;

use common::*;
use credit_risk::assessment::{
    encode, predict, AssessmentError, CreditRiskService, EncodingError, LoanStatus, ModelCache,
    PredictionReport, PROBABILITY_TOLERANCE,
};

#[test]
fn reference_applicant_encodes_to_documented_vector() {
    let features = encode(&profile()).expect("profile encodes");

    assert_eq!(
        features.values(),
        &[30.0, 50_000.0, 2.0, 5.0, 3.0, 10_000.0, 10.0, 0.2, 0.0, 10.0]
    );
}

#[test]
fn probabilities_sum_to_one_and_agree_with_class() {
    let model = shared_model();

    for loan_amount in [0.0, 5_000.0, 20_000.0, 30_000.0, 45_000.0] {
        let mut profile = profile();
        profile.loan_amount = loan_amount;
        let features = encode(&profile).expect("profile encodes");

        let result = predict(model.as_ref(), &features).expect("prediction succeeds");

        let total = result.fully_paid_probability + result.charged_off_probability;
        assert!((total - 1.0).abs() <= PROBABILITY_TOLERANCE);
        let expected = if result.charged_off_probability > result.fully_paid_probability {
            LoanStatus::ChargedOff
        } else {
            LoanStatus::FullyPaid
        };
        assert_eq!(result.predicted_class, expected);
    }
}

#[test]
fn zero_income_stops_before_inference() {
    let model = shared_model();
    let service = CreditRiskService::new(Arc::new(ModelCache::preloaded(model.clone())));
    let mut profile = profile();
    profile.annual_income = 0.0;

    let err = service.assess(profile).expect_err("zero income rejected");

    assert!(matches!(
        err,
        AssessmentError::Encoding(EncodingError::DivisionByZeroRisk { .. })
    ));
    assert_eq!(model.invocations(), 0);
}

#[test]
fn high_ratio_applicant_is_charged_off_in_report() {
    let model = shared_model();
    let service = CreditRiskService::new(Arc::new(ModelCache::preloaded(model.clone())));
    let mut profile = profile();
    profile.loan_amount = 40_000.0;

    let assessment = service.assess(profile).expect("assessment succeeds");
    let csv = PredictionReport::from_assessment(&assessment)
        .to_csv()
        .expect("csv renders");

    assert_eq!(assessment.result.predicted_class, LoanStatus::ChargedOff);
    assert!(csv.contains(",Charged Off,20.0,80.0"));
    assert_eq!(model.invocations(), 2);
}
