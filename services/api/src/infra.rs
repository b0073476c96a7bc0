use credit_risk::assessment::{
    CreditModel, CreditRiskService, FeatureVector, LoanStatus, ModelCache, ModelError,
    ModelLoader, FEATURE_COUNT,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Logistic scorecard weights in feature order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ScorecardWeights {
    pub(crate) intercept: f64,
    pub(crate) coefficients: [f64; FEATURE_COUNT],
}

/// In-process baseline used when no trained artifact is wired in.
///
/// Scores the charged-off log-odds as a linear function of the encoded features.
#[derive(Debug)]
pub(crate) struct ScorecardModel {
    weights: ScorecardWeights,
}

impl ScorecardModel {
    fn charged_off_probability(&self, features: &FeatureVector) -> f64 {
        let log_odds = features
            .values()
            .iter()
            .zip(self.weights.coefficients.iter())
            .fold(self.weights.intercept, |acc, (value, weight)| {
                acc + value * weight
            });
        1.0 / (1.0 + (-log_odds).exp())
    }
}

impl CreditModel for ScorecardModel {
    fn name(&self) -> &str {
        "baseline-scorecard"
    }

    fn predict_class(&self, features: &FeatureVector) -> Result<LoanStatus, ModelError> {
        let [fully_paid, charged_off] = self.predict_probabilities(features)?;
        Ok(if charged_off > fully_paid {
            LoanStatus::ChargedOff
        } else {
            LoanStatus::FullyPaid
        })
    }

    fn predict_probabilities(&self, features: &FeatureVector) -> Result<[f64; 2], ModelError> {
        let charged_off = self.charged_off_probability(features);
        if !charged_off.is_finite() {
            return Err(ModelError::Inference(
                "scorecard produced a non-finite score".to_string(),
            ));
        }
        Ok([1.0 - charged_off, charged_off])
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ScorecardLoader {
    weights: ScorecardWeights,
}

impl ScorecardLoader {
    pub(crate) fn new(weights: ScorecardWeights) -> Self {
        Self { weights }
    }
}

impl Default for ScorecardLoader {
    fn default() -> Self {
        Self::new(default_scorecard_weights())
    }
}

impl ModelLoader for ScorecardLoader {
    fn load(&self) -> Result<Arc<dyn CreditModel>, ModelError> {
        let finite = self.weights.intercept.is_finite()
            && self.weights.coefficients.iter().all(|w| w.is_finite());
        if !finite {
            return Err(ModelError::Unavailable(
                "scorecard weights must be finite".to_string(),
            ));
        }

        Ok(Arc::new(ScorecardModel {
            weights: self.weights.clone(),
        }))
    }
}

pub(crate) fn default_scorecard_weights() -> ScorecardWeights {
    ScorecardWeights {
        intercept: -2.0,
        coefficients: [
            -0.005,    // Age
            -0.000005, // Income
            -0.35,     // Home
            -0.04,     // Emp_length
            0.05,      // Intent
            0.00001,   // Amount
            0.12,      // Rate
            4.0,       // Percent_income
            0.9,       // Default
            -0.02,     // Cred_length
        ],
    }
}

pub(crate) fn default_service() -> CreditRiskService {
    let models = Arc::new(ModelCache::new(ScorecardLoader::default()));
    CreditRiskService::new(models)
}
