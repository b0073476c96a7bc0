use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::assessment::domain::{ApplicantProfile, LoanStatus};
use crate::assessment::encoding::FeatureVector;
use crate::assessment::model::{CreditModel, ModelCache, ModelError, ModelLoader};
use crate::assessment::CreditRiskService;

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

/// Model double returning fixed outputs and counting every call.
pub(super) struct StubModel {
    probabilities: Result<[f64; 2], ModelError>,
    class: LoanStatus,
    calls: AtomicUsize,
}

impl StubModel {
    pub(super) fn new(probabilities: [f64; 2], class: LoanStatus) -> Self {
        Self {
            probabilities: Ok(probabilities),
            class,
            calls: AtomicUsize::new(0),
        }
    }

    /// Consistent model leaning towards repayment.
    pub(super) fn repaying() -> Self {
        Self::new([0.8, 0.2], LoanStatus::FullyPaid)
    }

    pub(super) fn defaulting() -> Self {
        Self::new([0.35, 0.65], LoanStatus::ChargedOff)
    }

    pub(super) fn failing(error: ModelError) -> Self {
        Self {
            probabilities: Err(error),
            class: LoanStatus::FullyPaid,
            calls: AtomicUsize::new(0),
        }
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CreditModel for StubModel {
    fn name(&self) -> &str {
        "stub"
    }

    fn predict_class(&self, _features: &FeatureVector) -> Result<LoanStatus, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.class)
    }

    fn predict_probabilities(&self, _features: &FeatureVector) -> Result<[f64; 2], ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.probabilities.clone()
    }
}

/// Loader handing out a shared stub, counting how often it is asked.
pub(super) struct CountingLoader {
    model: Arc<StubModel>,
    loads: Arc<AtomicUsize>,
}

impl CountingLoader {
    pub(super) fn new(model: Arc<StubModel>) -> (Self, Arc<AtomicUsize>) {
        let loads = Arc::new(AtomicUsize::new(0));
        (
            Self {
                model,
                loads: loads.clone(),
            },
            loads,
        )
    }
}

impl ModelLoader for CountingLoader {
    fn load(&self) -> Result<Arc<dyn CreditModel>, ModelError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(self.model.clone())
    }
}

/// Loader that fails a fixed number of times before succeeding.
pub(super) struct FlakyLoader {
    failures_left: AtomicUsize,
    model: Arc<StubModel>,
}

impl FlakyLoader {
    pub(super) fn new(failures: usize, model: Arc<StubModel>) -> Self {
        Self {
            failures_left: AtomicUsize::new(failures),
            model,
        }
    }
}

impl ModelLoader for FlakyLoader {
    fn load(&self) -> Result<Arc<dyn CreditModel>, ModelError> {
        let remaining = self.failures_left.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures_left.store(remaining - 1, Ordering::SeqCst);
            return Err(ModelError::Unavailable("artifact missing".to_string()));
        }
        Ok(self.model.clone())
    }
}

/// Loader that panics on its first call and succeeds afterwards.
pub(super) struct PanickingLoader {
    panicked: AtomicBool,
    model: Arc<StubModel>,
}

impl PanickingLoader {
    pub(super) fn new(model: Arc<StubModel>) -> Self {
        Self {
            panicked: AtomicBool::new(false),
            model,
        }
    }
}

impl ModelLoader for PanickingLoader {
    fn load(&self) -> Result<Arc<dyn CreditModel>, ModelError> {
        if !self.panicked.swap(true, Ordering::SeqCst) {
            panic!("artifact reader crashed");
        }
        Ok(self.model.clone())
    }
}

pub(super) fn build_service(model: Arc<StubModel>) -> CreditRiskService {
    CreditRiskService::new(Arc::new(ModelCache::preloaded(model)))
}

pub(super) fn unavailable_service() -> CreditRiskService {
    CreditRiskService::new(Arc::new(ModelCache::new(FlakyLoader::new(
        usize::MAX,
        Arc::new(StubModel::repaying()),
    ))))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) async fn read_text_body(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf-8 body")
}
