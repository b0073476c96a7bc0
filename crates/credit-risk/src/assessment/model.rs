use std::fmt;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use tracing::{info, warn};

use super::domain::LoanStatus;
use super::encoding::FeatureVector;

/// Pre-trained classifier capability consumed by the inference adapter.
///
/// Implementations may wrap a deserialized artifact, a remote inference endpoint, or a
/// test double; the adapter only relies on these two operations.
pub trait CreditModel: Send + Sync {
    fn name(&self) -> &str;

    fn predict_class(&self, features: &FeatureVector) -> Result<LoanStatus, ModelError>;

    /// `[p_fully_paid, p_charged_off]`.
    fn predict_probabilities(&self, features: &FeatureVector) -> Result<[f64; 2], ModelError>;
}

/// Produces the model handle the first time it is needed.
pub trait ModelLoader: Send + Sync {
    fn load(&self) -> Result<Arc<dyn CreditModel>, ModelError>;
}

struct DetachedLoader;

impl ModelLoader for DetachedLoader {
    fn load(&self) -> Result<Arc<dyn CreditModel>, ModelError> {
        Err(ModelError::Unavailable(
            "preloaded cache has no loader".to_string(),
        ))
    }
}

/// Failures raised by a model or its loader.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("model unavailable: {0}")]
    Unavailable(String),
    #[error("model inference failed: {0}")]
    Inference(String),
}

/// Load-once holder for the process model handle.
///
/// The first successful load is kept for the lifetime of the cache and never replaced.
/// A failed load leaves the cache empty so the next request can try again.
pub struct ModelCache {
    loader: Box<dyn ModelLoader>,
    slot: OnceLock<Arc<dyn CreditModel>>,
    init: Mutex<()>,
}

impl ModelCache {
    pub fn new(loader: impl ModelLoader + 'static) -> Self {
        Self {
            loader: Box::new(loader),
            slot: OnceLock::new(),
            init: Mutex::new(()),
        }
    }

    /// Cache that is already populated with `model`.
    pub fn preloaded(model: Arc<dyn CreditModel>) -> Self {
        let cache = Self::new(DetachedLoader);
        let _ = cache.slot.set(model);
        cache
    }

    pub fn get(&self) -> Result<Arc<dyn CreditModel>, ModelError> {
        if let Some(model) = self.slot.get() {
            return Ok(model.clone());
        }

        // Guards no data; a loader panic only poisons the lock.
        let _guard = self.init.lock().unwrap_or_else(PoisonError::into_inner);

        // Another caller may have finished loading while we waited.
        if let Some(model) = self.slot.get() {
            return Ok(model.clone());
        }

        let model = self.loader.load().map_err(|err| {
            warn!(error = %err, "model load failed");
            match err {
                ModelError::Inference(detail) => ModelError::Unavailable(detail),
                unavailable => unavailable,
            }
        })?;
        info!(model = model.name(), "model loaded");

        Ok(self.slot.get_or_init(|| model).clone())
    }

    /// Load eagerly, e.g. before a server reports ready.
    pub fn warm(&self) -> Result<(), ModelError> {
        self.get().map(|_| ())
    }

    pub fn is_loaded(&self) -> bool {
        self.slot.get().is_some()
    }
}

impl fmt::Debug for ModelCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelCache")
            .field("loaded", &self.is_loaded())
            .finish()
    }
}
