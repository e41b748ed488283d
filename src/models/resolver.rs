use std::collections::HashMap;

use log::{debug, warn};

use crate::models::fake::{fake_llm, FAKEGPT};
use crate::models::tools::tool;
use crate::models::{ModelHandle, ModelKind};

/// Source of real inference capabilities, such as a local runtime that loads weights by identifier.
pub trait InferenceBackend {
    /// Load a model, or `None` if it cannot be made available.
    fn load(&self, model_id: &str) -> Option<ModelHandle>;
}

/// Resolves model identifiers into [ModelKind]s, loading inference models at most once.
#[derive(Default)]
pub struct ModelResolver {
    backend: Option<Box<dyn InferenceBackend>>,
    loaded: HashMap<String, ModelHandle>,
}

impl ModelResolver {
    /// A resolver that only knows FakeGPT and the prompt engineering tools.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_backend(backend: impl InferenceBackend + 'static) -> Self {
        Self {
            backend: Some(Box::new(backend)),
            loaded: HashMap::new(),
        }
    }

    /// Resolve `model_id`. Returns `None` when no capability can be found for it.
    pub fn resolve(&mut self, model_id: &str) -> Option<ModelKind> {
        if model_id == FAKEGPT {
            return Some(ModelKind::Deterministic(fake_llm));
        }
        if let Some(rule) = tool(model_id) {
            return Some(ModelKind::Heuristic(rule));
        }
        if let Some(handle) = self.loaded.get(model_id) {
            debug!("reusing loaded model {}", model_id);
            return Some(ModelKind::Inference(handle.clone()));
        }
        let Some(backend) = self.backend.as_ref() else {
            warn!("no inference backend configured, {} is unavailable", model_id);
            return None;
        };
        match backend.load(model_id) {
            Some(handle) => {
                debug!("loaded model {}", model_id);
                self.loaded.insert(model_id.to_string(), handle.clone());
                Some(ModelKind::Inference(handle))
            }
            None => {
                warn!("failed to load model {}", model_id);
                None
            }
        }
    }

    /// Whether `model_id` has already been loaded by the backend.
    pub fn is_loaded(&self, model_id: &str) -> bool {
        self.loaded.contains_key(model_id)
    }
}

/// Resolve `model_id` with a resolver that has no inference backend.
pub fn load_model(model_id: &str) -> Option<ModelKind> {
    ModelResolver::new().resolve(model_id)
}
