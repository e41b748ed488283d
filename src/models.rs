//! # Models
//!
//! Everything a prompt can be sent to lives behind one identifier space, but not everything behind it is a model.
//! Resolution turns an identifier into a [ModelKind]:
//!
//! * [ModelKind::Deterministic]: FakeGPT, a keyword-driven test double.
//! * [ModelKind::Heuristic]: the prompt engineering tools, which rewrite the prompt instead of answering it.
//! * [ModelKind::Inference]: a handle from an [InferenceBackend](crate::models::resolver::InferenceBackend).
//!
//! Each kind carries a [RunPolicy] deciding whether output goes through
//! [filter_output](crate::safety::filter_output) and whether the prompt is held to a token budget.

pub mod fake;
pub mod info;
pub mod resolver;
pub mod tools;

use std::fmt;
use std::fmt::Formatter;
use std::sync::Arc;

use async_trait::async_trait;
use log::warn;
use thiserror::Error;

use crate::safety::{filter_output, Filtered};
use crate::utils::token::{truncate_for_model, DEFAULT_MAX_TOKENS};

/// Error when a model cannot produce a response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("model {model} is unavailable")]
    ModelUnavailable { model: String },
    #[error("generation with {model} failed: {message}")]
    Failed { model: String, message: String },
}

/// Trait for producing a response to a prompt.
pub trait Generate {
    fn generate(&self, prompt: &str, max_new_tokens: usize) -> Result<String, GenerationError>;
}

/// Blanket impl of Generate for Fn(&str, usize) -> Result<String, GenerationError>.
impl<F> Generate for F where F: Fn(&str, usize) -> Result<String, GenerationError> {
    fn generate(&self, prompt: &str, max_new_tokens: usize) -> Result<String, GenerationError> {
        self(prompt, max_new_tokens)
    }
}

/// Async version of Generate trait.
#[async_trait]
pub trait AsyncGenerate {
    async fn generate(&self, prompt: &str, max_new_tokens: usize) -> Result<String, GenerationError>;
}

/// Blanket impl of AsyncGenerate for Generate trait.
#[async_trait]
impl<T: Generate + Sync> AsyncGenerate for T {
    async fn generate(&self, prompt: &str, max_new_tokens: usize) -> Result<String, GenerationError> {
        Generate::generate(self, prompt, max_new_tokens)
    }
}

/// A loaded, reusable inference capability.
pub type ModelHandle = Arc<dyn Generate + Send + Sync>;

/// Keyword-driven transformation from prompt to response.
pub type TextRule = fn(&str) -> String;

/// What a model identifier resolved to.
#[derive(Clone)]
pub enum ModelKind {
    Deterministic(TextRule),
    Heuristic(TextRule),
    Inference(ModelHandle),
}

/// How the runner treats a [ModelKind].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunPolicy {
    /// Screen the response with [filter_output](crate::safety::filter_output)
    pub filter_output: bool,
    /// Truncate the prompt to [DEFAULT_MAX_TOKENS] and forward `max_new_tokens`
    pub honor_token_budget: bool,
}

impl ModelKind {
    pub fn policy(&self) -> RunPolicy {
        match self {
            ModelKind::Deterministic(_) => RunPolicy { filter_output: true, honor_token_budget: false },
            ModelKind::Heuristic(_) => RunPolicy { filter_output: false, honor_token_budget: false },
            ModelKind::Inference(_) => RunPolicy { filter_output: true, honor_token_budget: true },
        }
    }

    /// Run the prompt through this kind, applying its [RunPolicy]. The result tells whether output screening
    /// redacted the response.
    pub fn run_screened(&self, prompt: &str, max_new_tokens: usize) -> Result<Filtered, GenerationError> {
        let policy = self.policy();
        let response = match self {
            ModelKind::Deterministic(rule) | ModelKind::Heuristic(rule) => rule(prompt),
            ModelKind::Inference(handle) => {
                let prompt = truncate_for_model(prompt, DEFAULT_MAX_TOKENS);
                handle.generate(&prompt, max_new_tokens).map_err(|e| {
                    warn!("{}", e);
                    e
                })?
            }
        };
        if policy.filter_output {
            Ok(filter_output(&response))
        } else {
            Ok(Filtered { text: response, was_filtered: false })
        }
    }

    /// Same as [ModelKind::run_screened], keeping only the text.
    #[inline]
    pub fn run(&self, prompt: &str, max_new_tokens: usize) -> Result<String, GenerationError> {
        self.run_screened(prompt, max_new_tokens).map(|screened| screened.text)
    }
}

impl fmt::Debug for ModelKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ModelKind::Deterministic(_) => f.write_str("Deterministic"),
            ModelKind::Heuristic(_) => f.write_str("Heuristic"),
            ModelKind::Inference(_) => f.write_str("Inference"),
        }
    }
}

/// Run a resolved model. Same as [ModelKind::run].
#[inline]
pub fn generate_text(kind: &ModelKind, prompt: &str, max_new_tokens: usize) -> Result<String, GenerationError> {
    kind.run(prompt, max_new_tokens)
}

#[cfg(test)]
mod test_models {
    use std::sync::Arc;
    use super::*;

    fn echo_rule(prompt: &str) -> String {
        format!("echo: {}", prompt)
    }

    #[cfg(feature = "profanity")]
    fn rude_rule(_: &str) -> String {
        "well damn".to_string()
    }

    #[test]
    fn test_policies() {
        assert_eq!(RunPolicy { filter_output: false, honor_token_budget: false },
                   ModelKind::Heuristic(echo_rule).policy());
        assert!(ModelKind::Deterministic(echo_rule).policy().filter_output);
        let handle: ModelHandle = Arc::new(|_: &str, _: usize| -> Result<String, GenerationError> {
            Ok("ok".to_string())
        });
        assert!(ModelKind::Inference(handle).policy().honor_token_budget);
    }

    #[test]
    fn test_run_rules() {
        assert_eq!("echo: hi", generate_text(&ModelKind::Deterministic(echo_rule), "hi", 10).unwrap());
        assert_eq!("echo: hi", ModelKind::Heuristic(echo_rule).run("hi", 10).unwrap());
    }

    #[cfg(feature = "profanity")]
    #[test]
    fn test_heuristic_output_is_not_filtered() {
        assert_eq!("well damn", ModelKind::Heuristic(rude_rule).run("x", 10).unwrap());
        assert_eq!(crate::safety::FILTERED_OUTPUT_MARKER,
                   ModelKind::Deterministic(rude_rule).run("x", 10).unwrap());
    }

    #[cfg(feature = "profanity")]
    #[test]
    fn test_screening_reports_redaction() {
        let handle: ModelHandle = Arc::new(|_: &str, _: usize| -> Result<String, GenerationError> {
            Ok("what the damn".to_string())
        });
        let screened = ModelKind::Inference(handle).run_screened("hi", 5).unwrap();
        assert!(screened.was_filtered);
        assert_eq!(crate::safety::FILTERED_OUTPUT_MARKER, screened.text);

        let screened = ModelKind::Heuristic(rude_rule).run_screened("x", 10).unwrap();
        assert!(!screened.was_filtered);
        assert!(!ModelKind::Deterministic(echo_rule).run_screened("hi", 10).unwrap().was_filtered);
    }

    #[test]
    fn test_inference_receives_budget_and_truncated_prompt() {
        let handle: ModelHandle = Arc::new(|prompt: &str, max_new_tokens: usize| -> Result<String, GenerationError> {
            Ok(format!("{}:{}", prompt.chars().count(), max_new_tokens))
        });
        let kind = ModelKind::Inference(handle);
        assert_eq!("5:7", kind.run("hello", 7).unwrap());
        let long_prompt = "x".repeat(5000);
        // 512 tokens * 4 characters plus the "..." marker
        assert_eq!("2051:7", kind.run(&long_prompt, 7).unwrap());
    }

    #[test]
    fn test_inference_failure_is_returned() {
        let handle: ModelHandle = Arc::new(|_: &str, _: usize| -> Result<String, GenerationError> {
            Err(GenerationError::Failed {
                model: "broken".to_string(),
                message: "out of memory".to_string(),
            })
        });
        let err = ModelKind::Inference(handle).run("hello", 7).unwrap_err();
        assert_eq!("generation with broken failed: out of memory", err.to_string());
    }

    #[tokio::test]
    async fn test_async_adapter() {
        let handle = |prompt: &str, _: usize| -> Result<String, GenerationError> { Ok(prompt.to_uppercase()) };
        let response = AsyncGenerate::generate(&handle, "quiet", 3).await.unwrap();
        assert_eq!("QUIET", response);
    }
}
