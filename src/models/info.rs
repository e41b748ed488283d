use std::collections::HashMap;

use lazy_static::lazy_static;
use serde::Serialize;

use crate::models::fake::FAKEGPT;
use crate::models::tools::{COT_BUILDER, FEW_SHOT_GENERATOR, PROMPT_ANALYZER, PROMPT_REFINER, TOOL_IDS};

pub const TINY_GPT2: &str = "sshleifer/tiny-gpt2";
pub const DISTILGPT2: &str = "distilgpt2";
pub const FLAN_T5_SMALL: &str = "google/flan-t5-small";

/// Small CPU-friendly models offered for inference.
pub const INFERENCE_MODEL_IDS: [&str; 3] = [TINY_GPT2, DISTILGPT2, FLAN_T5_SMALL];

/// Display metadata for a model identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModelInfo {
    #[serde(rename = "type")]
    pub model_type: &'static str,
    pub size: &'static str,
    pub task: &'static str,
    pub description: &'static str,
}

/// Returned for identifiers missing from the table.
pub const UNKNOWN_MODEL_INFO: ModelInfo = ModelInfo {
    model_type: "Unknown",
    size: "Unknown",
    task: "Text generation",
    description: "No information available for this model",
};

lazy_static! {
    static ref MODEL_INFO: HashMap<&'static str, ModelInfo> = HashMap::from([
        (FAKEGPT, ModelInfo {
            model_type: "FakeGPT Simulator",
            size: "0 MB",
            task: "Testing",
            description: "Keyword-driven canned responses for fast, offline testing",
        }),
        (PROMPT_REFINER, ModelInfo {
            model_type: "Prompt Engineering Tool",
            size: "Built-in",
            task: "Prompt optimization",
            description: "Rewrites a prompt into a structured, detailed request",
        }),
        (PROMPT_ANALYZER, ModelInfo {
            model_type: "Prompt Engineering Tool",
            size: "Built-in",
            task: "Prompt analysis",
            description: "Scores a prompt on length, tone, specificity, structure and context",
        }),
        (FEW_SHOT_GENERATOR, ModelInfo {
            model_type: "Prompt Engineering Tool",
            size: "Built-in",
            task: "Few-shot templating",
            description: "Wraps a prompt in a few-shot example scaffold",
        }),
        (COT_BUILDER, ModelInfo {
            model_type: "Prompt Engineering Tool",
            size: "Built-in",
            task: "Chain-of-thought templating",
            description: "Wraps a prompt in a step-by-step reasoning scaffold",
        }),
        (TINY_GPT2, ModelInfo {
            model_type: "GPT-2 (tiny)",
            size: "~2 MB",
            task: "Text generation",
            description: "Minimal GPT-2 for smoke tests, output is mostly noise",
        }),
        (DISTILGPT2, ModelInfo {
            model_type: "GPT-2 (distilled)",
            size: "~330 MB",
            task: "Text generation",
            description: "Distilled GPT-2, smaller and faster than the original",
        }),
        (FLAN_T5_SMALL, ModelInfo {
            model_type: "T5 (instruction-tuned)",
            size: "~300 MB",
            task: "Text-to-text generation",
            description: "Instruction-tuned T5 that follows short instructions",
        }),
    ]);
}

/// Look up display metadata. Never fails; unknown identifiers get [UNKNOWN_MODEL_INFO].
pub fn get_model_info(model_id: &str) -> ModelInfo {
    MODEL_INFO.get(model_id).copied().unwrap_or(UNKNOWN_MODEL_INFO)
}

/// Every identifier offered for selection: tools first, then FakeGPT, then inference models.
pub fn available_models() -> Vec<&'static str> {
    TOOL_IDS
        .into_iter()
        .chain([FAKEGPT])
        .chain(INFERENCE_MODEL_IDS)
        .collect()
}
