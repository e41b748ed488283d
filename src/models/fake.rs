//! FakeGPT: canned answers chosen by keyword, for exercising the pipeline without a model.

pub const FAKEGPT: &str = "fakegpt";

/// Answer `prompt` with a canned response. The first matching rule wins.
pub fn fake_llm(prompt: &str) -> String {
    let prompt_lower = prompt.to_lowercase();
    let response = if prompt_lower.contains("hello") {
        "Hi there! How can I assist you today?"
    } else if prompt_lower.contains("summarize") {
        "Here's a quick summary: [Insert concise version of your input]"
    } else if prompt_lower.contains("def ") || prompt_lower.contains("python") {
        "Sure! Here's a basic Python function:\n\ndef example_function():\n    pass"
    } else if prompt_lower.contains("explain") {
        "Let me explain it in simple terms: [Explanation goes here]"
    } else {
        "This is a simulated response from FakeGPT based on your input!"
    };
    response.to_string()
}
