//! Prompt engineering tools.
//!
//! These take the place of a model in a comparison, but instead of answering a prompt they rewrite or critique it.
//! All of them work on the trimmed prompt.

use crate::models::TextRule;

pub const PROMPT_REFINER: &str = "prompt-refiner";
pub const PROMPT_ANALYZER: &str = "prompt-analyzer";
pub const FEW_SHOT_GENERATOR: &str = "few-shot-generator";
pub const COT_BUILDER: &str = "cot-builder";

/// Every tool identifier, in display order.
pub const TOOL_IDS: [&str; 4] = [PROMPT_REFINER, PROMPT_ANALYZER, FEW_SHOT_GENERATOR, COT_BUILDER];

const CODE_WORDS: [&str; 4] = ["code", "function", "programming", "development"];
const EXPLAIN_WORDS: [&str; 4] = ["explain", "describe", "what is", "how does"];
const COMPARE_WORDS: [&str; 4] = ["compare", "versus", "difference", "pros and cons"];
const ANALYZE_WORDS: [&str; 4] = ["analyze", "review", "evaluate", "assessment"];

#[inline]
fn mentions_any(text: &str, words: &[&str]) -> bool {
    words.iter().any(|word| text.contains(word))
}

/// Rewrite a prompt into a more structured request, picking the structure by keyword category.
pub fn prompt_refiner(prompt: &str) -> String {
    let prompt = prompt.trim();
    let prompt_lower = prompt.to_lowercase();

    if prompt.chars().count() < 10 {
        return format!("**OPTIMIZED PROMPT:**\n\nPlease provide a detailed and comprehensive response to: '{}'\n\n\
        Ensure your response includes:\n\
        • Relevant context and background\n\
        • Specific examples and use cases\n\
        • Clear, actionable information\n\
        • Well-structured presentation", prompt);
    }

    let guidance = if mentions_any(&prompt_lower, &CODE_WORDS) {
        "**Requirements:**\n\
        1. Provide working, commented code examples\n\
        2. Explain the logic and methodology\n\
        3. Include error handling and edge cases\n\
        4. Suggest optimizations and alternatives\n\
        5. Add relevant documentation and best practices"
    } else if mentions_any(&prompt_lower, &EXPLAIN_WORDS) {
        "**Structure your response with:**\n\
        • **Definition**: Clear, concise explanation\n\
        • **Context**: Why this matters and when to use it\n\
        • **Examples**: Real-world applications and scenarios\n\
        • **Key Points**: Most important takeaways\n\
        • **Further Reading**: Related concepts or resources"
    } else if mentions_any(&prompt_lower, &COMPARE_WORDS) {
        "**Provide comprehensive comparison:**\n\
        • **Overview**: Brief introduction to items being compared\n\
        • **Similarities**: What they have in common\n\
        • **Key Differences**: Major distinguishing factors\n\
        • **Pros & Cons**: Advantages and disadvantages of each\n\
        • **Use Cases**: When to choose one over the other\n\
        • **Recommendation**: Best choice for specific scenarios"
    } else if mentions_any(&prompt_lower, &ANALYZE_WORDS) {
        "**Framework for analysis:**\n\
        • **Executive Summary**: Key findings upfront\n\
        • **Methodology**: How the analysis was conducted\n\
        • **Key Findings**: Major discoveries and insights\n\
        • **Evidence**: Supporting data and examples\n\
        • **Implications**: What this means and why it matters\n\
        • **Recommendations**: Actionable next steps"
    } else {
        "**Enhancement Guidelines:**\n\
        • Provide comprehensive, well-researched information\n\
        • Use clear structure with headers and bullet points\n\
        • Include relevant examples and practical applications\n\
        • Ensure accuracy and cite sources where appropriate\n\
        • Make the response actionable and valuable to the reader"
    };
    format!("**OPTIMIZED PROMPT:**\n\n{}\n\n{}", prompt, guidance)
}

struct Check {
    passed: bool,
    line: &'static str,
}

impl Check {
    fn new(passed: bool, pass_line: &'static str, fail_line: &'static str) -> Self {
        Self { passed, line: if passed { pass_line } else { fail_line } }
    }
}

/// Score a prompt on length, tone, specificity, structure and context.
pub fn prompt_analyzer(prompt: &str) -> String {
    let prompt = prompt.trim();
    let prompt_lower = prompt.to_lowercase();
    let word_count = prompt.split_whitespace().count();

    let length = if word_count < 5 {
        Check::new(false, "", "❌ **Length**: Too short - consider adding more context")
    } else if word_count < 15 {
        Check::new(false, "", "⚠️ **Length**: Could be more detailed for better results")
    } else {
        Check::new(true, "✅ **Length**: Good detail level", "")
    };
    let checks = [
        length,
        Check::new(mentions_any(&prompt_lower, &["please", "could you", "would you"]),
                   "✅ **Tone**: Polite and professional",
                   "⚠️ **Tone**: Consider adding polite language"),
        Check::new(mentions_any(&prompt_lower, &["specific", "detailed", "example", "step"]),
                   "✅ **Specificity**: Requests specific information",
                   "❌ **Specificity**: Too vague - add specific requirements"),
        Check::new(prompt.contains('?'),
                   "✅ **Structure**: Clear question format",
                   "⚠️ **Structure**: Consider framing as a clear question"),
        Check::new(mentions_any(&prompt_lower, &["context", "background", "situation", "scenario"]),
                   "✅ **Context**: Provides situational context",
                   "❌ **Context**: Missing background information"),
    ];

    let score = checks.iter().filter(|check| check.passed).count();
    let results: Vec<&str> = checks.iter().map(|check| check.line).collect();
    format!("**PROMPT ANALYSIS:**\n\n**Original Prompt:** {}\n\n**Analysis Results:**\n{}\n\n\
    **Overall Score:** {}/{}\n\n\
    **Recommendations:**\n\
    • Add more specific requirements\n\
    • Include relevant context and background\n\
    • Use professional, polite language\n\
    • Request structured responses", prompt, results.join("\n"), score, checks.len())
}

/// Wrap a prompt in a three-example few-shot scaffold.
pub fn few_shot_generator(prompt: &str) -> String {
    format!(r#"**FEW-SHOT PROMPT TEMPLATE:**

**Instruction:** {}

**Example 1:**
Input: [Sample input similar to your use case]
Expected Output: [High-quality example response]

**Example 2:**
Input: [Another relevant sample input]
Expected Output: [Another high-quality example response]

**Example 3:**
Input: [Third sample input with slight variation]
Expected Output: [Third example showing consistency]

**Your Task:**
Input: [Your actual input here]
Expected Output: [Follow the pattern and quality shown above]

**Guidelines:**
- Maintain consistency with the examples
- Follow the same format and structure
- Ensure high quality and accuracy
- Include relevant details as shown"#, prompt.trim())
}

/// Wrap a prompt in a four-step chain-of-thought scaffold.
pub fn cot_builder(prompt: &str) -> String {
    format!(r#"**CHAIN-OF-THOUGHT PROMPT:**

{}

**Reasoning Process:**
Let's work through this step by step:

**Step 1: Understanding**
- First, let me understand what is being asked
- Identify the key components and requirements
- Consider any constraints or limitations

**Step 2: Analysis**
- Break down the problem into smaller parts
- Consider different approaches or perspectives
- Evaluate potential solutions or responses

**Step 3: Synthesis**
- Combine insights from the analysis
- Develop a comprehensive response
- Ensure logical flow and consistency

**Step 4: Validation**
- Check the response for accuracy and completeness
- Verify it addresses all aspects of the question
- Consider potential follow-up questions

**Final Response:**
[Provide your well-reasoned, step-by-step answer here]

**Note:** This chain-of-thought approach ensures thorough analysis and high-quality responses."#, prompt.trim())
}

/// Look up a tool by identifier.
pub fn tool(model_id: &str) -> Option<TextRule> {
    match model_id {
        PROMPT_REFINER => Some(prompt_refiner),
        PROMPT_ANALYZER => Some(prompt_analyzer),
        FEW_SHOT_GENERATOR => Some(few_shot_generator),
        COT_BUILDER => Some(cot_builder),
        _ => None,
    }
}

#[cfg(test)]
mod test_tools {
    use super::*;

    #[test]
    fn test_refiner_short_prompt() {
        let refined = prompt_refiner("  rust  ");
        assert!(refined.starts_with("**OPTIMIZED PROMPT:**\n\nPlease provide a detailed and comprehensive response to: 'rust'"));
    }

    #[test]
    fn test_refiner_categories() {
        assert!(prompt_refiner("Write a function that sorts").contains("**Requirements:**"));
        assert!(prompt_refiner("What is a monad, really").contains("**Definition**"));
        assert!(prompt_refiner("Tabs versus spaces forever").contains("**Provide comprehensive comparison:**"));
        assert!(prompt_refiner("Please review my essay").contains("**Framework for analysis:**"));
        assert!(prompt_refiner("Tell me about the moon").contains("**Enhancement Guidelines:**"));
    }

    #[test]
    fn test_refiner_category_order() {
        // code words are checked before explanation words
        assert!(prompt_refiner("Explain this code snippet").contains("**Requirements:**"));
    }

    #[test]
    fn test_analyzer_score() {
        let analysis = prompt_analyzer("hi");
        assert!(analysis.contains("**Original Prompt:** hi"));
        assert!(analysis.contains("❌ **Length**: Too short"));
        assert!(analysis.contains("**Overall Score:** 0/5"));

        let analysis = prompt_analyzer(
            "Could you give a detailed, step by step explanation with background context of how compilers \
            turn source text into machine code for a beginner?");
        assert!(analysis.contains("✅ **Length**: Good detail level"));
        assert!(analysis.contains("**Overall Score:** 5/5"));
    }

    #[test]
    fn test_scaffolds_embed_trimmed_prompt() {
        assert!(few_shot_generator("  classify tweets ").contains("**Instruction:** classify tweets\n"));
        assert!(cot_builder(" why is the sky blue ").contains("**CHAIN-OF-THOUGHT PROMPT:**\n\nwhy is the sky blue\n"));
    }

    #[test]
    fn test_tool_lookup() {
        for id in TOOL_IDS {
            assert!(tool(id).is_some());
        }
        assert!(tool("fakegpt").is_none());
    }
}
