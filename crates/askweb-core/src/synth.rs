//! Prompt construction for answer synthesis.

use crate::{CompletionRequest, Provenance};

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const MAX_TOKENS: u64 = 1000;
pub const TEMPERATURE: f64 = 0.3;

pub const SYSTEM_PROMPT: &str =
    "You are a research assistant that provides accurate information based on search results.";

pub fn build_prompt(query: &str, context: &str, provenance: Provenance) -> String {
    format!(
        r#"You are a helpful research assistant that provides accurate, concise, and well-sourced answers.
Using the search results below, provide a comprehensive answer to the query: "{query}"

{context}

Instructions:
1. Provide a clear, well-structured answer
2. Cite sources using the numbered references above
3. If the search results don't contain relevant information, state this clearly
4. Keep the answer focused and avoid speculation
5. Note that results were obtained via {provenance}

Answer:"#
    )
}

pub fn completion_request(
    model: &str,
    query: &str,
    context: &str,
    provenance: Provenance,
) -> CompletionRequest {
    CompletionRequest {
        model: model.to_string(),
        system: SYSTEM_PROMPT.to_string(),
        user: build_prompt(query, context, provenance),
        max_tokens: MAX_TOKENS,
        temperature: TEMPERATURE,
    }
}
