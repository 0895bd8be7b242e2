//! Text blocks handed to the model and returned to the caller.

use crate::{SearchOutcome, SearchRecord};
use std::borrow::Cow;
use std::fmt::Write as _;

/// Content beyond this many characters is cut before it reaches the prompt.
pub const MAX_CONTENT_CHARS: usize = 1500;
pub const TRUNCATION_MARKER: &str = "...";

/// Cut `s` to [`MAX_CONTENT_CHARS`] characters plus [`TRUNCATION_MARKER`] when longer.
pub fn truncate_content(s: &str) -> Cow<'_, str> {
    match s.char_indices().nth(MAX_CONTENT_CHARS) {
        None => Cow::Borrowed(s),
        Some((cut, _)) => Cow::Owned(format!("{}{TRUNCATION_MARKER}", &s[..cut])),
    }
}

fn bounded(
    outcome: &SearchOutcome,
    max_results: usize,
) -> impl Iterator<Item = (usize, &SearchRecord)> {
    outcome
        .records
        .iter()
        .take(max_results)
        .enumerate()
        .map(|(i, r)| (i + 1, r))
}

/// Numbered source/title/content listing used as model context.
pub fn format_context(outcome: &SearchOutcome, max_results: usize) -> String {
    let mut out = format!("Search results (via {}):\n", outcome.provenance);
    for (i, r) in bounded(outcome, max_results) {
        // Writing into a String cannot fail.
        let _ = write!(
            out,
            "[{i}] Source: {}\n Title: {}\n Content: {}\n\n",
            r.url,
            r.title,
            truncate_content(&r.content)
        );
    }
    out
}

/// Numbered `title - url` lines, indexed the same way as [`format_context`].
pub fn format_citations(outcome: &SearchOutcome, max_results: usize) -> String {
    let mut out = format!("Sources (via {}):\n", outcome.provenance);
    for (i, r) in bounded(outcome, max_results) {
        let _ = writeln!(out, "[{i}] {} - {}", r.title, r.url);
    }
    out
}

pub fn assemble(answer: &str, citations: &str) -> String {
    format!("{answer}\n\n{citations}")
}

/// Returned instead of an answer when neither provider produced a record.
pub fn no_results_message(query: &str) -> String {
    format!(
        r#"I was unable to find search results for "{query}" using available search providers (FireCrawl, Tavily). This could be due to:
1. API limitations or issues
2. The query being too specific or recent
3. Network connectivity issues

Please try:
- Rephrasing your query
- Checking your internet connection
- Verifying your API keys are configured correctly
- Trying again in a few minutes

For ManCity match information specifically, I recommend checking:
- Official Manchester City FC website
- BBC Sport
- ESPN
- Sky Sports"#
    )
}
