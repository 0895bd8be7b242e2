use serde::{Deserialize, Serialize};
use std::fmt;

pub mod format;
pub mod pipeline;
pub mod synth;

pub use pipeline::SearchPipeline;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("search failed: {0}")]
    Search(String),
    #[error("llm failed: {0}")]
    Llm(String),
    #[error("not configured: {0}")]
    NotConfigured(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, Error>;

pub const NO_TITLE: &str = "No title";
pub const NO_URL: &str = "No URL";
pub const NO_CONTENT: &str = "No content";

/// Content at or below this many characters does not, on its own, make a record worth keeping.
pub const MIN_INFORMATIVE_CONTENT_CHARS: usize = 10;

/// One normalized search hit. Missing upstream fields are replaced by the placeholders above.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRecord {
    pub title: String,
    pub url: String,
    pub content: String,
}

impl SearchRecord {
    pub fn new(title: Option<String>, url: Option<String>, content: Option<String>) -> Self {
        Self {
            title: title.unwrap_or_else(|| NO_TITLE.to_string()),
            url: url.unwrap_or_else(|| NO_URL.to_string()),
            content: content.unwrap_or_else(|| NO_CONTENT.to_string()),
        }
    }

    /// True if at least one field carries more than placeholder text.
    pub fn is_informative(&self) -> bool {
        self.title != NO_TITLE
            || self.url != NO_URL
            || (self.content != NO_CONTENT
                && self.content.chars().count() > MIN_INFORMATIVE_CONTENT_CHARS)
    }
}

/// Which provider produced a set of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Provenance {
    FireCrawl,
    Tavily,
    Unknown,
}

impl Provenance {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FireCrawl => "FireCrawl",
            Self::Tavily => "Tavily",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    pub query: String,
    /// Upper bound on hits requested from the provider. `None` leaves it to the provider.
    pub max_results: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub records: Vec<SearchRecord>,
    pub provider: String,
    pub elapsed_ms: u128,
}

#[async_trait::async_trait]
pub trait SearchProvider: Send + Sync {
    fn name(&self) -> &'static str;
    fn provenance(&self) -> Provenance;
    async fn search(&self, q: &SearchQuery) -> Result<SearchResponse>;
}

/// Records kept for one invocation, tagged with where they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub records: Vec<SearchRecord>,
    pub provenance: Provenance,
}

impl SearchOutcome {
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            provenance: Provenance::Unknown,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub system: String,
    pub user: String,
    pub max_tokens: u64,
    pub temperature: f64,
}

#[async_trait::async_trait]
pub trait CompletionBackend: Send + Sync {
    fn name(&self) -> &'static str;
    async fn complete(&self, req: &CompletionRequest) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_placeholders() {
        let r = SearchRecord::new(None, None, None);
        assert_eq!(r.title, "No title");
        assert_eq!(r.url, "No URL");
        assert_eq!(r.content, "No content");
        assert!(!r.is_informative());
    }

    #[test]
    fn title_or_url_alone_is_informative() {
        assert!(SearchRecord::new(Some("Paris".into()), None, None).is_informative());
        assert!(SearchRecord::new(None, Some("https://x".into()), None).is_informative());
    }

    #[test]
    fn short_content_alone_is_not_informative() {
        let ten = SearchRecord::new(None, None, Some("0123456789".into()));
        assert!(!ten.is_informative());
        let eleven = SearchRecord::new(None, None, Some("0123456789a".into()));
        assert!(eleven.is_informative());
    }

    #[test]
    fn content_length_counts_chars_not_bytes() {
        // 10 chars, 20 bytes.
        let r = SearchRecord::new(None, None, Some("éééééééééé".into()));
        assert!(!r.is_informative());
    }

    #[test]
    fn provenance_labels() {
        assert_eq!(Provenance::FireCrawl.to_string(), "FireCrawl");
        assert_eq!(Provenance::Tavily.to_string(), "Tavily");
        assert_eq!(Provenance::Unknown.to_string(), "Unknown");
    }
}
