use askweb_core::{
    Error, Provenance, Result, SearchProvider, SearchQuery, SearchRecord, SearchResponse,
};
use serde::Deserialize;
use std::time::Instant;

use crate::config::Settings;

/// Primary search backend. The result count is left to Firecrawl's default.
#[derive(Debug, Clone)]
pub struct FirecrawlSearchProvider {
    client: reqwest::Client,
    api_key: Option<String>,
    endpoint: String,
}

impl FirecrawlSearchProvider {
    pub fn new(client: reqwest::Client, settings: &Settings) -> Self {
        Self {
            client,
            api_key: settings.firecrawl_api_key.clone(),
            endpoint: settings.firecrawl_endpoint().to_string(),
        }
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|v| !v.is_empty())
}

/// Map one hit to a record. Empty strings count as missing; content prefers
/// `markdown` over `content`.
pub fn record_from_hit(hit: FirecrawlHit) -> SearchRecord {
    let content = non_empty(hit.markdown).or_else(|| non_empty(hit.content));
    SearchRecord::new(non_empty(hit.title), non_empty(hit.url), content)
}

#[derive(Debug, Default, Deserialize)]
pub struct FirecrawlHit {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub markdown: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FirecrawlSearchResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Option<Vec<FirecrawlHit>>,
    #[serde(default)]
    error: Option<String>,
}

#[async_trait::async_trait]
impl SearchProvider for FirecrawlSearchProvider {
    fn name(&self) -> &'static str {
        "firecrawl"
    }

    fn provenance(&self) -> Provenance {
        Provenance::FireCrawl
    }

    async fn search(&self, q: &SearchQuery) -> Result<SearchResponse> {
        let t0 = Instant::now();
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            Error::NotConfigured(
                "missing ASKWEB_FIRECRAWL_API_KEY (or FIRECRAWL_API_KEY)".to_string(),
            )
        })?;

        tracing::debug!(endpoint = %self.endpoint, "firecrawl search request");

        let body = serde_json::json!({ "query": q.query });

        let resp = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::AUTHORIZATION, format!("Bearer {api_key}"))
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Search(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Search(format!("firecrawl search HTTP {status}")));
        }

        let parsed: FirecrawlSearchResponse = resp
            .json()
            .await
            .map_err(|e| Error::Search(e.to_string()))?;
        if !parsed.success {
            return Err(Error::Search(format!(
                "firecrawl search returned success=false{}",
                parsed.error.map(|e| format!(": {e}")).unwrap_or_default()
            )));
        }

        let records = parsed
            .data
            .unwrap_or_default()
            .into_iter()
            .map(record_from_hit)
            .filter(SearchRecord::is_informative)
            .collect();

        Ok(SearchResponse {
            records,
            provider: "firecrawl".to_string(),
            elapsed_ms: t0.elapsed().as_millis(),
        })
    }
}
