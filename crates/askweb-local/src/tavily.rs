use askweb_core::pipeline::DEFAULT_MAX_RESULTS;
use askweb_core::{
    Error, Provenance, Result, SearchProvider, SearchQuery, SearchRecord, SearchResponse,
};
use serde::Deserialize;
use std::time::Instant;

use crate::config::Settings;

/// Fallback search backend. Every returned result is kept.
#[derive(Debug, Clone)]
pub struct TavilySearchProvider {
    client: reqwest::Client,
    api_key: Option<String>,
    endpoint: String,
}

impl TavilySearchProvider {
    pub fn new(client: reqwest::Client, settings: &Settings) -> Self {
        Self {
            client,
            api_key: settings.tavily_api_key.clone(),
            endpoint: settings.tavily_endpoint().to_string(),
        }
    }
}

pub fn record_from_result(r: TavilyResult) -> SearchRecord {
    SearchRecord::new(r.title, r.url, r.content)
}

#[derive(Debug, Default, Deserialize)]
pub struct TavilyResult {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TavilySearchResponse {
    #[serde(default)]
    results: Vec<TavilyResult>,
}

#[async_trait::async_trait]
impl SearchProvider for TavilySearchProvider {
    fn name(&self) -> &'static str {
        "tavily"
    }

    fn provenance(&self) -> Provenance {
        Provenance::Tavily
    }

    async fn search(&self, q: &SearchQuery) -> Result<SearchResponse> {
        let t0 = Instant::now();
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            Error::NotConfigured("missing ASKWEB_TAVILY_API_KEY (or TAVILY_API_KEY)".to_string())
        })?;

        tracing::debug!(endpoint = %self.endpoint, max_results = ?q.max_results, "tavily search request");

        let body = serde_json::json!({
            "query": q.query,
            "max_results": q.max_results.unwrap_or(DEFAULT_MAX_RESULTS),
            "include_answer": false,
            "include_images": false,
        });

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
            return Err(Error::Search(format!("tavily search HTTP {status}")));
        }

        let parsed: TavilySearchResponse = resp
            .json()
            .await
            .map_err(|e| Error::Search(e.to_string()))?;

        Ok(SearchResponse {
            records: parsed.results.into_iter().map(record_from_result).collect(),
            provider: "tavily".to_string(),
            elapsed_ms: t0.elapsed().as_millis(),
        })
    }
}
