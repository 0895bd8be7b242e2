//! Primary-then-fallback search, followed by answer synthesis.
//!
//! Search failures never leave this module: a provider error is logged and treated as
//! "no records", which is what triggers the fallback. Synthesis failures are returned
//! to the caller unchanged.

use crate::format::{assemble, format_citations, format_context, no_results_message};
use crate::synth::{completion_request, DEFAULT_MODEL};
use crate::{
    CompletionBackend, Error, Result, SearchOutcome, SearchProvider, SearchQuery,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const DEFAULT_MAX_RESULTS: usize = 5;

#[derive(Clone)]
pub struct SearchPipeline {
    primary: Arc<dyn SearchProvider>,
    fallback: Arc<dyn SearchProvider>,
    llm: Arc<dyn CompletionBackend>,
    model: String,
}

impl SearchPipeline {
    pub fn new(
        primary: Arc<dyn SearchProvider>,
        fallback: Arc<dyn SearchProvider>,
        llm: Arc<dyn CompletionBackend>,
    ) -> Self {
        Self {
            primary,
            fallback,
            llm,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Ask one provider; any error or empty response collapses to `None`.
    async fn try_provider(
        provider: &dyn SearchProvider,
        q: &SearchQuery,
    ) -> Option<SearchOutcome> {
        match provider.search(q).await {
            Ok(resp) if !resp.records.is_empty() => {
                info!(
                    provider = %resp.provider,
                    records = resp.records.len(),
                    elapsed_ms = resp.elapsed_ms as u64,
                    "search returned useful results"
                );
                Some(SearchOutcome {
                    records: resp.records,
                    provenance: provider.provenance(),
                })
            }
            Ok(resp) => {
                info!(
                    provider = %resp.provider,
                    elapsed_ms = resp.elapsed_ms as u64,
                    "search returned no usable results"
                );
                None
            }
            Err(e) => {
                warn!(provider = provider.name(), error = %e, "search failed");
                None
            }
        }
    }

    /// Primary provider first (with its own result count), fallback only if that produced nothing.
    pub async fn gather(&self, query: &str, max_results: usize) -> SearchOutcome {
        let primary_q = SearchQuery {
            query: query.to_string(),
            max_results: None,
        };
        if let Some(outcome) = Self::try_provider(self.primary.as_ref(), &primary_q).await {
            return outcome;
        }

        info!(provider = self.fallback.name(), "trying fallback provider");
        let fallback_q = SearchQuery {
            query: query.to_string(),
            max_results: Some(max_results),
        };
        Self::try_provider(self.fallback.as_ref(), &fallback_q)
            .await
            .unwrap_or_else(SearchOutcome::empty)
    }

    /// Full invocation: search, then either the no-results message or a cited answer.
    pub async fn run(&self, query: &str, max_results: usize) -> Result<String> {
        if max_results == 0 {
            return Err(Error::InvalidInput("max_results must be >= 1".to_string()));
        }
        info!(query, max_results, "search_web called");

        let outcome = self.gather(query, max_results).await;
        if outcome.is_empty() {
            info!("no provider produced results; returning diagnostic message");
            return Ok(no_results_message(query));
        }

        let context = format_context(&outcome, max_results);
        let citations = format_citations(&outcome, max_results);
        let req = completion_request(&self.model, query, &context, outcome.provenance);
        debug!(
            backend = self.llm.name(),
            model = %self.model,
            prompt_chars = req.user.chars().count(),
            "requesting synthesis"
        );
        let answer = self.llm.complete(&req).await?;

        let result = assemble(answer.trim(), &citations);
        let preview: String = result.chars().take(100).collect();
        info!(
            provenance = %outcome.provenance,
            preview = %preview,
            "generated result"
        );
        Ok(result)
    }
}
