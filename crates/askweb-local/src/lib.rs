use askweb_core::SearchPipeline;
use std::sync::Arc;

pub mod config;
pub mod firecrawl;
pub mod openai;
pub mod tavily;

pub use config::Settings;

/// Build the Firecrawl → Tavily → OpenAI pipeline for one invocation.
///
/// The providers are cheap values over a shared `client`, so building them per call keeps
/// invocations independent without paying for new connections.
pub fn pipeline(client: &reqwest::Client, settings: &Settings) -> SearchPipeline {
    SearchPipeline::new(
        Arc::new(firecrawl::FirecrawlSearchProvider::new(
            client.clone(),
            settings,
        )),
        Arc::new(tavily::TavilySearchProvider::new(client.clone(), settings)),
        Arc::new(openai::OpenAiChatClient::new(client.clone(), settings)),
    )
    .with_model(settings.model())
}
