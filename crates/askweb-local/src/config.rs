use askweb_core::synth::DEFAULT_MODEL;

pub const DEFAULT_FIRECRAWL_ENDPOINT: &str = "https://api.firecrawl.dev/v1/search";
pub const DEFAULT_TAVILY_ENDPOINT: &str = "https://api.tavily.com/search";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";

fn env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Prefixed name first, then the vendor's conventional name.
fn env_either(prefixed: &str, bare: &str) -> Option<String> {
    env(prefixed).or_else(|| env(bare))
}

/// Process-wide, read-only configuration. Loaded once at startup; keys are not
/// validated here, a missing key surfaces when the corresponding provider is first called.
#[derive(Clone, Default)]
pub struct Settings {
    pub firecrawl_api_key: Option<String>,
    pub tavily_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub firecrawl_endpoint: Option<String>,
    pub tavily_endpoint: Option<String>,
    pub openai_base_url: Option<String>,
    pub model: Option<String>,
    pub http_timeout_ms: Option<u64>,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key values.
        f.debug_struct("Settings")
            .field("firecrawl_api_key", &self.firecrawl_api_key.is_some())
            .field("tavily_api_key", &self.tavily_api_key.is_some())
            .field("openai_api_key", &self.openai_api_key.is_some())
            .field("firecrawl_endpoint", &self.firecrawl_endpoint())
            .field("tavily_endpoint", &self.tavily_endpoint())
            .field("openai_base_url", &self.openai_base_url())
            .field("model", &self.model())
            .field("http_timeout_ms", &self.http_timeout_ms)
            .finish()
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            firecrawl_api_key: env_either("ASKWEB_FIRECRAWL_API_KEY", "FIRECRAWL_API_KEY"),
            tavily_api_key: env_either("ASKWEB_TAVILY_API_KEY", "TAVILY_API_KEY"),
            openai_api_key: env_either("ASKWEB_OPENAI_API_KEY", "OPENAI_API_KEY"),
            firecrawl_endpoint: env("ASKWEB_FIRECRAWL_ENDPOINT"),
            tavily_endpoint: env("ASKWEB_TAVILY_ENDPOINT"),
            openai_base_url: env("ASKWEB_OPENAI_BASE_URL"),
            model: env("ASKWEB_OPENAI_MODEL"),
            http_timeout_ms: env("ASKWEB_HTTP_TIMEOUT_MS").and_then(|s| s.parse().ok()),
        }
    }

    pub fn firecrawl_endpoint(&self) -> &str {
        self.firecrawl_endpoint
            .as_deref()
            .unwrap_or(DEFAULT_FIRECRAWL_ENDPOINT)
    }

    pub fn tavily_endpoint(&self) -> &str {
        self.tavily_endpoint
            .as_deref()
            .unwrap_or(DEFAULT_TAVILY_ENDPOINT)
    }

    pub fn openai_base_url(&self) -> &str {
        self.openai_base_url
            .as_deref()
            .unwrap_or(DEFAULT_OPENAI_BASE_URL)
    }

    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    /// Shared HTTP client. Without `http_timeout_ms` requests wait as long as the upstream does.
    pub fn http_client(&self) -> reqwest::Result<reqwest::Client> {
        let mut b = reqwest::Client::builder().user_agent(concat!(
            "askweb/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(ms) = self.http_timeout_ms {
            b = b.timeout(std::time::Duration::from_millis(ms));
        }
        b.build()
    }
}
