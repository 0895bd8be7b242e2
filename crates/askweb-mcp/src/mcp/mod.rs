use askweb_core::pipeline::DEFAULT_MAX_RESULTS;
use askweb_local::Settings;
use rmcp::{
    handler::server::router::tool::ToolRouter as RmcpToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    transport::stdio,
    ErrorData as McpError, ServiceExt,
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;

mod envelope;
use envelope::*;

pub(crate) const TOOL_NAME: &str = "search_web";
const SERVER_NAME: &str = "Universal Search Assistant";

#[derive(Debug, Deserialize, JsonSchema)]
pub(crate) struct SearchWebArgs {
    /// What to search the web for.
    query: String,
    /// Maximum number of results to cite (default: 5).
    #[serde(default)]
    max_results: Option<usize>,
}

#[derive(Clone)]
pub(crate) struct AskwebMcp {
    tool_router: RmcpToolRouter<Self>,
    settings: Arc<Settings>,
    http: reqwest::Client,
}

#[tool_router]
impl AskwebMcp {
    pub(crate) fn new(settings: Settings) -> Result<Self, McpError> {
        let http = settings
            .http_client()
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(Self {
            tool_router: Self::tool_router(),
            settings: Arc::new(settings),
            http,
        })
    }

    #[tool(
        name = "search_web",
        description = "Performs a web search using multiple providers and returns a concise, well-formatted answer using GPT-4o-mini"
    )]
    async fn search_web(
        &self,
        params: Parameters<SearchWebArgs>,
    ) -> Result<CallToolResult, McpError> {
        let args = params.0;
        let max_results = args.max_results.unwrap_or(DEFAULT_MAX_RESULTS);

        let pipeline = askweb_local::pipeline(&self.http, &self.settings);
        match pipeline.run(&args.query, max_results).await {
            Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
            Err(e) => {
                tracing::error!(tool = TOOL_NAME, error = %e, "tool call failed");
                Err(mcp_error(&e))
            }
        }
    }
}

#[tool_handler]
impl rmcp::ServerHandler for AskwebMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(format!(
                "{SERVER_NAME}: call `{TOOL_NAME}` with a query to get a short answer with numbered sources. Searches Firecrawl first and falls back to Tavily."
            )),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }
}

/// Names of the tools advertised to MCP hosts.
pub(crate) fn tool_names() -> Vec<String> {
    AskwebMcp::tool_router()
        .list_all()
        .into_iter()
        .map(|t| t.name.to_string())
        .collect()
}

pub(crate) async fn serve_stdio(settings: Settings) -> Result<(), McpError> {
    tracing::info!(?settings, "starting MCP server with stdio transport");
    let svc = AskwebMcp::new(settings)?;
    let running = svc
        .serve(stdio())
        .await
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    // Keep the stdio server alive until the client closes.
    running
        .waiting()
        .await
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use askweb_core::Error;
    use rmcp::model::ErrorCode as McpErrorCode;

    #[test]
    fn router_exposes_search_web_with_required_query() {
        let tools = AskwebMcp::tool_router().list_all();
        assert_eq!(tools.len(), 1);
        let t = &tools[0];
        assert_eq!(t.name, TOOL_NAME);
        let required = t
            .input_schema
            .get("required")
            .and_then(|v| v.as_array())
            .cloned()
            .unwrap_or_default();
        assert!(required.iter().any(|v| v.as_str() == Some("query")));
        assert!(!required.iter().any(|v| v.as_str() == Some("max_results")));
    }

    #[test]
    fn tool_names_is_just_search_web() {
        assert_eq!(tool_names(), vec![TOOL_NAME.to_string()]);
    }

    #[test]
    fn args_default_max_results_to_none() {
        let a: SearchWebArgs = serde_json::from_value(serde_json::json!({"query": "q"})).unwrap();
        assert_eq!(a.query, "q");
        assert!(a.max_results.is_none());
    }

    #[test]
    fn invalid_input_maps_to_invalid_params() {
        let e = mcp_error(&Error::InvalidInput("max_results must be >= 1".to_string()));
        assert_eq!(e.code, McpErrorCode::INVALID_PARAMS);
        let data = e.data.expect("error data");
        assert_eq!(data["code"].as_str(), Some("invalid_params"));
        assert_eq!(data["retryable"].as_bool(), Some(false));
    }

    #[test]
    fn synthesis_failure_maps_to_internal_error() {
        let e = mcp_error(&Error::Llm("openai chat.completions HTTP 500".to_string()));
        assert_eq!(e.code, McpErrorCode::INTERNAL_ERROR);
        assert!(e.message.contains("HTTP 500"));
        let data = e.data.expect("error data");
        assert_eq!(data["code"].as_str(), Some(ErrorCode::SynthesisFailed.as_str()));
    }

    #[test]
    fn missing_key_is_not_retryable() {
        let code = ErrorCode::of(&Error::NotConfigured("missing OPENAI_API_KEY".to_string()));
        assert_eq!(code, ErrorCode::NotConfigured);
        assert!(!code.retryable());
    }
}
