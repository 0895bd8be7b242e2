use askweb_core::Error;
use rmcp::ErrorData as McpError;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidParams,
    NotConfigured,
    SearchFailed,
    SynthesisFailed,
}

impl ErrorCode {
    pub(crate) fn of(e: &Error) -> Self {
        match e {
            Error::InvalidInput(_) => Self::InvalidParams,
            Error::NotConfigured(_) => Self::NotConfigured,
            Error::Search(_) => Self::SearchFailed,
            Error::Llm(_) => Self::SynthesisFailed,
        }
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::InvalidParams => "invalid_params",
            Self::NotConfigured => "not_configured",
            Self::SearchFailed => "search_failed",
            Self::SynthesisFailed => "synthesis_failed",
        }
    }

    pub(crate) fn retryable(self) -> bool {
        match self {
            Self::SearchFailed | Self::SynthesisFailed => true,
            // Configuration + invalid input are not retryable without changing something.
            Self::InvalidParams | Self::NotConfigured => false,
        }
    }

    pub(crate) fn hint(self) -> &'static str {
        match self {
            Self::InvalidParams => "Pass max_results >= 1, or omit it for the default of 5.",
            Self::NotConfigured => {
                "Set the missing API key in the server environment (or its .env file) and restart the server."
            }
            Self::SearchFailed => "The search provider failed; try again or check provider status.",
            Self::SynthesisFailed => {
                "The language model call failed. Check ASKWEB_OPENAI_API_KEY / OPENAI_API_KEY, the model name, and provider status."
            }
        }
    }
}

pub(crate) fn error_obj(
    code: ErrorCode,
    message: impl ToString,
    hint: impl ToString,
) -> serde_json::Value {
    #[derive(Serialize)]
    struct ErrorObject {
        code: &'static str,
        message: String,
        hint: String,
        retryable: bool,
    }

    let e = ErrorObject {
        code: code.as_str(),
        message: message.to_string(),
        hint: hint.to_string(),
        retryable: code.retryable(),
    };
    match serde_json::to_value(e) {
        Ok(v) => v,
        Err(_) => serde_json::json!({
            "code": code.as_str(),
            "message": message.to_string(),
            "hint": hint.to_string(),
            "retryable": code.retryable()
        }),
    }
}

/// Tool-call failure reported to the host. Carries a structured `error_obj` as `data`.
pub(crate) fn mcp_error(e: &Error) -> McpError {
    let code = ErrorCode::of(e);
    let message = e.to_string();
    let data = Some(error_obj(code, &message, code.hint()));
    match code {
        ErrorCode::InvalidParams => McpError::invalid_params(message, data),
        _ => McpError::internal_error(message, data),
    }
}
