use anyhow::Result;
use askweb_core::pipeline::DEFAULT_MAX_RESULTS;
use askweb_local::Settings;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[cfg(feature = "stdio")]
mod mcp;

#[derive(Parser, Debug)]
#[command(name = "askweb")]
#[command(
    about = "Web search with provider fallback and cited, LLM-written answers (MCP stdio server)",
    long_about = None
)]
struct Cli {
    /// Defaults to `mcp-stdio` when omitted.
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run as an MCP stdio server (for Cursor / Claude Desktop / MCP clients).
    #[cfg(feature = "stdio")]
    McpStdio,
    /// Run one search_web invocation and print the result.
    Search(SearchCmd),
    /// Diagnose configuration/launch issues (json; no secrets).
    Doctor(DoctorCmd),
    /// Print version info.
    Version(VersionCmd),
}

#[derive(clap::Args, Debug)]
struct SearchCmd {
    /// Search query.
    #[arg(long)]
    query: String,
    /// Maximum number of results to cite.
    #[arg(long, default_value_t = DEFAULT_MAX_RESULTS)]
    max_results: usize,
    /// Output format: text|json
    #[arg(long = "output", alias = "format", default_value = "text")]
    output: String,
}

#[derive(clap::Args, Debug)]
struct DoctorCmd {
    /// Output format: json|text
    #[arg(long = "output", alias = "format", default_value = "json")]
    output: String,
}

#[derive(clap::Args, Debug)]
struct VersionCmd {
    /// Output format: json|text
    #[arg(long = "output", alias = "format", default_value = "json")]
    output: String,
}

fn is_off(v: &str) -> bool {
    matches!(
        v.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}

/// Load `.env`-style files into the process environment. Existing variables always win.
///
/// Returns a note to log once tracing is up, since the log filter itself may come from the file.
fn load_env_files() -> Option<String> {
    if let Ok(p) = std::env::var("ASKWEB_ENV_FILE") {
        let p = p.trim();
        if !p.is_empty() {
            return match dotenvy::from_path(p) {
                Ok(()) => None,
                Err(e) => Some(format!("could not load ASKWEB_ENV_FILE={p}: {e}")),
            };
        }
    }
    if std::env::var("ASKWEB_DOTENV").is_ok_and(|v| is_off(&v)) {
        return None;
    }
    match dotenvy::dotenv() {
        Ok(_) => None,
        Err(e) if e.not_found() => None,
        Err(e) => Some(format!("could not load .env: {e}")),
    }
}

fn init_tracing() {
    let filter = std::env::var("ASKWEB_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .and_then(|s| EnvFilter::try_new(s).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("info"));

    // stdout belongs to the MCP transport.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let env_note = load_env_files();
    init_tracing();
    if let Some(note) = env_note {
        tracing::warn!("{note}");
    }

    let cli = Cli::parse();

    match cli.command {
        #[cfg(feature = "stdio")]
        None | Some(Commands::McpStdio) => {
            mcp::serve_stdio(Settings::from_env())
                .await
                .map_err(|e| anyhow::anyhow!(e.to_string()))?;
        }
        #[cfg(not(feature = "stdio"))]
        None => {
            anyhow::bail!("built without feature `stdio`; pass a subcommand (see --help)");
        }
        Some(Commands::Search(args)) => {
            let settings = Settings::from_env();
            let http = settings.http_client()?;
            let pipeline = askweb_local::pipeline(&http, &settings);
            let text = pipeline.run(&args.query, args.max_results).await?;
            match args.output.to_ascii_lowercase().as_str() {
                "json" => println!(
                    "{}",
                    serde_json::json!({
                        "schema_version": 1,
                        "kind": "search",
                        "ok": true,
                        "query": args.query,
                        "max_results": args.max_results,
                        "text": text,
                    })
                ),
                _ => println!("{text}"),
            }
        }
        Some(Commands::Doctor(args)) => doctor(args).await?,
        Some(Commands::Version(args)) => {
            let v = serde_json::json!({
                "schema_version": 1,
                "kind": "version",
                "ok": true,
                "name": "askweb",
                "version": env!("CARGO_PKG_VERSION"),
            });
            match args.output.to_ascii_lowercase().as_str() {
                "text" => println!("askweb {}", env!("CARGO_PKG_VERSION")),
                _ => println!("{}", v),
            }
        }
    }

    Ok(())
}

async fn doctor(args: DoctorCmd) -> Result<()> {
    let t0 = std::time::Instant::now();
    let settings = Settings::from_env();

    let mut checks: Vec<serde_json::Value> = Vec::new();
    for (name, configured, hint) in [
        (
            "firecrawl_api_key",
            settings.firecrawl_api_key.is_some(),
            "Set ASKWEB_FIRECRAWL_API_KEY (or FIRECRAWL_API_KEY). Without it every search goes straight to Tavily.",
        ),
        (
            "tavily_api_key",
            settings.tavily_api_key.is_some(),
            "Set ASKWEB_TAVILY_API_KEY (or TAVILY_API_KEY). Without it there is no fallback when Firecrawl fails.",
        ),
        (
            "openai_api_key",
            settings.openai_api_key.is_some(),
            "Set ASKWEB_OPENAI_API_KEY (or OPENAI_API_KEY). Without it search_web fails whenever results are found.",
        ),
    ] {
        checks.push(serde_json::json!({
            "name": name,
            "ok": configured,
            "message": if configured { "configured" } else { "missing" },
            "hint": if configured { "" } else { hint },
        }));
    }

    // The MCP host sees exactly this tool list.
    #[cfg(feature = "stdio")]
    let (tools, registered) = {
        let tools = mcp::tool_names();
        let registered = tools.iter().any(|t| t == mcp::TOOL_NAME);
        (tools, registered)
    };
    #[cfg(not(feature = "stdio"))]
    let (tools, registered): (Vec<String>, bool) = (Vec::new(), false);
    checks.push(serde_json::json!({
        "name": "search_web_tool",
        "ok": registered,
        "message": if registered { "registered" } else { "not registered" },
        "hint": if registered {
            ""
        } else {
            "`mcp-stdio` requires building with feature `stdio`."
        },
        "tools": tools,
    }));

    let ok = checks.iter().all(|c| c["ok"].as_bool().unwrap_or(false));
    let payload = serde_json::json!({
        "schema_version": 1,
        "kind": "doctor",
        "ok": ok,
        "name": "askweb",
        "version": env!("CARGO_PKG_VERSION"),
        "platform": {
            "os": std::env::consts::OS,
            "arch": std::env::consts::ARCH,
        },
        "features": {
            "stdio": cfg!(feature = "stdio"),
        },
        "elapsed_ms": t0.elapsed().as_millis(),
        "configured": {
            "providers": {
                "firecrawl": settings.firecrawl_api_key.is_some(),
                "tavily": settings.tavily_api_key.is_some(),
            },
            "llm": {
                "openai": settings.openai_api_key.is_some(),
                "model": settings.model(),
            },
            "endpoints": {
                "firecrawl": settings.firecrawl_endpoint(),
                "tavily": settings.tavily_endpoint(),
                "openai": settings.openai_base_url(),
            },
            "http_timeout_ms": settings.http_timeout_ms,
        },
        "checks": checks,
    });
    match args.output.to_ascii_lowercase().as_str() {
        "text" => {
            println!("askweb {} (ok={})", env!("CARGO_PKG_VERSION"), ok);
            println!(
                "providers: firecrawl={} tavily={}",
                settings.firecrawl_api_key.is_some(),
                settings.tavily_api_key.is_some(),
            );
            println!(
                "llm: openai={} model={}",
                settings.openai_api_key.is_some(),
                settings.model(),
            );
            println!("checks:");
            if let Some(arr) = payload["checks"].as_array() {
                for c in arr {
                    let name = c["name"].as_str().unwrap_or("?");
                    let ok = c["ok"].as_bool().unwrap_or(false);
                    println!("- {}: {}", name, if ok { "ok" } else { "fail" });
                }
            }
        }
        _ => println!("{payload}"),
    }
    Ok(())
}
