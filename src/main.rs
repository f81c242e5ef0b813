use acertpix_mcp::app::App;
use acertpix_mcp::config::Settings;
use acertpix_mcp::errors::ToolError;
use acertpix_mcp::mcp::http::run_http;
use acertpix_mcp::mcp::server::McpServer;
use acertpix_mcp::products::ProductLine;
use clap::{Parser, ValueEnum};
use std::net::SocketAddr;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Transport {
    Stdio,
    Http,
}

/// MCP server exposing one Acertpix product line as tools.
#[derive(Debug, Parser)]
#[command(name = "acertpix-mcp", version)]
struct Cli {
    /// Product line to serve (falls back to ACERTPIX_PRODUCT).
    #[arg(long, value_enum)]
    product: Option<ProductLine>,

    #[arg(long, value_enum, default_value = "stdio")]
    transport: Transport,

    /// HTTP bind host (falls back to HOST).
    #[arg(long)]
    host: Option<String>,

    /// HTTP bind port (falls back to PORT).
    #[arg(long)]
    port: Option<u16>,
}

async fn run(cli: Cli) -> Result<(), ToolError> {
    let settings = Settings::from_env()?;
    let product = cli.product.or(settings.product).ok_or_else(|| {
        ToolError::configuration("no product line selected")
            .with_hint("Pass --product <analise|facematch|flash|lite|ocr|score> or set ACERTPIX_PRODUCT")
    })?;

    let app = Arc::new(App::initialize(&settings, product)?);
    let server = Arc::new(McpServer::new(app));

    match cli.transport {
        Transport::Stdio => server.run_stdio().await,
        Transport::Http => {
            let host = cli.host.unwrap_or_else(|| settings.host.clone());
            let port = cli.port.unwrap_or(settings.port);
            let addr: SocketAddr = format!("{}:{}", host, port).parse().map_err(|_| {
                ToolError::configuration(format!("invalid bind address {}:{}", host, port))
            })?;
            run_http(server, addr).await
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run(Cli::parse()).await {
        eprintln!("acertpix-mcp: {}", err);
        if let Some(hint) = &err.hint {
            eprintln!("hint: {}", hint);
        }
        std::process::exit(1);
    }
}
