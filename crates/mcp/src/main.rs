//! JobBOSS2 MCP server binary.

use anyhow::Context as _;
use clap::{Parser, ValueEnum};
use jobboss2_mcp::policy::{
    MutationPolicy, READ_ONLY_MODE_ENV_VAR, is_read_only_mode_enabled,
};
use jobboss2_mcp::server::Jb2McpServer;
use jobboss2_client::{ClientConfig, Jb2Client};
use rmcp::ServiceExt as _;
use rmcp::transport::stdio;
use rmcp::transport::streamable_http_server::{
    StreamableHttpService, session::local::LocalSessionManager,
};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Transport {
    Stdio,
    Http,
}

/// MCP server exposing the JobBOSS2 manufacturing ERP API as tools.
#[derive(Debug, Parser)]
#[command(name = "jobboss2-mcp", version, about)]
struct Cli {
    /// Base URL of the JobBOSS2 API, e.g. https://yourserver/api.
    #[arg(long, env = "JOBBOSS2_API_URL")]
    api_url: String,

    /// API key for the OAuth2 client-credentials flow.
    #[arg(long, env = "JOBBOSS2_API_KEY")]
    api_key: String,

    /// API secret for the OAuth2 client-credentials flow.
    #[arg(long, env = "JOBBOSS2_API_SECRET")]
    api_secret: String,

    /// Token endpoint; defaults to `{api-url}/auth/token` when unset.
    #[arg(long, env = "JOBBOSS2_OAUTH_TOKEN_URL")]
    token_url: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, env = "API_TIMEOUT", default_value_t = 30)]
    timeout: u64,

    /// Reject write tools process-wide. Truthy values: 1, true, yes, on.
    #[arg(
        long,
        env = READ_ONLY_MODE_ENV_VAR,
        value_name = "BOOL",
        num_args = 0..=1,
        default_missing_value = "true",
    )]
    read_only: Option<String>,

    /// Transport to serve on.
    #[arg(long, env = "MCP_TRANSPORT", value_enum, default_value = "stdio")]
    transport: Transport,

    /// Listen port for the HTTP transport.
    #[arg(long, env = "MCP_PORT", default_value_t = 8000)]
    port: u16,
}

impl Cli {
    fn client_config(&self) -> ClientConfig {
        let token_url = self.token_url.clone().unwrap_or_else(|| {
            format!("{}/auth/token", self.api_url.trim_end_matches('/'))
        });
        ClientConfig {
            api_url: self.api_url.clone(),
            api_key: self.api_key.clone(),
            api_secret: self.api_secret.clone(),
            token_url,
            timeout: Duration::from_secs(self.timeout),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout belongs to the stdio transport.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let client = Jb2Client::new(cli.client_config()).context("invalid JobBOSS2 configuration")?;
    client.spawn_refresh_task();

    let policy = MutationPolicy::new(is_read_only_mode_enabled(cli.read_only.as_deref()));
    if policy.is_read_only() {
        info!("read-only mode enabled; write tools will be rejected");
    }

    let server = Jb2McpServer::new(&client, policy).context("tool registration failed")?;
    info!(
        tools = server.registry().len(),
        transport = ?cli.transport,
        "starting jobboss2-mcp"
    );

    match cli.transport {
        Transport::Stdio => {
            let service = server
                .serve(stdio())
                .await
                .context("serve stdio transport")?;
            service.waiting().await?;
        }
        Transport::Http => {
            let service = StreamableHttpService::new(
                move || Ok(server.clone()),
                LocalSessionManager::default().into(),
                Default::default(),
            );
            let router = axum::Router::new().nest_service("/mcp", service);
            let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
            let listener = tokio::net::TcpListener::bind(addr)
                .await
                .with_context(|| format!("bind {addr}"))?;
            info!(%addr, "listening on /mcp");
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = tokio::signal::ctrl_c().await;
                })
                .await
                .context("serve http transport")?;
        }
    }

    Ok(())
}
