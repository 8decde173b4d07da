use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod api;
mod config;

use config::{AppState, ServerConfig};

#[derive(Parser, Debug)]
#[command(name = "mailrelay")]
#[command(about = "MCP server exposing the SendGrid email API as tools", long_about = None)]
struct Args {
    /// SendGrid API key
    #[arg(long, env = "SENDGRID_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Path to configuration file
    #[arg(short, long, default_value = "mailrelay.toml")]
    config: PathBuf,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "3000")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mailrelay=info,tower_http=debug".into()),
        )
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    let args = Args::parse();

    tracing::info!("Starting mailrelay MCP server");

    // Load configuration
    let config = ServerConfig::load(&args.config)?;
    tracing::info!(base_url = %config.sendgrid.base_url, "SendGrid endpoint");

    let state = AppState::new(&config, &args.api_key)?;

    // Start API server
    let addr = format!("{}:{}", args.host, args.port);
    tracing::info!("Starting API server on {}", addr);

    api::serve(&addr, state).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["mailrelay", "--api-key", "SG.x"]).unwrap();

        assert_eq!(args.host, "127.0.0.1");
        assert_eq!(args.config, PathBuf::from("mailrelay.toml"));
    }

    #[test]
    fn test_args_command_is_valid() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
