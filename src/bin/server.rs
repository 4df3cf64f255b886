//! Amazon affiliate MCP server
//!
//! Run with: affiliate-server

use clap::Parser;

use affiliate::config::{normalize_tag, AffiliateConfig, DEFAULT_TAG_ENV, DEFAULT_USER_AGENT};
use affiliate::error::Result;
use affiliate::logging::{init_logging, LogFormat};
use affiliate::mcp::{AffiliateHandler, McpServer};

#[derive(Parser, Debug)]
#[command(name = "affiliate-server")]
#[command(about = "MCP server generating Amazon affiliate links")]
#[command(version)]
struct Args {
    /// Affiliate tag used when a call does not supply one
    #[arg(long, env = DEFAULT_TAG_ENV)]
    default_tag: Option<String>,

    /// User agent sent when fetching product pages
    #[arg(long, env = "AFFILIATE_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Log output format
    #[arg(long, env = "AFFILIATE_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

impl Args {
    fn config(&self) -> AffiliateConfig {
        AffiliateConfig {
            default_tag: normalize_tag(self.default_tag.clone()),
            user_agent: self.user_agent.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if let Err(e) = init_logging(args.log_format) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let config = args.config();
    if config.default_tag().is_none() {
        tracing::warn!(
            "{} is not set; every tool call must supply a tag",
            DEFAULT_TAG_ENV
        );
    }

    let handler = AffiliateHandler::new(&config)?;
    let server = McpServer::new(handler);

    tracing::info!("Amazon affiliate MCP server starting...");
    server.run().await?;
    tracing::info!("Amazon affiliate MCP server stopped");

    Ok(())
}
