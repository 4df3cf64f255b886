//! Affiliate CLI
//!
//! Generate links and HTML cards from the command line.

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use affiliate::compose::HtmlComposer;
use affiliate::config::{normalize_tag, AffiliateConfig, DEFAULT_TAG_ENV};
use affiliate::error::{AffiliateError, Result};
use affiliate::link::LinkGenerator;
use affiliate::logging::{init_logging, LogFormat};
use affiliate::mcp::error_text;
use affiliate::scrape::PageScraper;

#[derive(Parser)]
#[command(name = "affiliate")]
#[command(about = "Amazon affiliate link CLI")]
#[command(version)]
struct Cli {
    /// Affiliate tag used when a command does not supply one
    #[arg(long, env = DEFAULT_TAG_ENV)]
    default_tag: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the affiliate link for a product URL
    Link {
        /// Amazon product URL
        url: String,
        /// Affiliate tag
        #[arg(short, long)]
        tag: Option<String>,
    },
    /// Print an HTML card with the affiliate link and product image
    Html {
        /// Amazon product URL
        url: String,
        /// Affiliate tag
        #[arg(short, long)]
        tag: Option<String>,
    },
}

async fn run(cli: Cli) -> Result<String> {
    let config = AffiliateConfig {
        default_tag: normalize_tag(cli.default_tag),
        ..AffiliateConfig::default()
    };
    let links = LinkGenerator::new(&config);

    match cli.command {
        Commands::Link { url, tag } => links
            .generate_link(&url, tag.as_deref())
            .map_err(AffiliateError::link_generation),
        Commands::Html { url, tag } => {
            let composer = HtmlComposer::new(links, PageScraper::new(&config)?);
            composer.compose_html(&url, tag.as_deref()).await
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(LogFormat::Text) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match run(cli).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", error_text(&e));
            ExitCode::FAILURE
        }
    }
}
