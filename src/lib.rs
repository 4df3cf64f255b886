//! Amazon affiliate tool
//!
//! Turns Amazon product URLs into affiliate links and embeddable HTML cards,
//! served to AI hosts over the Model Context Protocol.

pub mod compose;
pub mod config;
pub mod error;
pub mod link;
pub mod logging;
pub mod mcp;
pub mod scrape;

pub use compose::HtmlComposer;
pub use config::AffiliateConfig;
pub use error::{AffiliateError, Result, ScrapeError};
pub use link::LinkGenerator;
pub use scrape::PageScraper;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
