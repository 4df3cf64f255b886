//! Error types for the affiliate tool

use thiserror::Error;

/// Result type alias for affiliate operations
pub type Result<T> = std::result::Result<T, AffiliateError>;

/// Main error type
///
/// Each variant's message describes only its own layer. Wrapped causes are
/// reachable through [`std::error::Error::source`] and rendered once at the
/// protocol boundary by [`render_chain`].
#[derive(Error, Debug)]
pub enum AffiliateError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Scrape error")]
    Scrape(#[from] ScrapeError),

    #[error("Link generation failed")]
    LinkGeneration(#[source] Box<AffiliateError>),

    #[error("HTML generation failed")]
    Composition(#[source] Box<AffiliateError>),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures while fetching a product page or locating its image
#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to read response body from {url}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("no product image found at {url}")]
    ImageNotFound { url: String },
}

impl AffiliateError {
    /// Wrap a failure from the link tool
    pub fn link_generation(inner: AffiliateError) -> Self {
        AffiliateError::LinkGeneration(Box::new(inner))
    }

    /// Wrap a failure from one of the HTML generation steps
    pub fn composition(inner: AffiliateError) -> Self {
        AffiliateError::Composition(Box::new(inner))
    }

    /// The innermost error of this crate's own kinds, skipping operation wrappers
    pub fn root_kind(&self) -> &AffiliateError {
        match self {
            AffiliateError::LinkGeneration(inner) | AffiliateError::Composition(inner) => {
                inner.root_kind()
            }
            other => other,
        }
    }

    /// Get error code for MCP protocol
    pub fn code(&self) -> i64 {
        match self {
            AffiliateError::Config(_) => -32002,
            AffiliateError::InvalidInput(_) => -32602,
            AffiliateError::Scrape(_) => -32010,
            AffiliateError::LinkGeneration(inner) | AffiliateError::Composition(inner) => {
                inner.code()
            }
            _ => -32000,
        }
    }
}

/// Render an error and every error in its source chain as one line
///
/// `Composition(Scrape(ImageNotFound))` renders as
/// `HTML generation failed: Scrape error: no product image found at <url>`.
pub fn render_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut rendered = err.to_string();
    let mut current = err.source();
    while let Some(cause) = current {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        current = cause.source();
    }
    rendered
}
