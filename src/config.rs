//! Process-wide configuration
//!
//! Read once at startup and shared read-only with every component.

/// Environment variable holding the default affiliate tag, read by the binaries
pub const DEFAULT_TAG_ENV: &str = "AMAZON_AFFILIATE_TAG";

/// Desktop browser user agent sent with product page fetches
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/130.0.0.0 Safari/537.36";

/// Configuration shared by the link generator and page scraper
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffiliateConfig {
    /// Tag used when a call supplies none. Empty means "not configured".
    pub default_tag: Option<String>,
    /// User agent for outbound page requests
    pub user_agent: String,
}

impl Default for AffiliateConfig {
    fn default() -> Self {
        Self {
            default_tag: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl AffiliateConfig {
    /// Create a config with the given default tag
    pub fn with_default_tag(tag: impl Into<String>) -> Self {
        Self {
            default_tag: normalize_tag(Some(tag.into())),
            ..Self::default()
        }
    }

    /// The configured default tag, if it is non-empty
    pub fn default_tag(&self) -> Option<&str> {
        self.default_tag.as_deref().filter(|t| !t.is_empty())
    }
}

/// Treat an empty tag the same as a missing one
pub fn normalize_tag(tag: Option<String>) -> Option<String> {
    tag.filter(|t| !t.is_empty())
}
