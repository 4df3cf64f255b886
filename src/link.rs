//! Affiliate link generation
//!
//! Extracts the ASIN (Amazon Standard Identification Number) from a product
//! URL and builds the canonical `/dp/` link with the affiliate tag attached.
//! No network access.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::AffiliateConfig;
use crate::error::{AffiliateError, Result};

/// Marketplace host every generated link points at
pub const MARKETPLACE_HOST: &str = "www.amazon.co.jp";

/// `/` + 10 uppercase alphanumerics, followed by `/`, `?` or end of input
static ASIN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/([A-Z0-9]{10})(?:[/?]|$)").expect("valid ASIN regex"));

/// A 10-character product identifier found in a URL path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asin(String);

impl Asin {
    /// Find the leftmost ASIN segment in `url`
    pub fn extract(url: &str) -> Option<Self> {
        ASIN_PATTERN
            .captures(url)
            .and_then(|caps| caps.get(1))
            .map(|m| Asin(m.as_str().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Asin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Builds affiliate URLs from product URLs
#[derive(Debug, Clone, Default)]
pub struct LinkGenerator {
    default_tag: Option<String>,
}

impl LinkGenerator {
    pub fn new(config: &AffiliateConfig) -> Self {
        Self {
            default_tag: config.default_tag().map(str::to_string),
        }
    }

    /// Pick the per-call tag if non-empty, otherwise the configured default
    pub fn resolve_tag<'a>(&'a self, tag: Option<&'a str>) -> Result<&'a str> {
        tag.filter(|t| !t.is_empty())
            .or(self.default_tag.as_deref())
            .ok_or_else(|| AffiliateError::Config("no affiliate tag available".to_string()))
    }

    /// Convert a product URL into `https://<host>/dp/<ASIN>?tag=<tag>`
    ///
    /// The tag is resolved before the URL is inspected, so a missing tag is
    /// reported even for URLs that carry no ASIN.
    pub fn generate_link(&self, url: &str, tag: Option<&str>) -> Result<String> {
        let tag = self.resolve_tag(tag)?;
        let asin = Asin::extract(url).ok_or_else(|| {
            AffiliateError::InvalidInput(format!("not a recognizable product URL: {}", url))
        })?;

        tracing::debug!(asin = %asin, "Generated affiliate link");
        Ok(format!("https://{}/dp/{}?tag={}", MARKETPLACE_HOST, asin, tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator(default_tag: Option<&str>) -> LinkGenerator {
        let config = match default_tag {
            Some(tag) => AffiliateConfig::with_default_tag(tag),
            None => AffiliateConfig::default(),
        };
        LinkGenerator::new(&config)
    }

    #[test]
    fn test_gp_product_url() {
        let link = generator(None)
            .generate_link(
                "https://www.amazon.co.jp/gp/product/B000ABCD12/ref=xyz",
                Some("mytag-20"),
            )
            .unwrap();
        assert_eq!(link, "https://www.amazon.co.jp/dp/B000ABCD12?tag=mytag-20");
    }

    #[test]
    fn test_asin_at_end_of_url() {
        let link = generator(Some("aaa-22"))
            .generate_link("https://www.amazon.co.jp/dp/4873119782", None)
            .unwrap();
        assert_eq!(link, "https://www.amazon.co.jp/dp/4873119782?tag=aaa-22");
    }

    #[test]
    fn test_asin_followed_by_query() {
        let link = generator(Some("aaa-22"))
            .generate_link(
                "https://www.amazon.co.jp/Some-Title/dp/B08N5WRWNW?th=1&psc=1",
                None,
            )
            .unwrap();
        assert_eq!(link, "https://www.amazon.co.jp/dp/B08N5WRWNW?tag=aaa-22");
    }

    #[test]
    fn test_call_tag_overrides_default() {
        let link = generator(Some("aaa-22"))
            .generate_link("https://www.amazon.co.jp/dp/B000ABCD12", Some("bbb-33"))
            .unwrap();
        assert!(link.ends_with("tag=bbb-33"));
    }

    #[test]
    fn test_empty_call_tag_falls_back_to_default() {
        let link = generator(Some("aaa-22"))
            .generate_link("https://www.amazon.co.jp/dp/B000ABCD12", Some(""))
            .unwrap();
        assert!(link.ends_with("tag=aaa-22"));
    }

    #[test]
    fn test_leftmost_match_wins() {
        let link = generator(Some("t"))
            .generate_link(
                "https://www.amazon.co.jp/dp/AAAAAAAAA1/ref/BBBBBBBBB2/",
                None,
            )
            .unwrap();
        assert_eq!(link, "https://www.amazon.co.jp/dp/AAAAAAAAA1?tag=t");
    }

    #[test]
    fn test_lowercase_asin_is_rejected() {
        let err = generator(Some("t"))
            .generate_link("https://www.amazon.co.jp/dp/b000abcd12", None)
            .unwrap_err();
        assert!(matches!(err, AffiliateError::InvalidInput(_)));
    }

    #[test]
    fn test_eleven_char_segment_is_rejected() {
        let err = generator(Some("t"))
            .generate_link("https://www.amazon.co.jp/dp/B000ABCD123", None)
            .unwrap_err();
        assert!(matches!(err, AffiliateError::InvalidInput(_)));
    }

    #[test]
    fn test_not_a_product_url() {
        let err = generator(None)
            .generate_link("https://example.com/not-a-product", Some("mytag-20"))
            .unwrap_err();
        assert!(matches!(err, AffiliateError::InvalidInput(_)));
    }

    #[test]
    fn test_missing_tag_is_config_error() {
        let err = generator(None)
            .generate_link("https://www.amazon.co.jp/dp/B000ABCD12", None)
            .unwrap_err();
        assert!(matches!(err, AffiliateError::Config(_)));
    }

    #[test]
    fn test_missing_tag_reported_before_bad_url() {
        let err = generator(Some(""))
            .generate_link("https://example.com/not-a-product", Some(""))
            .unwrap_err();
        assert!(matches!(err, AffiliateError::Config(_)));
    }
}
