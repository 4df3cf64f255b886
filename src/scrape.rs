//! Product page scraping
//!
//! Fetches a product page once and pulls the product image out of its markup.
//! Page structure is not under our control, so extraction tries a fixed list
//! of known image locations in order.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use crate::config::AffiliateConfig;
use crate::error::{Result, ScrapeError};

/// Image locations, most specific first: main product image, legacy book
/// cover, Kindle cover.
pub const IMAGE_LOCATIONS: [&str; 3] = ["#landingImage", "#imgBlkFront", "#ebooksImgBlkFront"];

static IMAGE_SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    IMAGE_LOCATIONS
        .iter()
        .map(|location| Selector::parse(location).expect("valid image selector"))
        .collect()
});

/// Return the first non-empty `src` among [`IMAGE_LOCATIONS`]
pub fn extract_image_url(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    IMAGE_SELECTORS
        .iter()
        .zip(IMAGE_LOCATIONS)
        .find_map(|(selector, location)| {
            let src = document
                .select(selector)
                .next()?
                .value()
                .attr("src")
                .filter(|src| !src.trim().is_empty())?;
            tracing::debug!(location, "Found product image");
            Some(src.to_string())
        })
}

/// Fetches product pages and extracts their image URL
#[derive(Debug, Clone)]
pub struct PageScraper {
    client: reqwest::Client,
}

impl PageScraper {
    /// Create a scraper that identifies as the configured browser user agent
    pub fn new(config: &AffiliateConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(ScrapeError::Client)?;

        Ok(Self { client })
    }

    /// Single GET of `url`, then image extraction. No retries.
    pub async fn fetch_product_image(&self, url: &str) -> Result<String> {
        tracing::debug!(url, "Fetching product page");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| ScrapeError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status,
            }
            .into());
        }

        let body = response.text().await.map_err(|source| ScrapeError::Body {
            url: url.to_string(),
            source,
        })?;

        extract_image_url(&body).ok_or_else(|| {
            ScrapeError::ImageNotFound {
                url: url.to_string(),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_USER_AGENT;
    use crate::error::AffiliateError;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    fn page(body: &str) -> String {
        format!("<!DOCTYPE html><html><head><title>p</title></head><body>{body}</body></html>")
    }

    #[test]
    fn test_extract_landing_image() {
        let html = page(r#"<div id="imgTagWrapperId"><img id="landingImage" src="https://m.media-amazon.com/images/I/landing.jpg"></div>"#);
        assert_eq!(
            extract_image_url(&html).as_deref(),
            Some("https://m.media-amazon.com/images/I/landing.jpg")
        );
    }

    #[test]
    fn test_landing_image_preferred_over_later_locations() {
        let html = page(
            r#"<img id="ebooksImgBlkFront" src="ebook.jpg">
               <img id="imgBlkFront" src="front.jpg">
               <img id="landingImage" src="landing.jpg">"#,
        );
        assert_eq!(extract_image_url(&html).as_deref(), Some("landing.jpg"));
    }

    #[test]
    fn test_empty_src_falls_through() {
        let html = page(
            r#"<img id="landingImage" src="">
               <img id="imgBlkFront">
               <img id="ebooksImgBlkFront" src="ebook.jpg">"#,
        );
        assert_eq!(extract_image_url(&html).as_deref(), Some("ebook.jpg"));
    }

    #[test]
    fn test_no_known_location() {
        let html = page(r#"<img id="somethingElse" src="other.jpg">"#);
        assert_eq!(extract_image_url(&html), None);
    }

    #[test]
    fn test_garbage_markup_yields_none() {
        assert_eq!(extract_image_url("<<<not html at all"), None);
        assert_eq!(extract_image_url(""), None);
    }

    #[tokio::test]
    async fn test_fetch_sends_browser_user_agent() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/dp/B000ABCD12"))
            .and(|req: &Request| {
                req.headers
                    .get("user-agent")
                    .and_then(|v| v.to_str().ok())
                    == Some(DEFAULT_USER_AGENT)
            })
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(page(r#"<img id="imgBlkFront" src="front.jpg">"#)),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let scraper = PageScraper::new(&AffiliateConfig::default()).unwrap();
        let url = format!("{}/dp/B000ABCD12", mock_server.uri());
        let image = scraper.fetch_product_image(&url).await.unwrap();

        assert_eq!(image, "front.jpg");
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/dp/B000ABCD12"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&mock_server)
            .await;

        let scraper = PageScraper::new(&AffiliateConfig::default()).unwrap();
        let url = format!("{}/dp/B000ABCD12", mock_server.uri());
        let err = scraper.fetch_product_image(&url).await.unwrap_err();

        match err {
            AffiliateError::Scrape(ScrapeError::Status { status, .. }) => {
                assert_eq!(status.as_u16(), 503);
            }
            other => panic!("Expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_page_without_image() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(page("<p>captcha</p>")))
            .mount(&mock_server)
            .await;

        let scraper = PageScraper::new(&AffiliateConfig::default()).unwrap();
        let url = format!("{}/dp/B000ABCD12", mock_server.uri());
        let err = scraper.fetch_product_image(&url).await.unwrap_err();

        assert!(matches!(
            err,
            AffiliateError::Scrape(ScrapeError::ImageNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        // Nothing listens on port 9 on the loopback interface
        let scraper = PageScraper::new(&AffiliateConfig::default()).unwrap();
        let err = scraper
            .fetch_product_image("http://127.0.0.1:9/dp/B000ABCD12")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AffiliateError::Scrape(ScrapeError::Request { .. })
        ));
    }
}
