//! Embeddable product card
//!
//! Combines the affiliate link and the scraped product image into a fixed
//! HTML fragment. Both values are inserted verbatim, without HTML escaping.

use crate::error::{AffiliateError, Result};
use crate::link::LinkGenerator;
use crate::scrape::PageScraper;

/// Render the product card for an affiliate URL and image URL
pub fn render_card(affiliate_url: &str, image_url: &str) -> String {
    format!(
        r#"<div style="display: inline-block; max-width: 300px; padding: 12px; border: 1px solid #ddd; border-radius: 8px; text-align: center;">
  <a href="{affiliate_url}" target="_blank" rel="noopener noreferrer" style="text-decoration: none;">
    <img src="{image_url}" alt="Amazon product" style="max-width: 100%; height: auto; border: none;" />
    <div style="margin-top: 8px; padding: 8px 16px; background-color: #ff9900; color: #ffffff; font-weight: bold; border-radius: 4px;">Amazonで見る</div>
  </a>
</div>"#
    )
}

/// Builds the HTML card from a product URL
#[derive(Debug, Clone)]
pub struct HtmlComposer {
    links: LinkGenerator,
    scraper: PageScraper,
}

impl HtmlComposer {
    pub fn new(links: LinkGenerator, scraper: PageScraper) -> Self {
        Self { links, scraper }
    }

    /// Generate the link, then scrape the image from `url`.
    ///
    /// The link is built before any network access; a failure in either step
    /// fails the whole call and no partial fragment is returned.
    pub async fn compose_html(&self, url: &str, tag: Option<&str>) -> Result<String> {
        let affiliate_url = self
            .links
            .generate_link(url, tag)
            .map_err(AffiliateError::composition)?;

        let image_url = self
            .scraper
            .fetch_product_image(url)
            .await
            .map_err(AffiliateError::composition)?;

        Ok(render_card(&affiliate_url, &image_url))
    }
}
