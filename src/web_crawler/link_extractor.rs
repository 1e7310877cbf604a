// src/web_crawler/link_extractor.rs
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

/// The section whose presence signals a listing page has rendered its posts.
pub const LISTING_READY_SELECTOR: &str = r#"section[class^="ProjectListJobPostsLaptop"]"#;

// Detail-page anchors, scoped to the listing section so navigation chrome
// elsewhere on the page is never picked up. Requiring href in the selector
// drops anchors without a usable target.
const COMPANY_LINK_SELECTOR: &str =
    r#"section[class^="ProjectListJobPostsLaptop"] a[href^="/companies"]"#;

/// Collects company detail links from a rendered listing page, in document
/// order, resolved to absolute URLs against the directory origin.
pub fn extract_company_links(html: &str, base: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(COMPANY_LINK_SELECTOR).unwrap();

    let mut links = Vec::new();
    for element in document.select(&selector) {
        if let Some(href) = element.value().attr("href") {
            match base.join(href) {
                Ok(resolved) => links.push(resolved.to_string()),
                Err(e) => debug!("Skipping unresolvable href {:?}: {}", href, e),
            }
        }
    }

    links
}
