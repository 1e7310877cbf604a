// src/web_crawler/company_extractor.rs
use scraper::{Html, Selector};

use crate::web_crawler::types::CompanyDetails;

/// Stored verbatim when a detail page exposes no website link.
pub const WEBSITE_FALLBACK: &str = "Website not available";

const NAME_SELECTOR: &str = r#"div[class^="BasicInfoSection__CompanyName"]"#;
const ADDRESS_SELECTOR: &str =
    r#"i.wt-icon-location + div[class^="BasicInfoSection__CompanyInfoDescription"]"#;
const WEBSITE_SELECTOR: &str = r#"div[class^="BasicInfoSection__CompanyInfoDescription"] a"#;
const FOUNDED_SELECTOR: &str =
    r#"i.wt-icon-person + div[class^="BasicInfoSection__CompanyInfoDescription"]"#;
const FOUNDED_DATE_SELECTOR: &str =
    r#"i.fa-flag + div[class^="BasicInfoSection__CompanyInfoDescription"]"#;
const MEMBER_NAME_SELECTOR: &str = r#"div[class^="FeaturedMembershipCard__Name"]"#;

/// Scrapes the six company fields out of a rendered detail page. Every field
/// is queried independently; a missing node yields an empty string (the
/// website falls back to its sentinel), never a failure.
pub fn extract_company_details(html: &str) -> CompanyDetails {
    let document = Html::parse_document(html);

    let company_name = select_text(&document, NAME_SELECTOR);
    let address = select_text(&document, ADDRESS_SELECTOR);
    let founded = select_text(&document, FOUNDED_SELECTOR);
    let founded_date = select_text(&document, FOUNDED_DATE_SELECTOR);

    let website_selector = Selector::parse(WEBSITE_SELECTOR).unwrap();
    let website = document
        .select(&website_selector)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(str::to_string)
        .unwrap_or_else(|| WEBSITE_FALLBACK.to_string());

    let member_selector = Selector::parse(MEMBER_NAME_SELECTOR).unwrap();
    let members: Vec<String> = document
        .select(&member_selector)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|name| !name.is_empty())
        .collect();

    CompanyDetails {
        company_name,
        address,
        website,
        founded,
        founded_date,
        members,
    }
}

fn select_text(document: &Html, selector: &str) -> String {
    let selector = Selector::parse(selector).unwrap();
    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}
