// src/web_crawler/types.rs
use serde::{Deserialize, Serialize};

/// Structured fields scraped from one company detail page. Sub-extractions
/// that find nothing leave an empty string; the website field instead falls
/// back to a literal sentinel so consumers can tell "absent at the source"
/// from "never scraped".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyDetails {
    pub company_name: String,
    pub address: String,
    pub website: String,
    pub founded: String,
    pub founded_date: String,
    pub members: Vec<String>,
}

/// Counters for one crawl run, reported at the end for logs and the CLI.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CrawlSummary {
    pub pages_visited: u32,
    pub pages_failed: u32,
    pub links_discovered: usize,
    pub companies_saved: usize,
    pub companies_skipped: usize,
    pub detail_failures: usize,
}
