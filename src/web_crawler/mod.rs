pub mod company_extractor;
pub mod crawler;
pub mod fetcher;
pub mod link_extractor;
pub mod types;

// Re-export the main types for easy importing
pub use crawler::CompanyCrawler;
pub use fetcher::{FetchError, HttpPageFetcher, PageFetcher};
pub use types::{CompanyDetails, CrawlSummary};
