// src/web_crawler/crawler.rs
use std::time::Instant;

use tracing::{error, info};
use url::Url;

use crate::config::CrawlConfig;
use crate::database::{find_or_create_company, DbPool};
use crate::web_crawler::company_extractor::extract_company_details;
use crate::web_crawler::fetcher::{FetchError, HttpPageFetcher, PageFetcher};
use crate::web_crawler::link_extractor::{extract_company_links, LISTING_READY_SELECTOR};
use crate::web_crawler::types::CrawlSummary;

pub struct CompanyCrawler {
    fetcher: Box<dyn PageFetcher>,
    db_pool: DbPool,
    config: CrawlConfig,
}

impl CompanyCrawler {
    pub fn new(config: CrawlConfig, db_pool: DbPool) -> Self {
        let fetcher = HttpPageFetcher::new(
            config.request_timeout_seconds,
            config.render_timeout_seconds,
        );

        Self {
            fetcher: Box::new(fetcher),
            db_pool,
            config,
        }
    }

    /// Builds a crawler around a caller-supplied page source. Tests use this
    /// to drive the crawl from canned documents.
    pub fn with_fetcher(
        fetcher: Box<dyn PageFetcher>,
        config: CrawlConfig,
        db_pool: DbPool,
    ) -> Self {
        Self {
            fetcher,
            db_pool,
            config,
        }
    }

    /// Walks listing pages `start_page..=end_page` in order, visiting every
    /// company link each listing exposes. A failed listing or detail page is
    /// counted and skipped; the crawl itself keeps going.
    pub async fn run(
        &self,
        start_page: u32,
        end_page: u32,
    ) -> Result<CrawlSummary, Box<dyn std::error::Error + Send + Sync>> {
        let start_time = Instant::now();
        info!(
            "🕷️  Starting crawl of {} pages {}..={}",
            self.config.base_url, start_page, end_page
        );

        let base = Url::parse(&self.config.base_url)?;
        let mut summary = CrawlSummary::default();

        for page in start_page..=end_page {
            info!("Fetching page {}...", page);
            summary.pages_visited += 1;

            let links = match self.collect_company_links(&base, page).await {
                Ok(links) => links,
                Err(e) => {
                    error!("Error fetching page {}: {}", page, e);
                    summary.pages_failed += 1;
                    continue;
                }
            };
            summary.links_discovered += links.len();

            for link in links {
                info!("Crawling company {}...", link);

                let html = match self.fetcher.fetch(&link).await {
                    Ok(html) => html,
                    Err(e) => {
                        error!("Error crawling company {}: {}", link, e);
                        summary.detail_failures += 1;
                        continue;
                    }
                };

                let details = extract_company_details(&html);
                match find_or_create_company(
                    &self.db_pool,
                    &details,
                    &link,
                    &self.config.base_url,
                    page,
                )
                .await
                {
                    Ok(true) => summary.companies_saved += 1,
                    Ok(false) => summary.companies_skipped += 1,
                    Err(e) => {
                        error!("Error saving company {}: {}", link, e);
                        summary.detail_failures += 1;
                    }
                }
            }
        }

        info!(
            "🏁 Crawl complete: {} pages visited ({} failed), {} links, {} saved, {} skipped, {} detail failures in {:.2}s",
            summary.pages_visited,
            summary.pages_failed,
            summary.links_discovered,
            summary.companies_saved,
            summary.companies_skipped,
            summary.detail_failures,
            start_time.elapsed().as_secs_f64()
        );

        Ok(summary)
    }

    async fn collect_company_links(
        &self,
        base: &Url,
        page: u32,
    ) -> Result<Vec<String>, FetchError> {
        let mut url = base.clone();
        url.set_path("/projects");
        url.set_query(Some(&format!("page={}", page)));

        let html = self
            .fetcher
            .fetch_when_ready(url.as_str(), LISTING_READY_SELECTOR)
            .await?;
        Ok(extract_company_links(&html, base))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use std::collections::HashMap;
    use tempfile::TempDir;

    use crate::database::create_db_pool;

    struct FakePageFetcher {
        pages: HashMap<String, String>,
    }

    #[async_trait]
    impl PageFetcher for FakePageFetcher {
        async fn fetch(&self, url: &str) -> Result<String, FetchError> {
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| FetchError::Status {
                    url: url.to_string(),
                    status: StatusCode::NOT_FOUND,
                })
        }

        async fn fetch_when_ready(&self, url: &str, _marker: &str) -> Result<String, FetchError> {
            self.fetch(url).await
        }
    }

    fn test_config() -> CrawlConfig {
        CrawlConfig {
            base_url: "https://www.wantedly.com".to_string(),
            start_page: 1,
            end_page: 2,
            request_timeout_seconds: 5,
            render_timeout_seconds: 5,
        }
    }

    async fn test_pool() -> (DbPool, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");
        let pool = create_db_pool(path.to_str().unwrap()).await.unwrap();
        (pool, dir)
    }

    async fn count_companies(pool: &DbPool) -> i64 {
        let conn = pool.get().await.unwrap();
        conn.query_row("SELECT COUNT(*) FROM companies", [], |row| row.get(0))
            .unwrap()
    }

    fn listing(hrefs: &[&str]) -> String {
        let anchors: String = hrefs
            .iter()
            .map(|href| format!(r#"<a href="{}">job post</a>"#, href))
            .collect();
        format!(
            r#"<html><body><section class="ProjectListJobPostsLaptop__Wrap">{}</section></body></html>"#,
            anchors
        )
    }

    fn detail_page(name: &str, website: &str) -> String {
        format!(
            r#"<html><body>
            <div class="BasicInfoSection__CompanyName-sc">{}</div>
            <div class="BasicInfoSection__CompanyInfoDescription-sc"><a href="{}">site</a></div>
            </body></html>"#,
            name, website
        )
    }

    fn scenario_pages() -> HashMap<String, String> {
        let mut pages = HashMap::new();
        pages.insert(
            "https://www.wantedly.com/projects?page=1".to_string(),
            listing(&["/companies/acme", "/companies/broken"]),
        );
        // Page 2 renders its listing shell with no job posts on it.
        pages.insert(
            "https://www.wantedly.com/projects?page=2".to_string(),
            listing(&[]),
        );
        pages.insert(
            "https://www.wantedly.com/companies/acme".to_string(),
            detail_page("Acme Inc", "https://acme.example.com"),
        );
        pages
    }

    #[tokio::test]
    async fn saves_reachable_companies_and_counts_detail_failures() {
        let (pool, _dir) = test_pool().await;
        let fetcher = FakePageFetcher {
            pages: scenario_pages(),
        };
        let crawler =
            CompanyCrawler::with_fetcher(Box::new(fetcher), test_config(), pool.clone());

        let summary = crawler.run(1, 2).await.unwrap();

        assert_eq!(summary.pages_visited, 2);
        assert_eq!(summary.pages_failed, 0);
        assert_eq!(summary.links_discovered, 2);
        assert_eq!(summary.companies_saved, 1);
        assert_eq!(summary.companies_skipped, 0);
        assert_eq!(summary.detail_failures, 1);
        assert_eq!(count_companies(&pool).await, 1);
    }

    #[tokio::test]
    async fn recrawling_skips_companies_already_stored() {
        let (pool, _dir) = test_pool().await;
        let fetcher = FakePageFetcher {
            pages: scenario_pages(),
        };
        let crawler =
            CompanyCrawler::with_fetcher(Box::new(fetcher), test_config(), pool.clone());

        crawler.run(1, 2).await.unwrap();
        let second = crawler.run(1, 2).await.unwrap();

        assert_eq!(second.companies_saved, 0);
        assert_eq!(second.companies_skipped, 1);
        assert_eq!(count_companies(&pool).await, 1);
    }

    #[tokio::test]
    async fn a_failed_listing_page_does_not_stop_the_crawl() {
        let (pool, _dir) = test_pool().await;
        let mut pages = HashMap::new();
        pages.insert(
            "https://www.wantedly.com/projects?page=1".to_string(),
            listing(&["/companies/acme"]),
        );
        // page 2 is missing entirely
        pages.insert(
            "https://www.wantedly.com/projects?page=3".to_string(),
            listing(&["/companies/globex"]),
        );
        pages.insert(
            "https://www.wantedly.com/companies/acme".to_string(),
            detail_page("Acme Inc", "https://acme.example.com"),
        );
        pages.insert(
            "https://www.wantedly.com/companies/globex".to_string(),
            detail_page("Globex", "https://globex.example.com"),
        );

        let crawler = CompanyCrawler::with_fetcher(
            Box::new(FakePageFetcher { pages }),
            test_config(),
            pool.clone(),
        );

        let summary = crawler.run(1, 3).await.unwrap();

        assert_eq!(summary.pages_visited, 3);
        assert_eq!(summary.pages_failed, 1);
        assert_eq!(summary.companies_saved, 2);
        assert_eq!(count_companies(&pool).await, 2);
    }
}
