// src/cli/run_crawler.rs
use crate::models::CliApp;
use crate::web_crawler::CompanyCrawler;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

impl CliApp {
    pub async fn run_crawler(&self) -> Result<()> {
        println!("\n🕷️  Company Directory Crawler");
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        println!("🌐 Directory: {}", self.config.crawl.base_url);

        let start_page: u32 = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("First listing page")
            .default(self.config.crawl.start_page)
            .interact_text()?;

        let end_page: u32 = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Last listing page")
            .default(self.config.crawl.end_page.max(start_page))
            .interact_text()?;

        if end_page < start_page {
            println!("❌ Last page must not come before the first page");
            return Ok(());
        }

        println!(
            "\n🎯 Ready to crawl pages {}..={} ({} listing pages)",
            start_page,
            end_page,
            end_page - start_page + 1
        );

        if !Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Start crawling?")
            .interact()?
        {
            println!("❌ Crawl cancelled");
            return Ok(());
        }

        let crawler = CompanyCrawler::new(self.config.crawl.clone(), self.db_pool.clone());
        let summary = crawler.run(start_page, end_page).await?;

        println!("\n🎉 Crawl Summary");
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        println!("📄 Listing pages visited: {}", summary.pages_visited);
        if summary.pages_failed > 0 {
            println!("❌ Listing pages failed: {}", summary.pages_failed);
        }
        println!("🔗 Company links discovered: {}", summary.links_discovered);
        println!("✅ Companies saved: {}", summary.companies_saved);
        println!("⏭️  Already stored, skipped: {}", summary.companies_skipped);
        if summary.detail_failures > 0 {
            println!("⚠️  Company pages failed: {}", summary.detail_failures);
        }

        Ok(())
    }
}
