use crate::{database::get_company_stats, models::CliApp};
use tracing::debug;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

impl CliApp {
    pub async fn show_stats(&self) -> Result<()> {
        debug!("📊 show_stats() - Starting...");

        println!("\n📊 Database Statistics");
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━");

        let stats = get_company_stats(&self.db_pool).await?;

        println!("🏢 Total companies: {}", stats.total_companies);
        println!(
            "🕷️  Crawled from the directory: {}",
            stats.crawled_companies
        );
        println!("📥 Imported from CSV: {}", stats.imported_companies);
        println!(
            "🔗 With a usable website: {}",
            stats.companies_with_website
        );
        println!(
            "👥 With featured members: {}",
            stats.companies_with_members
        );

        if let (Some(first), Some(last)) = (stats.first_listing_page, stats.last_listing_page) {
            println!("📄 Listing pages covered: {}..={}", first, last);
        }

        if let Some(latest) = &stats.latest_created_date {
            let stored = chrono::DateTime::parse_from_rfc3339(latest)
                .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
                .unwrap_or_else(|_| latest.clone());
            println!("🕐 Last record stored: {}", stored);
        }

        Ok(())
    }
}
