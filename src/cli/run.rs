use dialoguer::{theme::ColorfulTheme, Select};

use crate::{
    cli::cli::MenuAction,
    models::{CliApp, Result},
};
use tracing::error;

impl CliApp {
    pub async fn run(&self) -> Result<()> {
        println!("\n🚀 Welcome to Company Scraper!");
        println!("═══════════════════════════════════════");

        // Show initial stats
        self.show_stats().await?;

        loop {
            let actions = vec![
                MenuAction::RunCrawler,
                MenuAction::StartApiServer,
                MenuAction::ShowStats,
                MenuAction::Exit,
            ];

            let selection = Select::with_theme(&ColorfulTheme::default())
                .with_prompt("\nSelect an action")
                .default(0)
                .items(&actions)
                .interact()?;

            match &actions[selection] {
                MenuAction::RunCrawler => {
                    if let Err(e) = self.run_crawler().await {
                        error!("Crawl failed: {}", e);
                    }
                }
                MenuAction::StartApiServer => {
                    if let Err(e) = self.run_server().await {
                        error!("API server failed: {}", e);
                    }
                }
                MenuAction::ShowStats => {
                    if let Err(e) = self.show_stats().await {
                        error!("Failed to show stats: {}", e);
                    }
                }
                MenuAction::Exit => {
                    println!("\n👋 Thanks for using Company Scraper!");
                    break;
                }
            }
        }

        Ok(())
    }
}
