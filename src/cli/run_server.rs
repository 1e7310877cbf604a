use crate::models::CliApp;
use crate::server::build_rocket;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

impl CliApp {
    /// Launches the REST API and blocks until the server shuts down.
    pub async fn run_server(&self) -> Result<()> {
        println!(
            "\n🚀 Starting API server on port {}",
            self.config.server.port
        );
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        println!("📡 GET  /companies   paginated company listing");
        println!("📥 POST /import      CSV bulk import");
        println!("📊 GET  /stats       database statistics");
        println!("🩺 GET  /health      service health");

        let _rocket = build_rocket(self.config.clone(), self.db_pool.clone())
            .launch()
            .await?;

        Ok(())
    }
}
