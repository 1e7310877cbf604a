use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub crawl: CrawlConfig,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CrawlConfig {
    pub base_url: String,
    pub start_page: u32,
    pub end_page: u32,
    pub request_timeout_seconds: u64,
    pub render_timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub port: u16,
    pub uploads_dir: String,
    pub public_dir: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            crawl: CrawlConfig {
                base_url: "https://www.wantedly.com".to_string(),
                start_page: 1786,
                end_page: 2000,
                request_timeout_seconds: 30,
                render_timeout_seconds: 30,
            },
            server: ServerConfig {
                port: 3000,
                uploads_dir: "uploads".to_string(),
                public_dir: "public".to_string(),
            },
            database: DatabaseConfig {
                path: "data/companies.db".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

pub async fn load_config(
    path: &str,
) -> std::result::Result<Config, Box<dyn std::error::Error + Send + Sync>> {
    let content = tokio::fs::read_to_string(path).await?;
    let config: Config = serde_yaml::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_yaml() {
        let yaml = r#"
crawl:
  base_url: "https://directory.example.com"
  start_page: 1
  end_page: 5
  request_timeout_seconds: 10
  render_timeout_seconds: 12
server:
  port: 8080
  uploads_dir: "tmp/uploads"
  public_dir: "public"
database:
  path: "tmp/test.db"
logging:
  level: "debug"
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.crawl.base_url, "https://directory.example.com");
        assert_eq!(config.crawl.start_page, 1);
        assert_eq!(config.crawl.end_page, 5);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.path, "tmp/test.db");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn default_covers_production_page_range() {
        let config = Config::default();
        assert_eq!(config.crawl.start_page, 1786);
        assert_eq!(config.crawl.end_page, 2000);
        assert_eq!(config.server.port, 3000);
    }
}
