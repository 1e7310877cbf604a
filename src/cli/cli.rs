use crate::config::Config;
use crate::database::DbPool;
use crate::models::CliApp;

#[derive(Debug, Clone)]
pub enum MenuAction {
    RunCrawler,
    StartApiServer,
    ShowStats,
    Exit,
}

impl std::fmt::Display for MenuAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MenuAction::RunCrawler => write!(f, "🕷️  Crawl the company directory"),
            MenuAction::StartApiServer => write!(f, "🚀 Start the API server"),
            MenuAction::ShowStats => write!(f, "📊 Show database statistics"),
            MenuAction::Exit => write!(f, "🚪 Exit"),
        }
    }
}

impl CliApp {
    pub fn new(config: Config, db_pool: DbPool) -> Self {
        Self { config, db_pool }
    }
}
