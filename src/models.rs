use serde::{Deserialize, Serialize};

use crate::{config::Config, database::DbPool};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// One persisted company row, serialized in the shape the query endpoint
/// returns (`foundedDate` keeps its source-side camelCase spelling).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredCompany {
    pub id: Option<i64>,
    pub name: String,
    pub address: Option<String>,
    pub website: Option<String>,
    pub founded: Option<String>,
    #[serde(rename = "foundedDate")]
    pub founded_date: Option<String>,
    pub members: Option<String>,
    pub url: Option<String>,
    pub source: Option<String>,
    pub page: Option<i64>,
    pub created_date: String,
}

/// One parsed CSV row from the bulk import endpoint. Missing columns and
/// empty fields deserialize to None so constraint checks happen in the
/// database, inside the import transaction.
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyImportRow {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

pub struct CliApp {
    pub config: Config,
    pub db_pool: DbPool,
}
