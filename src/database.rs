use chrono::Utc;
use mobc::{Manager, Pool};
use rusqlite::{params, Connection, Result as SqliteResult};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

use crate::models::CompanyImportRow;
use crate::web_crawler::types::CompanyDetails;

pub struct SqliteManager {
    db_path: String,
}

impl SqliteManager {
    pub fn new(db_path: String) -> Self {
        debug!("🔧 Creating SqliteManager for path: {}", db_path);
        Self { db_path }
    }
}

#[async_trait::async_trait]
impl Manager for SqliteManager {
    type Connection = Connection;
    type Error = rusqlite::Error;

    async fn connect(&self) -> Result<Self::Connection, Self::Error> {
        debug!("🔌 Opening database: {}", self.db_path);
        let conn = Connection::open(&self.db_path)?;

        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;

        init_database(&conn)?;
        debug!("✅ Database connection ready");
        Ok(conn)
    }

    async fn check(&self, conn: Self::Connection) -> Result<Self::Connection, Self::Error> {
        conn.query_row("SELECT 1", [], |_| Ok(()))?;
        Ok(conn)
    }
}

fn init_database(conn: &Connection) -> SqliteResult<()> {
    create_companies_table(conn)?;
    create_indexes(conn)?;
    Ok(())
}

fn create_companies_table(conn: &Connection) -> SqliteResult<()> {
    // url is UNIQUE but nullable: crawled rows always carry one, imported
    // rows never do, and SQLite permits any number of NULLs under UNIQUE.
    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS companies (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            address TEXT,
            website TEXT,
            founded TEXT,
            founded_date TEXT,
            members TEXT,
            url TEXT UNIQUE,
            source TEXT,
            page INTEGER,
            created_date TEXT NOT NULL
        )
        "#,
        [],
    )?;
    Ok(())
}

fn create_indexes(conn: &Connection) -> SqliteResult<()> {
    let indexes = [
        "CREATE INDEX IF NOT EXISTS idx_companies_website ON companies(website)",
        "CREATE INDEX IF NOT EXISTS idx_companies_name ON companies(name)",
        "CREATE INDEX IF NOT EXISTS idx_companies_created_date ON companies(created_date)",
    ];

    for index_sql in indexes.iter() {
        conn.execute(index_sql, [])?;
    }
    Ok(())
}

pub type DbPool = Pool<SqliteManager>;

pub async fn create_db_pool(
    db_path: &str,
) -> Result<DbPool, Box<dyn std::error::Error + Send + Sync>> {
    let parent = Path::new(db_path).parent();
    if let Some(parent) = parent.filter(|dir| !dir.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let manager = SqliteManager::new(db_path.to_string());
    let pool = Pool::builder().max_open(10).max_idle(5).build(manager);

    info!("✓ SQLite connection pool created: {}", db_path);
    Ok(pool)
}

/// Inserts a crawled company keyed by its detail-page url. Returns true when
/// a new row was created, false when the url was already stored. The
/// existence check and the insert are one statement, so two crawls of the
/// same url can never race into a duplicate.
pub async fn find_or_create_company(
    pool: &DbPool,
    details: &CompanyDetails,
    url: &str,
    source: &str,
    page: u32,
) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
    let conn = pool.get().await?;

    let changed = conn.execute(
        r#"
        INSERT INTO companies (
            name, address, website, founded, founded_date,
            members, url, source, page, created_date
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
        ON CONFLICT (url) DO NOTHING
        "#,
        params![
            details.company_name,
            details.address,
            details.website,
            details.founded,
            details.founded_date,
            details.members.join(", "),
            url,
            source,
            page,
            Utc::now().to_rfc3339(),
        ],
    )?;

    if changed > 0 {
        info!("✓ Saved company: {}", details.company_name);
        Ok(true)
    } else {
        info!("Company already exists in DB, skipping: {}", url);
        Ok(false)
    }
}

/// Imports parsed CSV rows inside a single transaction. Rows whose website
/// is already stored are skipped; any row error rolls the whole batch back
/// (the transaction is dropped uncommitted on the error path). Returns how
/// many rows were actually created.
pub async fn import_companies(
    pool: &DbPool,
    rows: &[CompanyImportRow],
) -> Result<usize, Box<dyn std::error::Error + Send + Sync>> {
    let mut conn = pool.get().await?;
    let tx = conn.transaction()?;
    let now = Utc::now().to_rfc3339();

    let mut created = 0usize;
    for row in rows {
        // IS instead of = so rows without a website dedup among themselves.
        let exists: bool = tx.query_row(
            "SELECT EXISTS(SELECT 1 FROM companies WHERE website IS ?1)",
            params![row.website],
            |r| r.get(0),
        )?;
        if exists {
            continue;
        }

        tx.execute(
            "INSERT INTO companies (name, website, source, created_date) VALUES (?1, ?2, ?3, ?4)",
            params![row.name, row.website, row.source, now],
        )?;
        created += 1;
    }

    tx.commit()?;
    info!(
        "✓ CSV import committed: {} new companies out of {} rows",
        created,
        rows.len()
    );
    Ok(created)
}

#[derive(Debug, Serialize)]
pub struct CompanyStats {
    pub total_companies: i64,
    pub crawled_companies: i64,
    pub imported_companies: i64,
    pub companies_with_website: i64,
    pub companies_with_members: i64,
    pub first_listing_page: Option<i64>,
    pub last_listing_page: Option<i64>,
    pub latest_created_date: Option<String>,
}

pub async fn get_company_stats(
    pool: &DbPool,
) -> Result<CompanyStats, Box<dyn std::error::Error + Send + Sync>> {
    debug!("📊 Collecting company statistics...");
    let conn = pool.get().await?;

    let count = |query: &str| -> Result<i64, rusqlite::Error> {
        conn.query_row(query, [], |row| row.get(0))
    };

    let total_companies = count("SELECT COUNT(*) FROM companies")?;
    let crawled_companies = count("SELECT COUNT(*) FROM companies WHERE url IS NOT NULL")?;
    let imported_companies = count("SELECT COUNT(*) FROM companies WHERE url IS NULL")?;
    let companies_with_website = count(
        "SELECT COUNT(*) FROM companies
         WHERE website IS NOT NULL AND website != '' AND website != 'Website not available'",
    )?;
    let companies_with_members =
        count("SELECT COUNT(*) FROM companies WHERE members IS NOT NULL AND members != ''")?;

    let (first_listing_page, last_listing_page) = conn.query_row(
        "SELECT MIN(page), MAX(page) FROM companies WHERE page IS NOT NULL",
        [],
        |row| {
            Ok((
                row.get::<_, Option<i64>>(0)?,
                row.get::<_, Option<i64>>(1)?,
            ))
        },
    )?;

    let latest_created_date = conn.query_row(
        "SELECT MAX(created_date) FROM companies",
        [],
        |row| row.get::<_, Option<String>>(0),
    )?;

    Ok(CompanyStats {
        total_companies,
        crawled_companies,
        imported_companies,
        companies_with_website,
        companies_with_members,
        first_listing_page,
        last_listing_page,
        latest_created_date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

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

    fn sample_details(name: &str, website: &str) -> CompanyDetails {
        CompanyDetails {
            company_name: name.to_string(),
            address: "1-2-3 Shibuya, Tokyo".to_string(),
            website: website.to_string(),
            founded: "About 50 members".to_string(),
            founded_date: "Founded in 2014".to_string(),
            members: vec!["Aya Tanaka".to_string(), "Ken Sato".to_string()],
        }
    }

    #[tokio::test]
    async fn find_or_create_is_idempotent() {
        let (pool, _dir) = test_pool().await;
        let details = sample_details("Acme Inc", "https://acme.example.com");

        let first = find_or_create_company(
            &pool,
            &details,
            "https://www.wantedly.com/companies/acme",
            "https://www.wantedly.com",
            1786,
        )
        .await
        .unwrap();
        let second = find_or_create_company(
            &pool,
            &details,
            "https://www.wantedly.com/companies/acme",
            "https://www.wantedly.com",
            1790,
        )
        .await
        .unwrap();

        assert!(first);
        assert!(!second);
        assert_eq!(count_companies(&pool).await, 1);
    }

    #[tokio::test]
    async fn find_or_create_joins_members() {
        let (pool, _dir) = test_pool().await;
        let details = sample_details("Acme Inc", "https://acme.example.com");

        find_or_create_company(
            &pool,
            &details,
            "https://www.wantedly.com/companies/acme",
            "https://www.wantedly.com",
            1786,
        )
        .await
        .unwrap();

        let conn = pool.get().await.unwrap();
        let members: String = conn
            .query_row("SELECT members FROM companies", [], |row| row.get(0))
            .unwrap();
        assert_eq!(members, "Aya Tanaka, Ken Sato");
    }

    #[tokio::test]
    async fn import_creates_new_rows() {
        let (pool, _dir) = test_pool().await;
        let rows = vec![
            CompanyImportRow {
                name: Some("Globex".to_string()),
                website: Some("https://globex.example.com".to_string()),
                source: Some("partner-list".to_string()),
            },
            CompanyImportRow {
                name: Some("Initech".to_string()),
                website: Some("https://initech.example.com".to_string()),
                source: Some("partner-list".to_string()),
            },
        ];

        let created = import_companies(&pool, &rows).await.unwrap();
        assert_eq!(created, 2);
        assert_eq!(count_companies(&pool).await, 2);
    }

    #[tokio::test]
    async fn import_skips_already_stored_websites() {
        let (pool, _dir) = test_pool().await;
        let details = sample_details("Acme Inc", "https://acme.example.com");
        find_or_create_company(
            &pool,
            &details,
            "https://www.wantedly.com/companies/acme",
            "https://www.wantedly.com",
            1786,
        )
        .await
        .unwrap();

        // Two rows, both colliding with the stored website: the batch must
        // commit cleanly and create nothing.
        let rows = vec![
            CompanyImportRow {
                name: Some("Acme Inc".to_string()),
                website: Some("https://acme.example.com".to_string()),
                source: Some("partner-list".to_string()),
            },
            CompanyImportRow {
                name: Some("Acme Incorporated".to_string()),
                website: Some("https://acme.example.com".to_string()),
                source: Some("other-list".to_string()),
            },
        ];

        let created = import_companies(&pool, &rows).await.unwrap();
        assert_eq!(created, 0);
        assert_eq!(count_companies(&pool).await, 1);
    }

    #[tokio::test]
    async fn import_rolls_back_the_whole_batch_on_error() {
        let (pool, _dir) = test_pool().await;
        let rows = vec![
            CompanyImportRow {
                name: Some("Globex".to_string()),
                website: Some("https://globex.example.com".to_string()),
                source: Some("partner-list".to_string()),
            },
            // name is NOT NULL in the schema, so this row fails the batch.
            CompanyImportRow {
                name: None,
                website: Some("https://nameless.example.com".to_string()),
                source: Some("partner-list".to_string()),
            },
        ];

        let result = import_companies(&pool, &rows).await;
        assert!(result.is_err());
        assert_eq!(count_companies(&pool).await, 0);
    }

    #[tokio::test]
    async fn import_dedups_rows_within_one_batch() {
        let (pool, _dir) = test_pool().await;
        let row = CompanyImportRow {
            name: Some("Globex".to_string()),
            website: Some("https://globex.example.com".to_string()),
            source: Some("partner-list".to_string()),
        };

        let created = import_companies(&pool, &[row.clone(), row]).await.unwrap();
        assert_eq!(created, 1);
        assert_eq!(count_companies(&pool).await, 1);
    }
}
