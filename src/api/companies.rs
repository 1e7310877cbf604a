// src/api/companies.rs
use crate::database::DbPool;
use crate::models::StoredCompany;
use crate::server::ServerState;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rocket::http::Status;
use rocket::response::status;
use rocket::{get, serde::json::Json, FromForm, State};
use serde::Serialize;
use tracing::error;

/// Query parameters of `GET /companies`. Every field is optional; a value
/// that fails to parse is treated as absent, so a bad `page=abc` degrades to
/// the default instead of rejecting the request.
#[derive(Debug, FromForm)]
pub struct CompanyQuery {
    pub page: Option<i64>,
    #[field(name = "pageSize")]
    pub page_size: Option<i64>,
    pub search: Option<String>,
    #[field(name = "startDate")]
    pub start_date: Option<String>,
    #[field(name = "endDate")]
    pub end_date: Option<String>,
}

#[derive(Serialize)]
pub struct CompaniesPage {
    pub data: Vec<StoredCompany>,
    pub total: i64,
    pub pages: i64,
    #[serde(rename = "currentPage")]
    pub current_page: i64,
}

#[get("/companies?<query..>")]
pub async fn get_companies(
    state: &State<ServerState>,
    query: CompanyQuery,
) -> Result<Json<CompaniesPage>, status::Custom<String>> {
    match load_companies_page(&state.db_pool, &query).await {
        Ok(page) => Ok(Json(page)),
        Err(e) => {
            error!("Error fetching companies: {}", e);
            Err(status::Custom(
                Status::InternalServerError,
                "An error occurred while fetching companies".to_string(),
            ))
        }
    }
}

async fn load_companies_page(
    pool: &DbPool,
    query: &CompanyQuery,
) -> Result<CompaniesPage, Box<dyn std::error::Error + Send + Sync>> {
    let page = query.page.unwrap_or(1).max(1);
    let page_size = query.page_size.unwrap_or(10).clamp(1, 1000);
    let offset = (page - 1) * page_size;

    let conn = pool.get().await?;

    // Build WHERE clause
    let mut where_conditions = vec!["1=1".to_string()];
    let mut params = Vec::new();

    if let Some(term) = query.search.as_deref().filter(|term| !term.is_empty()) {
        where_conditions.push("name LIKE ?".to_string());
        params.push(format!("%{}%", term));
    }

    // The creation-date window only applies when both bounds parse.
    if let (Some(start), Some(end)) = (
        query.start_date.as_deref().and_then(parse_filter_date),
        query.end_date.as_deref().and_then(parse_filter_date),
    ) {
        where_conditions.push("created_date BETWEEN ? AND ?".to_string());
        params.push(start.to_rfc3339());
        params.push(end.to_rfc3339());
    }

    let where_clause = where_conditions.join(" AND ");

    let count_query = format!("SELECT COUNT(*) FROM companies WHERE {}", where_clause);
    let total: i64 = conn.query_row(
        &count_query,
        rusqlite::params_from_iter(params.iter()),
        |row| row.get(0),
    )?;

    let select_query = format!(
        "SELECT id, name, address, website, founded, founded_date,
                members, url, source, page, created_date
         FROM companies
         WHERE {}
         ORDER BY id
         LIMIT {} OFFSET {}",
        where_clause, page_size, offset
    );

    let mut stmt = conn.prepare(&select_query)?;
    let company_iter = stmt.query_map(rusqlite::params_from_iter(params.iter()), |row| {
        Ok(StoredCompany {
            id: row.get(0)?,
            name: row.get(1)?,
            address: row.get(2)?,
            website: row.get(3)?,
            founded: row.get(4)?,
            founded_date: row.get(5)?,
            members: row.get(6)?,
            url: row.get(7)?,
            source: row.get(8)?,
            page: row.get(9)?,
            created_date: row.get(10)?,
        })
    })?;

    let mut data = Vec::new();
    for result in company_iter {
        data.push(result?);
    }

    Ok(CompaniesPage {
        data,
        total,
        pages: (total + page_size - 1) / page_size,
        current_page: page,
    })
}

/// Accepts `YYYY-MM-DD` (read as midnight UTC) or a full RFC 3339 timestamp.
/// Anything else is None, which drops the filter.
fn parse_filter_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|naive| Utc.from_utc_datetime(&naive));
    }

    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}
