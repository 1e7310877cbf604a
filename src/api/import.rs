// src/api/import.rs
use std::path::{Path, PathBuf};

use rocket::form::Form;
use rocket::fs::TempFile;
use rocket::http::Status;
use rocket::response::status;
use rocket::{post, FromForm, State};
use tracing::{error, info};
use uuid::Uuid;

use crate::database::{import_companies, DbPool};
use crate::models::CompanyImportRow;
use crate::server::ServerState;

#[derive(FromForm)]
pub struct ImportUpload<'r> {
    pub file: Option<TempFile<'r>>,
}

/// Accepts a multipart CSV upload and imports its rows in one transaction.
/// The upload is staged under the uploads directory and deleted again no
/// matter how the import ends.
#[post("/import", data = "<form>")]
pub async fn import_csv(
    state: &State<ServerState>,
    form: Option<Form<ImportUpload<'_>>>,
) -> status::Custom<String> {
    let mut file = match form.and_then(|form| form.into_inner().file) {
        Some(file) => file,
        None => return status::Custom(Status::BadRequest, "No file uploaded.".to_string()),
    };

    let uploads_dir = &state.config.server.uploads_dir;
    if let Err(e) = tokio::fs::create_dir_all(uploads_dir).await {
        error!("Error preparing uploads directory {}: {}", uploads_dir, e);
        return status::Custom(
            Status::InternalServerError,
            format!("Error processing CSV file: {}", e),
        );
    }

    let staged_path: PathBuf = Path::new(uploads_dir).join(Uuid::new_v4().to_string());
    if let Err(e) = file.copy_to(&staged_path).await {
        error!("Error staging uploaded file: {}", e);
        return status::Custom(
            Status::InternalServerError,
            format!("Error processing CSV file: {}", e),
        );
    }

    let outcome = import_csv_file(&state.db_pool, &staged_path).await;

    if let Err(e) = tokio::fs::remove_file(&staged_path).await {
        error!("Failed to delete file {}: {}", staged_path.display(), e);
    }

    match outcome {
        Ok(created) => {
            info!("✅ CSV import finished: {} new companies", created);
            status::Custom(Status::Ok, "CSV file imported successfully".to_string())
        }
        Err(e) => {
            error!("Error processing CSV file: {}", e);
            status::Custom(
                Status::InternalServerError,
                format!("Error processing CSV file: {}", e),
            )
        }
    }
}

/// Catches `POST /import` requests that carry no multipart body at all, so
/// they answer 400 like an upload with the file part missing.
#[post("/import", rank = 2)]
pub async fn import_csv_without_upload() -> status::Custom<String> {
    status::Custom(Status::BadRequest, "No file uploaded.".to_string())
}

async fn import_csv_file(
    pool: &DbPool,
    path: &Path,
) -> Result<usize, Box<dyn std::error::Error + Send + Sync>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.deserialize::<CompanyImportRow>() {
        rows.push(record?);
    }

    import_companies(pool, &rows).await
}
