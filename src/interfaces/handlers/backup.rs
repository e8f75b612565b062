use actix_multipart::Multipart;
use actix_web::{get, post, web, HttpResponse, Responder};
use futures_util::{StreamExt, TryStreamExt};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::use_cases::extractors::AuthClaims;
use crate::AppState;

// Uploads beyond this are rejected before parsing.
const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    #[serde(default)]
    user_id: Option<Uuid>,
}

#[get("/export")]
pub async fn export_csv(
    state: web::Data<AppState>,
    claims: AuthClaims,
    query: web::Query<ExportQuery>,
) -> impl Responder {
    match state.backup_handler.export(&claims.0, query.user_id).await {
        Ok(bytes) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .append_header((
                "Content-Disposition",
                "attachment; filename=\"experiences.csv\"",
            ))
            .body(bytes),
        Err(e) => e.to_http_response(),
    }
}

#[post("/import")]
pub async fn import_csv(
    state: web::Data<AppState>,
    claims: AuthClaims,
    payload: Multipart,
) -> impl Responder {
    let bytes = match read_upload(payload).await {
        Ok(bytes) => bytes,
        Err(e) => return e.to_http_response(),
    };

    match state.backup_handler.import(&claims.0, &bytes).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => e.to_http_response(),
    }
}

/// Collects the first file field of the multipart form into memory.
async fn read_upload(mut payload: Multipart) -> Result<Vec<u8>, AppError> {
    while let Some(field) = payload
        .try_next()
        .await
        .map_err(|e| AppError::InvalidInput(format!("invalid multipart payload: {e}")))?
    {
        if field.content_disposition().and_then(|cd| cd.get_filename()).is_none() {
            continue;
        }

        let mut bytes = Vec::new();
        let mut field = field;
        while let Some(chunk) = field.next().await {
            let chunk = chunk
                .map_err(|e| AppError::InvalidInput(format!("upload read failed: {e}")))?;
            if bytes.len() + chunk.len() > MAX_UPLOAD_BYTES {
                return Err(AppError::InvalidInput("uploaded file is too large".to_string()));
            }
            bytes.extend_from_slice(&chunk);
        }
        return Ok(bytes);
    }

    Err(AppError::InvalidInput("no file field in upload".to_string()))
}
