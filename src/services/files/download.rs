use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header};
use std::fs;
use tracing::error;

use super::{FileService, blob_path};
use crate::errors::NpjError;
use crate::middlewares::RequireProcessAccess;
use crate::models::files::entities::FileAttachment;
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, internal_error};
use crate::storage::Storage;

pub(crate) fn file_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::FileNotFound,
        "Arquivo não encontrado",
    ))
}

/// Quem enviou, a coordenação ou quem tem acesso ao processo do anexo
async fn can_read(storage: &dyn Storage, user: &User, file: &FileAttachment) -> bool {
    if file.user_id == user.id || user.is_admin() {
        return true;
    }
    match file.process_id {
        Some(process_id) => storage
            .get_process_membership(process_id, user.id)
            .await
            .ok()
            .flatten()
            .is_some_and(|m| RequireProcessAccess::has_access(user, Some(m))),
        None => false,
    }
}

pub async fn handle_download(
    service: &FileService,
    request: &HttpRequest,
    file_token: String,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    let file = match storage.get_file_by_token(&file_token).await {
        Ok(Some(file)) => file,
        Ok(None) => return Ok(file_not_found()),
        Err(e) => return Ok(internal_error("Falha ao buscar o arquivo", e)),
    };

    // sem acesso responde como inexistente
    if !can_read(storage.as_ref(), &user, &file).await {
        return Ok(file_not_found());
    }

    let content = match fs::read(blob_path(&file.stored_name)) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            error!("Blob missing for file {}", file.token);
            return Ok(file_not_found());
        }
        Err(e) => return Ok(internal_error("Falha ao ler o arquivo", NpjError::from(e))),
    };

    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, file.content_type.clone()))
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!(
                "attachment; filename=\"{}\"",
                file.original_name.replace('"', "")
            ),
        ))
        .body(content))
}
