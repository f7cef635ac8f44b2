use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::fs;
use tracing::{info, warn};

use super::download::file_not_found;
use super::{FileService, blob_path};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, internal_error};

/// Remove o registro e o arquivo do disco (quem enviou ou a coordenação)
pub async fn delete_file(
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

    if file.user_id != user.id && !user.is_admin() {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Só quem enviou o arquivo pode removê-lo",
        )));
    }

    match storage.delete_file(&file.token).await {
        Ok(true) => {}
        Ok(false) => return Ok(file_not_found()),
        Err(e) => return Ok(internal_error("Falha ao remover o arquivo", e)),
    }

    if let Err(e) = fs::remove_file(blob_path(&file.stored_name)) {
        warn!("Failed to remove blob of file {}: {}", file.token, e);
    }
    info!("File {} deleted by user {}", file.token, user.id);

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Arquivo removido")))
}
