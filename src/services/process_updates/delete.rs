use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ProcessUpdateService;
use crate::middlewares::RequireProcessAccess;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, internal_error};

fn update_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::ProcessUpdateNotFound,
        "Atualização não encontrada",
    ))
}

/// Autor da atualização ou gestor do processo
pub async fn delete_update(
    service: &ProcessUpdateService,
    request: &HttpRequest,
    process_id: i64,
    update_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    let update = match storage.get_process_update(update_id).await {
        Ok(Some(update)) if update.process_id == process_id => update,
        Ok(_) => return Ok(update_not_found()),
        Err(e) => return Ok(internal_error("Falha ao buscar a atualização", e)),
    };

    let membership = RequireProcessAccess::extract_membership(request);
    if update.author_id != user.id && !RequireProcessAccess::is_manager(&user, membership) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Só o autor ou o professor responsável podem remover esta atualização",
        )));
    }

    match storage.delete_process_update(update_id).await {
        Ok(true) => {
            info!("Update {} removed from process {} by user {}", update_id, process_id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Atualização removida")))
        }
        Ok(false) => Ok(update_not_found()),
        Err(e) => Ok(internal_error("Falha ao remover a atualização", e)),
    }
}
