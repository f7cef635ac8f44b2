use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{ProcessService, process_not_found};
use crate::models::ApiResponse;
use crate::services::{
    current_user, internal_error, invalidate_appointment_cache, require_manager,
};

/// Exclusão lógica: o processo some de todas as consultas
pub async fn delete_process(
    service: &ProcessService,
    request: &HttpRequest,
    process_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = require_manager(request, &user) {
        return Ok(resp);
    }

    let storage = service.get_storage(request)?;
    match storage.soft_delete_process(process_id).await {
        Ok(true) => {
            invalidate_appointment_cache(request).await;
            info!("Process {} deleted by user {}", process_id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Processo removido")))
        }
        Ok(false) => Ok(process_not_found()),
        Err(e) => Ok(internal_error("Falha ao remover o processo", e)),
    }
}
