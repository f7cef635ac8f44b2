use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ProcessUpdateService;
use crate::models::ApiResponse;
use crate::services::internal_error;

/// Linha do tempo, mais recentes primeiro
pub async fn list_updates(
    service: &ProcessUpdateService,
    request: &HttpRequest,
    process_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.list_process_updates(process_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            items,
            "Consulta realizada",
        ))),
        Err(e) => Ok(internal_error("Falha ao listar as atualizações", e)),
    }
}
