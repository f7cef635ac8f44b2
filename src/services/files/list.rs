use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::FileService;
use crate::models::ApiResponse;
use crate::services::internal_error;

/// Anexos do processo (o acesso é conferido pela rota)
pub async fn list_process_files(
    service: &FileService,
    request: &HttpRequest,
    process_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.list_process_files(process_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            items,
            "Consulta realizada",
        ))),
        Err(e) => Ok(internal_error("Falha ao listar os arquivos", e)),
    }
}
