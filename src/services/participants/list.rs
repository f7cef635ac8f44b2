use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ParticipantService;
use crate::models::ApiResponse;
use crate::models::participants::entities::ParticipantKind;
use crate::services::internal_error;

pub async fn list_participants(
    service: &ParticipantService,
    request: &HttpRequest,
    process_id: i64,
    kind: ParticipantKind,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.list_participants(process_id, kind).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            items,
            "Consulta realizada",
        ))),
        Err(e) => Ok(internal_error("Falha ao listar a equipe do processo", e)),
    }
}
