use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ProcessService, process_not_found};
use crate::models::ApiResponse;
use crate::models::participants::entities::ParticipantKind;
use crate::models::processes::responses::ProcessDetailResponse;
use crate::services::internal_error;

pub async fn get_process(
    service: &ProcessService,
    request: &HttpRequest,
    process_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let process = match storage.get_process_by_id(process_id).await {
        Ok(Some(process)) => process,
        Ok(None) => return Ok(process_not_found()),
        Err(e) => return Ok(internal_error("Falha ao buscar o processo", e)),
    };

    let client = match process.client_id {
        Some(client_id) => match storage.get_user_by_id(client_id).await {
            Ok(client) => client,
            Err(e) => return Ok(internal_error("Falha ao buscar o assistido", e)),
        },
        None => None,
    };

    let students = match storage
        .list_participants(process_id, ParticipantKind::Student)
        .await
    {
        Ok(list) => list,
        Err(e) => return Ok(internal_error("Falha ao listar a equipe", e)),
    };
    let professors = match storage
        .list_participants(process_id, ParticipantKind::Professor)
        .await
    {
        Ok(list) => list,
        Err(e) => return Ok(internal_error("Falha ao listar a equipe", e)),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        ProcessDetailResponse {
            process,
            client,
            students,
            professors,
        },
        "Processo encontrado",
    )))
}
