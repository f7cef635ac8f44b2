use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{ProcessService, check_client, duplicate_number, process_not_found};
use crate::models::processes::requests::UpdateProcessRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{
    current_user, internal_error, invalidate_appointment_cache, require_manager,
};
use crate::utils::validate::normalize_process_number;

pub async fn update_process(
    service: &ProcessService,
    request: &HttpRequest,
    process_id: i64,
    mut update_data: UpdateProcessRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = require_manager(request, &user) {
        return Ok(resp);
    }

    if let Some(ref number) = update_data.number {
        update_data.number = match normalize_process_number(number) {
            Ok(normalized) => Some(normalized),
            Err(msg) => {
                return Ok(HttpResponse::BadRequest()
                    .json(ApiResponse::error_empty(ErrorCode::ProcessNumberInvalid, msg)));
            }
        };
    }
    if let Some(ref subject) = update_data.subject
        && subject.trim().is_empty()
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Informe o assunto do processo",
        )));
    }

    let storage = service.get_storage(request)?;

    if let Some(client_id) = update_data.client_id
        && let Err(resp) = check_client(&storage, client_id).await
    {
        return Ok(resp);
    }

    match storage.update_process(process_id, update_data).await {
        Ok(Some(process)) => {
            // o assistido pode ter mudado
            invalidate_appointment_cache(request).await;
            info!("Process {} updated by user {}", process.id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                process,
                "Processo atualizado com sucesso",
            )))
        }
        Ok(None) => Ok(process_not_found()),
        Err(e) if e.is_conflict() => Ok(duplicate_number()),
        Err(e) => Ok(internal_error("Falha ao atualizar o processo", e)),
    }
}
