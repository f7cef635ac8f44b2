use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::{ProcessService, check_client, duplicate_number};
use crate::models::notifications::entities::{NewNotification, NotificationKind, ReferenceType};
use crate::models::participants::entities::ParticipantKind;
use crate::models::processes::requests::CreateProcessRequest;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::notifications::dispatch_notifications;
use crate::services::{current_user, internal_error};
use crate::utils::validate::normalize_process_number;

fn bad_request(code: ErrorCode, message: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

pub async fn create_process(
    service: &ProcessService,
    request: &HttpRequest,
    mut process_data: CreateProcessRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    process_data.number = match normalize_process_number(&process_data.number) {
        Ok(number) => number,
        Err(msg) => return Ok(bad_request(ErrorCode::ProcessNumberInvalid, msg)),
    };
    process_data.subject = process_data.subject.trim().to_string();
    if process_data.subject.is_empty() {
        return Ok(bad_request(ErrorCode::BadRequest, "Informe o assunto do processo"));
    }

    let storage = service.get_storage(request)?;

    if let Some(client_id) = process_data.client_id
        && let Err(resp) = check_client(&storage, client_id).await
    {
        return Ok(resp);
    }

    let process = match storage.create_process(process_data, user.id).await {
        Ok(process) => process,
        Err(e) if e.is_conflict() => return Ok(duplicate_number()),
        Err(e) => return Ok(internal_error("Falha ao cadastrar o processo", e)),
    };
    info!("Process {} ({}) created by user {}", process.id, process.number, user.id);

    // o professor que abre o processo passa a orientá-lo
    if user.role == UserRole::Professor
        && let Err(e) = storage
            .assign_participant(process.id, user.id, ParticipantKind::Professor)
            .await
    {
        warn!("Failed to assign creator to process {}: {}", process.id, e);
    }

    if let Some(client_id) = process.client_id {
        let notification = NewNotification::new(
            client_id,
            NotificationKind::ProcessAssigned,
            format!("Processo {} cadastrado", process.number),
        )
        .content(process.subject.clone())
        .reference(ReferenceType::Process, process.id);
        dispatch_notifications(request, &storage, vec![notification]).await;
    }

    Ok(HttpResponse::Created().json(ApiResponse::success(
        process,
        "Processo cadastrado com sucesso",
    )))
}
