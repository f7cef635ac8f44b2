use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{ParticipantService, check_can_manage};
use crate::models::notifications::entities::{NewNotification, NotificationKind, ReferenceType};
use crate::models::participants::entities::ParticipantKind;
use crate::models::users::entities::UserStatus;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::notifications::dispatch_notifications;
use crate::services::processes::process_not_found;
use crate::services::{current_user, internal_error, invalidate_appointment_cache};

pub async fn assign_participant(
    service: &ParticipantService,
    request: &HttpRequest,
    process_id: i64,
    user_id: i64,
    kind: ParticipantKind,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = check_can_manage(request, &user, kind) {
        return Ok(resp);
    }

    let storage = service.get_storage(request)?;

    // o vinculado precisa estar ativo e ter o perfil do vínculo
    match storage.get_user_by_id(user_id).await {
        Ok(Some(target)) if target.role != kind.required_role() => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ParticipantRoleMismatch,
                format!("O usuário não tem o perfil de {}", kind.label()),
            )));
        }
        Ok(Some(target)) if target.status != UserStatus::Active => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::UserInactive,
                "Usuário inativo",
            )));
        }
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "Usuário não encontrado",
            )));
        }
        Err(e) => return Ok(internal_error("Falha ao buscar usuário", e)),
    }

    let process = match storage.get_process_by_id(process_id).await {
        Ok(Some(process)) => process,
        Ok(None) => return Ok(process_not_found()),
        Err(e) => return Ok(internal_error("Falha ao buscar o processo", e)),
    };

    let participant = match storage.assign_participant(process_id, user_id, kind).await {
        Ok(participant) => participant,
        Err(e) if e.is_conflict() => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::ParticipantAlreadyAssigned,
                format!("O {} já está vinculado a este processo", kind.label()),
            )));
        }
        Err(e) => return Ok(internal_error("Falha ao vincular ao processo", e)),
    };
    invalidate_appointment_cache(request).await;
    info!(
        "User {} assigned as {} to process {} by user {}",
        user_id,
        kind.label(),
        process_id,
        user.id
    );

    let notification = NewNotification::new(
        user_id,
        NotificationKind::ProcessAssigned,
        format!("Você foi vinculado ao processo {}", process.number),
    )
    .content(process.subject)
    .reference(ReferenceType::Process, process_id);
    dispatch_notifications(request, &storage, vec![notification]).await;

    Ok(HttpResponse::Created().json(ApiResponse::success(
        participant,
        "Vínculo criado com sucesso",
    )))
}
