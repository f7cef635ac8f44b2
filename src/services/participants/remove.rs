use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{ParticipantService, check_can_manage};
use crate::models::participants::entities::ParticipantKind;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, internal_error, invalidate_appointment_cache};

pub async fn remove_participant(
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
    match storage.remove_participant(process_id, user_id, kind).await {
        Ok(true) => {
            invalidate_appointment_cache(request).await;
            info!(
                "User {} removed as {} from process {}",
                user_id,
                kind.label(),
                process_id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Vínculo removido")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ParticipantNotFound,
            "Vínculo não encontrado",
        ))),
        Err(e) => Ok(internal_error("Falha ao remover o vínculo", e)),
    }
}
