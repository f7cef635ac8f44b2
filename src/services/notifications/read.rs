use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NotificationService;
use crate::models::notifications::responses::MarkAllReadResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, internal_error};

pub async fn mark_as_read(
    service: &NotificationService,
    request: &HttpRequest,
    notification_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    // notificação de outro usuário responde como inexistente
    match storage
        .mark_notification_as_read(notification_id, user.id)
        .await
    {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Notificação marcada como lida",
        ))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotificationNotFound,
            "Notificação não encontrada",
        ))),
        Err(e) => Ok(internal_error("Falha ao atualizar a notificação", e)),
    }
}

pub async fn mark_all_as_read(
    service: &NotificationService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    match storage.mark_all_notifications_as_read(user.id).await {
        Ok(updated) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            MarkAllReadResponse { updated },
            "Notificações marcadas como lidas",
        ))),
        Err(e) => Ok(internal_error("Falha ao atualizar as notificações", e)),
    }
}
