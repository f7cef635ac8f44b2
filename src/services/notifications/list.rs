use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NotificationService;
use crate::models::ApiResponse;
use crate::models::notifications::requests::{NotificationListParams, NotificationListQuery};
use crate::services::{current_user, internal_error};

pub async fn list_notifications(
    service: &NotificationService,
    request: &HttpRequest,
    query: NotificationListParams,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    match storage
        .list_user_notifications_with_pagination(user.id, NotificationListQuery::from(query))
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Consulta realizada",
        ))),
        Err(e) => Ok(internal_error("Falha ao listar notificações", e)),
    }
}
