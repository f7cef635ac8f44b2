use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::UserService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::internal_error;

pub async fn delete_user(
    service: &UserService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if RequireJWT::extract_user_id(request) == Some(user_id) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::CannotDeleteSelf,
            "Não é possível excluir o próprio usuário",
        )));
    }

    let storage = service.get_storage(request)?;

    match storage.deactivate_user(user_id).await {
        Ok(true) => {
            service.invalidate_user_sessions(request, user_id).await;
            info!("User {} deactivated", user_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Usuário desativado")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "Usuário não encontrado",
        ))),
        Err(e) => Ok(internal_error("Falha ao excluir usuário", e)),
    }
}
