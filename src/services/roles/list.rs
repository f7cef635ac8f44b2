use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::RoleService;
use crate::models::ApiResponse;
use crate::models::roles::RoleListResponse;
use crate::services::internal_error;

pub async fn list_roles(service: &RoleService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.list_roles().await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            RoleListResponse { items },
            "Consulta realizada",
        ))),
        Err(e) => Ok(internal_error("Falha ao listar perfis", e)),
    }
}
