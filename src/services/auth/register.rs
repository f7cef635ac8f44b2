use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AuthService;
use crate::models::{
    ApiResponse, ErrorCode,
    users::{
        entities::UserRole,
        requests::{CreateUserRequest, RegisterRequest},
        responses::UserResponse,
    },
};
use crate::services::internal_error;
use crate::services::users::create::validate_new_user;
use crate::utils::password::hash_password;

pub async fn handle_register(
    service: &AuthService,
    register_request: RegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let name = register_request.name.trim().to_string();
    let email = register_request.email.trim().to_lowercase();

    if let Err((code, msg)) = validate_new_user(
        &name,
        &email,
        &register_request.password,
        register_request.phone.as_deref(),
    ) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(code, msg)));
    }

    let password_hash = match hash_password(&register_request.password) {
        Ok(hash) => hash,
        Err(e) => return Ok(internal_error("Falha ao processar a senha", e)),
    };

    let storage = service.get_storage(request)?;

    let create = CreateUserRequest {
        name,
        email,
        password: password_hash,
        phone: register_request.phone.filter(|p| !p.is_empty()),
        registration: None,
        role: UserRole::Usuario,
    };

    match storage.create_user(create).await {
        Ok(user) => {
            info!("User {} self-registered", user.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                UserResponse { user },
                "Cadastro realizado com sucesso",
            )))
        }
        Err(e) if e.is_conflict() => Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::UserEmailAlreadyExists,
            "E-mail já cadastrado",
        ))),
        Err(e) => Ok(internal_error("Falha ao realizar o cadastro", e)),
    }
}
