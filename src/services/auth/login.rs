use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use crate::models::{
    ApiResponse, ErrorCode,
    auth::{requests::LoginRequest, responses::LoginResponse},
    users::entities::UserStatus,
};
use crate::services::internal_error;
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;

use super::AuthService;

fn invalid_credentials() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::AuthFailed,
        "E-mail ou senha incorretos",
    ))
}

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    // 1. usuário pelo e-mail
    let user = match storage.get_user_by_email(&login_request.email.trim().to_lowercase()).await {
        Ok(Some(user)) => user,
        Ok(None) => return Ok(invalid_credentials()),
        Err(e) => return Ok(internal_error("Falha ao autenticar", e)),
    };

    // 2. senha
    if !verify_password(&login_request.password, &user.password_hash) {
        warn!("Failed login attempt for user {}", user.id);
        return Ok(invalid_credentials());
    }

    // 3. só usuários ativos entram
    if user.status != UserStatus::Active {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::UserInactive,
            "Usuário inativo, procure a coordenação do núcleo",
        )));
    }

    if let Err(e) = storage.update_last_login(user.id).await {
        warn!("Failed to record last login for user {}: {}", user.id, e);
    }

    // 4. tokens
    let token_pair = match user.generate_token_pair() {
        Ok(pair) => pair,
        Err(e) => return Ok(internal_error("Falha ao gerar o token de acesso", e)),
    };

    info!("User {} logged in", user.id);

    let refresh_cookie = JwtUtils::create_refresh_token_cookie(&token_pair.refresh_token);
    let response = LoginResponse {
        access_token: token_pair.access_token,
        expires_in: JwtUtils::access_token_ttl_seconds(),
        user,
    };

    Ok(HttpResponse::Ok()
        .cookie(refresh_cookie)
        .json(ApiResponse::success(response, "Login realizado com sucesso")))
}
