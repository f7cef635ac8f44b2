use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::middlewares::RequireJWT;
use crate::models::auth::responses::{
    RefreshTokenResponse, TokenVerificationResponse, UserInfoResponse,
};
use crate::models::users::entities::UserStatus;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, internal_error};
use crate::utils::jwt::JwtUtils;

use super::AuthService;

fn session_expired() -> HttpResponse {
    HttpResponse::Unauthorized()
        .cookie(JwtUtils::create_empty_refresh_token_cookie())
        .json(ApiResponse::error_empty(
            ErrorCode::RefreshTokenInvalid,
            "Sessão expirada, faça login novamente",
        ))
}

/// Novo access token a partir do refresh token do cookie
pub async fn handle_refresh_token(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(refresh_token) = JwtUtils::extract_refresh_token_from_cookie(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Sessão não encontrada, faça login",
        )));
    };

    let user_id = match JwtUtils::verify_refresh_token(&refresh_token)
        .ok()
        .and_then(|claims| claims.user_id())
    {
        Some(id) => id,
        None => return Ok(session_expired()),
    };

    // perfil e status atuais, não os do token
    let storage = service.get_storage(request)?;
    let user = match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) if user.status == UserStatus::Active => user,
        Ok(_) => return Ok(session_expired()),
        Err(e) => return Ok(internal_error("Falha ao renovar a sessão", e)),
    };

    match JwtUtils::generate_access_token(user.id, &user.role.to_string()) {
        Ok(access_token) => {
            info!("Access token refreshed for user {}", user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                RefreshTokenResponse {
                    access_token,
                    expires_in: JwtUtils::access_token_ttl_seconds(),
                },
                "Token renovado",
            )))
        }
        Err(e) => Ok(internal_error("Falha ao gerar o token de acesso", e)),
    }
}

pub async fn handle_verify_token(
    _service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        TokenVerificationResponse {
            is_valid: true,
            user_id: user.id,
            role: user.role.to_string(),
        },
        "Token válido",
    )))
}

pub async fn handle_get_user(
    _service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    match RequireJWT::extract_user_claims(request) {
        Some(user) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserInfoResponse { user },
            "Dados do usuário",
        ))),
        None => Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Autenticação necessária",
        ))),
    }
}
