/*!
 * Middleware de autenticação JWT
 *
 * Valida o `Authorization: Bearer <token>` e coloca o usuário autenticado nas
 * extensões da requisição.
 *
 * ```rust,ignore
 * web::scope("/api/v1/processes")
 *     .wrap(RequireJWT)
 *     .route("", web::get().to(list_processes))
 * ```
 *
 * No handler:
 *
 * ```rust,ignore
 * let user = RequireJWT::extract_user_claims(&req);
 * ```
 *
 * O usuário fica em cache sob `auth:{user_id}:{token}`; alterações no
 * cadastro derrubam o prefixo `auth:{user_id}:`.
 */

use crate::cache::{CacheResult, ObjectCache, keys};
use crate::config::AppConfig;
use crate::models::ErrorCode;
use crate::models::users::entities::{User, UserStatus};
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, error, info};

use super::create_error_response;

const BEARER_PREFIX: &str = "Bearer ";
const AUTHORIZATION_HEADER: &str = "Authorization";

#[derive(Clone)]
pub struct RequireJWT;

/// Motivo da recusa: (status, código, mensagem)
type Rejection = (StatusCode, ErrorCode, &'static str);

fn unauthorized(message: &'static str) -> Rejection {
    (StatusCode::UNAUTHORIZED, ErrorCode::Unauthorized, message)
}

async fn extract_and_validate_jwt(req: &ServiceRequest) -> Result<User, Rejection> {
    let token = req
        .headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .ok_or_else(|| unauthorized("Token de acesso ausente"))?;

    let claims = JwtUtils::verify_access_token(token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        unauthorized("Token inválido ou expirado")
    })?;

    let user_id = claims
        .user_id()
        .ok_or_else(|| unauthorized("Token inválido"))?;

    let cache = req
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|c| c.get_ref().clone());
    let cache_key = keys::auth(user_id, token);

    if let Some(ref cache) = cache {
        match cache.get_raw(&cache_key).await {
            CacheResult::Found(json) => match serde_json::from_str::<User>(&json) {
                Ok(user) if user.status == UserStatus::Active => return Ok(user),
                _ => cache.remove(&cache_key).await,
            },
            _ => debug!("Auth cache miss for user {}", user_id),
        }
    }

    let storage = req
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|s| s.get_ref().clone())
        .ok_or_else(|| {
            error!("Storage not registered in app data");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalServerError,
                "Erro interno",
            )
        })?;

    let user = storage
        .get_user_by_id(user_id)
        .await
        .map_err(|e| {
            error!("Failed to load user {}: {}", user_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalServerError,
                "Erro ao validar usuário",
            )
        })?
        .ok_or_else(|| unauthorized("Usuário não encontrado"))?;

    if user.status != UserStatus::Active {
        return Err((
            StatusCode::UNAUTHORIZED,
            ErrorCode::UserInactive,
            "Usuário inativo",
        ));
    }

    if let Some(cache) = cache {
        cache
            .insert(cache_key, &user, AppConfig::get().cache.default_ttl)
            .await;
    }

    Ok(user)
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // Preflight do CORS não carrega token
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, ErrorCode::Success, "")
                        .map_into_right_body(),
                ));
            }

            match extract_and_validate_jwt(&req).await {
                Ok(user) => {
                    debug!("JWT authentication successful for ID: {}", user.id);
                    req.extensions_mut().insert(user);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err((status, code, message)) => {
                    info!(
                        "JWT authentication failed for request to {}: {}",
                        req.path(),
                        message
                    );
                    Ok(req.into_response(
                        create_error_response(status, code, message).map_into_right_body(),
                    ))
                }
            }
        })
    }
}

impl RequireJWT {
    /// Usuário autenticado (requer o middleware na rota)
    pub fn extract_user_claims(req: &actix_web::HttpRequest) -> Option<User> {
        req.extensions().get::<User>().cloned()
    }

    pub fn extract_user_id(req: &actix_web::HttpRequest) -> Option<i64> {
        req.extensions().get::<User>().map(|user| user.id)
    }
}
