/*!
 * Limite de requisições
 *
 * Janela fixa por cliente: usuário autenticado quando houver, senão o IP.
 *
 * ```rust,ignore
 * web::resource("/login")
 *     .wrap(RateLimit::login())
 *     .route(web::post().to(login))
 * ```
 *
 * Excedido o limite, responde 429 com `Retry-After`.
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::CONTENT_TYPE,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::rc::Rc;
use std::time::Duration;
use tracing::warn;

use crate::models::{ApiResponse, ErrorCode, users::entities::User};

/// Contadores por `prefixo:cliente` => (requisições, início da janela)
static RATE_LIMIT_CACHE: Lazy<Cache<String, (u32, i64)>> = Lazy::new(|| {
    Cache::builder()
        .time_to_live(Duration::from_secs(3600))
        .max_capacity(100_000)
        .build()
});

#[derive(Clone)]
pub struct RateLimit {
    max_requests: u32,
    window_secs: u64,
    key_prefix: String,
}

impl RateLimit {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window_secs,
            key_prefix: String::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.key_prefix = prefix.to_string();
        self
    }

    /// 5 tentativas de login por minuto
    pub fn login() -> Self {
        Self::new(5, 60).with_prefix("login")
    }

    /// 3 cadastros por minuto
    pub fn register() -> Self {
        Self::new(3, 60).with_prefix("register")
    }

    /// 10 uploads por minuto
    pub fn file_upload() -> Self {
        Self::new(10, 60).with_prefix("upload")
    }

    /// Usuário autenticado quando houver, senão o IP
    fn key_for(&self, req: &ServiceRequest) -> String {
        let identifier = match req.extensions().get::<User>() {
            Some(user) => format!("user:{}", user.id),
            None => format!("ip:{}", extract_client_ip(req)),
        };
        if self.key_prefix.is_empty() {
            identifier
        } else {
            format!("{}:{identifier}", self.key_prefix)
        }
    }
}

/// Próximo estado do contador; `None` quando o limite já foi atingido
fn next_window(
    current: Option<(u32, i64)>,
    now: i64,
    max_requests: u32,
    window_secs: u64,
) -> Option<(u32, i64)> {
    match current {
        Some((count, started)) if now - started < window_secs as i64 => {
            (count < max_requests).then_some((count + 1, started))
        }
        _ => Some((1, now)),
    }
}

/// IP do cliente; atrás de proxy depende de X-Forwarded-For / X-Real-IP corretos
fn extract_client_ip(req: &ServiceRequest) -> String {
    let header_ip = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .map(|ip| ip.trim().to_string())
    };

    let connection_ip = req.connection_info().realip_remote_addr().map(str::to_string);
    [connection_ip.clone(), header_ip("X-Forwarded-For"), header_ip("X-Real-IP")]
        .into_iter()
        .flatten()
        .find(|ip| is_valid_ip(ip))
        .or(connection_ip)
        .unwrap_or_else(|| "unknown".to_string())
}

fn is_valid_ip(ip: &str) -> bool {
    ip.parse::<std::net::IpAddr>().is_ok()
}

fn create_rate_limit_response(retry_after: u64) -> HttpResponse {
    HttpResponse::build(StatusCode::TOO_MANY_REQUESTS)
        .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
        .insert_header(("Retry-After", retry_after.to_string()))
        .insert_header(("X-RateLimit-Remaining", "0"))
        .json(ApiResponse::<()>::error_empty(
            ErrorCode::RateLimitExceeded,
            "Muitas requisições, tente novamente em instantes",
        ))
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            policy: Rc::new(self.clone()),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    policy: Rc<RateLimit>,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
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
        let policy = self.policy.clone();

        Box::pin(async move {
            let cache_key = policy.key_for(&req);
            let window_secs = policy.window_secs;
            let now = chrono::Utc::now().timestamp();
            let current = RATE_LIMIT_CACHE.get(&cache_key).await;

            match next_window(current, now, policy.max_requests, window_secs) {
                Some(state) => {
                    RATE_LIMIT_CACHE.insert(cache_key, state).await;
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                None => {
                    warn!(
                        "Rate limit exceeded for {} ({} per {}s)",
                        cache_key, policy.max_requests, window_secs
                    );
                    let retry_after = current
                        .map(|(_, started)| (started + window_secs as i64 - now).max(1) as u64)
                        .unwrap_or(window_secs);
                    Ok(req.into_response(
                        create_rate_limit_response(retry_after).map_into_right_body(),
                    ))
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_presets() {
        let login = RateLimit::login();
        assert_eq!(login.max_requests, 5);
        assert_eq!(login.window_secs, 60);
        assert_eq!(login.key_prefix, "login");

        let register = RateLimit::register();
        assert_eq!(register.max_requests, 3);
        assert_eq!(register.window_secs, 60);

        let upload = RateLimit::file_upload();
        assert_eq!(upload.max_requests, 10);
        assert_eq!(upload.key_prefix, "upload");
    }

    #[test]
    fn test_window_counts_until_limit() {
        let mut state = None;
        for _ in 0..3 {
            state = next_window(state, 100, 3, 60);
            assert!(state.is_some());
        }
        assert_eq!(state, Some((3, 100)));
        assert_eq!(next_window(state, 120, 3, 60), None);
    }

    #[test]
    fn test_window_resets_after_expiry() {
        assert_eq!(next_window(Some((3, 100)), 160, 3, 60), Some((1, 160)));
    }

    #[test]
    fn test_key_prefers_forwarded_ip_for_anonymous() {
        let req = actix_web::test::TestRequest::default()
            .insert_header(("X-Forwarded-For", "203.0.113.7, 10.0.0.1"))
            .to_srv_request();
        assert_eq!(RateLimit::login().key_for(&req), "login:ip:203.0.113.7");
    }
}
