//! Extratores de parâmetros de rota já validados
//!
//! Ids inválidos (não numéricos ou <= 0) são respondidos com 400 no
//! envelope padrão antes de chegar ao handler.

use actix_web::{HttpResponse, error::InternalError};

use crate::models::{ApiResponse, ErrorCode};

pub(crate) fn bad_path_param(message: String) -> actix_web::Error {
    let response =
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, &message));
    InternalError::from_response(message, response).into()
}

pub(crate) fn parse_positive_i64(param: &str, raw: Option<&str>) -> Result<i64, actix_web::Error> {
    let raw = raw.ok_or_else(|| bad_path_param(format!("Parâmetro '{param}' ausente")))?;
    match raw.parse::<i64>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(bad_path_param(format!(
            "Parâmetro '{param}' inválido: '{raw}'"
        ))),
    }
}

/// Declara um extrator de id inteiro positivo lido do segmento `$param`
#[macro_export]
macro_rules! define_safe_i64_extractor {
    ($name:ident, $param:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name(pub i64);

        impl actix_web::FromRequest for $name {
            type Error = actix_web::Error;
            type Future = std::future::Ready<Result<Self, Self::Error>>;

            fn from_request(
                req: &actix_web::HttpRequest,
                _payload: &mut actix_web::dev::Payload,
            ) -> Self::Future {
                std::future::ready(
                    $crate::utils::extractor::parse_positive_i64(
                        $param,
                        req.match_info().get($param),
                    )
                    .map($name),
                )
            }
        }
    };
}

define_safe_i64_extractor!(SafeIDI64, "id");
define_safe_i64_extractor!(SafeProcessIdI64, "process_id");
define_safe_i64_extractor!(SafeUserIdI64, "user_id");
define_safe_i64_extractor!(SafeUpdateIdI64, "update_id");

/// Token de arquivo (UUID em formato simples)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeFileToken(pub String);

impl actix_web::FromRequest for SafeFileToken {
    type Error = actix_web::Error;
    type Future = std::future::Ready<Result<Self, Self::Error>>;

    fn from_request(
        req: &actix_web::HttpRequest,
        _payload: &mut actix_web::dev::Payload,
    ) -> Self::Future {
        let result = match req.match_info().get("token") {
            Some(raw) if uuid::Uuid::try_parse(raw).is_ok() => Ok(SafeFileToken(raw.to_string())),
            Some(raw) => Err(bad_path_param(format!("Token de arquivo inválido: '{raw}'"))),
            None => Err(bad_path_param("Parâmetro 'token' ausente".to_string())),
        };
        std::future::ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positive_i64() {
        assert_eq!(parse_positive_i64("id", Some("42")).unwrap(), 42);
        assert!(parse_positive_i64("id", Some("0")).is_err());
        assert!(parse_positive_i64("id", Some("-3")).is_err());
        assert!(parse_positive_i64("id", Some("abc")).is_err());
        assert!(parse_positive_i64("id", None).is_err());
    }

    #[actix_web::test]
    async fn test_extractor_reads_named_segment() {
        use actix_web::FromRequest;

        let req = actix_web::test::TestRequest::default()
            .param("process_id", "7")
            .to_http_request();
        let extracted = SafeProcessIdI64::extract(&req).await.unwrap();
        assert_eq!(extracted, SafeProcessIdI64(7));
    }

    #[actix_web::test]
    async fn test_file_token_extractor() {
        use actix_web::FromRequest;

        let token = uuid::Uuid::new_v4().simple().to_string();
        let req = actix_web::test::TestRequest::default()
            .param("token", token.clone())
            .to_http_request();
        assert_eq!(SafeFileToken::extract(&req).await.unwrap().0, token);

        let req = actix_web::test::TestRequest::default()
            .param("token", "../../etc/passwd")
            .to_http_request();
        assert!(SafeFileToken::extract(&req).await.is_err());
    }
}
