use actix_web::{
    HttpRequest, HttpResponse,
    error::{InternalError, JsonPayloadError, PathError, QueryPayloadError},
};
use tracing::debug;

use crate::models::{ApiResponse, ErrorCode};

fn bad_request(req: &HttpRequest, detail: String) -> actix_web::Error {
    debug!("Parâmetros inválidos em {}: {}", req.path(), detail);
    let response =
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, &detail));
    InternalError::from_response(detail, response).into()
}

/// Corpo JSON malformado ou com campos inválidos
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    let detail = match &err {
        JsonPayloadError::ContentType => "Content-Type deve ser application/json".to_string(),
        JsonPayloadError::Overflow { limit } | JsonPayloadError::OverflowKnownLength { limit, .. } => {
            format!("Corpo da requisição excede o limite de {limit} bytes")
        }
        JsonPayloadError::Deserialize(e) => format!("JSON inválido: {e}"),
        other => format!("Corpo da requisição inválido: {other}"),
    };
    bad_request(req, detail)
}

/// Query string inválida
pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    bad_request(req, format!("Parâmetros de consulta inválidos: {err}"))
}

/// Segmento de rota inválido
pub fn path_error_handler(err: PathError, req: &HttpRequest) -> actix_web::Error {
    bad_request(req, format!("Parâmetro de rota inválido: {err}"))
}
