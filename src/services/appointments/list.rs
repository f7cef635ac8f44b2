use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::debug;

use super::{AppointmentService, visibility_for};
use crate::cache::keys;
use crate::config::AppConfig;
use crate::models::ApiResponse;
use crate::models::appointments::requests::{AppointmentListParams, AppointmentListQuery};
use crate::models::appointments::responses::AppointmentListResponse;
use crate::services::{current_user, internal_error};

pub async fn list_appointments(
    service: &AppointmentService,
    request: &HttpRequest,
    query: AppointmentListParams,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;
    let cache = service.get_cache(request)?;

    let visibility = match visibility_for(&storage, &user).await {
        Ok(visibility) => visibility,
        Err(e) => return Ok(internal_error("Falha ao listar agendamentos", e)),
    };
    let query = AppointmentListQuery::from_params(query, visibility);

    // chave por usuário: a visibilidade muda de um para outro
    let cache_key = keys::appointment_list(user.id, &query.cache_fragment());
    if let Some(cached) = cache.get::<AppointmentListResponse>(&cache_key).await {
        debug!("Appointment list served from cache: {}", cache_key);
        return Ok(HttpResponse::Ok().json(ApiResponse::success(cached, "Consulta realizada")));
    }

    match storage.list_appointments_with_pagination(query).await {
        Ok(response) => {
            cache
                .insert(cache_key, &response, AppConfig::get().cache.default_ttl)
                .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Consulta realizada")))
        }
        Err(e) => Ok(internal_error("Falha ao listar agendamentos", e)),
    }
}
