use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AppointmentService, appointment_not_found, can_see};
use crate::cache::keys;
use crate::config::AppConfig;
use crate::models::ApiResponse;
use crate::models::appointments::entities::Appointment;
use crate::services::{current_user, internal_error};

pub async fn get_appointment(
    service: &AppointmentService,
    request: &HttpRequest,
    appointment_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;
    let cache = service.get_cache(request)?;

    let cache_key = keys::appointment_item(appointment_id);
    let appointment = match cache.get::<Appointment>(&cache_key).await {
        Some(appointment) => appointment,
        None => match storage.get_appointment_by_id(appointment_id).await {
            Ok(Some(appointment)) => {
                cache
                    .insert(cache_key, &appointment, AppConfig::get().cache.default_ttl)
                    .await;
                appointment
            }
            Ok(None) => return Ok(appointment_not_found()),
            Err(e) => return Ok(internal_error("Falha ao buscar o agendamento", e)),
        },
    };

    // o item em cache é compartilhado; o acesso é conferido sempre
    match can_see(&storage, &user, &appointment).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            appointment,
            "Agendamento encontrado",
        ))),
        Ok(false) => Ok(appointment_not_found()),
        Err(e) => Ok(internal_error("Falha ao verificar o acesso", e)),
    }
}
