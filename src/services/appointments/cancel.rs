use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::sync::remove_from_calendar;
use super::{
    AppointmentService, appointment_not_found, can_edit, invalidate_cache, notify_process_members,
};
use crate::models::appointments::entities::AppointmentStatus;
use crate::models::appointments::requests::UpdateAppointmentRequest;
use crate::models::appointments::responses::AppointmentResponse;
use crate::models::notifications::entities::NotificationKind;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, internal_error};

/// Cancela o agendamento e remove o evento da agenda; o registro fica
pub async fn cancel_appointment(
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
    let calendar = service.get_calendar(request)?;

    let current = match storage.get_appointment_by_id(appointment_id).await {
        Ok(Some(appointment)) => appointment,
        Ok(None) => return Ok(appointment_not_found()),
        Err(e) => return Ok(internal_error("Falha ao buscar o agendamento", e)),
    };
    match can_edit(&storage, &user, &current).await {
        Ok(true) => {}
        Ok(false) => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::Forbidden,
                "Sem permissão para cancelar este agendamento",
            )));
        }
        Err(e) => return Ok(internal_error("Falha ao verificar o acesso", e)),
    }

    let already_cancelled = current.status == AppointmentStatus::Cancelled;
    let cancelled = if already_cancelled {
        current
    } else {
        let update = UpdateAppointmentRequest {
            status: Some(AppointmentStatus::Cancelled),
            ..Default::default()
        };
        match storage.update_appointment(appointment_id, update).await {
            Ok(Some(appointment)) => appointment,
            Ok(None) => return Ok(appointment_not_found()),
            Err(e) => return Ok(internal_error("Falha ao cancelar o agendamento", e)),
        }
    };

    let (appointment, sync_warning) = remove_from_calendar(&storage, &calendar, cancelled).await;
    invalidate_cache(&cache).await;

    if !already_cancelled {
        info!("Appointment {} cancelled by user {}", appointment.id, user.id);
        notify_process_members(
            request,
            &storage,
            &appointment,
            user.id,
            NotificationKind::AppointmentCancelled,
            format!("Agendamento cancelado: {}", appointment.title),
        )
        .await;
    }

    let message = sync_warning
        .clone()
        .unwrap_or_else(|| "Agendamento cancelado".to_string());
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        AppointmentResponse {
            appointment,
            sync_warning,
        },
        message,
    )))
}
