use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::create::validate_details;
use super::sync::push_to_calendar;
use super::{
    AppointmentService, appointment_not_found, can_edit, check_process_access, invalidate_cache,
    notify_process_members,
};
use crate::models::appointments::entities::AppointmentStatus;
use crate::models::appointments::requests::UpdateAppointmentRequest;
use crate::models::appointments::responses::AppointmentResponse;
use crate::models::notifications::entities::NotificationKind;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, internal_error};

pub async fn update_appointment(
    service: &AppointmentService,
    request: &HttpRequest,
    appointment_id: i64,
    update_data: UpdateAppointmentRequest,
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
                "Sem permissão para alterar este agendamento",
            )));
        }
        Err(e) => return Ok(internal_error("Falha ao verificar o acesso", e)),
    }

    // valida o resultado da mescla, não só os campos enviados
    let title = update_data.title.as_deref().unwrap_or(&current.title);
    let starts_at = update_data.starts_at.unwrap_or(current.starts_at);
    let ends_at = update_data.ends_at.unwrap_or(current.ends_at);
    let reminder = update_data.reminder_minutes.or(current.reminder_minutes);
    let attendees = update_data.attendees.as_deref().unwrap_or(&current.attendees);
    if let Err(resp) = validate_details(title, starts_at, ends_at, reminder, attendees) {
        return Ok(resp);
    }

    if let Some(process_id) = update_data.process_id
        && current.process_id != Some(process_id)
        && let Err(resp) = check_process_access(&storage, &user, process_id).await
    {
        return Ok(resp);
    }

    let cancelled = update_data.status == Some(AppointmentStatus::Cancelled)
        && current.status != AppointmentStatus::Cancelled;

    let updated = match storage.update_appointment(appointment_id, update_data).await {
        Ok(Some(appointment)) => appointment,
        Ok(None) => return Ok(appointment_not_found()),
        Err(e) => return Ok(internal_error("Falha ao atualizar o agendamento", e)),
    };
    let (appointment, sync_warning) = push_to_calendar(&storage, &calendar, updated).await;
    invalidate_cache(&cache).await;

    info!("Appointment {} updated by user {}", appointment.id, user.id);

    let (kind, title) = if cancelled {
        (
            NotificationKind::AppointmentCancelled,
            format!("Agendamento cancelado: {}", appointment.title),
        )
    } else {
        (
            NotificationKind::AppointmentUpdated,
            format!("Agendamento alterado: {}", appointment.title),
        )
    };
    notify_process_members(request, &storage, &appointment, user.id, kind, title).await;

    let message = sync_warning
        .clone()
        .unwrap_or_else(|| "Agendamento atualizado com sucesso".to_string());
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        AppointmentResponse {
            appointment,
            sync_warning,
        },
        message,
    )))
}
