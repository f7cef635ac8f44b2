use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::{DateTime, Utc};
use tracing::info;

use super::sync::push_to_calendar;
use super::{
    AppointmentService, check_process_access, invalid_range, invalidate_cache,
    notify_process_members,
};
use crate::models::appointments::entities::{NewAppointment, SyncStatus};
use crate::models::appointments::requests::CreateAppointmentRequest;
use crate::models::appointments::responses::AppointmentResponse;
use crate::models::notifications::entities::NotificationKind;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, internal_error};
use crate::utils::validate::validate_email;

/// Quatro semanas, o máximo aceito pelo Google para lembretes
const MAX_REMINDER_MINUTES: i32 = 40_320;

fn bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, message))
}

/// Regras comuns à criação e à edição
pub(crate) fn validate_details(
    title: &str,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
    reminder_minutes: Option<i32>,
    attendees: &[String],
) -> Result<(), HttpResponse> {
    if title.trim().is_empty() {
        return Err(bad_request("Informe o título do agendamento"));
    }
    if ends_at <= starts_at {
        return Err(invalid_range());
    }
    if let Some(minutes) = reminder_minutes
        && !(0..=MAX_REMINDER_MINUTES).contains(&minutes)
    {
        return Err(bad_request("Lembrete fora do intervalo permitido"));
    }
    if let Some(invalid) = attendees.iter().find(|email| validate_email(email).is_err()) {
        return Err(bad_request(format!("E-mail de convidado inválido: {invalid}")));
    }
    Ok(())
}

pub async fn create_appointment(
    service: &AppointmentService,
    request: &HttpRequest,
    appointment_data: CreateAppointmentRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    if let Err(resp) = validate_details(
        &appointment_data.title,
        appointment_data.starts_at,
        appointment_data.ends_at,
        appointment_data.reminder_minutes,
        &appointment_data.attendees,
    ) {
        return Ok(resp);
    }

    let storage = service.get_storage(request)?;
    let cache = service.get_cache(request)?;
    let calendar = service.get_calendar(request)?;

    if let Some(process_id) = appointment_data.process_id
        && let Err(resp) = check_process_access(&storage, &user, process_id).await
    {
        return Ok(resp);
    }

    let new_appointment = NewAppointment {
        process_id: appointment_data.process_id,
        created_by: user.id,
        title: appointment_data.title.trim().to_string(),
        description: appointment_data.description,
        location: appointment_data.location,
        kind: appointment_data.kind,
        starts_at: appointment_data.starts_at,
        ends_at: appointment_data.ends_at,
        reminder_minutes: appointment_data.reminder_minutes,
        attendees: appointment_data.attendees,
        sync_status: SyncStatus::Pending,
    };

    // a gravação local vale mesmo se a agenda falhar
    let appointment = match storage.create_appointment(new_appointment).await {
        Ok(appointment) => appointment,
        Err(e) => return Ok(internal_error("Falha ao criar o agendamento", e)),
    };
    let (appointment, sync_warning) = push_to_calendar(&storage, &calendar, appointment).await;
    invalidate_cache(&cache).await;

    info!(
        "Appointment {} created by user {} ({})",
        appointment.id, user.id, appointment.sync_status
    );

    notify_process_members(
        request,
        &storage,
        &appointment,
        user.id,
        NotificationKind::AppointmentCreated,
        format!("Novo agendamento: {}", appointment.title),
    )
    .await;

    let message = sync_warning
        .clone()
        .unwrap_or_else(|| "Agendamento criado com sucesso".to_string());
    Ok(HttpResponse::Created().json(ApiResponse::success(
        AppointmentResponse {
            appointment,
            sync_warning,
        },
        message,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_details_validation() {
        let start = Utc::now();
        let end = start + Duration::hours(1);
        let guests = vec!["aluno@npj.local".to_string()];

        assert!(validate_details("Audiência", start, end, Some(30), &guests).is_ok());
        assert!(validate_details("   ", start, end, None, &[]).is_err());
        assert!(validate_details("Audiência", start, start, None, &[]).is_err());
        assert!(validate_details("Audiência", end, start, None, &[]).is_err());
        assert!(validate_details("Audiência", start, end, Some(-5), &[]).is_err());
        assert!(
            validate_details("Audiência", start, end, None, &["sem-arroba".to_string()]).is_err()
        );
    }

    #[test]
    fn test_inverted_range_uses_range_code() {
        let start = Utc::now();
        let resp = validate_details("Prazo", start, start - Duration::minutes(1), None, &[])
            .unwrap_err();
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }
}
