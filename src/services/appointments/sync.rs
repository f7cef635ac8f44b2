//! Sincronização com a agenda externa
//!
//! Envio: toda gravação local é copiada para a agenda. Retorno: eventos
//! alterados direto no Google voltam para o banco, casados pela
//! propriedade privada `npjAppointmentId`.

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::{info, warn};

use super::{AppointmentService, appointment_not_found, can_see, invalidate_cache, invalid_range};
use crate::calendar::{CalendarProvider, GoogleEvent};
use crate::calendar::mapping::{appointment_to_event, event_to_patch};
use crate::config::AppConfig;
use crate::models::appointments::entities::{Appointment, AppointmentStatus, SyncStatus};
use crate::models::appointments::requests::{CalendarSyncRequest, UpdateAppointmentRequest};
use crate::models::appointments::responses::{AppointmentResponse, CalendarSyncSummary};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, internal_error};
use crate::storage::Storage;

const DEFAULT_SYNC_WINDOW_DAYS: i64 = 30;

pub(crate) const SYNC_FAILED_WARNING: &str =
    "Agendamento salvo, mas a sincronização com o Google Calendar falhou";

/// Grava a situação da cópia remota; em caso de erro devolve o agendamento como estava
async fn record_sync(
    storage: &Arc<dyn Storage>,
    appointment: Appointment,
    google_event_id: Option<String>,
    status: SyncStatus,
) -> Appointment {
    match storage
        .set_appointment_sync(appointment.id, google_event_id, status)
        .await
    {
        Ok(Some(updated)) => updated,
        Ok(None) => appointment,
        Err(e) => {
            warn!("Failed to record sync status of appointment {}: {}", appointment.id, e);
            appointment
        }
    }
}

/// Cria ou atualiza o evento do agendamento; cancelados saem da agenda
pub(crate) async fn push_to_calendar(
    storage: &Arc<dyn Storage>,
    calendar: &Arc<dyn CalendarProvider>,
    appointment: Appointment,
) -> (Appointment, Option<String>) {
    if appointment.status == AppointmentStatus::Cancelled {
        return remove_from_calendar(storage, calendar, appointment).await;
    }
    if !calendar.is_enabled() {
        let event_id = appointment.google_event_id.clone();
        return (record_sync(storage, appointment, event_id, SyncStatus::Disabled).await, None);
    }

    let event = appointment_to_event(&appointment, &AppConfig::get().google.time_zone);
    let result = match appointment.google_event_id {
        Some(ref event_id) => calendar.update_event(event_id, &event).await,
        None => calendar.insert_event(&event).await,
    };

    match result {
        Ok(remote) => {
            let event_id = remote.id.or_else(|| appointment.google_event_id.clone());
            (record_sync(storage, appointment, event_id, SyncStatus::Synced).await, None)
        }
        Err(e) => {
            warn!("Calendar sync failed for appointment {}: {}", appointment.id, e);
            let event_id = appointment.google_event_id.clone();
            (
                record_sync(storage, appointment, event_id, SyncStatus::Failed).await,
                Some(SYNC_FAILED_WARNING.to_string()),
            )
        }
    }
}

/// Apaga o evento remoto, se houver
pub(crate) async fn remove_from_calendar(
    storage: &Arc<dyn Storage>,
    calendar: &Arc<dyn CalendarProvider>,
    appointment: Appointment,
) -> (Appointment, Option<String>) {
    if !calendar.is_enabled() {
        let event_id = appointment.google_event_id.clone();
        return (record_sync(storage, appointment, event_id, SyncStatus::Disabled).await, None);
    }

    let Some(event_id) = appointment.google_event_id.clone() else {
        return (record_sync(storage, appointment, None, SyncStatus::Synced).await, None);
    };

    match calendar.delete_event(&event_id).await {
        Ok(()) => (record_sync(storage, appointment, None, SyncStatus::Synced).await, None),
        Err(e) => {
            warn!("Failed to delete event {} from calendar: {}", event_id, e);
            (
                record_sync(storage, appointment, Some(event_id), SyncStatus::Failed).await,
                Some(SYNC_FAILED_WARNING.to_string()),
            )
        }
    }
}

fn calendar_disabled() -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::CalendarDisabled,
        "Integração com o Google Calendar desabilitada",
    ))
}

fn sync_failed() -> HttpResponse {
    HttpResponse::BadGateway().json(ApiResponse::error_empty(
        ErrorCode::CalendarSyncFailed,
        "Falha ao consultar o Google Calendar",
    ))
}

/// Aplica no banco o estado do evento remoto
async fn apply_remote(
    storage: &Arc<dyn Storage>,
    appointment: Appointment,
    patch: UpdateAppointmentRequest,
    event_id: Option<String>,
) -> crate::errors::Result<Appointment> {
    let cancelled = patch.status == Some(AppointmentStatus::Cancelled);
    let updated = storage
        .update_appointment(appointment.id, patch)
        .await?
        .unwrap_or(appointment);
    // evento cancelado no Google não volta mais
    let event_id = if cancelled { None } else { event_id };
    Ok(record_sync(storage, updated, event_id, SyncStatus::Synced).await)
}

/// Traz as alterações do evento remoto de um agendamento
pub async fn pull_appointment(
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

    let appointment = match storage.get_appointment_by_id(appointment_id).await {
        Ok(Some(appointment)) => appointment,
        Ok(None) => return Ok(appointment_not_found()),
        Err(e) => return Ok(internal_error("Falha ao buscar o agendamento", e)),
    };
    match can_see(&storage, &user, &appointment).await {
        Ok(true) => {}
        Ok(false) => return Ok(appointment_not_found()),
        Err(e) => return Ok(internal_error("Falha ao verificar o acesso", e)),
    }

    if !calendar.is_enabled() {
        return Ok(calendar_disabled());
    }

    // ainda sem evento remoto: envia em vez de buscar
    let Some(event_id) = appointment.google_event_id.clone() else {
        let (appointment, sync_warning) = push_to_calendar(&storage, &calendar, appointment).await;
        invalidate_cache(&cache).await;
        let message = sync_warning.clone().unwrap_or_else(|| "Agendamento sincronizado".to_string());
        return Ok(HttpResponse::Ok().json(ApiResponse::success(
            AppointmentResponse {
                appointment,
                sync_warning,
            },
            message,
        )));
    };

    let remote = match calendar.get_event(&event_id).await {
        Ok(remote) => remote,
        Err(e) => {
            warn!("Failed to fetch event {}: {}", event_id, e);
            record_sync(&storage, appointment, Some(event_id), SyncStatus::Failed).await;
            invalidate_cache(&cache).await;
            return Ok(sync_failed());
        }
    };

    // evento apagado direto na agenda vale como cancelamento
    let patch = match remote {
        Some(ref event) => match event_to_patch(event) {
            Ok(patch) => patch,
            Err(e) => {
                warn!("Unreadable event {}: {}", event_id, e);
                return Ok(sync_failed());
            }
        },
        None => UpdateAppointmentRequest {
            status: Some(AppointmentStatus::Cancelled),
            ..Default::default()
        },
    };

    let updated = match apply_remote(&storage, appointment, patch, Some(event_id)).await {
        Ok(updated) => updated,
        Err(e) => return Ok(internal_error("Falha ao atualizar o agendamento", e)),
    };
    invalidate_cache(&cache).await;
    info!("Appointment {} pulled from calendar by user {}", updated.id, user.id);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        AppointmentResponse {
            appointment: updated,
            sync_warning: None,
        },
        "Agendamento sincronizado",
    )))
}

/// Agendamento local do evento: pela propriedade privada ou, em eventos
/// apagados que vêm sem ela, pelo id do evento
async fn find_local(
    storage: &Arc<dyn Storage>,
    event: &GoogleEvent,
) -> crate::errors::Result<Option<Appointment>> {
    if let Some(appointment_id) = event.appointment_id() {
        return storage.get_appointment_by_id(appointment_id).await;
    }
    match event.id {
        Some(ref event_id) => storage.get_appointment_by_google_event_id(event_id).await,
        None => Ok(None),
    }
}

/// Reconcilia todos os eventos da janela com os agendamentos locais
pub async fn sync_range(
    service: &AppointmentService,
    request: &HttpRequest,
    range: CalendarSyncRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;
    let cache = service.get_cache(request)?;
    let calendar = service.get_calendar(request)?;

    if !calendar.is_enabled() {
        return Ok(calendar_disabled());
    }

    let from = range.from.unwrap_or_else(Utc::now);
    let to = range
        .to
        .unwrap_or_else(|| from + Duration::days(DEFAULT_SYNC_WINDOW_DAYS));
    if to <= from {
        return Ok(invalid_range());
    }

    let events = match calendar.list_events(from, to).await {
        Ok(events) => events,
        Err(e) => {
            warn!("Failed to list calendar events: {}", e);
            return Ok(sync_failed());
        }
    };

    let mut summary = CalendarSyncSummary::default();
    for event in events {
        summary.checked += 1;

        let appointment = match find_local(&storage, &event).await {
            Ok(Some(appointment)) => appointment,
            Ok(None) => {
                summary.skipped += 1;
                continue;
            }
            Err(e) => {
                warn!("Failed to load appointment for event {:?}: {}", event.id, e);
                summary.failed += 1;
                continue;
            }
        };
        let appointment_id = appointment.id;

        // cancelado dos dois lados: nada a fazer
        if event.is_cancelled() && appointment.status == AppointmentStatus::Cancelled {
            summary.skipped += 1;
            continue;
        }

        let patch = match event_to_patch(&event) {
            Ok(patch) => patch,
            Err(e) => {
                warn!("Unreadable event for appointment {}: {}", appointment_id, e);
                summary.failed += 1;
                continue;
            }
        };

        let event_id = event.id.clone().or(appointment.google_event_id.clone());
        match apply_remote(&storage, appointment, patch, event_id).await {
            Ok(_) => summary.updated += 1,
            Err(e) => {
                warn!("Failed to update appointment {}: {}", appointment_id, e);
                summary.failed += 1;
            }
        }
    }

    invalidate_cache(&cache).await;
    info!(
        "Calendar sync by user {}: {} checked, {} updated, {} skipped, {} failed",
        user.id, summary.checked, summary.updated, summary.skipped, summary.failed
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(summary, "Sincronização concluída")))
}
