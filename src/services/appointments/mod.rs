pub mod cancel;
pub mod create;
pub mod get;
pub mod list;
pub mod sync;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::warn;

use crate::cache::{ObjectCache, keys};
use crate::calendar::CalendarProvider;
use crate::middlewares::RequireProcessAccess;
use crate::models::appointments::entities::{Appointment, AppointmentVisibility};
use crate::models::appointments::requests::{
    AppointmentListParams, CalendarSyncRequest, CreateAppointmentRequest, UpdateAppointmentRequest,
};
use crate::models::notifications::entities::{NewNotification, NotificationKind, ReferenceType};
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::notifications::{dispatch::recipients_except, dispatch_notifications};
use crate::storage::Storage;

pub struct AppointmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl AppointmentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::app_state::<dyn Storage>(request, "Storage"),
        }
    }

    pub(crate) fn get_cache(&self, request: &HttpRequest) -> ActixResult<Arc<dyn ObjectCache>> {
        super::app_state::<dyn ObjectCache>(request, "Cache")
    }

    pub(crate) fn get_calendar(
        &self,
        request: &HttpRequest,
    ) -> ActixResult<Arc<dyn CalendarProvider>> {
        super::app_state::<dyn CalendarProvider>(request, "Calendar")
    }

    pub async fn list_appointments(
        &self,
        request: &HttpRequest,
        query: AppointmentListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_appointments(self, request, query).await
    }

    pub async fn create_appointment(
        &self,
        request: &HttpRequest,
        appointment_data: CreateAppointmentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_appointment(self, request, appointment_data).await
    }

    pub async fn get_appointment(
        &self,
        request: &HttpRequest,
        appointment_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_appointment(self, request, appointment_id).await
    }

    pub async fn update_appointment(
        &self,
        request: &HttpRequest,
        appointment_id: i64,
        update_data: UpdateAppointmentRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_appointment(self, request, appointment_id, update_data).await
    }

    pub async fn cancel_appointment(
        &self,
        request: &HttpRequest,
        appointment_id: i64,
    ) -> ActixResult<HttpResponse> {
        cancel::cancel_appointment(self, request, appointment_id).await
    }

    pub async fn pull_appointment(
        &self,
        request: &HttpRequest,
        appointment_id: i64,
    ) -> ActixResult<HttpResponse> {
        sync::pull_appointment(self, request, appointment_id).await
    }

    pub async fn sync_range(
        &self,
        request: &HttpRequest,
        range: CalendarSyncRequest,
    ) -> ActixResult<HttpResponse> {
        sync::sync_range(self, request, range).await
    }
}

pub(crate) fn appointment_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::AppointmentNotFound,
        "Agendamento não encontrado",
    ))
}

pub(crate) fn invalid_range() -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::AppointmentInvalidRange,
        "O término deve ser posterior ao início",
    ))
}

/// Toda escrita em agendamentos derruba as listagens e itens em cache
pub(crate) async fn invalidate_cache(cache: &Arc<dyn ObjectCache>) {
    cache.remove_prefix(keys::APPOINTMENTS_PREFIX).await;
}

/// Administrador vê tudo; os demais, o que criaram e o dos seus processos
pub(crate) async fn visibility_for(
    storage: &Arc<dyn Storage>,
    user: &User,
) -> crate::errors::Result<AppointmentVisibility> {
    if user.is_admin() {
        return Ok(AppointmentVisibility::All);
    }
    Ok(AppointmentVisibility::Restricted {
        user_id: user.id,
        process_ids: storage.list_accessible_process_ids(user.id).await?,
    })
}

/// Leitura: quem criou, a coordenação ou quem tem acesso ao processo
pub(crate) async fn can_see(
    storage: &Arc<dyn Storage>,
    user: &User,
    appointment: &Appointment,
) -> crate::errors::Result<bool> {
    if user.is_admin() || appointment.created_by == user.id {
        return Ok(true);
    }
    match appointment.process_id {
        Some(process_id) => Ok(storage
            .get_process_membership(process_id, user.id)
            .await?
            .is_some_and(|m| RequireProcessAccess::has_access(user, Some(m)))),
        None => Ok(false),
    }
}

/// Escrita: quem criou, a coordenação ou o professor do processo
pub(crate) async fn can_edit(
    storage: &Arc<dyn Storage>,
    user: &User,
    appointment: &Appointment,
) -> crate::errors::Result<bool> {
    if user.is_admin() || appointment.created_by == user.id {
        return Ok(true);
    }
    match appointment.process_id {
        Some(process_id) => {
            let membership = storage.get_process_membership(process_id, user.id).await?;
            Ok(membership.is_some() && RequireProcessAccess::is_manager(user, membership))
        }
        None => Ok(false),
    }
}

/// Novo vínculo com processo exige acesso a ele
pub(crate) async fn check_process_access(
    storage: &Arc<dyn Storage>,
    user: &User,
    process_id: i64,
) -> Result<(), HttpResponse> {
    match storage.get_process_membership(process_id, user.id).await {
        Ok(Some(membership)) if RequireProcessAccess::has_access(user, Some(membership)) => Ok(()),
        Ok(Some(_)) => Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::ProcessAccessDenied,
            "Sem acesso a este processo",
        ))),
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ProcessNotFound,
            "Processo não encontrado",
        ))),
        Err(e) => Err(super::internal_error("Falha ao verificar o processo", e)),
    }
}

/// Avisa a equipe e o assistido do processo, menos quem fez a alteração
pub(crate) async fn notify_process_members(
    request: &HttpRequest,
    storage: &Arc<dyn Storage>,
    appointment: &Appointment,
    actor_id: i64,
    kind: NotificationKind,
    title: String,
) {
    let Some(process_id) = appointment.process_id else {
        return;
    };
    let members = match storage.list_process_member_ids(process_id).await {
        Ok(members) => members,
        Err(e) => {
            warn!("Failed to load members of process {}: {}", process_id, e);
            return;
        }
    };

    let when = appointment.starts_at.format("%d/%m/%Y %H:%M UTC").to_string();
    let notifications = recipients_except(members, actor_id)
        .into_iter()
        .map(|member_id| {
            NewNotification::new(member_id, kind, title.clone())
                .content(format!("{} em {}", appointment.title, when))
                .reference(ReferenceType::Appointment, appointment.id)
        })
        .collect();
    dispatch_notifications(request, storage, notifications).await;
}
