use super::{SeaOrmStorage, db_error};
use crate::entity::agendamentos::{ActiveModel, Column, Entity as Agendamentos};
use crate::errors::{NpjError, Result};
use crate::models::{
    PaginationInfo,
    appointments::{
        entities::{
            Appointment, AppointmentStatus, AppointmentVisibility, NewAppointment, SyncStatus,
        },
        requests::{AppointmentListQuery, UpdateAppointmentRequest},
        responses::AppointmentListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

fn attendees_json(attendees: &[String]) -> Result<String> {
    serde_json::to_string(attendees)
        .map_err(|e| NpjError::serialization(format!("Falha ao serializar participantes: {e}")))
}

impl SeaOrmStorage {
    pub async fn create_appointment_impl(&self, new: NewAppointment) -> Result<Appointment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            process_id: Set(new.process_id),
            created_by: Set(new.created_by),
            google_event_id: Set(None),
            title: Set(new.title),
            description: Set(new.description),
            location: Set(new.location),
            kind: Set(new.kind.to_string()),
            status: Set(AppointmentStatus::Scheduled.to_string()),
            starts_at: Set(new.starts_at.timestamp()),
            ends_at: Set(new.ends_at.timestamp()),
            reminder_minutes: Set(new.reminder_minutes),
            attendees: Set(attendees_json(&new.attendees)?),
            sync_status: Set(new.sync_status.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("Falha ao criar agendamento"))?;

        Ok(result.into_appointment())
    }

    pub async fn get_appointment_by_id_impl(&self, id: i64) -> Result<Option<Appointment>> {
        let result = Agendamentos::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Falha ao buscar agendamento"))?;

        Ok(result.map(|m| m.into_appointment()))
    }

    /// Agendamento ligado a um evento do Google
    pub async fn get_appointment_by_google_event_id_impl(
        &self,
        event_id: &str,
    ) -> Result<Option<Appointment>> {
        let result = Agendamentos::find()
            .filter(Column::GoogleEventId.eq(event_id))
            .one(&self.db)
            .await
            .map_err(db_error("Falha ao buscar agendamento pelo evento"))?;

        Ok(result.map(|m| m.into_appointment()))
    }

    /// Lista por ordem de início; `from`/`to` selecionam quem cruza o intervalo
    pub async fn list_appointments_with_pagination_impl(
        &self,
        query: AppointmentListQuery,
    ) -> Result<AppointmentListResponse> {
        let page = query.page.max(1);
        let size = query.size.max(1);

        let mut select = Agendamentos::find();

        if let AppointmentVisibility::Restricted {
            user_id,
            ref process_ids,
        } = query.visibility
        {
            let mut visible = Condition::any().add(Column::CreatedBy.eq(user_id));
            if !process_ids.is_empty() {
                visible = visible.add(Column::ProcessId.is_in(process_ids.iter().copied()));
            }
            select = select.filter(visible);
        }

        if let Some(from) = query.from {
            select = select.filter(Column::EndsAt.gte(from));
        }
        if let Some(to) = query.to {
            select = select.filter(Column::StartsAt.lte(to));
        }
        if let Some(process_id) = query.process_id {
            select = select.filter(Column::ProcessId.eq(process_id));
        }
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        select = select.order_by_asc(Column::StartsAt).order_by_asc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(db_error("Falha ao contar agendamentos"))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(db_error("Falha ao contar páginas de agendamentos"))?;
        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(db_error("Falha ao listar agendamentos"))?;

        Ok(AppointmentListResponse {
            items: rows.into_iter().map(|m| m.into_appointment()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    pub async fn update_appointment_impl(
        &self,
        id: i64,
        update: UpdateAppointmentRequest,
    ) -> Result<Option<Appointment>> {
        if self.get_appointment_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(process_id) = update.process_id {
            model.process_id = Set(Some(process_id));
        }
        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(location) = update.location {
            model.location = Set(Some(location));
        }
        if let Some(kind) = update.kind {
            model.kind = Set(kind.to_string());
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }
        if let Some(starts_at) = update.starts_at {
            model.starts_at = Set(starts_at.timestamp());
        }
        if let Some(ends_at) = update.ends_at {
            model.ends_at = Set(ends_at.timestamp());
        }
        if let Some(reminder) = update.reminder_minutes {
            model.reminder_minutes = Set(Some(reminder));
        }
        if let Some(ref attendees) = update.attendees {
            model.attendees = Set(attendees_json(attendees)?);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(db_error("Falha ao atualizar agendamento"))?;

        Ok(Some(result.into_appointment()))
    }

    /// Grava o resultado da sincronização com a agenda externa
    pub async fn set_appointment_sync_impl(
        &self,
        id: i64,
        google_event_id: Option<String>,
        sync_status: SyncStatus,
    ) -> Result<Option<Appointment>> {
        if self.get_appointment_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(id),
            google_event_id: Set(google_event_id),
            sync_status: Set(sync_status.to_string()),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(db_error("Falha ao atualizar sincronização do agendamento"))?;

        Ok(Some(result.into_appointment()))
    }
}
