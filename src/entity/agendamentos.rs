//! Agendamentos

use sea_orm::entity::prelude::*;

use super::to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "agendamentos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub process_id: Option<i64>,
    pub created_by: i64,
    #[sea_orm(unique)]
    pub google_event_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub kind: String,
    pub status: String,
    pub starts_at: i64,
    pub ends_at: i64,
    pub reminder_minutes: Option<i32>,
    /// Lista JSON de e-mails
    pub attendees: String,
    pub sync_status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::processos::Entity",
        from = "Column::ProcessId",
        to = "super::processos::Column::Id"
    )]
    Process,
    #[sea_orm(
        belongs_to = "super::usuarios::Entity",
        from = "Column::CreatedBy",
        to = "super::usuarios::Column::Id"
    )]
    Creator,
}

impl Related<super::processos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Process.def()
    }
}

impl Related<super::usuarios::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_appointment(self) -> crate::models::appointments::entities::Appointment {
        use crate::models::appointments::entities::{
            Appointment, AppointmentKind, AppointmentStatus, SyncStatus,
        };

        Appointment {
            id: self.id,
            process_id: self.process_id,
            created_by: self.created_by,
            google_event_id: self.google_event_id,
            title: self.title,
            description: self.description,
            location: self.location,
            kind: self
                .kind
                .parse::<AppointmentKind>()
                .unwrap_or(AppointmentKind::Other),
            status: self
                .status
                .parse::<AppointmentStatus>()
                .unwrap_or(AppointmentStatus::Scheduled),
            starts_at: to_datetime(self.starts_at),
            ends_at: to_datetime(self.ends_at),
            reminder_minutes: self.reminder_minutes,
            attendees: serde_json::from_str(&self.attendees).unwrap_or_default(),
            sync_status: self
                .sync_status
                .parse::<SyncStatus>()
                .unwrap_or(SyncStatus::Pending),
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
        }
    }
}
