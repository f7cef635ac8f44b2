use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::define_string_enum;

define_string_enum! {
    AppointmentKind, "../frontend/src/types/generated/appointment.ts" {
        Hearing => "hearing",
        Meeting => "meeting",
        Deadline => "deadline",
        Service => "service",
        Other => "other",
    }
}

define_string_enum! {
    AppointmentStatus, "../frontend/src/types/generated/appointment.ts" {
        Scheduled => "scheduled",
        Cancelled => "cancelled",
        Done => "done",
    }
}

define_string_enum! {
    /// Situação da cópia do agendamento no Google Calendar
    SyncStatus, "../frontend/src/types/generated/appointment.ts" {
        Synced => "synced",
        Pending => "pending",
        Failed => "failed",
        Disabled => "disabled",
    }
}

/// Agendamento (audiência, reunião, prazo, atendimento)
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/appointment.ts")]
pub struct Appointment {
    pub id: i64,
    pub process_id: Option<i64>,
    pub created_by: i64,
    pub google_event_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub kind: AppointmentKind,
    pub status: AppointmentStatus,
    pub starts_at: chrono::DateTime<chrono::Utc>,
    pub ends_at: chrono::DateTime<chrono::Utc>,
    /// Lembrete em minutos antes do início
    pub reminder_minutes: Option<i32>,
    /// E-mails convidados para o evento
    pub attendees: Vec<String>,
    pub sync_status: SyncStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Dados de um novo agendamento
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub process_id: Option<i64>,
    pub created_by: i64,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub kind: AppointmentKind,
    pub starts_at: chrono::DateTime<chrono::Utc>,
    pub ends_at: chrono::DateTime<chrono::Utc>,
    pub reminder_minutes: Option<i32>,
    pub attendees: Vec<String>,
    pub sync_status: SyncStatus,
}

/// Quem enxerga quais agendamentos
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppointmentVisibility {
    All,
    /// Os criados pelo usuário e os dos processos a que ele tem acesso
    Restricted { user_id: i64, process_ids: Vec<i64> },
}

impl AppointmentVisibility {
    pub fn can_see(&self, appointment: &Appointment) -> bool {
        match self {
            AppointmentVisibility::All => true,
            AppointmentVisibility::Restricted {
                user_id,
                process_ids,
            } => {
                appointment.created_by == *user_id
                    || appointment
                        .process_id
                        .is_some_and(|pid| process_ids.contains(&pid))
            }
        }
    }
}
