use super::entities::Appointment;
use crate::models::common::PaginationInfo;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/appointment.ts")]
pub struct AppointmentListResponse {
    pub items: Vec<Appointment>,
    pub pagination: PaginationInfo,
}

/// Agendamento e, se a agenda falhou, o aviso correspondente
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/appointment.ts")]
pub struct AppointmentResponse {
    pub appointment: Appointment,
    pub sync_warning: Option<String>,
}

#[derive(Debug, Default, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/appointment.ts")]
pub struct CalendarSyncSummary {
    /// Eventos lidos da agenda
    pub checked: u32,
    pub updated: u32,
    /// Eventos sem agendamento correspondente
    pub skipped: u32,
    pub failed: u32,
}
