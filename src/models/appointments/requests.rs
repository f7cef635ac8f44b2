use super::entities::{AppointmentKind, AppointmentStatus, AppointmentVisibility};
use crate::models::common::{PaginationQuery, query::optional_i64};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/appointment.ts")]
pub struct CreateAppointmentRequest {
    pub process_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    #[serde(default = "default_kind")]
    pub kind: AppointmentKind,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub reminder_minutes: Option<i32>,
    #[serde(default)]
    pub attendees: Vec<String>,
}

fn default_kind() -> AppointmentKind {
    AppointmentKind::Other
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/appointment.ts")]
pub struct UpdateAppointmentRequest {
    pub process_id: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub kind: Option<AppointmentKind>,
    pub status: Option<AppointmentStatus>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub reminder_minutes: Option<i32>,
    pub attendees: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/appointment.ts")]
pub struct AppointmentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    /// Início da janela (RFC 3339)
    pub from: Option<DateTime<Utc>>,
    /// Fim da janela (RFC 3339)
    pub to: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "optional_i64")]
    #[ts(optional)]
    pub process_id: Option<i64>,
    pub status: Option<AppointmentStatus>,
}

/// Janela da sincronização em lote; padrão: agora até 30 dias
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/appointment.ts")]
pub struct CalendarSyncRequest {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

/// Filtros para a camada de armazenamento
#[derive(Debug, Clone)]
pub struct AppointmentListQuery {
    pub page: u64,
    pub size: u64,
    pub from: Option<i64>,
    pub to: Option<i64>,
    pub process_id: Option<i64>,
    pub status: Option<AppointmentStatus>,
    pub visibility: AppointmentVisibility,
}

impl AppointmentListQuery {
    pub fn from_params(params: AppointmentListParams, visibility: AppointmentVisibility) -> Self {
        let (page, size) = params.pagination.normalized();
        Self {
            page,
            size,
            from: params.from.map(|d| d.timestamp()),
            to: params.to.map(|d| d.timestamp()),
            process_id: params.process_id,
            status: params.status,
            visibility,
        }
    }

    /// Parte da chave de cache que identifica os filtros
    pub fn cache_fragment(&self) -> String {
        let opt = |v: Option<i64>| v.map(|n| n.to_string()).unwrap_or_default();
        format!(
            "p={}&s={}&from={}&to={}&proc={}&st={}",
            self.page,
            self.size,
            opt(self.from),
            opt(self.to),
            opt(self.process_id),
            self.status.map(|s| s.as_str()).unwrap_or_default()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_fragment_depends_on_filters() {
        let base = AppointmentListQuery {
            page: 1,
            size: 20,
            from: None,
            to: None,
            process_id: None,
            status: None,
            visibility: AppointmentVisibility::All,
        };
        let filtered = AppointmentListQuery {
            process_id: Some(4),
            status: Some(AppointmentStatus::Scheduled),
            ..base.clone()
        };
        assert_ne!(base.cache_fragment(), filtered.cache_fragment());
        assert!(filtered.cache_fragment().contains("proc=4"));
        assert!(filtered.cache_fragment().contains("st=scheduled"));
    }

    #[test]
    fn test_create_request_defaults() {
        let req: CreateAppointmentRequest = serde_json::from_str(
            r#"{"title":"Audiência","starts_at":"2025-03-10T13:00:00Z","ends_at":"2025-03-10T14:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(req.kind, AppointmentKind::Other);
        assert!(req.attendees.is_empty());
    }
}
