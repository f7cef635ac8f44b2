//! Conversão entre agendamentos e eventos do Google Calendar (API v3)

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::errors::{NpjError, Result};
use crate::models::appointments::{
    entities::{Appointment, AppointmentStatus},
    requests::UpdateAppointmentRequest,
};

/// Propriedade privada que liga o evento ao agendamento local
pub const APPOINTMENT_ID_PROPERTY: &str = "npjAppointmentId";

const CANCELLED_STATUS: &str = "cancelled";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Eventos apagados podem vir só com `id` e `status`
    #[serde(default)]
    pub start: EventDateTime,
    #[serde(default)]
    pub end: EventDateTime,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attendees: Vec<EventAttendee>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminders: Option<EventReminders>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extended_properties: Option<ExtendedProperties>,
    #[serde(skip_serializing)]
    pub html_link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDateTime {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    /// Eventos de dia inteiro (`YYYY-MM-DD`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventAttendee {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventReminders {
    pub use_default: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overrides: Vec<ReminderOverride>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderOverride {
    pub method: String,
    pub minutes: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtendedProperties {
    #[serde(default)]
    pub private: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventList {
    #[serde(default)]
    pub items: Vec<GoogleEvent>,
    pub next_page_token: Option<String>,
}

impl GoogleEvent {
    /// Id do agendamento gravado na propriedade privada
    pub fn appointment_id(&self) -> Option<i64> {
        self.extended_properties
            .as_ref()
            .and_then(|p| p.private.get(APPOINTMENT_ID_PROPERTY))
            .and_then(|v| v.parse().ok())
    }

    pub fn is_cancelled(&self) -> bool {
        self.status.as_deref() == Some(CANCELLED_STATUS)
    }

    pub fn has_attendees(&self) -> bool {
        !self.attendees.is_empty()
    }
}

fn event_time(at: DateTime<Utc>, time_zone: &str) -> EventDateTime {
    EventDateTime {
        date_time: Some(at.to_rfc3339()),
        date: None,
        time_zone: Some(time_zone.to_string()),
    }
}

/// Agendamento -> corpo do evento
pub fn appointment_to_event(appointment: &Appointment, time_zone: &str) -> GoogleEvent {
    let reminders = match appointment.reminder_minutes {
        Some(minutes) if minutes >= 0 => EventReminders {
            use_default: false,
            overrides: vec![ReminderOverride {
                method: "popup".to_string(),
                minutes,
            }],
        },
        _ => EventReminders {
            use_default: true,
            overrides: Vec::new(),
        },
    };

    let mut private = HashMap::new();
    private.insert(
        APPOINTMENT_ID_PROPERTY.to_string(),
        appointment.id.to_string(),
    );

    GoogleEvent {
        id: None,
        status: (appointment.status == AppointmentStatus::Cancelled)
            .then(|| CANCELLED_STATUS.to_string()),
        summary: appointment.title.clone(),
        description: appointment.description.clone(),
        location: appointment.location.clone(),
        start: event_time(appointment.starts_at, time_zone),
        end: event_time(appointment.ends_at, time_zone),
        attendees: appointment
            .attendees
            .iter()
            .map(|email| EventAttendee {
                email: email.clone(),
                response_status: None,
            })
            .collect(),
        reminders: Some(reminders),
        extended_properties: Some(ExtendedProperties { private }),
        html_link: None,
    }
}

/// Horário do evento em UTC; dia inteiro vira 00:00 UTC
pub fn parse_event_time(time: &EventDateTime) -> Result<DateTime<Utc>> {
    if let Some(ref date_time) = time.date_time {
        return Ok(DateTime::parse_from_rfc3339(date_time)?.with_timezone(&Utc));
    }
    if let Some(ref date) = time.date {
        let day = NaiveDate::parse_from_str(date, "%Y-%m-%d")?;
        return day
            .and_hms_opt(0, 0, 0)
            .map(|naive| naive.and_utc())
            .ok_or_else(|| NpjError::date_parse(format!("Data inválida: {date}")));
    }
    Err(NpjError::date_parse("Evento sem horário de início/fim"))
}

/// Evento remoto -> alterações a aplicar no agendamento local
///
/// Evento cancelado só cancela; o Google não garante os demais campos nele.
pub fn event_to_patch(event: &GoogleEvent) -> Result<UpdateAppointmentRequest> {
    if event.is_cancelled() {
        return Ok(UpdateAppointmentRequest {
            status: Some(AppointmentStatus::Cancelled),
            ..Default::default()
        });
    }
    Ok(UpdateAppointmentRequest {
        title: Some(event.summary.clone()).filter(|s| !s.is_empty()),
        description: event.description.clone(),
        location: event.location.clone(),
        starts_at: Some(parse_event_time(&event.start)?),
        ends_at: Some(parse_event_time(&event.end)?),
        attendees: Some(event.attendees.iter().map(|a| a.email.clone()).collect()),
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::appointments::entities::{AppointmentKind, SyncStatus};
    use chrono::TimeZone;

    fn appointment() -> Appointment {
        Appointment {
            id: 42,
            process_id: Some(3),
            created_by: 1,
            google_event_id: None,
            title: "Audiência de conciliação".to_string(),
            description: Some("Levar documentos".to_string()),
            location: Some("Fórum Central".to_string()),
            kind: AppointmentKind::Hearing,
            status: AppointmentStatus::Scheduled,
            starts_at: Utc.with_ymd_and_hms(2025, 3, 10, 13, 0, 0).unwrap(),
            ends_at: Utc.with_ymd_and_hms(2025, 3, 10, 14, 0, 0).unwrap(),
            reminder_minutes: Some(30),
            attendees: vec!["aluno@npj.local".to_string()],
            sync_status: SyncStatus::Pending,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_event_carries_time_zone_and_reminder() {
        let event = appointment_to_event(&appointment(), "America/Sao_Paulo");

        assert_eq!(event.summary, "Audiência de conciliação");
        assert_eq!(event.start.time_zone.as_deref(), Some("America/Sao_Paulo"));
        assert_eq!(
            event.start.date_time.as_deref(),
            Some("2025-03-10T13:00:00+00:00")
        );
        let reminders = event.reminders.clone().unwrap();
        assert!(!reminders.use_default);
        assert_eq!(reminders.overrides[0].method, "popup");
        assert_eq!(reminders.overrides[0].minutes, 30);
        assert_eq!(event.attendees[0].email, "aluno@npj.local");
        assert_eq!(event.appointment_id(), Some(42));
        assert!(event.status.is_none());
    }

    #[test]
    fn test_event_json_shape() {
        let json = serde_json::to_value(appointment_to_event(&appointment(), "UTC")).unwrap();
        assert_eq!(json["start"]["timeZone"], "UTC");
        assert_eq!(
            json["extendedProperties"]["private"]["npjAppointmentId"],
            "42"
        );
        assert!(json.get("id").is_none());
        assert!(json.get("htmlLink").is_none());
    }

    #[test]
    fn test_no_reminder_uses_calendar_default() {
        let mut a = appointment();
        a.reminder_minutes = None;
        a.status = AppointmentStatus::Cancelled;
        let event = appointment_to_event(&a, "UTC");
        assert!(event.reminders.unwrap().use_default);
        assert!(event.is_cancelled());
    }

    #[test]
    fn test_patch_from_remote_event() {
        let event: GoogleEvent = serde_json::from_str(
            r#"{
                "id": "abc123",
                "status": "confirmed",
                "summary": "Reunião remarcada",
                "start": {"dateTime": "2025-03-11T10:00:00-03:00"},
                "end": {"dateTime": "2025-03-11T11:00:00-03:00"},
                "attendees": [{"email": "prof@npj.local", "responseStatus": "accepted"}]
            }"#,
        )
        .unwrap();

        let patch = event_to_patch(&event).unwrap();
        assert_eq!(patch.title.as_deref(), Some("Reunião remarcada"));
        assert_eq!(
            patch.starts_at,
            Some(Utc.with_ymd_and_hms(2025, 3, 11, 13, 0, 0).unwrap())
        );
        assert_eq!(patch.status, None);
        assert_eq!(patch.attendees, Some(vec!["prof@npj.local".to_string()]));
    }

    #[test]
    fn test_deleted_event_in_list_only_cancels() {
        let list: EventList = serde_json::from_str(
            r#"{
                "items": [
                    {
                        "id": "vivo",
                        "status": "confirmed",
                        "summary": "Atendimento",
                        "start": {"dateTime": "2025-03-11T10:00:00-03:00"},
                        "end": {"dateTime": "2025-03-11T11:00:00-03:00"}
                    },
                    {"id": "apagado", "status": "cancelled"}
                ],
                "nextPageToken": "pagina-2"
            }"#,
        )
        .unwrap();

        assert_eq!(list.items.len(), 2);
        assert_eq!(list.next_page_token.as_deref(), Some("pagina-2"));

        let deleted = &list.items[1];
        assert!(deleted.is_cancelled());
        let patch = event_to_patch(deleted).unwrap();
        assert_eq!(patch.status, Some(AppointmentStatus::Cancelled));
        assert!(patch.starts_at.is_none());
        assert!(patch.title.is_none());
    }

    #[test]
    fn test_all_day_event_starts_at_midnight_utc() {
        let time = EventDateTime {
            date: Some("2025-04-21".to_string()),
            ..Default::default()
        };
        assert_eq!(
            parse_event_time(&time).unwrap(),
            Utc.with_ymd_and_hms(2025, 4, 21, 0, 0, 0).unwrap()
        );
        assert!(parse_event_time(&EventDateTime::default()).is_err());
    }
}
