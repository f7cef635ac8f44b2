use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::define_string_enum;

define_string_enum! {
    NotificationKind, "../frontend/src/types/generated/notification.ts" {
        ProcessAssigned => "process_assigned",
        ProcessUpdated => "process_updated",
        AppointmentCreated => "appointment_created",
        AppointmentUpdated => "appointment_updated",
        AppointmentCancelled => "appointment_cancelled",
        System => "system",
    }
}

define_string_enum! {
    /// Entidade à qual a notificação se refere
    ReferenceType, "../frontend/src/types/generated/notification.ts" {
        Process => "process",
        Appointment => "appointment",
        ProcessUpdate => "process_update",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    pub kind: NotificationKind,
    pub title: String,
    pub content: Option<String>,
    pub reference_type: Option<ReferenceType>,
    pub reference_id: Option<i64>,
    pub is_read: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Notificação a criar
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub user_id: i64,
    pub kind: NotificationKind,
    pub title: String,
    pub content: Option<String>,
    pub reference_type: Option<ReferenceType>,
    pub reference_id: Option<i64>,
}

impl NewNotification {
    pub fn new(user_id: i64, kind: NotificationKind, title: impl Into<String>) -> Self {
        Self {
            user_id,
            kind,
            title: title.into(),
            content: None,
            reference_type: None,
            reference_id: None,
        }
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn reference(mut self, reference_type: ReferenceType, id: i64) -> Self {
        self.reference_type = Some(reference_type);
        self.reference_id = Some(id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let n = NewNotification::new(3, NotificationKind::ProcessAssigned, "Novo processo")
            .content("Você foi vinculado")
            .reference(ReferenceType::Process, 10);
        assert_eq!(n.user_id, 3);
        assert_eq!(n.reference_type, Some(ReferenceType::Process));
        assert_eq!(n.reference_id, Some(10));
        assert_eq!(n.kind.as_str(), "process_assigned");
    }
}
