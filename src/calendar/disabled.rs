use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{CalendarProvider, GoogleEvent};
use crate::errors::Result;

/// Agenda desligada: nada sai do servidor
pub struct DisabledCalendar;

#[async_trait]
impl CalendarProvider for DisabledCalendar {
    fn is_enabled(&self) -> bool {
        false
    }

    async fn insert_event(&self, event: &GoogleEvent) -> Result<GoogleEvent> {
        Ok(event.clone())
    }

    async fn update_event(&self, _event_id: &str, event: &GoogleEvent) -> Result<GoogleEvent> {
        Ok(event.clone())
    }

    async fn get_event(&self, _event_id: &str) -> Result<Option<GoogleEvent>> {
        Ok(None)
    }

    async fn delete_event(&self, _event_id: &str) -> Result<()> {
        Ok(())
    }

    async fn list_events(
        &self,
        _time_min: DateTime<Utc>,
        _time_max: DateTime<Utc>,
    ) -> Result<Vec<GoogleEvent>> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_calendar_is_noop() {
        let calendar = DisabledCalendar;
        assert!(!calendar.is_enabled());
        assert!(calendar.get_event("x").await.unwrap().is_none());
        assert!(calendar.delete_event("x").await.is_ok());
        let now = Utc::now();
        assert!(calendar.list_events(now, now).await.unwrap().is_empty());
    }
}
