//! Agenda externa (Google Calendar)
//!
//! O banco local é a fonte da verdade; a agenda recebe uma cópia de cada
//! agendamento. Falhas na agenda nunca desfazem a gravação local.

pub mod disabled;
pub mod google;
pub mod mapping;

pub use disabled::DisabledCalendar;
pub use google::GoogleCalendarClient;
pub use mapping::GoogleEvent;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{error, info};

use crate::config::GoogleCalendarConfig;
use crate::errors::Result;

#[async_trait]
pub trait CalendarProvider: Send + Sync {
    /// `false` quando a integração está desligada
    fn is_enabled(&self) -> bool;

    async fn insert_event(&self, event: &GoogleEvent) -> Result<GoogleEvent>;

    async fn update_event(&self, event_id: &str, event: &GoogleEvent) -> Result<GoogleEvent>;

    /// `None` quando o evento não existe mais
    async fn get_event(&self, event_id: &str) -> Result<Option<GoogleEvent>>;

    /// Evento já removido conta como sucesso
    async fn delete_event(&self, event_id: &str) -> Result<()>;

    async fn list_events(
        &self,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> Result<Vec<GoogleEvent>>;
}

/// Cliente do Google quando habilitado e configurado; senão a agenda desligada
pub fn create_calendar(config: &GoogleCalendarConfig) -> Arc<dyn CalendarProvider> {
    if !config.enabled {
        info!("Google Calendar disabled");
        return Arc::new(DisabledCalendar);
    }

    match GoogleCalendarClient::new(config.clone()) {
        Ok(client) => {
            info!("Google Calendar enabled for calendar '{}'", config.calendar_id);
            Arc::new(client)
        }
        Err(e) => {
            error!("Google Calendar unavailable, running without sync: {}", e);
            Arc::new(DisabledCalendar)
        }
    }
}
