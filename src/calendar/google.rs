//! Cliente HTTP do Google Calendar v3
//!
//! Usa o fluxo OAuth2 de refresh token; o access token fica em memória até
//! 60 s antes de expirar.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Response, StatusCode, Url};
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::mapping::{EventList, GoogleEvent};
use super::CalendarProvider;
use crate::config::GoogleCalendarConfig;
use crate::errors::{NpjError, Result};

const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const CALENDAR_API: &str = "https://www.googleapis.com/calendar/v3";
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);
const LIST_PAGE_SIZE: &str = "250";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

struct CachedToken {
    access_token: String,
    refresh_at: Instant,
}

pub struct GoogleCalendarClient {
    http: Client,
    config: GoogleCalendarConfig,
    token: RwLock<Option<CachedToken>>,
}

impl GoogleCalendarClient {
    pub fn new(config: GoogleCalendarConfig) -> Result<Self> {
        if config.client_id.is_empty()
            || config.client_secret.is_empty()
            || config.refresh_token.is_empty()
        {
            return Err(NpjError::google_calendar(
                "client_id, client_secret e refresh_token são obrigatórios",
            ));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout.max(1)))
            .build()?;

        Ok(Self {
            http,
            config,
            token: RwLock::new(None),
        })
    }

    /// `.../calendars/{calendar_id}/events[/{event_id}]`, segmentos codificados
    fn calendar_url(&self, event_id: Option<&str>) -> Result<Url> {
        let mut url = Url::parse(CALENDAR_API)
            .map_err(|e| NpjError::google_calendar(format!("URL da API inválida: {e}")))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| NpjError::google_calendar("URL da API sem caminho"))?;
            segments.extend(["calendars", self.config.calendar_id.as_str(), "events"]);
            if let Some(event_id) = event_id {
                segments.push(event_id);
            }
        }
        Ok(url)
    }

    fn events_url(&self) -> Result<Url> {
        self.calendar_url(None)
    }

    fn event_url(&self, event_id: &str) -> Result<Url> {
        self.calendar_url(Some(event_id))
    }

    async fn access_token(&self) -> Result<String> {
        if let Some(ref cached) = *self.token.read().await
            && Instant::now() < cached.refresh_at
        {
            return Ok(cached.access_token.clone());
        }

        let mut guard = self.token.write().await;
        // outra tarefa pode ter renovado enquanto esperávamos
        if let Some(ref cached) = *guard
            && Instant::now() < cached.refresh_at
        {
            return Ok(cached.access_token.clone());
        }

        debug!("Refreshing Google OAuth access token");
        let response = self
            .http
            .post(TOKEN_URL)
            .form(&[
                ("grant_type", "refresh_token"),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("refresh_token", self.config.refresh_token.as_str()),
            ])
            .send()
            .await?;
        let token: TokenResponse = check_status(response, "renovar token").await?.json().await?;

        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(TOKEN_EXPIRY_MARGIN);
        *guard = Some(CachedToken {
            access_token: token.access_token.clone(),
            refresh_at: Instant::now() + lifetime,
        });

        Ok(token.access_token)
    }
}

/// Convidados só recebem e-mail do Google quando há participantes
fn send_updates(event: &GoogleEvent) -> &'static str {
    if event.has_attendees() { "all" } else { "none" }
}

async fn check_status(response: Response, action: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(NpjError::google_calendar(format!(
        "Falha ao {action} no Google Calendar ({status}): {body}"
    )))
}

#[async_trait]
impl CalendarProvider for GoogleCalendarClient {
    fn is_enabled(&self) -> bool {
        true
    }

    async fn insert_event(&self, event: &GoogleEvent) -> Result<GoogleEvent> {
        let token = self.access_token().await?;
        let response = self
            .http
            .post(self.events_url()?)
            .bearer_auth(token)
            .query(&[("sendUpdates", send_updates(event))])
            .json(event)
            .send()
            .await?;

        Ok(check_status(response, "criar evento").await?.json().await?)
    }

    async fn update_event(&self, event_id: &str, event: &GoogleEvent) -> Result<GoogleEvent> {
        let token = self.access_token().await?;
        let response = self
            .http
            .put(self.event_url(event_id)?)
            .bearer_auth(token)
            .query(&[("sendUpdates", send_updates(event))])
            .json(event)
            .send()
            .await?;

        Ok(check_status(response, "atualizar evento").await?.json().await?)
    }

    async fn get_event(&self, event_id: &str) -> Result<Option<GoogleEvent>> {
        let token = self.access_token().await?;
        let response = self
            .http
            .get(self.event_url(event_id)?)
            .bearer_auth(token)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(check_status(response, "buscar evento").await?.json().await?))
    }

    async fn delete_event(&self, event_id: &str) -> Result<()> {
        let token = self.access_token().await?;
        let response = self
            .http
            .delete(self.event_url(event_id)?)
            .bearer_auth(token)
            .query(&[("sendUpdates", "all")])
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND | StatusCode::GONE => {
                warn!("Google event {} already removed", event_id);
                Ok(())
            }
            _ => check_status(response, "excluir evento").await.map(|_| ()),
        }
    }

    async fn list_events(
        &self,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> Result<Vec<GoogleEvent>> {
        let url = self.events_url()?;
        let time_min = time_min.to_rfc3339();
        let time_max = time_max.to_rfc3339();
        let mut events = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let token = self.access_token().await?;
            let mut request = self.http.get(url.clone()).bearer_auth(token).query(&[
                ("timeMin", time_min.as_str()),
                ("timeMax", time_max.as_str()),
                ("singleEvents", "true"),
                ("showDeleted", "true"),
                ("orderBy", "startTime"),
                ("maxResults", LIST_PAGE_SIZE),
            ]);
            if let Some(ref page) = page_token {
                request = request.query(&[("pageToken", page.as_str())]);
            }

            let list: EventList = check_status(request.send().await?, "listar eventos")
                .await?
                .json()
                .await?;
            events.extend(list.items);

            match list.next_page_token {
                Some(next) if !next.is_empty() => page_token = Some(next),
                _ => break,
            }
        }

        debug!("Listed {} calendar events", events.len());
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GoogleCalendarConfig {
        GoogleCalendarConfig {
            enabled: true,
            client_id: "client".to_string(),
            client_secret: "secret".to_string(),
            refresh_token: "refresh".to_string(),
            calendar_id: "npj@group.calendar.google.com".to_string(),
            time_zone: "America/Sao_Paulo".to_string(),
            timeout: 5,
        }
    }

    #[test]
    fn test_missing_credentials_rejected() {
        let mut cfg = config();
        cfg.refresh_token.clear();
        assert!(GoogleCalendarClient::new(cfg).is_err());
    }

    #[test]
    fn test_event_urls_are_encoded() {
        let client = GoogleCalendarClient::new(config()).unwrap();
        assert_eq!(
            client.event_url("abc123").unwrap().as_str(),
            "https://www.googleapis.com/calendar/v3/calendars/npj@group.calendar.google.com/events/abc123"
        );

        let mut cfg = config();
        cfg.calendar_id = "pt-br.brazilian#holiday@group.v.calendar.google.com".to_string();
        let client = GoogleCalendarClient::new(cfg).unwrap();
        assert_eq!(
            client.events_url().unwrap().as_str(),
            "https://www.googleapis.com/calendar/v3/calendars/pt-br.brazilian%23holiday@group.v.calendar.google.com/events"
        );
        assert!(
            client
                .event_url("a/b c")
                .unwrap()
                .as_str()
                .ends_with("/events/a%2Fb%20c")
        );
    }

    #[test]
    fn test_send_updates_only_with_attendees() {
        let mut event = GoogleEvent::default();
        assert_eq!(send_updates(&event), "none");
        event.attendees.push(super::super::mapping::EventAttendee {
            email: "a@npj.local".to_string(),
            response_status: None,
        });
        assert_eq!(send_updates(&event), "all");
    }
}
