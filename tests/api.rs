use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde_json::{Value, json};

use npj_backend::cache::ObjectCache;
use npj_backend::cache::object_cache::moka::MokaCacheWrapper;
use npj_backend::calendar::mapping::EventDateTime;
use npj_backend::calendar::{CalendarProvider, DisabledCalendar, GoogleEvent};
use npj_backend::config::AppConfig;
use npj_backend::errors::{NpjError, Result};
use npj_backend::mailer::Mailer;
use npj_backend::models::AppStartTime;
use npj_backend::models::users::entities::{User, UserRole};
use npj_backend::models::users::requests::CreateUserRequest;
use npj_backend::routes;
use npj_backend::storage::Storage;
use npj_backend::storage::sea_orm_storage::SeaOrmStorage;
use npj_backend::utils::jwt::JwtUtils;
use npj_backend::utils::password::hash_password;
use npj_backend::utils::{json_error_handler, path_error_handler, query_error_handler};

const PASSWORD: &str = "Nucleo@2025";

fn init_config() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let mut config = AppConfig::load().expect("load config");
        config.argon2.memory_cost = 1024;
        config.argon2.time_cost = 1;
        config.google.enabled = false;
        config.email.enabled = false;
        config.upload.dir = std::env::temp_dir()
            .join("npj-backend-tests")
            .to_string_lossy()
            .into_owned();
        AppConfig::init_with(config).expect("init config");
    });
}

async fn new_storage() -> Arc<dyn Storage> {
    init_config();
    let storage = SeaOrmStorage::connect("sqlite::memory:", 1, 5)
        .await
        .expect("in-memory database");
    Arc::new(storage)
}

async fn seed_user(storage: &Arc<dyn Storage>, email: &str, role: UserRole) -> User {
    storage
        .create_user(CreateUserRequest {
            name: format!("Usuário {email}"),
            email: email.to_string(),
            password: hash_password(PASSWORD).expect("hash"),
            phone: None,
            registration: None,
            role,
        })
        .await
        .expect("seed user")
}

fn bearer(user: &User) -> (String, String) {
    let token = JwtUtils::generate_access_token(user.id, &user.role.to_string()).expect("token");
    ("Authorization".to_string(), format!("Bearer {token}"))
}

/// Agenda que sempre falha, para exercitar a gravação local sem sincronia
struct FailingCalendar;

#[async_trait]
impl CalendarProvider for FailingCalendar {
    fn is_enabled(&self) -> bool {
        true
    }

    async fn insert_event(&self, _event: &GoogleEvent) -> Result<GoogleEvent> {
        Err(NpjError::google_calendar("indisponível"))
    }

    async fn update_event(&self, _event_id: &str, _event: &GoogleEvent) -> Result<GoogleEvent> {
        Err(NpjError::google_calendar("indisponível"))
    }

    async fn get_event(&self, _event_id: &str) -> Result<Option<GoogleEvent>> {
        Err(NpjError::google_calendar("indisponível"))
    }

    async fn delete_event(&self, _event_id: &str) -> Result<()> {
        Err(NpjError::google_calendar("indisponível"))
    }

    async fn list_events(
        &self,
        _time_min: DateTime<Utc>,
        _time_max: DateTime<Utc>,
    ) -> Result<Vec<GoogleEvent>> {
        Err(NpjError::google_calendar("indisponível"))
    }
}

/// Agenda em memória: guarda o que recebe e deixa o teste mexer nos eventos
#[derive(Default)]
struct ScriptedCalendar {
    events: Mutex<HashMap<String, GoogleEvent>>,
    next_id: AtomicUsize,
}

impl ScriptedCalendar {
    fn event(&self, event_id: &str) -> Option<GoogleEvent> {
        self.events.lock().unwrap().get(event_id).cloned()
    }

    /// Alteração feita direto no Google
    fn edit(&self, event_id: &str, change: impl FnOnce(&mut GoogleEvent)) {
        let mut events = self.events.lock().unwrap();
        change(events.get_mut(event_id).expect("event exists"));
    }

    /// Evento apagado direto no Google
    fn forget(&self, event_id: &str) {
        self.events.lock().unwrap().remove(event_id);
    }

    fn put(&self, event: GoogleEvent) {
        let event_id = event.id.clone().expect("event id");
        self.events.lock().unwrap().insert(event_id, event);
    }
}

#[async_trait]
impl CalendarProvider for ScriptedCalendar {
    fn is_enabled(&self) -> bool {
        true
    }

    async fn insert_event(&self, event: &GoogleEvent) -> Result<GoogleEvent> {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let stored = GoogleEvent {
            id: Some(format!("evt-{n}")),
            ..event.clone()
        };
        self.put(stored.clone());
        Ok(stored)
    }

    async fn update_event(&self, event_id: &str, event: &GoogleEvent) -> Result<GoogleEvent> {
        if self.event(event_id).is_none() {
            return Err(NpjError::google_calendar("evento não encontrado"));
        }
        let stored = GoogleEvent {
            id: Some(event_id.to_string()),
            ..event.clone()
        };
        self.put(stored.clone());
        Ok(stored)
    }

    async fn get_event(&self, event_id: &str) -> Result<Option<GoogleEvent>> {
        Ok(self.event(event_id))
    }

    async fn delete_event(&self, event_id: &str) -> Result<()> {
        self.forget(event_id);
        Ok(())
    }

    async fn list_events(
        &self,
        _time_min: DateTime<Utc>,
        _time_max: DateTime<Utc>,
    ) -> Result<Vec<GoogleEvent>> {
        let mut events: Vec<GoogleEvent> = self.events.lock().unwrap().values().cloned().collect();
        events.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(events)
    }
}

macro_rules! init_app {
    ($storage:expr, $calendar:expr) => {{
        let storage: Arc<dyn Storage> = $storage.clone();
        let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::with_settings(1000, 60));
        let calendar: Arc<dyn CalendarProvider> = $calendar;
        let mailer = Arc::new(Mailer::disabled("NPJ"));
        test::init_service(
            App::new()
                .app_data(web::QueryConfig::default().error_handler(query_error_handler))
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .app_data(web::PathConfig::default().error_handler(path_error_handler))
                .app_data(web::Data::new(storage))
                .app_data(web::Data::new(cache))
                .app_data(web::Data::new(calendar))
                .app_data(web::Data::new(mailer))
                .app_data(web::Data::new(AppStartTime {
                    start_datetime: Utc::now(),
                }))
                .configure(routes::configure_system_routes)
                .configure(routes::configure_auth_routes)
                .configure(routes::configure_user_routes)
                .configure(routes::configure_role_routes)
                .configure(routes::configure_process_routes)
                .configure(routes::configure_file_routes)
                .configure(routes::configure_appointment_routes)
                .configure(routes::configure_notification_routes),
        )
        .await
    }};
}

#[actix_web::test]
async fn health_reports_ok() {
    let storage = new_storage().await;
    let app = init_app!(storage, Arc::new(DisabledCalendar));

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["status"], "ok");
}

#[actix_web::test]
async fn login_with_wrong_password_is_unauthorized() {
    let storage = new_storage().await;
    seed_user(&storage, "coordenacao@npj.test", UserRole::Admin).await;
    let app = init_app!(storage, Arc::new(DisabledCalendar));

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .insert_header(("X-Forwarded-For", "10.0.0.11"))
        .set_json(json!({ "email": "coordenacao@npj.test", "password": "Errada@2025" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .insert_header(("X-Forwarded-For", "10.0.0.11"))
        .set_json(json!({ "email": "Coordenacao@npj.test", "password": PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["data"]["access_token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["data"]["user"]["role"], "admin");
}

#[actix_web::test]
async fn register_creates_client_account() {
    let storage = new_storage().await;
    let app = init_app!(storage, Arc::new(DisabledCalendar));

    let payload = json!({
        "name": "Maria Assistida",
        "email": "maria@npj.test",
        "password": PASSWORD,
    });
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .insert_header(("X-Forwarded-For", "10.0.0.21"))
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["user"]["role"], "usuario");

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .insert_header(("X-Forwarded-For", "10.0.0.21"))
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn protected_routes_require_token() {
    let storage = new_storage().await;
    let app = init_app!(storage, Arc::new(DisabledCalendar));

    let req = test::TestRequest::get().uri("/api/v1/processes").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn duplicate_process_number_conflicts() {
    let storage = new_storage().await;
    let professor = seed_user(&storage, "prof@npj.test", UserRole::Professor).await;
    let app = init_app!(storage, Arc::new(DisabledCalendar));

    let create = |number: &str| {
        test::TestRequest::post()
            .uri("/api/v1/processes")
            .insert_header(bearer(&professor))
            .set_json(json!({ "number": number, "subject": "Ação de alimentos" }))
            .to_request()
    };

    let resp = test::call_service(&app, create("0001234-08.2023.8.26.0100")).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let process_id = body["data"]["id"].as_i64().expect("process id");

    // mesmo número sem máscara
    let resp = test::call_service(&app, create("00012340820238260100")).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let resp = test::call_service(&app, create("0001234-09.2023.8.26.0100")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // quem abre o processo passa a orientá-lo
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/processes/{process_id}/professors"))
        .insert_header(bearer(&professor))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["data"].to_string().contains("prof@npj.test"));
}

#[actix_web::test]
async fn students_only_see_their_processes() {
    let storage = new_storage().await;
    let admin = seed_user(&storage, "admin@npj.test", UserRole::Admin).await;
    let student = seed_user(&storage, "aluno@npj.test", UserRole::Aluno).await;
    let app = init_app!(storage, Arc::new(DisabledCalendar));

    let req = test::TestRequest::post()
        .uri("/api/v1/processes")
        .insert_header(bearer(&admin))
        .set_json(json!({ "number": "0001234-08.2023.8.26.0100", "subject": "Usucapião" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let process_id = body["data"]["id"].as_i64().expect("process id");

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/processes/{process_id}"))
        .insert_header(bearer(&student))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/processes/{process_id}/students"))
        .insert_header(bearer(&admin))
        .set_json(json!({ "user_id": student.id }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/processes/{process_id}"))
        .insert_header(bearer(&student))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn appointment_with_inverted_range_is_rejected() {
    let storage = new_storage().await;
    let admin = seed_user(&storage, "admin@npj.test", UserRole::Admin).await;
    let app = init_app!(storage, Arc::new(DisabledCalendar));

    let starts_at = Utc::now() + Duration::days(2);
    let req = test::TestRequest::post()
        .uri("/api/v1/appointments")
        .insert_header(bearer(&admin))
        .set_json(json!({
            "title": "Audiência de conciliação",
            "starts_at": starts_at,
            "ends_at": starts_at - Duration::hours(1),
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn appointment_is_saved_with_calendar_disabled() {
    let storage = new_storage().await;
    let admin = seed_user(&storage, "admin@npj.test", UserRole::Admin).await;
    let app = init_app!(storage, Arc::new(DisabledCalendar));

    let starts_at = Utc::now() + Duration::days(2);
    let req = test::TestRequest::post()
        .uri("/api/v1/appointments")
        .insert_header(bearer(&admin))
        .set_json(json!({
            "title": "Atendimento inicial",
            "kind": "meeting",
            "starts_at": starts_at,
            "ends_at": starts_at + Duration::hours(1),
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["appointment"]["sync_status"], "disabled");
    assert!(body["data"]["sync_warning"].is_null());
    let id = body["data"]["appointment"]["id"].as_i64().expect("appointment id");

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/appointments/{id}/sync"))
        .insert_header(bearer(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn calendar_failure_keeps_local_appointment() {
    let storage = new_storage().await;
    let admin = seed_user(&storage, "admin@npj.test", UserRole::Admin).await;
    let app = init_app!(storage, Arc::new(FailingCalendar));

    let starts_at = Utc::now() + Duration::days(3);
    let req = test::TestRequest::post()
        .uri("/api/v1/appointments")
        .insert_header(bearer(&admin))
        .set_json(json!({
            "title": "Audiência de instrução",
            "kind": "hearing",
            "starts_at": starts_at,
            "ends_at": starts_at + Duration::hours(2),
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["appointment"]["sync_status"], "failed");
    assert!(body["data"]["sync_warning"].as_str().is_some());
    let id = body["data"]["appointment"]["id"].as_i64().expect("appointment id");

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/appointments/{id}"))
        .insert_header(bearer(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["title"], "Audiência de instrução");
}

fn appointment_payload(title: &str, process_id: Option<i64>) -> Value {
    let starts_at = Utc::now() + Duration::days(4);
    json!({
        "title": title,
        "kind": "hearing",
        "process_id": process_id,
        "starts_at": starts_at,
        "ends_at": starts_at + Duration::hours(1),
    })
}

#[actix_web::test]
async fn pull_applies_remote_edits_and_deletions() {
    let storage = new_storage().await;
    let admin = seed_user(&storage, "admin@npj.test", UserRole::Admin).await;
    let calendar = Arc::new(ScriptedCalendar::default());
    let app = init_app!(storage, calendar.clone());

    let req = test::TestRequest::post()
        .uri("/api/v1/appointments")
        .insert_header(bearer(&admin))
        .set_json(appointment_payload("Audiência de conciliação", None))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["appointment"]["sync_status"], "synced");
    assert_eq!(body["data"]["appointment"]["google_event_id"], "evt-1");
    let id = body["data"]["appointment"]["id"].as_i64().expect("appointment id");
    assert_eq!(calendar.event("evt-1").and_then(|e| e.appointment_id()), Some(id));

    calendar.edit("evt-1", |event| event.summary = "Audiência remarcada".to_string());
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/appointments/{id}/sync"))
        .insert_header(bearer(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["appointment"]["title"], "Audiência remarcada");
    assert_eq!(body["data"]["appointment"]["status"], "scheduled");

    // apagado no Google: vira cancelamento, não erro
    calendar.forget("evt-1");
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/appointments/{id}/sync"))
        .insert_header(bearer(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["appointment"]["status"], "cancelled");
    assert!(body["data"]["appointment"]["google_event_id"].is_null());
}

#[actix_web::test]
async fn range_sync_matches_tombstones_by_event_id() {
    let storage = new_storage().await;
    let admin = seed_user(&storage, "admin@npj.test", UserRole::Admin).await;
    let calendar = Arc::new(ScriptedCalendar::default());
    let app = init_app!(storage, calendar.clone());

    let mut ids = Vec::new();
    for title in ["Reunião com assistido", "Audiência de instrução"] {
        let req = test::TestRequest::post()
            .uri("/api/v1/appointments")
            .insert_header(bearer(&admin))
            .set_json(appointment_payload(title, None))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        ids.push(body["data"]["appointment"]["id"].as_i64().expect("appointment id"));
    }

    calendar.edit("evt-1", |event| event.location = Some("Sala 2".to_string()));
    // evento apagado chega só com id e status
    calendar.put(GoogleEvent {
        id: Some("evt-2".to_string()),
        status: Some("cancelled".to_string()),
        ..Default::default()
    });
    let starts_at = Utc::now() + Duration::days(5);
    calendar.put(GoogleEvent {
        id: Some("externo".to_string()),
        summary: "Compromisso pessoal".to_string(),
        start: EventDateTime {
            date_time: Some(starts_at.to_rfc3339()),
            ..Default::default()
        },
        end: EventDateTime {
            date_time: Some((starts_at + Duration::hours(1)).to_rfc3339()),
            ..Default::default()
        },
        ..Default::default()
    });

    let from = Utc::now();
    let req = test::TestRequest::post()
        .uri("/api/v1/appointments/sync")
        .insert_header(bearer(&admin))
        .set_json(json!({ "from": from, "to": from + Duration::days(10) }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["checked"], 3);
    assert_eq!(body["data"]["updated"], 2);
    assert_eq!(body["data"]["skipped"], 1);
    assert_eq!(body["data"]["failed"], 0);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/appointments/{}", ids[0]))
        .insert_header(bearer(&admin))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["location"], "Sala 2");
    assert_eq!(body["data"]["status"], "scheduled");

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/appointments/{}", ids[1]))
        .insert_header(bearer(&admin))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["status"], "cancelled");

    let req = test::TestRequest::post()
        .uri("/api/v1/appointments/sync")
        .insert_header(bearer(&admin))
        .set_json(json!({ "from": from, "to": from }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn cancel_removes_remote_event_and_refreshes_list() {
    let storage = new_storage().await;
    let admin = seed_user(&storage, "admin@npj.test", UserRole::Admin).await;
    let calendar = Arc::new(ScriptedCalendar::default());
    let app = init_app!(storage, calendar.clone());

    let req = test::TestRequest::post()
        .uri("/api/v1/appointments")
        .insert_header(bearer(&admin))
        .set_json(appointment_payload("Prazo de contestação", None))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let id = body["data"]["appointment"]["id"].as_i64().expect("appointment id");

    let list = || {
        test::TestRequest::get()
            .uri("/api/v1/appointments")
            .insert_header(bearer(&admin))
            .to_request()
    };
    let body: Value = test::call_and_read_body_json(&app, list()).await;
    assert_eq!(body["data"]["items"][0]["status"], "scheduled");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/appointments/{id}"))
        .insert_header(bearer(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["data"]["sync_warning"].is_null());
    assert!(calendar.event("evt-1").is_none());

    let body: Value = test::call_and_read_body_json(&app, list()).await;
    assert_eq!(body["data"]["items"][0]["status"], "cancelled");
}

#[actix_web::test]
async fn unassigned_student_stops_seeing_appointments() {
    let storage = new_storage().await;
    let admin = seed_user(&storage, "admin@npj.test", UserRole::Admin).await;
    let student = seed_user(&storage, "aluno@npj.test", UserRole::Aluno).await;
    let app = init_app!(storage, Arc::new(DisabledCalendar));

    let req = test::TestRequest::post()
        .uri("/api/v1/processes")
        .insert_header(bearer(&admin))
        .set_json(json!({ "number": "0001234-08.2023.8.26.0100", "subject": "Inventário" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let process_id = body["data"]["id"].as_i64().expect("process id");

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/processes/{process_id}/students"))
        .insert_header(bearer(&admin))
        .set_json(json!({ "user_id": student.id }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/api/v1/appointments")
        .insert_header(bearer(&admin))
        .set_json(appointment_payload("Audiência de partilha", Some(process_id)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let list = || {
        test::TestRequest::get()
            .uri("/api/v1/appointments")
            .insert_header(bearer(&student))
            .to_request()
    };
    let body: Value = test::call_and_read_body_json(&app, list()).await;
    assert_eq!(body["data"]["items"].as_array().map(Vec::len), Some(1));

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/processes/{process_id}/students/{}", student.id))
        .insert_header(bearer(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // a lista em cache não pode sobreviver à perda do vínculo
    let body: Value = test::call_and_read_body_json(&app, list()).await;
    assert_eq!(body["data"]["items"].as_array().map(Vec::len), Some(0));
}

#[actix_web::test]
async fn empty_upload_is_rejected() {
    let storage = new_storage().await;
    let student = seed_user(&storage, "aluno@npj.test", UserRole::Aluno).await;
    let app = init_app!(storage, Arc::new(DisabledCalendar));

    let boundary = "npj-boundary";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"vazio.pdf\"\r\n\
         Content-Type: application/pdf\r\n\r\n\
         \r\n\
         --{boundary}--\r\n"
    );
    let req = test::TestRequest::post()
        .uri("/api/v1/files/upload")
        .insert_header(bearer(&student))
        .insert_header((
            "Content-Type",
            format!("multipart/form-data; boundary={boundary}"),
        ))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "O arquivo enviado está vazio");
}
