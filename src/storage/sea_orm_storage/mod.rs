//! Storage sobre SeaORM
//!
//! MySQL em produção; SQLite e PostgreSQL também são aceitos.

mod appointments;
mod files;
mod notifications;
mod participants;
mod process_updates;
mod processes;
mod roles;
mod users;

use crate::config::AppConfig;
use crate::errors::{NpjError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, SqlErr};
use std::time::Duration;
use tracing::info;

#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

/// Converte erros do banco mantendo violações de UNIQUE como conflito
pub(crate) fn db_error(context: &'static str) -> impl Fn(DbErr) -> NpjError {
    move |e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            NpjError::conflict(format!("{context}: {detail}"))
        }
        _ => NpjError::database_operation(format!("{context}: {e}")),
    }
}

impl SeaOrmStorage {
    /// Conecta com a configuração global e aplica as migrações
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::connect(
            &config.database.url,
            config.database.pool_size,
            config.database.timeout,
        )
        .await
    }

    /// Conecta numa URL qualquer (ex.: `sqlite::memory:` nos testes)
    pub async fn connect(url: &str, pool_size: u32, timeout_secs: u64) -> Result<Self> {
        let db_url = Self::build_database_url(url)?;

        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, pool_size, timeout_secs).await?
        } else {
            Self::connect_generic(&db_url, pool_size, timeout_secs).await?
        };

        Migrator::up(&db, None)
            .await
            .map_err(|e| NpjError::database_operation(format!("Falha nas migrações: {e}")))?;

        info!("SeaORM storage ready, database: {}", Self::redact_url(&db_url));

        Ok(Self { db })
    }

    /// SQLite com WAL e pragmas de desempenho
    async fn connect_sqlite(
        url: &str,
        pool_size: u32,
        timeout_secs: u64,
    ) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| NpjError::database_config(format!("URL SQLite inválida: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size.max(1))
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(timeout_secs))
            .idle_timeout(None)
            .connect_with(opt)
            .await
            .map_err(|e| NpjError::database_connection(format!("Falha ao conectar no SQLite: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// MySQL / PostgreSQL
    async fn connect_generic(
        url: &str,
        pool_size: u32,
        timeout_secs: u64,
    ) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(pool_size)
            .min_connections(pool_size.min(5))
            .connect_timeout(Duration::from_secs(timeout_secs))
            .acquire_timeout(Duration::from_secs(timeout_secs))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| NpjError::database_connection(format!("Não foi possível conectar ao banco: {e}")))
    }

    /// Infere o banco pela URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("mysql://")
            || url.starts_with("mariadb://")
            || url.starts_with("postgres://")
            || url.starts_with("postgresql://")
        {
            Ok(url.to_string())
        } else {
            Err(NpjError::database_config(format!(
                "Tipo de banco não reconhecido na URL: {url}. Aceitos: mysql://, postgres://, sqlite: ou arquivo .db/.sqlite"
            )))
        }
    }

    /// Esconde a senha da URL nos logs
    fn redact_url(url: &str) -> String {
        match (url.find("://"), url.rfind('@')) {
            (Some(scheme_end), Some(at)) if at > scheme_end => {
                let credentials = &url[scheme_end + 3..at];
                let user = credentials.split(':').next().unwrap_or_default();
                format!("{}{}:***{}", &url[..scheme_end + 3], user, &url[at..])
            }
            _ => url.to_string(),
        }
    }
}

// Implementação do trait Storage
use crate::models::{
    appointments::{
        entities::{Appointment, NewAppointment, SyncStatus},
        requests::{AppointmentListQuery, UpdateAppointmentRequest},
        responses::AppointmentListResponse,
    },
    files::entities::{FileAttachment, NewFile},
    notifications::{
        entities::{NewNotification, Notification},
        requests::NotificationListQuery,
        responses::NotificationListResponse,
    },
    participants::entities::{Participant, ParticipantKind},
    process_updates::{entities::ProcessUpdate, requests::CreateProcessUpdateRequest},
    processes::{
        entities::{Process, ProcessMembership},
        requests::{CreateProcessRequest, ProcessListQuery, UpdateProcessRequest},
        responses::ProcessListResponse,
    },
    roles::Role,
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // Usuários
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn deactivate_user(&self, id: i64) -> Result<bool> {
        self.deactivate_user_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // Perfis
    async fn list_roles(&self) -> Result<Vec<Role>> {
        self.list_roles_impl().await
    }

    // Processos
    async fn create_process(
        &self,
        process: CreateProcessRequest,
        created_by: i64,
    ) -> Result<Process> {
        self.create_process_impl(process, created_by).await
    }

    async fn get_process_by_id(&self, id: i64) -> Result<Option<Process>> {
        self.get_process_by_id_impl(id).await
    }

    async fn list_processes_with_pagination(
        &self,
        query: ProcessListQuery,
    ) -> Result<ProcessListResponse> {
        self.list_processes_with_pagination_impl(query).await
    }

    async fn update_process(
        &self,
        id: i64,
        update: UpdateProcessRequest,
    ) -> Result<Option<Process>> {
        self.update_process_impl(id, update).await
    }

    async fn soft_delete_process(&self, id: i64) -> Result<bool> {
        self.soft_delete_process_impl(id).await
    }

    async fn get_process_membership(
        &self,
        process_id: i64,
        user_id: i64,
    ) -> Result<Option<ProcessMembership>> {
        self.get_process_membership_impl(process_id, user_id).await
    }

    async fn list_accessible_process_ids(&self, user_id: i64) -> Result<Vec<i64>> {
        self.list_accessible_process_ids_impl(user_id).await
    }

    // Equipe
    async fn assign_participant(
        &self,
        process_id: i64,
        user_id: i64,
        kind: ParticipantKind,
    ) -> Result<Participant> {
        self.assign_participant_impl(process_id, user_id, kind).await
    }

    async fn list_participants(
        &self,
        process_id: i64,
        kind: ParticipantKind,
    ) -> Result<Vec<Participant>> {
        self.list_participants_impl(process_id, kind).await
    }

    async fn remove_participant(
        &self,
        process_id: i64,
        user_id: i64,
        kind: ParticipantKind,
    ) -> Result<bool> {
        self.remove_participant_impl(process_id, user_id, kind).await
    }

    async fn list_process_member_ids(&self, process_id: i64) -> Result<Vec<i64>> {
        self.list_process_member_ids_impl(process_id).await
    }

    // Linha do tempo
    async fn create_process_update(
        &self,
        process_id: i64,
        author_id: i64,
        update: CreateProcessUpdateRequest,
    ) -> Result<ProcessUpdate> {
        self.create_process_update_impl(process_id, author_id, update)
            .await
    }

    async fn get_process_update(&self, id: i64) -> Result<Option<ProcessUpdate>> {
        self.get_process_update_impl(id).await
    }

    async fn list_process_updates(&self, process_id: i64) -> Result<Vec<ProcessUpdate>> {
        self.list_process_updates_impl(process_id).await
    }

    async fn delete_process_update(&self, id: i64) -> Result<bool> {
        self.delete_process_update_impl(id).await
    }

    // Arquivos
    async fn create_file(&self, file: NewFile) -> Result<FileAttachment> {
        self.create_file_impl(file).await
    }

    async fn get_file_by_token(&self, token: &str) -> Result<Option<FileAttachment>> {
        self.get_file_by_token_impl(token).await
    }

    async fn list_process_files(&self, process_id: i64) -> Result<Vec<FileAttachment>> {
        self.list_process_files_impl(process_id).await
    }

    async fn delete_file(&self, token: &str) -> Result<bool> {
        self.delete_file_impl(token).await
    }

    // Agendamentos
    async fn create_appointment(&self, appointment: NewAppointment) -> Result<Appointment> {
        self.create_appointment_impl(appointment).await
    }

    async fn get_appointment_by_id(&self, id: i64) -> Result<Option<Appointment>> {
        self.get_appointment_by_id_impl(id).await
    }

    async fn get_appointment_by_google_event_id(
        &self,
        event_id: &str,
    ) -> Result<Option<Appointment>> {
        self.get_appointment_by_google_event_id_impl(event_id).await
    }

    async fn list_appointments_with_pagination(
        &self,
        query: AppointmentListQuery,
    ) -> Result<AppointmentListResponse> {
        self.list_appointments_with_pagination_impl(query).await
    }

    async fn update_appointment(
        &self,
        id: i64,
        update: UpdateAppointmentRequest,
    ) -> Result<Option<Appointment>> {
        self.update_appointment_impl(id, update).await
    }

    async fn set_appointment_sync(
        &self,
        id: i64,
        google_event_id: Option<String>,
        sync_status: SyncStatus,
    ) -> Result<Option<Appointment>> {
        self.set_appointment_sync_impl(id, google_event_id, sync_status)
            .await
    }

    // Notificações
    async fn create_notifications(
        &self,
        notifications: Vec<NewNotification>,
    ) -> Result<Vec<Notification>> {
        self.create_notifications_impl(notifications).await
    }

    async fn list_user_notifications_with_pagination(
        &self,
        user_id: i64,
        query: NotificationListQuery,
    ) -> Result<NotificationListResponse> {
        self.list_user_notifications_with_pagination_impl(user_id, query)
            .await
    }

    async fn get_unread_notification_count(&self, user_id: i64) -> Result<i64> {
        self.get_unread_notification_count_impl(user_id).await
    }

    async fn mark_notification_as_read(&self, id: i64, user_id: i64) -> Result<bool> {
        self.mark_notification_as_read_impl(id, user_id).await
    }

    async fn mark_all_notifications_as_read(&self, user_id: i64) -> Result<u64> {
        self.mark_all_notifications_as_read_impl(user_id).await
    }

    async fn delete_notification(&self, id: i64, user_id: i64) -> Result<bool> {
        self.delete_notification_impl(id, user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("sqlite::memory:").unwrap(),
            "sqlite::memory:"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("npj.db").unwrap(),
            "sqlite://npj.db?mode=rwc"
        );
        assert!(SeaOrmStorage::build_database_url("mysql://u:p@localhost/npj").is_ok());
        assert!(SeaOrmStorage::build_database_url("oracle://x").is_err());
    }

    #[test]
    fn test_redact_url() {
        assert_eq!(
            SeaOrmStorage::redact_url("mysql://npj:segredo@db:3306/npj"),
            "mysql://npj:***@db:3306/npj"
        );
        assert_eq!(SeaOrmStorage::redact_url("sqlite::memory:"), "sqlite::memory:");
    }
}
