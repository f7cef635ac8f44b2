use std::sync::Arc;

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

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// Usuários
    // `password` já chega como hash
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // `password`, se presente, já chega como hash
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // Exclusão lógica (status = inactive)
    async fn deactivate_user(&self, id: i64) -> Result<bool>;
    async fn count_users(&self) -> Result<u64>;

    /// Perfis
    async fn list_roles(&self) -> Result<Vec<Role>>;

    /// Processos (os excluídos logicamente nunca aparecem)
    // `number` já chega normalizado
    async fn create_process(&self, process: CreateProcessRequest, created_by: i64)
    -> Result<Process>;
    async fn get_process_by_id(&self, id: i64) -> Result<Option<Process>>;
    async fn list_processes_with_pagination(
        &self,
        query: ProcessListQuery,
    ) -> Result<ProcessListResponse>;
    async fn update_process(
        &self,
        id: i64,
        update: UpdateProcessRequest,
    ) -> Result<Option<Process>>;
    async fn soft_delete_process(&self, id: i64) -> Result<bool>;
    async fn get_process_membership(
        &self,
        process_id: i64,
        user_id: i64,
    ) -> Result<Option<ProcessMembership>>;
    // Processos em que o usuário é aluno, professor ou assistido
    async fn list_accessible_process_ids(&self, user_id: i64) -> Result<Vec<i64>>;

    /// Equipe dos processos
    async fn assign_participant(
        &self,
        process_id: i64,
        user_id: i64,
        kind: ParticipantKind,
    ) -> Result<Participant>;
    async fn list_participants(
        &self,
        process_id: i64,
        kind: ParticipantKind,
    ) -> Result<Vec<Participant>>;
    async fn remove_participant(
        &self,
        process_id: i64,
        user_id: i64,
        kind: ParticipantKind,
    ) -> Result<bool>;
    // Alunos, professores e assistido, sem repetição
    async fn list_process_member_ids(&self, process_id: i64) -> Result<Vec<i64>>;

    /// Linha do tempo
    async fn create_process_update(
        &self,
        process_id: i64,
        author_id: i64,
        update: CreateProcessUpdateRequest,
    ) -> Result<ProcessUpdate>;
    async fn get_process_update(&self, id: i64) -> Result<Option<ProcessUpdate>>;
    async fn list_process_updates(&self, process_id: i64) -> Result<Vec<ProcessUpdate>>;
    async fn delete_process_update(&self, id: i64) -> Result<bool>;

    /// Arquivos
    async fn create_file(&self, file: NewFile) -> Result<FileAttachment>;
    async fn get_file_by_token(&self, token: &str) -> Result<Option<FileAttachment>>;
    async fn list_process_files(&self, process_id: i64) -> Result<Vec<FileAttachment>>;
    async fn delete_file(&self, token: &str) -> Result<bool>;

    /// Agendamentos
    async fn create_appointment(&self, appointment: NewAppointment) -> Result<Appointment>;
    async fn get_appointment_by_id(&self, id: i64) -> Result<Option<Appointment>>;
    async fn get_appointment_by_google_event_id(
        &self,
        event_id: &str,
    ) -> Result<Option<Appointment>>;
    async fn list_appointments_with_pagination(
        &self,
        query: AppointmentListQuery,
    ) -> Result<AppointmentListResponse>;
    async fn update_appointment(
        &self,
        id: i64,
        update: UpdateAppointmentRequest,
    ) -> Result<Option<Appointment>>;
    async fn set_appointment_sync(
        &self,
        id: i64,
        google_event_id: Option<String>,
        sync_status: SyncStatus,
    ) -> Result<Option<Appointment>>;

    /// Notificações
    async fn create_notifications(&self, notifications: Vec<NewNotification>)
    -> Result<Vec<Notification>>;
    async fn list_user_notifications_with_pagination(
        &self,
        user_id: i64,
        query: NotificationListQuery,
    ) -> Result<NotificationListResponse>;
    async fn get_unread_notification_count(&self, user_id: i64) -> Result<i64>;
    async fn mark_notification_as_read(&self, id: i64, user_id: i64) -> Result<bool>;
    async fn mark_all_notifications_as_read(&self, user_id: i64) -> Result<u64>;
    async fn delete_notification(&self, id: i64, user_id: i64) -> Result<bool>;
}

/// Cria o storage a partir da configuração e aplica as migrações
pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
