pub mod appointments;
pub mod auth;
pub mod common;
pub mod files;
pub mod notifications;
pub mod participants;
pub mod process_updates;
pub mod processes;
pub mod roles;
pub mod system;
pub mod users;

pub use common::{ApiResponse, PaginatedResponse, PaginationInfo, PaginationQuery};

use serde::Serialize;
use ts_rs::TS;

/// Momento em que o processo subiu (usado pelo /health)
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// Códigos de negócio devolvidos no campo `code` do envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/error_code.ts")]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // Genéricos
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,
    ExternalServiceError = 1502,

    // Autenticação
    AuthFailed = 2001,
    UserInactive = 2002,
    RefreshTokenInvalid = 2003,

    // Usuários
    UserNotFound = 3001,
    UserEmailAlreadyExists = 3002,
    UserPasswordInvalid = 3003,
    UserInvalidData = 3004,
    CannotDeleteSelf = 3005,

    // Processos
    ProcessNotFound = 4001,
    ProcessNumberAlreadyExists = 4002,
    ProcessNumberInvalid = 4003,
    ProcessAccessDenied = 4004,
    ParticipantAlreadyAssigned = 4010,
    ParticipantNotFound = 4011,
    ParticipantRoleMismatch = 4012,
    ProcessUpdateNotFound = 4020,

    // Arquivos
    FileNotFound = 5001,
    FileTypeNotAllowed = 5002,
    FileSizeExceeded = 5003,
    FileUploadFailed = 5004,

    // Agendamentos
    AppointmentNotFound = 6001,
    AppointmentInvalidRange = 6002,
    CalendarSyncFailed = 6003,
    CalendarDisabled = 6004,

    // Notificações
    NotificationNotFound = 7001,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success as i32, 0);
        assert_eq!(ErrorCode::BadRequest as i32, 1000);
        assert_eq!(ErrorCode::Conflict as i32, 1009);
        assert_eq!(ErrorCode::ProcessNumberAlreadyExists as i32, 4002);
        assert_eq!(ErrorCode::CalendarSyncFailed as i32, 6003);
    }

    #[test]
    fn test_envelope_omits_empty_data() {
        let body = serde_json::to_value(ApiResponse::error_empty(
            ErrorCode::AuthFailed,
            "Credenciais inválidas",
        ))
        .unwrap();
        assert_eq!(body["code"], 2001);
        assert_eq!(body["message"], "Credenciais inválidas");
        assert!(body.get("data").is_none());
        assert!(body["timestamp"].is_string());
    }
}
