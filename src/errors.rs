//! Tratamento unificado de erros
//!
//! Os tipos de erro são gerados por macro, com código e nome de tipo.

use std::fmt;

/// Macro que define o enum de erros
///
/// Gera automaticamente:
/// - a definição do enum
/// - code(): código do erro
/// - error_type(): nome do tipo
/// - message(): detalhe do erro
/// - construtores em snake_case
macro_rules! define_npj_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum NpjError {
            $($variant(String),)*
        }

        impl NpjError {
            /// Código do erro
            pub fn code(&self) -> &'static str {
                match self {
                    $(NpjError::$variant(_) => $code,)*
                }
            }

            /// Nome do tipo de erro
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(NpjError::$variant(_) => $type_name,)*
                }
            }

            /// Detalhe do erro
            pub fn message(&self) -> &str {
                match self {
                    $(NpjError::$variant(msg) => msg,)*
                }
            }
        }

        paste::paste! {
            impl NpjError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        NpjError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_npj_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    FileOperation("E006", "File Operation Error"),
    Validation("E007", "Validation Error"),
    NotFound("E008", "Resource Not Found"),
    Serialization("E009", "Serialization Error"),
    Conflict("E010", "Conflict"),
    DateParse("E011", "Date Parse Error"),
    Authentication("E012", "Authentication Error"),
    Authorization("E013", "Authorization Error"),
    GoogleCalendar("E014", "Google Calendar Error"),
    Email("E015", "Email Delivery Error"),
}

impl NpjError {
    /// Saída simples
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, NpjError::Conflict(_))
    }

}

impl fmt::Display for NpjError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for NpjError {}

impl From<sea_orm::DbErr> for NpjError {
    fn from(err: sea_orm::DbErr) -> Self {
        // Violação de UNIQUE vira conflito, independente do banco
        if let Some(sea_orm::SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
            return NpjError::Conflict(detail);
        }
        NpjError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for NpjError {
    fn from(err: std::io::Error) -> Self {
        NpjError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for NpjError {
    fn from(err: serde_json::Error) -> Self {
        NpjError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for NpjError {
    fn from(err: chrono::ParseError) -> Self {
        NpjError::DateParse(err.to_string())
    }
}

impl From<reqwest::Error> for NpjError {
    fn from(err: reqwest::Error) -> Self {
        NpjError::GoogleCalendar(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, NpjError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(NpjError::cache_connection("test").code(), "E001");
        assert_eq!(NpjError::database_config("test").code(), "E003");
        assert_eq!(NpjError::validation("test").code(), "E007");
        assert_eq!(NpjError::conflict("test").code(), "E010");
        assert_eq!(NpjError::google_calendar("test").code(), "E014");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            NpjError::cache_connection("test").error_type(),
            "Cache Connection Error"
        );
        assert_eq!(NpjError::email("smtp").error_type(), "Email Delivery Error");
    }

    #[test]
    fn test_error_message() {
        let err = NpjError::validation("Entrada inválida");
        assert_eq!(err.message(), "Entrada inválida");
    }

    #[test]
    fn test_format_simple() {
        let err = NpjError::not_found("Processo 7");
        let formatted = err.format_simple();
        assert!(formatted.contains("Resource Not Found"));
        assert!(formatted.contains("Processo 7"));
        assert!(!err.is_conflict());
    }

    #[test]
    fn test_generic_db_error_is_database_operation() {
        let err: NpjError = sea_orm::DbErr::Custom("falhou".to_string()).into();
        assert_eq!(err.code(), "E005");
    }
}
