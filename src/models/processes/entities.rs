use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::define_string_enum;

define_string_enum! {
    /// Andamento do processo no núcleo
    ProcessStatus, "../frontend/src/types/generated/process.ts" {
        Waiting => "waiting",
        InProgress => "in_progress",
        Suspended => "suspended",
        Finished => "finished",
        Archived => "archived",
    }
}

impl ProcessStatus {
    /// Situações que encerram o processo (preenchem `closed_at`)
    pub fn is_closed(&self) -> bool {
        matches!(self, ProcessStatus::Finished | ProcessStatus::Archived)
    }
}

/// Processo jurídico acompanhado pelo núcleo
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/process.ts")]
pub struct Process {
    pub id: i64,
    /// Número CNJ mascarado ou número livre
    pub number: String,
    pub subject: String,
    pub description: Option<String>,
    pub status: ProcessStatus,
    /// Vara / local de tramitação
    pub court: Option<String>,
    /// Sistema eletrônico (PJe, eproc, ...)
    pub court_system: Option<String>,
    pub phase: Option<String>,
    pub client_id: Option<i64>,
    pub created_by: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub closed_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Vínculos de um usuário com um processo
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessMembership {
    pub is_student: bool,
    pub is_professor: bool,
    pub is_client: bool,
}

impl ProcessMembership {
    pub fn any(&self) -> bool {
        self.is_student || self.is_professor || self.is_client
    }
}

/// Quais processos uma listagem enxerga
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessScope {
    All,
    /// Processos em que o usuário é aluno ou professor
    Participant(i64),
    /// Processos em que o usuário é o assistido
    Client(i64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text() {
        assert_eq!(ProcessStatus::InProgress.to_string(), "in_progress");
        assert_eq!("archived".parse::<ProcessStatus>().unwrap(), ProcessStatus::Archived);
        assert!("closed".parse::<ProcessStatus>().is_err());
        let json = serde_json::to_string(&ProcessStatus::Waiting).unwrap();
        assert_eq!(json, "\"waiting\"");
    }

    #[test]
    fn test_closed_statuses() {
        assert!(ProcessStatus::Finished.is_closed());
        assert!(ProcessStatus::Archived.is_closed());
        assert!(!ProcessStatus::Suspended.is_closed());
    }

    #[test]
    fn test_membership() {
        assert!(!ProcessMembership::default().any());
        let m = ProcessMembership {
            is_client: true,
            ..Default::default()
        };
        assert!(m.any());
    }
}
