use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::users::entities::UserRole;

/// Tipo de vínculo com o processo; cada um tem sua tabela
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipantKind {
    Student,
    Professor,
}

impl ParticipantKind {
    /// Perfil exigido do usuário vinculado
    pub fn required_role(&self) -> UserRole {
        match self {
            ParticipantKind::Student => UserRole::Aluno,
            ParticipantKind::Professor => UserRole::Professor,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ParticipantKind::Student => "aluno",
            ParticipantKind::Professor => "professor",
        }
    }
}

/// Membro da equipe de um processo
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/participant.ts")]
pub struct Participant {
    pub id: i64,
    pub process_id: i64,
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub registration: Option<String>,
    pub assigned_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_roles() {
        assert_eq!(ParticipantKind::Student.required_role(), UserRole::Aluno);
        assert_eq!(ParticipantKind::Professor.required_role(), UserRole::Professor);
    }
}
