use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Perfil de acesso
///
/// Os ids são fixos e semeados pela migração da tabela `roles`.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub enum UserRole {
    Admin,     // coordenação do núcleo
    Professor, // professor orientador
    Aluno,     // estagiário
    Usuario,   // assistido / cliente
}

impl UserRole {
    pub const ADMIN: &'static str = "admin";
    pub const PROFESSOR: &'static str = "professor";
    pub const ALUNO: &'static str = "aluno";
    pub const USUARIO: &'static str = "usuario";

    pub fn id(&self) -> i64 {
        match self {
            UserRole::Admin => 1,
            UserRole::Professor => 2,
            UserRole::Aluno => 3,
            UserRole::Usuario => 4,
        }
    }

    pub fn from_id(id: i64) -> Option<Self> {
        match id {
            1 => Some(UserRole::Admin),
            2 => Some(UserRole::Professor),
            3 => Some(UserRole::Aluno),
            4 => Some(UserRole::Usuario),
            _ => None,
        }
    }

    pub fn admin_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin]
    }
    /// Quem pode abrir processos e gerenciar agendamentos
    pub fn staff_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin, &Self::Professor]
    }
    /// Membros internos do núcleo
    pub fn member_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin, &Self::Professor, &Self::Aluno]
    }
    pub fn all_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin, &Self::Professor, &Self::Aluno, &Self::Usuario]
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "Perfil inválido: '{s}'. Perfis aceitos: admin, professor, aluno, usuario"
            ))
        })
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Admin => write!(f, "{}", UserRole::ADMIN),
            UserRole::Professor => write!(f, "{}", UserRole::PROFESSOR),
            UserRole::Aluno => write!(f, "{}", UserRole::ALUNO),
            UserRole::Usuario => write!(f, "{}", UserRole::USUARIO),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            UserRole::ADMIN => Ok(UserRole::Admin),
            UserRole::PROFESSOR => Ok(UserRole::Professor),
            UserRole::ALUNO => Ok(UserRole::Aluno),
            UserRole::USUARIO => Ok(UserRole::Usuario),
            _ => Err(format!("Invalid user role: {s}")),
        }
    }
}

/// Situação da conta
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub enum UserStatus {
    Active,
    Inactive, // excluído logicamente
    Suspended,
}

impl<'de> Deserialize<'de> for UserStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "Situação inválida: '{s}'. Aceitas: active, inactive, suspended"
            ))
        })
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserStatus::Active => write!(f, "active"),
            UserStatus::Inactive => write!(f, "inactive"),
            UserStatus::Suspended => write!(f, "suspended"),
        }
    }
}

impl std::str::FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(UserStatus::Active),
            "inactive" => Ok(UserStatus::Inactive),
            "suspended" => Ok(UserStatus::Suspended),
            _ => Err(format!("Invalid user status: {s}")),
        }
    }
}

/// Usuário
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing, default)] // nunca vai para o JSON
    #[ts(skip)]
    pub password_hash: String,
    pub phone: Option<String>,
    /// Matrícula (alunos) ou OAB (professores)
    pub registration: Option<String>,
    pub role: UserRole,
    pub status: UserStatus,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    /// Gera o par access + refresh token do usuário
    pub fn generate_token_pair(
        &self,
    ) -> Result<crate::utils::jwt::TokenPair, jsonwebtoken::errors::Error> {
        crate::utils::jwt::JwtUtils::generate_token_pair(self.id, &self.role.to_string())
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_ids_round_trip() {
        for role in UserRole::all_roles() {
            assert_eq!(UserRole::from_id(role.id()), Some(**role));
        }
        assert_eq!(UserRole::from_id(99), None);
    }

    #[test]
    fn test_role_deserialize() {
        let role: UserRole = serde_json::from_str("\"professor\"").unwrap();
        assert_eq!(role, UserRole::Professor);
        assert!(serde_json::from_str::<UserRole>("\"coordenador\"").is_err());
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let now = chrono::Utc::now();
        let user = User {
            id: 1,
            name: "Ana".into(),
            email: "ana@npj.br".into(),
            password_hash: "segredo".into(),
            phone: None,
            registration: None,
            role: UserRole::Aluno,
            status: UserStatus::Active,
            last_login: None,
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("segredo"));
        assert!(json.contains("\"role\":\"aluno\""));
    }
}
