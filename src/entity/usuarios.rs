//! Usuários

use sea_orm::entity::prelude::*;

use super::to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "usuarios")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub registration: Option<String>,
    pub role_id: i64,
    pub status: String,
    pub last_login: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::roles::Entity",
        from = "Column::RoleId",
        to = "super::roles::Column::Id"
    )]
    Role,
    #[sea_orm(has_many = "super::alunos_processos::Entity")]
    StudentAssignments,
    #[sea_orm(has_many = "super::professores_processos::Entity")]
    ProfessorAssignments,
    #[sea_orm(has_many = "super::notificacoes::Entity")]
    Notifications,
    #[sea_orm(has_many = "super::arquivos::Entity")]
    Files,
}

impl Related<super::roles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Role.def()
    }
}

impl Related<super::alunos_processos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StudentAssignments.def()
    }
}

impl Related<super::professores_processos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProfessorAssignments.def()
    }
}

impl Related<super::notificacoes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notifications.def()
    }
}

impl Related<super::arquivos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Files.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_user(self) -> crate::models::users::entities::User {
        use crate::models::users::entities::{User, UserRole, UserStatus};

        User {
            id: self.id,
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            phone: self.phone,
            registration: self.registration,
            // Perfil desconhecido cai no de menor privilégio
            role: UserRole::from_id(self.role_id).unwrap_or(UserRole::Usuario),
            status: self
                .status
                .parse::<UserStatus>()
                .unwrap_or(UserStatus::Inactive),
            last_login: self.last_login.map(to_datetime),
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
        }
    }
}
