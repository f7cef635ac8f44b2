//! Processos

use sea_orm::entity::prelude::*;

use super::to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "processos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub process_number: String,
    pub subject: String,
    pub description: Option<String>,
    pub status: String,
    pub court: Option<String>,
    pub court_system: Option<String>,
    pub phase: Option<String>,
    pub client_id: Option<i64>,
    pub created_by: i64,
    pub created_at: i64,
    pub updated_at: i64,
    pub closed_at: Option<i64>,
    pub deleted_at: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::usuarios::Entity",
        from = "Column::ClientId",
        to = "super::usuarios::Column::Id"
    )]
    Client,
    #[sea_orm(has_many = "super::alunos_processos::Entity")]
    Students,
    #[sea_orm(has_many = "super::professores_processos::Entity")]
    Professors,
    #[sea_orm(has_many = "super::atualizacoes::Entity")]
    Updates,
    #[sea_orm(has_many = "super::agendamentos::Entity")]
    Appointments,
    #[sea_orm(has_many = "super::arquivos::Entity")]
    Files,
}

impl Related<super::usuarios::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl Related<super::alunos_processos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Students.def()
    }
}

impl Related<super::professores_processos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Professors.def()
    }
}

impl Related<super::atualizacoes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Updates.def()
    }
}

impl Related<super::agendamentos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Appointments.def()
    }
}

impl Related<super::arquivos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Files.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_process(self) -> crate::models::processes::entities::Process {
        use crate::models::processes::entities::{Process, ProcessStatus};

        Process {
            id: self.id,
            number: self.process_number,
            subject: self.subject,
            description: self.description,
            status: self
                .status
                .parse::<ProcessStatus>()
                .unwrap_or(ProcessStatus::Waiting),
            court: self.court,
            court_system: self.court_system,
            phase: self.phase,
            client_id: self.client_id,
            created_by: self.created_by,
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
            closed_at: self.closed_at.map(to_datetime),
        }
    }
}
