//! Alunos vinculados aos processos

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "alunos_processos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub process_id: i64,
    pub user_id: i64,
    pub assigned_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::processos::Entity",
        from = "Column::ProcessId",
        to = "super::processos::Column::Id"
    )]
    Process,
    #[sea_orm(
        belongs_to = "super::usuarios::Entity",
        from = "Column::UserId",
        to = "super::usuarios::Column::Id"
    )]
    User,
}

impl Related<super::processos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Process.def()
    }
}

impl Related<super::usuarios::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
