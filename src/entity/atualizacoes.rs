//! Andamentos / atualizações dos processos

use sea_orm::entity::prelude::*;

use super::to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "atualizacoes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub process_id: i64,
    pub author_id: i64,
    pub kind: String,
    pub title: String,
    pub content: Option<String>,
    pub file_token: Option<String>,
    pub created_at: i64,
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
        from = "Column::AuthorId",
        to = "super::usuarios::Column::Id"
    )]
    Author,
}

impl Related<super::processos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Process.def()
    }
}

impl Related<super::usuarios::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_process_update(
        self,
        author_name: Option<String>,
    ) -> crate::models::process_updates::entities::ProcessUpdate {
        use crate::models::process_updates::entities::{ProcessUpdate, ProcessUpdateKind};

        ProcessUpdate {
            id: self.id,
            process_id: self.process_id,
            author_id: self.author_id,
            author_name,
            kind: self
                .kind
                .parse::<ProcessUpdateKind>()
                .unwrap_or(ProcessUpdateKind::Note),
            title: self.title,
            content: self.content,
            file_token: self.file_token,
            created_at: to_datetime(self.created_at),
        }
    }
}
