//! Arquivos anexados

use sea_orm::entity::prelude::*;

use super::to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "arquivos")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub token: String,
    pub original_name: String,
    pub stored_name: String,
    pub file_size: i64,
    pub content_type: String,
    pub process_id: Option<i64>,
    pub user_id: i64,
    pub uploaded_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::usuarios::Entity",
        from = "Column::UserId",
        to = "super::usuarios::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::processos::Entity",
        from = "Column::ProcessId",
        to = "super::processos::Column::Id"
    )]
    Process,
}

impl Related<super::usuarios::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::processos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Process.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_file(self) -> crate::models::files::entities::FileAttachment {
        crate::models::files::entities::FileAttachment {
            token: self.token,
            original_name: self.original_name,
            stored_name: self.stored_name,
            file_size: self.file_size,
            content_type: self.content_type,
            process_id: self.process_id,
            user_id: self.user_id,
            uploaded_at: to_datetime(self.uploaded_at),
        }
    }
}
