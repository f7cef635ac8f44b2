use super::{SeaOrmStorage, db_error};
use crate::entity::arquivos::{ActiveModel, Column, Entity as Arquivos};
use crate::errors::Result;
use crate::models::files::entities::{FileAttachment, NewFile};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    pub async fn create_file_impl(&self, file: NewFile) -> Result<FileAttachment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            token: Set(file.token),
            original_name: Set(file.original_name),
            stored_name: Set(file.stored_name),
            file_size: Set(file.file_size),
            content_type: Set(file.content_type),
            process_id: Set(file.process_id),
            user_id: Set(file.user_id),
            uploaded_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("Falha ao registrar arquivo"))?;

        Ok(result.into_file())
    }

    pub async fn get_file_by_token_impl(&self, token: &str) -> Result<Option<FileAttachment>> {
        let result = Arquivos::find_by_id(token.to_string())
            .one(&self.db)
            .await
            .map_err(db_error("Falha ao buscar arquivo"))?;

        Ok(result.map(|m| m.into_file()))
    }

    pub async fn list_process_files_impl(&self, process_id: i64) -> Result<Vec<FileAttachment>> {
        let files = Arquivos::find()
            .filter(Column::ProcessId.eq(process_id))
            .order_by_desc(Column::UploadedAt)
            .all(&self.db)
            .await
            .map_err(db_error("Falha ao listar arquivos"))?;

        Ok(files.into_iter().map(|m| m.into_file()).collect())
    }

    pub async fn delete_file_impl(&self, token: &str) -> Result<bool> {
        let result = Arquivos::delete_by_id(token.to_string())
            .exec(&self.db)
            .await
            .map_err(db_error("Falha ao excluir arquivo"))?;

        Ok(result.rows_affected > 0)
    }
}
