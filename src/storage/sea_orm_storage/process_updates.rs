use super::{SeaOrmStorage, db_error};
use crate::entity::atualizacoes::{ActiveModel, Column, Entity as Atualizacoes};
use crate::entity::prelude::Usuarios;
use crate::errors::Result;
use crate::models::process_updates::{
    entities::ProcessUpdate, requests::CreateProcessUpdateRequest,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    pub async fn create_process_update_impl(
        &self,
        process_id: i64,
        author_id: i64,
        req: CreateProcessUpdateRequest,
    ) -> Result<ProcessUpdate> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            process_id: Set(process_id),
            author_id: Set(author_id),
            kind: Set(req.kind.to_string()),
            title: Set(req.title),
            content: Set(req.content),
            file_token: Set(req.file_token),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("Falha ao registrar andamento"))?;

        let author_name = self.get_user_by_id_impl(author_id).await?.map(|u| u.name);

        Ok(result.into_process_update(author_name))
    }

    pub async fn get_process_update_impl(&self, id: i64) -> Result<Option<ProcessUpdate>> {
        let result = Atualizacoes::find_by_id(id)
            .find_also_related(Usuarios)
            .one(&self.db)
            .await
            .map_err(db_error("Falha ao buscar andamento"))?;

        Ok(result.map(|(update, author)| update.into_process_update(author.map(|a| a.name))))
    }

    /// Linha do tempo, do mais recente para o mais antigo
    pub async fn list_process_updates_impl(&self, process_id: i64) -> Result<Vec<ProcessUpdate>> {
        let rows = Atualizacoes::find()
            .filter(Column::ProcessId.eq(process_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .find_also_related(Usuarios)
            .all(&self.db)
            .await
            .map_err(db_error("Falha ao listar andamentos"))?;

        Ok(rows
            .into_iter()
            .map(|(update, author)| update.into_process_update(author.map(|a| a.name)))
            .collect())
    }

    pub async fn delete_process_update_impl(&self, id: i64) -> Result<bool> {
        let result = Atualizacoes::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error("Falha ao excluir andamento"))?;

        Ok(result.rows_affected > 0)
    }
}
