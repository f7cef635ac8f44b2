use super::{SeaOrmStorage, db_error};
use crate::entity::notificacoes::{ActiveModel, Column, Entity as Notificacoes};
use crate::errors::Result;
use crate::models::{
    PaginationInfo,
    notifications::{
        entities::{NewNotification, Notification},
        requests::NotificationListQuery,
        responses::NotificationListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait, sea_query::Expr,
};

impl SeaOrmStorage {
    /// Insere o lote numa única transação
    pub async fn create_notifications_impl(
        &self,
        notifications: Vec<NewNotification>,
    ) -> Result<Vec<Notification>> {
        if notifications.is_empty() {
            return Ok(Vec::new());
        }

        let now = chrono::Utc::now().timestamp();
        let txn = self
            .db
            .begin()
            .await
            .map_err(db_error("Falha ao iniciar transação"))?;

        let mut created = Vec::with_capacity(notifications.len());
        for n in notifications {
            let model = ActiveModel {
                user_id: Set(n.user_id),
                kind: Set(n.kind.to_string()),
                title: Set(n.title),
                content: Set(n.content),
                reference_type: Set(n.reference_type.map(|t| t.to_string())),
                reference_id: Set(n.reference_id),
                is_read: Set(false),
                created_at: Set(now),
                ..Default::default()
            };
            let result = model
                .insert(&txn)
                .await
                .map_err(db_error("Falha ao criar notificação"))?;
            created.push(result.into_notification());
        }

        txn.commit()
            .await
            .map_err(db_error("Falha ao confirmar notificações"))?;

        Ok(created)
    }

    pub async fn list_user_notifications_with_pagination_impl(
        &self,
        user_id: i64,
        query: NotificationListQuery,
    ) -> Result<NotificationListResponse> {
        let page = query.page.max(1);
        let size = query.size.max(1);

        let mut select = Notificacoes::find().filter(Column::UserId.eq(user_id));
        if query.unread_only {
            select = select.filter(Column::IsRead.eq(false));
        }
        select = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(db_error("Falha ao contar notificações"))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(db_error("Falha ao contar páginas de notificações"))?;
        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(db_error("Falha ao listar notificações"))?;

        Ok(NotificationListResponse {
            items: rows.into_iter().map(|m| m.into_notification()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    pub async fn get_unread_notification_count_impl(&self, user_id: i64) -> Result<i64> {
        let count = Notificacoes::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::IsRead.eq(false))
            .count(&self.db)
            .await
            .map_err(db_error("Falha ao contar notificações não lidas"))?;

        Ok(count as i64)
    }

    /// Só marca notificações do próprio usuário
    pub async fn mark_notification_as_read_impl(&self, id: i64, user_id: i64) -> Result<bool> {
        let result = Notificacoes::update_many()
            .col_expr(Column::IsRead, Expr::value(true))
            .filter(Column::Id.eq(id))
            .filter(Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(db_error("Falha ao marcar notificação como lida"))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn mark_all_notifications_as_read_impl(&self, user_id: i64) -> Result<u64> {
        let result = Notificacoes::update_many()
            .col_expr(Column::IsRead, Expr::value(true))
            .filter(Column::UserId.eq(user_id))
            .filter(Column::IsRead.eq(false))
            .exec(&self.db)
            .await
            .map_err(db_error("Falha ao marcar notificações como lidas"))?;

        Ok(result.rows_affected)
    }

    pub async fn delete_notification_impl(&self, id: i64, user_id: i64) -> Result<bool> {
        let result = Notificacoes::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(db_error("Falha ao excluir notificação"))?;

        Ok(result.rows_affected > 0)
    }
}
