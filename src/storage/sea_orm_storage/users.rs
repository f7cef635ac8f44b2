use super::{SeaOrmStorage, db_error};
use crate::entity::usuarios::{ActiveModel, Column, Entity as Usuarios};
use crate::errors::Result;
use crate::models::{
    PaginationInfo,
    users::{
        entities::{User, UserStatus},
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, sea_query::Expr,
};

impl SeaOrmStorage {
    /// Cria usuário; `req.password` já chega com o hash
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name),
            email: Set(req.email.to_lowercase()),
            password_hash: Set(req.password),
            phone: Set(req.phone),
            registration: Set(req.registration),
            role_id: Set(req.role.id()),
            status: Set(UserStatus::Active.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("Falha ao criar usuário"))?;

        Ok(result.into_user())
    }

    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Usuarios::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Falha ao buscar usuário"))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// Busca por e-mail sem diferenciar maiúsculas
    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        let result = Usuarios::find()
            .filter(Column::Email.eq(email.trim().to_lowercase()))
            .one(&self.db)
            .await
            .map_err(db_error("Falha ao buscar usuário"))?;

        Ok(result.map(|m| m.into_user()))
    }

    pub async fn list_users_with_pagination_impl(
        &self,
        query: UserListQuery,
    ) -> Result<UserListResponse> {
        let page = query.page.max(1);
        let size = query.size.max(1);

        let mut select = Usuarios::find();

        if let Some(ref search) = query.search {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Name.contains(&escaped))
                    .add(Column::Email.contains(&escaped))
                    .add(Column::Registration.contains(&escaped)),
            );
        }

        if let Some(role) = query.role {
            select = select.filter(Column::RoleId.eq(role.id()));
        }

        if let Some(ref status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        select = select.order_by_asc(Column::Name);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(db_error("Falha ao contar usuários"))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(db_error("Falha ao contar páginas de usuários"))?;
        let users = paginator
            .fetch_page(page - 1)
            .await
            .map_err(db_error("Falha ao listar usuários"))?;

        Ok(UserListResponse {
            items: users.into_iter().map(|m| m.into_user()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Usuarios::update_many()
            .col_expr(Column::LastLogin, Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_error("Falha ao registrar último acesso"))?;

        Ok(result.rows_affected > 0)
    }

    /// Atualização parcial; `update.password` já chega com o hash
    pub async fn update_user_impl(
        &self,
        id: i64,
        update: UpdateUserRequest,
    ) -> Result<Option<User>> {
        if self.get_user_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(email) = update.email {
            model.email = Set(email.to_lowercase());
        }
        if let Some(password) = update.password {
            model.password_hash = Set(password);
        }
        if let Some(phone) = update.phone {
            model.phone = Set(Some(phone).filter(|p| !p.is_empty()));
        }
        if let Some(registration) = update.registration {
            model.registration = Set(Some(registration).filter(|r| !r.is_empty()));
        }
        if let Some(role) = update.role {
            model.role_id = Set(role.id());
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(db_error("Falha ao atualizar usuário"))?;

        Ok(Some(result.into_user()))
    }

    /// Exclusão lógica: o usuário fica inativo e mantém o histórico
    pub async fn deactivate_user_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Usuarios::update_many()
            .col_expr(Column::Status, Expr::value(UserStatus::Inactive.to_string()))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_error("Falha ao desativar usuário"))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_users_impl(&self) -> Result<u64> {
        Usuarios::find()
            .count(&self.db)
            .await
            .map_err(db_error("Falha ao contar usuários"))
    }
}
