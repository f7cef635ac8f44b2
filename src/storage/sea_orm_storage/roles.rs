use super::{SeaOrmStorage, db_error};
use crate::entity::roles::{Column, Entity as Roles};
use crate::errors::Result;
use crate::models::roles::Role;
use sea_orm::{EntityTrait, QueryOrder};

impl SeaOrmStorage {
    pub async fn list_roles_impl(&self) -> Result<Vec<Role>> {
        let roles = Roles::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error("Falha ao listar perfis"))?;

        Ok(roles.into_iter().map(|m| m.into_role()).collect())
    }
}
