use sea_orm_migration::prelude::*;

use crate::m20250301_000001_create_tables::Roles;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Perfis fixos; os ids são referenciados pela aplicação
const ROLES: [(i64, &str, &str); 4] = [
    (1, "admin", "Administrador do sistema"),
    (2, "professor", "Professor orientador"),
    (3, "aluno", "Aluno estagiário"),
    (4, "usuario", "Assistido / cliente do núcleo"),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut insert = Query::insert();
        insert
            .into_table(Roles::Table)
            .columns([Roles::Id, Roles::Name, Roles::Description]);

        for (id, name, description) in ROLES {
            insert.values_panic([id.into(), name.into(), description.into()]);
        }

        manager.exec_stmt(insert).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let ids: Vec<i64> = ROLES.iter().map(|(id, _, _)| *id).collect();
        let delete = Query::delete()
            .from_table(Roles::Table)
            .and_where(Expr::col(Roles::Id).is_in(ids))
            .to_owned();

        manager.exec_stmt(delete).await
    }
}
