use super::{SeaOrmStorage, db_error};
use crate::entity::alunos_processos::{self, Entity as AlunosProcessos};
use crate::entity::processos::{ActiveModel, Column, Entity as Processos};
use crate::entity::professores_processos::{self, Entity as ProfessoresProcessos};
use crate::errors::Result;
use crate::models::{
    PaginationInfo,
    processes::{
        entities::{Process, ProcessMembership, ProcessScope, ProcessStatus},
        requests::{CreateProcessRequest, ProcessListQuery, UpdateProcessRequest},
        responses::ProcessListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
    sea_query::{Expr, Query, SelectStatement},
};
use std::collections::BTreeSet;

/// `SELECT process_id FROM alunos_processos WHERE user_id = ?`
fn student_process_ids(user_id: i64) -> SelectStatement {
    Query::select()
        .column(alunos_processos::Column::ProcessId)
        .from(AlunosProcessos)
        .and_where(Expr::col(alunos_processos::Column::UserId).eq(user_id))
        .to_owned()
}

/// `SELECT process_id FROM professores_processos WHERE user_id = ?`
fn professor_process_ids(user_id: i64) -> SelectStatement {
    Query::select()
        .column(professores_processos::Column::ProcessId)
        .from(ProfessoresProcessos)
        .and_where(Expr::col(professores_processos::Column::UserId).eq(user_id))
        .to_owned()
}

fn closed_at_for(status: ProcessStatus, now: i64) -> Option<i64> {
    status.is_closed().then_some(now)
}

impl SeaOrmStorage {
    pub async fn create_process_impl(
        &self,
        req: CreateProcessRequest,
        created_by: i64,
    ) -> Result<Process> {
        let now = chrono::Utc::now().timestamp();
        let status = req.status.unwrap_or(ProcessStatus::Waiting);

        let model = ActiveModel {
            process_number: Set(req.number),
            subject: Set(req.subject),
            description: Set(req.description),
            status: Set(status.to_string()),
            court: Set(req.court),
            court_system: Set(req.court_system),
            phase: Set(req.phase),
            client_id: Set(req.client_id),
            created_by: Set(created_by),
            created_at: Set(now),
            updated_at: Set(now),
            closed_at: Set(closed_at_for(status, now)),
            deleted_at: Set(None),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("Falha ao criar processo"))?;

        Ok(result.into_process())
    }

    /// Processos excluídos não são retornados
    pub async fn get_process_by_id_impl(&self, id: i64) -> Result<Option<Process>> {
        let result = Processos::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(db_error("Falha ao buscar processo"))?;

        Ok(result.map(|m| m.into_process()))
    }

    pub async fn list_processes_with_pagination_impl(
        &self,
        query: ProcessListQuery,
    ) -> Result<ProcessListResponse> {
        let page = query.page.max(1);
        let size = query.size.max(1);

        let mut select = Processos::find().filter(Column::DeletedAt.is_null());

        select = match query.scope {
            ProcessScope::All => select,
            ProcessScope::Participant(user_id) => select.filter(
                Condition::any()
                    .add(Column::Id.in_subquery(student_process_ids(user_id)))
                    .add(Column::Id.in_subquery(professor_process_ids(user_id))),
            ),
            ProcessScope::Client(user_id) => select.filter(Column::ClientId.eq(user_id)),
        };

        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        if let Some(ref search) = query.search {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::ProcessNumber.contains(&escaped))
                    .add(Column::Subject.contains(&escaped)),
            );
        }

        select = select.order_by_desc(Column::UpdatedAt).order_by_desc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(db_error("Falha ao contar processos"))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(db_error("Falha ao contar páginas de processos"))?;
        let processes = paginator
            .fetch_page(page - 1)
            .await
            .map_err(db_error("Falha ao listar processos"))?;

        Ok(ProcessListResponse {
            items: processes.into_iter().map(|m| m.into_process()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    pub async fn update_process_impl(
        &self,
        id: i64,
        update: UpdateProcessRequest,
    ) -> Result<Option<Process>> {
        let Some(existing) = self.get_process_by_id_impl(id).await? else {
            return Ok(None);
        };

        let now = chrono::Utc::now().timestamp();
        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(number) = update.number {
            model.process_number = Set(number);
        }
        if let Some(subject) = update.subject {
            model.subject = Set(subject);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
            // Só mexe em closed_at quando o processo muda de aberto para fechado ou vice-versa
            if status.is_closed() != existing.status.is_closed() {
                model.closed_at = Set(closed_at_for(status, now));
            }
        }
        if let Some(court) = update.court {
            model.court = Set(Some(court));
        }
        if let Some(court_system) = update.court_system {
            model.court_system = Set(Some(court_system));
        }
        if let Some(phase) = update.phase {
            model.phase = Set(Some(phase));
        }
        if let Some(client_id) = update.client_id {
            model.client_id = Set(Some(client_id));
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(db_error("Falha ao atualizar processo"))?;

        Ok(Some(result.into_process()))
    }

    pub async fn soft_delete_process_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Processos::update_many()
            .col_expr(Column::DeletedAt, Expr::value(now))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(id))
            .filter(Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(db_error("Falha ao excluir processo"))?;

        Ok(result.rows_affected > 0)
    }

    /// `None` quando o processo não existe (ou foi excluído)
    pub async fn get_process_membership_impl(
        &self,
        process_id: i64,
        user_id: i64,
    ) -> Result<Option<ProcessMembership>> {
        let Some(process) = self.get_process_by_id_impl(process_id).await? else {
            return Ok(None);
        };

        let is_student = AlunosProcessos::find()
            .filter(alunos_processos::Column::ProcessId.eq(process_id))
            .filter(alunos_processos::Column::UserId.eq(user_id))
            .count(&self.db)
            .await
            .map_err(db_error("Falha ao verificar vínculo de aluno"))?
            > 0;

        let is_professor = ProfessoresProcessos::find()
            .filter(professores_processos::Column::ProcessId.eq(process_id))
            .filter(professores_processos::Column::UserId.eq(user_id))
            .count(&self.db)
            .await
            .map_err(db_error("Falha ao verificar vínculo de professor"))?
            > 0;

        Ok(Some(ProcessMembership {
            is_student,
            is_professor,
            is_client: process.client_id == Some(user_id),
        }))
    }

    /// Processos ativos em que o usuário é aluno, professor ou assistido
    pub async fn list_accessible_process_ids_impl(&self, user_id: i64) -> Result<Vec<i64>> {
        let ids: Vec<i64> = Processos::find()
            .select_only()
            .column(Column::Id)
            .filter(Column::DeletedAt.is_null())
            .filter(
                Condition::any()
                    .add(Column::ClientId.eq(user_id))
                    .add(Column::Id.in_subquery(student_process_ids(user_id)))
                    .add(Column::Id.in_subquery(professor_process_ids(user_id))),
            )
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_error("Falha ao listar processos acessíveis"))?;

        Ok(ids.into_iter().collect::<BTreeSet<_>>().into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_at_only_for_closed_statuses() {
        assert_eq!(closed_at_for(ProcessStatus::Finished, 10), Some(10));
        assert_eq!(closed_at_for(ProcessStatus::Archived, 10), Some(10));
        assert_eq!(closed_at_for(ProcessStatus::InProgress, 10), None);
    }
}
