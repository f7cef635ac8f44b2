use super::{SeaOrmStorage, db_error};
use crate::entity::prelude::{
    AlunosProcessos, ProfessorAssignmentActiveModel, ProfessoresProcessos,
    StudentAssignmentActiveModel, UserModel, Usuarios,
};
use crate::entity::{alunos_processos, professores_processos, to_datetime};
use crate::errors::{NpjError, Result};
use crate::models::participants::entities::{Participant, ParticipantKind};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use std::collections::BTreeSet;

fn to_participant(
    id: i64,
    process_id: i64,
    assigned_at: i64,
    user: UserModel,
) -> Participant {
    Participant {
        id,
        process_id,
        user_id: user.id,
        name: user.name,
        email: user.email,
        registration: user.registration,
        assigned_at: to_datetime(assigned_at),
    }
}

impl SeaOrmStorage {
    /// Vincula o usuário; vínculo repetido vira `Conflict` pelo índice único
    pub async fn assign_participant_impl(
        &self,
        process_id: i64,
        user_id: i64,
        kind: ParticipantKind,
    ) -> Result<Participant> {
        let now = chrono::Utc::now().timestamp();

        let id = match kind {
            ParticipantKind::Student => {
                StudentAssignmentActiveModel {
                    process_id: Set(process_id),
                    user_id: Set(user_id),
                    assigned_at: Set(now),
                    ..Default::default()
                }
                .insert(&self.db)
                .await
                .map_err(db_error("Falha ao vincular aluno"))?
                .id
            }
            ParticipantKind::Professor => {
                ProfessorAssignmentActiveModel {
                    process_id: Set(process_id),
                    user_id: Set(user_id),
                    assigned_at: Set(now),
                    ..Default::default()
                }
                .insert(&self.db)
                .await
                .map_err(db_error("Falha ao vincular professor"))?
                .id
            }
        };

        let user = Usuarios::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(db_error("Falha ao buscar usuário"))?
            .ok_or_else(|| NpjError::not_found(format!("Usuário {user_id} não encontrado")))?;

        Ok(to_participant(id, process_id, now, user))
    }

    pub async fn list_participants_impl(
        &self,
        process_id: i64,
        kind: ParticipantKind,
    ) -> Result<Vec<Participant>> {
        let rows: Vec<(i64, i64, Option<UserModel>)> = match kind {
            ParticipantKind::Student => AlunosProcessos::find()
                .filter(alunos_processos::Column::ProcessId.eq(process_id))
                .order_by_asc(alunos_processos::Column::AssignedAt)
                .find_also_related(Usuarios)
                .all(&self.db)
                .await
                .map_err(db_error("Falha ao listar alunos do processo"))?
                .into_iter()
                .map(|(a, u)| (a.id, a.assigned_at, u))
                .collect(),
            ParticipantKind::Professor => ProfessoresProcessos::find()
                .filter(professores_processos::Column::ProcessId.eq(process_id))
                .order_by_asc(professores_processos::Column::AssignedAt)
                .find_also_related(Usuarios)
                .all(&self.db)
                .await
                .map_err(db_error("Falha ao listar professores do processo"))?
                .into_iter()
                .map(|(a, u)| (a.id, a.assigned_at, u))
                .collect(),
        };

        Ok(rows
            .into_iter()
            .filter_map(|(id, assigned_at, user)| {
                user.map(|u| to_participant(id, process_id, assigned_at, u))
            })
            .collect())
    }

    pub async fn remove_participant_impl(
        &self,
        process_id: i64,
        user_id: i64,
        kind: ParticipantKind,
    ) -> Result<bool> {
        let result = match kind {
            ParticipantKind::Student => AlunosProcessos::delete_many()
                .filter(alunos_processos::Column::ProcessId.eq(process_id))
                .filter(alunos_processos::Column::UserId.eq(user_id))
                .exec(&self.db)
                .await
                .map_err(db_error("Falha ao remover aluno"))?,
            ParticipantKind::Professor => ProfessoresProcessos::delete_many()
                .filter(professores_processos::Column::ProcessId.eq(process_id))
                .filter(professores_processos::Column::UserId.eq(user_id))
                .exec(&self.db)
                .await
                .map_err(db_error("Falha ao remover professor"))?,
        };

        Ok(result.rows_affected > 0)
    }

    /// Alunos, professores e assistido do processo, sem repetição
    pub async fn list_process_member_ids_impl(&self, process_id: i64) -> Result<Vec<i64>> {
        let mut ids = BTreeSet::new();

        for participant in self
            .list_participants_impl(process_id, ParticipantKind::Student)
            .await?
        {
            ids.insert(participant.user_id);
        }
        for participant in self
            .list_participants_impl(process_id, ParticipantKind::Professor)
            .await?
        {
            ids.insert(participant.user_id);
        }
        if let Some(client_id) = self
            .get_process_by_id_impl(process_id)
            .await?
            .and_then(|p| p.client_id)
        {
            ids.insert(client_id);
        }

        Ok(ids.into_iter().collect())
    }
}
