pub mod assign;
pub mod list;
pub mod remove;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::participants::entities::ParticipantKind;
use crate::models::users::entities::{User, UserRole};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct ParticipantService {
    storage: Option<Arc<dyn Storage>>,
}

impl ParticipantService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::app_state::<dyn Storage>(request, "Storage"),
        }
    }

    pub async fn list_participants(
        &self,
        request: &HttpRequest,
        process_id: i64,
        kind: ParticipantKind,
    ) -> ActixResult<HttpResponse> {
        list::list_participants(self, request, process_id, kind).await
    }

    pub async fn assign_participant(
        &self,
        request: &HttpRequest,
        process_id: i64,
        user_id: i64,
        kind: ParticipantKind,
    ) -> ActixResult<HttpResponse> {
        assign::assign_participant(self, request, process_id, user_id, kind).await
    }

    pub async fn remove_participant(
        &self,
        request: &HttpRequest,
        process_id: i64,
        user_id: i64,
        kind: ParticipantKind,
    ) -> ActixResult<HttpResponse> {
        remove::remove_participant(self, request, process_id, user_id, kind).await
    }
}

/// Alunos: gestores do processo; professores: só a coordenação
pub(crate) fn check_can_manage(
    request: &HttpRequest,
    user: &User,
    kind: ParticipantKind,
) -> Result<(), HttpResponse> {
    match kind {
        ParticipantKind::Student => super::require_manager(request, user),
        ParticipantKind::Professor if user.role == UserRole::Admin => Ok(()),
        ParticipantKind::Professor => Err(HttpResponse::Forbidden().json(
            ApiResponse::error_empty(
                ErrorCode::Forbidden,
                "Apenas a coordenação pode alterar os professores do processo",
            ),
        )),
    }
}
