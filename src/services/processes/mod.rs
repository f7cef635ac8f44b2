pub mod create;
pub mod delete;
pub mod detail;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::processes::requests::{
    CreateProcessRequest, ProcessListParams, UpdateProcessRequest,
};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct ProcessService {
    storage: Option<Arc<dyn Storage>>,
}

impl ProcessService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::app_state::<dyn Storage>(request, "Storage"),
        }
    }

    pub async fn list_processes(
        &self,
        request: &HttpRequest,
        query: ProcessListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_processes(self, request, query).await
    }

    pub async fn create_process(
        &self,
        request: &HttpRequest,
        process_data: CreateProcessRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_process(self, request, process_data).await
    }

    pub async fn get_process(
        &self,
        request: &HttpRequest,
        process_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_process(self, request, process_id).await
    }

    pub async fn update_process(
        &self,
        request: &HttpRequest,
        process_id: i64,
        update_data: UpdateProcessRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_process(self, request, process_id, update_data).await
    }

    pub async fn delete_process(
        &self,
        request: &HttpRequest,
        process_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_process(self, request, process_id).await
    }
}

pub(crate) fn process_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::ProcessNotFound,
        "Processo não encontrado",
    ))
}

pub(crate) fn duplicate_number() -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::error_empty(
        ErrorCode::ProcessNumberAlreadyExists,
        "Já existe um processo com este número",
    ))
}

/// O assistido precisa existir e ter o perfil `usuario`
pub(crate) async fn check_client(
    storage: &Arc<dyn Storage>,
    client_id: i64,
) -> Result<(), HttpResponse> {
    match storage.get_user_by_id(client_id).await {
        Ok(Some(user)) if user.role == UserRole::Usuario => Ok(()),
        Ok(Some(_)) => Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "O assistido precisa ter o perfil de usuário",
        ))),
        Ok(None) => Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "Assistido não encontrado",
        ))),
        Err(e) => Err(super::internal_error("Falha ao buscar o assistido", e)),
    }
}
