pub mod create;
pub mod delete;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::process_updates::requests::CreateProcessUpdateRequest;
use crate::storage::Storage;

pub struct ProcessUpdateService {
    storage: Option<Arc<dyn Storage>>,
}

impl ProcessUpdateService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::app_state::<dyn Storage>(request, "Storage"),
        }
    }

    pub async fn list_updates(
        &self,
        request: &HttpRequest,
        process_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_updates(self, request, process_id).await
    }

    pub async fn create_update(
        &self,
        request: &HttpRequest,
        process_id: i64,
        update_data: CreateProcessUpdateRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_update(self, request, process_id, update_data).await
    }

    pub async fn delete_update(
        &self,
        request: &HttpRequest,
        process_id: i64,
        update_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_update(self, request, process_id, update_id).await
    }
}
