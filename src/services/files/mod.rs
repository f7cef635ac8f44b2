pub mod delete;
pub mod download;
pub mod list;
pub mod upload;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::storage::Storage;

pub struct FileService {
    storage: Option<Arc<dyn Storage>>,
}

impl FileService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::app_state::<dyn Storage>(request, "Storage"),
        }
    }

    pub async fn handle_upload(
        &self,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        upload::handle_upload(self, request, payload).await
    }

    pub async fn handle_download(
        &self,
        request: &HttpRequest,
        file_token: String,
    ) -> ActixResult<HttpResponse> {
        download::handle_download(self, request, file_token).await
    }

    pub async fn delete_file(
        &self,
        request: &HttpRequest,
        file_token: String,
    ) -> ActixResult<HttpResponse> {
        delete::delete_file(self, request, file_token).await
    }

    pub async fn list_process_files(
        &self,
        request: &HttpRequest,
        process_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_process_files(self, request, process_id).await
    }
}

/// Caminho do arquivo gravado dentro de `upload.dir`
pub(crate) fn blob_path(stored_name: &str) -> PathBuf {
    PathBuf::from(&AppConfig::get().upload.dir).join(stored_name)
}

/// Extensão em minúsculas com o ponto (`.pdf`), ou vazia
pub(crate) fn extension_of(file_name: &str) -> String {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("Peticao Inicial.PDF"), ".pdf");
        assert_eq!(extension_of("foto.jpeg"), ".jpeg");
        assert_eq!(extension_of("sem_extensao"), "");
        assert_eq!(extension_of("arquivo.tar.gz"), ".gz");
    }
}
