use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tracing::{error, info};
use uuid::Uuid;

use super::{FileService, blob_path, extension_of};
use crate::config::AppConfig;
use crate::errors::NpjError;
use crate::middlewares::RequireProcessAccess;
use crate::models::files::entities::NewFile;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, internal_error};
use crate::utils::file_magic::content_type_for_extension;
use crate::utils::validate_magic_bytes;

fn bad_request(code: ErrorCode, message: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

fn upload_failed(message: &str, err: impl std::fmt::Display) -> HttpResponse {
    error!("{}", NpjError::file_operation(format!("{message}: {err}")));
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::FileUploadFailed,
        message,
    ))
}

/// Arquivo já gravado no disco, ainda sem registro no banco
struct ReceivedFile {
    original_name: String,
    stored_name: String,
    extension: String,
    size: i64,
}

/// Multipart com o campo `file` e, opcionalmente, `process_id`
pub async fn handle_upload(
    service: &FileService,
    request: &HttpRequest,
    mut payload: Multipart,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    let config = AppConfig::get();
    let upload_dir = &config.upload.dir;
    if !Path::new(upload_dir).exists()
        && let Err(e) = fs::create_dir_all(upload_dir)
    {
        return Ok(upload_failed("Falha ao criar o diretório de arquivos", e));
    }

    let mut received: Option<ReceivedFile> = None;
    let mut process_field: Option<String> = None;

    while let Ok(Some(mut field)) = payload.try_next().await {
        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();

        match name.as_str() {
            "process_id" => {
                let mut raw = Vec::new();
                while let Some(chunk) = field.next().await {
                    raw.extend_from_slice(&chunk?);
                }
                process_field = Some(String::from_utf8_lossy(&raw).trim().to_string());
            }
            "file" => {
                if let Some(ref file) = received {
                    discard(&file.stored_name);
                    return Ok(bad_request(
                        ErrorCode::BadRequest,
                        "Envie um arquivo por vez",
                    ));
                }

                let original_name = content_disposition
                    .and_then(|cd| cd.get_filename())
                    .map(|s| s.to_string())
                    .unwrap_or_default();

                let extension = extension_of(&original_name);
                if !config
                    .upload
                    .allowed_types
                    .iter()
                    .any(|t| t.to_lowercase() == extension)
                {
                    return Ok(bad_request(
                        ErrorCode::FileTypeNotAllowed,
                        "Tipo de arquivo não permitido",
                    ));
                }

                let stored_name = format!("{}.bin", Uuid::new_v4());
                let mut blob = match File::create(blob_path(&stored_name)) {
                    Ok(blob) => blob,
                    Err(e) => return Ok(upload_failed("Falha ao gravar o arquivo", e)),
                };

                let mut total_size: usize = 0;
                let mut first_chunk = true;
                while let Some(chunk) = field.next().await {
                    let data = chunk?;
                    if data.is_empty() {
                        continue;
                    }

                    // o conteúdo precisa bater com a extensão
                    if first_chunk {
                        first_chunk = false;
                        if !validate_magic_bytes(&data, &extension) {
                            discard(&stored_name);
                            return Ok(bad_request(
                                ErrorCode::FileTypeNotAllowed,
                                "O conteúdo do arquivo não corresponde à extensão",
                            ));
                        }
                    }

                    total_size += data.len();
                    if total_size > config.upload.max_size {
                        discard(&stored_name);
                        return Ok(bad_request(
                            ErrorCode::FileSizeExceeded,
                            "Arquivo maior que o limite permitido",
                        ));
                    }
                    if let Err(e) = blob.write_all(&data) {
                        discard(&stored_name);
                        return Ok(upload_failed("Falha ao gravar o arquivo", e));
                    }
                }

                // arquivo vazio não passa pela checagem de conteúdo
                if total_size == 0 {
                    discard(&stored_name);
                    return Ok(bad_request(ErrorCode::BadRequest, "O arquivo enviado está vazio"));
                }

                received = Some(ReceivedFile {
                    original_name,
                    stored_name,
                    extension,
                    size: total_size as i64,
                });
            }
            _ => {}
        }
    }

    let Some(file) = received else {
        return Ok(bad_request(
            ErrorCode::FileNotFound,
            "Nenhum arquivo no campo 'file'",
        ));
    };

    let process_id = match process_field.filter(|raw| !raw.is_empty()) {
        Some(raw) => match raw.parse::<i64>() {
            Ok(id) if id > 0 => Some(id),
            _ => {
                discard(&file.stored_name);
                return Ok(bad_request(ErrorCode::BadRequest, "process_id inválido"));
            }
        },
        None => None,
    };

    let storage = service.get_storage(request)?;

    // anexar a um processo exige acesso a ele
    if let Some(process_id) = process_id {
        let denied = match storage.get_process_membership(process_id, user.id).await {
            Ok(Some(membership)) if RequireProcessAccess::has_access(&user, Some(membership)) => {
                None
            }
            Ok(Some(_)) => Some(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::ProcessAccessDenied,
                "Sem acesso a este processo",
            ))),
            Ok(None) => Some(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ProcessNotFound,
                "Processo não encontrado",
            ))),
            Err(e) => Some(internal_error("Falha ao verificar o processo", e)),
        };
        if let Some(resp) = denied {
            discard(&file.stored_name);
            return Ok(resp);
        }
    }

    let new_file = NewFile {
        token: Uuid::new_v4().to_string(),
        original_name: file.original_name,
        stored_name: file.stored_name.clone(),
        file_size: file.size,
        content_type: content_type_for_extension(&file.extension).to_string(),
        process_id,
        user_id: user.id,
    };

    match storage.create_file(new_file).await {
        Ok(saved) => {
            info!("File {} uploaded by user {}", saved.token, user.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                saved,
                "Arquivo enviado com sucesso",
            )))
        }
        Err(e) => {
            discard(&file.stored_name);
            Ok(upload_failed("Falha ao registrar o arquivo", e))
        }
    }
}

fn discard(stored_name: &str) {
    let _ = fs::remove_file(blob_path(stored_name));
}
