use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::ProcessUpdateService;
use crate::models::notifications::entities::{NewNotification, NotificationKind, ReferenceType};
use crate::models::process_updates::requests::CreateProcessUpdateRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::notifications::{dispatch::recipients_except, dispatch_notifications};
use crate::services::processes::process_not_found;
use crate::services::{current_user, internal_error};

fn bad_request(code: ErrorCode, message: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

pub async fn create_update(
    service: &ProcessUpdateService,
    request: &HttpRequest,
    process_id: i64,
    mut update_data: CreateProcessUpdateRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    update_data.title = update_data.title.trim().to_string();
    if update_data.title.is_empty() {
        return Ok(bad_request(ErrorCode::BadRequest, "Informe o título da atualização"));
    }

    let storage = service.get_storage(request)?;

    // anexo: enviado para este processo ou pelo próprio autor
    if let Some(ref token) = update_data.file_token {
        match storage.get_file_by_token(token).await {
            Ok(Some(file))
                if file.process_id == Some(process_id) || file.user_id == user.id => {}
            Ok(Some(_)) => {
                return Ok(bad_request(
                    ErrorCode::BadRequest,
                    "O arquivo pertence a outro processo",
                ));
            }
            Ok(None) => return Ok(bad_request(ErrorCode::FileNotFound, "Arquivo não encontrado")),
            Err(e) => return Ok(internal_error("Falha ao buscar o arquivo", e)),
        }
    }

    let process = match storage.get_process_by_id(process_id).await {
        Ok(Some(process)) => process,
        Ok(None) => return Ok(process_not_found()),
        Err(e) => return Ok(internal_error("Falha ao buscar o processo", e)),
    };

    let update = match storage
        .create_process_update(process_id, user.id, update_data)
        .await
    {
        Ok(update) => update,
        Err(e) => return Ok(internal_error("Falha ao registrar a atualização", e)),
    };
    info!("Update {} added to process {} by user {}", update.id, process_id, user.id);

    match storage.list_process_member_ids(process_id).await {
        Ok(members) => {
            let notifications = recipients_except(members, user.id)
                .into_iter()
                .map(|member_id| {
                    NewNotification::new(
                        member_id,
                        NotificationKind::ProcessUpdated,
                        format!("Nova atualização no processo {}", process.number),
                    )
                    .content(update.title.clone())
                    .reference(ReferenceType::Process, process_id)
                })
                .collect();
            dispatch_notifications(request, &storage, notifications).await;
        }
        Err(e) => warn!("Failed to load members of process {}: {}", process_id, e),
    }

    Ok(HttpResponse::Created().json(ApiResponse::success(
        update,
        "Atualização registrada",
    )))
}
