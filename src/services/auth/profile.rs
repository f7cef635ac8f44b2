use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AuthService;
use crate::cache::{ObjectCache, keys};
use crate::models::{
    ApiResponse, ErrorCode,
    auth::responses::UserInfoResponse,
    users::requests::{UpdateProfileRequest, UpdateUserRequest},
};
use crate::services::{app_state, current_user, internal_error};
use crate::utils::password::{hash_password, verify_password};
use crate::utils::validate::{validate_name, validate_password, validate_phone};

fn bad_request(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

/// Nome, telefone e troca de senha (exige a senha atual)
pub async fn handle_update_profile(
    service: &AuthService,
    update_request: UpdateProfileRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    let mut update = UpdateUserRequest::default();

    if let Some(name) = update_request.name {
        let name = name.trim().to_string();
        if let Err(msg) = validate_name(&name) {
            return Ok(bad_request(ErrorCode::UserInvalidData, msg));
        }
        update.name = Some(name);
    }

    if let Some(phone) = update_request.phone {
        if !phone.is_empty()
            && let Err(msg) = validate_phone(&phone)
        {
            return Ok(bad_request(ErrorCode::UserInvalidData, msg));
        }
        update.phone = Some(phone);
    }

    let storage = service.get_storage(request)?;

    if let Some(new_password) = update_request.new_password {
        let Some(current_password) = update_request.current_password else {
            return Ok(bad_request(
                ErrorCode::UserPasswordInvalid,
                "Informe a senha atual",
            ));
        };

        // o usuário em cache não carrega o hash
        let stored = match storage.get_user_by_id(user.id).await {
            Ok(Some(stored)) => stored,
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::UserNotFound,
                    "Usuário não encontrado",
                )));
            }
            Err(e) => return Ok(internal_error("Falha ao buscar usuário", e)),
        };

        if !verify_password(&current_password, &stored.password_hash) {
            return Ok(bad_request(
                ErrorCode::UserPasswordInvalid,
                "Senha atual incorreta",
            ));
        }

        let check = validate_password(&new_password);
        if !check.is_valid {
            return Ok(bad_request(
                ErrorCode::UserPasswordInvalid,
                check.error_message(),
            ));
        }

        update.password = match hash_password(&new_password) {
            Ok(hash) => Some(hash),
            Err(e) => return Ok(internal_error("Falha ao processar a senha", e)),
        };
    }

    match storage.update_user(user.id, update).await {
        Ok(Some(updated)) => {
            if let Ok(cache) = app_state::<dyn ObjectCache>(request, "Cache") {
                cache.remove_prefix(&keys::auth_prefix(user.id)).await;
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                UserInfoResponse { user: updated },
                "Perfil atualizado",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "Usuário não encontrado",
        ))),
        Err(e) => Ok(internal_error("Falha ao atualizar o perfil", e)),
    }
}
