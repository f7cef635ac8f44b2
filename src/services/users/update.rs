use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::{
    ApiResponse, ErrorCode,
    users::{requests::UpdateUserRequest, responses::UserResponse},
};
use crate::services::internal_error;
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_name, validate_password, validate_phone};

/// Valida só os campos enviados
pub(crate) fn validate_user_update(update: &UpdateUserRequest) -> Result<(), (ErrorCode, String)> {
    if let Some(ref name) = update.name {
        validate_name(name.trim()).map_err(|m| (ErrorCode::UserInvalidData, m.to_string()))?;
    }
    if let Some(ref email) = update.email {
        validate_email(email.trim()).map_err(|m| (ErrorCode::UserInvalidData, m.to_string()))?;
    }
    if let Some(phone) = update.phone.as_deref().filter(|p| !p.is_empty()) {
        validate_phone(phone).map_err(|m| (ErrorCode::UserInvalidData, m.to_string()))?;
    }
    if let Some(ref password) = update.password {
        let check = validate_password(password);
        if !check.is_valid {
            return Err((ErrorCode::UserPasswordInvalid, check.error_message()));
        }
    }
    Ok(())
}

pub async fn update_user(
    service: &UserService,
    user_id: i64,
    mut update_data: UpdateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err((code, msg)) = validate_user_update(&update_data) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(code, msg)));
    }

    update_data.name = update_data.name.map(|n| n.trim().to_string());
    update_data.email = update_data.email.map(|e| e.trim().to_lowercase());
    if let Some(password) = update_data.password.take() {
        update_data.password = match hash_password(&password) {
            Ok(hash) => Some(hash),
            Err(e) => return Ok(internal_error("Falha ao processar a senha", e)),
        };
    }

    let storage = service.get_storage(request)?;

    match storage.update_user(user_id, update_data).await {
        Ok(Some(user)) => {
            service.invalidate_user_sessions(request, user_id).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                UserResponse { user },
                "Usuário atualizado com sucesso",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "Usuário não encontrado",
        ))),
        Err(e) if e.is_conflict() => Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::UserEmailAlreadyExists,
            "E-mail já cadastrado",
        ))),
        Err(e) => Ok(internal_error("Falha ao atualizar usuário", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_present_fields_are_validated() {
        assert!(validate_user_update(&UpdateUserRequest::default()).is_ok());

        let bad_email = UpdateUserRequest {
            email: Some("sem-arroba".to_string()),
            ..Default::default()
        };
        assert_eq!(
            validate_user_update(&bad_email).unwrap_err().0,
            ErrorCode::UserInvalidData
        );

        let weak = UpdateUserRequest {
            password: Some("123".to_string()),
            ..Default::default()
        };
        assert_eq!(
            validate_user_update(&weak).unwrap_err().0,
            ErrorCode::UserPasswordInvalid
        );
    }
}
