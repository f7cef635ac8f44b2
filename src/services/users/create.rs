use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::UserService;
use crate::models::{
    ApiResponse, ErrorCode,
    users::{requests::CreateUserRequest, responses::UserResponse},
};
use crate::services::internal_error;
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_name, validate_password, validate_phone};

/// Confere os campos de cadastro; devolve a mensagem do primeiro erro
pub(crate) fn validate_new_user(
    name: &str,
    email: &str,
    password: &str,
    phone: Option<&str>,
) -> Result<(), (ErrorCode, String)> {
    validate_name(name).map_err(|m| (ErrorCode::UserInvalidData, m.to_string()))?;
    validate_email(email).map_err(|m| (ErrorCode::UserInvalidData, m.to_string()))?;
    if let Some(phone) = phone.filter(|p| !p.is_empty()) {
        validate_phone(phone).map_err(|m| (ErrorCode::UserInvalidData, m.to_string()))?;
    }
    let password_check = validate_password(password);
    if !password_check.is_valid {
        return Err((ErrorCode::UserPasswordInvalid, password_check.error_message()));
    }
    Ok(())
}

pub async fn create_user(
    service: &UserService,
    mut user_data: CreateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    user_data.name = user_data.name.trim().to_string();
    user_data.email = user_data.email.trim().to_lowercase();

    if let Err((code, msg)) = validate_new_user(
        &user_data.name,
        &user_data.email,
        &user_data.password,
        user_data.phone.as_deref(),
    ) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(code, msg)));
    }

    user_data.password = match hash_password(&user_data.password) {
        Ok(hash) => hash,
        Err(e) => return Ok(internal_error("Falha ao processar a senha", e)),
    };

    let storage = service.get_storage(request)?;

    match storage.create_user(user_data).await {
        Ok(user) => {
            info!("User {} created with role {}", user.id, user.role);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                UserResponse { user },
                "Usuário criado com sucesso",
            )))
        }
        Err(e) if e.is_conflict() => Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::UserEmailAlreadyExists,
            "E-mail já cadastrado",
        ))),
        Err(e) => Ok(internal_error("Falha ao criar usuário", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_new_user() {
        assert!(validate_new_user("Maria Silva", "maria@npj.local", "Senha@123", None).is_ok());

        let (code, _) = validate_new_user("M", "maria@npj.local", "Senha@123", None).unwrap_err();
        assert_eq!(code, ErrorCode::UserInvalidData);

        let (code, _) =
            validate_new_user("Maria Silva", "maria@npj.local", "fraca", None).unwrap_err();
        assert_eq!(code, ErrorCode::UserPasswordInvalid);
    }
}
