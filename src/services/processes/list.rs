use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ProcessService;
use crate::models::ApiResponse;
use crate::models::processes::entities::ProcessScope;
use crate::models::processes::requests::{ProcessListParams, ProcessListQuery};
use crate::models::users::entities::{User, UserRole};
use crate::services::{current_user, internal_error};

/// Quais processos cada perfil enxerga na listagem
pub(crate) fn scope_for(user: &User) -> ProcessScope {
    match user.role {
        UserRole::Admin => ProcessScope::All,
        UserRole::Usuario => ProcessScope::Client(user.id),
        UserRole::Professor | UserRole::Aluno => ProcessScope::Participant(user.id),
    }
}

pub async fn list_processes(
    service: &ProcessService,
    request: &HttpRequest,
    query: ProcessListParams,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    let query = ProcessListQuery::from_params(query, scope_for(&user));
    match storage.list_processes_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Processos listados com sucesso",
        ))),
        Err(e) => Ok(internal_error("Falha ao listar processos", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserStatus;

    fn user(id: i64, role: UserRole) -> User {
        User {
            id,
            name: "Teste".to_string(),
            email: "teste@npj.local".to_string(),
            password_hash: String::new(),
            phone: None,
            registration: None,
            role,
            status: UserStatus::Active,
            last_login: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_scope_by_role() {
        assert_eq!(scope_for(&user(1, UserRole::Admin)), ProcessScope::All);
        assert_eq!(
            scope_for(&user(2, UserRole::Professor)),
            ProcessScope::Participant(2)
        );
        assert_eq!(scope_for(&user(3, UserRole::Aluno)), ProcessScope::Participant(3));
        assert_eq!(scope_for(&user(4, UserRole::Usuario)), ProcessScope::Client(4));
    }
}
