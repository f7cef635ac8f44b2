/*!
 * Controle de acesso ao processo
 *
 * Deve vir depois do `RequireJWT`. Lê `process_id` do caminho e libera
 * administradores, alunos e professores vinculados e o assistido do processo.
 * O vínculo encontrado fica nas extensões da requisição.
 *
 * ```rust,ignore
 * web::scope("/{process_id}")
 *     .wrap(RequireProcessAccess)
 *     .route("/updates", web::get().to(list_updates))
 * ```
 *
 * Operações de gestão (editar, excluir, vincular alunos) conferem
 * `RequireProcessAccess::is_manager` no handler.
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, error};

use crate::{
    models::{
        ErrorCode,
        processes::entities::ProcessMembership,
        users::entities::{User, UserRole},
    },
    storage::Storage,
};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireProcessAccess;

impl<S, B> Transform<S, ServiceRequest> for RequireProcessAccess
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireProcessAccessMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireProcessAccessMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireProcessAccessMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireProcessAccessMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();

        Box::pin(async move {
            // 1. usuário autenticado
            let user = req.extensions().get::<User>().cloned();
            let Some(user) = user else {
                return Ok(req.into_response(
                    create_error_response(
                        StatusCode::UNAUTHORIZED,
                        ErrorCode::Unauthorized,
                        "Autenticação necessária",
                    )
                    .map_into_right_body(),
                ));
            };

            // 2. process_id do caminho
            let process_id = req
                .match_info()
                .get("process_id")
                .and_then(|s| s.parse::<i64>().ok())
                .filter(|id| *id > 0);
            let Some(process_id) = process_id else {
                return Ok(req.into_response(
                    create_error_response(
                        StatusCode::BAD_REQUEST,
                        ErrorCode::BadRequest,
                        "process_id ausente ou inválido",
                    )
                    .map_into_right_body(),
                ));
            };

            // 3. vínculo (None = processo inexistente)
            let membership = match load_membership(&req, process_id, user.id).await {
                Ok(Some(membership)) => membership,
                Ok(None) => {
                    return Ok(req.into_response(
                        create_error_response(
                            StatusCode::NOT_FOUND,
                            ErrorCode::ProcessNotFound,
                            "Processo não encontrado",
                        )
                        .map_into_right_body(),
                    ));
                }
                Err(message) => {
                    error!("Process access check failed: {}", message);
                    return Ok(req.into_response(
                        create_error_response(
                            StatusCode::INTERNAL_SERVER_ERROR,
                            ErrorCode::InternalServerError,
                            "Erro ao verificar acesso ao processo",
                        )
                        .map_into_right_body(),
                    ));
                }
            };

            // 4. administrador sempre passa
            if user.role == UserRole::Admin || membership.any() {
                debug!("User {} granted access to process {}", user.id, process_id);
                req.extensions_mut().insert(membership);
                Ok(srv.call(req).await?.map_into_left_body())
            } else {
                Ok(req.into_response(
                    create_error_response(
                        StatusCode::FORBIDDEN,
                        ErrorCode::ProcessAccessDenied,
                        "Sem acesso a este processo",
                    )
                    .map_into_right_body(),
                ))
            }
        })
    }
}

async fn load_membership(
    req: &ServiceRequest,
    process_id: i64,
    user_id: i64,
) -> Result<Option<ProcessMembership>, String> {
    let storage = req
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|s| s.get_ref().clone())
        .ok_or_else(|| "Storage not registered in app data".to_string())?;

    storage
        .get_process_membership(process_id, user_id)
        .await
        .map_err(|e| e.to_string())
}

impl RequireProcessAccess {
    /// Vínculo do usuário com o processo da rota
    pub fn extract_membership(req: &actix_web::HttpRequest) -> Option<ProcessMembership> {
        req.extensions().get::<ProcessMembership>().copied()
    }

    /// Administrador ou professor vinculado ao processo
    pub fn is_manager(user: &User, membership: Option<ProcessMembership>) -> bool {
        user.role == UserRole::Admin || membership.is_some_and(|m| m.is_professor)
    }

    /// Acesso de leitura, para recursos fora da árvore `/processes/{process_id}`
    pub fn has_access(user: &User, membership: Option<ProcessMembership>) -> bool {
        user.role == UserRole::Admin || membership.is_some_and(|m| m.any())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserStatus;

    fn user(role: UserRole) -> User {
        User {
            id: 7,
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
    fn test_manager_rules() {
        let professor = ProcessMembership {
            is_professor: true,
            ..Default::default()
        };
        let student = ProcessMembership {
            is_student: true,
            ..Default::default()
        };

        assert!(RequireProcessAccess::is_manager(&user(UserRole::Admin), None));
        assert!(RequireProcessAccess::is_manager(
            &user(UserRole::Professor),
            Some(professor)
        ));
        assert!(!RequireProcessAccess::is_manager(
            &user(UserRole::Professor),
            Some(ProcessMembership::default())
        ));
        assert!(!RequireProcessAccess::is_manager(&user(UserRole::Aluno), Some(student)));
    }

    #[test]
    fn test_access_rules() {
        let client = ProcessMembership {
            is_client: true,
            ..Default::default()
        };
        assert!(RequireProcessAccess::has_access(&user(UserRole::Usuario), Some(client)));
        assert!(!RequireProcessAccess::has_access(&user(UserRole::Aluno), None));
        assert!(RequireProcessAccess::has_access(&user(UserRole::Admin), None));
    }
}
