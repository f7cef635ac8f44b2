pub mod appointments;
pub mod auth;
pub mod files;
pub mod notifications;
pub mod participants;
pub mod process_updates;
pub mod processes;
pub mod roles;
pub mod system;
pub mod users;

pub use appointments::AppointmentService;
pub use auth::AuthService;
pub use files::FileService;
pub use notifications::NotificationService;
pub use participants::ParticipantService;
pub use process_updates::ProcessUpdateService;
pub use processes::ProcessService;
pub use roles::RoleService;
pub use system::SystemService;
pub use users::UserService;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, error, web};
use std::sync::Arc;
use tracing::error;

use crate::cache::{ObjectCache, keys};
use crate::middlewares::{RequireJWT, RequireProcessAccess};
use crate::models::{ApiResponse, ErrorCode, users::entities::User};

/// Dependência registrada com `App::app_data(web::Data::new(Arc<T>))`
pub(crate) fn app_state<T: ?Sized + 'static>(
    request: &HttpRequest,
    name: &'static str,
) -> ActixResult<Arc<T>> {
    request
        .app_data::<web::Data<Arc<T>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| {
            error!("{} not registered in app data", name);
            error::ErrorInternalServerError(format!("{name} indisponível"))
        })
}

/// Usuário autenticado; rotas sem `RequireJWT` recebem 401
pub(crate) fn current_user(request: &HttpRequest) -> Result<User, HttpResponse> {
    RequireJWT::extract_user_claims(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Autenticação necessária",
        ))
    })
}

/// Listas de agendamentos em cache dependem dos vínculos com processos
pub(crate) async fn invalidate_appointment_cache(request: &HttpRequest) {
    if let Ok(cache) = app_state::<dyn ObjectCache>(request, "Cache") {
        cache.remove_prefix(keys::APPOINTMENTS_PREFIX).await;
    }
}

/// 500 com o detalhe só no log
pub(crate) fn internal_error(context: &str, err: impl std::fmt::Display) -> HttpResponse {
    error!("{}: {}", context, err);
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::InternalServerError,
        context.to_string(),
    ))
}

/// Administrador ou professor do processo da rota; os demais recebem 403
pub(crate) fn require_manager(request: &HttpRequest, user: &User) -> Result<(), HttpResponse> {
    let membership = RequireProcessAccess::extract_membership(request);
    if RequireProcessAccess::is_manager(user, membership) {
        Ok(())
    } else {
        Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::ProcessAccessDenied,
            "Apenas o professor responsável ou a coordenação podem alterar este processo",
        )))
    }
}
