use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::participants::entities::ParticipantKind;
use crate::models::participants::requests::AssignParticipantRequest;
use crate::models::process_updates::requests::CreateProcessUpdateRequest;
use crate::models::processes::requests::{
    CreateProcessRequest, ProcessListParams, UpdateProcessRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::{FileService, ParticipantService, ProcessService, ProcessUpdateService};
use crate::utils::{SafeProcessIdI64, SafeUpdateIdI64, SafeUserIdI64};

static PROCESS_SERVICE: Lazy<ProcessService> = Lazy::new(ProcessService::new_lazy);
static PARTICIPANT_SERVICE: Lazy<ParticipantService> = Lazy::new(ParticipantService::new_lazy);
static PROCESS_UPDATE_SERVICE: Lazy<ProcessUpdateService> =
    Lazy::new(ProcessUpdateService::new_lazy);
static FILE_SERVICE: Lazy<FileService> = Lazy::new(FileService::new_lazy);

// Processos
pub async fn list_processes(
    req: HttpRequest,
    query: web::Query<ProcessListParams>,
) -> ActixResult<HttpResponse> {
    PROCESS_SERVICE
        .list_processes(&req, query.into_inner())
        .await
}

pub async fn create_process(
    req: HttpRequest,
    body: web::Json<CreateProcessRequest>,
) -> ActixResult<HttpResponse> {
    PROCESS_SERVICE.create_process(&req, body.into_inner()).await
}

pub async fn get_process(req: HttpRequest, path: SafeProcessIdI64) -> ActixResult<HttpResponse> {
    PROCESS_SERVICE.get_process(&req, path.0).await
}

pub async fn update_process(
    req: HttpRequest,
    path: SafeProcessIdI64,
    body: web::Json<UpdateProcessRequest>,
) -> ActixResult<HttpResponse> {
    PROCESS_SERVICE
        .update_process(&req, path.0, body.into_inner())
        .await
}

pub async fn delete_process(req: HttpRequest, path: SafeProcessIdI64) -> ActixResult<HttpResponse> {
    PROCESS_SERVICE.delete_process(&req, path.0).await
}

// Equipe
pub async fn list_students(req: HttpRequest, path: SafeProcessIdI64) -> ActixResult<HttpResponse> {
    PARTICIPANT_SERVICE
        .list_participants(&req, path.0, ParticipantKind::Student)
        .await
}

pub async fn assign_student(
    req: HttpRequest,
    path: SafeProcessIdI64,
    body: web::Json<AssignParticipantRequest>,
) -> ActixResult<HttpResponse> {
    PARTICIPANT_SERVICE
        .assign_participant(&req, path.0, body.user_id, ParticipantKind::Student)
        .await
}

pub async fn remove_student(
    req: HttpRequest,
    process: SafeProcessIdI64,
    user: SafeUserIdI64,
) -> ActixResult<HttpResponse> {
    PARTICIPANT_SERVICE
        .remove_participant(&req, process.0, user.0, ParticipantKind::Student)
        .await
}

pub async fn list_professors(
    req: HttpRequest,
    path: SafeProcessIdI64,
) -> ActixResult<HttpResponse> {
    PARTICIPANT_SERVICE
        .list_participants(&req, path.0, ParticipantKind::Professor)
        .await
}

pub async fn assign_professor(
    req: HttpRequest,
    path: SafeProcessIdI64,
    body: web::Json<AssignParticipantRequest>,
) -> ActixResult<HttpResponse> {
    PARTICIPANT_SERVICE
        .assign_participant(&req, path.0, body.user_id, ParticipantKind::Professor)
        .await
}

pub async fn remove_professor(
    req: HttpRequest,
    process: SafeProcessIdI64,
    user: SafeUserIdI64,
) -> ActixResult<HttpResponse> {
    PARTICIPANT_SERVICE
        .remove_participant(&req, process.0, user.0, ParticipantKind::Professor)
        .await
}

// Linha do tempo
pub async fn list_updates(req: HttpRequest, path: SafeProcessIdI64) -> ActixResult<HttpResponse> {
    PROCESS_UPDATE_SERVICE.list_updates(&req, path.0).await
}

pub async fn create_update(
    req: HttpRequest,
    path: SafeProcessIdI64,
    body: web::Json<CreateProcessUpdateRequest>,
) -> ActixResult<HttpResponse> {
    PROCESS_UPDATE_SERVICE
        .create_update(&req, path.0, body.into_inner())
        .await
}

pub async fn delete_update(
    req: HttpRequest,
    process: SafeProcessIdI64,
    update: SafeUpdateIdI64,
) -> ActixResult<HttpResponse> {
    PROCESS_UPDATE_SERVICE
        .delete_update(&req, process.0, update.0)
        .await
}

// Anexos
pub async fn list_files(req: HttpRequest, path: SafeProcessIdI64) -> ActixResult<HttpResponse> {
    FILE_SERVICE.list_process_files(&req, path.0).await
}

pub fn configure_process_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/processes")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // cada perfil vê só os seus processos
                    .route(web::get().to(list_processes))
                    .route(
                        web::post()
                            .to(create_process)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    ),
            )
            .service(
                // acesso ao processo conferido aqui; gestão conferida no serviço
                web::scope("/{process_id}")
                    .wrap(middlewares::RequireProcessAccess)
                    .service(
                        web::resource("")
                            .route(web::get().to(get_process))
                            .route(web::put().to(update_process))
                            .route(web::delete().to(delete_process)),
                    )
                    .service(
                        web::resource("/students")
                            .route(web::get().to(list_students))
                            .route(web::post().to(assign_student)),
                    )
                    .route("/students/{user_id}", web::delete().to(remove_student))
                    .service(
                        web::resource("/professors")
                            .route(web::get().to(list_professors))
                            .route(web::post().to(assign_professor)),
                    )
                    .route("/professors/{user_id}", web::delete().to(remove_professor))
                    .service(
                        web::resource("/updates")
                            .route(web::get().to(list_updates))
                            .route(web::post().to(create_update)),
                    )
                    .route("/updates/{update_id}", web::delete().to(delete_update))
                    .route("/files", web::get().to(list_files)),
            ),
    );
}
