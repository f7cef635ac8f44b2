use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::appointments::requests::{
    AppointmentListParams, CalendarSyncRequest, CreateAppointmentRequest, UpdateAppointmentRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::AppointmentService;
use crate::utils::SafeIDI64;

static APPOINTMENT_SERVICE: Lazy<AppointmentService> = Lazy::new(AppointmentService::new_lazy);

pub async fn list_appointments(
    req: HttpRequest,
    query: web::Query<AppointmentListParams>,
) -> ActixResult<HttpResponse> {
    APPOINTMENT_SERVICE
        .list_appointments(&req, query.into_inner())
        .await
}

pub async fn create_appointment(
    req: HttpRequest,
    body: web::Json<CreateAppointmentRequest>,
) -> ActixResult<HttpResponse> {
    APPOINTMENT_SERVICE
        .create_appointment(&req, body.into_inner())
        .await
}

pub async fn get_appointment(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    APPOINTMENT_SERVICE.get_appointment(&req, path.0).await
}

pub async fn update_appointment(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateAppointmentRequest>,
) -> ActixResult<HttpResponse> {
    APPOINTMENT_SERVICE
        .update_appointment(&req, path.0, body.into_inner())
        .await
}

pub async fn cancel_appointment(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    APPOINTMENT_SERVICE.cancel_appointment(&req, path.0).await
}

pub async fn pull_appointment(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    APPOINTMENT_SERVICE.pull_appointment(&req, path.0).await
}

pub async fn sync_range(
    req: HttpRequest,
    body: Option<web::Json<CalendarSyncRequest>>,
) -> ActixResult<HttpResponse> {
    let range = body.map(|b| b.into_inner()).unwrap_or_default();
    APPOINTMENT_SERVICE.sync_range(&req, range).await
}

pub fn configure_appointment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/appointments")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_appointments))
                    // assistidos não criam agendamentos
                    .route(
                        web::post()
                            .to(create_appointment)
                            .wrap(middlewares::RequireRole::new_any(UserRole::member_roles())),
                    ),
            )
            .service(
                web::resource("/sync")
                    .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles()))
                    .route(web::post().to(sync_range)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_appointment))
                    .route(
                        web::put()
                            .to(update_appointment)
                            .wrap(middlewares::RequireRole::new_any(UserRole::member_roles())),
                    )
                    .route(
                        web::delete()
                            .to(cancel_appointment)
                            .wrap(middlewares::RequireRole::new_any(UserRole::member_roles())),
                    ),
            )
            .service(
                web::resource("/{id}/sync")
                    .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles()))
                    .route(web::post().to(pull_appointment)),
            ),
    );
}
