use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SystemService;
use crate::calendar::CalendarProvider;
use crate::mailer::Mailer;
use crate::models::ApiResponse;
use crate::models::system::responses::SystemSettingsResponse;
use crate::services::app_state;

/// Configuração pública (somente leitura)
pub async fn get_settings(
    service: &SystemService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let config = service.get_config();

    // reflete o que de fato subiu, não só o arquivo de configuração
    let calendar_enabled = app_state::<dyn CalendarProvider>(request, "Calendar")
        .map(|calendar| calendar.is_enabled())
        .unwrap_or(false);
    let email_enabled = app_state::<Mailer>(request, "Mailer")
        .map(|mailer| mailer.is_enabled())
        .unwrap_or(false);

    let response = SystemSettingsResponse {
        system_name: config.app.system_name.clone(),
        environment: config.app.environment.clone(),
        max_file_size: config.upload.max_size as u64,
        allowed_file_types: config.upload.allowed_types.clone(),
        calendar_enabled,
        email_enabled,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Configurações do sistema")))
}
