use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::cache::{ObjectCache, register::get_object_cache_plugin};
use crate::calendar::{CalendarProvider, create_calendar};
use crate::config::AppConfig;
use crate::errors::NpjError;
use crate::mailer::Mailer;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::CreateUserRequest;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::random_code::generate_random_password;

const DEFAULT_ADMIN_EMAIL: &str = "admin@npj.local";

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
    pub calendar: Arc<dyn CalendarProvider>,
    pub mailer: Arc<Mailer>,
}

async fn build_cache(name: &str) -> Option<Arc<dyn ObjectCache>> {
    let constructor = get_object_cache_plugin(name)?;
    match constructor().await {
        Ok(cache) => {
            warn!("Successfully created {} cache backend", name);
            Some(Arc::from(cache))
        }
        Err(e) => {
            warn!("Failed to create {} cache: {}", name, e);
            None
        }
    }
}

/// Backend configurado; se falhar ou não existir, o cache em memória
async fn create_cache() -> Result<Arc<dyn ObjectCache>, NpjError> {
    let cache_type = &AppConfig::get().cache.cache_type;
    warn!("Attempting to create {} cache backend", cache_type);

    if get_object_cache_plugin(cache_type).is_none() {
        warn!("Cache backend '{}' not found in registry", cache_type);
    }
    if let Some(cache) = build_cache(cache_type).await {
        return Ok(cache);
    }

    if cache_type != "moka" {
        warn!("Falling back to memory cache");
        if let Some(cache) = build_cache("moka").await {
            return Ok(cache);
        }
    }

    Err(NpjError::cache_plugin_not_found(format!(
        "No cache backend available (tried: {cache_type})"
    )))
}

/// Banco vazio ganha uma conta de coordenação
async fn seed_admin(storage: &Arc<dyn Storage>) {
    match storage.count_users().await {
        Ok(count) if count > 0 => {
            debug!("Database already has {} user(s), skipping admin seed", count);
            return;
        }
        Ok(_) => info!("No users found in database, creating default admin account..."),
        Err(e) => {
            warn!("Failed to count users: {}, skipping admin seed", e);
            return;
        }
    }

    let email = std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| DEFAULT_ADMIN_EMAIL.to_string());
    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
        let pwd = generate_random_password(16);
        warn!("==========================================================");
        warn!("  ADMIN PASSWORD NOT SET - USING GENERATED PASSWORD");
        warn!("  Generated admin password: {}", pwd);
        warn!("  Please save this password or set ADMIN_PASSWORD env var");
        warn!("==========================================================");
        pwd
    });

    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Failed to hash admin password: {}, skipping admin seed", e);
            return;
        }
    };

    let admin_request = CreateUserRequest {
        name: "Coordenação NPJ".to_string(),
        email: email.to_lowercase(),
        password: password_hash,
        phone: None,
        registration: None,
        role: UserRole::Admin,
    };

    match storage.create_user(admin_request).await {
        Ok(user) => info!(
            "Default admin account created (ID: {}, email: {})",
            user.id, user.email
        ),
        Err(e) => warn!("Failed to create admin account: {}", e),
    }
}

/// Storage, cache, agenda e e-mail prontos para o servidor
pub async fn prepare_server_startup() -> Result<StartupContext, NpjError> {
    let config = AppConfig::get();

    // ring como provedor de criptografia do rustls (redis, SMTP, Google)
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }

    if cfg!(debug_assertions) {
        crate::cache::register::debug_object_cache_registry();
    }

    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    seed_admin(&storage).await;

    let cache = create_cache().await?;
    warn!("Cache backend initialized");

    let calendar = create_calendar(&config.google);

    let mailer = match Mailer::new(&config.email, &config.app.system_name) {
        Ok(mailer) => mailer,
        Err(e) => {
            warn!("Email delivery unavailable: {}", e);
            Mailer::disabled(&config.app.system_name)
        }
    };

    Ok(StartupContext {
        storage,
        cache,
        calendar,
        mailer: Arc::new(mailer),
    })
}
