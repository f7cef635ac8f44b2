use config::{Config, ConfigError, Environment, File};
use std::sync::OnceLock;

use super::AppConfig;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

impl AppConfig {
    /// Carrega a configuração
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(
                File::with_name(&format!(
                    "config.{}",
                    std::env::var("APP_ENV").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            .add_source(
                Environment::with_prefix("NPJ")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        // Variáveis de ambiente conhecidas
        builder = builder
            .set_override_option("app.environment", std::env::var("APP_ENV").ok())?
            .set_override_option("app.log_level", std::env::var("RUST_LOG").ok())?
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
            .set_override_option("server.unix_socket_path", std::env::var("UNIX_SOCKET").ok())?
            .set_override_option("server.workers", std::env::var("CPU_COUNT").ok())?
            .set_override_option("jwt.secret", std::env::var("JWT_SECRET").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("cache.redis.url", std::env::var("REDIS_URL").ok())?
            .set_override_option("google.client_id", std::env::var("GOOGLE_CLIENT_ID").ok())?
            .set_override_option(
                "google.client_secret",
                std::env::var("GOOGLE_CLIENT_SECRET").ok(),
            )?
            .set_override_option(
                "google.refresh_token",
                std::env::var("GOOGLE_REFRESH_TOKEN").ok(),
            )?
            .set_override_option(
                "google.calendar_id",
                std::env::var("GOOGLE_CALENDAR_ID").ok(),
            )?
            .set_override_option("email.smtp_host", std::env::var("SMTP_HOST").ok())?
            .set_override_option("email.smtp_username", std::env::var("SMTP_USERNAME").ok())?
            .set_override_option("email.smtp_password", std::env::var("SMTP_PASSWORD").ok())?;

        let config = builder.build()?;
        let mut app_config: AppConfig = config.try_deserialize()?;

        if app_config.server.workers == 0 {
            app_config.server.workers = num_cpus::get().min(app_config.server.max_workers);
        }

        Ok(app_config)
    }

    /// Instância global
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Falha ao carregar a configuração: {e}");
                std::process::exit(1);
            })
        })
    }

    /// Inicializa a configuração (na subida da aplicação)
    pub fn init() -> Result<(), ConfigError> {
        Self::init_with(Self::load()?)
    }

    /// Inicializa com uma configuração já montada (usado nos testes)
    pub fn init_with(config: AppConfig) -> Result<(), ConfigError> {
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuração já inicializada".to_string()))
    }

    pub fn is_production(&self) -> bool {
        self.app.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }

    /// Endereço de bind do servidor
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Caminho do socket Unix, se configurado
    #[cfg(unix)]
    pub fn unix_socket_path(&self) -> Option<&str> {
        if self.server.unix_socket_path.is_empty() {
            None
        } else {
            Some(&self.server.unix_socket_path)
        }
    }
}
