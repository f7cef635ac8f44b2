pub mod appointments;
pub mod auth;
pub mod files;
pub mod notifications;
pub mod processes;
pub mod roles;
pub mod system;
pub mod users;

pub use appointments::configure_appointment_routes;
pub use auth::configure_auth_routes;
pub use files::configure_file_routes;
pub use notifications::configure_notification_routes;
pub use processes::configure_process_routes;
pub use roles::configure_role_routes;
pub use system::configure_system_routes;
pub use users::configure_user_routes;
