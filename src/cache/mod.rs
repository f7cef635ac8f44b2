//! Cache de requisições
//!
//! Backends registrados por nome (`moka`, `redis`) e escolhidos na subida
//! conforme `cache.type`.

pub mod object_cache;
pub mod register;
pub mod traits;

pub use traits::{CacheResult, ObjectCache};

/// Prefixos de chave usados pela aplicação
pub mod keys {
    /// Usuário autenticado por token: `auth:{user_id}:{token}`
    pub fn auth(user_id: i64, token: &str) -> String {
        format!("auth:{user_id}:{token}")
    }

    pub fn auth_prefix(user_id: i64) -> String {
        format!("auth:{user_id}:")
    }

    pub const APPOINTMENTS_PREFIX: &str = "appointments:";

    pub fn appointment_list(user_id: i64, query: &str) -> String {
        format!("appointments:list:{user_id}:{query}")
    }

    pub fn appointment_item(id: i64) -> String {
        format!("appointments:item:{id}")
    }
}

/// Registra um backend de cache no registro global durante a inicialização do binário
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:literal, $ty:ty) => {
        #[ctor::ctor]
        unsafe fn __register_object_cache_plugin() {
            $crate::cache::register::register_object_cache_plugin(
                $name,
                std::sync::Arc::new(|| {
                    Box::pin(async {
                        <$ty>::new()
                            .map(|cache| Box::new(cache) as Box<dyn $crate::cache::ObjectCache>)
                            .map_err($crate::errors::NpjError::cache_connection)
                    })
                }),
            );
        }
    };
}
