use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

/// Resultado de uma leitura no cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
    /// O backend falhou ao ler; trate como ausente
    ExistsButNoValue,
}

#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;

    /// `ttl` em segundos; 0 usa o TTL padrão do backend
    async fn insert_raw(&self, key: String, value: String, ttl: u64);

    async fn remove(&self, key: &str);

    /// Chaves vivas (sem o prefixo do backend)
    async fn keys(&self) -> Vec<String>;

    /// Remove todas as chaves que começam com `prefix`; devolve quantas saíram
    async fn remove_prefix(&self, prefix: &str) -> usize {
        let matching: Vec<String> = self
            .keys()
            .await
            .into_iter()
            .filter(|key| key.starts_with(prefix))
            .collect();
        for key in &matching {
            self.remove(key).await;
        }
        matching.len()
    }

    async fn invalidate_all(&self);
}

impl dyn ObjectCache {
    /// Leitura tipada (JSON); valores corrompidos são descartados
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.get_raw(key).await {
            CacheResult::Found(json) => match serde_json::from_str(&json) {
                Ok(value) => Some(value),
                Err(e) => {
                    debug!("Descartando entrada de cache ilegível '{}': {}", key, e);
                    self.remove(key).await;
                    None
                }
            },
            _ => None,
        }
    }

    pub async fn insert<T: Serialize + ?Sized>(&self, key: String, value: &T, ttl: u64) {
        match serde_json::to_string(value) {
            Ok(json) => self.insert_raw(key, json, ttl).await,
            Err(e) => debug!("Falha ao serializar entrada de cache '{}': {}", key, e),
        }
    }
}
