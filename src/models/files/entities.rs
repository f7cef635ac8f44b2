use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Metadados de um arquivo anexado
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/file.ts")]
pub struct FileAttachment {
    pub token: String,
    pub original_name: String,
    /// Nome no disco, dentro de `upload.dir`
    #[serde(skip_serializing, default)]
    #[ts(skip)]
    pub stored_name: String,
    pub file_size: i64,
    pub content_type: String,
    pub process_id: Option<i64>,
    pub user_id: i64,
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}

/// Dados para gravar um novo arquivo
#[derive(Debug, Clone)]
pub struct NewFile {
    pub token: String,
    pub original_name: String,
    pub stored_name: String,
    pub file_size: i64,
    pub content_type: String,
    pub process_id: Option<i64>,
    pub user_id: i64,
}
