use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::define_string_enum;

define_string_enum! {
    ProcessUpdateKind, "../frontend/src/types/generated/process_update.ts" {
        Progress => "progress",
        Note => "note",
        Document => "document",
        Hearing => "hearing",
    }
}

/// Entrada na linha do tempo do processo
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/process_update.ts")]
pub struct ProcessUpdate {
    pub id: i64,
    pub process_id: i64,
    pub author_id: i64,
    pub author_name: Option<String>,
    pub kind: ProcessUpdateKind,
    pub title: String,
    pub content: Option<String>,
    pub file_token: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
