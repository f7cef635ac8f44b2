use super::entities::ProcessUpdateKind;
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/process_update.ts")]
pub struct CreateProcessUpdateRequest {
    #[serde(default = "default_kind")]
    pub kind: ProcessUpdateKind,
    pub title: String,
    pub content: Option<String>,
    /// Arquivo já enviado por /files/upload
    pub file_token: Option<String>,
}

fn default_kind() -> ProcessUpdateKind {
    ProcessUpdateKind::Note
}
