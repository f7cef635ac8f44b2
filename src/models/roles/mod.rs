use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Perfil cadastrado na tabela `roles`
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/role.ts")]
pub struct Role {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/role.ts")]
pub struct RoleListResponse {
    pub items: Vec<Role>,
}
