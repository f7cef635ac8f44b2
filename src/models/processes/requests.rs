use super::entities::{ProcessScope, ProcessStatus};
use crate::models::common::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/process.ts")]
pub struct ProcessListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub status: Option<ProcessStatus>,
    /// Busca por número ou assunto
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/process.ts")]
pub struct CreateProcessRequest {
    pub number: String,
    pub subject: String,
    pub description: Option<String>,
    pub status: Option<ProcessStatus>,
    pub court: Option<String>,
    pub court_system: Option<String>,
    pub phase: Option<String>,
    pub client_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/process.ts")]
pub struct UpdateProcessRequest {
    pub number: Option<String>,
    pub subject: Option<String>,
    pub description: Option<String>,
    pub status: Option<ProcessStatus>,
    pub court: Option<String>,
    pub court_system: Option<String>,
    pub phase: Option<String>,
    pub client_id: Option<i64>,
}

/// Filtros para a camada de armazenamento
#[derive(Debug, Clone)]
pub struct ProcessListQuery {
    pub page: u64,
    pub size: u64,
    pub scope: ProcessScope,
    pub status: Option<ProcessStatus>,
    pub search: Option<String>,
}

impl ProcessListQuery {
    pub fn from_params(params: ProcessListParams, scope: ProcessScope) -> Self {
        let (page, size) = params.pagination.normalized();
        Self {
            page,
            size,
            scope,
            status: params.status,
            search: params.search.filter(|s| !s.trim().is_empty()),
        }
    }
}
