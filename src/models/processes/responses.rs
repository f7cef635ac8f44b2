use super::entities::Process;
use crate::models::common::PaginationInfo;
use crate::models::participants::entities::Participant;
use crate::models::users::entities::User;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/process.ts")]
pub struct ProcessListResponse {
    pub items: Vec<Process>,
    pub pagination: PaginationInfo,
}

/// Detalhe com assistido e equipe
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/process.ts")]
pub struct ProcessDetailResponse {
    pub process: Process,
    pub client: Option<User>,
    pub students: Vec<Participant>,
    pub professors: Vec<Participant>,
}
