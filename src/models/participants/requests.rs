use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/participant.ts")]
pub struct AssignParticipantRequest {
    pub user_id: i64,
}
