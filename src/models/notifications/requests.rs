use crate::models::common::{PaginationQuery, query::optional_bool};
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct NotificationListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    /// Somente não lidas
    #[serde(default, deserialize_with = "optional_bool")]
    #[ts(optional)]
    pub unread: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct NotificationListQuery {
    pub page: u64,
    pub size: u64,
    pub unread_only: bool,
}

impl From<NotificationListParams> for NotificationListQuery {
    fn from(params: NotificationListParams) -> Self {
        let (page, size) = params.pagination.normalized();
        Self {
            page,
            size,
            unread_only: params.unread.unwrap_or(false),
        }
    }
}
