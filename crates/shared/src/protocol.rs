use serde::{Deserialize, Serialize};

use crate::domain::{RegistrationStatus, UserRecord};

/// Payload of `GET /users/list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListUsersResponse {
    pub count: usize,
    pub users: Vec<UserRecord>,
}

/// Body of `PATCH /users/status/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub registration_status: RegistrationStatus,
}

/// Acknowledgement returned by the status update endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusUpdateAck {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Body of `POST /admin/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminLoginRequest {
    pub admin_id: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    pub admin_id: String,
    pub name: String,
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminLoginResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub admin: AdminProfile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySlice {
    pub name: String,
    pub items: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpcomingAuction {
    pub title: String,
    pub time: String,
    pub date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentBid {
    pub user: String,
    pub item: String,
    pub amount: String,
    pub time: String,
}

/// Payload of `GET /admin/dashboard/overview`. All sections default so a
/// partial overview from an older server still renders.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardOverview {
    pub live_auctions: u32,
    pub total_bids: u32,
    pub items_listed: u32,
    pub successful_sales: u32,
    pub categories: Vec<CategorySlice>,
    pub upcoming_auctions: Vec<UpcomingAuction>,
    pub recent_bids: Vec<RecentBid>,
}
