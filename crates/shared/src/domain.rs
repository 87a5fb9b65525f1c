use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Business identifier issued by the directory service (e.g. "USR-1042").
/// Kept as text because operators search on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserType {
    Buyer,
    Seller,
}

impl UserType {
    pub const ALL: [UserType; 2] = [UserType::Buyer, UserType::Seller];

    pub fn label(self) -> &'static str {
        match self {
            UserType::Buyer => "Buyer",
            UserType::Seller => "Seller",
        }
    }
}

/// Verification pipeline position. The wire labels (including the embedded
/// space in "under verification") are dictated by the directory service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RegistrationStatus {
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "under verification")]
    UnderVerification,
    #[serde(rename = "approved")]
    Approved,
    #[serde(rename = "rejected")]
    Rejected,
}

impl RegistrationStatus {
    pub const ALL: [RegistrationStatus; 4] = [
        RegistrationStatus::Pending,
        RegistrationStatus::UnderVerification,
        RegistrationStatus::Approved,
        RegistrationStatus::Rejected,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RegistrationStatus::Pending => "pending",
            RegistrationStatus::UnderVerification => "under verification",
            RegistrationStatus::Approved => "approved",
            RegistrationStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown registration status: {0:?}")]
pub struct StatusParseError(pub String);

impl FromStr for RegistrationStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.label() == normalized)
            .ok_or_else(|| StatusParseError(s.to_string()))
    }
}

/// Activity counters reported alongside each user record. Fields default to
/// zero because the service omits them for accounts with no activity yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActivityStats {
    pub bids_count: u32,
    pub auctions_count: u32,
    pub active_auctions_count: u32,
    pub won_auctions_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentRefs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aadhar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub user_type: UserType,
    pub registration_status: RegistrationStatus,
    #[serde(default)]
    pub documents: DocumentRefs,
    #[serde(default)]
    pub activity_stats: ActivityStats,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_labels_round_trip() {
        for status in RegistrationStatus::ALL {
            let json = serde_json::to_string(&status).expect("serialize");
            assert_eq!(json, format!("{:?}", status.label()));
            let back: RegistrationStatus = serde_json::from_str(&json).expect("deserialize");
            assert_eq!(back, status);
        }
    }

    #[test]
    fn status_parse_accepts_service_labels_only() {
        assert_eq!(
            "under verification".parse::<RegistrationStatus>(),
            Ok(RegistrationStatus::UnderVerification)
        );
        assert_eq!(
            " Approved ".parse::<RegistrationStatus>(),
            Ok(RegistrationStatus::Approved)
        );
        assert_eq!(
            "banned".parse::<RegistrationStatus>(),
            Err(StatusParseError("banned".to_string()))
        );
    }

    #[test]
    fn user_record_parses_service_payload() {
        let payload = r#"{
            "userId": "USR-1042",
            "name": "Asha Verma",
            "email": "asha@example.com",
            "phone": "+91-98100-00000",
            "city": "Pune",
            "userType": "Seller",
            "registrationStatus": "under verification",
            "documents": { "pan": "https://files.example.com/pan/1042" },
            "activityStats": { "bidsCount": 3, "activeAuctionsCount": 1 },
            "createdAt": "2024-05-12T08:30:00Z"
        }"#;

        let user: UserRecord = serde_json::from_str(payload).expect("parse user");
        assert_eq!(user.user_id, UserId::from("USR-1042"));
        assert_eq!(user.user_type, UserType::Seller);
        assert_eq!(
            user.registration_status,
            RegistrationStatus::UnderVerification
        );
        assert_eq!(user.documents.pan.as_deref(), Some("https://files.example.com/pan/1042"));
        assert_eq!(user.documents.aadhar, None);
        assert_eq!(user.activity_stats.bids_count, 3);
        assert_eq!(user.activity_stats.won_auctions_count, 0);
    }
}
