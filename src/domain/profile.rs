use serde::{Deserialize, Serialize};

/// Snapshot of an account's profile header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Option<u64>,
    pub username: Option<String>,
    pub full_name: String,
    pub biography: String,
    pub follower_count: u64,
    pub following_count: u64,
    pub media_count: u64,
    pub is_business: bool,
    pub is_verified: bool,
    pub is_private: bool,
    pub category: Option<String>,
    pub external_url: Option<String>,
    pub public_email: Option<String>,
    pub contact_phone_number: Option<String>,
    /// Highest-resolution picture, resolved from the HD fields only.
    pub hd_profile_pic_url: Option<String>,
    pub profile_pic_url: Option<String>,
}

/// The account every operation of a session is aimed at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub username: String,
    pub id: u64,
    pub is_private: bool,
    pub is_following: bool,
}
