use serde::{Deserialize, Serialize};

/// Reference to an account as it appears inside comments, rosters and tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: Option<u64>,
    pub username: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_private: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_verified: Option<bool>,
}

/// Key used to decide whether two references name the same account.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdentityKey {
    Id(u64),
    Username(String),
}

impl UserRef {
    pub fn new(id: Option<u64>, username: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            full_name: full_name.into(),
            is_private: None,
            is_verified: None,
        }
    }

    /// The numeric id when known, otherwise the username.
    pub fn identity_key(&self) -> IdentityKey {
        match self.id {
            Some(id) => IdentityKey::Id(id),
            None => IdentityKey::Username(self.username.clone()),
        }
    }

    pub fn id_display(&self) -> String {
        self.id.map(|id| id.to_string()).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub author: UserRef,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_prefers_id() {
        let user = UserRef::new(Some(111), "commenter1", "First");
        assert_eq!(user.identity_key(), IdentityKey::Id(111));
    }

    #[test]
    fn test_identity_falls_back_to_username() {
        let user = UserRef::new(None, "commenter1", "First");
        assert_eq!(
            user.identity_key(),
            IdentityKey::Username("commenter1".into())
        );
    }

    #[test]
    fn test_id_display_empty_without_id() {
        assert_eq!(UserRef::new(None, "a", "").id_display(), "");
        assert_eq!(UserRef::new(Some(7), "a", "").id_display(), "7");
    }
}
