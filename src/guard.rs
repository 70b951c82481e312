use crate::app::{GramError, Result};

pub const MAX_USERNAME_LEN: usize = 30;

pub const ACCESS_DENIED: &str = "Impossible to execute command: user has private profile";

/// Reject anything outside `[A-Za-z0-9_.]{1,30}` before it reaches a URL.
pub fn validate_username(username: &str) -> Result<()> {
    let valid = !username.is_empty()
        && username.len() <= MAX_USERNAME_LEN
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');

    if valid {
        Ok(())
    } else {
        Err(GramError::InvalidUsername(username.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Deny,
}

/// Private accounts are readable only by their followers.
pub fn authorize(is_private: bool, is_following: bool) -> Access {
    if is_private && !is_following {
        Access::Deny
    } else {
        Access::Allow
    }
}
