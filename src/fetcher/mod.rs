pub mod download;
pub mod hiker;
pub mod paginator;
pub mod private_api;
pub mod transport;

#[cfg(test)]
pub mod testing;

use async_trait::async_trait;
use serde_json::Value;

use crate::app::{GramError, Result};
use crate::domain::{Page, Profile, RawItem, Target};
use crate::normalizer::field;

pub use download::{Downloader, HttpDownloader};
pub use hiker::HikerBackend;
pub use paginator::Paginator;
pub use private_api::PrivateApiBackend;
pub use transport::{HttpTransport, Transport};

/// One method per remote endpoint. Implementations own the wire-shape
/// translation into [`Page`]s and nothing else.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Look up the account, its privacy flag and whether the viewer follows it.
    async fn resolve_target(&self, username: &str) -> Result<Target>;

    async fn fetch_feed(&self, user_id: u64, cursor: Option<String>) -> Result<Page>;

    async fn fetch_comments(&self, post_id: &str, cursor: Option<String>) -> Result<Page>;

    async fn fetch_followers(&self, user_id: u64, cursor: Option<String>) -> Result<Page>;

    async fn fetch_following(&self, user_id: u64, cursor: Option<String>) -> Result<Page>;

    /// Posts by other accounts in which `user_id` is tagged.
    async fn fetch_user_tags(&self, user_id: u64, cursor: Option<String>) -> Result<Page>;

    async fn fetch_profile(&self, user_id: u64) -> Result<Profile>;

    /// Per-account detail lookup, used for contact fields of roster members.
    async fn fetch_user_detail(&self, user_id: u64) -> Result<Profile>;

    /// Current story items. Not paginated.
    async fn fetch_story_reel(&self, user_id: u64) -> Result<Vec<RawItem>>;
}

/// Take the list stored under `key`. Null or missing is an empty list; any
/// other non-list value is a shape error.
pub(crate) fn take_list(body: &mut Value, key: &str, endpoint: &str) -> Result<Vec<RawItem>> {
    match body.get_mut(key).map(Value::take) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(GramError::unexpected(
            endpoint,
            format!("`{}` is not a list: {}", key, other),
        )),
    }
}

/// Read a cursor that may arrive as a string or a bare number.
pub(crate) fn cursor(body: &Value, key: &str) -> Option<String> {
    match field(body, key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Object stored under `key`, or a shape error naming the endpoint.
pub(crate) fn require<'a>(body: &'a Value, key: &str, endpoint: &str) -> Result<&'a Value> {
    field(body, key).ok_or_else(|| GramError::unexpected(endpoint, format!("missing `{}`", key)))
}
