//! Adapter for the mobile private API.
//!
//! Paged endpoints answer `{<list>: [...], "next_max_id": ...}` and take the
//! cursor back as `max_id`.

use async_trait::async_trait;

use crate::app::{GramError, Result};
use crate::domain::{Page, Profile, RawItem, Target};
use crate::fetcher::{cursor, require, take_list, Backend, HttpTransport, Transport};
use crate::normalizer::{field, Normalizer};

pub const DEFAULT_BASE_URL: &str = "https://i.instagram.com/api/v1/";

/// App id header the mobile API expects alongside the session cookie.
const APP_ID: &str = "936619743392459";

pub struct PrivateApiBackend<T = HttpTransport> {
    transport: T,
    normalizer: Normalizer,
}

impl PrivateApiBackend<HttpTransport> {
    pub fn connect(
        base_url: &str,
        session_id: &str,
        user_agent: &str,
        timeout: std::time::Duration,
    ) -> Result<Self> {
        let headers = [
            ("cookie", format!("sessionid={}", session_id)),
            ("x-ig-app-id", APP_ID.to_string()),
        ];
        let transport = HttpTransport::new(base_url, &headers, user_agent, timeout)?;
        Ok(Self::new(transport))
    }
}

impl<T: Transport> PrivateApiBackend<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            normalizer: Normalizer::new(),
        }
    }

    async fn page(&self, path: &str, list_key: &str, cursor_value: Option<String>) -> Result<Page> {
        let query: Vec<(&str, String)> = cursor_value.into_iter().map(|c| ("max_id", c)).collect();
        let mut body = self.transport.get_json(path, &query).await?;

        let next = cursor(&body, "next_max_id");
        let items = take_list(&mut body, list_key, path)?;
        Ok(Page::new(items, next))
    }
}

#[async_trait]
impl<T: Transport> Backend for PrivateApiBackend<T> {
    async fn resolve_target(&self, username: &str) -> Result<Target> {
        let path = format!("users/{}/usernameinfo/", username);
        let body = self.transport.get_json(&path, &[]).await?;
        let user = self.normalizer.profile(require(&body, "user", &path)?);

        let id = user
            .id
            .ok_or_else(|| GramError::unexpected(&path, "user has no id"))?;

        // Following only matters for private accounts.
        let is_following = if user.is_private {
            let path = format!("friendships/show/{}/", id);
            let status = self.transport.get_json(&path, &[]).await?;
            field(&status, "following")
                .and_then(|v| v.as_bool())
                .unwrap_or(false)
        } else {
            false
        };

        Ok(Target {
            username: username.to_string(),
            id,
            is_private: user.is_private,
            is_following,
        })
    }

    async fn fetch_feed(&self, user_id: u64, cursor: Option<String>) -> Result<Page> {
        self.page(&format!("feed/user/{}/", user_id), "items", cursor)
            .await
    }

    async fn fetch_comments(&self, post_id: &str, cursor: Option<String>) -> Result<Page> {
        self.page(&format!("media/{}/comments/", post_id), "comments", cursor)
            .await
    }

    async fn fetch_followers(&self, user_id: u64, cursor: Option<String>) -> Result<Page> {
        self.page(&format!("friendships/{}/followers/", user_id), "users", cursor)
            .await
    }

    async fn fetch_following(&self, user_id: u64, cursor: Option<String>) -> Result<Page> {
        self.page(&format!("friendships/{}/following/", user_id), "users", cursor)
            .await
    }

    async fn fetch_user_tags(&self, user_id: u64, cursor: Option<String>) -> Result<Page> {
        self.page(&format!("usertags/{}/feed/", user_id), "items", cursor)
            .await
    }

    async fn fetch_profile(&self, user_id: u64) -> Result<Profile> {
        let path = format!("users/{}/full_detail_info/", user_id);
        let body = self.transport.get_json(&path, &[]).await?;
        let detail = require(&body, "user_detail", &path)?;
        Ok(self.normalizer.profile(require(detail, "user", &path)?))
    }

    async fn fetch_user_detail(&self, user_id: u64) -> Result<Profile> {
        let path = format!("users/{}/info/", user_id);
        let body = self.transport.get_json(&path, &[]).await?;
        Ok(self.normalizer.profile(require(&body, "user", &path)?))
    }

    async fn fetch_story_reel(&self, user_id: u64) -> Result<Vec<RawItem>> {
        let path = format!("feed/user/{}/reel_media/", user_id);
        let mut body = self.transport.get_json(&path, &[]).await?;
        take_list(&mut body, "items", &path)
    }
}
