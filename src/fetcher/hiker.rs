//! Adapter for the HikerAPI v2 service.
//!
//! Paged endpoints wrap their list in `{"response": {<list>: [...]},
//! "next_page_id": ...}` and take the cursor back as `page_id`.

use async_trait::async_trait;
use serde_json::Value;

use crate::app::{GramError, Result};
use crate::domain::{Page, Profile, RawItem, Target};
use crate::fetcher::{cursor, require, take_list, Backend, HttpTransport, Transport};
use crate::normalizer::{field, Normalizer};

pub const DEFAULT_BASE_URL: &str = "https://api.hikerapi.com/";

pub struct HikerBackend<T = HttpTransport> {
    transport: T,
    normalizer: Normalizer,
}

impl HikerBackend<HttpTransport> {
    pub fn connect(
        base_url: &str,
        access_key: &str,
        user_agent: &str,
        timeout: std::time::Duration,
    ) -> Result<Self> {
        let headers = [("x-access-key", access_key.to_string())];
        let transport = HttpTransport::new(base_url, &headers, user_agent, timeout)?;
        Ok(Self::new(transport))
    }
}

impl<T: Transport> HikerBackend<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            normalizer: Normalizer::new(),
        }
    }

    async fn page(
        &self,
        path: &str,
        mut query: Vec<(&str, String)>,
        list_key: &str,
        page_id: Option<String>,
    ) -> Result<Page> {
        if let Some(page_id) = page_id {
            query.push(("page_id", page_id));
        }
        let mut body = self.transport.get_json(path, &query).await?;

        let next = cursor(&body, "next_page_id");
        let items = match body.get_mut("response").map(Value::take) {
            None | Some(Value::Null) => Vec::new(),
            Some(mut response) => take_list(&mut response, list_key, path)?,
        };
        Ok(Page::new(items, next))
    }

    async fn user_by_id(&self, user_id: u64) -> Result<Profile> {
        let path = "v2/user/by/id";
        let body = self
            .transport
            .get_json(path, &[("id", user_id.to_string())])
            .await?;
        // Some deployments return the user bare, others under `user`.
        let user = field(&body, "user").unwrap_or(&body);
        Ok(self.normalizer.profile(user))
    }
}

#[async_trait]
impl<T: Transport> Backend for HikerBackend<T> {
    async fn resolve_target(&self, username: &str) -> Result<Target> {
        let path = "v2/user/by/username";
        let body = self
            .transport
            .get_json(path, &[("username", username.to_string())])
            .await?;
        let raw = require(&body, "user", path)?;
        let user = self.normalizer.profile(raw);

        let id = user
            .id
            .ok_or_else(|| GramError::unexpected(path, "user has no id"))?;
        let is_following = field(raw, "friendship_status")
            .and_then(|status| field(status, "following"))
            .and_then(Value::as_bool)
            .unwrap_or(false);

        Ok(Target {
            username: username.to_string(),
            id,
            is_private: user.is_private,
            is_following,
        })
    }

    async fn fetch_feed(&self, user_id: u64, cursor: Option<String>) -> Result<Page> {
        self.page(
            "v2/user/medias",
            vec![("user_id", user_id.to_string())],
            "items",
            cursor,
        )
        .await
    }

    async fn fetch_comments(&self, post_id: &str, cursor: Option<String>) -> Result<Page> {
        self.page(
            "v2/media/comments",
            vec![("id", post_id.to_string())],
            "comments",
            cursor,
        )
        .await
    }

    async fn fetch_followers(&self, user_id: u64, cursor: Option<String>) -> Result<Page> {
        self.page(
            "v2/user/followers",
            vec![("user_id", user_id.to_string())],
            "users",
            cursor,
        )
        .await
    }

    async fn fetch_following(&self, user_id: u64, cursor: Option<String>) -> Result<Page> {
        self.page(
            "v2/user/following",
            vec![("user_id", user_id.to_string())],
            "users",
            cursor,
        )
        .await
    }

    async fn fetch_user_tags(&self, user_id: u64, cursor: Option<String>) -> Result<Page> {
        self.page(
            "v2/user/tag/medias",
            vec![("user_id", user_id.to_string())],
            "items",
            cursor,
        )
        .await
    }

    async fn fetch_profile(&self, user_id: u64) -> Result<Profile> {
        self.user_by_id(user_id).await
    }

    async fn fetch_user_detail(&self, user_id: u64) -> Result<Profile> {
        self.user_by_id(user_id).await
    }

    async fn fetch_story_reel(&self, user_id: u64) -> Result<Vec<RawItem>> {
        let path = "v2/user/stories";
        let mut body = self
            .transport
            .get_json(path, &[("user_id", user_id.to_string())])
            .await?;

        match body.get_mut("reel").map(Value::take) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(mut reel) => take_list(&mut reel, "items", path),
        }
    }
}
