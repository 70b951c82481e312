//! Raw item → typed record mapping.
//!
//! Every optional field goes through [`field`], which treats a missing key and
//! an explicit `null` the same way. Nothing here fails on absent data; the
//! worst case is a record full of defaults.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::domain::{Comment, MediaAsset, MediaType, Post, Profile, RawItem, UserRef};

/// Present-and-non-null value for `key`, `None` for both null and missing.
pub fn field<'a>(raw: &'a Value, key: &str) -> Option<&'a Value> {
    raw.get(key).filter(|v| !v.is_null())
}

fn str_field(raw: &Value, key: &str) -> Option<String> {
    field(raw, key).and_then(Value::as_str).map(String::from)
}

/// Accepts both JSON numbers and numeric strings; ids travel as either.
fn u64_field(raw: &Value, key: &str) -> Option<u64> {
    match field(raw, key)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn i64_field(raw: &Value, key: &str) -> Option<i64> {
    match field(raw, key)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn bool_field(raw: &Value, key: &str) -> Option<bool> {
    field(raw, key).and_then(Value::as_bool)
}

fn user_id(raw: &Value) -> Option<u64> {
    u64_field(raw, "pk")
        .or_else(|| u64_field(raw, "pk_id"))
        .or_else(|| u64_field(raw, "id"))
}

fn first_url(list: Option<&Value>) -> Option<String> {
    list.and_then(Value::as_array)
        .and_then(|items| items.first())
        .and_then(|first| str_field(first, "url"))
}

fn image_url(raw: &Value) -> Option<String> {
    first_url(field(raw, "image_versions2").and_then(|v| field(v, "candidates")))
        .or_else(|| str_field(raw, "thumbnail_url"))
}

fn video_url(raw: &Value) -> Option<String> {
    first_url(field(raw, "video_versions")).or_else(|| str_field(raw, "video_url"))
}

fn timestamp(raw: &Value, key: &str) -> Option<DateTime<Utc>> {
    i64_field(raw, key).and_then(|secs| Utc.timestamp_opt(secs, 0).single())
}

/// Extract `#tags` from caption text.
///
/// A tag is a `#` at a word boundary followed by a run of alphanumerics or
/// `_`. A `#` glued to the end of another tag also starts one, so
/// `#travel#fun` yields both. Case is preserved.
pub fn hashtags(text: &str) -> Vec<String> {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let mut tags = Vec::new();
    let mut prev: Option<char> = None;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if c == '#' && !prev.is_some_and(is_word) {
            let start = i + c.len_utf8();
            let mut end = start;
            while let Some(&(j, next)) = chars.peek() {
                if !is_word(next) {
                    break;
                }
                end = j + next.len_utf8();
                chars.next();
            }
            if end > start {
                tags.push(format!("#{}", &text[start..end]));
                prev = None;
                continue;
            }
        }
        prev = Some(c);
    }
    tags
}

/// Pick the HD profile picture: the single `hd_profile_pic_url_info` URL
/// when present, otherwise the last (largest) `hd_profile_pic_versions`
/// entry.
pub fn resolve_profile_pic(raw: &Value) -> Option<String> {
    field(raw, "hd_profile_pic_url_info")
        .and_then(|info| str_field(info, "url"))
        .or_else(|| {
            field(raw, "hd_profile_pic_versions")
                .and_then(Value::as_array)
                .and_then(|versions| versions.iter().rev().find_map(|v| str_field(v, "url")))
        })
}

#[derive(Clone, Default)]
pub struct Normalizer;

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn post(&self, raw: &RawItem) -> Post {
        let id = match field(raw, "id") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => u64_field(raw, "pk").map(|pk| pk.to_string()).unwrap_or_default(),
        };

        let mut post = Post::new(id);

        post.caption = field(raw, "caption").and_then(|caption| match caption {
            Value::String(text) => Some(text.clone()),
            other => str_field(other, "text"),
        });
        post.accessibility_caption = str_field(raw, "accessibility_caption");
        post.comment_count = u64_field(raw, "comment_count").unwrap_or(0);
        post.like_count = u64_field(raw, "like_count").unwrap_or(0);
        post.media_type = MediaType::from_code(i64_field(raw, "media_type"));
        post.taken_at = timestamp(raw, "taken_at");
        post.location = field(raw, "location").and_then(|loc| {
            let lat = field(loc, "lat").and_then(Value::as_f64)?;
            let lng = field(loc, "lng").and_then(Value::as_f64)?;
            Some((lat, lng))
        });
        post.image_url = image_url(raw);
        post.video_url = video_url(raw);
        post.carousel = field(raw, "carousel_media")
            .and_then(Value::as_array)
            .map(|children| children.iter().map(|c| self.media_asset(c)).collect())
            .unwrap_or_default();
        post.tagged_users = self.usertags(raw);

        post
    }

    /// Users tagged in a post. One backend nests the list under
    /// `usertags.in`, the other makes `usertags` the list itself.
    fn usertags(&self, raw: &RawItem) -> Vec<UserRef> {
        let tags = match field(raw, "usertags") {
            Some(Value::Array(tags)) => tags,
            Some(nested) => match field(nested, "in") {
                Some(Value::Array(tags)) => tags,
                _ => return Vec::new(),
            },
            None => return Vec::new(),
        };

        tags.iter()
            .filter_map(|tag| field(tag, "user"))
            .map(|user| self.user(user))
            .collect()
    }

    pub fn media_asset(&self, raw: &RawItem) -> MediaAsset {
        let id = match field(raw, "id") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        };
        let video_url = video_url(raw);
        let media_type = match MediaType::from_code(i64_field(raw, "media_type")) {
            // Some story items omit the code; a video URL is decisive.
            MediaType::Unknown if video_url.is_some() => MediaType::Video,
            MediaType::Unknown => MediaType::Photo,
            known => known,
        };

        MediaAsset {
            id,
            media_type,
            image_url: image_url(raw),
            video_url,
        }
    }

    pub fn user(&self, raw: &RawItem) -> UserRef {
        UserRef {
            id: user_id(raw),
            username: str_field(raw, "username").unwrap_or_default(),
            full_name: str_field(raw, "full_name").unwrap_or_default(),
            is_private: bool_field(raw, "is_private"),
            is_verified: bool_field(raw, "is_verified"),
        }
    }

    pub fn comment(&self, raw: &RawItem) -> Comment {
        let author = match field(raw, "user") {
            Some(user) => self.user(user),
            None => UserRef::new(u64_field(raw, "user_id"), "", ""),
        };

        Comment {
            author,
            text: str_field(raw, "text").unwrap_or_default(),
        }
    }

    /// Owner of a post from the user-tag feed.
    pub fn tag_owner(&self, raw: &RawItem) -> UserRef {
        field(raw, "user")
            .or_else(|| field(raw, "owner"))
            .map(|user| self.user(user))
            .unwrap_or_default()
    }

    pub fn profile(&self, raw: &RawItem) -> Profile {
        Profile {
            id: user_id(raw),
            username: str_field(raw, "username"),
            full_name: str_field(raw, "full_name").unwrap_or_default(),
            biography: str_field(raw, "biography").unwrap_or_default(),
            follower_count: u64_field(raw, "follower_count").unwrap_or(0),
            following_count: u64_field(raw, "following_count").unwrap_or(0),
            media_count: u64_field(raw, "media_count").unwrap_or(0),
            is_business: bool_field(raw, "is_business").unwrap_or(false),
            is_verified: bool_field(raw, "is_verified").unwrap_or(false),
            is_private: bool_field(raw, "is_private").unwrap_or(false),
            category: str_field(raw, "category").or_else(|| str_field(raw, "business_category_name")),
            external_url: str_field(raw, "external_url").filter(|s| !s.is_empty()),
            public_email: str_field(raw, "public_email").filter(|s| !s.is_empty()),
            contact_phone_number: str_field(raw, "contact_phone_number")
                .or_else(|| str_field(raw, "public_phone_number"))
                .filter(|s| !s.is_empty()),
            hd_profile_pic_url: resolve_profile_pic(raw),
            profile_pic_url: str_field(raw, "profile_pic_url"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_and_missing_are_both_absent() {
        let raw = json!({"caption": null, "location": null});
        assert!(field(&raw, "caption").is_none());
        assert!(field(&raw, "taken_at").is_none());
        assert!(field(&raw, "location").is_none());
    }

    #[test]
    fn test_parse_full_post() {
        let raw = json!({
            "id": "post_1",
            "caption": {"text": "Hello world #travel #fun"},
            "comment_count": 5,
            "like_count": 100,
            "media_type": 1,
            "image_versions2": {"candidates": [{"url": "http://example.com/img1.jpg"}]},
            "location": {"lat": 40.7128, "lng": -74.0060},
            "taken_at": 1609459200
        });
        let post = Normalizer::new().post(&raw);

        assert_eq!(post.id, "post_1");
        assert_eq!(post.caption.as_deref(), Some("Hello world #travel #fun"));
        assert_eq!(post.comment_count, 5);
        assert_eq!(post.like_count, 100);
        assert_eq!(post.media_type, MediaType::Photo);
        assert_eq!(post.location, Some((40.7128, -74.0060)));
        assert_eq!(post.image_url.as_deref(), Some("http://example.com/img1.jpg"));
        assert_eq!(
            post.taken_at.map(|t| t.to_rfc3339()),
            Some("2021-01-01T00:00:00+00:00".to_string())
        );
    }

    #[test]
    fn test_sparse_post_uses_defaults() {
        let post = Normalizer::new().post(&json!({"caption": null}));
        assert_eq!(post.id, "");
        assert!(post.caption.is_none());
        assert_eq!(post.like_count, 0);
        assert_eq!(post.media_type, MediaType::Unknown);
        assert!(post.location.is_none());
        assert!(post.tagged_users.is_empty());
    }

    #[test]
    fn test_both_usertag_shapes() {
        let normalizer = Normalizer::new();
        let nested = json!({"id": "p1", "usertags": {"in": [
            {"user": {"pk": 501, "username": "tagged1", "full_name": "Tagged One"}}
        ]}});
        let flat = json!({"id": "p1", "usertags": [
            {"user": {"pk": 501, "username": "tagged1", "full_name": "Tagged One"}}
        ]});

        let a = normalizer.post(&nested).tagged_users;
        let b = normalizer.post(&flat).tagged_users;
        assert_eq!(a, b);
        assert_eq!(a[0].username, "tagged1");
        assert_eq!(a[0].id, Some(501));
    }

    #[test]
    fn test_comment_author() {
        let raw = json!({
            "user_id": 111,
            "user": {"pk": 111, "username": "commenter1", "full_name": "First Commenter"},
            "text": "Great post!"
        });
        let comment = Normalizer::new().comment(&raw);
        assert_eq!(comment.author.username, "commenter1");
        assert_eq!(comment.author.id, Some(111));
        assert_eq!(comment.text, "Great post!");
    }

    #[test]
    fn test_comment_without_user_object() {
        let comment = Normalizer::new().comment(&json!({"user_id": "222", "text": "hi"}));
        assert_eq!(comment.author.id, Some(222));
        assert_eq!(comment.author.username, "");
    }

    #[test]
    fn test_tag_item_normalizes_to_owner() {
        let raw = json!({"user": {"pk": 601, "username": "tagger1", "full_name": "Tagger One"}});
        assert_eq!(
            Normalizer::new().tag_owner(&raw),
            UserRef::new(Some(601), "tagger1", "Tagger One")
        );
    }

    #[test]
    fn test_hashtags_preserve_case_and_duplicates() {
        assert_eq!(
            hashtags("Hello #Travel #fun #Travel"),
            vec!["#Travel", "#fun", "#Travel"]
        );
    }

    #[test]
    fn test_hashtags_strip_trailing_punctuation() {
        assert_eq!(hashtags("so #fun, really #good!"), vec!["#fun", "#good"]);
    }

    #[test]
    fn test_hashtags_ignore_bare_and_inner_hash() {
        assert!(hashtags("# alone and mid#word").is_empty());
    }

    #[test]
    fn test_hashtags_back_to_back() {
        assert_eq!(hashtags("#travel#fun"), vec!["#travel", "#fun"]);
    }

    #[test]
    fn test_hashtags_after_punctuation() {
        assert_eq!(hashtags("Sunset (#travel) at the beach"), vec!["#travel"]);
        assert_eq!(hashtags("great day!#fun"), vec!["#fun"]);
        assert_eq!(hashtags("##double"), vec!["#double"]);
    }

    #[test]
    fn test_profile_pic_prefers_hd_info() {
        let raw = json!({
            "hd_profile_pic_url_info": {"url": "http://example.com/hd.jpg"},
            "hd_profile_pic_versions": [{"url": "http://example.com/low.jpg"}]
        });
        assert_eq!(
            resolve_profile_pic(&raw).as_deref(),
            Some("http://example.com/hd.jpg")
        );
    }

    #[test]
    fn test_profile_pic_falls_back_to_last_version() {
        let raw = json!({"hd_profile_pic_versions": [
            {"url": "http://example.com/low.jpg"},
            {"url": "http://example.com/high.jpg"}
        ]});
        assert_eq!(
            resolve_profile_pic(&raw).as_deref(),
            Some("http://example.com/high.jpg")
        );
    }

    #[test]
    fn test_profile_pic_absent() {
        assert!(resolve_profile_pic(&json!({"profile_pic_url": "x"})).is_none());
    }

    #[test]
    fn test_profile_fields() {
        let raw = json!({
            "pk": 12345,
            "full_name": "Target User",
            "biography": "A test bio",
            "follower_count": 1000,
            "following_count": 500,
            "is_business": false,
            "is_verified": true,
            "public_email": ""
        });
        let profile = Normalizer::new().profile(&raw);
        assert_eq!(profile.id, Some(12345));
        assert_eq!(profile.full_name, "Target User");
        assert_eq!(profile.follower_count, 1000);
        assert!(profile.is_verified);
        assert!(profile.public_email.is_none());
    }

    #[test]
    fn test_story_asset_infers_video() {
        let raw = json!({"id": "s2", "video_versions": [{"url": "http://example.com/s2.mp4"}]});
        let asset = Normalizer::new().media_asset(&raw);
        assert_eq!(asset.media_type, MediaType::Video);
        assert_eq!(asset.best_url(), Some("http://example.com/s2.mp4"));
    }
}
