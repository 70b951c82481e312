use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::UserRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Photo,
    Video,
    Carousel,
    Unknown,
}

impl MediaType {
    /// Map the numeric `media_type` code. Unmapped codes never fail.
    pub fn from_code(code: Option<i64>) -> Self {
        match code {
            Some(1) => Self::Photo,
            Some(2) => Self::Video,
            Some(8) => Self::Carousel,
            _ => Self::Unknown,
        }
    }
}

/// A single downloadable media resource: a story frame or a carousel child.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaAsset {
    pub id: String,
    pub media_type: MediaType,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
}

impl MediaAsset {
    /// Video URL for videos, the image URL for everything else.
    pub fn best_url(&self) -> Option<&str> {
        match self.media_type {
            MediaType::Video => self.video_url.as_deref().or(self.image_url.as_deref()),
            _ => self.image_url.as_deref(),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self.media_type {
            MediaType::Video if self.video_url.is_some() => "mp4",
            _ => "jpg",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: String,
    pub caption: Option<String>,
    pub accessibility_caption: Option<String>,
    pub comment_count: u64,
    pub like_count: u64,
    pub media_type: MediaType,
    pub taken_at: Option<DateTime<Utc>>,
    pub location: Option<(f64, f64)>,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub carousel: Vec<MediaAsset>,
    pub tagged_users: Vec<UserRef>,
}

impl Post {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            caption: None,
            accessibility_caption: None,
            comment_count: 0,
            like_count: 0,
            media_type: MediaType::Unknown,
            taken_at: None,
            location: None,
            image_url: None,
            video_url: None,
            carousel: Vec::new(),
            tagged_users: Vec::new(),
        }
    }

    /// Image URLs to download for this post: every carousel child, or the
    /// post's own image.
    pub fn image_urls(&self) -> Vec<(String, &str)> {
        if self.carousel.is_empty() {
            return self
                .image_url
                .as_deref()
                .map(|url| vec![(self.id.clone(), url)])
                .unwrap_or_default();
        }

        self.carousel
            .iter()
            .filter_map(|child| child.image_url.as_deref().map(|url| (child.id.clone(), url)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_codes() {
        assert_eq!(MediaType::from_code(Some(1)), MediaType::Photo);
        assert_eq!(MediaType::from_code(Some(2)), MediaType::Video);
        assert_eq!(MediaType::from_code(Some(8)), MediaType::Carousel);
        assert_eq!(MediaType::from_code(Some(42)), MediaType::Unknown);
        assert_eq!(MediaType::from_code(None), MediaType::Unknown);
    }

    #[test]
    fn test_image_urls_single() {
        let mut post = Post::new("p1");
        post.image_url = Some("http://example.com/p1.jpg".into());
        assert_eq!(
            post.image_urls(),
            vec![("p1".to_string(), "http://example.com/p1.jpg")]
        );
    }

    #[test]
    fn test_image_urls_carousel_replaces_cover() {
        let mut post = Post::new("c1");
        post.image_url = Some("http://example.com/cover.jpg".into());
        post.carousel = vec![
            MediaAsset {
                id: "cm1".into(),
                media_type: MediaType::Photo,
                image_url: Some("http://example.com/c1.jpg".into()),
                video_url: None,
            },
            MediaAsset {
                id: "cm2".into(),
                media_type: MediaType::Photo,
                image_url: Some("http://example.com/c2.jpg".into()),
                video_url: None,
            },
        ];
        let urls = post.image_urls();
        assert_eq!(urls.len(), 2);
        assert_eq!(urls[1].1, "http://example.com/c2.jpg");
    }

    #[test]
    fn test_story_video_prefers_video_url() {
        let asset = MediaAsset {
            id: "s2".into(),
            media_type: MediaType::Video,
            image_url: Some("http://example.com/thumb.jpg".into()),
            video_url: Some("http://example.com/s2.mp4".into()),
        };
        assert_eq!(asset.best_url(), Some("http://example.com/s2.mp4"));
        assert_eq!(asset.extension(), "mp4");
    }
}
