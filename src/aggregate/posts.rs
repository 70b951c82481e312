//! Reductions over the target's own posts.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde_json::{json, Map, Value};

use crate::domain::{MediaType, Post};
use crate::normalizer::hashtags;
use crate::report::{Line, Operation, Render};

#[derive(Debug, Clone, PartialEq)]
pub struct Captions {
    pub captions: Vec<String>,
}

pub fn captions(posts: &[Post]) -> Captions {
    Captions {
        captions: posts.iter().filter_map(|p| p.caption.clone()).collect(),
    }
}

impl Render for Captions {
    fn operation(&self) -> Operation {
        Operation::Captions
    }

    fn is_empty(&self) -> bool {
        self.captions.is_empty()
    }

    fn console_lines(&self) -> Vec<Line> {
        let mut lines = vec![Line::header(format!("Found {} captions", self.captions.len()))];
        lines.extend(
            self.captions
                .iter()
                .enumerate()
                .map(|(i, c)| Line::plain(format!("{}. {}", i + 1, c))),
        );
        lines
    }

    fn dump(&self) -> Value {
        json!({ "captions": self.captions })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentTotals {
    pub comment_counter: u64,
    pub posts: usize,
}

pub fn total_comments(posts: &[Post]) -> CommentTotals {
    CommentTotals {
        comment_counter: posts.iter().map(|p| p.comment_count).sum(),
        posts: posts.len(),
    }
}

impl Render for CommentTotals {
    fn operation(&self) -> Operation {
        Operation::TotalComments
    }

    fn is_empty(&self) -> bool {
        self.posts == 0
    }

    fn console_lines(&self) -> Vec<Line> {
        vec![Line::highlight(format!(
            "{} comments across {} posts",
            self.comment_counter, self.posts
        ))]
    }

    fn dump(&self) -> Value {
        json!({ "comment_counter": self.comment_counter, "posts": self.posts })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeStats {
    pub like_counter: u64,
    pub min: u64,
    pub max: u64,
    /// Truncated integer mean.
    pub avg: u64,
    pub posts: usize,
}

pub fn total_likes(posts: &[Post]) -> LikeStats {
    let likes = posts.iter().map(|p| p.like_count);
    let like_counter: u64 = likes.clone().sum();

    LikeStats {
        like_counter,
        min: likes.clone().min().unwrap_or(0),
        max: likes.max().unwrap_or(0),
        avg: if posts.is_empty() {
            0
        } else {
            like_counter / posts.len() as u64
        },
        posts: posts.len(),
    }
}

impl Render for LikeStats {
    fn operation(&self) -> Operation {
        Operation::Likes
    }

    fn is_empty(&self) -> bool {
        self.posts == 0
    }

    fn console_lines(&self) -> Vec<Line> {
        vec![Line::highlight(format!(
            "{} likes across {} posts (min {}, max {}, avg {})",
            self.like_counter, self.posts, self.min, self.max, self.avg
        ))]
    }

    fn dump(&self) -> Value {
        json!({
            "like_counter": self.like_counter,
            "min": self.min,
            "max": self.max,
            "avg": self.avg,
            "posts": self.posts,
        })
    }
}

/// Photo and video counts; carousels and unknown codes are not counted in
/// either bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaTally {
    pub photos: usize,
    pub videos: usize,
    pub posts: usize,
}

pub fn media_types(posts: &[Post]) -> MediaTally {
    let count = |kind| posts.iter().filter(|p| p.media_type == kind).count();
    MediaTally {
        photos: count(MediaType::Photo),
        videos: count(MediaType::Video),
        posts: posts.len(),
    }
}

impl Render for MediaTally {
    fn operation(&self) -> Operation {
        Operation::MediaType
    }

    fn is_empty(&self) -> bool {
        self.posts == 0
    }

    fn console_lines(&self) -> Vec<Line> {
        vec![Line::highlight(format!(
            "{} photos, {} videos",
            self.photos, self.videos
        ))]
    }

    fn dump(&self) -> Value {
        json!({ "photos": self.photos, "videos": self.videos })
    }
}

/// Hashtag → occurrences, highest count first; equal counts keep the order
/// in which the tags were first seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashtagTable {
    pub tags: Vec<(String, usize)>,
}

pub fn hashtag_frequency(posts: &[Post]) -> HashtagTable {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut tags: Vec<(String, usize)> = Vec::new();

    for tag in posts
        .iter()
        .filter_map(|p| p.caption.as_deref())
        .flat_map(hashtags)
    {
        match index.get(&tag) {
            Some(&i) => tags[i].1 += 1,
            None => {
                index.insert(tag.clone(), tags.len());
                tags.push((tag, 1));
            }
        }
    }

    // Stable sort keeps first-seen order among ties.
    tags.sort_by(|a, b| b.1.cmp(&a.1));
    HashtagTable { tags }
}

impl Render for HashtagTable {
    fn operation(&self) -> Operation {
        Operation::Hashtags
    }

    fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    fn console_lines(&self) -> Vec<Line> {
        self.tags
            .iter()
            .map(|(tag, count)| Line::plain(format!("{}. {}", count, tag)))
            .collect()
    }

    fn dump(&self) -> Value {
        let table: Map<String, Value> = self
            .tags
            .iter()
            .map(|(tag, count)| (tag.clone(), json!(count)))
            .collect();
        json!({ "hashtags": table })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    pub post: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptions {
    pub entries: Vec<Description>,
}

/// Accessibility description of each post, or its caption when there is
/// none. Posts with neither are skipped.
pub fn descriptions(posts: &[Post]) -> Descriptions {
    Descriptions {
        entries: posts
            .iter()
            .filter_map(|p| {
                let text = p.accessibility_caption.as_ref().or(p.caption.as_ref())?;
                Some(Description {
                    post: p.id.clone(),
                    description: text.clone(),
                })
            })
            .collect(),
    }
}

impl Render for Descriptions {
    fn operation(&self) -> Operation {
        Operation::PhotoDescriptions
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn console_lines(&self) -> Vec<Line> {
        self.entries
            .iter()
            .map(|d| Line::plain(format!("{}: {}", d.post, d.description)))
            .collect()
    }

    fn dump(&self) -> Value {
        let entries: Vec<Value> = self
            .entries
            .iter()
            .map(|d| json!({ "id": d.post, "description": d.description }))
            .collect();
        json!({ "descriptions": entries })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Address {
    pub post: String,
    pub lat: f64,
    pub lng: f64,
    pub time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Addresses {
    pub entries: Vec<Address>,
}

/// Coordinates of geotagged posts in feed order. Reverse geocoding is left
/// to the reader.
pub fn addresses(posts: &[Post]) -> Addresses {
    Addresses {
        entries: posts
            .iter()
            .filter_map(|p| {
                let (lat, lng) = p.location?;
                Some(Address {
                    post: p.id.clone(),
                    lat,
                    lng,
                    time: p.taken_at,
                })
            })
            .collect(),
    }
}

impl Render for Addresses {
    fn operation(&self) -> Operation {
        Operation::Addrs
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn console_lines(&self) -> Vec<Line> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, a)| {
                let when = a
                    .time
                    .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                    .unwrap_or_else(|| "unknown date".to_string());
                Line::plain(format!("{}. {}, {} ({})", i + 1, a.lat, a.lng, when))
            })
            .collect()
    }

    fn dump(&self) -> Value {
        let entries: Vec<Value> = self
            .entries
            .iter()
            .map(|a| {
                json!({
                    "post": a.post,
                    "lat": a.lat,
                    "lng": a.lng,
                    "time": a.time.map(|t| t.to_rfc3339()),
                })
            })
            .collect();
        json!({ "address": entries })
    }
}
