//! Comment text grouped by the post it was left on.

use serde_json::{json, Map, Value};

use crate::domain::Comment;
use crate::report::{Line, Operation, Render};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostComments {
    pub post_id: String,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentData {
    pub posts: Vec<PostComments>,
}

impl CommentData {
    pub fn total(&self) -> usize {
        self.posts.iter().map(|p| p.comments.len()).sum()
    }

    /// Every comment in feed order, for rosters built on the same fetch.
    pub fn comments(&self) -> impl Iterator<Item = &Comment> {
        self.posts.iter().flat_map(|p| p.comments.iter())
    }
}

/// Posts without comments are left out; feed order is kept.
pub fn comment_data(per_post: Vec<(String, Vec<Comment>)>) -> CommentData {
    CommentData {
        posts: per_post
            .into_iter()
            .filter(|(_, comments)| !comments.is_empty())
            .map(|(post_id, comments)| PostComments { post_id, comments })
            .collect(),
    }
}

impl Render for CommentData {
    fn operation(&self) -> Operation {
        Operation::CommentData
    }

    fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    fn console_lines(&self) -> Vec<Line> {
        let mut lines = vec![Line::header(format!(
            "{} comments on {} posts",
            self.total(),
            self.posts.len()
        ))];
        for post in &self.posts {
            lines.extend(post.comments.iter().map(|c| {
                Line::plain(format!("{}: {}: {}", post.post_id, c.author.username, c.text))
            }));
        }
        lines
    }

    fn dump(&self) -> Value {
        let map: Map<String, Value> = self
            .posts
            .iter()
            .map(|post| {
                let comments: Vec<Value> = post
                    .comments
                    .iter()
                    .map(|c| json!({ "username": c.author.username, "text": c.text }))
                    .collect();
                (post.post_id.clone(), Value::Array(comments))
            })
            .collect();
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRef;

    fn comment(name: &str, text: &str) -> Comment {
        Comment {
            author: UserRef::new(None, name, ""),
            text: text.into(),
        }
    }

    fn sample() -> CommentData {
        comment_data(vec![
            (
                "post_1".into(),
                vec![comment("commenter1", "Great post!"), comment("commenter2", "Nice one!")],
            ),
            ("post_2".into(), Vec::new()),
            ("post_3".into(), vec![comment("commenter1", "Love it!")]),
        ])
    }

    #[test]
    fn test_posts_without_comments_skipped() {
        let data = sample();
        assert_eq!(data.posts.len(), 2);
        assert_eq!(data.total(), 3);
        assert_eq!(data.comments().count(), 3);
    }

    #[test]
    fn test_dump_keyed_by_post() {
        let dump = sample().dump();
        assert_eq!(dump["post_1"][1]["username"], "commenter2");
        assert_eq!(dump["post_3"][0]["text"], "Love it!");
        assert!(dump.get("post_2").is_none());

        let keys: Vec<_> = dump.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["post_1", "post_3"]);
    }

    #[test]
    fn test_no_comments_is_empty() {
        let data = comment_data(vec![("post_1".into(), Vec::new())]);
        assert!(data.is_empty());
    }

    #[test]
    fn test_console_listing() {
        let lines = sample().text_lines();
        assert_eq!(lines[0], "3 comments on 2 posts");
        assert_eq!(lines[1], "post_1: commenter1: Great post!");
    }
}
