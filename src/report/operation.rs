use clap::ValueEnum;

/// The fixed catalogue of analysis operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Operation {
    /// Coordinates of geotagged posts
    #[value(name = "addrs")]
    Addrs,
    /// Captions of every post
    #[value(name = "captions")]
    Captions,
    /// Total comment count across posts
    #[value(name = "comments")]
    TotalComments,
    /// Every comment of every post
    #[value(name = "commentdata")]
    CommentData,
    /// Accounts following the target
    #[value(name = "followers")]
    Followers,
    /// Accounts the target follows
    #[value(name = "followings")]
    Followings,
    /// Followers with a public email
    #[value(name = "fwersemail")]
    FollowersEmail,
    /// Followings with a public email
    #[value(name = "fwingsemail")]
    FollowingsEmail,
    /// Followers with a contact phone number
    #[value(name = "fwersnumber")]
    FollowersPhone,
    /// Followings with a contact phone number
    #[value(name = "fwingsnumber")]
    FollowingsPhone,
    /// Hashtag frequency across captions
    #[value(name = "hashtags")]
    Hashtags,
    /// Profile information
    #[value(name = "info")]
    Info,
    /// Like statistics across posts
    #[value(name = "likes")]
    Likes,
    /// Photo and video counts
    #[value(name = "mediatype")]
    MediaType,
    /// Accessibility descriptions of posts
    #[value(name = "photodes")]
    PhotoDescriptions,
    /// Download every post image
    #[value(name = "photos")]
    Photos,
    /// Download the HD profile picture
    #[value(name = "propic")]
    Propic,
    /// Download current stories
    #[value(name = "stories")]
    Stories,
    /// Accounts the target tagged in its posts
    #[value(name = "tagged")]
    Tagged,
    /// Accounts that commented on the target's posts
    #[value(name = "wcommented")]
    WhoCommented,
    /// Accounts that tagged the target in their posts
    #[value(name = "wtagged")]
    WhoTagged,
}

impl Operation {
    pub const ALL: [Operation; 21] = [
        Operation::Addrs,
        Operation::Captions,
        Operation::TotalComments,
        Operation::CommentData,
        Operation::Followers,
        Operation::Followings,
        Operation::FollowersEmail,
        Operation::FollowingsEmail,
        Operation::FollowersPhone,
        Operation::FollowingsPhone,
        Operation::Hashtags,
        Operation::Info,
        Operation::Likes,
        Operation::MediaType,
        Operation::PhotoDescriptions,
        Operation::Photos,
        Operation::Propic,
        Operation::Stories,
        Operation::Tagged,
        Operation::WhoCommented,
        Operation::WhoTagged,
    ];

    /// Artifact suffix shared by the text and the JSON file. Download
    /// operations write media only and have none.
    pub fn suffix(self) -> Option<&'static str> {
        let suffix = match self {
            Operation::Addrs => "addrs",
            Operation::Captions => "captions",
            Operation::TotalComments => "comments",
            Operation::CommentData => "comment_data",
            Operation::Followers => "followers",
            Operation::Followings => "followings",
            Operation::FollowersEmail => "fwersemail",
            Operation::FollowingsEmail => "fwingsemail",
            Operation::FollowersPhone => "fwersnumber",
            Operation::FollowingsPhone => "fwingsnumber",
            Operation::Hashtags => "hashtags",
            Operation::Info => "info",
            Operation::Likes => "likes",
            Operation::MediaType => "mediatype",
            Operation::PhotoDescriptions => "descriptions",
            Operation::Tagged => "tagged",
            Operation::WhoCommented => "users_who_commented",
            Operation::WhoTagged => "users_who_tagged",
            Operation::Photos | Operation::Propic | Operation::Stories => return None,
        };
        Some(suffix)
    }

    /// Whether the access guard applies. The profile header is visible even
    /// for private accounts.
    pub fn is_guarded(self) -> bool {
        !matches!(self, Operation::Info | Operation::Propic)
    }

    /// Command name as typed on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Operation::Addrs => "addrs",
            Operation::Captions => "captions",
            Operation::TotalComments => "comments",
            Operation::CommentData => "commentdata",
            Operation::Followers => "followers",
            Operation::Followings => "followings",
            Operation::FollowersEmail => "fwersemail",
            Operation::FollowingsEmail => "fwingsemail",
            Operation::FollowersPhone => "fwersnumber",
            Operation::FollowingsPhone => "fwingsnumber",
            Operation::Hashtags => "hashtags",
            Operation::Info => "info",
            Operation::Likes => "likes",
            Operation::MediaType => "mediatype",
            Operation::PhotoDescriptions => "photodes",
            Operation::Photos => "photos",
            Operation::Propic => "propic",
            Operation::Stories => "stories",
            Operation::Tagged => "tagged",
            Operation::WhoCommented => "wcommented",
            Operation::WhoTagged => "wtagged",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffixes_are_lowercase_without_double_underscore() {
        for op in Operation::ALL {
            if let Some(suffix) = op.suffix() {
                assert_eq!(suffix, suffix.to_lowercase(), "{:?}", op);
                assert!(!suffix.contains("__"), "{:?}", op);
            }
        }
    }

    #[test]
    fn test_suffixes_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for op in Operation::ALL {
            if let Some(suffix) = op.suffix() {
                assert!(seen.insert(suffix), "duplicate suffix {}", suffix);
            }
        }
    }

    #[test]
    fn test_photo_descriptions_share_suffix() {
        assert_eq!(Operation::PhotoDescriptions.suffix(), Some("descriptions"));
    }

    #[test]
    fn test_download_operations_have_no_artifacts() {
        assert!(Operation::Photos.suffix().is_none());
        assert!(Operation::Propic.suffix().is_none());
        assert!(Operation::Stories.suffix().is_none());
    }

    #[test]
    fn test_guarded_operations() {
        assert!(Operation::Captions.is_guarded());
        assert!(Operation::Followers.is_guarded());
        assert!(!Operation::Info.is_guarded());
        assert!(!Operation::Propic.is_guarded());
    }

    #[test]
    fn test_names_match_clap_values() {
        for op in Operation::ALL {
            let value = op.to_possible_value().unwrap();
            assert_eq!(value.get_name(), op.name());
        }
    }

    #[test]
    fn test_cli_names() {
        assert_eq!(Operation::TotalComments.name(), "comments");
        assert_eq!(Operation::WhoCommented.name(), "wcommented");
        assert_eq!(
            Operation::from_str("fwersemail", false).unwrap(),
            Operation::FollowersEmail
        );
    }
}
