//! Pure reductions from normalized records to operation results.
//!
//! Each function takes already-normalized input and returns a value that
//! implements [`Render`](crate::report::Render). None of them touch the
//! network or the filesystem, so running one twice on the same input gives
//! the same result.

pub mod comments;
pub mod posts;
pub mod profile;
pub mod roster;

pub use comments::{comment_data, CommentData, PostComments};
pub use posts::{
    addresses, captions, descriptions, hashtag_frequency, media_types, total_comments,
    total_likes, Address, Addresses, Captions, CommentTotals, Description, Descriptions,
    HashtagTable, LikeStats, MediaTally,
};
pub use profile::{download_summary, profile_report, DownloadSummary, ProfileReport};
pub use roster::{
    commenters, contacts, dedup, tagged_by_user, taggers, user_list, Contact, ContactField,
    ContactList, Roster, RosterEntry, UserList,
};
