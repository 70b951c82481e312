pub mod page;
pub mod post;
pub mod profile;
pub mod user;

pub use page::{Page, RawItem};
pub use post::{MediaAsset, MediaType, Post};
pub use profile::{Profile, Target};
pub use user::{Comment, IdentityKey, UserRef};
