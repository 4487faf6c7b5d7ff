pub mod http;
pub mod store;
pub mod types;

pub use http::HttpStore;
pub use store::{FeedStore, StoreError};
pub use types::{Comment, CommentAck, CommentDraft, Post, PostAck, PostDraft, Session};
