use std::fmt;

use async_trait::async_trait;

use super::types::{Comment, CommentAck, CommentDraft, Post, PostAck, PostDraft};

/// Errors that can occur while talking to the remote store.
/// Variants carry enough info to determine retryability (future use).
#[derive(Debug)]
pub enum StoreError {
    /// Network-level failure (timeout, DNS, connection refused). Retryable.
    Network(String),
    /// The store returned an error response. Retryable if status >= 500 or 429.
    Api { status: u16, message: String },
    /// Failed to parse the store's response body. Not retryable.
    Parse(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Network(msg) => write!(f, "network error: {msg}"),
            StoreError::Api { status, message } => {
                write!(f, "store error (HTTP {status}): {message}")
            }
            StoreError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// The remote store behind the feed.
///
/// The store is the ordering authority: lists come back in display order
/// and are applied wholesale. `fetch_comments` filters by post id on the
/// server side; callers never re-filter.
#[async_trait]
pub trait FeedStore: Send + Sync {
    /// Returns the name of the store backend.
    fn name(&self) -> &str;

    /// Fetches the full feed, newest first.
    async fn fetch_feed(&self) -> Result<Vec<Post>, StoreError>;

    /// Fetches every comment for one post, in display order.
    async fn fetch_comments(&self, post_id: &str) -> Result<Vec<Comment>, StoreError>;

    /// Creates a new post. The created record is only observable through a
    /// subsequent `fetch_feed`.
    async fn submit_post(&self, draft: &PostDraft) -> Result<PostAck, StoreError>;

    /// Creates a new comment on the draft's post.
    async fn submit_comment(&self, draft: &CommentDraft) -> Result<CommentAck, StoreError>;
}
