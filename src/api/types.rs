//! Domain types for the feed.
//!
//! Posts and comments are immutable once fetched; identity is the opaque
//! server-assigned `id`. Drafts are the transient shapes sent to the write
//! endpoints and carry the author identity explicitly (the server does not
//! derive it).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single feed entry ("tweet").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub author_name: String,
    pub author_avatar_url: String,
    pub text: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A reply attached to exactly one post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    /// Foreign key to [`Post::id`]. A thread only ever holds comments
    /// whose `post_id` matches its own post.
    pub post_id: String,
    pub author_name: String,
    pub author_avatar_url: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// The signed-in identity. Absence means unauthenticated.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub display_name: String,
    pub avatar_url: String,
}

/// Unsaved input for a new post, built at submit time from the composer
/// draft and the session identity.
#[derive(Debug, Clone, PartialEq)]
pub struct PostDraft {
    pub text: String,
    pub author_name: String,
    pub author_avatar_url: String,
    /// Empty when no image was attached.
    pub image_url: String,
}

/// Unsaved input for a new comment on one post.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentDraft {
    pub body: String,
    pub post_id: String,
    pub author_name: String,
    pub author_avatar_url: String,
}

/// Acknowledgment for a created post. The server assigns the id; the full
/// record only becomes visible through the next feed refetch.
#[derive(Debug, Clone, PartialEq)]
pub struct PostAck {
    pub id: String,
}

/// Acknowledgment for a created comment.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentAck {
    pub id: String,
}
