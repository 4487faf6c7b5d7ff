//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::api::{
    Comment, CommentAck, CommentDraft, FeedStore, Post, PostAck, PostDraft, Session, StoreError,
};

/// An in-memory store with programmable responses and a call log, for
/// tests that drive the submit/refetch protocol without a real server.
pub struct ScriptedStore {
    feed: Mutex<Vec<Post>>,
    comments: Mutex<HashMap<String, Vec<Comment>>>,
    failing: Mutex<HashSet<String>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedStore {
    pub fn new() -> Self {
        Self {
            feed: Mutex::new(Vec::new()),
            comments: Mutex::new(HashMap::new()),
            failing: Mutex::new(HashSet::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Replaces the feed the next `fetch_feed` will return.
    pub async fn push_feed(&self, posts: Vec<Post>) {
        *self.feed.lock().await = posts;
    }

    /// Replaces the comment list the next `fetch_comments(post_id)` will return.
    pub async fn push_comments(&self, post_id: &str, comments: Vec<Comment>) {
        self.comments
            .lock()
            .await
            .insert(post_id.to_string(), comments);
    }

    /// Makes the named operation fail with a network error until cleared.
    pub async fn set_failing(&self, op: &str) {
        self.failing.lock().await.insert(op.to_string());
    }

    /// The operations invoked so far, in order.
    pub async fn calls(&self) -> Vec<String> {
        self.calls.lock().await.clone()
    }

    async fn record(&self, call: String, op: &str) -> Result<(), StoreError> {
        self.calls.lock().await.push(call);
        if self.failing.lock().await.contains(op) {
            return Err(StoreError::Network("scripted failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl FeedStore for ScriptedStore {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn fetch_feed(&self) -> Result<Vec<Post>, StoreError> {
        self.record("fetch_feed".to_string(), "fetch_feed").await?;
        Ok(self.feed.lock().await.clone())
    }

    async fn fetch_comments(&self, post_id: &str) -> Result<Vec<Comment>, StoreError> {
        self.record(format!("fetch_comments({post_id})"), "fetch_comments")
            .await?;
        Ok(self
            .comments
            .lock()
            .await
            .get(post_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn submit_post(&self, _draft: &PostDraft) -> Result<PostAck, StoreError> {
        self.record("submit_post".to_string(), "submit_post").await?;
        Ok(PostAck {
            id: "created-post".to_string(),
        })
    }

    async fn submit_comment(&self, draft: &CommentDraft) -> Result<CommentAck, StoreError> {
        self.record(
            format!("submit_comment({})", draft.post_id),
            "submit_comment",
        )
        .await?;
        Ok(CommentAck {
            id: "created-comment".to_string(),
        })
    }
}

/// A post with placeholder content for the given id.
pub fn test_post(id: &str) -> Post {
    Post {
        id: id.to_string(),
        author_name: "poster".to_string(),
        author_avatar_url: "https://img.example/poster.png".to_string(),
        text: format!("post {id}"),
        image_url: None,
        created_at: Utc::now(),
    }
}

/// A comment with placeholder content, attached to the given post.
pub fn test_comment(id: &str, post_id: &str) -> Comment {
    Comment {
        id: id.to_string(),
        post_id: post_id.to_string(),
        author_name: "commenter".to_string(),
        author_avatar_url: "https://img.example/commenter.png".to_string(),
        body: format!("comment {id}"),
        created_at: Utc::now(),
    }
}

/// Creates a signed-in App backed by a fresh ScriptedStore.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(
        std::sync::Arc::new(ScriptedStore::new()),
        Some(test_session()),
    )
}

pub fn test_session() -> Session {
    Session {
        display_name: "alice".to_string(),
        avatar_url: "u".to_string(),
    }
}
