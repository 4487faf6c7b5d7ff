//! HTTP implementation of [`FeedStore`].
//!
//! Talks to the feed service's JSON API:
//! - `GET  /api/tweets`              — full feed, newest first
//! - `GET  /api/comments?tweetId=..` — comments for one post, server-filtered
//! - `POST /api/addTweet`            — create a post
//! - `POST /api/addComment`          — create a comment
//!
//! Wire field names (`_id`, `_createdAt`, `profileImg`, ...) follow the
//! service's document shapes; this module owns the translation into the
//! domain types.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::store::{FeedStore, StoreError};
use super::types::{Comment, CommentAck, CommentDraft, Post, PostAck, PostDraft};

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Deserialize, Debug)]
struct WireTweet {
    #[serde(rename = "_id")]
    id: String,
    text: String,
    username: String,
    #[serde(rename = "profileImg")]
    profile_img: String,
    #[serde(default)]
    image: Option<String>,
    #[serde(rename = "_createdAt")]
    created_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug)]
struct WireComment {
    #[serde(rename = "_id")]
    id: String,
    comment: String,
    #[serde(rename = "tweetId")]
    tweet_id: String,
    username: String,
    #[serde(rename = "profileImg")]
    profile_img: String,
    #[serde(rename = "_createdAt")]
    created_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug)]
struct TweetsResponse {
    tweets: Vec<WireTweet>,
}

#[derive(Deserialize, Debug)]
struct CommentsResponse {
    comments: Vec<WireComment>,
}

/// Body for `POST /api/addTweet`. Author fields are supplied by the
/// caller, not derived server-side.
#[derive(Serialize, Debug)]
struct AddTweetBody<'a> {
    text: &'a str,
    username: &'a str,
    #[serde(rename = "profileImg")]
    profile_img: &'a str,
    image: &'a str,
}

/// Body for `POST /api/addComment`.
#[derive(Serialize, Debug)]
struct AddCommentBody<'a> {
    comment: &'a str,
    #[serde(rename = "tweetId")]
    tweet_id: &'a str,
    username: &'a str,
    #[serde(rename = "profileImg")]
    profile_img: &'a str,
}

#[derive(Deserialize, Debug)]
struct CreatedResponse {
    #[serde(rename = "_id")]
    id: String,
}

// ============================================================================
// Translation Layer
// ============================================================================

fn post_from_wire(wire: WireTweet) -> Post {
    Post {
        id: wire.id,
        author_name: wire.username,
        author_avatar_url: wire.profile_img,
        text: wire.text,
        // The service stores "" for postless images; normalize to None.
        image_url: wire.image.filter(|url| !url.is_empty()),
        created_at: wire.created_at,
    }
}

fn comment_from_wire(wire: WireComment) -> Comment {
    Comment {
        id: wire.id,
        post_id: wire.tweet_id,
        author_name: wire.username,
        author_avatar_url: wire.profile_img,
        body: wire.comment,
        created_at: wire.created_at,
    }
}

// ============================================================================
// Store Implementation
// ============================================================================

/// Feed store backed by the HTTP JSON API.
pub struct HttpStore {
    base_url: String,
    client: reqwest::Client,
}

impl HttpStore {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Converts a non-2xx response into `StoreError::Api`, consuming the body
    /// as the error message.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        warn!("store API error: {} - {}", status, message);
        Err(StoreError::Api { status, message })
    }
}

#[async_trait]
impl FeedStore for HttpStore {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch_feed(&self) -> Result<Vec<Post>, StoreError> {
        debug!("GET /api/tweets");
        let response = self
            .client
            .get(format!("{}/api/tweets", self.base_url))
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;
        let response = Self::check_status(response).await?;

        let body: TweetsResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))?;

        info!("fetched feed: {} posts", body.tweets.len());
        Ok(body.tweets.into_iter().map(post_from_wire).collect())
    }

    async fn fetch_comments(&self, post_id: &str) -> Result<Vec<Comment>, StoreError> {
        debug!("GET /api/comments?tweetId={}", post_id);
        let response = self
            .client
            .get(format!("{}/api/comments", self.base_url))
            .query(&[("tweetId", post_id)])
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;
        let response = Self::check_status(response).await?;

        let body: CommentsResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))?;

        debug!("fetched {} comments for post {}", body.comments.len(), post_id);
        Ok(body.comments.into_iter().map(comment_from_wire).collect())
    }

    async fn submit_post(&self, draft: &PostDraft) -> Result<PostAck, StoreError> {
        let body = AddTweetBody {
            text: &draft.text,
            username: &draft.author_name,
            profile_img: &draft.author_avatar_url,
            image: &draft.image_url,
        };
        info!("POST /api/addTweet ({} chars)", draft.text.len());

        let response = self
            .client
            .post(format!("{}/api/addTweet", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;
        let response = Self::check_status(response).await?;

        let created: CreatedResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))?;
        Ok(PostAck { id: created.id })
    }

    async fn submit_comment(&self, draft: &CommentDraft) -> Result<CommentAck, StoreError> {
        let body = AddCommentBody {
            comment: &draft.body,
            tweet_id: &draft.post_id,
            username: &draft.author_name,
            profile_img: &draft.author_avatar_url,
        };
        info!("POST /api/addComment (post {})", draft.post_id);

        let response = self
            .client
            .post(format!("{}/api/addComment", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;
        let response = Self::check_status(response).await?;

        let created: CreatedResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))?;
        Ok(CommentAck { id: created.id })
    }
}
