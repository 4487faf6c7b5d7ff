//! # Actions
//!
//! Every settlement coming back from a background store call becomes a
//! `FeedAction`. The feed fetch resolves? That's `FeedAction::FeedLoaded`.
//! A comment write settles? That's `FeedAction::CommentWriteSettled`.
//!
//! The `update()` function takes the current state and an action and
//! applies the transition, returning the follow-up effects the caller
//! must run. No I/O here — the TUI event loop spawns the store calls.
//!
//! ```text
//! State + Action  →  update()  →  New State + [Effect]
//! ```
//!
//! Comment settlements are keyed by post id. If the post has left the
//! feed by the time its settlement arrives, the action is dropped on the
//! floor: released state is never written to.

use log::{debug, info};

use crate::api::{Comment, CommentAck, Post, PostAck, StoreError};
use crate::core::state::App;

/// Settlement of a background store call.
#[derive(Debug)]
pub enum FeedAction {
    FeedLoaded(Result<Vec<Post>, StoreError>),
    CommentsLoaded {
        post_id: String,
        result: Result<Vec<Comment>, StoreError>,
    },
    PostWriteSettled(Result<PostAck, StoreError>),
    CommentWriteSettled {
        post_id: String,
        result: Result<CommentAck, StoreError>,
    },
}

/// Follow-up work an update asks the caller to run.
#[derive(Debug, PartialEq, Eq)]
pub enum Effect {
    /// Re-issue the full feed fetch.
    LoadFeed,
    /// Issue `fetch_comments` for each listed post.
    LoadComments(Vec<String>),
    /// Show a transient, non-blocking notification.
    Notify(Severity, String),
}

/// How a notification should read. The distinction between `Success` and
/// `Error` is load-bearing: a failed write must never look like success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

pub fn update(app: &mut App, action: FeedAction) -> Vec<Effect> {
    match action {
        FeedAction::FeedLoaded(Ok(posts)) => {
            app.feed_loading = false;
            info!("feed replaced: {} posts", posts.len());
            let newly_mounted = app.replace_feed(posts);
            app.composer.refetch_settled();
            if newly_mounted.is_empty() {
                vec![]
            } else {
                vec![Effect::LoadComments(newly_mounted)]
            }
        }
        FeedAction::FeedLoaded(Err(e)) => {
            // Fail soft: the previous feed snapshot stays visible.
            app.feed_loading = false;
            app.composer.refetch_settled();
            vec![Effect::Notify(
                Severity::Error,
                format!("Couldn't load the feed: {e}"),
            )]
        }
        FeedAction::CommentsLoaded { post_id, result } => match app.thread_mut(&post_id) {
            Some(thread) => match result {
                Ok(comments) => {
                    thread.replace_comments(comments);
                    vec![]
                }
                Err(e) => {
                    thread.load_failed();
                    vec![Effect::Notify(
                        Severity::Error,
                        format!("Couldn't load comments: {e}"),
                    )]
                }
            },
            None => {
                debug!("dropping comment settlement for released post {post_id}");
                vec![]
            }
        },
        FeedAction::PostWriteSettled(Ok(ack)) => {
            info!("post {} created", ack.id);
            app.composer.write_succeeded();
            app.feed_loading = true;
            vec![
                Effect::Notify(Severity::Success, "Tweet posted".to_string()),
                Effect::LoadFeed,
            ]
        }
        FeedAction::PostWriteSettled(Err(e)) => {
            app.composer.write_failed();
            vec![Effect::Notify(
                Severity::Error,
                format!("Tweet not posted: {e}"),
            )]
        }
        FeedAction::CommentWriteSettled { post_id, result } => {
            let Some(thread) = app.thread_mut(&post_id) else {
                debug!("dropping comment write settlement for released post {post_id}");
                return vec![];
            };
            match result {
                Ok(_) => {
                    thread.write_succeeded();
                    vec![
                        Effect::Notify(Severity::Success, "Comment posted".to_string()),
                        Effect::LoadComments(vec![post_id]),
                    ]
                }
                Err(e) => {
                    thread.write_failed();
                    vec![Effect::Notify(
                        Severity::Error,
                        format!("Comment not posted: {e}"),
                    )]
                }
            }
        }
    }
}
