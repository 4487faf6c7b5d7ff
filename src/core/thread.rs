//! # Comment Thread
//!
//! Per-post comment state: the locally held comment list, the comment
//! draft, and the submit cycle. One instance exists per post in the feed
//! and owns its comments exclusively.
//!
//! The comment list is a snapshot. It is populated by a fetch at mount,
//! and wholly replaced after every successful refetch — never patched.
//! A newly authored comment is *not* inserted locally on submit; it
//! becomes visible only once the post-write refetch settles. Refetch-
//! after-write is the consistency mechanism here, replacing any
//! cache-patch/merge step.
//!
//! I/O happens elsewhere (the event loop spawns store calls and routes
//! settlements back in). This type only transitions state:
//!
//! ```text
//! Idle --begin_submit--> WritePending --write_succeeded--> AwaitingRefetch
//!                             |                                 |
//!                             |write_failed                     |replace_comments / load_failed
//!                             v                                 v
//!                           Idle                              Idle
//! ```
//!
//! Only the cycle's own refetch settlement unlocks the machine: a
//! settlement landing while the phase is `WritePending` (a late mount
//! load, say) replaces the snapshot but leaves the phase alone.

use log::{debug, warn};

use crate::api::{Comment, CommentDraft, Post, Session};
use crate::core::guard::{submit_allowed, SubmitBlock, SubmitPhase};

pub struct CommentThread {
    pub post: Post,
    /// Latest successful `fetch_comments` snapshot, in store order.
    pub comments: Vec<Comment>,
    /// Comment draft text. Lives from first keystroke to submit settlement.
    pub draft: String,
    /// Whether the comment panel (input + list) is open.
    pub panel_open: bool,
    phase: SubmitPhase,
}

impl CommentThread {
    /// Mounts a thread for one post. Comments start empty; the caller is
    /// expected to issue one `fetch_comments(post.id)` and route the
    /// settlement to [`replace_comments`](Self::replace_comments).
    pub fn new(post: Post) -> Self {
        Self {
            post,
            comments: Vec::new(),
            draft: String::new(),
            panel_open: false,
            phase: SubmitPhase::Idle,
        }
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    /// Pure boolean flip; does not trigger a fetch (comments were already
    /// loaded at mount).
    pub fn toggle_panel(&mut self) {
        self.panel_open = !self.panel_open;
    }

    /// Starts a submit cycle. On success the machine is `WritePending` and
    /// the returned draft must be handed to the store; a blocked submit
    /// leaves all state untouched and no write call may be issued.
    pub fn begin_submit(&mut self, session: Option<&Session>) -> Result<CommentDraft, SubmitBlock> {
        submit_allowed(self.phase, &self.draft, session)?;
        let session = session.ok_or(SubmitBlock::NotSignedIn)?;

        self.phase = SubmitPhase::WritePending;
        debug!("comment submit pending (post {})", self.post.id);
        Ok(CommentDraft {
            body: self.draft.clone(),
            post_id: self.post.id.clone(),
            author_name: session.display_name.clone(),
            author_avatar_url: session.avatar_url.clone(),
        })
    }

    /// The write settled Ok: clear the draft and close the panel now,
    /// before the refetch even starts. The machine moves to
    /// `AwaitingRefetch` until the refetch settles; the caller must
    /// re-issue `fetch_comments(post.id)`.
    pub fn write_succeeded(&mut self) {
        self.draft.clear();
        self.panel_open = false;
        self.phase = SubmitPhase::AwaitingRefetch;
        debug!("comment posted on {}; awaiting refetch", self.post.id);
    }

    /// The write settled Err: the draft stays intact so the user can retry,
    /// the panel stays open, and no refetch happens.
    pub fn write_failed(&mut self) {
        self.phase = SubmitPhase::Idle;
        warn!("comment submit failed on {}; draft kept", self.post.id);
    }

    /// A comments fetch settled Ok (mount load or post-write refetch).
    /// Wholesale replacement: the snapshot is exactly the store's answer.
    /// Unlocks the machine only from `AwaitingRefetch`; a load settling
    /// while a write is in flight must not re-enable submit.
    pub fn replace_comments(&mut self, comments: Vec<Comment>) {
        debug_assert!(
            comments.iter().all(|c| c.post_id == self.post.id),
            "store must filter comments by post id"
        );
        self.comments = comments;
        if self.phase == SubmitPhase::AwaitingRefetch {
            self.phase = SubmitPhase::Idle;
        }
    }

    /// A comments fetch settled Err: fail soft, keeping the current
    /// snapshot. Non-fatal; the caller surfaces a notification.
    pub fn load_failed(&mut self) {
        if self.phase == SubmitPhase::AwaitingRefetch {
            self.phase = SubmitPhase::Idle;
        }
        warn!("comment fetch failed for {}; keeping snapshot", self.post.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::FeedStore;
    use crate::test_support::{test_comment, test_post, test_session, ScriptedStore};

    #[test]
    fn test_mounts_with_empty_comments_and_closed_panel() {
        let thread = CommentThread::new(test_post("p1"));
        assert!(thread.comments.is_empty());
        assert!(!thread.panel_open);
        assert_eq!(thread.phase(), SubmitPhase::Idle);
    }

    #[test]
    fn test_toggle_panel_flips_without_fetching() {
        let mut thread = CommentThread::new(test_post("p1"));
        thread.toggle_panel();
        assert!(thread.panel_open);
        thread.toggle_panel();
        assert!(!thread.panel_open);
    }

    #[test]
    fn test_begin_submit_builds_draft_from_session() {
        let mut thread = CommentThread::new(test_post("p1"));
        thread.draft = "nice post".to_string();

        let draft = thread.begin_submit(Some(&test_session())).unwrap();
        assert_eq!(draft.body, "nice post");
        assert_eq!(draft.post_id, "p1");
        assert_eq!(draft.author_name, "alice");
        assert_eq!(draft.author_avatar_url, "u");
        assert_eq!(thread.phase(), SubmitPhase::WritePending);
    }

    #[test]
    fn test_begin_submit_rejected_for_empty_draft() {
        let mut thread = CommentThread::new(test_post("p1"));
        assert_eq!(
            thread.begin_submit(Some(&test_session())),
            Err(SubmitBlock::EmptyDraft)
        );
        assert_eq!(thread.phase(), SubmitPhase::Idle);
    }

    #[test]
    fn test_begin_submit_rejected_without_session() {
        let mut thread = CommentThread::new(test_post("p1"));
        thread.draft = "hi".to_string();
        assert_eq!(thread.begin_submit(None), Err(SubmitBlock::NotSignedIn));
    }

    #[test]
    fn test_begin_submit_rejected_while_pending() {
        let mut thread = CommentThread::new(test_post("p1"));
        thread.draft = "hi".to_string();
        thread.begin_submit(Some(&test_session())).unwrap();

        thread.draft = "again".to_string();
        assert_eq!(
            thread.begin_submit(Some(&test_session())),
            Err(SubmitBlock::AlreadyPending)
        );
    }

    #[test]
    fn test_write_success_clears_draft_and_closes_panel_before_refetch() {
        let mut thread = CommentThread::new(test_post("p1"));
        thread.panel_open = true;
        thread.draft = "hi".to_string();
        thread.begin_submit(Some(&test_session())).unwrap();

        thread.write_succeeded();
        // Reset happens regardless of the refetch's own latency.
        assert!(thread.draft.is_empty());
        assert!(!thread.panel_open);
        // No optimistic insertion: the comment is invisible until refetch.
        assert!(thread.comments.is_empty());
        assert_eq!(thread.phase(), SubmitPhase::AwaitingRefetch);
    }

    #[test]
    fn test_write_failure_keeps_draft_and_panel() {
        let mut thread = CommentThread::new(test_post("p1"));
        thread.panel_open = true;
        thread.draft = "hi".to_string();
        thread.begin_submit(Some(&test_session())).unwrap();

        thread.write_failed();
        assert_eq!(thread.draft, "hi");
        assert!(thread.panel_open);
        assert_eq!(thread.phase(), SubmitPhase::Idle);
    }

    #[test]
    fn test_replace_comments_is_wholesale() {
        let mut thread = CommentThread::new(test_post("p1"));
        thread.replace_comments(vec![test_comment("c1", "p1"), test_comment("c2", "p1")]);
        assert_eq!(thread.comments.len(), 2);

        // A later fetch returning less replaces, never merges.
        thread.replace_comments(vec![test_comment("c3", "p1")]);
        assert_eq!(thread.comments.len(), 1);
        assert_eq!(thread.comments[0].id, "c3");
    }

    /// A load settling while the write is still in flight (a slow mount
    /// fetch, say) replaces the snapshot but must not re-enable submit.
    #[test]
    fn test_load_during_write_keeps_submit_locked() {
        let mut thread = CommentThread::new(test_post("p1"));
        thread.draft = "hi".to_string();
        thread.begin_submit(Some(&test_session())).unwrap();

        thread.replace_comments(vec![test_comment("c1", "p1")]);
        assert_eq!(thread.phase(), SubmitPhase::WritePending);
        thread.draft = "again".to_string();
        assert_eq!(
            thread.begin_submit(Some(&test_session())),
            Err(SubmitBlock::AlreadyPending)
        );

        thread.load_failed();
        assert_eq!(thread.phase(), SubmitPhase::WritePending);
    }

    #[test]
    fn test_load_failure_keeps_snapshot() {
        let mut thread = CommentThread::new(test_post("p1"));
        thread.replace_comments(vec![test_comment("c1", "p1")]);
        thread.load_failed();
        assert_eq!(thread.comments.len(), 1);
        assert_eq!(thread.phase(), SubmitPhase::Idle);
    }

    /// Full submit cycle against the scripted store: exactly one write,
    /// then exactly one refetch, then the new comment is displayed and the
    /// draft is empty (spec'd end-to-end scenario).
    #[tokio::test]
    async fn test_submit_cycle_write_then_refetch() {
        let store = ScriptedStore::new();
        store.push_comments("p1", vec![]).await;

        let mut thread = CommentThread::new(test_post("p1"));
        thread.replace_comments(store.fetch_comments("p1").await.unwrap());
        assert!(thread.comments.is_empty());

        thread.draft = "nice post".to_string();
        thread.panel_open = true;
        let draft = thread.begin_submit(Some(&test_session())).unwrap();

        store.push_comments("p1", vec![test_comment("c1", "p1")]).await;
        let result = store.submit_comment(&draft).await;
        assert!(result.is_ok());
        thread.write_succeeded();

        thread.replace_comments(store.fetch_comments("p1").await.unwrap());
        assert_eq!(thread.comments.len(), 1);
        assert!(thread.draft.is_empty());
        assert_eq!(thread.phase(), SubmitPhase::Idle);

        let calls = store.calls().await;
        assert_eq!(
            calls,
            vec![
                "fetch_comments(p1)".to_string(),
                "submit_comment(p1)".to_string(),
                "fetch_comments(p1)".to_string(),
            ]
        );
    }

    /// Failed write: draft survives, and no refetch is issued.
    #[tokio::test]
    async fn test_submit_cycle_write_failure_skips_refetch() {
        let store = ScriptedStore::new();
        store.set_failing("submit_comment").await;

        let mut thread = CommentThread::new(test_post("p1"));
        thread.draft = "nice post".to_string();
        thread.panel_open = true;
        let draft = thread.begin_submit(Some(&test_session())).unwrap();

        assert!(store.submit_comment(&draft).await.is_err());
        thread.write_failed();

        assert_eq!(thread.draft, "nice post");
        assert!(thread.panel_open);
        assert_eq!(store.calls().await, vec!["submit_comment(p1)".to_string()]);
    }
}
