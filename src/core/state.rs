//! # Application State
//!
//! Core business state for chirp. This module contains domain logic only -
//! no TUI-specific types. Presentation state (selection, scroll) lives in
//! the `tui` module.
//!
//! ```text
//! App
//! ├── store: Arc<dyn FeedStore>      // remote store
//! ├── session: Option<Session>      // injected identity; None = signed out
//! ├── composer: Composer            // new-post machine
//! ├── threads: Vec<CommentThread>   // one per post, feed order
//! └── feed_loading: bool            // initial/refresh fetch in flight
//! ```
//!
//! Settlement-driven changes go through `update(app, action)` in
//! action.rs; keystroke-level draft edits are applied directly by the
//! event loop before a submit cycle begins.

use std::collections::HashMap;
use std::sync::Arc;

use crate::api::{FeedStore, Post, Session};
use crate::core::composer::Composer;
use crate::core::thread::CommentThread;

pub struct App {
    pub store: Arc<dyn FeedStore>,
    pub session: Option<Session>,
    pub composer: Composer,
    /// One thread per post, in feed (store) order.
    pub threads: Vec<CommentThread>,
    pub feed_loading: bool,
}

impl App {
    pub fn new(store: Arc<dyn FeedStore>, session: Option<Session>) -> Self {
        Self {
            store,
            session,
            composer: Composer::new(),
            threads: Vec::new(),
            feed_loading: false,
        }
    }

    /// Replaces the feed wholesale, in the store's order.
    ///
    /// Threads for surviving post ids keep their state (comments, draft,
    /// open panel) — the post list was replaced, not the comment caches.
    /// Newly mounted threads start empty; their ids are returned so the
    /// caller can issue their comment fetches.
    pub fn replace_feed(&mut self, posts: Vec<Post>) -> Vec<String> {
        let mut existing: HashMap<String, CommentThread> = self
            .threads
            .drain(..)
            .map(|t| (t.post.id.clone(), t))
            .collect();

        let mut newly_mounted = Vec::new();
        self.threads = posts
            .into_iter()
            .map(|post| match existing.remove(&post.id) {
                Some(mut thread) => {
                    // The post record itself may have been re-fetched.
                    thread.post = post;
                    thread
                }
                None => {
                    newly_mounted.push(post.id.clone());
                    CommentThread::new(post)
                }
            })
            .collect();
        // Threads left in `existing` belonged to posts no longer in the
        // feed; they are dropped here, and any in-flight settlement for
        // them will find no thread to land on.
        newly_mounted
    }

    /// Looks up the thread for a post id. `None` means the post left the
    /// feed and its state was released.
    pub fn thread_mut(&mut self, post_id: &str) -> Option<&mut CommentThread> {
        self.threads.iter_mut().find(|t| t.post.id == post_id)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::{test_app, test_comment, test_post};

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert!(app.threads.is_empty());
        assert!(!app.feed_loading);
        assert!(app.session.is_some());
    }

    #[test]
    fn test_replace_feed_mounts_all_threads_initially() {
        let mut app = test_app();
        let new = app.replace_feed(vec![test_post("p1"), test_post("p2")]);
        assert_eq!(new, vec!["p1".to_string(), "p2".to_string()]);
        assert_eq!(app.threads.len(), 2);
        assert!(app.threads.iter().all(|t| t.comments.is_empty()));
    }

    #[test]
    fn test_replace_feed_reuses_surviving_threads() {
        let mut app = test_app();
        app.replace_feed(vec![test_post("p1")]);
        app.thread_mut("p1")
            .unwrap()
            .replace_comments(vec![test_comment("c1", "p1")]);
        app.thread_mut("p1").unwrap().draft = "typing...".to_string();

        // A new post arrives at the top; p1 survives with its state.
        let new = app.replace_feed(vec![test_post("p2"), test_post("p1")]);
        assert_eq!(new, vec!["p2".to_string()]);
        assert_eq!(app.threads[0].post.id, "p2");
        let p1 = app.thread_mut("p1").unwrap();
        assert_eq!(p1.comments.len(), 1);
        assert_eq!(p1.draft, "typing...");
    }

    #[test]
    fn test_replace_feed_releases_vanished_threads() {
        let mut app = test_app();
        app.replace_feed(vec![test_post("p1")]);
        app.replace_feed(vec![test_post("p2")]);
        assert!(app.thread_mut("p1").is_none());
    }
}
