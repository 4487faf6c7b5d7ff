//! # TUI Components
//!
//! Components follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components created fresh each frame from borrowed app state:
//! - `PostItem`: one post with its comment thread
//! - `ComposerBox`: the new-post panel
//! - `Toasts`: the notification overlay
//!
//! ### Stateful Components (Event-Driven)
//!
//! Persistent state structs paired with transient render wrappers:
//! - `FeedListState` / `FeedList`: scrollable feed with selection
//! - `ToastState`: the toast stack and its expiry timer
//!
//! Components receive external data as "props" (constructor parameters),
//! not by reading global state, which keeps dependencies explicit and the
//! render path testable with `TestBackend`.

pub mod composer_box;
pub mod feed_list;
pub mod post_item;
pub mod toast;

pub use composer_box::{ComposerBox, ComposerFocus};
pub use feed_list::{FeedEvent, FeedList, FeedListState};
pub use post_item::PostItem;
pub use toast::{ToastState, Toasts};
