//! # Synchronization Core
//!
//! chirp's consistency model in one place, with no knowledge of any
//! specific UI technology:
//!
//! - [`state`]: the `App` struct — feed threads, composer, session
//! - [`action`]: settlement actions + `update()` transition function
//! - [`thread`]: per-post comment cache + comment submit cycle
//! - [`composer`]: new-post draft + post submit cycle
//! - [`guard`]: shared submit-enablement checks
//! - [`config`]: layered configuration and session resolution
//!
//! Every write follows the same protocol: guard → write pending → write
//! settles → on success, full refetch of the affected list, applied
//! wholesale; only that refetch's settlement ends the cycle.
//! There is no optimistic local mutation anywhere; the remote store is
//! the single ordering and content authority. The trade is latency (your
//! own post or comment appears only after the refetch) for a consistency
//! story with no merge step.
//!
//! I/O lives outside: the state machines only transition, and the TUI
//! event loop spawns the store calls and routes their settlements back.

pub mod action;
pub mod composer;
pub mod config;
pub mod guard;
pub mod state;
pub mod thread;
