//! Submit-enablement guards shared by the comment thread and the composer.
//!
//! Rejections here are UI-enablement decisions, not errors: a blocked
//! submit never reaches the store.

use std::fmt;

use crate::api::Session;

/// Phase of a submit cycle. At most one write is in flight per machine;
/// `begin_submit` refuses for anything but `Idle` and the triggering
/// control renders disabled. The two busy phases are distinct so a
/// settlement that is not the cycle's own refetch (a manual refresh, a
/// slow mount-time load) cannot unlock the machine early.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    #[default]
    Idle,
    /// `begin_submit` accepted; the write has not settled.
    WritePending,
    /// The write settled Ok; the cycle's own refetch has not settled.
    AwaitingRefetch,
}

/// Why a submit was not started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitBlock {
    /// A previous submit has not settled yet.
    AlreadyPending,
    /// Draft text is empty.
    EmptyDraft,
    /// No session; the UI offers a sign-in affordance instead.
    NotSignedIn,
}

impl fmt::Display for SubmitBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitBlock::AlreadyPending => write!(f, "a submission is already in flight"),
            SubmitBlock::EmptyDraft => write!(f, "nothing to submit"),
            SubmitBlock::NotSignedIn => write!(f, "sign in to post"),
        }
    }
}

/// Checks whether a submit may start for the given draft text and session.
pub fn submit_allowed(
    phase: SubmitPhase,
    text: &str,
    session: Option<&Session>,
) -> Result<(), SubmitBlock> {
    if phase != SubmitPhase::Idle {
        return Err(SubmitBlock::AlreadyPending);
    }
    if session.is_none() {
        return Err(SubmitBlock::NotSignedIn);
    }
    if text.trim().is_empty() {
        return Err(SubmitBlock::EmptyDraft);
    }
    Ok(())
}
