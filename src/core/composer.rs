//! # Post Composer
//!
//! The "new post" composition flow: draft text, optional image url
//! attachment, and the submit cycle. The composer never appends to the
//! feed locally — after a successful write the full feed is refetched and
//! handed to the feed owner wholesale, which is the sole source of the
//! new post's appearance. The store stays authoritative for server-
//! assigned fields (id, timestamp), so there is no reconciliation layer
//! to get wrong.

use log::{debug, warn};

use crate::api::{PostDraft, Session};
use crate::core::guard::{submit_allowed, SubmitBlock, SubmitPhase};

#[derive(Default)]
pub struct Composer {
    /// Post draft text.
    pub draft_text: String,
    /// Attached image url; empty when none attached.
    pub draft_image_url: String,
    /// Side input the image url is typed into before attaching.
    pub staged_image_url: String,
    /// Whether the image-url side panel is open.
    pub image_panel_open: bool,
    phase: SubmitPhase,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    pub fn toggle_image_panel(&mut self) {
        self.image_panel_open = !self.image_panel_open;
    }

    /// Copies the staged url into the draft, clears the staged input and
    /// closes the panel. An empty staged value is silently ignored — a
    /// no-op, not an error.
    pub fn attach_image(&mut self) {
        if self.staged_image_url.trim().is_empty() {
            return;
        }
        self.draft_image_url = std::mem::take(&mut self.staged_image_url);
        self.image_panel_open = false;
        debug!("image attached to post draft");
    }

    /// Starts a submit cycle. Blocked submits leave all state untouched
    /// and no write call may be issued.
    pub fn begin_submit(&mut self, session: Option<&Session>) -> Result<PostDraft, SubmitBlock> {
        submit_allowed(self.phase, &self.draft_text, session)?;
        let session = session.ok_or(SubmitBlock::NotSignedIn)?;

        self.phase = SubmitPhase::WritePending;
        debug!("post submit pending");
        Ok(PostDraft {
            text: self.draft_text.clone(),
            author_name: session.display_name.clone(),
            author_avatar_url: session.avatar_url.clone(),
            image_url: self.draft_image_url.clone(),
        })
    }

    /// The write settled Ok: reset the composition state now. The machine
    /// moves to `AwaitingRefetch` until the full-feed refetch settles; the
    /// caller must re-issue `fetch_feed` and hand the result to the feed
    /// owner.
    pub fn write_succeeded(&mut self) {
        self.draft_text.clear();
        self.draft_image_url.clear();
        self.staged_image_url.clear();
        self.image_panel_open = false;
        self.phase = SubmitPhase::AwaitingRefetch;
        debug!("post created; awaiting feed refetch");
    }

    /// The write settled Err: both drafts stay intact for a retry and the
    /// refetch is skipped.
    pub fn write_failed(&mut self) {
        self.phase = SubmitPhase::Idle;
        warn!("post submit failed; draft kept");
    }

    /// A feed fetch settled (either way). Only the cycle's own refetch
    /// ends the cycle: a manual refresh landing while the write is still
    /// in flight leaves the machine locked.
    pub fn refetch_settled(&mut self) {
        if self.phase == SubmitPhase::AwaitingRefetch {
            self.phase = SubmitPhase::Idle;
        }
    }
}
