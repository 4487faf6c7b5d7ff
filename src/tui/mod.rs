//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI, and
//! translates keyboard events into core state transitions.
//!
//! This is the only module that knows about ratatui and crossterm; the
//! synchronization core in `core` is UI-agnostic.
//!
//! ## I/O Model
//!
//! Store calls never run on the event loop. Each fetch or write is
//! spawned as a tokio task that reports its settlement over an `mpsc`
//! channel as a [`FeedAction`]; the loop drains the channel, applies
//! `update()`, and runs the returned effects (further fetches, toasts).
//! Comment settlements carry their post id, so a settlement arriving
//! after its post left the feed simply finds no thread and is dropped.
//!
//! ## Redraw Strategy
//!
//! Conditional redraw: the loop polls with a short timeout while toasts
//! are live or a fetch is in flight (so spinners and expiry stay fresh)
//! and a long one when idle, redrawing only on events or settlements.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{mpsc, Arc};

use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;

use crate::api::{CommentDraft, FeedStore, HttpStore, PostDraft};
use crate::core::action::{update, Effect, FeedAction, Severity};
use crate::core::config::ResolvedConfig;
use crate::core::guard::SubmitBlock;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{FeedEvent, FeedListState, ToastState};
use crate::tui::event::{poll_event_immediate, poll_event_timeout, TuiEvent};

/// Which part of the UI owns the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Navigate posts; plain keys are commands.
    Feed,
    /// Typing the post draft.
    ComposerText,
    /// Typing the staged image url.
    ComposerImage,
    /// Typing the comment draft on the selected post.
    CommentInput,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub feed_list: FeedListState,
    pub toasts: ToastState,
    pub focus: Focus,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            feed_list: FeedListState::new(),
            toasts: ToastState::new(),
            focus: Focus::Feed,
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableBracketedPaste)?;
        info!("Terminal modes enabled (bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste);
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let store: Arc<dyn FeedStore> = Arc::new(HttpStore::new(config.base_url.clone()));
    let mut app = App::new(store, config.session);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new()?;

    // Channel for settlements from background tasks
    let (tx, rx) = mpsc::channel();

    // Initial feed load; per-post comment loads follow from its settlement.
    app.feed_loading = true;
    run_effects(vec![Effect::LoadFeed], &app, &mut tui, &tx);

    let mut needs_redraw = true; // Force first frame

    loop {
        if tui.toasts.prune() {
            needs_redraw = true;
        }
        let busy = app.feed_loading || !tui.toasts.is_empty();
        if busy {
            needs_redraw = true;
        }

        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        // Short poll while busy (toast expiry), long when idle.
        let timeout = if busy {
            std::time::Duration::from_millis(100)
        } else {
            std::time::Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Resize just needs a redraw (already flagged above)
            if matches!(event, TuiEvent::Resize) {
                continue;
            }

            // Ctrl+C always quits regardless of focus
            if matches!(event, TuiEvent::ForceQuit) {
                should_quit = true;
                continue;
            }

            match tui.focus {
                Focus::Feed => {
                    if let Some(feed_event) = tui.feed_list.handle_event(&event) {
                        match feed_event {
                            FeedEvent::Quit => should_quit = true,
                            FeedEvent::Refresh => {
                                if !app.feed_loading {
                                    app.feed_loading = true;
                                    run_effects(vec![Effect::LoadFeed], &app, &mut tui, &tx);
                                }
                            }
                            FeedEvent::Compose => tui.focus = Focus::ComposerText,
                            FeedEvent::ToggleComments => {
                                let selected = tui.feed_list.selected;
                                let signed_in = app.session.is_some();
                                if let Some(thread) = app.threads.get_mut(selected) {
                                    thread.toggle_panel();
                                    if thread.panel_open && signed_in {
                                        tui.focus = Focus::CommentInput;
                                    }
                                }
                            }
                        }
                    }
                }
                Focus::CommentInput => handle_comment_input(&event, &mut app, &mut tui, &tx),
                Focus::ComposerText => handle_composer_text(&event, &mut app, &mut tui, &tx),
                Focus::ComposerImage => handle_composer_image(&event, &mut app, &mut tui),
            }
        }

        if should_quit {
            break;
        }

        // Handle background settlements
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effects = update(&mut app, action);
            run_effects(effects, &app, &mut tui, &tx);
            tui.feed_list.sync(app.threads.len());
        }
    }

    ratatui::restore();
    Ok(())
}

fn handle_comment_input(
    event: &TuiEvent,
    app: &mut App,
    tui: &mut TuiState,
    tx: &mpsc::Sender<FeedAction>,
) {
    let session = app.session.clone();
    let selected = tui.feed_list.selected;
    let Some(thread) = app.threads.get_mut(selected) else {
        tui.focus = Focus::Feed;
        return;
    };

    match event {
        TuiEvent::Escape => tui.focus = Focus::Feed,
        TuiEvent::InputChar(c) => thread.draft.push(*c),
        TuiEvent::Paste(text) => thread.draft.push_str(text),
        TuiEvent::Backspace => {
            thread.draft.pop();
        }
        TuiEvent::Submit => match thread.begin_submit(session.as_ref()) {
            Ok(draft) => {
                tui.toasts.push(Severity::Info, "Posting comment...");
                spawn_comment_submit(app.store.clone(), draft, tx.clone());
            }
            Err(SubmitBlock::NotSignedIn) => {
                tui.toasts.push(Severity::Info, "Sign in to comment");
            }
            // Disabled affordances, not errors: nothing to submit, or a
            // submit is already in flight.
            Err(SubmitBlock::EmptyDraft | SubmitBlock::AlreadyPending) => {}
        },
        _ => {}
    }
}

fn handle_composer_text(
    event: &TuiEvent,
    app: &mut App,
    tui: &mut TuiState,
    tx: &mpsc::Sender<FeedAction>,
) {
    let session = app.session.clone();
    match event {
        TuiEvent::Escape => tui.focus = Focus::Feed,
        TuiEvent::ToggleImagePanel => {
            app.composer.toggle_image_panel();
            if app.composer.image_panel_open {
                tui.focus = Focus::ComposerImage;
            }
        }
        TuiEvent::InputChar(c) => app.composer.draft_text.push(*c),
        TuiEvent::Paste(text) => app.composer.draft_text.push_str(text),
        TuiEvent::Backspace => {
            app.composer.draft_text.pop();
        }
        TuiEvent::Submit => match app.composer.begin_submit(session.as_ref()) {
            Ok(draft) => {
                tui.toasts.push(Severity::Info, "Posting tweet...");
                spawn_post_submit(app.store.clone(), draft, tx.clone());
            }
            Err(SubmitBlock::NotSignedIn) => {
                tui.toasts.push(Severity::Info, "Sign in to post");
            }
            Err(SubmitBlock::EmptyDraft | SubmitBlock::AlreadyPending) => {}
        },
        _ => {}
    }
}

fn handle_composer_image(event: &TuiEvent, app: &mut App, tui: &mut TuiState) {
    match event {
        TuiEvent::Escape | TuiEvent::ToggleImagePanel => {
            app.composer.image_panel_open = false;
            tui.focus = Focus::ComposerText;
        }
        TuiEvent::InputChar(c) => app.composer.staged_image_url.push(*c),
        TuiEvent::Paste(text) => app.composer.staged_image_url.push_str(text),
        TuiEvent::Backspace => {
            app.composer.staged_image_url.pop();
        }
        TuiEvent::Submit => {
            // Empty staged value: attach_image no-ops and focus stays put.
            app.composer.attach_image();
            if !app.composer.image_panel_open {
                tui.focus = Focus::ComposerText;
            }
        }
        _ => {}
    }
}

/// Runs the effects an `update()` asked for: toasts locally, store calls
/// as background tasks.
fn run_effects(
    effects: Vec<Effect>,
    app: &App,
    tui: &mut TuiState,
    tx: &mpsc::Sender<FeedAction>,
) {
    for effect in effects {
        match effect {
            Effect::LoadFeed => spawn_feed_fetch(app.store.clone(), tx.clone()),
            Effect::LoadComments(post_ids) => {
                for post_id in post_ids {
                    spawn_comment_fetch(app.store.clone(), post_id, tx.clone());
                }
            }
            Effect::Notify(severity, text) => tui.toasts.push(severity, text),
        }
    }
}

fn spawn_feed_fetch(store: Arc<dyn FeedStore>, tx: mpsc::Sender<FeedAction>) {
    info!("Spawning feed fetch");
    tokio::spawn(async move {
        let result = store.fetch_feed().await;
        if tx.send(FeedAction::FeedLoaded(result)).is_err() {
            warn!("Failed to send feed settlement: receiver dropped");
        }
    });
}

fn spawn_comment_fetch(store: Arc<dyn FeedStore>, post_id: String, tx: mpsc::Sender<FeedAction>) {
    debug!("Spawning comment fetch for post {}", post_id);
    tokio::spawn(async move {
        let result = store.fetch_comments(&post_id).await;
        if tx
            .send(FeedAction::CommentsLoaded { post_id, result })
            .is_err()
        {
            warn!("Failed to send comment settlement: receiver dropped");
        }
    });
}

fn spawn_post_submit(store: Arc<dyn FeedStore>, draft: PostDraft, tx: mpsc::Sender<FeedAction>) {
    info!("Spawning post submit");
    tokio::spawn(async move {
        let result = store.submit_post(&draft).await;
        if tx.send(FeedAction::PostWriteSettled(result)).is_err() {
            warn!("Failed to send post write settlement: receiver dropped");
        }
    });
}

fn spawn_comment_submit(
    store: Arc<dyn FeedStore>,
    draft: CommentDraft,
    tx: mpsc::Sender<FeedAction>,
) {
    info!("Spawning comment submit for post {}", draft.post_id);
    tokio::spawn(async move {
        let post_id = draft.post_id.clone();
        let result = store.submit_comment(&draft).await;
        if tx
            .send(FeedAction::CommentWriteSettled { post_id, result })
            .is_err()
        {
            warn!("Failed to send comment write settlement: receiver dropped");
        }
    });
}
