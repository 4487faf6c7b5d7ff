//! # FeedList Component
//!
//! The feed owner's view: a scrollable column of [`PostItem`]s in store
//! order, with keyboard selection. Post content lives in `App::threads`;
//! this component keeps only presentation state (selection, scroll,
//! cached heights).
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `FeedListState` lives in `TuiState`
//! - `FeedList` is created each frame with borrowed state

use ratatui::layout::{Rect, Size};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::state::App;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::post_item::PostItem;
use crate::tui::event::TuiEvent;

/// High-level events emitted by feed navigation.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    /// Open/close the comment panel on the selected post.
    ToggleComments,
    /// Move focus to the composer.
    Compose,
    /// Manually refresh the feed.
    Refresh,
    /// Leave the app.
    Quit,
}

/// Persistent presentation state for the feed column.
#[derive(Default)]
pub struct FeedListState {
    pub selected: usize,
    pub scroll_state: ScrollViewState,
    /// Item heights from the last render, for scroll-to-selected.
    heights: Vec<u16>,
    /// Thread count, synced by the event loop after every feed replace.
    item_count: usize,
}

impl FeedListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-syncs with the thread list after a wholesale feed replace,
    /// clamping the selection into range.
    pub fn sync(&mut self, item_count: usize) {
        self.item_count = item_count;
        if item_count == 0 {
            self.selected = 0;
        } else {
            self.selected = self.selected.min(item_count - 1);
        }
    }

    fn select_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn select_down(&mut self) {
        if self.item_count > 0 {
            self.selected = (self.selected + 1).min(self.item_count - 1);
        }
    }

    /// Scrolls just far enough that the selected item is fully visible.
    /// Height sums saturate; a feed taller than `u16::MAX` rows pins to
    /// the bottom instead of panicking.
    fn scroll_to_selected(&mut self, viewport_height: u16) {
        let top = saturating_sum(self.heights.iter().take(self.selected));
        let height = self.heights.get(self.selected).copied().unwrap_or(0);
        let offset = self.scroll_state.offset();

        let bottom = top.saturating_add(height);
        if top < offset.y {
            self.scroll_state
                .set_offset(ratatui::layout::Position { x: 0, y: top });
        } else if bottom > offset.y.saturating_add(viewport_height) {
            let y = bottom.saturating_sub(viewport_height);
            self.scroll_state
                .set_offset(ratatui::layout::Position { x: 0, y });
        }
    }
}

impl EventHandler for FeedListState {
    type Event = FeedEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<FeedEvent> {
        match event {
            TuiEvent::CursorUp => {
                self.select_up();
                None
            }
            TuiEvent::CursorDown => {
                self.select_down();
                None
            }
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                None
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                None
            }
            TuiEvent::Submit | TuiEvent::InputChar('c') => Some(FeedEvent::ToggleComments),
            TuiEvent::InputChar('n') => Some(FeedEvent::Compose),
            TuiEvent::InputChar('r') => Some(FeedEvent::Refresh),
            TuiEvent::InputChar('q') | TuiEvent::Escape => Some(FeedEvent::Quit),
            _ => None,
        }
    }
}

/// Transient render wrapper for the feed column.
pub struct FeedList<'a> {
    app: &'a App,
    state: &'a mut FeedListState,
    /// True when the selected post's comment input owns the keyboard.
    comment_focus: bool,
}

impl<'a> FeedList<'a> {
    pub fn new(app: &'a App, state: &'a mut FeedListState, comment_focus: bool) -> Self {
        Self {
            app,
            state,
            comment_focus,
        }
    }
}

impl Component for FeedList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.app.threads.is_empty() {
            let message = if self.app.feed_loading {
                "Loading feed..."
            } else {
                "No posts yet. Press n to write the first one."
            };
            let empty = Paragraph::new(Line::from(message))
                .style(Style::default().fg(Color::DarkGray))
                .centered();
            frame.render_widget(empty, area);
            return;
        }

        let content_width = area.width.saturating_sub(1);
        let session_present = self.app.session.is_some();

        // Build items and cache heights for scroll positioning.
        let items: Vec<PostItem> = self
            .app
            .threads
            .iter()
            .enumerate()
            .map(|(index, thread)| {
                let selected = index == self.state.selected;
                PostItem::new(
                    thread,
                    session_present,
                    selected,
                    selected && self.comment_focus,
                )
            })
            .collect();

        self.state.heights = items.iter().map(|item| item.height(content_width)).collect();
        let total_height = saturating_sum(self.state.heights.iter());

        self.state.scroll_to_selected(area.height);

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = 0;
        for (item, &height) in items.into_iter().zip(&self.state.heights) {
            let rect = Rect::new(0, y_offset, content_width, height);
            scroll_view.render_widget(ItemWidget(item), rect);
            y_offset = y_offset.saturating_add(height);
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

fn saturating_sum<'a>(heights: impl Iterator<Item = &'a u16>) -> u16 {
    heights.fold(0u16, |acc, h| acc.saturating_add(*h))
}

/// Adapter so a [`PostItem`] can render inside a `ScrollView`, which takes
/// `Widget`s rather than frame-based components.
struct ItemWidget<'a>(PostItem<'a>);

impl ratatui::widgets::Widget for ItemWidget<'_> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        self.0.render_to_buffer(area, buf);
    }
}
