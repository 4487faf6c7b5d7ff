//! # Toasts
//!
//! Transient, non-blocking status notifications rendered as a small
//! overlay stack in the top-right corner. Submission start, success and
//! failure each push one; they expire on a timer and never capture
//! input.

use std::time::{Duration, Instant};

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::core::action::Severity;

const TOAST_TTL: Duration = Duration::from_secs(4);
const TOAST_WIDTH: u16 = 34;

#[derive(Debug)]
pub struct Toast {
    pub severity: Severity,
    pub text: String,
    created: Instant,
}

/// Persistent toast stack; newest at the bottom.
#[derive(Default)]
pub struct ToastState {
    toasts: Vec<Toast>,
}

impl ToastState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, severity: Severity, text: impl Into<String>) {
        self.toasts.push(Toast {
            severity,
            text: text.into(),
            created: Instant::now(),
        });
    }

    /// Drops expired toasts. Returns true if anything was removed, so the
    /// caller knows a redraw is due.
    pub fn prune(&mut self) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.created.elapsed() < TOAST_TTL);
        self.toasts.len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    #[cfg(test)]
    fn push_aged(&mut self, severity: Severity, text: &str, age: Duration) {
        self.toasts.push(Toast {
            severity,
            text: text.to_string(),
            created: Instant::now() - age,
        });
    }
}

/// Transient render wrapper for the toast overlay.
pub struct Toasts<'a> {
    state: &'a ToastState,
}

impl<'a> Toasts<'a> {
    pub fn new(state: &'a ToastState) -> Self {
        Self { state }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let width = TOAST_WIDTH.min(area.width);
        let x = area.x + area.width.saturating_sub(width);
        let mut y = area.y;

        for toast in &self.state.toasts {
            if y + 3 > area.y + area.height {
                break;
            }
            let rect = Rect {
                x,
                y,
                width,
                height: 3,
            };
            frame.render_widget(Clear, rect);

            let style = Style::default().fg(toast_color(toast.severity));
            let body = Paragraph::new(toast.text.as_str())
                .alignment(Alignment::Center)
                .style(style)
                .block(Block::default().borders(Borders::ALL).border_style(style));
            frame.render_widget(body, rect);
            y += 3;
        }
    }
}

fn toast_color(severity: Severity) -> Color {
    match severity {
        Severity::Info => Color::Cyan,
        Severity::Success => Color::Green,
        Severity::Error => Color::Red,
    }
}
