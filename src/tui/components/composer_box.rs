//! # ComposerBox Component
//!
//! The "new post" panel: draft text, the image-url side input, the
//! attached-image indicator and the submit affordance. Pure render
//! wrapper over the core [`Composer`] — edits and submits are routed by
//! the event loop, which owns the focus.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Paragraph, Wrap};
use ratatui::Frame;

use crate::core::composer::Composer;
use crate::core::guard::SubmitPhase;
use crate::tui::component::Component;

/// Which input inside the composer owns the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerFocus {
    None,
    Text,
    ImageUrl,
}

pub struct ComposerBox<'a> {
    composer: &'a Composer,
    session_present: bool,
    focus: ComposerFocus,
}

impl<'a> ComposerBox<'a> {
    pub fn new(composer: &'a Composer, session_present: bool, focus: ComposerFocus) -> Self {
        Self {
            composer,
            session_present,
            focus,
        }
    }

    fn body(&self) -> Text<'static> {
        let dim = Style::default().fg(Color::DarkGray);
        let composer = self.composer;
        let mut lines: Vec<Line> = Vec::new();

        if !self.session_present {
            lines.push(Line::from(Span::styled(
                "Sign in to post — set an identity in ~/.chirp/config.toml",
                Style::default().fg(Color::Red),
            )));
            return Text::from(lines);
        }

        if composer.draft_text.is_empty() {
            let style = if self.focus == ComposerFocus::Text {
                Style::default().fg(Color::Gray)
            } else {
                dim
            };
            lines.push(Line::from(Span::styled("What's happening?", style)));
        } else {
            let cursor = if self.focus == ComposerFocus::Text {
                "█"
            } else {
                ""
            };
            lines.push(Line::from(format!("{}{}", composer.draft_text, cursor)));
        }

        if !composer.draft_image_url.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("[image attached] {}", composer.draft_image_url),
                dim,
            )));
        }

        if composer.image_panel_open {
            let cursor = if self.focus == ComposerFocus::ImageUrl {
                "█"
            } else {
                ""
            };
            lines.push(Line::from(vec![
                Span::styled("Image URL: ", Style::default().fg(Color::Cyan)),
                Span::raw(format!("{}{}", composer.staged_image_url, cursor)),
            ]));
        }

        lines.push(self.status_line());
        Text::from(lines)
    }

    fn status_line(&self) -> Line<'static> {
        let composer = self.composer;
        if composer.phase() != SubmitPhase::Idle {
            return Line::from(Span::styled(
                "Posting...",
                Style::default().fg(Color::Yellow),
            ));
        }
        // Submit stays disabled until there is text.
        let submit = if composer.draft_text.trim().is_empty() {
            Span::styled("[Tweet]", Style::default().fg(Color::DarkGray))
        } else {
            Span::styled("[Tweet ⏎]", Style::default().fg(Color::Green))
        };
        Line::from(vec![
            submit,
            Span::styled(
                "  Ctrl+P image · Esc feed",
                Style::default().fg(Color::DarkGray),
            ),
        ])
    }

    /// Rendered height at the given outer width, borders included.
    pub fn height(&self, width: u16) -> u16 {
        let inner_width = width.saturating_sub(2);
        let paragraph = Paragraph::new(self.body()).wrap(Wrap { trim: false });
        u16::try_from(paragraph.line_count(inner_width))
            .unwrap_or(u16::MAX)
            .saturating_add(2)
    }
}

impl Component for ComposerBox<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focus != ComposerFocus::None {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let paragraph = Paragraph::new(self.body())
            .wrap(Wrap { trim: false })
            .block(
                Block::bordered()
                    .title(" Compose ")
                    .border_style(border_style),
            );
        frame.render_widget(paragraph, area);
    }
}
