//! # PostItem Component
//!
//! Renders one post with its comment thread: author header, body text,
//! an attached-image marker, the comment count, and — when the comment
//! panel is open — either the comment list plus the draft input, or a
//! sign-in affordance when no session is present.
//!
//! All display state comes from the borrowed [`CommentThread`]; this
//! component holds nothing of its own.

use chrono::{DateTime, Utc};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Paragraph, Wrap};
use ratatui::Frame;

use crate::core::guard::SubmitPhase;
use crate::core::thread::CommentThread;
use crate::tui::component::Component;

pub struct PostItem<'a> {
    thread: &'a CommentThread,
    session_present: bool,
    selected: bool,
    /// True when the comment input owns the keyboard.
    input_focused: bool,
}

impl<'a> PostItem<'a> {
    pub fn new(
        thread: &'a CommentThread,
        session_present: bool,
        selected: bool,
        input_focused: bool,
    ) -> Self {
        Self {
            thread,
            session_present,
            selected,
            input_focused,
        }
    }

    fn title(&self) -> String {
        let author = &self.thread.post.author_name;
        format!(
            " {} · @{} · {} ",
            author,
            handle_of(author),
            time_ago(self.thread.post.created_at)
        )
    }

    fn body(&self) -> Text<'static> {
        let thread = self.thread;
        let dim = Style::default().fg(Color::DarkGray);
        let mut lines: Vec<Line> = Vec::new();

        for text_line in thread.post.text.lines() {
            lines.push(Line::from(text_line.to_string()));
        }

        if let Some(url) = &thread.post.image_url {
            lines.push(Line::from(Span::styled(format!("[image] {url}"), dim)));
        }

        let count_label = match thread.comments.len() {
            1 => "1 comment".to_string(),
            n => format!("{n} comments"),
        };
        lines.push(Line::from(Span::styled(
            format!("[c] {count_label}"),
            dim,
        )));

        if thread.panel_open {
            // Comments display in store order; no client-side sort.
            for comment in &thread.comments {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("  {} ", comment.author_name),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(format!("· {}", time_ago(comment.created_at)), dim),
                ]));
                for body_line in comment.body.lines() {
                    lines.push(Line::from(format!("    {body_line}")));
                }
            }

            lines.push(self.input_line());
        }

        Text::from(lines)
    }

    /// The comment input row — or the sign-in affordance when signed out.
    fn input_line(&self) -> Line<'static> {
        if !self.session_present {
            return Line::from(Span::styled(
                "  You need to sign in to comment",
                Style::default().fg(Color::Red),
            ));
        }
        if self.thread.phase() != SubmitPhase::Idle {
            return Line::from(Span::styled(
                "  Posting comment...",
                Style::default().fg(Color::Yellow),
            ));
        }
        if self.thread.draft.is_empty() {
            let style = if self.input_focused {
                Style::default().fg(Color::Gray)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            return Line::from(Span::styled("  > Write a comment...", style));
        }
        let cursor = if self.input_focused { "█" } else { "" };
        Line::from(vec![
            Span::styled("  > ", Style::default().fg(Color::Cyan)),
            Span::raw(format!("{}{}", self.thread.draft, cursor)),
        ])
    }

    /// Rendered height at the given outer width, borders included.
    /// Saturates rather than overflowing for absurdly tall content.
    pub fn height(&self, width: u16) -> u16 {
        let inner_width = width.saturating_sub(2);
        let paragraph = Paragraph::new(self.body()).wrap(Wrap { trim: false });
        u16::try_from(paragraph.line_count(inner_width))
            .unwrap_or(u16::MAX)
            .saturating_add(2)
    }

    fn paragraph(&self) -> Paragraph<'static> {
        let border_style = if self.selected {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Paragraph::new(self.body()).wrap(Wrap { trim: false }).block(
            Block::bordered()
                .title(self.title())
                .border_style(border_style),
        )
    }

    /// Buffer-level render, for hosts like `ScrollView` that take plain
    /// `Widget`s instead of a `Frame`.
    pub fn render_to_buffer(&self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        ratatui::widgets::Widget::render(self.paragraph(), area, buf);
    }
}

impl Component for PostItem<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(self.paragraph(), area);
    }
}

/// "Jane Doe" → "JaneDoe", mirroring the @-handle display of the feed's
/// web client.
fn handle_of(author: &str) -> String {
    author.split_whitespace().collect()
}

/// Compact relative timestamp: "now", "5m", "3h", or "Jan 15" beyond a day.
pub fn time_ago(at: DateTime<Utc>) -> String {
    let elapsed = Utc::now().signed_duration_since(at);
    let secs = elapsed.num_seconds();
    if secs < 60 {
        "now".to_string()
    } else if secs < 3600 {
        format!("{}m", secs / 60)
    } else if secs < 86400 {
        format!("{}h", secs / 3600)
    } else {
        at.format("%b %d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{test_comment, test_post};
    use chrono::Duration;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn buffer_text(width: u16, height: u16, mut item: PostItem) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| item.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_shows_author_text_and_comment_count() {
        let mut thread = CommentThread::new(test_post("p1"));
        thread.replace_comments(vec![test_comment("c1", "p1")]);

        let text = buffer_text(60, 8, PostItem::new(&thread, true, false, false));
        assert!(text.contains("poster"));
        assert!(text.contains("@poster"));
        assert!(text.contains("post p1"));
        assert!(text.contains("1 comment"));
    }

    #[test]
    fn test_closed_panel_hides_comments() {
        let mut thread = CommentThread::new(test_post("p1"));
        thread.replace_comments(vec![test_comment("c1", "p1")]);

        let text = buffer_text(60, 8, PostItem::new(&thread, true, false, false));
        assert!(!text.contains("comment c1"));
    }

    #[test]
    fn test_open_panel_shows_comments_and_input() {
        let mut thread = CommentThread::new(test_post("p1"));
        thread.replace_comments(vec![test_comment("c1", "p1")]);
        thread.toggle_panel();

        let text = buffer_text(60, 10, PostItem::new(&thread, true, false, false));
        assert!(text.contains("comment c1"));
        assert!(text.contains("Write a comment"));
    }

    #[test]
    fn test_signed_out_open_panel_offers_sign_in_not_input() {
        let mut thread = CommentThread::new(test_post("p1"));
        thread.toggle_panel();

        let text = buffer_text(60, 10, PostItem::new(&thread, false, false, false));
        assert!(text.contains("You need to sign in"));
        assert!(!text.contains("Write a comment"));
    }

    #[test]
    fn test_draft_text_is_displayed() {
        let mut thread = CommentThread::new(test_post("p1"));
        thread.toggle_panel();
        thread.draft = "nice post".to_string();

        let text = buffer_text(60, 10, PostItem::new(&thread, true, false, true));
        assert!(text.contains("nice post"));
    }

    #[test]
    fn test_image_marker_shown_when_attached() {
        let mut post = test_post("p1");
        post.image_url = Some("https://img.example/x.png".to_string());
        let thread = CommentThread::new(post);

        let text = buffer_text(60, 8, PostItem::new(&thread, true, false, false));
        assert!(text.contains("[image] https://img.example/x.png"));
    }

    #[test]
    fn test_height_grows_when_panel_opens() {
        let mut thread = CommentThread::new(test_post("p1"));
        thread.replace_comments(vec![test_comment("c1", "p1"), test_comment("c2", "p1")]);

        let closed = PostItem::new(&thread, true, false, false).height(60);
        thread.toggle_panel();
        let open = PostItem::new(&thread, true, false, false).height(60);
        assert!(open > closed);
    }

    #[test]
    fn test_height_saturates_for_absurdly_tall_content() {
        let mut post = test_post("p1");
        post.text = "line\n".repeat(70_000);
        let thread = CommentThread::new(post);

        let height = PostItem::new(&thread, true, false, false).height(60);
        assert_eq!(height, u16::MAX);
    }

    #[test]
    fn test_handle_strips_whitespace() {
        assert_eq!(handle_of("Jane Doe"), "JaneDoe");
    }

    #[test]
    fn test_time_ago_buckets() {
        assert_eq!(time_ago(Utc::now()), "now");
        assert_eq!(time_ago(Utc::now() - Duration::minutes(5)), "5m");
        assert_eq!(time_ago(Utc::now() - Duration::hours(3)), "3h");
        let old = Utc::now() - Duration::days(40);
        assert_eq!(time_ago(old), old.format("%b %d").to_string());
    }
}
