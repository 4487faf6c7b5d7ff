use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::Frame;

use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{ComposerBox, ComposerFocus, FeedList, Toasts};
use crate::tui::{Focus, TuiState};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};

    let composer_focus = match tui.focus {
        Focus::ComposerText => ComposerFocus::Text,
        Focus::ComposerImage => ComposerFocus::ImageUrl,
        _ => ComposerFocus::None,
    };
    let mut composer = ComposerBox::new(&app.composer, app.session.is_some(), composer_focus);
    let composer_height = composer.height(frame.area().width);

    let layout = Layout::vertical([Length(1), Min(0), Length(composer_height)]);
    let [title_area, feed_area, composer_area] = layout.areas(frame.area());

    frame.render_widget(title_line(app), title_area);

    tui.feed_list.sync(app.threads.len());
    let comment_focus = tui.focus == Focus::CommentInput;
    FeedList::new(app, &mut tui.feed_list, comment_focus).render(frame, feed_area);

    composer.render(frame, composer_area);

    // Toasts overlay the feed, never block it.
    Toasts::new(&tui.toasts).render(frame, feed_area);
}

fn title_line(app: &App) -> Line<'static> {
    let identity = match &app.session {
        Some(session) => format!("signed in as {}", session.display_name),
        None => "signed out".to_string(),
    };
    let posts = format!("{} posts", app.threads.len());
    let status = if app.feed_loading {
        " · refreshing..."
    } else {
        ""
    };

    Line::from(vec![
        Span::styled(" chirp ", Style::default().fg(Color::Cyan)),
        Span::raw(format!("· {posts} · {identity}{status}  ")),
        Span::styled(
            "↑↓ select · c comments · n compose · r refresh · q quit",
            Style::default().fg(Color::DarkGray),
        ),
    ])
}
