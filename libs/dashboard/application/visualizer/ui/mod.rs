//! UI widgets for the dashboard

pub mod holdings;
pub mod trades;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use super::state::{InputMode, View};
use super::App;
use crate::application::views::StatusLine;

/// Draw the main UI layout
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);
    match app.state.active_view {
        View::Holdings => holdings::draw(frame, app, chunks[1]),
        View::Trades => trades::draw(frame, app, chunks[1]),
    }
    draw_footer(frame, app, chunks[2]);
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(30), Constraint::Min(0)])
        .split(area);

    let titles: Vec<&str> = View::ALL.iter().map(|v| v.title()).collect();
    let selected = View::ALL
        .iter()
        .position(|v| *v == app.state.active_view)
        .unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL).title(" Holdings Dashboard "));
    frame.render_widget(tabs, chunks[0]);

    let view = app.state.active_view;
    let status = match view {
        View::Holdings => app.holdings_view().status(),
        View::Trades => app.trades_view().status(),
    };

    let focus = if app.state.focused { "" } else { " | paused (unfocused)" };
    let line = Line::from(vec![
        Span::styled(format!(" {} ", status.text()), status_style(&status)),
        Span::raw(format!(
            "| Entity: {} | API: {}{}",
            app.state.entity(view).label(),
            app.api_url,
            focus
        )),
    ]);

    let header = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, chunks[1]);
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let text = match (app.state.input_mode, app.status_message.as_deref()) {
        (InputMode::EditingFilter, _) => {
            format!(" Filter: {}_ | Enter/Esc=done", app.state.symbol_filter)
        }
        (InputMode::Normal, Some(status)) => {
            format!(" {} | q=quit Tab=view e=entity r=refresh", status)
        }
        (InputMode::Normal, None) => match app.state.active_view {
            View::Holdings => " q=quit Tab=view e=entity r=refresh".to_string(),
            View::Trades => " q=quit Tab=view e=entity r=refresh /=filter Esc=clear".to_string(),
        },
    };

    let footer = Paragraph::new(text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

pub(crate) fn status_style(status: &StatusLine) -> Style {
    match status {
        StatusLine::Error(_) => Style::default().fg(Color::Red),
        StatusLine::Refreshing => Style::default().fg(Color::Yellow),
        StatusLine::Live | StatusLine::Rows(_) => Style::default().fg(Color::Green),
    }
}

/// Dim placeholder cells for skeleton rows
pub(crate) fn skeleton_cell() -> Span<'static> {
    Span::styled("░░░░░░░░", Style::default().fg(Color::DarkGray))
}
