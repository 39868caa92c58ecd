//! Trades tab: filter line and the trades table

use chrono::Utc;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use super::{skeleton_cell, status_style};
use crate::application::views::TableBody;
use crate::application::visualizer::{App, InputMode};
use crate::domain::InstrumentType;

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let view = app.trades_view();
    let now = Utc::now();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let editing = app.state.input_mode == InputMode::EditingFilter;
    let filter = if app.state.symbol_filter.is_empty() && !editing {
        Span::styled("Filter by symbol… (/)", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(app.state.symbol_filter.clone())
    };
    let status = view.status();
    let filter_line = Line::from(vec![
        Span::raw(" "),
        filter,
        Span::raw("   "),
        Span::styled(status.text(), status_style(&status)),
    ]);
    let filter_style = if editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    frame.render_widget(
        Paragraph::new(filter_line).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(filter_style)
                .title(" Symbol "),
        ),
        chunks[0],
    );

    let rows: Vec<Row> = match view.body(&now) {
        TableBody::Skeleton(n) => (0..n)
            .map(|_| Row::new((0..7).map(|_| Cell::from(skeleton_cell())).collect::<Vec<_>>()))
            .collect(),
        TableBody::Empty(message) => vec![Row::new(vec![Cell::from(message)])
            .style(Style::default().fg(Color::DarkGray))],
        TableBody::Rows(lines) => lines
            .into_iter()
            .map(|line| {
                let type_color = if line.instrument_type == InstrumentType::Crypto.as_str() {
                    Color::Magenta
                } else {
                    Color::Blue
                };
                Row::new(vec![
                    Cell::from(line.trade_id),
                    Cell::from(line.entity),
                    Cell::from(line.instrument_type).style(Style::default().fg(type_color)),
                    Cell::from(line.symbol).style(Style::default().add_modifier(Modifier::BOLD)),
                    Cell::from(Line::from(line.quantity).right_aligned()),
                    Cell::from(Line::from(line.price).right_aligned()),
                    Cell::from(format!("{} ({})", line.timestamp, line.relative)),
                ])
            })
            .collect(),
    };

    let header = Row::new(vec!["Trade ID", "Entity", "Type", "Symbol", "Qty", "Price", "Timestamp"])
        .style(Style::default().fg(Color::Cyan));

    let table = Table::new(
        rows,
        [
            Constraint::Length(14),
            Constraint::Length(10),
            Constraint::Length(8),
            Constraint::Length(10),
            Constraint::Length(16),
            Constraint::Length(16),
            Constraint::Min(20),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Trades: {} ", app.state.trades_entity.label())),
    );

    frame.render_widget(table, chunks[1]);
}
