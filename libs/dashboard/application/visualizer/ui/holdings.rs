//! Holdings tab: quick stats and one table per instrument type

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use super::skeleton_cell;
use crate::application::views::{row_count_label, HoldingsView, TableBody};
use crate::application::visualizer::App;
use crate::domain::InstrumentType;
use crate::utils::format::{entity_label, format_quantity};

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let view = app.holdings_view();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Percentage(50),
            Constraint::Percentage(50),
        ])
        .split(area);

    let stats = view.stats();
    let stats_line = Line::from(format!(
        " Positions: {}   Stocks: {}   Crypto: {}",
        stats.positions, stats.stocks, stats.crypto
    ));
    frame.render_widget(
        Paragraph::new(stats_line).block(Block::default().borders(Borders::ALL)),
        chunks[0],
    );

    draw_group(frame, &view, InstrumentType::Stock, chunks[1]);
    draw_group(frame, &view, InstrumentType::Crypto, chunks[2]);
}

fn draw_group(frame: &mut Frame, view: &HoldingsView, instrument_type: InstrumentType, area: Rect) {
    let title = match instrument_type {
        InstrumentType::Stock => "Stocks",
        InstrumentType::Crypto => "Crypto",
    };
    let count = view.group(instrument_type).len();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ({}) ", title, row_count_label(count)));

    let rows: Vec<Row> = match view.body(instrument_type) {
        TableBody::Skeleton(n) => (0..n)
            .map(|_| Row::new(vec![skeleton_cell(), skeleton_cell(), skeleton_cell()]))
            .collect(),
        TableBody::Empty(message) => vec![Row::new(vec![Cell::from(message)])
            .style(Style::default().fg(Color::DarkGray))],
        TableBody::Rows(items) => items
            .iter()
            .map(|h| {
                Row::new(vec![
                    Cell::from(entity_label(&h.entity)),
                    Cell::from(h.symbol.clone()).style(Style::default().add_modifier(Modifier::BOLD)),
                    Cell::from(Line::from(format_quantity(h.quantity)).right_aligned()),
                ])
            })
            .collect(),
    };

    let header = Row::new(vec!["Entity", "Symbol", "Quantity"])
        .style(Style::default().fg(Color::Cyan));

    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Min(10),
            Constraint::Length(20),
        ],
    )
    .header(header)
    .block(block);

    frame.render_widget(table, area);
}
