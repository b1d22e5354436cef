use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

use super::state::{Pane, UiState};
use crate::model::{Priority, Status};
use crate::view::{TableRow, TableView, COLUMNS};

fn priority_color(p: Priority) -> Color {
    match p {
        Priority::High => Color::Red,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Gray,
    }
}

fn status_color(s: Status) -> Color {
    match s {
        Status::Open => Color::Cyan,
        Status::Resolved => Color::Green,
    }
}

/// Local wall-clock time of an RFC 3339 timestamp, falling back to UTC when
/// the local offset is unavailable.
pub fn format_opened_at(opened_at: &str) -> String {
    let Ok(utc) = OffsetDateTime::parse(opened_at, &Rfc3339) else {
        return opened_at.to_string();
    };
    let fmt = format_description!("[hour]:[minute]:[second]");
    match UtcOffset::current_local_offset() {
        Ok(offset) => utc.to_offset(offset).format(fmt).unwrap_or_default(),
        Err(_) => utc
            .format(fmt)
            .map(|t| format!("{t} UTC"))
            .unwrap_or_default(),
    }
}

/// Age of a ticket in whole seconds, e.g. `3m 12s`.
pub fn format_age(opened_at: &str, now: OffsetDateTime) -> Option<String> {
    let opened = OffsetDateTime::parse(opened_at, &Rfc3339).ok()?;
    let elapsed = std::time::Duration::try_from(now - opened).ok()?;
    let secs = std::time::Duration::from_secs(elapsed.as_secs());
    Some(humantime::format_duration(secs).to_string())
}

fn actions_cell(row: &TableRow) -> Cell<'static> {
    // The resolve binding still works on resolved rows; it just has no effect.
    let resolve_style = if row.status == Status::Resolved {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Magenta)
    };
    let [resolve, delete] = row.actions;
    Cell::from(Line::from(vec![
        Span::styled(format!("[{}] {}", resolve.key(), resolve.label()), resolve_style),
        Span::raw("  "),
        Span::styled(
            format!("[{}] {}", delete.key(), delete.label()),
            Style::default().fg(Color::Magenta),
        ),
    ]))
}

fn to_row(row: &TableRow) -> Row<'static> {
    Row::new(vec![
        Cell::from(row.id.to_string()),
        Cell::from(row.title.clone()),
        Cell::from(row.description.clone()),
        Cell::from(row.priority.label()).style(Style::default().fg(priority_color(row.priority))),
        Cell::from(row.status.label()).style(Style::default().fg(status_color(row.status))),
        Cell::from(format_opened_at(&row.opened_at)),
        actions_cell(row),
    ])
}

pub fn draw_table(area: Rect, f: &mut Frame, state: &UiState) {
    // Rebuilt from the store on every frame.
    let view = TableView::from_store(&state.store);

    let border_style = if state.pane == Pane::Table {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!("Tickets ({})", view.len()));

    if view.is_empty() {
        let p = Paragraph::new(vec![
            Line::from(""),
            Line::from(vec![
                Span::raw("  No tickets yet. Fill in the form and press "),
                Span::styled("enter", Style::default().fg(Color::Magenta)),
                Span::raw("."),
            ]),
        ])
        .block(block);
        f.render_widget(p, area);
        return;
    }

    let [title, description, priority, status, actions] = COLUMNS;
    let header = Row::new(vec!["#", title, description, priority, status, "Opened", actions])
        .style(Style::default().add_modifier(Modifier::BOLD))
        .bottom_margin(1);

    let rows: Vec<Row> = view.rows.iter().map(to_row).collect();
    let widths = [
        Constraint::Length(4),
        Constraint::Percentage(22),
        Constraint::Fill(1),
        Constraint::Length(8),
        Constraint::Length(8),
        Constraint::Length(12),
        Constraint::Length(23),
    ];

    let highlight = if state.pane == Pane::Table {
        Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(highlight)
        .highlight_symbol("> ");

    let mut table_state = TableState::default().with_selected(Some(state.selected));
    f.render_stateful_widget(table, area, &mut table_state);
}
