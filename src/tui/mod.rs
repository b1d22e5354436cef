mod export;
mod help;
mod state;
mod table;

pub use state::UiState;

use crate::cli::Cli;
use crate::form::FormField;
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Terminal,
};
use state::Pane;
use std::{io, time::Duration};

/// Run the interactive UI until the user quits. Returns the final state so
/// the caller can export it.
pub fn run(args: &Cli) -> Result<UiState> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        disable_raw_mode().ok();
        return Err(e).context("enter alternate screen");
    }

    let backend = CrosstermBackend::new(stdout);
    let mut state = UiState::new(args.default_priority);
    let res = Terminal::new(backend)
        .context("create terminal")
        .and_then(|mut terminal| {
            terminal.clear().ok();
            event_loop(&mut terminal, &mut state)
        });

    // Restore the terminal even when the loop failed.
    disable_raw_mode().ok();
    execute!(io::stdout(), LeaveAlternateScreen).ok();

    res.map(|()| state)
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut UiState,
) -> Result<()> {
    tracing::info!("tui started");
    loop {
        // Full redraw after every handled event.
        state.now = time::OffsetDateTime::now_utc();
        terminal
            .draw(|f| draw(f.area(), f, state))
            .context("draw frame")?;

        if !event::poll(Duration::from_millis(250)).context("poll event")? {
            continue;
        }
        if let Event::Key(k) = event::read().context("read event")? {
            if k.kind != KeyEventKind::Press {
                continue;
            }
            if handle_key(state, k) {
                tracing::info!(tickets = state.store.len(), "tui quit");
                return Ok(());
            }
        }
    }
}

/// Apply one key press. Returns true when the UI should exit.
pub fn handle_key(state: &mut UiState, k: KeyEvent) -> bool {
    if k.modifiers.contains(KeyModifiers::CONTROL) && k.code == KeyCode::Char('c') {
        return true;
    }

    if state.show_help {
        state.show_help = false;
        return false;
    }

    if matches!(k.code, KeyCode::Tab | KeyCode::BackTab) {
        state.toggle_pane();
        return false;
    }

    match state.pane {
        Pane::Form => handle_form_key(state, k),
        Pane::Table => return handle_table_key(state, k),
    }
    false
}

fn handle_form_key(state: &mut UiState, k: KeyEvent) {
    match (k.modifiers, k.code) {
        // Enter belongs to the submit flow and never reaches anything else.
        (_, KeyCode::Enter) => {
            state.submit_form();
        }
        (_, KeyCode::Esc) => state.pane = Pane::Table,
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => {
            if !state.form.is_blank() {
                state.info = "Form cleared".into();
            }
            state.form.reset();
        }
        (_, KeyCode::Up) => state.form.focus_prev(),
        (_, KeyCode::Down) => state.form.focus_next(),
        (_, KeyCode::Left) if state.form.focus == FormField::Priority => {
            state.form.priority_prev()
        }
        (_, KeyCode::Right) if state.form.focus == FormField::Priority => {
            state.form.priority_next()
        }
        (_, KeyCode::Backspace) => state.form.backspace(),
        (m, KeyCode::Char(c)) if !m.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            state.form.input_char(c)
        }
        _ => {}
    }
}

fn handle_table_key(state: &mut UiState, k: KeyEvent) -> bool {
    match k.code {
        KeyCode::Char('q') => return true,
        KeyCode::Up | KeyCode::Char('k') => state.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => state.select_next(),
        KeyCode::Home | KeyCode::Char('g') => state.select_first(),
        KeyCode::End | KeyCode::Char('G') => state.select_last(),
        KeyCode::Char('r') => {
            state.apply_row_action('r');
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            state.apply_row_action('d');
        }
        KeyCode::Char('n') | KeyCode::Char('a') | KeyCode::Char('i') => state.pane = Pane::Form,
        KeyCode::Char('e') => export::export_and_show_path(state),
        KeyCode::Char('?') => state.show_help = true,
        _ => {}
    }
    false
}

fn draw(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(5),
                Constraint::Min(0),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(area);

    draw_header(chunks[0], f, state);
    draw_form(chunks[1], f, state);
    table::draw_table(chunks[2], f, state);
    draw_status(chunks[3], f, state);

    if state.show_help {
        help::draw_help(centered_rect(60, 80, area), f);
    }
}

fn draw_header(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let counts = state.store.counts();
    let line = Line::from(vec![
        Span::raw(format!("{} tickets  ", counts.total())),
        Span::styled(format!("{} open", counts.open), Style::default().fg(Color::Cyan)),
        Span::raw("  "),
        Span::styled(
            format!("{} resolved", counts.resolved),
            Style::default().fg(Color::Green),
        ),
    ]);
    let p = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title("ticket-tracker"),
    );
    f.render_widget(p, area);
}

fn draw_form(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let editing = state.pane == Pane::Form;
    let label = |field: FormField, text: &'static str| {
        let style = if editing && state.form.focus == field {
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        Span::styled(text, style)
    };
    let cursor = |field: FormField| {
        if editing && state.form.focus == field {
            Span::styled("▏", Style::default().fg(Color::Magenta))
        } else {
            Span::raw("")
        }
    };

    let lines = vec![
        Line::from(vec![
            label(FormField::Title, "Title:       "),
            Span::raw(state.form.title.clone()),
            cursor(FormField::Title),
        ]),
        Line::from(vec![
            label(FormField::Description, "Description: "),
            Span::raw(state.form.description.clone()),
            cursor(FormField::Description),
        ]),
        Line::from(vec![
            label(FormField::Priority, "Priority:    "),
            Span::raw("< "),
            Span::styled(
                state.form.priority.label(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(" >"),
        ]),
    ];

    let border_style = if editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let p = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title("New ticket (enter to submit)"),
    );
    f.render_widget(p, area);
}

fn draw_status(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let mut spans = Vec::new();
    if !state.info.is_empty() {
        spans.push(Span::styled("Info: ", Style::default().fg(Color::Gray)));
        spans.push(Span::raw(state.info.clone()));
        spans.push(Span::raw("  "));
    }
    if state.pane == Pane::Table {
        if let Some(age) = state
            .store
            .list()
            .get(state.selected)
            .and_then(|r| table::format_age(&r.opened_at, state.now))
        {
            spans.push(Span::styled(
                format!("opened {age} ago  "),
                Style::default().fg(Color::Gray),
            ));
        }
    }
    spans.push(Span::styled("?", Style::default().fg(Color::Magenta)));
    spans.push(Span::raw(" help"));
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Priority, Status};
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;

    fn press(state: &mut UiState, code: KeyCode) -> bool {
        handle_key(state, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_str(state: &mut UiState, s: &str) {
        for c in s.chars() {
            press(state, KeyCode::Char(c));
        }
    }

    fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn render_buffer(state: &UiState) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| draw(f.area(), f, state)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn render(state: &UiState) -> String {
        buffer_text(&render_buffer(state))
    }

    #[test]
    fn enter_submits_and_clears_form() {
        let mut state = UiState::default();
        type_str(&mut state, "Printer jam");
        press(&mut state, KeyCode::Down);
        type_str(&mut state, "Office printer broken");
        press(&mut state, KeyCode::Down);
        press(&mut state, KeyCode::Right);

        let quit = press(&mut state, KeyCode::Enter);

        assert!(!quit);
        assert_eq!(state.store.len(), 1);
        let r = &state.store.list()[0];
        assert_eq!(r.title, "Printer jam");
        assert_eq!(r.description, "Office printer broken");
        assert_eq!(r.priority, Priority::High);
        assert!(state.form.is_blank());
        assert_eq!(state.form.focus, FormField::Title);
        assert_eq!(state.pane, Pane::Form);
    }

    #[test]
    fn typing_q_in_form_does_not_quit() {
        let mut state = UiState::default();
        assert!(!press(&mut state, KeyCode::Char('q')));
        assert_eq!(state.form.title, "q");
    }

    #[test]
    fn typing_r_and_d_in_form_does_not_touch_table() {
        let mut state = UiState::default();
        state.submit_form();
        type_str(&mut state, "rd");
        assert_eq!(state.store.len(), 1);
        assert_eq!(state.store.list()[0].status, Status::Open);
    }

    #[test]
    fn ctrl_c_quits_from_anywhere() {
        let mut state = UiState::default();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(handle_key(&mut state, ctrl_c));
        state.pane = Pane::Table;
        assert!(handle_key(&mut state, ctrl_c));
    }

    #[test]
    fn table_keys_resolve_and_delete_selected() {
        let mut state = UiState::default();
        type_str(&mut state, "Printer jam");
        press(&mut state, KeyCode::Enter);
        type_str(&mut state, "VPN down");
        press(&mut state, KeyCode::Enter);

        press(&mut state, KeyCode::Esc);
        assert_eq!(state.pane, Pane::Table);
        press(&mut state, KeyCode::Char('g'));
        press(&mut state, KeyCode::Char('r'));
        assert_eq!(state.store.list()[0].status, Status::Resolved);

        press(&mut state, KeyCode::Char('d'));
        assert_eq!(state.store.len(), 1);
        assert_eq!(state.store.list()[0].title, "VPN down");
        assert_eq!(state.store.list()[0].status, Status::Open);

        assert!(press(&mut state, KeyCode::Char('q')));
    }

    #[test]
    fn tab_toggles_pane_and_help_swallows_next_key() {
        let mut state = UiState::default();
        press(&mut state, KeyCode::Tab);
        assert_eq!(state.pane, Pane::Table);
        press(&mut state, KeyCode::Char('?'));
        assert!(state.show_help);
        assert!(!press(&mut state, KeyCode::Char('q')));
        assert!(!state.show_help);
    }

    #[test]
    fn ctrl_u_clears_form() {
        let mut state = UiState::default();
        type_str(&mut state, "draft");
        handle_key(
            &mut state,
            KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL),
        );
        assert!(state.form.is_blank());
        assert!(state.store.is_empty());
    }

    #[test]
    fn render_shows_every_ticket_once() {
        let mut state = UiState::default();
        type_str(&mut state, "Printer jam");
        press(&mut state, KeyCode::Enter);
        type_str(&mut state, "VPN down");
        press(&mut state, KeyCode::Enter);
        // The status line echoes the last created title.
        state.info.clear();

        let screen = render(&state);
        assert_eq!(screen.matches("Printer jam").count(), 1);
        assert_eq!(screen.matches("VPN down").count(), 1);
        assert!(screen.contains("[r] resolve  [d] delete"));
        assert!(screen.contains("2 tickets"));
    }

    #[test]
    fn render_after_delete_has_no_stale_row() {
        let mut state = UiState::default();
        type_str(&mut state, "Printer jam");
        press(&mut state, KeyCode::Enter);
        type_str(&mut state, "VPN down");
        press(&mut state, KeyCode::Enter);
        let _ = render(&state);

        press(&mut state, KeyCode::Tab);
        press(&mut state, KeyCode::Char('g'));
        press(&mut state, KeyCode::Char('d'));

        let screen = render(&state);
        assert!(!screen.contains("Printer jam"));
        assert_eq!(screen.matches("VPN down").count(), 1);
    }

    #[test]
    fn same_state_renders_same_frame() {
        let mut state = UiState::default();
        type_str(&mut state, "Printer jam");
        press(&mut state, KeyCode::Enter);
        press(&mut state, KeyCode::Tab);
        let opened = time::OffsetDateTime::parse(
            &state.store.list()[0].opened_at,
            &time::format_description::well_known::Rfc3339,
        )
        .unwrap();
        state.now = opened + time::Duration::seconds(65);

        let first = render_buffer(&state);
        std::thread::sleep(Duration::from_millis(1100));
        let second = render_buffer(&state);

        assert_eq!(first, second);
        assert!(buffer_text(&first).contains("opened 1m 5s ago"));
    }

    #[test]
    fn render_empty_store_shows_hint() {
        let screen = render(&UiState::default());
        assert!(screen.contains("No tickets yet"));
    }

    #[test]
    fn render_help_overlay() {
        let mut state = UiState::default();
        state.show_help = true;
        let screen = render(&state);
        assert!(screen.contains("Keybinds:"));
    }
}
