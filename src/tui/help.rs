use ratatui::{
    layout::Rect,
    style::Color,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

fn key_line(key: &'static str, pad: usize, what: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::raw("  "),
        Span::styled(key, Style::default().fg(Color::Magenta)),
        Span::raw(" ".repeat(pad)),
        Span::raw(what),
    ])
}

pub fn draw_help(area: Rect, f: &mut Frame) {
    let p = Paragraph::new(vec![
        Line::from("Keybinds:"),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("Ctrl-C", Style::default().fg(Color::Magenta)),
            Span::raw("      Quit"),
        ]),
        key_line("tab", 9, "Switch between form and table"),
        key_line("?", 11, "Toggle this help"),
        Line::from(""),
        Line::from("Form:"),
        key_line("enter", 7, "Submit ticket"),
        key_line("↑/↓", 9, "Move between fields"),
        key_line("←/→", 9, "Change priority"),
        key_line("Ctrl-U", 6, "Clear form"),
        key_line("esc", 9, "Go to table"),
        Line::from(""),
        Line::from("Table:"),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("↑/↓", Style::default().fg(Color::Magenta)),
            Span::raw(" or "),
            Span::styled("j/k", Style::default().fg(Color::Magenta)),
            Span::raw("  Navigate"),
        ]),
        key_line("g/G", 9, "First / last ticket"),
        key_line("r", 11, "Resolve selected"),
        key_line("d", 11, "Delete selected"),
        key_line("n", 11, "New ticket"),
        key_line("e", 11, "Export tickets as JSON"),
        key_line("q", 11, "Quit"),
    ])
    .block(Block::default().borders(Borders::ALL).title("Help"));
    f.render_widget(Clear, area);
    f.render_widget(p, area);
}
