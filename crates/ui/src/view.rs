//! Pane rendering.

use crate::editor::Editor;
use crate::output::OutputLog;
use crate::theme::UiTheme;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color as TuiColor, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

pub const TITLE: &str = "JavaScript Compiler UI";
pub const EDITOR_PLACEHOLDER: &str = "Enter your JavaScript code here...";
pub const CONSOLE_PLACEHOLDER: &str = "Output will appear here...";

pub fn tui_color(color: common::Color) -> TuiColor {
    TuiColor::Rgb(color.r, color.g, color.b)
}

fn border_style(theme: &UiTheme, focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(tui_color(theme.colors.border_focused))
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(tui_color(theme.colors.border))
    }
}

fn pane_block<'a>(title: &'a str, theme: &UiTheme, focused: bool) -> Block<'a> {
    Block::default()
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(tui_color(theme.colors.muted)),
        ))
        .borders(Borders::ALL)
        .border_style(border_style(theme, focused))
        .style(Style::default().bg(tui_color(theme.colors.panel)))
}

/// Render the title bar with the Run and Clear triggers.
pub fn render_header(frame: &mut Frame, area: Rect, theme: &UiTheme) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(40)])
        .split(area);

    let title = Line::from(vec![
        Span::styled(" </> ", Style::default().fg(tui_color(theme.colors.accent))),
        Span::styled(
            TITLE,
            Style::default()
                .fg(tui_color(theme.colors.heading))
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    let button = |label: &'static str, bg: common::Color| {
        Span::styled(
            label,
            Style::default()
                .fg(tui_color(theme.colors.button_text))
                .bg(tui_color(bg))
                .add_modifier(Modifier::BOLD),
        )
    };
    let buttons = Line::from(vec![
        button(" ▶ Run (Ctrl+R) ", theme.colors.run_button),
        Span::raw(" "),
        button(" ✖ Clear (Ctrl+L) ", theme.colors.clear_button),
        Span::raw(" "),
    ]);

    let background = Style::default().bg(tui_color(theme.colors.panel));
    frame.render_widget(Paragraph::new(title).style(background), columns[0]);
    frame.render_widget(
        Paragraph::new(buttons).alignment(Alignment::Right).style(background),
        columns[1],
    );
}

/// Render the editor pane and place the terminal cursor when focused.
pub fn render_editor(
    frame: &mut Frame,
    area: Rect,
    editor: &Editor,
    theme: &UiTheme,
    focused: bool,
    scroll: &mut usize,
) {
    let block = pane_block("Editor", theme, focused).padding(Padding::new(1, 0, 0, 0));
    let inner = block.inner(area);
    let visible_height = inner.height.max(1) as usize;

    let (row, col) = editor.cursor_position();
    if row < *scroll {
        *scroll = row;
    } else if row >= *scroll + visible_height {
        *scroll = row + 1 - visible_height;
    }

    let paragraph = if editor.is_empty() {
        Paragraph::new(EDITOR_PLACEHOLDER).style(Style::default().fg(tui_color(theme.colors.muted)))
    } else {
        let lines: Vec<Line> = editor
            .text()
            .split('\n')
            .skip(*scroll)
            .take(visible_height)
            .map(Line::raw)
            .collect();
        Paragraph::new(lines).style(Style::default().fg(tui_color(theme.colors.foreground)))
    };
    frame.render_widget(paragraph.block(block), area);

    if focused {
        let x = inner.x.saturating_add(col as u16).min(inner.right().saturating_sub(1));
        let y = inner.y.saturating_add((row - *scroll) as u16);
        frame.set_cursor_position((x, y));
    }
}

/// Console lines for `output`, one or more per entry.
///
/// Continuation lines of a multi-line message are indented under the first.
pub fn console_lines(output: &OutputLog, theme: &UiTheme) -> Vec<Line<'static>> {
    let muted = Style::default().fg(tui_color(theme.colors.muted));
    let mut lines = Vec::new();

    for entry in output {
        let style = Style::default().fg(tui_color(theme.severity_color(entry.severity())));
        let mut message_lines = entry.message().split('\n');
        let first = message_lines.next().unwrap_or_default();

        lines.push(Line::from(vec![
            Span::styled(entry.timestamp().to_string(), muted),
            Span::styled(format!("  > {first}"), style),
        ]));

        let indent = " ".repeat(entry.timestamp().chars().count() + 4);
        for rest in message_lines {
            lines.push(Line::from(Span::styled(format!("{indent}{rest}"), style)));
        }
    }

    lines
}

/// Render the console pane.
///
/// `scroll` is clamped to the content; `usize::MAX` pins the view to the
/// last line. Only the visible window is handed to the widget, so offsets
/// are not limited by the terminal's `u16` coordinates.
pub fn render_console(
    frame: &mut Frame,
    area: Rect,
    output: &OutputLog,
    theme: &UiTheme,
    focused: bool,
    scroll: &mut usize,
) {
    let block = pane_block("Console", theme, focused).padding(Padding::new(1, 0, 0, 0));

    if output.is_empty() {
        *scroll = 0;
        let paragraph = Paragraph::new(CONSOLE_PLACEHOLDER)
            .alignment(Alignment::Center)
            .style(Style::default().fg(tui_color(theme.colors.muted)))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let lines = console_lines(output, theme);
    let visible_height = block.inner(area).height.max(1) as usize;
    let max_scroll = lines.len().saturating_sub(visible_height);
    *scroll = (*scroll).min(max_scroll);

    let visible: Vec<Line> = lines.into_iter().skip(*scroll).take(visible_height).collect();
    frame.render_widget(Paragraph::new(visible).block(block), area);
}

/// Render the status bar.
pub fn render_status_bar(frame: &mut Frame, area: Rect, message: &str, backend: &str, theme: &UiTheme) {
    let line = Line::from(vec![
        Span::styled(
            format!(" {message} "),
            Style::default().fg(tui_color(theme.colors.foreground)),
        ),
        Span::styled(
            format!("| engine: {backend} | Tab: switch pane | Esc: quit"),
            Style::default().fg(tui_color(theme.colors.muted)),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(line).style(Style::default().bg(tui_color(theme.colors.background))),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputEntry;
    use common::Severity;

    fn text_of(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_console_line_format() {
        let mut log = OutputLog::new();
        log.push(OutputEntry::new("hi", Severity::Log, "3:07:45 PM"));

        let lines = console_lines(&log, &UiTheme::dark());
        assert_eq!(lines.len(), 1);
        assert_eq!(text_of(&lines[0]), "3:07:45 PM  > hi");
    }

    #[test]
    fn test_multiline_message_is_indented() {
        let mut log = OutputLog::new();
        log.push(OutputEntry::new("{\n  \"a\": 1\n}", Severity::Info, "3:07:45 PM"));

        let lines = console_lines(&log, &UiTheme::dark());
        assert_eq!(lines.len(), 3);
        assert_eq!(text_of(&lines[1]), format!("{}  \"a\": 1", " ".repeat(14)));
        assert_eq!(text_of(&lines[2]), format!("{}}}", " ".repeat(14)));
    }

    #[test]
    fn test_console_lines_use_severity_color() {
        let theme = UiTheme::dark();
        let mut log = OutputLog::new();
        log.push(OutputEntry::new("bad", Severity::Error, "t"));

        let lines = console_lines(&log, &theme);
        assert_eq!(lines[0].spans[1].style.fg, Some(tui_color(theme.colors.error)));
        assert_eq!(lines[0].spans[0].style.fg, Some(tui_color(theme.colors.muted)));
    }
}
