use crate::todo::models::Filter;
use crate::tui::app::App;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

const PLACEHOLDER: &str = "What needs to be done?";

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Composer
            Constraint::Min(0),    // Items
            Constraint::Length(3), // Footer
        ])
        .split(frame.size());

    draw_composer(frame, chunks[0], app);
    draw_todo_list(frame, chunks[1], app);
    draw_footer(frame, chunks[2], app);

    if app.help_mode {
        draw_help_window(frame);
    }
}

fn draw_composer(frame: &mut Frame, area: Rect, app: &App) {
    let line = if app.composer_focused {
        let (before_cursor, after_cursor) = app.composer.split();
        Line::from(vec![
            Span::raw(before_cursor.to_string()),
            Span::styled("█", Style::default().fg(Color::White)),
            Span::raw(after_cursor.to_string()),
        ])
    } else if app.composer.is_empty() {
        Line::from(Span::styled(
            PLACEHOLDER,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))
    } else {
        Line::from(app.composer.text.clone())
    };

    let border_style = if app.composer_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let composer = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title("todos"),
    );

    frame.render_widget(composer, area);
}

fn draw_todo_list(frame: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .visible_items()
        .iter()
        .map(|item| {
            let checkbox = if item.completed { "☑" } else { "☐" };
            let is_editing = app.editing == Some(item.id);

            let display_content = if is_editing {
                let (before_cursor, after_cursor) = app.rename_draft.split();
                format!("{} {}█{}", checkbox, before_cursor, after_cursor)
            } else {
                format!("{} {}", checkbox, item.title)
            };

            let style = if is_editing {
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else if item.completed {
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default().fg(Color::White)
            };

            ListItem::new(Line::from(Span::styled(display_content, style)))
        })
        .collect();

    // Mirrors the "mark all" checkbox, which only exists when there are items.
    let title = if app.total_items() == 0 {
        "Items".to_string()
    } else if app.toggle_all_target() {
        "Items (t: mark all as complete)".to_string()
    } else {
        "Items (t: mark all as active)".to_string()
    };

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(
            Style::default()
                .bg(Color::Yellow)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        );

    let mut list_state = ListState::default();
    if !app.composer_focused {
        list_state.select(Some(app.selected_index));
    }

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn draw_footer(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = Vec::new();

    let remaining = app.remaining_count();
    if remaining > 0 {
        let noun = if remaining == 1 { "item" } else { "items" };
        spans.push(Span::styled(
            format!("{} {} left", remaining, noun),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(" | "));
    }

    for filter in Filter::ALL {
        let style = if filter == app.active_filter {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Yellow)
        };
        spans.push(Span::styled(format!(" {} ", filter.label()), style));
        spans.push(Span::raw(" "));
    }

    let completed = app.completed_count();
    if completed > 0 {
        spans.push(Span::raw("| "));
        spans.push(Span::styled(
            format!("c: clear completed ({})", completed),
            Style::default().fg(Color::Red),
        ));
    }

    let hint = if app.editing.is_some() || app.composer_focused {
        "Enter: confirm | Esc: cancel"
    } else {
        "?: help | q: quit"
    };

    let footer = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(hint)
            .style(Style::default().fg(Color::Yellow)),
    );

    frame.render_widget(footer, area);
}

fn draw_help_window(frame: &mut Frame) {
    let help_text = [
        "todos - Keyboard Commands",
        "",
        "LIST:",
        "  ↑↓ / j/k          Navigate up/down",
        "  Enter / Space     Toggle completion",
        "  e                 Rename item",
        "  d / Delete        Remove item",
        "  t                 Mark all as complete (or active)",
        "  c                 Clear completed",
        "",
        "FILTERS:",
        "  f                 Cycle all / active / completed",
        "  1 / 2 / 3         Show all / active / completed",
        "",
        "EDITING:",
        "  a / i             Write a new item",
        "  Enter             Confirm",
        "  Esc               Cancel",
        "  Tab               Leave the field (renames are kept)",
        "  Ctrl+W            Delete word",
        "",
        "OTHER:",
        "  ?                 Show this help (press ? or Esc to close)",
        "  q / Ctrl+C        Quit application",
    ];

    let help_paragraph = Paragraph::new(help_text.join("\n"))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help - Keyboard Commands ")
                .style(Style::default().fg(Color::Yellow)),
        )
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: false });

    let area = centered_rect(80, 80, frame.size());

    frame.render_widget(Clear, area);
    frame.render_widget(help_paragraph, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
