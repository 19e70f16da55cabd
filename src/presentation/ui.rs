use crate::application::{App, AppMode, CreationScreen, DetailScreen, DetailState, FormField, Screen, TextField};
use crate::domain::NoticeLevel;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

const MAX_VISIBLE_NOTIFICATIONS: usize = 3;

/// Draws one frame: header with the current route, the mounted screen,
/// the key bar, pending notifications and, in help mode, the help popup.
pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    match &app.screen {
        Screen::Creation(form) => render_creation(f, form, chunks[1]),
        Screen::Detail(detail) => render_detail(f, detail, chunks[1]),
    }
    render_status_bar(f, app, chunks[2]);
    render_notifications(f, app, f.area());

    if app.mode == AppMode::Help {
        render_help_popup(f, app.help_scroll);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let header = Paragraph::new(format!("cadastro | {}", app.route)).style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn field_block(title: &str, focused: bool) -> Block<'_> {
    let border = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };
    Block::default().borders(Borders::ALL).title(title).border_style(border)
}

fn render_text_field(f: &mut Frame, field: &TextField, title: &str, placeholder: &str, focused: bool, area: Rect) {
    let inner_width = area.width.saturating_sub(2) as usize;
    let offset = field.cursor.saturating_sub(inner_width.saturating_sub(1));

    let paragraph = if field.is_empty() && !focused {
        Paragraph::new(placeholder).style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(field.value.as_str()).scroll((0, offset as u16))
    };
    f.render_widget(paragraph.block(field_block(title, focused)), area);

    if focused {
        let x = area.x + 1 + (field.cursor - offset) as u16;
        f.set_cursor_position((x, area.y + 1));
    }
}

fn render_select(f: &mut Frame, title: &str, value: Option<&str>, placeholder: &str, loading: bool, focused: bool, area: Rect) {
    let mut text = match value {
        Some(name) if focused => format!("< {} >", name),
        Some(name) => name.to_string(),
        None => placeholder.to_string(),
    };
    if loading {
        text.push_str(" (loading...)");
    }

    let style = if value.is_some() {
        Style::default()
    } else {
        Style::default().fg(Color::DarkGray)
    };
    f.render_widget(Paragraph::new(text).style(style).block(field_block(title, focused)), area);
}

fn render_creation(f: &mut Frame, form: &CreationScreen, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("New person");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

    if let Some(ref message) = form.error_message {
        f.render_widget(Paragraph::new(message.as_str()).style(Style::default().fg(Color::Red)), rows[0]);
    }

    render_text_field(f, &form.name, "Name", "Your name", form.focus == FormField::Name, rows[1]);
    render_text_field(f, &form.email, "Email", "email@example.com", form.focus == FormField::Email, rows[2]);

    let selects = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[3]);
    render_select(
        f,
        &format!("State ({})", form.states.len()),
        form.selected_state_name(),
        "Select a state",
        form.is_loading_states(),
        form.focus == FormField::State,
        selects[0],
    );
    render_select(
        f,
        &format!("City ({})", form.cities.len()),
        form.selected_city_name(),
        "Select a city",
        form.is_loading_cities(),
        form.focus == FormField::City,
        selects[1],
    );

    let label = if form.is_submitting() { "Submitting..." } else { "[ Submit ]" };
    let button_style = if form.focus == FormField::Submit {
        Style::default().bg(Color::Indexed(62)).fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Indexed(62))
    };
    let button = Paragraph::new(label)
        .alignment(Alignment::Center)
        .style(button_style)
        .block(field_block("", form.focus == FormField::Submit));
    f.render_widget(button, rows[4]);
}

fn render_detail(f: &mut Frame, detail: &DetailScreen, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Person details");

    let lines = match &detail.state {
        DetailState::Loading => vec![Line::from("Loading...")],
        DetailState::Failed(message) => vec![Line::from(Span::styled(
            message.as_str(),
            Style::default().fg(Color::Red),
        ))],
        DetailState::Displaying(person) => {
            let label = Style::default().add_modifier(Modifier::BOLD);
            vec![
                Line::from(vec![Span::styled("Name: ", label), Span::raw(person.name.as_str())]),
                Line::from(vec![Span::styled("Email: ", label), Span::raw(person.email.as_str())]),
                Line::from(vec![Span::styled("State: ", label), Span::raw(person.state_name())]),
                Line::from(vec![Span::styled("City: ", label), Span::raw(person.city_name())]),
                Line::from(""),
                Line::from(Span::styled("[ Back ]", Style::default().fg(Color::Indexed(62)))),
            ]
        }
    };

    f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let text = match (&app.mode, &app.screen) {
        (AppMode::Help, _) => "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help",
        (AppMode::Normal, Screen::Creation(_)) => {
            "Tab/Shift+Tab: next/previous field | ←→: choose state/city | Enter: submit | F1: help | Ctrl+Q: quit"
        }
        (AppMode::Normal, Screen::Detail(_)) => "Esc/b: back | r: reload | y: copy id | F1: help | q: quit",
    };

    let status = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Keys"))
        .style(match app.mode {
            AppMode::Normal => Style::default(),
            AppMode::Help => Style::default().fg(Color::Cyan),
        });
    f.render_widget(status, area);
}

fn notice_color(level: NoticeLevel) -> Color {
    match level {
        NoticeLevel::Success => Color::Green,
        NoticeLevel::Info => Color::Cyan,
        NoticeLevel::Warning => Color::Yellow,
        NoticeLevel::Error => Color::Red,
    }
}

fn render_notifications(f: &mut Frame, app: &App, area: Rect) {
    let width = area.width.min(48);
    for (i, notification) in app.notifications.latest(MAX_VISIBLE_NOTIFICATIONS).enumerate() {
        let y = area.y + 1 + (i as u16) * 3;
        if y + 3 > area.bottom() {
            break;
        }
        let rect = Rect {
            x: area.right() - width,
            y,
            width,
            height: 3,
        };
        let color = notice_color(notification.level);

        f.render_widget(Clear, rect);
        f.render_widget(
            Paragraph::new(notification.message.as_str())
                .style(Style::default().fg(color))
                .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(color))),
            rect,
        );
    }
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_text = get_help_text();
    let help_lines: Vec<&str> = help_text.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!("cadastro Help (Line {}/{})", start_line + 1, help_lines.len()))
            .style(Style::default().fg(Color::Cyan)))
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

fn get_help_text() -> &'static str {
    r#"CADASTRO KEY REFERENCE

=== NEW PERSON FORM (/person) ===
Tab / Shift+Tab     Move to next / previous field
↑ ↓ in text fields  Move to previous / next field
← → ↑ ↓ / h l k j   Choose state or city when that field is focused
Enter               Submit the form from any field
q                   Quit (when a select or the submit button is focused)

Choosing a state loads its cities; the city must be chosen again.
The name is required and limited to 250 characters.
All fields are required and the email must not be registered yet.
The email check happens right before submitting and is best-effort:
the backend has the final word on duplicates.

=== PERSON DETAILS (/person/{id}) ===
Esc / b / Backspace Go back to the previous screen
r                   Reload the record
y                   Copy the person's document id to the clipboard
q                   Quit

=== NOTIFICATIONS ===
Green               Success
Cyan                Information
Yellow              Reference data (states, cities) could not be loaded
Red                 Validation, duplicate email, backend or network failure
                    Details of every failure are written to the log file.

=== GLOBAL ===
F1                  Show or close this help
Ctrl+C / Ctrl+Q     Quit from anywhere

=== HELP NAVIGATION ===
↑↓ or j/k           Scroll help text up/down one line
Page Up/Down        Scroll help text up/down 5 lines
Home                Jump to top of help text
Esc/F1/?/q          Close this help window"#
}
