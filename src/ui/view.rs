use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::domain::{persistence::PersistenceSink, todo::{pad2, TimeMode}};

use super::{app::{App, Mode}, form::{FormField, TodoForm}, theme::Theme};

pub const EMPTY_LIST: &str = "No todos yet. Create one to get started!";

pub fn draw<S: PersistenceSink>(f: &mut Frame, app: &mut App<S>) {
    let theme = app.theme;
    f.render_widget(Block::default().style(theme.base()), f.size());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1), Constraint::Length(3)])
        .split(f.size());

    let help = match app.mode {
        Mode::List => "↑/↓ select  Enter toggle  n new  e edit  d delete  u uncheck all  t theme  q quit",
        Mode::Form(_) => "Tab/↑/↓ field  ←/→ change  Enter save  Esc cancel",
    };
    let header = Paragraph::new(help)
        .style(theme.base())
        .block(Block::default().borders(Borders::ALL).title(format!("todos [{}]", theme.name())));
    f.render_widget(header, chunks[0]);

    if let Mode::Form(form) = &app.mode {
        draw_form(f, form, theme, chunks[1]);
    } else {
        draw_list(f, app, chunks[1]);
    }

    let footer = match &app.notice {
        Some(notice) => Paragraph::new(notice.text.as_str()).style(notice.style()),
        None => {
            let done = app.store.todos().iter().filter(|t| t.completed).count();
            Paragraph::new(format!("{} todos, {} completed", app.store.todos().len(), done)).style(theme.muted())
        }
    };
    f.render_widget(footer.block(Block::default().borders(Borders::ALL).title("status")), chunks[2]);
}

fn draw_list<S: PersistenceSink>(f: &mut Frame, app: &mut App<S>, area: Rect) {
    let theme = app.theme;
    let block = Block::default().borders(Borders::ALL).title("Todo List");
    if app.store.todos().is_empty() {
        f.render_widget(Paragraph::new(EMPTY_LIST).style(theme.muted()).block(block), area);
        return;
    }
    // keep the widget selection in sync with the app cursor
    let last = app.store.todos().len() - 1;
    app.list_state.select(Some(app.selected.min(last)));

    let items: Vec<ListItem> = app
        .store
        .todos()
        .iter()
        .map(|t| {
            let mark = if t.completed { "[x] " } else { "[ ] " };
            let text_style = if t.completed { theme.completed() } else { Style::default() };
            ListItem::new(Line::from(vec![
                Span::raw(mark),
                Span::styled(t.text.clone(), text_style),
                Span::raw(" "),
                Span::styled(format!("[{}]", t.priority.label()), theme.badge(t.priority)),
                Span::styled(format!("  {}", t.schedule()), theme.muted()),
            ]))
        })
        .collect();

    let uncheck_hint = if app.store.has_completed() { "u: Uncheck All" } else { "" };
    let list = List::new(items)
        .block(block.title(uncheck_hint))
        .highlight_style(theme.highlight())
        .highlight_symbol(">> ");
    f.render_stateful_widget(list, area, &mut app.list_state);
}

fn draw_form(f: &mut Frame, form: &TodoForm, theme: Theme, area: Rect) {
    let row = |field: FormField, label: &str, value: String| {
        let focused = form.focus == field;
        let marker = if focused { "> " } else { "  " };
        let value_style = if focused { theme.accent() } else { Style::default() };
        Line::from(vec![
            Span::raw(marker),
            Span::styled(format!("{label:<16}"), Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(value, value_style),
        ])
    };

    let text_value = if form.focus == FormField::Text { format!("{}_", form.text) } else { form.text.clone() };
    let mut lines = vec![
        row(FormField::Text, "Description", text_value),
        row(FormField::TimeMode, "Schedule", format!("‹ {} ›", form.time_mode.label())),
    ];
    match form.time_mode {
        TimeMode::Specific => {
            lines.push(row(FormField::StartHour, "Start hour", pad2(form.start_hour)));
            lines.push(row(FormField::StartMinute, "Start minute", pad2(form.start_minute)));
            lines.push(row(FormField::EndHour, "End hour", pad2(form.end_hour)));
            lines.push(row(FormField::EndMinute, "End minute", pad2(form.end_minute)));
        }
        TimeMode::Duration => {
            lines.push(row(FormField::DurationHours, "Hours", pad2(form.duration_hours)));
            lines.push(row(FormField::DurationMinutes, "Minutes", pad2(form.duration_minutes)));
        }
    }
    lines.push(row(FormField::Priority, "Priority", format!("‹ {} ›", form.priority.label())));

    let body = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(form.title()));
    f.render_widget(body, area);
}
