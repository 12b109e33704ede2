use crate::app::{App, AppEvent, Notice, NoticeKind};
use crate::client::TaskService;
use crate::form::Field;
use crate::task::{Priority, Task};
use crate::workflow;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{info, warn};

pub const HEADER: &str = "AI-Enhanced Task Management";
pub const EMPTY_LIST: &str = "No tasks yet. Add one!";
pub const SUBMIT_LABEL: &str = "Add Task with AI Insight";
pub const SUBMITTING_LABEL: &str = "Analyzing...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Submit,
    Quit,
}

pub async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    service: Arc<dyn TaskService>,
) -> io::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    spawn_load(Arc::clone(&service), tx.clone());

    let mut events = EventStream::new();
    loop {
        terminal.draw(|f| draw(f, app))?;

        tokio::select! {
            Some(event) = rx.recv() => app.handle(event),
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    match handle_key(app, key) {
                        Action::Quit => return Ok(()),
                        Action::Submit => start_submission(app, &service, &tx),
                        Action::None => {}
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(err)) => return Err(err),
                None => return Ok(()),
            },
        }
    }
}

fn spawn_load(service: Arc<dyn TaskService>, tx: UnboundedSender<AppEvent>) {
    tokio::spawn(async move {
        let result = service.fetch_tasks().await;
        let _ = tx.send(AppEvent::TasksLoaded(result));
    });
}

fn start_submission(
    app: &mut App,
    service: &Arc<dyn TaskService>,
    tx: &UnboundedSender<AppEvent>,
) {
    let draft = match app.begin_submission() {
        Ok(draft) => draft,
        Err(err) => {
            warn!(error = %err, "submission rejected");
            return;
        }
    };
    info!("submission started");

    let service = Arc::clone(service);
    let tx = tx.clone();
    tokio::spawn(async move {
        let outcome = workflow::submit(&*service, draft).await;
        let _ = tx.send(AppEvent::SubmissionFinished(outcome));
    });
}

pub fn handle_key(app: &mut App, key: KeyEvent) -> Action {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    // A notice blocks everything until it is acknowledged.
    if app.notice().is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            app.dismiss_notice();
        }
        return Action::None;
    }

    if ctrl {
        return match key.code {
            KeyCode::Char('s') => submit_action(app),
            _ => Action::None,
        };
    }

    let focus = app.form.focus;
    match key.code {
        KeyCode::Esc => return Action::Quit,
        KeyCode::Tab => app.form.focus_next(),
        KeyCode::BackTab => app.form.focus_prev(),
        KeyCode::Enter => match focus {
            Field::Title | Field::Submit => return submit_action(app),
            Field::Description => app.form.insert_char('\n'),
            Field::Category | Field::Priority => app.form.focus_next(),
            Field::Tasks => {}
        },
        KeyCode::Backspace => app.form.backspace(),
        KeyCode::Left => app.form.cycle(false),
        KeyCode::Right => app.form.cycle(true),
        KeyCode::Char(' ') if !focus.is_text() => app.form.cycle(true),
        KeyCode::Char(c) => app.form.insert_char(c),
        KeyCode::Up if focus == Field::Tasks => app.tasks.select_prev(),
        KeyCode::Down if focus == Field::Tasks => app.tasks.select_next(),
        _ => {}
    }
    Action::None
}

// The submit control is disabled while a submission is in flight.
fn submit_action(app: &App) -> Action {
    if app.is_submitting() {
        Action::None
    } else {
        Action::Submit
    }
}

pub fn draw(f: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    let header = Paragraph::new(Line::from(Span::styled(
        HEADER,
        Style::default().add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[1]);

    draw_form(f, app, columns[0]);
    draw_tasks(f, app, columns[1]);
    draw_status(f, app, rows[2]);

    if let Some(notice) = app.notice() {
        draw_notice(f, notice);
    }
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn field_block(label: &str, focused: bool) -> Block<'_> {
    Block::default()
        .title(label)
        .borders(Borders::ALL)
        .border_style(focus_style(focused))
}

fn text_field<'a>(value: &'a str, placeholder: &'a str, focused: bool) -> Text<'a> {
    if value.is_empty() && !focused {
        return Text::from(Span::styled(placeholder, Style::default().fg(Color::DarkGray)));
    }
    let mut text = Text::from(value);
    if focused {
        // Cursor marker at the end of the last line.
        if value.is_empty() || value.ends_with('\n') {
            text.lines.push(Line::from("_"));
        } else if let Some(line) = text.lines.last_mut() {
            line.push_span(Span::raw("_"));
        }
    }
    text
}

fn draw_form(f: &mut Frame, app: &App, area: Rect) {
    let form = &app.form;
    let outer = Block::default().title("Add a New Task").borders(Borders::ALL);
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let slots = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(6),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

    let title_focused = form.focus == Field::Title;
    f.render_widget(
        Paragraph::new(text_field(&form.title, "Task Title", title_focused))
            .block(field_block("Title", title_focused)),
        slots[0],
    );

    let description_focused = form.focus == Field::Description;
    f.render_widget(
        Paragraph::new(text_field(
            &form.description,
            "Task Description",
            description_focused,
        ))
        .wrap(Wrap { trim: false })
        .block(field_block("Description", description_focused)),
        slots[1],
    );

    let category_focused = form.focus == Field::Category;
    f.render_widget(
        Paragraph::new(format!("< {} >", form.category))
            .block(field_block("Category", category_focused)),
        slots[2],
    );

    let priority_focused = form.focus == Field::Priority;
    f.render_widget(
        Paragraph::new(format!("< {} Priority >", form.user_priority))
            .block(field_block("Priority", priority_focused)),
        slots[3],
    );

    let submit_focused = form.focus == Field::Submit;
    let (label, style) = if app.is_submitting() {
        (SUBMITTING_LABEL, Style::default().fg(Color::DarkGray))
    } else if submit_focused {
        (
            SUBMIT_LABEL,
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (SUBMIT_LABEL, Style::default().add_modifier(Modifier::BOLD))
    };
    f.render_widget(
        Paragraph::new(Span::styled(label, style))
            .alignment(Alignment::Center)
            .block(field_block("", submit_focused)),
        slots[4],
    );
}

fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => Color::Red,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Green,
    }
}

/// Lines of one task card.
pub fn card(task: &Task) -> Text<'_> {
    let accent = priority_color(task.ai_priority);
    let mut lines = vec![Line::from(Span::styled(
        task.title.as_str(),
        Style::default().fg(accent).add_modifier(Modifier::BOLD),
    ))];
    lines.extend(task.description.lines().map(Line::from));
    lines.push(Line::from(vec![
        Span::raw(format!("Category: {}", task.category)),
        Span::raw("  "),
        Span::raw(format!("Your Priority: {}", task.user_priority)),
    ]));
    lines.push(Line::from(vec![
        Span::styled(
            format!("AI Priority: {}", task.ai_priority),
            Style::default().fg(accent),
        ),
        Span::raw("  "),
        Span::raw(format!("AI Est. Hours: {}", task.deadline_label())),
    ]));
    lines.push(Line::from(""));
    Text::from(lines)
}

fn draw_tasks(f: &mut Frame, app: &App, area: Rect) {
    let focused = app.form.focus == Field::Tasks;
    let block = field_block("Your Tasks", focused);

    if app.tasks.is_empty() {
        f.render_widget(Paragraph::new(EMPTY_LIST).block(block), area);
        return;
    }

    let items: Vec<ListItem> = app.tasks.tasks().iter().map(|t| ListItem::new(card(t))).collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if focused {
        state.select(Some(app.tasks.selected));
    } else {
        *state.offset_mut() = app.tasks.selected;
    }
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_status(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::raw(
        "Tab/Shift-Tab move  ←/→ change  Enter/Ctrl-S submit  Esc quit",
    )];
    if app.is_submitting() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            SUBMITTING_LABEL,
            Style::default().fg(Color::Yellow),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_notice(f: &mut Frame, notice: &Notice) {
    let area = centered_rect(60, 7, f.area());
    let (title, color) = match notice.kind {
        NoticeKind::Alert => ("Notice", Color::Yellow),
        NoticeKind::Error => ("Error", Color::Red),
    };
    let body = Text::from(vec![
        Line::from(notice.message.as_str()),
        Line::from(""),
        Line::from(Span::styled(
            format!("{}  [Enter] OK", notice.at.format("%H:%M:%S")),
            Style::default().fg(Color::DarkGray),
        )),
    ]);

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(body)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            ),
        area,
    );
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(r);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
