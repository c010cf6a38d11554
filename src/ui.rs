use crate::app::{App, Row, View};
use crate::dashboard::{DisplayModel, Progress};
use crate::task::Status;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        BarChart, Block, Borders, Cell, Gauge, List, ListItem, ListState, Paragraph,
        Row as TableRow, Table,
    },
    Frame, Terminal,
};
use std::{io, time::Duration};
use tracing::info;

const BAR_CELLS: usize = 10;

pub fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    tick_rate: Duration,
) -> io::Result<()> {
    loop {
        let model = app.refresh();
        terminal.draw(|f| draw(f, app, &model))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(action) = app.handle_key(key) {
                        app.dispatch(action);
                    }
                }
            }
        }

        if app.should_quit {
            info!("quit requested");
            return Ok(());
        }
    }
}

pub fn draw(f: &mut Frame, app: &App, model: &DisplayModel) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)])
        .split(f.area());

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!("🏠 Cleaning Routine Dashboard  (week {})", app.session.current_week()),
            Style::default().add_modifier(Modifier::BOLD),
        ))),
        outer[0],
    );

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(outer[1]);

    draw_rooms(f, body[0], app, model);
    match app.view {
        View::Summary => draw_summary(f, body[1], model),
        View::TaskLog => draw_task_log(f, body[1], model),
    }

    f.render_widget(
        Paragraph::new(
            "↑↓ move  Enter open/cycle  1/2/3 status  r reset room  R reset all  Tab view  q quit",
        )
        .style(Style::default().fg(Color::DarkGray)),
        outer[2],
    );
}

fn draw_rooms(f: &mut Frame, area: Rect, app: &App, model: &DisplayModel) {
    let items: Vec<ListItem> = app
        .rows()
        .into_iter()
        .filter_map(|row| match row {
            Row::Room(r) => {
                let room = model.rooms.get(r)?;
                let marker = if app.is_expanded(r) { "▾" } else { "▸" };
                Some(ListItem::new(Line::from(vec![
                    Span::raw(format!("{marker} ")),
                    Span::styled(
                        room.heading.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(format!(
                        "  {} {}",
                        bar(room.progress.ratio()),
                        room.progress.metric()
                    )),
                ])))
            }
            Row::Task(r, t) => {
                let task = model.rooms.get(r)?.tasks.get(t)?;
                let mut spans = vec![
                    Span::raw(format!("    {:<24}", task.task)),
                    Span::styled(task.status.label(), status_style(task.status)),
                ];
                if let Some(date) = &task.completed_date {
                    spans.push(Span::raw(format!("  ✅ Completed on {date}")));
                }
                Some(ListItem::new(Line::from(spans)))
            }
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().title("Rooms").borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::REVERSED),
        );

    let mut state = ListState::default().with_selected(Some(app.selected));
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_summary(f: &mut Frame, area: Rect, model: &DisplayModel) {
    let table_height = model.rooms.len() as u16 + 3;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(table_height),
            Constraint::Min(6),
        ])
        .split(area);

    f.render_widget(progress_gauge("📊 Overall Progress", &model.overall), chunks[0]);

    let rows: Vec<TableRow> = model
        .rooms
        .iter()
        .map(|r| {
            TableRow::new(vec![
                Cell::from(r.room.clone()),
                Cell::from(r.progress.completed.to_string()),
                Cell::from(r.progress.total.to_string()),
                Cell::from(format!("{:.1}", r.progress.percent)),
            ])
        })
        .collect();
    let table = Table::new(
        rows,
        [
            Constraint::Min(14),
            Constraint::Length(9),
            Constraint::Length(5),
            Constraint::Length(7),
        ],
    )
    .header(
        TableRow::new(vec!["room", "completed", "total", "percent"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(Block::default().title("Summary").borders(Borders::ALL));
    f.render_widget(table, chunks[1]);

    let data: Vec<(&str, u64)> = model
        .rooms
        .iter()
        .map(|r| (r.room.as_str(), r.progress.percent.round() as u64))
        .collect();
    let slots = data.len().max(1) as u16;
    let bar_width = (chunks[2].width.saturating_sub(2) / slots).saturating_sub(1).max(1);
    let chart = BarChart::default()
        .block(Block::default().title("📈 Completion by Room").borders(Borders::ALL))
        .data(data.as_slice())
        .max(100)
        .bar_width(bar_width)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Green));
    f.render_widget(chart, chunks[2]);
}

fn draw_task_log(f: &mut Frame, area: Rect, model: &DisplayModel) {
    let rows: Vec<TableRow> = model
        .log
        .iter()
        .map(|e| {
            TableRow::new(vec![
                Cell::from(e.room.clone()),
                Cell::from(e.task.clone()),
                Cell::from(e.status.label()).style(status_style(e.status)),
                Cell::from(e.completed_date.clone().unwrap_or_else(|| "-".to_string())),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(15),
            Constraint::Min(14),
            Constraint::Length(11),
            Constraint::Length(16),
        ],
    )
    .header(
        TableRow::new(vec!["room", "task", "status", "completed_date"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(Block::default().title("📝 Task Status Log").borders(Borders::ALL));
    f.render_widget(table, area);
}

fn progress_gauge<'a>(title: &'a str, progress: &Progress) -> Gauge<'a> {
    Gauge::default()
        .block(Block::default().title(title).borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(progress.ratio())
        .label(format!("{} ({:.1}%)", progress.metric(), progress.percent))
}

fn status_style(status: Status) -> Style {
    match status {
        Status::NotStarted => Style::default().fg(Color::Gray),
        Status::InProgress => Style::default().fg(Color::Yellow),
        Status::Done => Style::default().fg(Color::Green),
    }
}

/// Text progress bar for list rows, where a `Gauge` widget does not fit.
fn bar(ratio: f64) -> String {
    let filled = (ratio.clamp(0.0, 1.0) * BAR_CELLS as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_CELLS - filled))
}
