//! Plain stdout rendering of the dashboard, for scripting and for checking a
//! custom catalog without starting the TUI.

use crate::dashboard::DisplayModel;
use clap::ValueEnum;
use std::io::{self, Write};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
}

pub fn write_report<W: Write>(out: &mut W, model: &DisplayModel, format: Format) -> io::Result<()> {
    match format {
        Format::Json => {
            serde_json::to_writer_pretty(&mut *out, model)?;
            writeln!(out)
        }
        Format::Text => write_text(out, model),
    }
}

fn write_text<W: Write>(out: &mut W, model: &DisplayModel) -> io::Result<()> {
    let room_width = model
        .rooms
        .iter()
        .map(|r| r.room.len())
        .chain(std::iter::once("room".len()))
        .max()
        .unwrap_or(4);
    let task_width = model
        .log
        .iter()
        .map(|e| e.task.len())
        .chain(std::iter::once("task".len()))
        .max()
        .unwrap_or(4);

    writeln!(out, "Overall Progress")?;
    writeln!(
        out,
        "{:<room_width$}  {:>9}  {:>5}  {:>7}",
        "room", "completed", "total", "percent"
    )?;
    for room in &model.rooms {
        writeln!(
            out,
            "{:<room_width$}  {:>9}  {:>5}  {:>7.1}",
            room.room, room.progress.completed, room.progress.total, room.progress.percent
        )?;
    }
    writeln!(
        out,
        "Overall Completion: {} ({:.1}%)",
        model.overall.metric(),
        model.overall.percent
    )?;

    writeln!(out)?;
    writeln!(out, "Task Status Log")?;
    writeln!(
        out,
        "{:<room_width$}  {:<task_width$}  {:<11}  {}",
        "room", "task", "status", "completed_date"
    )?;
    for entry in &model.log {
        writeln!(
            out,
            "{:<room_width$}  {:<task_width$}  {:<11}  {}",
            entry.room,
            entry.task,
            entry.status.label(),
            entry.completed_date.as_deref().unwrap_or("-")
        )?;
    }
    Ok(())
}
