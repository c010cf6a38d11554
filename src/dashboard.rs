//! Projection of catalog + session into everything the screen shows.

use crate::catalog::Catalog;
use crate::session::Session;
use crate::task::{Status, COMPLETED_FORMAT};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
    pub percent: f64,
}

impl Progress {
    pub fn new(completed: usize, total: usize) -> Self {
        Self {
            completed,
            total,
            percent: ratio(completed, total) * 100.0,
        }
    }

    /// Completion in `0.0..=1.0`, zero for an empty room.
    pub fn ratio(&self) -> f64 {
        ratio(self.completed, self.total)
    }

    /// `"completed/total"` as shown under each gauge.
    pub fn metric(&self) -> String {
        format!("{}/{}", self.completed, self.total)
    }
}

fn ratio(completed: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        completed as f64 / total as f64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskRow {
    pub task: String,
    pub status: Status,
    pub completed_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomProgress {
    pub seq: usize,
    pub room: String,
    pub heading: String,
    #[serde(flatten)]
    pub progress: Progress,
    pub tasks: Vec<TaskRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskLogEntry {
    pub room: String,
    pub task: String,
    pub status: Status,
    pub completed_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayModel {
    pub rooms: Vec<RoomProgress>,
    pub overall: Progress,
    pub log: Vec<TaskLogEntry>,
}

#[cfg(test)]
impl DisplayModel {
    pub fn room(&self, name: &str) -> Option<&RoomProgress> {
        self.rooms.iter().find(|r| r.room == name)
    }
}

/// Reads the session fresh for every task; nothing is cached between calls.
pub fn project(catalog: &Catalog, session: &Session) -> DisplayModel {
    let mut rooms = Vec::with_capacity(catalog.rooms().len());
    let mut log = Vec::with_capacity(catalog.total_tasks());

    for room in catalog.rooms() {
        let mut completed = 0;
        let mut tasks = Vec::with_capacity(room.tasks.len());

        for task in &room.tasks {
            let status = session.get_status(&room.name, task);
            let completed_date = if status == Status::Done {
                completed += 1;
                session
                    .completed_at(&room.name, task)
                    .map(|at| at.format(COMPLETED_FORMAT).to_string())
            } else {
                None
            };

            log.push(TaskLogEntry {
                room: room.name.clone(),
                task: task.clone(),
                status,
                completed_date: completed_date.clone(),
            });
            tasks.push(TaskRow {
                task: task.clone(),
                status,
                completed_date,
            });
        }

        rooms.push(RoomProgress {
            seq: room.seq,
            room: room.name.clone(),
            heading: room.heading(),
            progress: Progress::new(completed, room.tasks.len()),
            tasks,
        });
    }

    let completed = rooms.iter().map(|r| r.progress.completed).sum();
    let total = rooms.iter().map(|r| r.progress.total).sum();

    DisplayModel {
        rooms,
        overall: Progress::new(completed, total),
        log,
    }
}
