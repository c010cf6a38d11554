use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Format used wherever a completion timestamp is shown.
pub const COMPLETED_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[default]
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    Done,
}

impl Status {
    #[cfg(test)]
    pub const ALL: [Status; 3] = [Status::NotStarted, Status::InProgress, Status::Done];

    pub fn label(self) -> &'static str {
        match self {
            Status::NotStarted => "Not Started",
            Status::InProgress => "In Progress",
            Status::Done => "Done",
        }
    }

    /// Next status in dropdown order, wrapping back to `NotStarted`.
    pub fn cycle(self) -> Self {
        match self {
            Status::NotStarted => Status::InProgress,
            Status::InProgress => Status::Done,
            Status::Done => Status::NotStarted,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TaskState {
    pub status: Status,
    pub completed_at: Option<DateTime<Local>>,
}
