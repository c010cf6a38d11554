//! Per-task status bookkeeping for the current week.
//!
//! Entries are created lazily the first time a task is touched. Everything is
//! discarded when the ISO week rolls over; callers run [`Session::ensure_epoch`]
//! once at the top of every pass before reading or writing.

use crate::catalog::Catalog;
use crate::clock::Clock;
use crate::task::{Status, TaskState};
use chrono::{DateTime, Local, IsoWeek};
use std::collections::HashMap;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct TaskKey {
    room: String,
    task: String,
}

impl TaskKey {
    fn new(room: &str, task: &str) -> Self {
        Self {
            room: room.to_string(),
            task: task.to_string(),
        }
    }
}

#[derive(Debug)]
pub struct Session {
    states: HashMap<TaskKey, TaskState>,
    epoch: IsoWeek,
    clock: Clock,
}

impl Session {
    pub fn new(clock: Clock) -> Self {
        Self {
            states: HashMap::new(),
            epoch: clock.iso_week(),
            clock,
        }
    }

    #[cfg(test)]
    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    pub fn get_status(&self, room: &str, task: &str) -> Status {
        self.states
            .get(&TaskKey::new(room, task))
            .map(|s| s.status)
            .unwrap_or_default()
    }

    pub fn completed_at(&self, room: &str, task: &str) -> Option<DateTime<Local>> {
        self.states
            .get(&TaskKey::new(room, task))
            .and_then(|s| s.completed_at)
    }

    /// Stores `status`. A task entering `Done` is stamped once; leaving `Done`
    /// drops the stamp.
    pub fn set_status(&mut self, room: &str, task: &str, status: Status) {
        let now = self.clock.now();
        let state = self.states.entry(TaskKey::new(room, task)).or_default();
        state.status = status;
        if status == Status::Done {
            if state.completed_at.is_none() {
                state.completed_at = Some(now);
                debug!(room, task, completed_at = %now, "task completed");
            }
        } else {
            state.completed_at = None;
        }
    }

    pub fn reset(&mut self, catalog: &Catalog, room: &str) {
        for task in catalog.tasks(room) {
            self.states.remove(&TaskKey::new(room, task));
        }
        info!(room, "room reset");
    }

    pub fn reset_all(&mut self, catalog: &Catalog) {
        for room in catalog.rooms() {
            for task in &room.tasks {
                self.states.remove(&TaskKey::new(&room.name, task));
            }
        }
        info!("all rooms reset");
    }

    /// ISO week number of the clock's current date.
    pub fn current_week(&self) -> u32 {
        self.clock.iso_week().week()
    }

    /// Clears everything if the ISO week moved since the last check.
    /// Returns `true` when a wipe happened.
    pub fn ensure_epoch(&mut self) -> bool {
        let now = self.clock.iso_week();
        if now == self.epoch {
            return false;
        }
        info!(
            from = %format_week(self.epoch),
            to = %format_week(now),
            cleared = self.states.len(),
            "week rolled over, clearing session"
        );
        self.states.clear();
        self.epoch = now;
        true
    }

    #[cfg(test)]
    pub fn epoch(&self) -> IsoWeek {
        self.epoch
    }
}

fn format_week(week: IsoWeek) -> String {
    format!("{}-W{:02}", week.year(), week.week())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn monday() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap()
    }

    fn session() -> Session {
        Session::new(Clock::fixed(monday()))
    }

    #[test]
    fn unknown_task_is_not_started() {
        let s = session();
        assert_eq!(s.get_status("kitchen", "Mop"), Status::NotStarted);
        assert_eq!(s.completed_at("kitchen", "Mop"), None);
    }

    #[test]
    fn done_is_stamped_once() {
        let mut s = session();
        s.set_status("kitchen", "Mop", Status::Done);
        let first = s.completed_at("kitchen", "Mop");
        assert_eq!(first, Some(monday()));

        s.clock_mut().advance(Duration::hours(2));
        s.set_status("kitchen", "Mop", Status::Done);
        assert_eq!(s.completed_at("kitchen", "Mop"), first);
    }

    #[test]
    fn leaving_done_clears_stamp_and_redo_restamps() {
        let mut s = session();
        s.set_status("kitchen", "Mop", Status::Done);
        s.set_status("kitchen", "Mop", Status::InProgress);
        assert_eq!(s.get_status("kitchen", "Mop"), Status::InProgress);
        assert_eq!(s.completed_at("kitchen", "Mop"), None);

        s.clock_mut().advance(Duration::hours(3));
        s.set_status("kitchen", "Mop", Status::Done);
        assert_eq!(
            s.completed_at("kitchen", "Mop"),
            Some(monday() + Duration::hours(3))
        );
    }

    #[test]
    fn reset_room_leaves_other_rooms_alone() {
        let catalog = Catalog::default();
        let mut s = session();
        for task in catalog.tasks("kitchen") {
            s.set_status("kitchen", task, Status::Done);
        }
        s.set_status("hall", "Vacuum", Status::Done);

        s.reset(&catalog, "kitchen");

        for task in catalog.tasks("kitchen") {
            assert_eq!(s.get_status("kitchen", task), Status::NotStarted);
            assert_eq!(s.completed_at("kitchen", task), None);
        }
        assert_eq!(s.get_status("hall", "Vacuum"), Status::Done);
        assert!(s.completed_at("hall", "Vacuum").is_some());
    }

    #[test]
    fn reset_all_clears_every_room() {
        let catalog = Catalog::default();
        let mut s = session();
        for room in catalog.rooms() {
            for task in &room.tasks {
                s.set_status(&room.name, task, Status::InProgress);
            }
        }
        s.set_status("hall", "Mop floor", Status::Done);

        s.reset_all(&catalog);

        for room in catalog.rooms() {
            for task in &room.tasks {
                assert_eq!(s.get_status(&room.name, task), Status::NotStarted);
                assert_eq!(s.completed_at(&room.name, task), None);
            }
        }
    }

    #[test]
    fn same_week_keeps_state() {
        let mut s = session();
        s.set_status("hall", "Vacuum", Status::Done);
        s.clock_mut().advance(Duration::days(6));
        assert!(!s.ensure_epoch());
        assert_eq!(s.get_status("hall", "Vacuum"), Status::Done);
    }

    #[test]
    fn week_rollover_clears_everything() {
        let mut s = session();
        s.set_status("hall", "Vacuum", Status::Done);
        s.set_status("kitchen", "Mop", Status::InProgress);
        assert_eq!(s.current_week(), 43);

        s.clock_mut().advance(Duration::days(7));
        assert!(s.ensure_epoch());
        assert_eq!(s.current_week(), 44);
        assert_eq!(s.epoch().week(), 44);
        assert_eq!(s.get_status("hall", "Vacuum"), Status::NotStarted);
        assert_eq!(s.completed_at("hall", "Vacuum"), None);
        assert_eq!(s.get_status("kitchen", "Mop"), Status::NotStarted);

        // Already on the new epoch.
        assert!(!s.ensure_epoch());
    }

    #[test]
    fn same_week_number_next_year_still_resets() {
        let mut s = session();
        s.set_status("hall", "Vacuum", Status::Done);
        s.clock_mut().advance(Duration::weeks(53));
        assert_eq!(s.current_week(), 43);
        assert!(s.ensure_epoch());
        assert_eq!(s.get_status("hall", "Vacuum"), Status::NotStarted);
    }
}
