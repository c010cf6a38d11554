//! Input handling: every key press becomes one [`Action`], and every action is
//! exactly one call into the session.

use crate::catalog::Catalog;
use crate::dashboard::{project, DisplayModel};
use crate::session::Session;
use crate::task::Status;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashSet;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetStatus { room: String, task: String, status: Status },
    CycleStatus { room: String, task: String },
    ResetRoom(String),
    ResetAll,
    Up,
    Down,
    /// Expand or collapse the room under the cursor.
    Toggle,
    SwitchView,
    Quit,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum View {
    #[default]
    Summary,
    TaskLog,
}

/// A line the cursor can sit on in the rooms pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    Room(usize),
    Task(usize, usize),
}

#[derive(Debug)]
pub struct App {
    pub catalog: Catalog,
    pub session: Session,
    pub view: View,
    pub selected: usize,
    expanded: HashSet<usize>,
    pub should_quit: bool,
}

impl App {
    pub fn new(catalog: Catalog, session: Session) -> Self {
        Self {
            catalog,
            session,
            view: View::default(),
            selected: 0,
            expanded: HashSet::new(),
            should_quit: false,
        }
    }

    pub fn is_expanded(&self, room_idx: usize) -> bool {
        self.expanded.contains(&room_idx)
    }

    /// Rows currently visible in the rooms pane, top to bottom.
    pub fn rows(&self) -> Vec<Row> {
        let mut rows = Vec::new();
        for (room_idx, room) in self.catalog.rooms().iter().enumerate() {
            rows.push(Row::Room(room_idx));
            if self.is_expanded(room_idx) {
                rows.extend((0..room.tasks.len()).map(|t| Row::Task(room_idx, t)));
            }
        }
        rows
    }

    pub fn selected_row(&self) -> Option<Row> {
        self.rows().get(self.selected).copied()
    }

    /// Room containing the cursor, whether on its heading or one of its tasks.
    pub fn selected_room(&self) -> Option<&str> {
        let room_idx = match self.selected_row()? {
            Row::Room(r) | Row::Task(r, _) => r,
        };
        self.catalog.rooms().get(room_idx).map(|r| r.name.as_str())
    }

    pub fn selected_task(&self) -> Option<(&str, &str)> {
        match self.selected_row()? {
            Row::Task(r, t) => {
                let room = self.catalog.rooms().get(r)?;
                Some((room.name.as_str(), room.tasks.get(t)?.as_str()))
            }
            Row::Room(_) => None,
        }
    }

    /// Checks the week, then builds the display model from fresh state.
    pub fn refresh(&mut self) -> DisplayModel {
        self.session.ensure_epoch();
        project(&self.catalog, &self.session)
    }

    pub fn handle_key(&self, key: KeyEvent) -> Option<Action> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }

        let task = || self.selected_task().map(|(r, t)| (r.to_string(), t.to_string()));
        let set = |status| {
            task().map(|(room, task)| Action::SetStatus { room, task, status })
        };

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            KeyCode::Up | KeyCode::Char('k') => Some(Action::Up),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::Down),
            KeyCode::Tab => Some(Action::SwitchView),
            KeyCode::Char('1') => set(Status::NotStarted),
            KeyCode::Char('2') => set(Status::InProgress),
            KeyCode::Char('3') => set(Status::Done),
            KeyCode::Char(' ') => task().map(|(room, task)| Action::CycleStatus { room, task }),
            KeyCode::Enter => match self.selected_row()? {
                Row::Room(_) => Some(Action::Toggle),
                Row::Task(..) => task().map(|(room, task)| Action::CycleStatus { room, task }),
            },
            KeyCode::Char('r') => self.selected_room().map(|r| Action::ResetRoom(r.to_string())),
            KeyCode::Char('R') => Some(Action::ResetAll),
            _ => None,
        }
    }

    /// Applies one action. The week check always runs first so a rollover
    /// never lands on top of a write.
    pub fn dispatch(&mut self, action: Action) {
        self.session.ensure_epoch();
        debug!(?action, "dispatch");

        match action {
            Action::SetStatus { room, task, status } => {
                self.session.set_status(&room, &task, status);
            }
            Action::CycleStatus { room, task } => {
                let next = self.session.get_status(&room, &task).cycle();
                self.session.set_status(&room, &task, next);
            }
            Action::ResetRoom(room) => self.session.reset(&self.catalog, &room),
            Action::ResetAll => self.session.reset_all(&self.catalog),
            Action::Up => {
                self.selected = self.selected.saturating_sub(1);
            }
            Action::Down => {
                let max = self.rows().len().saturating_sub(1);
                if self.selected < max {
                    self.selected += 1;
                }
            }
            Action::Toggle => {
                if let Some(Row::Room(r)) = self.selected_row() {
                    if !self.expanded.remove(&r) {
                        self.expanded.insert(r);
                    }
                }
            }
            Action::SwitchView => {
                self.view = match self.view {
                    View::Summary => View::TaskLog,
                    View::TaskLog => View::Summary,
                };
            }
            Action::Quit => self.should_quit = true,
        }
    }
}
