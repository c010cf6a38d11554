//! The static room and task table the dashboard is built from.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("catalog has no rooms")]
    Empty,
    #[error("room #{seq} has an empty name")]
    EmptyRoomName { seq: usize },
    #[error("room `{room}` appears more than once")]
    DuplicateRoom { room: String },
    #[error("room `{room}` has an empty task name")]
    EmptyTaskName { room: String },
    #[error("task `{task}` appears more than once in room `{room}`")]
    DuplicateTask { room: String, task: String },
}

/// One room as written in a config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomConfig {
    pub name: String,
    #[serde(default)]
    pub tasks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    /// 1-based position in the catalog.
    pub seq: usize,
    pub name: String,
    pub tasks: Vec<String>,
}

impl Room {
    /// Heading shown above the room, e.g. `"2. Living room"`.
    pub fn heading(&self) -> String {
        format!("{}. {}", self.seq, capitalize(&self.name))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    rooms: Vec<Room>,
}

impl Catalog {
    /// Builds a catalog from ordered room entries, numbering them from 1.
    pub fn new(rooms: Vec<RoomConfig>) -> Result<Self, CatalogError> {
        if rooms.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen_rooms = HashSet::new();
        let mut built = Vec::with_capacity(rooms.len());
        for (idx, room) in rooms.into_iter().enumerate() {
            let seq = idx + 1;
            if room.name.trim().is_empty() {
                return Err(CatalogError::EmptyRoomName { seq });
            }
            if !seen_rooms.insert(room.name.clone()) {
                return Err(CatalogError::DuplicateRoom { room: room.name });
            }

            let mut seen_tasks = HashSet::new();
            for task in &room.tasks {
                if task.trim().is_empty() {
                    return Err(CatalogError::EmptyTaskName { room: room.name.clone() });
                }
                if !seen_tasks.insert(task.as_str()) {
                    return Err(CatalogError::DuplicateTask {
                        room: room.name.clone(),
                        task: task.clone(),
                    });
                }
            }

            built.push(Room { seq, name: room.name, tasks: room.tasks });
        }

        Ok(Self { rooms: built })
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn room(&self, name: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.name == name)
    }

    pub fn tasks(&self, room: &str) -> &[String] {
        self.room(room).map(|r| r.tasks.as_slice()).unwrap_or(&[])
    }

    pub fn total_tasks(&self) -> usize {
        self.rooms.iter().map(|r| r.tasks.len()).sum()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(default_rooms()).expect("built-in catalog is valid")
    }
}

/// The household the dashboard ships with.
pub fn default_rooms() -> Vec<RoomConfig> {
    let table: [(&str, &[&str]); 7] = [
        ("kitchen", &["Wash dishes", "Wipe counters", "Sweep floor", "Mop", "Put away dishes"]),
        ("living room", &["Dust", "Vacuum carpet", "Mop", "Declutter and Organize"]),
        ("half bath", &["Clean sink", "Wipe mirror", "Mop floor", "Vacuum"]),
        (
            "full bath",
            &["Scrub shower", "Clean toilet", "Mop floor", "Vacuum", "Litter Changeout"],
        ),
        ("master bedroom", &["Make bed", "Laundry", "Change Bedding", "Swiffer"]),
        ("guest bedroom", &["Vacuum", "Declutter and Organize"]),
        ("hall", &["Mop floor", "Vacuum"]),
    ];

    table
        .iter()
        .map(|(name, tasks)| RoomConfig {
            name: name.to_string(),
            tasks: tasks.iter().map(|t| t.to_string()).collect(),
        })
        .collect()
}

/// Upper-cases the first character and lower-cases the rest.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn room(name: &str, tasks: &[&str]) -> RoomConfig {
        RoomConfig {
            name: name.to_string(),
            tasks: tasks.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn default_catalog_shape() {
        let catalog = Catalog::default();
        let counts: Vec<_> = catalog.rooms().iter().map(|r| r.tasks.len()).collect();
        assert_eq!(counts, vec![5, 4, 4, 5, 4, 2, 2]);
        assert_eq!(catalog.total_tasks(), 26);
        assert_eq!(catalog.rooms()[0].name, "kitchen");
        assert_eq!(catalog.rooms()[6].seq, 7);
    }

    #[test]
    fn headings_are_numbered_and_capitalized() {
        let catalog = Catalog::default();
        let headings: Vec<_> = catalog.rooms().iter().map(Room::heading).collect();
        assert_eq!(headings[0], "1. Kitchen");
        assert_eq!(headings[1], "2. Living room");
        assert_eq!(headings[4], "5. Master bedroom");
    }

    #[test]
    fn unknown_room_has_no_tasks() {
        let catalog = Catalog::default();
        assert!(catalog.tasks("garage").is_empty());
        assert_eq!(catalog.tasks("hall"), ["Mop floor", "Vacuum"]);
    }

    #[test]
    fn rejects_malformed_catalogs() {
        assert_eq!(Catalog::new(vec![]), Err(CatalogError::Empty));
        assert_eq!(
            Catalog::new(vec![room("a", &[]), room("  ", &[])]),
            Err(CatalogError::EmptyRoomName { seq: 2 })
        );
        assert_eq!(
            Catalog::new(vec![room("hall", &[]), room("hall", &["Mop"])]),
            Err(CatalogError::DuplicateRoom { room: "hall".into() })
        );
        assert_eq!(
            Catalog::new(vec![room("hall", &["Mop", ""])]),
            Err(CatalogError::EmptyTaskName { room: "hall".into() })
        );
        assert_eq!(
            Catalog::new(vec![room("hall", &["Mop", "Mop"])]),
            Err(CatalogError::DuplicateTask { room: "hall".into(), task: "Mop".into() })
        );
    }

    #[test]
    fn room_without_tasks_is_allowed() {
        let catalog = Catalog::new(vec![room("attic", &[])]).unwrap();
        assert_eq!(catalog.total_tasks(), 0);
    }
}
