//! # Construction Projects
//!
//! A `Project` is a construction job owned by an Engineer entry. It is
//! decomposed into floors, each carrying a checklist of tasks, plus a
//! capacity-bounded history log of every action taken on the project.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── kind: ProjectKind (Concrete or SSM, fixed at creation)
//! ├── working_process: free-text progress note
//! ├── floors: Vec<Floor> (each with a task checklist)
//! └── history: Vec<HistoryEntry> (FIFO, capped at 200)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use track_core::project::{Project, ProjectKind};
//!
//! let mut project = Project::new("Tower", ProjectKind::Concrete).unwrap();
//! project.add_ground_floor().unwrap();
//!
//! // Ground floor is pre-populated from the Concrete template
//! assert_eq!(project.floors[0].tasks.len(), 7);
//! ```

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::errors::{TrackError, TrackResult};

/// Maximum number of history entries kept per project.
/// Oldest entries are evicted first (FIFO) once the cap is reached.
pub const HISTORY_CAP: usize = 200;

/// Reserved name for the unique ground floor of a project.
pub const GROUND_FLOOR: &str = "Ground Floor";

/// Construction method of a project.
///
/// Fixed at creation time; determines which task templates are used when
/// the ground floor is added. Serialized with the original literals
/// (`"Concrete"` / `"SSM"`); a missing field loads as `Concrete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ProjectKind {
    #[default]
    Concrete,
    #[serde(rename = "SSM")]
    Ssm,
}

impl ProjectKind {
    /// Parse the user-facing literal (`"Concrete"` or `"SSM"`).
    pub fn parse(value: &str) -> TrackResult<Self> {
        match value {
            "Concrete" => Ok(ProjectKind::Concrete),
            "SSM" => Ok(ProjectKind::Ssm),
            other => Err(TrackError::invalid_input(
                "type",
                other,
                "Type must be Concrete or SSM",
            )),
        }
    }

    /// User-facing display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ProjectKind::Concrete => "Concrete",
            ProjectKind::Ssm => "SSM",
        }
    }
}

/// Template task names for a new floor of the given project kind.
///
/// The ground floor carries the foundation work; upper floors repeat the
/// per-storey sequence only.
pub fn task_templates(kind: ProjectKind, is_ground: bool) -> &'static [&'static str] {
    match (kind, is_ground) {
        (ProjectKind::Concrete, true) => &[
            "bed concrete",
            "pedestal",
            "plinth",
            "column",
            "masonry",
            "lintel",
            "slab",
        ],
        (ProjectKind::Concrete, false) => &["column", "masonry", "lintel", "slab"],
        (ProjectKind::Ssm, true) => &["bed concrete", "ssm masonry", "dpc", "plinth"],
        (ProjectKind::Ssm, false) => &["ssm masonry", "dpc", "plinth"],
    }
}

/// A binary-completion checklist item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    pub fn new(name: impl Into<String>) -> Self {
        Task {
            name: name.into(),
            completed: false,
        }
    }
}

/// A project subdivision with a task checklist.
///
/// The `completed` flag is a one-way latch: it is set the first time every
/// task on the floor is checked and is deliberately never reset when a task
/// is later un-checked. Aggregate statistics use the live predicate in
/// [`crate::completion`] instead of this flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Floor {
    pub name: String,
    #[serde(default)]
    pub notes: String,
    /// Missing task arrays in loaded data are treated as empty, never as
    /// an error.
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub completed: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Floor {
    pub fn new(name: impl Into<String>) -> Self {
        Floor {
            name: name.into(),
            notes: String::new(),
            tasks: Vec::new(),
            completed: false,
        }
    }

    /// True for the unique ground-floor sentinel.
    pub fn is_ground(&self) -> bool {
        self.name == GROUND_FLOOR
    }
}

/// One immutable line of the project audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Creation-time string, local wall clock
    pub timestamp: String,
    /// Free-text description of the action
    pub action: String,
}

/// A construction job with a fixed type, decomposed into floors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: ProjectKind,
    #[serde(rename = "workingProcess", default)]
    pub working_process: String,
    #[serde(default)]
    pub floors: Vec<Floor>,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

impl Project {
    /// Create a new project and record its creation in the history log.
    pub fn new(name: impl Into<String>, kind: ProjectKind) -> TrackResult<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(TrackError::missing_field("name"));
        }
        let mut project = Project {
            name: name.clone(),
            kind,
            working_process: String::new(),
            floors: Vec::new(),
            history: Vec::new(),
        };
        project.push_history(format!("Project \"{}\" created", name));
        Ok(project)
    }

    /// Append an action to the history log, evicting the oldest entry
    /// once the log exceeds [`HISTORY_CAP`].
    pub fn push_history(&mut self, action: impl Into<String>) {
        self.history.push(HistoryEntry {
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            action: action.into(),
        });
        if self.history.len() > HISTORY_CAP {
            self.history.remove(0);
        }
    }

    pub fn has_ground_floor(&self) -> bool {
        self.floors.iter().any(|f| f.is_ground())
    }

    /// Add a floor. With no name given, floors are auto-numbered from the
    /// current floor count.
    pub fn add_floor(&mut self, name: Option<&str>) -> TrackResult<()> {
        let floor_name = match name.map(str::trim) {
            Some(n) if !n.is_empty() => {
                if n == GROUND_FLOOR {
                    return self.add_ground_floor();
                }
                n.to_string()
            }
            _ => format!("Floor {}", self.floors.len()),
        };
        self.floors.push(Floor::new(floor_name.clone()));
        self.push_history(format!("Floor \"{}\" added", floor_name));
        Ok(())
    }

    /// Add the ground floor, pre-populated with the template tasks for
    /// this project's kind. At most one ground floor may exist.
    pub fn add_ground_floor(&mut self) -> TrackResult<()> {
        if self.has_ground_floor() {
            return Err(TrackError::invalid_input(
                "floor",
                GROUND_FLOOR,
                "Ground Floor already exists",
            ));
        }
        let mut floor = Floor::new(GROUND_FLOOR);
        floor.tasks = task_templates(self.kind, true)
            .iter()
            .map(|t| Task::new(*t))
            .collect();
        self.floors.push(floor);
        self.push_history(format!("Floor \"{}\" added", GROUND_FLOOR));
        Ok(())
    }

    fn floor_mut(&mut self, floor_idx: usize) -> TrackResult<&mut Floor> {
        let count = self.floors.len();
        self.floors
            .get_mut(floor_idx)
            .ok_or_else(|| TrackError::not_found("Floor", format!("index {} of {}", floor_idx, count)))
    }

    pub fn rename_floor(&mut self, floor_idx: usize, new_name: &str) -> TrackResult<()> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(TrackError::missing_field("name"));
        }
        // The ground-floor sentinel stays unique under renames too
        if new_name == GROUND_FLOOR
            && self.has_ground_floor()
            && !self.floor_mut(floor_idx)?.is_ground()
        {
            return Err(TrackError::invalid_input(
                "floor",
                GROUND_FLOOR,
                "Ground Floor already exists",
            ));
        }
        let floor = self.floor_mut(floor_idx)?;
        let old_name = std::mem::replace(&mut floor.name, new_name.to_string());
        self.push_history(format!(
            "Floor renamed from \"{}\" to \"{}\"",
            old_name, new_name
        ));
        Ok(())
    }

    /// Delete a floor together with its tasks.
    pub fn remove_floor(&mut self, floor_idx: usize) -> TrackResult<()> {
        self.floor_mut(floor_idx)?;
        let floor = self.floors.remove(floor_idx);
        self.push_history(format!("Floor \"{}\" deleted", floor.name));
        Ok(())
    }

    pub fn set_floor_notes(&mut self, floor_idx: usize, notes: &str) -> TrackResult<()> {
        self.floor_mut(floor_idx)?.notes = notes.to_string();
        Ok(())
    }

    pub fn set_working_process(&mut self, text: &str) {
        self.working_process = text.to_string();
    }

    pub fn add_task(&mut self, floor_idx: usize, name: &str) -> TrackResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TrackError::missing_field("name"));
        }
        let floor = self.floor_mut(floor_idx)?;
        floor.tasks.push(Task::new(name));
        let floor_name = floor.name.clone();
        self.push_history(format!("Task \"{}\" added to {}", name, floor_name));
        Ok(())
    }

    fn task_mut(&mut self, floor_idx: usize, task_idx: usize) -> TrackResult<&mut Task> {
        let floor = self.floor_mut(floor_idx)?;
        let count = floor.tasks.len();
        floor
            .tasks
            .get_mut(task_idx)
            .ok_or_else(|| TrackError::not_found("Task", format!("index {} of {}", task_idx, count)))
    }

    pub fn rename_task(&mut self, floor_idx: usize, task_idx: usize, new_name: &str) -> TrackResult<()> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(TrackError::missing_field("name"));
        }
        let task = self.task_mut(floor_idx, task_idx)?;
        let old_name = std::mem::replace(&mut task.name, new_name.to_string());
        self.push_history(format!(
            "Task renamed from \"{}\" to \"{}\"",
            old_name, new_name
        ));
        Ok(())
    }

    pub fn remove_task(&mut self, floor_idx: usize, task_idx: usize) -> TrackResult<()> {
        self.task_mut(floor_idx, task_idx)?;
        let floor = &mut self.floors[floor_idx];
        let task = floor.tasks.remove(task_idx);
        let floor_name = floor.name.clone();
        self.push_history(format!(
            "Task \"{}\" deleted from {}",
            task.name, floor_name
        ));
        Ok(())
    }

    /// Toggle a task's completion state, returning the new state.
    ///
    /// The first time the toggle leaves every task on the floor complete,
    /// the floor's `completed` latch is set and the completion is recorded
    /// in the history log. The latch stays set even if a task is later
    /// un-checked.
    pub fn toggle_task(&mut self, floor_idx: usize, task_idx: usize) -> TrackResult<bool> {
        let task = self.task_mut(floor_idx, task_idx)?;
        task.completed = !task.completed;
        let completed = task.completed;
        let task_name = task.name.clone();

        let floor = &mut self.floors[floor_idx];
        let floor_name = floor.name.clone();
        let status = if completed { "completed" } else { "unchecked" };
        self.push_history(format!(
            "Task \"{}\" {} on {}",
            task_name, status, floor_name
        ));

        let floor = &mut self.floors[floor_idx];
        let all_done = !floor.tasks.is_empty() && floor.tasks.iter().all(|t| t.completed);
        if all_done && !floor.completed {
            floor.completed = true;
            let floor_name = floor.name.clone();
            self.push_history(format!("Floor \"{}\" completed!", floor_name));
        }

        Ok(completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_creation_records_history() {
        let project = Project::new("Tower", ProjectKind::Concrete).unwrap();
        assert_eq!(project.history.len(), 1);
        assert_eq!(project.history[0].action, "Project \"Tower\" created");
    }

    #[test]
    fn test_project_name_required() {
        assert!(Project::new("   ", ProjectKind::Ssm).is_err());
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!(ProjectKind::parse("Concrete").unwrap(), ProjectKind::Concrete);
        assert_eq!(ProjectKind::parse("SSM").unwrap(), ProjectKind::Ssm);
        assert_eq!(
            ProjectKind::parse("Timber").unwrap_err().error_code(),
            "INVALID_INPUT"
        );
    }

    #[test]
    fn test_ground_floor_templates() {
        let mut concrete = Project::new("A", ProjectKind::Concrete).unwrap();
        concrete.add_ground_floor().unwrap();
        let names: Vec<&str> = concrete.floors[0].tasks.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            ["bed concrete", "pedestal", "plinth", "column", "masonry", "lintel", "slab"]
        );

        let mut ssm = Project::new("B", ProjectKind::Ssm).unwrap();
        ssm.add_ground_floor().unwrap();
        assert_eq!(ssm.floors[0].tasks.len(), 4);
    }

    #[test]
    fn test_ground_floor_unique() {
        let mut project = Project::new("A", ProjectKind::Concrete).unwrap();
        project.add_ground_floor().unwrap();
        assert!(project.add_ground_floor().is_err());
        // Routing through add_floor hits the same guard
        assert!(project.add_floor(Some(GROUND_FLOOR)).is_err());
        assert_eq!(project.floors.len(), 1);
    }

    #[test]
    fn test_rename_cannot_create_second_ground_floor() {
        let mut project = Project::new("A", ProjectKind::Concrete).unwrap();
        project.add_ground_floor().unwrap();
        project.add_floor(Some("First Floor")).unwrap();

        assert_eq!(
            project
                .rename_floor(1, GROUND_FLOOR)
                .unwrap_err()
                .error_code(),
            "INVALID_INPUT"
        );
        assert_eq!(project.floors[1].name, "First Floor");
        assert_eq!(project.floors.iter().filter(|f| f.is_ground()).count(), 1);

        // Renaming the ground floor to its own name is a no-op, not an error
        project.rename_floor(0, GROUND_FLOOR).unwrap();

        // Without an existing ground floor the rename is allowed
        let mut bare = Project::new("B", ProjectKind::Concrete).unwrap();
        bare.add_floor(Some("First Floor")).unwrap();
        bare.rename_floor(0, GROUND_FLOOR).unwrap();
        assert!(bare.has_ground_floor());
    }

    #[test]
    fn test_floor_auto_numbering() {
        let mut project = Project::new("A", ProjectKind::Concrete).unwrap();
        project.add_floor(None).unwrap();
        project.add_floor(None).unwrap();
        assert_eq!(project.floors[0].name, "Floor 0");
        assert_eq!(project.floors[1].name, "Floor 1");
    }

    #[test]
    fn test_history_cap_fifo() {
        let mut project = Project::new("A", ProjectKind::Concrete).unwrap();
        for i in 0..HISTORY_CAP + 5 {
            project.push_history(format!("action {}", i));
        }
        assert_eq!(project.history.len(), HISTORY_CAP);
        // Creation entry and earliest actions were evicted first
        assert_eq!(project.history[0].action, "action 5");
        assert_eq!(
            project.history.last().unwrap().action,
            format!("action {}", HISTORY_CAP + 4)
        );
    }

    #[test]
    fn test_toggle_sets_one_way_latch() {
        let mut project = Project::new("A", ProjectKind::Concrete).unwrap();
        project.add_floor(Some("First Floor")).unwrap();
        project.add_task(0, "column").unwrap();
        project.add_task(0, "slab").unwrap();

        assert!(project.toggle_task(0, 0).unwrap());
        assert!(!project.floors[0].completed);

        assert!(project.toggle_task(0, 1).unwrap());
        assert!(project.floors[0].completed);
        assert!(project
            .history
            .iter()
            .any(|h| h.action == "Floor \"First Floor\" completed!"));

        // Un-checking does not reset the latch
        assert!(!project.toggle_task(0, 0).unwrap());
        assert!(project.floors[0].completed);
    }

    #[test]
    fn test_stale_indices_are_not_found() {
        let mut project = Project::new("A", ProjectKind::Concrete).unwrap();
        assert_eq!(
            project.toggle_task(0, 0).unwrap_err().error_code(),
            "NOT_FOUND"
        );
        project.add_floor(None).unwrap();
        assert!(project.remove_task(0, 2).is_err());
    }

    #[test]
    fn test_serde_wire_shape() {
        let mut project = Project::new("Tower Block", ProjectKind::Ssm).unwrap();
        project.add_ground_floor().unwrap();
        let json = serde_json::to_value(&project).unwrap();
        assert_eq!(json["type"], "SSM");
        assert_eq!(json["workingProcess"], "");
        // Latch not yet set, so the flag is omitted from the wire shape
        assert!(json["floors"][0].get("completed").is_none());

        let roundtrip: Project = serde_json::from_value(json).unwrap();
        assert_eq!(roundtrip, project);
    }

    #[test]
    fn test_missing_tasks_load_as_empty() {
        let floor: Floor = serde_json::from_str(r#"{"name":"Floor 1","notes":""}"#).unwrap();
        assert!(floor.tasks.is_empty());
        let project: Project = serde_json::from_str(r#"{"name":"Old"}"#).unwrap();
        assert_eq!(project.kind, ProjectKind::Concrete);
        assert!(project.floors.is_empty());
    }
}
