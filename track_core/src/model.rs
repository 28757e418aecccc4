//! # Hierarchy Model
//!
//! The in-memory tree of dealers, categorized contacts, and (for Engineer
//! entries) construction projects. A single [`Store`] owns the full tree:
//! it is replaced wholesale on load/restore and mutated in place otherwise.
//!
//! ## Structure
//!
//! ```text
//! Store
//! └── dealers: BTreeMap<String, Dealer>   (unique names)
//!     └── Dealer: three category buckets (Sub Dealer / Engineer / Contractor)
//!         └── Entry: contact record + visit history
//!             └── projects: Vec<Project>  (Engineer entries only)
//! ```
//!
//! The wire shape matches the remote store's snapshot format:
//! `{ "dealers": { "<name>": { "Sub Dealer": [...], ... } } }`.
//!
//! ## Example
//!
//! ```rust
//! use track_core::model::{Store, Category, Entry};
//!
//! let mut store = Store::default();
//! store.add_dealer("Acme").unwrap();
//! store
//!     .add_entry("Acme", Category::Engineer, Entry::new("Bob").unwrap())
//!     .unwrap();
//! assert_eq!(store.entries("Acme", Category::Engineer).unwrap().len(), 1);
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{TrackError, TrackResult};
use crate::project::{Project, ProjectKind};

/// Contact category under a dealer.
///
/// A closed enumeration replacing the original's stringly-typed bucket
/// keys; `as_str` yields the wire/display literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    SubDealer,
    Engineer,
    Contractor,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 3] = [Category::SubDealer, Category::Engineer, Category::Contractor];

    /// The user-facing / wire literal for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::SubDealer => "Sub Dealer",
            Category::Engineer => "Engineer",
            Category::Contractor => "Contractor",
        }
    }

    /// Parse a user-supplied category literal.
    pub fn parse(value: &str) -> TrackResult<Self> {
        match value {
            "Sub Dealer" => Ok(Category::SubDealer),
            "Engineer" => Ok(Category::Engineer),
            "Contractor" => Ok(Category::Contractor),
            other => Err(TrackError::invalid_input(
                "category",
                other,
                "Use: Sub Dealer, Engineer, or Contractor",
            )),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A contact record under a dealer category.
///
/// All fields except `name` are optional free text. Engineer entries
/// additionally own projects; for other categories the vector stays empty
/// and is omitted from the wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Entry {
    pub name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub place: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub email: String,
    /// Recorded visit dates, in recording order (append-only)
    #[serde(rename = "visitHistory", default)]
    pub visit_history: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<Project>,
}

impl Entry {
    /// Create an entry with the required name; all other fields empty.
    pub fn new(name: impl Into<String>) -> TrackResult<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(TrackError::missing_field("name"));
        }
        Ok(Entry {
            name,
            ..Entry::default()
        })
    }

    /// An entry counts as visited once it has at least one recorded visit,
    /// regardless of category.
    pub fn is_visited(&self) -> bool {
        !self.visit_history.is_empty()
    }
}

/// Top-level organizational unit owning categorized contacts.
///
/// All three buckets always exist even when empty; absent buckets in
/// loaded data deserialize to empty vectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Dealer {
    #[serde(rename = "Sub Dealer", default)]
    pub sub_dealers: Vec<Entry>,
    #[serde(rename = "Engineer", default)]
    pub engineers: Vec<Entry>,
    #[serde(rename = "Contractor", default)]
    pub contractors: Vec<Entry>,
}

impl Dealer {
    pub fn bucket(&self, category: Category) -> &Vec<Entry> {
        match category {
            Category::SubDealer => &self.sub_dealers,
            Category::Engineer => &self.engineers,
            Category::Contractor => &self.contractors,
        }
    }

    pub fn bucket_mut(&mut self, category: Category) -> &mut Vec<Entry> {
        match category {
            Category::SubDealer => &mut self.sub_dealers,
            Category::Engineer => &mut self.engineers,
            Category::Contractor => &mut self.contractors,
        }
    }

    /// All entries across the three buckets, in category order.
    pub fn all_entries(&self) -> impl Iterator<Item = &Entry> {
        Category::ALL.iter().flat_map(|c| self.bucket(*c).iter())
    }
}

/// The single in-memory source of truth for the full hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Store {
    pub dealers: BTreeMap<String, Dealer>,
}

impl Store {
    // ----- Dealer operations -----

    /// Add a dealer with all three category buckets initialized.
    pub fn add_dealer(&mut self, name: &str) -> TrackResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TrackError::missing_field("name"));
        }
        if self.dealers.contains_key(name) {
            return Err(TrackError::DuplicateDealer {
                name: name.to_string(),
            });
        }
        self.dealers.insert(name.to_string(), Dealer::default());
        Ok(())
    }

    /// Rename a dealer, keeping its entries.
    pub fn rename_dealer(&mut self, old_name: &str, new_name: &str) -> TrackResult<()> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(TrackError::missing_field("name"));
        }
        if new_name != old_name && self.dealers.contains_key(new_name) {
            return Err(TrackError::DuplicateDealer {
                name: new_name.to_string(),
            });
        }
        let dealer = self
            .dealers
            .remove(old_name)
            .ok_or_else(|| TrackError::not_found("Dealer", old_name))?;
        self.dealers.insert(new_name.to_string(), dealer);
        Ok(())
    }

    /// Delete a dealer and, cascading, all of its entries and projects.
    pub fn remove_dealer(&mut self, name: &str) -> TrackResult<()> {
        self.dealers
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| TrackError::not_found("Dealer", name))
    }

    pub fn dealer(&self, name: &str) -> TrackResult<&Dealer> {
        self.dealers
            .get(name)
            .ok_or_else(|| TrackError::not_found("Dealer", name))
    }

    pub fn dealer_mut(&mut self, name: &str) -> TrackResult<&mut Dealer> {
        self.dealers
            .get_mut(name)
            .ok_or_else(|| TrackError::not_found("Dealer", name))
    }

    // ----- Entry operations -----

    pub fn entries(&self, dealer: &str, category: Category) -> TrackResult<&Vec<Entry>> {
        Ok(self.dealer(dealer)?.bucket(category))
    }

    /// Append an entry to a dealer's category bucket.
    pub fn add_entry(&mut self, dealer: &str, category: Category, entry: Entry) -> TrackResult<()> {
        if entry.name.trim().is_empty() {
            return Err(TrackError::missing_field("name"));
        }
        self.dealer_mut(dealer)?.bucket_mut(category).push(entry);
        Ok(())
    }

    /// Replace an entry's contact fields, preserving its visit history and
    /// projects.
    pub fn update_entry(
        &mut self,
        dealer: &str,
        category: Category,
        idx: usize,
        mut entry: Entry,
    ) -> TrackResult<()> {
        if entry.name.trim().is_empty() {
            return Err(TrackError::missing_field("name"));
        }
        let existing = self.entry_mut(dealer, category, idx)?;
        entry.visit_history = std::mem::take(&mut existing.visit_history);
        entry.projects = std::mem::take(&mut existing.projects);
        *existing = entry;
        Ok(())
    }

    /// Delete an entry and, cascading, its projects.
    pub fn remove_entry(&mut self, dealer: &str, category: Category, idx: usize) -> TrackResult<()> {
        let bucket = self.dealer_mut(dealer)?.bucket_mut(category);
        if idx >= bucket.len() {
            return Err(TrackError::not_found(
                category.as_str(),
                format!("index {}", idx),
            ));
        }
        bucket.remove(idx);
        Ok(())
    }

    /// Record a visit date on an entry (any category).
    pub fn add_visit_date(
        &mut self,
        dealer: &str,
        category: Category,
        idx: usize,
        date: &str,
    ) -> TrackResult<()> {
        let date = date.trim();
        if date.is_empty() {
            return Err(TrackError::missing_field("date"));
        }
        self.entry_mut(dealer, category, idx)?
            .visit_history
            .push(date.to_string());
        Ok(())
    }

    pub fn entry_mut(
        &mut self,
        dealer: &str,
        category: Category,
        idx: usize,
    ) -> TrackResult<&mut Entry> {
        self.dealer_mut(dealer)?
            .bucket_mut(category)
            .get_mut(idx)
            .ok_or_else(|| TrackError::not_found(category.as_str(), format!("index {}", idx)))
    }

    // ----- Project operations (Engineer entries only) -----

    /// Create a project under an engineer entry.
    pub fn add_project(
        &mut self,
        dealer: &str,
        engineer_idx: usize,
        name: &str,
        kind: ProjectKind,
    ) -> TrackResult<()> {
        let project = Project::new(name, kind)?;
        self.entry_mut(dealer, Category::Engineer, engineer_idx)?
            .projects
            .push(project);
        Ok(())
    }

    pub fn project(
        &self,
        dealer: &str,
        engineer_idx: usize,
        project_idx: usize,
    ) -> TrackResult<&Project> {
        let engineer = self
            .dealer(dealer)?
            .engineers
            .get(engineer_idx)
            .ok_or_else(|| TrackError::not_found("Engineer", format!("index {}", engineer_idx)))?;
        engineer
            .projects
            .get(project_idx)
            .ok_or_else(|| TrackError::not_found("Project", format!("index {}", project_idx)))
    }

    pub fn project_mut(
        &mut self,
        dealer: &str,
        engineer_idx: usize,
        project_idx: usize,
    ) -> TrackResult<&mut Project> {
        self.entry_mut(dealer, Category::Engineer, engineer_idx)?
            .projects
            .get_mut(project_idx)
            .ok_or_else(|| TrackError::not_found("Project", format!("index {}", project_idx)))
    }

    /// Delete a project and, cascading, its floors, tasks, and history.
    pub fn remove_project(
        &mut self,
        dealer: &str,
        engineer_idx: usize,
        project_idx: usize,
    ) -> TrackResult<()> {
        let engineer = self.entry_mut(dealer, Category::Engineer, engineer_idx)?;
        if project_idx >= engineer.projects.len() {
            return Err(TrackError::not_found(
                "Project",
                format!("index {}", project_idx),
            ));
        }
        engineer.projects.remove(project_idx);
        Ok(())
    }
}
