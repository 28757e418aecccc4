//! # track_core - Work-Tracking Engine
//!
//! `track_core` is the engine behind SiteTrack, a work tracker for
//! construction-site dealer/engineer/project hierarchies. Dealers hold
//! categorized contacts; engineers own construction projects; projects are
//! decomposed into floors, each with a task checklist templated by project
//! type.
//!
//! ## Design Philosophy
//!
//! - **Single source of truth**: one in-memory [`model::Store`], owned by a
//!   [`session::Session`] controller, no ambient globals
//! - **Pure derivations**: completion and portfolio statistics are pure
//!   functions over the store
//! - **JSON-First**: all types serialize to the remote store's wire shape
//! - **Best-effort replication**: mutations replicate write-behind; a
//!   failed push never breaks interactivity
//!
//! ## Quick Start
//!
//! ```rust
//! use track_core::model::{Store, Category, Entry};
//! use track_core::project::ProjectKind;
//! use track_core::report::portfolio_stats;
//!
//! let mut store = Store::default();
//! store.add_dealer("Acme").unwrap();
//! store.add_entry("Acme", Category::Engineer, Entry::new("Bob").unwrap()).unwrap();
//! store.add_project("Acme", 0, "Tower", ProjectKind::Concrete).unwrap();
//!
//! let stats = portfolio_stats(&store);
//! assert_eq!(stats.pending_projects, 1);
//! ```
//!
//! ## Modules
//!
//! - [`model`] - Store, dealers, categories, contact entries
//! - [`project`] - Projects, floors, tasks, history log, task templates
//! - [`completion`] - Pure completion-ratio calculators
//! - [`report`] - Portfolio statistics and pending-projects ranking
//! - [`session`] - State controller with write-behind sync status
//! - [`remote`] - HTTP client for the backend (auth, snapshot, restore)
//! - [`file_io`] - Backup export/import with atomic saves
//! - [`errors`] - Structured error types

pub mod completion;
pub mod errors;
pub mod file_io;
pub mod model;
pub mod project;
pub mod remote;
pub mod report;
pub mod session;

// Re-export commonly used types at crate root for convenience
pub use errors::{TrackError, TrackResult};
pub use model::{Category, Dealer, Entry, Store};
pub use project::{Floor, HistoryEntry, Project, ProjectKind, Task};
pub use report::{pending_projects, portfolio_stats, PendingProject, PortfolioStats};
pub use session::{Session, SyncState};
