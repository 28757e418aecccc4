//! # track_charts - Dashboard Visualization
//!
//! Chart rendering for the SiteTrack dashboard. The chart routines take
//! the aggregation reports from `track_core` and emit a toolkit-agnostic
//! [`scene::Scene`] of draw primitives; the host application rasterizes
//! the scene with whatever backend it embeds.
//!
//! ## Quick Start
//!
//! ```rust
//! use track_core::report::PortfolioStats;
//! use track_charts::charts::draw_completion_chart;
//! use track_charts::surface::Surface;
//!
//! let stats = PortfolioStats {
//!     total_projects: 3,
//!     completed_projects: 1,
//!     in_progress_projects: 2,
//!     ..PortfolioStats::default()
//! };
//! let surface = Surface::from_container(420.0, 2.0);
//! let scene = draw_completion_chart(&stats, &surface);
//! assert!(!scene.primitives().is_empty());
//! ```
//!
//! ## Modules
//!
//! - [`scene`] - Draw-command primitives and the scene container
//! - [`surface`] - Container-driven surface sizing with DPI awareness
//! - [`charts`] - The three dashboard chart routines
//! - [`scheduler`] - Delayed/debounced redraw timers

pub mod charts;
pub mod scene;
pub mod scheduler;
pub mod surface;

pub use charts::{draw_completion_chart, draw_pending_chart, draw_visited_chart};
pub use scene::{Align, Color, Point, Primitive, Scene, Stroke};
pub use scheduler::RedrawScheduler;
pub use surface::Surface;
