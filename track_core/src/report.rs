//! # Aggregation Reporter
//!
//! Cross-cutting views over the full store: whole-portfolio counters and
//! the pending-projects ranking that feeds the dashboard charts.

use serde::{Deserialize, Serialize};

use crate::completion::{is_project_completed, project_task_counts};
use crate::model::Store;

/// Whole-portfolio counters.
///
/// `pending_projects` and `in_progress_projects` are intentionally computed
/// identically (any non-completed project counts toward both); the
/// duplication is preserved from the original behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PortfolioStats {
    pub total_dealers: usize,
    pub total_engineers: usize,
    pub total_projects: usize,
    pub pending_projects: usize,
    pub completed_projects: usize,
    pub in_progress_projects: usize,
    pub visited_count: usize,
    pub not_visited_count: usize,
}

/// One row of the pending-projects ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingProject {
    pub name: String,
    pub dealer: String,
    pub engineer: String,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub pending_tasks: usize,
    /// round(100 * completed / total)
    pub progress: u8,
}

/// Compute portfolio statistics across every dealer in the store.
///
/// Visit tracking is category-agnostic: Sub Dealer, Engineer, and
/// Contractor entries all contribute to the visited / not-visited counts.
pub fn portfolio_stats(store: &Store) -> PortfolioStats {
    let mut stats = PortfolioStats::default();

    for dealer in store.dealers.values() {
        stats.total_dealers += 1;
        stats.total_engineers += dealer.engineers.len();

        for entry in dealer.all_entries() {
            if entry.is_visited() {
                stats.visited_count += 1;
            } else {
                stats.not_visited_count += 1;
            }
        }

        for engineer in &dealer.engineers {
            for project in &engineer.projects {
                stats.total_projects += 1;
                if is_project_completed(project) {
                    stats.completed_projects += 1;
                } else {
                    stats.pending_projects += 1;
                    stats.in_progress_projects += 1;
                }
            }
        }
    }

    stats
}

/// Rank every project with at least one task by how much work remains.
///
/// Sorted descending by pending tasks, ties broken by descending total
/// tasks (stable). Projects with zero tasks are excluded here but still
/// count as pending in [`portfolio_stats`].
pub fn pending_projects(store: &Store) -> Vec<PendingProject> {
    let mut ranking = Vec::new();

    for (dealer_name, dealer) in &store.dealers {
        for engineer in &dealer.engineers {
            for project in &engineer.projects {
                let (completed_tasks, total_tasks) = project_task_counts(project);
                if total_tasks == 0 {
                    continue;
                }
                let pending_tasks = total_tasks - completed_tasks;
                ranking.push(PendingProject {
                    name: project.name.clone(),
                    dealer: dealer_name.clone(),
                    engineer: engineer.name.clone(),
                    total_tasks,
                    completed_tasks,
                    pending_tasks,
                    progress: ((completed_tasks as f64 / total_tasks as f64) * 100.0).round()
                        as u8,
                });
            }
        }
    }

    ranking.sort_by(|a, b| {
        b.pending_tasks
            .cmp(&a.pending_tasks)
            .then(b.total_tasks.cmp(&a.total_tasks))
    });
    ranking
}
