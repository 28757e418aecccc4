//! Dashboard chart routines.
//!
//! Three independent visualizations over the aggregation reports: the
//! completion pie, the pending-tasks bar ranking, and the visited /
//! not-visited comparison. Each routine is a full-surface repaint built
//! from scratch on every call; redrawing with the same input reproduces
//! the same scene.

use std::f32::consts::{FRAC_PI_2, TAU};

use track_core::report::{PendingProject, PortfolioStats};

use crate::scene::{Align, Color, Point, Scene, Stroke};
use crate::surface::Surface;

/// Completed work (pie slice, visited bar)
pub const COMPLETED: Color = Color::from_rgb(0.153, 0.682, 0.376); // #27ae60
/// Work in progress (pie slice, partially-pending bars)
pub const WARNING: Color = Color::from_rgb(0.953, 0.612, 0.071); // #f39c12
/// Nothing done yet (fully-pending bars, not-visited bar)
pub const ALARM: Color = Color::from_rgb(0.906, 0.298, 0.235); // #e74c3c
/// Unfilled bar track
pub const TRACK: Color = Color::from_rgb(0.925, 0.941, 0.945); // #ecf0f1
/// Primary label text
pub const TEXT: Color = Color::from_rgb(0.2, 0.2, 0.2); // #333
/// Secondary label text
pub const MUTED: Color = Color::from_rgb(0.4, 0.4, 0.4); // #666
/// Empty-state message text
pub const EMPTY: Color = Color::from_rgb(0.6, 0.6, 0.6); // #999

/// Maximum number of bars shown in the pending ranking.
pub const MAX_PENDING_BARS: usize = 8;

fn empty_state(scene: &mut Scene, message: &str) {
    let position = Point::new(scene.width() / 2.0, scene.height() / 2.0);
    scene.fill_text(message, position, 16.0, EMPTY, Align::Center);
}

/// Two-slice completion pie: completed vs in-progress projects.
///
/// Slices start at the top (-90 degrees) with the completed slice first in
/// clockwise order; sweep angles are proportional to the counts. A
/// two-row color-coded legend with literal counts sits below the pie.
/// Degenerates to a "No data available" message when there are no
/// projects.
pub fn draw_completion_chart(stats: &PortfolioStats, surface: &Surface) -> Scene {
    let width = surface.logical_width();
    let height = surface.logical_height();
    let mut scene = Scene::new(width, height);

    let total = stats.total_projects;
    if total == 0 {
        empty_state(&mut scene, "No data available");
        return scene;
    }

    let center = Point::new(width / 2.0, height / 2.0);
    let radius = width.min(height) / 2.0 - 50.0;
    let slice_stroke = Some(Stroke {
        color: Color::WHITE,
        width: 2.0,
    });

    let mut current_angle = -FRAC_PI_2;

    if stats.completed_projects > 0 {
        let sweep = stats.completed_projects as f32 / total as f32 * TAU;
        scene.fill_slice(center, radius, current_angle, sweep, COMPLETED, slice_stroke);
        current_angle += sweep;
    }

    if stats.in_progress_projects > 0 {
        let sweep = stats.in_progress_projects as f32 / total as f32 * TAU;
        scene.fill_slice(center, radius, current_angle, sweep, WARNING, slice_stroke);
    }

    // Legend, two rows below the pie
    let legend_y = center.y + radius + 30.0;
    let legend_x = center.x - 60.0;

    scene.fill_rect(legend_x, legend_y - 20.0, 15.0, 15.0, COMPLETED);
    scene.fill_text(
        format!("Completed: {}", stats.completed_projects),
        Point::new(legend_x + 20.0, legend_y - 8.0),
        14.0,
        TEXT,
        Align::Left,
    );

    scene.fill_rect(legend_x, legend_y, 15.0, 15.0, WARNING);
    scene.fill_text(
        format!("In Progress: {}", stats.in_progress_projects),
        Point::new(legend_x + 20.0, legend_y + 12.0),
        14.0,
        TEXT,
        Align::Left,
    );

    scene
}

/// Horizontal bar ranking of the most-pending projects.
///
/// Shows at most [`MAX_PENDING_BARS`] bars from the (already sorted)
/// ranking. Filled width is proportional to pending/total tasks; a bar
/// where nothing is done yet uses the alarm color, otherwise the warning
/// color. Names are truncated with an ellipsis to a width-derived budget,
/// and a summary line totals the displayed bars at the bottom.
pub fn draw_pending_chart(ranking: &[PendingProject], surface: &Surface) -> Scene {
    let width = surface.logical_width();
    let height = surface.logical_height();
    let mut scene = Scene::new(width, height);

    if ranking.is_empty() {
        empty_state(&mut scene, "No projects available");
        return scene;
    }

    let bar_height = 25.0;
    let spacing = 8.0;
    let start_x = 20.0;
    let shown = &ranking[..ranking.len().min(MAX_PENDING_BARS)];
    let total_bar_height = (bar_height + spacing) * shown.len() as f32;
    let start_y = (height - total_bar_height) / 2.0;

    for (index, project) in shown.iter().enumerate() {
        let y = start_y + index as f32 * (bar_height + spacing);
        let bar_width = width - 40.0;
        let pending_ratio = project.pending_tasks as f32 / project.total_tasks as f32;
        let pending_width = pending_ratio * bar_width;

        scene.fill_rect(start_x, y, bar_width, bar_height, TRACK);

        if pending_width > 0.0 {
            let color = if project.pending_tasks == project.total_tasks {
                ALARM
            } else {
                WARNING
            };
            scene.fill_rect(start_x, y, pending_width, bar_height, color);
        }

        let name_budget = (width / 10.0) as usize;
        scene.fill_text(
            truncate_name(&project.name, name_budget),
            Point::new(start_x + 5.0, y + 17.0),
            12.0,
            TEXT,
            Align::Left,
        );

        let percent = (pending_ratio * 100.0).round() as u32;
        scene.fill_text(
            format!(
                "{}/{} ({}%)",
                project.pending_tasks, project.total_tasks, percent
            ),
            Point::new(width - 20.0, y + 17.0),
            11.0,
            MUTED,
            Align::Right,
        );
    }

    // Summary over the displayed bars only; the ranking is already capped
    let total_pending: usize = shown.iter().map(|p| p.pending_tasks).sum();
    let total_tasks: usize = shown.iter().map(|p| p.total_tasks).sum();
    scene.fill_text_bold(
        format!("Total Pending: {} / {} tasks", total_pending, total_tasks),
        Point::new(width / 2.0, height - 10.0),
        12.0,
        MUTED,
        Align::Center,
    );

    scene
}

/// Visited vs not-visited comparison bars.
///
/// Two horizontal bars proportional to each count out of the combined
/// total, with the count labeled just past the bar end and a total-entries
/// footer. Degenerates to "No data available" when there are no entries.
pub fn draw_visited_chart(stats: &PortfolioStats, surface: &Surface) -> Scene {
    let width = surface.logical_width();
    let height = surface.logical_height();
    let mut scene = Scene::new(width, height);

    let visited = stats.visited_count;
    let not_visited = stats.not_visited_count;
    let total = visited + not_visited;

    if total == 0 {
        empty_state(&mut scene, "No data available");
        return scene;
    }

    let bar_height = 30.0;
    let spacing = 20.0;
    let start_x = 20.0;
    let max_width = width - 40.0;
    let mut current_y = 50.0;

    let visited_width = visited as f32 / total as f32 * max_width;
    scene.fill_rect(start_x, current_y, visited_width, bar_height, COMPLETED);
    scene.fill_text(
        format!("Visited: {}", visited),
        Point::new(start_x + visited_width + 10.0, current_y + 20.0),
        14.0,
        TEXT,
        Align::Left,
    );

    current_y += bar_height + spacing;

    let not_visited_width = not_visited as f32 / total as f32 * max_width;
    scene.fill_rect(start_x, current_y, not_visited_width, bar_height, ALARM);
    scene.fill_text(
        format!("Not Visited: {}", not_visited),
        Point::new(start_x + not_visited_width + 10.0, current_y + 20.0),
        14.0,
        TEXT,
        Align::Left,
    );

    scene.fill_text(
        format!("Total Entries: {}", total),
        Point::new(width / 2.0, current_y + bar_height + 30.0),
        12.0,
        MUTED,
        Align::Center,
    );

    scene
}

/// Truncate a project name to the given character budget, appending an
/// ellipsis when it does not fit.
fn truncate_name(name: &str, budget: usize) -> String {
    if name.chars().count() <= budget {
        return name.to_string();
    }
    let keep = budget.saturating_sub(3);
    let mut truncated: String = name.chars().take(keep).collect();
    truncated.push_str("...");
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Primitive;

    fn surface() -> Surface {
        Surface::from_container(420.0, 1.0)
    }

    fn ranked(name: &str, completed: usize, total: usize) -> PendingProject {
        PendingProject {
            name: name.to_string(),
            dealer: "Acme".to_string(),
            engineer: "Bob".to_string(),
            total_tasks: total,
            completed_tasks: completed,
            pending_tasks: total - completed,
            progress: ((completed as f64 / total as f64) * 100.0).round() as u8,
        }
    }

    fn texts(scene: &Scene) -> Vec<&str> {
        scene
            .primitives()
            .iter()
            .filter_map(|p| match p {
                Primitive::Text { content, .. } => Some(content.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_pie_degenerates_without_projects() {
        let scene = draw_completion_chart(&PortfolioStats::default(), &surface());
        assert_eq!(texts(&scene), ["No data available"]);
    }

    #[test]
    fn test_pie_slices_are_proportional_and_clockwise_from_top() {
        let stats = PortfolioStats {
            total_projects: 4,
            completed_projects: 1,
            in_progress_projects: 3,
            pending_projects: 3,
            ..PortfolioStats::default()
        };
        let scene = draw_completion_chart(&stats, &surface());

        let slices: Vec<_> = scene
            .primitives()
            .iter()
            .filter_map(|p| match p {
                Primitive::PieSlice {
                    start_angle, sweep, fill, ..
                } => Some((*start_angle, *sweep, *fill)),
                _ => None,
            })
            .collect();
        assert_eq!(slices.len(), 2);

        // Completed slice first, starting at the top
        let (start, sweep, fill) = slices[0];
        assert!((start + FRAC_PI_2).abs() < 1e-6);
        assert!((sweep - TAU / 4.0).abs() < 1e-6);
        assert_eq!(fill, COMPLETED);

        // In-progress slice continues where the first ended
        let (start2, sweep2, fill2) = slices[1];
        assert!((start2 - (start + sweep)).abs() < 1e-6);
        assert!((sweep2 - TAU * 0.75).abs() < 1e-6);
        assert_eq!(fill2, WARNING);

        let labels = texts(&scene);
        assert!(labels.contains(&"Completed: 1"));
        assert!(labels.contains(&"In Progress: 3"));
    }

    #[test]
    fn test_pending_chart_degenerates_without_ranking() {
        let scene = draw_pending_chart(&[], &surface());
        assert_eq!(texts(&scene), ["No projects available"]);
    }

    #[test]
    fn test_pending_chart_caps_at_eight_bars() {
        let ranking: Vec<_> = (0..12).map(|i| ranked(&format!("P{}", i), 0, 5)).collect();
        let scene = draw_pending_chart(&ranking, &surface());

        let bars = scene
            .primitives()
            .iter()
            .filter(|p| matches!(p, Primitive::Rect { color, .. } if *color == TRACK))
            .count();
        assert_eq!(bars, MAX_PENDING_BARS);

        // Summary covers the displayed bars only: 8 * 5 tasks
        assert!(texts(&scene).contains(&"Total Pending: 40 / 40 tasks"));
    }

    #[test]
    fn test_pending_bar_colors_by_progress() {
        let ranking = vec![ranked("Untouched", 0, 4), ranked("Started", 1, 4)];
        let scene = draw_pending_chart(&ranking, &surface());

        let fills: Vec<_> = scene
            .primitives()
            .iter()
            .filter_map(|p| match p {
                Primitive::Rect { color, .. } if *color == ALARM || *color == WARNING => {
                    Some(*color)
                }
                _ => None,
            })
            .collect();
        assert_eq!(fills, [ALARM, WARNING]);

        let labels = texts(&scene);
        assert!(labels.contains(&"4/4 (100%)"));
        assert!(labels.contains(&"3/4 (75%)"));
    }

    #[test]
    fn test_long_names_are_truncated() {
        let long_name = "An Extremely Long Project Name That Cannot Possibly Fit".repeat(2);
        let ranking = vec![ranked(&long_name, 0, 1)];
        let scene = draw_pending_chart(&ranking, &surface());

        let budget = (surface().logical_width() / 10.0) as usize;
        let label = texts(&scene)
            .into_iter()
            .find(|t| t.ends_with("..."))
            .expect("truncated name label");
        assert_eq!(label.chars().count(), budget);
    }

    #[test]
    fn test_visited_chart_degenerates_without_entries() {
        let scene = draw_visited_chart(&PortfolioStats::default(), &surface());
        assert_eq!(texts(&scene), ["No data available"]);
    }

    #[test]
    fn test_visited_bars_proportional_to_counts() {
        let stats = PortfolioStats {
            visited_count: 3,
            not_visited_count: 1,
            ..PortfolioStats::default()
        };
        let scene = draw_visited_chart(&stats, &surface());

        let widths: Vec<f32> = scene
            .primitives()
            .iter()
            .filter_map(|p| match p {
                Primitive::Rect { width, .. } => Some(*width),
                _ => None,
            })
            .collect();
        assert_eq!(widths.len(), 2);
        assert!((widths[0] - 3.0 * widths[1]).abs() < 1e-4);

        let labels = texts(&scene);
        assert!(labels.contains(&"Visited: 3"));
        assert!(labels.contains(&"Not Visited: 1"));
        assert!(labels.contains(&"Total Entries: 4"));
    }

    #[test]
    fn test_redraw_is_idempotent() {
        let stats = PortfolioStats {
            total_projects: 2,
            completed_projects: 1,
            in_progress_projects: 1,
            pending_projects: 1,
            ..PortfolioStats::default()
        };
        assert_eq!(
            draw_completion_chart(&stats, &surface()),
            draw_completion_chart(&stats, &surface())
        );
    }

    #[test]
    fn test_truncate_name_budget() {
        assert_eq!(truncate_name("short", 40), "short");
        assert_eq!(truncate_name("abcdefghij", 8), "abcde...");
    }
}
