//! # SiteTrack CLI Demo
//!
//! Terminal walkthrough of the tracking engine: builds a small dealer
//! hierarchy, works a project's ground floor to completion, and prints the
//! dashboard reports plus a summary of the chart scenes a GUI host would
//! rasterize.

use std::io::{self, BufRead, Write};

use track_charts::charts::{draw_completion_chart, draw_pending_chart, draw_visited_chart};
use track_charts::scene::{Primitive, Scene};
use track_charts::surface::Surface;
use track_core::model::{Category, Entry};
use track_core::project::ProjectKind;
use track_core::remote::{RemoteStore, DEFAULT_BACKEND_URL};
use track_core::report::{pending_projects, portfolio_stats};
use track_core::session::{Session, SyncState};

fn prompt(label: &str, default: &str) -> String {
    print!("{}", label);
    if io::stdout().flush().is_err() {
        return default.to_string();
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default.to_string();
    }

    let trimmed = input.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    println!("SiteTrack CLI - Construction Work Tracker");
    println!("=========================================");
    println!();

    let dealer = prompt("Dealer name [Acme Materials]: ", "Acme Materials");
    let engineer = prompt("Engineer name [Bob]: ", "Bob");
    let project = prompt("Project name [Tower A]: ", "Tower A");

    let remote = match RemoteStore::new(DEFAULT_BACKEND_URL) {
        Ok(remote) => remote,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let mut session = Session::new(remote);

    if let Err(e) = build_demo(&mut session, &dealer, &engineer, &project) {
        eprintln!("Error: {}", e);
        if let Ok(json) = serde_json::to_string_pretty(&e) {
            eprintln!();
            eprintln!("Error JSON:");
            eprintln!("{}", json);
        }
        std::process::exit(1);
    }

    print_report(&session, &dealer);
}

fn build_demo(
    session: &mut Session,
    dealer: &str,
    engineer: &str,
    project: &str,
) -> track_core::TrackResult<()> {
    session.mutate(|s| s.add_dealer(dealer))?;
    session.mutate(|s| s.add_entry(dealer, Category::Engineer, Entry::new(engineer)?))?;
    session.mutate(|s| s.add_visit_date(dealer, Category::Engineer, 0, "2026-08-27"))?;
    session.mutate(|s| s.add_project(dealer, 0, project, ProjectKind::Concrete))?;
    session.mutate(|s| s.project_mut(dealer, 0, 0)?.add_ground_floor())?;
    session.mutate(|s| s.project_mut(dealer, 0, 0)?.add_floor(None))?;

    // Finish the ground floor checklist
    let task_count = session
        .store()
        .project(dealer, 0, 0)?
        .floors[0]
        .tasks
        .len();
    for task in 0..task_count {
        session.mutate(|s| s.project_mut(dealer, 0, 0)?.toggle_task(0, task))?;
    }
    Ok(())
}

fn print_report(session: &Session, dealer: &str) {
    let store = session.store();
    let stats = portfolio_stats(store);
    let ranking = pending_projects(store);

    println!();
    println!("=========================================");
    println!("  PORTFOLIO REPORT");
    println!("=========================================");
    println!();
    println!("Dealers:        {}", stats.total_dealers);
    println!("Engineers:      {}", stats.total_engineers);
    println!(
        "Visited:        {} ({} not visited)",
        stats.visited_count, stats.not_visited_count
    );
    println!("Projects:       {}", stats.total_projects);
    println!("  Completed:    {}", stats.completed_projects);
    println!("  In progress:  {}", stats.in_progress_projects);
    println!("  Pending:      {}", stats.pending_projects);
    println!();

    println!("Most pending projects:");
    if ranking.is_empty() {
        println!("  (none)");
    } else {
        for entry in &ranking {
            println!(
                "  {} ({} / {}): {}/{} tasks pending, {}% done",
                entry.name,
                entry.dealer,
                entry.engineer,
                entry.pending_tasks,
                entry.total_tasks,
                entry.progress
            );
        }
    }
    println!();

    if let Ok(project) = store.project(dealer, 0, 0) {
        println!("History for \"{}\":", project.name);
        for record in project.history.iter().rev().take(5) {
            println!("  [{}] {}", record.timestamp, record.action);
        }
        println!();
    }

    let surface = Surface::from_container(420.0, 1.0);
    println!(
        "Chart surfaces: {}x{} logical, {}x{} physical",
        surface.logical_width(),
        surface.logical_height(),
        surface.physical_width(),
        surface.physical_height()
    );
    describe_scene("completion pie", &draw_completion_chart(&stats, &surface));
    describe_scene("pending bars", &draw_pending_chart(&ranking, &surface));
    describe_scene("visited bars", &draw_visited_chart(&stats, &surface));

    println!();
    println!(
        "Sync state: {}",
        match session.sync_state() {
            SyncState::Synced => "synced",
            SyncState::Dirty => "dirty (offline or push failed)",
        }
    );
}

fn describe_scene(label: &str, scene: &Scene) {
    let mut rects = 0;
    let mut slices = 0;
    let mut texts = 0;
    for primitive in scene.primitives() {
        match primitive {
            Primitive::Rect { .. } => rects += 1,
            Primitive::PieSlice { .. } => slices += 1,
            Primitive::Text { .. } => texts += 1,
        }
    }
    println!(
        "  {}: {} rects, {} slices, {} labels",
        label, rects, slices, texts
    );
}
