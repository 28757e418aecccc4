//! # Session Controller
//!
//! Owns the application state: the in-memory [`Store`], the logged-in
//! user, and the replication status against the remote store. There are no
//! ambient globals; every consumer receives the store by reference from
//! here.
//!
//! Persistence is a write-behind cache with an explicit dirty/synced
//! status: each successful mutation marks the session dirty and attempts a
//! best-effort push. A failed push is logged and swallowed - the in-memory
//! store stays the source of truth and the session stays dirty until a
//! later flush succeeds. At-most-once, best-effort replication.

use tracing::warn;

use crate::errors::{TrackError, TrackResult};
use crate::file_io;
use crate::model::Store;
use crate::remote::RemoteStore;

/// Replication status of the in-memory store against the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// Every mutation has been acknowledged by the backend
    Synced,
    /// At least one mutation has not reached the backend yet
    Dirty,
}

/// Application state owned by a single controller.
pub struct Session {
    store: Store,
    remote: RemoteStore,
    username: Option<String>,
    sync: SyncState,
}

impl Session {
    pub fn new(remote: RemoteStore) -> Self {
        Session {
            store: Store::default(),
            remote,
            username: None,
            sync: SyncState::Synced,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn current_user(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn sync_state(&self) -> SyncState {
        self.sync
    }

    /// Log in and load the user's snapshot from the backend.
    pub fn login(&mut self, username: &str, password: &str) -> TrackResult<()> {
        self.remote.login(username, password)?;
        self.username = Some(username.trim().to_string());
        self.refresh()
    }

    /// Register a new account and start from the (empty) remote snapshot.
    pub fn register(&mut self, username: &str, password: &str, confirm: &str) -> TrackResult<()> {
        self.remote.register(username, password, confirm)?;
        self.username = Some(username.trim().to_string());
        self.refresh()
    }

    /// Discard the token and all cached data, returning to the login screen.
    pub fn logout(&mut self) {
        self.remote.clear_token();
        self.username = None;
        self.store = Store::default();
        self.sync = SyncState::Synced;
    }

    /// Replace the in-memory store with the backend's current snapshot.
    pub fn refresh(&mut self) -> TrackResult<()> {
        match self.remote.fetch_snapshot() {
            Ok(snapshot) => {
                self.store = snapshot;
                self.sync = SyncState::Synced;
                Ok(())
            }
            Err(e) => Err(self.handle_auth_error(e)),
        }
    }

    /// Run a mutation against the store, then schedule best-effort
    /// replication.
    ///
    /// On success the session is marked dirty and a push is attempted
    /// immediately; a push failure is swallowed (logged at warn) so the
    /// caller always returns to an interactive state. On error nothing was
    /// mutated and the sync state is untouched.
    pub fn mutate<T>(
        &mut self,
        op: impl FnOnce(&mut Store) -> TrackResult<T>,
    ) -> TrackResult<T> {
        let result = op(&mut self.store)?;
        self.sync = SyncState::Dirty;
        self.flush_best_effort();
        Ok(result)
    }

    /// Push the snapshot if logged in, swallowing failures.
    fn flush_best_effort(&mut self) {
        if !self.remote.is_authenticated() {
            return;
        }
        if let Err(e) = self.remote.push_snapshot(&self.store) {
            warn!(error = %e, "snapshot push failed; will retry on next flush");
        } else {
            self.sync = SyncState::Synced;
        }
    }

    /// Explicitly push the snapshot, reporting the outcome.
    pub fn flush(&mut self) -> TrackResult<()> {
        match self.remote.push_snapshot(&self.store) {
            Ok(()) => {
                self.sync = SyncState::Synced;
                Ok(())
            }
            Err(e) => Err(self.handle_auth_error(e)),
        }
    }

    /// Export the full hierarchy to a backup file named for the user.
    pub fn export_backup(&self, path: &std::path::Path) -> TrackResult<()> {
        let username = self.username.as_deref().ok_or(TrackError::AuthFailed {
            reason: "Please login first".to_string(),
        })?;
        file_io::export_backup(&self.store, username, path)
    }

    /// Import a backup file: validate it, send it to the restore endpoint,
    /// and adopt the merged snapshot the backend returns.
    pub fn import_backup(&mut self, path: &std::path::Path) -> TrackResult<()> {
        if self.username.is_none() {
            return Err(TrackError::AuthFailed {
                reason: "Please login first".to_string(),
            });
        }
        let backup = file_io::load_backup(path)?;
        match self.remote.restore(&backup) {
            Ok(merged) => {
                self.store = merged;
                self.sync = SyncState::Synced;
                Ok(())
            }
            Err(e) => Err(self.handle_auth_error(e)),
        }
    }

    /// Auth failures invalidate the session: the token and username are
    /// discarded so the caller lands back on the login screen.
    fn handle_auth_error(&mut self, error: TrackError) -> TrackError {
        if error.invalidates_session() {
            self.remote.clear_token();
            self.username = None;
        }
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::{is_floor_fully_completed, project_completion_percent};
    use crate::model::{Category, Entry};
    use crate::project::ProjectKind;
    use crate::remote::DEFAULT_BACKEND_URL;
    use crate::report::portfolio_stats;

    fn offline_session() -> Session {
        Session::new(RemoteStore::new(DEFAULT_BACKEND_URL).unwrap())
    }

    /// Build the canonical scenario: dealer "Acme", engineer "Bob",
    /// Concrete project "Tower" with a templated ground floor.
    fn tower_session() -> Session {
        let mut session = offline_session();
        session.mutate(|s| s.add_dealer("Acme")).unwrap();
        session
            .mutate(|s| s.add_entry("Acme", Category::Engineer, Entry::new("Bob")?))
            .unwrap();
        session
            .mutate(|s| s.add_project("Acme", 0, "Tower", ProjectKind::Concrete))
            .unwrap();
        session
            .mutate(|s| s.project_mut("Acme", 0, 0)?.add_ground_floor())
            .unwrap();
        session
    }

    #[test]
    fn test_completing_all_template_tasks_completes_project() {
        let mut session = tower_session();
        assert_eq!(
            session.store().project("Acme", 0, 0).unwrap().floors[0].tasks.len(),
            7
        );

        for i in 0..7 {
            session
                .mutate(|s| s.project_mut("Acme", 0, 0)?.toggle_task(0, i))
                .unwrap();
        }

        let project = session.store().project("Acme", 0, 0).unwrap();
        assert!(is_floor_fully_completed(&project.floors[0]));
        assert_eq!(project_completion_percent(project), 100);

        let stats = portfolio_stats(session.store());
        assert_eq!(stats.completed_projects, 1);
        assert_eq!(stats.pending_projects, 0);
    }

    #[test]
    fn test_partial_completion_counts_as_pending_and_in_progress() {
        let mut session = tower_session();
        for i in 0..3 {
            session
                .mutate(|s| s.project_mut("Acme", 0, 0)?.toggle_task(0, i))
                .unwrap();
        }

        let project = session.store().project("Acme", 0, 0).unwrap();
        // round(100 * 3/7) = 43
        assert_eq!(project_completion_percent(project), 43);

        let stats = portfolio_stats(session.store());
        assert_eq!(stats.pending_projects, 1);
        assert_eq!(stats.in_progress_projects, 1);
        assert_eq!(stats.completed_projects, 0);
    }

    #[test]
    fn test_mutations_mark_session_dirty_while_offline() {
        let mut session = offline_session();
        assert_eq!(session.sync_state(), SyncState::Synced);
        session.mutate(|s| s.add_dealer("Acme")).unwrap();
        // Not logged in, so nothing was pushed and the session stays dirty
        assert_eq!(session.sync_state(), SyncState::Dirty);
    }

    #[test]
    fn test_failed_mutation_leaves_sync_state_untouched() {
        let mut session = offline_session();
        assert!(session.mutate(|s| s.add_dealer("  ")).is_err());
        assert_eq!(session.sync_state(), SyncState::Synced);
    }

    #[test]
    fn test_export_requires_login() {
        let session = offline_session();
        let error = session
            .export_backup(std::path::Path::new("/tmp/never_written.json"))
            .unwrap_err();
        assert!(error.invalidates_session());
    }

    #[test]
    fn test_logout_clears_everything() {
        let mut session = tower_session();
        session.logout();
        assert!(session.store().dealers.is_empty());
        assert!(session.current_user().is_none());
        assert_eq!(session.sync_state(), SyncState::Synced);
    }
}
