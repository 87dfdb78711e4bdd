use std::path::Path;

use color_eyre::Result;
use log::{info, warn};

use crate::storage::Snapshot;

mod api;
mod config;
mod diff;
mod notify;
mod storage;

#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    FirstRun,
    NoChanges,
    Alerted { changes: usize, sent: bool },
}

/// Everything after the fetch: compare against the persisted snapshot, alert
/// on changes, and replace the snapshot on disk.
fn run(new_snapshot: Snapshot, state_file: &Path) -> Result<Outcome> {
    let Some(old_snapshot) = storage::load_snapshot(state_file)? else {
        storage::save_snapshot(state_file, &new_snapshot)?;
        return Ok(Outcome::FirstRun);
    };

    let changes = diff::detect_changes(&old_snapshot, &new_snapshot);
    let outcome = if changes.is_empty() {
        Outcome::NoChanges
    } else {
        let message = notify::format_alert(&changes);
        let sent = match notify::send_alert(&message) {
            Ok(sent) => sent,
            Err(e) => {
                warn!("Telegram delivery failed: {e}");
                false
            }
        };
        Outcome::Alerted {
            changes: changes.len(),
            sent,
        }
    };

    storage::save_snapshot(state_file, &new_snapshot)?;
    Ok(outcome)
}

fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // A fetch failure propagates out of main before the snapshot is touched,
    // so the next run still compares against the last good state.
    let new_snapshot = api::observe()?;

    match run(new_snapshot, &config::CONFIG.state_file)? {
        Outcome::FirstRun => info!("First run: capturing initial state, no alerts sent."),
        Outcome::NoChanges => info!("No changes detected."),
        Outcome::Alerted { changes, sent } => {
            info!("Detected {changes} change(s). Telegram sent: {sent}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{load_snapshot, WatchedSpace};

    fn snapshot(space_ids: &[&str], checked_at: &str) -> Snapshot {
        Snapshot {
            space_ids: space_ids.iter().map(|s| s.to_string()).collect(),
            model_ids: Vec::new(),
            watched_space: WatchedSpace::default(),
            checked_at: checked_at.into(),
        }
    }

    #[test]
    fn first_run_persists_snapshot_without_alerting() {
        let dir = tempfile::tempdir().unwrap();
        let state_file = dir.path().join("state.json");
        let snap = snapshot(&["org/a"], "2026-08-27T12:00:00Z");

        let outcome = run(snap.clone(), &state_file).unwrap();

        assert_eq!(outcome, Outcome::FirstRun);
        assert_eq!(load_snapshot(&state_file).unwrap(), Some(snap));
    }

    #[test]
    fn unchanged_run_reports_no_changes_and_refreshes_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let state_file = dir.path().join("state.json");

        run(snapshot(&["org/a"], "2026-08-27T12:00:00Z"), &state_file).unwrap();
        let second = snapshot(&["org/a"], "2026-08-27T13:00:00Z");
        let outcome = run(second.clone(), &state_file).unwrap();

        assert_eq!(outcome, Outcome::NoChanges);
        assert_eq!(load_snapshot(&state_file).unwrap(), Some(second));
    }
}
