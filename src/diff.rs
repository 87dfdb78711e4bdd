use std::collections::HashSet;

use crate::storage::{Snapshot, WatchedSpace};
use strum_macros::Display;

#[derive(Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    #[strum(to_string = "HIGH")]
    High,
    #[strum(to_string = "MEDIUM")]
    Medium,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub priority: Priority,
    pub message: String,
}

fn revision(space: &WatchedSpace) -> Option<&str> {
    space.sha.as_deref().filter(|sha| !sha.is_empty())
}

fn short_sha(sha: &str) -> &str {
    sha.get(..12).unwrap_or(sha)
}

/// New Spaces outrank everything else; a new Model or an update to the watched
/// Space is worth knowing about but not urgent. ID lists are expected sorted
/// (the fetcher sorts at ingest), so new-ID changes come out in sorted order.
pub fn detect_changes(old: &Snapshot, new: &Snapshot) -> Vec<Change> {
    let mut changes = Vec::new();

    let known: HashSet<&str> = old.space_ids.iter().map(String::as_str).collect();
    for id in new.space_ids.iter().filter(|id| !known.contains(id.as_str())) {
        changes.push(Change {
            priority: Priority::High,
            message: format!("New Space: {id}"),
        });
    }

    let known: HashSet<&str> = old.model_ids.iter().map(String::as_str).collect();
    for id in new.model_ids.iter().filter(|id| !known.contains(id.as_str())) {
        changes.push(Change {
            priority: Priority::Medium,
            message: format!("New Model: {id}"),
        });
    }

    // Only flag the watched Space when both runs actually saw a revision;
    // a missing or empty sha on either side means nothing to compare.
    if let (Some(old_sha), Some(new_sha)) =
        (revision(&old.watched_space), revision(&new.watched_space))
    {
        if old_sha != new_sha {
            changes.push(Change {
                priority: Priority::Medium,
                message: format!("Watched Space updated (sha: {})", short_sha(new_sha)),
            });
        }
    }

    changes
}
