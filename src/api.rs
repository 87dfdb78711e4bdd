use std::time::Duration;

use crate::config::CONFIG;
use crate::storage::{self, Snapshot, WatchedSpace};
use color_eyre::Result;
use log::debug;
use once_cell::sync::Lazy;
use reqwest::blocking::{Client, RequestBuilder};
use serde::Deserialize;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub static CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .timeout(REQUEST_TIMEOUT)
        .build()
        .expect("Failed to build API client")
});

fn get(url: String) -> RequestBuilder {
    let req = CLIENT.get(url);
    match &CONFIG.hf_token {
        Some(token) => req.bearer_auth(token),
        None => req,
    }
}

#[derive(Deserialize)]
struct RepoEntry {
    id: String,
}

/// Lists the org's repos of one kind (`"spaces"` or `"models"`), sorted by id.
fn fetch_repo_ids(kind: &str) -> Result<Vec<String>> {
    let entries: Vec<RepoEntry> = get(format!("{}/{kind}", CONFIG.api_base))
        .query(&[("author", CONFIG.org.as_str())])
        .send()?
        .error_for_status()?
        .json()?;

    let mut ids: Vec<String> = entries.into_iter().map(|e| e.id).collect();
    ids.sort();
    Ok(ids)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpaceDetail {
    sha: Option<String>,
    last_modified: Option<String>,
}

fn fetch_watched_space() -> Result<WatchedSpace> {
    let detail: SpaceDetail = get(format!("{}/spaces/{}", CONFIG.api_base, CONFIG.watched_space))
        .send()?
        .error_for_status()?
        .json()?;

    Ok(WatchedSpace {
        sha: detail.sha,
        last_modified: detail.last_modified,
    })
}

/// Takes a fresh snapshot of the org: both repo listings plus the watched
/// Space's detail record. Any HTTP or parse error aborts the run.
pub fn observe() -> Result<Snapshot> {
    let space_ids = fetch_repo_ids("spaces")?;
    let model_ids = fetch_repo_ids("models")?;
    let watched_space = fetch_watched_space()?;

    debug!(
        "observed {} spaces and {} models for {}",
        space_ids.len(),
        model_ids.len(),
        CONFIG.org
    );

    Ok(Snapshot {
        space_ids,
        model_ids,
        watched_space,
        checked_at: storage::utc_now(),
    })
}
