use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use color_eyre::Result;
use log::debug;
use serde::{Deserialize, Serialize};

/// Point-in-time record of the org's published repos. Wholly replaced on disk
/// each run; there is no history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub space_ids: Vec<String>,
    pub model_ids: Vec<String>,
    #[serde(default)]
    pub watched_space: WatchedSpace,
    pub checked_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchedSpace {
    pub sha: Option<String>,
    #[serde(rename = "lastModified")]
    pub last_modified: Option<String>,
}

pub fn load_snapshot(path: &Path) -> Result<Option<Snapshot>> {
    match fs::read_to_string(path) {
        Ok(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn save_snapshot(path: &Path, snapshot: &Snapshot) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut json = serde_json::to_string_pretty(snapshot)?;
    json.push('\n');
    fs::write(path, json)?;
    debug!("snapshot written to {}", path.display());
    Ok(())
}

pub fn utc_now() -> String {
    let ts = time_format::now().unwrap();
    time_format::strftime_utc("%Y-%m-%dT%H:%M:%SZ", ts).unwrap()
}
