pub mod ask;
pub mod auth;
pub mod config;
pub mod documents;
pub mod planner;
pub mod practice;

use studyhall_core::{ApiError, Config, StudyClient};

/// Backend client built from the `[backend]` config section.
pub(crate) fn client(config: &Config) -> Result<StudyClient, ApiError> {
    StudyClient::new(&config.backend)
}

/// Comma- or repeat-separated `--doc` values, `None` when empty.
pub(crate) fn document_ids(ids: Vec<String>) -> Option<Vec<String>> {
    let ids: Vec<String> = ids
        .iter()
        .flat_map(|s| s.split(','))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();
    if ids.is_empty() {
        None
    } else {
        Some(ids)
    }
}
