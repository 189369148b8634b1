use crate::error::ApiError;
use crate::models::{EntryKind, RepoEntry};
use log::debug;
use std::collections::{HashMap, HashSet};

/// Validates a user-supplied selection against the known listing and bounds
/// the result.
///
/// Requested paths that do not name a file in `entries` are silently dropped
/// (stale client state referencing a different tree snapshot is expected, not
/// an error). Survivors keep the order `requested` was given, duplicates
/// collapse to their first occurrence, and the result is truncated to `max`.
/// An empty intersection is the `EmptySelection` condition; an empty
/// `requested` is a caller-side precondition checked before this point.
pub fn reconcile_selection(
    entries: &[RepoEntry],
    requested: &[String],
    max: usize,
) -> Result<Vec<RepoEntry>, ApiError> {
    let known: HashMap<&str, &RepoEntry> = entries
        .iter()
        .filter(|entry| entry.kind == EntryKind::File)
        .map(|entry| (entry.path.as_str(), entry))
        .collect();

    let mut seen: HashSet<&str> = HashSet::new();
    let mut kept: Vec<RepoEntry> = Vec::new();
    for path in requested {
        let Some(entry) = known.get(path.as_str()) else {
            debug!("Dropping unknown selected path: {}", path);
            continue;
        };
        if !seen.insert(path.as_str()) {
            continue;
        }
        kept.push((*entry).clone());
        if kept.len() == max {
            break;
        }
    }

    if kept.is_empty() {
        return Err(ApiError::EmptySelection);
    }
    Ok(kept)
}
