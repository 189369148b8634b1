use crate::models::{ContentEntry, FetchedFile, RepoEntry};
use std::collections::HashMap;

/// Folds fetched content back into the flat listing: a left-biased join on
/// `path`. Output preserves the order and cardinality of `entries`; fetched
/// files referencing unknown paths are ignored.
pub fn merge_contents(entries: &[RepoEntry], fetched: Vec<FetchedFile>) -> Vec<ContentEntry> {
    let mut by_path: HashMap<String, String> = fetched
        .into_iter()
        .map(|file| (file.path, file.content))
        .collect();

    entries
        .iter()
        .map(|entry| ContentEntry {
            path: entry.path.clone(),
            kind: entry.kind,
            content: by_path.remove(&entry.path),
        })
        .collect()
}
