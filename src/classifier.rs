use crate::config::ClassifierRules;
use crate::models::{EntryKind, RepoEntry};
use log::debug;

/// Heuristically selects the files worth fetching full content for, capped
/// at `rules.max_important_files`.
///
/// Each candidate runs through short-circuiting stages: the three exclusion
/// predicates first, then a file is kept iff it is a manifest-style filename
/// (relevant anywhere) or a conventional entry point sitting at an allowed
/// location. Survivors keep their input order; the classifier only truncates.
pub fn select_important_files(entries: &[RepoEntry], rules: &ClassifierRules) -> Vec<RepoEntry> {
    let mut kept = Vec::new();
    for entry in entries {
        if entry.kind != EntryKind::File {
            continue;
        }
        if !is_important(&entry.path, rules) {
            continue;
        }
        kept.push(entry.clone());
        if kept.len() == rules.max_important_files {
            break;
        }
    }
    debug!(
        "Classified {} of {} entries as important",
        kept.len(),
        entries.len()
    );
    kept
}

fn is_important(path: &str, rules: &ClassifierRules) -> bool {
    if in_ignored_dir(path, rules)
        || has_ignored_filename(path, rules)
        || has_ignored_extension(path, rules)
    {
        return false;
    }
    is_manifest(path, rules) || is_entrypoint_at_allowed_location(path, rules)
}

fn filename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn in_ignored_dir(path: &str, rules: &ClassifierRules) -> bool {
    rules.ignored_dirs.iter().any(|dir| path.starts_with(dir))
}

fn has_ignored_filename(path: &str, rules: &ClassifierRules) -> bool {
    let name = filename(path);
    rules.ignored_filenames.iter().any(|ignored| ignored == name)
}

fn has_ignored_extension(path: &str, rules: &ClassifierRules) -> bool {
    let name = filename(path);
    rules.ignored_extensions.iter().any(|ext| name.ends_with(ext))
}

fn is_manifest(path: &str, rules: &ClassifierRules) -> bool {
    let name = filename(path);
    rules.manifest_filenames.iter().any(|manifest| manifest == name)
}

fn is_entrypoint_at_allowed_location(path: &str, rules: &ClassifierRules) -> bool {
    let name = filename(path);
    if !rules.entrypoint_filenames.iter().any(|entry| entry == name) {
        return false;
    }
    let at_root = !path.contains('/');
    at_root
        || rules
            .entrypoint_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn file(path: &str) -> RepoEntry {
        RepoEntry {
            path: path.to_string(),
            kind: EntryKind::File,
        }
    }

    fn dir(path: &str) -> RepoEntry {
        RepoEntry {
            path: path.to_string(),
            kind: EntryKind::Directory,
        }
    }

    fn paths(selected: &[RepoEntry]) -> Vec<&str> {
        selected.iter().map(|e| e.path.as_str()).collect()
    }

    #[test]
    fn keeps_entry_points_and_manifests_in_input_order() {
        let entries = vec![
            file("src/index.js"),
            file("src/utils/a.js"),
            file("package.json"),
            file("README.md"),
        ];
        let selected = select_important_files(&entries, &ClassifierRules::default());
        assert_eq!(paths(&selected), vec!["src/index.js", "package.json"]);
    }

    #[test]
    fn never_returns_more_than_the_cap() {
        let entries: Vec<RepoEntry> = (0..30)
            .map(|i| file(&format!("pkg{}/Dockerfile", i)))
            .collect();
        let rules = ClassifierRules::default();
        let selected = select_important_files(&entries, &rules);
        assert_eq!(selected.len(), rules.max_important_files);
        // First K survivors, untouched order.
        assert_eq!(selected[0].path, "pkg0/Dockerfile");
    }

    #[test]
    fn ignored_directories_exclude_even_manifests() {
        let entries = vec![
            file("node_modules/lodash/package.json"),
            file("dist/main.js"),
            file("target/Cargo.toml"),
        ];
        assert!(select_important_files(&entries, &ClassifierRules::default()).is_empty());
    }

    #[test]
    fn ignored_filenames_and_extensions_are_excluded() {
        let entries = vec![
            file("package-lock.json"),
            file("LICENSE"),
            file(".env"),
            file("logo.png"),
            file("bundle.min.js"),
        ];
        assert!(select_important_files(&entries, &ClassifierRules::default()).is_empty());
    }

    #[test]
    fn entry_point_name_outside_allowed_locations_is_excluded() {
        let entries = vec![file("docs/examples/index.js"), file("test/main.py")];
        assert!(select_important_files(&entries, &ClassifierRules::default()).is_empty());
    }

    #[test]
    fn root_level_entry_point_is_allowed() {
        let entries = vec![file("server.js")];
        let selected = select_important_files(&entries, &ClassifierRules::default());
        assert_eq!(paths(&selected), vec!["server.js"]);
    }

    #[test]
    fn manifests_are_kept_regardless_of_depth() {
        let entries = vec![file("services/auth/Dockerfile")];
        let selected = select_important_files(&entries, &ClassifierRules::default());
        assert_eq!(paths(&selected), vec!["services/auth/Dockerfile"]);
    }

    #[test]
    fn directory_entries_are_never_selected() {
        let entries = vec![dir("src"), file("src/index.js")];
        let selected = select_important_files(&entries, &ClassifierRules::default());
        assert_eq!(paths(&selected), vec!["src/index.js"]);
    }

    #[test]
    fn classification_is_deterministic() {
        let entries = vec![
            file("src/main.ts"),
            file("Cargo.toml"),
            file("assets/icon.svg"),
        ];
        let rules = ClassifierRules::default();
        assert_eq!(
            select_important_files(&entries, &rules),
            select_important_files(&entries, &rules)
        );
    }
}
