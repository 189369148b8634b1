use crate::models::{EntryKind, RepoEntry, TreeNode};
use log::debug;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Derived selection state of a folder against an external selection set.
/// Recomputed per query, never stored on the node: the selection changes
/// independently of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    All,
    Partial,
    None,
}

struct ArenaNode {
    name: String,
    path: String,
    kind: EntryKind,
    children: Vec<usize>,
}

/// Converts the flat repository listing into a nested forest.
///
/// Intermediate directories implied by file paths are synthesized, duplicate
/// paths collapse to one node, and a path that is both a file entry and a
/// prefix of another path becomes a directory. Sibling order is directories
/// first, then lexicographic by full path, regardless of input order.
pub fn build_file_tree(entries: &[RepoEntry]) -> Vec<TreeNode> {
    debug!("Building file tree from {} entries", entries.len());

    // Pass 1: normalize into a path -> kind map, synthesizing parents.
    let mut kinds: HashMap<String, EntryKind> = HashMap::new();
    for entry in entries {
        let segments: Vec<&str> = entry.path.split('/').filter(|s| !s.is_empty()).collect();
        if segments.is_empty() {
            continue;
        }
        let mut prefix = String::new();
        for (i, segment) in segments.iter().enumerate() {
            if !prefix.is_empty() {
                prefix.push('/');
            }
            prefix.push_str(segment);
            let terminal = i == segments.len() - 1;
            if terminal && entry.kind == EntryKind::File {
                // A directory recorded under the same path wins.
                kinds.entry(prefix.clone()).or_insert(EntryKind::File);
            } else {
                kinds.insert(prefix.clone(), EntryKind::Directory);
            }
        }
    }

    // Pass 2: fix the global order. Every parent sorts before its children,
    // and each sibling list comes out directories-first then lexicographic.
    let mut records: Vec<(String, EntryKind)> = kinds.into_iter().collect();
    records.sort_by(|a, b| tree_order(a.1, &a.0, b.1, &b.0));

    // Pass 3: attach children by parent-path lookup in the arena.
    let mut arena: Vec<ArenaNode> = Vec::with_capacity(records.len());
    let mut index: HashMap<String, usize> = HashMap::with_capacity(records.len());
    let mut roots: Vec<usize> = Vec::new();

    for (path, kind) in records {
        let name = path.rsplit('/').next().unwrap_or(&path).to_string();
        let idx = arena.len();
        arena.push(ArenaNode {
            name,
            path: path.clone(),
            kind,
            children: Vec::new(),
        });
        match path.rfind('/') {
            Some(pos) => {
                let parent = &path[..pos];
                if let Some(&parent_idx) = index.get(parent) {
                    arena[parent_idx].children.push(idx);
                }
            }
            None => roots.push(idx),
        }
        index.insert(path, idx);
    }

    roots.iter().map(|&idx| materialize(&arena, idx)).collect()
}

fn tree_order(a_kind: EntryKind, a_path: &str, b_kind: EntryKind, b_path: &str) -> Ordering {
    match (a_kind, b_kind) {
        (EntryKind::Directory, EntryKind::File) => Ordering::Less,
        (EntryKind::File, EntryKind::Directory) => Ordering::Greater,
        _ => a_path.cmp(b_path),
    }
}

fn materialize(arena: &[ArenaNode], idx: usize) -> TreeNode {
    let node = &arena[idx];
    let children = match node.kind {
        EntryKind::Directory => Some(
            node.children
                .iter()
                .map(|&child| materialize(arena, child))
                .collect(),
        ),
        EntryKind::File => None,
    };
    TreeNode {
        name: node.name.clone(),
        path: node.path.clone(),
        kind: node.kind,
        children,
    }
}

/// All file-kind descendant paths of a node, in tree order. A file node
/// returns itself as a singleton.
pub fn collect_files(node: &TreeNode) -> Vec<String> {
    match node.kind {
        EntryKind::File => vec![node.path.clone()],
        EntryKind::Directory => node
            .children
            .as_deref()
            .unwrap_or_default()
            .iter()
            .flat_map(collect_files)
            .collect(),
    }
}

/// Folder-level "select all" state, derived from (node, selection set).
pub fn folder_selection_state(node: &TreeNode, selected: &HashSet<String>) -> SelectionState {
    let files = collect_files(node);
    if files.is_empty() {
        return SelectionState::None;
    }
    let hits = files.iter().filter(|path| selected.contains(*path)).count();
    if hits == files.len() {
        SelectionState::All
    } else if hits > 0 {
        SelectionState::Partial
    } else {
        SelectionState::None
    }
}
