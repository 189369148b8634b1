use serde::{Deserialize, Serialize};

/// Git object kind as reported by the recursive trees endpoint.
/// "blob" is a file, "tree" is a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    #[serde(rename = "blob")]
    File,
    #[serde(rename = "tree")]
    Directory,
}

/// One record of the flat repository listing, posix-style path relative to
/// the repository root, no leading slash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

/// Nested hierarchy node built from the flat listing. `children` is present
/// exactly when the node is a directory, ordered directories-first then
/// lexicographically by full path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeNode>>,
}

/// Successfully fetched and decoded file content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedFile {
    pub path: String,
    pub content: String,
}

/// A listing entry with content attached where a fetch succeeded. This is
/// what prompt construction consumes: the full tree, content inline only
/// where available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RepoOwner {
    pub username: String,
    pub avatar: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RepoMetadata {
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub forks: u64,
    pub default_branch: String,
    pub updated_at: String,
    pub license: String,
    pub owner: RepoOwner,
}

#[derive(Debug, Deserialize)]
pub struct RepoUrlRequest {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct CustomReadmeRequest {
    pub url: String,
    #[serde(rename = "selectedFiles")]
    pub selected_files: Vec<String>,
}
