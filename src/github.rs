use crate::error::ApiError;
use crate::models::{EntryKind, FetchedFile, RepoEntry, RepoMetadata, RepoOwner};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use futures::stream::{self, StreamExt};
use log::{debug, warn};
use serde::Deserialize;
use std::time::Duration;

const GITHUB_API_URL: &str = "https://api.github.com/repos";
const USER_AGENT: &str = "git2doc";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// How many content lookups may be in flight at once. Keeps the fan-out
/// polite against the unauthenticated GitHub rate limit.
const FETCH_CONCURRENCY: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

/// Extracts owner and repo from a public GitHub URL.
/// `https://github.com/rust-lang/cargo` -> `rust-lang` / `cargo`.
/// Tolerates a `.git` suffix, trailing slashes and extra path segments.
pub fn parse_github_url(url: &str) -> Option<RepoRef> {
    let rest = url.split("github.com/").nth(1)?;
    let mut parts = rest.split('/').filter(|part| !part.is_empty());
    let owner = parts.next()?.to_string();
    let repo = parts.next()?.trim_end_matches(".git").to_string();
    if repo.is_empty() {
        return None;
    }
    Some(RepoRef { owner, repo })
}

// ── GitHub API response shapes ──

#[derive(Debug, Deserialize)]
struct GhRepo {
    name: String,
    full_name: String,
    description: Option<String>,
    forks: u64,
    default_branch: String,
    updated_at: String,
    license: Option<GhLicense>,
    owner: GhOwner,
}

#[derive(Debug, Deserialize)]
struct GhLicense {
    name: String,
}

#[derive(Debug, Deserialize)]
struct GhOwner {
    login: String,
    avatar_url: String,
    html_url: String,
}

#[derive(Debug, Deserialize)]
struct GhTree {
    tree: Vec<GhTreeItem>,
}

#[derive(Debug, Deserialize)]
struct GhTreeItem {
    path: String,
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Deserialize)]
struct GhContentFile {
    content: Option<String>,
    encoding: Option<String>,
}

pub struct GithubClient {
    http: reqwest::Client,
}

impl GithubClient {
    pub fn new() -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(GithubClient { http })
    }

    /// Fetches repository metadata, including the default branch every other
    /// lookup is pinned to.
    pub async fn repo_metadata(&self, repo: &RepoRef) -> Result<RepoMetadata, ApiError> {
        let url = format!("{}/{}/{}", GITHUB_API_URL, repo.owner, repo.repo);
        debug!("Fetching repository metadata: {}", url);

        let response = self.http.get(&url).send().await.map_err(|e| {
            ApiError::UpstreamListing(format!("metadata request failed: {}", e))
        })?;
        if !response.status().is_success() {
            return Err(ApiError::UpstreamListing(format!(
                "metadata request returned {}",
                response.status()
            )));
        }
        let gh: GhRepo = response.json().await.map_err(|e| {
            ApiError::UpstreamListing(format!("malformed metadata response: {}", e))
        })?;

        Ok(RepoMetadata {
            name: gh.name,
            full_name: gh.full_name,
            description: gh.description,
            forks: gh.forks,
            default_branch: gh.default_branch,
            updated_at: gh.updated_at,
            license: gh
                .license
                .map(|l| l.name)
                .unwrap_or_else(|| "No license".to_string()),
            owner: RepoOwner {
                username: gh.owner.login,
                avatar: gh.owner.avatar_url,
                url: gh.owner.html_url,
            },
        })
    }

    /// Fetches the full recursive file listing at `branch` as flat entries.
    /// Git object types other than blob and tree (submodule commits) are
    /// dropped.
    pub async fn repo_tree(
        &self,
        repo: &RepoRef,
        branch: &str,
    ) -> Result<Vec<RepoEntry>, ApiError> {
        let url = format!(
            "{}/{}/{}/git/trees/{}?recursive=1",
            GITHUB_API_URL, repo.owner, repo.repo, branch
        );
        debug!("Fetching repository tree: {}", url);

        let response = self.http.get(&url).send().await.map_err(|e| {
            ApiError::UpstreamListing(format!("tree listing request failed: {}", e))
        })?;
        if !response.status().is_success() {
            return Err(ApiError::UpstreamListing(format!(
                "tree listing returned {}",
                response.status()
            )));
        }
        let gh: GhTree = response.json().await.map_err(|e| {
            ApiError::UpstreamListing(format!("malformed tree response: {}", e))
        })?;

        Ok(flatten_tree_items(gh.tree))
    }

    /// Fetches content for each candidate path concurrently. Fetches are
    /// independent: a failed or undecodable path is dropped with a warning
    /// and never aborts its siblings. The result carries no order guarantee.
    pub async fn fetch_file_contents(
        &self,
        repo: &RepoRef,
        branch: &str,
        candidates: &[RepoEntry],
    ) -> Vec<FetchedFile> {
        let fetched: Vec<FetchedFile> = stream::iter(candidates)
            .map(|entry| self.fetch_one(repo, branch, &entry.path))
            .buffer_unordered(FETCH_CONCURRENCY)
            .filter_map(|result| async move { result })
            .collect()
            .await;

        debug!(
            "Fetched {} of {} candidate files",
            fetched.len(),
            candidates.len()
        );
        fetched
    }

    async fn fetch_one(&self, repo: &RepoRef, branch: &str, path: &str) -> Option<FetchedFile> {
        let url = format!(
            "{}/{}/{}/contents/{}?ref={}",
            GITHUB_API_URL, repo.owner, repo.repo, path, branch
        );
        let response = match self.http.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Failed to fetch '{}': {}", path, e);
                return None;
            }
        };
        if !response.status().is_success() {
            warn!("Failed to fetch '{}': {}", path, response.status());
            return None;
        }
        let file: GhContentFile = match response.json().await {
            Ok(file) => file,
            Err(e) => {
                warn!("Malformed content response for '{}': {}", path, e);
                return None;
            }
        };

        match decode_content(&file) {
            Some(content) => Some(FetchedFile {
                path: path.to_string(),
                content,
            }),
            None => {
                warn!("Could not decode content of '{}'", path);
                None
            }
        }
    }
}

fn flatten_tree_items(items: Vec<GhTreeItem>) -> Vec<RepoEntry> {
    items
        .into_iter()
        .filter_map(|item| {
            let kind = match item.kind.as_str() {
                "blob" => EntryKind::File,
                "tree" => EntryKind::Directory,
                _ => return None,
            };
            Some(RepoEntry {
                path: item.path,
                kind,
            })
        })
        .collect()
}

/// Decodes a contents-API payload to text. The API returns base64 with
/// embedded newlines; anything that is not base64-encoded UTF-8 text is
/// treated the same as a fetch failure.
fn decode_content(file: &GhContentFile) -> Option<String> {
    let raw = file.content.as_deref()?;
    match file.encoding.as_deref() {
        Some("base64") => {
            let compact: String = raw.split_whitespace().collect();
            let bytes = BASE64.decode(compact).ok()?;
            String::from_utf8(bytes).ok()
        }
        // "none" is returned for blobs above the size limit.
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parsed(url: &str) -> Option<(String, String)> {
        parse_github_url(url).map(|r| (r.owner, r.repo))
    }

    #[test]
    fn parses_a_plain_repository_url() {
        assert_eq!(
            parsed("https://github.com/rust-lang/cargo"),
            Some(("rust-lang".to_string(), "cargo".to_string()))
        );
    }

    #[test]
    fn tolerates_git_suffix_trailing_slash_and_extra_segments() {
        assert_eq!(
            parsed("https://github.com/rust-lang/cargo.git"),
            Some(("rust-lang".to_string(), "cargo".to_string()))
        );
        assert_eq!(
            parsed("https://github.com/rust-lang/cargo/"),
            Some(("rust-lang".to_string(), "cargo".to_string()))
        );
        assert_eq!(
            parsed("https://github.com/rust-lang/cargo/tree/master/src"),
            Some(("rust-lang".to_string(), "cargo".to_string()))
        );
    }

    #[test]
    fn rejects_urls_without_an_owner_and_repo() {
        assert_eq!(parse_github_url("https://github.com/"), None);
        assert_eq!(parse_github_url("https://github.com/just-owner"), None);
        assert_eq!(parse_github_url("https://example.com/a/b"), None);
        assert_eq!(parse_github_url("not a url"), None);
    }

    #[test]
    fn tree_items_map_blob_and_tree_and_drop_the_rest() {
        let gh: GhTree = serde_json::from_value(serde_json::json!({
            "tree": [
                { "path": "src", "type": "tree" },
                { "path": "src/main.rs", "type": "blob" },
                { "path": "deps/sub", "type": "commit" },
            ]
        }))
        .unwrap();

        assert_eq!(
            flatten_tree_items(gh.tree),
            vec![
                RepoEntry { path: "src".to_string(), kind: EntryKind::Directory },
                RepoEntry { path: "src/main.rs".to_string(), kind: EntryKind::File },
            ]
        );
    }

    #[test]
    fn decodes_base64_content_with_embedded_newlines() {
        let file = GhContentFile {
            // "hello world" split across lines, as the API serves it
            content: Some("aGVsbG8g\nd29ybGQ=\n".to_string()),
            encoding: Some("base64".to_string()),
        };
        assert_eq!(decode_content(&file), Some("hello world".to_string()));
    }

    #[test]
    fn undecodable_content_degrades_to_absent() {
        let invalid = GhContentFile {
            content: Some("%%%not-base64%%%".to_string()),
            encoding: Some("base64".to_string()),
        };
        assert_eq!(decode_content(&invalid), None);

        let non_utf8 = GhContentFile {
            content: Some(BASE64.encode([0xff, 0xfe, 0x00, 0x01])),
            encoding: Some("base64".to_string()),
        };
        assert_eq!(decode_content(&non_utf8), None);

        let oversized = GhContentFile {
            content: None,
            encoding: Some("none".to_string()),
        };
        assert_eq!(decode_content(&oversized), None);
    }
}
