use crate::models::{ContentEntry, EntryKind, RepoMetadata};
use serde_json::json;

/// Prompt for the automatic flow: heuristically selected file contents.
pub fn readme_prompt(metadata: &RepoMetadata, entries: &[ContentEntry]) -> String {
    build_prompt(
        metadata,
        entries,
        "Use the metadata, folder structure, and important file contents to infer \
the project's stack and functionality.",
        "Important File Contents",
    )
}

/// Prompt for the curated flow: the content-bearing files were hand-picked
/// by the user and should be weighted accordingly.
pub fn custom_readme_prompt(metadata: &RepoMetadata, entries: &[ContentEntry]) -> String {
    build_prompt(
        metadata,
        entries,
        "The file contents below were hand-picked by the user as the most \
representative parts of the project. Use them, together with the metadata and \
folder structure, to infer the project's stack and functionality.",
        "Selected File Contents",
    )
}

fn build_prompt(
    metadata: &RepoMetadata,
    entries: &[ContentEntry],
    guidance: &str,
    contents_heading: &str,
) -> String {
    let compact_metadata = json!({
        "name": metadata.name,
        "description": metadata
            .description
            .as_deref()
            .unwrap_or("No description provided."),
        "default_branch": metadata.default_branch,
    });
    let metadata_block =
        serde_json::to_string_pretty(&compact_metadata).unwrap_or_else(|_| "{}".to_string());

    let structure_block: String = entries
        .iter()
        .map(|entry| {
            let label = match entry.kind {
                EntryKind::Directory => "folder",
                EntryKind::File => "file",
            };
            format!("{}: {}\n", label, entry.path)
        })
        .collect();

    let contents_block: String = entries
        .iter()
        .filter_map(|entry| {
            entry
                .content
                .as_deref()
                .map(|content| format!("{} : {}\n", entry.path, content))
        })
        .collect();

    format!(
        "You are generating a production-quality README.md.\n\
{guidance}\n\
\n\
### Repository Metadata\n\
{metadata_block}\n\
\n\
## File Structure\n\
{structure_block}\n\
## {contents_heading}\n\
{contents_block}\n\
## Instructions:\n\
1. Identify the project type & stack from file contents and file structure.\n\
2. Infer routing, architecture, framework, and folder roles.\n\
3. If description missing — infer description from important files.\n\
4. Produce clean Markdown — without code block wrappers.\n\
\n\
## README Output Sections:\n\
- Title\n\
- Description\n\
- Tech Stack\n\
- Installation\n\
- Usage\n\
- Features\n\
- Folder Structure\n\
- License\n\
\n\
Generate the README now:\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RepoOwner;

    fn metadata() -> RepoMetadata {
        RepoMetadata {
            name: "demo".to_string(),
            full_name: "someone/demo".to_string(),
            description: None,
            forks: 3,
            default_branch: "main".to_string(),
            updated_at: "2025-11-02T10:00:00Z".to_string(),
            license: "MIT License".to_string(),
            owner: RepoOwner {
                username: "someone".to_string(),
                avatar: "https://example.com/a.png".to_string(),
                url: "https://github.com/someone".to_string(),
            },
        }
    }

    fn entry(path: &str, kind: EntryKind, content: Option<&str>) -> ContentEntry {
        ContentEntry {
            path: path.to_string(),
            kind,
            content: content.map(|c| c.to_string()),
        }
    }

    #[test]
    fn renders_structure_lines_for_every_entry() {
        let entries = vec![
            entry("src", EntryKind::Directory, None),
            entry("src/index.js", EntryKind::File, None),
        ];
        let prompt = readme_prompt(&metadata(), &entries);
        assert!(prompt.contains("folder: src\n"));
        assert!(prompt.contains("file: src/index.js\n"));
    }

    #[test]
    fn includes_content_blocks_only_for_fetched_files() {
        let entries = vec![
            entry("package.json", EntryKind::File, Some("{\"name\":\"demo\"}")),
            entry("src/index.js", EntryKind::File, None),
        ];
        let prompt = readme_prompt(&metadata(), &entries);
        assert!(prompt.contains("package.json : {\"name\":\"demo\"}"));
        assert!(!prompt.contains("src/index.js : "));
    }

    #[test]
    fn missing_description_falls_back_to_placeholder() {
        let prompt = readme_prompt(&metadata(), &[]);
        assert!(prompt.contains("No description provided."));
    }

    #[test]
    fn custom_prompt_mentions_the_user_selection() {
        let prompt = custom_readme_prompt(&metadata(), &[]);
        assert!(prompt.contains("hand-picked by the user"));
        assert!(prompt.contains("## Selected File Contents"));
    }

    #[test]
    fn both_prompts_list_the_required_output_sections() {
        for prompt in [
            readme_prompt(&metadata(), &[]),
            custom_readme_prompt(&metadata(), &[]),
        ] {
            for section in ["Tech Stack", "Installation", "Folder Structure", "License"] {
                assert!(prompt.contains(section), "missing section: {}", section);
            }
        }
    }
}
