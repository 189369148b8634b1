use crate::classifier::select_important_files;
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::github::{parse_github_url, GithubClient, RepoRef};
use crate::llm::LlmClient;
use crate::merge::merge_contents;
use crate::models::{CustomReadmeRequest, RepoUrlRequest};
use crate::prompts::{custom_readme_prompt, readme_prompt};
use crate::selection::reconcile_selection;
use crate::tree::build_file_tree;
use actix_web::{get, post, web, HttpResponse};
use log::{info, warn};
use serde_json::json;
use std::time::Instant;
use tokio::fs as tokio_fs;

/// How many listing entries the generate responses echo back to the client.
const TREE_ECHO_LIMIT: usize = 50;

fn parse_repo_request(url: &str) -> Result<RepoRef, ApiError> {
    if url.trim().is_empty() {
        return Err(ApiError::InvalidInput("github url is required".to_string()));
    }
    parse_github_url(url)
        .ok_or_else(|| ApiError::InvalidInput("Invalid github url format".to_string()))
}

/// Best-effort local copy of the generated document. The response already
/// carries the README, so a write failure only warns.
async fn persist_generated_readme(repo_name: &str, readme: &str) {
    let file_name = format!(
        "generated/{}_README_{}.md",
        repo_name,
        chrono::Utc::now().timestamp_millis()
    );
    if let Err(e) = tokio_fs::create_dir_all("generated").await {
        warn!("Failed to create generated/ directory: {}", e);
        return;
    }
    match tokio_fs::write(&file_name, readme).await {
        Ok(()) => info!("Saved generated README to '{}'", file_name),
        Err(e) => warn!("Failed to save generated README to '{}': {}", file_name, e),
    }
}

#[get("/")]
pub async fn index() -> HttpResponse {
    HttpResponse::Ok().body("git2doc backend running...")
}

#[post("/api/github/metadata")]
pub async fn fetch_metadata(
    gh: web::Data<GithubClient>,
    req: web::Json<RepoUrlRequest>,
) -> Result<HttpResponse, ApiError> {
    let repo = parse_repo_request(&req.url)?;
    info!("Received metadata request for {}/{}", repo.owner, repo.repo);

    let metadata = gh.repo_metadata(&repo).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "data": metadata })))
}

#[post("/api/github/tree")]
pub async fn fetch_tree(
    gh: web::Data<GithubClient>,
    req: web::Json<RepoUrlRequest>,
) -> Result<HttpResponse, ApiError> {
    let repo = parse_repo_request(&req.url)?;
    info!("Received tree request for {}/{}", repo.owner, repo.repo);

    let metadata = gh.repo_metadata(&repo).await?;
    let entries = gh.repo_tree(&repo, &metadata.default_branch).await?;
    info!(
        "Listed {} entries for {}/{} at '{}'",
        entries.len(),
        repo.owner,
        repo.repo,
        metadata.default_branch
    );

    // Flat listing and nested hierarchy are two views of one snapshot; the
    // selection UI needs both with the same path identities.
    let hierarchy = build_file_tree(&entries);
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "tree": entries,
        "hierarchy": hierarchy,
    })))
}

#[post("/api/github/generate-readme")]
pub async fn generate_readme(
    config: web::Data<AppConfig>,
    gh: web::Data<GithubClient>,
    req: web::Json<RepoUrlRequest>,
) -> Result<HttpResponse, ApiError> {
    let repo = parse_repo_request(&req.url)?;
    info!(
        "Received README generation request for {}/{}",
        repo.owner, repo.repo
    );
    let start_time = Instant::now();

    let metadata = gh.repo_metadata(&repo).await?;
    let entries = gh.repo_tree(&repo, &metadata.default_branch).await?;

    let important = select_important_files(&entries, &config.rules);
    info!(
        "Classified {} important files out of {} entries",
        important.len(),
        entries.len()
    );

    let fetched = gh
        .fetch_file_contents(&repo, &metadata.default_branch, &important)
        .await;
    let merged = merge_contents(&entries, fetched);

    let prompt = readme_prompt(&metadata, &merged);
    let llm = LlmClient::from_config(&config)?;
    let readme = llm.generate(&prompt).await?;

    persist_generated_readme(&metadata.name, &readme).await;

    info!(
        "Generated README for {}/{} in {:.2?}",
        repo.owner,
        repo.repo,
        start_time.elapsed()
    );
    let tree_echo = &entries[..entries.len().min(TREE_ECHO_LIMIT)];
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "readme": readme,
        "metadata": metadata,
        "tree": tree_echo,
    })))
}

#[post("/api/github/generate-readme-custom")]
pub async fn generate_custom_readme(
    config: web::Data<AppConfig>,
    gh: web::Data<GithubClient>,
    req: web::Json<CustomReadmeRequest>,
) -> Result<HttpResponse, ApiError> {
    let repo = parse_repo_request(&req.url)?;
    if req.selected_files.is_empty() {
        return Err(ApiError::InvalidInput(
            "at least one selected file is required".to_string(),
        ));
    }
    info!(
        "Received custom README generation request for {}/{} ({} selected files)",
        repo.owner,
        repo.repo,
        req.selected_files.len()
    );
    let start_time = Instant::now();

    let metadata = gh.repo_metadata(&repo).await?;
    let entries = gh.repo_tree(&repo, &metadata.default_branch).await?;

    let selected = reconcile_selection(
        &entries,
        &req.selected_files,
        config.rules.max_selected_files,
    )?;
    info!(
        "Reconciled {} of {} requested files",
        selected.len(),
        req.selected_files.len()
    );

    let fetched = gh
        .fetch_file_contents(&repo, &metadata.default_branch, &selected)
        .await;
    let merged = merge_contents(&entries, fetched);

    let prompt = custom_readme_prompt(&metadata, &merged);
    let llm = LlmClient::from_config(&config)?;
    let readme = llm.generate(&prompt).await?;

    persist_generated_readme(&metadata.name, &readme).await;

    info!(
        "Generated custom README for {}/{} in {:.2?}",
        repo.owner,
        repo.repo,
        start_time.elapsed()
    );
    let tree_echo = &entries[..entries.len().min(TREE_ECHO_LIMIT)];
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "readme": readme,
        "metadata": metadata,
        "tree": tree_echo,
    })))
}
