use log::warn;
use std::env;

/// Runtime configuration read from the environment once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub groq_api_key: Option<String>,
    pub groq_model: String,
    pub rules: ClassifierRules,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(5000);
        let groq_api_key = env::var("GROQ_API_KEY").ok().filter(|k| !k.is_empty());
        if groq_api_key.is_none() {
            warn!("GROQ_API_KEY is not set; README generation endpoints will fail.");
        }
        let groq_model =
            env::var("GROQ_MODEL").unwrap_or_else(|_| "llama-3.3-70b-versatile".to_string());

        AppConfig {
            port,
            groq_api_key,
            groq_model,
            rules: ClassifierRules::default(),
        }
    }
}

/// The rule sets and caps driving file classification and selection
/// reconciliation. Kept in one place so the configuration surface is the
/// sets themselves, not control flow scattered through the pipeline.
#[derive(Debug, Clone)]
pub struct ClassifierRules {
    /// Directory prefixes (trailing slash included) whose contents are never
    /// fetched: build outputs, dependency caches, VCS and editor metadata.
    pub ignored_dirs: Vec<String>,
    /// Exact final path segments that carry no stack signal of their own.
    pub ignored_filenames: Vec<String>,
    /// Filename suffixes for binary, lock and generated formats.
    pub ignored_extensions: Vec<String>,
    /// Filenames relevant wherever they appear: dependency manifests,
    /// containerization and build-tool configs.
    pub manifest_filenames: Vec<String>,
    /// Conventional entry-point module names, only honored under
    /// `entrypoint_prefixes` or at the repository root.
    pub entrypoint_filenames: Vec<String>,
    /// Locations where an entry-point filename is taken seriously.
    pub entrypoint_prefixes: Vec<String>,
    /// Cap on automatically classified files per request.
    pub max_important_files: usize,
    /// Cap on user-selected files per request.
    pub max_selected_files: usize,
}

impl Default for ClassifierRules {
    fn default() -> Self {
        fn owned(items: &[&str]) -> Vec<String> {
            items.iter().map(|s| s.to_string()).collect()
        }

        ClassifierRules {
            ignored_dirs: owned(&[
                "node_modules/",
                ".git/",
                ".github/",
                ".vscode/",
                ".idea/",
                "dist/",
                "build/",
                "out/",
                ".next/",
                "target/",
                "vendor/",
                "coverage/",
                "__pycache__/",
            ]),
            ignored_filenames: owned(&[
                "package-lock.json",
                "yarn.lock",
                "pnpm-lock.yaml",
                "bun.lockb",
                "Cargo.lock",
                "poetry.lock",
                "composer.lock",
                "Gemfile.lock",
                "LICENSE",
                "LICENSE.md",
                "LICENSE.txt",
                "README.md",
                "README.rst",
                "CHANGELOG.md",
                "CONTRIBUTING.md",
                "CODE_OF_CONDUCT.md",
                ".env",
                ".env.example",
                ".env.local",
                ".gitignore",
                ".gitattributes",
                ".npmrc",
                ".prettierrc",
                ".eslintrc",
            ]),
            ignored_extensions: owned(&[
                ".png", ".jpg", ".jpeg", ".gif", ".svg", ".ico", ".webp", ".pdf", ".zip",
                ".tar", ".gz", ".7z", ".woff", ".woff2", ".ttf", ".eot", ".otf", ".mp3",
                ".mp4", ".webm", ".lock", ".map", ".min.js", ".min.css", ".bin", ".exe",
                ".dll", ".so", ".dylib", ".wasm",
            ]),
            manifest_filenames: owned(&[
                "package.json",
                "requirements.txt",
                "pyproject.toml",
                "setup.py",
                "Pipfile",
                "Cargo.toml",
                "go.mod",
                "pom.xml",
                "build.gradle",
                "build.gradle.kts",
                "Gemfile",
                "composer.json",
                "mix.exs",
                "CMakeLists.txt",
                "Makefile",
                "Dockerfile",
                "docker-compose.yml",
                "docker-compose.yaml",
                "tsconfig.json",
                "next.config.js",
                "next.config.mjs",
                "vite.config.js",
                "vite.config.ts",
                "webpack.config.js",
            ]),
            entrypoint_filenames: owned(&[
                "index.js",
                "index.ts",
                "index.jsx",
                "index.tsx",
                "main.js",
                "main.ts",
                "app.js",
                "app.ts",
                "App.jsx",
                "App.tsx",
                "server.js",
                "server.ts",
                "main.py",
                "app.py",
                "__main__.py",
                "main.go",
                "main.rs",
                "lib.rs",
                "Main.java",
                "index.html",
            ]),
            entrypoint_prefixes: owned(&[
                "src/", "app/", "lib/", "api/", "cmd/", "bin/", "server/", "backend/",
                "frontend/", "pages/",
            ]),
            max_important_files: 8,
            max_selected_files: 20,
        }
    }
}
