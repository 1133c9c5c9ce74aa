//! Configuration module for the dialogue scanner
//!
//! This module provides configuration structures and ignore filtering logic
//! for controlling which dialogue files a project scan visits.

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default name of the optional project config file
pub const CONFIG_FILE_NAME: &str = "mta-dialogue.toml";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid glob pattern: {0}")]
    InvalidGlob(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] toml::de::Error),
}

/// Configuration for the dialogue scanner
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Root directory to scan
    pub root: PathBuf,

    /// File extensions treated as dialogue scripts (without the dot)
    pub extensions: Vec<String>,

    /// Custom ignore patterns
    pub ignore_patterns: Vec<String>,

    /// Path to custom ignore file
    pub ignore_file: Option<PathBuf>,

    /// Number of threads for parallel processing
    pub threads: usize,

    /// Maximum file size to process (bytes)
    pub max_file_size: usize,

    /// Whether to follow symlinks
    pub follow_symlinks: bool,

    /// Whether to include hidden files
    pub include_hidden: bool,

    /// Whether placeholder-named sections appear in outlines
    pub include_untitled: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            extensions: vec!["dialogue".to_string()],
            ignore_patterns: Vec::new(),
            ignore_file: None,
            threads: num_cpus(),
            max_file_size: 10 * 1024 * 1024, // 10 MB
            follow_symlinks: false,
            include_hidden: false,
            include_untitled: true,
        }
    }
}

/// On-disk form of the config; every key is optional
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    extensions: Option<Vec<String>>,
    ignore: Option<Vec<String>>,
    ignore_file: Option<PathBuf>,
    threads: Option<usize>,
    max_file_size: Option<usize>,
    follow_symlinks: Option<bool>,
    include_hidden: Option<bool>,
    include_untitled: Option<bool>,
}

impl ScanConfig {
    /// Create new config with root directory
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            ..Default::default()
        }
    }

    /// Overlay settings from a TOML config file
    pub fn load_file(self, path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config = self.apply_toml(&contents)?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Overlay `mta-dialogue.toml` from the root directory when present
    pub fn load_default_file(self) -> Result<Self, ConfigError> {
        let path = self.root.join(CONFIG_FILE_NAME);
        if path.is_file() {
            self.load_file(&path)
        } else {
            Ok(self)
        }
    }

    fn apply_toml(mut self, contents: &str) -> Result<Self, ConfigError> {
        let file: FileConfig = toml::from_str(contents)?;

        if let Some(extensions) = file.extensions {
            self.extensions = extensions;
        }
        if let Some(patterns) = file.ignore {
            self.ignore_patterns = patterns;
        }
        if let Some(ignore_file) = file.ignore_file {
            self.ignore_file = Some(self.root.join(ignore_file));
        }
        if let Some(threads) = file.threads {
            self.threads = threads;
        }
        if let Some(size) = file.max_file_size {
            self.max_file_size = size;
        }
        if let Some(follow) = file.follow_symlinks {
            self.follow_symlinks = follow;
        }
        if let Some(include) = file.include_hidden {
            self.include_hidden = include;
        }
        if let Some(include) = file.include_untitled {
            self.include_untitled = include;
        }

        Ok(self)
    }

    /// Set dialogue file extensions (builder pattern)
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    /// Set ignore patterns (builder pattern)
    pub fn with_ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.ignore_patterns = patterns;
        self
    }

    /// Set ignore file path (builder pattern)
    pub fn with_ignore_file(mut self, path: PathBuf) -> Self {
        self.ignore_file = Some(path);
        self
    }

    /// Set number of threads (builder pattern)
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Set max file size (builder pattern)
    pub fn with_max_file_size(mut self, size: usize) -> Self {
        self.max_file_size = size;
        self
    }

    /// Set follow symlinks (builder pattern)
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Set include hidden files (builder pattern)
    pub fn with_include_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    /// Set whether untitled sections are outlined (builder pattern)
    pub fn with_include_untitled(mut self, include: bool) -> Self {
        self.include_untitled = include;
        self
    }

    /// Check whether a path has one of the dialogue extensions
    pub fn is_dialogue_file(&self, path: &Path) -> bool {
        let Some(ext) = path.extension() else {
            return false;
        };

        let ext = ext.to_string_lossy();
        self.extensions
            .iter()
            .any(|candidate| candidate.trim_start_matches('.').eq_ignore_ascii_case(&ext))
    }
}

/// Get number of available CPUs
fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(4)
}

/// Filter for ignoring files and directories
pub struct IgnoreFilter {
    /// Scan root; glob patterns match paths relative to it
    root: PathBuf,

    /// Gitignore rules, plus the custom ignore file when configured
    gitignore: Option<Gitignore>,

    /// Custom glob patterns
    custom_globs: GlobSet,

    /// Default ignore patterns
    default_ignores: GlobSet,

    /// Whether to include hidden files
    include_hidden: bool,
}

impl IgnoreFilter {
    /// Create a new ignore filter from config
    pub fn new(config: &ScanConfig) -> Result<Self, ConfigError> {
        let gitignore = Self::build_gitignore(&config.root, config.ignore_file.as_deref());
        let custom_globs = Self::build_globset(&config.ignore_patterns)?;

        // Godot import caches and export output never hold source scripts
        let default_patterns = [
            "**/.git/**",
            "**/.godot/**",
            "**/.import/**",
            "**/addons/**/tests/**",
            "**/build/**",
            "**/export/**",
            "**/target/**",
        ];
        let default_ignores = Self::build_globset(
            &default_patterns.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
        )?;

        Ok(Self {
            root: config.root.clone(),
            gitignore,
            custom_globs,
            default_ignores,
            include_hidden: config.include_hidden,
        })
    }

    /// Build gitignore rules from the root directory and an optional extra file
    fn build_gitignore(root: &Path, extra: Option<&Path>) -> Option<Gitignore> {
        let gitignore_path = root.join(".gitignore");
        let mut builder = GitignoreBuilder::new(root);
        let mut any = false;

        for path in std::iter::once(gitignore_path.as_path()).chain(extra) {
            if !path.exists() {
                continue;
            }
            if let Some(err) = builder.add(path) {
                tracing::warn!(path = %path.display(), error = %err, "skipping unreadable ignore file");
                continue;
            }
            any = true;
        }

        if !any {
            return None;
        }

        match builder.build() {
            Ok(gi) => Some(gi),
            Err(err) => {
                tracing::warn!(error = %err, "ignoring invalid ignore rules");
                None
            }
        }
    }

    /// Build a globset from patterns
    fn build_globset(patterns: &[String]) -> Result<GlobSet, ConfigError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| ConfigError::InvalidGlob(e.to_string()))?;
            builder.add(glob);
        }
        builder
            .build()
            .map_err(|e| ConfigError::InvalidGlob(e.to_string()))
    }

    /// Check if a path should be ignored
    pub fn should_ignore(&self, path: &Path, is_dir: bool) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let path_str = relative.to_string_lossy();

        if !self.include_hidden {
            if let Some(name) = path.file_name() {
                let name = name.to_string_lossy();
                if name.starts_with('.') && name != "." && name != ".." {
                    return true;
                }
            }
        }

        if self.default_ignores.is_match(&*path_str) {
            return true;
        }

        if self.custom_globs.is_match(&*path_str) {
            return true;
        }

        if let Some(ref gi) = self.gitignore {
            if gi.matched(path, is_dir).is_ignore() {
                return true;
            }
        }

        false
    }
}
