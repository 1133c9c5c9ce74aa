//! Dialogue engine module
//!
//! This module drives the pure scanner/outline/resolver functions over files
//! on disk: a project scan that outlines every dialogue script under a root,
//! plus single-file outline and definition lookups.

use crate::config::{IgnoreFilter, ScanConfig};
use crate::document::Document;
use crate::models::{Definition, FileOutline, OutlineMap, Position, ScanMetadata, ScanStats};
use crate::outline::outline_sections;
use crate::reference::locate_in_sections;
use crate::resolver::resolve_match;
use crate::scanner::scan_document;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;
use walkdir::WalkDir;

/// Scanner errors
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config error: {0}")]
    ConfigError(#[from] crate::config::ConfigError),

    #[error("File too large: {} ({size} bytes)", path.display())]
    FileTooLarge { path: PathBuf, size: usize },

    #[error("Thread pool error: {0}")]
    ThreadPoolError(String),
}

/// Project-wide dialogue scanner
pub struct DialogueScanner {
    config: ScanConfig,
    ignore_filter: IgnoreFilter,
}

impl DialogueScanner {
    /// Create a new scanner with the given configuration
    pub fn new(config: ScanConfig) -> Result<Self, ScanError> {
        let ignore_filter = IgnoreFilter::new(&config)?;
        Ok(Self {
            config,
            ignore_filter,
        })
    }

    /// Scan the configured directory and return outline map
    pub fn scan(&self) -> Result<OutlineMap, ScanError> {
        let start = Instant::now();

        let dialogue_files = self.find_dialogue_files();
        tracing::debug!(
            root = %self.config.root.display(),
            files = dialogue_files.len(),
            "found dialogue files"
        );

        let mut files: Vec<FileOutline> = if self.config.threads == 1 {
            dialogue_files
                .iter()
                .filter_map(|path| self.outline_path(path))
                .collect()
        } else {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.config.threads)
                .build()
                .map_err(|e| ScanError::ThreadPoolError(e.to_string()))?;

            pool.install(|| {
                dialogue_files
                    .par_iter()
                    .filter_map(|path| self.outline_path(path))
                    .collect()
            })
        };
        files.sort_by(|a, b| a.path.cmp(&b.path));

        let stats = ScanStats::from_files(&files);
        let metadata = ScanMetadata::new(start.elapsed(), files.len());

        Ok(OutlineMap {
            root: self.config.root.clone(),
            files,
            stats,
            metadata,
        })
    }

    /// Find all dialogue files matching the configuration
    fn find_dialogue_files(&self) -> Vec<PathBuf> {
        let walker = WalkDir::new(&self.config.root)
            .follow_links(self.config.follow_symlinks)
            .into_iter()
            .filter_entry(|e| {
                // The root is always entered, even when its own name looks hidden
                if e.depth() > 0 && e.file_type().is_dir() {
                    return !self.ignore_filter.should_ignore(e.path(), true);
                }
                true
            });

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::warn!(error = %err, "skipping unreadable entry");
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                continue;
            }

            let path = entry.path();
            if !self.config.is_dialogue_file(path) || self.ignore_filter.should_ignore(path, false) {
                continue;
            }

            if let Ok(metadata) = entry.metadata() {
                if metadata.len() as usize > self.config.max_file_size {
                    tracing::debug!(path = %path.display(), size = metadata.len(), "skipping large file");
                    continue;
                }
            }

            files.push(path.to_path_buf());
        }

        files
    }

    /// Outline one file found during the walk, logging and skipping failures
    fn outline_path(&self, path: &Path) -> Option<FileOutline> {
        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "skipping unreadable file");
                return None;
            }
        };

        let relative_path = path
            .strip_prefix(&self.config.root)
            .unwrap_or(path)
            .to_path_buf();

        Some(outline_source(&source, relative_path, path, &self.config))
    }
}

/// Outline already loaded source text
fn outline_source(source: &str, path: PathBuf, on_disk: &Path, config: &ScanConfig) -> FileOutline {
    let document = Document::new(source);
    let sections = scan_document(&document);
    let mut entries = outline_sections(&document, &sections);

    if !config.include_untitled {
        entries.retain(|e| !e.is_untitled());
    }

    FileOutline {
        path,
        absolute_path: on_disk
            .canonicalize()
            .unwrap_or_else(|_| on_disk.to_path_buf()),
        total_lines: document.line_count(),
        entries,
    }
}

fn read_source(path: &Path, config: &ScanConfig) -> Result<String, ScanError> {
    let size = fs::metadata(path)?.len() as usize;
    if size > config.max_file_size {
        return Err(ScanError::FileTooLarge {
            path: path.to_path_buf(),
            size,
        });
    }
    Ok(fs::read_to_string(path)?)
}

/// Outline a single file
pub fn outline_file(path: &Path, config: &ScanConfig) -> Result<FileOutline, ScanError> {
    let source = read_source(path, config)?;
    Ok(outline_source(&source, path.to_path_buf(), path, config))
}

/// Resolve the `=>` reference under a cursor position in a file
///
/// `Ok(None)` means there is nothing to jump to: the line has no `=>`, the
/// cursor is not on a token, or no section matches.
pub fn find_definition(
    path: &Path,
    position: Position,
    config: &ScanConfig,
) -> Result<Option<Definition>, ScanError> {
    let source = read_source(path, config)?;
    let document = Document::new(&source);
    let sections = scan_document(&document);

    Ok(
        locate_in_sections(&document, &sections, position).map(|reference| Definition {
            path: path.to_path_buf(),
            token: reference.token.text,
            section: reference.resolution.section.name.clone(),
            match_kind: reference.resolution.kind,
            target: reference.resolution.section.position(),
        }),
    )
}

/// Resolve a section name typed by the user against one file
pub fn find_section(
    path: &Path,
    name: &str,
    config: &ScanConfig,
) -> Result<Option<Definition>, ScanError> {
    let source = read_source(path, config)?;
    let sections = scan_document(&Document::new(&source));

    Ok(resolve_match(name, &sections).map(|resolution| Definition {
        path: path.to_path_buf(),
        token: name.to_string(),
        section: resolution.section.name.clone(),
        match_kind: resolution.kind,
        target: resolution.section.position(),
    }))
}
