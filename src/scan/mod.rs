//! Discovery of FL Studio project files on disk.

pub mod records;

use std::path::{Path, PathBuf};

use log::{debug, trace};
use walkdir::{DirEntry, WalkDir};

use crate::config::Config;
use crate::error::FlpStatError;

/// Scanner for finding FL Studio project files in a directory tree.
pub struct ProjectPathScanner {
    /// Directory names excluded from traversal (FL Studio keeps automatic
    /// backups in a `Backup` folder)
    skip_dirs: Vec<String>,
    follow_links: bool,
}

impl ProjectPathScanner {
    pub fn new() -> Self {
        Self::from_config(&Config::default())
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            skip_dirs: config.skip_dirs.clone(),
            follow_links: config.follow_links,
        }
    }

    /// Scan a directory tree for `.flp` files.
    ///
    /// Paths come back in sorted walk order, so repeated runs over the same
    /// tree see projects in the same order.
    pub fn scan_directory(&self, dir: &Path) -> Result<Vec<PathBuf>, FlpStatError> {
        if !dir.is_dir() {
            return Err(FlpStatError::InvalidScanPath(dir.to_path_buf()));
        }

        let mut project_paths = Vec::new();
        let walker = WalkDir::new(dir)
            .follow_links(self.follow_links)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.is_skipped_dir(entry));

        for entry in walker.filter_map(|e| e.ok()) {
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().map_or(false, |ext| ext == "flp") {
                trace!("found project file: {}", path.display());
                project_paths.push(path.to_path_buf());
            }
        }

        debug!(
            "found {} project files under {}",
            project_paths.len(),
            dir.display()
        );
        Ok(project_paths)
    }

    fn is_skipped_dir(&self, entry: &DirEntry) -> bool {
        // depth 0 is the scan root itself, which is never skipped
        entry.depth() > 0
            && entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .map(|name| self.skip_dirs.iter().any(|skip| skip == name))
                .unwrap_or(false)
    }
}

impl Default for ProjectPathScanner {
    fn default() -> Self {
        Self::new()
    }
}
