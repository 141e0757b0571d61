//! Recent Files Management
//!
//! This module tracks recently opened images and persists them to disk.
//! The list is used to populate the "Open Recent" submenu in the File menu.

use std::fs;
use std::path::{Path, PathBuf};

/// Maximum number of recent files to track
const MAX_RECENT_FILES: usize = 10;

/// Errors that can occur during recent files operations
#[derive(Debug, thiserror::Error)]
pub enum RecentFilesError {
    /// I/O error reading or writing the storage file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The storage file holds something other than a JSON path list
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Manages a list of recently opened files
#[derive(Debug, Clone)]
pub struct RecentFiles {
    /// List of recent file paths (most recent first)
    files: Vec<PathBuf>,
    /// Path to the persistence file
    storage_path: PathBuf,
}

impl RecentFiles {
    /// Creates a new RecentFiles manager
    pub fn new() -> Self {
        Self {
            files: Vec::new(),
            storage_path: Self::default_storage_path(),
        }
    }

    /// Creates a RecentFiles manager with a custom storage path (for testing)
    #[cfg(test)]
    pub fn with_storage_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            files: Vec::new(),
            storage_path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the default storage path for recent files
    ///
    /// - macOS: ~/Library/Application Support/lithview/recent_files.json
    /// - Linux: ~/.local/share/lithview/recent_files.json
    /// - Windows: %APPDATA%\lithview\recent_files.json
    fn default_storage_path() -> PathBuf {
        if let Some(data_dir) = dirs::data_dir() {
            data_dir.join("lithview").join("recent_files.json")
        } else {
            PathBuf::from("recent_files.json")
        }
    }

    /// Adds a file to the recent files list
    ///
    /// If the file already exists in the list, it is moved to the front.
    /// The list is capped at MAX_RECENT_FILES entries.
    pub fn add<P: AsRef<Path>>(&mut self, path: P) {
        let path = path.as_ref().to_path_buf();

        self.files.retain(|p| p != &path);
        self.files.insert(0, path);
        self.files.truncate(MAX_RECENT_FILES);
    }

    /// Returns the list of recent files (most recent first)
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Loads recent files from disk
    ///
    /// A missing storage file is not an error; paths that no longer exist
    /// are filtered out.
    pub fn load(&mut self) -> Result<(), RecentFilesError> {
        if !self.storage_path.exists() {
            return Ok(());
        }

        let contents = fs::read_to_string(&self.storage_path)?;
        self.files = serde_json::from_str(&contents)?;
        self.files.retain(|p| p.exists());

        Ok(())
    }

    /// Saves recent files to disk
    pub fn save(&self) -> Result<(), RecentFilesError> {
        if let Some(parent) = self.storage_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&self.files)?;
        fs::write(&self.storage_path, json)?;

        Ok(())
    }
}

impl Default for RecentFiles {
    fn default() -> Self {
        Self::new()
    }
}
