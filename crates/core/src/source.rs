use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::domain::FolderRecords;
use crate::error::{Error, Result};

/// Where folders and their raw records come from.
pub trait DirectorySource {
    /// Records held by `folder`. A folder without metadata yields no records.
    fn read_folder(&self, folder: &Path) -> Result<FolderRecords>;

    /// Direct subfolders of `folder`, in the source's own enumeration order.
    fn subfolders(&self, folder: &Path) -> Result<Vec<PathBuf>>;
}

/// Reads a JSON metadata file from each folder of a directory tree.
pub struct JsonFolderSource {
    metadata_file: String,
}

impl JsonFolderSource {
    pub fn new(metadata_file: impl Into<String>) -> Self {
        Self {
            metadata_file: metadata_file.into(),
        }
    }
}

impl DirectorySource for JsonFolderSource {
    fn read_folder(&self, folder: &Path) -> Result<FolderRecords> {
        let path = folder.join(&self.metadata_file);
        if !path.is_file() {
            return Ok(FolderRecords::default());
        }
        let text = fs::read_to_string(&path)?;
        serde_json::from_str(&text).map_err(|e| Error::InvalidMetadata {
            path,
            message: e.to_string(),
        })
    }

    fn subfolders(&self, folder: &Path) -> Result<Vec<PathBuf>> {
        let mut dirs = Vec::new();
        for entry in WalkDir::new(folder).min_depth(1).max_depth(1) {
            let entry = entry?;
            if entry.file_type().is_dir() {
                dirs.push(entry.into_path());
            }
        }
        Ok(dirs)
    }
}

/// Path of `folder` relative to `root`, joined with `/`. The root itself is empty.
pub fn relative_folder(root: &Path, folder: &Path) -> String {
    let rel = folder.strip_prefix(root).unwrap_or(folder);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
