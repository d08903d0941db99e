//! Content loader - discovers markdown files under the source directory

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::ContentFile;
use crate::Site;

/// Walks the content root
pub struct ContentLoader {
    source_dir: PathBuf,
    posts_dir: PathBuf,
}

impl ContentLoader {
    /// Create a new content loader
    pub fn new(site: &Site) -> Self {
        Self {
            source_dir: site.source_dir.clone(),
            posts_dir: PathBuf::from(&site.config.posts_dir),
        }
    }

    /// Collect every `.md` file under the source directory.
    ///
    /// Entries are visited in file-name order so repeated runs see the same
    /// sequence. Any traversal error, including a missing source directory,
    /// aborts the walk.
    pub fn load(&self) -> Result<Vec<ContentFile>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.source_dir).sort_by_file_name() {
            let entry = entry
                .with_context(|| format!("Failed to walk {:?}", self.source_dir))?;
            if entry.file_type().is_dir() {
                continue;
            }

            let path = entry.path();
            if let Some(file) = self.content_file(path) {
                tracing::debug!("Found: {:?}", path);
                files.push(file);
            }
        }

        Ok(files)
    }

    fn content_file(&self, path: &Path) -> Option<ContentFile> {
        let file_name = path.file_name()?;
        let Some(name) = file_name.to_str() else {
            if file_name.to_string_lossy().ends_with(".md") {
                tracing::warn!("Skipping {:?}: file name is not valid UTF-8", path);
            }
            return None;
        };
        let stem = name.strip_suffix(".md")?;

        let is_post = path
            .strip_prefix(&self.source_dir)
            .map(|relative| relative.starts_with(&self.posts_dir))
            .unwrap_or(false);

        Some(ContentFile {
            path: path.to_path_buf(),
            stem: stem.to_string(),
            is_post,
        })
    }
}
