//! Recursive discovery of pipeline input files.

use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

/// File types picked up by the pipeline stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Tif,
    Png,
}

impl FileKind {
    /// File name suffix identifying this kind (case-sensitive).
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Tif => ".tif",
            Self::Png => ".png",
        }
    }

    pub fn matches(&self, file_name: &str) -> bool {
        file_name.ends_with(self.suffix())
    }
}

/// Walk `root` recursively and return every file of `kind`, sorted by path.
///
/// Entries that cannot be read are logged and skipped. A missing `root`
/// yields an empty list.
pub fn discover_files(root: &Path, kind: FileKind) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(root = %root.display(), error = %e, "Skipping unreadable directory entry");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        if entry
            .file_name()
            .to_str()
            .map(|name| kind.matches(name))
            .unwrap_or(false)
        {
            files.push(entry.into_path());
        }
    }

    files.sort();
    files
}
