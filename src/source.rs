use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{QuizError, Result};

pub const DEFAULT_SOURCE_DIR: &str = "sources";
pub const QUIZ_EXTENSIONS: [&str; 2] = ["yml", "yaml"];

/// Where quiz definitions are taken from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Every quiz file directly inside the directory.
    Directory(PathBuf),
    File(PathBuf),
}

impl Source {
    pub fn files(&self) -> Result<Vec<PathBuf>> {
        match self {
            Self::Directory(dir) => discover(dir),
            Self::File(path) => Ok(vec![path.clone()]),
        }
    }
}

pub fn is_quiz_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| QUIZ_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
}

/// Lists quiz files in `dir`, sorted by path. Subdirectories are not entered.
pub fn discover(dir: &Path) -> Result<Vec<PathBuf>> {
    let io_error = |source| QuizError::Io {
        path: dir.to_owned(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_error)? {
        let entry = entry.map_err(io_error)?;
        let path = entry.path();
        if !entry.file_type().map_err(io_error)?.is_file() {
            debug!("Skipping {}: not a file", path.display());
            continue;
        }
        if is_quiz_file(&path) {
            files.push(path);
        } else {
            debug!("Skipping {}: unknown extension", path.display());
        }
    }

    files.sort();
    Ok(files)
}
