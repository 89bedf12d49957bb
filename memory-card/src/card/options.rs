use crate::error::{Error, Result};
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

/// The suffix appended to every backing file name.
pub const DEFAULT_SUFFIX: &str = ".memory-card.json";

/// Options controlling where a [`Card`](super::Card) keeps its backing file.
#[derive(Debug, Clone)]
pub struct Options {
    /// Directory that relative names are resolved against.
    ///
    /// Defaults to the current working directory at construction time.
    pub base_dir: Option<PathBuf>,
    /// Suffix the backing file name must end with.
    pub suffix: String,
}

impl Default for Options {
    fn default() -> Self {
        Self { base_dir: None, suffix: String::from(DEFAULT_SUFFIX) }
    }
}

impl Options {
    /// Resolves a card name to the absolute path of its backing file.
    pub fn resolve(&self, name: &str) -> Result<PathBuf> {
        let name = Path::new(name);
        // absolute names are taken verbatim, trailing separators included
        let mut path = if name.is_absolute() {
            OsString::from(name)
        } else {
            let base = match &self.base_dir {
                Some(dir) if dir.is_absolute() => dir.clone(),
                Some(dir) => std::env::current_dir().map_err(Error::CurrentDir)?.join(dir),
                None => std::env::current_dir().map_err(Error::CurrentDir)?,
            };
            OsString::from(normalize(&base.join(name)))
        };
        if !path.to_string_lossy().ends_with(self.suffix.as_str()) {
            path.push(&self.suffix);
        }
        Ok(PathBuf::from(path))
    }
}

// Lexical only: symlinks are not followed and the path need not exist.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}
