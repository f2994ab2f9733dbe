use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Where the user's own code lives.
///
/// Frames inside the project are shown prominently; the rest (gems, the
/// interpreter's own files) are de-emphasised.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Project {
    /// Project root. `None` means every file counts as project code.
    pub root: Option<PathBuf>,
    /// Absolute paths of files the host process has loaded.
    pub loaded_files: BTreeSet<PathBuf>,
}

impl Project {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
            loaded_files: BTreeSet::new(),
        }
    }

    pub fn with_loaded_files<I, P>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.loaded_files.extend(files.into_iter().map(Into::into));
        self
    }

    pub fn contains(&self, path: &Path) -> bool {
        match &self.root {
            Some(root) => self.resolve(path).starts_with(root),
            None => true,
        }
    }

    /// Absolute form of a backtrace path.
    ///
    /// Relative paths are matched against the loaded files first (interpreters
    /// report required files relative to the load path), then joined onto the root.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            return path.to_path_buf();
        }
        if let Some(loaded) = self.loaded_files.iter().find(|f| f.ends_with(path)) {
            return loaded.clone();
        }
        match &self.root {
            Some(root) => root.join(path),
            None => path.to_path_buf(),
        }
    }
}
