//! Search-path lookup for image files.
//!
//! A [`DataRepository`] is an ordered list of directories. Relative file
//! names are resolved against each directory in turn; the first existing
//! file wins. Clones share the same list, so a guard handed out by
//! [`DataRepository::push_first_scoped`] affects every loader holding the
//! repository.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

/// Environment variable seeding the global repository
pub const DATA_PATH_ENV: &str = "PIXLOAD_DATA_PATH";

/// Ordered, shared list of search directories
#[derive(Debug, Clone, Default)]
pub struct DataRepository {
    paths: Arc<RwLock<Vec<PathBuf>>>,
}

impl DataRepository {
    /// Create an empty repository
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository searching `paths` in order
    #[must_use]
    pub fn from_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let repo = Self::new();
        for path in paths {
            repo.add_last_path(path);
        }
        repo
    }

    /// Create a repository from a path-list environment variable
    /// (`:`-separated on Unix, `;` on Windows). A missing variable gives an
    /// empty repository.
    #[must_use]
    pub fn from_env(var: impl AsRef<OsStr>) -> Self {
        std::env::var_os(var).map_or_else(Self::new, |value| {
            Self::from_paths(std::env::split_paths(&value).filter(|p| !p.as_os_str().is_empty()))
        })
    }

    /// Process-wide repository, seeded from [`DATA_PATH_ENV`] on first use
    #[must_use]
    pub fn global() -> &'static Self {
        static GLOBAL: OnceLock<DataRepository> = OnceLock::new();
        GLOBAL.get_or_init(|| Self::from_env(DATA_PATH_ENV))
    }

    /// Put `dir` at the front of the search order
    pub fn add_first_path(&self, dir: impl Into<PathBuf>) {
        let dir = dir.into();
        let mut paths = self.write();
        paths.retain(|p| *p != dir);
        paths.insert(0, dir);
    }

    /// Put `dir` at the back of the search order
    pub fn add_last_path(&self, dir: impl Into<PathBuf>) {
        let dir = dir.into();
        let mut paths = self.write();
        paths.retain(|p| *p != dir);
        paths.push(dir);
    }

    /// Remove `dir`; returns whether it was present
    pub fn remove_path(&self, dir: impl AsRef<Path>) -> bool {
        let dir = dir.as_ref();
        let mut paths = self.write();
        let before = paths.len();
        paths.retain(|p| p != dir);
        paths.len() != before
    }

    /// Remove every search directory
    pub fn clear(&self) {
        self.write().clear();
    }

    /// Snapshot of the search directories, in order
    #[must_use]
    pub fn paths(&self) -> Vec<PathBuf> {
        self.read().clone()
    }

    /// Number of search directories
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether there are no search directories
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Add `dir` first for as long as the returned guard lives
    #[must_use = "the directory is removed again when the guard is dropped"]
    pub fn push_first_scoped(&self, dir: impl Into<PathBuf>) -> SearchPathGuard {
        let dir = dir.into();
        self.add_first_path(dir.clone());
        SearchPathGuard {
            repository: self.clone(),
            dir,
        }
    }

    /// Resolve `name` to an existing file.
    ///
    /// An existing absolute path, or a path that exists relative to the
    /// working directory, is returned unchanged. Otherwise each search
    /// directory is tried in order.
    #[must_use]
    pub fn find_file(&self, name: impl AsRef<Path>) -> Option<PathBuf> {
        let name = name.as_ref();
        if name.as_os_str().is_empty() {
            return None;
        }
        if name.is_file() {
            return Some(name.to_path_buf());
        }
        if name.is_absolute() {
            return None;
        }

        self.read()
            .iter()
            .map(|dir| dir.join(name))
            .find(|candidate| candidate.is_file())
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<PathBuf>> {
        self.paths.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Vec<PathBuf>> {
        self.paths.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Removes its directory from the repository on drop
#[derive(Debug)]
pub struct SearchPathGuard {
    repository: DataRepository,
    dir: PathBuf,
}

impl SearchPathGuard {
    /// Directory held by this guard
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Drop for SearchPathGuard {
    fn drop(&mut self) {
        let _ = self.repository.remove_path(&self.dir);
    }
}
