//! Loading the documents named by `::include`.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

/// Source of included document text.
pub trait IncludeResolver: Send + Sync {
    /// Read `path`, relative to `base` when one is given.
    fn read(&self, base: Option<&Path>, path: &str) -> io::Result<String>;
}

/// Reads includes from the file system.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsResolver;

impl IncludeResolver for FsResolver {
    fn read(&self, base: Option<&Path>, path: &str) -> io::Result<String> {
        let full = match base {
            Some(base) => base.join(path),
            None => PathBuf::from(path),
        };
        std::fs::read_to_string(full)
    }
}

/// Serves includes from memory, keyed by the path as written.
#[derive(Clone, Default)]
pub struct MemoryResolver {
    files: FxHashMap<String, String>,
}

impl MemoryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_file(mut self, path: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(path, text);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, text: impl Into<String>) {
        self.files.insert(path.into(), text.into());
    }
}

impl IncludeResolver for MemoryResolver {
    fn read(&self, _base: Option<&Path>, path: &str) -> io::Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such document"))
    }
}

impl fmt::Debug for MemoryResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut paths: Vec<&String> = self.files.keys().collect();
        paths.sort();
        f.debug_struct("MemoryResolver").field("files", &paths).finish()
    }
}
