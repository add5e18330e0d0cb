use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// File lookups needed while resolving base classes
pub trait FileSystem {
    fn exists(&self, path: &Path) -> bool;
}

/// Real file system implementation
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// In-memory file set for tests and hosts that already know their files
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    pub existing_files: HashSet<PathBuf>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&mut self, path: impl Into<PathBuf>) {
        self.existing_files.insert(path.into());
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.add_file(path);
        self
    }
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.existing_files.contains(path)
    }
}
