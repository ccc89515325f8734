use crate::path::{SourceDir, SourceFile};
use std::path::{Path, PathBuf};

/// Settings shared by all toolchains in a build.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BuildSettings {
    root_path: PathBuf,
    build_dir: SourceDir,
}

impl BuildSettings {
    pub fn new(root_path: PathBuf, build_dir: SourceDir) -> Self {
        Self {
            root_path,
            build_dir,
        }
    }

    /// Returns an absolute path of a source root in a file system.
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// Returns an output directory.
    pub fn build_dir(&self) -> &SourceDir {
        &self.build_dir
    }

    pub fn full_path(&self, file: &SourceFile) -> PathBuf {
        file.resolve(&self.root_path)
    }

    pub fn full_build_dir(&self) -> PathBuf {
        self.build_dir.resolve(&self.root_path)
    }

    pub fn is_in_build_dir(&self, path: &str) -> bool {
        path.starts_with(self.build_dir.value())
    }
}
