use super::{SourceDir, SourceFileType};
use std::{
    cmp::Ordering,
    fmt::{self, Display, Formatter},
    hash::{Hash, Hasher},
    path::{Path, PathBuf},
    sync::Arc,
};

/// A file in a source tree or a file system.
///
/// Its value always begins with a slash and never ends with one. Its type is
/// inferred once on construction from the extension.
#[derive(Clone, Debug)]
pub struct SourceFile {
    value: Arc<str>,
    r#type: SourceFileType,
}

impl SourceFile {
    pub(super) fn from_normalized(value: String) -> Self {
        debug_assert!(value.starts_with('/') && !value.ends_with('/'));

        Self {
            r#type: SourceFileType::from_path(&value),
            value: value.into(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn r#type(&self) -> SourceFileType {
        self.r#type
    }

    /// Returns everything after the last slash.
    pub fn name(&self) -> &str {
        self.value.rsplit('/').next().unwrap_or_default()
    }

    pub fn dir(&self) -> SourceDir {
        let (directory, _) = self.value.rsplit_once('/').unwrap_or_default();

        SourceDir::root()
            .resolve_relative_dir(&format!("{directory}/"))
            .unwrap_or_else(|_| SourceDir::root())
    }

    pub fn is_source_absolute(&self) -> bool {
        self.value.starts_with("//")
    }

    pub fn is_system_absolute(&self) -> bool {
        !self.is_source_absolute()
    }

    pub fn resolve(&self, root_path: &Path) -> PathBuf {
        if let Some(path) = self.value.strip_prefix("//") {
            root_path.join(path)
        } else {
            PathBuf::from(&*self.value)
        }
    }
}

impl PartialEq for SourceFile {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for SourceFile {}

impl PartialOrd for SourceFile {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SourceFile {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl Hash for SourceFile {
    fn hash<H: Hasher>(&self, hasher: &mut H) {
        self.value.hash(hasher)
    }
}

impl Display for SourceFile {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        write!(formatter, "{}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn file(path: &str) -> SourceFile {
        SourceDir::root().resolve_relative_file(path).unwrap()
    }

    #[test]
    fn get_name_and_directory() {
        let file = file("//foo/bar/baz.rs");

        assert_eq!(file.name(), "baz.rs");
        assert_eq!(file.dir().value(), "//foo/bar/");
    }

    #[test]
    fn get_root_directory() {
        assert_eq!(file("//baz.rs").dir().value(), "//");
    }

    #[test]
    fn distinguish_absolute_forms() {
        assert!(file("//foo.rs").is_source_absolute());
        assert!(file("/foo.rs").is_system_absolute());
    }

    #[test]
    fn infer_type_from_value() {
        assert_eq!(file("//foo/lib.rs").r#type(), SourceFileType::Rust);
        assert_eq!(file("//foo/lib.rs"), file("//foo/./lib.rs"));
    }

    #[test]
    fn resolve_to_file_system() {
        assert_eq!(
            file("//foo/lib.rs").resolve(Path::new("/src")),
            PathBuf::from("/src/foo/lib.rs")
        );
        assert_eq!(
            file("/usr/lib.rs").resolve(Path::new("/src")),
            PathBuf::from("/usr/lib.rs")
        );
    }
}
