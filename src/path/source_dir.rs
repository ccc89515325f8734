use super::{PathError, SourceFile};
use std::{
    fmt::{self, Display, Formatter},
    path::{Path, PathBuf},
    sync::Arc,
};

const SOURCE_ROOT: &str = "//";

/// A directory in a source tree or a file system.
///
/// Its value always begins and ends with a slash. Directories relative to a
/// source root begin with two slashes.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SourceDir {
    value: Arc<str>,
}

impl SourceDir {
    pub fn root() -> Self {
        Self {
            value: SOURCE_ROOT.into(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_source_absolute(&self) -> bool {
        self.value.starts_with(SOURCE_ROOT)
    }

    /// Returns the directory without its trailing slash unless it is a root.
    pub fn display_name(&self) -> &str {
        if self.value.len() > SOURCE_ROOT.len()
            || !self.is_source_absolute() && self.value.len() > 1
        {
            &self.value[..self.value.len() - 1]
        } else {
            &self.value
        }
    }

    /// Returns the last component of the directory.
    pub fn last_component(&self) -> &str {
        self.display_name()
            .rsplit('/')
            .next()
            .unwrap_or_default()
    }

    pub fn resolve_relative_file(&self, input: &str) -> Result<SourceFile, PathError> {
        if input.is_empty() {
            return Err(PathError::Empty);
        } else if input.ends_with('/') {
            return Err(PathError::Directory(input.into()));
        }

        let path = normalize(&self.join(input))?;

        // Inputs like ".." resolve to roots.
        if path.ends_with('/') {
            return Err(PathError::Directory(input.into()));
        }

        Ok(SourceFile::from_normalized(path))
    }

    pub fn resolve_relative_dir(&self, input: &str) -> Result<SourceDir, PathError> {
        if input.is_empty() {
            return Err(PathError::Empty);
        }

        let mut path = self.join(input);

        if !path.ends_with('/') {
            path.push('/');
        }

        Ok(Self {
            value: normalize(&path)?.into(),
        })
    }

    /// Resolves an input as a file or a directory and returns its string form.
    pub fn resolve_relative_as(&self, as_file: bool, input: &str) -> Result<String, PathError> {
        Ok(if as_file {
            self.resolve_relative_file(input)?.value().into()
        } else {
            self.resolve_relative_dir(input)?.value().into()
        })
    }

    pub fn resolve(&self, root_path: &Path) -> PathBuf {
        if let Some(path) = self.value.strip_prefix(SOURCE_ROOT) {
            root_path.join(path)
        } else {
            PathBuf::from(&*self.value)
        }
    }

    fn join(&self, input: &str) -> String {
        if input.starts_with('/') {
            input.into()
        } else {
            format!("{}{}", self.value, input)
        }
    }
}

impl Display for SourceDir {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        write!(formatter, "{}", self.value)
    }
}

fn normalize(path: &str) -> Result<String, PathError> {
    let (prefix, rest) = if let Some(rest) = path.strip_prefix(SOURCE_ROOT) {
        (SOURCE_ROOT, rest)
    } else {
        ("/", path.trim_start_matches('/'))
    };
    let mut components = Vec::<&str>::new();

    for component in rest.split('/') {
        match component {
            "" | "." => {}
            ".." => {
                if components.pop().is_none() && prefix == SOURCE_ROOT {
                    return Err(PathError::AboveSourceRoot(path.into()));
                }
            }
            component => components.push(component),
        }
    }

    let mut normalized = prefix.to_owned() + &components.join("/");

    if path.ends_with('/') && !components.is_empty() {
        normalized.push('/');
    }

    Ok(normalized)
}
