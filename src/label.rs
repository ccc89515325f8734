mod error;
mod pattern;

pub use error::*;
pub use pattern::*;

use crate::path::SourceDir;
use std::{
    fmt::{self, Display, Formatter},
    sync::Arc,
};

/// An identity of a target, a config, or a toolchain.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Label {
    dir: SourceDir,
    name: Arc<str>,
    toolchain_dir: Option<SourceDir>,
    toolchain_name: Arc<str>,
}

impl Label {
    pub fn new(
        dir: SourceDir,
        name: impl Into<Arc<str>>,
        toolchain_dir: Option<SourceDir>,
        toolchain_name: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            dir,
            name: name.into(),
            toolchain_dir,
            toolchain_name: toolchain_name.into(),
        }
    }

    /// Resolves a label string against a current directory and toolchain.
    ///
    /// Accepted forms are `//dir:name`, `//dir`, `:name` and `dir:name`, each
    /// with an optional `(toolchain)` suffix.
    pub fn resolve(
        current_dir: &SourceDir,
        current_toolchain: Option<&Label>,
        input: &str,
    ) -> Result<Self, LabelError> {
        if input.is_empty() {
            return Err(LabelError::Empty);
        }

        let (location, toolchain) = split_toolchain(input)?;
        let (dir, name) = resolve_location(current_dir, location, input)?;
        let (toolchain_dir, toolchain_name) = match toolchain {
            Some(toolchain) => {
                let (dir, name) = resolve_location(current_dir, toolchain, input)?;

                (Some(dir), name)
            }
            None => current_toolchain
                .map(|toolchain| (Some(toolchain.dir.clone()), toolchain.name.clone()))
                .unwrap_or((None, "".into())),
        };

        Ok(Self {
            dir,
            name,
            toolchain_dir,
            toolchain_name,
        })
    }

    pub fn dir(&self) -> &SourceDir {
        &self.dir
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn toolchain_dir(&self) -> Option<&SourceDir> {
        self.toolchain_dir.as_ref()
    }

    pub fn toolchain_name(&self) -> &str {
        &self.toolchain_name
    }

    /// Returns a label of this label's toolchain.
    pub fn toolchain_label(&self) -> Option<Label> {
        self.toolchain_dir
            .as_ref()
            .map(|dir| Self::new(dir.clone(), self.toolchain_name.clone(), None, ""))
    }

    /// Returns this label without a toolchain.
    pub fn without_toolchain(&self) -> Label {
        Self::new(self.dir.clone(), self.name.clone(), None, "")
    }

    pub fn user_visible_name(&self, include_toolchain: bool) -> String {
        let name = format!("{}:{}", self.dir.display_name(), self.name);

        match (&self.toolchain_dir, include_toolchain) {
            (Some(dir), true) => {
                format!("{}({}:{})", name, dir.display_name(), self.toolchain_name)
            }
            _ => name,
        }
    }
}

impl Display for Label {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        write!(formatter, "{}", self.user_visible_name(false))
    }
}

fn split_toolchain(input: &str) -> Result<(&str, Option<&str>), LabelError> {
    let Some(index) = input.find('(') else {
        return Ok((input, None));
    };

    match input[index + 1..].strip_suffix(')') {
        Some(toolchain) if !toolchain.is_empty() && !toolchain.contains(['(', ')']) => {
            Ok((&input[..index], Some(toolchain)))
        }
        _ => Err(LabelError::InvalidToolchain(input.into())),
    }
}

fn resolve_location(
    current_dir: &SourceDir,
    location: &str,
    input: &str,
) -> Result<(SourceDir, Arc<str>), LabelError> {
    let (dir, name) = match location.rsplit_once(':') {
        Some((dir, name)) => {
            if name.is_empty() || name.contains('/') {
                return Err(LabelError::InvalidName(input.into()));
            }

            (dir, Some(name))
        }
        None => (location, None),
    };

    let dir = if dir.is_empty() {
        current_dir.clone()
    } else {
        current_dir
            .resolve_relative_dir(dir)
            .map_err(|error| LabelError::Path(input.into(), error))?
    };
    let name = match name {
        Some(name) => name,
        None if dir.last_component().is_empty() => {
            return Err(LabelError::InvalidName(input.into()));
        }
        None => dir.last_component(),
    };

    Ok((dir.clone(), name.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn directory(path: &str) -> SourceDir {
        SourceDir::root().resolve_relative_dir(path).unwrap()
    }

    fn toolchain() -> Label {
        Label::new(directory("//toolchain"), "default", None, "")
    }

    #[test]
    fn resolve_absolute_label() {
        assert_eq!(
            Label::resolve(&directory("//foo"), Some(&toolchain()), "//bar:baz").unwrap(),
            Label::new(
                directory("//bar"),
                "baz",
                Some(directory("//toolchain")),
                "default"
            )
        );
    }

    #[test]
    fn resolve_label_with_implicit_name() {
        assert_eq!(
            Label::resolve(&directory("//foo"), None, "//bar/baz").unwrap(),
            Label::new(directory("//bar/baz"), "baz", None, "")
        );
    }

    #[test]
    fn resolve_label_in_current_directory() {
        assert_eq!(
            Label::resolve(&directory("//foo"), None, ":baz").unwrap(),
            Label::new(directory("//foo"), "baz", None, "")
        );
    }

    #[test]
    fn resolve_relative_label() {
        assert_eq!(
            Label::resolve(&directory("//foo"), None, "bar:baz").unwrap(),
            Label::new(directory("//foo/bar"), "baz", None, "")
        );
    }

    #[test]
    fn resolve_label_with_toolchain() {
        assert_eq!(
            Label::resolve(&directory("//foo"), Some(&toolchain()), ":baz(//other:tc)").unwrap(),
            Label::new(directory("//foo"), "baz", Some(directory("//other")), "tc")
        );
    }

    #[test]
    fn fail_to_resolve_invalid_labels() {
        assert_eq!(
            Label::resolve(&directory("//foo"), None, ""),
            Err(LabelError::Empty)
        );
        assert_eq!(
            Label::resolve(&directory("//foo"), None, "//bar:"),
            Err(LabelError::InvalidName("//bar:".into()))
        );
        assert_eq!(
            Label::resolve(&directory("//foo"), None, "//"),
            Err(LabelError::InvalidName("//".into()))
        );
        assert_eq!(
            Label::resolve(&directory("//foo"), None, ":bar(//tc"),
            Err(LabelError::InvalidToolchain(":bar(//tc".into()))
        );
    }

    #[test]
    fn format_user_visible_names() {
        let label =
            Label::resolve(&directory("//foo"), Some(&toolchain()), "//bar:baz").unwrap();

        assert_eq!(label.user_visible_name(false), "//bar:baz");
        assert_eq!(
            label.user_visible_name(true),
            "//bar:baz(//toolchain:default)"
        );
        assert_eq!(
            Label::new(SourceDir::root(), "foo", None, "").to_string(),
            "//:foo"
        );
    }

    #[test]
    fn get_toolchain_label() {
        let label =
            Label::resolve(&directory("//foo"), Some(&toolchain()), "//bar:baz").unwrap();

        assert_eq!(label.toolchain_label(), Some(toolchain()));
        assert_eq!(label.without_toolchain().toolchain_label(), None);
    }
}
