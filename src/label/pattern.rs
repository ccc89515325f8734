use super::{Label, LabelError, split_toolchain};
use crate::path::SourceDir;
use std::fmt::{self, Display, Formatter};

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
enum LabelPatternKind {
    Everything,
    Exact(SourceDir, String),
    Directory(SourceDir),
    RecursiveDirectory(SourceDir),
}

/// A pattern matching labels, such as `//foo:*` or `//foo/*`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct LabelPattern {
    kind: LabelPatternKind,
    toolchain: Option<Label>,
}

impl LabelPattern {
    pub fn everything() -> Self {
        Self {
            kind: LabelPatternKind::Everything,
            toolchain: None,
        }
    }

    pub fn parse(current_dir: &SourceDir, input: &str) -> Result<Self, LabelError> {
        if input.is_empty() {
            return Err(LabelError::Empty);
        }

        let (location, toolchain) = split_toolchain(input)?;
        let toolchain = toolchain
            .map(|toolchain| Label::resolve(current_dir, None, toolchain))
            .transpose()?;
        let resolve_dir = |dir: &str| {
            if dir.is_empty() {
                Ok(current_dir.clone())
            } else {
                current_dir
                    .resolve_relative_dir(dir)
                    .map_err(|error| LabelError::Path(input.into(), error))
            }
        };

        let kind = if location == "*" {
            LabelPatternKind::Everything
        } else if let Some(dir) = location.strip_suffix(":*") {
            LabelPatternKind::Directory(resolve_dir(dir)?)
        } else if let Some(dir) = location.strip_suffix("*") {
            if !dir.ends_with('/') || dir.contains('*') {
                return Err(LabelError::InvalidPattern(input.into()));
            }

            LabelPatternKind::RecursiveDirectory(resolve_dir(dir)?)
        } else if location.contains('*') {
            return Err(LabelError::InvalidPattern(input.into()));
        } else {
            let label = Label::resolve(current_dir, None, location)?;

            LabelPatternKind::Exact(label.dir().clone(), label.name().into())
        };

        Ok(Self { kind, toolchain })
    }

    pub fn matches(&self, label: &Label) -> bool {
        if let Some(toolchain) = &self.toolchain {
            if label.toolchain_label().as_ref() != Some(toolchain) {
                return false;
            }
        }

        match &self.kind {
            LabelPatternKind::Everything => true,
            LabelPatternKind::Exact(dir, name) => label.dir() == dir && label.name() == name,
            LabelPatternKind::Directory(dir) => label.dir() == dir,
            LabelPatternKind::RecursiveDirectory(dir) => {
                label.dir().value().starts_with(dir.value())
            }
        }
    }
}

impl Display for LabelPattern {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        match &self.kind {
            LabelPatternKind::Everything => write!(formatter, "*")?,
            LabelPatternKind::Exact(dir, name) => {
                write!(formatter, "{}:{}", dir.display_name(), name)?
            }
            LabelPatternKind::Directory(dir) => write!(formatter, "{}:*", dir.display_name())?,
            LabelPatternKind::RecursiveDirectory(dir) => write!(formatter, "{}*", dir)?,
        }

        if let Some(toolchain) = &self.toolchain {
            write!(formatter, "({toolchain})")?;
        }

        Ok(())
    }
}
