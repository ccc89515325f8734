use crate::{
    label::LabelError,
    path::PathError,
    substitution::{SubstitutionError, SubstitutionType},
    value::{Origin, ValueType},
};
use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GenerateErrorKind {
    BundleDirNotInRoot(String),
    BundleOutputNotInBundle(String),
    CopyWithoutSourceExpansion,
    EmptyOutput,
    ForEachWithoutSourceExpansion,
    InvalidArguments,
    InvalidOutputConversion(String),
    InvalidOutputCount(usize),
    InvalidSubstitution(SubstitutionType),
    InvalidType {
        name: String,
        expected: ValueType,
        actual: ValueType,
    },
    Label(LabelError),
    MissingCrateRoot,
    MissingValue(&'static str),
    OutputNotInOutputDir(String),
    Path(PathError),
    Substitution(SubstitutionError),
    SubstitutionNotAllowed(String),
    UnknownOutputType(String),
    UnusedValue(String),
}

impl Display for GenerateErrorKind {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        match self {
            Self::BundleDirNotInRoot(dir) => write!(
                formatter,
                "bundle directory \"{dir}\" is not inside the bundle root directory"
            ),
            Self::BundleOutputNotInBundle(output) => write!(
                formatter,
                "bundle output \"{output}\" does not begin with a bundle directory expansion"
            ),
            Self::CopyWithoutSourceExpansion => write!(
                formatter,
                "copy target has more than one source but its output does not use source expansions"
            ),
            Self::EmptyOutput => write!(formatter, "output has an empty value"),
            Self::ForEachWithoutSourceExpansion => write!(
                formatter,
                "action_foreach target outputs do not use source expansions"
            ),
            Self::InvalidArguments => {
                write!(formatter, "target generator requires one string argument")
            }
            Self::InvalidOutputConversion(conversion) => {
                write!(formatter, "unknown output conversion \"{conversion}\"")
            }
            Self::InvalidOutputCount(count) => {
                write!(formatter, "target must have exactly one output but has {count}")
            }
            Self::InvalidSubstitution(r#type) => write!(
                formatter,
                "substitution {{{{{}}}}} is not valid here",
                r#type.name()
            ),
            Self::InvalidType {
                name,
                expected,
                actual,
            } => write!(
                formatter,
                "value \"{name}\" must be a {expected} but is a {actual}"
            ),
            Self::Label(error) => write!(formatter, "{error}"),
            Self::MissingCrateRoot => write!(
                formatter,
                "crate root not found; set crate_root or add lib.rs or main.rs to sources"
            ),
            Self::MissingValue(name) => write!(formatter, "value \"{name}\" is required"),
            Self::OutputNotInOutputDir(output) => write!(
                formatter,
                "file \"{output}\" is not inside the output directory; \
                 specify \"$target_out_dir/foo\" or \"{{{{source_gen_dir}}}}/foo\" instead"
            ),
            Self::Path(error) => write!(formatter, "{error}"),
            Self::Substitution(error) => write!(formatter, "{error}"),
            Self::SubstitutionNotAllowed(output) => write!(
                formatter,
                "source expansions are not allowed in \"{output}\" for this target type; \
                 express the outputs literally"
            ),
            Self::UnknownOutputType(name) => write!(formatter, "unknown target type \"{name}\""),
            Self::UnusedValue(name) => write!(
                formatter,
                "value \"{name}\" was set but never used by the target"
            ),
        }
    }
}

impl From<LabelError> for GenerateErrorKind {
    fn from(error: LabelError) -> Self {
        Self::Label(error)
    }
}

impl From<PathError> for GenerateErrorKind {
    fn from(error: PathError) -> Self {
        Self::Path(error)
    }
}

impl From<SubstitutionError> for GenerateErrorKind {
    fn from(error: SubstitutionError) -> Self {
        Self::Substitution(error)
    }
}

/// An error of a target declaration.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GenerateError {
    origin: Origin,
    kind: GenerateErrorKind,
}

impl GenerateError {
    pub fn new(origin: Origin, kind: GenerateErrorKind) -> Self {
        Self { origin, kind }
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    pub fn kind(&self) -> &GenerateErrorKind {
        &self.kind
    }
}

impl Error for GenerateError {}

impl Display for GenerateError {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        write!(formatter, "{}: {}", self.origin, self.kind)
    }
}
