use crate::path::PathError;
use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LabelError {
    Empty,
    InvalidName(String),
    InvalidPattern(String),
    InvalidToolchain(String),
    Path(String, PathError),
}

impl Error for LabelError {}

impl Display for LabelError {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        match self {
            Self::Empty => write!(formatter, "empty label"),
            Self::InvalidName(label) => write!(formatter, "invalid name in label \"{label}\""),
            Self::InvalidPattern(pattern) => {
                write!(formatter, "invalid label pattern \"{pattern}\"")
            }
            Self::InvalidToolchain(label) => {
                write!(formatter, "invalid toolchain in label \"{label}\"")
            }
            Self::Path(label, error) => write!(formatter, "{error} in label \"{label}\""),
        }
    }
}
