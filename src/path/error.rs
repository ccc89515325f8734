use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PathError {
    AboveSourceRoot(String),
    Directory(String),
    Empty,
}

impl Error for PathError {}

impl Display for PathError {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        match self {
            Self::AboveSourceRoot(path) => {
                write!(formatter, "path \"{path}\" goes above the source root")
            }
            Self::Directory(path) => {
                write!(formatter, "\"{path}\" is a directory but a file is expected")
            }
            Self::Empty => write!(formatter, "empty path"),
        }
    }
}
