use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SubstitutionError {
    Unknown(String),
    Unterminated(String),
}

impl Error for SubstitutionError {}

impl Display for SubstitutionError {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        match self {
            Self::Unknown(name) => write!(formatter, "unknown substitution \"{{{{{name}}}}}\""),
            Self::Unterminated(pattern) => {
                write!(formatter, "unterminated substitution in \"{pattern}\"")
            }
        }
    }
}
