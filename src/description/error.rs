use crate::{label::LabelError, path::PathError, substitution::SubstitutionError};
use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

#[derive(Debug)]
pub enum DescriptionError {
    Json(serde_json::Error),
    Label(String, LabelError),
    Path(String, PathError),
    Substitution(String, SubstitutionError),
    ToolType(String),
}

impl Error for DescriptionError {}

impl Display for DescriptionError {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        match self {
            Self::Json(error) => write!(formatter, "invalid build description: {error}"),
            Self::Label(context, error) => write!(formatter, "{error} in {context}"),
            Self::Path(context, error) => write!(formatter, "{error} in {context}"),
            Self::Substitution(context, error) => write!(formatter, "{error} in {context}"),
            Self::ToolType(message) => write!(formatter, "{message}"),
        }
    }
}

impl From<serde_json::Error> for DescriptionError {
    fn from(error: serde_json::Error) -> Self {
        Self::Json(error)
    }
}
