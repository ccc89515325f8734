use crate::{
    description::DescriptionError, escape::EscapeError, graph::GraphError,
    target_generator::GenerateError,
};
use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    io,
};

#[derive(Debug)]
pub enum ApplicationError {
    Description(DescriptionError),
    Escape(EscapeError),
    Generate(GenerateError),
    Graph(GraphError),
    Json(serde_json::Error),
    Other(String),
}

impl Error for ApplicationError {}

impl Display for ApplicationError {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        match self {
            Self::Description(error) => write!(formatter, "{error}"),
            Self::Escape(error) => write!(formatter, "{error}"),
            Self::Generate(error) => write!(formatter, "{error}"),
            Self::Graph(error) => write!(formatter, "{error}"),
            Self::Json(error) => write!(formatter, "{error}"),
            Self::Other(message) => write!(formatter, "{message}"),
        }
    }
}

impl From<Box<dyn Error>> for ApplicationError {
    fn from(error: Box<dyn Error>) -> Self {
        Self::Other(error.to_string())
    }
}

impl From<DescriptionError> for ApplicationError {
    fn from(error: DescriptionError) -> Self {
        Self::Description(error)
    }
}

impl From<EscapeError> for ApplicationError {
    fn from(error: EscapeError) -> Self {
        Self::Escape(error)
    }
}

impl From<GenerateError> for ApplicationError {
    fn from(error: GenerateError) -> Self {
        Self::Generate(error)
    }
}

impl From<GraphError> for ApplicationError {
    fn from(error: GraphError) -> Self {
        Self::Graph(error)
    }
}

impl From<io::Error> for ApplicationError {
    fn from(error: io::Error) -> Self {
        Self::Other(error.to_string())
    }
}

impl From<serde_json::Error> for ApplicationError {
    fn from(error: serde_json::Error) -> Self {
        Self::Json(error)
    }
}
