use std::{
    fmt::{self, Display, Formatter},
    sync::Arc,
};

/// A location of a declaration in build descriptions.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Origin(Arc<str>);

impl Origin {
    pub fn new(location: impl Into<Arc<str>>) -> Self {
        Self(location.into())
    }

    pub fn is_unknown(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for Origin {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        if self.is_unknown() {
            write!(formatter, "<unknown>")
        } else {
            write!(formatter, "{}", self.0)
        }
    }
}
