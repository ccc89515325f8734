use crate::{
    path::SourceDir,
    value::{Origin, Value},
};
use std::collections::BTreeMap;

/// Metadata of a target collected across targets later.
///
/// Every value is a list so that values from different targets can be
/// concatenated.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Metadata {
    contents: BTreeMap<String, Value>,
    source_dir: Option<SourceDir>,
    origin: Origin,
}

impl Metadata {
    pub fn new(contents: BTreeMap<String, Value>, source_dir: SourceDir, origin: Origin) -> Self {
        Self {
            contents,
            source_dir: Some(source_dir),
            origin,
        }
    }

    pub fn contents(&self) -> &BTreeMap<String, Value> {
        &self.contents
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.contents.get(key)
    }

    /// Returns a directory where the metadata is declared.
    pub fn source_dir(&self) -> Option<&SourceDir> {
        self.source_dir.as_ref()
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }
}
