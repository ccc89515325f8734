use super::{SubstitutionPattern, SubstitutionType};
use std::collections::BTreeSet;

/// A set of placeholder kinds used by a group of patterns.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SubstitutionBits {
    types: BTreeSet<SubstitutionType>,
}

impl SubstitutionBits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fill(&mut self, pattern: &SubstitutionPattern) {
        self.types.extend(pattern.required_types());
    }

    pub fn merge(&mut self, other: &Self) {
        self.types.extend(other.types.iter().copied());
    }

    pub fn used(&self, r#type: SubstitutionType) -> bool {
        self.types.contains(&r#type)
    }

    pub fn types(&self) -> impl Iterator<Item = SubstitutionType> + '_ {
        self.types.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
