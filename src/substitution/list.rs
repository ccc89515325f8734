use super::{SubstitutionBits, SubstitutionError, SubstitutionPattern};

/// An ordered list of substitution patterns.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SubstitutionList {
    patterns: Vec<SubstitutionPattern>,
    required_types: SubstitutionBits,
}

impl SubstitutionList {
    pub fn new(patterns: Vec<SubstitutionPattern>) -> Self {
        let mut required_types = SubstitutionBits::new();

        for pattern in &patterns {
            required_types.fill(pattern);
        }

        Self {
            patterns,
            required_types,
        }
    }

    pub fn parse<'a>(inputs: impl IntoIterator<Item = &'a str>) -> Result<Self, SubstitutionError> {
        Ok(Self::new(
            inputs
                .into_iter()
                .map(SubstitutionPattern::parse)
                .collect::<Result<_, _>>()?,
        ))
    }

    pub fn patterns(&self) -> &[SubstitutionPattern] {
        &self.patterns
    }

    pub fn required_types(&self) -> &SubstitutionBits {
        &self.required_types
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
