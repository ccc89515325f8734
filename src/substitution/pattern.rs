use super::{SubstitutionError, SubstitutionType};
use std::fmt::{self, Display, Formatter};

const OPENING: &str = "{{";
const CLOSING: &str = "}}";

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum SubstitutionRange {
    Literal(String),
    Placeholder(SubstitutionType),
}

/// A string template of literals and `{{placeholder}}`s.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct SubstitutionPattern {
    ranges: Vec<SubstitutionRange>,
}

impl SubstitutionPattern {
    pub fn new(ranges: Vec<SubstitutionRange>) -> Self {
        Self { ranges }
    }

    pub fn parse(input: &str) -> Result<Self, SubstitutionError> {
        let mut ranges = vec![];
        let mut rest = input;

        while !rest.is_empty() {
            let Some(start) = rest.find(OPENING) else {
                ranges.push(SubstitutionRange::Literal(rest.into()));
                break;
            };

            if start > 0 {
                ranges.push(SubstitutionRange::Literal(rest[..start].into()));
            }

            let placeholder = &rest[start + OPENING.len()..];
            let end = placeholder
                .find(CLOSING)
                .ok_or_else(|| SubstitutionError::Unterminated(input.into()))?;
            let name = &placeholder[..end];

            ranges.push(SubstitutionRange::Placeholder(
                SubstitutionType::from_name(name)
                    .ok_or_else(|| SubstitutionError::Unknown(name.into()))?,
            ));

            rest = &placeholder[end + CLOSING.len()..];
        }

        Ok(Self { ranges })
    }

    pub fn ranges(&self) -> &[SubstitutionRange] {
        &self.ranges
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn required_types(&self) -> impl Iterator<Item = SubstitutionType> + '_ {
        self.ranges.iter().filter_map(|range| match range {
            SubstitutionRange::Literal(_) => None,
            SubstitutionRange::Placeholder(r#type) => Some(*r#type),
        })
    }

    /// Returns the string if the pattern has no placeholder.
    pub fn as_literal(&self) -> Option<String> {
        self.ranges
            .iter()
            .map(|range| match range {
                SubstitutionRange::Literal(literal) => Some(literal.as_str()),
                SubstitutionRange::Placeholder(_) => None,
            })
            .collect()
    }
}

impl Display for SubstitutionPattern {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        for range in &self.ranges {
            match range {
                SubstitutionRange::Literal(literal) => write!(formatter, "{literal}")?,
                SubstitutionRange::Placeholder(r#type) => {
                    write!(formatter, "{OPENING}{}{CLOSING}", r#type.name())?
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_empty_pattern() {
        assert!(SubstitutionPattern::parse("").unwrap().is_empty());
    }

    #[test]
    fn parse_literal() {
        assert_eq!(
            SubstitutionPattern::parse("//out/foo").unwrap().ranges(),
            &[SubstitutionRange::Literal("//out/foo".into())]
        );
    }

    #[test]
    fn parse_placeholders() {
        let pattern = SubstitutionPattern::parse("{{source_gen_dir}}/{{source_name_part}}.h")
            .unwrap();

        assert_eq!(
            pattern.ranges(),
            &[
                SubstitutionRange::Placeholder(SubstitutionType::SourceGenDir),
                SubstitutionRange::Literal("/".into()),
                SubstitutionRange::Placeholder(SubstitutionType::SourceNamePart),
                SubstitutionRange::Literal(".h".into()),
            ]
        );
        assert_eq!(
            pattern.to_string(),
            "{{source_gen_dir}}/{{source_name_part}}.h"
        );
        assert_eq!(pattern.as_literal(), None);
    }

    #[test]
    fn fail_to_parse_unknown_placeholder() {
        assert_eq!(
            SubstitutionPattern::parse("{{foo}}"),
            Err(SubstitutionError::Unknown("foo".into()))
        );
    }

    #[test]
    fn fail_to_parse_unterminated_placeholder() {
        assert_eq!(
            SubstitutionPattern::parse("foo{{source"),
            Err(SubstitutionError::Unterminated("foo{{source".into()))
        );
    }

    #[test]
    fn convert_literal_pattern() {
        assert_eq!(
            SubstitutionPattern::parse("foo").unwrap().as_literal(),
            Some("foo".into())
        );
    }
}
