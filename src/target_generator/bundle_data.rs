use super::{GenerateErrorKind, OUTPUTS, SOURCES, TargetGenerator, value_extractors::*};
use crate::substitution::{SubstitutionList, SubstitutionRange};

pub fn generate(generator: &mut TargetGenerator) -> Result<(), GenerateErrorKind> {
    generator.fill_sources()?;

    if generator.target.sources().is_empty() {
        return Err(GenerateErrorKind::MissingValue(SOURCES));
    }

    fill_outputs(generator)
}

// Outputs are relative to a bundle which is not known until the bundle
// target depending on this one is generated.
fn fill_outputs(generator: &mut TargetGenerator) -> Result<(), GenerateErrorKind> {
    let value = generator
        .value(OUTPUTS)
        .ok_or(GenerateErrorKind::MissingValue(OUTPUTS))?;
    let strings = extract_list_of_strings(OUTPUTS, value)?;
    let outputs = SubstitutionList::parse(strings.iter().copied())?;

    if outputs.patterns().len() != 1 {
        return Err(GenerateErrorKind::InvalidOutputCount(outputs.patterns().len()));
    }

    for (pattern, string) in outputs.patterns().iter().zip(&strings) {
        if let Some(r#type) = pattern
            .required_types()
            .find(|r#type| !r#type.is_source() && !r#type.is_bundle())
        {
            return Err(GenerateErrorKind::InvalidSubstitution(r#type));
        }

        match pattern.ranges().first() {
            Some(SubstitutionRange::Placeholder(r#type)) if r#type.is_bundle() => {}
            _ => return Err(GenerateErrorKind::BundleOutputNotInBundle((*string).into())),
        }
    }

    generator.target.action_values_mut().outputs = outputs;

    Ok(())
}
