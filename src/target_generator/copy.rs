use super::{GenerateErrorKind, SOURCES, TargetGenerator};

pub fn generate(generator: &mut TargetGenerator) -> Result<(), GenerateErrorKind> {
    generator.fill_sources()?;

    if generator.target.sources().is_empty() {
        return Err(GenerateErrorKind::MissingValue(SOURCES));
    }

    generator.fill_outputs(true)?;

    let outputs = &generator.target.action_values().outputs;

    if outputs.patterns().len() != 1 {
        return Err(GenerateErrorKind::InvalidOutputCount(outputs.patterns().len()));
    } else if generator.target.sources().len() > 1
        && !outputs
            .required_types()
            .types()
            .any(|r#type| r#type.is_source())
    {
        return Err(GenerateErrorKind::CopyWithoutSourceExpansion);
    }

    Ok(())
}
