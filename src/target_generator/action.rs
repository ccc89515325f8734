use super::{GenerateErrorKind, OUTPUTS, SOURCES, TargetGenerator, value_extractors::*};
use crate::{
    substitution::{SubstitutionList, SubstitutionPattern},
    target::OutputType,
};

const ARGS: &str = "args";
const DEPFILE: &str = "depfile";
const SCRIPT: &str = "script";

/// Generates an `action` or `action_foreach` target.
pub fn generate(generator: &mut TargetGenerator) -> Result<(), GenerateErrorKind> {
    let for_each = generator.target.output_type() == OutputType::ActionForEach;

    generator.fill_sources()?;

    if for_each && generator.target.sources().is_empty() {
        return Err(GenerateErrorKind::MissingValue(SOURCES));
    }

    generator.fill_inputs()?;
    fill_script(generator)?;
    fill_args(generator, for_each)?;
    generator.fill_outputs(for_each)?;

    let outputs = &generator.target.action_values().outputs;

    if outputs.is_empty() {
        return Err(GenerateErrorKind::MissingValue(OUTPUTS));
    } else if for_each
        && !outputs
            .required_types()
            .types()
            .any(|r#type| r#type.is_source())
    {
        return Err(GenerateErrorKind::ForEachWithoutSourceExpansion);
    }

    fill_depfile(generator, for_each)?;

    Ok(())
}

fn fill_script(generator: &mut TargetGenerator) -> Result<(), GenerateErrorKind> {
    let value = generator
        .value(SCRIPT)
        .ok_or(GenerateErrorKind::MissingValue(SCRIPT))?;
    let script = extract_relative_file(SCRIPT, value, generator.scope.source_dir())?;

    generator.target.action_values_mut().script = Some(script);

    Ok(())
}

fn fill_args(generator: &mut TargetGenerator, for_each: bool) -> Result<(), GenerateErrorKind> {
    let Some(value) = generator.value(ARGS) else {
        return Ok(());
    };

    let strings = extract_list_of_strings(ARGS, value)?;
    let args = SubstitutionList::parse(strings.iter().copied())?;

    for (pattern, string) in args.patterns().iter().zip(&strings) {
        check_script_substitutions(pattern, string, for_each)?;
    }

    generator.target.action_values_mut().args = args;

    Ok(())
}

fn fill_depfile(generator: &mut TargetGenerator, for_each: bool) -> Result<(), GenerateErrorKind> {
    let Some(value) = generator.value(DEPFILE) else {
        return Ok(());
    };

    let string = extract_string(DEPFILE, value)?;
    let depfile = SubstitutionPattern::parse(string)?;

    check_script_substitutions(&depfile, string, for_each)?;
    generator.ensure_substitution_in_output_dir(&depfile, string)?;

    generator.target.action_values_mut().depfile = Some(depfile);

    Ok(())
}

fn check_script_substitutions(
    pattern: &SubstitutionPattern,
    string: &str,
    for_each: bool,
) -> Result<(), GenerateErrorKind> {
    for r#type in pattern.required_types() {
        if !for_each && r#type.is_source() {
            return Err(GenerateErrorKind::SubstitutionNotAllowed(string.into()));
        } else if !r#type.is_valid_for_outputs() {
            return Err(GenerateErrorKind::InvalidSubstitution(r#type));
        }
    }

    Ok(())
}
