use super::{GenerateErrorKind, TargetGenerator, value_extractors::*};

const CONTENTS: &str = "contents";
const OUTPUT_CONVERSION: &str = "output_conversion";

const OUTPUT_CONVERSIONS: &[&str] = &["", "json", "list lines", "scope", "string", "value"];
const TRIM_PREFIX: &str = "trim ";

pub fn generate(generator: &mut TargetGenerator) -> Result<(), GenerateErrorKind> {
    generator.fill_outputs(false)?;

    let count = generator.target.action_values().outputs.patterns().len();

    if count != 1 {
        return Err(GenerateErrorKind::InvalidOutputCount(count));
    }

    let contents = generator
        .value(CONTENTS)
        .ok_or(GenerateErrorKind::MissingValue(CONTENTS))?
        .clone();
    let output_conversion = generator
        .value(OUTPUT_CONVERSION)
        .map(|value| extract_string(OUTPUT_CONVERSION, value))
        .transpose()?
        .unwrap_or_default();

    if !is_valid_output_conversion(output_conversion) {
        return Err(GenerateErrorKind::InvalidOutputConversion(
            output_conversion.into(),
        ));
    }

    let values = generator.target.write_data_values_mut();
    values.contents = Some(contents);
    values.output_conversion = output_conversion.into();

    Ok(())
}

fn is_valid_output_conversion(conversion: &str) -> bool {
    OUTPUT_CONVERSIONS.contains(&conversion.strip_prefix(TRIM_PREFIX).unwrap_or(conversion))
}
