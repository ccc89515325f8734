use super::{GenerateErrorKind, TargetGenerator, value_extractors::*};
use crate::target::OutputType;

const CFLAGS: &str = "cflags";
const CRATE_NAME: &str = "crate_name";
const CRATE_ROOT: &str = "crate_root";
const DEFINES: &str = "defines";
const LDFLAGS: &str = "ldflags";
const OUTPUT_EXTENSION: &str = "output_extension";
const OUTPUT_NAME: &str = "output_name";
const RUSTFLAGS: &str = "rustflags";

pub fn generate(generator: &mut TargetGenerator) -> Result<(), GenerateErrorKind> {
    generator.fill_sources()?;
    generator.fill_public()?;
    generator.fill_inputs()?;
    generator.fill_check_includes()?;
    fill_config_values(generator)?;
    fill_output_name(generator)?;
    fill_source_types_used(generator);

    if generator.target.source_types_used().rust_source_used() {
        fill_crate_name(generator)?;
        fill_crate_root(generator)?;
    }

    Ok(())
}

fn fill_config_values(generator: &mut TargetGenerator) -> Result<(), GenerateErrorKind> {
    let [rustflags, cflags, defines, ldflags] = [RUSTFLAGS, CFLAGS, DEFINES, LDFLAGS].map(|name| {
        generator
            .value(name)
            .map(|value| extract_list_of_strings(name, value))
            .transpose()
    });
    let config_values = generator.target.config_values_mut();

    for (flags, values) in [
        (&mut config_values.rustflags, rustflags?),
        (&mut config_values.cflags, cflags?),
        (&mut config_values.defines, defines?),
        (&mut config_values.ldflags, ldflags?),
    ] {
        flags.extend(values.into_iter().flatten().map(String::from));
    }

    Ok(())
}

fn fill_output_name(generator: &mut TargetGenerator) -> Result<(), GenerateErrorKind> {
    if let Some(value) = generator.value(OUTPUT_NAME) {
        let name = extract_string(OUTPUT_NAME, value)?;
        generator.target.set_output_name(name.into());
    }

    if let Some(value) = generator.value(OUTPUT_EXTENSION) {
        let extension = extract_string(OUTPUT_EXTENSION, value)?;
        generator.target.set_output_extension(extension.into());
    }

    Ok(())
}

fn fill_source_types_used(generator: &mut TargetGenerator) {
    let types = generator
        .target
        .sources()
        .iter()
        .map(|source| source.r#type())
        .collect::<Vec<_>>();

    for r#type in types {
        generator.target.source_types_used_mut().set(r#type);
    }
}

fn fill_crate_name(generator: &mut TargetGenerator) -> Result<(), GenerateErrorKind> {
    let name = if let Some(value) = generator.value(CRATE_NAME) {
        extract_string(CRATE_NAME, value)?.into()
    } else {
        generator.target.label().name().into()
    };

    generator.target.rust_values_mut().crate_name = name;

    Ok(())
}

fn fill_crate_root(generator: &mut TargetGenerator) -> Result<(), GenerateErrorKind> {
    let root = if let Some(value) = generator.value(CRATE_ROOT) {
        extract_relative_file(CRATE_ROOT, value, generator.scope.source_dir())?
    } else if let [source] = generator.target.sources() {
        source.clone()
    } else {
        let name = if generator.target.output_type() == OutputType::Executable {
            "main.rs"
        } else {
            "lib.rs"
        };

        generator
            .target
            .sources()
            .iter()
            .find(|source| source.name() == name)
            .cloned()
            .ok_or(GenerateErrorKind::MissingCrateRoot)?
    };

    generator.target.rust_values_mut().crate_root = Some(root);

    Ok(())
}
