use super::{GenerateErrorKind, TargetGenerator, value_extractors::*};
use crate::path::SourceDir;

const BUNDLE_CONTENTS_DIR: &str = "bundle_contents_dir";
const BUNDLE_EXECUTABLE_DIR: &str = "bundle_executable_dir";
const BUNDLE_RESOURCES_DIR: &str = "bundle_resources_dir";
const BUNDLE_ROOT_DIR: &str = "bundle_root_dir";
const PRODUCT_TYPE: &str = "product_type";

pub fn generate(generator: &mut TargetGenerator) -> Result<(), GenerateErrorKind> {
    let value = generator
        .value(BUNDLE_ROOT_DIR)
        .ok_or(GenerateErrorKind::MissingValue(BUNDLE_ROOT_DIR))?;
    let root_dir = extract_relative_dir(BUNDLE_ROOT_DIR, value, generator.scope.source_dir())?;

    generator.ensure_string_in_output_dir(root_dir.value())?;

    let contents_dir = fill_bundle_dir(generator, BUNDLE_CONTENTS_DIR, &root_dir)?;
    let resources_dir = fill_bundle_dir(generator, BUNDLE_RESOURCES_DIR, &root_dir)?;
    let executable_dir = fill_bundle_dir(generator, BUNDLE_EXECUTABLE_DIR, &root_dir)?;
    let product_type = generator
        .value(PRODUCT_TYPE)
        .map(|value| extract_string(PRODUCT_TYPE, value))
        .transpose()?
        .map(String::from);

    let values = generator.target.bundle_values_mut();
    values.root_dir = Some(root_dir);
    values.contents_dir = Some(contents_dir);
    values.resources_dir = Some(resources_dir);
    values.executable_dir = Some(executable_dir);
    values.product_type = product_type;

    Ok(())
}

fn fill_bundle_dir(
    generator: &TargetGenerator,
    name: &str,
    root_dir: &SourceDir,
) -> Result<SourceDir, GenerateErrorKind> {
    let Some(value) = generator.value(name) else {
        return Ok(root_dir.clone());
    };

    let dir = extract_relative_dir(name, value, generator.scope.source_dir())?;

    if dir.value().starts_with(root_dir.value()) {
        Ok(dir)
    } else {
        Err(GenerateErrorKind::BundleDirNotInRoot(dir.value().into()))
    }
}
