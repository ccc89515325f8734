use super::GenerateErrorKind;
use crate::{
    label::{Label, LabelPattern},
    path::{SourceDir, SourceFile},
    value::{Value, ValueType},
};
use itertools::Itertools;
use std::collections::BTreeMap;

pub fn expect_type(
    name: &str,
    value: &Value,
    expected: ValueType,
) -> Result<(), GenerateErrorKind> {
    if value.r#type() == expected {
        Ok(())
    } else {
        Err(invalid_type(name, value, expected))
    }
}

pub fn extract_boolean(name: &str, value: &Value) -> Result<bool, GenerateErrorKind> {
    match value {
        Value::Boolean(boolean) => Ok(*boolean),
        _ => Err(invalid_type(name, value, ValueType::Boolean)),
    }
}

pub fn extract_string<'a>(name: &str, value: &'a Value) -> Result<&'a str, GenerateErrorKind> {
    match value {
        Value::String(string) => Ok(string),
        _ => Err(invalid_type(name, value, ValueType::String)),
    }
}

pub fn extract_list<'a>(name: &str, value: &'a Value) -> Result<&'a [Value], GenerateErrorKind> {
    match value {
        Value::List(list) => Ok(list),
        _ => Err(invalid_type(name, value, ValueType::List)),
    }
}

pub fn extract_scope<'a>(
    name: &str,
    value: &'a Value,
) -> Result<&'a BTreeMap<String, Value>, GenerateErrorKind> {
    match value {
        Value::Scope(scope) => Ok(scope),
        _ => Err(invalid_type(name, value, ValueType::Scope)),
    }
}

pub fn extract_list_of_strings<'a>(
    name: &str,
    value: &'a Value,
) -> Result<Vec<&'a str>, GenerateErrorKind> {
    extract_list(name, value)?
        .iter()
        .map(|value| extract_string(name, value))
        .collect()
}

pub fn extract_relative_file(
    name: &str,
    value: &Value,
    dir: &SourceDir,
) -> Result<SourceFile, GenerateErrorKind> {
    Ok(dir.resolve_relative_file(extract_string(name, value)?)?)
}

pub fn extract_relative_dir(
    name: &str,
    value: &Value,
    dir: &SourceDir,
) -> Result<SourceDir, GenerateErrorKind> {
    Ok(dir.resolve_relative_dir(extract_string(name, value)?)?)
}

pub fn extract_list_of_relative_files(
    name: &str,
    value: &Value,
    dir: &SourceDir,
) -> Result<Vec<SourceFile>, GenerateErrorKind> {
    extract_list(name, value)?
        .iter()
        .map(|value| extract_relative_file(name, value, dir))
        .collect()
}

pub fn extract_list_of_labels(
    name: &str,
    value: &Value,
    dir: &SourceDir,
    toolchain: Option<&Label>,
) -> Result<Vec<Label>, GenerateErrorKind> {
    extract_list_of_strings(name, value)?
        .into_iter()
        .map(|string| Label::resolve(dir, toolchain, string).map_err(From::from))
        .collect()
}

/// Extracts labels dropping duplicates but keeping their order.
pub fn extract_list_of_unique_labels(
    name: &str,
    value: &Value,
    dir: &SourceDir,
    toolchain: Option<&Label>,
) -> Result<Vec<Label>, GenerateErrorKind> {
    Ok(extract_list_of_labels(name, value, dir, toolchain)?
        .into_iter()
        .unique()
        .collect())
}

pub fn extract_list_of_label_patterns(
    name: &str,
    value: &Value,
    dir: &SourceDir,
) -> Result<Vec<LabelPattern>, GenerateErrorKind> {
    extract_list_of_strings(name, value)?
        .into_iter()
        .map(|string| LabelPattern::parse(dir, string).map_err(From::from))
        .collect()
}

fn invalid_type(name: &str, value: &Value, expected: ValueType) -> GenerateErrorKind {
    GenerateErrorKind::InvalidType {
        name: name.into(),
        expected,
        actual: value.r#type(),
    }
}
