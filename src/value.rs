mod origin;
mod scope;

pub use origin::*;
pub use scope::*;

use serde::Deserialize;
use std::{
    collections::BTreeMap,
    fmt::{self, Display, Formatter},
    mem::take,
};

/// A value evaluated from a build description.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Value {
    Boolean(bool),
    Integer(i64),
    String(String),
    List(Vec<Value>),
    Opaque(OpaqueValue),
    Scope(BTreeMap<String, Value>),
}

impl Value {
    pub fn r#type(&self) -> ValueType {
        match self {
            Self::Boolean(_) => ValueType::Boolean,
            Self::Integer(_) => ValueType::Integer,
            Self::String(_) => ValueType::String,
            Self::List(_) => ValueType::List,
            Self::Opaque(_) => ValueType::Opaque,
            Self::Scope(_) => ValueType::Scope,
        }
    }

    pub fn contains_opaque(&self) -> bool {
        match self {
            Self::Opaque(_) => true,
            Self::List(values) => values.iter().any(Self::contains_opaque),
            Self::Scope(values) => values.values().any(Self::contains_opaque),
            Self::Boolean(_) | Self::Integer(_) | Self::String(_) => false,
        }
    }

    fn collect_opaque<'a>(&'a self, values: &mut Vec<&'a OpaqueValue>) {
        match self {
            Self::Opaque(value) => values.push(value),
            Self::List(list) => {
                for value in list {
                    value.collect_opaque(values);
                }
            }
            Self::Scope(scope) => {
                for value in scope.values() {
                    value.collect_opaque(values);
                }
            }
            Self::Boolean(_) | Self::Integer(_) | Self::String(_) => {}
        }
    }

    // Opaque elements of lists are spliced with their resolved lists.
    fn resolve_opaque(&mut self, resolve: &mut impl FnMut(&OpaqueValue) -> Value) {
        match self {
            Self::Opaque(value) => *self = resolve(value),
            Self::List(list) => {
                let mut values = Vec::with_capacity(list.len());

                for mut value in take(list) {
                    if let Self::Opaque(opaque) = &value {
                        match resolve(opaque) {
                            Self::List(resolved) => values.extend(resolved),
                            resolved => values.push(resolved),
                        }
                    } else {
                        value.resolve_opaque(resolve);
                        values.push(value);
                    }
                }

                *list = values;
            }
            Self::Scope(scope) => {
                for value in scope.values_mut() {
                    value.resolve_opaque(resolve);
                }
            }
            Self::Boolean(_) | Self::Integer(_) | Self::String(_) => {}
        }
    }
}

/// A value not known until another target is resolved.
///
/// It refers to a metadata entry of the other target.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OpaqueValue {
    #[serde(rename = "$target")]
    target: String,
    #[serde(rename = "$key")]
    key: String,
}

impl OpaqueValue {
    pub fn new(target: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            key: key.into(),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValueType {
    Boolean,
    Integer,
    String,
    List,
    Opaque,
    Scope,
}

impl Display for ValueType {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        write!(
            formatter,
            "{}",
            match self {
                Self::Boolean => "boolean",
                Self::Integer => "integer",
                Self::String => "string",
                Self::List => "list",
                Self::Opaque => "opaque",
                Self::Scope => "scope",
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn deserialize_values() {
        assert_eq!(
            serde_json::from_str::<Value>(r#"[true, 42, "foo", {"bar": []}]"#).unwrap(),
            Value::List(vec![
                Value::Boolean(true),
                Value::Integer(42),
                Value::String("foo".into()),
                Value::Scope([("bar".into(), Value::List(vec![]))].into_iter().collect()),
            ])
        );
    }

    #[test]
    fn deserialize_opaque_value() {
        assert_eq!(
            serde_json::from_str::<Value>(r#"{"$target": "//foo:bar", "$key": "baz"}"#).unwrap(),
            Value::Opaque(OpaqueValue::new("//foo:bar", "baz"))
        );
    }

    #[test]
    fn detect_nested_opaque_value() {
        let value = Value::List(vec![Value::Scope(
            [(
                "foo".into(),
                Value::Opaque(OpaqueValue::new("//foo:bar", "baz")),
            )]
            .into_iter()
            .collect(),
        )]);

        assert!(value.contains_opaque());
        assert!(!Value::List(vec![Value::Integer(0)]).contains_opaque());
    }

    #[test]
    fn splice_resolved_lists_into_lists() {
        let mut value = Value::List(vec![
            Value::String("foo".into()),
            Value::Opaque(OpaqueValue::new(":bar", "baz")),
            Value::List(vec![Value::Opaque(OpaqueValue::new(":qux", "baz"))]),
        ]);

        value.resolve_opaque(&mut |opaque| {
            Value::List(vec![Value::String(opaque.target().into())])
        });

        assert_eq!(
            value,
            Value::List(vec![
                Value::String("foo".into()),
                Value::String(":bar".into()),
                Value::List(vec![Value::String(":qux".into())]),
            ])
        );
    }

    #[test]
    fn replace_opaque_value_outside_lists() {
        let mut value = Value::Scope(
            [("foo".into(), Value::Opaque(OpaqueValue::new(":bar", "baz")))]
                .into_iter()
                .collect(),
        );

        value.resolve_opaque(&mut |_| Value::List(vec![Value::Integer(42)]));

        assert_eq!(
            value,
            Value::Scope(
                [("foo".into(), Value::List(vec![Value::Integer(42)]))]
                    .into_iter()
                    .collect()
            )
        );
    }
}
