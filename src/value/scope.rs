use super::{OpaqueValue, Value};
use crate::{label::Label, path::SourceDir};
use std::{
    cell::RefCell,
    collections::{BTreeMap, BTreeSet},
};

/// A set of named values a target is declared with.
///
/// It tracks which values are read so that values with no effect can be
/// reported.
#[derive(Clone, Debug)]
pub struct Scope {
    source_dir: SourceDir,
    toolchain: Option<Label>,
    values: BTreeMap<String, Value>,
    used: RefCell<BTreeSet<String>>,
}

impl Scope {
    pub fn new(
        source_dir: SourceDir,
        toolchain: Option<Label>,
        values: BTreeMap<String, Value>,
    ) -> Self {
        Self {
            source_dir,
            toolchain,
            values,
            used: Default::default(),
        }
    }

    pub fn source_dir(&self) -> &SourceDir {
        &self.source_dir
    }

    pub fn toolchain(&self) -> Option<&Label> {
        self.toolchain.as_ref()
    }

    pub fn get_value(&self, name: &str, mark_used: bool) -> Option<&Value> {
        let value = self.values.get(name)?;

        if mark_used {
            self.used.borrow_mut().insert(name.into());
        }

        Some(value)
    }

    pub fn contains_opaque(&self) -> bool {
        self.values.values().any(Value::contains_opaque)
    }

    pub fn opaque_values(&self) -> Vec<&OpaqueValue> {
        let mut opaque_values = vec![];

        for value in self.values.values() {
            value.collect_opaque(&mut opaque_values);
        }

        opaque_values
    }

    /// Replaces opaque values with concrete ones.
    pub fn resolve_opaque(&mut self, mut resolve: impl FnMut(&OpaqueValue) -> Value) {
        for value in self.values.values_mut() {
            value.resolve_opaque(&mut resolve);
        }
    }

    pub fn mark_all_used(&self) {
        self.used
            .borrow_mut()
            .extend(self.values.keys().cloned());
    }

    pub fn unused_names(&self) -> Vec<&str> {
        let used = self.used.borrow();

        self.values
            .keys()
            .filter(|name| !used.contains(*name))
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scope(values: Vec<(&str, Value)>) -> Scope {
        Scope::new(
            SourceDir::root(),
            None,
            values
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        )
    }

    #[test]
    fn track_used_values() {
        let scope = scope(vec![
            ("foo", Value::Integer(1)),
            ("bar", Value::Integer(2)),
            ("baz", Value::Integer(3)),
        ]);

        assert_eq!(scope.get_value("foo", true), Some(&Value::Integer(1)));
        assert_eq!(scope.get_value("bar", false), Some(&Value::Integer(2)));
        assert_eq!(scope.get_value("qux", true), None);
        assert_eq!(scope.unused_names(), vec!["bar", "baz"]);

        scope.mark_all_used();

        assert!(scope.unused_names().is_empty());
    }

    #[test]
    fn resolve_opaque_values() {
        let mut scope = scope(vec![(
            "foo",
            Value::List(vec![Value::Opaque(OpaqueValue::new("//foo:bar", "baz"))]),
        )]);

        assert!(scope.contains_opaque());
        assert_eq!(
            scope.opaque_values(),
            vec![&OpaqueValue::new("//foo:bar", "baz")]
        );

        scope.resolve_opaque(|_| Value::String("qux".into()));

        assert!(!scope.contains_opaque());
        assert_eq!(
            scope.get_value("foo", false),
            Some(&Value::List(vec![Value::String("qux".into())]))
        );
    }
}
