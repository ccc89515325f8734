mod action;
mod binary;
mod bundle_data;
mod copy;
mod create_bundle;
mod error;
mod group;
mod value_extractors;
mod write_data;

pub use error::*;

use self::value_extractors::*;
use crate::{
    build_settings::BuildSettings,
    label::Label,
    path::SourceFile,
    substitution::{SubstitutionList, SubstitutionPattern, SubstitutionRange},
    target::{Metadata, OutputType, Target},
    value::{Origin, Scope, Value, ValueType},
};

const ALL_DEPENDENT_CONFIGS: &str = "all_dependent_configs";
const ASSERT_NO_DEPS: &str = "assert_no_deps";
const CHECK_INCLUDES: &str = "check_includes";
const CONFIGS: &str = "configs";
const DATA: &str = "data";
const DATA_DEPS: &str = "data_deps";
const DATA_DEPS_LEGACY: &str = "datadeps";
const DEPS: &str = "deps";
const INPUTS: &str = "inputs";
const METADATA: &str = "metadata";
const OUTPUTS: &str = "outputs";
const PUBLIC: &str = "public";
const PUBLIC_CONFIGS: &str = "public_configs";
const PUBLIC_DEPS: &str = "public_deps";
const SOURCES: &str = "sources";
const TESTONLY: &str = "testonly";
const VISIBILITY: &str = "visibility";
const WRITE_RUNTIME_DEPS: &str = "write_runtime_deps";

/// A result of a target declaration.
#[derive(Debug)]
pub enum GeneratedTarget {
    Complete(Target),
    /// A target waiting for opaque values in its scope to be resolved.
    Deferred(DeferredTarget),
}

/// A target suspended after its first pass together with its scope.
#[derive(Clone, Debug)]
pub struct DeferredTarget {
    target: Target,
    scope: Scope,
}

impl DeferredTarget {
    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn scope_mut(&mut self) -> &mut Scope {
        &mut self.scope
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Generation {
    Complete,
    Deferred,
}

/// Generates a target declared by a target function with its arguments.
pub fn generate_target(
    settings: &BuildSettings,
    scope: Scope,
    origin: Origin,
    function_name: &str,
    arguments: &[Value],
) -> Result<GeneratedTarget, GenerateError> {
    let error = |kind| GenerateError::new(origin.clone(), kind);

    let [Value::String(name)] = arguments else {
        return Err(error(GenerateErrorKind::InvalidArguments));
    };

    if name.is_empty() {
        return Err(error(GenerateErrorKind::InvalidArguments));
    }

    let toolchain = scope.toolchain();
    let mut target = Target::new(Label::new(
        scope.source_dir().clone(),
        name.as_str(),
        toolchain.map(|toolchain| toolchain.dir().clone()),
        toolchain.map(Label::name).unwrap_or_default(),
    ));
    target.set_origin(origin.clone());
    target.set_output_type(OutputType::from_function_name(function_name).ok_or_else(|| {
        error(GenerateErrorKind::UnknownOutputType(function_name.into()))
    })?);

    match generate_specific_target(settings, &scope, true, &mut target)? {
        Generation::Complete => Ok(GeneratedTarget::Complete(target)),
        Generation::Deferred => Ok(GeneratedTarget::Deferred(DeferredTarget { target, scope })),
    }
}

/// Resumes generation of a deferred target after its opaque values are
/// resolved.
pub fn resume_target(
    settings: &BuildSettings,
    deferred: DeferredTarget,
) -> Result<Target, GenerateError> {
    let DeferredTarget { mut target, scope } = deferred;

    match generate_specific_target(settings, &scope, false, &mut target)? {
        Generation::Complete => Ok(target),
        Generation::Deferred => unreachable!("target deferred twice"),
    }
}

fn generate_specific_target(
    settings: &BuildSettings,
    scope: &Scope,
    first_run: bool,
    target: &mut Target,
) -> Result<Generation, GenerateError> {
    let origin = target.origin().clone();

    TargetGenerator {
        target,
        scope,
        settings,
    }
    .run(first_run)
    .map_err(|kind| GenerateError::new(origin, kind))
}

struct TargetGenerator<'a> {
    target: &'a mut Target,
    scope: &'a Scope,
    settings: &'a BuildSettings,
}

impl<'a> TargetGenerator<'a> {
    fn run(&mut self, first_run: bool) -> Result<Generation, GenerateErrorKind> {
        // Dependencies, configs, metadata, and visibility must be concrete
        // values to trigger resolution of dependencies.
        if first_run {
            self.fill_dependent_configs()?;
            self.fill_dependencies()?;

            if self.target.is_binary() {
                self.fill_configs()?;
            }

            self.fill_metadata()?;
            self.fill_visibility()?;
        }

        if first_run && self.scope.contains_opaque() {
            // Values are used on resumption.
            self.scope.mark_all_used();

            return Ok(Generation::Deferred);
        }

        self.fill_data()?;
        self.fill_testonly()?;
        self.fill_assert_no_deps()?;
        self.fill_write_runtime_deps()?;

        self.generate_specific()?;
        self.check_unused_values()?;

        Ok(Generation::Complete)
    }

    fn generate_specific(&mut self) -> Result<(), GenerateErrorKind> {
        match self.target.output_type() {
            OutputType::BundleData => bundle_data::generate(self),
            OutputType::CreateBundle => create_bundle::generate(self),
            OutputType::CopyFiles => copy::generate(self),
            OutputType::Action | OutputType::ActionForEach => action::generate(self),
            OutputType::Group => group::generate(self),
            OutputType::Executable
            | OutputType::LoadableModule
            | OutputType::SharedLibrary
            | OutputType::SourceSet
            | OutputType::StaticLibrary => binary::generate(self),
            OutputType::WriteData => write_data::generate(self),
            OutputType::Unknown => Err(GenerateErrorKind::UnknownOutputType(
                self.target.output_type().name().into(),
            )),
        }
    }

    fn value(&self, name: &str) -> Option<&'a Value> {
        self.scope.get_value(name, true)
    }

    fn check_unused_values(&self) -> Result<(), GenerateErrorKind> {
        if let Some(name) = self.scope.unused_names().first() {
            return Err(GenerateErrorKind::UnusedValue((*name).into()));
        }

        Ok(())
    }

    fn fill_sources(&mut self) -> Result<(), GenerateErrorKind> {
        if let Some(value) = self.value(SOURCES) {
            let sources = extract_list_of_relative_files(SOURCES, value, self.scope.source_dir())?;
            self.target.set_sources(sources);
        }

        Ok(())
    }

    fn fill_public(&mut self) -> Result<(), GenerateErrorKind> {
        if let Some(value) = self.value(PUBLIC) {
            let headers = extract_list_of_relative_files(PUBLIC, value, self.scope.source_dir())?;
            self.target.set_public_headers(headers);
        }

        Ok(())
    }

    fn fill_inputs(&mut self) -> Result<(), GenerateErrorKind> {
        if let Some(value) = self.value(INPUTS) {
            let inputs = extract_list_of_relative_files(INPUTS, value, self.scope.source_dir())?;
            self.target.set_inputs(inputs);
        }

        Ok(())
    }

    fn fill_check_includes(&mut self) -> Result<(), GenerateErrorKind> {
        if let Some(value) = self.value(CHECK_INCLUDES) {
            self.target
                .set_check_includes(extract_boolean(CHECK_INCLUDES, value)?);
        }

        Ok(())
    }

    fn fill_configs(&mut self) -> Result<(), GenerateErrorKind> {
        let configs = self.fill_generic_configs(CONFIGS)?;
        self.target.configs_mut().extend(configs);

        Ok(())
    }

    fn fill_dependent_configs(&mut self) -> Result<(), GenerateErrorKind> {
        let configs = self.fill_generic_configs(ALL_DEPENDENT_CONFIGS)?;
        self.target.all_dependent_configs_mut().extend(configs);

        let configs = self.fill_generic_configs(PUBLIC_CONFIGS)?;
        self.target.public_configs_mut().extend(configs);

        Ok(())
    }

    fn fill_dependencies(&mut self) -> Result<(), GenerateErrorKind> {
        let deps = self.fill_generic_deps(DEPS)?;
        self.target.private_deps_mut().extend(deps);

        let deps = self.fill_generic_deps(PUBLIC_DEPS)?;
        self.target.public_deps_mut().extend(deps);

        let deps = self.fill_generic_deps(DATA_DEPS)?;
        self.target.data_deps_mut().extend(deps);

        // The legacy name is ignored if the current one is set even as an
        // empty list.
        if self.scope.get_value(DATA_DEPS, false).is_some() {
            self.scope.get_value(DATA_DEPS_LEGACY, true);
        } else {
            let deps = self.fill_generic_deps(DATA_DEPS_LEGACY)?;
            self.target.data_deps_mut().extend(deps);
        }

        Ok(())
    }

    fn fill_metadata(&mut self) -> Result<(), GenerateErrorKind> {
        let Some(value) = self.value(METADATA) else {
            return Ok(());
        };

        let contents = extract_scope(METADATA, value)?;

        for (key, value) in contents {
            expect_type(key, value, ValueType::List)?;
        }

        self.target.set_metadata(Metadata::new(
            contents.clone(),
            self.scope.source_dir().clone(),
            self.target.origin().clone(),
        ));

        Ok(())
    }

    fn fill_visibility(&mut self) -> Result<(), GenerateErrorKind> {
        if let Some(value) = self.value(VISIBILITY) {
            let patterns =
                extract_list_of_label_patterns(VISIBILITY, value, self.scope.source_dir())?;
            self.target.set_visibility(patterns);
        }

        Ok(())
    }

    fn fill_data(&mut self) -> Result<(), GenerateErrorKind> {
        let Some(value) = self.value(DATA) else {
            return Ok(());
        };

        let data = extract_list_of_strings(DATA, value)?
            .into_iter()
            .map(|input| {
                // A trailing slash marks a directory.
                self.scope
                    .source_dir()
                    .resolve_relative_as(!input.ends_with('/'), input)
            })
            .collect::<Result<_, _>>()?;

        self.target.set_data(data);

        Ok(())
    }

    fn fill_testonly(&mut self) -> Result<(), GenerateErrorKind> {
        if let Some(value) = self.value(TESTONLY) {
            self.target.set_testonly(extract_boolean(TESTONLY, value)?);
        }

        Ok(())
    }

    fn fill_assert_no_deps(&mut self) -> Result<(), GenerateErrorKind> {
        if let Some(value) = self.value(ASSERT_NO_DEPS) {
            let patterns =
                extract_list_of_label_patterns(ASSERT_NO_DEPS, value, self.scope.source_dir())?;
            self.target.set_assert_no_deps(patterns);
        }

        Ok(())
    }

    fn fill_write_runtime_deps(&mut self) -> Result<(), GenerateErrorKind> {
        if let Some(value) = self.value(WRITE_RUNTIME_DEPS) {
            let file = self.extract_output_file(WRITE_RUNTIME_DEPS, value)?;
            self.target.set_write_runtime_deps_output(file);
        }

        Ok(())
    }

    /// Fills outputs validating that they are in an output directory.
    fn fill_outputs(&mut self, allow_substitutions: bool) -> Result<(), GenerateErrorKind> {
        let Some(value) = self.value(OUTPUTS) else {
            return Ok(());
        };

        let strings = extract_list_of_strings(OUTPUTS, value)?;
        let outputs = SubstitutionList::parse(strings.iter().copied())?;

        for (pattern, string) in outputs.patterns().iter().zip(&strings) {
            if !allow_substitutions && pattern.required_types().next().is_some() {
                return Err(GenerateErrorKind::SubstitutionNotAllowed((*string).into()));
            } else if let Some(r#type) = pattern
                .required_types()
                .find(|r#type| !r#type.is_valid_for_outputs())
            {
                return Err(GenerateErrorKind::InvalidSubstitution(r#type));
            }

            self.ensure_substitution_in_output_dir(pattern, string)?;
        }

        self.target.action_values_mut().outputs = outputs;

        Ok(())
    }

    fn ensure_substitution_in_output_dir(
        &self,
        pattern: &SubstitutionPattern,
        original: &str,
    ) -> Result<(), GenerateErrorKind> {
        match pattern.ranges().first() {
            None => Err(GenerateErrorKind::EmptyOutput),
            Some(SubstitutionRange::Literal(literal)) => {
                self.ensure_string_in_output_dir(literal)
            }
            Some(SubstitutionRange::Placeholder(r#type)) => {
                if r#type.is_in_output_dir() {
                    Ok(())
                } else {
                    Err(GenerateErrorKind::OutputNotInOutputDir(original.into()))
                }
            }
        }
    }

    fn ensure_string_in_output_dir(&self, path: &str) -> Result<(), GenerateErrorKind> {
        if self.settings.is_in_build_dir(path) {
            Ok(())
        } else {
            Err(GenerateErrorKind::OutputNotInOutputDir(path.into()))
        }
    }

    fn extract_output_file(
        &self,
        name: &str,
        value: &Value,
    ) -> Result<SourceFile, GenerateErrorKind> {
        let file = extract_relative_file(name, value, self.scope.source_dir())?;

        self.ensure_string_in_output_dir(file.value())?;

        Ok(file)
    }

    fn fill_generic_configs(&self, name: &str) -> Result<Vec<Label>, GenerateErrorKind> {
        self.value(name)
            .map(|value| {
                extract_list_of_unique_labels(
                    name,
                    value,
                    self.scope.source_dir(),
                    self.scope.toolchain(),
                )
            })
            .transpose()
            .map(Option::unwrap_or_default)
    }

    fn fill_generic_deps(&self, name: &str) -> Result<Vec<Label>, GenerateErrorKind> {
        self.value(name)
            .map(|value| {
                extract_list_of_labels(name, value, self.scope.source_dir(), self.scope.toolchain())
            })
            .transpose()
            .map(Option::unwrap_or_default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        path::{PathError, SourceDir},
        substitution::SubstitutionType,
        value::OpaqueValue,
    };
    use pretty_assertions::assert_eq;

    fn settings() -> BuildSettings {
        BuildSettings::new(
            "/src".into(),
            SourceDir::root().resolve_relative_dir("out").unwrap(),
        )
    }

    fn directory() -> SourceDir {
        SourceDir::root().resolve_relative_dir("foo").unwrap()
    }

    fn label(name: &str) -> Label {
        Label::new(directory(), name, None, "")
    }

    fn strings(strings: &[&str]) -> Value {
        Value::List(
            strings
                .iter()
                .map(|string| Value::String((*string).into()))
                .collect(),
        )
    }

    fn scope(values: Vec<(&str, Value)>) -> Scope {
        Scope::new(
            directory(),
            None,
            values
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        )
    }

    fn generate(
        function_name: &str,
        values: Vec<(&str, Value)>,
    ) -> Result<GeneratedTarget, GenerateError> {
        generate_target(
            &settings(),
            scope(values),
            Origin::new("//foo/BUILD.gn:1"),
            function_name,
            &[Value::String("bar".into())],
        )
    }

    fn generate_complete(function_name: &str, values: Vec<(&str, Value)>) -> Target {
        match generate(function_name, values).unwrap() {
            GeneratedTarget::Complete(target) => target,
            GeneratedTarget::Deferred(_) => panic!("target deferred"),
        }
    }

    fn generate_error(function_name: &str, values: Vec<(&str, Value)>) -> GenerateErrorKind {
        generate(function_name, values).unwrap_err().kind().clone()
    }

    #[test]
    fn generate_group() {
        let target = generate_complete(
            "group",
            vec![
                ("deps", strings(&[":baz"])),
                ("public_deps", strings(&["//qux"])),
                ("testonly", Value::Boolean(true)),
            ],
        );

        assert_eq!(target.label(), &label("bar"));
        assert_eq!(target.output_type(), OutputType::Group);
        assert_eq!(target.private_deps(), &[label("baz")]);
        assert_eq!(
            target.public_deps(),
            &[Label::new(
                SourceDir::root().resolve_relative_dir("qux").unwrap(),
                "qux",
                None,
                ""
            )]
        );
        assert!(target.testonly());
    }

    #[test]
    fn inherit_toolchain_of_scope() {
        let toolchain = Label::new(SourceDir::root(), "toolchain", None, "");
        let GeneratedTarget::Complete(target) = generate_target(
            &settings(),
            Scope::new(directory(), Some(toolchain.clone()), Default::default()),
            Origin::default(),
            "group",
            &[Value::String("bar".into())],
        )
        .unwrap() else {
            panic!("target deferred")
        };

        assert_eq!(target.label().toolchain_label(), Some(toolchain));
    }

    #[test]
    fn fail_with_invalid_arguments() {
        for arguments in [
            vec![],
            vec![Value::Integer(42)],
            vec![Value::String("".into())],
            vec![Value::String("foo".into()), Value::String("bar".into())],
        ] {
            assert_eq!(
                generate_target(
                    &settings(),
                    scope(vec![]),
                    Origin::default(),
                    "group",
                    &arguments,
                )
                .unwrap_err()
                .kind(),
                &GenerateErrorKind::InvalidArguments
            );
        }
    }

    #[test]
    fn fail_with_unknown_output_type() {
        assert_eq!(
            generate_error("foo", vec![]),
            GenerateErrorKind::UnknownOutputType("foo".into())
        );
    }

    #[test]
    fn report_origin() {
        assert_eq!(
            generate("foo", vec![]).unwrap_err().to_string(),
            "//foo/BUILD.gn:1: unknown target type \"foo\""
        );
    }

    #[test]
    fn read_legacy_data_deps() {
        let target = generate_complete("group", vec![("datadeps", strings(&[":baz"]))]);

        assert_eq!(target.data_deps(), &[label("baz")]);
    }

    #[test]
    fn prefer_canonical_data_deps() {
        let target = generate_complete(
            "group",
            vec![
                ("data_deps", strings(&[":baz"])),
                ("datadeps", Value::List(vec![])),
            ],
        );

        assert_eq!(target.data_deps(), &[label("baz")]);
    }

    #[test]
    fn ignore_legacy_data_deps_with_empty_canonical_ones() {
        let target = generate_complete(
            "group",
            vec![
                ("data_deps", Value::List(vec![])),
                ("datadeps", strings(&[":baz"])),
            ],
        );

        assert!(target.data_deps().is_empty());
    }

    #[test]
    fn fail_with_unused_value() {
        assert_eq!(
            generate_error("group", vec![("sources", strings(&["foo.rs"]))]),
            GenerateErrorKind::UnusedValue("sources".into())
        );
    }

    #[test]
    fn fill_configs_of_binary_targets_only() {
        let target = generate_complete(
            "source_set",
            vec![
                ("configs", strings(&[":baz", ":baz"])),
                ("public_configs", strings(&[":qux"])),
            ],
        );

        assert_eq!(target.configs(), &[label("baz")]);
        assert_eq!(target.public_configs(), &[label("qux")]);
        assert_eq!(
            generate_error("group", vec![("configs", strings(&[":baz"]))]),
            GenerateErrorKind::UnusedValue("configs".into())
        );
    }

    #[test]
    fn fill_metadata() {
        let target = generate_complete(
            "group",
            vec![(
                "metadata",
                Value::Scope([("baz".into(), strings(&["qux"]))].into_iter().collect()),
            )],
        );

        assert_eq!(target.metadata().get("baz"), Some(&strings(&["qux"])));
        assert_eq!(target.metadata().source_dir(), Some(&directory()));
        assert_eq!(
            target.metadata().origin(),
            &Origin::new("//foo/BUILD.gn:1")
        );
    }

    #[test]
    fn fail_with_non_list_metadata() {
        assert_eq!(
            generate_error(
                "group",
                vec![(
                    "metadata",
                    Value::Scope([("baz".into(), Value::Integer(42))].into_iter().collect()),
                )],
            ),
            GenerateErrorKind::InvalidType {
                name: "baz".into(),
                expected: ValueType::List,
                actual: ValueType::Integer,
            }
        );
    }

    #[test]
    fn fill_visibility() {
        let target = generate_complete("group", vec![("visibility", strings(&[":*"]))]);

        assert!(target.is_visible_to(&label("baz")));
        assert!(!target.is_visible_to(&Label::new(SourceDir::root(), "baz", None, "")));
    }

    #[test]
    fn defer_target_with_opaque_value() {
        let GeneratedTarget::Deferred(mut deferred) = generate(
            "group",
            vec![
                ("deps", strings(&[":baz"])),
                (
                    "data",
                    Value::List(vec![Value::Opaque(OpaqueValue::new("//foo:baz", "files"))]),
                ),
            ],
        )
        .unwrap() else {
            panic!("target not deferred")
        };

        assert_eq!(deferred.target().private_deps(), &[label("baz")]);
        assert!(deferred.target().data().is_empty());

        deferred
            .scope_mut()
            .resolve_opaque(|_| strings(&["qux.txt", "data/"]));

        let target = resume_target(&settings(), deferred).unwrap();

        assert_eq!(target.private_deps(), &[label("baz")]);
        assert_eq!(
            target.data(),
            &["//foo/qux.txt".to_owned(), "//foo/data/".to_owned()]
        );
    }

    #[test]
    fn fill_write_runtime_deps() {
        let target = generate_complete(
            "group",
            vec![("write_runtime_deps", Value::String("//out/bar.runtime_deps".into()))],
        );

        assert_eq!(
            target.write_runtime_deps_output().map(SourceFile::value),
            Some("//out/bar.runtime_deps")
        );
        assert_eq!(
            generate_error(
                "group",
                vec![("write_runtime_deps", Value::String("bar.runtime_deps".into()))],
            ),
            GenerateErrorKind::OutputNotInOutputDir("//foo/bar.runtime_deps".into())
        );
    }

    #[test]
    fn generate_action() {
        let target = generate_complete(
            "action",
            vec![
                ("script", Value::String("run.py".into())),
                ("args", strings(&["--output", "{{target_gen_dir}}/bar.txt"])),
                ("outputs", strings(&["//out/"])),
            ],
        );
        let values = target.action_values();

        assert_eq!(
            values.script.as_ref().map(SourceFile::value),
            Some("//foo/run.py")
        );
        assert_eq!(values.args.patterns().len(), 2);
        assert_eq!(
            values.outputs.patterns()[0].as_literal(),
            Some("//out/".into())
        );
    }

    #[test]
    fn fail_with_action_without_script() {
        assert_eq!(
            generate_error("action", vec![("outputs", strings(&["//out/bar"]))]),
            GenerateErrorKind::MissingValue("script")
        );
    }

    #[test]
    fn fail_with_output_outside_output_directory() {
        assert_eq!(
            generate_error(
                "action",
                vec![
                    ("script", Value::String("run.py".into())),
                    ("outputs", strings(&["//foo/bar.txt"])),
                ],
            ),
            GenerateErrorKind::OutputNotInOutputDir("//foo/bar.txt".into())
        );
    }

    #[test]
    fn fail_with_substitution_in_action_output() {
        assert_eq!(
            generate_error(
                "action",
                vec![
                    ("script", Value::String("run.py".into())),
                    ("outputs", strings(&["{{target_gen_dir}}/bar.txt"])),
                ],
            ),
            GenerateErrorKind::SubstitutionNotAllowed("{{target_gen_dir}}/bar.txt".into())
        );
    }

    #[test]
    fn generate_action_foreach() {
        let target = generate_complete(
            "action_foreach",
            vec![
                ("script", Value::String("run.py".into())),
                ("sources", strings(&["a.idl", "b.idl"])),
                ("args", strings(&["{{source}}"])),
                ("outputs", strings(&["{{source_gen_dir}}/{{source_name_part}}.h"])),
                ("depfile", Value::String("{{source_gen_dir}}/{{source_name_part}}.d".into())),
            ],
        );

        assert_eq!(target.sources().len(), 2);
        assert!(
            target
                .action_values()
                .outputs
                .required_types()
                .used(SubstitutionType::SourceNamePart)
        );
        assert!(target.action_values().depfile.is_some());
    }

    #[test]
    fn fail_with_placeholder_outside_output_directory() {
        assert_eq!(
            generate_error(
                "action_foreach",
                vec![
                    ("script", Value::String("run.py".into())),
                    ("sources", strings(&["a.idl"])),
                    ("outputs", strings(&["{{source_dir}}/{{source_name_part}}.h"])),
                ],
            ),
            GenerateErrorKind::OutputNotInOutputDir(
                "{{source_dir}}/{{source_name_part}}.h".into()
            )
        );
    }

    #[test]
    fn fail_with_action_foreach_without_source_expansion() {
        assert_eq!(
            generate_error(
                "action_foreach",
                vec![
                    ("script", Value::String("run.py".into())),
                    ("sources", strings(&["a.idl"])),
                    ("outputs", strings(&["{{target_gen_dir}}/a.h"])),
                ],
            ),
            GenerateErrorKind::ForEachWithoutSourceExpansion
        );
    }

    #[test]
    fn fail_with_invalid_output_substitution() {
        assert_eq!(
            generate_error(
                "action_foreach",
                vec![
                    ("script", Value::String("run.py".into())),
                    ("sources", strings(&["a.idl"])),
                    ("outputs", strings(&["{{root_out_dir}}/{{cflags}}"])),
                ],
            ),
            GenerateErrorKind::InvalidSubstitution(SubstitutionType::Cflags)
        );
    }

    #[test]
    fn generate_rust_executable() {
        let target = generate_complete(
            "executable",
            vec![
                ("sources", strings(&["main.rs", "foo.rs"])),
                ("rustflags", strings(&["--edition=2021"])),
                ("output_name", Value::String("baz".into())),
            ],
        );

        assert!(target.source_types_used().rust_source_used());
        assert_eq!(target.output_name(), "baz");
        assert_eq!(target.rust_values().crate_name, "bar");
        assert_eq!(
            target.rust_values().crate_root.as_ref().map(SourceFile::value),
            Some("//foo/main.rs")
        );
        assert_eq!(target.config_values().rustflags, vec!["--edition=2021"]);
    }

    #[test]
    fn use_only_source_as_crate_root() {
        let target = generate_complete(
            "static_library",
            vec![
                ("sources", strings(&["baz.rs"])),
                ("crate_name", Value::String("qux".into())),
            ],
        );

        assert_eq!(target.rust_values().crate_name, "qux");
        assert_eq!(
            target.rust_values().crate_root.as_ref().map(SourceFile::value),
            Some("//foo/baz.rs")
        );
    }

    #[test]
    fn fail_with_missing_crate_root() {
        assert_eq!(
            generate_error(
                "static_library",
                vec![("sources", strings(&["baz.rs", "qux.rs"]))],
            ),
            GenerateErrorKind::MissingCrateRoot
        );
    }

    #[test]
    fn fail_with_source_resolved_to_root() {
        assert_eq!(
            generate_error("source_set", vec![("sources", strings(&[".."]))]),
            GenerateErrorKind::Path(PathError::Directory("..".into()))
        );
    }

    #[test]
    fn make_headers_private_with_public_list() {
        let target = generate_complete(
            "source_set",
            vec![
                ("sources", strings(&["foo.c", "foo.h"])),
                ("public", strings(&["foo.h"])),
            ],
        );

        assert!(!target.all_headers_public());
        assert_eq!(target.public_headers().len(), 1);
        assert!(!target.source_types_used().rust_source_used());
    }

    #[test]
    fn generate_copy() {
        let target = generate_complete(
            "copy",
            vec![
                ("sources", strings(&["a.txt", "b.txt"])),
                ("outputs", strings(&["{{target_out_dir}}/{{source_file_part}}"])),
            ],
        );

        assert_eq!(target.action_values().outputs.patterns().len(), 1);
    }

    #[test]
    fn fail_with_copy_without_source_expansion() {
        assert_eq!(
            generate_error(
                "copy",
                vec![
                    ("sources", strings(&["a.txt", "b.txt"])),
                    ("outputs", strings(&["//out/c.txt"])),
                ],
            ),
            GenerateErrorKind::CopyWithoutSourceExpansion
        );
    }

    #[test]
    fn generate_bundle_data() {
        let target = generate_complete(
            "bundle_data",
            vec![
                ("sources", strings(&["icon.png"])),
                (
                    "outputs",
                    strings(&["{{bundle_resources_dir}}/{{source_file_part}}"]),
                ),
            ],
        );

        assert_eq!(target.output_type(), OutputType::BundleData);
        assert_eq!(
            generate_error(
                "bundle_data",
                vec![
                    ("sources", strings(&["icon.png"])),
                    ("outputs", strings(&["//out/{{source_file_part}}"])),
                ],
            ),
            GenerateErrorKind::BundleOutputNotInBundle("//out/{{source_file_part}}".into())
        );
    }

    #[test]
    fn generate_create_bundle() {
        let target = generate_complete(
            "create_bundle",
            vec![
                ("bundle_root_dir", Value::String("//out/Bar.app".into())),
                (
                    "bundle_contents_dir",
                    Value::String("//out/Bar.app/Contents".into()),
                ),
            ],
        );
        let values = target.bundle_values();
        let root_dir = SourceDir::root().resolve_relative_dir("out/Bar.app").unwrap();

        assert_eq!(values.root_dir.as_ref(), Some(&root_dir));
        assert_eq!(
            values.contents_dir.as_ref().map(SourceDir::value),
            Some("//out/Bar.app/Contents/")
        );
        assert_eq!(values.resources_dir.as_ref(), Some(&root_dir));
        assert_eq!(values.executable_dir.as_ref(), Some(&root_dir));
    }

    #[test]
    fn fail_with_bundle_directory_outside_root() {
        assert_eq!(
            generate_error(
                "create_bundle",
                vec![
                    ("bundle_root_dir", Value::String("//out/Bar.app".into())),
                    ("bundle_resources_dir", Value::String("//out/Resources".into())),
                ],
            ),
            GenerateErrorKind::BundleDirNotInRoot("//out/Resources/".into())
        );
    }

    #[test]
    fn generate_write_data() {
        let target = generate_complete(
            "write_data",
            vec![
                ("outputs", strings(&["//out/bar.json"])),
                ("contents", strings(&["baz"])),
                ("output_conversion", Value::String("json".into())),
            ],
        );

        assert_eq!(
            target.write_data_values().contents.as_ref(),
            Some(&strings(&["baz"]))
        );
        assert_eq!(target.write_data_values().output_conversion, "json");
    }

    #[test]
    fn fail_with_write_data_without_contents() {
        assert_eq!(
            generate_error("write_data", vec![("outputs", strings(&["//out/bar.json"]))]),
            GenerateErrorKind::MissingValue("contents")
        );
    }
}
