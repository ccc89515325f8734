mod metadata;
mod output_type;
mod values;

pub use metadata::*;
pub use output_type::*;
pub use values::*;

use crate::{
    config::ConfigValues,
    label::{Label, LabelPattern},
    path::{SourceFile, SourceTypesUsed},
    value::Origin,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DepsType {
    /// Private and public dependencies
    Linked,
    /// Private, public, and data dependencies
    All,
}

/// A build target.
///
/// Its label never changes. The other fields are filled by a target generator
/// and must not be read until the target is committed to a graph.
#[derive(Clone, Debug, PartialEq)]
pub struct Target {
    label: Label,
    origin: Origin,
    output_type: OutputType,
    output_name: Option<String>,
    output_extension: Option<String>,
    sources: Vec<SourceFile>,
    all_headers_public: bool,
    public_headers: Vec<SourceFile>,
    inputs: Vec<SourceFile>,
    source_types_used: SourceTypesUsed,
    check_includes: bool,
    private_deps: Vec<Label>,
    public_deps: Vec<Label>,
    data_deps: Vec<Label>,
    configs: Vec<Label>,
    all_dependent_configs: Vec<Label>,
    public_configs: Vec<Label>,
    resolved_configs: Vec<Label>,
    config_values: ConfigValues,
    metadata: Metadata,
    visibility: Vec<LabelPattern>,
    testonly: bool,
    assert_no_deps: Vec<LabelPattern>,
    write_runtime_deps_output: Option<SourceFile>,
    data: Vec<String>,
    action_values: ActionValues,
    rust_values: RustValues,
    bundle_values: BundleValues,
    write_data_values: WriteDataValues,
}

impl Target {
    pub fn new(label: Label) -> Self {
        Self {
            label,
            origin: Default::default(),
            output_type: OutputType::Unknown,
            output_name: None,
            output_extension: None,
            sources: vec![],
            all_headers_public: true,
            public_headers: vec![],
            inputs: vec![],
            source_types_used: Default::default(),
            check_includes: true,
            private_deps: vec![],
            public_deps: vec![],
            data_deps: vec![],
            configs: vec![],
            all_dependent_configs: vec![],
            public_configs: vec![],
            resolved_configs: vec![],
            config_values: Default::default(),
            metadata: Default::default(),
            visibility: vec![LabelPattern::everything()],
            testonly: false,
            assert_no_deps: vec![],
            write_runtime_deps_output: None,
            data: vec![],
            action_values: Default::default(),
            rust_values: Default::default(),
            bundle_values: Default::default(),
            write_data_values: Default::default(),
        }
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    pub fn set_origin(&mut self, origin: Origin) {
        self.origin = origin;
    }

    pub fn output_type(&self) -> OutputType {
        self.output_type
    }

    pub fn set_output_type(&mut self, output_type: OutputType) {
        self.output_type = output_type;
    }

    pub fn is_binary(&self) -> bool {
        self.output_type.is_binary()
    }

    /// Returns an output name defaulting to the target name.
    pub fn output_name(&self) -> &str {
        self.output_name.as_deref().unwrap_or(self.label.name())
    }

    pub fn set_output_name(&mut self, name: String) {
        self.output_name = Some(name);
    }

    pub fn output_extension(&self) -> Option<&str> {
        self.output_extension.as_deref()
    }

    pub fn set_output_extension(&mut self, extension: String) {
        self.output_extension = Some(extension);
    }

    pub fn sources(&self) -> &[SourceFile] {
        &self.sources
    }

    pub fn set_sources(&mut self, sources: Vec<SourceFile>) {
        self.sources = sources;
    }

    pub fn all_headers_public(&self) -> bool {
        self.all_headers_public
    }

    pub fn public_headers(&self) -> &[SourceFile] {
        &self.public_headers
    }

    /// Sets public headers. The other headers become private.
    pub fn set_public_headers(&mut self, headers: Vec<SourceFile>) {
        self.all_headers_public = false;
        self.public_headers = headers;
    }

    pub fn inputs(&self) -> &[SourceFile] {
        &self.inputs
    }

    pub fn set_inputs(&mut self, inputs: Vec<SourceFile>) {
        self.inputs = inputs;
    }

    pub fn source_types_used(&self) -> &SourceTypesUsed {
        &self.source_types_used
    }

    pub fn source_types_used_mut(&mut self) -> &mut SourceTypesUsed {
        &mut self.source_types_used
    }

    pub fn check_includes(&self) -> bool {
        self.check_includes
    }

    pub fn set_check_includes(&mut self, check_includes: bool) {
        self.check_includes = check_includes;
    }

    pub fn private_deps(&self) -> &[Label] {
        &self.private_deps
    }

    pub fn private_deps_mut(&mut self) -> &mut Vec<Label> {
        &mut self.private_deps
    }

    pub fn public_deps(&self) -> &[Label] {
        &self.public_deps
    }

    pub fn public_deps_mut(&mut self) -> &mut Vec<Label> {
        &mut self.public_deps
    }

    pub fn data_deps(&self) -> &[Label] {
        &self.data_deps
    }

    pub fn data_deps_mut(&mut self) -> &mut Vec<Label> {
        &mut self.data_deps
    }

    pub fn deps(&self, r#type: DepsType) -> impl Iterator<Item = &Label> {
        let data_deps: &[Label] = match r#type {
            DepsType::Linked => &[],
            DepsType::All => &self.data_deps,
        };

        self.public_deps
            .iter()
            .chain(&self.private_deps)
            .chain(data_deps)
    }

    pub fn configs(&self) -> &[Label] {
        &self.configs
    }

    pub fn configs_mut(&mut self) -> &mut Vec<Label> {
        &mut self.configs
    }

    pub fn all_dependent_configs(&self) -> &[Label] {
        &self.all_dependent_configs
    }

    pub fn all_dependent_configs_mut(&mut self) -> &mut Vec<Label> {
        &mut self.all_dependent_configs
    }

    pub fn public_configs(&self) -> &[Label] {
        &self.public_configs
    }

    pub fn public_configs_mut(&mut self) -> &mut Vec<Label> {
        &mut self.public_configs
    }

    /// Returns configs applying to the target after graph resolution.
    pub fn resolved_configs(&self) -> &[Label] {
        &self.resolved_configs
    }

    pub fn set_resolved_configs(&mut self, configs: Vec<Label>) {
        self.resolved_configs = configs;
    }

    /// Returns flags set on the target itself.
    pub fn config_values(&self) -> &ConfigValues {
        &self.config_values
    }

    pub fn config_values_mut(&mut self) -> &mut ConfigValues {
        &mut self.config_values
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn set_metadata(&mut self, metadata: Metadata) {
        self.metadata = metadata;
    }

    pub fn visibility(&self) -> &[LabelPattern] {
        &self.visibility
    }

    pub fn set_visibility(&mut self, visibility: Vec<LabelPattern>) {
        self.visibility = visibility;
    }

    pub fn is_visible_to(&self, label: &Label) -> bool {
        self.visibility.iter().any(|pattern| pattern.matches(label))
    }

    pub fn testonly(&self) -> bool {
        self.testonly
    }

    pub fn set_testonly(&mut self, testonly: bool) {
        self.testonly = testonly;
    }

    pub fn assert_no_deps(&self) -> &[LabelPattern] {
        &self.assert_no_deps
    }

    pub fn set_assert_no_deps(&mut self, patterns: Vec<LabelPattern>) {
        self.assert_no_deps = patterns;
    }

    pub fn write_runtime_deps_output(&self) -> Option<&SourceFile> {
        self.write_runtime_deps_output.as_ref()
    }

    pub fn set_write_runtime_deps_output(&mut self, output: SourceFile) {
        self.write_runtime_deps_output = Some(output);
    }

    /// Returns files and directories needed at runtime.
    pub fn data(&self) -> &[String] {
        &self.data
    }

    pub fn set_data(&mut self, data: Vec<String>) {
        self.data = data;
    }

    pub fn action_values(&self) -> &ActionValues {
        &self.action_values
    }

    pub fn action_values_mut(&mut self) -> &mut ActionValues {
        &mut self.action_values
    }

    pub fn rust_values(&self) -> &RustValues {
        &self.rust_values
    }

    pub fn rust_values_mut(&mut self) -> &mut RustValues {
        &mut self.rust_values
    }

    pub fn bundle_values(&self) -> &BundleValues {
        &self.bundle_values
    }

    pub fn bundle_values_mut(&mut self) -> &mut BundleValues {
        &mut self.bundle_values
    }

    pub fn write_data_values(&self) -> &WriteDataValues {
        &self.write_data_values
    }

    pub fn write_data_values_mut(&mut self) -> &mut WriteDataValues {
        &mut self.write_data_values
    }
}
