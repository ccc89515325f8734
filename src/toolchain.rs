mod tool;

pub use tool::*;

use crate::{
    label::Label,
    path::SourceFileType,
    substitution::SubstitutionBits,
    target::{OutputType, Target},
    value::Value,
};
use std::collections::BTreeMap;

/// A named set of tools and settings shared by targets built in it.
///
/// A label of a toolchain never changes. The other fields are complete only
/// after the setup completes.
#[derive(Clone, Debug)]
pub struct Toolchain {
    label: Label,
    tools: [Option<Tool>; ToolType::COUNT],
    setup_complete: bool,
    substitution_bits: SubstitutionBits,
    deps: Vec<Label>,
    args: BTreeMap<String, Value>,
    propagates_configs: bool,
}

impl Toolchain {
    pub fn new(label: Label) -> Self {
        Self {
            label,
            tools: Default::default(),
            setup_complete: false,
            substitution_bits: Default::default(),
            deps: vec![],
            args: Default::default(),
            propagates_configs: false,
        }
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn tool(&self, r#type: ToolType) -> Option<&Tool> {
        self.tools[r#type as usize].as_ref()
    }

    pub fn set_tool(&mut self, tool: Tool) {
        assert!(
            !self.setup_complete,
            "tool set after setup of toolchain {}",
            self.label
        );

        let index = tool.r#type() as usize;

        self.tools[index] = Some(tool);
    }

    /// Completes setup of the toolchain after all tools are set.
    pub fn complete_setup(&mut self) {
        let mut bits = SubstitutionBits::new();

        for tool in self.tools.iter().flatten() {
            bits.merge(&tool.substitution_bits());
        }

        self.substitution_bits = bits;
        self.setup_complete = true;
    }

    pub fn is_setup_complete(&self) -> bool {
        self.setup_complete
    }

    pub fn substitution_bits(&self) -> &SubstitutionBits {
        debug_assert!(
            self.setup_complete,
            "substitution bits of toolchain {} queried before its setup",
            self.label
        );

        &self.substitution_bits
    }

    /// Returns targets that must be resolved before compiling any targets in
    /// the toolchain.
    pub fn deps(&self) -> &[Label] {
        &self.deps
    }

    pub fn deps_mut(&mut self) -> &mut Vec<Label> {
        &mut self.deps
    }

    /// Returns build argument overrides applied to targets in the toolchain.
    pub fn args(&self) -> &BTreeMap<String, Value> {
        &self.args
    }

    pub fn args_mut(&mut self) -> &mut BTreeMap<String, Value> {
        &mut self.args
    }

    pub fn propagates_configs(&self) -> bool {
        self.propagates_configs
    }

    pub fn set_propagates_configs(&mut self, propagates_configs: bool) {
        self.propagates_configs = propagates_configs;
    }

    pub fn tool_for_category(&self, r#type: SourceFileType) -> Option<&Tool> {
        self.tool(ToolType::from_source_type(r#type)?)
    }

    /// Returns a tool producing a final output of a target.
    ///
    /// Copy targets get the stamp tool as their final outputs are stamps of
    /// sets of copies.
    pub fn tool_for_final_output(&self, target: &Target) -> Option<&Tool> {
        self.tool(ToolType::for_final_output(target.output_type()))
    }
}

impl ToolType {
    pub fn from_source_type(r#type: SourceFileType) -> Option<Self> {
        match r#type {
            SourceFileType::C => Some(Self::Cc),
            SourceFileType::Cpp => Some(Self::Cxx),
            SourceFileType::ObjectiveC => Some(Self::Objc),
            SourceFileType::ObjectiveCpp => Some(Self::Objcxx),
            SourceFileType::Resource => Some(Self::Rc),
            SourceFileType::Asm | SourceFileType::Assembly => Some(Self::Asm),
            SourceFileType::Rust => Some(Self::Rust),
            SourceFileType::Unknown
            | SourceFileType::Header
            | SourceFileType::Object
            | SourceFileType::ModuleDefinition
            | SourceFileType::Go => None,
        }
    }

    pub fn for_final_output(r#type: OutputType) -> Self {
        match r#type {
            OutputType::Executable => Self::Link,
            OutputType::SharedLibrary => Self::Solink,
            OutputType::LoadableModule => Self::SolinkModule,
            OutputType::StaticLibrary => Self::Alink,
            OutputType::SourceSet
            | OutputType::Group
            | OutputType::Action
            | OutputType::ActionForEach
            | OutputType::CopyFiles
            | OutputType::WriteData
            | OutputType::BundleData
            | OutputType::CreateBundle => Self::Stamp,
            OutputType::Unknown => {
                unreachable!("final output tool requested for target of unknown type")
            }
        }
    }
}
