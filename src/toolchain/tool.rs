use crate::substitution::{
    SubstitutionBits, SubstitutionError, SubstitutionList, SubstitutionPattern,
};
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ToolType {
    Cc,
    Cxx,
    Objc,
    Objcxx,
    Rc,
    Asm,
    Rust,
    Alink,
    Solink,
    SolinkModule,
    Link,
    Stamp,
    Copy,
    CopyBundleData,
    Action,
}

impl ToolType {
    pub const COUNT: usize = 15;

    pub fn name(self) -> &'static str {
        match self {
            Self::Cc => "cc",
            Self::Cxx => "cxx",
            Self::Objc => "objc",
            Self::Objcxx => "objcxx",
            Self::Rc => "rc",
            Self::Asm => "asm",
            Self::Rust => "rust",
            Self::Alink => "alink",
            Self::Solink => "solink",
            Self::SolinkModule => "solink_module",
            Self::Link => "link",
            Self::Stamp => "stamp",
            Self::Copy => "copy",
            Self::CopyBundleData => "copy_bundle_data",
            Self::Action => "action",
        }
    }
}

impl FromStr for ToolType {
    type Err = String;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Ok(match name {
            "cc" => Self::Cc,
            "cxx" => Self::Cxx,
            "objc" => Self::Objc,
            "objcxx" => Self::Objcxx,
            "rc" => Self::Rc,
            "asm" => Self::Asm,
            "rust" => Self::Rust,
            "alink" => Self::Alink,
            "solink" => Self::Solink,
            "solink_module" => Self::SolinkModule,
            "link" => Self::Link,
            "stamp" => Self::Stamp,
            "copy" => Self::Copy,
            "copy_bundle_data" => Self::CopyBundleData,
            "action" => Self::Action,
            _ => return Err(format!("unknown tool type \"{name}\"")),
        })
    }
}

/// A command template of a toolchain.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tool {
    r#type: ToolType,
    command: SubstitutionPattern,
    description: SubstitutionPattern,
    outputs: SubstitutionList,
    sysroot: Option<String>,
}

impl Tool {
    pub fn new(
        r#type: ToolType,
        command: SubstitutionPattern,
        description: SubstitutionPattern,
        outputs: SubstitutionList,
        sysroot: Option<String>,
    ) -> Self {
        Self {
            r#type,
            command,
            description,
            outputs,
            sysroot,
        }
    }

    pub fn parse(
        r#type: ToolType,
        command: &str,
        description: &str,
        outputs: &[&str],
        sysroot: Option<String>,
    ) -> Result<Self, SubstitutionError> {
        Ok(Self::new(
            r#type,
            SubstitutionPattern::parse(command)?,
            SubstitutionPattern::parse(description)?,
            SubstitutionList::parse(outputs.iter().copied())?,
            sysroot,
        ))
    }

    pub fn r#type(&self) -> ToolType {
        self.r#type
    }

    pub fn command(&self) -> &SubstitutionPattern {
        &self.command
    }

    pub fn description(&self) -> &SubstitutionPattern {
        &self.description
    }

    pub fn outputs(&self) -> &SubstitutionList {
        &self.outputs
    }

    /// Returns a root directory of the Rust standard library.
    pub fn sysroot(&self) -> Option<&str> {
        self.sysroot.as_deref().filter(|sysroot| !sysroot.is_empty())
    }

    pub fn substitution_bits(&self) -> SubstitutionBits {
        let mut bits = self.outputs.required_types().clone();

        bits.fill(&self.command);
        bits.fill(&self.description);

        bits
    }
}
