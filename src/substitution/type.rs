use once_cell::sync::Lazy;
use std::collections::HashMap;

/// A kind of placeholders in substitution patterns.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum SubstitutionType {
    // Sources
    Source,
    SourceNamePart,
    SourceFilePart,
    SourceDir,
    SourceRootRelativeDir,
    SourceGenDir,
    SourceOutDir,
    SourceTargetRelative,

    // Targets
    Label,
    LabelName,
    RootGenDir,
    RootOutDir,
    TargetGenDir,
    TargetOutDir,
    TargetOutputName,

    // Tools
    Output,
    OutputDir,
    OutputExtension,
    Cflags,
    Defines,
    IncludeDirs,
    Ldflags,
    Libs,
    Rustflags,
    CrateName,
    Inputs,

    // Bundles
    BundleRootDir,
    BundleContentsDir,
    BundleResourcesDir,
    BundleExecutableDir,
}

const ALL_TYPES: &[SubstitutionType] = &[
    SubstitutionType::Source,
    SubstitutionType::SourceNamePart,
    SubstitutionType::SourceFilePart,
    SubstitutionType::SourceDir,
    SubstitutionType::SourceRootRelativeDir,
    SubstitutionType::SourceGenDir,
    SubstitutionType::SourceOutDir,
    SubstitutionType::SourceTargetRelative,
    SubstitutionType::Label,
    SubstitutionType::LabelName,
    SubstitutionType::RootGenDir,
    SubstitutionType::RootOutDir,
    SubstitutionType::TargetGenDir,
    SubstitutionType::TargetOutDir,
    SubstitutionType::TargetOutputName,
    SubstitutionType::Output,
    SubstitutionType::OutputDir,
    SubstitutionType::OutputExtension,
    SubstitutionType::Cflags,
    SubstitutionType::Defines,
    SubstitutionType::IncludeDirs,
    SubstitutionType::Ldflags,
    SubstitutionType::Libs,
    SubstitutionType::Rustflags,
    SubstitutionType::CrateName,
    SubstitutionType::Inputs,
    SubstitutionType::BundleRootDir,
    SubstitutionType::BundleContentsDir,
    SubstitutionType::BundleResourcesDir,
    SubstitutionType::BundleExecutableDir,
];

static TYPES_BY_NAME: Lazy<HashMap<&'static str, SubstitutionType>> = Lazy::new(|| {
    ALL_TYPES
        .iter()
        .map(|&r#type| (r#type.name(), r#type))
        .collect()
});

impl SubstitutionType {
    pub fn from_name(name: &str) -> Option<Self> {
        TYPES_BY_NAME.get(name).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::SourceNamePart => "source_name_part",
            Self::SourceFilePart => "source_file_part",
            Self::SourceDir => "source_dir",
            Self::SourceRootRelativeDir => "source_root_relative_dir",
            Self::SourceGenDir => "source_gen_dir",
            Self::SourceOutDir => "source_out_dir",
            Self::SourceTargetRelative => "source_target_relative",
            Self::Label => "label",
            Self::LabelName => "label_name",
            Self::RootGenDir => "root_gen_dir",
            Self::RootOutDir => "root_out_dir",
            Self::TargetGenDir => "target_gen_dir",
            Self::TargetOutDir => "target_out_dir",
            Self::TargetOutputName => "target_output_name",
            Self::Output => "output",
            Self::OutputDir => "output_dir",
            Self::OutputExtension => "output_extension",
            Self::Cflags => "cflags",
            Self::Defines => "defines",
            Self::IncludeDirs => "include_dirs",
            Self::Ldflags => "ldflags",
            Self::Libs => "libs",
            Self::Rustflags => "rustflags",
            Self::CrateName => "crate_name",
            Self::Inputs => "inputs",
            Self::BundleRootDir => "bundle_root_dir",
            Self::BundleContentsDir => "bundle_contents_dir",
            Self::BundleResourcesDir => "bundle_resources_dir",
            Self::BundleExecutableDir => "bundle_executable_dir",
        }
    }

    pub fn is_source(self) -> bool {
        matches!(
            self,
            Self::Source
                | Self::SourceNamePart
                | Self::SourceFilePart
                | Self::SourceDir
                | Self::SourceRootRelativeDir
                | Self::SourceGenDir
                | Self::SourceOutDir
                | Self::SourceTargetRelative
        )
    }

    pub fn is_target(self) -> bool {
        matches!(
            self,
            Self::Label
                | Self::LabelName
                | Self::RootGenDir
                | Self::RootOutDir
                | Self::TargetGenDir
                | Self::TargetOutDir
                | Self::TargetOutputName
        )
    }

    pub fn is_bundle(self) -> bool {
        matches!(
            self,
            Self::BundleRootDir
                | Self::BundleContentsDir
                | Self::BundleResourcesDir
                | Self::BundleExecutableDir
        )
    }

    /// Returns true if the placeholder can be used in outputs of targets.
    pub fn is_valid_for_outputs(self) -> bool {
        self.is_source() || self.is_target()
    }

    /// Returns true if the placeholder always expands to a path in an output
    /// directory.
    pub fn is_in_output_dir(self) -> bool {
        matches!(
            self,
            Self::SourceGenDir
                | Self::SourceOutDir
                | Self::RootGenDir
                | Self::RootOutDir
                | Self::TargetGenDir
                | Self::TargetOutDir
        )
    }
}
