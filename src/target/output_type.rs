use std::fmt::{self, Display, Formatter};

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum OutputType {
    #[default]
    Unknown,
    Group,
    Executable,
    SharedLibrary,
    LoadableModule,
    StaticLibrary,
    SourceSet,
    CopyFiles,
    Action,
    ActionForEach,
    BundleData,
    CreateBundle,
    WriteData,
}

impl OutputType {
    /// Converts a name of a target function into an output type.
    pub fn from_function_name(name: &str) -> Option<Self> {
        Some(match name {
            "group" => Self::Group,
            "executable" => Self::Executable,
            "shared_library" => Self::SharedLibrary,
            "loadable_module" => Self::LoadableModule,
            "static_library" => Self::StaticLibrary,
            "source_set" => Self::SourceSet,
            "copy" => Self::CopyFiles,
            "action" => Self::Action,
            "action_foreach" => Self::ActionForEach,
            "bundle_data" => Self::BundleData,
            "create_bundle" => Self::CreateBundle,
            "write_data" => Self::WriteData,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Group => "group",
            Self::Executable => "executable",
            Self::SharedLibrary => "shared_library",
            Self::LoadableModule => "loadable_module",
            Self::StaticLibrary => "static_library",
            Self::SourceSet => "source_set",
            Self::CopyFiles => "copy",
            Self::Action => "action",
            Self::ActionForEach => "action_foreach",
            Self::BundleData => "bundle_data",
            Self::CreateBundle => "create_bundle",
            Self::WriteData => "write_data",
        }
    }

    /// Returns true if targets of the type are compiled and linked.
    pub fn is_binary(self) -> bool {
        matches!(
            self,
            Self::Executable
                | Self::SharedLibrary
                | Self::LoadableModule
                | Self::StaticLibrary
                | Self::SourceSet
        )
    }
}

impl Display for OutputType {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        write!(formatter, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_function_names() {
        for name in [
            "group",
            "executable",
            "shared_library",
            "loadable_module",
            "static_library",
            "source_set",
            "copy",
            "action",
            "action_foreach",
            "bundle_data",
            "create_bundle",
            "write_data",
        ] {
            assert_eq!(OutputType::from_function_name(name).unwrap().name(), name);
        }

        assert_eq!(OutputType::from_function_name("unknown"), None);
        assert_eq!(OutputType::from_function_name("foo"), None);
    }

    #[test]
    fn classify_binary_types() {
        assert!(OutputType::StaticLibrary.is_binary());
        assert!(OutputType::SourceSet.is_binary());
        assert!(!OutputType::Group.is_binary());
        assert!(!OutputType::CopyFiles.is_binary());
    }
}
