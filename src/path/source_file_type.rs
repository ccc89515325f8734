use std::collections::BTreeSet;

/// A category of source files inferred from their extensions.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum SourceFileType {
    Unknown,
    Asm,
    C,
    Cpp,
    Header,
    ObjectiveC,
    ObjectiveCpp,
    Assembly,
    Resource,
    Object,
    ModuleDefinition,
    Rust,
    Go,
}

impl SourceFileType {
    pub fn from_path(path: &str) -> Self {
        let name = path.rsplit('/').next().unwrap_or(path);

        let Some((_, extension)) = name.rsplit_once('.') else {
            return Self::Unknown;
        };

        match extension {
            "asm" => Self::Asm,
            "c" => Self::C,
            "cc" | "cpp" | "cxx" | "c++" => Self::Cpp,
            "h" | "hh" | "hpp" | "hxx" | "inc" | "ipp" => Self::Header,
            "m" => Self::ObjectiveC,
            "mm" => Self::ObjectiveCpp,
            "s" | "S" => Self::Assembly,
            "rc" => Self::Resource,
            "o" | "obj" => Self::Object,
            "def" => Self::ModuleDefinition,
            "rs" => Self::Rust,
            "go" => Self::Go,
            _ => Self::Unknown,
        }
    }
}

/// Which source file types a target's sources use.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SourceTypesUsed {
    types: BTreeSet<SourceFileType>,
}

impl SourceTypesUsed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, r#type: SourceFileType) {
        self.types.insert(r#type);
    }

    pub fn get(&self, r#type: SourceFileType) -> bool {
        self.types.contains(&r#type)
    }

    pub fn rust_source_used(&self) -> bool {
        self.get(SourceFileType::Rust)
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
