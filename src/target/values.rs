use crate::{
    path::{SourceDir, SourceFile},
    substitution::{SubstitutionList, SubstitutionPattern},
    value::Value,
};

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ActionValues {
    pub script: Option<SourceFile>,
    pub args: SubstitutionList,
    pub outputs: SubstitutionList,
    pub depfile: Option<SubstitutionPattern>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RustValues {
    pub crate_name: String,
    pub crate_root: Option<SourceFile>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BundleValues {
    pub root_dir: Option<SourceDir>,
    pub contents_dir: Option<SourceDir>,
    pub resources_dir: Option<SourceDir>,
    pub executable_dir: Option<SourceDir>,
    pub product_type: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct WriteDataValues {
    pub contents: Option<Value>,
    pub output_conversion: String,
}
