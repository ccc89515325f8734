use crate::label::Label;

/// Flags applied to compilation and linking of targets.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ConfigValues {
    pub rustflags: Vec<String>,
    pub cflags: Vec<String>,
    pub defines: Vec<String>,
    pub ldflags: Vec<String>,
}

impl ConfigValues {
    pub fn is_empty(&self) -> bool {
        self.rustflags.is_empty()
            && self.cflags.is_empty()
            && self.defines.is_empty()
            && self.ldflags.is_empty()
    }
}

/// A named set of flags shared by targets.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    label: Label,
    values: ConfigValues,
}

impl Config {
    pub fn new(label: Label, values: ConfigValues) -> Self {
        Self { label, values }
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn values(&self) -> &ConfigValues {
        &self.values
    }
}
