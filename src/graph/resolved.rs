use crate::{
    build_settings::BuildSettings,
    config::Config,
    label::Label,
    target::{DepsType, Target},
    toolchain::Toolchain,
};
use std::collections::{BTreeMap, HashMap};

/// A validated build graph.
///
/// Every dependency, config and toolchain referred to by a target exists
/// and targets' resolved configs are filled.
#[derive(Debug)]
pub struct ResolvedGraph {
    settings: BuildSettings,
    toolchains: BTreeMap<Label, Toolchain>,
    configs: BTreeMap<Label, Config>,
    targets: Vec<Target>,
    indexes: HashMap<Label, usize>,
}

impl ResolvedGraph {
    pub(super) fn new(
        settings: BuildSettings,
        toolchains: BTreeMap<Label, Toolchain>,
        configs: BTreeMap<Label, Config>,
        targets: Vec<Target>,
        indexes: HashMap<Label, usize>,
    ) -> Self {
        Self {
            settings,
            toolchains,
            configs,
            targets,
            indexes,
        }
    }

    pub fn settings(&self) -> &BuildSettings {
        &self.settings
    }

    /// Returns targets in their definition order.
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn target(&self, label: &Label) -> Option<&Target> {
        self.indexes.get(label).map(|&index| &self.targets[index])
    }

    pub fn toolchain(&self, label: &Label) -> Option<&Toolchain> {
        self.toolchains.get(label)
    }

    pub fn toolchain_for(&self, target: &Target) -> Option<&Toolchain> {
        self.toolchain(&target.label().toolchain_label()?)
    }

    pub fn config(&self, label: &Label) -> Option<&Config> {
        self.configs.get(label)
    }

    pub fn deps<'a>(
        &'a self,
        target: &'a Target,
        r#type: DepsType,
    ) -> impl Iterator<Item = &'a Target> + 'a {
        target
            .deps(r#type)
            .filter_map(|label| self.target(label))
    }

    /// Returns configs applying to a target in order.
    pub fn resolved_configs<'a>(
        &'a self,
        target: &'a Target,
    ) -> impl Iterator<Item = &'a Config> + 'a {
        target
            .resolved_configs()
            .iter()
            .filter_map(|label| self.config(label))
    }
}
