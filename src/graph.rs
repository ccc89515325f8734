mod error;
mod resolved;

pub use error::*;
pub use resolved::*;

use crate::{
    build_settings::BuildSettings,
    config::Config,
    label::Label,
    target::{DepsType, Target},
    target_generator::{DeferredTarget, GeneratedTarget, generate_target, resume_target},
    toolchain::Toolchain,
    value::{Origin, Scope, Value},
};
use itertools::Itertools;
use petgraph::{
    Graph as DirectedGraph,
    algo::{tarjan_scc, toposort},
    graph::NodeIndex,
};
use std::collections::{BTreeMap, HashMap, VecDeque};

/// A state of a target definition.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TargetState {
    Committed,
    Deferred,
}

/// A build graph under construction.
///
/// Targets are stored in an arena in their definition order. Deferred targets
/// keep their slots until they are resumed.
#[derive(Debug)]
pub struct Graph {
    settings: BuildSettings,
    toolchains: BTreeMap<Label, Toolchain>,
    configs: BTreeMap<Label, Config>,
    targets: Vec<Option<Target>>,
    deferred: BTreeMap<usize, DeferredTarget>,
    indexes: HashMap<Label, usize>,
}

impl Graph {
    pub fn new(settings: BuildSettings) -> Self {
        Self {
            settings,
            toolchains: Default::default(),
            configs: Default::default(),
            targets: vec![],
            deferred: Default::default(),
            indexes: Default::default(),
        }
    }

    pub fn settings(&self) -> &BuildSettings {
        &self.settings
    }

    pub fn define_toolchain(&mut self, toolchain: Toolchain) -> Result<(), GraphError> {
        if !toolchain.is_setup_complete() {
            return Err(GraphError::ToolchainNotSetUp(toolchain.label().clone()));
        } else if self.toolchains.contains_key(toolchain.label()) {
            return Err(GraphError::DuplicateToolchain(toolchain.label().clone()));
        }

        self.toolchains.insert(toolchain.label().clone(), toolchain);

        Ok(())
    }

    pub fn define_config(&mut self, config: Config) -> Result<(), GraphError> {
        if self.configs.contains_key(config.label()) {
            return Err(GraphError::DuplicateConfig(config.label().clone()));
        }

        self.configs.insert(config.label().clone(), config);

        Ok(())
    }

    /// Defines a target and commits it unless it waits for metadata of other
    /// targets.
    pub fn define_target(
        &mut self,
        scope: Scope,
        origin: Origin,
        function_name: &str,
        arguments: &[Value],
    ) -> Result<(Label, TargetState), GraphError> {
        let generated = generate_target(&self.settings, scope, origin, function_name, arguments)?;
        let (label, state) = match &generated {
            GeneratedTarget::Complete(target) => (target.label(), TargetState::Committed),
            GeneratedTarget::Deferred(deferred) => {
                (deferred.target().label(), TargetState::Deferred)
            }
        };
        let label = label.clone();

        if self.indexes.contains_key(&label) {
            return Err(GraphError::DuplicateTarget(label));
        }

        let index = self.targets.len();
        self.indexes.insert(label.clone(), index);

        match generated {
            GeneratedTarget::Complete(target) => self.targets.push(Some(target)),
            GeneratedTarget::Deferred(deferred) => {
                self.targets.push(None);
                self.deferred.insert(index, deferred);
            }
        }

        Ok((label, state))
    }

    /// Resumes deferred targets whose referenced targets are committed until
    /// no more progress is made.
    ///
    /// It returns labels of resumed targets in their resumption order.
    pub fn resume_deferred(&mut self) -> Result<Vec<Label>, GraphError> {
        let mut resumed = vec![];
        let mut queue = self.deferred.keys().copied().collect::<VecDeque<_>>();
        let mut stalled = 0;

        // Every deferred target is visited once more after the last progress.
        while let Some(index) = queue.pop_front() {
            if stalled > queue.len() {
                break;
            }

            let Some(deferred) = self.deferred.get(&index) else {
                continue;
            };
            let labels = self.opaque_labels(deferred)?;

            if !labels
                .values()
                .all(|label| self.committed_target(label).is_some())
            {
                queue.push_back(index);
                stalled += 1;
                continue;
            }

            let Some(mut deferred) = self.deferred.remove(&index) else {
                continue;
            };

            deferred.scope_mut().resolve_opaque(|value| {
                labels
                    .get(value.target())
                    .and_then(|label| self.committed_target(label))
                    .and_then(|target| target.metadata().get(value.key()))
                    .cloned()
                    .unwrap_or_else(|| Value::List(vec![]))
            });

            let target = resume_target(&self.settings, deferred)?;

            resumed.push(target.label().clone());
            self.targets[index] = Some(target);
            stalled = 0;
        }

        Ok(resumed)
    }

    /// Resolves dependencies and configs of all targets and validates the
    /// graph.
    pub fn resolve(self) -> Result<ResolvedGraph, GraphError> {
        // Slots of targets parked or failed on resumption are empty.
        let mut unresolved = self
            .indexes
            .iter()
            .filter(|&(_, &index)| self.targets[index].is_none())
            .collect::<Vec<_>>();

        if !unresolved.is_empty() {
            unresolved.sort_by_key(|&(_, &index)| index);

            return Err(GraphError::UnresolvedTargets(
                unresolved
                    .into_iter()
                    .map(|(label, _)| label.clone())
                    .collect(),
            ));
        }

        let mut targets = self.targets.into_iter().flatten().collect::<Vec<_>>();
        let indexes = self.indexes;

        for toolchain in self.toolchains.values() {
            for dependency in toolchain.deps() {
                if !indexes.contains_key(dependency) {
                    return Err(GraphError::MissingDependency {
                        target: toolchain.label().clone(),
                        dependency: dependency.clone(),
                    });
                }
            }
        }

        for target in &targets {
            check_target(target, &targets, &indexes, &self.toolchains, &self.configs)?;
        }

        let graph = build_dependency_graph(&targets, &indexes);

        check_cycles(&graph, &targets)?;

        for target in &targets {
            check_assert_no_deps(target, &targets, &indexes)?;
        }

        // Dependencies come before their dependents.
        let order = toposort(&graph, None)
            .map_err(|cycle| {
                GraphError::CircularDependency(vec![
                    targets[graph[cycle.node_id()]].label().clone(),
                ])
            })?
            .into_iter()
            .rev()
            .map(|node| graph[node])
            .collect::<Vec<_>>();

        resolve_configs(&mut targets, &order, &indexes, &self.toolchains);

        Ok(ResolvedGraph::new(
            self.settings,
            self.toolchains,
            self.configs,
            targets,
            indexes,
        ))
    }

    fn committed_target(&self, label: &Label) -> Option<&Target> {
        self.indexes
            .get(label)
            .and_then(|&index| self.targets[index].as_ref())
    }

    fn opaque_labels(
        &self,
        deferred: &DeferredTarget,
    ) -> Result<HashMap<String, Label>, GraphError> {
        let scope = deferred.scope();

        scope
            .opaque_values()
            .into_iter()
            .map(|value| {
                Ok((
                    value.target().into(),
                    Label::resolve(scope.source_dir(), scope.toolchain(), value.target())
                        .map_err(|error| {
                            GraphError::Label(deferred.target().origin().clone(), error)
                        })?,
                ))
            })
            .collect()
    }
}

fn check_target(
    target: &Target,
    targets: &[Target],
    indexes: &HashMap<Label, usize>,
    toolchains: &BTreeMap<Label, Toolchain>,
    configs: &BTreeMap<Label, Config>,
) -> Result<(), GraphError> {
    if let Some(toolchain) = target.label().toolchain_label() {
        if !toolchains.contains_key(&toolchain) {
            return Err(GraphError::MissingToolchain {
                target: target.label().clone(),
                toolchain,
            });
        }
    }

    for config in target
        .configs()
        .iter()
        .chain(target.public_configs())
        .chain(target.all_dependent_configs())
    {
        if !configs.contains_key(config) {
            return Err(GraphError::MissingConfig {
                target: target.label().clone(),
                config: config.clone(),
            });
        }
    }

    for label in target.deps(DepsType::All) {
        let Some(&index) = indexes.get(label) else {
            return Err(GraphError::MissingDependency {
                target: target.label().clone(),
                dependency: label.clone(),
            });
        };
        let dependency = &targets[index];

        if !dependency.is_visible_to(target.label()) {
            return Err(GraphError::Visibility {
                target: target.label().clone(),
                dependency: label.clone(),
            });
        } else if dependency.testonly() && !target.testonly() {
            return Err(GraphError::Testonly {
                target: target.label().clone(),
                dependency: label.clone(),
            });
        }
    }

    Ok(())
}

fn build_dependency_graph(
    targets: &[Target],
    indexes: &HashMap<Label, usize>,
) -> DirectedGraph<usize, ()> {
    let mut graph = DirectedGraph::<usize, ()>::new();

    for index in 0..targets.len() {
        graph.add_node(index);
    }

    for (index, target) in targets.iter().enumerate() {
        for label in target.deps(DepsType::All) {
            graph.add_edge(NodeIndex::new(index), NodeIndex::new(indexes[label]), ());
        }
    }

    graph
}

fn check_cycles(graph: &DirectedGraph<usize, ()>, targets: &[Target]) -> Result<(), GraphError> {
    for mut component in tarjan_scc(graph) {
        let Some(&node) = component.first() else {
            continue;
        };

        if component.len() > 1 || graph.contains_edge(node, node) {
            component.sort();

            return Err(GraphError::CircularDependency(
                component
                    .into_iter()
                    .map(|node| targets[graph[node]].label().clone())
                    .collect(),
            ));
        }
    }

    Ok(())
}

fn check_assert_no_deps(
    target: &Target,
    targets: &[Target],
    indexes: &HashMap<Label, usize>,
) -> Result<(), GraphError> {
    if target.assert_no_deps().is_empty() {
        return Ok(());
    }

    let mut parents = HashMap::<usize, Option<usize>>::new();
    let mut queue = VecDeque::new();

    parents.insert(indexes[target.label()], None);
    queue.push_back(indexes[target.label()]);

    while let Some(index) = queue.pop_front() {
        for label in targets[index].deps(DepsType::All) {
            let dependency = indexes[label];

            if parents.contains_key(&dependency) {
                continue;
            }

            parents.insert(dependency, Some(index));

            if let Some(pattern) = target
                .assert_no_deps()
                .iter()
                .find(|pattern| pattern.matches(label))
            {
                let mut path = vec![label.clone()];
                let mut current = index;

                while let Some(&parent) = parents.get(&current) {
                    path.push(targets[current].label().clone());

                    let Some(parent) = parent else {
                        break;
                    };

                    current = parent;
                }

                path.reverse();

                return Err(GraphError::AssertNoDeps {
                    target: target.label().clone(),
                    pattern: pattern.to_string(),
                    path,
                });
            }

            queue.push_back(dependency);
        }
    }

    Ok(())
}

#[derive(Default)]
struct InheritedConfigs {
    public: Vec<Label>,
    all_dependent: Vec<Label>,
}

fn resolve_configs(
    targets: &mut [Target],
    order: &[usize],
    indexes: &HashMap<Label, usize>,
    toolchains: &BTreeMap<Label, Toolchain>,
) {
    let mut inherited = (0..targets.len())
        .map(|_| InheritedConfigs::default())
        .collect::<Vec<_>>();

    for &index in order {
        let target = &targets[index];
        let mut resolved = vec![];
        let mut public = vec![];
        let mut all_dependent = vec![];

        extend_unique(&mut resolved, target.configs());
        extend_unique(&mut resolved, target.public_configs());
        extend_unique(&mut resolved, target.all_dependent_configs());
        extend_unique(&mut public, target.public_configs());
        extend_unique(&mut all_dependent, target.all_dependent_configs());

        for label in target.deps(DepsType::Linked) {
            let dependency = &targets[indexes[label]];

            if !propagates_configs(target, dependency, toolchains) {
                continue;
            }

            let configs = &inherited[indexes[label]];

            extend_unique(&mut resolved, &configs.public);
            extend_unique(&mut resolved, &configs.all_dependent);
            extend_unique(&mut all_dependent, &configs.all_dependent);

            if target.public_deps().contains(label) {
                extend_unique(&mut public, &configs.public);
            }
        }

        targets[index].set_resolved_configs(resolved);
        inherited[index] = InheritedConfigs {
            public,
            all_dependent,
        };
    }
}

fn propagates_configs(
    target: &Target,
    dependency: &Target,
    toolchains: &BTreeMap<Label, Toolchain>,
) -> bool {
    let toolchain = dependency.label().toolchain_label();

    toolchain == target.label().toolchain_label()
        || toolchain
            .and_then(|label| toolchains.get(&label))
            .is_some_and(Toolchain::propagates_configs)
}

fn extend_unique(labels: &mut Vec<Label>, others: &[Label]) {
    *labels = labels.iter().chain(others).unique().cloned().collect();
}
