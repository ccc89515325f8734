use crate::{
    label::{Label, LabelError},
    target_generator::GenerateError,
    value::Origin,
};
use itertools::Itertools;
use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GraphError {
    AssertNoDeps {
        target: Label,
        pattern: String,
        path: Vec<Label>,
    },
    CircularDependency(Vec<Label>),
    DuplicateConfig(Label),
    DuplicateTarget(Label),
    DuplicateToolchain(Label),
    Generate(GenerateError),
    Label(Origin, LabelError),
    MissingConfig {
        target: Label,
        config: Label,
    },
    MissingDependency {
        target: Label,
        dependency: Label,
    },
    MissingToolchain {
        target: Label,
        toolchain: Label,
    },
    Testonly {
        target: Label,
        dependency: Label,
    },
    ToolchainNotSetUp(Label),
    UnresolvedTargets(Vec<Label>),
    Visibility {
        target: Label,
        dependency: Label,
    },
}

impl Error for GraphError {}

impl Display for GraphError {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        match self {
            Self::AssertNoDeps {
                target,
                pattern,
                path,
            } => write!(
                formatter,
                "target {target} has an assert_no_deps entry \"{pattern}\" \
                 matching a dependency: {}",
                path.iter().join(" -> ")
            ),
            Self::CircularDependency(cycle) => write!(
                formatter,
                "dependency cycle detected: {}",
                cycle.iter().chain(cycle.first()).dedup().join(" -> ")
            ),
            Self::DuplicateConfig(label) => write!(formatter, "config {label} defined twice"),
            Self::DuplicateTarget(label) => write!(
                formatter,
                "target {} defined twice",
                label.user_visible_name(true)
            ),
            Self::DuplicateToolchain(label) => {
                write!(formatter, "toolchain {label} defined twice")
            }
            Self::Generate(error) => write!(formatter, "{error}"),
            Self::Label(origin, error) => write!(formatter, "{origin}: {error}"),
            Self::MissingConfig { target, config } => write!(
                formatter,
                "config {config} used by target {target} is not defined"
            ),
            Self::MissingDependency { target, dependency } => write!(
                formatter,
                "target {} depended on by {target} is not defined",
                dependency.user_visible_name(true)
            ),
            Self::MissingToolchain { target, toolchain } => write!(
                formatter,
                "toolchain {toolchain} used by target {target} is not defined"
            ),
            Self::Testonly { target, dependency } => write!(
                formatter,
                "target {target} is not testonly but depends on testonly target {dependency}"
            ),
            Self::ToolchainNotSetUp(label) => {
                write!(formatter, "toolchain {label} defined before its setup completes")
            }
            Self::UnresolvedTargets(labels) => write!(
                formatter,
                "targets never resolved: {}",
                labels.iter().join(", ")
            ),
            Self::Visibility { target, dependency } => write!(
                formatter,
                "target {dependency} is not visible from target {target}"
            ),
        }
    }
}

impl From<GenerateError> for GraphError {
    fn from(error: GenerateError) -> Self {
        Self::Generate(error)
    }
}
