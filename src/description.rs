mod error;

pub use error::*;

use crate::{
    build_settings::BuildSettings,
    config::{Config, ConfigValues},
    context::Context,
    debug,
    error::ApplicationError,
    graph::{Graph, TargetState},
    label::Label,
    path::SourceDir,
    toolchain::{Tool, ToolType, Toolchain},
    value::{Origin, Scope, Value},
};
use serde::Deserialize;
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    str::FromStr,
};

const BUILD_FILE_NAME: &str = "BUILD.gn";

/// An evaluated build description.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Description {
    root_path: PathBuf,
    build_dir: String,
    default_toolchain: String,
    #[serde(default)]
    toolchains: Vec<ToolchainDescription>,
    #[serde(default)]
    configs: Vec<ConfigDescription>,
    #[serde(default)]
    targets: Vec<TargetDescription>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ToolchainDescription {
    label: String,
    #[serde(default)]
    tools: BTreeMap<String, ToolDescription>,
    #[serde(default)]
    deps: Vec<String>,
    #[serde(default)]
    args: BTreeMap<String, Value>,
    #[serde(default)]
    propagates_configs: bool,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ToolDescription {
    command: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    outputs: Vec<String>,
    sysroot: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigDescription {
    label: String,
    #[serde(default)]
    rustflags: Vec<String>,
    #[serde(default)]
    cflags: Vec<String>,
    #[serde(default)]
    defines: Vec<String>,
    #[serde(default)]
    ldflags: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TargetDescription {
    function: String,
    #[serde(default)]
    args: Vec<Value>,
    directory: String,
    toolchain: Option<String>,
    origin: Option<String>,
    #[serde(default)]
    values: BTreeMap<String, Value>,
}

impl Description {
    pub fn parse(source: &str) -> Result<Self, DescriptionError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Returns a build directory relative to a root directory.
    pub fn build_dir(&self) -> &str {
        &self.build_dir
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    pub fn settings(&self) -> Result<BuildSettings, DescriptionError> {
        Ok(BuildSettings::new(
            self.root_path.clone(),
            SourceDir::root()
                .resolve_relative_dir(&self.build_dir)
                .map_err(|error| DescriptionError::Path(self.build_dir.clone(), error))?,
        ))
    }

    fn default_toolchain(&self) -> Result<Label, DescriptionError> {
        resolve_label(None, &self.default_toolchain)
    }
}

/// Builds a graph from a description resuming deferred targets.
pub async fn build_graph(
    context: &Context,
    description: &Description,
) -> Result<Graph, ApplicationError> {
    let mut graph = Graph::new(description.settings()?);
    let default_toolchain = description.default_toolchain()?;

    for toolchain in &description.toolchains {
        graph.define_toolchain(build_toolchain(toolchain)?)?;
    }

    for config in &description.configs {
        graph.define_config(build_config(&default_toolchain, config)?)?;
    }

    for target in &description.targets {
        let directory = SourceDir::root()
            .resolve_relative_dir(&target.directory)
            .map_err(|error| DescriptionError::Path(target.directory.clone(), error))?;
        let toolchain = match &target.toolchain {
            Some(toolchain) => resolve_label(None, toolchain)?,
            None => default_toolchain.clone(),
        };
        let origin = Origin::new(
            target
                .origin
                .clone()
                .unwrap_or_else(|| directory.value().to_owned() + BUILD_FILE_NAME),
        );

        let (label, state) = graph.define_target(
            Scope::new(directory, Some(toolchain), target.values.clone()),
            origin,
            &target.function,
            &target.args,
        )?;

        debug!(
            context,
            context.console().lock().await,
            "{} {}",
            match state {
                TargetState::Committed => "defined",
                TargetState::Deferred => "deferred",
            },
            label.user_visible_name(true)
        );
    }

    for label in graph.resume_deferred()? {
        debug!(
            context,
            context.console().lock().await,
            "resumed {}",
            label.user_visible_name(true)
        );
    }

    Ok(graph)
}

fn build_toolchain(description: &ToolchainDescription) -> Result<Toolchain, DescriptionError> {
    let label = resolve_label(None, &description.label)?;
    let mut toolchain = Toolchain::new(label.clone());

    for (name, tool) in &description.tools {
        toolchain.set_tool(build_tool(name, tool)?);
    }

    for dependency in &description.deps {
        toolchain
            .deps_mut()
            .push(resolve_label(Some(&label), dependency)?);
    }

    *toolchain.args_mut() = description.args.clone();
    toolchain.set_propagates_configs(description.propagates_configs);
    toolchain.complete_setup();

    Ok(toolchain)
}

fn build_tool(name: &str, description: &ToolDescription) -> Result<Tool, DescriptionError> {
    Tool::parse(
        ToolType::from_str(name).map_err(DescriptionError::ToolType)?,
        &description.command,
        &description.description,
        &description
            .outputs
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>(),
        description.sysroot.clone(),
    )
    .map_err(|error| DescriptionError::Substitution(format!("tool \"{name}\""), error))
}

fn build_config(
    default_toolchain: &Label,
    description: &ConfigDescription,
) -> Result<Config, DescriptionError> {
    Ok(Config::new(
        resolve_label(Some(default_toolchain), &description.label)?,
        ConfigValues {
            rustflags: description.rustflags.clone(),
            cflags: description.cflags.clone(),
            defines: description.defines.clone(),
            ldflags: description.ldflags.clone(),
        },
    ))
}

fn resolve_label(toolchain: Option<&Label>, input: &str) -> Result<Label, DescriptionError> {
    Label::resolve(&SourceDir::root(), toolchain, input)
        .map_err(|error| DescriptionError::Label(format!("label \"{input}\""), error))
}

/// Resolves a path of a file in a build directory on a file system.
pub fn resolve_build_file(
    settings: &BuildSettings,
    input: &str,
) -> Result<PathBuf, DescriptionError> {
    Ok(settings.full_path(
        &settings
            .build_dir()
            .resolve_relative_file(input)
            .map_err(|error| DescriptionError::Path(input.into(), error))?,
    ))
}
