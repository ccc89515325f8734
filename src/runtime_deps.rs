use crate::{
    context::Context,
    debug,
    error::ApplicationError,
    graph::ResolvedGraph,
    label::Label,
    target::{DepsType, Target},
    utilities::write_file_if_changed,
};
use futures::future::try_join_all;
use std::collections::{BTreeSet, HashSet};

/// Returns runtime data of a target and its transitive dependencies in order.
pub fn collect_runtime_deps<'a>(
    graph: &'a ResolvedGraph,
    target: &'a Target,
) -> BTreeSet<&'a str> {
    let mut data = BTreeSet::new();
    let mut targets = vec![target];
    let mut visited = HashSet::<&Label>::from([target.label()]);

    while let Some(target) = targets.pop() {
        data.extend(target.data().iter().map(String::as_str));

        for dependency in graph.deps(target, DepsType::All) {
            if visited.insert(dependency.label()) {
                targets.push(dependency);
            }
        }
    }

    data
}

/// Writes runtime dependency files of targets and returns how many files are
/// written.
pub async fn write_runtime_deps(
    context: &Context,
    graph: &ResolvedGraph,
) -> Result<usize, ApplicationError> {
    Ok(try_join_all(
        graph
            .targets()
            .iter()
            .filter(|target| target.write_runtime_deps_output().is_some())
            .map(|target| write_target_runtime_deps(context, graph, target)),
    )
    .await?
    .into_iter()
    .filter(|&written| written)
    .count())
}

async fn write_target_runtime_deps(
    context: &Context,
    graph: &ResolvedGraph,
    target: &Target,
) -> Result<bool, ApplicationError> {
    let Some(output) = target.write_runtime_deps_output() else {
        return Ok(false);
    };
    let path = graph.settings().full_path(output);
    let contents = collect_runtime_deps(graph, target)
        .into_iter()
        .map(|data| data.to_owned() + "\n")
        .collect::<String>();

    let written =
        write_file_if_changed(context.file_system(), &path, contents.as_bytes()).await?;

    debug!(
        context,
        context.console().lock().await,
        "runtime dependencies of {} {}",
        target.label(),
        if written { "written" } else { "up to date" }
    );

    Ok(written)
}
