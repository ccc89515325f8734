use crate::{context::Context, error::ApplicationError, graph::ResolvedGraph};

pub fn render_labels(graph: &ResolvedGraph) -> String {
    graph
        .targets()
        .iter()
        .map(|target| target.label().user_visible_name(true) + "\n")
        .collect()
}

/// Prints labels of committed targets in their definition order.
pub async fn print_labels(
    context: &Context,
    graph: &ResolvedGraph,
) -> Result<(), ApplicationError> {
    context
        .console()
        .lock()
        .await
        .write_stdout(render_labels(graph).as_bytes())
        .await?;

    Ok(())
}
