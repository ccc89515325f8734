use crate::{
    context::Context,
    error::ApplicationError,
    escape::{EscapeOptions, EscapingMode, EscapingPlatform, escape_to_stream},
    graph::ResolvedGraph,
    target::OutputType,
};
use std::io::Write;

/// Renders commands of action targets escaped for Ninja, one per line.
///
/// Placeholders in arguments are rendered as they are.
pub fn render_commands(
    graph: &ResolvedGraph,
    platform: EscapingPlatform,
) -> Result<String, ApplicationError> {
    let options = EscapeOptions {
        platform,
        ..EscapeOptions::new(EscapingMode::NinjaCommand)
    };
    let mut buffer = vec![];

    for target in graph.targets().iter().filter(|target| {
        matches!(
            target.output_type(),
            OutputType::Action | OutputType::ActionForEach
        )
    }) {
        let values = target.action_values();

        write!(buffer, "{}:", target.label())?;

        for argument in values
            .script
            .iter()
            .map(|script| graph.settings().full_path(script).display().to_string())
            .chain(values.args.patterns().iter().map(ToString::to_string))
        {
            buffer.push(b' ');
            escape_to_stream(&mut buffer, &argument, &options)?;
        }

        buffer.push(b'\n');
    }

    String::from_utf8(buffer).map_err(|error| ApplicationError::Other(error.to_string()))
}

pub async fn print_commands(
    context: &Context,
    graph: &ResolvedGraph,
    platform: EscapingPlatform,
) -> Result<(), ApplicationError> {
    context
        .console()
        .lock()
        .await
        .write_stdout(render_commands(graph, platform)?.as_bytes())
        .await?;

    Ok(())
}
