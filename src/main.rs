mod arguments;

use arguments::{Arguments, Tool};
use clap::Parser;
use std::{env::set_current_dir, path::Path, process::exit, str::FromStr, time::Duration};
use tokio::time::sleep;
use turtle_gen::{
    context::Context,
    description::{Description, build_graph, resolve_build_file},
    error::ApplicationError,
    escape::EscapingPlatform,
    infrastructure::{OsConsole, OsFileSystem},
    log,
    options::Options,
    runtime_deps::write_runtime_deps,
    rust_project::write_rust_project,
    tool::{print_commands, print_labels},
};

#[tokio::main]
async fn main() {
    let arguments = Arguments::parse();
    let context = Context::new(
        OsConsole::new(),
        OsFileSystem::new(),
        Options {
            debug: arguments.debug,
            quiet: arguments.quiet,
            log_prefix: arguments.log_prefix.clone(),
        },
    );

    if let Err(error) = execute(&context, &arguments).await {
        if !context.options().quiet {
            let _ = context
                .console()
                .lock()
                .await
                .write_stderr(
                    format!(
                        "{}{}\n",
                        context.options().log_prefix.as_deref().unwrap_or_default(),
                        error
                    )
                    .as_bytes(),
                )
                .await;
        }

        // Delay for the error message to be written completely hopefully.
        sleep(Duration::from_millis(1)).await;

        exit(1)
    }
}

async fn execute(context: &Context, arguments: &Arguments) -> Result<(), ApplicationError> {
    if let Some(directory) = &arguments.directory {
        set_current_dir(directory)?;
    }

    let mut source = String::new();

    context
        .file_system()
        .read_file_to_string(Path::new(&arguments.file), &mut source)
        .await?;

    let description = Description::parse(&source)?;
    let graph = build_graph(context, &description).await?.resolve()?;

    match &arguments.tool {
        Some(Tool::Labels) => print_labels(context, &graph).await?,
        Some(Tool::Commands) => {
            print_commands(
                context,
                &graph,
                EscapingPlatform::from_str(&arguments.platform)?,
            )
            .await?
        }
        None => {
            let path = resolve_build_file(graph.settings(), &arguments.rust_project)?;
            let project_written = write_rust_project(context, &graph, &path).await?;
            let runtime_deps_count = write_runtime_deps(context, &graph).await?;

            if !context.options().quiet && (project_written || runtime_deps_count > 0) {
                let mut console = context.console().lock().await;

                log!(
                    console,
                    "{} targets, {} runtime dependency files written",
                    graph.targets().len(),
                    runtime_deps_count
                );
            }
        }
    }

    Ok(())
}
