use clap::{Parser, ValueEnum};

#[derive(Parser)]
#[clap(
    about = "The meta-build graph generator for Ninja and rust-analyzer",
    version
)]
pub struct Arguments {
    #[clap(short, default_value = "build.json", help = "Set a build description file")]
    pub file: String,
    #[clap(short = 'C', help = "Set a working directory")]
    pub directory: Option<String>,
    #[clap(
        long,
        default_value = "rust-project.json",
        help = "Set a rust-project.json file relative to a build directory"
    )]
    pub rust_project: String,
    #[clap(
        long,
        default_value = "current",
        help = "Set a platform of commands (current, posix, or windows)"
    )]
    pub platform: String,
    #[clap(long, help = "Set a log prefix")]
    pub log_prefix: Option<String>,
    #[clap(long, help = "Show no message on failure")]
    pub quiet: bool,
    #[clap(long, help = "Show debug logs", env = "TURTLE_DEBUG")]
    pub debug: bool,
    #[clap(short, help = "Use a complementary tool")]
    pub tool: Option<Tool>,
}

#[derive(Clone, ValueEnum)]
#[clap(rename_all = "lower")]
pub enum Tool {
    Labels,
    Commands,
}
