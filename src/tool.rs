mod commands;
mod labels;

pub use commands::*;
pub use labels::*;
