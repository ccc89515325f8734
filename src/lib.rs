pub mod build_settings;
pub mod config;
pub mod context;
pub mod description;
pub mod error;
pub mod escape;
pub mod graph;
pub mod infrastructure;
pub mod label;
mod log;
pub mod options;
pub mod path;
pub mod runtime_deps;
pub mod rust_project;
pub mod substitution;
pub mod target;
pub mod target_generator;
pub mod tool;
pub mod toolchain;
pub mod utilities;
pub mod value;
