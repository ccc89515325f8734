mod error;
mod source_dir;
mod source_file;
mod source_file_type;

pub use error::*;
pub use source_dir::*;
pub use source_file::*;
pub use source_file_type::*;
