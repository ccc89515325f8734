mod bits;
mod error;
mod list;
mod pattern;
mod r#type;

pub use bits::*;
pub use error::*;
pub use list::*;
pub use pattern::*;
pub use r#type::*;
