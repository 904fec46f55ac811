//! Typed models

mod reference;
mod verse;
mod version;

pub use reference::*;
pub use verse::*;
pub use version::*;
