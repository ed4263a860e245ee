//! Form construction: the request-scoped [`FormBuilder`] and the [`Screen`]
//! contract that drives it.

pub mod builder;
pub mod screen;

pub use builder::FormBuilder;
pub use screen::{Screen, ScreenDef};
