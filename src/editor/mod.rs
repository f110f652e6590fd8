//! The code editor element: text surface, gutter sibling and the hook
//! that binds them to the host.

pub mod area;
pub mod gutter;
pub mod hook;

pub use area::{Direction, TextArea};
pub use gutter::Gutter;
pub use hook::{EditorHook, EditorOptions};
