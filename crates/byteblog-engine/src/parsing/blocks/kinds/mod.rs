//! Block kinds with owned delimiters.
//!
//! Each kind keeps its markers and matching pattern next to each other, so the
//! classifier only asks questions ("is this a heading?") and never spells out
//! syntax itself.

pub mod code_fence;
pub mod heading;
pub mod list;

pub use code_fence::CodeFence;
pub use heading::Heading;
pub use list::ListMarker;
