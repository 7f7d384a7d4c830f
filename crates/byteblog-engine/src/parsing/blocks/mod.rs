//! # Block Parsing
//!
//! ## Modules
//!
//! - **`types`**: `ContentBlock` and `HeadingLevel`
//! - **`kinds`**: block-specific types owning their delimiters and patterns
//!   (CodeFence, Heading, ListMarker)
//! - **`fences`**: `FencedRegions` lifts fenced code out of the text and resolves
//!   placeholders back to code
//! - **`classify`**: segment splitting and `SegmentClassifier`
//!
//! ## Key Invariants
//!
//! - Fenced code is a raw zone: its body is never classified as anything else
//! - Blocks come out in source order
//! - Whitespace-only segments produce no block

pub mod classify;
pub mod fences;
pub mod kinds;
pub mod types;

pub use classify::{SegmentClassifier, split_segments};
pub use fences::{FencedCode, FencedRegions, Piece};
pub use types::{ContentBlock, HeadingLevel};
