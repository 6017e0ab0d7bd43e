//! celgen_core: Core utilities for the celgen binding generator.
//!
//! Provides text spans, line maps and the syntax arena used throughout
//! the scanning and parsing pipeline.

pub mod arena;
pub mod text;

// Re-export commonly used types
pub use arena::SyntaxArena;
pub use text::{LineAndColumn, LineMap, TextRange, TextSpan};
