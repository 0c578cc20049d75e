//! Deterministic ordering of symbols for rendering.
//!
//! Symbols are presented dependency-first: a type appears before the types
//! that inherit from or conform to it, and within that constraint symbols are
//! grouped by structural kind (classes, then structs, then enums, ...) and
//! alphabetized. The ordering is byte-identical across runs for identical
//! input; dictionaries and hash iteration never leak into the result.
//!
//! The module is split into:
//! - [`graph`]: dependency-graph construction and cycle-tolerant topological
//!   sorting over relationship edges
//! - [`hierarchy`]: kind ranking, the combined hierarchy sort, and main-symbol
//!   selection

mod graph;
mod hierarchy;

#[doc(inline)]
pub use graph::*;
#[doc(inline)]
pub use hierarchy::*;
