//! Schema definitions for compiler-emitted symbol-graph documents.
//!
//! This crate contains the data structures for the symbol-graph JSON format
//! produced by the Swift compiler (`swift symbolgraph-extract`). A module is
//! described by one main document plus zero or more extension fragments, and
//! every later pipeline phase operates on these types.
//!
//! The schemas are designed to be:
//! - **Faithful**: field names and shapes mirror the on-disk JSON
//! - **Tolerant**: unknown fields, kinds, and access levels never fail a parse
//! - **Shared**: used across loading, ordering, and rendering

mod kinds;
mod symbol_graph;
#[cfg(test)]
mod testutil;

#[doc(inline)]
pub use kinds::*;
#[doc(inline)]
pub use symbol_graph::*;
