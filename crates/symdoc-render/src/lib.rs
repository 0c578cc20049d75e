//! Rendering of filtered symbols into Swift-interface-style text.
//!
//! The renderer turns [`Symbol`](symdoc_schemas::Symbol) values into the
//! declaration blocks that appear inside the generated Markdown, fenced as
//! Swift code. Two layers:
//!
//! - [`format_declaration`] / [`format_doc_comment`]: line-level formatting of
//!   a single symbol's declaration fragments and doc comment.
//! - [`SymbolRenderer`]: recursive rendering of a symbol together with its
//!   member hierarchy, plus extension groups for types owned by other modules.

mod declaration;
mod symbol;

#[doc(inline)]
pub use declaration::{format_declaration, format_doc_comment};
#[doc(inline)]
pub use symbol::SymbolRenderer;
