//! Resolution of mangled symbol references to display names.
//!
//! Relationship targets in symbol-graph documents are precise identifiers
//! (`s:SS`, `c:objc(cs)UIView`, `s:10Foundation4DateV`). Rendering needs the
//! names a reader would recognize (`String`, `UIView`, `Foundation.Date`).
//! Resolution is layered:
//!
//! 1. Objective-C interop references resolve by prefix stripping.
//! 2. A fixed table covers the standard library's short manglings.
//! 3. Everything else goes through the [`BatchDemangle`] capability, by
//!    default a `swift demangle` subprocess with a bounded timeout.
//!
//! External outcomes, including failures, land in a bounded [`NameCache`] so
//! a reference is never demangled twice in one run. The [`Resolver`] is
//! cheap to share across worker threads.

mod cache;
mod demangle;
mod resolver;

#[doc(inline)]
pub use cache::*;
#[doc(inline)]
pub use demangle::*;
#[doc(inline)]
pub use resolver::*;
