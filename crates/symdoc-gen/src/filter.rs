//! Access filtering of loaded symbols.

use symdoc_schemas::Symbol;
use tracing::debug;

/// Marker embedded in the precise identifiers of compiler-synthesized
/// symbols (synthesized conformance members and the like).
const SYNTHESIZED_MARKER: &str = "::SYNTHESIZED::";

/// Precise-identifier prefixes that denote re-exported declarations:
/// clang-imported symbols (`c:`) and Swift manglings under the Objective-C
/// (`So`) and C (`SC`) namespaces.
const REEXPORT_PREFIXES: &[&str] = &["c:", "s:So", "s:SC"];

fn is_reexported(precise: &str) -> bool {
    REEXPORT_PREFIXES
        .iter()
        .any(|prefix| precise.starts_with(prefix))
}

/// Selects the symbols that belong in the documented interface.
///
/// Keeps symbols declared `public` or `open`. Compiler-synthesized symbols
/// are always dropped; re-exported declarations are dropped unless
/// `include_reexported` is set. Input order is preserved.
pub(crate) fn filter_symbols(
    symbols: &[Symbol],
    include_reexported: bool,
) -> Vec<&Symbol> {
    let retained: Vec<&Symbol> = symbols
        .iter()
        .filter(|symbol| {
            symbol.access_level.is_exported()
                && !symbol.precise_id().contains(SYNTHESIZED_MARKER)
                && (include_reexported
                    || !is_reexported(symbol.precise_id()))
        })
        .collect();

    debug!(
        total = symbols.len(),
        retained = retained.len(),
        "filtered symbols"
    );
    retained
}
