//! Structural classification of retained symbols.

use std::collections::{BTreeMap, HashSet};

use symdoc_schemas::Symbol;
use tracing::debug;

/// The structural split of one module's retained symbols.
///
/// Top-level symbols render as their own interface blocks, members hang off
/// them by path nesting, and members whose first path segment names a type
/// this module does not declare render as extension groups.
#[derive(Debug, Default)]
pub(crate) struct ModuleStructure<'a> {
    /// Symbols declared directly at module scope, in input order.
    pub top_level: Vec<&'a Symbol>,

    /// Extension members grouped by the extended type's name, in name order.
    /// Only direct members (path length two) land here; deeper nesting is
    /// reconstructed by the renderer.
    pub extension_groups: BTreeMap<String, Vec<&'a Symbol>>,
}

/// Splits retained symbols into top-level declarations and extension groups.
///
/// A symbol with a two-segment path whose first segment is not one of the
/// module's own top-level names is a member added to a foreign type; it is
/// grouped under that type's name. Everything nested below the module's own
/// types stays with them and is picked up by the renderer.
pub(crate) fn classify<'a>(symbols: &[&'a Symbol]) -> ModuleStructure<'a> {
    let top_level: Vec<&Symbol> = symbols
        .iter()
        .copied()
        .filter(|symbol| symbol.is_top_level())
        .collect();
    let own_names: HashSet<&str> = top_level
        .iter()
        .map(|symbol| symbol.path_components[0].as_str())
        .collect();

    let mut extension_groups: BTreeMap<String, Vec<&Symbol>> =
        BTreeMap::new();
    for &symbol in symbols {
        if symbol.path_components.len() != 2 {
            continue;
        }
        let holder = symbol.path_components[0].as_str();
        if own_names.contains(holder) {
            continue;
        }
        extension_groups
            .entry(holder.to_owned())
            .or_default()
            .push(symbol);
    }

    debug!(
        top_level = top_level.len(),
        extension_groups = extension_groups.len(),
        "classified symbols"
    );
    ModuleStructure {
        top_level,
        extension_groups,
    }
}
