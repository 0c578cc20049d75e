//! Structural ranking, the combined hierarchy sort, and main-symbol
//! selection.

use std::collections::HashMap;

use symdoc_schemas::{KindCategory, Relationship, Symbol};

use crate::graph::topological_sort;

/// Presentation rank for a kind identifier. Lower ranks render first:
/// classes, structs, enums, protocols, extensions, macros, free functions,
/// then everything else.
pub fn hierarchy_rank(kind_identifier: &str) -> u8 {
    match KindCategory::parse(kind_identifier) {
        KindCategory::Class => 0,
        KindCategory::Struct => 1,
        KindCategory::Enum => 2,
        KindCategory::Protocol => 3,
        KindCategory::Extension => 4,
        KindCategory::Macro => 5,
        KindCategory::Func => 6,
        _ => 7,
    }
}

/// Orders symbols for presentation.
///
/// Three passes: alphabetize by title, topologically sort (so that FIFO ties
/// inside the sort resolve in title order), then stably group by
/// [`hierarchy_rank`]. Within one rank, dependency order is primary and
/// symbols without ordering edges stay alphabetical. The result is
/// byte-identical across runs for identical input.
pub fn sort_by_hierarchy<'a>(
    symbols: &[&'a Symbol],
    relationships: &[Relationship],
) -> Vec<&'a Symbol> {
    let mut ordered: Vec<&Symbol> = symbols.to_vec();
    ordered.sort_by(|a, b| a.title().cmp(b.title()));

    let mut ordered = topological_sort(&ordered, relationships);
    ordered.sort_by_key(|symbol| hierarchy_rank(&symbol.kind.identifier));
    ordered
}

/// Picks the module's most prominent symbol, if any.
///
/// The most-inherited symbol wins: for every `inheritsFrom` edge whose target
/// is in `symbols`, the target scores a point, and the highest score is
/// selected. Ties break to the lexicographically smallest title (and then
/// smallest identifier), never to hash order. When nothing in the set is
/// inherited from, a symbol whose title equals `module_name` is chosen;
/// otherwise there is no main symbol.
pub fn find_main_symbol<'a>(
    symbols: &[&'a Symbol],
    relationships: &[Relationship],
    module_name: &str,
) -> Option<&'a Symbol> {
    let mut by_id: HashMap<&str, &'a Symbol> = HashMap::new();
    for symbol in symbols {
        by_id.entry(symbol.precise_id()).or_insert(symbol);
    }

    let mut inherit_counts: HashMap<&str, usize> = HashMap::new();
    for relationship in relationships {
        if relationship.is_inherits_from()
            && by_id.contains_key(relationship.target.as_str())
        {
            *inherit_counts
                .entry(relationship.target.as_str())
                .or_default() += 1;
        }
    }

    let most_inherited = inherit_counts
        .iter()
        .map(|(id, &count)| (count, by_id[id]))
        .max_by(|(count_a, symbol_a), (count_b, symbol_b)| {
            count_a
                .cmp(count_b)
                .then_with(|| symbol_b.title().cmp(symbol_a.title()))
                .then_with(|| {
                    symbol_b.precise_id().cmp(symbol_a.precise_id())
                })
        });
    if let Some((_, symbol)) = most_inherited {
        return Some(symbol);
    }

    symbols
        .iter()
        .find(|symbol| symbol.title() == module_name)
        .copied()
}
