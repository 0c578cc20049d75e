//! Dependency-graph construction and cycle-tolerant topological sorting.

use std::collections::VecDeque;

use indexmap::IndexMap;
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use symdoc_schemas::{Relationship, Symbol};
use tracing::debug;

/// Directed dependency graph over a set of symbols.
///
/// One node per symbol, in the order the symbols were supplied. An edge runs
/// from the relationship source (the dependent) to its target (the
/// dependency). Edges whose endpoints are not both in the supplied set are
/// dropped, as are self-edges; at most one edge is kept per ordered pair.
pub struct DependencyGraph {
    /// Node weight is the symbol's position in the supplied order.
    graph: DiGraph<usize, ()>,
    /// Precise identifier of each node, in supplied order. Also provides the
    /// reverse identifier-to-node lookup.
    nodes: IndexMap<String, NodeIndex>,
}

impl DependencyGraph {
    /// Builds the graph for the given symbol identifiers.
    ///
    /// Every relationship kind contributes an edge; the graph does not
    /// distinguish inheritance from membership when ordering. A duplicate
    /// identifier keeps its first node.
    pub fn build<'a>(
        symbol_ids: impl IntoIterator<Item = &'a str>,
        relationships: &[Relationship],
    ) -> Self {
        let mut graph = DiGraph::new();
        let mut nodes: IndexMap<String, NodeIndex> = IndexMap::new();
        for id in symbol_ids {
            if !nodes.contains_key(id) {
                let node = graph.add_node(nodes.len());
                nodes.insert(id.to_owned(), node);
            }
        }

        let mut edge_count = 0;
        for relationship in relationships {
            let (Some(&source), Some(&target)) = (
                nodes.get(relationship.source.as_str()),
                nodes.get(relationship.target.as_str()),
            ) else {
                // Endpoint outside the supplied set: not a dependency here.
                continue;
            };
            if source == target || graph.contains_edge(source, target) {
                continue;
            }
            graph.add_edge(source, target, ());
            edge_count += 1;
        }

        debug!(
            symbol_count = nodes.len(),
            edge_count, "built dependency graph"
        );
        Self { graph, nodes }
    }

    /// Number of symbols in the graph.
    pub fn symbol_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the precise identifier at the given supplied-order position.
    pub fn id_at(&self, position: usize) -> &str {
        self.nodes
            .get_index(position)
            .map(|(id, _)| id.as_str())
            .expect("position within graph bounds")
    }

    /// Orders the symbols so that dependencies come before their dependents,
    /// returning supplied-order positions.
    ///
    /// Kahn's algorithm with a FIFO queue: symbols with no dependencies are
    /// seeded in supplied order, and releasing a symbol decrements only its
    /// direct dependents through the reverse adjacency, so the whole sort is
    /// O(symbols + edges). Symbols caught in cycles never reach a zero count;
    /// they are appended at the end in supplied relative order rather than
    /// dropped. Every symbol appears exactly once.
    pub fn topological_order(&self) -> Vec<usize> {
        let node_count = self.graph.node_count();
        let mut order = Vec::with_capacity(node_count);
        let mut emitted = vec![false; node_count];

        // A symbol is ready once all of its dependencies (outgoing edges)
        // have been emitted.
        let mut pending: Vec<usize> = (0..node_count)
            .map(|position| {
                self.graph
                    .edges_directed(NodeIndex::new(position), Direction::Outgoing)
                    .count()
            })
            .collect();

        let mut queue: VecDeque<usize> = (0..node_count)
            .filter(|&position| pending[position] == 0)
            .collect();

        while let Some(position) = queue.pop_front() {
            emitted[position] = true;
            order.push(position);
            for dependent in self
                .graph
                .neighbors_directed(NodeIndex::new(position), Direction::Incoming)
            {
                let dependent = dependent.index();
                pending[dependent] -= 1;
                if pending[dependent] == 0 {
                    queue.push_back(dependent);
                }
            }
        }

        // Cycle remainder: emit in supplied relative order.
        if order.len() < node_count {
            let remainder = node_count - order.len();
            debug!(remainder, "dependency cycle, appending remainder");
            order.extend((0..node_count).filter(|&position| !emitted[position]));
        }

        order
    }
}

/// Orders symbols dependency-first, cycle-tolerantly.
///
/// Convenience wrapper that builds the [`DependencyGraph`] for `symbols` and
/// maps the topological order back onto them.
pub fn topological_sort<'a>(
    symbols: &[&'a Symbol],
    relationships: &[Relationship],
) -> Vec<&'a Symbol> {
    let graph = DependencyGraph::build(
        symbols.iter().map(|symbol| symbol.precise_id()),
        relationships,
    );
    let mut by_id: IndexMap<&str, &'a Symbol> = IndexMap::new();
    for symbol in symbols {
        by_id.entry(symbol.precise_id()).or_insert(symbol);
    }
    graph
        .topological_order()
        .into_iter()
        .map(|position| by_id[graph.id_at(position)])
        .collect()
}

#[cfg(test)]
mod tests {
    use proptest::collection::vec;
    use proptest::prelude::*;
    use symdoc_schemas::{SymbolIdentifier, SymbolKind, SymbolNames};

    use super::*;

    /// Helper to create a symbol with the given identifier and title.
    fn sym(id: &str, title: &str) -> Symbol {
        Symbol {
            identifier: SymbolIdentifier {
                precise: id.to_owned(),
                interface_language: None,
            },
            kind: SymbolKind {
                identifier: "swift.struct".to_owned(),
                display_name: None,
            },
            path_components: vec![title.to_owned()],
            names: SymbolNames {
                title: title.to_owned(),
            },
            doc_comment: None,
            declaration_fragments: Vec::new(),
            access_level: symdoc_schemas::AccessLevel::Public,
        }
    }

    /// Helper to create a relationship edge.
    fn edge(kind: &str, source: &str, target: &str) -> Relationship {
        Relationship {
            kind: kind.to_owned(),
            source: source.to_owned(),
            target: target.to_owned(),
        }
    }

    fn titles(symbols: &[&Symbol]) -> Vec<String> {
        symbols.iter().map(|s| s.title().to_owned()).collect()
    }

    // -----------------------------------------------------------------
    // Graph construction
    // -----------------------------------------------------------------

    #[test]
    fn edges_to_missing_endpoints_are_dropped() {
        let graph = DependencyGraph::build(
            ["s:a", "s:b"],
            &[
                edge("inheritsFrom", "s:a", "s:b"),
                edge("conformsTo", "s:a", "s:External"),
                edge("memberOf", "s:Ghost", "s:b"),
            ],
        );
        assert_eq!(graph.symbol_count(), 2);
        // Only the in-set edge survives, so only `b` is an initial seed.
        assert_eq!(graph.topological_order(), vec![1, 0]);
    }

    #[test]
    fn self_and_duplicate_edges_are_ignored() {
        let graph = DependencyGraph::build(
            ["s:a", "s:b"],
            &[
                edge("conformsTo", "s:a", "s:a"),
                edge("inheritsFrom", "s:a", "s:b"),
                edge("conformsTo", "s:a", "s:b"),
            ],
        );
        // A single decrement must release `a`; a double-counted edge would
        // strand it in the cycle remainder.
        assert_eq!(graph.topological_order(), vec![1, 0]);
    }

    // -----------------------------------------------------------------
    // Topological order
    // -----------------------------------------------------------------

    #[test]
    fn dependencies_precede_dependents() {
        // child inherits from base, base conforms to proto.
        let symbols =
            [sym("s:child", "Child"), sym("s:base", "Base"), sym("s:proto", "Proto")];
        let refs: Vec<&Symbol> = symbols.iter().collect();
        let relationships = vec![
            edge("inheritsFrom", "s:child", "s:base"),
            edge("conformsTo", "s:base", "s:proto"),
        ];

        let sorted = topological_sort(&refs, &relationships);
        assert_eq!(titles(&sorted), vec!["Proto", "Base", "Child"]);
    }

    #[test]
    fn independent_symbols_keep_supplied_order() {
        let symbols = [sym("s:b", "B"), sym("s:a", "A"), sym("s:c", "C")];
        let refs: Vec<&Symbol> = symbols.iter().collect();

        let sorted = topological_sort(&refs, &[]);
        assert_eq!(titles(&sorted), vec!["B", "A", "C"]);
    }

    #[test]
    fn cycle_members_are_appended_not_lost() {
        // a and b form a cycle; c is independent.
        let symbols = [sym("s:a", "A"), sym("s:b", "B"), sym("s:c", "C")];
        let refs: Vec<&Symbol> = symbols.iter().collect();
        let relationships = vec![
            edge("inheritsFrom", "s:a", "s:b"),
            edge("inheritsFrom", "s:b", "s:a"),
        ];

        let sorted = topological_sort(&refs, &relationships);
        // c is the only zero-dependency seed; the cycle follows in supplied
        // relative order.
        assert_eq!(titles(&sorted), vec!["C", "A", "B"]);
    }

    #[test]
    fn diamond_emits_every_symbol_once() {
        // top depends on left and right, both depend on bottom.
        let symbols = [
            sym("s:top", "Top"),
            sym("s:left", "Left"),
            sym("s:right", "Right"),
            sym("s:bottom", "Bottom"),
        ];
        let refs: Vec<&Symbol> = symbols.iter().collect();
        let relationships = vec![
            edge("inheritsFrom", "s:top", "s:left"),
            edge("conformsTo", "s:top", "s:right"),
            edge("inheritsFrom", "s:left", "s:bottom"),
            edge("inheritsFrom", "s:right", "s:bottom"),
        ];

        let sorted = topological_sort(&refs, &relationships);
        assert_eq!(sorted.len(), 4);
        assert_eq!(sorted[0].title(), "Bottom");
        assert_eq!(sorted[3].title(), "Top");
    }

    #[test]
    fn empty_input_yields_empty_order() {
        let sorted = topological_sort(&[], &[]);
        assert!(sorted.is_empty());
    }

    // -----------------------------------------------------------------
    // Properties
    // -----------------------------------------------------------------

    /// Strategy: a random edge list over `n` symbols, possibly cyclic.
    fn arb_edges(n: usize) -> impl Strategy<Value = Vec<(usize, usize)>> {
        vec((0..n, 0..n), 0..(n * 2))
    }

    proptest! {
        /// On arbitrary (possibly cyclic) edge sets the sort terminates and
        /// is a permutation: every symbol exactly once.
        #[test]
        fn sort_is_a_permutation(edges in arb_edges(8)) {
            let symbols: Vec<Symbol> = (0..8)
                .map(|i| sym(&format!("s:{i}"), &format!("S{i}")))
                .collect();
            let refs: Vec<&Symbol> = symbols.iter().collect();
            let relationships: Vec<Relationship> = edges
                .iter()
                .map(|(a, b)| {
                    edge("inheritsFrom", &format!("s:{a}"), &format!("s:{b}"))
                })
                .collect();

            let sorted = topological_sort(&refs, &relationships);
            let mut ids: Vec<&str> =
                sorted.iter().map(|s| s.precise_id()).collect();
            ids.sort_unstable();
            let mut expected: Vec<String> =
                (0..8).map(|i| format!("s:{i}")).collect();
            expected.sort();
            prop_assert_eq!(
                ids,
                expected.iter().map(String::as_str).collect::<Vec<_>>()
            );
        }

        /// On acyclic edge sets every dependency is emitted before each of
        /// its dependents.
        #[test]
        fn acyclic_sort_respects_dependencies(edges in arb_edges(8)) {
            let symbols: Vec<Symbol> = (0..8)
                .map(|i| sym(&format!("s:{i}"), &format!("S{i}")))
                .collect();
            let refs: Vec<&Symbol> = symbols.iter().collect();
            // Orient every edge from the higher index to the lower one so the
            // graph is acyclic by construction.
            let relationships: Vec<Relationship> = edges
                .iter()
                .filter(|(a, b)| a != b)
                .map(|&(a, b)| {
                    let (source, target) = (a.max(b), a.min(b));
                    edge(
                        "inheritsFrom",
                        &format!("s:{source}"),
                        &format!("s:{target}"),
                    )
                })
                .collect();

            let sorted = topological_sort(&refs, &relationships);
            let position_of = |id: &str| {
                sorted
                    .iter()
                    .position(|s| s.precise_id() == id)
                    .expect("symbol present")
            };
            for relationship in &relationships {
                prop_assert!(
                    position_of(&relationship.target)
                        < position_of(&relationship.source),
                    "{} must precede {}",
                    relationship.target,
                    relationship.source
                );
            }
        }
    }
}
