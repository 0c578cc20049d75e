//! Recursive rendering of symbols and extension groups.

use std::collections::HashMap;

use itertools::Itertools;
use symdoc_resolve::Resolver;
use symdoc_schemas::{KindCategory, Relationship, Symbol};

use crate::declaration::{format_declaration, format_doc_comment};

/// Indentation added per nesting level.
const INDENT: &str = "    ";

/// Renders symbols into Swift-interface-style declaration blocks.
///
/// The renderer is built once per module from the full retained symbol set.
/// Nesting is reconstructed from path components: a symbol whose path is
/// exactly one segment longer than another's, with that path as a
/// segment-wise prefix, renders as a direct member. Member groups appear in
/// a fixed order (nested types, type properties, instance properties, enum
/// cases, type methods, instance methods), each sorted by title, separated
/// by blank lines.
pub struct SymbolRenderer<'a> {
    /// Direct members keyed by the parent's path components.
    members: HashMap<Vec<String>, Vec<&'a Symbol>>,
    relationships: &'a [Relationship],
    resolver: &'a Resolver,
}

impl<'a> SymbolRenderer<'a> {
    /// Builds a renderer over the retained symbols of one module.
    ///
    /// `symbols` must contain every symbol that may appear as a member, not
    /// just the top-level ones; members absent from the set simply do not
    /// render.
    pub fn new(
        symbols: &[&'a Symbol],
        relationships: &'a [Relationship],
        resolver: &'a Resolver,
    ) -> Self {
        let mut members: HashMap<Vec<String>, Vec<&'a Symbol>> =
            HashMap::new();
        for &symbol in symbols {
            if symbol.path_components.len() < 2 {
                continue;
            }
            let parent = symbol.path_components
                [..symbol.path_components.len() - 1]
                .to_vec();
            members.entry(parent).or_default().push(symbol);
        }
        Self {
            members,
            relationships,
            resolver,
        }
    }

    /// Renders one top-level symbol with its full member hierarchy.
    ///
    /// Every line of the result ends in a newline. Containers render their
    /// members between braces; an empty container renders as `{}` on the
    /// declaration line.
    pub fn render(&self, symbol: &Symbol) -> String {
        let mut out = String::new();
        self.render_at(symbol, 0, true, &mut out);
        out
    }

    /// Renders one extension group for a type owned by another module.
    ///
    /// Members render as instance members of an `extension <Name>` block,
    /// properties before methods, each sorted by title.
    pub fn render_extension_group(
        &self,
        type_name: &str,
        members: &[&'a Symbol],
    ) -> String {
        if members.is_empty() {
            return format!("extension {type_name} {{}}\n");
        }

        let (mut properties, mut methods): (Vec<&Symbol>, Vec<&Symbol>) =
            members.iter().copied().partition(|member| {
                matches!(
                    member.category(),
                    KindCategory::Property | KindCategory::TypeProperty
                )
            });
        properties.sort_by(|a, b| a.title().cmp(b.title()));
        methods.sort_by(|a, b| a.title().cmp(b.title()));

        let mut out = String::new();
        out.push_str("extension ");
        out.push_str(type_name);
        out.push_str(" {\n");
        let mut first = true;
        for group in [properties, methods] {
            if group.is_empty() {
                continue;
            }
            if !first {
                out.push('\n');
            }
            first = false;
            for member in group {
                self.render_at(member, 1, true, &mut out);
            }
        }
        out.push_str("}\n");
        out
    }

    fn render_at(
        &self,
        symbol: &Symbol,
        depth: usize,
        force_public: bool,
        out: &mut String,
    ) {
        let indent = INDENT.repeat(depth);
        out.push_str(&format_doc_comment(symbol.doc_lines(), &indent));

        let category = symbol.category();
        // Enum cases and associated types take no access modifier in Swift.
        let force = force_public
            && !matches!(
                category,
                KindCategory::EnumCase | KindCategory::AssociatedType
            );
        let declaration = if symbol.declaration_fragments.is_empty() {
            symbol.title().to_owned()
        } else {
            format_declaration(&symbol.declaration_fragments, force)
        };
        out.push_str(&indent);
        out.push_str(&declaration);

        if !category.is_container() {
            out.push('\n');
            return;
        }

        // Protocols carry their inheritance clause in the declaration
        // fragments already; appending the edge-derived one would double it.
        if matches!(
            category,
            KindCategory::Class | KindCategory::Struct | KindCategory::Enum
        ) {
            out.push_str(&self.inheritance_suffix(symbol));
        }

        let groups = self.member_groups(symbol);
        if groups.iter().all(Vec::is_empty) {
            out.push_str(" {}\n");
            return;
        }

        // Protocol requirements cannot carry access modifiers.
        let member_force = !matches!(category, KindCategory::Protocol);
        out.push_str(" {\n");
        let mut first = true;
        for group in groups.iter().filter(|group| !group.is_empty()) {
            if !first {
                out.push('\n');
            }
            first = false;
            for member in group {
                self.render_at(member, depth + 1, member_force, out);
            }
        }
        out.push_str(&indent);
        out.push_str("}\n");
    }

    /// Collects the direct members of `symbol` into the fixed render groups,
    /// each sorted by title.
    fn member_groups(&self, symbol: &Symbol) -> [Vec<&'a Symbol>; 6] {
        let mut nested_types = Vec::new();
        let mut type_properties = Vec::new();
        let mut properties = Vec::new();
        let mut cases = Vec::new();
        let mut type_methods = Vec::new();
        let mut methods = Vec::new();

        for &member in self.members_of(symbol) {
            let category = member.category();
            if category.is_type_declaration() {
                nested_types.push(member);
                continue;
            }
            match category {
                KindCategory::TypeProperty => type_properties.push(member),
                KindCategory::Property => properties.push(member),
                KindCategory::EnumCase => cases.push(member),
                KindCategory::TypeMethod => type_methods.push(member),
                _ => methods.push(member),
            }
        }

        let mut groups = [
            nested_types,
            type_properties,
            properties,
            cases,
            type_methods,
            methods,
        ];
        for group in &mut groups {
            group.sort_by(|a, b| a.title().cmp(b.title()));
        }
        groups
    }

    fn members_of(&self, symbol: &Symbol) -> &[&'a Symbol] {
        self.members
            .get(symbol.path_components.as_slice())
            .map_or(&[], Vec::as_slice)
    }

    /// Builds the `: Super, Proto` suffix from inheritance and conformance
    /// edges, resolving targets in one batch. Unresolvable targets are
    /// skipped; when none resolve the suffix is empty.
    fn inheritance_suffix(&self, symbol: &Symbol) -> String {
        let targets: Vec<&str> = self
            .relationships
            .iter()
            .filter(|edge| {
                (edge.is_inherits_from() || edge.is_conforms_to())
                    && edge.source == symbol.precise_id()
            })
            .map(|edge| edge.target.as_str())
            .collect();
        if targets.is_empty() {
            return String::new();
        }

        let names: Vec<String> = self
            .resolver
            .resolve_batch(&targets)
            .into_iter()
            .flatten()
            .unique()
            .collect();
        if names.is_empty() {
            String::new()
        } else {
            format!(": {}", names.join(", "))
        }
    }
}
