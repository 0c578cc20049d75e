//! Symbol graph schema for compiler-emitted module descriptions.
//!
//! A symbol graph captures every symbol the compiler saw in one module
//! (types, members, free functions, macros) together with the relationship
//! edges between them. On disk a module is described by a main document
//! `<Module>.symbols.json` plus zero or more extension fragments named
//! `<Module>@<OtherModule>.symbols.json`; all of them share this shape.
//!
//! ## Terminology
//!
//! - **Precise identifier**: the compiler's globally unique, mangled key for
//!   a symbol (e.g. `s:8MyModule6MyTypeV`). Stable across documents.
//! - **Path components**: ordered name segments from the module root down to
//!   the symbol. Length one means top-level; a shared prefix means nesting.

use serde::{Deserialize, Serialize};

use crate::kinds::KindCategory;

/// One parsed symbol-graph document: a main document or an extension
/// fragment. Both use the identical shape; only the file name distinguishes
/// them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolGraph {
    /// The module this document describes. For an extension fragment this is
    /// still the *declaring* module, not the extended one.
    pub module: ModuleInfo,

    /// Flat list of symbols. Nesting is encoded in `path_components`, not in
    /// the document structure.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub symbols: Vec<Symbol>,

    /// Edges between symbols. Targets may reference symbols outside this
    /// document (other modules, the standard library).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relationships: Vec<Relationship>,
}

/// Module metadata carried by every document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleInfo {
    /// The module name as spelled in source (e.g. `"NetworkKit"`).
    pub name: String,
}

/// A single declared symbol.
///
/// Symbols are the vertices of the graph. Each carries its unique precise
/// identifier, a kind tag, its position in the name hierarchy, raw
/// declaration tokens, and an optional documentation comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Symbol {
    /// Unique identity of this symbol.
    pub identifier: SymbolIdentifier,

    /// The compiler's kind tag (e.g. `swift.struct`, `swift.method`).
    pub kind: SymbolKind,

    /// Ordered name segments from the module root to this symbol.
    ///
    /// `["Connection"]` is a top-level symbol; `["Connection", "open"]` is a
    /// member of `Connection`. A first segment naming a type that is not
    /// declared in this module marks an extension member.
    pub path_components: Vec<String>,

    /// Human-readable names for this symbol.
    pub names: SymbolNames,

    /// Documentation comment, if the source carried one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_comment: Option<DocComment>,

    /// Raw declaration tokens in source order. Access-control keywords are
    /// not included by the compiler; renderers add them back.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub declaration_fragments: Vec<DeclarationFragment>,

    /// Declared access level. Defaults to `internal` when absent so that
    /// malformed symbols fall on the non-exported side of the filter.
    #[serde(default)]
    pub access_level: AccessLevel,
}

impl Symbol {
    /// Returns the precise (mangled, globally unique) identifier string.
    pub fn precise_id(&self) -> &str {
        &self.identifier.precise
    }

    /// Returns the display title.
    pub fn title(&self) -> &str {
        &self.names.title
    }

    /// Returns the structural category parsed from the kind tag.
    pub fn category(&self) -> KindCategory {
        KindCategory::parse(&self.kind.identifier)
    }

    /// Returns `true` if this symbol sits directly under the module root.
    pub fn is_top_level(&self) -> bool {
        self.path_components.len() == 1
    }

    /// Returns the path components joined with `.`, the spelling used in
    /// logs and diagnostics (e.g. `"Connection.State"`).
    pub fn joined_path(&self) -> String {
        self.path_components.join(".")
    }

    /// Iterates over the text of each documentation line, in order. Empty
    /// when the symbol has no doc comment.
    pub fn doc_lines(&self) -> impl Iterator<Item = &str> {
        self.doc_comment
            .iter()
            .flat_map(|doc| doc.lines.iter())
            .map(|line| line.text.as_str())
    }
}

/// Unique identity of a symbol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolIdentifier {
    /// The compiler's globally unique mangled identifier. This is the key
    /// relationships refer to.
    pub precise: String,

    /// Source language tag (e.g. `"swift"`), when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface_language: Option<String>,
}

/// The compiler's kind tag for a symbol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolKind {
    /// Namespaced kind identifier (e.g. `swift.class`, `swift.enum.case`).
    pub identifier: String,

    /// Human-readable kind name (e.g. `"Structure"`), when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// Naming information for a symbol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SymbolNames {
    /// Display title: the declared name for types and members, the full
    /// signature head for functions (e.g. `init(host:port:)`).
    pub title: String,
}

/// One token of a declaration.
///
/// Concatenating the spellings of a symbol's fragments in order reproduces
/// its declaration as written, minus access-control keywords.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeclarationFragment {
    /// Token class (`keyword`, `identifier`, `text`, `typeIdentifier`, ...).
    pub kind: String,

    /// Literal token text, including any surrounding whitespace.
    pub spelling: String,
}

/// A documentation comment attached to a symbol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocComment {
    /// Comment lines in source order, already stripped of comment markers.
    #[serde(default)]
    pub lines: Vec<DocLine>,
}

/// One line of a documentation comment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocLine {
    /// Line text without the leading `///`.
    pub text: String,
}

/// A directed edge between two symbols.
///
/// The kind vocabulary is open (`memberOf`, `inheritsFrom`, `conformsTo`,
/// `overrides`, ...); unknown kinds are carried through untouched. `source`
/// and `target` are precise identifiers, and `target` frequently refers to a
/// symbol outside the loaded set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    /// Edge kind tag.
    pub kind: String,

    /// Precise identifier of the depending symbol.
    pub source: String,

    /// Precise identifier of the depended-upon symbol.
    pub target: String,
}

impl Relationship {
    /// Returns `true` for superclass edges (`inheritsFrom`).
    pub fn is_inherits_from(&self) -> bool {
        self.kind == "inheritsFrom"
    }

    /// Returns `true` for protocol-conformance edges (`conformsTo`).
    pub fn is_conforms_to(&self) -> bool {
        self.kind == "conformsTo"
    }
}

/// Declared access level of a symbol.
///
/// Mirrors the source-language access-control ladder. Unrecognized values
/// parse as [`AccessLevel::Unknown`] rather than failing the document.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    /// Public and subclassable/overridable outside the module.
    Open,
    /// Visible outside the module.
    Public,
    /// Visible within the declaring package.
    Package,
    /// Visible within the declaring module only.
    #[default]
    Internal,
    /// Visible within the declaring file only.
    Fileprivate,
    /// Visible within the enclosing scope only.
    Private,
    /// Any value this schema does not know about.
    #[serde(other)]
    Unknown,
}

impl AccessLevel {
    /// Returns `true` if symbols at this level are part of the module's
    /// exported interface (`public` or `open`).
    pub fn is_exported(self) -> bool {
        matches!(self, Self::Open | Self::Public)
    }
}

/// Aggregated view of one module: the main document plus every loaded
/// extension fragment, concatenated.
///
/// Precise identifiers are expected to be unique across the aggregate;
/// consumers that index by identifier keep the first occurrence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModuleGraph {
    /// Module name from the main document.
    pub module_name: String,

    /// Symbols from the main document followed by fragment symbols, in
    /// document order.
    pub symbols: Vec<Symbol>,

    /// Relationships from the main document followed by fragment
    /// relationships, in document order.
    pub relationships: Vec<Relationship>,
}

impl ModuleGraph {
    /// Creates an aggregate seeded from the module's main document.
    pub fn from_main(main: SymbolGraph) -> Self {
        Self {
            module_name: main.module.name,
            symbols: main.symbols,
            relationships: main.relationships,
        }
    }

    /// Folds an extension fragment's contents into the aggregate.
    pub fn absorb(&mut self, fragment: SymbolGraph) {
        self.symbols.extend(fragment.symbols);
        self.relationships.extend(fragment.relationships);
    }

    /// Total number of symbols across main document and fragments.
    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }
}
