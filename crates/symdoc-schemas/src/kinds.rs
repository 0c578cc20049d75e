//! Structural categories for symbol kind identifiers.
//!
//! Kind identifiers arrive as namespaced strings (`swift.struct`,
//! `swift.enum.case`, ...). Pipeline phases never match on the raw strings;
//! they go through [`KindCategory`], which collapses the open vocabulary into
//! the structural distinctions the generator cares about.

/// Structural category of a symbol, derived from its kind identifier.
///
/// The vocabulary of kind identifiers is open; anything unrecognized lands
/// in [`KindCategory::Other`] and is treated as a leaf declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KindCategory {
    /// `class` declarations.
    Class,
    /// `struct` declarations.
    Struct,
    /// `enum` declarations.
    Enum,
    /// `protocol` declarations.
    Protocol,
    /// `typealias` declarations.
    TypeAlias,
    /// `associatedtype` requirements.
    AssociatedType,
    /// Cases of an enum.
    EnumCase,
    /// Instance properties.
    Property,
    /// Type-scoped (static/class) properties.
    TypeProperty,
    /// Instance methods, initializers, deinitializers, and subscripts.
    Method,
    /// Type-scoped (static/class) methods and subscripts.
    TypeMethod,
    /// Free functions and operators.
    Func,
    /// Module-level variables.
    GlobalVar,
    /// Macro declarations.
    Macro,
    /// Extension declarations emitted as symbols in their own right.
    Extension,
    /// Anything this schema does not recognize.
    Other,
}

impl KindCategory {
    /// Parses a namespaced kind identifier (e.g. `swift.type.method`).
    ///
    /// The language namespace before the first `.` is ignored, so `swift.*`
    /// and `objc.*` tags classify identically.
    pub fn parse(identifier: &str) -> Self {
        let bare = identifier
            .split_once('.')
            .map_or(identifier, |(_, rest)| rest);
        match bare {
            "class" => Self::Class,
            "struct" => Self::Struct,
            "enum" => Self::Enum,
            "protocol" => Self::Protocol,
            "typealias" => Self::TypeAlias,
            "associatedtype" => Self::AssociatedType,
            "enum.case" => Self::EnumCase,
            "property" => Self::Property,
            "type.property" => Self::TypeProperty,
            "method" | "init" | "deinit" | "subscript" => Self::Method,
            "type.method" | "type.subscript" => Self::TypeMethod,
            "func" | "func.op" => Self::Func,
            "var" => Self::GlobalVar,
            "macro" => Self::Macro,
            "extension" => Self::Extension,
            _ => Self::Other,
        }
    }

    /// Returns `true` for kinds that declare a body block of members:
    /// classes, structs, enums, and protocols.
    pub fn is_container(self) -> bool {
        matches!(
            self,
            Self::Class | Self::Struct | Self::Enum | Self::Protocol
        )
    }

    /// Returns `true` for kinds that introduce a type name: containers plus
    /// type aliases and associated types.
    pub fn is_type_declaration(self) -> bool {
        self.is_container()
            || matches!(self, Self::TypeAlias | Self::AssociatedType)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_known_identifier() {
        for (identifier, category) in [
            ("swift.class", KindCategory::Class),
            ("swift.struct", KindCategory::Struct),
            ("swift.enum", KindCategory::Enum),
            ("swift.protocol", KindCategory::Protocol),
            ("swift.typealias", KindCategory::TypeAlias),
            ("swift.associatedtype", KindCategory::AssociatedType),
            ("swift.enum.case", KindCategory::EnumCase),
            ("swift.property", KindCategory::Property),
            ("swift.type.property", KindCategory::TypeProperty),
            ("swift.method", KindCategory::Method),
            ("swift.init", KindCategory::Method),
            ("swift.deinit", KindCategory::Method),
            ("swift.subscript", KindCategory::Method),
            ("swift.type.method", KindCategory::TypeMethod),
            ("swift.type.subscript", KindCategory::TypeMethod),
            ("swift.func", KindCategory::Func),
            ("swift.func.op", KindCategory::Func),
            ("swift.var", KindCategory::GlobalVar),
            ("swift.macro", KindCategory::Macro),
            ("swift.extension", KindCategory::Extension),
        ] {
            assert_eq!(
                KindCategory::parse(identifier),
                category,
                "for {identifier}"
            );
        }
    }

    #[test]
    fn unknown_identifiers_fall_through() {
        assert_eq!(
            KindCategory::parse("swift.dynamic.replacement"),
            KindCategory::Other
        );
        assert_eq!(KindCategory::parse(""), KindCategory::Other);
        assert_eq!(KindCategory::parse("noNamespace"), KindCategory::Other);
    }

    #[test]
    fn namespace_is_ignored() {
        assert_eq!(KindCategory::parse("objc.method"), KindCategory::Method);
        assert_eq!(KindCategory::parse("objc.class"), KindCategory::Class);
    }

    #[test]
    fn container_kinds() {
        assert!(KindCategory::Class.is_container());
        assert!(KindCategory::Struct.is_container());
        assert!(KindCategory::Enum.is_container());
        assert!(KindCategory::Protocol.is_container());
        assert!(!KindCategory::Extension.is_container());
        assert!(!KindCategory::Method.is_container());
        assert!(!KindCategory::TypeAlias.is_container());
    }

    #[test]
    fn type_declaration_kinds() {
        assert!(KindCategory::TypeAlias.is_type_declaration());
        assert!(KindCategory::AssociatedType.is_type_declaration());
        assert!(KindCategory::Protocol.is_type_declaration());
        assert!(!KindCategory::Property.is_type_declaration());
        assert!(!KindCategory::Func.is_type_declaration());
    }
}
