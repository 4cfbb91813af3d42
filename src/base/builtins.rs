//! Builtin types
//!
//! Constants pushed by the recognizer carry the name of their builtin type as
//! a type hint. The table is built once and shared read-only.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

use crate::lexer::TokenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BuiltinCategory {
    Void,
    Boolean,
    Character,
    Integer,
    Floating,
    /// `const char *` for string literals
    Pointer,
    NullPointer,
}

/// A builtin type known without any symbol lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BuiltinType {
    pub name: &'static str,
    pub category: BuiltinCategory,
}

impl BuiltinType {
    const fn new(name: &'static str, category: BuiltinCategory) -> Self {
        Self { name, category }
    }

    pub fn is_arithmetic(&self) -> bool {
        matches!(
            self.category,
            BuiltinCategory::Boolean
                | BuiltinCategory::Character
                | BuiltinCategory::Integer
                | BuiltinCategory::Floating
        )
    }
}

const BUILTINS: &[BuiltinType] = &[
    BuiltinType::new("void", BuiltinCategory::Void),
    BuiltinType::new("bool", BuiltinCategory::Boolean),
    BuiltinType::new("char", BuiltinCategory::Character),
    BuiltinType::new("wchar_t", BuiltinCategory::Character),
    BuiltinType::new("char16_t", BuiltinCategory::Character),
    BuiltinType::new("char32_t", BuiltinCategory::Character),
    BuiltinType::new("short", BuiltinCategory::Integer),
    BuiltinType::new("int", BuiltinCategory::Integer),
    BuiltinType::new("long", BuiltinCategory::Integer),
    BuiltinType::new("long long", BuiltinCategory::Integer),
    BuiltinType::new("unsigned int", BuiltinCategory::Integer),
    BuiltinType::new("unsigned long", BuiltinCategory::Integer),
    BuiltinType::new("unsigned long long", BuiltinCategory::Integer),
    BuiltinType::new("float", BuiltinCategory::Floating),
    BuiltinType::new("double", BuiltinCategory::Floating),
    BuiltinType::new("long double", BuiltinCategory::Floating),
    BuiltinType::new("const char *", BuiltinCategory::Pointer),
    BuiltinType::new("nullptr", BuiltinCategory::NullPointer),
];

static BUILTIN_TABLE: Lazy<FxHashMap<&'static str, BuiltinType>> =
    Lazy::new(|| BUILTINS.iter().map(|ty| (ty.name, *ty)).collect());

/// Look up a builtin type by its spelled name
pub fn builtin_type(name: &str) -> Option<&'static BuiltinType> {
    BUILTIN_TABLE.get(name)
}

/// Type of a literal token, `text` decides between narrow and wide characters
pub fn literal_type(kind: TokenKind, text: &str) -> Option<&'static BuiltinType> {
    let name = match kind {
        TokenKind::INT_LITERAL => "int",
        TokenKind::UNSIGNED_LITERAL => "unsigned int",
        TokenKind::LONG_LITERAL => "long",
        TokenKind::LONG_LONG_LITERAL => "long long",
        TokenKind::UNSIGNED_LONG_LITERAL => "unsigned long",
        TokenKind::UNSIGNED_LONG_LONG_LITERAL => "unsigned long long",
        TokenKind::FLOAT_LITERAL => "float",
        TokenKind::DOUBLE_LITERAL => "double",
        TokenKind::CHAR_LITERAL if text.starts_with('L') => "wchar_t",
        TokenKind::CHAR_LITERAL => "char",
        TokenKind::STRING_LITERAL | TokenKind::RAW_STRING_LITERAL => "const char *",
        TokenKind::TRUE | TokenKind::FALSE => "bool",
        TokenKind::NULLPTR => "nullptr",
        _ => return None,
    };
    builtin_type(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_lookup() {
        let int = builtin_type("int").unwrap();
        assert_eq!(int.category, BuiltinCategory::Integer);
        assert!(int.is_arithmetic());
        assert!(builtin_type("std::string").is_none());
    }

    #[test]
    fn test_literal_types() {
        assert_eq!(literal_type(TokenKind::INT_LITERAL, "1").unwrap().name, "int");
        assert_eq!(
            literal_type(TokenKind::UNSIGNED_LONG_LONG_LITERAL, "1ull").unwrap().name,
            "unsigned long long"
        );
        assert_eq!(literal_type(TokenKind::CHAR_LITERAL, "'a'").unwrap().name, "char");
        assert_eq!(literal_type(TokenKind::CHAR_LITERAL, "L'a'").unwrap().name, "wchar_t");
        assert_eq!(
            literal_type(TokenKind::RAW_STRING_LITERAL, "R\"(x)\"").unwrap().name,
            "const char *"
        );
        assert_eq!(literal_type(TokenKind::TRUE, "true").unwrap().name, "bool");
        assert!(literal_type(TokenKind::IDENTIFIER, "x").is_none());
    }

    #[test]
    fn test_every_literal_kind_has_a_type() {
        let literals = [
            TokenKind::INT_LITERAL,
            TokenKind::UNSIGNED_LITERAL,
            TokenKind::LONG_LITERAL,
            TokenKind::LONG_LONG_LITERAL,
            TokenKind::UNSIGNED_LONG_LITERAL,
            TokenKind::UNSIGNED_LONG_LONG_LITERAL,
            TokenKind::FLOAT_LITERAL,
            TokenKind::DOUBLE_LITERAL,
            TokenKind::CHAR_LITERAL,
            TokenKind::STRING_LITERAL,
            TokenKind::RAW_STRING_LITERAL,
        ];
        for kind in literals {
            assert!(kind.is_literal());
            assert!(literal_type(kind, "").is_some(), "{kind:?}");
        }
    }
}
