//! Object-like macro expansion in front of the recognizer

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::completion::SourceToken;
use crate::lexer::{Lexer, TokenKind};

/// Rewrites a macro invocation into its replacement tokens
///
/// Returned tokens must be flagged `from_macro` and carry the offset of the
/// invocation; the recognizer never clips them at the cursor.
pub trait MacroExpander {
    fn expand(&self, token: &SourceToken) -> Option<Vec<SourceToken>>;
}

/// Object-like macros, lexed once when defined
///
/// Expansion is one level deep: names inside a replacement are not expanded
/// again.
#[derive(Debug, Clone, Default)]
pub struct MacroTable {
    macros: FxHashMap<SmolStr, Vec<(TokenKind, SmolStr)>>,
}

impl MacroTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define or redefine `name`; trivia in the replacement is dropped
    pub fn define(&mut self, name: &str, replacement: &str) {
        let tokens = Lexer::new(replacement)
            .filter(|token| !token.kind.is_trivia())
            .map(|token| (token.kind, SmolStr::new(token.text)))
            .collect();
        self.macros.insert(SmolStr::new(name), tokens);
    }

    pub fn undef(&mut self, name: &str) -> bool {
        self.macros.remove(name).is_some()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.macros.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.macros.len()
    }

    pub fn is_empty(&self) -> bool {
        self.macros.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for MacroTable {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (name, replacement) in iter {
            table.define(name, replacement);
        }
        table
    }
}

impl MacroExpander for MacroTable {
    fn expand(&self, token: &SourceToken) -> Option<Vec<SourceToken>> {
        if token.kind != TokenKind::IDENTIFIER || token.from_macro {
            return None;
        }
        let replacement = self.macros.get(token.text.as_str())?;
        let expanded = replacement
            .iter()
            .map(|(kind, text)| SourceToken::expanded(*kind, text.clone(), token.offset))
            .collect();
        Some(expanded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use text_size::TextSize;

    #[test]
    fn test_define_lexes_replacement() {
        let table: MacroTable = [("NULL", "((void *) 0)")].into_iter().collect();
        let token = SourceToken::new(TokenKind::IDENTIFIER, "NULL", TextSize::new(7));
        let expanded = table.expand(&token).unwrap();
        let kinds: Vec<_> = expanded.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::LPAREN,
                TokenKind::LPAREN,
                TokenKind::VOID,
                TokenKind::STAR,
                TokenKind::RPAREN,
                TokenKind::INT_LITERAL,
                TokenKind::RPAREN,
            ]
        );
        assert!(expanded.iter().all(|t| t.from_macro && t.offset == TextSize::new(7)));
    }

    #[test]
    fn test_only_identifiers_expand() {
        let mut table = MacroTable::new();
        table.define("x", "1");
        let literal = SourceToken::new(TokenKind::INT_LITERAL, "x", TextSize::new(0));
        assert!(table.expand(&literal).is_none());
        let unknown = SourceToken::new(TokenKind::IDENTIFIER, "y", TextSize::new(0));
        assert!(table.expand(&unknown).is_none());
    }

    #[test]
    fn test_undef() {
        let mut table = MacroTable::new();
        table.define("A", "");
        assert!(table.contains("A"));
        assert_eq!(table.len(), 1);
        assert!(table.undef("A"));
        assert!(!table.undef("A"));
        assert!(table.is_empty());
    }
}
