use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

use crate::expr::ExprToken;
use crate::lexer::{Token, TokenKind};

/// A token fed to a [`TokenProcessor`](super::TokenProcessor)
///
/// Tokens produced by a macro expansion carry the offset of the invocation
/// and are never truncated at the scan end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceToken {
    pub kind: TokenKind,
    pub text: SmolStr,
    pub offset: TextSize,
    pub from_macro: bool,
}

impl SourceToken {
    pub fn new(kind: TokenKind, text: impl Into<SmolStr>, offset: TextSize) -> Self {
        Self {
            kind,
            text: text.into(),
            offset,
            from_macro: false,
        }
    }

    /// A token produced by expanding the macro invoked at `offset`
    pub fn expanded(kind: TokenKind, text: impl Into<SmolStr>, offset: TextSize) -> Self {
        Self {
            from_macro: true,
            ..Self::new(kind, text, offset)
        }
    }

    /// Convert a lexer token, shifting it by `base` when the lexer ran on a slice
    pub fn from_lexed(token: &Token<'_>, base: TextSize) -> Self {
        Self::new(token.kind, token.text, base + token.offset)
    }

    pub fn len(&self) -> TextSize {
        TextSize::of(self.text.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn end(&self) -> TextSize {
        self.offset + self.len()
    }

    pub fn range(&self) -> TextRange {
        TextRange::at(self.offset, self.len())
    }

    pub(crate) fn to_expr_token(&self) -> ExprToken {
        ExprToken::new(self.kind, self.offset, self.text.clone())
    }
}
