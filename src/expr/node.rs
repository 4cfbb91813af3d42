//! Expression nodes stored in an [`ExprArena`](super::ExprArena)

use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

use super::ExprKind;
use crate::lexer::TokenKind;

/// Index of a node in its arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExprId(pub(crate) u32);

impl ExprId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A lexeme that contributed to a node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExprToken {
    pub kind: TokenKind,
    pub offset: TextSize,
    pub text: SmolStr,
}

impl ExprToken {
    pub fn new(kind: TokenKind, offset: TextSize, text: impl Into<SmolStr>) -> Self {
        Self {
            kind,
            offset,
            text: text.into(),
        }
    }

    pub fn range(&self) -> TextRange {
        TextRange::at(self.offset, TextSize::of(self.text.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExprNode {
    pub kind: ExprKind,
    pub tokens: Vec<ExprToken>,
    /// Children in source order; operators hold the left operand first
    pub params: Vec<ExprId>,
    /// Textual type for constants and type names (`"int"`, `"const char *"`)
    pub type_hint: Option<SmolStr>,
    /// Closed by end of input rather than by a closing token
    pub implicitly_closed: bool,
}

impl ExprNode {
    pub fn new(kind: ExprKind) -> Self {
        Self {
            kind,
            tokens: Vec::new(),
            params: Vec::new(),
            type_hint: None,
            implicitly_closed: false,
        }
    }

    pub fn token_kind(&self, index: usize) -> Option<TokenKind> {
        self.tokens.get(index).map(|t| t.kind)
    }

    /// Text of the first token, empty for nodes without tokens
    pub fn text(&self) -> &str {
        self.tokens.first().map(|t| t.text.as_str()).unwrap_or("")
    }

    /// Offset of the first token
    pub fn offset(&self) -> Option<TextSize> {
        self.tokens.first().map(|t| t.offset)
    }

    /// A `VARIABLE` carrying one empty identifier, synthesized at the cursor
    pub fn is_placeholder(&self) -> bool {
        self.kind == ExprKind::VARIABLE
            && self.params.is_empty()
            && self.tokens.len() == 1
            && self.tokens[0].text.is_empty()
    }
}
