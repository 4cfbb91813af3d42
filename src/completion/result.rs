//! Finished scans
//!
//! A [`ScanResult`] owns the arena and the final stack of a scan and answers
//! the questions a completion provider asks about the cursor position.

use std::fmt;

use text_size::TextSize;

use super::token::SourceToken;
use crate::errors::ScanDiagnostic;
use crate::expr::{ExprArena, ExprId, ExprKind, ExprNode};
use crate::lexer::TokenKind;

#[derive(Debug, Clone)]
pub struct ScanResult {
    arena: ExprArena,
    stack: Vec<ExprId>,
    error_state: bool,
    last_separator: Option<TextSize>,
    last_token: Option<SourceToken>,
    diagnostics: Vec<ScanDiagnostic>,
    /// The scanned text was wrapped in an outer `( ... )`
    wrapped: bool,
}

impl ScanResult {
    pub(crate) fn new(
        arena: ExprArena,
        stack: Vec<ExprId>,
        error_state: bool,
        last_separator: Option<TextSize>,
        last_token: Option<SourceToken>,
        diagnostics: Vec<ScanDiagnostic>,
    ) -> Self {
        Self {
            arena,
            stack,
            error_state,
            last_separator,
            last_token,
            diagnostics,
            wrapped: false,
        }
    }

    pub(crate) fn with_wrapping(mut self, wrapped: bool) -> Self {
        self.wrapped = wrapped;
        self
    }

    /// Top-level nodes, bottom to top
    pub fn stack(&self) -> &[ExprId] {
        &self.stack
    }

    pub fn result_exp(&self) -> Option<ExprId> {
        self.stack.last().copied()
    }

    pub fn result_node(&self) -> Option<&ExprNode> {
        self.result_exp().map(|id| self.arena.node(id))
    }

    pub fn arena(&self) -> &ExprArena {
        &self.arena
    }

    pub fn node(&self, id: ExprId) -> &ExprNode {
        self.arena.node(id)
    }

    pub fn is_error_state(&self) -> bool {
        self.error_state
    }

    pub fn last_separator_offset(&self) -> Option<TextSize> {
        self.last_separator
    }

    /// Last source token fed before the cursor, clipped at the cursor
    pub fn last_token(&self) -> Option<&SourceToken> {
        self.last_token.as_ref()
    }

    pub fn diagnostics(&self) -> &[ScanDiagnostic] {
        &self.diagnostics
    }

    /// S-expression of the result node
    pub fn render(&self) -> Option<String> {
        self.result_exp().map(|id| self.arena.render(id))
    }

    /// Innermost call left open at the cursor, the anchor for parameter hints
    ///
    /// Follows the last parameter of each node down from the result, since
    /// the cursor always sits at the right edge of the tree.
    pub fn innermost_call(&self) -> Option<ExprId> {
        let mut current = self.result_exp();
        let mut call = None;
        while let Some(id) = current {
            let node = self.arena.node(id);
            let is_call = matches!(
                node.kind,
                ExprKind::METHOD | ExprKind::LAMBDA_CALL | ExprKind::CONSTRUCTOR
            );
            if is_call && node.implicitly_closed {
                call = Some(id);
            }
            current = node.params.last().copied();
        }
        call
    }

    /// Whether completion makes sense at the cursor
    ///
    /// Not inside a comment, an unterminated literal or a directive name, and
    /// only when the scan produced a result without ending in recovery.
    pub fn is_completable(&self) -> bool {
        if let Some(token) = &self.last_token {
            if is_inert_token(token) {
                return false;
            }
        }
        !self.error_state && self.result_exp().is_some()
    }

    /// Result node of an expression scan
    ///
    /// With `keep_whole_ast` the outer parentheses added around the
    /// expression are removed again.
    pub fn expression_result(&self, keep_whole_ast: bool) -> Option<ExprId> {
        let top = self.result_exp()?;
        if !(self.wrapped && keep_whole_ast) {
            return Some(top);
        }
        let node = self.arena.node(top);
        match node.kind {
            ExprKind::PARENTHESIS | ExprKind::CONVERSION if node.params.len() == 1 => {
                Some(node.params[0])
            }
            _ => Some(top),
        }
    }

    /// Indented rendering of every stack entry
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for (index, &id) in self.stack.iter().enumerate() {
            out.push_str(&format!("[{index}]\n"));
            self.arena.dump(id, 2, &mut out);
        }
        out
    }
}

impl fmt::Display for ScanResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "stack size {}", self.stack.len())?;
        f.write_str(&self.dump())
    }
}

/// Tokens inside which no completion is offered
fn is_inert_token(token: &SourceToken) -> bool {
    let text = token.text.as_str();
    match token.kind {
        TokenKind::LINE_COMMENT | TokenKind::DOXYGEN_LINE_COMMENT => true,
        TokenKind::BLOCK_COMMENT | TokenKind::DOXYGEN_COMMENT => {
            text.len() < 4 || !text.ends_with("*/")
        }
        TokenKind::STRING_LITERAL | TokenKind::CHAR_LITERAL => !is_closed_quote(text),
        TokenKind::RAW_STRING_LITERAL => !text.ends_with(")\""),
        kind => kind.is_directive_keyword(),
    }
}

/// `"abc"` / `L'x'`: the body after the prefix opens and closes with a quote
fn is_closed_quote(text: &str) -> bool {
    let Some(start) = text.find(['"', '\'']) else {
        return false;
    };
    let body = &text[start..];
    if body.len() < 2 {
        return false;
    }
    let quote = &body[..1];
    if !body.ends_with(quote) {
        return false;
    }
    // an escaped closing quote does not count
    let inner = &body[1..body.len() - 1];
    let trailing_backslashes = inner.chars().rev().take_while(|&c| c == '\\').count();
    trailing_backslashes % 2 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(kind: TokenKind, text: &str) -> SourceToken {
        SourceToken::new(kind, text, TextSize::new(0))
    }

    #[test]
    fn test_comments_are_inert() {
        assert!(is_inert_token(&token(TokenKind::LINE_COMMENT, "// a")));
        assert!(is_inert_token(&token(TokenKind::BLOCK_COMMENT, "/* open")));
        assert!(!is_inert_token(&token(TokenKind::BLOCK_COMMENT, "/* closed */")));
        assert!(is_inert_token(&token(TokenKind::BLOCK_COMMENT, "/*/")));
    }

    #[test]
    fn test_unterminated_literals_are_inert() {
        assert!(is_inert_token(&token(TokenKind::STRING_LITERAL, "\"abc")));
        assert!(is_inert_token(&token(TokenKind::STRING_LITERAL, "\"ab\\\"")));
        assert!(!is_inert_token(&token(TokenKind::STRING_LITERAL, "u8\"abc\"")));
        assert!(!is_inert_token(&token(TokenKind::CHAR_LITERAL, "L'x'")));
        assert!(is_inert_token(&token(TokenKind::CHAR_LITERAL, "'")));
    }

    #[test]
    fn test_directive_name_is_inert() {
        assert!(is_inert_token(&token(TokenKind::PREPROCESSOR_INCLUDE, "include")));
        assert!(!is_inert_token(&token(TokenKind::IDENTIFIER, "include")));
    }
}
