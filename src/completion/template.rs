//! Template argument list lookahead
//!
//! After a name, `<` may open a template argument list or compare. Tokens
//! are buffered until the brackets balance again, then replayed with
//! template interpretation on. A buffer that can no longer balance is
//! replayed with templates off.

use std::collections::VecDeque;
use std::mem;

use tracing::debug;

use super::processor::CompletionTokenProcessor;
use super::token::SourceToken;
use crate::errors::{ErrorCode, ScanDiagnostic, Severity};
use crate::expr::ExprKind;
use crate::lexer::TokenKind;

/// Bracket nesting seen since the buffered `<`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Counters {
    angle: i32,
    paren: i32,
    bracket: i32,
    brace: i32,
}

impl Counters {
    /// Each counter only moves while the enclosing kinds are balanced
    fn apply(&mut self, kind: TokenKind) {
        match kind {
            TokenKind::LT if self.paren == 0 && self.bracket == 0 && self.brace == 0 => {
                self.angle += 1;
            }
            TokenKind::GT if self.paren == 0 && self.bracket == 0 && self.brace == 0 => {
                self.angle -= 1;
            }
            TokenKind::GTGT if self.paren == 0 && self.bracket == 0 && self.brace == 0 => {
                self.angle = (self.angle - 2).max(0);
            }
            TokenKind::LPAREN if self.bracket == 0 && self.brace == 0 => self.paren += 1,
            TokenKind::RPAREN if self.bracket == 0 && self.brace == 0 => self.paren -= 1,
            TokenKind::LBRACKET if self.paren == 0 && self.brace == 0 => self.bracket += 1,
            TokenKind::RBRACKET if self.paren == 0 && self.brace == 0 => self.bracket -= 1,
            TokenKind::LBRACE if self.paren == 0 && self.bracket == 0 => self.brace += 1,
            TokenKind::RBRACE if self.paren == 0 && self.bracket == 0 => self.brace -= 1,
            _ => {}
        }
    }

    fn balanced(&self) -> bool {
        *self == Self::default()
    }

    /// A closer without its opener: the `<` was a comparison
    fn broken(&self) -> bool {
        self.paren < 0 || self.bracket < 0 || self.brace < 0
    }

    fn outer_level(&self) -> bool {
        self.paren == 0 && self.bracket == 0 && self.brace == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Lookahead {
    Buffer,
    /// Brackets balanced, replay as a template argument list
    Resolved,
    /// Replay as comparison
    NotTemplate,
}

#[derive(Debug, Default)]
pub struct TemplateLookahead {
    counters: Counters,
    pub(super) buffer: Vec<SourceToken>,
}

impl TemplateLookahead {
    pub(super) fn feed(&mut self, kind: TokenKind) -> Lookahead {
        let mut next = self.counters;
        next.apply(kind);
        if self.buffer.is_empty() {
            self.counters = next;
            return Lookahead::Buffer;
        }
        if next.broken() || (kind == TokenKind::SEMICOLON && next.outer_level()) {
            return Lookahead::NotTemplate;
        }
        if next.balanced() {
            return Lookahead::Resolved;
        }
        self.counters = next;
        Lookahead::Buffer
    }

    pub(super) fn reset(&mut self) -> Vec<SourceToken> {
        self.counters = Counters::default();
        mem::take(&mut self.buffer)
    }
}

/// Index of the first closer that does not match the innermost opener
pub(super) fn first_bracket_mismatch<'a>(
    tokens: impl IntoIterator<Item = &'a SourceToken>,
) -> Option<usize> {
    let mut openers = Vec::new();
    for (index, token) in tokens.into_iter().enumerate() {
        let expected = match token.kind {
            TokenKind::LT | TokenKind::LPAREN | TokenKind::LBRACKET | TokenKind::LBRACE => {
                openers.push(token.kind);
                continue;
            }
            TokenKind::GT => TokenKind::LT,
            TokenKind::RPAREN => TokenKind::LPAREN,
            TokenKind::RBRACKET => TokenKind::LBRACKET,
            TokenKind::RBRACE => TokenKind::LBRACE,
            _ => continue,
        };
        match openers.pop() {
            Some(opener) if opener != expected => return Some(index),
            _ => {}
        }
    }
    None
}

impl CompletionTokenProcessor {
    fn is_template_ambiguity(&self, kind: TokenKind) -> bool {
        if !self.templates_enabled {
            return false;
        }
        let starts = match self.template.buffer.first() {
            Some(first) => first.kind == TokenKind::LT,
            None => kind == TokenKind::LT,
        };
        starts && self.can_template_ambiguity_happen()
    }

    /// The top of stack could name a template
    pub(super) fn can_template_ambiguity_happen(&self) -> bool {
        let Some(top) = self.peek() else {
            return false;
        };
        match self.arena.kind(top) {
            ExprKind::VARIABLE | ExprKind::ARROW | ExprKind::MEMBER_POINTER => true,
            ExprKind::DOT | ExprKind::SCOPE => self
                .arena
                .last_param(top)
                .is_none_or(|last| self.arena.kind(last) != ExprKind::METHOD),
            _ => false,
        }
    }

    pub(super) fn template_lookahead(&mut self, token: SourceToken, may_be_in_lambda: bool) {
        if self.is_template_ambiguity(token.kind) {
            match self.template.feed(token.kind) {
                Lookahead::Buffer => {
                    self.template.buffer.push(token);
                    return;
                }
                Lookahead::Resolved => {
                    let buffered = self.template.reset();
                    debug!("[TEMPLATE] balanced after {} tokens", buffered.len() + 1);
                    for buffered_token in buffered {
                        self.token_impl(buffered_token, may_be_in_lambda);
                    }
                    self.token_impl(token, may_be_in_lambda);
                    return;
                }
                Lookahead::NotTemplate => {
                    let buffered = self.template.reset();
                    debug!(
                        "[TEMPLATE] {:?} at {:?} breaks the argument list",
                        token.kind, token.offset
                    );
                    self.report_abandoned(&buffered, &token);
                    let saved = self.templates_enabled;
                    self.templates_enabled = false;
                    for buffered_token in buffered {
                        self.token_impl(buffered_token, may_be_in_lambda);
                    }
                    self.templates_enabled = saved;
                    self.token_impl(token, may_be_in_lambda);
                    return;
                }
            }
        }
        if !self.template.buffer.is_empty() {
            let buffered = self.template.reset();
            for buffered_token in buffered {
                self.token_impl(buffered_token, may_be_in_lambda);
            }
        }
        self.token_impl(token, may_be_in_lambda);
    }

    fn report_abandoned(&mut self, buffered: &[SourceToken], breaking: &SourceToken) {
        let Some(first) = buffered.first() else {
            return;
        };
        let diagnostic = ScanDiagnostic::builder(ErrorCode::E0203)
            .range(first.range().cover(breaking.range()))
            .severity(Severity::Hint)
            .hint(format!("`{}` read as a comparison", first.text))
            .build();
        self.report(diagnostic);
    }

    /// Replay an unresolved buffer at a statement boundary
    ///
    /// Templates stay off up to the first mismatched closer, after which the
    /// rest of the buffer is re-evaluated.
    pub(super) fn flush_template_lookahead(&mut self) {
        if self.template.buffer.is_empty() {
            return;
        }
        let mut pending: VecDeque<SourceToken> = self.template.reset().into();
        let saved = self.templates_enabled;

        let mut disable_until = first_bracket_mismatch(&pending);
        if let (Some(index), Some(first)) = (disable_until, pending.front()) {
            let range = first.range().cover(pending[index].range());
            let diagnostic = ScanDiagnostic::builder(ErrorCode::E0201)
                .range(range)
                .severity(Severity::Warning)
                .hint(format!("`{}` closes a different bracket", pending[index].text))
                .build();
            self.report(diagnostic);
        }
        debug!(
            "[TEMPLATE] unresolved at boundary, replaying {} tokens",
            pending.len()
        );

        self.templates_enabled = saved && disable_until.is_none();
        while let Some(token) = pending.pop_front() {
            self.token_impl(token, false);
            match disable_until {
                Some(0) => {
                    disable_until = first_bracket_mismatch(&pending);
                    self.templates_enabled = saved && disable_until.is_none();
                }
                Some(ref mut index) => *index -= 1,
                None => {}
            }
        }
        self.templates_enabled = saved;
    }
}
