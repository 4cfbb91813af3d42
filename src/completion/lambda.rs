//! Lambda introducer lookahead
//!
//! `[` is either a subscript, an attribute or the start of a lambda. Tokens
//! are buffered while they still fit `[captures](params) mutable noexcept
//! attributes -> ret {`; reaching the body brace collapses the buffer into a
//! single `LAMBDA_FUNCTION` node and the body is then scanned as a fresh
//! statement context.

use std::mem;

use tracing::debug;

use super::processor::CompletionTokenProcessor;
use super::token::SourceToken;
use crate::errors::{ErrorCode, ScanDiagnostic, Severity};
use crate::expr::{ExprId, ExprKind};
use crate::lexer::TokenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LambdaStage {
    Capture,
    TryDeclaratorParams,
    TryDeclaratorMutable,
    TryDeclaratorException,
    TryDeclaratorAttribute,
    DeclaratorAttributeParens,
    DeclaratorAttributeCpp11,
    TryDeclaratorTrailingType,
    DeclaratorTrailingTypeRest,
    Body,
    Done,
}

#[derive(Debug, Default)]
pub struct LambdaLookahead {
    pub(super) stage: Option<LambdaStage>,
    /// Bracket nesting owned by the current stage
    level: i32,
    pub(super) buffer: Vec<SourceToken>,
}

impl LambdaLookahead {
    /// Take the buffered tokens and forget the lookahead
    pub(super) fn reset(&mut self) -> Vec<SourceToken> {
        self.stage = None;
        self.level = 0;
        mem::take(&mut self.buffer)
    }

    /// Next stage after `kind`, `None` when the tokens cannot be a lambda
    pub(super) fn advance(&mut self, mut stage: LambdaStage, kind: TokenKind) -> Option<LambdaStage> {
        use LambdaStage as S;
        use TokenKind as T;

        if kind.is_trivia() {
            return Some(stage);
        }
        loop {
            match stage {
                S::Capture => {
                    match kind {
                        T::LBRACKET => {
                            self.level += 1;
                            if self.level > 1 {
                                // `[[` is an attribute
                                return None;
                            }
                        }
                        T::RBRACKET => {
                            self.level -= 1;
                            if self.level == 0 {
                                return Some(S::TryDeclaratorParams);
                            }
                        }
                        _ => {}
                    }
                    return Some(stage);
                }
                S::TryDeclaratorParams => {
                    if self.level == 0 && kind != T::LPAREN {
                        stage = S::Body;
                        continue;
                    }
                    if let Some(next) = self.nest(kind, T::LPAREN, T::RPAREN, S::TryDeclaratorMutable) {
                        return Some(next);
                    }
                    return Some(stage);
                }
                S::TryDeclaratorMutable => {
                    if kind == T::MUTABLE {
                        return Some(S::TryDeclaratorException);
                    }
                    stage = S::TryDeclaratorException;
                }
                S::TryDeclaratorException => {
                    if matches!(kind, T::THROW | T::NOEXCEPT) {
                        return Some(stage);
                    }
                    if self.level == 0 && kind != T::LPAREN {
                        stage = S::TryDeclaratorAttribute;
                        continue;
                    }
                    if let Some(next) = self.nest(kind, T::LPAREN, T::RPAREN, S::TryDeclaratorAttribute) {
                        return Some(next);
                    }
                    return Some(stage);
                }
                S::TryDeclaratorAttribute => match kind {
                    T::__ATTRIBUTE | T::__ATTRIBUTE__ => return Some(S::DeclaratorAttributeParens),
                    T::LBRACKET => stage = S::DeclaratorAttributeCpp11,
                    _ => stage = S::TryDeclaratorTrailingType,
                },
                S::DeclaratorAttributeParens => {
                    if self.level == 0 && kind != T::LPAREN {
                        return None;
                    }
                    if let Some(next) = self.nest(kind, T::LPAREN, T::RPAREN, S::TryDeclaratorAttribute) {
                        return Some(next);
                    }
                    return Some(stage);
                }
                S::DeclaratorAttributeCpp11 => {
                    if self.level == 0 && kind != T::LBRACKET {
                        return None;
                    }
                    if let Some(next) = self.nest(kind, T::LBRACKET, T::RBRACKET, S::TryDeclaratorAttribute) {
                        return Some(next);
                    }
                    return Some(stage);
                }
                S::TryDeclaratorTrailingType => {
                    if kind == T::ARROW {
                        return Some(S::DeclaratorTrailingTypeRest);
                    }
                    stage = S::Body;
                }
                S::DeclaratorTrailingTypeRest => {
                    if kind.is_type_keyword() {
                        return Some(stage);
                    }
                    match kind {
                        T::IDENTIFIER
                        | T::SCOPE
                        | T::STAR
                        | T::AMP
                        | T::AMPAMP
                        | T::TYPENAME
                        | T::TEMPLATE
                        | T::STRUCT
                        | T::CLASS
                        | T::UNION
                        | T::ENUM
                        | T::DECLTYPE => return Some(stage),
                        T::LBRACKET | T::LPAREN | T::LT => {
                            self.level += 1;
                            return Some(stage);
                        }
                        T::RBRACKET | T::RPAREN | T::GT => {
                            self.level -= 1;
                            return Some(stage);
                        }
                        _ if self.level > 0 => return Some(stage),
                        _ if self.level == 0 => stage = S::Body,
                        _ => return None,
                    }
                }
                S::Body => {
                    if self.level == 0 && kind == T::LBRACE {
                        return Some(S::Done);
                    }
                    return None;
                }
                S::Done => return Some(S::Done),
            }
        }
    }

    /// Track one bracket pair, returning `done` once it closes
    fn nest(
        &mut self,
        kind: TokenKind,
        open: TokenKind,
        close: TokenKind,
        done: LambdaStage,
    ) -> Option<LambdaStage> {
        if kind == open {
            self.level += 1;
        } else if kind == close {
            self.level -= 1;
            if self.level == 0 {
                return Some(done);
            }
        }
        None
    }
}

/// Enclosing statement context saved while a lambda body is scanned
#[derive(Debug)]
pub struct BodyFrame {
    saved_stack: Vec<ExprId>,
    lambda: ExprId,
    /// Braces opened inside the body
    depth: u32,
    nr_questions: i32,
}

impl CompletionTokenProcessor {
    fn is_lambda_ambiguity(&mut self, kind: TokenKind) -> bool {
        if !self.options.lambdas {
            return false;
        }
        if !self.lambda.buffer.is_empty() {
            return true;
        }
        if kind != TokenKind::LBRACKET {
            return false;
        }
        let ambiguous = matches!(
            self.top_kind(),
            None | Some(
                ExprKind::OPERATOR
                    | ExprKind::METHOD_OPEN
                    | ExprKind::LAMBDA_CALL_OPEN
                    | ExprKind::PARENTHESIS_OPEN
            )
        );
        if ambiguous {
            self.lambda.stage = Some(LambdaStage::Capture);
        }
        ambiguous
    }

    pub(super) fn lambda_lookahead(&mut self, token: SourceToken) {
        if self.is_lambda_ambiguity(token.kind) {
            let stage = self.lambda.stage.unwrap_or(LambdaStage::Capture);
            match self.lambda.advance(stage, token.kind) {
                Some(LambdaStage::Done) => {
                    self.lambda.buffer.push(token);
                    self.collapse_lambda();
                    return;
                }
                Some(next) => {
                    self.lambda.stage = Some(next);
                    self.lambda.buffer.push(token);
                    return;
                }
                None => {}
            }
        }
        if self.lambda.buffer.is_empty() {
            self.after_lambda(token, false);
            return;
        }
        let buffered = self.lambda.reset();
        debug!(
            "[LAMBDA] not a lambda, replaying {} tokens before {:?}",
            buffered.len(),
            token.kind
        );
        for buffered_token in buffered {
            self.after_lambda(buffered_token, true);
        }
        self.after_lambda(token, true);
    }

    /// Replay an unfinished introducer at end of input
    pub(super) fn flush_lambda_lookahead(&mut self) {
        if self.lambda.buffer.is_empty() {
            return;
        }
        let buffered = self.lambda.reset();
        debug!("[LAMBDA] end of input, replaying {} tokens", buffered.len());
        if let (Some(first), Some(last)) = (buffered.first(), buffered.last()) {
            let diagnostic = ScanDiagnostic::builder(ErrorCode::E0202)
                .range(first.range().cover(last.range()))
                .severity(Severity::Warning)
                .build();
            self.report(diagnostic);
        }
        for token in buffered {
            self.after_lambda(token, true);
        }
    }

    fn collapse_lambda(&mut self) {
        let buffered = self.lambda.reset();
        let open = buffered.iter().position(|t| t.kind == TokenKind::LBRACKET);
        let close = buffered.iter().position(|t| t.kind == TokenKind::RBRACKET);
        let (Some(open), Some(close)) = (open, close) else {
            let offset = buffered.first().map(|t| t.offset).unwrap_or_default();
            self.report_invariant(ErrorCode::E0301, offset, ErrorCode::E0301.default_message());
            for token in buffered {
                self.after_lambda(token, true);
            }
            return;
        };
        let body = &buffered[buffered.len() - 1];

        let lambda = self.arena.empty(ExprKind::LAMBDA_FUNCTION);
        for index in [open, close, buffered.len() - 1] {
            self.arena.add_token(lambda, buffered[index].to_expr_token());
        }
        debug!(
            "[LAMBDA] collapsed {} tokens at {:?}",
            buffered.len(),
            buffered[open].offset
        );
        self.push(lambda);

        let frame = BodyFrame {
            saved_stack: mem::take(&mut self.stack),
            lambda,
            depth: 0,
            nr_questions: self.nr_questions,
        };
        self.body_frames.push(frame);
        self.nr_questions = 0;
        self.error_state = false;
        self.last_valid = Some(TokenKind::LBRACE);
        if !body.from_macro {
            self.last_separator = Some(body.offset);
        }
    }

    /// Route a token past the lambda lookahead, tracking lambda body braces
    fn after_lambda(&mut self, token: SourceToken, may_be_in_lambda: bool) {
        if let Some(frame) = self.body_frames.last_mut() {
            match token.kind {
                TokenKind::LBRACE => frame.depth += 1,
                TokenKind::RBRACE if frame.depth == 0 => {
                    self.close_body(&token);
                    return;
                }
                TokenKind::RBRACE => frame.depth -= 1,
                _ => {}
            }
        }
        self.template_lookahead(token, may_be_in_lambda);
    }

    fn close_body(&mut self, token: &SourceToken) {
        self.flush_template_lookahead();
        let Some(frame) = self.body_frames.pop() else {
            return;
        };
        self.stack = frame.saved_stack;
        if self.peek() != Some(frame.lambda) {
            self.report_invariant(
                ErrorCode::E0302,
                token.offset,
                "lambda is no longer on top of the enclosing stack",
            );
        }
        self.arena.add_token(frame.lambda, token.to_expr_token());
        self.last_valid = Some(TokenKind::RBRACE);
        self.error_state = false;
        self.nr_questions = frame.nr_questions;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use TokenKind as T;

    fn run(kinds: &[TokenKind]) -> Option<LambdaStage> {
        let mut lookahead = LambdaLookahead::default();
        let mut stage = LambdaStage::Capture;
        for &kind in kinds {
            stage = lookahead.advance(stage, kind)?;
        }
        Some(stage)
    }

    #[test]
    fn test_plain_lambda() {
        assert_eq!(
            run(&[T::LBRACKET, T::RBRACKET, T::LPAREN, T::RPAREN, T::LBRACE]),
            Some(LambdaStage::Done)
        );
        assert_eq!(run(&[T::LBRACKET, T::RBRACKET, T::LBRACE]), Some(LambdaStage::Done));
    }

    #[test]
    fn test_full_declarator() {
        let tokens = [
            T::LBRACKET,
            T::AMP,
            T::RBRACKET,
            T::LPAREN,
            T::INT,
            T::IDENTIFIER,
            T::RPAREN,
            T::MUTABLE,
            T::NOEXCEPT,
            T::LBRACKET,
            T::LBRACKET,
            T::IDENTIFIER,
            T::RBRACKET,
            T::RBRACKET,
            T::ARROW,
            T::IDENTIFIER,
            T::SCOPE,
            T::IDENTIFIER,
            T::LT,
            T::INT,
            T::GT,
            T::STAR,
            T::LBRACE,
        ];
        assert_eq!(run(&tokens), Some(LambdaStage::Done));
    }

    #[test]
    fn test_subscript_is_not_a_lambda() {
        assert_eq!(run(&[T::LBRACKET, T::INT_LITERAL, T::RBRACKET, T::SEMICOLON]), None);
        assert_eq!(run(&[T::LBRACKET, T::LBRACKET]), None);
    }

    #[test]
    fn test_trivia_keeps_stage() {
        assert_eq!(
            run(&[T::LBRACKET, T::RBRACKET, T::WHITESPACE]),
            Some(LambdaStage::TryDeclaratorParams)
        );
    }
}
