//! The completion token processor
//!
//! A push-down automaton over [`ExprNode`]s. Every token first passes the
//! lambda lookahead, then the template lookahead, and finally reaches
//! [`CompletionTokenProcessor::token_impl`], which runs the pre-join pass,
//! dispatches on `(token, top of stack)` and recovers from transition misses.

use smol_str::SmolStr;
use text_size::TextSize;
use tracing::{trace, warn};

use super::lambda::{BodyFrame, LambdaLookahead};
use super::result::ScanResult;
use super::template::TemplateLookahead;
use super::token::SourceToken;
use crate::config::ScanOptions;
use crate::errors::{ErrorCode, ScanDiagnostic, Severity};
use crate::expr::{ExprArena, ExprId, ExprKind, ExprNode, ExprToken};
use crate::lexer::TokenKind;

/// Consumer of a token stream
///
/// `start` resets the consumer, `token` is called once per token in source
/// order and `end` finalizes the result.
pub trait TokenProcessor {
    fn start(&mut self, scan_start: TextSize, first_token_offset: TextSize, scan_end: TextSize);

    /// Returns `false` when the token starts at or beyond the scan end and
    /// was ignored; the caller should stop feeding tokens.
    fn token(&mut self, token: &SourceToken) -> bool;

    fn end(&mut self, offset: TextSize, last_token_offset: TextSize);
}

#[derive(Debug)]
pub struct CompletionTokenProcessor {
    pub(super) options: ScanOptions,
    /// Template interpretation, toggled while replaying a lookahead buffer
    pub(super) templates_enabled: bool,
    pub(super) arena: ExprArena,
    pub(super) stack: Vec<ExprId>,
    pub(super) scan_start: TextSize,
    pub(super) scan_end: TextSize,
    pub(super) last_valid: Option<TokenKind>,
    /// Last non-macro token accepted by `token`, clipped at the scan end
    pub(super) last_source: Option<SourceToken>,
    pub(super) error_state: bool,
    alternative_parse: bool,
    /// Open `?` without their `:` yet
    pub(super) nr_questions: i32,
    pub(super) last_separator: Option<TextSize>,
    pub(super) lambda: LambdaLookahead,
    pub(super) template: TemplateLookahead,
    pub(super) body_frames: Vec<BodyFrame>,
    pub(super) diagnostics: Vec<ScanDiagnostic>,
    /// The token being dispatched
    pub(super) cur: ExprToken,
}

impl Default for CompletionTokenProcessor {
    fn default() -> Self {
        Self::new(ScanOptions::default())
    }
}

impl CompletionTokenProcessor {
    pub fn new(options: ScanOptions) -> Self {
        Self {
            options,
            templates_enabled: options.templates,
            arena: ExprArena::new(),
            stack: Vec::new(),
            scan_start: TextSize::new(0),
            scan_end: TextSize::new(u32::MAX),
            last_valid: None,
            last_source: None,
            error_state: false,
            alternative_parse: false,
            nr_questions: 0,
            last_separator: None,
            lambda: LambdaLookahead::default(),
            template: TemplateLookahead::default(),
            body_frames: Vec::new(),
            diagnostics: Vec::new(),
            cur: ExprToken::new(TokenKind::ERROR, TextSize::new(0), ""),
        }
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    pub fn stack(&self) -> &[ExprId] {
        &self.stack
    }

    /// Top of the stack
    pub fn result_exp(&self) -> Option<ExprId> {
        self.peek()
    }

    pub fn is_error_state(&self) -> bool {
        self.error_state
    }

    /// Offset of the last token that separated statements
    pub fn last_separator_offset(&self) -> Option<TextSize> {
        self.last_separator
    }

    pub fn arena(&self) -> &ExprArena {
        &self.arena
    }

    pub fn node(&self, id: ExprId) -> &ExprNode {
        self.arena.node(id)
    }

    pub fn last_valid_token(&self) -> Option<TokenKind> {
        self.last_valid
    }

    pub fn diagnostics(&self) -> &[ScanDiagnostic] {
        &self.diagnostics
    }

    pub fn into_result(self) -> ScanResult {
        ScanResult::new(
            self.arena,
            self.stack,
            self.error_state,
            self.last_separator,
            self.last_source,
            self.diagnostics,
        )
    }

    // =========================================================================
    // Stack helpers
    // =========================================================================

    pub(super) fn peek(&self) -> Option<ExprId> {
        self.stack.last().copied()
    }

    /// Node at `depth` counted from the top, starting at 1
    pub(super) fn peek_at(&self, depth: usize) -> Option<ExprId> {
        let index = self.stack.len().checked_sub(depth)?;
        self.stack.get(index).copied()
    }

    pub(super) fn kind_at(&self, depth: usize) -> Option<ExprKind> {
        self.peek_at(depth).map(|id| self.arena.kind(id))
    }

    pub(super) fn top_kind(&self) -> Option<ExprKind> {
        self.kind_at(1)
    }

    pub(super) fn pop(&mut self) -> Option<ExprId> {
        self.stack.pop()
    }

    pub(super) fn push(&mut self, id: ExprId) {
        self.stack.push(id);
    }

    /// New node of `kind` carrying the current token
    pub(super) fn token_exp(&mut self, kind: ExprKind) -> ExprId {
        self.arena.with_token(kind, self.cur.clone())
    }

    pub(super) fn push_token_exp(&mut self, kind: ExprKind) -> ExprId {
        let id = self.token_exp(kind);
        self.push(id);
        id
    }

    pub(super) fn add_cur_token(&mut self, id: ExprId) {
        self.arena.add_token(id, self.cur.clone());
    }

    pub(super) fn push_empty_variable(&mut self, offset: TextSize) -> ExprId {
        let id = self.arena.empty_variable(offset);
        self.push(id);
        id
    }

    /// Whether the topmost nodes have exactly `kinds`, listed bottom to top
    pub(super) fn check_row(&self, kinds: &[ExprKind]) -> bool {
        self.check_row_shifted(0, kinds)
    }

    /// Like [`Self::check_row`], ignoring the `shift` topmost nodes
    pub(super) fn check_row_shifted(&self, shift: usize, kinds: &[ExprKind]) -> bool {
        let Some(start) = self.stack.len().checked_sub(shift + kinds.len()) else {
            return false;
        };
        kinds
            .iter()
            .enumerate()
            .all(|(i, kind)| self.arena.kind(self.stack[start + i]) == *kind)
    }

    /// Depth of the first `target` node below `from`, not crossing any `barrier` kind
    pub(super) fn find_below(
        &self,
        from: usize,
        target: ExprKind,
        barrier: &[ExprKind],
    ) -> Option<usize> {
        for depth in (from + 1)..=self.stack.len() {
            let kind = self.kind_at(depth)?;
            if kind == target {
                return Some(depth);
            }
            if barrier.contains(&kind) {
                return None;
            }
        }
        None
    }

    /// Pop every node above `target` and append them to it in source order
    pub(super) fn pop_into(&mut self, target: ExprId) {
        let Some(position) = self.stack.iter().rposition(|&id| id == target) else {
            return;
        };
        let moved: Vec<ExprId> = self.stack.drain(position + 1..).collect();
        for id in moved {
            self.arena.add_param(target, id);
        }
    }

    pub(super) fn report(&mut self, diagnostic: ScanDiagnostic) {
        if diagnostic.code.is_invariant() {
            warn!("[SCAN] {}", diagnostic);
        } else {
            trace!("[SCAN] {}", diagnostic);
        }
        self.diagnostics.push(diagnostic);
    }

    pub(super) fn report_invariant(&mut self, code: ErrorCode, offset: TextSize, message: &str) {
        let diagnostic = ScanDiagnostic::builder(code)
            .message(message)
            .at_offset(offset)
            .severity(Severity::Error)
            .build();
        self.report(diagnostic);
    }

    fn reset(&mut self) {
        let options = self.options;
        *self = Self::new(options);
    }

    // =========================================================================
    // Automaton entry
    // =========================================================================

    /// Text of `token` clipped at the scan end, macro tokens are never clipped
    pub(super) fn clipped_text(&self, token: &SourceToken) -> SmolStr {
        if token.from_macro || token.end() <= self.scan_end {
            return token.text.clone();
        }
        let keep = u32::from(self.scan_end.checked_sub(token.offset).unwrap_or_default()) as usize;
        match token.text.get(..keep) {
            Some(prefix) => SmolStr::new(prefix),
            None => token.text.clone(),
        }
    }

    pub(super) fn token_impl(&mut self, token: SourceToken, may_be_in_lambda: bool) {
        let mut kind = token.kind;
        if !token.from_macro
            && kind != TokenKind::AUTO
            && (kind.is_keyword() || kind.is_directive_keyword())
            && token.end() >= self.scan_end
        {
            // a keyword under the cursor is still being typed
            kind = TokenKind::IDENTIFIER;
        }
        if matches!(
            kind,
            TokenKind::SIZEOF
                | TokenKind::TYPEID
                | TokenKind::ALIGNOF
                | TokenKind::__ALIGNOF
                | TokenKind::__ALIGNOF__
                | TokenKind::FINAL
                | TokenKind::OVERRIDE
        ) {
            kind = TokenKind::IDENTIFIER;
        }

        let previous = self.last_valid;
        if previous == Some(TokenKind::COLON) {
            self.nr_questions -= 1;
        }
        self.last_valid = Some(kind);
        let text = self.clipped_text(&token);
        self.cur = ExprToken::new(kind, token.offset, text);
        self.process(kind, previous, &token, may_be_in_lambda);
    }

    fn process(
        &mut self,
        kind: TokenKind,
        previous: Option<TokenKind>,
        token: &SourceToken,
        may_be_in_lambda: bool,
    ) {
        self.error_state = false;
        self.check_join(Some(kind));

        let constant = self.dispatch(kind, previous);
        if let Some(constant) = constant {
            self.place_constant(constant);
        }
        if kind.is_type_keyword() {
            self.place_type_keyword(kind);
        }

        if !self.error_state {
            return;
        }
        if !self.alternative_parse && self.try_alternative_parse() {
            trace!(
                "[SCAN] {}: retrying {:?} at {:?}",
                ErrorCode::E0102.default_message(),
                kind,
                token.offset
            );
            self.alternative_parse = true;
            self.process(kind, previous, token, may_be_in_lambda);
            self.alternative_parse = false;
            return;
        }
        self.recover(kind, token, may_be_in_lambda);
    }

    /// `foo(a * 5)` first reads `a *` as a pointer declarator; rebuild it as
    /// operand and operator.
    fn try_alternative_parse(&mut self) -> bool {
        let (Some(top), Some(ExprKind::METHOD_OPEN)) = (self.peek(), self.kind_at(2)) else {
            return false;
        };
        if !matches!(
            self.arena.first_token_kind(top),
            Some(TokenKind::STAR | TokenKind::AMP)
        ) {
            return false;
        }
        let Some(param) = self.arena.param(top, 0) else {
            return false;
        };
        if self.arena.kind(param) != ExprKind::TYPE {
            return false;
        }
        let tokens = self.arena.tokens(param);
        let operand_kind = match tokens.first().map(|t| t.kind) {
            Some(TokenKind::IDENTIFIER) => ExprKind::VARIABLE,
            Some(TokenKind::SCOPE) => ExprKind::SCOPE,
            Some(TokenKind::LPAREN)
                if tokens.len() == 2 && tokens[1].kind == TokenKind::RPAREN =>
            {
                ExprKind::METHOD
            }
            _ => return false,
        };
        self.pop();
        let with_params = operand_kind != ExprKind::VARIABLE;
        let operand = self.arena.copy_of(operand_kind, param, with_params);
        self.arena.node_mut(operand).type_hint = None;
        self.push(operand);
        let operator = self.arena.copy_of(ExprKind::OPERATOR, top, false);
        self.push(operator);
        true
    }

    fn recover(&mut self, kind: TokenKind, token: &SourceToken, may_be_in_lambda: bool) {
        trace!(
            "[SCAN] {} {:?} at {:?}, depth was {}",
            ErrorCode::E0101.default_message(),
            kind,
            token.offset,
            self.stack.len()
        );
        self.stack.clear();
        match kind {
            TokenKind::IDENTIFIER => {
                self.push_token_exp(ExprKind::VARIABLE);
                self.error_state = false;
            }
            TokenKind::AUTO => {
                self.push_token_exp(ExprKind::AUTO);
                self.error_state = false;
            }
            _ if !token.from_macro && !may_be_in_lambda => {
                self.last_separator = Some(token.offset);
            }
            _ => {}
        }
    }
}

impl TokenProcessor for CompletionTokenProcessor {
    fn start(&mut self, scan_start: TextSize, first_token_offset: TextSize, scan_end: TextSize) {
        self.reset();
        self.scan_start = scan_start;
        self.scan_end = scan_end;
        trace!(
            "[SCAN] start at {:?}, first token {:?}, end {:?}",
            scan_start,
            first_token_offset,
            scan_end
        );
    }

    fn token(&mut self, token: &SourceToken) -> bool {
        if !token.from_macro && token.offset >= self.scan_end {
            return false;
        }
        if !token.from_macro {
            let mut clipped = token.clone();
            clipped.text = self.clipped_text(token);
            self.last_source = Some(clipped);
        }
        self.lambda_lookahead(token.clone());
        true
    }

    fn end(&mut self, offset: TextSize, last_token_offset: TextSize) {
        self.finish(offset, last_token_offset);
    }
}
