//! End-of-scan finalization
//!
//! Replays whatever the lookaheads still hold, anchors the cursor with an
//! empty `VARIABLE` where completion needs one, merges trailing constructs
//! and finally closes every open node so the result is a closed tree.

use text_size::TextSize;
use tracing::trace;

use super::processor::CompletionTokenProcessor;
use crate::expr::ExprId;
use crate::expr::ExprKind as E;
use crate::lexer::TokenKind;
use crate::lexer::TokenKind as T;

/// Last tokens after which the cursor always starts a new operand
fn always_anchors(kind: TokenKind) -> bool {
    kind.is_trivia()
        || matches!(
            kind,
            T::SEMICOLON
                | T::LBRACE
                | T::RBRACE
                | T::LT
                | T::EQ
                | T::PLUSEQ
                | T::MINUSEQ
                | T::STAREQ
                | T::SLASHEQ
                | T::AMPEQ
                | T::BAREQ
                | T::CARETEQ
                | T::PERCENTEQ
                | T::LTLTEQ
                | T::GTGTEQ
                | T::LTEQ
                | T::GTEQ
                | T::EQEQ
                | T::NOTEQ
                | T::AMPAMP
                | T::BARBAR
                | T::LTLT
                | T::SLASH
                | T::BAR
                | T::CARET
                | T::PERCENT
                | T::GTGT
                | T::PLUSPLUS
                | T::MINUSMINUS
                | T::PLUS
                | T::MINUS
                | T::NOT
        )
}

impl CompletionTokenProcessor {
    pub(super) fn finish(&mut self, offset: TextSize, last_token_offset: TextSize) {
        self.flush_lambda_lookahead();
        self.flush_template_lookahead();
        trace!(
            "[SCAN] end at {:?}, last token {:?}, depth {}",
            offset,
            last_token_offset,
            self.stack.len()
        );

        if self.needs_placeholder() {
            self.push_empty_variable(offset);
            self.error_state = false;
        }
        self.rescan(offset);
        self.close_stack(offset);
    }

    fn needs_placeholder(&self) -> bool {
        let Some(last) = self.last_valid else {
            return false;
        };
        let top = self.top_kind();
        if top == Some(E::LAMBDA_FUNCTION) {
            return false;
        }
        match last {
            // `a ? b :`
            T::COLON => self.nr_questions > 0,
            T::QUESTION | T::STAR | T::AMP | T::GT => top != Some(E::GENERIC_TYPE),
            kind if always_anchors(kind) => true,
            _ => matches!(top, Some(E::GENERIC_TYPE | E::SPECIAL_PARENTHESIS_OPEN)),
        }
    }

    /// Merge trailing constructs bottom-up until nothing changes
    fn rescan(&mut self, offset: TextSize) {
        loop {
            let Some(top) = self.peek() else {
                // nothing on the stack, anchor the cursor
                self.push_empty_variable(offset);
                return;
            };
            let below = self.peek_at(2);
            let below_kind = below.map(|id| self.arena.kind(id));
            let again = match (self.arena.kind(top), below, below_kind) {
                (
                    E::VARIABLE
                    | E::GENERIC_TYPE
                    | E::METHOD_OPEN
                    | E::METHOD
                    | E::LAMBDA_CALL
                    | E::UNIFORM_INITIALIZATION,
                    Some(access),
                    Some(kind @ (E::DOT_OPEN | E::ARROW_OPEN | E::SCOPE_OPEN)),
                ) => {
                    self.pop();
                    self.arena.add_param(access, top);
                    self.arena.set_kind(access, kind.closed());
                    true
                }
                (
                    E::VARIABLE
                    | E::GENERIC_TYPE
                    | E::METHOD_OPEN
                    | E::METHOD
                    | E::DOT
                    | E::DOT_OPEN
                    | E::ARROW
                    | E::ARROW_OPEN
                    | E::SCOPE
                    | E::SCOPE_OPEN,
                    Some(new),
                    Some(E::NEW),
                ) => {
                    self.pop();
                    self.arena.add_param(new, top);
                    self.arena.set_kind(new, E::CONSTRUCTOR);
                    true
                }
                (E::VARIABLE, Some(label), Some(E::GOTO)) => {
                    self.pop();
                    self.arena.add_param(label, top);
                    self.arena.set_kind(label, E::LABEL);
                    false
                }
                (E::VARIABLE, Some(case), Some(E::CASE)) => {
                    self.pop();
                    self.arena.add_param(case, top);
                    false
                }
                (
                    E::DOT | E::DOT_OPEN | E::ARROW | E::ARROW_OPEN | E::SCOPE | E::SCOPE_OPEN,
                    Some(pointer),
                    Some(E::MEMBER_POINTER_OPEN),
                ) => {
                    self.pop();
                    self.arena.add_param(pointer, top);
                    false
                }
                (E::ARRAY_OPEN | E::PARENTHESIS_OPEN, _, _) => {
                    self.push_empty_variable(offset);
                    false
                }
                (E::PREPROC_DIRECTIVE_OPEN | E::CASE, _, _) => {
                    let placeholder = self.arena.empty_variable(offset);
                    self.arena.add_param(top, placeholder);
                    false
                }
                (E::GENERIC_TYPE_OPEN, _, _) if self.arena.param_count(top) <= 1 => {
                    let placeholder = self.arena.empty_variable(offset);
                    self.arena.add_param(top, placeholder);
                    false
                }
                (E::MEMBER_POINTER_OPEN, _, _) => {
                    self.pop();
                    self.push_empty_variable(offset);
                    false
                }
                (E::UNARY_OPERATOR, None, _) => {
                    self.pop();
                    self.push_empty_variable(offset);
                    false
                }
                (E::UNARY_OPERATOR, Some(_), Some(kind)) if kind.is_access_open() => {
                    // `a.~` names a destructor
                    let tilde_only = self.arena.param_count(top) == 0
                        && self.arena.token_count(top) == 1
                        && self.arena.first_token_kind(top) == Some(T::TILDE);
                    if tilde_only {
                        self.arena.set_kind(top, E::VARIABLE);
                    }
                    tilde_only
                }
                _ => false,
            };
            if !again {
                return;
            }
        }
    }

    /// Reduce what is left and close every open node
    fn close_stack(&mut self, offset: TextSize) {
        loop {
            self.check_join(None);
            let Some(top) = self.peek() else {
                break;
            };
            if self.arena.kind(top).is_open() {
                self.close_implicitly(top, offset);
                continue;
            }
            match self.peek_at(2) {
                Some(below) if self.arena.kind(below).is_open() => {
                    self.pop();
                    self.arena.add_param(below, top);
                }
                _ => break,
            }
        }

        let mut pending: Vec<ExprId> = self.stack.clone();
        while let Some(id) = pending.pop() {
            if self.arena.kind(id).is_open() {
                self.close_implicitly(id, offset);
            }
            pending.extend_from_slice(self.arena.params(id));
        }
    }

    fn close_implicitly(&mut self, id: ExprId, offset: TextSize) {
        let kind = self.arena.kind(id);
        let missing_rhs = match kind {
            E::DOT_OPEN | E::ARROW_OPEN | E::SCOPE_OPEN => {
                self.arena.param_count(id) <= self.arena.token_count(id)
            }
            E::MEMBER_POINTER_OPEN => self.arena.param_count(id) == 0,
            _ => false,
        };
        if missing_rhs {
            let placeholder = self.arena.empty_variable(offset);
            self.arena.add_param(id, placeholder);
        }
        let node = self.arena.node_mut(id);
        node.kind = kind.closed();
        node.implicitly_closed = true;
        trace!("[SCAN] implicitly closed {:?} as {:?}", kind, node.kind);
    }
}
