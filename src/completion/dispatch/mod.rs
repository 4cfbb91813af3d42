//! Token dispatch
//!
//! One `match` on the incoming token kind; each arm inspects the top of the
//! stack (and sometimes the nodes below it) to shift, reduce or extend
//! nodes. A miss sets the error state and the caller recovers.

mod atoms;
mod brackets;
mod operators;

use super::processor::CompletionTokenProcessor;
use crate::base::literal_type;
use crate::expr::ExprId;
use crate::expr::ExprKind as E;
use crate::lexer::TokenKind;
use crate::lexer::TokenKind as T;

impl CompletionTokenProcessor {
    /// Dispatch the current token; literals come back as a constant to place
    pub(super) fn dispatch(&mut self, kind: TokenKind, previous: Option<TokenKind>) -> Option<ExprId> {
        match kind {
            T::PREPROCESSOR_START | T::PREPROCESSOR_START_ALT => {
                self.push_token_exp(E::PREPROC_DIRECTIVE_OPEN);
            }
            kind if kind.is_directive_keyword() => match self.peek() {
                Some(top) if self.arena.kind(top) == E::PREPROC_DIRECTIVE_OPEN => {
                    self.arena.set_kind(top, E::PREPROC_DIRECTIVE);
                    self.add_cur_token(top);
                }
                _ => self.error_state = true,
            },
            T::STATIC_CAST | T::DYNAMIC_CAST | T::CONST_CAST | T::REINTERPRET_CAST => {
                self.push_token_exp(E::CONVERSION_OPEN);
            }
            T::CLASS if self.top_kind().is_some_and(E::is_access_open) => {
                self.push_token_exp(E::VARIABLE);
            }
            T::CLASS | T::STRUCT | T::UNION => {
                self.push_token_exp(E::CLASSIFIER);
            }
            T::GOTO => {
                self.push_token_exp(E::GOTO);
            }
            T::NEW => match self.top_kind() {
                Some(E::VARIABLE | E::NEW) => self.error_state = true,
                _ => {
                    self.push_token_exp(E::NEW);
                }
            },
            T::STATIC => self.error_state = true,
            T::THIS => {
                self.push_token_exp(E::VARIABLE);
            }
            T::CASE => {
                self.push_token_exp(E::CASE);
            }
            T::FOR | T::IF | T::SWITCH | T::WHILE => match E::opened_by(kind) {
                Some(statement) if self.stack.is_empty() => {
                    self.push_token_exp(statement);
                }
                _ => self.error_state = true,
            },
            T::DECLTYPE => {
                self.push_token_exp(E::DECLTYPE_OPEN);
            }
            T::IDENTIFIER => return self.on_identifier(previous),
            T::QUESTION => self.on_question(),
            T::STAR | T::AMP | T::AMPAMP => self.on_star_or_amp(kind),
            T::EQ
            | T::EQEQ
            | T::NOTEQ
            | T::LTEQ
            | T::GTEQ
            | T::LTLT
            | T::LTLTEQ
            | T::GTGTEQ
            | T::PLUSEQ
            | T::MINUSEQ
            | T::STAREQ
            | T::SLASH
            | T::SLASHEQ
            | T::PERCENT
            | T::PERCENTEQ
            | T::AMPEQ
            | T::BAR
            | T::BARBAR
            | T::BAREQ
            | T::CARET
            | T::CARETEQ
            | T::COLON => self.on_binary(kind),
            T::LT => self.on_less(),
            T::GT => self.on_greater(),
            T::GTGT => self.on_shift_right(),
            T::PLUSPLUS | T::MINUSMINUS => self.on_increment(),
            T::PLUS | T::MINUS => self.on_sign(),
            T::TILDE | T::NOT => self.on_not(kind),
            T::DOT | T::DOTMBR | T::ARROW | T::ARROWMBR | T::SCOPE => self.on_access(kind),
            T::COMMA => self.on_comma(),
            T::SEMICOLON => self.error_state = true,
            T::LPAREN => self.on_lparen(),
            T::RPAREN => self.on_rparen(),
            T::LBRACKET => self.on_lbracket(),
            T::RBRACKET => self.on_rbracket(),
            T::ELLIPSIS => self.on_ellipsis(),
            T::LBRACE => self.on_lbrace(),
            T::RBRACE => self.on_rbrace(),
            T::NEW_LINE => {
                if self.top_kind() == Some(E::PREPROC_DIRECTIVE) {
                    self.pop();
                }
            }
            kind if kind.is_trivia() => {}
            T::TEMPLATE | T::TYPENAME => {}
            // placed after dispatch
            kind if kind.is_type_keyword() => {}
            kind if kind.is_literal() || matches!(kind, T::TRUE | T::FALSE | T::NULLPTR) => {
                return Some(self.constant(kind));
            }
            _ => self.error_state = true,
        }
        None
    }

    /// A `CONSTANT` node typed after the literal
    fn constant(&mut self, kind: TokenKind) -> ExprId {
        let id = self.token_exp(E::CONSTANT);
        if let Some(builtin) = literal_type(kind, &self.cur.text) {
            self.arena.set_type_hint(id, builtin.name);
        }
        id
    }
}
