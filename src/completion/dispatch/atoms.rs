//! Names, literals and builtin type keywords

use crate::completion::processor::CompletionTokenProcessor;
use crate::expr::ExprId;
use crate::expr::ExprKind as E;
use crate::lexer::TokenKind;
use crate::lexer::TokenKind as T;

impl CompletionTokenProcessor {
    pub(super) fn on_identifier(&mut self, previous: Option<TokenKind>) -> Option<ExprId> {
        let Some(top) = self.peek() else {
            self.push_token_exp(E::VARIABLE);
            return None;
        };
        match self.arena.kind(top) {
            E::AUTO
            | E::OPERATOR
            | E::DOT_OPEN
            | E::ARROW_OPEN
            | E::SCOPE_OPEN
            | E::ARRAY_OPEN
            | E::PARENTHESIS_OPEN
            | E::SPECIAL_PARENTHESIS_OPEN
            | E::METHOD_OPEN
            | E::LAMBDA_CALL_OPEN
            | E::UNIFORM_INITIALIZATION_OPEN
            | E::IMPLICIT_UNIFORM_INITIALIZATION_OPEN
            | E::MEMBER_POINTER_OPEN
            | E::NEW
            | E::GOTO
            | E::CONVERSION
            | E::UNARY_OPERATOR
            | E::TERNARY_OPERATOR
            | E::MEMBER_POINTER
            | E::GENERIC_TYPE_OPEN
            | E::CASE
            | E::CLASSIFIER
            | E::CONVERSION_OPEN
            | E::TYPE_PREFIX => {
                self.push_token_exp(E::VARIABLE);
            }
            E::TYPE => {
                // declaration `T name`
                self.pop();
                let variable = self.token_exp(E::VARIABLE);
                if self.top_kind() == Some(E::METHOD_OPEN) {
                    self.arena.add_param(variable, top);
                } else {
                    let tokens = self.arena.tokens(top).to_vec();
                    for token in tokens {
                        self.arena.add_token(variable, token);
                    }
                }
                self.push(variable);
            }
            E::VARIABLE => {
                if self.kind_at(2) == Some(E::METHOD_OPEN) {
                    self.add_cur_token(top);
                } else if self.find_below(0, E::GENERIC_TYPE_OPEN, &[]).is_some() {
                    self.push_token_exp(E::VARIABLE);
                } else {
                    self.error_state = true;
                }
            }
            E::TYPE_REFERENCE if self.kind_at(2) == Some(E::METHOD_OPEN) => {
                self.pop();
                let variable = self.token_exp(E::VARIABLE);
                self.arena.add_param(variable, top);
                self.push(variable);
            }
            E::PREPROC_DIRECTIVE_OPEN => {
                self.arena.set_kind(top, E::PREPROC_DIRECTIVE);
                let name = self.token_exp(E::VARIABLE);
                self.arena.add_param(top, name);
            }
            E::CONSTANT if self.is_literal_suffix(top, previous) => {
                self.pop();
                let literal = self.token_exp(E::USER_DEFINED_LITERAL);
                self.arena.add_param(literal, top);
                return Some(literal);
            }
            _ => self.error_state = true,
        }
        None
    }

    /// `12_km`: an identifier glued to the preceding literal
    fn is_literal_suffix(&self, constant: ExprId, previous: Option<TokenKind>) -> bool {
        if !self.options.user_defined_literals {
            return false;
        }
        if !previous.is_some_and(|kind| kind.is_literal()) {
            return false;
        }
        self.arena
            .tokens(constant)
            .last()
            .is_some_and(|literal| literal.range().end() == self.cur.offset)
    }

    /// Place a constant produced by dispatch
    pub(in crate::completion) fn place_constant(&mut self, constant: ExprId) {
        let Some(top) = self.peek() else {
            self.push(constant);
            self.error_state = false;
            return;
        };
        match self.arena.kind(top) {
            E::ARRAY_OPEN
            | E::PARENTHESIS_OPEN
            | E::SPECIAL_PARENTHESIS_OPEN
            | E::UNIFORM_INITIALIZATION_OPEN
            | E::IMPLICIT_UNIFORM_INITIALIZATION_OPEN
            | E::METHOD_OPEN
            | E::LAMBDA_CALL_OPEN
            | E::PARENTHESIS
            | E::OPERATOR
            | E::UNARY_OPERATOR
            | E::TERNARY_OPERATOR
            | E::MEMBER_POINTER
            | E::CONVERSION
            | E::GENERIC_TYPE_OPEN
            | E::CASE => {
                self.push(constant);
                self.error_state = false;
            }
            E::CONSTANT if self.is_string_concatenation(top, constant) => {
                // "a" "b" stays one constant
                self.arena.add_token(top, self.cur.clone());
                self.error_state = false;
            }
            _ => self.error_state = true,
        }
    }

    fn is_string_concatenation(&self, top: ExprId, constant: ExprId) -> bool {
        let is_string = |id| {
            matches!(
                self.arena.first_token_kind(id),
                Some(T::STRING_LITERAL | T::RAW_STRING_LITERAL)
            )
        };
        is_string(top) && is_string(constant)
    }

    /// Place a builtin type keyword (`int`, `unsigned`, `const`)
    pub(in crate::completion) fn place_type_keyword(&mut self, kind: TokenKind) {
        let qualifier = matches!(kind, T::CONST | T::VOLATILE);
        let text = self.cur.text.clone();
        let Some(top) = self.peek() else {
            self.push_type(E::TYPE);
            return;
        };
        match self.arena.kind(top) {
            E::NEW
            | E::SPECIAL_PARENTHESIS_OPEN
            | E::PARENTHESIS_OPEN
            | E::CONVERSION_OPEN => self.push_type(E::TYPE),
            E::METHOD_OPEN | E::GENERIC_TYPE_OPEN | E::OPERATOR => {
                self.push_type(if qualifier { E::TYPE_PREFIX } else { E::TYPE });
            }
            E::TYPE_PREFIX => {
                self.arena.retype_as_type(top);
                if qualifier {
                    self.arena.set_kind(top, E::TYPE_PREFIX);
                }
                self.append_type_keyword(top, &text);
            }
            E::TYPE => self.append_type_keyword(top, &text),
            E::TYPE_REFERENCE => {
                let ty = self.token_exp(E::TYPE);
                self.arena.set_type_hint(ty, text);
                self.arena.add_param(top, ty);
                self.error_state = false;
            }
            _ if kind == T::CONST => {}
            _ => self.error_state = true,
        }
    }

    fn push_type(&mut self, kind: E) {
        let ty = self.push_token_exp(kind);
        self.arena.set_type_hint(ty, self.cur.text.clone());
        self.error_state = false;
    }

    /// `unsigned` + `int`
    fn append_type_keyword(&mut self, ty: ExprId, keyword: &str) {
        self.add_cur_token(ty);
        let hint = match self.arena.type_hint(ty) {
            Some(hint) if !hint.is_empty() => format!("{hint} {keyword}"),
            _ => keyword.to_string(),
        };
        self.arena.set_type_hint(ty, hint);
        self.error_state = false;
    }
}
