//! Operators, access tokens and angle brackets

use crate::completion::processor::CompletionTokenProcessor;
use crate::expr::ExprKind as E;
use crate::expr::precedence::CONDITIONAL;
use crate::expr::{ExprId, ExprKind};
use crate::lexer::TokenKind;
use crate::lexer::TokenKind as T;

/// Open nodes after which an operator token starts a new operand
fn opens_operand(kind: ExprKind) -> bool {
    matches!(
        kind,
        E::GENERIC_TYPE_OPEN
            | E::METHOD_OPEN
            | E::LAMBDA_CALL_OPEN
            | E::UNIFORM_INITIALIZATION_OPEN
            | E::IMPLICIT_UNIFORM_INITIALIZATION_OPEN
            | E::ARRAY_OPEN
            | E::PARENTHESIS_OPEN
            | E::SPECIAL_PARENTHESIS_OPEN
    )
}

impl CompletionTokenProcessor {
    /// Top of stack awaiting an operand: an open bracket, a bare operator,
    /// a `?` or nothing at all
    fn expects_operand(&self) -> bool {
        let Some(top) = self.peek() else {
            return true;
        };
        let kind = self.arena.kind(top);
        let params = self.arena.param_count(top);
        opens_operand(kind)
            || (kind == E::OPERATOR && params == 0)
            || (kind == E::UNARY_OPERATOR && params == 0)
            || (kind == E::TERNARY_OPERATOR && params == 1)
    }

    /// Closed node that a binary operator can follow
    fn binary_lhs(&self, top: ExprId, operator: TokenKind) -> bool {
        match self.arena.kind(top) {
            E::CONSTANT
            | E::USER_DEFINED_LITERAL
            | E::VARIABLE
            | E::METHOD
            | E::CONSTRUCTOR
            | E::ARRAY
            | E::DOT
            | E::ARROW
            | E::SCOPE
            | E::PARENTHESIS
            | E::OPERATOR
            | E::UNARY_OPERATOR
            | E::MEMBER_POINTER
            | E::LAMBDA_CALL
            | E::UNIFORM_INITIALIZATION => true,
            E::TYPE | E::TYPE_REFERENCE => matches!(operator, T::STAR | T::AMP | T::EQ),
            _ => false,
        }
    }

    /// `(a) / b` reads the parenthesized name as an operand
    fn conversion_as_parenthesis(&mut self, top: ExprId) -> bool {
        if self.arena.kind(top) != E::CONVERSION {
            return false;
        }
        let first = self.arena.param(top, 0);
        if first.is_some_and(|param| self.arena.kind(param) == E::TYPE) {
            return false;
        }
        if self.arena.first_token_kind(top).is_some_and(|kind| kind.is_keyword()) {
            return false;
        }
        self.arena.set_kind(top, E::PARENTHESIS);
        true
    }

    pub(super) fn on_binary(&mut self, kind: TokenKind) {
        let Some(top) = self.peek() else {
            self.error_state = true;
            return;
        };
        if self.binary_lhs(top, kind) || self.conversion_as_parenthesis(top) {
            self.push_token_exp(E::OPERATOR);
        } else {
            self.error_state = true;
        }
    }

    pub(super) fn on_question(&mut self) {
        self.nr_questions += 1;
        self.fold_operators(CONDITIONAL + 1);
        let condition = self.peek().filter(|&top| {
            let kind = self.arena.kind(top);
            kind.is_operand()
                || (matches!(kind, E::OPERATOR | E::UNARY_OPERATOR) && self.arena.param_count(top) > 0)
                || (kind == E::TERNARY_OPERATOR && self.arena.param_count(top) > 1)
        });
        let Some(condition) = condition else {
            self.error_state = true;
            return;
        };
        self.pop();
        let ternary = self.token_exp(E::TERNARY_OPERATOR);
        self.arena.add_param(ternary, condition);
        self.push(ternary);
    }

    /// `*` `&` `&&`: dereference, address-of, pointer declarator or binary
    pub(super) fn on_star_or_amp(&mut self, kind: TokenKind) {
        if kind != T::AMPAMP || self.templates_enabled {
            let top = self.peek();
            let top_kind = top.map(|id| self.arena.kind(id));
            match top_kind {
                Some(E::MEMBER_POINTER_OPEN | E::CONVERSION) | None => {
                    self.push_token_exp(E::MEMBER_POINTER_OPEN);
                    return;
                }
                Some(_) if self.expects_operand() => {
                    self.push_token_exp(E::MEMBER_POINTER_OPEN);
                    return;
                }
                Some(E::TYPE | E::TYPE_REFERENCE | E::GENERIC_TYPE | E::SCOPE_OPEN) => {
                    if let Some(top) = top {
                        self.pop();
                        let reference = self.token_exp(E::TYPE_REFERENCE);
                        self.arena.add_param(reference, top);
                        self.push(reference);
                    }
                    return;
                }
                _ => {}
            }
        }
        self.on_binary(kind);
    }

    pub(super) fn on_less(&mut self) {
        if self.templates_enabled && self.can_template_ambiguity_happen() {
            if let Some(top) = self.pop() {
                let generic = self.token_exp(E::GENERIC_TYPE_OPEN);
                self.arena.add_param(generic, top);
                self.push(generic);
            }
            return;
        }
        let Some(top) = self.peek() else {
            self.error_state = true;
            return;
        };
        match self.arena.kind(top) {
            // static_cast<
            E::CONVERSION_OPEN => self.add_cur_token(top),
            E::CONVERSION | E::TYPE => {
                self.push_token_exp(E::OPERATOR);
            }
            _ => self.on_binary(T::LT),
        }
    }

    /// Node kinds that can end a template argument
    fn ends_template_argument(kind: ExprKind) -> bool {
        matches!(
            kind,
            E::CONSTANT
                | E::USER_DEFINED_LITERAL
                | E::VARIABLE
                | E::TYPE
                | E::TYPE_REFERENCE
                | E::DOT
                | E::ARROW
                | E::SCOPE
                | E::GENERIC_TYPE
                | E::GENERIC_TYPE_OPEN
                | E::ARRAY
                | E::PARENTHESIS
                | E::METHOD
                | E::UNARY_OPERATOR
                | E::OPERATOR
                | E::MEMBER_POINTER
        )
    }

    /// Close the innermost `GENERIC_TYPE_OPEN` not hidden behind a `(`
    fn close_generic(&mut self) -> bool {
        let Some(depth) = self.find_below(0, E::GENERIC_TYPE_OPEN, &[E::PARENTHESIS_OPEN]) else {
            return false;
        };
        let Some(generic) = self.peek_at(depth) else {
            return false;
        };
        self.fold_operators(0);
        self.pop_into(generic);
        self.add_cur_token(generic);
        self.arena.set_kind(generic, E::GENERIC_TYPE);
        true
    }

    pub(super) fn on_greater(&mut self) {
        let Some(top) = self.peek() else {
            self.error_state = true;
            return;
        };
        if self.templates_enabled
            && Self::ends_template_argument(self.arena.kind(top))
            && self.close_generic()
        {
            self.split_member_pointer_generic();
            return;
        }

        // static_cast<T> / static_cast<struct T>
        let top = self.peek().unwrap_or(top);
        match (self.kind_at(2), self.kind_at(3)) {
            (Some(E::CLASSIFIER), Some(E::CONVERSION_OPEN)) if self.arena.is_valid_type(top) => {
                self.pop();
                let classifier = self.pop();
                if let (Some(classifier), Some(conversion)) = (classifier, self.peek()) {
                    self.arena.add_param(conversion, top);
                    self.arena.add_param(conversion, classifier);
                    self.add_cur_token(conversion);
                }
                return;
            }
            (Some(E::CONVERSION_OPEN), _) if self.arena.is_valid_type(top) => {
                self.pop();
                if let Some(conversion) = self.peek() {
                    self.arena.add_param(conversion, top);
                    self.add_cur_token(conversion);
                }
                return;
            }
            _ => {}
        }

        if self.arena.kind(top) == E::TYPE {
            self.push_token_exp(E::OPERATOR);
        } else {
            self.on_binary(T::GT);
        }
    }

    /// `A<*B>`: the member pointer moves outside the closed generic
    fn split_member_pointer_generic(&mut self) {
        let Some(generic) = self.peek() else {
            return;
        };
        let Some(first) = self.arena.param(generic, 0) else {
            return;
        };
        if self.arena.kind(first) != E::MEMBER_POINTER {
            return;
        }
        let Some(target) = self.arena.param(first, 0) else {
            return;
        };
        let mut params = vec![target];
        params.extend_from_slice(&self.arena.params(generic)[1..]);
        let split = self.token_exp(E::GENERIC_TYPE);
        self.arena.node_mut(split).params = params;
        self.pop();
        let pointer = self.arena.copy_of(E::MEMBER_POINTER_OPEN, first, false);
        self.push(pointer);
        self.push(split);
    }

    pub(super) fn on_shift_right(&mut self) {
        let top_kind = self.top_kind();
        let closes_two = self.templates_enabled
            && top_kind.is_some_and(|kind| {
                Self::ends_template_argument(kind)
                    && !matches!(kind, E::METHOD | E::UNARY_OPERATOR | E::OPERATOR | E::MEMBER_POINTER)
            })
            && self
                .find_below(0, E::GENERIC_TYPE_OPEN, &[E::PARENTHESIS_OPEN])
                .and_then(|first| {
                    self.find_below(first, E::GENERIC_TYPE_OPEN, &[E::PARENTHESIS_OPEN])
                })
                .is_some();
        if closes_two {
            // `>>` ends two nested argument lists
            self.close_generic();
            self.check_join(Some(T::GT));
            self.close_generic();
            return;
        }
        match top_kind {
            Some(E::CONVERSION | E::TYPE) => {
                self.push_token_exp(E::OPERATOR);
            }
            _ => self.on_binary(T::GTGT),
        }
    }

    pub(super) fn on_increment(&mut self) {
        let Some(top) = self.peek() else {
            self.push_token_exp(E::UNARY_OPERATOR);
            return;
        };
        if self.expects_operand()
            || matches!(
                self.arena.kind(top),
                E::MEMBER_POINTER_OPEN | E::MEMBER_POINTER | E::UNARY_OPERATOR
            )
        {
            self.push_token_exp(E::UNARY_OPERATOR);
            return;
        }
        match self.arena.kind(top) {
            E::CONVERSION => {
                let cast = matches!(
                    self.arena.first_token_kind(top),
                    Some(T::STATIC_CAST | T::DYNAMIC_CAST | T::REINTERPRET_CAST)
                );
                if cast {
                    self.postfix(top, top);
                    return;
                }
                let first = self.arena.param(top, 0);
                if first.is_some_and(|param| self.arena.kind(param) != E::TYPE) {
                    // `(a)++`
                    let parenthesis = self.arena.copy_of(E::PARENTHESIS, top, true);
                    self.postfix(top, parenthesis);
                } else {
                    self.error_state = true;
                }
            }
            E::PARENTHESIS | E::VARIABLE | E::DOT | E::ARROW | E::SCOPE | E::ARRAY | E::METHOD => {
                self.postfix(top, top);
            }
            _ => self.error_state = true,
        }
    }

    /// Replace `top` with a postfix operator applied to `operand`
    fn postfix(&mut self, top: ExprId, operand: ExprId) {
        if self.peek() == Some(top) {
            self.pop();
        }
        let unary = self.token_exp(E::UNARY_OPERATOR);
        self.arena.add_param(unary, operand);
        self.push(unary);
    }

    pub(super) fn on_sign(&mut self) {
        if self.expects_operand()
            || matches!(self.top_kind(), Some(E::CONVERSION | E::CASE | E::MEMBER_POINTER_OPEN))
        {
            self.push_token_exp(E::UNARY_OPERATOR);
            return;
        }
        let Some(top) = self.peek() else {
            return;
        };
        let kind = self.arena.kind(top);
        if self.binary_lhs(top, T::PLUS) || kind == E::TERNARY_OPERATOR {
            self.push_token_exp(E::OPERATOR);
        } else {
            self.error_state = true;
        }
    }

    pub(super) fn on_not(&mut self, kind: TokenKind) {
        let top_kind = self.top_kind();
        let destructor = kind == T::TILDE && top_kind.is_some_and(E::is_access_open);
        if destructor
            || self.expects_operand()
            || matches!(top_kind, Some(E::MEMBER_POINTER | E::MEMBER_POINTER_OPEN | E::UNARY_OPERATOR))
        {
            self.push_token_exp(E::UNARY_OPERATOR);
        } else {
            self.error_state = true;
        }
    }

    /// `.` `.*` `->` `->*` `::`
    pub(super) fn on_access(&mut self, kind: TokenKind) {
        let Some(open_kind) = E::opened_by(kind) else {
            self.error_state = true;
            return;
        };
        let Some(top) = self.peek() else {
            // `::global`
            let access = self.push_token_exp(open_kind);
            let empty = self.arena.empty_variable(self.cur.offset);
            self.arena.add_param(access, empty);
            return;
        };
        match self.arena.kind(top) {
            E::CONSTANT
            | E::USER_DEFINED_LITERAL
            | E::VARIABLE
            | E::ARRAY
            | E::METHOD
            | E::LAMBDA_CALL
            | E::UNIFORM_INITIALIZATION
            | E::CONSTRUCTOR
            | E::PARENTHESIS
            | E::CONVERSION
            | E::GENERIC_TYPE
            | E::MEMBER_POINTER => {
                if self.check_row(&[E::AUTO, E::METHOD])
                    || self.check_row(&[E::AUTO, E::PARENTHESIS, E::PARENTHESIS])
                {
                    // auto f() -> T
                    self.push_token_exp(E::ARROW_RETURN_TYPE);
                    return;
                }
                self.pop();
                let access = self.token_exp(open_kind);
                if self.arena.kind(top) == E::CONVERSION {
                    if kind == T::SCOPE {
                        // `(T)::x` casts the scoped name
                        self.push(top);
                        let empty = self.arena.empty_variable(self.cur.offset);
                        self.arena.add_param(access, empty);
                    } else {
                        self.arena.set_kind(top, E::PARENTHESIS);
                        self.arena.add_param(access, top);
                    }
                } else {
                    self.arena.add_param(access, top);
                }
                self.push(access);
            }
            E::DOT | E::ARROW | E::SCOPE => {
                self.add_cur_token(top);
                self.arena.set_kind(top, open_kind);
            }
            E::OPERATOR | E::UNARY_OPERATOR | E::TYPE_PREFIX | E::NEW | E::TERNARY_OPERATOR => {
                let access = self.push_token_exp(open_kind);
                let empty = self.arena.empty_variable(self.cur.offset);
                self.arena.add_param(access, empty);
            }
            other if opens_operand(other) => {
                let access = self.push_token_exp(open_kind);
                let empty = self.arena.empty_variable(self.cur.offset);
                self.arena.add_param(access, empty);
            }
            _ => self.error_state = true,
        }
    }
}
