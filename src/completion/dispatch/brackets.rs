//! Brackets, braces and argument separators

use tracing::trace;

use crate::completion::processor::CompletionTokenProcessor;
use crate::expr::ExprKind as E;
use crate::expr::{ExprId, ExprKind};

/// Closed nodes that can end an argument or a parenthesized expression
fn closes_argument(kind: ExprKind) -> bool {
    matches!(
        kind,
        E::CONSTANT
            | E::USER_DEFINED_LITERAL
            | E::VARIABLE
            | E::ARRAY
            | E::DOT
            | E::ARROW
            | E::SCOPE
            | E::TYPE
            | E::TYPE_REFERENCE
            | E::CONSTRUCTOR
            | E::CONVERSION
            | E::PARENTHESIS
            | E::OPERATOR
            | E::UNARY_OPERATOR
            | E::TERNARY_OPERATOR
            | E::MEMBER_POINTER
            | E::METHOD
            | E::LAMBDA_CALL
            | E::LAMBDA_FUNCTION
            | E::UNIFORM_INITIALIZATION
            | E::IMPLICIT_UNIFORM_INITIALIZATION
            | E::GENERIC_TYPE
            | E::DECLTYPE
    )
}

/// Open nodes that collect comma separated arguments
fn takes_arguments(kind: ExprKind) -> bool {
    matches!(
        kind,
        E::METHOD_OPEN
            | E::PARENTHESIS_OPEN
            | E::LAMBDA_CALL_OPEN
            | E::UNIFORM_INITIALIZATION_OPEN
            | E::IMPLICIT_UNIFORM_INITIALIZATION_OPEN
    )
}

impl CompletionTokenProcessor {
    pub(super) fn on_comma(&mut self) {
        let Some(top) = self.peek() else {
            self.error_state = true;
            return;
        };
        let kind = self.arena.kind(top);
        if closes_argument(kind) {
            let below = self.peek_at(2);
            match below {
                Some(owner) if takes_arguments(self.arena.kind(owner)) => {
                    self.pop();
                    self.arena.add_param(owner, top);
                    self.add_cur_token(owner);
                }
                _ => match self.find_below(0, E::GENERIC_TYPE_OPEN, &[]).and_then(|d| self.peek_at(d)) {
                    // `Map<K, V`
                    Some(generic) => self.pop_into(generic),
                    None => self.error_state = true,
                },
            }
            return;
        }
        match kind {
            E::METHOD_OPEN
            | E::LAMBDA_CALL_OPEN
            | E::UNIFORM_INITIALIZATION_OPEN
            | E::IMPLICIT_UNIFORM_INITIALIZATION_OPEN => self.add_cur_token(top),
            _ => self.error_state = true,
        }
    }

    pub(super) fn on_lparen(&mut self) {
        let Some(top) = self.peek() else {
            self.push_token_exp(E::PARENTHESIS_OPEN);
            return;
        };
        match self.arena.kind(top) {
            E::VARIABLE | E::GENERIC_TYPE | E::ARRAY | E::METHOD => {
                self.pop();
                let call = self.token_exp(E::METHOD_OPEN);
                self.arena.add_param(call, top);
                self.push(call);
            }
            E::TYPE => {
                // int(a)
                self.pop();
                let conversion = self.arena.empty(E::CONVERSION_OPEN);
                self.arena.add_param(conversion, top);
                self.push(conversion);
                self.push_token_exp(E::PARENTHESIS_OPEN);
            }
            E::LAMBDA_FUNCTION => {
                self.pop();
                let call = self.token_exp(E::LAMBDA_CALL_OPEN);
                self.arena.add_param(call, top);
                self.push(call);
            }
            E::AUTO
            | E::DECLTYPE_OPEN
            | E::ARRAY_OPEN
            | E::PARENTHESIS_OPEN
            | E::SPECIAL_PARENTHESIS_OPEN
            | E::METHOD_OPEN
            | E::LAMBDA_CALL_OPEN
            | E::UNIFORM_INITIALIZATION_OPEN
            | E::IMPLICIT_UNIFORM_INITIALIZATION_OPEN
            | E::OPERATOR
            | E::CONVERSION
            | E::CONVERSION_OPEN
            | E::PARENTHESIS
            | E::GENERIC_TYPE_OPEN
            | E::MEMBER_POINTER_OPEN
            | E::UNARY_OPERATOR
            | E::TERNARY_OPERATOR
            | E::CASE
            | E::NEW => {
                self.push_token_exp(E::PARENTHESIS_OPEN);
            }
            E::IF | E::FOR | E::SWITCH | E::WHILE => {
                self.pop();
                self.push_token_exp(E::SPECIAL_PARENTHESIS_OPEN);
            }
            _ => self.error_state = true,
        }
    }

    pub(super) fn on_rparen(&mut self) {
        let Some(top) = self.peek() else {
            self.error_state = true;
            return;
        };
        let call = match self.arena.kind(top) {
            // f()
            E::METHOD_OPEN => Some(top),
            E::LAMBDA_CALL_OPEN => {
                self.add_cur_token(top);
                self.arena.set_kind(top, E::LAMBDA_CALL);
                None
            }
            E::PARENTHESIS_OPEN => {
                self.close_empty_parenthesis(top);
                None
            }
            E::MEMBER_POINTER_OPEN => {
                // auto (*)
                if self.check_row_shifted(1, &[E::AUTO, E::PARENTHESIS_OPEN]) {
                    self.pop();
                    self.arena.set_kind(top, E::MEMBER_POINTER);
                    if let Some(parenthesis) = self.peek() {
                        self.arena.add_param(parenthesis, top);
                        self.arena.set_kind(parenthesis, E::PARENTHESIS);
                    }
                } else {
                    self.error_state = true;
                }
                None
            }
            kind if closes_argument(kind) => self.close_argument(top),
            _ => {
                self.error_state = true;
                None
            }
        };
        if let Some(call) = call {
            self.finish_call(call);
        }
    }

    /// `()` after a cast keyword is an empty cast argument, otherwise dropped
    fn close_empty_parenthesis(&mut self, parenthesis: ExprId) {
        match self.peek_at(2) {
            Some(conversion) if self.arena.kind(conversion) == E::CONVERSION_OPEN => {
                self.pop();
                self.pop();
                self.absorb(conversion, parenthesis);
                self.add_cur_token(conversion);
                self.arena.set_kind(conversion, E::CONVERSION);
                let wrapper = self.arena.empty(E::PARENTHESIS);
                self.arena.add_param(wrapper, conversion);
                self.push(wrapper);
            }
            _ => {
                self.pop();
            }
        }
    }

    /// Append the params and tokens of `from` to `into`
    fn absorb(&mut self, into: ExprId, from: ExprId) {
        let node = self.arena.node(from).clone();
        for param in node.params {
            self.arena.add_param(into, param);
        }
        for token in node.tokens {
            self.arena.add_token(into, token);
        }
    }

    /// `)` after a complete argument; returns the call to close, if any
    fn close_argument(&mut self, top: ExprId) -> Option<ExprId> {
        let Some(top2) = self.peek_at(2) else {
            self.error_state = true;
            return None;
        };
        let top3 = self.peek_at(3);
        let top3_kind = top3.map(|id| self.arena.kind(id));
        match self.arena.kind(top2) {
            E::CLASSIFIER => {
                let top3 = top3?;
                match top3_kind {
                    // (struct S)
                    Some(E::PARENTHESIS_OPEN) if self.arena.is_valid_type(top) => {
                        self.pop();
                        self.pop();
                        self.arena.add_param(top3, top);
                        self.arena.add_param(top3, top2);
                        self.arena.set_kind(top3, E::CONVERSION);
                        self.add_cur_token(top3);
                        None
                    }
                    Some(E::METHOD_OPEN) => {
                        self.pop();
                        self.pop();
                        self.arena.add_param(top3, top);
                        Some(top3)
                    }
                    _ => None,
                }
            }
            E::PARENTHESIS_OPEN => {
                match (top3, top3_kind) {
                    (Some(conversion), Some(E::CONVERSION_OPEN)) => {
                        // static_cast<T>(x) / int(x)
                        self.pop();
                        self.pop();
                        self.pop();
                        self.absorb(conversion, top2);
                        self.add_cur_token(conversion);
                        self.arena.add_param(conversion, top);
                        self.arena.set_kind(conversion, E::CONVERSION);
                        let wrapper = self.arena.empty(E::PARENTHESIS);
                        self.arena.add_param(wrapper, conversion);
                        self.push(wrapper);
                    }
                    (Some(decltype), Some(E::DECLTYPE_OPEN)) => {
                        self.pop();
                        self.pop();
                        self.pop();
                        self.absorb(decltype, top2);
                        self.add_cur_token(decltype);
                        self.arena.add_param(decltype, top);
                        self.arena.set_kind(decltype, E::DECLTYPE);
                        self.push(decltype);
                    }
                    _ => {
                        self.pop();
                        self.arena.add_param(top2, top);
                        let cast = self.arena.param_count(top2) == 1
                            && self.arena.is_valid_type(top)
                            && !matches!(top3_kind, Some(E::PARENTHESIS | E::TYPE));
                        let closed = if cast { E::CONVERSION } else { E::PARENTHESIS };
                        self.arena.set_kind(top2, closed);
                        self.add_cur_token(top2);
                    }
                }
                None
            }
            E::SPECIAL_PARENTHESIS_OPEN => {
                // if (x) ends the condition
                self.pop();
                self.pop();
                None
            }
            E::GENERIC_TYPE_OPEN => {
                // the `<` was a comparison after all
                self.pop();
                self.arena.set_kind(top2, E::OPERATOR);
                self.arena.add_param(top2, top);
                trace!("[SCAN] `<` at {:?} reread as comparison", self.arena.node(top2).offset());
                match self.peek_at(2) {
                    Some(call) if self.arena.kind(call) == E::METHOD_OPEN => {
                        self.pop();
                        self.arena.add_param(call, top2);
                        Some(call)
                    }
                    _ => None,
                }
            }
            E::METHOD_OPEN => {
                self.pop();
                self.arena.add_param(top2, top);
                Some(top2)
            }
            E::LAMBDA_CALL_OPEN => {
                self.pop();
                self.arena.add_param(top2, top);
                self.arena.set_kind(top2, E::LAMBDA_CALL);
                self.add_cur_token(top2);
                None
            }
            E::CONVERSION => {
                self.pop();
                self.arena.add_param(top2, top);
                self.close_enclosing(top2)
            }
            E::MEMBER_POINTER_OPEN => {
                self.pop();
                self.arena.add_param(top2, top);
                self.arena.set_kind(top2, E::MEMBER_POINTER);
                self.close_enclosing(top2)
            }
            _ => {
                self.error_state = true;
                None
            }
        }
    }

    /// Hand a finished cast or dereference to the bracket below it
    fn close_enclosing(&mut self, inner: ExprId) -> Option<ExprId> {
        let outer = self.peek_at(2)?;
        match self.arena.kind(outer) {
            E::PARENTHESIS_OPEN => {
                self.pop();
                self.arena.add_param(outer, inner);
                self.arena.set_kind(outer, E::PARENTHESIS);
                None
            }
            E::METHOD_OPEN => {
                self.pop();
                self.arena.add_param(outer, inner);
                Some(outer)
            }
            _ => None,
        }
    }

    /// Close a call on top of the stack; `new T(...)` becomes a constructor
    fn finish_call(&mut self, call: ExprId) {
        self.add_cur_token(call);
        self.arena.set_kind(call, E::METHOD);
        let Some(top2) = self.peek_at(2) else {
            return;
        };
        let top2_kind = self.arena.kind(top2);
        match top2_kind {
            E::DOT_OPEN | E::ARROW_OPEN | E::SCOPE_OPEN => {
                let Some(new) = self.peek_at(3).filter(|&id| self.arena.kind(id) == E::NEW) else {
                    return;
                };
                self.pop();
                self.arena.add_param(top2, call);
                self.arena.set_kind(top2, top2_kind.closed());
                self.pop();
                self.arena.set_kind(new, E::CONSTRUCTOR);
                self.arena.add_param(new, top2);
            }
            E::NEW => {
                self.pop();
                self.arena.set_kind(top2, E::CONSTRUCTOR);
                self.arena.add_param(top2, call);
            }
            _ => {}
        }
    }

    pub(super) fn on_lbracket(&mut self) {
        let Some(top) = self.peek() else {
            self.error_state = true;
            return;
        };
        match self.arena.kind(top) {
            E::VARIABLE
            | E::METHOD
            | E::DOT
            | E::ARROW
            | E::SCOPE
            | E::ARRAY
            | E::TYPE
            | E::GENERIC_TYPE
            | E::PARENTHESIS
            | E::LAMBDA_CALL => {
                self.pop();
                let subscript = self.token_exp(E::ARRAY_OPEN);
                self.arena.add_param(subscript, top);
                self.push(subscript);
            }
            _ => self.error_state = true,
        }
    }

    pub(super) fn on_rbracket(&mut self) {
        let Some(top) = self.peek() else {
            self.error_state = true;
            return;
        };
        match self.arena.kind(top) {
            // int[]
            E::ARRAY_OPEN => {
                self.add_cur_token(top);
                self.arena.set_kind(top, E::ARRAY);
            }
            E::VARIABLE
            | E::METHOD
            | E::DOT
            | E::ARROW
            | E::SCOPE
            | E::ARRAY
            | E::PARENTHESIS
            | E::CONSTANT
            | E::USER_DEFINED_LITERAL
            | E::OPERATOR
            | E::UNARY_OPERATOR
            | E::TERNARY_OPERATOR
            | E::MEMBER_POINTER
            | E::CONVERSION => {
                let Some(subscript) = self.peek_at(2).filter(|&id| self.arena.kind(id) == E::ARRAY_OPEN)
                else {
                    self.error_state = true;
                    return;
                };
                self.pop();
                match self.peek_at(2) {
                    Some(new) if self.arena.kind(new) == E::NEW => {
                        // new T[n]
                        self.pop();
                        self.arena.set_kind(new, E::ARRAY);
                        if let Some(element) = self.arena.param(subscript, 0) {
                            self.arena.add_param(new, element);
                        }
                        if let Some(open) = self.arena.tokens(subscript).first().cloned() {
                            self.arena.add_token(new, open);
                        }
                        self.add_cur_token(new);
                    }
                    _ => {
                        self.arena.set_kind(subscript, E::ARRAY);
                        self.arena.add_param(subscript, top);
                        self.add_cur_token(subscript);
                    }
                }
            }
            _ => self.error_state = true,
        }
    }

    /// `args...` / `sizeof...(T)`
    pub(super) fn on_ellipsis(&mut self) {
        match self.top_kind() {
            Some(
                E::VARIABLE
                | E::METHOD
                | E::DOT
                | E::ARRAY
                | E::TYPE
                | E::GENERIC_TYPE
                | E::PARENTHESIS_OPEN,
            ) => {
                if let Some(top) = self.peek() {
                    let pack = self.token_exp(E::OPERATOR);
                    self.arena.add_param(top, pack);
                }
            }
            _ => self.error_state = true,
        }
    }

    pub(super) fn on_lbrace(&mut self) {
        let Some(top) = self.peek() else {
            self.error_state = true;
            return;
        };
        let kind = self.arena.kind(top);
        if self.options.uniform_initialization {
            match kind {
                E::TYPE | E::VARIABLE | E::SCOPE | E::GENERIC_TYPE | E::CONVERSION => {
                    self.pop();
                    let init = self.token_exp(E::UNIFORM_INITIALIZATION_OPEN);
                    self.arena.add_param(init, top);
                    self.push(init);
                    return;
                }
                E::METHOD_OPEN
                | E::UNIFORM_INITIALIZATION_OPEN
                | E::IMPLICIT_UNIFORM_INITIALIZATION_OPEN => {
                    self.push_token_exp(E::IMPLICIT_UNIFORM_INITIALIZATION_OPEN);
                    return;
                }
                _ => {}
            }
        }
        // new T[n] { ... }
        let below = self.peek_at(2).filter(|&id| self.arena.kind(id) == E::NEW);
        match below {
            Some(new) if kind == E::ARRAY => {
                self.pop();
                self.arena.set_kind(new, E::ARRAY);
                if let Some(element) = self.arena.param(top, 0) {
                    self.arena.add_param(new, element);
                }
                let brackets: Vec<_> = self.arena.tokens(top).iter().take(2).cloned().collect();
                for token in brackets {
                    self.arena.add_token(new, token);
                }
            }
            _ => self.error_state = true,
        }
    }

    pub(super) fn on_rbrace(&mut self) {
        if !self.options.uniform_initialization {
            self.error_state = true;
            return;
        }
        let Some(top) = self.peek() else {
            self.error_state = true;
            return;
        };
        let is_init_open = |kind| {
            matches!(
                kind,
                E::UNIFORM_INITIALIZATION_OPEN | E::IMPLICIT_UNIFORM_INITIALIZATION_OPEN
            )
        };
        let kind = self.arena.kind(top);
        let init = if is_init_open(kind) {
            Some(top)
        } else if closes_argument(kind) {
            match self.peek_at(2) {
                Some(owner) if is_init_open(self.arena.kind(owner)) => {
                    self.pop();
                    self.arena.add_param(owner, top);
                    Some(owner)
                }
                _ => None,
            }
        } else {
            None
        };
        let Some(init) = init else {
            self.error_state = true;
            return;
        };
        let closed = self.arena.kind(init).closed();
        self.arena.set_kind(init, closed);
        self.add_cur_token(init);
    }
}
