//! Pre-join pass and operator folding
//!
//! Before a token is dispatched, the topmost nodes are merged where the
//! incoming token settles an earlier ambiguity: a name under `METHOD_OPEN`
//! followed by `*` is a parameter type, `~Name(` is a destructor, an access
//! operator is complete once an operator follows. At stop tokens the
//! alternating operand/operator chain on top of the stack is folded into a
//! tree with precedence climbing.

use tracing::trace;

use super::processor::CompletionTokenProcessor;
use crate::expr::precedence::{
    CONDITIONAL, CONDITIONAL_ELSE_BP, infix_binding_power, is_stop_token, precedence,
};
use crate::expr::{ExprArena, ExprId, ExprKind, ExprToken};
use crate::lexer::TokenKind;

use crate::expr::ExprKind as E;
use crate::lexer::TokenKind as T;

/// Role of a stack node inside an operator chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Item,
    Operator(TokenKind),
    /// `TERNARY_OPERATOR` holding only its condition
    Question,
    Stop,
}

#[derive(Debug, Clone, Copy)]
enum Elem {
    Item(ExprId),
    Op(ExprId, TokenKind),
    Question(ExprId),
}

/// Tokens that show the preceding name is the type of a declarator
fn declarator_follows(next: Option<TokenKind>) -> bool {
    matches!(next, Some(T::STAR | T::AMP | T::CONST | T::IDENTIFIER))
}

/// End of input or an operator/separator token
fn completes_access(next: Option<TokenKind>) -> bool {
    next.is_none_or(|kind| kind.is_separator_or_operator())
}

impl CompletionTokenProcessor {
    pub(super) fn check_join(&mut self, next: Option<TokenKind>) {
        loop {
            let (Some(top), Some(top2)) = (self.peek(), self.peek_at(2)) else {
                break;
            };
            let top_kind = self.arena.kind(top);
            let top2_kind = self.arena.kind(top2);
            let declarator = declarator_follows(next);

            match top_kind {
                E::GENERIC_TYPE if top2_kind == E::METHOD_OPEN && declarator => {
                    self.pop();
                    let ty = self.arena.empty(E::TYPE);
                    self.arena.add_param(ty, top);
                    self.push(ty);
                    break;
                }
                E::VARIABLE if top2_kind == E::METHOD_OPEN && declarator => {
                    self.arena.retype_as_type(top);
                    break;
                }
                E::VARIABLE | E::GENERIC_TYPE if top2_kind == E::TYPE_PREFIX && declarator => {
                    self.pop();
                    self.arena.retype_as_type(top2);
                    let tokens = self.arena.tokens(top).to_vec();
                    for token in tokens {
                        self.arena.add_token(top2, token);
                    }
                    break;
                }
                _ => {}
            }

            let declarator_candidate = matches!(
                top_kind,
                E::VARIABLE
                    | E::GENERIC_TYPE
                    | E::METHOD
                    | E::CONSTRUCTOR
                    | E::ARRAY
                    | E::DOT
                    | E::ARROW
                    | E::SCOPE
                    | E::PARENTHESIS
                    | E::OPERATOR
            );
            let operand = declarator_candidate
                || matches!(
                    top_kind,
                    E::CONSTANT | E::USER_DEFINED_LITERAL | E::LAMBDA_CALL | E::MEMBER_POINTER
                )
                || (top_kind == E::UNARY_OPERATOR && self.arena.param_count(top) > 0);
            if !operand {
                break;
            }

            let again = match top2_kind {
                E::METHOD_OPEN => {
                    if declarator && declarator_candidate {
                        self.arena.retype_as_type(top);
                    }
                    false
                }
                E::UNARY_OPERATOR => self.join_unary(top, top2, next),
                E::DOT_OPEN | E::ARROW_OPEN | E::SCOPE_OPEN => {
                    let keep_open = match next {
                        Some(T::LPAREN) => true,
                        Some(T::LT) => self.templates_enabled && self.can_template_ambiguity_happen(),
                        _ => false,
                    };
                    if completes_access(next) && !keep_open {
                        self.pop();
                        self.arena.add_param(top2, top);
                        self.arena.set_kind(top2, top2_kind.closed());
                        true
                    } else {
                        false
                    }
                }
                E::MEMBER_POINTER_OPEN => {
                    let keep_open = matches!(
                        next,
                        Some(T::LPAREN | T::SCOPE | T::LBRACKET | T::DOT | T::ARROW)
                    );
                    if completes_access(next) && !keep_open {
                        self.pop();
                        self.arena.add_param(top2, top);
                        self.arena.set_kind(top2, E::MEMBER_POINTER);
                        true
                    } else {
                        false
                    }
                }
                E::CONVERSION => {
                    if matches!(next, Some(T::RPAREN | T::COMMA))
                        && matches!(self.kind_at(3), Some(E::PARENTHESIS_OPEN | E::METHOD_OPEN))
                    {
                        // cast argument: `(T) x,`
                        self.pop();
                        self.arena.add_param(top2, top);
                    }
                    false
                }
                E::TYPE | E::VARIABLE | E::TYPE_REFERENCE | E::SCOPE => {
                    if matches!(next, Some(T::RPAREN | T::STAR | T::AMP | T::LBRACKET | T::GT))
                        && self.is_pointer_operator(top)
                    {
                        // `T *` followed by `)` `*` `&` `[` `>` is a type
                        self.pop();
                        self.pop();
                        let reference = self.arena.empty(E::TYPE_REFERENCE);
                        self.arena.add_param(reference, top2);
                        let token = self.arena.tokens(top)[0].clone();
                        self.arena.add_token(reference, token);
                        self.push(reference);
                    }
                    false
                }
                _ => false,
            };
            if !again {
                break;
            }
        }

        if next.is_none_or(is_stop_token) {
            self.fold_operators(0);
        }
    }

    /// A bare `*`, `&` (or `&&` with templates) operator
    fn is_pointer_operator(&self, id: ExprId) -> bool {
        let node = self.arena.node(id);
        node.kind == E::OPERATOR
            && node.params.is_empty()
            && node.tokens.len() == 1
            && match node.tokens[0].kind {
                T::STAR | T::AMP => true,
                T::AMPAMP => self.templates_enabled,
                _ => false,
            }
    }

    /// Attach an operand to the prefix operator below it
    fn join_unary(&mut self, top: ExprId, unary: ExprId, next: Option<TokenKind>) -> bool {
        match next {
            Some(
                T::DOT | T::DOTMBR | T::ARROW | T::ARROWMBR | T::SCOPE | T::LBRACKET | T::PLUSPLUS
                | T::MINUSMINUS,
            ) => return false,
            Some(T::LT) if self.templates_enabled => return false,
            Some(T::LT | T::LPAREN) => {
                self.merge_destructor(top, unary);
                return false;
            }
            Some(kind) if kind.is_trivia() => return false,
            None if self.kind_at(3).is_some_and(ExprKind::is_access_open) => {
                if self.merge_destructor(top, unary) {
                    return false;
                }
            }
            _ => {}
        }
        if self.arena.param_count(unary) > 0 {
            return false;
        }
        self.pop();
        self.arena.add_param(unary, top);
        true
    }

    /// `~` `Name` becomes the single name `~Name`
    fn merge_destructor(&mut self, top: ExprId, unary: ExprId) -> bool {
        let name = self.arena.node(top);
        let tilde = self.arena.node(unary);
        let is_destructor = name.kind == E::VARIABLE
            && name.params.is_empty()
            && name.tokens.len() == 1
            && tilde.params.is_empty()
            && tilde.tokens.len() == 1
            && tilde.tokens[0].kind == T::TILDE;
        if !is_destructor {
            return false;
        }
        let token = ExprToken::new(
            name.tokens[0].kind,
            tilde.tokens[0].offset,
            format!("~{}", name.tokens[0].text),
        );
        self.pop();
        self.pop();
        let merged = self.arena.with_token(E::VARIABLE, token);
        self.push(merged);
        true
    }

    fn slot(&self, id: ExprId) -> Slot {
        let node = self.arena.node(id);
        match node.kind {
            E::OPERATOR if node.params.is_empty() => node
                .token_kind(0)
                .filter(|kind| precedence(*kind).is_some())
                .map_or(Slot::Stop, Slot::Operator),
            E::TERNARY_OPERATOR => match node.params.len() {
                0 => Slot::Stop,
                1 => Slot::Question,
                _ => Slot::Item,
            },
            E::UNARY_OPERATOR if node.params.is_empty() => Slot::Stop,
            E::OPERATOR | E::UNARY_OPERATOR => Slot::Item,
            kind if kind.is_operand() => Slot::Item,
            _ => Slot::Stop,
        }
    }

    /// Fold the operator chain on top of the stack, leaving operators that
    /// bind looser than `min_level` in place.
    pub(super) fn fold_operators(&mut self, min_level: u8) {
        let Some(top) = self.peek() else {
            return;
        };
        if self.slot(top) != Slot::Item {
            return;
        }

        // collected top-down
        let mut chain = vec![Elem::Item(top)];
        let mut depth = 1;
        while let Some(below) = self.peek_at(depth + 1) {
            match self.slot(below) {
                Slot::Operator(kind) => {
                    let level = precedence(kind).map_or(0, |(level, _)| level);
                    if level < min_level {
                        break;
                    }
                    let Some(lhs) = self.peek_at(depth + 2) else {
                        break;
                    };
                    if self.slot(lhs) != Slot::Item {
                        break;
                    }
                    chain.push(Elem::Op(below, kind));
                    chain.push(Elem::Item(lhs));
                    depth += 2;
                }
                Slot::Question if CONDITIONAL >= min_level => {
                    let Some(cond) = self.arena.param(below, 0) else {
                        break;
                    };
                    chain.push(Elem::Question(below));
                    chain.push(Elem::Item(cond));
                    depth += 1;
                }
                _ => break,
            }
        }
        if chain.len() == 1 {
            return;
        }
        chain.reverse();

        let Some(root) = Fold::new(&mut self.arena).run(&chain) else {
            trace!("[FOLD] chain of {} left unfolded", chain.len());
            return;
        };
        let keep = self.stack.len() - depth;
        self.stack.truncate(keep);
        self.push(root);
    }
}

/// Operator waiting for its right operand
#[derive(Debug, Clone, Copy)]
enum Pending {
    Binary(ExprId, u8),
    /// `?` before its `:`
    Then(ExprId),
    /// `?` and its `:`
    Else(ExprId, ExprId),
}

impl Pending {
    /// Binding power the operator holds its right operand with
    fn right_bp(self) -> u8 {
        match self {
            Pending::Binary(_, r_bp) => r_bp,
            Pending::Then(_) => 0,
            Pending::Else(..) => CONDITIONAL_ELSE_BP,
        }
    }
}

/// Shunting-yard over a bottom-up operand/operator chain
///
/// Operands and operators live on explicit stacks, so chain length never
/// shows up as call depth.
struct Fold<'a> {
    arena: &'a mut ExprArena,
    operands: Vec<ExprId>,
    pending: Vec<Pending>,
    /// `Then` entries in `pending`
    open_questions: usize,
}

impl<'a> Fold<'a> {
    fn new(arena: &'a mut ExprArena) -> Self {
        Self {
            arena,
            operands: Vec::new(),
            pending: Vec::new(),
            open_questions: 0,
        }
    }

    fn run(mut self, elems: &[Elem]) -> Option<ExprId> {
        for &elem in elems {
            match elem {
                Elem::Item(id) => self.operands.push(id),
                Elem::Op(colon, T::COLON) if self.open_questions > 0 => {
                    while let Some(&top) = self.pending.last() {
                        if let Pending::Then(ternary) = top {
                            self.pending.pop();
                            self.open_questions -= 1;
                            self.pending.push(Pending::Else(ternary, colon));
                            break;
                        }
                        self.reduce()?;
                    }
                }
                Elem::Op(op, kind) => {
                    let (l_bp, r_bp) = infix_binding_power(kind)?;
                    self.reduce_above(l_bp)?;
                    self.pending.push(Pending::Binary(op, r_bp));
                }
                Elem::Question(ternary) => {
                    let (l_bp, _) = infix_binding_power(T::QUESTION)?;
                    self.reduce_above(l_bp)?;
                    self.pending.push(Pending::Then(ternary));
                    self.open_questions += 1;
                }
            }
        }
        while !self.pending.is_empty() {
            self.reduce()?;
        }
        match self.operands.as_slice() {
            [root] => Some(*root),
            _ => None,
        }
    }

    /// Reduce every pending operator that binds its right operand tighter
    /// than an incoming operator binds its left one
    fn reduce_above(&mut self, l_bp: u8) -> Option<()> {
        while self.pending.last().is_some_and(|p| p.right_bp() > l_bp) {
            self.reduce()?;
        }
        Some(())
    }

    fn reduce(&mut self) -> Option<()> {
        let pending = self.pending.pop()?;
        let rhs = self.operands.pop()?;
        let lhs = self.operands.pop()?;
        let node = match pending {
            Pending::Binary(op, _) => {
                self.arena.add_param(op, lhs);
                self.arena.add_param(op, rhs);
                op
            }
            Pending::Then(ternary) => {
                self.open_questions -= 1;
                self.arena.node_mut(ternary).params = vec![lhs, rhs];
                ternary
            }
            Pending::Else(ternary, colon) => {
                let condition = self.operands.pop()?;
                if let Some(token) = self.arena.tokens(colon).first().cloned() {
                    self.arena.add_token(ternary, token);
                }
                self.arena.node_mut(ternary).params = vec![condition, lhs, rhs];
                ternary
            }
        };
        self.operands.push(node);
        Some(())
    }
}
