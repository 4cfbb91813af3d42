//! Binary operator precedence
//!
//! Higher binds tighter. Binding powers follow the usual Pratt encoding:
//! a left-associative level `p` is `(2p, 2p + 1)`, a right-associative one
//! is `(2p + 1, 2p)`.

use crate::lexer::TokenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assoc {
    Left,
    Right,
}

/// Precedence level and associativity of a binary operator token
pub fn precedence(kind: TokenKind) -> Option<(u8, Assoc)> {
    use TokenKind as T;
    let level = match kind {
        T::EQ
        | T::PLUSEQ
        | T::MINUSEQ
        | T::STAREQ
        | T::SLASHEQ
        | T::PERCENTEQ
        | T::LTLTEQ
        | T::GTGTEQ
        | T::AMPEQ
        | T::CARETEQ
        | T::BAREQ => (ASSIGNMENT, Assoc::Right),
        T::QUESTION | T::COLON => (CONDITIONAL, Assoc::Right),
        T::BARBAR => (4, Assoc::Left),
        T::AMPAMP => (5, Assoc::Left),
        T::BAR => (6, Assoc::Left),
        T::CARET => (7, Assoc::Left),
        T::AMP => (8, Assoc::Left),
        T::EQEQ | T::NOTEQ => (9, Assoc::Left),
        T::LT | T::GT | T::LTEQ | T::GTEQ => (10, Assoc::Left),
        T::LTLT | T::GTGT => (11, Assoc::Left),
        T::PLUS | T::MINUS => (12, Assoc::Left),
        T::STAR | T::SLASH | T::PERCENT => (13, Assoc::Left),
        _ => return None,
    };
    Some(level)
}

/// Precedence of the assignment operators
pub const ASSIGNMENT: u8 = 2;

/// Precedence of the conditional operator
pub const CONDITIONAL: u8 = 3;

/// Right binding power of a conditional's else branch
///
/// Equal to the right binding power of assignment, so `a ? b : c = d`
/// assigns inside the branch.
pub const CONDITIONAL_ELSE_BP: u8 = ASSIGNMENT * 2;

pub fn infix_binding_power(kind: TokenKind) -> Option<(u8, u8)> {
    let (level, assoc) = precedence(kind)?;
    let bp = match assoc {
        Assoc::Left => (level * 2, level * 2 + 1),
        Assoc::Right => (level * 2 + 1, level * 2),
    };
    Some(bp)
}

/// Tokens that end an operator chain
pub fn is_stop_token(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::SEMICOLON
            | TokenKind::COMMA
            | TokenKind::RPAREN
            | TokenKind::RBRACKET
            | TokenKind::RBRACE
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiplicative_binds_tighter() {
        let (_, plus_r) = infix_binding_power(TokenKind::PLUS).unwrap();
        let (star_l, _) = infix_binding_power(TokenKind::STAR).unwrap();
        assert!(star_l > plus_r);
    }

    #[test]
    fn test_assignment_is_right_associative() {
        let (l, r) = infix_binding_power(TokenKind::EQ).unwrap();
        assert!(l > r);
        let (l, r) = infix_binding_power(TokenKind::MINUS).unwrap();
        assert!(l < r);
    }

    #[test]
    fn test_else_branch_admits_assignment() {
        let (eq_l, _) = infix_binding_power(TokenKind::EQ).unwrap();
        let (question_l, _) = infix_binding_power(TokenKind::QUESTION).unwrap();
        assert!(eq_l > CONDITIONAL_ELSE_BP);
        assert!(question_l > CONDITIONAL_ELSE_BP);
    }

    #[test]
    fn test_non_binary_tokens() {
        assert_eq!(precedence(TokenKind::DOT), None);
        assert_eq!(precedence(TokenKind::TILDE), None);
        assert!(is_stop_token(TokenKind::SEMICOLON));
        assert!(!is_stop_token(TokenKind::PLUS));
    }
}
