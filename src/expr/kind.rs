//! Expression node kinds
//!
//! Open kinds (`*_OPEN`) are constructs still waiting for tokens or a
//! closing bracket. Each has exactly one closed counterpart.

use crate::lexer::TokenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum ExprKind {
    // =========================================================================
    // LEAVES
    // =========================================================================
    CONSTANT,
    USER_DEFINED_LITERAL, // 12_km
    VARIABLE,
    TYPE,
    TYPE_PREFIX, // const, volatile before a type name
    AUTO,
    LABEL,

    // =========================================================================
    // OPERATORS
    // =========================================================================
    OPERATOR,
    UNARY_OPERATOR,
    TERNARY_OPERATOR,

    // =========================================================================
    // ACCESS
    // =========================================================================
    DOT,
    DOT_OPEN,
    ARROW,
    ARROW_OPEN,
    SCOPE,
    SCOPE_OPEN,
    MEMBER_POINTER, // *p, &x
    MEMBER_POINTER_OPEN,
    ARROW_RETURN_TYPE, // auto f() -> T

    // =========================================================================
    // BRACKETS
    // =========================================================================
    ARRAY,
    ARRAY_OPEN,
    PARENTHESIS,
    PARENTHESIS_OPEN,
    SPECIAL_PARENTHESIS_OPEN, // if ( for ( switch ( while (
    METHOD,
    METHOD_OPEN,
    CONSTRUCTOR,
    CONVERSION,
    CONVERSION_OPEN,
    TYPE_REFERENCE,
    GENERIC_TYPE,
    GENERIC_TYPE_OPEN,
    DECLTYPE,
    DECLTYPE_OPEN,
    LAMBDA_FUNCTION,
    LAMBDA_CALL,
    LAMBDA_CALL_OPEN,
    UNIFORM_INITIALIZATION,
    UNIFORM_INITIALIZATION_OPEN,
    IMPLICIT_UNIFORM_INITIALIZATION,
    IMPLICIT_UNIFORM_INITIALIZATION_OPEN,

    // =========================================================================
    // STATEMENT PREFIXES
    // =========================================================================
    NEW,
    CASE,
    GOTO,
    CLASSIFIER, // struct, class, union
    IF,
    FOR,
    SWITCH,
    WHILE,
    PREPROC_DIRECTIVE,
    PREPROC_DIRECTIVE_OPEN,
}

impl ExprKind {
    pub fn is_open(self) -> bool {
        self.closed() != self
    }

    /// The closed counterpart of an open kind; closed kinds map to themselves
    pub fn closed(self) -> ExprKind {
        match self {
            Self::DOT_OPEN => Self::DOT,
            Self::ARROW_OPEN => Self::ARROW,
            Self::SCOPE_OPEN => Self::SCOPE,
            Self::MEMBER_POINTER_OPEN => Self::MEMBER_POINTER,
            Self::ARRAY_OPEN => Self::ARRAY,
            Self::PARENTHESIS_OPEN | Self::SPECIAL_PARENTHESIS_OPEN => Self::PARENTHESIS,
            Self::METHOD_OPEN => Self::METHOD,
            Self::CONVERSION_OPEN => Self::CONVERSION,
            Self::GENERIC_TYPE_OPEN => Self::GENERIC_TYPE,
            Self::DECLTYPE_OPEN => Self::DECLTYPE,
            Self::LAMBDA_CALL_OPEN => Self::LAMBDA_CALL,
            Self::UNIFORM_INITIALIZATION_OPEN => Self::UNIFORM_INITIALIZATION,
            Self::IMPLICIT_UNIFORM_INITIALIZATION_OPEN => Self::IMPLICIT_UNIFORM_INITIALIZATION,
            Self::PREPROC_DIRECTIVE_OPEN => Self::PREPROC_DIRECTIVE,
            other => other,
        }
    }

    /// `.` `->` `::` waiting for their right-hand side
    pub fn is_access_open(self) -> bool {
        matches!(self, Self::DOT_OPEN | Self::ARROW_OPEN | Self::SCOPE_OPEN)
    }

    /// Open kind started by an access token or a statement keyword
    pub fn opened_by(token: TokenKind) -> Option<ExprKind> {
        let kind = match token {
            TokenKind::DOT | TokenKind::DOTMBR => Self::DOT_OPEN,
            TokenKind::ARROW | TokenKind::ARROWMBR => Self::ARROW_OPEN,
            TokenKind::SCOPE => Self::SCOPE_OPEN,
            TokenKind::IF => Self::IF,
            TokenKind::FOR => Self::FOR,
            TokenKind::SWITCH => Self::SWITCH,
            TokenKind::WHILE => Self::WHILE,
            _ => return None,
        };
        Some(kind)
    }

    /// Closed nodes that can stand as a complete operand
    pub fn is_operand(self) -> bool {
        matches!(
            self,
            Self::CONSTANT
                | Self::USER_DEFINED_LITERAL
                | Self::VARIABLE
                | Self::METHOD
                | Self::CONSTRUCTOR
                | Self::ARRAY
                | Self::DOT
                | Self::ARROW
                | Self::SCOPE
                | Self::PARENTHESIS
                | Self::CONVERSION
                | Self::MEMBER_POINTER
                | Self::LAMBDA_FUNCTION
                | Self::LAMBDA_CALL
                | Self::UNIFORM_INITIALIZATION
                | Self::IMPLICIT_UNIFORM_INITIALIZATION
                | Self::GENERIC_TYPE
                | Self::TYPE
                | Self::TYPE_REFERENCE
                | Self::DECLTYPE
        )
    }

    pub fn name(self) -> String {
        format!("{:?}", self)
    }
}
