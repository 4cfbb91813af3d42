//! Token kinds for C and C++ source
//!
//! One flat enum covers trivia, literals, punctuation, preprocessor
//! directives and keywords. The recognizer dispatches on these kinds and
//! the categories below decide which tokens may be re-read as identifiers,
//! which ones introduce a type, and which ones stop an operator chain.

/// All token kinds produced by the lexer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum TokenKind {
    // =========================================================================
    // TRIVIA (whitespace and comments, kept so offsets stay lossless)
    // =========================================================================
    WHITESPACE = 0,
    NEW_LINE,
    ESCAPED_LINE,         // backslash-newline
    LINE_COMMENT,         // // ...
    DOXYGEN_LINE_COMMENT, // /// ... or //! ...
    BLOCK_COMMENT,        // /* ... */
    DOXYGEN_COMMENT,      // /** ... */ or /*! ... */

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENTIFIER,
    INT_LITERAL,                // 42
    UNSIGNED_LITERAL,           // 42u
    LONG_LITERAL,               // 42l
    LONG_LONG_LITERAL,          // 42ll
    UNSIGNED_LONG_LITERAL,      // 42ul
    UNSIGNED_LONG_LONG_LITERAL, // 42ull
    FLOAT_LITERAL,              // 1.5f
    DOUBLE_LITERAL,             // 1.5
    CHAR_LITERAL,               // 'a', L'a'
    STRING_LITERAL,             // "text"
    RAW_STRING_LITERAL,         // R"(text)"

    // =========================================================================
    // PUNCTUATION AND OPERATORS
    // =========================================================================
    LPAREN,      // (
    RPAREN,      // )
    LBRACKET,    // [
    RBRACKET,    // ]
    LBRACE,      // {
    RBRACE,      // }
    SEMICOLON,   // ;
    COMMA,       // ,
    COLON,       // :
    SCOPE,       // ::
    DOT,         // .
    DOTMBR,      // .*
    ARROW,       // ->
    ARROWMBR,    // ->*
    ELLIPSIS,    // ...
    QUESTION,    // ?
    EQ,          // =
    EQEQ,        // ==
    NOTEQ,       // !=
    LT,          // <
    LTEQ,        // <=
    GT,          // >
    GTEQ,        // >=
    LTLT,        // <<
    GTGT,        // >>
    LTLTEQ,      // <<=
    GTGTEQ,      // >>=
    PLUS,        // +
    PLUSPLUS,    // ++
    PLUSEQ,      // +=
    MINUS,       // -
    MINUSMINUS,  // --
    MINUSEQ,     // -=
    STAR,        // *
    STAREQ,      // *=
    SLASH,       // /
    SLASHEQ,     // /=
    PERCENT,     // %
    PERCENTEQ,   // %=
    AMP,         // &
    AMPAMP,      // &&
    AMPEQ,       // &=
    BAR,         // |
    BARBAR,      // ||
    BAREQ,       // |=
    CARET,       // ^
    CARETEQ,     // ^=
    TILDE,       // ~
    NOT,         // !
    HASH,        // # outside of a directive line start

    // =========================================================================
    // PREPROCESSOR
    // =========================================================================
    PREPROCESSOR_START,     // # at line start
    PREPROCESSOR_START_ALT, // %: at line start
    PREPROCESSOR_DEFINE,
    PREPROCESSOR_ELIF,
    PREPROCESSOR_ELSE,
    PREPROCESSOR_ENDIF,
    PREPROCESSOR_ERROR,
    PREPROCESSOR_IDENT,
    PREPROCESSOR_IF,
    PREPROCESSOR_IFDEF,
    PREPROCESSOR_IFNDEF,
    PREPROCESSOR_INCLUDE,
    PREPROCESSOR_INCLUDE_NEXT,
    PREPROCESSOR_LINE,
    PREPROCESSOR_PRAGMA,
    PREPROCESSOR_UNDEF,
    PREPROCESSOR_WARNING,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    ALIGNAS,
    ALIGNOF,
    __ALIGNOF,
    __ALIGNOF__,
    ASM,
    __ATTRIBUTE,
    __ATTRIBUTE__,
    AUTO,
    BOOL,
    BREAK,
    CASE,
    CATCH,
    CHAR,
    CHAR16_T,
    CHAR32_T,
    CLASS,
    CONST,
    CONSTEXPR,
    CONST_CAST,
    CONTINUE,
    DECLTYPE,
    DEFAULT,
    DELETE,
    DO,
    DOUBLE,
    DYNAMIC_CAST,
    ELSE,
    ENUM,
    EXPLICIT,
    EXPORT,
    EXTERN,
    FALSE,
    FINAL,
    FLOAT,
    FOR,
    FRIEND,
    GOTO,
    IF,
    INLINE,
    INT,
    LONG,
    MUTABLE,
    NAMESPACE,
    NEW,
    NOEXCEPT,
    NULLPTR,
    OPERATOR,
    OVERRIDE,
    PRIVATE,
    PROTECTED,
    PUBLIC,
    REGISTER,
    REINTERPRET_CAST,
    RETURN,
    SHORT,
    SIGNED,
    SIZEOF,
    STATIC,
    STATIC_ASSERT,
    STATIC_CAST,
    STRUCT,
    SWITCH,
    TEMPLATE,
    THIS,
    THREAD_LOCAL,
    THROW,
    TRUE,
    TRY,
    TYPEDEF,
    TYPEID,
    TYPENAME,
    UNION,
    UNSIGNED,
    USING,
    VIRTUAL,
    VOID,
    VOLATILE,
    WCHAR_T,
    WHILE,

    // =========================================================================
    // SPECIAL
    // =========================================================================
    ERROR,
}

impl TokenKind {
    /// Whitespace, newlines and comments
    pub fn is_trivia(self) -> bool {
        (self as u16) <= (Self::DOXYGEN_COMMENT as u16)
    }

    pub fn is_comment(self) -> bool {
        matches!(
            self,
            Self::LINE_COMMENT
                | Self::DOXYGEN_LINE_COMMENT
                | Self::BLOCK_COMMENT
                | Self::DOXYGEN_COMMENT
        )
    }

    /// Language keywords, including the type keywords
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::ALIGNAS as u16) && (self as u16) <= (Self::WHILE as u16)
    }

    /// Directive names following a `#`
    pub fn is_directive_keyword(self) -> bool {
        (self as u16) >= (Self::PREPROCESSOR_DEFINE as u16)
            && (self as u16) <= (Self::PREPROCESSOR_WARNING as u16)
    }

    pub fn is_literal(self) -> bool {
        (self as u16) >= (Self::INT_LITERAL as u16)
            && (self as u16) <= (Self::RAW_STRING_LITERAL as u16)
    }

    /// Punctuation and operator tokens
    pub fn is_separator_or_operator(self) -> bool {
        (self as u16) >= (Self::LPAREN as u16) && (self as u16) <= (Self::HASH as u16)
    }

    /// Keywords that name or qualify a builtin type
    pub fn is_type_keyword(self) -> bool {
        matches!(
            self,
            Self::VOID
                | Self::BOOL
                | Self::CHAR
                | Self::CHAR16_T
                | Self::CHAR32_T
                | Self::WCHAR_T
                | Self::SHORT
                | Self::INT
                | Self::LONG
                | Self::SIGNED
                | Self::UNSIGNED
                | Self::FLOAT
                | Self::DOUBLE
                | Self::CONST
                | Self::VOLATILE
        )
    }

    /// Assignment and comparison operators ending in `=`
    pub fn is_eq_operator(self) -> bool {
        matches!(
            self,
            Self::EQ
                | Self::EQEQ
                | Self::GTEQ
                | Self::GTGTEQ
                | Self::AMPEQ
                | Self::LTEQ
                | Self::LTLTEQ
                | Self::PLUSEQ
                | Self::NOTEQ
                | Self::MINUSEQ
                | Self::STAREQ
                | Self::SLASHEQ
                | Self::BAREQ
                | Self::CARETEQ
                | Self::PERCENTEQ
        )
    }

    /// Name used in diagnostics and tree dumps
    pub fn name(self) -> String {
        format!("{:?}", self)
    }
}

/// Map a directive name (the identifier after `#`) to its token kind
pub fn directive_kind(name: &str) -> Option<TokenKind> {
    let kind = match name {
        "define" => TokenKind::PREPROCESSOR_DEFINE,
        "elif" => TokenKind::PREPROCESSOR_ELIF,
        "else" => TokenKind::PREPROCESSOR_ELSE,
        "endif" => TokenKind::PREPROCESSOR_ENDIF,
        "error" => TokenKind::PREPROCESSOR_ERROR,
        "ident" => TokenKind::PREPROCESSOR_IDENT,
        "if" => TokenKind::PREPROCESSOR_IF,
        "ifdef" => TokenKind::PREPROCESSOR_IFDEF,
        "ifndef" => TokenKind::PREPROCESSOR_IFNDEF,
        "include" => TokenKind::PREPROCESSOR_INCLUDE,
        "include_next" => TokenKind::PREPROCESSOR_INCLUDE_NEXT,
        "line" => TokenKind::PREPROCESSOR_LINE,
        "pragma" => TokenKind::PREPROCESSOR_PRAGMA,
        "undef" => TokenKind::PREPROCESSOR_UNDEF,
        "warning" => TokenKind::PREPROCESSOR_WARNING,
        _ => return None,
    };
    Some(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert!(TokenKind::WHITESPACE.is_trivia());
        assert!(TokenKind::DOXYGEN_COMMENT.is_trivia());
        assert!(!TokenKind::IDENTIFIER.is_trivia());

        assert!(TokenKind::ALIGNAS.is_keyword());
        assert!(TokenKind::WHILE.is_keyword());
        assert!(!TokenKind::ERROR.is_keyword());
        assert!(!TokenKind::PREPROCESSOR_IF.is_keyword());

        assert!(TokenKind::LPAREN.is_separator_or_operator());
        assert!(TokenKind::HASH.is_separator_or_operator());
        assert!(!TokenKind::IDENTIFIER.is_separator_or_operator());
    }

    #[test]
    fn test_type_keywords() {
        assert!(TokenKind::INT.is_type_keyword());
        assert!(TokenKind::CONST.is_type_keyword());
        assert!(!TokenKind::AUTO.is_type_keyword());
        assert!(!TokenKind::STRUCT.is_type_keyword());
    }

    #[test]
    fn test_directive_kind() {
        assert_eq!(directive_kind("include"), Some(TokenKind::PREPROCESSOR_INCLUDE));
        assert_eq!(directive_kind("if"), Some(TokenKind::PREPROCESSOR_IF));
        assert_eq!(directive_kind("foo"), None);
        assert!(TokenKind::PREPROCESSOR_WARNING.is_directive_keyword());
    }
}
