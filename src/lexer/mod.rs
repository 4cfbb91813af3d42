//! Logos-based lexer for C and C++
//!
//! The recognizer does not need a full preprocessor or parser, only a
//! lossless token stream: whitespace, newlines and comments are all kept
//! with their byte offsets.
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Tokens with TokenKind
//!     ↓
//! Literal suffixes, directive classification (`#include`, `%:define`)
//!     ↓
//! CompletionTokenProcessor
//! ```

mod token_kind;

pub use token_kind::{TokenKind, directive_kind};

use logos::Logos;
use text_size::{TextRange, TextSize};

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub offset: TextSize,
}

impl Token<'_> {
    pub fn range(&self) -> TextRange {
        TextRange::at(self.offset, TextSize::of(self.text))
    }

    pub fn end(&self) -> TextSize {
        self.offset + TextSize::of(self.text)
    }
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
    /// Only horizontal trivia seen since the last newline
    line_start: bool,
    /// A directive start was seen and its name is still to come
    directive_pending: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
            line_start: true,
            directive_pending: false,
        }
    }

    fn classify(&mut self, kind: TokenKind, text: &str) -> TokenKind {
        let kind = match kind {
            TokenKind::HASH | TokenKind::PREPROCESSOR_START_ALT if self.line_start => {
                self.directive_pending = true;
                if kind == TokenKind::HASH {
                    TokenKind::PREPROCESSOR_START
                } else {
                    TokenKind::PREPROCESSOR_START_ALT
                }
            }
            TokenKind::PREPROCESSOR_START_ALT => TokenKind::HASH,
            TokenKind::WHITESPACE | TokenKind::BLOCK_COMMENT | TokenKind::DOXYGEN_COMMENT => {
                return kind;
            }
            _ if self.directive_pending => {
                self.directive_pending = false;
                if kind == TokenKind::IDENTIFIER || kind.is_keyword() {
                    directive_kind(text).unwrap_or(kind)
                } else {
                    kind
                }
            }
            _ => kind,
        };

        match kind {
            TokenKind::NEW_LINE => {
                self.line_start = true;
                self.directive_pending = false;
            }
            TokenKind::ESCAPED_LINE => {}
            _ => self.line_start = false,
        }
        kind
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;

        let kind = match logos_token {
            Ok(LogosToken::Integer) => integer_kind(text),
            Ok(LogosToken::Floating) => floating_kind(text),
            Ok(t) => t.into(),
            Err(()) => TokenKind::ERROR,
        };
        let kind = self.classify(kind, text);

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Pick the literal kind from an integer's suffix
fn integer_kind(text: &str) -> TokenKind {
    let suffix_len = text
        .bytes()
        .rev()
        .take_while(|b| matches!(b, b'u' | b'U' | b'l' | b'L' | b'z' | b'Z'))
        .count();
    let suffix = &text[text.len() - suffix_len..];
    let unsigned = suffix.contains(['u', 'U']);
    let longs = suffix.matches(['l', 'L']).count() + suffix.matches(['z', 'Z']).count();

    match (unsigned, longs) {
        (false, 0) => TokenKind::INT_LITERAL,
        (true, 0) => TokenKind::UNSIGNED_LITERAL,
        (false, 1) => TokenKind::LONG_LITERAL,
        (false, _) => TokenKind::LONG_LONG_LITERAL,
        (true, 1) => TokenKind::UNSIGNED_LONG_LITERAL,
        (true, _) => TokenKind::UNSIGNED_LONG_LONG_LITERAL,
    }
}

fn floating_kind(text: &str) -> TokenKind {
    if text.ends_with(['f', 'F']) {
        TokenKind::FLOAT_LITERAL
    } else {
        TokenKind::DOUBLE_LITERAL
    }
}

/// Consume the rest of a block comment, up to end of input if unterminated
fn block_comment(lex: &mut logos::Lexer<'_, LogosToken>) {
    let rest = lex.remainder();
    // `/**/` shares its star with the opener
    if lex.slice().len() == 3 && rest.starts_with('/') {
        lex.bump(1);
        return;
    }
    match rest.find("*/") {
        Some(end) => lex.bump(end + 2),
        None => lex.bump(rest.len()),
    }
}

/// Consume a raw string body `delim( ... )delim"`
fn raw_string(lex: &mut logos::Lexer<'_, LogosToken>) -> bool {
    let rest = lex.remainder();
    let Some(open) = rest.find('(') else {
        return false;
    };
    let delimiter = &rest[..open];
    if delimiter.len() > 16
        || delimiter.contains(|c: char| c.is_whitespace() || c == ')' || c == '\\' || c == '"')
    {
        return false;
    }
    let closing = format!("){}\"", delimiter);
    match rest[open + 1..].find(&closing) {
        Some(end) => lex.bump(open + 1 + end + closing.len()),
        None => lex.bump(rest.len()),
    }
    true
}

/// Logos token enum - maps to TokenKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\x0B\x0C]+")]
    Whitespace,

    #[regex(r"\r\n|\n|\r")]
    NewLine,

    #[regex(r"\\\r?\n")]
    EscapedLine,

    #[regex(r"//[^\r\n]*")]
    LineComment,

    #[regex(r"///[^\r\n]*")]
    #[regex(r"//![^\r\n]*")]
    DoxygenLineComment,

    #[token("/*", block_comment)]
    BlockComment,

    #[token("/**", block_comment)]
    #[token("/*!", block_comment)]
    DoxygenComment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*")]
    Ident,

    #[regex(r"[0-9][0-9']*[uUlLzZ]*")]
    #[regex(r"0[xX][0-9a-fA-F][0-9a-fA-F']*[uUlLzZ]*")]
    #[regex(r"0[bB][01][01']*[uUlLzZ]*")]
    Integer,

    #[regex(r"[0-9][0-9']*\.[0-9']*([eE][+-]?[0-9]+)?[fFlL]?")]
    #[regex(r"\.[0-9][0-9']*([eE][+-]?[0-9]+)?[fFlL]?")]
    #[regex(r"[0-9][0-9']*[eE][+-]?[0-9]+[fFlL]?")]
    Floating,

    #[regex(r"(u8|u|U|L)?'([^'\\\r\n]|\\.)*'?")]
    Char,

    #[regex(r#"(u8|u|U|L)?"([^"\\\r\n]|\\.)*"?"#)]
    String,

    #[regex(r#"(u8|u|U|L)?R""#, raw_string)]
    RawString,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token("::")]
    Scope,
    #[token(".")]
    Dot,
    #[token(".*")]
    DotMbr,
    #[token("->")]
    Arrow,
    #[token("->*")]
    ArrowMbr,
    #[token("...")]
    Ellipsis,
    #[token("?")]
    Question,
    #[token("=")]
    Eq,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,
    #[token("<<")]
    LtLt,
    #[token(">>")]
    GtGt,
    #[token("<<=")]
    LtLtEq,
    #[token(">>=")]
    GtGtEq,
    #[token("+")]
    Plus,
    #[token("++")]
    PlusPlus,
    #[token("+=")]
    PlusEq,
    #[token("-")]
    Minus,
    #[token("--")]
    MinusMinus,
    #[token("-=")]
    MinusEq,
    #[token("*")]
    Star,
    #[token("*=")]
    StarEq,
    #[token("/")]
    Slash,
    #[token("/=")]
    SlashEq,
    #[token("%")]
    Percent,
    #[token("%=")]
    PercentEq,
    #[token("&")]
    Amp,
    #[token("&&")]
    AmpAmp,
    #[token("&=")]
    AmpEq,
    #[token("|")]
    Bar,
    #[token("||")]
    BarBar,
    #[token("|=")]
    BarEq,
    #[token("^")]
    Caret,
    #[token("^=")]
    CaretEq,
    #[token("~")]
    Tilde,
    #[token("!")]
    Not,
    #[token("#")]
    Hash,
    #[token("%:")]
    HashDigraph,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    #[token("alignas")]
    AlignasKw,
    #[token("alignof")]
    AlignofKw,
    #[token("__alignof")]
    GnuAlignofKw,
    #[token("__alignof__")]
    GnuAlignofUnderscoreKw,
    #[token("asm")]
    #[token("__asm")]
    #[token("__asm__")]
    AsmKw,
    #[token("__attribute")]
    GnuAttributeKw,
    #[token("__attribute__")]
    GnuAttributeUnderscoreKw,
    #[token("auto")]
    AutoKw,
    #[token("bool")]
    #[token("_Bool")]
    BoolKw,
    #[token("break")]
    BreakKw,
    #[token("case")]
    CaseKw,
    #[token("catch")]
    CatchKw,
    #[token("char")]
    CharKw,
    #[token("char16_t")]
    Char16Kw,
    #[token("char32_t")]
    Char32Kw,
    #[token("class")]
    ClassKw,
    #[token("const")]
    #[token("__const")]
    #[token("__const__")]
    ConstKw,
    #[token("constexpr")]
    ConstexprKw,
    #[token("const_cast")]
    ConstCastKw,
    #[token("continue")]
    ContinueKw,
    #[token("decltype")]
    #[token("__decltype")]
    DecltypeKw,
    #[token("default")]
    DefaultKw,
    #[token("delete")]
    DeleteKw,
    #[token("do")]
    DoKw,
    #[token("double")]
    DoubleKw,
    #[token("dynamic_cast")]
    DynamicCastKw,
    #[token("else")]
    ElseKw,
    #[token("enum")]
    EnumKw,
    #[token("explicit")]
    ExplicitKw,
    #[token("export")]
    ExportKw,
    #[token("extern")]
    ExternKw,
    #[token("false")]
    FalseKw,
    #[token("final")]
    FinalKw,
    #[token("float")]
    FloatKw,
    #[token("for")]
    ForKw,
    #[token("friend")]
    FriendKw,
    #[token("goto")]
    GotoKw,
    #[token("if")]
    IfKw,
    #[token("inline")]
    #[token("__inline")]
    #[token("__inline__")]
    InlineKw,
    #[token("int")]
    IntKw,
    #[token("long")]
    LongKw,
    #[token("mutable")]
    MutableKw,
    #[token("namespace")]
    NamespaceKw,
    #[token("new")]
    NewKw,
    #[token("noexcept")]
    NoexceptKw,
    #[token("nullptr")]
    NullptrKw,
    #[token("operator")]
    OperatorKw,
    #[token("override")]
    OverrideKw,
    #[token("private")]
    PrivateKw,
    #[token("protected")]
    ProtectedKw,
    #[token("public")]
    PublicKw,
    #[token("register")]
    RegisterKw,
    #[token("reinterpret_cast")]
    ReinterpretCastKw,
    #[token("return")]
    ReturnKw,
    #[token("short")]
    ShortKw,
    #[token("signed")]
    #[token("__signed__")]
    SignedKw,
    #[token("sizeof")]
    SizeofKw,
    #[token("static")]
    StaticKw,
    #[token("static_assert")]
    #[token("_Static_assert")]
    StaticAssertKw,
    #[token("static_cast")]
    StaticCastKw,
    #[token("struct")]
    StructKw,
    #[token("switch")]
    SwitchKw,
    #[token("template")]
    TemplateKw,
    #[token("this")]
    ThisKw,
    #[token("thread_local")]
    #[token("_Thread_local")]
    ThreadLocalKw,
    #[token("throw")]
    ThrowKw,
    #[token("true")]
    TrueKw,
    #[token("try")]
    TryKw,
    #[token("typedef")]
    TypedefKw,
    #[token("typeid")]
    TypeidKw,
    #[token("typename")]
    TypenameKw,
    #[token("union")]
    UnionKw,
    #[token("unsigned")]
    UnsignedKw,
    #[token("using")]
    UsingKw,
    #[token("virtual")]
    VirtualKw,
    #[token("void")]
    VoidKw,
    #[token("volatile")]
    #[token("__volatile__")]
    VolatileKw,
    #[token("wchar_t")]
    WcharKw,
    #[token("while")]
    WhileKw,
}

impl From<LogosToken> for TokenKind {
    fn from(token: LogosToken) -> Self {
        use LogosToken::*;
        match token {
            // Trivia
            Whitespace => TokenKind::WHITESPACE,
            NewLine => TokenKind::NEW_LINE,
            EscapedLine => TokenKind::ESCAPED_LINE,
            LineComment => TokenKind::LINE_COMMENT,
            DoxygenLineComment => TokenKind::DOXYGEN_LINE_COMMENT,
            BlockComment => TokenKind::BLOCK_COMMENT,
            DoxygenComment => TokenKind::DOXYGEN_COMMENT,

            // Literals
            Ident => TokenKind::IDENTIFIER,
            Integer => TokenKind::INT_LITERAL,
            Floating => TokenKind::DOUBLE_LITERAL,
            Char => TokenKind::CHAR_LITERAL,
            String => TokenKind::STRING_LITERAL,
            RawString => TokenKind::RAW_STRING_LITERAL,

            // Punctuation
            LParen => TokenKind::LPAREN,
            RParen => TokenKind::RPAREN,
            LBracket => TokenKind::LBRACKET,
            RBracket => TokenKind::RBRACKET,
            LBrace => TokenKind::LBRACE,
            RBrace => TokenKind::RBRACE,
            Semicolon => TokenKind::SEMICOLON,
            Comma => TokenKind::COMMA,
            Colon => TokenKind::COLON,
            Scope => TokenKind::SCOPE,
            Dot => TokenKind::DOT,
            DotMbr => TokenKind::DOTMBR,
            Arrow => TokenKind::ARROW,
            ArrowMbr => TokenKind::ARROWMBR,
            Ellipsis => TokenKind::ELLIPSIS,
            Question => TokenKind::QUESTION,
            Eq => TokenKind::EQ,
            EqEq => TokenKind::EQEQ,
            NotEq => TokenKind::NOTEQ,
            Lt => TokenKind::LT,
            LtEq => TokenKind::LTEQ,
            Gt => TokenKind::GT,
            GtEq => TokenKind::GTEQ,
            LtLt => TokenKind::LTLT,
            GtGt => TokenKind::GTGT,
            LtLtEq => TokenKind::LTLTEQ,
            GtGtEq => TokenKind::GTGTEQ,
            Plus => TokenKind::PLUS,
            PlusPlus => TokenKind::PLUSPLUS,
            PlusEq => TokenKind::PLUSEQ,
            Minus => TokenKind::MINUS,
            MinusMinus => TokenKind::MINUSMINUS,
            MinusEq => TokenKind::MINUSEQ,
            Star => TokenKind::STAR,
            StarEq => TokenKind::STAREQ,
            Slash => TokenKind::SLASH,
            SlashEq => TokenKind::SLASHEQ,
            Percent => TokenKind::PERCENT,
            PercentEq => TokenKind::PERCENTEQ,
            Amp => TokenKind::AMP,
            AmpAmp => TokenKind::AMPAMP,
            AmpEq => TokenKind::AMPEQ,
            Bar => TokenKind::BAR,
            BarBar => TokenKind::BARBAR,
            BarEq => TokenKind::BAREQ,
            Caret => TokenKind::CARET,
            CaretEq => TokenKind::CARETEQ,
            Tilde => TokenKind::TILDE,
            Not => TokenKind::NOT,
            Hash => TokenKind::HASH,
            HashDigraph => TokenKind::PREPROCESSOR_START_ALT,

            // Keywords
            AlignasKw => TokenKind::ALIGNAS,
            AlignofKw => TokenKind::ALIGNOF,
            GnuAlignofKw => TokenKind::__ALIGNOF,
            GnuAlignofUnderscoreKw => TokenKind::__ALIGNOF__,
            AsmKw => TokenKind::ASM,
            GnuAttributeKw => TokenKind::__ATTRIBUTE,
            GnuAttributeUnderscoreKw => TokenKind::__ATTRIBUTE__,
            AutoKw => TokenKind::AUTO,
            BoolKw => TokenKind::BOOL,
            BreakKw => TokenKind::BREAK,
            CaseKw => TokenKind::CASE,
            CatchKw => TokenKind::CATCH,
            CharKw => TokenKind::CHAR,
            Char16Kw => TokenKind::CHAR16_T,
            Char32Kw => TokenKind::CHAR32_T,
            ClassKw => TokenKind::CLASS,
            ConstKw => TokenKind::CONST,
            ConstexprKw => TokenKind::CONSTEXPR,
            ConstCastKw => TokenKind::CONST_CAST,
            ContinueKw => TokenKind::CONTINUE,
            DecltypeKw => TokenKind::DECLTYPE,
            DefaultKw => TokenKind::DEFAULT,
            DeleteKw => TokenKind::DELETE,
            DoKw => TokenKind::DO,
            DoubleKw => TokenKind::DOUBLE,
            DynamicCastKw => TokenKind::DYNAMIC_CAST,
            ElseKw => TokenKind::ELSE,
            EnumKw => TokenKind::ENUM,
            ExplicitKw => TokenKind::EXPLICIT,
            ExportKw => TokenKind::EXPORT,
            ExternKw => TokenKind::EXTERN,
            FalseKw => TokenKind::FALSE,
            FinalKw => TokenKind::FINAL,
            FloatKw => TokenKind::FLOAT,
            ForKw => TokenKind::FOR,
            FriendKw => TokenKind::FRIEND,
            GotoKw => TokenKind::GOTO,
            IfKw => TokenKind::IF,
            InlineKw => TokenKind::INLINE,
            IntKw => TokenKind::INT,
            LongKw => TokenKind::LONG,
            MutableKw => TokenKind::MUTABLE,
            NamespaceKw => TokenKind::NAMESPACE,
            NewKw => TokenKind::NEW,
            NoexceptKw => TokenKind::NOEXCEPT,
            NullptrKw => TokenKind::NULLPTR,
            OperatorKw => TokenKind::OPERATOR,
            OverrideKw => TokenKind::OVERRIDE,
            PrivateKw => TokenKind::PRIVATE,
            ProtectedKw => TokenKind::PROTECTED,
            PublicKw => TokenKind::PUBLIC,
            RegisterKw => TokenKind::REGISTER,
            ReinterpretCastKw => TokenKind::REINTERPRET_CAST,
            ReturnKw => TokenKind::RETURN,
            ShortKw => TokenKind::SHORT,
            SignedKw => TokenKind::SIGNED,
            SizeofKw => TokenKind::SIZEOF,
            StaticKw => TokenKind::STATIC,
            StaticAssertKw => TokenKind::STATIC_ASSERT,
            StaticCastKw => TokenKind::STATIC_CAST,
            StructKw => TokenKind::STRUCT,
            SwitchKw => TokenKind::SWITCH,
            TemplateKw => TokenKind::TEMPLATE,
            ThisKw => TokenKind::THIS,
            ThreadLocalKw => TokenKind::THREAD_LOCAL,
            ThrowKw => TokenKind::THROW,
            TrueKw => TokenKind::TRUE,
            TryKw => TokenKind::TRY,
            TypedefKw => TokenKind::TYPEDEF,
            TypeidKw => TokenKind::TYPEID,
            TypenameKw => TokenKind::TYPENAME,
            UnionKw => TokenKind::UNION,
            UnsignedKw => TokenKind::UNSIGNED,
            UsingKw => TokenKind::USING,
            VirtualKw => TokenKind::VIRTUAL,
            VoidKw => TokenKind::VOID,
            VolatileKw => TokenKind::VOLATILE,
            WcharKw => TokenKind::WCHAR_T,
            WhileKw => TokenKind::WHILE,
        }
    }
}
