//! Scan driver
//!
//! Lexes a source buffer, feeds the tokens before the cursor to a
//! [`CompletionTokenProcessor`] and returns the finished [`ScanResult`].

mod macros;

pub use macros::{MacroExpander, MacroTable};

use text_size::TextSize;
use tracing::debug;

use crate::completion::{CompletionTokenProcessor, ScanResult, SourceToken, TokenProcessor};
use crate::config::ScanOptions;
use crate::errors::ScanError;
use crate::lexer::{Lexer, TokenKind};

/// Scan `source` from its beginning up to `cursor`
pub fn scan(source: &str, cursor: TextSize, options: &ScanOptions) -> Result<ScanResult, ScanError> {
    scan_range(source, TextSize::new(0), cursor, options, None)
}

/// Scan `source[start..cursor]`, `start` being a known statement boundary
pub fn scan_range(
    source: &str,
    start: TextSize,
    cursor: TextSize,
    options: &ScanOptions,
    macros: Option<&dyn MacroExpander>,
) -> Result<ScanResult, ScanError> {
    validate(source, start, cursor)?;
    Ok(run(source, start, cursor, options, macros))
}

/// Scan a standalone expression
///
/// With `keep_whole_ast` the text is wrapped in parentheses so the whole
/// expression reduces to one node; see [`ScanResult::expression_result`].
pub fn scan_expression(text: &str, keep_whole_ast: bool, options: &ScanOptions) -> ScanResult {
    let source = if keep_whole_ast {
        format!("({text})")
    } else {
        text.to_string()
    };
    let cursor = TextSize::of(source.as_str());
    run(&source, TextSize::new(0), cursor, options, None).with_wrapping(keep_whole_ast)
}

fn validate(source: &str, start: TextSize, cursor: TextSize) -> Result<(), ScanError> {
    let len = TextSize::of(source);
    if cursor > len {
        return Err(ScanError::CursorOutOfBounds { cursor, len });
    }
    if start > cursor {
        return Err(ScanError::StartAfterCursor { start, cursor });
    }
    for offset in [start, cursor] {
        if !source.is_char_boundary(usize::from(offset)) {
            return Err(ScanError::NotCharBoundary(offset));
        }
    }
    Ok(())
}

fn run(
    source: &str,
    start: TextSize,
    cursor: TextSize,
    options: &ScanOptions,
    macros: Option<&dyn MacroExpander>,
) -> ScanResult {
    let text = &source[usize::from(start)..];
    let mut tokens = Lexer::new(text)
        .map(|token| SourceToken::from_lexed(&token, start))
        .take_while(|token| token.offset < cursor)
        .peekable();

    let first = tokens.peek().map_or(start, |token| token.offset);
    let mut processor = CompletionTokenProcessor::new(*options);
    processor.start(start, first, cursor);

    let mut last = start;
    let mut fed = 0usize;
    for token in tokens {
        last = token.offset;
        let expansion = match macros {
            Some(expander) if token.kind == TokenKind::IDENTIFIER && token.end() < cursor => {
                expander.expand(&token)
            }
            _ => None,
        };
        match expansion {
            Some(expanded) => {
                for expanded_token in &expanded {
                    processor.token(expanded_token);
                }
                fed += expanded.len();
            }
            None => {
                if !processor.token(&token) {
                    break;
                }
                fed += 1;
            }
        }
    }
    debug!("[SCAN] fed {} tokens between {:?} and {:?}", fed, start, cursor);

    processor.end(cursor, last);
    processor.into_result()
}
