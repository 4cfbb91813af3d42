//! Expression recognition for completion
//!
//! Tokens around the cursor are fed one at a time to a
//! [`CompletionTokenProcessor`]. Two lookaheads run in front of the
//! automaton:
//!
//! ```text
//! token → lambda lookahead → template lookahead → check_join → dispatch
//!                                                       ↓
//!                                                    recover
//! ```
//!
//! `end` flushes the lookaheads and closes the stack; the result is read
//! through [`ScanResult`].

mod dispatch;
mod finish;
mod join;
mod lambda;
mod processor;
mod result;
mod template;
mod token;

pub use lambda::LambdaStage;
pub use processor::{CompletionTokenProcessor, TokenProcessor};
pub use result::ScanResult;
pub use token::SourceToken;
