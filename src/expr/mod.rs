//! Expression node model
//!
//! Nodes live in an [`ExprArena`] and are addressed by [`ExprId`]. The
//! recognizer's stack is a list of ids; reductions rewrite nodes in place
//! through the arena.

mod arena;
mod kind;
mod node;
pub mod precedence;

pub use arena::ExprArena;
pub use kind::ExprKind;
pub use node::{ExprId, ExprNode, ExprToken};
