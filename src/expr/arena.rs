//! Arena owning every expression node created during a scan
//!
//! The automaton's stack holds [`ExprId`]s and all mutation goes through the
//! arena. Nodes dropped by error recovery stay allocated but become
//! unreachable.

use std::fmt::Write;

use smol_str::SmolStr;
use text_size::TextSize;

use super::{ExprId, ExprKind, ExprNode, ExprToken};
use crate::lexer::TokenKind;

#[derive(Debug, Clone, Default)]
pub struct ExprArena {
    nodes: Vec<ExprNode>,
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn alloc(&mut self, node: ExprNode) -> ExprId {
        let id = ExprId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub fn empty(&mut self, kind: ExprKind) -> ExprId {
        self.alloc(ExprNode::new(kind))
    }

    pub fn with_token(&mut self, kind: ExprKind, token: ExprToken) -> ExprId {
        let mut node = ExprNode::new(kind);
        node.tokens.push(token);
        self.alloc(node)
    }

    /// Placeholder `VARIABLE` with an empty identifier at `offset`
    pub fn empty_variable(&mut self, offset: TextSize) -> ExprId {
        self.with_token(
            ExprKind::VARIABLE,
            ExprToken::new(TokenKind::IDENTIFIER, offset, ""),
        )
    }

    /// New node of `kind` carrying the tokens (and optionally the params) of `src`
    pub fn copy_of(&mut self, kind: ExprKind, src: ExprId, with_params: bool) -> ExprId {
        let source = &self.nodes[src.index()];
        let mut node = ExprNode::new(kind);
        node.tokens = source.tokens.clone();
        node.type_hint = source.type_hint.clone();
        if with_params {
            node.params = source.params.clone();
        }
        self.alloc(node)
    }

    pub fn node(&self, id: ExprId) -> &ExprNode {
        &self.nodes[id.index()]
    }

    pub fn node_mut(&mut self, id: ExprId) -> &mut ExprNode {
        &mut self.nodes[id.index()]
    }

    pub fn kind(&self, id: ExprId) -> ExprKind {
        self.nodes[id.index()].kind
    }

    pub fn set_kind(&mut self, id: ExprId, kind: ExprKind) {
        self.nodes[id.index()].kind = kind;
    }

    pub fn params(&self, id: ExprId) -> &[ExprId] {
        &self.nodes[id.index()].params
    }

    pub fn param(&self, id: ExprId, index: usize) -> Option<ExprId> {
        self.nodes[id.index()].params.get(index).copied()
    }

    pub fn last_param(&self, id: ExprId) -> Option<ExprId> {
        self.nodes[id.index()].params.last().copied()
    }

    pub fn param_count(&self, id: ExprId) -> usize {
        self.nodes[id.index()].params.len()
    }

    pub fn add_param(&mut self, id: ExprId, param: ExprId) {
        self.nodes[id.index()].params.push(param);
    }

    pub fn tokens(&self, id: ExprId) -> &[ExprToken] {
        &self.nodes[id.index()].tokens
    }

    pub fn token_count(&self, id: ExprId) -> usize {
        self.nodes[id.index()].tokens.len()
    }

    pub fn add_token(&mut self, id: ExprId, token: ExprToken) {
        self.nodes[id.index()].tokens.push(token);
    }

    pub fn first_token_kind(&self, id: ExprId) -> Option<TokenKind> {
        self.nodes[id.index()].token_kind(0)
    }

    pub fn type_hint(&self, id: ExprId) -> Option<&str> {
        self.nodes[id.index()].type_hint.as_deref()
    }

    pub fn set_type_hint(&mut self, id: ExprId, hint: impl Into<SmolStr>) {
        self.nodes[id.index()].type_hint = Some(hint.into());
    }

    /// Turn a node into `TYPE`, its tokens joined by spaces become the type hint
    pub fn retype_as_type(&mut self, id: ExprId) {
        let node = &mut self.nodes[id.index()];
        let hint = node
            .tokens
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        node.type_hint = Some(hint.into());
        node.kind = ExprKind::TYPE;
    }

    /// Whether the node can name a type (cast target, template argument)
    pub fn is_valid_type(&self, id: ExprId) -> bool {
        let node = self.node(id);
        match node.kind {
            ExprKind::TYPE
            | ExprKind::TYPE_REFERENCE
            | ExprKind::GENERIC_TYPE
            | ExprKind::VARIABLE => true,
            ExprKind::ARRAY => node.params.len() == 1 && self.is_valid_type(node.params[0]),
            ExprKind::SCOPE => node.params.iter().all(|&p| self.is_valid_type(p)),
            _ => false,
        }
    }

    /// Render a node as an s-expression: `(OPERATOR + (VARIABLE a) (VARIABLE b))`
    pub fn render(&self, id: ExprId) -> String {
        enum Step {
            Open(ExprId),
            Close,
        }

        let mut out = String::new();
        let mut steps = vec![Step::Open(id)];
        while let Some(step) = steps.pop() {
            let id = match step {
                Step::Open(id) => id,
                Step::Close => {
                    out.push(')');
                    continue;
                }
            };
            let node = self.node(id);
            if !out.is_empty() {
                // every node but the root is a param
                out.push(' ');
            }
            out.push('(');
            out.push_str(&node.kind.name());
            for token in node.tokens.iter().filter(|t| !t.text.is_empty()) {
                out.push(' ');
                out.push_str(&token.text);
            }
            steps.push(Step::Close);
            steps.extend(node.params.iter().rev().map(|&param| Step::Open(param)));
        }
        out
    }

    /// Indented multi-line rendering including offsets and type hints
    pub fn dump(&self, id: ExprId, indent: usize, out: &mut String) {
        let mut pending = vec![(id, indent)];
        while let Some((id, indent)) = pending.pop() {
            let node = self.node(id);
            let _ = write!(out, "{:indent$}{}", "", node.kind.name(), indent = indent);
            if !node.tokens.is_empty() {
                let tokens: Vec<String> = node
                    .tokens
                    .iter()
                    .map(|t| format!("{:?}@{}", t.text.as_str(), u32::from(t.offset)))
                    .collect();
                let _ = write!(out, " [{}]", tokens.join(", "));
            }
            if let Some(hint) = &node.type_hint {
                let _ = write!(out, " : {}", hint);
            }
            if node.implicitly_closed {
                out.push_str(" (implicit)");
            }
            out.push('\n');
            pending.extend(node.params.iter().rev().map(|&param| (param, indent + 2)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(text: &str, offset: u32) -> ExprToken {
        ExprToken::new(TokenKind::IDENTIFIER, TextSize::new(offset), text)
    }

    #[test]
    fn test_render_nested() {
        let mut arena = ExprArena::new();
        let a = arena.with_token(ExprKind::VARIABLE, ident("a", 0));
        let b = arena.with_token(ExprKind::VARIABLE, ident("b", 2));
        let plus = arena.with_token(
            ExprKind::OPERATOR,
            ExprToken::new(TokenKind::PLUS, TextSize::new(1), "+"),
        );
        arena.add_param(plus, a);
        arena.add_param(plus, b);
        assert_eq!(arena.render(plus), "(OPERATOR + (VARIABLE a) (VARIABLE b))");
    }

    #[test]
    fn test_placeholder_renders_bare() {
        let mut arena = ExprArena::new();
        let id = arena.empty_variable(TextSize::new(4));
        assert!(arena.node(id).is_placeholder());
        assert_eq!(arena.render(id), "(VARIABLE)");
    }

    #[test]
    fn test_retype_as_type_joins_tokens() {
        let mut arena = ExprArena::new();
        let id = arena.with_token(ExprKind::TYPE_PREFIX, ident("const", 0));
        arena.add_token(id, ident("Foo", 6));
        arena.retype_as_type(id);
        assert_eq!(arena.kind(id), ExprKind::TYPE);
        assert_eq!(arena.type_hint(id), Some("const Foo"));
    }

    #[test]
    fn test_is_valid_type() {
        let mut arena = ExprArena::new();
        let var = arena.with_token(ExprKind::VARIABLE, ident("T", 0));
        let scope = arena.with_token(
            ExprKind::SCOPE,
            ExprToken::new(TokenKind::SCOPE, TextSize::new(1), "::"),
        );
        arena.add_param(scope, var);
        assert!(arena.is_valid_type(scope));

        let constant = arena.with_token(
            ExprKind::CONSTANT,
            ExprToken::new(TokenKind::INT_LITERAL, TextSize::new(0), "1"),
        );
        assert!(!arena.is_valid_type(constant));
    }

    #[test]
    fn test_copy_of() {
        let mut arena = ExprArena::new();
        let inner = arena.with_token(ExprKind::VARIABLE, ident("x", 3));
        let src = arena.with_token(
            ExprKind::TYPE,
            ExprToken::new(TokenKind::SCOPE, TextSize::new(1), "::"),
        );
        arena.add_param(src, inner);

        let bare = arena.copy_of(ExprKind::SCOPE, src, false);
        let full = arena.copy_of(ExprKind::SCOPE, src, true);
        assert_eq!(arena.param_count(bare), 0);
        assert_eq!(arena.params(full), &[inner]);
        assert_eq!(arena.tokens(full).len(), 1);
    }
}
