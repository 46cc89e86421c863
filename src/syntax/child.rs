use std::sync::Arc;

use crate::error::{RewriteError, RewriteResult};
use crate::rewriter::Rewriter;

use super::{NodeList, SeparatedList, SyntaxKind, SyntaxNode, SyntaxToken, TokenList};

/// One entry of a node's ordered children.
#[derive(Clone, Copy, Debug)]
pub enum SyntaxElement<'a> {
    Node(&'a Arc<SyntaxNode>),
    Token(&'a SyntaxToken),
}

impl<'a> SyntaxElement<'a> {
    pub fn as_node(&self) -> Option<&'a Arc<SyntaxNode>> {
        match self {
            SyntaxElement::Node(node) => Some(node),
            SyntaxElement::Token(_) => None,
        }
    }

    pub fn as_token(&self) -> Option<&'a SyntaxToken> {
        match self {
            SyntaxElement::Token(token) => Some(token),
            SyntaxElement::Node(_) => None,
        }
    }
}

/// A child slot shape. Every field of a generated node struct implements this,
/// which is all the default traversal needs to know about it.
pub(crate) trait Child: Sized {
    /// Dispatches the slot's content through `rewriter`.
    fn rewrite(&self, rewriter: &Rewriter, parent: SyntaxKind, slot: &'static str) -> RewriteResult<Self>;

    /// Pointer identity of the slot's content.
    fn same(&self, other: &Self) -> bool;

    fn collect<'a>(&'a self, out: &mut Vec<SyntaxElement<'a>>);
}

impl Child for Arc<SyntaxNode> {
    fn rewrite(&self, rewriter: &Rewriter, parent: SyntaxKind, slot: &'static str) -> RewriteResult<Self> {
        rewriter.visit(self)?.ok_or(RewriteError::MissingChild { parent, slot })
    }

    fn same(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }

    fn collect<'a>(&'a self, out: &mut Vec<SyntaxElement<'a>>) {
        out.push(SyntaxElement::Node(self));
    }
}

impl Child for Option<Arc<SyntaxNode>> {
    fn rewrite(&self, rewriter: &Rewriter, _parent: SyntaxKind, _slot: &'static str) -> RewriteResult<Self> {
        rewriter.visit_opt(self.as_ref())
    }

    fn same(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    fn collect<'a>(&'a self, out: &mut Vec<SyntaxElement<'a>>) {
        if let Some(node) = self {
            out.push(SyntaxElement::Node(node));
        }
    }
}

impl Child for SyntaxToken {
    fn rewrite(&self, rewriter: &Rewriter, parent: SyntaxKind, slot: &'static str) -> RewriteResult<Self> {
        rewriter.visit_token(self)?.ok_or(RewriteError::MissingChild { parent, slot })
    }

    fn same(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }

    fn collect<'a>(&'a self, out: &mut Vec<SyntaxElement<'a>>) {
        out.push(SyntaxElement::Token(self));
    }
}

impl Child for Option<SyntaxToken> {
    fn rewrite(&self, rewriter: &Rewriter, _parent: SyntaxKind, _slot: &'static str) -> RewriteResult<Self> {
        rewriter.visit_token_opt(self.as_ref())
    }

    fn same(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    fn collect<'a>(&'a self, out: &mut Vec<SyntaxElement<'a>>) {
        if let Some(token) = self {
            out.push(SyntaxElement::Token(token));
        }
    }
}

impl Child for NodeList {
    fn rewrite(&self, rewriter: &Rewriter, _parent: SyntaxKind, _slot: &'static str) -> RewriteResult<Self> {
        rewriter.visit_list(self)
    }

    fn same(&self, other: &Self) -> bool {
        same_elements(self, other)
    }

    fn collect<'a>(&'a self, out: &mut Vec<SyntaxElement<'a>>) {
        out.extend(self.iter().map(SyntaxElement::Node));
    }
}

impl Child for TokenList {
    fn rewrite(&self, rewriter: &Rewriter, _parent: SyntaxKind, _slot: &'static str) -> RewriteResult<Self> {
        rewriter.visit_token_list(self)
    }

    fn same(&self, other: &Self) -> bool {
        same_elements(self, other)
    }

    fn collect<'a>(&'a self, out: &mut Vec<SyntaxElement<'a>>) {
        out.extend(self.iter().map(SyntaxElement::Token));
    }
}

impl Child for SeparatedList {
    fn rewrite(&self, rewriter: &Rewriter, _parent: SyntaxKind, _slot: &'static str) -> RewriteResult<Self> {
        rewriter.visit_separated_list(self)
    }

    fn same(&self, other: &Self) -> bool {
        same_elements(&self.elements, &other.elements) && same_elements(&self.separators, &other.separators)
    }

    fn collect<'a>(&'a self, out: &mut Vec<SyntaxElement<'a>>) {
        for (index, element) in self.elements.iter().enumerate() {
            out.push(SyntaxElement::Node(element));
            if let Some(separator) = self.separators.get(index) {
                out.push(SyntaxElement::Token(separator));
            }
        }
    }
}

/// Element-wise pointer identity of two persistent vectors.
pub(crate) fn same_elements<T>(a: &rpds::Vector<Arc<T>, archery::ArcK>, b: &rpds::Vector<Arc<T>, archery::ArcK>) -> bool {
    a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| Arc::ptr_eq(x, y))
}
