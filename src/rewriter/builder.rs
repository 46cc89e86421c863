use std::sync::Arc;

use crate::error::RewriteResult;
use crate::syntax::{NodeList, SeparatedList, SyntaxKind, SyntaxNode, SyntaxToken, SyntaxTrivia, TokenList, TriviaList};

use super::{Hook, HookPoint, NodeResult, Rewriter, TokenResult, TriviaResult};

// Every method here leaves `self` untouched and returns the updated copy.
// The typed per-kind `with_<kind>` / `without_<kind>` methods are generated
// alongside the grammar.
impl Rewriter {
    fn set_hook(&self, point: HookPoint, hook: Hook) -> Self {
        Rewriter {
            hooks: self.hooks.insert(point, hook),
            visit_into_structured_trivia: self.visit_into_structured_trivia,
        }
    }

    fn clear_hook(&self, point: HookPoint) -> Self {
        Rewriter {
            hooks: self.hooks.remove(&point),
            visit_into_structured_trivia: self.visit_into_structured_trivia,
        }
    }

    /// Overrides every node of `kind`.
    pub fn with_kind<F>(&self, kind: SyntaxKind, f: F) -> Self
    where
        F: Fn(&Rewriter, &Arc<SyntaxNode>) -> NodeResult + Send + Sync + 'static,
    {
        self.set_hook(HookPoint::Node(kind), Hook::Node(Arc::new(f)))
    }

    pub fn without_kind(&self, kind: SyntaxKind) -> Self {
        self.clear_hook(HookPoint::Node(kind))
    }

    /// Overrides every node whose kind has no hook of its own.
    pub fn with_default<F>(&self, f: F) -> Self
    where
        F: Fn(&Rewriter, &Arc<SyntaxNode>) -> NodeResult + Send + Sync + 'static,
    {
        self.set_hook(HookPoint::Default, Hook::Node(Arc::new(f)))
    }

    pub fn without_default(&self) -> Self {
        self.clear_hook(HookPoint::Default)
    }

    pub fn with_token<F>(&self, f: F) -> Self
    where
        F: Fn(&Rewriter, &SyntaxToken) -> TokenResult + Send + Sync + 'static,
    {
        self.set_hook(HookPoint::Token, Hook::Token(Arc::new(f)))
    }

    pub fn without_token(&self) -> Self {
        self.clear_hook(HookPoint::Token)
    }

    pub fn with_trivia<F>(&self, f: F) -> Self
    where
        F: Fn(&Rewriter, &SyntaxTrivia) -> TriviaResult + Send + Sync + 'static,
    {
        self.set_hook(HookPoint::Trivia, Hook::Trivia(Arc::new(f)))
    }

    pub fn without_trivia(&self) -> Self {
        self.clear_hook(HookPoint::Trivia)
    }

    pub fn with_list<F>(&self, f: F) -> Self
    where
        F: Fn(&Rewriter, &NodeList) -> RewriteResult<NodeList> + Send + Sync + 'static,
    {
        self.set_hook(HookPoint::List, Hook::List(Arc::new(f)))
    }

    pub fn without_list(&self) -> Self {
        self.clear_hook(HookPoint::List)
    }

    pub fn with_separated_list<F>(&self, f: F) -> Self
    where
        F: Fn(&Rewriter, &SeparatedList) -> RewriteResult<SeparatedList> + Send + Sync + 'static,
    {
        self.set_hook(HookPoint::SeparatedList, Hook::SeparatedList(Arc::new(f)))
    }

    pub fn without_separated_list(&self) -> Self {
        self.clear_hook(HookPoint::SeparatedList)
    }

    pub fn with_token_list<F>(&self, f: F) -> Self
    where
        F: Fn(&Rewriter, &TokenList) -> RewriteResult<TokenList> + Send + Sync + 'static,
    {
        self.set_hook(HookPoint::TokenList, Hook::TokenList(Arc::new(f)))
    }

    pub fn without_token_list(&self) -> Self {
        self.clear_hook(HookPoint::TokenList)
    }

    pub fn with_trivia_list<F>(&self, f: F) -> Self
    where
        F: Fn(&Rewriter, &TriviaList) -> RewriteResult<TriviaList> + Send + Sync + 'static,
    {
        self.set_hook(HookPoint::TriviaList, Hook::TriviaList(Arc::new(f)))
    }

    pub fn without_trivia_list(&self) -> Self {
        self.clear_hook(HookPoint::TriviaList)
    }

    /// Whether the default trivia traversal enters documentation structure.
    pub fn with_structured_trivia(&self, enabled: bool) -> Self {
        Rewriter {
            hooks: self.hooks.clone(),
            visit_into_structured_trivia: enabled,
        }
    }

    /// Drops every override, keeping the structured-trivia setting.
    pub fn without_hooks(&self) -> Self {
        Rewriter {
            hooks: super::empty_hooks(),
            visit_into_structured_trivia: self.visit_into_structured_trivia,
        }
    }
}
