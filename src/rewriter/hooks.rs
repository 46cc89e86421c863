use std::fmt;
use std::sync::Arc;

use crate::error::RewriteResult;
use crate::syntax::{NodeList, SeparatedList, SyntaxKind, SyntaxNode, SyntaxToken, SyntaxTrivia, TokenList, TriviaList};

use super::Rewriter;

/// `Ok(None)` removes the element from its parent.
pub type NodeResult = RewriteResult<Option<Arc<SyntaxNode>>>;
pub type TokenResult = RewriteResult<Option<SyntaxToken>>;
pub type TriviaResult = RewriteResult<Option<SyntaxTrivia>>;

/// A place where traversal can be intercepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HookPoint {
    /// Nodes of one kind.
    Node(SyntaxKind),
    /// Nodes of any kind without a hook of their own.
    Default,
    Token,
    Trivia,
    List,
    SeparatedList,
    TokenList,
    TriviaList,
}

impl fmt::Display for HookPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookPoint::Node(kind) => write!(f, "node:{}", kind),
            HookPoint::Default => f.write_str("default"),
            HookPoint::Token => f.write_str("token"),
            HookPoint::Trivia => f.write_str("trivia"),
            HookPoint::List => f.write_str("list"),
            HookPoint::SeparatedList => f.write_str("separated-list"),
            HookPoint::TokenList => f.write_str("token-list"),
            HookPoint::TriviaList => f.write_str("trivia-list"),
        }
    }
}

pub(crate) type NodeHook = Arc<dyn Fn(&Rewriter, &Arc<SyntaxNode>) -> NodeResult + Send + Sync>;
pub(crate) type TokenHook = Arc<dyn Fn(&Rewriter, &SyntaxToken) -> TokenResult + Send + Sync>;
pub(crate) type TriviaHook = Arc<dyn Fn(&Rewriter, &SyntaxTrivia) -> TriviaResult + Send + Sync>;
pub(crate) type ListHook = Arc<dyn Fn(&Rewriter, &NodeList) -> RewriteResult<NodeList> + Send + Sync>;
pub(crate) type SeparatedListHook = Arc<dyn Fn(&Rewriter, &SeparatedList) -> RewriteResult<SeparatedList> + Send + Sync>;
pub(crate) type TokenListHook = Arc<dyn Fn(&Rewriter, &TokenList) -> RewriteResult<TokenList> + Send + Sync>;
pub(crate) type TriviaListHook = Arc<dyn Fn(&Rewriter, &TriviaList) -> RewriteResult<TriviaList> + Send + Sync>;

/// A registered override. The builder only ever pairs a variant with its
/// matching `HookPoint`.
#[derive(Clone)]
pub(crate) enum Hook {
    Node(NodeHook),
    Token(TokenHook),
    Trivia(TriviaHook),
    List(ListHook),
    SeparatedList(SeparatedListHook),
    TokenList(TokenListHook),
    TriviaList(TriviaListHook),
}
