//! The dispatch engine and its override table.
//!
//! A [`Rewriter`] is both the configuration and the engine. Every `visit*`
//! entry point consults the override table for its hook point and falls back
//! to the matching `walk*` default, which rebuilds a value only when one of its
//! children changed identity. Overrides receive the rewriter itself so they can
//! keep walking (`rewriter.walk(node)`) or stop and return a replacement.

use std::collections::hash_map::RandomState;
use std::fmt;
use std::sync::Arc;

use archery::ArcK;
use rayon::prelude::*;
use rpds::{HashTrieMap, Vector};
use tracing::{debug, trace};

use crate::error::{RewriteError, RewriteResult};
use crate::syntax::child::same_elements;
use crate::syntax::{NodeList, SeparatedList, SyntaxNode, SyntaxToken, SyntaxTrivia, Token, TokenList, TriviaList};

mod builder;
mod hooks;

pub(crate) use hooks::Hook;
pub use hooks::{HookPoint, NodeResult, TokenResult, TriviaResult};

/// An immutable override table plus the traversal that consults it.
///
/// Cloning is cheap and every builder method returns a new value, so one
/// configuration can drive any number of traversals, on any number of threads.
#[derive(Clone)]
pub struct Rewriter {
    hooks: HashTrieMap<HookPoint, Hook, ArcK>,
    visit_into_structured_trivia: bool,
}

impl Default for Rewriter {
    fn default() -> Self {
        Rewriter::new()
    }
}

impl fmt::Debug for Rewriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rewriter")
            .field("hooks", &self.hook_points())
            .field("visit_into_structured_trivia", &self.visit_into_structured_trivia)
            .finish()
    }
}

impl Rewriter {
    /// A rewriter with no overrides: every traversal returns its input.
    pub fn new() -> Self {
        Rewriter {
            hooks: empty_hooks(),
            visit_into_structured_trivia: true,
        }
    }

    pub fn has_hook(&self, point: HookPoint) -> bool {
        self.hooks.contains_key(&point)
    }

    pub fn hook_count(&self) -> usize {
        self.hooks.size()
    }

    /// Configured hook points, sorted.
    pub fn hook_points(&self) -> Vec<HookPoint> {
        let mut points: Vec<HookPoint> = self.hooks.keys().copied().collect();
        points.sort();
        points
    }

    pub fn visits_structured_trivia(&self) -> bool {
        self.visit_into_structured_trivia
    }

    /// Rewrites a whole tree. Removing the root is an error.
    pub fn rewrite(&self, root: &Arc<SyntaxNode>) -> RewriteResult<Arc<SyntaxNode>> {
        let kind = root.kind();
        debug!(%kind, hooks = self.hooks.size(), "Rewriting tree");
        let result = self.visit(root)?.ok_or(RewriteError::RootRemoved { kind })?;
        debug!(%kind, changed = !Arc::ptr_eq(root, &result), "Rewrite complete");
        Ok(result)
    }

    /// Rewrites independent trees in parallel with this one configuration.
    /// The first failure aborts the batch.
    pub fn rewrite_all(&self, roots: &[Arc<SyntaxNode>]) -> RewriteResult<Vec<Arc<SyntaxNode>>> {
        debug!(trees = roots.len(), "Rewriting trees in parallel");
        roots.par_iter().map(|root| self.rewrite(root)).collect()
    }

    // ------------------------------------------------------------------
    // Nodes
    // ------------------------------------------------------------------

    /// Entry point for a node: its kind's hook, else the default hook, else
    /// [`walk`](Self::walk).
    pub fn visit(&self, node: &Arc<SyntaxNode>) -> NodeResult {
        let kind = node.kind();
        if let Some(Hook::Node(hook)) = self.hooks.get(&HookPoint::Node(kind)) {
            trace!(%kind, "Kind override");
            return hook(self, node);
        }
        if let Some(Hook::Node(hook)) = self.hooks.get(&HookPoint::Default) {
            trace!(%kind, "Default override");
            return hook(self, node);
        }
        self.walk(node)
    }

    /// Absent input is a no-op.
    pub fn visit_opt(&self, node: Option<&Arc<SyntaxNode>>) -> NodeResult {
        match node {
            Some(node) => self.visit(node),
            None => Ok(None),
        }
    }

    /// Default traversal of `node` itself, ignoring any hook registered for
    /// it: visits each child slot in order and rebuilds only if one changed.
    pub fn walk(&self, node: &Arc<SyntaxNode>) -> NodeResult {
        match node.walk_children(self)? {
            Some(rebuilt) => Ok(Some(Arc::new(rebuilt))),
            None => Ok(Some(Arc::clone(node))),
        }
    }

    // ------------------------------------------------------------------
    // Tokens and trivia
    // ------------------------------------------------------------------

    pub fn visit_token(&self, token: &SyntaxToken) -> TokenResult {
        if let Some(Hook::Token(hook)) = self.hooks.get(&HookPoint::Token) {
            trace!(text = %token.text, "Token override");
            return hook(self, token);
        }
        self.walk_token(token)
    }

    pub fn visit_token_opt(&self, token: Option<&SyntaxToken>) -> TokenResult {
        match token {
            Some(token) => self.visit_token(token),
            None => Ok(None),
        }
    }

    /// Visits the leading then the trailing trivia list.
    pub fn walk_token(&self, token: &SyntaxToken) -> TokenResult {
        let leading = self.visit_trivia_list(&token.leading)?;
        let trailing = self.visit_trivia_list(&token.trailing)?;
        if same_elements(&leading, &token.leading) && same_elements(&trailing, &token.trailing) {
            return Ok(Some(Arc::clone(token)));
        }
        Ok(Some(Arc::new(Token {
            kind: token.kind,
            text: token.text.clone(),
            leading,
            trailing,
        })))
    }

    pub fn visit_trivia(&self, trivia: &SyntaxTrivia) -> TriviaResult {
        if let Some(Hook::Trivia(hook)) = self.hooks.get(&HookPoint::Trivia) {
            trace!(kind = ?trivia.kind, "Trivia override");
            return hook(self, trivia);
        }
        self.walk_trivia(trivia)
    }

    /// Enters structured trivia unless disabled; removing the structure
    /// removes the trivia.
    pub fn walk_trivia(&self, trivia: &SyntaxTrivia) -> TriviaResult {
        let structure = match &trivia.structure {
            Some(structure) if self.visit_into_structured_trivia => structure,
            _ => return Ok(Some(Arc::clone(trivia))),
        };
        match self.visit(structure)? {
            Some(new) if Arc::ptr_eq(&new, structure) => Ok(Some(Arc::clone(trivia))),
            Some(new) => Ok(Some(Arc::new(trivia.with_structure(new)))),
            None => Ok(None),
        }
    }

    // ------------------------------------------------------------------
    // Lists
    // ------------------------------------------------------------------

    pub fn visit_list(&self, list: &NodeList) -> RewriteResult<NodeList> {
        if let Some(Hook::List(hook)) = self.hooks.get(&HookPoint::List) {
            trace!(len = list.len(), "List override");
            return hook(self, list);
        }
        self.walk_list(list)
    }

    /// Visits every element; removed elements are dropped, order is kept.
    pub fn walk_list(&self, list: &NodeList) -> RewriteResult<NodeList> {
        map_elements(list, |element| self.visit(element))
    }

    pub fn visit_separated_list(&self, list: &SeparatedList) -> RewriteResult<SeparatedList> {
        if let Some(Hook::SeparatedList(hook)) = self.hooks.get(&HookPoint::SeparatedList) {
            trace!(len = list.len(), "Separated list override");
            return hook(self, list);
        }
        self.walk_separated_list(list)
    }

    /// Visits elements and separators in document order. A removed element
    /// takes its following separator with it, or its preceding one when it
    /// was last; a trailing separator survives only if the input had one.
    pub fn walk_separated_list(&self, list: &SeparatedList) -> RewriteResult<SeparatedList> {
        let had_trailing = list.has_trailing_separator();
        let mut pairs: Vec<(Arc<SyntaxNode>, Option<SyntaxToken>)> = Vec::with_capacity(list.len());
        for (index, element) in list.elements.iter().enumerate() {
            let new_element = self.visit(element)?;
            let new_separator = self.visit_token_opt(list.separators.get(index))?;
            if let Some(new_element) = new_element {
                pairs.push((new_element, new_separator));
            }
        }
        if !had_trailing {
            if let Some(last) = pairs.last_mut() {
                last.1 = None;
            }
        }

        let elements: NodeList = pairs.iter().map(|(element, _)| Arc::clone(element)).collect();
        let separators: TokenList = pairs.into_iter().filter_map(|(_, separator)| separator).collect();
        if same_elements(&elements, &list.elements) && same_elements(&separators, &list.separators) {
            return Ok(list.clone());
        }
        Ok(SeparatedList::new(elements, separators))
    }

    pub fn visit_token_list(&self, list: &TokenList) -> RewriteResult<TokenList> {
        if let Some(Hook::TokenList(hook)) = self.hooks.get(&HookPoint::TokenList) {
            trace!(len = list.len(), "Token list override");
            return hook(self, list);
        }
        self.walk_token_list(list)
    }

    pub fn walk_token_list(&self, list: &TokenList) -> RewriteResult<TokenList> {
        map_elements(list, |token| self.visit_token(token))
    }

    pub fn visit_trivia_list(&self, list: &TriviaList) -> RewriteResult<TriviaList> {
        if let Some(Hook::TriviaList(hook)) = self.hooks.get(&HookPoint::TriviaList) {
            trace!(len = list.len(), "Trivia list override");
            return hook(self, list);
        }
        self.walk_trivia_list(list)
    }

    pub fn walk_trivia_list(&self, list: &TriviaList) -> RewriteResult<TriviaList> {
        map_elements(list, |trivia| self.visit_trivia(trivia))
    }
}

pub(crate) fn empty_hooks() -> HashTrieMap<HookPoint, Hook, ArcK> {
    HashTrieMap::new_with_hasher_and_ptr_kind(RandomState::new())
}

/// Maps `visit` over a list, dropping removed elements. Returns the input
/// list itself when every element came back identical.
fn map_elements<T, F>(list: &Vector<Arc<T>, ArcK>, mut visit: F) -> RewriteResult<Vector<Arc<T>, ArcK>>
where
    F: FnMut(&Arc<T>) -> RewriteResult<Option<Arc<T>>>,
{
    let mut changed = false;
    let mut out = Vector::new_with_ptr_kind();
    for element in list.iter() {
        match visit(element)? {
            Some(new) => {
                changed |= !Arc::ptr_eq(element, &new);
                out.push_back_mut(new);
            }
            None => changed = true,
        }
    }
    Ok(if changed { out } else { list.clone() })
}
