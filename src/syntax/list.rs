use std::sync::Arc;

use archery::ArcK;
use rpds::Vector;
use serde::{Deserialize, Serialize};

use super::{SyntaxNode, SyntaxToken};

pub type NodeList = Vector<Arc<SyntaxNode>, ArcK>;
pub type TokenList = Vector<SyntaxToken, ArcK>;

/// Nodes interleaved with separator tokens, e.g. `a, b, c`.
///
/// `separators.len()` is `elements.len() - 1`, or `elements.len()` when the
/// list ends with a trailing separator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeparatedList {
    pub elements: NodeList,
    pub separators: TokenList,
}

impl Default for SeparatedList {
    fn default() -> Self {
        SeparatedList::new(Vector::new_with_ptr_kind(), Vector::new_with_ptr_kind())
    }
}

impl SeparatedList {
    pub fn new(elements: NodeList, separators: TokenList) -> Self {
        SeparatedList { elements, separators }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<SyntaxNode>> {
        self.elements.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Arc<SyntaxNode>> {
        self.elements.get(index)
    }

    pub fn has_trailing_separator(&self) -> bool {
        !self.elements.is_empty() && self.separators.len() >= self.elements.len()
    }

    /// Appends `element`, inserting `separator` in front of it when the list
    /// already has elements and no trailing separator.
    pub fn push(&self, element: Arc<SyntaxNode>, separator: SyntaxToken) -> Self {
        let separators = if self.elements.is_empty() || self.has_trailing_separator() {
            self.separators.clone()
        } else {
            self.separators.push_back(separator)
        };
        SeparatedList {
            elements: self.elements.push_back(element),
            separators,
        }
    }
}
