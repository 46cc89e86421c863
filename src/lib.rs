#![recursion_limit = "1024"]
//! A configurable tree-rewriting engine.
//!
//! Build a [`Rewriter`] by chaining `with_*` overrides for node kinds,
//! tokens, trivia and list shapes, then call [`Rewriter::rewrite`] on a
//! tree. Kinds without an override get the default traversal, which shares
//! every unchanged subtree with the input.

pub mod error;
pub mod extensions;
pub mod logging;
pub mod pipeline;
pub mod rewriter;
pub mod syntax;

pub use error::{RewriteError, RewriteResult};
pub use pipeline::{Pass, Pipeline};
pub use rewriter::{HookPoint, NodeResult, Rewriter, TokenResult, TriviaResult};
pub use syntax::{FormatOptions, IndentStyle, SyntaxKind, SyntaxNode, SyntaxToken, SyntaxTrivia};
