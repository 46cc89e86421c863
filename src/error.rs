use thiserror::Error;

use crate::syntax::SyntaxKind;

/// Errors surfaced while rewriting a tree or running a pipeline of passes.
///
/// Overrides return `RewriteResult` so that any failure they report aborts the
/// whole traversal; no partially rewritten tree is ever handed back.
#[derive(Debug, Error)]
pub enum RewriteError {
    /// An override removed a child that its parent cannot exist without.
    #[error("override removed required child `{slot}` of {parent}")]
    MissingChild {
        parent: SyntaxKind,
        slot: &'static str,
    },

    #[error("override removed the root {kind} node")]
    RootRemoved { kind: SyntaxKind },

    /// Raised by caller-supplied overrides.
    #[error("override failed: {message}")]
    Override { message: String },

    #[error("pass `{pass}` depends on unknown pass `{dependency}`")]
    UnknownDependency { pass: String, dependency: String },

    #[error("pass `{pass}` participates in a dependency cycle")]
    PipelineCycle { pass: String },
}

impl RewriteError {
    /// Convenience constructor for override closures reporting their own failures.
    pub fn override_failed(message: impl Into<String>) -> Self {
        RewriteError::Override { message: message.into() }
    }
}

pub type RewriteResult<T> = Result<T, RewriteError>;
