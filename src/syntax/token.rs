use std::fmt;
use std::sync::Arc;

use archery::ArcK;
use rpds::Vector;
use serde::{Deserialize, Serialize};

use super::SyntaxNode;

pub type SyntaxToken = Arc<Token>;
pub type SyntaxTrivia = Arc<Trivia>;
pub type TriviaList = Vector<SyntaxTrivia, ArcK>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    Identifier,
    Keyword,
    Punctuation,
    Operator,
    NumericLiteral,
    StringLiteral,
    CharacterLiteral,
    XmlName,
    XmlText,
    XmlNewLine,
    EndOfDocumentationComment,
    EndOfFile,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriviaKind {
    Whitespace,
    EndOfLine,
    SingleLineComment,
    MultiLineComment,
    /// The `///` prefix inside a documentation comment.
    DocumentationExterior,
    /// Structured trivia; the content lives in `Trivia::structure`.
    DocumentationComment,
    Directive,
}

/// A leaf of the tree: kind, literal text and the trivia around it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub leading: TriviaList,
    pub trailing: TriviaList,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Token {
            kind,
            text: text.into(),
            leading: Vector::new_with_ptr_kind(),
            trailing: Vector::new_with_ptr_kind(),
        }
    }

    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Token { text: text.into(), ..self.clone() }
    }

    pub fn with_leading(&self, leading: TriviaList) -> Self {
        Token { leading, ..self.clone() }
    }

    pub fn with_trailing(&self, trailing: TriviaList) -> Self {
        Token { trailing, ..self.clone() }
    }

    pub fn is_identifier(&self) -> bool {
        self.kind == TokenKind::Identifier
    }

    pub fn into_token(self) -> SyntaxToken {
        Arc::new(self)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Non-semantic content attached to a token. Documentation comments carry a
/// structure node instead of raw text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trivia {
    pub kind: TriviaKind,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structure: Option<Arc<SyntaxNode>>,
}

impl Trivia {
    pub fn new(kind: TriviaKind, text: impl Into<String>) -> Self {
        Trivia { kind, text: text.into(), structure: None }
    }

    pub fn structured(kind: TriviaKind, structure: Arc<SyntaxNode>) -> Self {
        Trivia { kind, text: String::new(), structure: Some(structure) }
    }

    pub fn with_structure(&self, structure: Arc<SyntaxNode>) -> Self {
        Trivia { structure: Some(structure), ..self.clone() }
    }

    pub fn is_comment(&self) -> bool {
        matches!(
            self.kind,
            TriviaKind::SingleLineComment | TriviaKind::MultiLineComment | TriviaKind::DocumentationComment
        )
    }

    pub fn is_documentation(&self) -> bool {
        self.kind == TriviaKind::DocumentationComment
    }

    pub fn into_trivia(self) -> SyntaxTrivia {
        Arc::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_text_keeps_trivia() {
        let token = Token::new(TokenKind::Identifier, "Hello")
            .with_leading(Vector::new_with_ptr_kind().push_back(Trivia::new(TriviaKind::Whitespace, "  ").into_trivia()));
        let renamed = token.with_text("World");
        assert_eq!(renamed.text, "World");
        assert_eq!(renamed.leading.len(), 1);
        assert!(Arc::ptr_eq(&token.leading[0], &renamed.leading[0]));
    }

    #[test]
    fn test_comment_classification() {
        assert!(Trivia::new(TriviaKind::SingleLineComment, "// x").is_comment());
        assert!(!Trivia::new(TriviaKind::Whitespace, " ").is_comment());
        assert!(!Trivia::new(TriviaKind::DocumentationExterior, "/// ").is_documentation());
    }
}
