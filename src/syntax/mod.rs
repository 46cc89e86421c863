//! The closed grammar the rewriter walks: nodes, tokens, trivia and the
//! list shapes that hold them, plus constructors and printers.

#[macro_use]
mod macros;

pub(crate) mod child;
pub mod factory;
pub mod formatter;
mod list;
pub mod metadata;
mod nodes;
pub mod printer;
mod token;

pub use child::SyntaxElement;
pub use formatter::{format, FormatOptions, IndentStyle};
pub use list::{NodeList, SeparatedList, TokenList};
pub use metadata::{get_metadata, insert_metadata, metadata_with, Metadata};
pub use nodes::*;
pub use printer::to_full_string;
pub use token::{SyntaxToken, SyntaxTrivia, Token, TokenKind, Trivia, TriviaKind, TriviaList};
