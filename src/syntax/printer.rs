use super::{SyntaxElement, SyntaxNode, Token, Trivia};

/// Prints a tree exactly as it is: every token's leading trivia, text and
/// trailing trivia, in document order. Structured trivia print through their
/// structure.
pub fn to_full_string(node: &SyntaxNode) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

pub fn token_full_string(token: &Token) -> String {
    let mut out = String::new();
    write_token(token, &mut out);
    out
}

fn write_node(node: &SyntaxNode, out: &mut String) {
    for element in node.children_with_tokens() {
        match element {
            SyntaxElement::Node(child) => write_node(child, out),
            SyntaxElement::Token(token) => write_token(token, out),
        }
    }
}

fn write_token(token: &Token, out: &mut String) {
    for trivia in token.leading.iter() {
        write_trivia(trivia, out);
    }
    out.push_str(&token.text);
    for trivia in token.trailing.iter() {
        write_trivia(trivia, out);
    }
}

fn write_trivia(trivia: &Trivia, out: &mut String) {
    match &trivia.structure {
        Some(structure) => write_node(structure, out),
        None => out.push_str(&trivia.text),
    }
}
