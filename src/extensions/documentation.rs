use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::RewriteResult;
use crate::rewriter::Rewriter;
use crate::syntax::{factory, SyntaxNode, SyntaxTrivia, TokenKind, TriviaKind, TriviaList};

/// An XML documentation comment: summary, optional `<param>` entries and an
/// optional `<returns>`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Documentation {
    pub summary: String,
    pub params: Vec<(String, String)>,
    pub returns: Option<String>,
}

impl Documentation {
    pub fn summary(text: impl Into<String>) -> Self {
        Documentation { summary: text.into(), ..Default::default() }
    }

    pub fn param(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.params.push((name.into(), text.into()));
        self
    }

    pub fn returns(mut self, text: impl Into<String>) -> Self {
        self.returns = Some(text.into());
        self
    }

    pub fn to_trivia(&self) -> SyntaxTrivia {
        let mut elements = vec![factory::xml_block_element("summary", &self.summary)];
        for (name, text) in &self.params {
            elements.push(factory::xml_inline_element("param", Some(("name", name.as_str())), text));
        }
        if let Some(returns) = &self.returns {
            elements.push(factory::xml_inline_element("returns", None, returns));
        }
        factory::documentation_comment_from(elements)
    }
}

/// Puts `documentation` in front of `node`'s first token, replacing any
/// documentation comment already there. Other comments stay in place.
pub fn attach_documentation(node: &Arc<SyntaxNode>, documentation: &Documentation) -> RewriteResult<Arc<SyntaxNode>> {
    let trivia = documentation.to_trivia();
    let attached = AtomicBool::new(false);
    Rewriter::new()
        .with_token(move |_, token| {
            if attached.swap(true, Ordering::Relaxed) {
                return Ok(Some(Arc::clone(token)));
            }
            Ok(Some(Arc::new(token.with_leading(replace_documentation(&token.leading, &trivia)))))
        })
        .rewrite(node)
}

/// Drops documentation trivia and inserts `documentation` after the last
/// end-of-line, so indentation stays directly before the token.
fn replace_documentation(leading: &TriviaList, documentation: &SyntaxTrivia) -> TriviaList {
    let mut kept: Vec<SyntaxTrivia> = leading.iter().filter(|t| !t.is_documentation()).cloned().collect();
    let position = kept
        .iter()
        .rposition(|t| t.kind == TriviaKind::EndOfLine)
        .map_or(0, |index| index + 1);
    kept.insert(position, Arc::clone(documentation));
    kept.into_iter().collect()
}

/// Structure of the documentation comment in front of `node`, if any.
pub fn documentation_of(node: &SyntaxNode) -> Option<&Arc<SyntaxNode>> {
    node.first_token()?
        .leading
        .iter()
        .find(|t| t.is_documentation())
        .and_then(|t| t.structure.as_ref())
}

/// Text lines of the `<summary>` element of a documentation structure.
pub fn summary_text(documentation: &SyntaxNode) -> Option<String> {
    let comment = documentation.as_documentation_comment()?;
    let summary = comment.content.iter().filter_map(|n| n.as_xml_element()).find(|element| {
        element
            .start_tag
            .as_xml_element_start_tag()
            .is_some_and(|tag| tag.name.text == "summary")
    })?;
    let lines: Vec<String> = summary
        .content
        .iter()
        .flat_map(|n| n.descendant_tokens())
        .filter(|t| t.kind == TokenKind::XmlText)
        .map(|t| t.text.clone())
        .collect();
    Some(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{format, to_full_string, FormatOptions};
    use indoc::indoc;

    fn add_method() -> Arc<SyntaxNode> {
        factory::method_declaration(
            &["public"],
            factory::predefined_type("int"),
            "Add",
            vec![
                factory::parameter(factory::predefined_type("int"), "x"),
                factory::parameter(factory::predefined_type("int"), "y"),
            ],
            Some(factory::block(vec![factory::return_statement(Some(factory::binary(
                factory::identifier_name("x"),
                "+",
                factory::identifier_name("y"),
            )))])),
        )
    }

    #[test]
    fn test_attach_full_documentation() {
        let docs = Documentation::summary("Adds two numbers.")
            .param("x", "Left operand.")
            .param("y", "Right operand.")
            .returns("The sum.");
        let documented = attach_documentation(&add_method(), &docs).unwrap();
        let expected = indoc! {r#"
            /// <summary>
            /// Adds two numbers.
            /// </summary>
            /// <param name="x">Left operand.</param>
            /// <param name="y">Right operand.</param>
            /// <returns>The sum.</returns>
            public int Add(int x, int y)
            {
                return x + y;
            }
        "#};
        assert_eq!(format(&documented, &FormatOptions::default()), expected);
    }

    #[test]
    fn test_attach_replaces_previous_documentation() {
        let once = attach_documentation(&add_method(), &Documentation::summary("Old.")).unwrap();
        let twice = attach_documentation(&once, &Documentation::summary("New.")).unwrap();
        let text = to_full_string(&twice);
        assert_eq!(text.matches("<summary>").count(), 1);
        let structure = documentation_of(&twice).unwrap();
        assert_eq!(summary_text(structure).as_deref(), Some("New."));
    }

    #[test]
    fn test_attach_keeps_comments_and_indentation() {
        let leading = factory::trivia_list(vec![
            factory::single_line_comment("note"),
            factory::end_of_line("\n"),
            factory::whitespace("    "),
        ]);
        let statement = crate::syntax::ReturnStatement::new(
            factory::keyword("return").with_leading(leading).into_token(),
            None,
            factory::punctuation(";"),
        )
        .into_node();
        let documented = attach_documentation(&statement, &Documentation::summary("Exit.")).unwrap();
        assert_eq!(
            to_full_string(&documented),
            "// note\n/// <summary>\n/// Exit.\n/// </summary>\n    return;"
        );
    }
}
