use std::sync::Arc;

use crate::error::RewriteResult;
use crate::rewriter::Rewriter;
use crate::syntax::{MethodDeclaration, SyntaxNode, Token};

/// Rewrites the text of every token matching `predicate`, keeping its trivia.
pub fn rename_tokens<P>(root: &Arc<SyntaxNode>, predicate: P, new_text: &str) -> RewriteResult<Arc<SyntaxNode>>
where
    P: Fn(&Token) -> bool + Send + Sync + 'static,
{
    let new_text = new_text.to_string();
    Rewriter::new()
        .with_token(move |rewriter, token| {
            if predicate(token) {
                Ok(Some(Arc::new(token.with_text(new_text.as_str()))))
            } else {
                rewriter.walk_token(token)
            }
        })
        .rewrite(root)
}

/// Renames every identifier token spelled `old`. Keywords and literals with
/// the same text are left alone.
pub fn rename_identifier(root: &Arc<SyntaxNode>, old: &str, new: &str) -> RewriteResult<Arc<SyntaxNode>> {
    let old = old.to_string();
    rename_tokens(root, move |token| token.is_identifier() && token.text == old, new)
}

impl MethodDeclaration {
    pub fn renamed(&self, new_name: &str) -> Self {
        self.with_identifier(Arc::new(self.identifier.with_text(new_name)))
    }
}

/// A rewriter renaming methods accepted by `predicate` to `new_name`, after
/// rewriting their contents.
pub fn method_renamer<P>(predicate: P, new_name: &str) -> Rewriter
where
    P: Fn(&MethodDeclaration) -> bool + Send + Sync + 'static,
{
    let new_name = new_name.to_string();
    Rewriter::new().with_method_declaration(move |rewriter, node, method| {
        if !predicate(method) {
            return rewriter.walk(node);
        }
        let walked = rewriter.walk(node)?;
        Ok(walked.map(|walked| match walked.as_method_declaration() {
            Some(method) => method.renamed(&new_name).into_node(),
            None => walked,
        }))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{factory, to_full_string};

    fn class_with_recursion() -> Arc<SyntaxNode> {
        // void Hello() { Hello(); }
        let body = factory::block(vec![factory::expression_statement(factory::invocation(
            factory::identifier_name("Hello"),
            vec![],
        ))]);
        let hello = factory::method_declaration(&[], factory::predefined_type("void"), "Hello", vec![], Some(body));
        let other = factory::method_declaration(&[], factory::predefined_type("void"), "Other", vec![], Some(factory::block(vec![])));
        factory::class_declaration(&[], "C", vec![hello, other])
    }

    #[test]
    fn test_rename_identifier_hits_declaration_and_uses() {
        let renamed = rename_identifier(&class_with_recursion(), "Hello", "Greet").unwrap();
        let text = to_full_string(&renamed);
        assert_eq!(text.matches("Greet").count(), 2);
        assert!(!text.contains("Hello"));
    }

    #[test]
    fn test_rename_identifier_ignores_keywords() {
        let method = factory::method_declaration(&[], factory::predefined_type("void"), "Run", vec![], None);
        let renamed = rename_identifier(&method, "void", "int").unwrap();
        assert!(Arc::ptr_eq(&method, &renamed));
    }

    #[test]
    fn test_method_renamer_only_renames_declarations() {
        let renamer = method_renamer(|m| m.identifier.text == "Hello", "Modified_Hello");
        let renamed = renamer.rewrite(&class_with_recursion()).unwrap();
        let names: Vec<String> = renamed
            .descendant_nodes()
            .into_iter()
            .filter_map(|n| n.as_method_declaration())
            .map(|m| m.identifier.text.clone())
            .collect();
        assert_eq!(names, vec!["Modified_Hello", "Other"]);
        // The call site is an identifier name, not a declaration.
        assert!(to_full_string(&renamed).contains("{Hello();}"));
    }

    #[test]
    fn test_renamed_keeps_metadata() {
        let method = factory::method_declaration(&[], factory::predefined_type("void"), "A", vec![], None);
        let tagged = method
            .as_method_declaration()
            .unwrap()
            .with_metadata(Some(Arc::new(crate::syntax::metadata_with("origin", 7_u8))));
        let renamed = tagged.renamed("B");
        assert_eq!(renamed.identifier.text, "B");
        assert!(renamed.metadata.is_some());
    }
}
