use std::sync::Arc;

use crate::syntax::{factory, Block, MethodDeclaration, SyntaxNode};

/// Block with `statements` added after its existing ones.
pub fn append_statements<I>(block: &Block, statements: I) -> Block
where
    I: IntoIterator<Item = Arc<SyntaxNode>>,
{
    let appended = statements
        .into_iter()
        .fold(block.statements.clone(), |list, statement| list.push_back(statement));
    block.with_statements(appended)
}

/// Appends to a method's block body. A body-less method gets a new block
/// and loses its `;`; a non-block body is left as is.
pub fn append_to_method_body<I>(method: &MethodDeclaration, statements: I) -> MethodDeclaration
where
    I: IntoIterator<Item = Arc<SyntaxNode>>,
{
    match &method.body {
        Some(body) => match body.as_block() {
            Some(block) => method.with_body(Some(append_statements(block, statements).into_node())),
            None => method.clone(),
        },
        None => method
            .with_body(Some(factory::block(statements.into_iter().collect())))
            .with_semicolon(None),
    }
}

impl MethodDeclaration {
    pub fn with_appended_statements<I>(&self, statements: I) -> Self
    where
        I: IntoIterator<Item = Arc<SyntaxNode>>,
    {
        append_to_method_body(self, statements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{factory::*, to_full_string};

    fn log_call(text: &str) -> Arc<SyntaxNode> {
        expression_statement(invocation(member_access_path("Log.Info"), vec![string_literal(text)]))
    }

    #[test]
    fn test_append_keeps_existing_statements_first() {
        let block_node = block(vec![return_statement(None)]);
        let block = block_node.as_block().unwrap();
        let appended = append_statements(block, vec![log_call("a"), log_call("b")]);
        assert_eq!(appended.statements.len(), 3);
        assert!(Arc::ptr_eq(&appended.statements[0], &block.statements[0]));
        assert_eq!(to_full_string(&appended.into_node()), "{return;Log.Info(\"a\");Log.Info(\"b\");}");
    }

    #[test]
    fn test_body_less_method_gets_a_block() {
        let method = method_declaration(&["public"], predefined_type("void"), "Run", vec![], None);
        let method = method.as_method_declaration().unwrap().with_appended_statements(vec![log_call("run")]);
        assert!(method.semicolon.is_none());
        let statements = method.body.as_ref().and_then(|b| b.as_block()).map(|b| b.statements.len());
        assert_eq!(statements, Some(1));
    }
}
