//! Tree builders and random tree generation shared by the integration tests.
//!
//! Generation functions take a depth parameter to bound recursion so that
//! property tests stay fast and never build pathologically deep trees.

#![allow(dead_code)]

use std::sync::Arc;

use quickcheck::{Arbitrary, Gen};

use fluent_rewriter::extensions::{attach_documentation, Documentation};
use fluent_rewriter::syntax::factory::*;
use fluent_rewriter::syntax::{SyntaxElement, SyntaxKind, SyntaxNode};

const NAMES: &[&str] = &["alpha", "beta", "Gamma", "Hello", "Value", "count", "items", "Run"];
const NAMESPACES: &[&str] = &["System", "System.Text", "System.Linq", "Acme.Core", "Newtonsoft.Json", "Zeta"];
const BINARY_OPERATORS: &[&str] = &["+", "-", "*", "==", "!=", "&&", "<"];

fn pick<'a>(g: &mut Gen, items: &[&'a str]) -> &'a str {
    items[usize::arbitrary(g) % items.len()]
}

fn below(g: &mut Gen, bound: usize) -> usize {
    usize::arbitrary(g) % bound
}

pub fn gen_expression(g: &mut Gen, depth: usize) -> Arc<SyntaxNode> {
    let choice = if depth == 0 { below(g, 5) } else { below(g, 12) };
    match choice {
        0 => identifier_name(pick(g, NAMES)),
        1 => numeric_literal(u8::arbitrary(g)),
        2 => string_literal(pick(g, NAMES)),
        3 => keyword_literal(if bool::arbitrary(g) { "true" } else { "false" }),
        4 => this_expression(),
        5 => binary(gen_expression(g, depth - 1), pick(g, BINARY_OPERATORS), gen_expression(g, depth - 1)),
        6 => prefix_unary(if bool::arbitrary(g) { "!" } else { "-" }, gen_expression(g, depth - 1)),
        7 => parenthesized(gen_expression(g, depth - 1)),
        8 => {
            let arguments = (0..below(g, 3)).map(|_| gen_expression(g, depth - 1)).collect();
            invocation(member_access_path(&format!("Console.{}", pick(g, NAMES))), arguments)
        }
        9 => member_access(gen_expression(g, depth - 1), pick(g, NAMES)),
        10 => {
            let arguments = (0..below(g, 2)).map(|_| gen_expression(g, depth - 1)).collect();
            object_creation(generic_name("List", vec![predefined_type("int")]), arguments)
        }
        _ => assignment(identifier_name(pick(g, NAMES)), gen_expression(g, depth - 1)),
    }
}

pub fn gen_statement(g: &mut Gen, depth: usize) -> Arc<SyntaxNode> {
    let choice = if depth == 0 { below(g, 3) } else { below(g, 7) };
    match choice {
        0 => expression_statement(gen_expression(g, depth)),
        1 => return_statement(if bool::arbitrary(g) { Some(gen_expression(g, depth)) } else { None }),
        2 => local_declaration(type_name("int"), pick(g, NAMES), Some(gen_expression(g, depth))),
        3 => {
            let else_statement = if bool::arbitrary(g) { Some(gen_statement(g, depth - 1)) } else { None };
            if_statement(gen_expression(g, depth - 1), gen_block(g, depth - 1), else_statement)
        }
        4 => while_statement(gen_expression(g, depth - 1), gen_block(g, depth - 1)),
        5 => foreach_statement(type_name("var"), pick(g, NAMES), identifier_name("items"), gen_statement(g, depth - 1)),
        _ => gen_block(g, depth - 1),
    }
}

pub fn gen_block(g: &mut Gen, depth: usize) -> Arc<SyntaxNode> {
    let statements = (0..below(g, 4)).map(|_| gen_statement(g, depth)).collect();
    block(statements)
}

pub fn gen_member(g: &mut Gen, depth: usize) -> Arc<SyntaxNode> {
    let member = match below(g, if depth > 1 { 6 } else { 5 }) {
        0 => field_declaration(&["private"], type_name("int"), pick(g, NAMES), Some(gen_expression(g, 1))),
        1 => property_declaration(&["public"], type_name("string"), pick(g, NAMES)),
        2 => enum_declaration(&["public"], "Color", &["Red", "Green", "Blue"]),
        3 => constructor_declaration(&["public"], pick(g, NAMES), vec![], gen_block(g, depth.saturating_sub(1))),
        4 => {
            let parameters = (0..below(g, 4))
                .map(|i| parameter(type_name("int"), &format!("p{}", i)))
                .collect();
            let body = if below(g, 5) == 0 { None } else { Some(gen_block(g, depth)) };
            method_declaration(&["public"], type_name("void"), pick(g, NAMES), parameters, body)
        }
        _ => gen_class(g, depth - 1),
    };
    if below(g, 4) == 0 {
        attach_documentation(&member, &Documentation::summary(pick(g, NAMES))).unwrap_or(member)
    } else {
        member
    }
}

pub fn gen_class(g: &mut Gen, depth: usize) -> Arc<SyntaxNode> {
    let members = (0..below(g, 4)).map(|_| gen_member(g, depth)).collect();
    class_declaration(&["public"], pick(g, NAMES), members)
}

pub fn gen_compilation_unit(g: &mut Gen, depth: usize) -> Arc<SyntaxNode> {
    let usings = (0..below(g, 5))
        .map(|_| {
            let name = pick(g, NAMESPACES);
            if below(g, 4) == 0 { static_using_directive(name) } else { using_directive(name) }
        })
        .collect();
    let classes: Vec<Arc<SyntaxNode>> = (0..1 + below(g, 2)).map(|_| gen_class(g, depth)).collect();
    let members = if bool::arbitrary(g) {
        vec![namespace_declaration("Demo", vec![], classes)]
    } else {
        classes
    };
    compilation_unit(usings, members)
}

/// A random compilation unit.
#[derive(Clone, Debug)]
pub struct ArbitraryTree(pub Arc<SyntaxNode>);

impl Arbitrary for ArbitraryTree {
    fn arbitrary(g: &mut Gen) -> Self {
        ArbitraryTree(gen_compilation_unit(g, 3))
    }
}

/// Every node of `root`, including `root`, in pre-order. Does not enter trivia.
pub fn all_nodes(root: &Arc<SyntaxNode>) -> Vec<Arc<SyntaxNode>> {
    let mut out = vec![Arc::clone(root)];
    out.extend(root.descendant_nodes().into_iter().cloned());
    out
}

pub fn count_kind(root: &Arc<SyntaxNode>, kind: SyntaxKind) -> usize {
    all_nodes(root).iter().filter(|n| n.kind() == kind).count()
}

/// Token texts in document order, skipping whole subtrees of `skip` kind.
pub fn token_texts_outside(node: &SyntaxNode, skip: SyntaxKind, out: &mut Vec<String>) {
    if node.kind() == skip {
        return;
    }
    for element in node.children_with_tokens() {
        match element {
            SyntaxElement::Token(token) => out.push(token.text.clone()),
            SyntaxElement::Node(child) => token_texts_outside(child, skip, out),
        }
    }
}

/// `class Program { public void Hello() { } public void Other() { } }`
pub fn program_with_hello() -> Arc<SyntaxNode> {
    let hello = method_declaration(&["public"], predefined_type("void"), "Hello", vec![], Some(block(vec![])));
    let other = method_declaration(
        &["public"],
        predefined_type("void"),
        "Other",
        vec![],
        Some(block(vec![expression_statement(invocation(identifier_name("Hello"), vec![]))])),
    );
    compilation_unit(
        vec![using_directive("System")],
        vec![namespace_declaration("Demo", vec![], vec![class_declaration(&["public"], "Program", vec![hello, other])])],
    )
}
