use std::sync::Arc;

use crate::syntax::{name_text, SyntaxKind, SyntaxNode};

/// Where a node sits: enclosing namespace, enclosing types (outermost
/// first) and the enclosing member, if any.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeclarationContext {
    pub namespace: Option<String>,
    pub types: Vec<String>,
    pub member: Option<String>,
}

impl DeclarationContext {
    /// `None` when `target` is not part of `root`.
    pub fn of(root: &Arc<SyntaxNode>, target: &Arc<SyntaxNode>) -> Option<Self> {
        let path = path_to(root, target)?;
        let ancestors = &path[..path.len() - 1];
        let member = ancestors
            .iter()
            .rev()
            .find(|n| is_member(n))
            .and_then(|n| declaration_name(n));
        Some(DeclarationContext {
            namespace: namespace_of(ancestors),
            types: ancestors.iter().filter(|n| n.is_type_declaration()).filter_map(|n| declaration_name(n)).collect(),
            member,
        })
    }
}

/// Nodes from `root` to `target`, both included, matched by identity.
pub fn path_to(root: &Arc<SyntaxNode>, target: &Arc<SyntaxNode>) -> Option<Vec<Arc<SyntaxNode>>> {
    let mut path = Vec::new();
    if collect_path(root, target, &mut path) {
        path.reverse();
        Some(path)
    } else {
        None
    }
}

fn collect_path(node: &Arc<SyntaxNode>, target: &Arc<SyntaxNode>, path: &mut Vec<Arc<SyntaxNode>>) -> bool {
    if Arc::ptr_eq(node, target) || node.child_nodes().into_iter().any(|child| collect_path(child, target, path)) {
        path.push(Arc::clone(node));
        return true;
    }
    false
}

fn is_member(node: &SyntaxNode) -> bool {
    matches!(
        node.kind(),
        SyntaxKind::MethodDeclaration | SyntaxKind::ConstructorDeclaration | SyntaxKind::PropertyDeclaration
    )
}

fn is_declaration(node: &SyntaxNode) -> bool {
    node.kind() == SyntaxKind::NamespaceDeclaration || node.is_type_declaration() || is_member(node)
}

/// Declared name; dotted for namespaces.
pub fn declaration_name(node: &SyntaxNode) -> Option<String> {
    match node.as_namespace_declaration() {
        Some(namespace) => Some(name_text(&namespace.name)),
        None => node.declared_identifier().map(|t| t.text.clone()),
    }
}

fn namespace_of(ancestors: &[Arc<SyntaxNode>]) -> Option<String> {
    let parts: Vec<String> = ancestors
        .iter()
        .filter_map(|n| n.as_namespace_declaration())
        .map(|n| name_text(&n.name))
        .collect();
    if parts.is_empty() { None } else { Some(parts.join(".")) }
}

/// Enclosing namespace, type and member declarations of `target`,
/// outermost first.
pub fn containing_declarations(root: &Arc<SyntaxNode>, target: &Arc<SyntaxNode>) -> Vec<Arc<SyntaxNode>> {
    match path_to(root, target) {
        Some(mut path) => {
            path.pop();
            path.retain(|n| is_declaration(n));
            path
        }
        None => Vec::new(),
    }
}

/// Dotted name of the enclosing namespaces, `None` at global scope.
pub fn containing_namespace(root: &Arc<SyntaxNode>, target: &Arc<SyntaxNode>) -> Option<String> {
    DeclarationContext::of(root, target)?.namespace
}

pub fn containing_types(root: &Arc<SyntaxNode>, target: &Arc<SyntaxNode>) -> Vec<String> {
    DeclarationContext::of(root, target).map(|c| c.types).unwrap_or_default()
}

/// `Namespace.Type.Name` for a declaration; `None` for nodes that declare
/// nothing or are not part of `root`.
pub fn fully_qualified_name(root: &Arc<SyntaxNode>, target: &Arc<SyntaxNode>) -> Option<String> {
    let own = declaration_name(target)?;
    let context = DeclarationContext::of(root, target)?;
    let mut parts: Vec<String> = context.namespace.into_iter().collect();
    parts.extend(context.types);
    parts.push(own);
    Some(parts.join("."))
}
