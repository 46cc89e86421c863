use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use crate::rewriter::Rewriter;
use crate::syntax::{factory, name_text, CompilationUnit, NamespaceDeclaration, NodeList, SyntaxNode};

/// A node owning a list of using directives.
pub trait UsingContainer: Sized {
    fn using_list(&self) -> &NodeList;

    fn replace_usings(&self, usings: NodeList) -> Self;

    /// Appends `using name;` unless an identical plain using is present.
    fn add_using(&self, name: &str) -> Self {
        if self.using_list().iter().any(|u| using_key(u) == Some((false, name.to_string()))) {
            return self.replace_usings(self.using_list().clone());
        }
        self.add_using_directive(factory::using_directive(name))
    }

    fn add_using_directive(&self, directive: Arc<SyntaxNode>) -> Self {
        self.replace_usings(self.using_list().push_back(directive))
    }

    /// Removes every using (plain or static) naming `name`.
    fn remove_using(&self, name: &str) -> Self {
        let kept = self
            .using_list()
            .iter()
            .filter(|u| using_key(u).is_none_or(|(_, n)| n != name))
            .cloned()
            .collect();
        self.replace_usings(kept)
    }

    /// Plain usings before static ones, `System` namespaces first, then
    /// ordinal order. Stable for equal keys.
    fn sort_usings(&self) -> Self {
        let mut usings: Vec<Arc<SyntaxNode>> = self.using_list().iter().cloned().collect();
        usings.sort_by(|a, b| compare_usings(a, b));
        self.replace_usings(usings.into_iter().collect())
    }

    /// Drops repeated usings; the first occurrence wins.
    fn dedupe_usings(&self) -> Self {
        let mut seen = HashSet::new();
        let kept = self
            .using_list()
            .iter()
            .filter(|u| match using_key(u) {
                Some(key) => seen.insert(key),
                None => true,
            })
            .cloned()
            .collect();
        self.replace_usings(kept)
    }

    fn normalize_usings(&self) -> Self {
        self.dedupe_usings().sort_usings()
    }
}

impl UsingContainer for CompilationUnit {
    fn using_list(&self) -> &NodeList {
        &self.usings
    }

    fn replace_usings(&self, usings: NodeList) -> Self {
        self.with_usings(usings)
    }
}

impl UsingContainer for NamespaceDeclaration {
    fn using_list(&self) -> &NodeList {
        &self.usings
    }

    fn replace_usings(&self, usings: NodeList) -> Self {
        self.with_usings(usings)
    }
}

/// `(is_static, dotted name)` of a using directive.
pub fn using_key(node: &SyntaxNode) -> Option<(bool, String)> {
    node.as_using_directive()
        .map(|u| (u.static_keyword.is_some(), name_text(&u.name)))
}

fn is_system(name: &str) -> bool {
    name == "System" || name.starts_with("System.")
}

fn compare_usings(a: &SyntaxNode, b: &SyntaxNode) -> Ordering {
    match (using_key(a), using_key(b)) {
        (Some((a_static, a_name)), Some((b_static, b_name))) => a_static
            .cmp(&b_static)
            .then_with(|| is_system(&b_name).cmp(&is_system(&a_name)))
            .then_with(|| a_name.cmp(&b_name)),
        _ => Ordering::Equal,
    }
}

/// A rewriter that sorts and deduplicates the usings of every compilation
/// unit and namespace in the tree.
pub fn using_normalizer() -> Rewriter {
    Rewriter::new()
        .with_compilation_unit(|rewriter, node, _| {
            Ok(rewriter.walk(node)?.map(|walked| match walked.as_compilation_unit() {
                Some(unit) => unit.normalize_usings().into_node(),
                None => walked,
            }))
        })
        .with_namespace_declaration(|rewriter, node, _| {
            Ok(rewriter.walk(node)?.map(|walked| match walked.as_namespace_declaration() {
                Some(namespace) => namespace.normalize_usings().into_node(),
                None => walked,
            }))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::factory::{compilation_unit, namespace_declaration, static_using_directive, using_directive};

    fn names(unit: &CompilationUnit) -> Vec<String> {
        unit.usings
            .iter()
            .filter_map(|u| using_key(u))
            .map(|(is_static, name)| if is_static { format!("static {}", name) } else { name })
            .collect()
    }

    fn unit(usings: Vec<Arc<SyntaxNode>>) -> CompilationUnit {
        compilation_unit(usings, vec![]).as_compilation_unit().cloned().unwrap()
    }

    #[test]
    fn test_sort_puts_system_first_and_static_last() {
        let unit = unit(vec![
            static_using_directive("System.Math"),
            using_directive("Newtonsoft.Json"),
            using_directive("System.Text"),
            using_directive("Acme.Core"),
            using_directive("System"),
        ]);
        assert_eq!(
            names(&unit.sort_usings()),
            vec!["System", "System.Text", "Acme.Core", "Newtonsoft.Json", "static System.Math"]
        );
    }

    #[test]
    fn test_dedupe_keeps_first_occurrence() {
        let first = using_directive("System");
        let unit = unit(vec![Arc::clone(&first), using_directive("Acme"), using_directive("System")]);
        let deduped = unit.dedupe_usings();
        assert_eq!(names(&deduped), vec!["System", "Acme"]);
        assert!(Arc::ptr_eq(&deduped.usings[0], &first));
    }

    #[test]
    fn test_static_and_plain_are_distinct() {
        let unit = unit(vec![using_directive("System.Math"), static_using_directive("System.Math")]);
        assert_eq!(unit.dedupe_usings().usings.len(), 2);
    }

    #[test]
    fn test_add_and_remove() {
        let unit = unit(vec![using_directive("System")]);
        let added = unit.add_using("System.Linq").add_using("System");
        assert_eq!(names(&added), vec!["System", "System.Linq"]);
        assert_eq!(names(&added.remove_using("System")), vec!["System.Linq"]);
    }

    #[test]
    fn test_normalizer_reaches_nested_namespaces() {
        let inner = namespace_declaration("Demo", vec![using_directive("Zeta"), using_directive("Alpha"), using_directive("Zeta")], vec![]);
        let root = compilation_unit(vec![using_directive("B"), using_directive("A")], vec![inner]);
        let normalized = using_normalizer().rewrite(&root).unwrap();
        let unit = normalized.as_compilation_unit().unwrap();
        assert_eq!(names(unit), vec!["A", "B"]);
        let namespace = unit.members[0].as_namespace_declaration().unwrap();
        let inner_names: Vec<String> = namespace.usings.iter().filter_map(|u| using_key(u)).map(|(_, n)| n).collect();
        assert_eq!(inner_names, vec!["Alpha", "Zeta"]);
    }
}
