mod common;

use std::sync::Arc;

use indoc::indoc;

use fluent_rewriter::extensions::documentation::{documentation_of, summary_text};
use fluent_rewriter::extensions::{
    attach_documentation, fully_qualified_name, method_renamer, using_normalizer, Documentation, UsingContainer,
};
use fluent_rewriter::syntax::factory::*;
use fluent_rewriter::syntax::{format, to_full_string, FormatOptions, SyntaxNode};
use fluent_rewriter::{Pass, Pipeline, Rewriter};

fn formatted(node: &SyntaxNode) -> String {
    format(node, &FormatOptions::default())
}

#[test]
fn test_rename_method_and_append_statement() {
    let tree = common::program_with_hello();
    let rewriter = Rewriter::new().with_method_declaration(|rewriter, node, method| {
        if method.identifier.text != "Hello" {
            return rewriter.walk(node);
        }
        let log = expression_statement(invocation(
            member_access_path("Console.WriteLine"),
            vec![string_literal("Hello from Modified_Hello")],
        ));
        Ok(Some(method.renamed("Modified_Hello").with_appended_statements(vec![log]).into_node()))
    });

    let result = rewriter.rewrite(&tree).unwrap();
    let expected = indoc! {r#"
        using System;

        namespace Demo
        {
            public class Program
            {
                public void Modified_Hello()
                {
                    Console.WriteLine("Hello from Modified_Hello");
                }

                public void Other()
                {
                    Hello();
                }
            }
        }
    "#};
    assert_eq!(formatted(&result), expected);
    // The input tree is untouched.
    assert!(formatted(&tree).contains("public void Hello()"));

    let renamed = result
        .descendant_nodes()
        .into_iter()
        .find(|n| n.as_method_declaration().is_some_and(|m| m.identifier.text == "Modified_Hello"))
        .cloned()
        .unwrap();
    assert_eq!(fully_qualified_name(&result, &renamed).as_deref(), Some("Demo.Program.Modified_Hello"));
}

#[test]
fn test_renamer_reaches_nested_types() {
    let inner = class_declaration(
        &["private"],
        "Inner",
        vec![method_declaration(&[], predefined_type("void"), "Hello", vec![], Some(block(vec![])))],
    );
    let outer = class_declaration(&["public"], "Outer", vec![inner]);
    let tree = compilation_unit(vec![], vec![outer]);

    let result = method_renamer(|m| m.identifier.text == "Hello", "Greet").rewrite(&tree).unwrap();
    assert!(to_full_string(&result).contains("Greet"));
    assert!(!to_full_string(&result).contains("Hello"));
}

#[test]
fn test_normalize_usings_everywhere() {
    let tree = compilation_unit(
        vec![
            using_directive("System.Text"),
            using_directive("Acme.Core"),
            using_directive("System"),
            static_using_directive("System.Math"),
            using_directive("System"),
            using_directive("System.Text"),
            using_directive("Newtonsoft.Json"),
        ],
        vec![namespace_declaration(
            "Demo",
            vec![using_directive("Zeta"), using_directive("System.Linq"), using_directive("Zeta")],
            vec![class_declaration(&["public"], "Program", vec![])],
        )],
    );

    let result = using_normalizer().rewrite(&tree).unwrap();
    let expected = indoc! {"
        using System;
        using System.Text;
        using Acme.Core;
        using Newtonsoft.Json;
        using static System.Math;

        namespace Demo
        {
            using System.Linq;
            using Zeta;

            public class Program
            {
            }
        }
    "};
    assert_eq!(formatted(&result), expected);
    assert_eq!(formatted(&result).matches("using System;").count(), 1);

    // Normalizing twice changes nothing more.
    let again = using_normalizer().rewrite(&result).unwrap();
    assert_eq!(again, result);
}

#[test]
fn test_add_and_remove_using_on_unit() {
    let tree = compilation_unit(vec![using_directive("System")], vec![]);
    let unit = tree.as_compilation_unit().unwrap();
    let unit = unit.add_using("System.IO").add_using("System").remove_using("System");
    assert_eq!(formatted(&unit.into_node()), "using System.IO;\n");
}

fn replace_placeholder(placeholder: &'static str, value: &'static str) -> Rewriter {
    Rewriter::new().with_token(move |rewriter, token| {
        let walked = rewriter.walk_token(token)?;
        Ok(walked.map(|walked| {
            if walked.text.contains(placeholder) {
                Arc::new(walked.with_text(walked.text.replace(placeholder, value)))
            } else {
                walked
            }
        }))
    })
}

#[test]
fn test_placeholder_replaced_in_code_and_documentation() {
    let create = method_declaration(
        &["public"],
        predefined_type("string"),
        "Create__NAME__",
        vec![],
        Some(block(vec![return_statement(Some(string_literal("__NAME__")))])),
    );
    let class = class_declaration(&["public"], "__NAME__", vec![create]);
    let class = attach_documentation(&class, &Documentation::summary("Creates a __NAME__.")).unwrap();
    let tree = compilation_unit(vec![], vec![class]);

    let result = replace_placeholder("__NAME__", "Widget").rewrite(&tree).unwrap();
    assert!(!to_full_string(&result).contains("__NAME__"));
    let expected = indoc! {r#"
        /// <summary>
        /// Creates a Widget.
        /// </summary>
        public class Widget
        {
            public string CreateWidget()
            {
                return "Widget";
            }
        }
    "#};
    assert_eq!(formatted(&result), expected);

    let class = result.as_compilation_unit().unwrap().members.get(0).unwrap();
    let documentation = documentation_of(class).unwrap();
    assert_eq!(summary_text(documentation).as_deref(), Some("Creates a Widget."));
}

#[test]
fn test_placeholder_left_in_documentation_when_structure_is_skipped() {
    let class = class_declaration(&["public"], "__NAME__", vec![]);
    let class = attach_documentation(&class, &Documentation::summary("About __NAME__.")).unwrap();

    let result = replace_placeholder("__NAME__", "Widget")
        .with_structured_trivia(false)
        .rewrite(&class)
        .unwrap();
    let text = formatted(&result);
    assert!(text.contains("/// About __NAME__."));
    assert!(text.contains("public class Widget"));
    let class = result.as_class_declaration().unwrap();
    assert_eq!(class.identifier.text, "Widget");
}

#[test]
fn test_pipeline_runs_passes_in_dependency_order() {
    let mut pipeline = Pipeline::new();
    pipeline
        .add_pass(Pass::new("normalize-usings", using_normalizer()))
        .add_pass(Pass::new("rename", method_renamer(|m| m.identifier.text == "Modified_Hello", "Final")).depends_on("prefix"))
        .add_pass(Pass::new("prefix", method_renamer(|m| m.identifier.text == "Hello", "Modified_Hello")));
    assert_eq!(pipeline.execution_order().unwrap(), vec!["normalize-usings", "prefix", "rename"]);

    let result = pipeline.apply(&common::program_with_hello()).unwrap();
    let text = formatted(&result);
    assert!(text.contains("public void Final()"));
    assert!(!text.contains("Modified_Hello"));
}
