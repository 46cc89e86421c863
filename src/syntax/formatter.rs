use serde::{Deserialize, Serialize};

use super::{
    to_full_string, NodeList, SeparatedList, SyntaxNode, SyntaxToken, TokenList, TriviaKind,
};

/// Indentation unit used by [`format`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndentStyle {
    Spaces(usize),
    Tabs,
}

/// Layout options for [`format`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    pub indent: IndentStyle,
    pub newline: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions {
            indent: IndentStyle::Spaces(4),
            newline: "\n".to_string(),
        }
    }
}

impl FormatOptions {
    pub fn with_indent(mut self, indent: IndentStyle) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_newline(mut self, newline: impl Into<String>) -> Self {
        self.newline = newline.into();
        self
    }

    fn indent_unit(&self) -> String {
        match self.indent {
            IndentStyle::Spaces(width) => " ".repeat(width),
            IndentStyle::Tabs => "\t".to_string(),
        }
    }
}

/// Pretty-prints a tree, ignoring its whitespace trivia.
///
/// Comments and documentation in the leading trivia of a declaration's or
/// statement's first token are kept on their own lines. Every emitted line,
/// the last included, ends with `options.newline`.
///
/// # Arguments
/// * `node` - The root to print; any kind is accepted.
/// * `options` - Indentation unit and newline string.
pub fn format(node: &SyntaxNode, options: &FormatOptions) -> String {
    let mut formatter = Formatter {
        unit: options.indent_unit(),
        newline: options.newline.clone(),
        out: String::new(),
    };
    formatter.node(node, 0);
    formatter.out
}

struct Formatter {
    unit: String,
    newline: String,
    out: String,
}

impl Formatter {
    fn line(&mut self, level: usize, text: &str) {
        for _ in 0..level {
            self.out.push_str(&self.unit);
        }
        self.out.push_str(text);
        self.out.push_str(&self.newline);
    }

    fn blank(&mut self) {
        self.out.push_str(&self.newline);
    }

    fn comments(&mut self, token: &SyntaxToken, level: usize) {
        for trivia in token.leading.iter() {
            match trivia.kind {
                TriviaKind::SingleLineComment | TriviaKind::MultiLineComment => {
                    for text in trivia.text.lines() {
                        self.line(level, text.trim());
                    }
                }
                TriviaKind::DocumentationComment => {
                    if let Some(structure) = &trivia.structure {
                        for text in to_full_string(structure).lines() {
                            self.line(level, text);
                        }
                    }
                }
                TriviaKind::Directive => self.line(0, trivia.text.trim()),
                _ => {}
            }
        }
    }

    fn leading_comments(&mut self, node: &SyntaxNode, level: usize) {
        if let Some(token) = node.first_token() {
            self.comments(token, level);
        }
    }

    /// Members separated by one blank line.
    fn members(&mut self, members: &NodeList, level: usize) {
        for (index, member) in members.iter().enumerate() {
            if index > 0 {
                self.blank();
            }
            self.node(member, level);
        }
    }

    fn usings_then_members(&mut self, usings: &NodeList, members: &NodeList, level: usize) {
        for using in usings.iter() {
            self.node(using, level);
        }
        if !usings.is_empty() && !members.is_empty() {
            self.blank();
        }
        self.members(members, level);
    }

    fn braced_members(&mut self, header: String, members: &NodeList, level: usize) {
        self.line(level, &header);
        self.line(level, "{");
        self.members(members, level + 1);
        self.line(level, "}");
    }

    fn attributes(&mut self, attribute_lists: &NodeList, level: usize) {
        for list in attribute_lists.iter() {
            self.line(level, &expr(list));
        }
    }

    fn node(&mut self, node: &SyntaxNode, level: usize) {
        match node {
            SyntaxNode::CompilationUnit(n) => {
                self.usings_then_members(&n.usings, &n.members, level);
                self.comments(&n.end_of_file, level);
            }
            SyntaxNode::NamespaceDeclaration(n) => {
                self.leading_comments(node, level);
                self.line(level, &format!("namespace {}", expr(&n.name)));
                self.line(level, "{");
                self.usings_then_members(&n.usings, &n.members, level + 1);
                self.line(level, "}");
            }
            SyntaxNode::UsingDirective(_) => {
                self.leading_comments(node, level);
                self.line(level, &expr(node));
            }
            SyntaxNode::ClassDeclaration(n) => {
                self.leading_comments(node, level);
                self.attributes(&n.attribute_lists, level);
                let header = type_header(&n.modifiers, &n.keyword, &n.identifier, &n.type_parameter_list, &n.base_list);
                self.braced_members(header, &n.members, level);
            }
            SyntaxNode::InterfaceDeclaration(n) => {
                self.leading_comments(node, level);
                self.attributes(&n.attribute_lists, level);
                let header = type_header(&n.modifiers, &n.keyword, &n.identifier, &n.type_parameter_list, &n.base_list);
                self.braced_members(header, &n.members, level);
            }
            SyntaxNode::EnumDeclaration(n) => {
                self.leading_comments(node, level);
                self.attributes(&n.attribute_lists, level);
                let header = type_header(&n.modifiers, &n.enum_keyword, &n.identifier, &None, &n.base_list);
                self.line(level, &header);
                self.line(level, "{");
                let trailing = n.members.has_trailing_separator();
                for (index, member) in n.members.iter().enumerate() {
                    let last = index + 1 == n.members.len();
                    let comma = if !last || trailing { "," } else { "" };
                    self.leading_comments(member, level + 1);
                    self.line(level + 1, &format!("{}{}", expr(member), comma));
                }
                self.line(level, "}");
            }
            SyntaxNode::MethodDeclaration(n) => {
                self.leading_comments(node, level);
                self.attributes(&n.attribute_lists, level);
                let type_parameters = n.type_parameter_list.as_ref().map(|t| expr(t)).unwrap_or_default();
                let header = format!(
                    "{}{} {}{}{}",
                    modifier_prefix(&n.modifiers),
                    expr(&n.return_type),
                    n.identifier.text,
                    type_parameters,
                    expr(&n.parameter_list)
                );
                self.body(header, &n.body, level);
            }
            SyntaxNode::ConstructorDeclaration(n) => {
                self.leading_comments(node, level);
                self.attributes(&n.attribute_lists, level);
                let header = format!("{}{}{}", modifier_prefix(&n.modifiers), n.identifier.text, expr(&n.parameter_list));
                self.body(header, &n.body, level);
            }
            SyntaxNode::PropertyDeclaration(n) => {
                self.leading_comments(node, level);
                self.attributes(&n.attribute_lists, level);
                let header = format!("{}{} {}", modifier_prefix(&n.modifiers), expr(&n.property_type), n.identifier.text);
                self.property(header, &n.accessor_list, level);
            }
            SyntaxNode::AccessorDeclaration(n) => {
                self.leading_comments(node, level);
                let header = format!("{}{}", modifier_prefix(&n.modifiers), n.keyword.text);
                self.body(header, &n.body, level);
            }
            SyntaxNode::FieldDeclaration(n) => {
                self.leading_comments(node, level);
                self.attributes(&n.attribute_lists, level);
                self.line(level, &format!("{}{};", modifier_prefix(&n.modifiers), expr(&n.declaration)));
            }
            _ => self.statement(node, level),
        }
    }

    /// `header` followed by a block body, or `header;` without one.
    fn body(&mut self, header: String, body: &Option<std::sync::Arc<SyntaxNode>>, level: usize) {
        match body {
            Some(body) => {
                self.line(level, &header);
                self.embedded(body, level);
            }
            None => self.line(level, &format!("{};", header)),
        }
    }

    fn property(&mut self, header: String, accessor_list: &SyntaxNode, level: usize) {
        let accessors = match accessor_list.as_accessor_list() {
            Some(list) => &list.accessors,
            None => return self.line(level, &format!("{} {}", header, expr(accessor_list))),
        };
        let auto = accessors
            .iter()
            .all(|a| a.as_accessor_declaration().is_some_and(|a| a.body.is_none()));
        if auto {
            let inline = accessors.iter().map(|a| format!("{};", accessor_head(a))).collect::<Vec<_>>().join(" ");
            self.line(level, &format!("{} {{ {} }}", header, inline));
        } else {
            self.line(level, &header);
            self.line(level, "{");
            for accessor in accessors.iter() {
                self.node(accessor, level + 1);
            }
            self.line(level, "}");
        }
    }

    /// Blocks sit at the owner's level; other statements are indented.
    fn embedded(&mut self, statement: &SyntaxNode, level: usize) {
        match statement {
            SyntaxNode::Block(_) => self.statement(statement, level),
            _ => self.statement(statement, level + 1),
        }
    }

    fn statement(&mut self, node: &SyntaxNode, level: usize) {
        self.leading_comments(node, level);
        match node {
            SyntaxNode::Block(n) => {
                self.line(level, "{");
                for statement in n.statements.iter() {
                    self.node(statement, level + 1);
                }
                self.line(level, "}");
            }
            SyntaxNode::LocalDeclarationStatement(n) => self.line(level, &format!("{};", expr(&n.declaration))),
            SyntaxNode::ExpressionStatement(n) => self.line(level, &format!("{};", expr(&n.expression))),
            SyntaxNode::ReturnStatement(n) => match &n.expression {
                Some(value) => self.line(level, &format!("return {};", expr(value))),
                None => self.line(level, "return;"),
            },
            SyntaxNode::IfStatement(_) => self.if_chain(node, level, ""),
            SyntaxNode::WhileStatement(n) => {
                self.line(level, &format!("while ({})", expr(&n.condition)));
                self.embedded(&n.statement, level);
            }
            SyntaxNode::ForEachStatement(n) => {
                self.line(
                    level,
                    &format!("foreach ({} {} in {})", expr(&n.variable_type), n.identifier.text, expr(&n.expression)),
                );
                self.embedded(&n.statement, level);
            }
            _ => self.line(level, &expr(node)),
        }
    }

    /// `if`, then `else if` links on the same level, then a final `else`.
    fn if_chain(&mut self, node: &SyntaxNode, level: usize, prefix: &str) {
        let Some(n) = node.as_if_statement() else {
            return self.statement(node, level);
        };
        self.line(level, &format!("{}if ({})", prefix, expr(&n.condition)));
        self.embedded(&n.statement, level);
        let Some(else_clause) = n.else_clause.as_ref().and_then(|e| e.as_else_clause()) else {
            return;
        };
        if else_clause.statement.as_if_statement().is_some() {
            self.if_chain(&else_clause.statement, level, "else ");
        } else {
            self.line(level, "else");
            self.embedded(&else_clause.statement, level);
        }
    }
}

fn modifier_prefix(modifiers: &TokenList) -> String {
    modifiers.iter().map(|m| format!("{} ", m.text)).collect()
}

fn type_header(
    modifiers: &TokenList,
    keyword: &SyntaxToken,
    identifier: &SyntaxToken,
    type_parameters: &Option<std::sync::Arc<SyntaxNode>>,
    base_list: &Option<std::sync::Arc<SyntaxNode>>,
) -> String {
    let mut header = format!("{}{} {}", modifier_prefix(modifiers), keyword.text, identifier.text);
    if let Some(type_parameters) = type_parameters {
        header.push_str(&expr(type_parameters));
    }
    if let Some(base_list) = base_list {
        header.push(' ');
        header.push_str(&expr(base_list));
    }
    header
}

fn accessor_head(accessor: &SyntaxNode) -> String {
    match accessor.as_accessor_declaration() {
        Some(a) => format!("{}{}", modifier_prefix(&a.modifiers), a.keyword.text),
        None => expr(accessor),
    }
}

fn comma_separated(list: &SeparatedList) -> String {
    list.iter().map(|e| expr(e)).collect::<Vec<_>>().join(", ")
}

/// Single-line rendering of expressions, names and other inline nodes.
fn expr(node: &SyntaxNode) -> String {
    match node {
        SyntaxNode::IdentifierName(n) => n.identifier.text.clone(),
        SyntaxNode::QualifiedName(n) => format!("{}.{}", expr(&n.left), expr(&n.right)),
        SyntaxNode::GenericName(n) => format!("{}{}", n.identifier.text, expr(&n.type_argument_list)),
        SyntaxNode::TypeArgumentList(n) => format!("<{}>", comma_separated(&n.arguments)),
        SyntaxNode::PredefinedType(n) => n.keyword.text.clone(),
        SyntaxNode::LiteralExpression(n) => n.token.text.clone(),
        SyntaxNode::ThisExpression(n) => n.this_keyword.text.clone(),
        SyntaxNode::ParenthesizedExpression(n) => format!("({})", expr(&n.expression)),
        SyntaxNode::BinaryExpression(n) => format!("{} {} {}", expr(&n.left), n.operator.text, expr(&n.right)),
        SyntaxNode::PrefixUnaryExpression(n) => format!("{}{}", n.operator.text, expr(&n.operand)),
        SyntaxNode::AssignmentExpression(n) => format!("{} {} {}", expr(&n.left), n.operator.text, expr(&n.right)),
        SyntaxNode::InvocationExpression(n) => format!("{}{}", expr(&n.expression), expr(&n.argument_list)),
        SyntaxNode::ArgumentList(n) => format!("({})", comma_separated(&n.arguments)),
        SyntaxNode::Argument(n) => match &n.ref_kind_keyword {
            Some(keyword) => format!("{} {}", keyword.text, expr(&n.expression)),
            None => expr(&n.expression),
        },
        SyntaxNode::MemberAccessExpression(n) => format!("{}.{}", expr(&n.expression), expr(&n.name)),
        SyntaxNode::ObjectCreationExpression(n) => {
            let arguments = n.argument_list.as_ref().map(|a| expr(a)).unwrap_or_default();
            format!("new {}{}", expr(&n.created_type), arguments)
        }
        SyntaxNode::VariableDeclaration(n) => format!("{} {}", expr(&n.variable_type), comma_separated(&n.variables)),
        SyntaxNode::VariableDeclarator(n) => match &n.initializer {
            Some(initializer) => format!("{} {}", n.identifier.text, expr(initializer)),
            None => n.identifier.text.clone(),
        },
        SyntaxNode::EqualsValueClause(n) => format!("{} {}", n.equals.text, expr(&n.value)),
        SyntaxNode::ParameterList(n) => format!("({})", comma_separated(&n.parameters)),
        SyntaxNode::Parameter(n) => {
            let attributes: String = n.attribute_lists.iter().map(|a| format!("{} ", expr(a))).collect();
            let default_value = n.default_value.as_ref().map(|d| format!(" {}", expr(d))).unwrap_or_default();
            format!(
                "{}{}{} {}{}",
                attributes,
                modifier_prefix(&n.modifiers),
                expr(&n.parameter_type),
                n.identifier.text,
                default_value
            )
        }
        SyntaxNode::TypeParameterList(n) => format!("<{}>", comma_separated(&n.parameters)),
        SyntaxNode::TypeParameter(n) => n.identifier.text.clone(),
        SyntaxNode::BaseList(n) => format!(": {}", comma_separated(&n.types)),
        SyntaxNode::SimpleBaseType(n) => expr(&n.base_type),
        SyntaxNode::AttributeList(n) => format!("[{}]", comma_separated(&n.attributes)),
        SyntaxNode::Attribute(n) => {
            let arguments = n.argument_list.as_ref().map(|a| expr(a)).unwrap_or_default();
            format!("{}{}", expr(&n.name), arguments)
        }
        SyntaxNode::UsingDirective(n) => {
            let static_keyword = n.static_keyword.as_ref().map(|s| format!("{} ", s.text)).unwrap_or_default();
            format!("using {}{};", static_keyword, expr(&n.name))
        }
        SyntaxNode::EnumMemberDeclaration(n) => match &n.equals_value {
            Some(value) => format!("{} {}", n.identifier.text, expr(value)),
            None => n.identifier.text.clone(),
        },
        _ => node
            .descendant_tokens()
            .iter()
            .map(|t| t.text.as_str())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
    }
}
