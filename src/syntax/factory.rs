//! Constructors for trivia-free tokens and nodes.
//!
//! Trees built here print verbatim without any whitespace; run them through
//! [`format`](super::format) for readable text.

use std::fmt::Display;
use std::sync::Arc;

use super::{
    Argument, ArgumentList, AssignmentExpression, AttributeList, Attribute, AccessorDeclaration, AccessorList,
    BinaryExpression, Block, ClassDeclaration, CompilationUnit, ConstructorDeclaration, DocumentationComment,
    ElseClause, EnumDeclaration, EnumMemberDeclaration, EqualsValueClause, ExpressionStatement, FieldDeclaration,
    ForEachStatement, GenericName, IdentifierName, IfStatement, InterfaceDeclaration, InvocationExpression,
    LiteralExpression, LocalDeclarationStatement, MemberAccessExpression, MethodDeclaration, NamespaceDeclaration,
    NodeList, ObjectCreationExpression, Parameter, ParameterList, ParenthesizedExpression, PredefinedType,
    PrefixUnaryExpression, PropertyDeclaration, QualifiedName, ReturnStatement, SeparatedList, SyntaxNode,
    SyntaxToken, SyntaxTrivia, ThisExpression, Token, TokenKind, TokenList, Trivia, TriviaKind, TriviaList,
    TypeArgumentList, UsingDirective, VariableDeclaration, VariableDeclarator, WhileStatement, XmlElement,
    XmlElementEndTag, XmlElementStartTag, XmlText,
};

const PREDEFINED_TYPES: &[&str] = &[
    "bool", "byte", "char", "decimal", "double", "float", "int", "long", "object", "sbyte", "short", "string",
    "uint", "ulong", "ushort", "void",
];

// ---------------------------------------------------------------------------
// Tokens and trivia
// ---------------------------------------------------------------------------

pub fn token(kind: TokenKind, text: impl Into<String>) -> SyntaxToken {
    Arc::new(Token::new(kind, text))
}

pub fn identifier(text: impl Into<String>) -> SyntaxToken {
    token(TokenKind::Identifier, text)
}

pub fn keyword(text: impl Into<String>) -> SyntaxToken {
    token(TokenKind::Keyword, text)
}

pub fn punctuation(text: impl Into<String>) -> SyntaxToken {
    token(TokenKind::Punctuation, text)
}

pub fn operator(text: impl Into<String>) -> SyntaxToken {
    token(TokenKind::Operator, text)
}

pub fn end_of_file() -> SyntaxToken {
    token(TokenKind::EndOfFile, "")
}

pub fn whitespace(text: impl Into<String>) -> SyntaxTrivia {
    Arc::new(Trivia::new(TriviaKind::Whitespace, text))
}

pub fn end_of_line(text: impl Into<String>) -> SyntaxTrivia {
    Arc::new(Trivia::new(TriviaKind::EndOfLine, text))
}

/// `// text`
pub fn single_line_comment(text: &str) -> SyntaxTrivia {
    Arc::new(Trivia::new(TriviaKind::SingleLineComment, format!("// {}", text)))
}

pub fn trivia_list(trivia: Vec<SyntaxTrivia>) -> TriviaList {
    trivia.into_iter().collect()
}

pub fn token_list(tokens: Vec<SyntaxToken>) -> TokenList {
    tokens.into_iter().collect()
}

pub fn node_list(nodes: Vec<Arc<SyntaxNode>>) -> NodeList {
    nodes.into_iter().collect()
}

pub fn modifiers(keywords: &[&str]) -> TokenList {
    keywords.iter().map(|k| keyword(*k)).collect()
}

/// Elements joined by freshly made `separator` tokens, without a trailing one.
pub fn separated_list(elements: Vec<Arc<SyntaxNode>>, separator: &str) -> SeparatedList {
    let separators = (1..elements.len()).map(|_| punctuation(separator)).collect();
    SeparatedList::new(node_list(elements), separators)
}

pub fn comma_list(elements: Vec<Arc<SyntaxNode>>) -> SeparatedList {
    separated_list(elements, ",")
}

// ---------------------------------------------------------------------------
// Names and types
// ---------------------------------------------------------------------------

pub fn identifier_name(name: &str) -> Arc<SyntaxNode> {
    IdentifierName::new(identifier(name)).into_node()
}

/// `System.Collections.Generic` as nested qualified names.
pub fn name(dotted: &str) -> Arc<SyntaxNode> {
    let mut parts = dotted.split('.');
    let first = identifier_name(parts.next().unwrap_or_default());
    parts.fold(first, |left, part| {
        QualifiedName::new(left, punctuation("."), identifier_name(part)).into_node()
    })
}

pub fn predefined_type(keyword_text: &str) -> Arc<SyntaxNode> {
    PredefinedType::new(keyword(keyword_text)).into_node()
}

pub fn generic_name(identifier_text: &str, arguments: Vec<Arc<SyntaxNode>>) -> Arc<SyntaxNode> {
    let argument_list = TypeArgumentList::new(punctuation("<"), comma_list(arguments), punctuation(">")).into_node();
    GenericName::new(identifier(identifier_text), argument_list).into_node()
}

/// A predefined type for C# keywords (`int`, `void`, ...), a name otherwise.
pub fn type_name(text: &str) -> Arc<SyntaxNode> {
    if PREDEFINED_TYPES.contains(&text) {
        predefined_type(text)
    } else {
        name(text)
    }
}

// ---------------------------------------------------------------------------
// Declarations
// ---------------------------------------------------------------------------

pub fn using_directive(name_text: &str) -> Arc<SyntaxNode> {
    UsingDirective::new(keyword("using"), None, name(name_text), punctuation(";")).into_node()
}

/// `using static Name;`
pub fn static_using_directive(name_text: &str) -> Arc<SyntaxNode> {
    UsingDirective::new(keyword("using"), Some(keyword("static")), name(name_text), punctuation(";")).into_node()
}

pub fn compilation_unit(usings: Vec<Arc<SyntaxNode>>, members: Vec<Arc<SyntaxNode>>) -> Arc<SyntaxNode> {
    CompilationUnit::new(node_list(usings), node_list(members), end_of_file()).into_node()
}

pub fn namespace_declaration(
    name_text: &str,
    usings: Vec<Arc<SyntaxNode>>,
    members: Vec<Arc<SyntaxNode>>,
) -> Arc<SyntaxNode> {
    NamespaceDeclaration::new(
        keyword("namespace"),
        name(name_text),
        punctuation("{"),
        node_list(usings),
        node_list(members),
        punctuation("}"),
    )
    .into_node()
}

pub fn class_declaration(modifier_keywords: &[&str], identifier_text: &str, members: Vec<Arc<SyntaxNode>>) -> Arc<SyntaxNode> {
    ClassDeclaration::new(
        NodeList::new_with_ptr_kind(),
        modifiers(modifier_keywords),
        keyword("class"),
        identifier(identifier_text),
        None,
        None,
        punctuation("{"),
        node_list(members),
        punctuation("}"),
    )
    .into_node()
}

pub fn interface_declaration(modifier_keywords: &[&str], identifier_text: &str, members: Vec<Arc<SyntaxNode>>) -> Arc<SyntaxNode> {
    InterfaceDeclaration::new(
        NodeList::new_with_ptr_kind(),
        modifiers(modifier_keywords),
        keyword("interface"),
        identifier(identifier_text),
        None,
        None,
        punctuation("{"),
        node_list(members),
        punctuation("}"),
    )
    .into_node()
}

pub fn enum_declaration(modifier_keywords: &[&str], identifier_text: &str, members: &[&str]) -> Arc<SyntaxNode> {
    let members = members
        .iter()
        .map(|m| EnumMemberDeclaration::new(NodeList::new_with_ptr_kind(), identifier(*m), None).into_node())
        .collect();
    EnumDeclaration::new(
        NodeList::new_with_ptr_kind(),
        modifiers(modifier_keywords),
        keyword("enum"),
        identifier(identifier_text),
        None,
        punctuation("{"),
        comma_list(members),
        punctuation("}"),
    )
    .into_node()
}

/// `: A, B` for class and interface declarations.
pub fn base_list(types: Vec<Arc<SyntaxNode>>) -> Arc<SyntaxNode> {
    let types = types.into_iter().map(|t| super::SimpleBaseType::new(t).into_node()).collect();
    super::BaseList::new(punctuation(":"), comma_list(types)).into_node()
}

/// A method with a block body, or an abstract one ending in `;` when `body`
/// is `None`.
pub fn method_declaration(
    modifier_keywords: &[&str],
    return_type: Arc<SyntaxNode>,
    identifier_text: &str,
    parameters: Vec<Arc<SyntaxNode>>,
    body: Option<Arc<SyntaxNode>>,
) -> Arc<SyntaxNode> {
    let semicolon = if body.is_none() { Some(punctuation(";")) } else { None };
    MethodDeclaration::new(
        NodeList::new_with_ptr_kind(),
        modifiers(modifier_keywords),
        return_type,
        identifier(identifier_text),
        None,
        parameter_list(parameters),
        body,
        semicolon,
    )
    .into_node()
}

pub fn constructor_declaration(
    modifier_keywords: &[&str],
    identifier_text: &str,
    parameters: Vec<Arc<SyntaxNode>>,
    body: Arc<SyntaxNode>,
) -> Arc<SyntaxNode> {
    ConstructorDeclaration::new(
        NodeList::new_with_ptr_kind(),
        modifiers(modifier_keywords),
        identifier(identifier_text),
        parameter_list(parameters),
        Some(body),
        None,
    )
    .into_node()
}

pub fn parameter_list(parameters: Vec<Arc<SyntaxNode>>) -> Arc<SyntaxNode> {
    ParameterList::new(punctuation("("), comma_list(parameters), punctuation(")")).into_node()
}

pub fn parameter(parameter_type: Arc<SyntaxNode>, identifier_text: &str) -> Arc<SyntaxNode> {
    Parameter::new(
        NodeList::new_with_ptr_kind(),
        TokenList::new_with_ptr_kind(),
        parameter_type,
        identifier(identifier_text),
        None,
    )
    .into_node()
}

/// Auto-property `{ get; set; }`.
pub fn property_declaration(modifier_keywords: &[&str], property_type: Arc<SyntaxNode>, identifier_text: &str) -> Arc<SyntaxNode> {
    let accessors = AccessorList::new(
        punctuation("{"),
        node_list(vec![accessor_declaration("get", None), accessor_declaration("set", None)]),
        punctuation("}"),
    )
    .into_node();
    PropertyDeclaration::new(
        NodeList::new_with_ptr_kind(),
        modifiers(modifier_keywords),
        property_type,
        identifier(identifier_text),
        accessors,
    )
    .into_node()
}

pub fn accessor_declaration(keyword_text: &str, body: Option<Arc<SyntaxNode>>) -> Arc<SyntaxNode> {
    let semicolon = if body.is_none() { Some(punctuation(";")) } else { None };
    AccessorDeclaration::new(TokenList::new_with_ptr_kind(), keyword(keyword_text), body, semicolon).into_node()
}

pub fn field_declaration(
    modifier_keywords: &[&str],
    field_type: Arc<SyntaxNode>,
    identifier_text: &str,
    initializer: Option<Arc<SyntaxNode>>,
) -> Arc<SyntaxNode> {
    FieldDeclaration::new(
        NodeList::new_with_ptr_kind(),
        modifiers(modifier_keywords),
        variable_declaration(field_type, identifier_text, initializer),
        punctuation(";"),
    )
    .into_node()
}

pub fn variable_declaration(
    variable_type: Arc<SyntaxNode>,
    identifier_text: &str,
    initializer: Option<Arc<SyntaxNode>>,
) -> Arc<SyntaxNode> {
    let initializer = initializer.map(|value| EqualsValueClause::new(operator("="), value).into_node());
    let declarator = VariableDeclarator::new(identifier(identifier_text), initializer).into_node();
    VariableDeclaration::new(variable_type, comma_list(vec![declarator])).into_node()
}

pub fn attribute_list(names: &[&str]) -> Arc<SyntaxNode> {
    let attributes = names.iter().map(|n| Attribute::new(name(n), None).into_node()).collect();
    AttributeList::new(punctuation("["), comma_list(attributes), punctuation("]")).into_node()
}

// ---------------------------------------------------------------------------
// Statements
// ---------------------------------------------------------------------------

pub fn block(statements: Vec<Arc<SyntaxNode>>) -> Arc<SyntaxNode> {
    Block::new(punctuation("{"), node_list(statements), punctuation("}")).into_node()
}

pub fn expression_statement(expression: Arc<SyntaxNode>) -> Arc<SyntaxNode> {
    ExpressionStatement::new(expression, punctuation(";")).into_node()
}

pub fn return_statement(expression: Option<Arc<SyntaxNode>>) -> Arc<SyntaxNode> {
    ReturnStatement::new(keyword("return"), expression, punctuation(";")).into_node()
}

pub fn local_declaration(
    variable_type: Arc<SyntaxNode>,
    identifier_text: &str,
    initializer: Option<Arc<SyntaxNode>>,
) -> Arc<SyntaxNode> {
    LocalDeclarationStatement::new(variable_declaration(variable_type, identifier_text, initializer), punctuation(";")).into_node()
}

pub fn if_statement(
    condition: Arc<SyntaxNode>,
    statement: Arc<SyntaxNode>,
    else_statement: Option<Arc<SyntaxNode>>,
) -> Arc<SyntaxNode> {
    let else_clause = else_statement.map(|s| ElseClause::new(keyword("else"), s).into_node());
    IfStatement::new(keyword("if"), punctuation("("), condition, punctuation(")"), statement, else_clause).into_node()
}

pub fn while_statement(condition: Arc<SyntaxNode>, statement: Arc<SyntaxNode>) -> Arc<SyntaxNode> {
    WhileStatement::new(keyword("while"), punctuation("("), condition, punctuation(")"), statement).into_node()
}

pub fn foreach_statement(
    variable_type: Arc<SyntaxNode>,
    identifier_text: &str,
    expression: Arc<SyntaxNode>,
    statement: Arc<SyntaxNode>,
) -> Arc<SyntaxNode> {
    ForEachStatement::new(
        keyword("foreach"),
        punctuation("("),
        variable_type,
        identifier(identifier_text),
        keyword("in"),
        expression,
        punctuation(")"),
        statement,
    )
    .into_node()
}

// ---------------------------------------------------------------------------
// Expressions
// ---------------------------------------------------------------------------

/// A quoted, escaped string literal.
pub fn string_literal(value: &str) -> Arc<SyntaxNode> {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    LiteralExpression::new(token(TokenKind::StringLiteral, format!("\"{}\"", escaped))).into_node()
}

pub fn numeric_literal(value: impl Display) -> Arc<SyntaxNode> {
    LiteralExpression::new(token(TokenKind::NumericLiteral, value.to_string())).into_node()
}

/// `true`, `false` or `null`.
pub fn keyword_literal(text: &str) -> Arc<SyntaxNode> {
    LiteralExpression::new(keyword(text)).into_node()
}

pub fn this_expression() -> Arc<SyntaxNode> {
    ThisExpression::new(keyword("this")).into_node()
}

pub fn parenthesized(expression: Arc<SyntaxNode>) -> Arc<SyntaxNode> {
    ParenthesizedExpression::new(punctuation("("), expression, punctuation(")")).into_node()
}

pub fn binary(left: Arc<SyntaxNode>, operator_text: &str, right: Arc<SyntaxNode>) -> Arc<SyntaxNode> {
    BinaryExpression::new(left, operator(operator_text), right).into_node()
}

pub fn prefix_unary(operator_text: &str, operand: Arc<SyntaxNode>) -> Arc<SyntaxNode> {
    PrefixUnaryExpression::new(operator(operator_text), operand).into_node()
}

pub fn assignment(left: Arc<SyntaxNode>, right: Arc<SyntaxNode>) -> Arc<SyntaxNode> {
    AssignmentExpression::new(left, operator("="), right).into_node()
}

pub fn argument(expression: Arc<SyntaxNode>) -> Arc<SyntaxNode> {
    Argument::new(None, expression).into_node()
}

pub fn argument_list(arguments: Vec<Arc<SyntaxNode>>) -> Arc<SyntaxNode> {
    let arguments = arguments.into_iter().map(argument).collect();
    ArgumentList::new(punctuation("("), comma_list(arguments), punctuation(")")).into_node()
}

/// `expression(arguments...)`; each argument is wrapped in an `Argument`.
pub fn invocation(expression: Arc<SyntaxNode>, arguments: Vec<Arc<SyntaxNode>>) -> Arc<SyntaxNode> {
    InvocationExpression::new(expression, argument_list(arguments)).into_node()
}

pub fn member_access(expression: Arc<SyntaxNode>, member: &str) -> Arc<SyntaxNode> {
    MemberAccessExpression::new(expression, punctuation("."), identifier_name(member)).into_node()
}

/// `Console.WriteLine` style dotted access built from plain identifiers.
pub fn member_access_path(dotted: &str) -> Arc<SyntaxNode> {
    let mut parts = dotted.split('.');
    let first = identifier_name(parts.next().unwrap_or_default());
    parts.fold(first, member_access)
}

pub fn object_creation(created_type: Arc<SyntaxNode>, arguments: Vec<Arc<SyntaxNode>>) -> Arc<SyntaxNode> {
    ObjectCreationExpression::new(keyword("new"), created_type, Some(argument_list(arguments))).into_node()
}

// ---------------------------------------------------------------------------
// Documentation
// ---------------------------------------------------------------------------

fn exterior(blank_line: bool) -> TriviaList {
    let text = if blank_line { "///" } else { "/// " };
    trivia_list(vec![Arc::new(Trivia::new(TriviaKind::DocumentationExterior, text))])
}

fn xml_newline() -> SyntaxToken {
    token(TokenKind::XmlNewLine, "\n")
}

fn xml_text_line(line: &str) -> SyntaxToken {
    Arc::new(Token::new(TokenKind::XmlText, line).with_leading(exterior(line.is_empty())))
}

fn start_tag(name_text: &str, attributes: TokenList) -> Arc<SyntaxNode> {
    let less_than = Arc::new(Token::new(TokenKind::Punctuation, "<").with_leading(exterior(false)));
    XmlElementStartTag::new(less_than, token(TokenKind::XmlName, name_text), attributes, punctuation(">")).into_node()
}

fn end_tag(name_text: &str, own_line: bool) -> Arc<SyntaxNode> {
    let less_than_slash = if own_line {
        Arc::new(Token::new(TokenKind::Punctuation, "</").with_leading(exterior(false)))
    } else {
        punctuation("</")
    };
    XmlElementEndTag::new(less_than_slash, token(TokenKind::XmlName, name_text), punctuation(">")).into_node()
}

/// `<name>` and `</name>` on their own lines around `text`, one `///` line
/// per line of text.
pub fn xml_block_element(name_text: &str, text: &str) -> Arc<SyntaxNode> {
    let mut tokens = vec![xml_newline()];
    for line in text.lines() {
        tokens.push(xml_text_line(line));
        tokens.push(xml_newline());
    }
    let content = XmlText::new(token_list(tokens)).into_node();
    XmlElement::new(start_tag(name_text, TokenList::new_with_ptr_kind()), node_list(vec![content]), end_tag(name_text, true)).into_node()
}

/// `<name attribute="value">text</name>` on a single line.
pub fn xml_inline_element(name_text: &str, attribute: Option<(&str, &str)>, text: &str) -> Arc<SyntaxNode> {
    let attributes = attribute
        .map(|(key, value)| {
            let attribute_token = Token::new(TokenKind::XmlText, format!("{}=\"{}\"", key, value))
                .with_leading(trivia_list(vec![whitespace(" ")]));
            token_list(vec![Arc::new(attribute_token)])
        })
        .unwrap_or_default();
    let content = XmlText::new(token_list(vec![token(TokenKind::XmlText, text)])).into_node();
    XmlElement::new(start_tag(name_text, attributes), node_list(vec![content]), end_tag(name_text, false)).into_node()
}

/// Documentation comment trivia made of `elements`, each on its own line(s).
pub fn documentation_comment_from(elements: Vec<Arc<SyntaxNode>>) -> SyntaxTrivia {
    let content = elements
        .into_iter()
        .flat_map(|element| [element, XmlText::new(token_list(vec![xml_newline()])).into_node()])
        .collect();
    let structure = DocumentationComment::new(content, token(TokenKind::EndOfDocumentationComment, "")).into_node();
    Arc::new(Trivia::structured(TriviaKind::DocumentationComment, structure))
}

/// `/// <summary>` documentation trivia.
pub fn documentation_comment(summary: &str) -> SyntaxTrivia {
    documentation_comment_from(vec![xml_block_element("summary", summary)])
}
