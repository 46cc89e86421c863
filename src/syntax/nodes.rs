use std::sync::Arc;

use super::{NodeList, SeparatedList, SyntaxElement, SyntaxToken, TokenList};

syntax_nodes! {
    /// Root of a source file.
    CompilationUnit {
        usings: NodeList,
        members: NodeList,
        end_of_file: SyntaxToken,
    },
    /// `using System.Text;` or `using static System.Math;`
    UsingDirective {
        using_keyword: SyntaxToken,
        static_keyword: Option<SyntaxToken>,
        name: Arc<SyntaxNode>,
        semicolon: SyntaxToken,
    },
    NamespaceDeclaration {
        namespace_keyword: SyntaxToken,
        name: Arc<SyntaxNode>,
        open_brace: SyntaxToken,
        usings: NodeList,
        members: NodeList,
        close_brace: SyntaxToken,
    },
    ClassDeclaration {
        attribute_lists: NodeList,
        modifiers: TokenList,
        keyword: SyntaxToken,
        identifier: SyntaxToken,
        type_parameter_list: Option<Arc<SyntaxNode>>,
        base_list: Option<Arc<SyntaxNode>>,
        open_brace: SyntaxToken,
        members: NodeList,
        close_brace: SyntaxToken,
    },
    InterfaceDeclaration {
        attribute_lists: NodeList,
        modifiers: TokenList,
        keyword: SyntaxToken,
        identifier: SyntaxToken,
        type_parameter_list: Option<Arc<SyntaxNode>>,
        base_list: Option<Arc<SyntaxNode>>,
        open_brace: SyntaxToken,
        members: NodeList,
        close_brace: SyntaxToken,
    },
    EnumDeclaration {
        attribute_lists: NodeList,
        modifiers: TokenList,
        enum_keyword: SyntaxToken,
        identifier: SyntaxToken,
        base_list: Option<Arc<SyntaxNode>>,
        open_brace: SyntaxToken,
        members: SeparatedList,
        close_brace: SyntaxToken,
    },
    EnumMemberDeclaration {
        attribute_lists: NodeList,
        identifier: SyntaxToken,
        equals_value: Option<Arc<SyntaxNode>>,
    },
    /// A method; `body` is absent for abstract and interface members, which
    /// end in `semicolon` instead.
    MethodDeclaration {
        attribute_lists: NodeList,
        modifiers: TokenList,
        return_type: Arc<SyntaxNode>,
        identifier: SyntaxToken,
        type_parameter_list: Option<Arc<SyntaxNode>>,
        parameter_list: Arc<SyntaxNode>,
        body: Option<Arc<SyntaxNode>>,
        semicolon: Option<SyntaxToken>,
    },
    ConstructorDeclaration {
        attribute_lists: NodeList,
        modifiers: TokenList,
        identifier: SyntaxToken,
        parameter_list: Arc<SyntaxNode>,
        body: Option<Arc<SyntaxNode>>,
        semicolon: Option<SyntaxToken>,
    },
    PropertyDeclaration {
        attribute_lists: NodeList,
        modifiers: TokenList,
        property_type: Arc<SyntaxNode>,
        identifier: SyntaxToken,
        accessor_list: Arc<SyntaxNode>,
    },
    AccessorList {
        open_brace: SyntaxToken,
        accessors: NodeList,
        close_brace: SyntaxToken,
    },
    /// `get;`, `private set { ... }`
    AccessorDeclaration {
        modifiers: TokenList,
        keyword: SyntaxToken,
        body: Option<Arc<SyntaxNode>>,
        semicolon: Option<SyntaxToken>,
    },
    FieldDeclaration {
        attribute_lists: NodeList,
        modifiers: TokenList,
        declaration: Arc<SyntaxNode>,
        semicolon: SyntaxToken,
    },
    VariableDeclaration {
        variable_type: Arc<SyntaxNode>,
        variables: SeparatedList,
    },
    VariableDeclarator {
        identifier: SyntaxToken,
        initializer: Option<Arc<SyntaxNode>>,
    },
    EqualsValueClause {
        equals: SyntaxToken,
        value: Arc<SyntaxNode>,
    },
    ParameterList {
        open_paren: SyntaxToken,
        parameters: SeparatedList,
        close_paren: SyntaxToken,
    },
    Parameter {
        attribute_lists: NodeList,
        modifiers: TokenList,
        parameter_type: Arc<SyntaxNode>,
        identifier: SyntaxToken,
        default_value: Option<Arc<SyntaxNode>>,
    },
    TypeParameterList {
        less_than: SyntaxToken,
        parameters: SeparatedList,
        greater_than: SyntaxToken,
    },
    TypeParameter {
        identifier: SyntaxToken,
    },
    BaseList {
        colon: SyntaxToken,
        types: SeparatedList,
    },
    SimpleBaseType {
        base_type: Arc<SyntaxNode>,
    },
    AttributeList {
        open_bracket: SyntaxToken,
        attributes: SeparatedList,
        close_bracket: SyntaxToken,
    },
    Attribute {
        name: Arc<SyntaxNode>,
        argument_list: Option<Arc<SyntaxNode>>,
    },
    IdentifierName {
        identifier: SyntaxToken,
    },
    /// `left.right`; `left` may itself be qualified.
    QualifiedName {
        left: Arc<SyntaxNode>,
        dot: SyntaxToken,
        right: Arc<SyntaxNode>,
    },
    GenericName {
        identifier: SyntaxToken,
        type_argument_list: Arc<SyntaxNode>,
    },
    TypeArgumentList {
        less_than: SyntaxToken,
        arguments: SeparatedList,
        greater_than: SyntaxToken,
    },
    PredefinedType {
        keyword: SyntaxToken,
    },
    Block {
        open_brace: SyntaxToken,
        statements: NodeList,
        close_brace: SyntaxToken,
    },
    LocalDeclarationStatement {
        declaration: Arc<SyntaxNode>,
        semicolon: SyntaxToken,
    },
    ExpressionStatement {
        expression: Arc<SyntaxNode>,
        semicolon: SyntaxToken,
    },
    ReturnStatement {
        return_keyword: SyntaxToken,
        expression: Option<Arc<SyntaxNode>>,
        semicolon: SyntaxToken,
    },
    IfStatement {
        if_keyword: SyntaxToken,
        open_paren: SyntaxToken,
        condition: Arc<SyntaxNode>,
        close_paren: SyntaxToken,
        statement: Arc<SyntaxNode>,
        else_clause: Option<Arc<SyntaxNode>>,
    },
    ElseClause {
        else_keyword: SyntaxToken,
        statement: Arc<SyntaxNode>,
    },
    WhileStatement {
        while_keyword: SyntaxToken,
        open_paren: SyntaxToken,
        condition: Arc<SyntaxNode>,
        close_paren: SyntaxToken,
        statement: Arc<SyntaxNode>,
    },
    ForEachStatement {
        foreach_keyword: SyntaxToken,
        open_paren: SyntaxToken,
        variable_type: Arc<SyntaxNode>,
        identifier: SyntaxToken,
        in_keyword: SyntaxToken,
        expression: Arc<SyntaxNode>,
        close_paren: SyntaxToken,
        statement: Arc<SyntaxNode>,
    },
    /// Numeric, string, character, `true`, `false` and `null` literals.
    LiteralExpression {
        token: SyntaxToken,
    },
    ThisExpression {
        this_keyword: SyntaxToken,
    },
    ParenthesizedExpression {
        open_paren: SyntaxToken,
        expression: Arc<SyntaxNode>,
        close_paren: SyntaxToken,
    },
    BinaryExpression {
        left: Arc<SyntaxNode>,
        operator: SyntaxToken,
        right: Arc<SyntaxNode>,
    },
    PrefixUnaryExpression {
        operator: SyntaxToken,
        operand: Arc<SyntaxNode>,
    },
    AssignmentExpression {
        left: Arc<SyntaxNode>,
        operator: SyntaxToken,
        right: Arc<SyntaxNode>,
    },
    InvocationExpression {
        expression: Arc<SyntaxNode>,
        argument_list: Arc<SyntaxNode>,
    },
    ArgumentList {
        open_paren: SyntaxToken,
        arguments: SeparatedList,
        close_paren: SyntaxToken,
    },
    Argument {
        ref_kind_keyword: Option<SyntaxToken>,
        expression: Arc<SyntaxNode>,
    },
    MemberAccessExpression {
        expression: Arc<SyntaxNode>,
        dot: SyntaxToken,
        name: Arc<SyntaxNode>,
    },
    ObjectCreationExpression {
        new_keyword: SyntaxToken,
        created_type: Arc<SyntaxNode>,
        argument_list: Option<Arc<SyntaxNode>>,
    },
    /// Structure of a `///` documentation comment trivia.
    DocumentationComment {
        content: NodeList,
        end_of_comment: SyntaxToken,
    },
    XmlElement {
        start_tag: Arc<SyntaxNode>,
        content: NodeList,
        end_tag: Arc<SyntaxNode>,
    },
    XmlElementStartTag {
        less_than: SyntaxToken,
        name: SyntaxToken,
        attributes: TokenList,
        greater_than: SyntaxToken,
    },
    XmlElementEndTag {
        less_than_slash: SyntaxToken,
        name: SyntaxToken,
        greater_than: SyntaxToken,
    },
    XmlText {
        text_tokens: TokenList,
    },
}

impl std::fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl SyntaxNode {
    pub fn into_node(self) -> Arc<SyntaxNode> {
        Arc::new(self)
    }

    /// Child nodes only, in order.
    pub fn child_nodes(&self) -> Vec<&Arc<SyntaxNode>> {
        self.children_with_tokens()
            .into_iter()
            .filter_map(|element| element.as_node())
            .collect()
    }

    /// Every descendant node in pre-order, excluding `self`. Does not enter trivia.
    pub fn descendant_nodes(&self) -> Vec<&Arc<SyntaxNode>> {
        let mut out = Vec::new();
        let mut stack: Vec<&Arc<SyntaxNode>> = self.child_nodes().into_iter().rev().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.child_nodes().into_iter().rev());
        }
        out
    }

    /// Every token in document order. Does not enter trivia.
    pub fn descendant_tokens(&self) -> Vec<&SyntaxToken> {
        let mut out = Vec::new();
        collect_tokens(self, &mut out);
        out
    }

    pub fn first_token(&self) -> Option<&SyntaxToken> {
        self.children_with_tokens().into_iter().find_map(|element| match element {
            SyntaxElement::Token(token) => Some(token),
            SyntaxElement::Node(node) => node.first_token(),
        })
    }

    /// Name declared by this node, for declarations that have one.
    pub fn declared_identifier(&self) -> Option<&SyntaxToken> {
        match self {
            SyntaxNode::ClassDeclaration(n) => Some(&n.identifier),
            SyntaxNode::InterfaceDeclaration(n) => Some(&n.identifier),
            SyntaxNode::EnumDeclaration(n) => Some(&n.identifier),
            SyntaxNode::EnumMemberDeclaration(n) => Some(&n.identifier),
            SyntaxNode::MethodDeclaration(n) => Some(&n.identifier),
            SyntaxNode::ConstructorDeclaration(n) => Some(&n.identifier),
            SyntaxNode::PropertyDeclaration(n) => Some(&n.identifier),
            SyntaxNode::VariableDeclarator(n) => Some(&n.identifier),
            SyntaxNode::Parameter(n) => Some(&n.identifier),
            SyntaxNode::TypeParameter(n) => Some(&n.identifier),
            _ => None,
        }
    }

    pub fn is_type_declaration(&self) -> bool {
        matches!(
            self.kind(),
            SyntaxKind::ClassDeclaration | SyntaxKind::InterfaceDeclaration | SyntaxKind::EnumDeclaration
        )
    }
}

fn collect_tokens<'a>(node: &'a SyntaxNode, out: &mut Vec<&'a SyntaxToken>) {
    for element in node.children_with_tokens() {
        match element {
            SyntaxElement::Token(token) => out.push(token),
            SyntaxElement::Node(child) => collect_tokens(child, out),
        }
    }
}

/// Dotted text of a name node (`System.Collections.Generic`, `List<int>`).
pub fn name_text(node: &SyntaxNode) -> String {
    match node {
        SyntaxNode::IdentifierName(n) => n.identifier.text.clone(),
        SyntaxNode::QualifiedName(n) => format!("{}.{}", name_text(&n.left), name_text(&n.right)),
        SyntaxNode::PredefinedType(n) => n.keyword.text.clone(),
        _ => node.descendant_tokens().iter().map(|t| t.text.as_str()).collect(),
    }
}
