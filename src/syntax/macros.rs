/// Declares the closed grammar.
///
/// For every `Kind { field: SlotType, ... }` entry this generates the node
/// struct (children plus opaque metadata), its `SyntaxKind` tag and
/// `SyntaxNode` variant, the default traversal step, metadata-blind
/// equality, ordered child enumeration, `with_<field>` setters, and the
/// typed `Rewriter::with_<kind>` / `without_<kind>` builder methods.
macro_rules! syntax_nodes {
    ($(
        $(#[$doc:meta])*
        $kind:ident { $( $field:ident : $ty:ty ),* $(,)? }
    ),* $(,)?) => {
        paste::paste! {
            /// Tag identifying the syntactic category of a node.
            #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
            pub enum SyntaxKind {
                $($kind,)*
            }

            impl SyntaxKind {
                /// Every kind, in declaration order.
                pub const ALL: &'static [SyntaxKind] = &[$(SyntaxKind::$kind,)*];

                pub fn name(self) -> &'static str {
                    match self {
                        $(SyntaxKind::$kind => stringify!($kind),)*
                    }
                }
            }

            $(
                $(#[$doc])*
                #[derive(Clone, serde::Serialize, serde::Deserialize)]
                pub struct $kind {
                    $(pub $field: $ty,)*
                    #[serde(skip)]
                    pub metadata: Option<std::sync::Arc<$crate::syntax::Metadata>>,
                }

                impl $kind {
                    pub const KIND: SyntaxKind = SyntaxKind::$kind;

                    #[allow(clippy::too_many_arguments)]
                    pub fn new($($field: $ty),*) -> Self {
                        $kind { $($field,)* metadata: None }
                    }

                    $(
                        pub fn [<with_ $field>](&self, $field: $ty) -> Self {
                            $kind { $field, ..self.clone() }
                        }
                    )*

                    pub fn with_metadata(&self, metadata: Option<std::sync::Arc<$crate::syntax::Metadata>>) -> Self {
                        $kind { metadata, ..self.clone() }
                    }

                    pub fn into_node(self) -> std::sync::Arc<SyntaxNode> {
                        std::sync::Arc::new(SyntaxNode::$kind(self))
                    }

                    /// Default traversal: `None` when no child changed identity.
                    pub(crate) fn walk(&self, rewriter: &$crate::rewriter::Rewriter) -> $crate::error::RewriteResult<Option<Self>> {
                        $(
                            let $field = <$ty as $crate::syntax::child::Child>::rewrite(
                                &self.$field, rewriter, SyntaxKind::$kind, stringify!($field),
                            )?;
                        )*
                        if true $(&& <$ty as $crate::syntax::child::Child>::same(&self.$field, &$field))* {
                            Ok(None)
                        } else {
                            Ok(Some($kind { $($field,)* metadata: self.metadata.clone() }))
                        }
                    }

                    fn collect_children<'a>(&'a self, out: &mut Vec<$crate::syntax::SyntaxElement<'a>>) {
                        $( <$ty as $crate::syntax::child::Child>::collect(&self.$field, out); )*
                    }
                }

                impl PartialEq for $kind {
                    fn eq(&self, other: &Self) -> bool {
                        true $(&& self.$field == other.$field)*
                    }
                }

                impl std::fmt::Debug for $kind {
                    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                        f.debug_struct(stringify!($kind))
                            $(.field(stringify!($field), &self.$field))*
                            .finish_non_exhaustive()
                    }
                }

                impl From<$kind> for SyntaxNode {
                    fn from(inner: $kind) -> Self {
                        SyntaxNode::$kind(inner)
                    }
                }
            )*

            /// A node of the closed grammar.
            #[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
            pub enum SyntaxNode {
                $($kind($kind),)*
            }

            impl SyntaxNode {
                pub fn kind(&self) -> SyntaxKind {
                    match self {
                        $(SyntaxNode::$kind(_) => SyntaxKind::$kind,)*
                    }
                }

                pub fn metadata(&self) -> Option<&std::sync::Arc<$crate::syntax::Metadata>> {
                    match self {
                        $(SyntaxNode::$kind(inner) => inner.metadata.as_ref(),)*
                    }
                }

                /// Copy of this node carrying `metadata` instead of its own.
                pub fn with_metadata(&self, metadata: Option<std::sync::Arc<$crate::syntax::Metadata>>) -> Self {
                    match self {
                        $(SyntaxNode::$kind(inner) => SyntaxNode::$kind(inner.with_metadata(metadata)),)*
                    }
                }

                /// Ordered children; separated lists interleave elements and separators.
                pub fn children_with_tokens(&self) -> Vec<$crate::syntax::SyntaxElement<'_>> {
                    let mut out = Vec::new();
                    match self {
                        $(SyntaxNode::$kind(inner) => inner.collect_children(&mut out),)*
                    }
                    out
                }

                pub(crate) fn walk_children(&self, rewriter: &$crate::rewriter::Rewriter) -> $crate::error::RewriteResult<Option<SyntaxNode>> {
                    match self {
                        $(SyntaxNode::$kind(inner) => Ok(inner.walk(rewriter)?.map(SyntaxNode::$kind)),)*
                    }
                }

                $(
                    pub fn [<as_ $kind:snake>](&self) -> Option<&$kind> {
                        match self {
                            SyntaxNode::$kind(inner) => Some(inner),
                            _ => None,
                        }
                    }
                )*
            }

            impl $crate::rewriter::Rewriter {
                $(
                    #[doc = concat!("Overrides traversal of `", stringify!($kind), "` nodes.")]
                    pub fn [<with_ $kind:snake>]<F>(&self, f: F) -> Self
                    where
                        F: Fn(&$crate::rewriter::Rewriter, &std::sync::Arc<SyntaxNode>, &$kind) -> $crate::rewriter::NodeResult
                            + Send + Sync + 'static,
                    {
                        self.with_kind(SyntaxKind::$kind, move |rewriter: &$crate::rewriter::Rewriter, node: &std::sync::Arc<SyntaxNode>| {
                            match &**node {
                                SyntaxNode::$kind(inner) => f(rewriter, node, inner),
                                _ => rewriter.walk(node),
                            }
                        })
                    }

                    pub fn [<without_ $kind:snake>](&self) -> Self {
                        self.without_kind(SyntaxKind::$kind)
                    }
                )*
            }
        }
    };
}
