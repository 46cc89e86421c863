//! Tree-to-tree helpers built on the rewriter: renaming, using-directive
//! list editing, statement appending, documentation and declaration context.

pub mod context;
pub mod documentation;
pub mod rename;
pub mod statements;
pub mod usings;

pub use context::{containing_declarations, containing_namespace, containing_types, fully_qualified_name, DeclarationContext};
pub use documentation::{attach_documentation, Documentation};
pub use rename::{method_renamer, rename_identifier, rename_tokens};
pub use statements::{append_statements, append_to_method_body};
pub use usings::{using_normalizer, UsingContainer};
