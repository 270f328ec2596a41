pub mod ast;
pub mod cli;
pub mod error;
pub mod normalize;
pub mod output;
pub mod visitor;

pub use ast::{ExpandTermDraft, ExpandTermOptions, ExpandTermToken, ExpandToken, QueryToken, QueryTokenKind};
pub use error::TokenError;
pub use normalize::{normalize_expand_tree, ExpandTreeNormalizer};
pub use output::{to_json, to_json_string, to_query_text};
pub use visitor::SyntacticTreeVisitor;
