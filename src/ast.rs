//! # OData `$expand` - Syntactic Abstract Syntax Tree
//!
//! This module defines the syntax tokens produced when the `$expand` query
//! option of a resource URI is parsed. The tree is purely syntactic: nothing
//! here checks names or types against a data model.
//!
//! ## Architecture Overview
//!
//! The AST module is organized into focused submodules:
//!
//! - **[kind]** - The [`QueryTokenKind`] discriminant shared by every token
//! - **[expressions]** - Expression tokens used by filter, search, orderby, compute and apply
//! - **[operators]** - Binary and unary operator kinds
//! - **[path]** - Segment chains naming (navigation) properties
//! - **[order_by]** - `$orderby` items
//! - **[select]** - `$select` clauses and items
//! - **[compute]** - `$compute` clauses and items
//! - **[expand]** - `$expand` clauses and expand terms
//!
//! ## Quick Start
//!
//! ```text
//! $expand=Orders($filter=Amount gt 100;$top=10;$expand=Items($select=Sku))
//! ```
//!
//! This clause expands `Orders`, keeps orders above 100, pages to ten, and
//! inside each order expands `Items` selecting only `Sku`.
//!
//! ## Core Concepts
//!
//! ### Recursive Shape
//!
//! An [`ExpandToken`] holds [`ExpandTermToken`]s; an expand term may hold
//! another [`ExpandToken`] as its nested expand. Every child is owned, so
//! the structure is a tree, never a graph.
//!
//! ### Two-Phase Lifecycle
//!
//! A term is assembled once. During normalization its owner may reopen it
//! with [`ExpandTermToken::into_draft`] and rebind three fields: the
//! navigation path, the nested select and the nested expand. Freezing the
//! draft gives back an immutable term for downstream consumers.
//!
//! ### Traversal
//!
//! Every token has `kind()` and `accept()`. `accept` dispatches to one
//! method of a [`crate::visitor::SyntacticTreeVisitor`]; the visitor decides
//! whether and how to descend into children.
//!
//! ## Examples
//!
//! ### Nested Expansion
//!
//! ```
//! use odata_expand::ast::{ExpandTermToken, ExpandToken, PathSegmentToken};
//!
//! let items = ExpandTermToken::from_path(PathSegmentToken::new("Items", None)).unwrap();
//! let orders = ExpandTermToken::builder()
//!     .path(PathSegmentToken::new("Orders", None))
//!     .expand(ExpandToken::new(vec![items]))
//!     .build()
//!     .unwrap();
//!
//! let inner = &orders.expand_option().unwrap().terms()[0];
//! assert_eq!(inner.path_to_navigation_prop().identifier(), "Items");
//! assert!(inner.expand_option().is_none());
//! ```
pub mod compute;
pub mod expand;
pub mod expressions;
pub mod kind;
pub mod operators;
pub mod order_by;
pub mod path;
pub mod select;

pub use compute::{ComputeExpressionToken, ComputeToken};
pub use expand::{
    ExpandTermBuilder, ExpandTermDraft, ExpandTermOptions, ExpandTermToken, ExpandToken,
    LevelsOption,
};
pub use expressions::{AggregateExpressionToken, AggregationMethod, LiteralValue, QueryToken};
pub use kind::QueryTokenKind;
pub use operators::{BinaryOperatorKind, UnaryOperatorKind};
pub use order_by::{OrderByDirection, OrderByToken};
pub use path::{NamedValue, PathSegmentToken, SegmentKind, Segments};
pub use select::{SelectTermToken, SelectToken};
