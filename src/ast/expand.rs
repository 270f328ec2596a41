//! `$expand` clause and its terms.
//!
//! An [`ExpandTermToken`] is built once, possibly normalized through an
//! [`ExpandTermDraft`], and then handed downstream as an immutable value.

use crate::ast::{
    ComputeToken, OrderByToken, PathSegmentToken, QueryToken, QueryTokenKind, SelectToken,
};
use crate::error::TokenError;
use crate::visitor::SyntacticTreeVisitor;
use std::mem;
use std::ops::Deref;

/// `$levels` value of an expand term.
///
/// Values are not range checked here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelsOption {
    /// `$levels=N`
    Depth(i64),
    /// `$levels=max`
    Max,
}

/// Optional modifiers of an expand term, all absent by default.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExpandTermOptions {
    pub filter: Option<QueryToken>,
    pub order_by: Option<Vec<OrderByToken>>,
    pub top: Option<i64>,
    pub skip: Option<i64>,
    pub count: Option<bool>,
    pub levels: Option<LevelsOption>,
    pub search: Option<QueryToken>,
    pub select: Option<SelectToken>,
    pub compute: Option<ComputeToken>,
    pub apply: Option<Vec<QueryToken>>,
    pub expand: Option<ExpandToken>,
}

/// One navigation property of an `$expand` clause with its modifiers.
///
/// # Example
///
/// ```
/// use odata_expand::ast::{ExpandTermToken, PathSegmentToken, QueryTokenKind};
///
/// let term = ExpandTermToken::builder()
///     .path(PathSegmentToken::new("Orders", None))
///     .top(10)
///     .count(true)
///     .build()
///     .unwrap();
///
/// assert_eq!(term.kind(), QueryTokenKind::ExpandTerm);
/// assert_eq!(term.top_option(), Some(10));
/// assert!(term.filter_option().is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ExpandTermToken {
    path_to_navigation_prop: PathSegmentToken,
    filter_option: Option<QueryToken>,
    order_by_options: Option<Vec<OrderByToken>>,
    top_option: Option<i64>,
    skip_option: Option<i64>,
    count_query_option: Option<bool>,
    levels_option: Option<LevelsOption>,
    search_option: Option<QueryToken>,
    select_option: Option<SelectToken>,
    compute_option: Option<ComputeToken>,
    apply_options: Option<Vec<QueryToken>>,
    expand_option: Option<ExpandToken>,
}

impl ExpandTermToken {
    /// Assemble a term. Fails only when the navigation path is absent.
    pub fn new(
        path: impl Into<Option<PathSegmentToken>>,
        options: ExpandTermOptions,
    ) -> Result<Self, TokenError> {
        let path = path.into().ok_or(TokenError::missing("property"))?;
        let ExpandTermOptions {
            filter,
            order_by,
            top,
            skip,
            count,
            levels,
            search,
            select,
            compute,
            apply,
            expand,
        } = options;

        Ok(ExpandTermToken {
            path_to_navigation_prop: path,
            filter_option: filter,
            order_by_options: order_by,
            top_option: top,
            skip_option: skip,
            count_query_option: count,
            levels_option: levels,
            search_option: search,
            select_option: select,
            compute_option: compute,
            apply_options: apply,
            expand_option: expand,
        })
    }

    /// Term with no modifiers.
    pub fn from_path(path: impl Into<Option<PathSegmentToken>>) -> Result<Self, TokenError> {
        Self::new(path, ExpandTermOptions::default())
    }

    /// Term with only a nested select and a nested expand.
    pub fn with_select_and_expand(
        path: impl Into<Option<PathSegmentToken>>,
        select: Option<SelectToken>,
        expand: Option<ExpandToken>,
    ) -> Result<Self, TokenError> {
        Self::new(
            path,
            ExpandTermOptions {
                select,
                expand,
                ..ExpandTermOptions::default()
            },
        )
    }

    pub fn builder() -> ExpandTermBuilder {
        ExpandTermBuilder::default()
    }

    pub fn path_to_navigation_prop(&self) -> &PathSegmentToken {
        &self.path_to_navigation_prop
    }

    pub fn filter_option(&self) -> Option<&QueryToken> {
        self.filter_option.as_ref()
    }

    pub fn order_by_options(&self) -> Option<&[OrderByToken]> {
        self.order_by_options.as_deref()
    }

    pub fn top_option(&self) -> Option<i64> {
        self.top_option
    }

    pub fn skip_option(&self) -> Option<i64> {
        self.skip_option
    }

    pub fn count_query_option(&self) -> Option<bool> {
        self.count_query_option
    }

    pub fn levels_option(&self) -> Option<LevelsOption> {
        self.levels_option
    }

    pub fn search_option(&self) -> Option<&QueryToken> {
        self.search_option.as_ref()
    }

    pub fn select_option(&self) -> Option<&SelectToken> {
        self.select_option.as_ref()
    }

    pub fn compute_option(&self) -> Option<&ComputeToken> {
        self.compute_option.as_ref()
    }

    pub fn apply_options(&self) -> Option<&[QueryToken]> {
        self.apply_options.as_deref()
    }

    pub fn expand_option(&self) -> Option<&ExpandToken> {
        self.expand_option.as_ref()
    }

    /// True when no modifier is present.
    pub fn is_bare(&self) -> bool {
        self.filter_option.is_none()
            && self.order_by_options.is_none()
            && self.top_option.is_none()
            && self.skip_option.is_none()
            && self.count_query_option.is_none()
            && self.levels_option.is_none()
            && self.search_option.is_none()
            && self.select_option.is_none()
            && self.compute_option.is_none()
            && self.apply_options.is_none()
            && self.expand_option.is_none()
    }

    pub fn kind(&self) -> QueryTokenKind {
        QueryTokenKind::ExpandTerm
    }

    /// Hand this term to the visitor's expand term handler.
    ///
    /// Children are not visited; descending is up to the visitor.
    pub fn accept<V: SyntacticTreeVisitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_expand_term(self)
    }

    /// Reopen the term for normalization.
    ///
    /// Only the owner of the term can do this; a term shared behind a
    /// reference stays frozen.
    pub fn into_draft(self) -> ExpandTermDraft {
        ExpandTermDraft { term: self }
    }
}

/// Expand term under normalization.
///
/// Allows rebinding the navigation path, the nested select and the nested
/// expand. Every other field is read-only, through `Deref`.
#[derive(Debug)]
pub struct ExpandTermDraft {
    term: ExpandTermToken,
}

impl ExpandTermDraft {
    /// Replace the navigation path, returning the previous one.
    pub fn rebind_path(&mut self, path: PathSegmentToken) -> PathSegmentToken {
        mem::replace(&mut self.term.path_to_navigation_prop, path)
    }

    /// Replace the nested select, returning the previous one.
    pub fn rebind_select(&mut self, select: Option<SelectToken>) -> Option<SelectToken> {
        mem::replace(&mut self.term.select_option, select)
    }

    /// Replace the nested expand, returning the previous one.
    pub fn rebind_expand(&mut self, expand: Option<ExpandToken>) -> Option<ExpandToken> {
        mem::replace(&mut self.term.expand_option, expand)
    }

    pub fn freeze(self) -> ExpandTermToken {
        self.term
    }
}

impl Deref for ExpandTermDraft {
    type Target = ExpandTermToken;

    fn deref(&self) -> &Self::Target {
        &self.term
    }
}

/// Fluent construction of an [`ExpandTermToken`].
///
/// `build` delegates to [`ExpandTermToken::new`].
#[derive(Debug, Clone, Default)]
pub struct ExpandTermBuilder {
    path: Option<PathSegmentToken>,
    options: ExpandTermOptions,
}

impl ExpandTermBuilder {
    pub fn path(mut self, path: PathSegmentToken) -> Self {
        self.path = Some(path);
        self
    }

    pub fn filter(mut self, filter: QueryToken) -> Self {
        self.options.filter = Some(filter);
        self
    }

    pub fn order_by(mut self, order_by: Vec<OrderByToken>) -> Self {
        self.options.order_by = Some(order_by);
        self
    }

    pub fn top(mut self, top: i64) -> Self {
        self.options.top = Some(top);
        self
    }

    pub fn skip(mut self, skip: i64) -> Self {
        self.options.skip = Some(skip);
        self
    }

    pub fn count(mut self, count: bool) -> Self {
        self.options.count = Some(count);
        self
    }

    pub fn levels(mut self, levels: LevelsOption) -> Self {
        self.options.levels = Some(levels);
        self
    }

    pub fn search(mut self, search: QueryToken) -> Self {
        self.options.search = Some(search);
        self
    }

    pub fn select(mut self, select: SelectToken) -> Self {
        self.options.select = Some(select);
        self
    }

    pub fn compute(mut self, compute: ComputeToken) -> Self {
        self.options.compute = Some(compute);
        self
    }

    pub fn apply(mut self, apply: Vec<QueryToken>) -> Self {
        self.options.apply = Some(apply);
        self
    }

    pub fn expand(mut self, expand: ExpandToken) -> Self {
        self.options.expand = Some(expand);
        self
    }

    pub fn build(self) -> Result<ExpandTermToken, TokenError> {
        ExpandTermToken::new(self.path, self.options)
    }
}

/// `$expand` clause: an ordered list of expand terms.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExpandToken {
    terms: Vec<ExpandTermToken>,
}

impl ExpandToken {
    pub fn new(terms: Vec<ExpandTermToken>) -> Self {
        ExpandToken { terms }
    }

    pub fn terms(&self) -> &[ExpandTermToken] {
        &self.terms
    }

    pub fn into_terms(self) -> Vec<ExpandTermToken> {
        self.terms
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ExpandTermToken> {
        self.terms.iter()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn kind(&self) -> QueryTokenKind {
        QueryTokenKind::Expand
    }

    pub fn accept<V: SyntacticTreeVisitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_expand(self)
    }
}

impl FromIterator<ExpandTermToken> for ExpandToken {
    fn from_iter<I: IntoIterator<Item = ExpandTermToken>>(iter: I) -> Self {
        ExpandToken::new(iter.into_iter().collect())
    }
}

impl IntoIterator for ExpandToken {
    type Item = ExpandTermToken;
    type IntoIter = std::vec::IntoIter<ExpandTermToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.into_iter()
    }
}

impl<'a> IntoIterator for &'a ExpandToken {
    type Item = &'a ExpandTermToken;
    type IntoIter = std::slice::Iter<'a, ExpandTermToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}
