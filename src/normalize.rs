//! Parse-time normalization of expand trees.
//!
//! Parsers collect path segments from the last one backwards and may see
//! the same navigation property expanded more than once, e.g.
//! `$expand=Orders($select=Id),Orders($expand=Items)`. Normalization fixes
//! both before the tree is frozen and handed to a binder:
//!
//! 1. **Path inversion** - every navigation path and select path is turned
//!    back into reading order.
//! 2. **Term combining** - terms with the same path are merged into the
//!    first occurrence. The first term's modifiers win; selects are
//!    unioned and nested expands are merged recursively.
//!
//! Only the three rebindable fields of a term are touched, through
//! [`ExpandTermDraft`](crate::ast::ExpandTermDraft).

use crate::ast::{ExpandTermToken, ExpandToken, PathSegmentToken, SelectTermToken, SelectToken};
use log::{debug, trace};

#[derive(Debug, Default, Clone, Copy)]
pub struct ExpandTreeNormalizer;

impl ExpandTreeNormalizer {
    pub fn new() -> Self {
        ExpandTreeNormalizer
    }

    /// Invert paths, then combine duplicate terms.
    pub fn normalize(&self, tree: ExpandToken) -> ExpandToken {
        debug!("normalizing expand clause with {} term(s)", tree.len());
        let inverted = self.invert_paths(tree);
        self.combine_terms(inverted)
    }

    /// Reverse every navigation path and select path, recursively.
    pub fn invert_paths(&self, tree: ExpandToken) -> ExpandToken {
        tree.into_iter().map(|term| self.invert_term(term)).collect()
    }

    fn invert_term(&self, term: ExpandTermToken) -> ExpandTermToken {
        let mut draft = term.into_draft();

        let inverted = draft
            .rebind_path(PathSegmentToken::new(String::new(), None))
            .reversed();
        trace!("inverted expand path to '{}'", inverted);
        draft.rebind_path(inverted);

        if let Some(select) = draft.rebind_select(None) {
            draft.rebind_select(Some(invert_select(select)));
        }
        if let Some(expand) = draft.rebind_expand(None) {
            draft.rebind_expand(Some(self.invert_paths(expand)));
        }
        draft.freeze()
    }

    /// Merge terms sharing a navigation path, at every level.
    ///
    /// Output keeps the order of first occurrences.
    pub fn combine_terms(&self, tree: ExpandToken) -> ExpandToken {
        let mut combined: Vec<ExpandTermToken> = Vec::with_capacity(tree.len());
        for term in tree {
            let existing = combined.iter().position(|e| {
                e.path_to_navigation_prop()
                    .same_path(term.path_to_navigation_prop())
            });
            match existing {
                Some(index) => {
                    let first = combined.remove(index);
                    combined.insert(index, merge_terms(first, term));
                }
                None => combined.push(term),
            }
        }

        combined
            .into_iter()
            .map(|term| self.combine_children(term))
            .collect()
    }

    fn combine_children(&self, term: ExpandTermToken) -> ExpandTermToken {
        let mut draft = term.into_draft();
        if let Some(expand) = draft.rebind_expand(None) {
            draft.rebind_expand(Some(self.combine_terms(expand)));
        }
        draft.freeze()
    }
}

/// Shorthand for `ExpandTreeNormalizer::new().normalize(tree)`.
pub fn normalize_expand_tree(tree: ExpandToken) -> ExpandToken {
    ExpandTreeNormalizer::new().normalize(tree)
}

fn invert_select(select: SelectToken) -> SelectToken {
    let terms = select
        .into_terms()
        .into_iter()
        .map(|term| SelectTermToken {
            path: term.path.reversed(),
            select_option: term
                .select_option
                .map(|nested| Box::new(invert_select(*nested))),
        })
        .collect();
    SelectToken::new(terms)
}

fn merge_terms(first: ExpandTermToken, duplicate: ExpandTermToken) -> ExpandTermToken {
    debug!(
        "combining duplicate expand term '{}'",
        first.path_to_navigation_prop()
    );

    let mut duplicate = duplicate.into_draft();
    let other_select = duplicate.rebind_select(None);
    let other_expand = duplicate.rebind_expand(None);

    let mut draft = first.into_draft();
    let select = union_selects(draft.rebind_select(None), other_select);
    draft.rebind_select(select);
    let expand = concat_expands(draft.rebind_expand(None), other_expand);
    draft.rebind_expand(expand);
    draft.freeze()
}

fn union_selects(first: Option<SelectToken>, second: Option<SelectToken>) -> Option<SelectToken> {
    match (first, second) {
        (None, second) => second,
        (first, None) => first,
        (Some(first), Some(second)) => {
            let mut terms = first.into_terms();
            for term in second.into_terms() {
                if !terms.contains(&term) {
                    terms.push(term);
                }
            }
            Some(SelectToken::new(terms))
        }
    }
}

fn concat_expands(first: Option<ExpandToken>, second: Option<ExpandToken>) -> Option<ExpandToken> {
    match (first, second) {
        (None, second) => second,
        (first, None) => first,
        (Some(first), Some(second)) => Some(first.into_iter().chain(second).collect()),
    }
}
