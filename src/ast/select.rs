use crate::ast::{PathSegmentToken, QueryTokenKind};
use crate::visitor::SyntacticTreeVisitor;

/// `$select` clause.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectToken {
    terms: Vec<SelectTermToken>,
}

impl SelectToken {
    pub fn new(terms: Vec<SelectTermToken>) -> Self {
        SelectToken { terms }
    }

    pub fn terms(&self) -> &[SelectTermToken] {
        &self.terms
    }

    pub fn into_terms(self) -> Vec<SelectTermToken> {
        self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn kind(&self) -> QueryTokenKind {
        QueryTokenKind::Select
    }

    pub fn accept<V: SyntacticTreeVisitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_select(self)
    }
}

/// One `$select` item, optionally with a nested select.
///
/// # Example
/// ```text
/// Address($select=City)
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SelectTermToken {
    pub path: PathSegmentToken,
    pub select_option: Option<Box<SelectToken>>,
}

impl SelectTermToken {
    pub fn new(path: PathSegmentToken) -> Self {
        SelectTermToken {
            path,
            select_option: None,
        }
    }

    pub fn with_select(path: PathSegmentToken, select: SelectToken) -> Self {
        SelectTermToken {
            path,
            select_option: Some(Box::new(select)),
        }
    }

    pub fn kind(&self) -> QueryTokenKind {
        QueryTokenKind::SelectTerm
    }

    pub fn accept<V: SyntacticTreeVisitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_select_term(self)
    }
}
