use crate::ast::{QueryToken, QueryTokenKind};
use crate::visitor::SyntacticTreeVisitor;

/// Sort direction of an `$orderby` item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderByDirection {
    #[default]
    Ascending,
    Descending,
}

impl OrderByDirection {
    pub fn keyword(self) -> &'static str {
        match self {
            OrderByDirection::Ascending => "asc",
            OrderByDirection::Descending => "desc",
        }
    }
}

/// One `$orderby` item.
///
/// # Example
/// ```text
/// Amount desc
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OrderByToken {
    pub expression: QueryToken,
    pub direction: OrderByDirection,
}

impl OrderByToken {
    pub fn new(expression: QueryToken, direction: OrderByDirection) -> Self {
        OrderByToken {
            expression,
            direction,
        }
    }

    pub fn kind(&self) -> QueryTokenKind {
        QueryTokenKind::OrderBy
    }

    pub fn accept<V: SyntacticTreeVisitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_order_by(self)
    }
}
