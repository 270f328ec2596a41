use crate::ast::{QueryToken, QueryTokenKind};
use crate::visitor::SyntacticTreeVisitor;

/// `$compute` clause.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComputeToken {
    expressions: Vec<ComputeExpressionToken>,
}

impl ComputeToken {
    pub fn new(expressions: Vec<ComputeExpressionToken>) -> Self {
        ComputeToken { expressions }
    }

    pub fn expressions(&self) -> &[ComputeExpressionToken] {
        &self.expressions
    }

    pub fn kind(&self) -> QueryTokenKind {
        QueryTokenKind::Compute
    }

    pub fn accept<V: SyntacticTreeVisitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_compute(self)
    }
}

/// One computed property.
///
/// # Example
/// ```text
/// Price mul Quantity as Total
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ComputeExpressionToken {
    pub expression: QueryToken,
    pub alias: String,
}

impl ComputeExpressionToken {
    pub fn new(expression: QueryToken, alias: impl Into<String>) -> Self {
        ComputeExpressionToken {
            expression,
            alias: alias.into(),
        }
    }

    pub fn kind(&self) -> QueryTokenKind {
        QueryTokenKind::ComputeExpression
    }

    pub fn accept<V: SyntacticTreeVisitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_compute_expression(self)
    }
}
