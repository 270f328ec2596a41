//! Double-dispatch visitor over the syntax tree.
//!
//! Every token exposes `accept`, which calls exactly one `visit_*` method on
//! the visitor and returns its result. Tokens never walk their own children;
//! a visitor that wants to descend calls `accept` on the children itself.
//!
//! Each `visit_*` method defaults to [`SyntacticTreeVisitor::visit_unsupported`],
//! so a visitor only overrides the kinds it handles.

use crate::ast::{
    AggregateExpressionToken, BinaryOperatorKind, ComputeExpressionToken, ComputeToken,
    ExpandTermToken, ExpandToken, LiteralValue, OrderByToken, PathSegmentToken, QueryToken,
    QueryTokenKind, SelectTermToken, SelectToken, UnaryOperatorKind,
};

pub trait SyntacticTreeVisitor {
    /// Result produced per visited node
    type Output;

    /// Called for every kind the visitor does not override.
    fn visit_unsupported(&mut self, kind: QueryTokenKind) -> Self::Output;

    // Structure

    fn visit_expand_term(&mut self, _token: &ExpandTermToken) -> Self::Output {
        self.visit_unsupported(QueryTokenKind::ExpandTerm)
    }

    fn visit_expand(&mut self, _token: &ExpandToken) -> Self::Output {
        self.visit_unsupported(QueryTokenKind::Expand)
    }

    fn visit_select(&mut self, _token: &SelectToken) -> Self::Output {
        self.visit_unsupported(QueryTokenKind::Select)
    }

    fn visit_select_term(&mut self, _token: &SelectTermToken) -> Self::Output {
        self.visit_unsupported(QueryTokenKind::SelectTerm)
    }

    fn visit_compute(&mut self, _token: &ComputeToken) -> Self::Output {
        self.visit_unsupported(QueryTokenKind::Compute)
    }

    fn visit_compute_expression(&mut self, _token: &ComputeExpressionToken) -> Self::Output {
        self.visit_unsupported(QueryTokenKind::ComputeExpression)
    }

    fn visit_order_by(&mut self, _token: &OrderByToken) -> Self::Output {
        self.visit_unsupported(QueryTokenKind::OrderBy)
    }

    fn visit_path_segment(&mut self, _token: &PathSegmentToken) -> Self::Output {
        self.visit_unsupported(QueryTokenKind::PathSegment)
    }

    // Expressions

    fn visit_literal(&mut self, _value: &LiteralValue) -> Self::Output {
        self.visit_unsupported(QueryTokenKind::Literal)
    }

    fn visit_end_path(&mut self, _identifier: &str, _parent: Option<&QueryToken>) -> Self::Output {
        self.visit_unsupported(QueryTokenKind::EndPath)
    }

    fn visit_binary_operator(
        &mut self,
        _op: BinaryOperatorKind,
        _left: &QueryToken,
        _right: &QueryToken,
    ) -> Self::Output {
        self.visit_unsupported(QueryTokenKind::BinaryOperator)
    }

    fn visit_unary_operator(&mut self, _op: UnaryOperatorKind, _operand: &QueryToken) -> Self::Output {
        self.visit_unsupported(QueryTokenKind::UnaryOperator)
    }

    fn visit_function_call(&mut self, _name: &str, _arguments: &[QueryToken]) -> Self::Output {
        self.visit_unsupported(QueryTokenKind::FunctionCall)
    }

    fn visit_star(&mut self) -> Self::Output {
        self.visit_unsupported(QueryTokenKind::Star)
    }

    fn visit_string_literal(&mut self, _text: &str) -> Self::Output {
        self.visit_unsupported(QueryTokenKind::StringLiteral)
    }

    fn visit_aggregate(&mut self, _expressions: &[AggregateExpressionToken]) -> Self::Output {
        self.visit_unsupported(QueryTokenKind::Aggregate)
    }

    fn visit_group_by(
        &mut self,
        _properties: &[QueryToken],
        _child: Option<&QueryToken>,
    ) -> Self::Output {
        self.visit_unsupported(QueryTokenKind::GroupBy)
    }
}
