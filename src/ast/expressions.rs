use crate::ast::{BinaryOperatorKind, QueryTokenKind, UnaryOperatorKind};
use crate::visitor::SyntacticTreeVisitor;
use rust_decimal::Decimal;

/// Constant value appearing in an expression or a key segment.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// `null`
    Null,

    /// `true` / `false`
    Boolean(bool),

    /// Integer literal
    ///
    /// # Example
    /// ```text
    /// 42
    /// ```
    Int64(i64),

    /// Floating-point literal
    Double(f64),

    /// Exact decimal literal
    ///
    /// # Example
    /// ```text
    /// 19.99
    /// ```
    Decimal(Decimal),

    /// String literal, stored unescaped
    ///
    /// # Example
    /// ```text
    /// 'O''Neil'
    /// ```
    String(String),
}

/// Expression token used by `$filter`, `$search`, `$orderby`, `$compute`
/// and `$apply`.
///
/// Operands are owned, so an expression is always a tree.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryToken {
    /// Constant value
    Literal(LiteralValue),

    /// Property access
    ///
    /// `parent` is the path leading up to `identifier`, if any.
    ///
    /// # Example
    /// ```text
    /// Customer/Name
    /// ```
    EndPath {
        identifier: String,
        parent: Option<Box<QueryToken>>,
    },

    /// Binary operation
    ///
    /// # Example
    /// ```text
    /// Amount gt 100
    /// ```
    BinaryOperator {
        op: BinaryOperatorKind,
        left: Box<QueryToken>,
        right: Box<QueryToken>,
    },

    /// Unary operation
    ///
    /// # Example
    /// ```text
    /// not Shipped
    /// ```
    UnaryOperator {
        op: UnaryOperatorKind,
        operand: Box<QueryToken>,
    },

    /// Function call
    ///
    /// # Example
    /// ```text
    /// contains(Name,'bike')
    /// ```
    FunctionCall {
        name: String,
        arguments: Vec<QueryToken>,
    },

    /// Wildcard
    Star,

    /// Free-text `$search` term
    StringLiteral(String),

    /// Aggregation step of an `$apply` pipeline
    ///
    /// # Example
    /// ```text
    /// aggregate(Amount with sum as Total)
    /// ```
    Aggregate(Vec<AggregateExpressionToken>),

    /// Grouping step of an `$apply` pipeline
    ///
    /// # Example
    /// ```text
    /// groupby((Category),aggregate(Amount with sum as Total))
    /// ```
    GroupBy {
        properties: Vec<QueryToken>,
        child: Option<Box<QueryToken>>,
    },
}

impl QueryToken {
    pub fn literal(value: LiteralValue) -> Self {
        QueryToken::Literal(value)
    }

    /// Property access without a parent path.
    pub fn end_path(identifier: impl Into<String>) -> Self {
        QueryToken::EndPath {
            identifier: identifier.into(),
            parent: None,
        }
    }

    pub fn binary(op: BinaryOperatorKind, left: QueryToken, right: QueryToken) -> Self {
        QueryToken::BinaryOperator {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn unary(op: UnaryOperatorKind, operand: QueryToken) -> Self {
        QueryToken::UnaryOperator {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn call(name: impl Into<String>, arguments: Vec<QueryToken>) -> Self {
        QueryToken::FunctionCall {
            name: name.into(),
            arguments,
        }
    }

    pub fn search(term: impl Into<String>) -> Self {
        QueryToken::StringLiteral(term.into())
    }

    pub fn kind(&self) -> QueryTokenKind {
        match self {
            QueryToken::Literal(_) => QueryTokenKind::Literal,
            QueryToken::EndPath { .. } => QueryTokenKind::EndPath,
            QueryToken::BinaryOperator { .. } => QueryTokenKind::BinaryOperator,
            QueryToken::UnaryOperator { .. } => QueryTokenKind::UnaryOperator,
            QueryToken::FunctionCall { .. } => QueryTokenKind::FunctionCall,
            QueryToken::Star => QueryTokenKind::Star,
            QueryToken::StringLiteral(_) => QueryTokenKind::StringLiteral,
            QueryToken::Aggregate(_) => QueryTokenKind::Aggregate,
            QueryToken::GroupBy { .. } => QueryTokenKind::GroupBy,
        }
    }

    /// Dispatch to the visitor handler matching this variant.
    pub fn accept<V: SyntacticTreeVisitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        match self {
            QueryToken::Literal(value) => visitor.visit_literal(value),
            QueryToken::EndPath { identifier, parent } => {
                visitor.visit_end_path(identifier, parent.as_deref())
            }
            QueryToken::BinaryOperator { op, left, right } => {
                visitor.visit_binary_operator(*op, left, right)
            }
            QueryToken::UnaryOperator { op, operand } => visitor.visit_unary_operator(*op, operand),
            QueryToken::FunctionCall { name, arguments } => {
                visitor.visit_function_call(name, arguments)
            }
            QueryToken::Star => visitor.visit_star(),
            QueryToken::StringLiteral(text) => visitor.visit_string_literal(text),
            QueryToken::Aggregate(expressions) => visitor.visit_aggregate(expressions),
            QueryToken::GroupBy { properties, child } => {
                visitor.visit_group_by(properties, child.as_deref())
            }
        }
    }
}

/// Aggregation method used by `with` in an aggregate expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationMethod {
    Sum,
    Min,
    Max,
    Average,
    CountDistinct,
    /// `$count` virtual property
    VirtualPropertyCount,
}

impl AggregationMethod {
    pub fn keyword(self) -> &'static str {
        match self {
            AggregationMethod::Sum => "sum",
            AggregationMethod::Min => "min",
            AggregationMethod::Max => "max",
            AggregationMethod::Average => "average",
            AggregationMethod::CountDistinct => "countdistinct",
            AggregationMethod::VirtualPropertyCount => "count",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "sum" => Some(AggregationMethod::Sum),
            "min" => Some(AggregationMethod::Min),
            "max" => Some(AggregationMethod::Max),
            "average" => Some(AggregationMethod::Average),
            "countdistinct" => Some(AggregationMethod::CountDistinct),
            "count" => Some(AggregationMethod::VirtualPropertyCount),
            _ => None,
        }
    }
}

/// One `expression with method as alias` item of an aggregate step.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateExpressionToken {
    pub expression: QueryToken,
    pub method: AggregationMethod,
    pub alias: String,
}

impl AggregateExpressionToken {
    pub fn new(expression: QueryToken, method: AggregationMethod, alias: impl Into<String>) -> Self {
        AggregateExpressionToken {
            expression,
            method,
            alias: alias.into(),
        }
    }
}
