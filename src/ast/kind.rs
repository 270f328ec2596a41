use std::fmt;

/// Discriminant shared by every syntax token.
///
/// Lets consumers tell node types apart without inspecting their shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryTokenKind {
    // Expressions
    /// Constant value
    Literal,
    /// Property access at the end of a member path
    EndPath,
    /// Binary operation (`Amount gt 100`)
    BinaryOperator,
    /// Unary operation (`not Shipped`)
    UnaryOperator,
    /// Function call (`contains(Name,'x')`)
    FunctionCall,
    /// Wildcard (`*`)
    Star,
    /// Free-text search term
    StringLiteral,
    /// `aggregate(...)` transformation
    Aggregate,
    /// `groupby(...)` transformation
    GroupBy,

    // Structure
    /// Segment chain naming a property or navigation property
    PathSegment,
    /// One `$orderby` item
    OrderBy,
    /// `$select` clause
    Select,
    /// One `$select` item
    SelectTerm,
    /// `$compute` clause
    Compute,
    /// One `$compute` item
    ComputeExpression,
    /// `$expand` clause
    Expand,
    /// One `$expand` item
    ExpandTerm,
}

impl QueryTokenKind {
    pub fn as_str(self) -> &'static str {
        match self {
            QueryTokenKind::Literal => "Literal",
            QueryTokenKind::EndPath => "EndPath",
            QueryTokenKind::BinaryOperator => "BinaryOperator",
            QueryTokenKind::UnaryOperator => "UnaryOperator",
            QueryTokenKind::FunctionCall => "FunctionCall",
            QueryTokenKind::Star => "Star",
            QueryTokenKind::StringLiteral => "StringLiteral",
            QueryTokenKind::Aggregate => "Aggregate",
            QueryTokenKind::GroupBy => "GroupBy",
            QueryTokenKind::PathSegment => "PathSegment",
            QueryTokenKind::OrderBy => "OrderBy",
            QueryTokenKind::Select => "Select",
            QueryTokenKind::SelectTerm => "SelectTerm",
            QueryTokenKind::Compute => "Compute",
            QueryTokenKind::ComputeExpression => "ComputeExpression",
            QueryTokenKind::Expand => "Expand",
            QueryTokenKind::ExpandTerm => "ExpandTerm",
        }
    }
}

impl fmt::Display for QueryTokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
