/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperatorKind {
    // Logical
    /// Logical OR (`or`)
    Or,
    /// Logical AND (`and`)
    And,

    // Comparison
    /// Equal (`eq`)
    Equal,
    /// Not equal (`ne`)
    NotEqual,
    /// Greater than (`gt`)
    GreaterThan,
    /// Greater than or equal (`ge`)
    GreaterThanOrEqual,
    /// Less than (`lt`)
    LessThan,
    /// Less than or equal (`le`)
    LessThanOrEqual,
    /// Enum flag test (`has`)
    Has,
    /// Membership (`in`)
    In,

    // Arithmetic
    /// Addition (`add`)
    Add,
    /// Subtraction (`sub`)
    Subtract,
    /// Multiplication (`mul`)
    Multiply,
    /// Division (`div`)
    Divide,
    /// Modulo (`mod`)
    Modulo,
}

impl BinaryOperatorKind {
    /// Keyword used in query text.
    pub fn keyword(self) -> &'static str {
        match self {
            BinaryOperatorKind::Or => "or",
            BinaryOperatorKind::And => "and",
            BinaryOperatorKind::Equal => "eq",
            BinaryOperatorKind::NotEqual => "ne",
            BinaryOperatorKind::GreaterThan => "gt",
            BinaryOperatorKind::GreaterThanOrEqual => "ge",
            BinaryOperatorKind::LessThan => "lt",
            BinaryOperatorKind::LessThanOrEqual => "le",
            BinaryOperatorKind::Has => "has",
            BinaryOperatorKind::In => "in",
            BinaryOperatorKind::Add => "add",
            BinaryOperatorKind::Subtract => "sub",
            BinaryOperatorKind::Multiply => "mul",
            BinaryOperatorKind::Divide => "div",
            BinaryOperatorKind::Modulo => "mod",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let op = match keyword {
            "or" => BinaryOperatorKind::Or,
            "and" => BinaryOperatorKind::And,
            "eq" => BinaryOperatorKind::Equal,
            "ne" => BinaryOperatorKind::NotEqual,
            "gt" => BinaryOperatorKind::GreaterThan,
            "ge" => BinaryOperatorKind::GreaterThanOrEqual,
            "lt" => BinaryOperatorKind::LessThan,
            "le" => BinaryOperatorKind::LessThanOrEqual,
            "has" => BinaryOperatorKind::Has,
            "in" => BinaryOperatorKind::In,
            "add" => BinaryOperatorKind::Add,
            "sub" => BinaryOperatorKind::Subtract,
            "mul" => BinaryOperatorKind::Multiply,
            "div" => BinaryOperatorKind::Divide,
            "mod" => BinaryOperatorKind::Modulo,
            _ => return None,
        };
        Some(op)
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperatorKind {
    /// Arithmetic negation (`-`)
    Negate,
    /// Logical negation (`not`)
    Not,
}

impl UnaryOperatorKind {
    pub fn keyword(self) -> &'static str {
        match self {
            UnaryOperatorKind::Negate => "-",
            UnaryOperatorKind::Not => "not",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "-" => Some(UnaryOperatorKind::Negate),
            "not" => Some(UnaryOperatorKind::Not),
            _ => None,
        }
    }
}
