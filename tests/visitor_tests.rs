// tests/visitor_tests.rs

use odata_expand::ast::{
    BinaryOperatorKind, ExpandTermToken, ExpandToken, LiteralValue, OrderByDirection,
    OrderByToken, PathSegmentToken, QueryToken, QueryTokenKind, SelectTermToken, SelectToken,
    UnaryOperatorKind,
};
use odata_expand::visitor::SyntacticTreeVisitor;

fn path(identifier: &str) -> PathSegmentToken {
    PathSegmentToken::new(identifier, None)
}

fn term(identifier: &str) -> ExpandTermToken {
    ExpandTermToken::from_path(path(identifier)).unwrap()
}

/// Handles expand terms only and records every call.
#[derive(Default)]
struct SentinelVisitor {
    visited: Vec<String>,
    unsupported: Vec<QueryTokenKind>,
}

impl SyntacticTreeVisitor for SentinelVisitor {
    type Output = u32;

    fn visit_unsupported(&mut self, kind: QueryTokenKind) -> u32 {
        self.unsupported.push(kind);
        0
    }

    fn visit_expand_term(&mut self, token: &ExpandTermToken) -> u32 {
        self.visited
            .push(token.path_to_navigation_prop().identifier().to_string());
        42
    }
}

#[test]
fn test_accept_calls_expand_term_handler_once() {
    let orders = ExpandTermToken::builder()
        .path(path("Orders"))
        .expand(ExpandToken::new(vec![term("Items")]))
        .build()
        .unwrap();

    let mut visitor = SentinelVisitor::default();
    let result = orders.accept(&mut visitor);

    assert_eq!(result, 42);
    // The nested Items term is not visited: descending is the visitor's job.
    assert_eq!(visitor.visited, vec!["Orders".to_string()]);
    assert!(visitor.unsupported.is_empty());
}

#[test]
fn test_accept_passes_the_node_itself() {
    struct Identity<'a> {
        expected: &'a ExpandTermToken,
    }

    impl SyntacticTreeVisitor for Identity<'_> {
        type Output = bool;

        fn visit_unsupported(&mut self, _kind: QueryTokenKind) -> bool {
            false
        }

        fn visit_expand_term(&mut self, token: &ExpandTermToken) -> bool {
            std::ptr::eq(token, self.expected)
        }
    }

    let orders = term("Orders");
    let mut visitor = Identity { expected: &orders };
    assert!(orders.accept(&mut visitor));
}

#[test]
fn test_unhandled_kinds_fall_back() {
    let mut visitor = SentinelVisitor::default();

    let expand = ExpandToken::new(vec![term("Orders")]);
    assert_eq!(expand.accept(&mut visitor), 0);
    assert_eq!(path("Orders").accept(&mut visitor), 0);
    assert_eq!(QueryToken::Star.accept(&mut visitor), 0);
    assert_eq!(SelectToken::default().accept(&mut visitor), 0);

    assert_eq!(
        visitor.unsupported,
        vec![
            QueryTokenKind::Expand,
            QueryTokenKind::PathSegment,
            QueryTokenKind::Star,
            QueryTokenKind::Select,
        ]
    );
    assert!(visitor.visited.is_empty());
}

/// Collects every navigation path in pre-order by descending itself.
struct PathCollector {
    paths: Vec<String>,
}

impl SyntacticTreeVisitor for PathCollector {
    type Output = ();

    fn visit_unsupported(&mut self, _kind: QueryTokenKind) {}

    fn visit_expand(&mut self, token: &ExpandToken) {
        for term in token {
            term.accept(self);
        }
    }

    fn visit_expand_term(&mut self, token: &ExpandTermToken) {
        self.paths
            .push(token.path_to_navigation_prop().to_string());
        if let Some(expand) = token.expand_option() {
            expand.accept(self);
        }
    }
}

#[test]
fn test_visitor_controls_descent() {
    let items = ExpandTermToken::builder()
        .path(path("Items"))
        .expand(ExpandToken::new(vec![term("Product")]))
        .build()
        .unwrap();
    let orders = ExpandTermToken::builder()
        .path(path("Orders"))
        .expand(ExpandToken::new(vec![items, term("Invoices")]))
        .build()
        .unwrap();
    let tree = ExpandToken::new(vec![orders, term("Manager")]);

    let mut collector = PathCollector { paths: Vec::new() };
    tree.accept(&mut collector);

    assert_eq!(
        collector.paths,
        vec!["Orders", "Items", "Product", "Invoices", "Manager"]
    );
}

/// Names the kind of each expression node it reaches.
struct KindRecorder {
    kinds: Vec<QueryTokenKind>,
}

impl SyntacticTreeVisitor for KindRecorder {
    type Output = ();

    fn visit_unsupported(&mut self, kind: QueryTokenKind) {
        self.kinds.push(kind);
    }

    fn visit_binary_operator(&mut self, _op: BinaryOperatorKind, left: &QueryToken, right: &QueryToken) {
        self.kinds.push(QueryTokenKind::BinaryOperator);
        left.accept(self);
        right.accept(self);
    }

    fn visit_unary_operator(&mut self, _op: UnaryOperatorKind, operand: &QueryToken) {
        self.kinds.push(QueryTokenKind::UnaryOperator);
        operand.accept(self);
    }
}

#[test]
fn test_expression_dispatch_by_variant() {
    let expr = QueryToken::binary(
        BinaryOperatorKind::And,
        QueryToken::unary(UnaryOperatorKind::Not, QueryToken::end_path("Shipped")),
        QueryToken::call(
            "contains",
            vec![
                QueryToken::end_path("Name"),
                QueryToken::literal(LiteralValue::String("bike".into())),
            ],
        ),
    );

    let mut recorder = KindRecorder { kinds: Vec::new() };
    expr.accept(&mut recorder);

    assert_eq!(
        recorder.kinds,
        vec![
            QueryTokenKind::BinaryOperator,
            QueryTokenKind::UnaryOperator,
            QueryTokenKind::EndPath,
            QueryTokenKind::FunctionCall,
        ]
    );
}

#[test]
fn test_kinds_are_fixed_per_type() {
    let order_by = OrderByToken::new(QueryToken::end_path("Id"), OrderByDirection::Ascending);
    let select_term = SelectTermToken::new(path("Id"));

    assert_eq!(term("Orders").kind(), QueryTokenKind::ExpandTerm);
    assert_eq!(ExpandToken::default().kind(), QueryTokenKind::Expand);
    assert_eq!(path("Orders").kind(), QueryTokenKind::PathSegment);
    assert_eq!(order_by.kind(), QueryTokenKind::OrderBy);
    assert_eq!(select_term.kind(), QueryTokenKind::SelectTerm);
    assert_eq!(QueryToken::search("x").kind(), QueryTokenKind::StringLiteral);
    assert_eq!(QueryTokenKind::ExpandTerm.to_string(), "ExpandTerm");
}
