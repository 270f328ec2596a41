// tests/cli_tests.rs

use odata_expand::ast::{LevelsOption, LiteralValue, QueryToken, QueryTokenKind};
use odata_expand::cli::{
    execute_check, execute_dump, execute_render, json_to_expand, read_tree, CheckOptions, CliError,
    TreeSummary,
};
use odata_expand::error::TokenError;
use odata_expand::output::to_json;
use pretty_assertions::assert_eq;
use serde_json::json;

fn options(tree: &str) -> CheckOptions {
    CheckOptions {
        tree: tree.to_string(),
        ..CheckOptions::default()
    }
}

// ============================================================================
// Reading trees
// ============================================================================

#[test]
fn test_read_single_term_object() {
    let tree = read_tree(r#"{"path": "Orders", "top": 10, "skip": 5, "count": true, "levels": 2}"#)
        .unwrap();

    assert_eq!(tree.len(), 1);
    let term = &tree.terms()[0];
    assert_eq!(term.path_to_navigation_prop().identifier(), "Orders");
    assert_eq!(term.top_option(), Some(10));
    assert_eq!(term.skip_option(), Some(5));
    assert_eq!(term.count_query_option(), Some(true));
    assert_eq!(term.levels_option(), Some(LevelsOption::Depth(2)));
    assert!(term.filter_option().is_none());
}

#[test]
fn test_missing_path_surfaces_token_error() {
    let err = read_tree(r#"[{"top": 1}]"#).unwrap_err();
    assert!(matches!(
        err,
        CliError::Token(TokenError::MissingRequiredChild {
            parameter: "property"
        })
    ));

    let err = read_tree(r#"[{"path": null}]"#).unwrap_err();
    assert!(matches!(err, CliError::Token(_)));
    assert_eq!(
        err.to_string(),
        "Invalid expand term: missing required child: 'property'"
    );
}

#[test]
fn test_nested_missing_path_is_reported() {
    let err = read_tree(r#"[{"path": "Orders", "expand": [{"path": ""}]}]"#).unwrap_err();
    assert!(matches!(err, CliError::Token(_)));
}

#[test]
fn test_unknown_option_is_rejected() {
    let err = read_tree(r#"[{"path": "Orders", "limit": 3}]"#).unwrap_err();
    assert!(matches!(err, CliError::InvalidTree(ref m) if m.contains("limit")));
}

#[test]
fn test_wrong_option_types_are_rejected() {
    for tree in [
        r#"[{"path": "Orders", "top": "ten"}]"#,
        r#"[{"path": "Orders", "count": 1}]"#,
        r#"[{"path": "Orders", "levels": "all"}]"#,
        r#"[{"path": "Orders", "filter": {"binary": "like", "left": "*", "right": "*"}}]"#,
        r#"[{"path": "Orders", "orderby": [{"expr": "*", "direction": "up"}]}]"#,
        r#"[{"path": "Orders", "select": [{"select": []}]}]"#,
        r#"42"#,
    ] {
        let err = read_tree(tree).unwrap_err();
        assert!(matches!(err, CliError::InvalidTree(_)), "{}: {:?}", tree, err);
    }
}

#[test]
fn test_empty_path_segments_are_rejected() {
    for tree in [
        r#"{"path": "Orders/"}"#,
        r#"{"path": "A//B"}"#,
        r#"{"path": "/Orders"}"#,
        r#"{"path": "Orders", "select": ["Address/"]}"#,
    ] {
        let err = read_tree(tree).unwrap_err();
        assert!(
            matches!(err, CliError::InvalidTree(ref m) if m.contains("empty segment")),
            "{}: {:?}",
            tree,
            err
        );
    }
}

#[test]
fn test_malformed_json() {
    let err = read_tree("[{").unwrap_err();
    assert!(matches!(err, CliError::Json(_)));
}

#[test]
fn test_read_expressions() {
    let tree = read_tree(
        r#"[{
            "path": "Orders",
            "filter": {"binary": "and",
                       "left": {"unary": "not", "operand": {"property": "Shipped"}},
                       "right": {"call": "contains", "args": [
                           {"property": "Name", "parent": {"property": "Customer"}},
                           {"literal": "co"}]}},
            "search": {"search": "mountain bike"},
            "apply": [{"groupby": [{"property": "Year"}],
                       "then": {"aggregate": [{"with": "count", "as": "Count"}]}}]
        }]"#,
    )
    .unwrap();

    let term = &tree.terms()[0];
    assert_eq!(term.filter_option().unwrap().kind(), QueryTokenKind::BinaryOperator);
    assert_eq!(term.search_option(), Some(&QueryToken::search("mountain bike")));
    assert_eq!(
        execute_render(&options(&to_json(&tree).to_string())).unwrap(),
        "$expand=Orders($filter=not Shipped and contains(Customer/Name,'co');\
         $search=\"mountain bike\";$apply=groupby((Year),aggregate($count as Count)))"
    );
}

#[test]
fn test_read_literals() {
    let tree = read_tree(
        r#"[{"path": "Orders", "apply": [
            {"literal": null}, {"literal": true}, {"literal": 3},
            {"literal": 2.5}, {"literal": {"decimal": "0.10"}}, {"literal": "x"}
        ]}]"#,
    )
    .unwrap();

    let literals: Vec<LiteralValue> = tree.terms()[0]
        .apply_options()
        .unwrap()
        .iter()
        .map(|token| match token {
            QueryToken::Literal(value) => value.clone(),
            other => panic!("expected literal, got {:?}", other),
        })
        .collect();

    assert_eq!(
        literals,
        vec![
            LiteralValue::Null,
            LiteralValue::Boolean(true),
            LiteralValue::Int64(3),
            LiteralValue::Double(2.5),
            LiteralValue::Decimal("0.10".parse().unwrap()),
            LiteralValue::String("x".into()),
        ]
    );
}

#[test]
fn test_non_finite_doubles_survive_dump() {
    let tree = read_tree(
        r#"{"path": "Orders", "apply": [
            {"literal": {"double": "NaN"}},
            {"literal": {"double": "inf"}},
            {"literal": {"double": "-inf"}}
        ]}"#,
    )
    .unwrap();

    let reread = json_to_expand(to_json(&tree)).unwrap();
    let doubles: Vec<f64> = reread.terms()[0]
        .apply_options()
        .unwrap()
        .iter()
        .map(|token| match token {
            QueryToken::Literal(LiteralValue::Double(n)) => *n,
            other => panic!("expected double literal, got {:?}", other),
        })
        .collect();

    assert!(doubles[0].is_nan());
    assert_eq!(doubles[1], f64::INFINITY);
    assert_eq!(doubles[2], f64::NEG_INFINITY);

    let err = read_tree(r#"{"path": "Orders", "filter": {"literal": {"double": "lots"}}}"#)
        .unwrap_err();
    assert!(matches!(err, CliError::InvalidTree(_)));
}

#[test]
fn test_dumped_json_reads_back() {
    let source = json!([
        {
            "path": [{"segment": "Orders", "keys": [{"name": "Id", "value": 4}]}, "$ref"],
            "orderby": [{"expr": {"property": "Date"}, "direction": "desc"}],
            "levels": "max",
            "select": [{"path": "Address", "select": [{"path": "City"}]}],
            "compute": [{"expr": {"property": "Price"}, "as": "Cost"}],
            "expand": [{"path": "Items", "top": 3}]
        },
        {"path": "Manager"}
    ]);

    let tree = json_to_expand(source.clone()).unwrap();
    let dumped = to_json(&tree);

    assert_eq!(dumped, source);
    assert_eq!(json_to_expand(dumped).unwrap(), tree);
}

// ============================================================================
// Commands
// ============================================================================

#[test]
fn test_check_summarizes_tree() {
    let summary = execute_check(&options(
        r#"[{"path": "Orders", "expand": [{"path": "Items", "expand": [{"path": "Product"}]}]},
            {"path": "Manager"}]"#,
    ))
    .unwrap();

    assert_eq!(summary, TreeSummary { terms: 4, depth: 3 });
}

#[test]
fn test_check_empty_clause() {
    let summary = execute_check(&options("[]")).unwrap();
    assert_eq!(summary, TreeSummary { terms: 0, depth: 0 });
}

#[test]
fn test_blank_input() {
    let err = execute_check(&options("  \n")).unwrap_err();
    assert!(matches!(err, CliError::NoInput));
}

#[test]
fn test_render_with_normalize() {
    let tree = r#"[{"path": "Orders", "select": ["Id"]},
                   {"path": "Orders", "expand": [{"path": "Items"}]}]"#;

    assert_eq!(
        execute_render(&options(tree)).unwrap(),
        "$expand=Orders($select=Id),Orders($expand=Items)"
    );

    let normalized = CheckOptions {
        normalize: true,
        ..options(tree)
    };
    assert_eq!(
        execute_render(&normalized).unwrap(),
        "$expand=Orders($select=Id;$expand=Items)"
    );
}

#[test]
fn test_dump() {
    let dumped = execute_dump(&options(r#"{"path": "Customer/Orders", "count": true}"#)).unwrap();
    assert_eq!(dumped, json!([{"path": "Customer/Orders", "count": true}]));
}
