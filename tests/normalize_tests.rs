// tests/normalize_tests.rs

use odata_expand::ast::{
    ExpandTermToken, ExpandToken, LiteralValue, NamedValue, PathSegmentToken, QueryToken,
    SelectTermToken, SelectToken,
};
use odata_expand::normalize::{normalize_expand_tree, ExpandTreeNormalizer};
use odata_expand::output::to_query_text;
use pretty_assertions::assert_eq;

/// Chain as a parser produces it: last segment first.
fn parsed_path(segments: &[&str]) -> PathSegmentToken {
    PathSegmentToken::from_segments(segments.iter().rev().copied()).unwrap()
}

fn path(identifier: &str) -> PathSegmentToken {
    PathSegmentToken::new(identifier, None)
}

fn term(identifier: &str) -> ExpandTermToken {
    ExpandTermToken::from_path(path(identifier)).unwrap()
}

fn select(names: &[&str]) -> SelectToken {
    SelectToken::new(names.iter().map(|n| SelectTermToken::new(path(n))).collect())
}

// ============================================================================
// Path inversion
// ============================================================================

#[test]
fn test_invert_top_level_paths() {
    let tree = ExpandToken::new(vec![
        ExpandTermToken::from_path(parsed_path(&["NS.VipCustomer", "Orders"])).unwrap(),
    ]);

    let inverted = ExpandTreeNormalizer::new().invert_paths(tree);

    assert_eq!(
        inverted.terms()[0].path_to_navigation_prop().to_string(),
        "NS.VipCustomer/Orders"
    );
}

#[test]
fn test_invert_nested_and_select_paths() {
    let inner = ExpandTermToken::with_select_and_expand(
        parsed_path(&["Items", "Product"]),
        Some(SelectToken::new(vec![SelectTermToken::with_select(
            parsed_path(&["Address", "City"]),
            SelectToken::new(vec![SelectTermToken::new(parsed_path(&["Geo", "Lat"]))]),
        )])),
        None,
    )
    .unwrap();
    let outer = ExpandTermToken::builder()
        .path(path("Orders"))
        .expand(ExpandToken::new(vec![inner]))
        .build()
        .unwrap();

    let inverted = ExpandTreeNormalizer::new().invert_paths(ExpandToken::new(vec![outer]));

    let inner = &inverted.terms()[0].expand_option().unwrap().terms()[0];
    assert_eq!(inner.path_to_navigation_prop().to_string(), "Items/Product");
    let select_term = &inner.select_option().unwrap().terms()[0];
    assert_eq!(select_term.path.to_string(), "Address/City");
    let nested = &select_term.select_option.as_ref().unwrap().terms()[0];
    assert_eq!(nested.path.to_string(), "Geo/Lat");
}

#[test]
fn test_inversion_keeps_other_options() {
    let filter = QueryToken::end_path("Active");
    let tree = ExpandToken::new(vec![
        ExpandTermToken::builder()
            .path(parsed_path(&["A", "B"]))
            .filter(filter.clone())
            .top(7)
            .build()
            .unwrap(),
    ]);

    let inverted = ExpandTreeNormalizer::new().invert_paths(tree);
    let term = &inverted.terms()[0];

    assert_eq!(term.path_to_navigation_prop().to_string(), "A/B");
    assert_eq!(term.filter_option(), Some(&filter));
    assert_eq!(term.top_option(), Some(7));
}

#[test]
fn test_inversion_keeps_segment_keys() {
    let keyed = PathSegmentToken::new(
        "Items",
        Some(PathSegmentToken::new("Orders", None).with_named_values(vec![NamedValue {
            name: Some("Id".into()),
            value: LiteralValue::Int64(3),
        }])),
    );
    let tree = ExpandToken::new(vec![ExpandTermToken::from_path(keyed).unwrap()]);

    let inverted = ExpandTreeNormalizer::new().invert_paths(tree);

    assert_eq!(to_query_text(&inverted), "$expand=Orders(Id=3)/Items");
}

// ============================================================================
// Term combining
// ============================================================================

#[test]
fn test_distinct_terms_are_kept_in_order() {
    let tree = ExpandToken::new(vec![term("Orders"), term("Manager"), term("Invoices")]);

    let combined = ExpandTreeNormalizer::new().combine_terms(tree.clone());

    assert_eq!(combined, tree);
}

#[test]
fn test_duplicate_terms_are_merged() {
    let first = ExpandTermToken::builder()
        .path(path("Orders"))
        .top(5)
        .select(select(&["Id", "Date"]))
        .expand(ExpandToken::new(vec![term("Items")]))
        .build()
        .unwrap();
    let second = ExpandTermToken::builder()
        .path(path("Orders"))
        .top(99)
        .select(select(&["Date", "Amount"]))
        .expand(ExpandToken::new(vec![term("Invoices")]))
        .build()
        .unwrap();
    let tree = ExpandToken::new(vec![first, term("Manager"), second]);

    let combined = ExpandTreeNormalizer::new().combine_terms(tree);

    assert_eq!(combined.len(), 2);
    let orders = &combined.terms()[0];
    assert_eq!(orders.path_to_navigation_prop().identifier(), "Orders");
    // The first occurrence's modifiers win.
    assert_eq!(orders.top_option(), Some(5));
    assert_eq!(orders.select_option(), Some(&select(&["Id", "Date", "Amount"])));
    let nested: Vec<String> = orders
        .expand_option()
        .unwrap()
        .iter()
        .map(|t| t.path_to_navigation_prop().to_string())
        .collect();
    assert_eq!(nested, vec!["Items", "Invoices"]);
    assert_eq!(combined.terms()[1].path_to_navigation_prop().identifier(), "Manager");
}

#[test]
fn test_select_is_taken_from_whichever_side_has_one() {
    let first = term("Orders");
    let second = ExpandTermToken::with_select_and_expand(path("Orders"), Some(select(&["Id"])), None)
        .unwrap();

    let combined = ExpandTreeNormalizer::new().combine_terms(ExpandToken::new(vec![first, second]));

    assert_eq!(combined.len(), 1);
    assert_eq!(combined.terms()[0].select_option(), Some(&select(&["Id"])));
}

#[test]
fn test_nested_duplicates_are_merged_recursively() {
    let first = ExpandTermToken::builder()
        .path(path("Orders"))
        .expand(ExpandToken::new(vec![ExpandTermToken::with_select_and_expand(
            path("Items"),
            Some(select(&["Sku"])),
            None,
        )
        .unwrap()]))
        .build()
        .unwrap();
    let second = ExpandTermToken::builder()
        .path(path("Orders"))
        .expand(ExpandToken::new(vec![ExpandTermToken::builder()
            .path(path("Items"))
            .expand(ExpandToken::new(vec![term("Product")]))
            .build()
            .unwrap()]))
        .build()
        .unwrap();

    let combined = ExpandTreeNormalizer::new().combine_terms(ExpandToken::new(vec![first, second]));

    assert_eq!(
        to_query_text(&combined),
        "$expand=Orders($expand=Items($select=Sku;$expand=Product))"
    );
}

#[test]
fn test_duplicates_inside_a_single_term_are_merged() {
    let orders = ExpandTermToken::builder()
        .path(path("Orders"))
        .expand(ExpandToken::new(vec![term("Items"), term("Items")]))
        .build()
        .unwrap();

    let combined = ExpandTreeNormalizer::new().combine_terms(ExpandToken::new(vec![orders]));

    assert_eq!(to_query_text(&combined), "$expand=Orders($expand=Items)");
}

// ============================================================================
// Full normalization
// ============================================================================

#[test]
fn test_normalize_inverts_then_combines() {
    // `Customer/Orders` written twice, once with a select and once with an expand.
    let first = ExpandTermToken::with_select_and_expand(
        parsed_path(&["Customer", "Orders"]),
        Some(select(&["Id"])),
        None,
    )
    .unwrap();
    let second = ExpandTermToken::with_select_and_expand(
        parsed_path(&["Customer", "Orders"]),
        None,
        Some(ExpandToken::new(vec![term("Items")])),
    )
    .unwrap();

    let normalized = normalize_expand_tree(ExpandToken::new(vec![first, second]));

    assert_eq!(
        to_query_text(&normalized),
        "$expand=Customer/Orders($select=Id;$expand=Items)"
    );
}

#[test]
fn test_normalize_empty_clause() {
    let normalized = normalize_expand_tree(ExpandToken::default());
    assert!(normalized.is_empty());
}
