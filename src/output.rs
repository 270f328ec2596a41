//! Rendering of syntax trees.
//!
//! Two visitors live here:
//!
//! - [`QueryTextWriter`] renders a tree back to `$expand` query text, the
//!   form a developer would type into a URI.
//! - [`JsonTreeWriter`] renders a tree as a structural JSON document, the
//!   same shape [`crate::cli::json_to_expand`] reads.
//!
//! Both descend into children by calling `accept` on them, which is how any
//! consumer of the tree is expected to walk it.
//!
//! # Examples
//!
//! ```
//! use odata_expand::ast::{ExpandTermToken, ExpandToken, PathSegmentToken};
//! use odata_expand::output::to_query_text;
//!
//! let orders = ExpandTermToken::builder()
//!     .path(PathSegmentToken::new("Orders", None))
//!     .top(10)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(to_query_text(&ExpandToken::new(vec![orders])), "$expand=Orders($top=10)");
//! ```

use crate::ast::{
    AggregateExpressionToken, AggregationMethod, BinaryOperatorKind, ComputeExpressionToken,
    ComputeToken, ExpandTermToken, ExpandToken, LevelsOption, LiteralValue, NamedValue,
    OrderByDirection, OrderByToken, PathSegmentToken, QueryToken, QueryTokenKind,
    SelectTermToken, SelectToken, UnaryOperatorKind,
};
use crate::visitor::SyntacticTreeVisitor;
use regex::Regex;
use serde_json::{Map, Value as Json, json};
use std::sync::LazyLock;

/// Search terms that can be written without quotes.
static SEARCH_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^[^\s()"]+$"#).expect("search word pattern is valid")
});

/// Settings for [`QueryTextWriter`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Write `asc` on ascending `$orderby` items instead of omitting it
    pub explicit_ascending: bool,
}

/// Renders tokens as query text.
///
/// Expressions under `$search` use the search grammar, where only the
/// uppercase `AND`, `OR` and `NOT` are operators.
pub struct QueryTextWriter {
    options: RenderOptions,
    in_search: bool,
}

impl QueryTextWriter {
    pub fn new(options: RenderOptions) -> Self {
        QueryTextWriter {
            options,
            in_search: false,
        }
    }

    /// Render a `$search` expression.
    pub fn search_text(&mut self, token: &QueryToken) -> String {
        let outer = std::mem::replace(&mut self.in_search, true);
        let text = token.accept(self);
        self.in_search = outer;
        text
    }

    fn join<T>(&mut self, items: &[T], separator: &str, render: fn(&T, &mut Self) -> String) -> String {
        items
            .iter()
            .map(|item| render(item, self))
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Operands that are themselves operations get parentheses.
    fn operand(&mut self, token: &QueryToken) -> String {
        let text = token.accept(self);
        match token {
            QueryToken::BinaryOperator { .. } => format!("({})", text),
            _ => text,
        }
    }

    fn segment(&self, segment: &PathSegmentToken) -> String {
        match segment.named_values() {
            Some(keys) if !keys.is_empty() => {
                let keys: Vec<String> = keys.iter().map(named_value_text).collect();
                format!("{}({})", segment.identifier(), keys.join(","))
            }
            _ => segment.identifier().to_string(),
        }
    }
}

impl Default for QueryTextWriter {
    fn default() -> Self {
        QueryTextWriter::new(RenderOptions::default())
    }
}

impl SyntacticTreeVisitor for QueryTextWriter {
    type Output = String;

    fn visit_unsupported(&mut self, kind: QueryTokenKind) -> String {
        format!("<{}>", kind)
    }

    fn visit_expand(&mut self, token: &ExpandToken) -> String {
        self.join(token.terms(), ",", |term, w| term.accept(w))
    }

    fn visit_expand_term(&mut self, token: &ExpandTermToken) -> String {
        let path = token.path_to_navigation_prop().accept(self);
        let mut options = Vec::new();

        if let Some(filter) = token.filter_option() {
            options.push(format!("$filter={}", filter.accept(self)));
        }
        if let Some(order_by) = token.order_by_options() {
            options.push(format!(
                "$orderby={}",
                self.join(order_by, ",", |item, w| item.accept(w))
            ));
        }
        if let Some(top) = token.top_option() {
            options.push(format!("$top={}", top));
        }
        if let Some(skip) = token.skip_option() {
            options.push(format!("$skip={}", skip));
        }
        if let Some(count) = token.count_query_option() {
            options.push(format!("$count={}", count));
        }
        if let Some(levels) = token.levels_option() {
            let levels = match levels {
                LevelsOption::Depth(n) => n.to_string(),
                LevelsOption::Max => "max".to_string(),
            };
            options.push(format!("$levels={}", levels));
        }
        if let Some(search) = token.search_option() {
            options.push(format!("$search={}", self.search_text(search)));
        }
        if let Some(select) = token.select_option() {
            options.push(format!("$select={}", select.accept(self)));
        }
        if let Some(compute) = token.compute_option() {
            options.push(format!("$compute={}", compute.accept(self)));
        }
        if let Some(apply) = token.apply_options() {
            options.push(format!(
                "$apply={}",
                self.join(apply, "/", |step, w| step.accept(w))
            ));
        }
        if let Some(expand) = token.expand_option() {
            options.push(format!("$expand={}", expand.accept(self)));
        }

        if options.is_empty() {
            path
        } else {
            format!("{}({})", path, options.join(";"))
        }
    }

    fn visit_path_segment(&mut self, token: &PathSegmentToken) -> String {
        token
            .segments()
            .map(|segment| self.segment(segment))
            .collect::<Vec<_>>()
            .join("/")
    }

    fn visit_select(&mut self, token: &SelectToken) -> String {
        self.join(token.terms(), ",", |term, w| term.accept(w))
    }

    fn visit_select_term(&mut self, token: &SelectTermToken) -> String {
        let path = token.path.accept(self);
        match &token.select_option {
            Some(nested) => format!("{}($select={})", path, nested.accept(self)),
            None => path,
        }
    }

    fn visit_compute(&mut self, token: &ComputeToken) -> String {
        self.join(token.expressions(), ",", |item, w| item.accept(w))
    }

    fn visit_compute_expression(&mut self, token: &ComputeExpressionToken) -> String {
        format!("{} as {}", token.expression.accept(self), token.alias)
    }

    fn visit_order_by(&mut self, token: &OrderByToken) -> String {
        let expression = token.expression.accept(self);
        match token.direction {
            OrderByDirection::Descending => format!("{} desc", expression),
            OrderByDirection::Ascending if self.options.explicit_ascending => {
                format!("{} asc", expression)
            }
            OrderByDirection::Ascending => expression,
        }
    }

    fn visit_literal(&mut self, value: &LiteralValue) -> String {
        literal_text(value)
    }

    fn visit_end_path(&mut self, identifier: &str, parent: Option<&QueryToken>) -> String {
        match parent {
            Some(parent) => format!("{}/{}", parent.accept(self), identifier),
            None => identifier.to_string(),
        }
    }

    fn visit_binary_operator(
        &mut self,
        op: BinaryOperatorKind,
        left: &QueryToken,
        right: &QueryToken,
    ) -> String {
        let left = self.operand(left);
        let right = self.operand(right);
        if self.in_search {
            format!("{} {} {}", left, op.keyword().to_uppercase(), right)
        } else {
            format!("{} {} {}", left, op.keyword(), right)
        }
    }

    fn visit_unary_operator(&mut self, op: UnaryOperatorKind, operand: &QueryToken) -> String {
        let operand = self.operand(operand);
        match op {
            // Search has no negation sign
            _ if self.in_search => format!("NOT {}", operand),
            UnaryOperatorKind::Negate => format!("-{}", operand),
            UnaryOperatorKind::Not => format!("not {}", operand),
        }
    }

    fn visit_function_call(&mut self, name: &str, arguments: &[QueryToken]) -> String {
        format!("{}({})", name, self.join(arguments, ",", |arg, w| arg.accept(w)))
    }

    fn visit_star(&mut self) -> String {
        "*".to_string()
    }

    fn visit_string_literal(&mut self, text: &str) -> String {
        let reserved = matches!(text, "AND" | "OR" | "NOT");
        if SEARCH_WORD.is_match(text) && !reserved {
            text.to_string()
        } else {
            format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
        }
    }

    fn visit_aggregate(&mut self, expressions: &[AggregateExpressionToken]) -> String {
        let items = self.join(expressions, ",", |item, w| match item.method {
            AggregationMethod::VirtualPropertyCount => format!("$count as {}", item.alias),
            method => format!(
                "{} with {} as {}",
                item.expression.accept(w),
                method.keyword(),
                item.alias
            ),
        });
        format!("aggregate({})", items)
    }

    fn visit_group_by(&mut self, properties: &[QueryToken], child: Option<&QueryToken>) -> String {
        let properties = self.join(properties, ",", |p, w| p.accept(w));
        match child {
            Some(child) => format!("groupby(({}),{})", properties, child.accept(self)),
            None => format!("groupby(({}))", properties),
        }
    }
}

fn literal_text(value: &LiteralValue) -> String {
    match value {
        LiteralValue::Null => "null".to_string(),
        LiteralValue::Boolean(b) => b.to_string(),
        LiteralValue::Int64(n) => n.to_string(),
        // Debug keeps the fractional part of whole doubles (`2.0`)
        LiteralValue::Double(n) => format!("{:?}", n),
        LiteralValue::Decimal(d) => d.to_string(),
        LiteralValue::String(s) => format!("'{}'", s.replace('\'', "''")),
    }
}

fn named_value_text(key: &NamedValue) -> String {
    match &key.name {
        Some(name) => format!("{}={}", name, literal_text(&key.value)),
        None => literal_text(&key.value),
    }
}

/// Render an expand clause as `$expand=...`.
pub fn to_query_text(tree: &ExpandToken) -> String {
    to_query_text_with(tree, RenderOptions::default())
}

pub fn to_query_text_with(tree: &ExpandToken, options: RenderOptions) -> String {
    let mut writer = QueryTextWriter::new(options);
    format!("$expand={}", tree.accept(&mut writer))
}

/// Renders tokens as structural JSON.
#[derive(Debug, Default)]
pub struct JsonTreeWriter;

impl JsonTreeWriter {
    pub fn new() -> Self {
        JsonTreeWriter
    }

    fn list<T>(&mut self, items: &[T], render: fn(&T, &mut Self) -> Json) -> Json {
        Json::Array(items.iter().map(|item| render(item, self)).collect())
    }
}

impl SyntacticTreeVisitor for JsonTreeWriter {
    type Output = Json;

    fn visit_unsupported(&mut self, kind: QueryTokenKind) -> Json {
        json!({ "unsupported": kind.as_str() })
    }

    fn visit_expand(&mut self, token: &ExpandToken) -> Json {
        self.list(token.terms(), |term, w| term.accept(w))
    }

    fn visit_expand_term(&mut self, token: &ExpandTermToken) -> Json {
        let mut object = Map::new();
        object.insert("path".into(), token.path_to_navigation_prop().accept(self));

        if let Some(filter) = token.filter_option() {
            object.insert("filter".into(), filter.accept(self));
        }
        if let Some(order_by) = token.order_by_options() {
            object.insert("orderby".into(), self.list(order_by, |o, w| o.accept(w)));
        }
        if let Some(top) = token.top_option() {
            object.insert("top".into(), top.into());
        }
        if let Some(skip) = token.skip_option() {
            object.insert("skip".into(), skip.into());
        }
        if let Some(count) = token.count_query_option() {
            object.insert("count".into(), count.into());
        }
        if let Some(levels) = token.levels_option() {
            let levels = match levels {
                LevelsOption::Depth(n) => n.into(),
                LevelsOption::Max => Json::String("max".into()),
            };
            object.insert("levels".into(), levels);
        }
        if let Some(search) = token.search_option() {
            object.insert("search".into(), search.accept(self));
        }
        if let Some(select) = token.select_option() {
            object.insert("select".into(), select.accept(self));
        }
        if let Some(compute) = token.compute_option() {
            object.insert("compute".into(), compute.accept(self));
        }
        if let Some(apply) = token.apply_options() {
            object.insert("apply".into(), self.list(apply, |a, w| a.accept(w)));
        }
        if let Some(expand) = token.expand_option() {
            object.insert("expand".into(), expand.accept(self));
        }
        Json::Object(object)
    }

    /// Plain string when no segment carries keys, segment array otherwise.
    fn visit_path_segment(&mut self, token: &PathSegmentToken) -> Json {
        let keyed = token.segments().any(|s| s.named_values().is_some());
        if !keyed {
            return Json::String(token.to_string());
        }
        let segments = token
            .segments()
            .map(|segment| match segment.named_values() {
                Some(keys) => json!({
                    "segment": segment.identifier(),
                    "keys": keys.iter().map(|key| json!({
                        "name": key.name,
                        "value": literal_json(&key.value),
                    })).collect::<Vec<_>>(),
                }),
                None => Json::String(segment.identifier().to_string()),
            })
            .collect();
        Json::Array(segments)
    }

    fn visit_select(&mut self, token: &SelectToken) -> Json {
        self.list(token.terms(), |term, w| term.accept(w))
    }

    fn visit_select_term(&mut self, token: &SelectTermToken) -> Json {
        let mut object = Map::new();
        object.insert("path".into(), token.path.accept(self));
        if let Some(nested) = &token.select_option {
            object.insert("select".into(), nested.accept(self));
        }
        Json::Object(object)
    }

    fn visit_compute(&mut self, token: &ComputeToken) -> Json {
        self.list(token.expressions(), |item, w| item.accept(w))
    }

    fn visit_compute_expression(&mut self, token: &ComputeExpressionToken) -> Json {
        json!({ "expr": token.expression.accept(self), "as": token.alias })
    }

    fn visit_order_by(&mut self, token: &OrderByToken) -> Json {
        json!({
            "expr": token.expression.accept(self),
            "direction": token.direction.keyword(),
        })
    }

    fn visit_literal(&mut self, value: &LiteralValue) -> Json {
        json!({ "literal": literal_json(value) })
    }

    fn visit_end_path(&mut self, identifier: &str, parent: Option<&QueryToken>) -> Json {
        match parent {
            Some(parent) => json!({ "property": identifier, "parent": parent.accept(self) }),
            None => json!({ "property": identifier }),
        }
    }

    fn visit_binary_operator(
        &mut self,
        op: BinaryOperatorKind,
        left: &QueryToken,
        right: &QueryToken,
    ) -> Json {
        json!({
            "binary": op.keyword(),
            "left": left.accept(self),
            "right": right.accept(self),
        })
    }

    fn visit_unary_operator(&mut self, op: UnaryOperatorKind, operand: &QueryToken) -> Json {
        json!({ "unary": op.keyword(), "operand": operand.accept(self) })
    }

    fn visit_function_call(&mut self, name: &str, arguments: &[QueryToken]) -> Json {
        json!({ "call": name, "args": self.list(arguments, |a, w| a.accept(w)) })
    }

    fn visit_star(&mut self) -> Json {
        Json::String("*".into())
    }

    fn visit_string_literal(&mut self, text: &str) -> Json {
        json!({ "search": text })
    }

    fn visit_aggregate(&mut self, expressions: &[AggregateExpressionToken]) -> Json {
        let items = self.list(expressions, |item, w| {
            json!({
                "expr": item.expression.accept(w),
                "with": item.method.keyword(),
                "as": item.alias,
            })
        });
        json!({ "aggregate": items })
    }

    fn visit_group_by(&mut self, properties: &[QueryToken], child: Option<&QueryToken>) -> Json {
        let properties = self.list(properties, |p, w| p.accept(w));
        match child {
            Some(child) => json!({ "groupby": properties, "then": child.accept(self) }),
            None => json!({ "groupby": properties }),
        }
    }
}

fn literal_json(value: &LiteralValue) -> Json {
    match value {
        LiteralValue::Null => Json::Null,
        LiteralValue::Boolean(b) => Json::Bool(*b),
        LiteralValue::Int64(n) => Json::Number((*n).into()),
        // NaN and infinities have no JSON number form
        LiteralValue::Double(n) => serde_json::Number::from_f64(*n)
            .map(Json::Number)
            .unwrap_or_else(|| json!({ "double": n.to_string() })),
        LiteralValue::Decimal(d) => json!({ "decimal": d.to_string() }),
        LiteralValue::String(s) => Json::String(s.clone()),
    }
}

/// Structural JSON for an expand clause.
pub fn to_json(tree: &ExpandToken) -> Json {
    tree.accept(&mut JsonTreeWriter::new())
}

/// Serialized structural JSON, compact or indented.
pub fn to_json_string(tree: &ExpandToken, pretty: bool) -> Result<String, serde_json::Error> {
    let value = to_json(tree);
    if pretty {
        serde_json::to_string_pretty(&value)
    } else {
        serde_json::to_string(&value)
    }
}
