//! JSON -> expand tree conversion
//!
//! Reads the document shape produced by [`crate::output::JsonTreeWriter`].

use super::CliError;
use crate::ast::{
    AggregateExpressionToken, AggregationMethod, BinaryOperatorKind, ComputeExpressionToken,
    ComputeToken, ExpandTermOptions, ExpandTermToken, ExpandToken, LevelsOption, LiteralValue,
    NamedValue, OrderByDirection, OrderByToken, PathSegmentToken, QueryToken, SelectTermToken,
    SelectToken, UnaryOperatorKind,
};
use log::trace;
use rust_decimal::Decimal;
use serde_json::{Map, Value as Json};
use std::str::FromStr;

const TERM_KEYS: &[&str] = &[
    "path", "filter", "orderby", "top", "skip", "count", "levels", "search", "select",
    "compute", "apply", "expand",
];

fn invalid(message: impl Into<String>) -> CliError {
    CliError::InvalidTree(message.into())
}

/// Parse JSON text into an expand clause.
pub fn read_tree(text: &str) -> Result<ExpandToken, CliError> {
    let value: Json = serde_json::from_str(text)?;
    json_to_expand(value)
}

/// Convert a JSON document into an expand clause.
///
/// Accepts an array of terms or a single term object.
pub fn json_to_expand(value: Json) -> Result<ExpandToken, CliError> {
    match &value {
        Json::Array(_) => read_expand(&value),
        Json::Object(_) => Ok(ExpandToken::new(vec![read_term(&value)?])),
        other => Err(invalid(format!("expected an array of terms, got {}", other))),
    }
}

fn read_expand(value: &Json) -> Result<ExpandToken, CliError> {
    let terms = value
        .as_array()
        .ok_or_else(|| invalid("'expand' must be an array"))?;
    terms.iter().map(read_term).collect()
}

fn read_term(value: &Json) -> Result<ExpandTermToken, CliError> {
    let object = value
        .as_object()
        .ok_or_else(|| invalid("expand term must be an object"))?;
    if let Some(unknown) = object.keys().find(|k| !TERM_KEYS.contains(&k.as_str())) {
        return Err(invalid(format!("unknown expand option '{}'", unknown)));
    }

    let path = match object.get("path") {
        Some(path) => read_path(path)?,
        None => None,
    };
    trace!("reading expand term {:?}", path.as_ref().map(|p| p.to_string()));

    let options = ExpandTermOptions {
        filter: object.get("filter").map(read_expr).transpose()?,
        order_by: object.get("orderby").map(read_order_by).transpose()?,
        top: object.get("top").map(|v| read_integer(v, "top")).transpose()?,
        skip: object.get("skip").map(|v| read_integer(v, "skip")).transpose()?,
        count: object
            .get("count")
            .map(|v| v.as_bool().ok_or_else(|| invalid("'count' must be a boolean")))
            .transpose()?,
        levels: object.get("levels").map(read_levels).transpose()?,
        search: object.get("search").map(read_expr).transpose()?,
        select: object.get("select").map(read_select).transpose()?,
        compute: object.get("compute").map(read_compute).transpose()?,
        apply: object.get("apply").map(read_expr_list).transpose()?,
        expand: object.get("expand").map(read_expand).transpose()?,
    };

    Ok(ExpandTermToken::new(path, options)?)
}

/// `null` and `""` mean no path at all.
fn read_path(value: &Json) -> Result<Option<PathSegmentToken>, CliError> {
    match value {
        Json::Null => Ok(None),
        Json::String(s) if s.is_empty() => Ok(None),
        Json::String(s) => {
            if s.split('/').any(str::is_empty) {
                return Err(invalid(format!("path '{}' has an empty segment", s)));
            }
            Ok(PathSegmentToken::from_segments(s.split('/')))
        }
        Json::Array(segments) => {
            let mut parsed = Vec::with_capacity(segments.len());
            for segment in segments {
                parsed.push(read_segment(segment)?);
            }
            Ok(parsed
                .into_iter()
                .rev()
                .fold(None, |next, (identifier, keys)| {
                    let segment = if identifier.starts_with('$') {
                        PathSegmentToken::system(identifier, next)
                    } else {
                        PathSegmentToken::new(identifier, next)
                    };
                    Some(match keys {
                        Some(keys) => segment.with_named_values(keys),
                        None => segment,
                    })
                }))
        }
        other => Err(invalid(format!("path must be a string or array, got {}", other))),
    }
}

fn read_segment(value: &Json) -> Result<(String, Option<Vec<NamedValue>>), CliError> {
    match value {
        Json::String(s) => Ok((s.clone(), None)),
        Json::Object(object) => {
            let identifier = string_field(object, "segment")?;
            let keys = match object.get("keys") {
                Some(Json::Array(keys)) => keys
                    .iter()
                    .map(read_named_value)
                    .collect::<Result<Vec<_>, _>>()
                    .map(Some)?,
                Some(_) => return Err(invalid("'keys' must be an array")),
                None => None,
            };
            Ok((identifier, keys))
        }
        other => Err(invalid(format!("invalid path segment {}", other))),
    }
}

fn read_named_value(value: &Json) -> Result<NamedValue, CliError> {
    let object = value
        .as_object()
        .ok_or_else(|| invalid("key value must be an object"))?;
    let name = match object.get("name") {
        Some(Json::String(name)) => Some(name.clone()),
        Some(Json::Null) | None => None,
        Some(_) => return Err(invalid("key name must be a string")),
    };
    let value = object
        .get("value")
        .ok_or_else(|| invalid("key value requires 'value'"))?;
    Ok(NamedValue {
        name,
        value: read_literal(value)?,
    })
}

fn read_integer(value: &Json, option: &str) -> Result<i64, CliError> {
    value
        .as_i64()
        .ok_or_else(|| invalid(format!("'{}' must be an integer", option)))
}

fn read_levels(value: &Json) -> Result<LevelsOption, CliError> {
    match value {
        Json::String(s) if s == "max" => Ok(LevelsOption::Max),
        other => other
            .as_i64()
            .map(LevelsOption::Depth)
            .ok_or_else(|| invalid("'levels' must be an integer or \"max\"")),
    }
}

fn read_order_by(value: &Json) -> Result<Vec<OrderByToken>, CliError> {
    let items = value
        .as_array()
        .ok_or_else(|| invalid("'orderby' must be an array"))?;
    items
        .iter()
        .map(|item| -> Result<OrderByToken, CliError> {
            let object = item
                .as_object()
                .ok_or_else(|| invalid("orderby item must be an object"))?;
            let expression = read_expr(required(object, "expr")?)?;
            let direction = match object.get("direction").and_then(Json::as_str) {
                None | Some("asc") => OrderByDirection::Ascending,
                Some("desc") => OrderByDirection::Descending,
                Some(other) => return Err(invalid(format!("unknown direction '{}'", other))),
            };
            Ok(OrderByToken::new(expression, direction))
        })
        .collect()
}

fn read_select(value: &Json) -> Result<SelectToken, CliError> {
    let items = value
        .as_array()
        .ok_or_else(|| invalid("'select' must be an array"))?;
    items
        .iter()
        .map(read_select_term)
        .collect::<Result<Vec<_>, _>>()
        .map(SelectToken::new)
}

fn read_select_term(value: &Json) -> Result<SelectTermToken, CliError> {
    let (path, nested) = match value {
        Json::String(_) => (read_path(value)?, None),
        Json::Object(object) => (
            read_path(required(object, "path")?)?,
            object.get("select").map(read_select).transpose()?,
        ),
        other => return Err(invalid(format!("invalid select item {}", other))),
    };
    let path = path.ok_or_else(|| invalid("select item requires a path"))?;
    Ok(match nested {
        Some(nested) => SelectTermToken::with_select(path, nested),
        None => SelectTermToken::new(path),
    })
}

fn read_compute(value: &Json) -> Result<ComputeToken, CliError> {
    let items = value
        .as_array()
        .ok_or_else(|| invalid("'compute' must be an array"))?;
    items
        .iter()
        .map(|item| -> Result<ComputeExpressionToken, CliError> {
            let object = item
                .as_object()
                .ok_or_else(|| invalid("compute item must be an object"))?;
            Ok(ComputeExpressionToken::new(
                read_expr(required(object, "expr")?)?,
                string_field(object, "as")?,
            ))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(ComputeToken::new)
}

fn read_expr_list(value: &Json) -> Result<Vec<QueryToken>, CliError> {
    value
        .as_array()
        .ok_or_else(|| invalid("expected an array of expressions"))?
        .iter()
        .map(read_expr)
        .collect()
}

fn read_expr(value: &Json) -> Result<QueryToken, CliError> {
    let object = match value {
        Json::String(s) if s == "*" => return Ok(QueryToken::Star),
        Json::Object(object) => object,
        other => return Err(invalid(format!("invalid expression {}", other))),
    };

    if let Some(literal) = object.get("literal") {
        return Ok(QueryToken::Literal(read_literal(literal)?));
    }
    if object.contains_key("property") {
        let parent = object.get("parent").map(read_expr).transpose()?;
        return Ok(QueryToken::EndPath {
            identifier: string_field(object, "property")?,
            parent: parent.map(Box::new),
        });
    }
    if object.contains_key("binary") {
        let keyword = string_field(object, "binary")?;
        let op = BinaryOperatorKind::from_keyword(&keyword)
            .ok_or_else(|| invalid(format!("unknown binary operator '{}'", keyword)))?;
        return Ok(QueryToken::binary(
            op,
            read_expr(required(object, "left")?)?,
            read_expr(required(object, "right")?)?,
        ));
    }
    if object.contains_key("unary") {
        let keyword = string_field(object, "unary")?;
        let op = UnaryOperatorKind::from_keyword(&keyword)
            .ok_or_else(|| invalid(format!("unknown unary operator '{}'", keyword)))?;
        return Ok(QueryToken::unary(op, read_expr(required(object, "operand")?)?));
    }
    if object.contains_key("call") {
        let arguments = match object.get("args") {
            Some(args) => read_expr_list(args)?,
            None => Vec::new(),
        };
        return Ok(QueryToken::call(string_field(object, "call")?, arguments));
    }
    if object.contains_key("search") {
        return Ok(QueryToken::search(string_field(object, "search")?));
    }
    if let Some(items) = object.get("aggregate") {
        return read_aggregate(items);
    }
    if let Some(properties) = object.get("groupby") {
        let child = object.get("then").map(read_expr).transpose()?;
        return Ok(QueryToken::GroupBy {
            properties: read_expr_list(properties)?,
            child: child.map(Box::new),
        });
    }

    Err(invalid(format!("unrecognised expression {}", value)))
}

fn read_aggregate(value: &Json) -> Result<QueryToken, CliError> {
    let items = value
        .as_array()
        .ok_or_else(|| invalid("'aggregate' must be an array"))?;
    let mut expressions = Vec::with_capacity(items.len());
    for item in items {
        let object = item
            .as_object()
            .ok_or_else(|| invalid("aggregate item must be an object"))?;
        let keyword = string_field(object, "with")?;
        let method = AggregationMethod::from_keyword(&keyword)
            .ok_or_else(|| invalid(format!("unknown aggregation method '{}'", keyword)))?;
        let expression = match (object.get("expr"), method) {
            (Some(expr), _) => read_expr(expr)?,
            (None, AggregationMethod::VirtualPropertyCount) => QueryToken::end_path("$count"),
            (None, _) => return Err(invalid("aggregate item requires 'expr'")),
        };
        expressions.push(AggregateExpressionToken::new(
            expression,
            method,
            string_field(object, "as")?,
        ));
    }
    Ok(QueryToken::Aggregate(expressions))
}

fn read_literal(value: &Json) -> Result<LiteralValue, CliError> {
    match value {
        Json::Null => Ok(LiteralValue::Null),
        Json::Bool(b) => Ok(LiteralValue::Boolean(*b)),
        Json::Number(n) => match n.as_i64() {
            Some(i) => Ok(LiteralValue::Int64(i)),
            None => n
                .as_f64()
                .map(LiteralValue::Double)
                .ok_or_else(|| invalid(format!("unsupported number {}", n))),
        },
        Json::String(s) => Ok(LiteralValue::String(s.clone())),
        Json::Object(object) if object.contains_key("double") => {
            let text = string_field(object, "double")?;
            f64::from_str(&text)
                .map(LiteralValue::Double)
                .map_err(|e| invalid(format!("invalid double '{}': {}", text, e)))
        }
        Json::Object(object) => {
            let text = string_field(object, "decimal")?;
            Decimal::from_str(&text)
                .map(LiteralValue::Decimal)
                .map_err(|e| invalid(format!("invalid decimal '{}': {}", text, e)))
        }
        Json::Array(_) => Err(invalid("array literals are not supported")),
    }
}

fn required<'a>(object: &'a Map<String, Json>, key: &str) -> Result<&'a Json, CliError> {
    object
        .get(key)
        .ok_or_else(|| invalid(format!("missing '{}'", key)))
}

fn string_field(object: &Map<String, Json>, key: &str) -> Result<String, CliError> {
    required(object, key)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| invalid(format!("'{}' must be a string", key)))
}
