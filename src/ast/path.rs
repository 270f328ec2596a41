use crate::ast::{LiteralValue, QueryTokenKind};
use crate::visitor::SyntacticTreeVisitor;
use std::fmt;

/// Whether a segment names a model element or a system resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Property, navigation property, type cast
    NonSystem,
    /// `$ref`, `$count`, `$value`
    System,
}

/// Key value attached to a segment, `Orders(1)` or `Orders(Id=1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedValue {
    /// `None` for a positional key
    pub name: Option<String>,
    pub value: LiteralValue,
}

/// A chain of path segments.
///
/// `next` points at the following segment. Parsers build chains from the
/// last segment backwards, so a freshly parsed chain may read in reverse
/// until it is passed through [`PathSegmentToken::reversed`].
///
/// # Example
///
/// ```
/// use odata_expand::ast::PathSegmentToken;
///
/// let path = PathSegmentToken::from_segments(["Customer", "Orders"]).unwrap();
/// assert_eq!(path.to_string(), "Customer/Orders");
/// assert_eq!(path.reversed().to_string(), "Orders/Customer");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PathSegmentToken {
    identifier: String,
    segment: SegmentKind,
    named_values: Option<Vec<NamedValue>>,
    next: Option<Box<PathSegmentToken>>,
}

impl PathSegmentToken {
    pub fn new(identifier: impl Into<String>, next: Option<PathSegmentToken>) -> Self {
        PathSegmentToken {
            identifier: identifier.into(),
            segment: SegmentKind::NonSystem,
            named_values: None,
            next: next.map(Box::new),
        }
    }

    pub fn system(identifier: impl Into<String>, next: Option<PathSegmentToken>) -> Self {
        PathSegmentToken {
            identifier: identifier.into(),
            segment: SegmentKind::System,
            named_values: None,
            next: next.map(Box::new),
        }
    }

    pub fn with_named_values(mut self, named_values: Vec<NamedValue>) -> Self {
        self.named_values = Some(named_values);
        self
    }

    /// Build a chain reading in the given order. Identifiers starting with
    /// `$` become system segments. Returns `None` for an empty input.
    pub fn from_segments<I, S>(segments: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let identifiers: Vec<String> = segments.into_iter().map(Into::into).collect();
        identifiers.into_iter().rev().fold(None, |next, identifier| {
            Some(if identifier.starts_with('$') {
                PathSegmentToken::system(identifier, next)
            } else {
                PathSegmentToken::new(identifier, next)
            })
        })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn segment_kind(&self) -> SegmentKind {
        self.segment
    }

    pub fn named_values(&self) -> Option<&[NamedValue]> {
        self.named_values.as_deref()
    }

    pub fn next(&self) -> Option<&PathSegmentToken> {
        self.next.as_deref()
    }

    pub fn is_system(&self) -> bool {
        self.segment == SegmentKind::System
    }

    /// Qualified names (`NS.Container.Function`, `NS.DerivedType`) carry a dot.
    pub fn is_namespace_or_container_qualified(&self) -> bool {
        self.identifier.contains('.')
    }

    pub fn segments(&self) -> Segments<'_> {
        Segments {
            current: Some(self),
        }
    }

    pub fn segment_count(&self) -> usize {
        self.segments().count()
    }

    pub fn last(&self) -> &PathSegmentToken {
        let mut current = self;
        while let Some(next) = current.next() {
            current = next;
        }
        current
    }

    /// The same chain in opposite order. Segment payloads are kept.
    pub fn reversed(self) -> Self {
        let mut head = self;
        let mut reversed: Option<Box<PathSegmentToken>> = None;
        loop {
            let remaining = head.next.take();
            head.next = reversed;
            match remaining {
                Some(next) => {
                    reversed = Some(Box::new(head));
                    head = *next;
                }
                None => return head,
            }
        }
    }

    /// Identifier-wise comparison, ignoring key values.
    pub fn same_path(&self, other: &PathSegmentToken) -> bool {
        let mut left = self.segments();
        let mut right = other.segments();
        loop {
            match (left.next(), right.next()) {
                (None, None) => return true,
                (Some(a), Some(b)) if a.identifier == b.identifier => continue,
                _ => return false,
            }
        }
    }

    pub fn kind(&self) -> QueryTokenKind {
        QueryTokenKind::PathSegment
    }

    pub fn accept<V: SyntacticTreeVisitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_path_segment(self)
    }
}

impl fmt::Display for PathSegmentToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let identifiers: Vec<&str> = self.segments().map(|s| s.identifier()).collect();
        f.write_str(&identifiers.join("/"))
    }
}

/// Iterator over a segment chain, head first.
pub struct Segments<'a> {
    current: Option<&'a PathSegmentToken>,
}

impl<'a> Iterator for Segments<'a> {
    type Item = &'a PathSegmentToken;

    fn next(&mut self) -> Option<Self::Item> {
        let segment = self.current?;
        self.current = segment.next();
        Some(segment)
    }
}
