//! Filter and selection building for store queries.
//!
//! A [`Selection`] composes conditions, ordering, and pagination into a
//! value the store renders into a parametrized query. Conditions are pure
//! data: building one never touches storage, and the carried values are
//! always bound as parameters, never rendered into query text.

/// A scalar value carried by an equality condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Int(i64),
    Text(String),
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

/// A single filter condition over a named column.
///
/// Conditions AND-combine inside a [`Selection`]; there is no OR and no
/// nesting. Field names are `&'static str` so call sites use compile-time
/// literals rather than runtime strings.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Exact match: `field = value`.
    Equals { field: &'static str, value: Scalar },
    /// Substring match: the value is wrapped in wildcards by the store,
    /// with any literal wildcard characters in it escaped first.
    Contains { field: &'static str, value: String },
    /// Strictly greater: `field > value`.
    GreaterThan { field: &'static str, value: i64 },
    /// Strictly less: `field < value`.
    LessThan { field: &'static str, value: i64 },
}

impl Condition {
    pub fn equals(field: &'static str, value: impl Into<Scalar>) -> Self {
        Condition::Equals {
            field,
            value: value.into(),
        }
    }

    pub fn contains(field: &'static str, value: impl Into<String>) -> Self {
        Condition::Contains {
            field,
            value: value.into(),
        }
    }

    pub fn greater_than(field: &'static str, value: i64) -> Self {
        Condition::GreaterThan { field, value }
    }

    pub fn less_than(field: &'static str, value: i64) -> Self {
        Condition::LessThan { field, value }
    }
}

/// Sort directive for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub field: &'static str,
    pub descending: bool,
}

impl SortOrder {
    pub fn asc(field: &'static str) -> Self {
        Self {
            field,
            descending: false,
        }
    }

    pub fn desc(field: &'static str) -> Self {
        Self {
            field,
            descending: true,
        }
    }
}

/// A composed store query: conditions, ordering, and pagination.
///
/// # Examples
///
/// ```
/// use gleaner_core::query::{Condition, Selection, SortOrder};
///
/// let newest_past_cursor = Selection::new()
///     .filter(Condition::greater_than("id", 42))
///     .order_by(SortOrder::desc("id"))
///     .limit(30);
/// assert_eq!(newest_past_cursor.conditions.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub conditions: Vec<Condition>,
    pub order: Option<SortOrder>,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

impl Selection {
    /// An unconstrained selection: every row, default order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a condition; all conditions AND-combine.
    pub fn filter(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Overrides the store's default ascending-ID order.
    pub fn order_by(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }

    /// Skips leading rows. Takes effect only when [`Selection::limit`] is
    /// also set; an offset on its own is ignored.
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Caps the number of returned rows.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}
