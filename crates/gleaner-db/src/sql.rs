//! Rendering of [`Selection`] values into SQLite clause text.
//!
//! The renderer produces the clause tail of a SELECT statement (WHERE,
//! ORDER BY, LIMIT) together with the values to bind, in order. Carried
//! values never appear in the rendered text; field names are compile-time
//! literals, so the only runtime data reaching SQLite goes through `?`
//! placeholders.

use gleaner_core::{Condition, Scalar, Selection, SortOrder};

/// Escape character for `LIKE` patterns rendered by [`render`].
const LIKE_ESCAPE: char = '\\';

/// A parameter value awaiting binding, in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum BindValue {
    Int(i64),
    Text(String),
}

/// The clause tail of a SELECT statement plus its bind values.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RenderedSelection {
    /// WHERE, ORDER BY, and LIMIT clauses with a leading space, ready to
    /// append after `SELECT cols FROM table`.
    pub clauses: String,
    /// Values for the `?` placeholders, left to right.
    pub binds: Vec<BindValue>,
}

/// Renders a selection into SQLite clauses and bind values.
///
/// Conditions AND-combine in insertion order. Ordering defaults to
/// ascending `id`. `OFFSET` renders only when a `LIMIT` is present; an
/// offset on its own is dropped.
pub(crate) fn render(selection: &Selection) -> RenderedSelection {
    let mut clauses = String::new();
    let mut binds = Vec::new();

    if !selection.conditions.is_empty() {
        let mut parts = Vec::with_capacity(selection.conditions.len());
        for condition in &selection.conditions {
            match condition {
                Condition::Equals { field, value } => {
                    parts.push(format!("{field} = ?"));
                    binds.push(match value {
                        Scalar::Int(v) => BindValue::Int(*v),
                        Scalar::Text(v) => BindValue::Text(v.clone()),
                    });
                }
                Condition::Contains { field, value } => {
                    parts.push(format!("{field} LIKE ? ESCAPE '{LIKE_ESCAPE}'"));
                    binds.push(BindValue::Text(format!("%{}%", escape_like(value))));
                }
                Condition::GreaterThan { field, value } => {
                    parts.push(format!("{field} > ?"));
                    binds.push(BindValue::Int(*value));
                }
                Condition::LessThan { field, value } => {
                    parts.push(format!("{field} < ?"));
                    binds.push(BindValue::Int(*value));
                }
            }
        }
        clauses.push_str(" WHERE ");
        clauses.push_str(&parts.join(" AND "));
    }

    let order = selection.order.unwrap_or(SortOrder::asc("id"));
    let direction = if order.descending { "DESC" } else { "ASC" };
    clauses.push_str(&format!(" ORDER BY {} {}", order.field, direction));

    if let Some(limit) = selection.limit {
        clauses.push_str(" LIMIT ?");
        binds.push(BindValue::Int(i64::from(limit)));
        if let Some(offset) = selection.offset {
            clauses.push_str(" OFFSET ?");
            binds.push(BindValue::Int(i64::from(offset)));
        }
    }

    RenderedSelection { clauses, binds }
}

/// Escapes `%`, `_`, and the escape character itself so substring values
/// containing them match literally instead of expanding as wildcards.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if c == '%' || c == '_' || c == LIKE_ESCAPE {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}
