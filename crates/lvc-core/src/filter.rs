// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Filter predicates and combination
//!
//! Each widget attached to a list view registers at most one [`Filter`]. At
//! update time all registered filters are combined into a single
//! [`CombinedFilter`] according to the data source's [`QueryMode`]:
//!
//! -   [`QueryMode::Online`]: textual clauses are concatenated, which the
//!     query backend reads as a conjunction (AND across widgets)
//! -   [`QueryMode::Offline`]: structured predicates are collected into one
//!     explicitly OR-combined group
//!
//! This asymmetry mirrors the differing capabilities of the two query
//! backends and is a stable behavioral contract.

use smol_str::SmolStr;
use std::fmt;

/// Query execution mode of a data source
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryMode {
    /// Queries are textual fragments evaluated by a remote backend
    Online,
    /// Queries are structured predicates evaluated locally
    Offline,
}

/// Comparison operator of an [`AttributeFilter`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Contains,
    StartsWith,
    EndsWith,
    Equals,
    NotEquals,
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
}

impl Operator {
    /// The operator's name as used in textual query clauses
    pub fn as_str(self) -> &'static str {
        use Operator::*;
        match self {
            Contains => "contains",
            StartsWith => "starts-with",
            EndsWith => "ends-with",
            Equals => "=",
            NotEquals => "!=",
            Greater => ">",
            GreaterOrEqual => ">=",
            Less => "<",
            LessOrEqual => "<=",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured predicate over a single attribute
///
/// This is the unit of offline (structured) filtering. In online mode it is
/// rendered as a textual clause via [`AttributeFilter::to_clause`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeFilter {
    /// Name of the filtered attribute
    pub attribute: SmolStr,
    pub operator: Operator,
    /// Comparison value (always textual; the backend coerces)
    pub value: String,
    /// Optional association path from the queried entity to the attribute
    pub path: Option<SmolStr>,
}

impl AttributeFilter {
    /// Construct without an association path
    pub fn new(
        attribute: impl Into<SmolStr>,
        operator: Operator,
        value: impl Into<String>,
    ) -> Self {
        AttributeFilter {
            attribute: attribute.into(),
            operator,
            value: value.into(),
            path: None,
        }
    }

    /// Set the association path
    #[must_use]
    pub fn with_path(mut self, path: impl Into<SmolStr>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Render as a textual clause (without enclosing brackets)
    pub fn to_clause(&self) -> String {
        let attr = match &self.path {
            Some(path) => format!("{}/{}", path, self.attribute),
            None => self.attribute.to_string(),
        };
        let value = escape_value(&self.value);
        match self.operator {
            Operator::Contains | Operator::StartsWith | Operator::EndsWith => {
                format!("{}({attr}, '{value}')", self.operator)
            }
            op => format!("{attr} {op} '{value}'"),
        }
    }
}

/// Escape a comparison value for inclusion in a textual clause
///
/// Single quotes are doubled, matching the quoting convention of the online
/// query syntax.
pub(crate) fn escape_value(value: &str) -> String {
    value.replace('\'', "''")
}

/// One widget's registered constraint
///
/// Stored per widget identifier by the coalescer; an empty filter keeps the
/// registration but contributes nothing to the combined result.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Filter {
    /// No constraint (widget inactive or cleared)
    #[default]
    None,
    /// A textual query fragment, e.g. `[x = 1]` (online mode only)
    Expression(String),
    /// Structured predicates, OR-combined within this entry
    Attributes(Vec<AttributeFilter>),
}

impl Filter {
    /// Construct a textual filter
    pub fn expression(text: impl Into<String>) -> Self {
        Filter::Expression(text.into())
    }

    /// Construct a structured filter over a single attribute
    pub fn attribute(filter: AttributeFilter) -> Self {
        Filter::Attributes(vec![filter])
    }

    /// Whether this filter contributes nothing when combined
    pub fn is_empty(&self) -> bool {
        match self {
            Filter::None => true,
            Filter::Expression(text) => text.is_empty(),
            Filter::Attributes(list) => list.is_empty(),
        }
    }
}

/// The combined constraint pushed to a list view's data source
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CombinedFilter {
    /// Concatenated textual clauses; the backend evaluates the sequence as a
    /// conjunction
    Expression(String),
    /// Structured predicates to be evaluated as one OR-combined group
    Group(Vec<AttributeFilter>),
}

impl CombinedFilter {
    /// True if no registered filter contributed to this result
    pub fn is_empty(&self) -> bool {
        match self {
            CombinedFilter::Expression(text) => text.is_empty(),
            CombinedFilter::Group(list) => list.is_empty(),
        }
    }
}

/// Combine registered filters in stable (insertion) order
///
/// Empty entries are skipped. In online mode, structured entries are rendered
/// as a bracketed clause (predicates within one entry are OR-combined); in
/// offline mode, textual entries cannot be evaluated and are dropped with a
/// warning.
pub fn combine<'a, I: Iterator<Item = &'a Filter>>(mode: QueryMode, entries: I) -> CombinedFilter {
    match mode {
        QueryMode::Online => {
            let mut out = String::new();
            for filter in entries {
                match filter {
                    Filter::Expression(text) => out.push_str(text),
                    Filter::Attributes(list) if !list.is_empty() => {
                        out.push('[');
                        for (i, af) in list.iter().enumerate() {
                            if i > 0 {
                                out.push_str(" or ");
                            }
                            out.push_str(&af.to_clause());
                        }
                        out.push(']');
                    }
                    _ => (),
                }
            }
            CombinedFilter::Expression(out)
        }
        QueryMode::Offline => {
            let mut group = Vec::new();
            for filter in entries {
                match filter {
                    Filter::Expression(text) if !text.is_empty() => {
                        log::warn!(
                            target: "lvc_core::filter",
                            "combine: dropping textual constraint in offline mode: {text}"
                        );
                    }
                    Filter::Attributes(list) => group.extend(list.iter().cloned()),
                    _ => (),
                }
            }
            CombinedFilter::Group(group)
        }
    }
}
