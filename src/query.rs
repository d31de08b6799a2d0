//! Filtering the call collection.
//!
//! A [`Query`] is a conjunction of [`Filter`]s. Filters built from raw
//! query parameters that cannot be parsed never match, so a request with
//! `operator_id=abc` returns no calls rather than every call.

use serde::Deserialize;
use time::OffsetDateTime;

use crate::blank::non_empty;
use crate::call::{Call, CallStatus, Id};
use crate::timestamp;

/// A single predicate over call fields.
#[derive(Clone, Debug, PartialEq)]
pub enum Filter {
    Operator(Option<Id>),
    Status(Option<CallStatus>),
    Purpose(Option<Id>),
    Category(Option<Id>),
    /// Calls started at or after the bound.
    From(Option<OffsetDateTime>),
    /// Calls started at or before the bound.
    To(Option<OffsetDateTime>),
}

impl Filter {
    pub fn matches(&self, call: &Call) -> bool {
        use Filter::*;

        match self {
            Operator(id) => same(id, &call.operator_id),
            Status(status) => *status == Some(call.status),
            Purpose(id) => same(id, &call.purpose_id),
            Category(id) => same(id, &call.category_id),
            From(bound) => bound.map_or(false, |bound| call.started_at >= bound),
            To(bound) => bound.map_or(false, |bound| call.started_at <= bound),
        }
    }
}

fn same(wanted: &Option<Id>, actual: &Option<Id>) -> bool {
    wanted.is_some() && wanted == actual
}

/// A conjunction of filters. The empty query matches every call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Query {
    filters: Vec<Filter>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn operator_id(self, id: Id) -> Self {
        self.with(Filter::Operator(Some(id)))
    }

    pub fn status(self, status: CallStatus) -> Self {
        self.with(Filter::Status(Some(status)))
    }

    pub fn purpose_id(self, id: Id) -> Self {
        self.with(Filter::Purpose(Some(id)))
    }

    pub fn category_id(self, id: Id) -> Self {
        self.with(Filter::Category(Some(id)))
    }

    /// Keeps calls started at or after `bound`.
    pub fn since(self, bound: OffsetDateTime) -> Self {
        self.with(Filter::From(Some(bound)))
    }

    /// Keeps calls started at or before `bound`.
    pub fn until(self, bound: OffsetDateTime) -> Self {
        self.with(Filter::To(Some(bound)))
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn matches(&self, call: &Call) -> bool {
        self.filters.iter().all(|filter| filter.matches(call))
    }
}

/// The query string accepted by the call listing. Unknown parameters
/// are ignored.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CallsQuery {
    pub operator_id: Option<String>,
    pub status: Option<String>,
    pub purpose_id: Option<String>,
    pub category_id: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

impl From<CallsQuery> for Query {
    fn from(raw: CallsQuery) -> Self {
        let CallsQuery {
            operator_id,
            status,
            purpose_id,
            category_id,
            from,
            to,
        } = raw;

        let mut query = Query::new();

        if let Some(id) = supplied(&operator_id) {
            query = query.with(Filter::Operator(parse_id(id)));
        }
        if let Some(status) = supplied(&status) {
            query = query.with(Filter::Status(status.parse().ok()));
        }
        if let Some(id) = supplied(&purpose_id) {
            query = query.with(Filter::Purpose(parse_id(id)));
        }
        if let Some(id) = supplied(&category_id) {
            query = query.with(Filter::Category(parse_id(id)));
        }
        if let Some(bound) = supplied(&from) {
            query = query.with(Filter::From(timestamp::parse_bound(bound)));
        }
        if let Some(bound) = supplied(&to) {
            query = query.with(Filter::To(timestamp::parse_bound(bound)));
        }

        query
    }
}

fn supplied(raw: &Option<String>) -> Option<&str> {
    raw.as_deref().and_then(non_empty)
}

fn parse_id(raw: &str) -> Option<Id> {
    raw.trim().parse().ok()
}
