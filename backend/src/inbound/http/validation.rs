//! Shared query-string validation for listing endpoints.

use chrono::{DateTime, Utc};
use pagination::{Direction, Limit, LimitError, PageRequest};
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;

use crate::domain::Error;

/// Validation error codes carried in `details.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidLimit,
    InvalidTimestamp,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidLimit => "invalid_limit",
            ErrorCode::InvalidTimestamp => "invalid_timestamp",
        }
    }
}

/// Newtype wrapper for query field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, code: ErrorCode, message: String, value: String) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code.as_str(),
    }))
}

pub(crate) fn parse_limit(value: i64, field: FieldName) -> Result<Limit, Error> {
    Limit::new(value).map_err(|err: LimitError| {
        field_error(field, ErrorCode::InvalidLimit, err.to_string(), value.to_string())
    })
}

pub(crate) fn parse_rfc3339_timestamp(
    value: String,
    field: FieldName,
) -> Result<DateTime<Utc>, Error> {
    DateTime::parse_from_rfc3339(&value)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|_| {
            let message = format!("{} must be an RFC 3339 timestamp", field.as_str());
            field_error(field, ErrorCode::InvalidTimestamp, message, value)
        })
}

const LIMIT: FieldName = FieldName::new("limit");

/// `limit`, `since` and `desc` query parameters shared by listings.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListingQuery {
    /// Maximum number of items; must be positive.
    pub limit: Option<i64>,
    /// Boundary value; its meaning depends on the listing.
    pub since: Option<String>,
    /// Reverse the ordering.
    pub desc: Option<bool>,
}

impl ListingQuery {
    /// Build a page request, converting `since` with `parse_since`.
    pub(crate) fn into_page<C>(
        self,
        parse_since: impl FnOnce(String) -> Result<C, Error>,
    ) -> Result<PageRequest<C>, Error> {
        let mut page = PageRequest::new(Direction::from_desc(self.desc.unwrap_or(false)));
        if let Some(limit) = self.limit {
            page = page.with_limit(parse_limit(limit, LIMIT)?);
        }
        if let Some(since) = self.since {
            page = page.with_since(parse_since(since)?);
        }
        Ok(page)
    }
}
