use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::RhError;

/// Reservation status a filter can ask for.
///
/// The string form is the canonical, upper case value compared against the record's
/// `RS` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "CHECKED OUT")]
    CheckedOut,
    #[serde(rename = "RESERVED")]
    Reserved,
    #[serde(rename = "CANCELLED")]
    Cancelled,
    #[serde(rename = "NO SHOW")]
    NoShow,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::CheckedOut,
        Status::Reserved,
        Status::Cancelled,
        Status::NoShow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::CheckedOut => "CHECKED OUT",
            Status::Reserved => "RESERVED",
            Status::Cancelled => "CANCELLED",
            Status::NoShow => "NO SHOW",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = RhError;

    /// Only the canonical spellings are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                RhError::InvalidFilter(format!(
                    "unknown status '{}', expected one of: {}",
                    s,
                    Status::ALL.map(|status| status.as_str()).join(", ")
                ))
            })
    }
}

/// Criteria of one filter run. Every criterion is optional; an unset one accepts
/// every record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(default)]
    status: Option<Status>,
    #[serde(default, deserialize_with = "deserialize_id")]
    id: Option<String>,
    #[serde(default)]
    begin_date: Option<NaiveDate>,
    #[serde(default)]
    end_date: Option<NaiveDate>,
    #[serde(default)]
    stay_date: Option<NaiveDate>,
}

fn trimmed_id(id: &str) -> Option<String> {
    let id = id.trim();
    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let id: Option<String> = Option::deserialize(deserializer)?;
    Ok(id.as_deref().and_then(trimmed_id))
}

impl FilterSpec {
    pub fn status(&self) -> Option<Status> {
        self.status
    }

    /// Trimmed reservation id, never empty.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn begin_date(&self) -> Option<NaiveDate> {
        self.begin_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn stay_date(&self) -> Option<NaiveDate> {
        self.stay_date
    }

    /// `true` when no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.id.is_none()
            && self.begin_date.is_none()
            && self.end_date.is_none()
            && self.stay_date.is_none()
    }

    /// `true` when a criterion reads the record's `BD` attribute.
    pub fn uses_begin_date(&self) -> bool {
        self.begin_date.is_some() || self.stay_date.is_some()
    }

    /// `true` when a criterion reads the record's `ED` attribute.
    pub fn uses_end_date(&self) -> bool {
        self.end_date.is_some() || self.stay_date.is_some()
    }
}

/// Builder for [`FilterSpec`].
///
/// ```
/// use chrono::NaiveDate;
/// use rh_export::item::filter::{FilterSpecBuilder, Status};
///
/// let spec = FilterSpecBuilder::new()
///     .status(Status::Reserved)
///     .id("  R100 ")
///     .stay_date(NaiveDate::from_ymd_opt(2024, 3, 12))
///     .build();
///
/// assert_eq!(spec.id(), Some("R100"));
/// assert_eq!(spec.begin_date(), None);
/// ```
#[derive(Default)]
pub struct FilterSpecBuilder {
    spec: FilterSpec,
}

impl FilterSpecBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status<S: Into<Option<Status>>>(mut self, status: S) -> Self {
        self.spec.status = status.into();
        self
    }

    /// Sets the reservation id. Surrounding whitespace is dropped and a blank id leaves
    /// the criterion unset.
    pub fn id<S: AsRef<str>>(mut self, id: S) -> Self {
        self.spec.id = trimmed_id(id.as_ref());
        self
    }

    pub fn begin_date<D: Into<Option<NaiveDate>>>(mut self, date: D) -> Self {
        self.spec.begin_date = date.into();
        self
    }

    pub fn end_date<D: Into<Option<NaiveDate>>>(mut self, date: D) -> Self {
        self.spec.end_date = date.into();
        self
    }

    pub fn stay_date<D: Into<Option<NaiveDate>>>(mut self, date: D) -> Self {
        self.spec.stay_date = date.into();
        self
    }

    pub fn build(self) -> FilterSpec {
        self.spec
    }
}
