use chrono::NaiveDate;
use log::debug;

use super::{date::parse_date, filter_spec::FilterSpec, filter_spec::Status};
use crate::core::{
    item::{ItemProcessor, ItemProcessorResult},
    record::{BEGIN_DATE, END_DATE, Record},
};
use crate::error::RhError;

/// A date attribute that an active criterion needed but could not parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFieldError {
    pub field: &'static str,
    pub value: String,
}

/// Outcome of checking one record against a [`FilterSpec`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    matched: bool,
    date_error: Option<DateFieldError>,
}

impl Evaluation {
    pub fn is_match(&self) -> bool {
        self.matched
    }

    /// First malformed date among the attributes the filter reads, `BD` before `ED`.
    /// When set, the record never matches.
    pub fn date_error(&self) -> Option<&DateFieldError> {
        self.date_error.as_ref()
    }
}

/// Checks `record` against every active criterion of `spec`.
///
/// Date attributes are only parsed when a criterion reads them. A missing or malformed
/// date makes the criteria that need it fail; it never raises.
pub fn evaluate(record: &Record, spec: &FilterSpec) -> Evaluation {
    let (begin, begin_error) = date_field(record, BEGIN_DATE, spec.uses_begin_date());
    let (end, end_error) = date_field(record, END_DATE, spec.uses_end_date());

    let matched = status_matches(record, spec.status())
        && id_matches(record, spec.id())
        && lower_bound_matches(begin, spec.begin_date())
        && upper_bound_matches(end, spec.end_date())
        && stay_matches(begin, end, spec.stay_date());

    Evaluation {
        matched,
        date_error: begin_error.or(end_error),
    }
}

/// `true` when `record` satisfies every active criterion of `spec`.
pub fn matches(record: &Record, spec: &FilterSpec) -> bool {
    evaluate(record, spec).is_match()
}

fn date_field(
    record: &Record,
    field: &'static str,
    needed: bool,
) -> (Option<NaiveDate>, Option<DateFieldError>) {
    if !needed {
        return (None, None);
    }
    match record.get(field) {
        None => (None, None),
        Some(value) => match parse_date(value) {
            Some(date) => (Some(date), None),
            None => (
                None,
                Some(DateFieldError {
                    field,
                    value: value.to_string(),
                }),
            ),
        },
    }
}

// Only the record side is upper-cased: filter statuses are canonical already.
fn status_matches(record: &Record, status: Option<Status>) -> bool {
    match status {
        None => true,
        Some(status) => record
            .status()
            .is_some_and(|rs| rs.to_uppercase() == status.as_str()),
    }
}

fn id_matches(record: &Record, id: Option<&str>) -> bool {
    match id {
        None => true,
        Some(id) => record.reservation_id() == Some(id),
    }
}

fn lower_bound_matches(begin: Option<NaiveDate>, bound: Option<NaiveDate>) -> bool {
    match bound {
        None => true,
        Some(bound) => begin.is_some_and(|begin| begin >= bound),
    }
}

fn upper_bound_matches(end: Option<NaiveDate>, bound: Option<NaiveDate>) -> bool {
    match bound {
        None => true,
        Some(bound) => end.is_some_and(|end| end <= bound),
    }
}

fn stay_matches(begin: Option<NaiveDate>, end: Option<NaiveDate>, stay: Option<NaiveDate>) -> bool {
    match (stay, begin, end) {
        (None, _, _) => true,
        (Some(stay), Some(begin), Some(end)) => begin <= stay && stay <= end,
        _ => false,
    }
}

/// [`ItemProcessor`] keeping the records of one document that match a [`FilterSpec`].
///
/// Records excluded because of a malformed date come back as
/// [`RhError::FieldDateFormat`] naming the document, other non-matching records as
/// `Ok(None)`.
pub struct FilterProcessor<'a> {
    spec: &'a FilterSpec,
    document: &'a str,
}

impl<'a> FilterProcessor<'a> {
    pub fn new(spec: &'a FilterSpec, document: &'a str) -> Self {
        Self { spec, document }
    }
}

impl ItemProcessor<Record, Record> for FilterProcessor<'_> {
    fn process(&self, item: &Record) -> ItemProcessorResult<Record> {
        let evaluation = evaluate(item, self.spec);

        if let Some(error) = evaluation.date_error() {
            return Err(RhError::FieldDateFormat {
                document: self.document.to_string(),
                field: error.field.to_string(),
                value: error.value.clone(),
            });
        }

        if evaluation.is_match() {
            Ok(Some(item.clone()))
        } else {
            debug!("Record {:?} filtered out", item.reservation_id());
            Ok(None)
        }
    }
}
