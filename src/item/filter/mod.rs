/// Multi-criteria filtering of reservation records.
///
/// A [`FilterSpec`] holds up to five independent criteria; a record is kept when all of
/// the active ones hold:
///
/// | Criterion    | Record attribute | Rule                                              |
/// |--------------|------------------|---------------------------------------------------|
/// | `status`     | `RS`             | upper-cased value equals the status               |
/// | `id`         | `RID`            | exact, case sensitive                             |
/// | `begin_date` | `BD`             | on or after the date                              |
/// | `end_date`   | `ED`             | on or before the date                             |
/// | `stay_date`  | `BD` and `ED`    | `BD <= stay_date <= ED`                           |
///
/// Missing attributes make the criteria that need them fail. Malformed dates do the
/// same and are reported through [`Evaluation::date_error`].
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use rh_export::core::record::Record;
/// use rh_export::item::filter::{FilterSpecBuilder, matches};
///
/// let record = Record::from_iter([("RID", "R100"), ("BD", "2024-03-10"), ("ED", "2024-03-15")]);
///
/// let inside = FilterSpecBuilder::new()
///     .stay_date(NaiveDate::from_ymd_opt(2024, 3, 15))
///     .build();
/// let outside = FilterSpecBuilder::new()
///     .stay_date(NaiveDate::from_ymd_opt(2024, 3, 16))
///     .build();
///
/// assert!(matches(&record, &inside));
/// assert!(!matches(&record, &outside));
/// ```
pub mod date;
pub mod evaluator;
pub mod filter_spec;

pub use date::{DATE_FORMAT, parse_date};
pub use evaluator::{DateFieldError, Evaluation, FilterProcessor, evaluate, matches};
pub use filter_spec::{FilterSpec, FilterSpecBuilder, Status};
