#![cfg_attr(docsrs, feature(doc_cfg))]

/*!
 # RH Export

 Extract `<RH>` reservation records from XML documents, filter them and export the
 matching ones as CSV.

 ## Core Concepts

- **Document:** an uploaded XML buffer and the name used to report problems about it.
- **Record:** the attributes of one `<RH>` element, in source order. `RS` (status),
  `RID` (reservation id), `BD` (check-in) and `ED` (check-out) have a meaning for the
  filter; every other attribute is carried along untouched.
- **FilterSpec:** up to five optional criteria (status, id, begin date, end date, stay
  date). A record is kept when all the active ones hold.
- **FilterJob:** runs the extraction and the filter over a batch of documents and
  collects the result set together with non-fatal diagnostics.
- **ItemReader / ItemProcessor / ItemWriter:** the seams between extraction, filtering
  and output.

 Malformed input never aborts a run. A document that is not well-formed XML is skipped
 with one diagnostic; a record whose `BD`/`ED` cannot be read while a date criterion
 needs it is skipped with one diagnostic.

 ## Features

| **Feature**   | **Description**                                               |
|---------------|---------------------------------------------------------------|
| csv           | Enables the CSV `ItemWriter` and `ItemReader` for exports      |
| logger        | Enables a logger `ItemWriter`, useful for debugging purposes  |
| cli           | Builds the `rh-export` command line tool                      |
| full          | Enables all available features                                |

 ## Getting Started

```rust
# use chrono::NaiveDate;
# use rh_export::{
#     core::{document::Document, job::{FilterJobBuilder, RunStatus}},
#     item::filter::{FilterSpecBuilder, Status},
#     RhError,
# };
fn main() -> Result<(), RhError> {
    let documents = vec![Document::new(
        "march.xml",
        r#"<Export>
             <RH RID="R100" RS="Reserved" BD="2024-03-10" ED="2024-03-15"/>
             <RH RID="R101" RS="Cancelled" BD="2024-03-11" ED="2024-03-12"/>
           </Export>"#,
    )];

    let spec = FilterSpecBuilder::new()
        .status(Status::Reserved)
        .stay_date(NaiveDate::from_ymd_opt(2024, 3, 12))
        .build();

    let job = FilterJobBuilder::new().filter(spec).build();
    let execution = job.run(&documents)?;

    assert_eq!(execution.status(), RunStatus::Matches(1));
    assert!(execution.diagnostics.is_empty());

    Ok(())
}
```

 ## License
 Licensed under either of

 -   Apache License, Version 2.0
     ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
 -   MIT license
     ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)

 at your option.
 */

/// Core module: records, documents, item traits and the filter job
pub mod core;

/// Error types
pub mod error;

#[doc(inline)]
pub use error::*;

/// Record extraction, filtering and export components
pub mod item;
