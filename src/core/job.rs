use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::error::RhError;
use crate::item::filter::{FilterProcessor, FilterSpec};
use crate::item::xml::{DEFAULT_TAG, RhItemReaderBuilder};

use super::{
    document::Document,
    item::{ItemProcessor, ItemReader, ItemWriter},
    record::{Record, ResultSet},
};

/// Type alias for job execution results.
///
/// Only writer failures end up as `Err`: malformed documents and dates are reported as
/// diagnostics inside the `FilterExecution`.
type JobResult<T> = Result<T, RhError>;

/// How a run ended, from the point of view of whoever displays it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Nothing was uploaded.
    NoDocuments,
    /// Documents were processed but no record passed the filter.
    NoMatches,
    /// Number of records that passed the filter.
    Matches(usize),
}

/// Represents the execution of a filter job over a batch of documents.
#[derive(Debug)]
pub struct FilterExecution {
    /// The time when the job started executing
    pub start: Instant,
    /// The time when the job finished executing
    pub end: Instant,
    /// The total duration of the job execution
    pub duration: Duration,
    /// Matching records, documents in upload order and records in document order
    pub results: ResultSet,
    /// Non-fatal problems, in the order they were met
    pub diagnostics: Vec<RhError>,
    pub document_count: usize,
    pub failed_document_count: usize,
    pub read_count: usize,
    pub skip_count: usize,
}

impl FilterExecution {
    fn started() -> Self {
        let start = Instant::now();
        Self {
            start,
            end: start,
            duration: Duration::ZERO,
            results: ResultSet::new(),
            diagnostics: Vec::new(),
            document_count: 0,
            failed_document_count: 0,
            read_count: 0,
            skip_count: 0,
        }
    }

    pub fn match_count(&self) -> usize {
        self.results.len()
    }

    pub fn status(&self) -> RunStatus {
        if self.document_count == 0 {
            RunStatus::NoDocuments
        } else if self.results.is_empty() {
            RunStatus::NoMatches
        } else {
            RunStatus::Matches(self.results.len())
        }
    }
}

/// Extracts and filters the records of a batch of documents.
///
/// Documents are handled one after the other, in the order given. A document that does
/// not parse is skipped with one diagnostic; a record whose dates cannot be read is
/// skipped with one diagnostic. Neither stops the run.
///
/// # Examples
///
/// ```
/// use rh_export::core::document::Document;
/// use rh_export::core::job::{FilterJobBuilder, RunStatus};
/// use rh_export::item::filter::{FilterSpecBuilder, Status};
///
/// let documents = vec![
///     Document::new("a.xml", r#"<R><RH RID="1" RS="Reserved"/><RH RID="2" RS="Cancelled"/></R>"#),
///     Document::new("b.xml", "<R><RH RID=\"3\">"),
/// ];
///
/// let job = FilterJobBuilder::new()
///     .filter(FilterSpecBuilder::new().status(Status::Reserved).build())
///     .build();
/// let execution = job.run(&documents).unwrap();
///
/// assert_eq!(execution.status(), RunStatus::Matches(1));
/// assert_eq!(execution.diagnostics.len(), 1);
/// ```
pub struct FilterJob<'a> {
    spec: FilterSpec,
    tag: String,
    writers: Vec<&'a dyn ItemWriter<Record>>,
}

impl FilterJob<'_> {
    pub fn spec(&self) -> &FilterSpec {
        &self.spec
    }

    /// Runs the filter over `documents`.
    ///
    /// Every writer is opened before the first document, receives the matching records
    /// of each document, and is closed at the end.
    pub fn run(&self, documents: &[Document]) -> JobResult<FilterExecution> {
        let mut execution = FilterExecution::started();

        info!("Start of job: {} document(s), {:?}", documents.len(), self.spec);

        for writer in &self.writers {
            writer.open()?;
        }

        for document in documents {
            let matched = self.run_document(document, &mut execution);

            for writer in &self.writers {
                writer.write(&matched)?;
                writer.flush()?;
            }
            execution.results.extend(matched);
        }

        for writer in &self.writers {
            writer.close()?;
        }

        execution.end = Instant::now();
        execution.duration = execution.start.elapsed();

        info!(
            "End of job: {} document(s), {} failed, {} record(s) read, {} matched, {} skipped in {:?}",
            execution.document_count,
            execution.failed_document_count,
            execution.read_count,
            execution.match_count(),
            execution.skip_count,
            execution.duration
        );

        Ok(execution)
    }

    fn run_document(&self, document: &Document, execution: &mut FilterExecution) -> Vec<Record> {
        debug!("Start of document {}", document.name());
        execution.document_count += 1;

        let reader = RhItemReaderBuilder::new()
            .tag(&self.tag)
            .from_document(document);
        let processor = FilterProcessor::new(&self.spec, document.name());
        let mut matched = Vec::new();

        loop {
            let record = match reader.read() {
                Ok(Some(record)) => record,
                Ok(None) => break,
                Err(error) => {
                    execution.failed_document_count += 1;
                    execution.diagnostics.push(error);
                    break;
                }
            };
            execution.read_count += 1;

            match processor.process(&record) {
                Ok(Some(record)) => matched.push(record),
                Ok(None) => {}
                Err(error) => {
                    warn!("{}", error);
                    execution.skip_count += 1;
                    execution.diagnostics.push(error);
                }
            }
        }

        debug!(
            "End of document {}: {} record(s) matched",
            document.name(),
            matched.len()
        );
        matched
    }
}

/// Builder for [`FilterJob`]. Without a filter every record matches.
#[derive(Default)]
pub struct FilterJobBuilder<'a> {
    spec: FilterSpec,
    tag: Option<String>,
    writers: Vec<&'a dyn ItemWriter<Record>>,
}

impl<'a> FilterJobBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, spec: FilterSpec) -> Self {
        self.spec = spec;
        self
    }

    /// Overrides the tag of the record elements (`RH` by default).
    pub fn tag<S: Into<String>>(mut self, tag: S) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Adds a writer receiving the matching records. May be called several times.
    pub fn writer(mut self, writer: &'a impl ItemWriter<Record>) -> Self {
        self.writers.push(writer);
        self
    }

    pub fn build(self) -> FilterJob<'a> {
        FilterJob {
            spec: self.spec,
            tag: self.tag.unwrap_or_else(|| DEFAULT_TAG.to_string()),
            writers: self.writers,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use chrono::NaiveDate;

    use super::*;
    use crate::item::filter::FilterSpecBuilder;

    #[derive(Default)]
    struct RecordingWriter {
        calls: RefCell<Vec<String>>,
        records: RefCell<Vec<Record>>,
    }

    impl ItemWriter<Record> for RecordingWriter {
        fn write(&self, items: &[Record]) -> Result<(), RhError> {
            self.calls.borrow_mut().push(format!("write {}", items.len()));
            self.records.borrow_mut().extend_from_slice(items);
            Ok(())
        }

        fn open(&self) -> Result<(), RhError> {
            self.calls.borrow_mut().push("open".to_string());
            Ok(())
        }

        fn close(&self) -> Result<(), RhError> {
            self.calls.borrow_mut().push("close".to_string());
            Ok(())
        }
    }

    struct FailingWriter;

    impl ItemWriter<Record> for FailingWriter {
        fn write(&self, _items: &[Record]) -> Result<(), RhError> {
            Err(RhError::ItemWriter("disk full".to_string()))
        }
    }

    fn documents() -> Vec<Document> {
        vec![
            Document::new(
                "first.xml",
                r#"<Root>
                    <RH RID="R1" RS="Reserved" BD="2024-03-10" ED="2024-03-15"/>
                    <RH RID="R2" RS="Cancelled" BD="2024-03-11" ED="2024-03-12"/>
                </Root>"#,
            ),
            Document::new("broken.xml", "<Root><RH RID=\"R9\"></Root>"),
            Document::new(
                "second.xml",
                r#"<Root><Group><RH RID="R3" RS="reserved" BD="not-a-date" ED="2024-04-02"/></Group>
                   <RH RID="R4" RS="Checked Out" BD="2024-04-01" ED="2024-04-03"/></Root>"#,
            ),
        ]
    }

    #[test]
    fn no_documents_is_distinct_from_no_matches() {
        let job = FilterJobBuilder::new().build();

        let execution = job.run(&[]).unwrap();
        assert_eq!(execution.status(), RunStatus::NoDocuments);
        assert!(execution.diagnostics.is_empty());

        let execution = job
            .run(&[Document::new("empty.xml", "<Root/>")])
            .unwrap();
        assert_eq!(execution.status(), RunStatus::NoMatches);
    }

    #[test]
    fn without_filter_every_parsed_record_is_kept_in_order() {
        let job = FilterJobBuilder::new().build();

        let execution = job.run(&documents()).unwrap();

        let ids: Vec<&str> = execution
            .results
            .iter()
            .filter_map(Record::reservation_id)
            .collect();
        assert_eq!(ids, vec!["R1", "R2", "R3", "R4"]);
        assert_eq!(execution.document_count, 3);
        assert_eq!(execution.failed_document_count, 1);
        assert_eq!(execution.read_count, 4);
        assert_eq!(execution.skip_count, 0);
        assert_eq!(execution.diagnostics.len(), 1);
        assert!(matches!(
            &execution.diagnostics[0],
            RhError::DocumentParse { document, .. } if document == "broken.xml"
        ));
    }

    #[test]
    fn date_errors_skip_only_the_record() {
        let spec = FilterSpecBuilder::new()
            .begin_date(NaiveDate::from_ymd_opt(2024, 3, 11))
            .build();
        let job = FilterJobBuilder::new().filter(spec).build();

        let execution = job.run(&documents()).unwrap();

        let ids: Vec<&str> = execution
            .results
            .iter()
            .filter_map(Record::reservation_id)
            .collect();
        assert_eq!(ids, vec!["R2", "R4"]);
        assert_eq!(execution.skip_count, 1);
        assert_eq!(execution.diagnostics.len(), 2);
        assert!(matches!(
            &execution.diagnostics[1],
            RhError::FieldDateFormat { document, field, .. }
                if document == "second.xml" && field == "BD"
        ));
    }

    #[test]
    fn writers_see_open_each_document_and_close() {
        let writer = RecordingWriter::default();
        let spec = FilterSpecBuilder::new().id("R4").build();
        let job = FilterJobBuilder::new().filter(spec).writer(&writer).build();

        let execution = job.run(&documents()).unwrap();

        assert_eq!(execution.status(), RunStatus::Matches(1));
        assert_eq!(
            *writer.calls.borrow(),
            vec!["open", "write 0", "write 0", "write 1", "close"]
        );
        assert_eq!(writer.records.borrow()[0].reservation_id(), Some("R4"));
    }

    #[test]
    fn writer_failure_aborts_the_run() {
        let writer = FailingWriter;
        let job = FilterJobBuilder::new().writer(&writer).build();

        let result = job.run(&documents());

        assert!(matches!(result, Err(RhError::ItemWriter(_))));
    }

    #[test]
    fn custom_tag_is_used() {
        let job = FilterJobBuilder::new().tag("Booking").build();

        let execution = job
            .run(&[Document::new(
                "custom.xml",
                r#"<Root><Booking RID="B1"/><RH RID="R1"/></Root>"#,
            )])
            .unwrap();

        assert_eq!(execution.match_count(), 1);
        assert_eq!(execution.results.records()[0].reservation_id(), Some("B1"));
    }
}
