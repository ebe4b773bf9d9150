pub mod common;

use chrono::NaiveDate;
use rh_export::{
    RhError,
    core::{
        document::Document,
        job::{FilterJobBuilder, RunStatus},
        record::Record,
    },
    item::filter::{FilterSpec, FilterSpecBuilder, Status, matches},
};

use common::march_export;

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn ids(records: &[Record]) -> Vec<&str> {
    records.iter().filter_map(Record::reservation_id).collect()
}

fn run(spec: FilterSpec, documents: &[Document]) -> rh_export::core::job::FilterExecution {
    FilterJobBuilder::new().filter(spec).build().run(documents).unwrap()
}

#[test]
fn status_filter_compares_upper_cased_record_status() {
    let execution = run(
        FilterSpecBuilder::new().status(Status::Reserved).build(),
        &[march_export()],
    );

    assert_eq!(ids(execution.results.records()), vec!["R100", "r100"]);
    assert!(execution.diagnostics.is_empty());
}

#[test]
fn every_status_of_the_vocabulary_selects_its_records() {
    let expected = [
        (Status::CheckedOut, "R102"),
        (Status::Reserved, "R100"),
        (Status::Cancelled, "R101"),
        (Status::NoShow, "R103"),
    ];

    for (status, first_id) in expected {
        let execution = run(FilterSpecBuilder::new().status(status).build(), &[march_export()]);
        assert_eq!(ids(execution.results.records())[0], first_id, "{status}");
    }
}

#[test]
fn unset_status_never_excludes() {
    let spec = FilterSpec::default();

    for record in [
        Record::new(),
        Record::from_iter([("RS", "Whatever")]),
        Record::from_iter([("RS", "")]),
    ] {
        assert!(matches(&record, &spec));
    }
}

#[test]
fn id_filter_is_exact_and_case_sensitive() {
    let execution = run(FilterSpecBuilder::new().id(" R100 ").build(), &[march_export()]);
    assert_eq!(ids(execution.results.records()), vec!["R100"]);

    let execution = run(FilterSpecBuilder::new().id("r100").build(), &[march_export()]);
    assert_eq!(ids(execution.results.records()), vec!["r100"]);
}

#[test]
fn stay_date_bounds_are_inclusive() {
    let record = Record::from_iter([("RID", "R100"), ("BD", "2024-03-10"), ("ED", "2024-03-15")]);

    for (probe, expected) in [
        (day(2024, 3, 12), true),
        (day(2024, 3, 10), true),
        (day(2024, 3, 15), true),
        (day(2024, 3, 9), false),
        (day(2024, 3, 16), false),
    ] {
        let spec = FilterSpecBuilder::new().stay_date(probe).build();
        assert_eq!(matches(&record, &spec), expected, "{probe}");
    }
}

#[test]
fn date_range_filters_combine() {
    let spec = FilterSpecBuilder::new()
        .begin_date(day(2024, 3, 1))
        .end_date(day(2024, 3, 14))
        .build();

    let execution = run(spec, &[march_export()]);

    // R103 has no ED and is excluded without a diagnostic.
    assert_eq!(ids(execution.results.records()), vec!["R101", "r100"]);
    assert!(execution.diagnostics.is_empty());
}

#[test]
fn malformed_document_does_not_stop_the_batch() {
    let broken = Document::new("broken.xml", "<ReservationExport><RH RID=\"X1\">");

    let execution = run(FilterSpec::default(), &[broken, march_export()]);

    assert_eq!(execution.match_count(), 5);
    assert_eq!(execution.failed_document_count, 1);
    assert_eq!(execution.diagnostics.len(), 1);
    match &execution.diagnostics[0] {
        RhError::DocumentParse { document, .. } => assert_eq!(document, "broken.xml"),
        other => panic!("unexpected diagnostic {:?}", other),
    }
    assert!(
        execution.diagnostics[0]
            .to_string()
            .starts_with("Error parsing file broken.xml")
    );
}

#[test]
fn malformed_date_excludes_with_one_diagnostic_but_absent_date_is_silent() {
    let document = Document::new(
        "dates.xml",
        r#"<Root><RH RID="bad" BD="not-a-date" ED="2024-03-15"/><RH RID="none" ED="2024-03-15"/><RH RID="ok" BD="2024-03-10"/></Root>"#,
    );

    let execution = run(
        FilterSpecBuilder::new().begin_date(day(2024, 1, 1)).build(),
        &[document],
    );

    assert_eq!(ids(execution.results.records()), vec!["ok"]);
    assert_eq!(execution.skip_count, 1);
    assert_eq!(execution.diagnostics.len(), 1);
    assert!(matches!(
        &execution.diagnostics[0],
        RhError::FieldDateFormat { document, field, value }
            if document == "dates.xml" && field == "BD" && value == "not-a-date"
    ));
}

#[test]
fn zero_documents_give_no_results_and_no_diagnostics() {
    let execution = run(FilterSpecBuilder::new().status(Status::Reserved).build(), &[]);

    assert!(execution.results.is_empty());
    assert!(execution.diagnostics.is_empty());
    assert_eq!(execution.status(), RunStatus::NoDocuments);
}

#[test]
fn no_match_is_reported_distinctly() {
    let execution = run(FilterSpecBuilder::new().id("R999").build(), &[march_export()]);

    assert_eq!(execution.status(), RunStatus::NoMatches);
    assert!(execution.diagnostics.is_empty());
}

#[test]
fn results_keep_upload_then_document_order_without_dedup() {
    let execution = run(
        FilterSpecBuilder::new().id("R100").build(),
        &[march_export(), march_export()],
    );

    assert_eq!(ids(execution.results.records()), vec!["R100", "R100"]);
    assert_eq!(execution.document_count, 2);
}
