/// Reader, processor and writer abstractions.
pub mod item;

/// Records extracted from documents and the result set of a run.
pub mod record;

/// Uploaded documents.
pub mod document;

/// Flat table view of a set of records.
pub mod table;

/// Orchestration of a filter run over a batch of documents.
pub mod job;
