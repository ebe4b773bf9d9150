/// This module extracts `<RH>` records from XML documents.
pub mod xml;

/// This module filters records against a set of criteria.
pub mod filter;

#[cfg(feature = "csv")]
/// This module provides a CSV item reader and writer for exporting results.
pub mod csv;

#[cfg(feature = "logger")]
/// This module provides a logger item writer, useful for debugging purposes.
pub mod logger;
