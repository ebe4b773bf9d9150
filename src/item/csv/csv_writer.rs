use std::{
    cell::RefCell,
    fs::File,
    io::{self, Write},
    path::Path,
    result,
};

use csv::{Writer, WriterBuilder};
use log::debug;

use crate::{
    RhError,
    core::{item::ItemWriter, record::Record, record::ResultSet, table::Table},
};

/// Writes records as CSV.
///
/// The header is the union of the attribute names of every record, so records are
/// buffered by [`ItemWriter::write`] and the table is written on [`ItemWriter::close`].
pub struct CsvItemWriter<T: Write> {
    wrapper: RefCell<Writer<T>>,
    has_headers: bool,
    pending: RefCell<Vec<Record>>,
}

impl<T: Write> ItemWriter<Record> for CsvItemWriter<T> {
    fn write(&self, items: &[Record]) -> Result<(), RhError> {
        self.pending.borrow_mut().extend_from_slice(items);
        Ok(())
    }

    fn close(&self) -> Result<(), RhError> {
        let records = self.pending.take();
        self.write_table(&Table::from_records(&records))?;
        self.flush()
    }

    fn flush(&self) -> Result<(), RhError> {
        let result = self.wrapper.borrow_mut().flush();
        match result {
            Ok(()) => Ok(()),
            Err(error) => Err(RhError::ItemWriter(error.to_string())),
        }
    }
}

impl<T: Write> CsvItemWriter<T> {
    /// Writes `table` right away: the header row (unless disabled) then one row per record.
    /// A table without columns writes nothing.
    pub fn write_table(&self, table: &Table) -> Result<(), RhError> {
        if table.columns().is_empty() {
            debug!("No column to export");
            return Ok(());
        }

        let mut wtr = self.wrapper.borrow_mut();
        if self.has_headers {
            wtr.write_record(table.columns())
                .map_err(|error| RhError::ItemWriter(error.to_string()))?;
        }
        for row in table.rows() {
            wtr.write_record(row)
                .map_err(|error| RhError::ItemWriter(error.to_string()))?;
        }
        debug!("{} rows exported", table.len());

        Ok(())
    }

    pub fn into_inner(self) -> result::Result<T, RhError> {
        let result = self.wrapper.into_inner().into_inner();
        match result {
            Ok(inner) => Ok(inner),
            Err(error) => Err(RhError::ItemWriter(error.to_string())),
        }
    }
}

pub struct CsvItemWriterBuilder {
    delimiter: u8,
    has_headers: bool,
}

impl Default for CsvItemWriterBuilder {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_headers: true,
        }
    }
}

impl CsvItemWriterBuilder {
    pub fn new() -> CsvItemWriterBuilder {
        Self::default()
    }

    pub fn delimiter(mut self, delimiter: u8) -> CsvItemWriterBuilder {
        self.delimiter = delimiter;
        self
    }

    pub fn has_headers(mut self, yes: bool) -> CsvItemWriterBuilder {
        self.has_headers = yes;
        self
    }

    pub fn from_path<R: AsRef<Path>>(self, path: R) -> Result<CsvItemWriter<File>, RhError> {
        let path = path.as_ref();
        let wtr = WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_path(path)
            .map_err(|error| {
                RhError::ItemWriter(format!("Failed to create {}: {}", path.display(), error))
            })?;

        Ok(self.wrap(wtr))
    }

    pub fn from_writer<W: io::Write>(self, wtr: W) -> CsvItemWriter<W> {
        let wtr = WriterBuilder::new()
            .flexible(false)
            .delimiter(self.delimiter)
            .from_writer(wtr);

        self.wrap(wtr)
    }

    fn wrap<W: io::Write>(self, wtr: Writer<W>) -> CsvItemWriter<W> {
        CsvItemWriter {
            wrapper: RefCell::new(wtr),
            has_headers: self.has_headers,
            pending: RefCell::new(Vec::new()),
        }
    }
}

impl ResultSet {
    /// Exports the result set as UTF-8 CSV with a header row.
    pub fn to_csv(&self) -> Result<Vec<u8>, RhError> {
        let wtr = CsvItemWriterBuilder::new().from_writer(vec![]);
        wtr.write_table(&Table::from_records(self))?;
        wtr.flush()?;
        wtr.into_inner()
    }
}
