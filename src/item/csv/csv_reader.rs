use csv::{ReaderBuilder, StringRecordsIntoIter};
use std::{cell::RefCell, io::Read};

use crate::{
    core::{
        item::{ItemReader, ItemReaderResult},
        record::Record,
        table::Table,
    },
    error::RhError,
};

/// Reads back CSV exported by [`CsvItemWriter`](super::csv_writer::CsvItemWriter).
///
/// Cells are taken verbatim (no trimming) so that an export can be compared with the
/// records it came from. Every row is read as a record holding all the columns, empty
/// cells included.
pub struct CsvItemReader<R> {
    columns: Vec<String>,
    records: RefCell<StringRecordsIntoIter<R>>,
}

impl<R: Read> ItemReader<Record> for CsvItemReader<R> {
    fn read(&self) -> ItemReaderResult<Record> {
        if let Some(result) = self.records.borrow_mut().next() {
            match result {
                Ok(string_record) => Ok(Some(
                    self.columns
                        .iter()
                        .map(String::as_str)
                        .zip(string_record.iter())
                        .collect(),
                )),
                Err(error) => Err(RhError::ItemReader(error.to_string())),
            }
        } else {
            Ok(None)
        }
    }
}

impl<R: Read> CsvItemReader<R> {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Reads every remaining row into a [`Table`].
    pub fn read_table(self) -> Result<Table, RhError> {
        let rows = self
            .records
            .into_inner()
            .map(|result| {
                result
                    .map(|string_record| string_record.iter().map(str::to_string).collect())
                    .map_err(|error| RhError::ItemReader(error.to_string()))
            })
            .collect::<Result<Vec<Vec<String>>, RhError>>()?;

        Ok(Table::new(self.columns, rows))
    }
}

pub struct CsvItemReaderBuilder {
    delimiter: u8,
}

impl Default for CsvItemReaderBuilder {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvItemReaderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Reads the header row eagerly. Empty input gives a reader without columns or rows.
    pub fn from_reader<R: Read>(self, rdr: R) -> Result<CsvItemReader<R>, RhError> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(false)
            .from_reader(rdr);

        let columns = rdr
            .headers()
            .map_err(|error| RhError::ItemReader(error.to_string()))?
            .iter()
            .map(str::to_string)
            .collect();

        Ok(CsvItemReader {
            columns,
            records: RefCell::new(rdr.into_records()),
        })
    }
}
