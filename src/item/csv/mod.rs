/// CSV export of filtered records.
///
/// # Module Architecture
///
/// 1. **CsvItemWriter**: buffers the records it receives and writes them as one table
///    when closed, because the header is the union of every record's attribute names.
///    Cells are quoted only when needed (delimiter, quote or line break inside).
///
/// 2. **CsvItemReader**: reads an export back, either record by record or as a whole
///    [`Table`](crate::core::table::Table).
///
/// Both components follow the builder pattern.
///
/// # Examples
///
/// ```
/// use rh_export::core::record::{Record, ResultSet};
/// use rh_export::item::csv::csv_reader::CsvItemReaderBuilder;
///
/// let results = ResultSet::from(vec![
///     Record::from_iter([("RID", "R1"), ("NOTE", "late, arrival")]),
///     Record::from_iter([("RID", "R2"), ("RS", "Reserved")]),
/// ]);
///
/// let csv = results.to_csv().unwrap();
/// assert_eq!(
///     String::from_utf8(csv.clone()).unwrap(),
///     "RID,NOTE,RS\nR1,\"late, arrival\",\nR2,,Reserved\n"
/// );
///
/// let table = CsvItemReaderBuilder::new()
///     .from_reader(csv.as_slice())
///     .unwrap()
///     .read_table()
///     .unwrap();
/// assert_eq!(table.cell(0, "NOTE"), Some("late, arrival"));
/// assert_eq!(table.cell(1, "NOTE"), Some(""));
/// ```
pub mod csv_reader;
pub mod csv_writer;

/// File name proposed for exports.
pub const DEFAULT_EXPORT_FILE: &str = "filtered_rh_entries.csv";
