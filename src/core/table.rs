use super::record::Record;

/// Flat, rectangular view of a set of records.
///
/// The columns are the union of the attribute names of all records, in the order they are
/// first seen. A record without a given attribute gets an empty cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let records: Vec<&Record> = records.into_iter().collect();

        let mut columns: Vec<String> = Vec::new();
        for record in &records {
            for key in record.keys() {
                if !columns.iter().any(|column| column == key) {
                    columns.push(key.to_string());
                }
            }
        }

        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|column| record.get(column).unwrap_or_default().to_string())
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at `row` under the column named `column`.
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.columns.iter().position(|name| name == column)?;
        self.rows
            .get(row)
            .and_then(|cells| cells.get(index))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_are_the_union_in_first_seen_order() {
        let records = [
            Record::from_iter([("RID", "R1"), ("RS", "Reserved")]),
            Record::from_iter([("BD", "2024-03-10"), ("RID", "R2")]),
            Record::from_iter([("ROOM", "7")]),
        ];

        let table = Table::from_records(&records);

        assert_eq!(table.columns(), &["RID", "RS", "BD", "ROOM"]);
        assert_eq!(
            table.rows(),
            &[
                vec!["R1", "Reserved", "", ""],
                vec!["R2", "", "2024-03-10", ""],
                vec!["", "", "", "7"],
            ]
        );
        assert_eq!(table.cell(1, "BD"), Some("2024-03-10"));
        assert_eq!(table.cell(2, "RID"), Some(""));
        assert_eq!(table.cell(0, "MISSING"), None);
        assert_eq!(table.cell(3, "RID"), None);
    }

    #[test]
    fn no_records_gives_an_empty_table() {
        let table = Table::from_records(std::iter::empty());
        assert!(table.is_empty());
        assert!(table.columns().is_empty());
    }
}
