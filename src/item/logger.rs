use log::info;

use crate::{
    RhError,
    core::{item::ItemWriter, record::Record},
};

/// Logs every record it receives at `info` level.
#[derive(Default)]
pub struct LoggerWriter;

impl ItemWriter<Record> for LoggerWriter {
    fn write(&self, items: &[Record]) -> Result<(), RhError> {
        items.iter().for_each(|item| {
            let fields: Vec<String> = item
                .iter()
                .map(|(key, value)| format!("{}={:?}", key, value))
                .collect();
            info!("Record: {}", fields.join(" "));
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::LoggerWriter;
    use crate::core::{item::ItemWriter, record::Record};

    #[test]
    fn logging_never_fails() {
        let writer = LoggerWriter;
        let records = vec![Record::from_iter([("RID", "R1")]), Record::new()];

        assert!(writer.write(&records).is_ok());
        assert!(writer.flush().is_ok());
    }
}
