use thiserror::Error;

#[derive(Error, Debug)]
/// Errors and non-fatal diagnostics raised while extracting, filtering or exporting records.
///
/// `DocumentParse` and `FieldDateFormat` never abort a run: the job collects them as
/// diagnostics attributed to the document they come from and carries on.
pub enum RhError {
    /// The uploaded buffer is not well-formed XML. The whole document is skipped.
    #[error("Error parsing file {document}: {message}")]
    DocumentParse { document: String, message: String },

    /// A `BD`/`ED` value needed by an active date filter is not a `YYYY-MM-DD` date.
    /// Only the record is skipped.
    #[error(
        "Skipping <RH> entry due to date format error in {document}: {field}=\"{value}\" is not a YYYY-MM-DD date"
    )]
    FieldDateFormat {
        document: String,
        field: String,
        value: String,
    },

    /// A filter input could not be understood (for example an unknown status).
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("ItemReader from: {0}")]
    ItemReader(String),

    #[error("ItemWriter from: {0}")]
    ItemWriter(String),
}

impl RhError {
    /// Name of the document the error is attributed to, if any.
    pub fn document(&self) -> Option<&str> {
        match self {
            RhError::DocumentParse { document, .. } | RhError::FieldDateFormat { document, .. } => {
                Some(document.as_str())
            }
            _ => None,
        }
    }

    /// Returns `true` for errors that only skip part of the input.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            RhError::DocumentParse { .. } | RhError::FieldDateFormat { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::RhError;

    #[test]
    fn diagnostics_name_their_document() {
        let error = RhError::DocumentParse {
            document: "bookings.xml".to_string(),
            message: "unclosed tag".to_string(),
        };

        assert_eq!(error.document(), Some("bookings.xml"));
        assert!(error.is_recoverable());
        assert_eq!(
            error.to_string(),
            "Error parsing file bookings.xml: unclosed tag"
        );
    }

    #[test]
    fn writer_errors_are_not_recoverable() {
        let error = RhError::ItemWriter("disk full".to_string());

        assert_eq!(error.document(), None);
        assert!(!error.is_recoverable());
        assert_eq!(error.to_string(), "ItemWriter from: disk full");
    }

    #[test]
    fn date_format_message_names_field_and_value() {
        let error = RhError::FieldDateFormat {
            document: "a.xml".to_string(),
            field: "BD".to_string(),
            value: "not-a-date".to_string(),
        };

        let message = error.to_string();
        assert!(message.contains("a.xml"));
        assert!(message.contains("BD=\"not-a-date\""));
    }
}
