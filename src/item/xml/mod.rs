/// Extraction of `<RH>` reservation records from XML documents.
///
/// Each document is parsed completely with `quick-xml` before any record is handed out,
/// so a document that turns out to be malformed contributes no record at all. Every
/// element named `RH` is matched, whatever its depth, and its attributes become a
/// [`Record`](crate::core::record::Record) in source order.
///
/// # Examples
///
/// ```
/// use rh_export::core::document::Document;
/// use rh_export::item::xml::extract;
///
/// let good = Document::new(
///     "march.xml",
///     r#"<Export><Hotel><RH RID="R100" RS="Reserved" BD="2024-03-10" ED="2024-03-15"/></Hotel></Export>"#,
/// );
/// let bad = Document::new("broken.xml", "<Export><RH RID=\"R1\">");
///
/// let extraction = extract(&good);
/// assert_eq!(extraction.records.len(), 1);
/// assert_eq!(extraction.records[0].status(), Some("Reserved"));
///
/// let extraction = extract(&bad);
/// assert!(extraction.records.is_empty());
/// assert_eq!(extraction.errors.len(), 1);
/// ```
pub mod rh_reader;

pub use rh_reader::{DEFAULT_TAG, Extraction, RhItemReader, RhItemReaderBuilder, extract};
