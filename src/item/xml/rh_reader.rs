use std::{cell::RefCell, collections::VecDeque, str};

use log::{debug, warn};
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader as XmlReader;

use crate::core::{
    document::Document,
    item::{ItemReader, ItemReaderResult},
    record::Record,
};
use crate::error::RhError;

/// Tag of the elements turned into records.
pub const DEFAULT_TAG: &str = "RH";

/// Builder for [`RhItemReader`].
///
/// # Examples
///
/// ```
/// use rh_export::core::document::Document;
/// use rh_export::core::item::ItemReader;
/// use rh_export::item::xml::RhItemReaderBuilder;
///
/// let document = Document::new("hotel.xml", r#"<RHS><RH RID="R1" RS="Reserved"/></RHS>"#);
/// let reader = RhItemReaderBuilder::new().from_document(&document);
///
/// let record = reader.read().unwrap().unwrap();
/// assert_eq!(record.reservation_id(), Some("R1"));
/// assert!(reader.read().unwrap().is_none());
/// ```
pub struct RhItemReaderBuilder {
    tag_name: String,
}

impl Default for RhItemReaderBuilder {
    fn default() -> Self {
        Self {
            tag_name: DEFAULT_TAG.to_string(),
        }
    }
}

impl RhItemReaderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the tag of the record elements (`RH` by default).
    pub fn tag<S: AsRef<str>>(mut self, tag_name: S) -> Self {
        self.tag_name = tag_name.as_ref().to_string();
        self
    }

    /// Parses the whole document up front.
    ///
    /// A malformed document produces a reader whose first `read` returns
    /// [`RhError::DocumentParse`] and which yields no record at all.
    pub fn from_document(self, document: &Document) -> RhItemReader {
        self.from_slice(document.name(), document.content())
    }

    pub fn from_slice<N: Into<String>>(self, name: N, content: &[u8]) -> RhItemReader {
        let name = name.into();
        debug!("Looking for tag '{}' in {}", self.tag_name, name);

        match parse_records(content, self.tag_name.as_bytes()) {
            Ok(records) => {
                debug!("Found {} <{}> elements in {}", records.len(), self.tag_name, name);
                RhItemReader {
                    records: RefCell::new(records.into()),
                    error: RefCell::new(None),
                }
            }
            Err(message) => {
                warn!("Error parsing file {}: {}", name, message);
                RhItemReader {
                    records: RefCell::new(VecDeque::new()),
                    error: RefCell::new(Some(RhError::DocumentParse {
                        document: name,
                        message,
                    })),
                }
            }
        }
    }
}

/// Reader over the record elements of one XML document, in document order.
pub struct RhItemReader {
    records: RefCell<VecDeque<Record>>,
    error: RefCell<Option<RhError>>,
}

impl ItemReader<Record> for RhItemReader {
    fn read(&self) -> ItemReaderResult<Record> {
        if let Some(error) = self.error.borrow_mut().take() {
            return Err(error);
        }
        Ok(self.records.borrow_mut().pop_front())
    }
}

/// Records and parse errors extracted from one document.
#[derive(Debug, Default)]
pub struct Extraction {
    pub records: Vec<Record>,
    pub errors: Vec<RhError>,
}

/// Extracts every `<RH>` element of `document`, at any depth.
///
/// A document that is not well-formed gives no record and exactly one
/// [`RhError::DocumentParse`].
pub fn extract(document: &Document) -> Extraction {
    let reader = RhItemReaderBuilder::new().from_document(document);
    let mut extraction = Extraction::default();

    loop {
        match reader.read() {
            Ok(Some(record)) => extraction.records.push(record),
            Ok(None) => break,
            Err(error) => {
                extraction.errors.push(error);
                break;
            }
        }
    }

    extraction
}

fn parse_records(content: &[u8], tag: &[u8]) -> Result<Vec<Record>, String> {
    let mut reader = XmlReader::from_reader(content);
    reader.config_mut().trim_text(true);

    let mut buffer = Vec::with_capacity(1024);
    // Open elements, each with whether a non-empty default namespace is in scope.
    let mut open_tags: Vec<(Vec<u8>, bool)> = Vec::new();
    let mut root_seen = false;
    let mut records = Vec::new();

    loop {
        buffer.clear();
        let event = reader
            .read_event_into(&mut buffer)
            .map_err(|e| format!("{} (at byte {})", e, reader.error_position()))?;

        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                if open_tags.is_empty() && root_seen {
                    return Err(format!(
                        "junk after document element (at byte {})",
                        reader.buffer_position()
                    ));
                }
                root_seen = true;

                let name = str::from_utf8(e.name().as_ref())
                    .map_err(|error| error.to_string())?
                    .to_string();
                let inherited = open_tags.last().is_some_and(|(_, namespaced)| *namespaced);

                let mut default_namespace = None;
                let mut fields = Vec::new();
                for (key, value) in attributes(e)? {
                    if key == "xmlns" {
                        default_namespace = Some(!value.is_empty());
                    } else if !key.starts_with("xmlns:") {
                        fields.push((key, value));
                    }
                }
                let namespaced = default_namespace.unwrap_or(inherited);

                if !namespaced && name.as_bytes() == tag {
                    records.push(Record::from_iter(fields));
                }
                if matches!(event, Event::Start(_)) {
                    open_tags.push((name.into_bytes(), namespaced));
                }
            }
            Event::End(ref e) => {
                if open_tags.pop().is_none() {
                    return Err(format!(
                        "unexpected end tag </{}>",
                        String::from_utf8_lossy(e.name().as_ref())
                    ));
                }
            }
            Event::Text(_) | Event::CData(_) | Event::GeneralRef(_) if open_tags.is_empty() => {
                return Err(format!(
                    "text outside of the document element (at byte {})",
                    reader.buffer_position()
                ));
            }
            Event::Text(ref text) => {
                let content = str::from_utf8(text).map_err(|e| e.to_string())?;
                unescape(content).map_err(|e| e.to_string())?;
            }
            Event::CData(ref cdata) => {
                str::from_utf8(cdata).map_err(|e| e.to_string())?;
            }
            Event::GeneralRef(ref reference) => {
                let name = str::from_utf8(reference).map_err(|e| e.to_string())?;
                unescape(&format!("&{};", name)).map_err(|e| e.to_string())?;
            }
            Event::Eof => {
                if let Some((unclosed, _)) = open_tags.last() {
                    return Err(format!(
                        "unclosed tag <{}>",
                        String::from_utf8_lossy(unclosed)
                    ));
                }
                if !root_seen {
                    return Err("no element found".to_string());
                }
                return Ok(records);
            }
            _ => {}
        }
    }
}

fn attributes(element: &BytesStart) -> Result<Vec<(String, String)>, String> {
    let mut fields = Vec::new();

    for attribute in element.attributes() {
        let attribute = attribute.map_err(|e| e.to_string())?;
        let key = str::from_utf8(attribute.key.as_ref()).map_err(|e| e.to_string())?;
        let raw = str::from_utf8(&attribute.value).map_err(|e| e.to_string())?;
        let value = unescape(raw).map_err(|e| e.to_string())?;
        fields.push((key.to_string(), value.into_owned()));
    }

    Ok(fields)
}
