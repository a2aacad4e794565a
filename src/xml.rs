use crate::{TradeRoute, statics};
use indexmap::IndexMap;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

/// Errors raised while turning a file into an [`XmlDocument`].
#[derive(Debug, thiserror::Error)]
pub enum XmlError {
    #[error("XML document not found: {path:?}")]
    DocumentNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed XML in {origin}: {message}")]
    MalformedXml { origin: String, message: String },
}

/// One element of a parsed document.
#[derive(Debug, Clone)]
pub struct XmlElement {
    tag: String,
    attributes: IndexMap<String, String>,
    text: String,
    // Arena index one past the last descendant; the subtree is `self_index..subtree_end`.
    subtree_end: usize,
}

impl XmlElement {
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.attribute(statics::XML_ATTR_NAME)
    }

    /// Direct text content (CDATA included), untrimmed.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Position of an element inside its [`XmlDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementId(usize);

/// A parsed XML document flattened into document order.
///
/// Elements are stored depth-first, parents before children, siblings in source order, so
/// every subtree is a contiguous slice and "first in document order" is "lowest index".
#[derive(Debug, Clone)]
pub struct XmlDocument {
    elements: Vec<XmlElement>,
    // First element (document order) carrying each `Name` value.
    name_index: HashMap<String, usize>,
}

impl XmlDocument {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, XmlError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| XmlError::DocumentNotFound {
            path: path.to_path_buf(),
            source,
        })?;
        let origin = format!("{path:?}");
        let text = String::from_utf8(bytes).map_err(|e| XmlError::MalformedXml {
            origin: origin.clone(),
            message: format!("not valid UTF-8: {e}"),
        })?;
        Self::parse_with_origin(&text, &origin)
    }

    pub fn parse_str(text: &str) -> Result<Self, XmlError> {
        Self::parse_with_origin(text, "<memory>")
    }

    fn parse_with_origin(text: &str, origin: &str) -> Result<Self, XmlError> {
        let malformed = |message: String| XmlError::MalformedXml {
            origin: origin.to_string(),
            message,
        };

        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut reader = Reader::from_str(text);

        let mut elements: Vec<XmlElement> = Vec::new();
        let mut open: Vec<usize> = Vec::new();

        loop {
            let event = reader.read_event().map_err(|e| {
                malformed(format!("at byte {}: {e}", reader.buffer_position()))
            })?;

            match event {
                Event::Start(start) | Event::Empty(start)
                    if open.is_empty() && !elements.is_empty() =>
                {
                    return Err(malformed(format!(
                        "second root element <{}>",
                        String::from_utf8_lossy(start.name().as_ref())
                    )));
                }
                Event::Start(start) => {
                    let element = element_from_start(&start).map_err(malformed)?;
                    open.push(elements.len());
                    elements.push(element);
                }
                Event::Empty(start) => {
                    let mut element = element_from_start(&start).map_err(malformed)?;
                    element.subtree_end = elements.len() + 1;
                    elements.push(element);
                }
                Event::End(end) => {
                    let Some(idx) = open.pop() else {
                        return Err(malformed(format!(
                            "unexpected closing tag </{}>",
                            String::from_utf8_lossy(end.name().as_ref())
                        )));
                    };
                    elements[idx].subtree_end = elements.len();
                }
                Event::Text(t) => {
                    let t = t.unescape().map_err(|e| malformed(e.to_string()))?;
                    match open.last() {
                        Some(&idx) => elements[idx].text.push_str(&t),
                        None if t.trim().is_empty() => {}
                        None => return Err(malformed("text outside the root element".into())),
                    }
                }
                Event::CData(t) => {
                    let Some(&idx) = open.last() else {
                        return Err(malformed("CDATA outside the root element".into()));
                    };
                    elements[idx].text.push_str(&String::from_utf8_lossy(&t));
                }
                Event::Eof => break,
                // Declarations, comments, processing instructions, doctypes.
                _ => {}
            }
        }

        if let Some(&idx) = open.last() {
            return Err(malformed(format!("unclosed element <{}>", elements[idx].tag)));
        }
        if elements.is_empty() {
            return Err(malformed("no root element".into()));
        }

        let mut name_index = HashMap::new();
        for (idx, element) in elements.iter().enumerate() {
            if let Some(name) = element.name() {
                name_index.entry(name.to_string()).or_insert(idx);
            }
        }

        Ok(Self {
            elements,
            name_index,
        })
    }

    pub fn root(&self) -> &XmlElement {
        &self.elements[0]
    }

    /// All elements in document order.
    pub fn iter(&self) -> impl Iterator<Item = &XmlElement> {
        self.elements.iter()
    }

    /// Elements with the given tag that carry a `Name` attribute, in document order.
    pub fn elements_with_tag<'a>(
        &'a self,
        tag: &'a str,
    ) -> impl Iterator<Item = (ElementId, &'a XmlElement)> {
        self.elements
            .iter()
            .enumerate()
            .filter(move |(_, e)| e.tag == tag && e.name().is_some())
            .map(|(idx, e)| (ElementId(idx), e))
    }

    /// The first element (document order) whose `Name` equals `name` exactly.
    pub fn find_named(&self, name: &str) -> Option<ElementId> {
        self.name_index.get(name).copied().map(ElementId)
    }

    /// First element tagged `tag` in the subtree rooted at `id`, the root itself included.
    pub fn first_in_subtree(&self, id: ElementId, tag: &str) -> Option<&XmlElement> {
        let end = self.elements.get(id.0)?.subtree_end;
        self.elements[id.0..end].iter().find(|e| e.tag == tag)
    }
}

fn element_from_start(start: &BytesStart<'_>) -> Result<XmlElement, String> {
    let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attributes = IndexMap::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| format!("<{tag}>: {e}"))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| format!("<{tag} {key}>: {e}"))?
            .into_owned();
        attributes.insert(key, value);
    }

    Ok(XmlElement {
        tag,
        attributes,
        text: String::new(),
        subtree_end: 0,
    })
}

/// Parses every path as its own document. Any failure fails the whole batch.
pub fn parse_documents<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<XmlDocument>, XmlError> {
    paths.iter().map(XmlDocument::load).collect()
}

/// Splits text that mixes commas and whitespace, e.g. `"10, 20 ,5"`, into clean tokens.
pub fn split_comma_separated(text: &str) -> Vec<String> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_position(text: &str) -> Option<[f64; 3]> {
    let tokens = split_comma_separated(text);
    if tokens.len() < 3 {
        tracing::warn!(position = text, "galactic position has fewer than three values");
        return None;
    }

    let mut out = [0.0; 3];
    for (slot, token) in out.iter_mut().zip(&tokens) {
        match token.parse::<f64>() {
            Ok(v) => *slot = v,
            Err(_) => {
                tracing::warn!(position = text, token = %token, "galactic position value is not a number");
                return None;
            }
        }
    }
    Some(out)
}

/// Looks up the x, y, z position of the planet called `name`.
///
/// The first element in document order whose `Name` matches wins; its first
/// `Galactic_Position` descendant supplies the coordinates. Any miss is `None`.
pub fn find_planet_location(name: &str, planets: &XmlDocument) -> Option<[f64; 3]> {
    let id = planets.find_named(name)?;
    let position = planets.first_in_subtree(id, statics::XML_TAG_GALACTIC_POSITION)?;
    parse_position(position.text())
}

/// Result of resolving a trade route by name.
///
/// A failed lookup always has the same shape: both locations `None`, both names empty.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRouteLookup {
    pub start: Option<[f64; 2]>,
    pub end: Option<[f64; 2]>,
    pub start_name: String,
    pub end_name: String,
}

impl TradeRouteLookup {
    pub fn unresolved() -> Self {
        Self {
            start: None,
            end: None,
            start_name: String::new(),
            end_name: String::new(),
        }
    }

    pub fn into_trade_route(self, name: &str) -> Option<TradeRoute> {
        let (Some(start), Some(end)) = (self.start, self.end) else {
            return None;
        };
        Some(TradeRoute::new(
            name,
            self.start_name,
            self.end_name,
            start,
            end,
        ))
    }
}

/// Resolves the trade route called `name` to the 2-D positions of its two endpoint planets.
pub fn find_trade_route(
    name: &str,
    trade_routes: &XmlDocument,
    planets: &XmlDocument,
) -> TradeRouteLookup {
    let Some(id) = trade_routes.find_named(name) else {
        return TradeRouteLookup::unresolved();
    };

    let endpoint = |tag: &str| {
        trade_routes
            .first_in_subtree(id, tag)
            .map(|e| e.text().trim().to_string())
            .unwrap_or_default()
    };
    let start_name = endpoint(statics::XML_TAG_POINT_A);
    let end_name = endpoint(statics::XML_TAG_POINT_B);
    if start_name.is_empty() || end_name.is_empty() {
        return TradeRouteLookup::unresolved();
    }

    let start = find_planet_location(&start_name, planets);
    let end = find_planet_location(&end_name, planets);
    match (start, end) {
        (Some([sx, sy, _]), Some([ex, ey, _])) => TradeRouteLookup {
            start: Some([sx, sy]),
            end: Some([ex, ey]),
            start_name,
            end_name,
        },
        _ => TradeRouteLookup::unresolved(),
    }
}
