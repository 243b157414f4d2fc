//! Parses a `<workers>` document back into workers.
//!
//! Parsing happens in two steps. The document is first read into a small element tree; a
//! document that is not well-formed fails as a whole. Each `<worker>` element is then decoded on
//! its own, so one bad record is skipped without affecting the others.

use std::{collections::HashSet, sync::Arc};

use miette::NamedSource;
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::errors::{CodecError, RecordError};
use crate::model::{
    ids, rules, time, Choice, Color, Coordinates, Country, Person, Position, Worker, WorkerId,
};

use super::tags;

/// Result of decoding a document: the accepted workers and every rejected element.
#[derive(Debug, Default)]
pub struct Decoded {
    pub workers: Vec<Worker>,
    pub skipped: Vec<Skipped>,
}

/// A `<worker>` element that was not loaded.
#[derive(Debug, PartialEq)]
pub struct Skipped {
    /// 1-based position of the element among the `<worker>` elements.
    pub index: usize,
    pub error: RecordError,
}

/// Decodes `xml`; `name` labels the source in diagnostics.
pub fn decode(name: &str, xml: &str) -> Result<Decoded, CodecError> {
    if xml.trim().is_empty() {
        return Ok(Decoded::default());
    }

    let root = parse_tree(name, xml)?;
    if root.name != tags::ROOT {
        return Err(CodecError::WrongRoot { found: root.name });
    }

    let mut decoded = Decoded::default();
    let mut seen: HashSet<WorkerId> = HashSet::new();
    let elements = root.children.iter().filter(|node| node.name == tags::WORKER);
    for (offset, element) in elements.enumerate() {
        let result = decode_worker(element).and_then(|worker| {
            if seen.insert(worker.id) {
                Ok(worker)
            } else {
                Err(RecordError::DuplicateId { id: worker.id })
            }
        });
        match result {
            Ok(worker) => decoded.workers.push(worker),
            Err(error) => decoded.skipped.push(Skipped {
                index: offset + 1,
                error,
            }),
        }
    }
    Ok(decoded)
}

// ============================================================================
// ELEMENT TREE
// ============================================================================

#[derive(Debug, Default)]
struct Node {
    name: String,
    text: String,
    children: Vec<Node>,
}

impl Node {
    fn named(name: &[u8]) -> Self {
        Self {
            name: String::from_utf8_lossy(name).into_owned(),
            ..Self::default()
        }
    }

    fn child(&self, tag: &str) -> Option<&Node> {
        self.children.iter().find(|node| node.name == tag)
    }
}

fn parse_tree(name: &str, xml: &str) -> Result<Node, CodecError> {
    let malformed = |message: String, offset: usize| CodecError::Malformed {
        message,
        src: Arc::new(NamedSource::new(name, xml.to_string())),
        span: offset.min(xml.len()).into(),
    };

    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut open: Vec<Node> = Vec::new();
    let mut root: Option<Node> = None;

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(err) => return Err(malformed(err.to_string(), reader.error_position() as usize)),
        };
        match event {
            Event::Start(start) => open.push(Node::named(start.name().as_ref())),
            Event::Empty(start) => attach(&mut open, &mut root, Node::named(start.name().as_ref())),
            Event::End(_) => {
                if let Some(node) = open.pop() {
                    attach(&mut open, &mut root, node);
                }
            }
            Event::Text(text) => {
                let value = text.unescape().map_err(|err| {
                    malformed(err.to_string(), reader.buffer_position() as usize)
                })?;
                if let Some(node) = open.last_mut() {
                    node.text.push_str(&value);
                }
            }
            Event::CData(data) => {
                if let Some(node) = open.last_mut() {
                    node.text.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(unclosed) = open.last() {
        return Err(malformed(
            format!("element <{}> is never closed", unclosed.name),
            xml.len(),
        ));
    }
    root.ok_or_else(|| malformed("document has no root element".to_string(), 0))
}

fn attach(open: &mut [Node], root: &mut Option<Node>, node: Node) {
    match open.last_mut() {
        Some(parent) => parent.children.push(node),
        None => {
            if root.is_none() {
                *root = Some(node);
            }
        }
    }
}

// ============================================================================
// RECORD DECODING
// ============================================================================

fn decode_worker(node: &Node) -> Result<Worker, RecordError> {
    let id: WorkerId = parse(node, tags::ID, |s| s.parse().ok(), "a positive integer")?;
    if id == 0 || id > ids::MAX_ID {
        return Err(constraint(tags::ID, id));
    }

    let name = required(node, tags::NAME)?.to_string();
    if !rules::name(&name) {
        return Err(constraint(tags::NAME, &name));
    }

    let coordinates = child(node, tags::COORDINATES)?;
    let x: f64 = parse(
        coordinates,
        tags::X,
        |s| s.parse::<f64>().ok().filter(|v| v.is_finite()),
        "a number",
    )?;
    if !rules::x(x) {
        return Err(constraint(tags::X, x));
    }
    let y: i64 = parse(coordinates, tags::Y, |s| s.parse().ok(), "an integer")?;
    if !rules::y(y) {
        return Err(constraint(tags::Y, y));
    }

    let creation_date = parse(node, tags::CREATION_DATE, time::parse_date, "YYYY-MM-DD")?;
    let salary: i64 = parse(node, tags::SALARY, |s| s.parse().ok(), "an integer")?;
    if !rules::salary(salary) {
        return Err(constraint(tags::SALARY, salary));
    }

    let start_date = parse_optional(node, tags::START_DATE, time::parse_zoned, "an RFC 3339 date-time")?;
    let end_date = parse_optional(node, tags::END_DATE, time::parse_local, "an ISO date-time")?;
    let position = parse_optional(node, tags::POSITION, Position::lookup, &Position::listing())?;

    let person = child(node, tags::PERSON)?;
    let person = Person {
        birthday: parse(person, tags::BIRTHDAY, time::parse_local, "an ISO date-time")?,
        eye_color: parse_optional(person, tags::EYE_COLOR, Color::lookup, &Color::listing())?,
        hair_color: parse(person, tags::HAIR_COLOR, Color::lookup, &Color::listing())?,
        nationality: parse(person, tags::NATIONALITY, Country::lookup, &Country::listing())?,
    };

    Ok(Worker {
        id,
        name,
        coordinates: Coordinates { x, y },
        creation_date,
        salary,
        start_date,
        end_date,
        position,
        person,
    })
}

fn child<'n>(node: &'n Node, tag: &'static str) -> Result<&'n Node, RecordError> {
    node.child(tag).ok_or(RecordError::MissingElement { tag })
}

fn required<'n>(node: &'n Node, tag: &'static str) -> Result<&'n str, RecordError> {
    let value = child(node, tag)?.text.trim();
    if value.is_empty() {
        return Err(RecordError::MissingElement { tag });
    }
    Ok(value)
}

fn parse<T>(
    node: &Node,
    tag: &'static str,
    parser: impl FnOnce(&str) -> Option<T>,
    expected: &str,
) -> Result<T, RecordError> {
    let value = required(node, tag)?;
    parser(value).ok_or_else(|| RecordError::InvalidValue {
        tag,
        value: value.to_string(),
        expected: expected.to_string(),
    })
}

/// An absent or empty element means "not set".
fn parse_optional<T>(
    node: &Node,
    tag: &'static str,
    parser: impl FnOnce(&str) -> Option<T>,
    expected: &str,
) -> Result<Option<T>, RecordError> {
    match node.child(tag).map(|element| element.text.trim()) {
        None | Some("") => Ok(None),
        Some(_) => parse(node, tag, parser, expected).map(Some),
    }
}

fn constraint(tag: &'static str, value: impl ToString) -> RecordError {
    RecordError::Constraint {
        tag,
        value: value.to_string(),
    }
}
