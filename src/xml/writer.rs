//! Serializes workers into the `<workers>` document.

use quick_xml::escape::escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::errors::CodecError;
use crate::model::{time, Choice, Worker};

use super::tags;

/// Renders `workers` as a complete UTF-8 document. Unset optional fields become empty elements.
pub fn encode<'w>(workers: impl IntoIterator<Item = &'w Worker>) -> Result<String, CodecError> {
    let mut out = XmlOut::new();
    out.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    out.open(tags::ROOT)?;
    for worker in workers {
        write_worker(&mut out, worker)?;
    }
    out.close(tags::ROOT)?;

    let mut document = String::from_utf8(out.writer.into_inner()).map_err(|err| {
        CodecError::Encode {
            message: err.to_string(),
        }
    })?;
    document.push('\n');
    Ok(document)
}

fn write_worker(out: &mut XmlOut, worker: &Worker) -> Result<(), CodecError> {
    out.open(tags::WORKER)?;
    out.leaf(tags::ID, &worker.id.to_string())?;
    out.leaf(tags::NAME, &worker.name)?;

    out.open(tags::COORDINATES)?;
    out.leaf(tags::X, &worker.coordinates.x.to_string())?;
    out.leaf(tags::Y, &worker.coordinates.y.to_string())?;
    out.close(tags::COORDINATES)?;

    out.leaf(tags::CREATION_DATE, &worker.creation_date.to_string())?;
    out.leaf(tags::SALARY, &worker.salary.to_string())?;
    out.leaf(
        tags::START_DATE,
        &worker
            .start_date
            .as_ref()
            .map(time::format_zoned)
            .unwrap_or_default(),
    )?;
    out.leaf(
        tags::END_DATE,
        &worker
            .end_date
            .as_ref()
            .map(time::format_local)
            .unwrap_or_default(),
    )?;
    out.leaf(tags::POSITION, worker.position.map_or("", Choice::name))?;

    let person = &worker.person;
    out.open(tags::PERSON)?;
    out.leaf(tags::BIRTHDAY, &time::format_local(&person.birthday))?;
    out.leaf(tags::EYE_COLOR, person.eye_color.map_or("", Choice::name))?;
    out.leaf(tags::HAIR_COLOR, person.hair_color.name())?;
    out.leaf(tags::NATIONALITY, person.nationality.name())?;
    out.close(tags::PERSON)?;

    out.close(tags::WORKER)
}

/// Indenting event writer with errors mapped into `CodecError`.
struct XmlOut {
    writer: Writer<Vec<u8>>,
}

impl XmlOut {
    fn new() -> Self {
        Self {
            writer: Writer::new_with_indent(Vec::new(), b' ', 2),
        }
    }

    fn event(&mut self, event: Event<'_>) -> Result<(), CodecError> {
        self.writer
            .write_event(event)
            .map_err(|err| CodecError::Encode {
                message: err.to_string(),
            })
    }

    fn open(&mut self, tag: &str) -> Result<(), CodecError> {
        self.event(Event::Start(BytesStart::new(tag)))
    }

    fn close(&mut self, tag: &str) -> Result<(), CodecError> {
        self.event(Event::End(BytesEnd::new(tag)))
    }

    /// `<tag>value</tag>` on one line; `&`, `<`, `>`, `"` and `'` are escaped.
    fn leaf(&mut self, tag: &str, value: &str) -> Result<(), CodecError> {
        self.open(tag)?;
        self.event(Event::Text(BytesText::from_escaped(escape(value))))?;
        self.close(tag)
    }
}
