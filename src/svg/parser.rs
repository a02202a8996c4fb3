//! Streaming scan of SVG markup for text labels inside a named group.

use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesStart, Event};
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::Room;

/// Parse `content` and return the rooms in the group whose `inkscape:label`
/// equals `layer`, or `None` if there is no such group.
pub fn parse_labels(content: &str, layer: &str) -> Result<Option<Vec<Room>>> {
    scan(content, layer, super::INKSCAPE_LABEL)
}

pub(crate) fn scan(content: &str, layer: &str, layer_attribute: &str) -> Result<Option<Vec<Room>>> {
    let mut reader = Reader::from_str(content);
    let mut scan = LayerScan::new(layer, layer_attribute);
    let mut depth = 0usize;
    let mut seen_root = false;

    loop {
        let event = reader.read_event().map_err(|e| {
            Error::MalformedDocument(format!("{e} (at byte {})", reader.buffer_position()))
        })?;

        match event {
            Event::Start(e) => {
                if depth == 0 {
                    if seen_root {
                        return Err(Error::MalformedDocument("multiple root elements".into()));
                    }
                    seen_root = true;
                }
                scan.open(&e, depth, false)?;
                depth += 1;
            }
            Event::Empty(e) => {
                if depth == 0 {
                    if seen_root {
                        return Err(Error::MalformedDocument("multiple root elements".into()));
                    }
                    seen_root = true;
                }
                scan.open(&e, depth, true)?;
            }
            Event::End(_) => {
                if depth == 0 {
                    return Err(Error::MalformedDocument(format!(
                        "unexpected closing tag (at byte {})",
                        reader.buffer_position()
                    )));
                }
                depth -= 1;
                scan.close(depth);
            }
            Event::Text(e) => {
                scan.text(&String::from_utf8_lossy(e.as_ref()));
            }
            Event::CData(e) => {
                scan.text(&String::from_utf8_lossy(&e));
            }
            Event::GeneralRef(e) => {
                let entity = String::from_utf8_lossy(e.as_ref());
                if let Some(resolved) = resolve_entity(&entity) {
                    scan.text(&resolved);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !seen_root {
        return Err(Error::MalformedDocument("no root element".into()));
    }
    if depth != 0 {
        return Err(Error::MalformedDocument(format!(
            "unexpected end of document with {depth} unclosed element(s)"
        )));
    }

    Ok(scan.finish())
}

// ----------------------------------------------------------------------------
// Scan state
// ----------------------------------------------------------------------------

/// Text of the first `tspan` in a label, as far as it has been read.
enum TextRun {
    Absent,
    Reading { depth: usize, text: String },
    Done(String),
}

struct PendingLabel {
    depth: usize,
    x: Option<String>,
    y: Option<String>,
    run: TextRun,
}

struct LayerScan<'a> {
    layer: &'a str,
    layer_attribute: &'a str,
    /// Depth of the open layer group, while inside it.
    layer_depth: Option<usize>,
    layer_found: bool,
    label: Option<PendingLabel>,
    rooms: Vec<Room>,
}

impl<'a> LayerScan<'a> {
    fn new(layer: &'a str, layer_attribute: &'a str) -> Self {
        Self {
            layer,
            layer_attribute,
            layer_depth: None,
            layer_found: false,
            label: None,
            rooms: Vec::new(),
        }
    }

    fn open(&mut self, e: &BytesStart, depth: usize, empty: bool) -> Result<()> {
        let name = e.name();
        let local = local_name(name.as_ref());

        if self.layer_depth.is_none() {
            // Only the first matching group counts.
            if !self.layer_found && local == b"g" && self.is_layer(e)? {
                self.layer_found = true;
                if !empty {
                    self.layer_depth = Some(depth);
                }
            }
            return Ok(());
        }

        if let Some(label) = &mut self.label {
            let next = match &mut label.run {
                // Child elements end the tspan's own text.
                TextRun::Reading { text, .. } => Some(TextRun::Done(std::mem::take(text))),
                TextRun::Absent if local == b"tspan" && empty => Some(TextRun::Done(String::new())),
                TextRun::Absent if local == b"tspan" => Some(TextRun::Reading {
                    depth,
                    text: String::new(),
                }),
                _ => None,
            };
            if let Some(next) = next {
                label.run = next;
            }
            return Ok(());
        }

        if local == b"text" {
            let mut x = None;
            let mut y = None;
            for attr in e.attributes() {
                let attr = attr.map_err(|e| Error::MalformedDocument(e.to_string()))?;
                match attr.key.as_ref() {
                    b"x" => x = Some(attr_value(&attr)),
                    b"y" => y = Some(attr_value(&attr)),
                    _ => {}
                }
            }

            if empty {
                debug!("skipping label without text");
            } else {
                self.label = Some(PendingLabel {
                    depth,
                    x,
                    y,
                    run: TextRun::Absent,
                });
            }
        }
        Ok(())
    }

    fn text(&mut self, s: &str) {
        if let Some(PendingLabel {
            run: TextRun::Reading { text, .. },
            ..
        }) = &mut self.label
        {
            text.push_str(s);
        }
    }

    fn close(&mut self, depth: usize) {
        if let Some(label) = &mut self.label {
            if let TextRun::Reading { depth: run_depth, text } = &mut label.run
                && *run_depth == depth
            {
                let text = std::mem::take(text);
                label.run = TextRun::Done(text);
                return;
            }
            if label.depth != depth {
                return;
            }
        }

        if let Some(label) = self.label.take() {
            self.finish_label(label);
        } else if self.layer_depth == Some(depth) {
            self.layer_depth = None;
        }
    }

    fn finish_label(&mut self, label: PendingLabel) {
        let name = match label.run {
            TextRun::Done(text) | TextRun::Reading { text, .. } => text.trim().to_string(),
            TextRun::Absent => String::new(),
        };
        if name.is_empty() {
            debug!("skipping label without text");
            return;
        }

        let x = label.x.as_deref().and_then(parse_coordinate);
        let y = label.y.as_deref().and_then(parse_coordinate);
        match (x, y) {
            (Some(x), Some(y)) => self.rooms.push(Room { name, x, y }),
            _ => debug!(label = %name, "skipping label without usable coordinates"),
        }
    }

    fn is_layer(&self, e: &BytesStart) -> Result<bool> {
        for attr in e.attributes() {
            let attr = attr.map_err(|e| Error::MalformedDocument(e.to_string()))?;
            if attr.key.as_ref() == self.layer_attribute.as_bytes() {
                return Ok(attr_value(&attr) == self.layer);
            }
        }
        Ok(false)
    }

    fn finish(self) -> Option<Vec<Room>> {
        self.layer_found.then_some(self.rooms)
    }
}

// ----------------------------------------------------------------------------
// Helpers
// ----------------------------------------------------------------------------

/// Strip UTF-8 BOM if present.
pub fn strip_bom(data: &[u8]) -> &[u8] {
    if data.starts_with(&[0xEF, 0xBB, 0xBF]) {
        &data[3..]
    } else {
        data
    }
}

/// Extract local name from namespaced XML name (e.g., "svg:text" -> "text").
fn local_name(name: &[u8]) -> &[u8] {
    name.iter()
        .rposition(|&b| b == b':')
        .map(|i| &name[i + 1..])
        .unwrap_or(name)
}

fn attr_value(attr: &Attribute) -> String {
    let raw = String::from_utf8_lossy(&attr.value);
    match unescape(&raw) {
        Ok(value) => value.into_owned(),
        Err(_) => raw.into_owned(),
    }
}

fn parse_coordinate(value: &str) -> Option<f64> {
    value.trim().parse().ok()
}

/// Resolve XML entity references.
fn resolve_entity(entity: &str) -> Option<String> {
    match entity {
        "apos" => return Some("'".to_string()),
        "quot" => return Some("\"".to_string()),
        "lt" => return Some("<".to_string()),
        "gt" => return Some(">".to_string()),
        "amp" => return Some("&".to_string()),
        _ => {}
    }

    let code = if let Some(hex) = entity.strip_prefix("#x") {
        u32::from_str_radix(hex, 16).ok()?
    } else {
        entity.strip_prefix('#')?.parse::<u32>().ok()?
    };
    char::from_u32(code).map(|c| c.to_string())
}
