use sqlmapper_core::{bail, err, Result};

use quick_xml::{
    escape::{escape, partial_escape},
    events::{BytesStart, Event},
    Reader,
};

/// Owned markup element. Mapper documents are small, so they are read into
/// a tree once and walked from there.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Element {
    pub(crate) name: String,
    pub(crate) attrs: Vec<(String, String)>,
    pub(crate) children: Vec<Content>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Content {
    Element(Element),
    Text(String),
}

/// Reads a document into its root element.
///
/// Comments, processing instructions and the doctype are dropped; CDATA
/// sections become plain text.
pub(crate) fn parse(src: &str) -> Result<Element> {
    let mut reader = Reader::from_str(src);
    reader.config_mut().check_end_names = false;

    let mut stack: Vec<Element> = vec![];
    let mut root = None;

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(e) => {
                let inside = stack
                    .last()
                    .map(|el| format!(" inside `{}`", el.snippet()))
                    .unwrap_or_default();
                bail!(
                    "malformed markup at byte {}{inside}: {e}",
                    reader.buffer_position()
                );
            }
        };

        match event {
            Event::Start(start) => stack.push(Element::from_start(&start)?),
            Event::Empty(start) => {
                let el = Element::from_start(&start)?;
                close(&mut stack, &mut root, el)?;
            }
            Event::End(end) => {
                let name = decode(end.name().as_ref())?.to_string();
                let Some(el) = stack.pop() else {
                    bail!("unexpected closing tag `</{name}>`");
                };
                if el.name != name {
                    // Name the statement the tag was left open in
                    let within = match stack.get(1) {
                        Some(statement) => format!(" in `{}`", statement.snippet()),
                        None => String::new(),
                    };
                    bail!("`</{name}>` closes unterminated `{}`{within}", el.snippet());
                }
                close(&mut stack, &mut root, el)?;
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(|e| err!("{e}"))?;
                push_text(&mut stack, &text)?;
            }
            Event::CData(cdata) => {
                let text = decode(&cdata)?.to_string();
                push_text(&mut stack, &text)?;
            }
            Event::Eof => break,
            Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
        }
    }

    if let Some(el) = stack.pop() {
        bail!("unterminated tag `{}`", el.snippet());
    }

    root.ok_or_else(|| err!("document has no root element"))
}

fn close(stack: &mut [Element], root: &mut Option<Element>, el: Element) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Content::Element(el)),
        None if root.is_none() => *root = Some(el),
        None => bail!("more than one root element; found `{}`", el.snippet()),
    }
    Ok(())
}

fn push_text(stack: &mut [Element], text: &str) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.push_text(text),
        None if text.trim().is_empty() => {}
        None => bail!("text outside of the root element"),
    }
    Ok(())
}

fn decode(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| err!("invalid UTF-8 in markup: {e}"))
}

impl Element {
    pub(crate) fn new(name: impl Into<String>) -> Element {
        Element {
            name: name.into(),
            attrs: vec![],
            children: vec![],
        }
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Element> {
        let mut el = Element::new(decode(start.name().as_ref())?);

        for attr in start.attributes() {
            let attr = attr.map_err(|e| err!("invalid attribute in `<{}>`: {e}", el.name))?;
            let key = decode(attr.key.as_ref())?.to_string();
            let value = attr
                .unescape_value()
                .map_err(|e| err!("invalid attribute `{key}` in `<{}>`: {e}", el.name))?;
            el.attrs.push((key, value.into_owned()));
        }

        Ok(el)
    }

    pub(crate) fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub(crate) fn require(&self, name: &str) -> Result<&str> {
        match self.attr(name) {
            Some(value) if !value.trim().is_empty() => Ok(value),
            _ => bail!("`<{}>` is missing the `{name}` attribute", self.name),
        }
    }

    /// Element children, skipping text.
    pub(crate) fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|content| match content {
            Content::Element(el) => Some(el),
            Content::Text(_) => None,
        })
    }

    /// Non-blank text directly inside this element, if any.
    pub(crate) fn stray_text(&self) -> Option<&str> {
        self.children.iter().find_map(|content| match content {
            Content::Text(text) if !text.trim().is_empty() => Some(text.trim()),
            _ => None,
        })
    }

    fn push_text(&mut self, text: &str) {
        match self.children.last_mut() {
            Some(Content::Text(prev)) => prev.push_str(text),
            _ => self.children.push(Content::Text(text.to_string())),
        }
    }

    /// The opening tag, for error messages.
    pub(crate) fn snippet(&self) -> String {
        let mut ret = format!("<{}", self.name);
        for (key, value) in &self.attrs {
            ret.push_str(&format!(" {key}=\"{}\"", escape(value.as_str())));
        }
        ret.push('>');
        ret
    }
}

/// Writes content back out as markup.
pub(crate) fn to_markup(contents: &[Content]) -> String {
    let mut dst = String::new();
    write_markup(contents, &mut dst);
    dst
}

fn write_markup(contents: &[Content], dst: &mut String) {
    for content in contents {
        match content {
            Content::Text(text) => dst.push_str(&partial_escape(text.as_str())),
            Content::Element(el) if el.children.is_empty() => {
                let snippet = el.snippet();
                dst.push_str(&snippet[..snippet.len() - 1]);
                dst.push_str("/>");
            }
            Content::Element(el) => {
                dst.push_str(&el.snippet());
                write_markup(&el.children, dst);
                dst.push_str(&format!("</{}>", el.name));
            }
        }
    }
}

/// Abbreviates text for error messages.
pub(crate) fn abbreviate(text: &str) -> String {
    const MAX: usize = 60;

    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    match text.char_indices().nth(MAX) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text,
    }
}
