//! Serialization of [`Node`] trees back to XML text.

use crate::{Error, Node, Result};
use quick_xml::escape::escape;
use std::fmt;
use std::io::{self, Write};

/// Output settings for [`write_to`] and [`to_string_with`].
///
/// The default is compact output with self-closing empty elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Spaces per nesting level. `None` writes everything on one line with no
    /// inserted whitespace.
    pub indent: Option<usize>,

    /// Write empty elements as `<t></t>` instead of `<t/>`.
    pub expand_empty_elements: bool,
}

impl WriteOptions {
    pub fn compact() -> Self {
        Self::default()
    }

    /// One tag per line, nested `width` spaces deeper per level.
    pub fn indented(width: usize) -> Self {
        Self {
            indent: Some(width),
            ..Self::default()
        }
    }

    pub fn with_indent(mut self, indent: Option<usize>) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_expand_empty_elements(mut self, expand: bool) -> Self {
        self.expand_empty_elements = expand;
        self
    }
}

/// Serialize `node` and its subtree into `writer`.
///
/// Attributes are written in insertion order. Attribute values and text are
/// escaped; tags and attribute names are written as they are.
///
/// # Errors
///
/// Returns [`Error::Write`] if the writer fails. Output written before the
/// failure is not rolled back.
pub fn write_to<W: Write>(node: &Node, writer: W, options: &WriteOptions) -> Result<()> {
    let mut xml = XmlWriter {
        writer,
        options,
        at_start: true,
    };
    xml.write_node(node, 0, true)?;
    xml.writer.flush()?;
    tracing::trace!(root = %node.tag(), indent = ?options.indent, "serialized XML tree");
    Ok(())
}

/// Serialize `node` into a `String`.
pub fn to_string_with(node: &Node, options: &WriteOptions) -> Result<String> {
    let mut buffer = Vec::new();
    write_to(node, &mut buffer, options)?;
    String::from_utf8(buffer)
        .map_err(|err| Error::Write(io::Error::new(io::ErrorKind::InvalidData, err)))
}

struct XmlWriter<'o, W> {
    writer: W,
    options: &'o WriteOptions,
    /// Nothing has been written yet, so the first line needs no newline.
    at_start: bool,
}

impl<W: Write> XmlWriter<'_, W> {
    /// `indent` is false inside an element that has both text and children:
    /// whitespace inserted there would become its last text segment and
    /// replace the real text on reparse.
    fn write_node(&mut self, node: &Node, depth: usize, indent: bool) -> io::Result<()> {
        let data = node.borrow();

        if indent {
            self.start_line(depth)?;
        }
        write!(self.writer, "<{}", data.tag)?;
        for (name, value) in data.attributes.iter().flatten() {
            write!(self.writer, " {}=\"{}\"", name, escape(value.as_str()))?;
        }

        if data.children.is_empty() && data.inner_text.is_empty() {
            if self.options.expand_empty_elements {
                return write!(self.writer, "></{}>", data.tag);
            }
            return self.writer.write_all(b"/>");
        }

        self.writer.write_all(b">")?;
        if !data.inner_text.is_empty() {
            write!(self.writer, "{}", escape(data.inner_text.as_str()))?;
        }
        let indent_children = indent && data.inner_text.is_empty();
        for child in &data.children {
            self.write_node(child, depth + 1, indent_children)?;
        }
        if indent_children && !data.children.is_empty() {
            self.start_line(depth)?;
        }
        write!(self.writer, "</{}>", data.tag)
    }

    /// In indented mode, move to a fresh line at `depth`.
    fn start_line(&mut self, depth: usize) -> io::Result<()> {
        let Some(width) = self.options.indent else {
            return Ok(());
        };
        if self.at_start {
            self.at_start = false;
        } else {
            self.writer.write_all(b"\n")?;
        }
        write!(self.writer, "{:1$}", "", depth * width)
    }
}

impl Node {
    /// Compact XML for this subtree.
    pub fn to_xml(&self) -> String {
        to_string_with(self, &WriteOptions::compact()).unwrap_or_default()
    }

    /// XML for this subtree indented by two spaces per level. Empty if
    /// serialization fails.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buffer = Vec::new();
        if write_to(self, &mut buffer, &WriteOptions::indented(2)).is_err() {
            buffer.clear();
        }
        buffer
    }
}

/// Formats the subtree as XML indented by two spaces per level.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = to_string_with(self, &WriteOptions::indented(2)).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}
