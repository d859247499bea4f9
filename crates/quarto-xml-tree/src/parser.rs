//! XML parser that builds [`Node`] trees.

use crate::{Error, Node, ParseContext, ParseNote, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesCData, BytesEnd, BytesStart, BytesText, Event};
use std::io::BufRead;
use std::str::FromStr;

/// Parse XML from a string into a tree and return its root element.
///
/// # Example
///
/// ```rust
/// use quarto_xml_tree::parse;
///
/// let root = parse(r#"<a x="1"><b>hello</b><b>world</b></a>"#).unwrap();
/// assert_eq!(root.tag(), "a");
/// assert_eq!(root.get_attribute("x"), "1");
/// assert_eq!(root.child_count(), 2);
/// ```
///
/// # Errors
///
/// Returns an error if the XML is malformed: a syntax error, an unclosed
/// element, a mismatched end tag, no root element, or more than one.
pub fn parse(content: &str) -> Result<Node> {
    XmlParser::new(content.as_bytes(), None).parse()
}

/// Parse XML from raw UTF-8 bytes.
pub fn parse_bytes(content: &[u8]) -> Result<Node> {
    XmlParser::new(content, None).parse()
}

/// Parse XML from a buffered reader.
///
/// The whole document is read; the tree is only returned once the root
/// element has been closed.
pub fn parse_reader<R: BufRead>(reader: R) -> Result<Node> {
    XmlParser::new(reader, None).parse()
}

/// Parse XML from a string, recording lossy collapses in `ctx`.
///
/// The resulting tree is identical to the one [`parse`] returns.
pub fn parse_with_context(content: &str, ctx: &mut ParseContext) -> Result<Node> {
    XmlParser::new(content.as_bytes(), Some(ctx)).parse()
}

impl FromStr for Node {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}

/// Internal parser state.
struct XmlParser<'c, R> {
    /// The quick-xml reader.
    reader: Reader<R>,

    /// Open elements, innermost last. Each one is already attached to the
    /// element below it.
    stack: Vec<Node>,

    /// Where notes go, if the caller asked for them.
    ctx: Option<&'c mut ParseContext>,

    /// Number of elements created so far.
    elements: usize,
}

impl<'c, R: BufRead> XmlParser<'c, R> {
    fn new(source: R, ctx: Option<&'c mut ParseContext>) -> Self {
        let mut reader = Reader::from_reader(source);
        reader.config_mut().trim_text_start = false;
        reader.config_mut().trim_text_end = false;
        // End tags are matched against `stack` so the error names both tags.
        reader.config_mut().check_end_names = false;
        reader.config_mut().allow_unmatched_ends = true;

        Self {
            reader,
            stack: Vec::new(),
            ctx,
            elements: 0,
        }
    }

    fn parse(mut self) -> Result<Node> {
        let mut root: Option<Node> = None;
        let mut buf = Vec::new();

        loop {
            // Capture position before reading the event
            let event_start = self.reader.buffer_position();
            buf.clear();

            match self.reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    let node = self.open_element(&e, event_start, &mut root)?;
                    self.stack.push(node);
                }
                Ok(Event::Empty(e)) => {
                    self.open_element(&e, event_start, &mut root)?;
                }
                Ok(Event::End(e)) => {
                    self.close_element(&e, event_start)?;
                }
                Ok(Event::Text(e)) => {
                    self.handle_text(&e, event_start)?;
                }
                Ok(Event::CData(e)) => {
                    self.handle_cdata(&e, event_start)?;
                }
                Ok(Event::Comment(_)) => {
                    self.note(ParseNote::SkippedMarkup { kind: "comment" });
                }
                Ok(Event::PI(_)) => {
                    self.note(ParseNote::SkippedMarkup {
                        kind: "processing instruction",
                    });
                }
                Ok(Event::Decl(_) | Event::DocType(_)) => {
                    // Skip XML declarations and DOCTYPE declarations
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::XmlSyntax {
                        message: e.to_string(),
                        position: Some(self.reader.error_position()),
                    });
                }
            }
        }

        // Check for unclosed elements
        if let Some(node) = self.stack.last() {
            return Err(Error::UnexpectedEof {
                expected: format!("closing tag </{}>", node.tag()),
            });
        }

        let root = root.ok_or(Error::EmptyDocument)?;
        tracing::debug!(
            root = %root.tag(),
            elements = self.elements,
            "parsed XML document"
        );
        Ok(root)
    }

    /// Create the element for a start or empty tag and attach it to the
    /// innermost open element, or make it the root.
    fn open_element(
        &mut self,
        e: &BytesStart<'_>,
        position: u64,
        root: &mut Option<Node>,
    ) -> Result<Node> {
        let node = Node::new(decode_utf8(e.name().into_inner(), "tag name", position)?);

        let mut attributes = e.attributes();
        // Repeated names are allowed; the last value wins.
        attributes.with_checks(false);
        for attr_result in attributes {
            let attr = attr_result?;
            let name = decode_utf8(attr.key.into_inner(), "attribute name", position)?.to_string();
            let value = attr.unescape_value().map_err(|err| Error::XmlSyntax {
                message: format!("Invalid attribute value: {}", err),
                position: Some(position),
            })?;

            if node.has_attribute(&name) {
                self.note(ParseNote::DuplicateAttribute {
                    tag: node.tag(),
                    name: name.clone(),
                });
            }
            node.set_attribute(name, value);
        }

        match self.stack.last() {
            Some(parent) => {
                parent.append_child(node.clone());
            }
            None if root.is_some() => return Err(Error::MultipleRoots),
            None => *root = Some(node.clone()),
        }

        self.elements += 1;
        Ok(node)
    }

    fn close_element(&mut self, e: &BytesEnd<'_>, position: u64) -> Result<()> {
        let found = decode_utf8(e.name().into_inner(), "end tag name", position)?.to_string();

        let node = self.stack.pop().ok_or_else(|| Error::InvalidStructure {
            message: format!("Unexpected closing tag </{}>", found),
        })?;

        // Verify tag names match
        if !node.has_tag(&found) {
            return Err(Error::MismatchedEndTag {
                expected: node.tag(),
                found,
            });
        }
        Ok(())
    }

    fn handle_text(&mut self, e: &BytesText<'_>, position: u64) -> Result<()> {
        let text = e.unescape().map_err(|err| Error::XmlSyntax {
            message: format!("Invalid text content: {}", err),
            position: Some(position),
        })?;
        self.store_text(text.trim());
        Ok(())
    }

    fn handle_cdata(&mut self, e: &BytesCData<'_>, position: u64) -> Result<()> {
        let text = decode_utf8(e.as_ref(), "CDATA section", position)?;
        self.store_text(text.trim());
        Ok(())
    }

    /// Each element has one text slot: the latest segment replaces any
    /// earlier one, including with an empty string. Text outside the root
    /// is dropped.
    fn store_text(&mut self, text: &str) {
        let Some(node) = self.stack.last() else {
            return;
        };
        let previous = node.replace_inner_text(text);
        if !previous.is_empty() {
            let tag = node.tag();
            tracing::trace!(%tag, discarded = %previous, "text segment overwritten");
            self.note(ParseNote::TextOverwritten {
                tag,
                discarded: previous,
            });
        }
    }

    fn note(&mut self, note: ParseNote) {
        if let Some(ctx) = self.ctx.as_deref_mut() {
            ctx.add_note(note);
        }
    }
}

/// Names and CDATA are raw bytes from the reader; invalid UTF-8 there is a
/// syntax error rather than something to patch over.
fn decode_utf8<'b>(bytes: &'b [u8], what: &str, position: u64) -> Result<&'b str> {
    std::str::from_utf8(bytes).map_err(|err| Error::XmlSyntax {
        message: format!("Invalid UTF-8 in {}: {}", what, err),
        position: Some(position),
    })
}
