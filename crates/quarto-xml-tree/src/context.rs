//! Context for XML parsing with note collection.

/// A non-fatal observation made while parsing.
///
/// The tree model keeps one text slot per element and one value per attribute
/// name, so some inputs are collapsed. Notes record where that happened; they
/// never change the resulting tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseNote {
    /// A later text segment replaced earlier text of the same element.
    TextOverwritten {
        /// Tag of the element whose text was replaced.
        tag: String,
        /// The text that was dropped.
        discarded: String,
    },

    /// An attribute name appeared more than once; the last value was kept.
    DuplicateAttribute { tag: String, name: String },

    /// A comment or processing instruction was dropped.
    SkippedMarkup {
        /// `"comment"` or `"processing instruction"`.
        kind: &'static str,
    },
}

/// Context for XML parsing that collects notes.
///
/// # Example
///
/// ```rust
/// use quarto_xml_tree::{parse_with_context, ParseContext, ParseNote};
///
/// let mut ctx = ParseContext::new();
/// let root = parse_with_context("<p>one<br/>two</p>", &mut ctx).unwrap();
///
/// assert_eq!(root.inner_text(), "two");
/// assert_eq!(
///     ctx.notes(),
///     &[ParseNote::TextOverwritten {
///         tag: "p".to_string(),
///         discarded: "one".to_string(),
///     }]
/// );
/// ```
#[derive(Debug, Default)]
pub struct ParseContext {
    notes: Vec<ParseNote>,
}

impl ParseContext {
    /// Create a new, empty parse context.
    pub fn new() -> Self {
        Self { notes: Vec::new() }
    }

    /// Record a note.
    pub fn add_note(&mut self, note: ParseNote) {
        self.notes.push(note);
    }

    /// Check if any notes have been collected.
    pub fn has_notes(&self) -> bool {
        !self.notes.is_empty()
    }

    /// Get all collected notes, in the order they were made.
    pub fn notes(&self) -> &[ParseNote] {
        &self.notes
    }

    /// Take all collected notes, leaving the context empty.
    pub fn take_notes(&mut self) -> Vec<ParseNote> {
        std::mem::take(&mut self.notes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_notes_empties_context() {
        let mut ctx = ParseContext::new();
        assert!(!ctx.has_notes());

        ctx.add_note(ParseNote::SkippedMarkup { kind: "comment" });
        assert!(ctx.has_notes());

        let notes = ctx.take_notes();
        assert_eq!(notes.len(), 1);
        assert!(!ctx.has_notes());
    }
}
