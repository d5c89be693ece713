//! In-memory page document.
//!
//! A flat arena of elements with parent links, one focused element, one live
//! selection range, and a log of the input/change notifications dispatched on
//! elements. Frames own a nested [`Document`].

use std::collections::BTreeMap;

use crate::text::{char_len, char_slice};

/// Element handle, unique within one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u32);

/// What an element is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    /// Input or textarea: a value with its own selection offsets.
    TextField {
        value: String,
        selection: Option<(usize, usize)>,
    },
    /// Content-editable region.
    Editable { text: String },
    /// Static rendered text.
    Text { text: String },
    /// Embedded frame with its own document.
    Frame { document: Box<Document> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub id: ElementId,
    pub parent: Option<ElementId>,
    pub kind: ElementKind,
}

/// Live range inside one text-bearing element, in char offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRange {
    pub node: ElementId,
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    pub fn new(node: ElementId, start: usize, end: usize) -> Self {
        Self { node, start, end }
    }

    pub fn is_collapsed(&self) -> bool {
        self.end <= self.start
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomEventKind {
    Input,
    Change,
}

/// Notification dispatched so host page logic observes a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomEvent {
    pub target: ElementId,
    pub kind: DomEventKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    elements: BTreeMap<ElementId, Element>,
    next_id: u32,
    focused: Option<ElementId>,
    selection: Option<TextRange>,
    has_body: bool,
    events: Vec<DomEvent>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            elements: BTreeMap::new(),
            next_id: 1,
            focused: None,
            selection: None,
            has_body: true,
            events: Vec::new(),
        }
    }

    /// A document that has not rendered a body (notices fall back to alerts).
    pub fn without_body() -> Self {
        Self {
            has_body: false,
            ..Self::new()
        }
    }

    pub fn has_body(&self) -> bool {
        self.has_body
    }

    fn insert(&mut self, parent: Option<ElementId>, kind: ElementKind) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.elements.insert(id, Element { id, parent, kind });
        id
    }

    pub fn add_text_field(&mut self, parent: Option<ElementId>, value: impl Into<String>) -> ElementId {
        self.insert(
            parent,
            ElementKind::TextField {
                value: value.into(),
                selection: None,
            },
        )
    }

    pub fn add_editable(&mut self, parent: Option<ElementId>, text: impl Into<String>) -> ElementId {
        self.insert(parent, ElementKind::Editable { text: text.into() })
    }

    pub fn add_text(&mut self, parent: Option<ElementId>, text: impl Into<String>) -> ElementId {
        self.insert(parent, ElementKind::Text { text: text.into() })
    }

    pub fn add_frame(&mut self, parent: Option<ElementId>, document: Document) -> ElementId {
        self.insert(
            parent,
            ElementKind::Frame {
                document: Box::new(document),
            },
        )
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    pub(crate) fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(&id)
    }

    pub fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    /// Move focus. Unknown ids clear focus.
    pub fn focus(&mut self, id: ElementId) {
        self.focused = self.elements.contains_key(&id).then_some(id);
    }

    pub fn blur(&mut self) {
        self.focused = None;
    }

    pub fn selection(&self) -> Option<TextRange> {
        self.selection
    }

    /// Set the document-level selection. Ranges outside the node's text are ignored.
    pub fn select_range(&mut self, range: TextRange) -> bool {
        let valid = self
            .text_of(range.node)
            .is_some_and(|text| range.start <= range.end && range.end <= char_len(text));
        if valid {
            self.selection = Some(range);
        }
        valid
    }

    pub(crate) fn set_selection(&mut self, range: Option<TextRange>) {
        self.selection = range;
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Focus a text field and select `[start, end)` of its value.
    pub fn select_in_field(&mut self, id: ElementId, start: usize, end: usize) -> bool {
        let Some(Element {
            kind: ElementKind::TextField { value, selection },
            ..
        }) = self.elements.get_mut(&id)
        else {
            return false;
        };
        if start > end || end > char_len(value) {
            return false;
        }
        *selection = Some((start, end));
        self.focused = Some(id);
        true
    }

    /// Text carried by a field, editable region, or text node.
    pub fn text_of(&self, id: ElementId) -> Option<&str> {
        match &self.elements.get(&id)?.kind {
            ElementKind::TextField { value, .. } => Some(value),
            ElementKind::Editable { text } | ElementKind::Text { text } => Some(text),
            ElementKind::Frame { .. } => None,
        }
    }

    /// Selected substring of a text field, if it has a non-empty selection.
    pub fn field_selection(&self, id: ElementId) -> Option<(usize, usize, &str)> {
        match &self.elements.get(&id)?.kind {
            ElementKind::TextField {
                value,
                selection: Some((start, end)),
            } if end > start => char_slice(value, *start, *end).map(|s| (*start, *end, s)),
            _ => None,
        }
    }

    /// Raw selection offsets of a text field, collapsed or not.
    pub fn field_caret(&self, id: ElementId) -> Option<(usize, usize)> {
        match &self.elements.get(&id)?.kind {
            ElementKind::TextField { selection, .. } => *selection,
            _ => None,
        }
    }

    /// Overwrite a field's value as the user typing would; the selection collapses to the end.
    pub fn set_field_value(&mut self, id: ElementId, new_value: impl Into<String>) -> bool {
        match self.elements.get_mut(&id).map(|e| &mut e.kind) {
            Some(ElementKind::TextField { value, selection }) => {
                *value = new_value.into();
                let end = char_len(value);
                *selection = Some((end, end));
                true
            }
            _ => false,
        }
    }

    /// Overwrite the text of an editable region or text node. A selection inside it is dropped.
    pub fn set_text(&mut self, id: ElementId, new_text: impl Into<String>) -> bool {
        match self.elements.get_mut(&id).map(|e| &mut e.kind) {
            Some(ElementKind::Editable { text }) | Some(ElementKind::Text { text }) => {
                *text = new_text.into();
            }
            _ => return false,
        }
        if self.selection.is_some_and(|range| range.node == id) {
            self.selection = None;
        }
        true
    }

    pub fn is_editable(&self, id: ElementId) -> bool {
        matches!(
            self.elements.get(&id).map(|e| &e.kind),
            Some(ElementKind::Editable { .. })
        )
    }

    /// `id` itself or its closest ancestor that is content-editable.
    pub fn nearest_editable(&self, id: ElementId) -> Option<ElementId> {
        let mut current = Some(id);
        while let Some(candidate) = current {
            if self.is_editable(candidate) {
                return Some(candidate);
            }
            current = self.elements.get(&candidate).and_then(|e| e.parent);
        }
        None
    }

    /// Whether `id` is `ancestor` or nested under it.
    pub fn is_within(&self, id: ElementId, ancestor: ElementId) -> bool {
        let mut current = Some(id);
        while let Some(candidate) = current {
            if candidate == ancestor {
                return true;
            }
            current = self.elements.get(&candidate).and_then(|e| e.parent);
        }
        false
    }

    pub fn frame_document(&self, id: ElementId) -> Option<&Document> {
        match &self.elements.get(&id)?.kind {
            ElementKind::Frame { document } => Some(document),
            _ => None,
        }
    }

    pub fn frame_document_mut(&mut self, id: ElementId) -> Option<&mut Document> {
        match &mut self.elements.get_mut(&id)?.kind {
            ElementKind::Frame { document } => Some(document),
            _ => None,
        }
    }

    /// Follow a chain of frame ids down to the innermost document.
    pub fn resolve_frames(&self, frames: &[ElementId]) -> Option<&Document> {
        frames
            .iter()
            .try_fold(self, |doc, frame| doc.frame_document(*frame))
    }

    pub fn resolve_frames_mut(&mut self, frames: &[ElementId]) -> Option<&mut Document> {
        let mut doc = self;
        for frame in frames {
            doc = doc.frame_document_mut(*frame)?;
        }
        Some(doc)
    }

    pub(crate) fn dispatch(&mut self, target: ElementId, kind: DomEventKind) {
        self.events.push(DomEvent { target, kind });
    }

    /// Notifications dispatched so far, oldest first.
    pub fn events(&self) -> &[DomEvent] {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_in_field_focuses() {
        let mut doc = Document::new();
        let field = doc.add_text_field(None, "hello world");
        assert!(doc.select_in_field(field, 6, 11));
        assert_eq!(doc.focused(), Some(field));
        assert_eq!(doc.field_selection(field), Some((6, 11, "world")));
    }

    #[test]
    fn test_select_in_field_rejects_bad_offsets() {
        let mut doc = Document::new();
        let field = doc.add_text_field(None, "abc");
        assert!(!doc.select_in_field(field, 2, 10));
        assert!(!doc.select_in_field(field, 2, 1));
        assert_eq!(doc.focused(), None);
    }

    #[test]
    fn test_collapsed_field_selection_is_none() {
        let mut doc = Document::new();
        let field = doc.add_text_field(None, "abc");
        doc.select_in_field(field, 1, 1);
        assert_eq!(doc.field_selection(field), None);
    }

    #[test]
    fn test_set_field_value_collapses_selection() {
        let mut doc = Document::new();
        let field = doc.add_text_field(None, "abc");
        doc.select_in_field(field, 0, 3);
        doc.set_field_value(field, "xyz!");
        assert_eq!(doc.field_selection(field), None);
        assert_eq!(doc.text_of(field), Some("xyz!"));
    }

    #[test]
    fn test_nearest_editable() {
        let mut doc = Document::new();
        let editor = doc.add_editable(None, "");
        let inner = doc.add_text(Some(editor), "inner text");
        let outside = doc.add_text(None, "static");
        assert_eq!(doc.nearest_editable(inner), Some(editor));
        assert_eq!(doc.nearest_editable(editor), Some(editor));
        assert_eq!(doc.nearest_editable(outside), None);
        assert!(doc.is_within(inner, editor));
        assert!(!doc.is_within(outside, editor));
    }

    #[test]
    fn test_select_range_validates() {
        let mut doc = Document::new();
        let text = doc.add_text(None, "short");
        assert!(!doc.select_range(TextRange::new(text, 0, 10)));
        assert!(doc.select_range(TextRange::new(text, 0, 5)));
        assert_eq!(doc.selection(), Some(TextRange::new(text, 0, 5)));
    }

    #[test]
    fn test_set_text_drops_selection_in_node() {
        let mut doc = Document::new();
        let text = doc.add_editable(None, "hello");
        doc.select_range(TextRange::new(text, 0, 5));
        doc.set_text(text, "bye");
        assert_eq!(doc.selection(), None);
    }

    #[test]
    fn test_resolve_frames() {
        let mut inner = Document::new();
        let field = inner.add_text_field(None, "nested");
        let mut outer = Document::new();
        let frame = outer.add_frame(None, inner);

        let resolved = outer.resolve_frames(&[frame]).unwrap();
        assert_eq!(resolved.text_of(field), Some("nested"));
        assert!(outer.resolve_frames(&[ElementId(99)]).is_none());
        assert!(outer.resolve_frames(&[]).is_some());
    }
}
