//! Capture/replace capability, one implementation per document kind.

use tracing::debug;

use crate::context::{SelectionContext, SelectionTarget};
use crate::document::{Document, DomEventKind, ElementId, ElementKind, TextRange};
use crate::text::{char_len, char_slice, splice};

/// Kind tag used to pick a surface for the focused element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    Input,
    Range,
    Frame,
}

impl SurfaceKind {
    /// Tag for an element. Static text has no surface of its own.
    pub fn of(kind: &ElementKind) -> Option<Self> {
        match kind {
            ElementKind::TextField { .. } => Some(Self::Input),
            ElementKind::Editable { .. } => Some(Self::Range),
            ElementKind::Frame { .. } => Some(Self::Frame),
            ElementKind::Text { .. } => None,
        }
    }

    /// Tag for a captured context. Framed contexts go through the frame surface.
    pub fn for_context(context: &SelectionContext) -> Self {
        if context.is_framed() {
            return Self::Frame;
        }
        match context.target {
            SelectionTarget::Input { .. } => Self::Input,
            SelectionTarget::Range { .. } => Self::Range,
        }
    }
}

/// Where a capture is running: the frame chain so far and how deep we may still go.
#[derive(Debug, Clone)]
pub struct Scope {
    pub frames: Vec<ElementId>,
    pub depth_left: usize,
}

impl Scope {
    pub fn top(max_frame_depth: usize) -> Self {
        Self {
            frames: Vec::new(),
            depth_left: max_frame_depth,
        }
    }

    fn enter(&self, frame: ElementId) -> Option<Self> {
        let depth_left = self.depth_left.checked_sub(1)?;
        let mut frames = self.frames.clone();
        frames.push(frame);
        Some(Self { frames, depth_left })
    }
}

pub trait SelectionSurface: Send + Sync {
    fn kind(&self) -> SurfaceKind;

    /// Read a non-empty selection anchored at `element`.
    fn capture(&self, doc: &Document, element: ElementId, scope: &Scope) -> Option<SelectionContext>;

    /// Replace `original` with `replacement` at the context's location, only if
    /// the live text still matches.
    fn replace(&self, doc: &mut Document, context: &SelectionContext, original: &str, replacement: &str) -> bool;
}

pub struct InputSurface;
pub struct RangeSurface;
pub struct FrameSurface;

pub fn surface_for(kind: SurfaceKind) -> &'static dyn SelectionSurface {
    match kind {
        SurfaceKind::Input => &InputSurface,
        SurfaceKind::Range => &RangeSurface,
        SurfaceKind::Frame => &FrameSurface,
    }
}

impl SelectionSurface for InputSurface {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::Input
    }

    fn capture(&self, doc: &Document, element: ElementId, scope: &Scope) -> Option<SelectionContext> {
        let (start, end, text) = doc.field_selection(element)?;
        Some(SelectionContext::input(
            scope.frames.clone(),
            element,
            start,
            end,
            text,
        ))
    }

    fn replace(&self, doc: &mut Document, context: &SelectionContext, original: &str, replacement: &str) -> bool {
        let SelectionTarget::Input { element, start, end } = &context.target
        else {
            return false;
        };
        let (id, start, end) = (element.id, *start, *end);

        let Some(el) = doc.element_mut(id) else {
            debug!(?id, "input target no longer exists");
            return false;
        };
        let ElementKind::TextField { value, selection } = &mut el.kind else {
            return false;
        };
        if char_slice(value, start, end) != Some(original) {
            debug!(?id, start, end, "input text changed since capture");
            return false;
        }
        let Some(updated) = splice(value, start, end, replacement) else {
            return false;
        };
        *value = updated;
        let caret = start + char_len(replacement);
        *selection = Some((caret, caret));

        doc.focus(id);
        doc.dispatch(id, DomEventKind::Input);
        doc.dispatch(id, DomEventKind::Change);
        true
    }
}

impl RangeSurface {
    /// Text covered by a live range, if the range is still valid.
    fn covered<'a>(doc: &'a Document, range: &TextRange) -> Option<&'a str> {
        char_slice(doc.text_of(range.node)?, range.start, range.end)
    }

    /// First range of the document-level selection.
    pub fn capture_document(&self, doc: &Document, scope: &Scope) -> Option<SelectionContext> {
        let range = doc.selection()?;
        self.capture_range(doc, range, scope)
    }

    fn capture_range(&self, doc: &Document, range: TextRange, scope: &Scope) -> Option<SelectionContext> {
        if range.is_collapsed() {
            return None;
        }
        let text = Self::covered(doc, &range)?;
        if text.is_empty() {
            return None;
        }
        Some(SelectionContext::range(scope.frames.clone(), range, text))
    }
}

impl SelectionSurface for RangeSurface {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::Range
    }

    /// Selection ranges inside the editable region `element`.
    fn capture(&self, doc: &Document, element: ElementId, scope: &Scope) -> Option<SelectionContext> {
        let range = doc.selection()?;
        if !doc.is_within(range.node, element) {
            return None;
        }
        self.capture_range(doc, range, scope)
    }

    fn replace(&self, doc: &mut Document, context: &SelectionContext, original: &str, replacement: &str) -> bool {
        let SelectionTarget::Range { range } = &context.target else {
            return false;
        };
        let range = range.range;

        let Some(current) = Self::covered(doc, &range) else {
            debug!(node = ?range.node, "range target no longer exists");
            return false;
        };
        if current != original && current.trim() != original.trim() {
            debug!(node = ?range.node, "range text changed since capture");
            return false;
        }
        let Some(updated) = doc
            .text_of(range.node)
            .and_then(|text| splice(text, range.start, range.end, replacement))
        else {
            return false;
        };
        doc.set_text(range.node, updated);
        let caret = range.start + char_len(replacement);
        doc.set_selection(Some(TextRange::new(range.node, caret, caret)));

        if let Some(editable) = doc.nearest_editable(range.node) {
            doc.dispatch(editable, DomEventKind::Input);
        }
        true
    }
}

impl SelectionSurface for FrameSurface {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::Frame
    }

    fn capture(&self, doc: &Document, element: ElementId, scope: &Scope) -> Option<SelectionContext> {
        let Some(inner_scope) = scope.enter(element) else {
            debug!(frames = scope.frames.len(), "frame depth limit reached");
            return None;
        };
        let inner = doc.frame_document(element)?;
        capture_in(inner, &inner_scope)
    }

    fn replace(&self, doc: &mut Document, context: &SelectionContext, original: &str, replacement: &str) -> bool {
        let Some(inner) = doc.resolve_frames_mut(context.target.frames()) else {
            debug!("framed target no longer reachable");
            return false;
        };
        let local = SelectionContext {
            text: context.text.clone(),
            target: context.target.local(),
        };
        surface_for(SurfaceKind::for_context(&local)).replace(inner, &local, original, replacement)
    }
}

/// Capture in one document: focused element by kind first, then the
/// document-level selection.
pub(crate) fn capture_in(doc: &Document, scope: &Scope) -> Option<SelectionContext> {
    let focused = doc
        .focused()
        .and_then(|id| Some((id, SurfaceKind::of(&doc.element(id)?.kind)?)));

    if let Some((id, kind)) = focused {
        if let Some(context) = surface_for(kind).capture(doc, id, scope) {
            return Some(context);
        }
    }
    RangeSurface.capture_document(doc, scope)
}
