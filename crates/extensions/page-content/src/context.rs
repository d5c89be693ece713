//! Where a capture happened, so the same region can be re-targeted later.

use crate::document::{ElementId, TextRange};

/// Element inside a (possibly nested) document. `frames` is the chain of frame
/// elements from the top document down to the one owning `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementRef {
    pub frames: Vec<ElementId>,
    pub id: ElementId,
}

/// Cloned selection range inside a (possibly nested) document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeRef {
    pub frames: Vec<ElementId>,
    pub range: TextRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionTarget {
    Input {
        element: ElementRef,
        start: usize,
        end: usize,
    },
    Range {
        range: RangeRef,
    },
}

impl SelectionTarget {
    pub fn frames(&self) -> &[ElementId] {
        match self {
            Self::Input { element, .. } => &element.frames,
            Self::Range { range } => &range.frames,
        }
    }

    /// Same target, addressed relative to the innermost document.
    pub(crate) fn local(&self) -> Self {
        match self {
            Self::Input {
                element,
                start,
                end,
            } => Self::Input {
                element: ElementRef {
                    frames: Vec::new(),
                    id: element.id,
                },
                start: *start,
                end: *end,
            },
            Self::Range { range } => Self::Range {
                range: RangeRef {
                    frames: Vec::new(),
                    range: range.range,
                },
            },
        }
    }
}

/// Captured text plus its location. Consumed by one replacement attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionContext {
    pub text: String,
    pub target: SelectionTarget,
}

impl SelectionContext {
    pub fn input(frames: Vec<ElementId>, id: ElementId, start: usize, end: usize, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            target: SelectionTarget::Input {
                element: ElementRef { frames, id },
                start,
                end,
            },
        }
    }

    pub fn range(frames: Vec<ElementId>, range: TextRange, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            target: SelectionTarget::Range {
                range: RangeRef { frames, range },
            },
        }
    }

    pub fn is_framed(&self) -> bool {
        !self.target.frames().is_empty()
    }
}
