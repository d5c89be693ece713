//! Selection capture and guarded replacement over a [`Document`].

use tracing::debug;

use crate::context::SelectionContext;
use crate::document::Document;
use crate::surface::{Scope, SurfaceKind, capture_in, surface_for};

/// Frame nesting followed before giving up.
pub const DEFAULT_MAX_FRAME_DEPTH: usize = 4;

/// Read the current selection. Nothing selected yields empty text and no context.
pub fn capture(doc: &Document, max_frame_depth: usize) -> (String, Option<SelectionContext>) {
    match capture_in(doc, &Scope::top(max_frame_depth)) {
        Some(context) => (context.text.clone(), Some(context)),
        None => (String::new(), None),
    }
}

/// Replace `original` with `replacement` at the captured location.
///
/// The live text must still match. When there is no context or it no longer
/// matches, a context is re-derived from the current focus/selection and tried
/// once more.
pub fn replace(
    doc: &mut Document,
    context: Option<&SelectionContext>,
    original: &str,
    replacement: &str,
    max_frame_depth: usize,
) -> bool {
    if let Some(context) = context {
        if replace_at(doc, context, original, replacement) {
            return true;
        }
        debug!("captured context did not match, re-deriving");
    }

    let (_, fresh) = capture(doc, max_frame_depth);
    match fresh {
        Some(fresh) => replace_at(doc, &fresh, original, replacement),
        None => false,
    }
}

fn replace_at(doc: &mut Document, context: &SelectionContext, original: &str, replacement: &str) -> bool {
    let surface = surface_for(SurfaceKind::for_context(context));
    let replaced = surface.replace(doc, context, original, replacement);
    debug!(surface = ?surface.kind(), replaced, "replacement attempt");
    replaced
}

#[cfg(test)]
#[path = "selection_tests.rs"]
mod tests;
