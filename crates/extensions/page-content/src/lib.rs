//! # Page content
//!
//! Page-side half of the proofreader: an in-memory document model,
//! selection capture and guarded replacement, the content script that
//! answers background messages, and a tab host that implements
//! [`PageTransport`](proofreader_protocols::PageTransport) over open pages.

pub mod content_script;
pub mod context;
pub mod document;
pub mod selection;
pub mod surface;
pub mod tabs;
mod text;

pub use content_script::{ContentScript, EMPTY_SELECTION_HINT, Notice, TOAST_LIFETIME};
pub use context::{ElementRef, RangeRef, SelectionContext, SelectionTarget};
pub use document::{DomEvent, DomEventKind, Document, ElementId, ElementKind, TextRange};
pub use selection::{DEFAULT_MAX_FRAME_DEPTH, capture, replace};
pub use self_test::{SELF_TEST_SAMPLE, SelfTestError, run_local_replacement_check};
pub use surface::{SelectionSurface, SurfaceKind};
pub use tabs::{NO_RECEIVER_ERROR, PORT_CLOSED_ERROR, TabHost, no_tab_error};
