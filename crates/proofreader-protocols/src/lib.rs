//! # Proofreader Protocols
//!
//! Shared types and trait seams for the proofreading pipeline.
//! Contains only interface definitions and the wire formats exchanged
//! between the background side and page contexts.
//!
//! ## Core Traits
//!
//! - [`SettingsStore`] - Persisted key/value settings
//! - [`Rewriter`] - Remote text rewriting
//! - [`PageTransport`] - Message delivery into a page context
//! - [`FallbackIndicator`] - Badge shown when in-page notification is impossible

pub mod delivery;
pub mod error;
pub mod message;
pub mod rewrite;
pub mod settings;
pub mod types;

pub use delivery::{DeliveryOutcome, DeliveryReason, FallbackIndicator, PageTransport};
pub use error::{ErrorKind, ProofreadError, StorageError, TransportError};
pub use message::{
    BackgroundMessage, BackgroundResponse, BadgeState, PageCommand, PageMessage, PageResponse,
};
pub use rewrite::{RewriteRequest, RewriteResult, Rewriter};
pub use settings::{LastError, Settings, SettingsMap, SettingsStore};
pub use types::{TabId, Tone};
