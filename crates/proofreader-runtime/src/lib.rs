//! # Proofreader Runtime
//!
//! The proofreading pipeline on the background side: the orchestrator state
//! machine, the delivery layer with its fallback badge, the background message
//! router, and debug-console diagnostics.

pub mod background;
pub mod badge;
pub mod corrections;
pub mod delivery;
pub mod diagnostics;
pub mod orchestrator;

pub use background::BackgroundRouter;
pub use badge::ActionBadge;
pub use corrections::{Correction, CorrectionError, merge_corrections};
pub use delivery::{Delivery, DeliveryPolicy, NoReceiverPatterns};
pub use diagnostics::{PingStatus, StorageSnapshot, mask_key, ping, run_self_test, snapshot};
pub use orchestrator::{FlowReport, FlowState, Orchestrator, RunOptions};
