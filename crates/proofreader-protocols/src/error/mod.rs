//! Error types for the proofreader protocol layer.

mod proofread;
mod storage;
mod transport;

pub use proofread::*;
pub use storage::*;
pub use transport::*;
