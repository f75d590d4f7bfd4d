//! Lease document assembly
//!
//! Composes a placeholder-resolved template and up to two captured
//! signature exports into a paginated PDF using lopdf content streams.
//! Assembly is synchronous and stateless: one call, one immutable byte
//! buffer.

pub mod assembler;
pub mod error;

mod layout;
mod svg_path;

pub use assembler::{assemble, AssembleOptions, SignatureSlots, SignerNames};
pub use error::AssembleError;
