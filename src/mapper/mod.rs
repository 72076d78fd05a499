//! Purpose: Define the public API boundary for the mapper core.
//! Exports: Conversion engine, temporal encoding adapters, and error types.
//! Role: Public, additive-only surface; implementation modules stay private.
//! Invariants: This module is the only public path to the conversion engine.
//! Invariants: Encoding rules are resolved through this boundary, never rebuilt by callers.

mod encoding;
mod error;
mod service;

pub use encoding::{EncodingRules, compact_date, compact_datetime, rules};
#[doc(hidden)]
pub use error::to_exit_code;
pub use error::{Error, ErrorKind};
pub use service::{Mapper, mapper};
