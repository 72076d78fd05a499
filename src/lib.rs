//! Purpose: Shared library crate used by the `echomap` binary and tests.
//! Exports: `mapper` (conversion engine, encoding rules, errors), `handlers`.
//! Role: Internal library backing the binary; not yet a stable public SDK.
//! Invariants: All runtime JSON conversions go through `mapper`; no ad hoc decode paths.
//! Invariants: Handlers stay logic-free pass-throughs over the mapper.
pub mod handlers;
pub mod mapper;
