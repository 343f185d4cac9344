//! Expose folio's command layer for use in integration tests and the xtask
//! crate. Library consumers should depend on `folio-markdown` directly.
pub mod cli;
pub mod commands;
