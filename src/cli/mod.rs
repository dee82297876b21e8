//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand.

mod diff;
mod formats;
mod roundtrip;
mod run;

pub use diff::{decode_document, run_diff};
pub use formats::run_formats;
pub use roundtrip::run_roundtrip;
pub use run::run_conformance;
