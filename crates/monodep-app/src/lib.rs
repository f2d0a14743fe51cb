//! Use case orchestration for monodep.
//!
//! This crate coordinates the settings, workspace, analysis, and render
//! layers into the single audit pipeline. The CLI crate depends on this; it
//! only handles argument parsing and process I/O.

#![forbid(unsafe_code)]

mod fix;
mod run;

pub use fix::{FixGate, Mutate, Operation, YarnMutator};
pub use run::{RunInput, RunOutput, run_audit};
