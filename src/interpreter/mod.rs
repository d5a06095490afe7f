//! CodeFlow interpreter
//!
//! Pipeline: [`normalizer`] turns program text into a flat line sequence,
//! [`executor`] walks it with a resumable frame stack (using [`classifier`]
//! and [`collector`] on each line), and [`session`] connects a running
//! program to the host's output sink and input source.

pub mod classifier;
pub mod collector;
pub mod executor;
pub mod normalizer;
pub mod session;

pub use executor::{ExecError, OutputEvent, OutputKind, RuntimeError, Val, VM};
pub use normalizer::normalize;
pub use session::{
    execute, Execution, InputSource, OutputSink, RunStatus, ScriptedInput, Transcript,
};
