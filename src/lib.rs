pub mod cli;
pub mod config;
pub mod demos;
pub mod interpreter;

// Re-export the embedding API
pub use interpreter::{
    execute, normalize, Execution, InputSource, OutputEvent, OutputKind, OutputSink, RunStatus,
    RuntimeError, ScriptedInput, Transcript, Val,
};
