//! Control flow and execution frame types

use crate::interpreter::executor::errors::RuntimeError;
use serde::{Deserialize, Serialize};

/* ===================== Control Flow ===================== */

/// Control flow state
///
/// While control is `None` the VM keeps stepping. Every other state
/// stops the loop. `Suspend` is the only one that can be cleared again,
/// by `VM::resume` supplying the requested value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t", content = "v")]
pub enum Control {
    None,
    /// Waiting for an input value for the named variable
    Suspend(String),
    /// Aborted by a runtime fault
    Throw(RuntimeError),
    /// Frame stack drained and the completion event was queued
    Finished,
}

/* ===================== Frames ===================== */

/// Frame kind - the type and state of a sequence being executed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t")]
pub enum FrameKind {
    /// Walks a flat line sequence; `idx` is the next line to run
    Block { idx: usize },
    /// Re-runs its body while `test` holds
    While { test: String },
}

/// Execution frame - one per active block or loop
///
/// The frame stack replaces recursion into nested blocks, which keeps a
/// suspended execution serializable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// The kind and state of this frame
    #[serde(flatten)]
    pub kind: FrameKind,

    /// The lines this frame walks (the loop body for While frames)
    pub lines: Vec<String>,
}

impl Frame {
    pub fn block(lines: Vec<String>) -> Self {
        Frame {
            kind: FrameKind::Block { idx: 0 },
            lines,
        }
    }

    pub fn while_loop(test: String, body: Vec<String>) -> Self {
        Frame {
            kind: FrameKind::While { test },
            lines: body,
        }
    }
}
