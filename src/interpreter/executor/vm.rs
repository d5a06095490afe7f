//! Virtual Machine state
//!
//! The VM holds all execution state:
//! - env: The single global variable mapping
//! - frames: Stack of active blocks and loops
//! - control: Current control flow state (running, suspended, faulted, finished)
//! - outbox: Events waiting to be handed to the output sink

use super::coercion::coerce_input;
use super::errors::{ExecError, RuntimeError};
use super::outbox::{OutputEvent, Outbox};
use super::types::{Control, Env, Frame, FrameKind};
use crate::interpreter::normalizer::normalize;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Message carried by the completion event
pub const COMPLETION_MESSAGE: &str = "Program finished";

/* ===================== VM ===================== */

/// Virtual Machine state
///
/// This contains everything needed to execute (and serialize/resume) a program.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VM {
    /// Variable slots, live for the whole execution
    pub env: Env,

    /// Stack of execution frames
    pub frames: Vec<Frame>,

    /// Current control flow state
    pub control: Control,

    /// Events produced since the last drain
    pub outbox: Outbox,
}

impl VM {
    /// Create a new VM over a flat line sequence
    ///
    /// The sequence is wrapped in a root block frame; nothing runs until
    /// the VM is stepped.
    pub fn new(lines: Vec<String>) -> Self {
        VM {
            env: Env::new(),
            frames: vec![Frame::block(lines)],
            control: Control::None,
            outbox: Outbox::new(),
        }
    }

    /// Normalize program text and create a VM for it
    pub fn from_source(source: &str) -> Self {
        Self::new(normalize(source))
    }

    /// Name of the variable the VM is waiting on, if suspended
    pub fn pending_input(&self) -> Option<&str> {
        match &self.control {
            Control::Suspend(name) => Some(name),
            _ => None,
        }
    }

    /// Resume a suspended VM with the raw value for the pending input
    ///
    /// The value is coerced to the declared type of the target slot and
    /// discarded if the variable was never declared. A coercion failure
    /// aborts the execution.
    pub fn resume(&mut self, raw: &str) -> Result<(), ExecError> {
        let Control::Suspend(name) = &self.control else {
            return Err(ExecError::NotSuspended);
        };
        let name = name.clone();
        self.control = Control::None;
        info!(var = %name, "resuming with input");

        let Some(ty) = self.env.get(&name).map(|slot| slot.ty) else {
            debug!(var = %name, "input for undeclared variable discarded");
            return Ok(());
        };

        match coerce_input(raw, ty) {
            Ok(value) => {
                if let Some(slot) = self.env.get_mut(&name) {
                    slot.value = value;
                }
            }
            Err(error) => self.fail(error),
        }
        Ok(())
    }

    /// Park the VM until `resume` supplies a value for `name`
    ///
    /// Inside a loop body, the outermost enclosing loop and every frame
    /// above it are dropped, so the loop exits without re-testing its
    /// condition. The block holding that loop already points past it.
    pub(crate) fn suspend(&mut self, name: String) {
        let outermost_loop = self
            .frames
            .iter()
            .position(|frame| matches!(frame.kind, FrameKind::While { .. }));
        if let Some(idx) = outermost_loop {
            debug!(var = %name, unwound = self.frames.len() - idx, "input leaves enclosing loops");
            self.frames.truncate(idx);
        }
        info!(var = %name, "suspended awaiting input");
        self.control = Control::Suspend(name);
    }

    /// Abort the execution with a runtime fault
    pub(crate) fn fail(&mut self, error: RuntimeError) {
        warn!(%error, "execution failed");
        self.outbox
            .push(OutputEvent::error(format!("Error: {}", error)));
        self.frames.clear();
        self.control = Control::Throw(error);
    }

    /// Mark the execution complete and queue the completion event
    pub(crate) fn finish(&mut self) {
        info!("execution finished");
        self.outbox.push(OutputEvent::system(COMPLETION_MESSAGE));
        self.control = Control::Finished;
    }
}

/* ===================== Step Result ===================== */

/// Result of executing one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Continue to next step
    Continue,
    /// Execution stopped (finished, suspended or faulted)
    Done,
}
