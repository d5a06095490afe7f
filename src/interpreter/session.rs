//! Host boundary for running programs
//!
//! The executor itself never calls out. A session drives it, hands queued
//! events to an [`OutputSink`], and answers suspensions from an
//! [`InputSource`]. When the source has nothing to give, the execution
//! stays parked and can be resumed later with [`Execution::provide_input`].

use super::executor::{
    step, Control, ExecError, OutputEvent, OutputKind, RuntimeError, Step, Val, VM,
};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::{debug, info_span};
use uuid::Uuid;

/* ===================== Callbacks ===================== */

/// Receives every output, completion and error event
pub trait OutputSink {
    fn emit(&mut self, value: &Val, kind: OutputKind);
}

impl<F> OutputSink for F
where
    F: FnMut(&Val, OutputKind),
{
    fn emit(&mut self, value: &Val, kind: OutputKind) {
        self(value, kind)
    }
}

/// Supplies raw values for input statements
///
/// Returning `None` leaves the execution suspended.
pub trait InputSource {
    fn request(&mut self, name: &str) -> Option<String>;
}

impl<F> InputSource for F
where
    F: FnMut(&str) -> Option<String>,
{
    fn request(&mut self, name: &str) -> Option<String> {
        self(name)
    }
}

/// Sink that records every event in order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcript {
    pub events: Vec<OutputEvent>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Values of `output` events only
    pub fn outputs(&self) -> Vec<Val> {
        self.events
            .iter()
            .filter(|e| e.kind == OutputKind::Output)
            .map(|e| e.value.clone())
            .collect()
    }

    pub fn count(&self, kind: OutputKind) -> usize {
        self.events.iter().filter(|e| e.kind == kind).count()
    }
}

impl OutputSink for Transcript {
    fn emit(&mut self, value: &Val, kind: OutputKind) {
        self.events.push(OutputEvent {
            value: value.clone(),
            kind,
        });
    }
}

/// Source that answers requests from a fixed queue of values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScriptedInput {
    pub values: VecDeque<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedInput {
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn request(&mut self, _name: &str) -> Option<String> {
        self.values.pop_front()
    }
}

/* ===================== Execution ===================== */

/// Where an execution currently stands
#[derive(Debug, Clone, PartialEq)]
pub enum RunStatus {
    /// Not stepped yet, or resumed and not yet driven again
    Running,
    /// Parked until a value for the named variable is provided
    AwaitingInput(String),
    Finished,
    Failed(RuntimeError),
}

/// One run of one program
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Execution {
    pub id: Uuid,
    pub vm: VM,
}

impl Execution {
    pub fn new(source: &str) -> Self {
        Execution {
            id: Uuid::new_v4(),
            vm: VM::from_source(source),
        }
    }

    pub fn status(&self) -> RunStatus {
        match &self.vm.control {
            Control::None => RunStatus::Running,
            Control::Suspend(name) => RunStatus::AwaitingInput(name.clone()),
            Control::Throw(error) => RunStatus::Failed(error.clone()),
            Control::Finished => RunStatus::Finished,
        }
    }

    /// Run until finished, failed, or suspended with no input available
    ///
    /// Events reach the sink as soon as the step that produced them returns,
    /// so a program that never finishes still streams its output.
    pub fn drive<O, I>(&mut self, sink: &mut O, input: &mut I) -> RunStatus
    where
        O: OutputSink + ?Sized,
        I: InputSource + ?Sized,
    {
        let span = info_span!("execution", id = %self.id);
        let _enter = span.enter();

        loop {
            while step(&mut self.vm) == Step::Continue {
                if !self.vm.outbox.is_empty() {
                    self.flush(sink);
                }
            }
            self.flush(sink);

            let Some(name) = self.vm.pending_input().map(str::to_string) else {
                return self.status();
            };
            let Some(raw) = input.request(&name) else {
                debug!(var = %name, "no input available, parking");
                return RunStatus::AwaitingInput(name);
            };
            // Suspended was checked above, so this cannot be NotSuspended
            if let Err(error) = self.vm.resume(&raw) {
                debug!(%error, "resume rejected");
                return self.status();
            }
        }
    }

    /// Answer the pending input of a parked execution
    ///
    /// Call `drive` afterwards to continue running.
    pub fn provide_input(&mut self, raw: &str) -> Result<(), ExecError> {
        let span = info_span!("execution", id = %self.id);
        let _enter = span.enter();
        self.vm.resume(raw)
    }

    /// Serialize the execution, including a parked frame stack
    pub fn to_snapshot(&self) -> Result<String, ExecError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_snapshot(snapshot: &str) -> Result<Self, ExecError> {
        Ok(serde_json::from_str(snapshot)?)
    }

    fn flush<O: OutputSink + ?Sized>(&mut self, sink: &mut O) {
        for event in self.vm.outbox.drain() {
            sink.emit(&event.value, event.kind);
        }
    }
}

/// Run a program to completion (or until input runs out) in one call
pub fn execute<O, I>(source: &str, sink: &mut O, input: &mut I) -> RunStatus
where
    O: OutputSink + ?Sized,
    I: InputSource + ?Sized,
{
    Execution::new(source).drive(sink, input)
}
