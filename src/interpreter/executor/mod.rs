//! # Executor - Resumable Stack-Driven Interpreter
//!
//! Runs a flat line sequence one micro-step at a time.
//!
//! ## Core Principles
//!
//! 1. **Stack-driven execution**: All state in `frames: Vec<Frame>`, no recursion
//!    into nested blocks
//! 2. **Lazy block resolution**: A header's blocks are collected only when the
//!    header runs, and are resolved further only when pushed as a frame
//! 3. **Single global environment**: One flat `Env` for the whole execution
//! 4. **Pure executor**: No I/O, no async - just runs until suspend, fault or
//!    completion, leaving events in the outbox
//!
//! ## Suspension
//!
//! An input statement sets `Control::Suspend(name)` and stops the loop.
//! `VM::resume` coerces the supplied value, clears the suspension, and
//! execution continues with the next statement. A suspension inside a loop
//! body unwinds the enclosing loops, so execution resumes after the
//! outermost one.

pub mod coercion;
pub mod conditions;
pub mod errors;
pub mod exec_loop;
pub mod expressions;
pub mod outbox;
pub mod statements;
pub mod types;
pub mod vm;

#[cfg(test)]
mod tests;

// Re-export commonly used items
pub use conditions::evaluate_condition;
pub use errors::{ExecError, RuntimeError};
pub use exec_loop::{run_until_done, step};
pub use expressions::eval_expr;
pub use outbox::{OutputEvent, OutputKind, Outbox};
pub use types::{Control, Declarator, Env, Frame, FrameKind, Slot, Stmt, Val, VarType};
pub use vm::{Step, COMPLETION_MESSAGE, VM};
