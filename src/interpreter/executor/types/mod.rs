//! Type definitions for the executor
//!
//! This module contains all the core types used by the executor:
//! - Classified statements (Stmt, Declarator, VarType)
//! - Runtime values and variable slots (Val, Slot, Env)
//! - Control flow (Control, Frame, FrameKind)

pub mod ast;
pub mod control;
pub mod values;

// Re-export all types for convenient access
pub use ast::{Declarator, Stmt, VarType};
pub use control::{Control, Frame, FrameKind};
pub use values::{Env, Slot, Val};
