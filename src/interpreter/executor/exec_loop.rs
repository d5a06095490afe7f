//! Core execution loop
//!
//! This module contains the step() function - the heart of the interpreter.
//! It processes one frame at a time, advancing line indices and managing
//! the frame stack.
//!
//! ## Function Organization
//! Functions are ordered by importance/call hierarchy:
//! 1. run_until_done() - Top-level driver (calls step repeatedly)
//! 2. step() - Main execution loop (dispatches to frame handlers)

use super::statements::{execute_block, execute_while};
use super::types::{Control, FrameKind};
use super::vm::{Step, VM};

/* ===================== Public API ===================== */

/// Run the VM until it finishes, suspends or faults
///
/// After it returns, inspect `vm.control` for the final state and
/// `vm.outbox` for the events produced along the way.
pub fn run_until_done(vm: &mut VM) {
    while step(vm) == Step::Continue {}
}

/// Execute one step of the VM
///
/// This is the core interpreter loop. It:
/// 1. Stops if control flow is no longer `None`
/// 2. Finishes the execution once the frame stack is empty
/// 3. Dispatches the top frame to its handler
pub fn step(vm: &mut VM) -> Step {
    if vm.control != Control::None {
        return Step::Done;
    }

    // Get top frame (if any)
    let Some(frame_idx) = vm.frames.len().checked_sub(1) else {
        vm.finish();
        return Step::Done;
    };

    match vm.frames[frame_idx].kind.clone() {
        FrameKind::Block { idx } => execute_block(vm, frame_idx, idx),
        FrameKind::While { test } => execute_while(vm, frame_idx, &test),
    }
}
