//! Statement execution handlers
//!
//! Block frames classify their next line and either run it directly or,
//! for conditional and loop headers, collect the controlled blocks and
//! push frames for them.

use super::conditions::evaluate_condition;
use super::expressions::eval_expr;
use super::outbox::OutputEvent;
use super::types::{Declarator, Frame, FrameKind, Slot, Stmt, Val, VarType};
use super::vm::{Step, VM};
use crate::interpreter::classifier::classify;
use crate::interpreter::collector::{collect_if_else, collect_loop};
use tracing::debug;

/* ===================== Frame Handlers ===================== */

/// Execute the next line of a block frame
pub fn execute_block(vm: &mut VM, frame_idx: usize, idx: usize) -> Step {
    let Some(line) = vm.frames[frame_idx].lines.get(idx).cloned() else {
        // Block complete, pop frame
        vm.frames.pop();
        return Step::Continue;
    };

    let stmt = classify(&line);
    debug!(idx, line = %line, ?stmt, "execute line");

    match stmt {
        Stmt::If { test } => {
            let blocks = collect_if_else(&vm.frames[frame_idx].lines, idx);
            set_block_idx(vm, frame_idx, blocks.next);

            let taken = if evaluate_condition(&test, &vm.env) {
                blocks.then_block
            } else {
                blocks.else_block
            };
            if !taken.is_empty() {
                vm.frames.push(Frame::block(taken));
            }
            Step::Continue
        }

        Stmt::While { .. } => {
            let lp = collect_loop(&vm.frames[frame_idx].lines, idx);
            set_block_idx(vm, frame_idx, lp.next);
            vm.frames.push(Frame::while_loop(lp.test, lp.block));
            Step::Continue
        }

        other => {
            set_block_idx(vm, frame_idx, idx + 1);
            execute_simple(vm, other)
        }
    }
}

/// Execute a loop frame
///
/// The condition is re-tested each time the body block finishes.
pub fn execute_while(vm: &mut VM, frame_idx: usize, test: &str) -> Step {
    if evaluate_condition(test, &vm.env) {
        let body = vm.frames[frame_idx].lines.clone();
        vm.frames.push(Frame::block(body));
    } else {
        vm.frames.pop();
    }
    Step::Continue
}

/* ===================== Simple Statements ===================== */

fn execute_simple(vm: &mut VM, stmt: Stmt) -> Step {
    match stmt {
        Stmt::Declare { ty, decls } => {
            execute_declare(vm, ty, decls);
            Step::Continue
        }

        Stmt::Input { name } => {
            vm.suspend(name);
            Step::Done
        }

        Stmt::Output { expr } => {
            let value = eval_expr(&expr, &vm.env);
            vm.outbox.push(OutputEvent::output(value));
            Step::Continue
        }

        Stmt::Assign { name, expr } => {
            if vm.env.contains_key(&name) {
                let value = eval_expr(&expr, &vm.env);
                if let Some(slot) = vm.env.get_mut(&name) {
                    slot.value = value;
                }
            } else {
                debug!(var = %name, "assignment to undeclared variable ignored");
            }
            Step::Continue
        }

        // Headers are handled by execute_block
        Stmt::If { .. } | Stmt::While { .. } | Stmt::Nop => Step::Continue,
    }
}

/// Create (or re-create) each declared slot
///
/// Initializers run immediately, left to right, so later declarators can
/// read earlier ones.
fn execute_declare(vm: &mut VM, ty: VarType, decls: Vec<Declarator>) {
    for Declarator { name, init } in decls {
        let value = match init {
            Some(expr) => eval_expr(&expr, &vm.env),
            None => Val::Null,
        };
        vm.env.insert(name, Slot::new(ty, value));
    }
}

fn set_block_idx(vm: &mut VM, frame_idx: usize, next: usize) {
    if let FrameKind::Block { idx } = &mut vm.frames[frame_idx].kind {
        *idx = next;
    }
}
