//! Test helpers for executor tests
//!
//! Common utilities for building VMs from program text and reading back
//! what they produced

use crate::interpreter::executor::{run_until_done, OutputEvent, OutputKind, Val, VM};
use std::collections::HashMap;

/// Normalize source and create a VM, passing it through a serde round trip
pub fn build_vm(source: &str) -> VM {
    let vm = VM::from_source(source);
    let json = serde_json::to_string(&vm).expect("VM serialization failed");
    serde_json::from_str(&json).expect("VM deserialization failed")
}

/// Build a VM and run it until it stops
pub fn run_program(source: &str) -> VM {
    let mut vm = build_vm(source);
    run_until_done(&mut vm);
    vm
}

/// Drain the outbox
pub fn drain_events(vm: &mut VM) -> Vec<OutputEvent> {
    vm.outbox.drain()
}

/// Values of queued output events, leaving the outbox untouched
pub fn outputs(vm: &VM) -> Vec<Val> {
    vm.outbox
        .events
        .iter()
        .filter(|e| e.kind == OutputKind::Output)
        .map(|e| e.value.clone())
        .collect()
}

/// Number of completion events queued
pub fn completions(vm: &VM) -> usize {
    vm.outbox
        .events
        .iter()
        .filter(|e| e.kind == OutputKind::System)
        .count()
}

/// Current value of every variable
pub fn env_values(vm: &VM) -> HashMap<String, Val> {
    vm.env
        .iter()
        .map(|(name, slot)| (name.clone(), slot.value.clone()))
        .collect()
}

/// Resume with `raw` and run until the next stop
pub fn resume_with(vm: &mut VM, raw: &str) {
    vm.resume(raw).expect("VM was not suspended");
    run_until_done(vm);
}

/// Round-trip the VM through JSON, as a host parking it would
pub fn round_trip(vm: &VM) -> VM {
    let json = serde_json::to_string(vm).expect("VM serialization failed");
    serde_json::from_str(&json).expect("VM deserialization failed")
}
