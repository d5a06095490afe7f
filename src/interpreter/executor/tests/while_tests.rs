//! Tests for loops

use super::super::*;
use super::helpers::{
    build_vm, completions, drain_events, env_values, outputs, resume_with, round_trip, run_program,
};
use maplit::hashmap;

#[test]
fn test_while_simple_loop() {
    let source = r#"
        nexus {
            shard core x = 0;
            pulse (x < 3) {
                broadcast x;
                x = x + 1;
            }
        }
    "#;

    let mut vm = run_program(source);

    assert_eq!(
        drain_events(&mut vm),
        vec![
            OutputEvent::output(Val::Num(0.0)),
            OutputEvent::output(Val::Num(1.0)),
            OutputEvent::output(Val::Num(2.0)),
            OutputEvent::system(COMPLETION_MESSAGE),
        ]
    );
    assert_eq!(vm.env.get("x").map(|s| s.value.clone()), Some(Val::Num(3.0)));
}

#[test]
fn test_while_zero_iterations() {
    let source = r#"
        while (0 > 1) {
            output "never";
        }
        output "after";
    "#;

    let vm = run_program(source);

    assert_eq!(outputs(&vm), vec![Val::Str("after".to_string())]);
}

#[test]
fn test_nested_loops() {
    let source = r#"
        nexus {
            shard core i = 0;
            shard core j = 0;
            shard core total = 0;
            pulse (i < 3) {
                j = 0;
                pulse (j < 2) {
                    total = total + 1;
                    j = j + 1;
                }
                i = i + 1;
            }
            broadcast total;
        }
    "#;

    let vm = run_program(source);

    assert_eq!(outputs(&vm), vec![Val::Num(6.0)]);
    assert_eq!(completions(&vm), 1);
}

#[test]
fn test_if_inside_loop() {
    let source = r#"
        shard core i = 1;
        pulse (i <= 4) {
            probe (i == 2) {
                broadcast "two";
            } fallback {
                broadcast i;
            }
            i = i + 1;
        }
    "#;

    let vm = run_program(source);

    assert_eq!(
        outputs(&vm),
        vec![
            Val::Num(1.0),
            Val::Str("two".to_string()),
            Val::Num(3.0),
            Val::Num(4.0),
        ]
    );
}

#[test]
fn test_loop_frame_holds_body() {
    let mut vm = build_vm("nexus {\nwhile (1 < 0) {\noutput 1;\n}\n}");

    // Root block pushes the loop frame
    assert_eq!(step(&mut vm), Step::Continue);
    assert_eq!(vm.frames.len(), 2);
    assert_eq!(
        vm.frames[1],
        Frame::while_loop("1 < 0".to_string(), vec!["output 1;".to_string()])
    );

    // Test fails, loop frame is popped
    assert_eq!(step(&mut vm), Step::Continue);
    assert_eq!(vm.frames.len(), 1);
}

#[test]
fn test_input_exits_loop() {
    let source = r#"
        nexus {
            shard core n = 0;
            shard core count = 0;
            pulse (count < 5) {
                listen n;
                broadcast "rest of body";
                count = count + 1;
            }
            broadcast "after";
        }
    "#;

    let mut vm = run_program(source);
    assert_eq!(vm.control, Control::Suspend("n".to_string()));
    // Only the root block is left; it already points past the loop
    assert_eq!(vm.frames.len(), 1);
    assert!(matches!(vm.frames[0].kind, FrameKind::Block { idx: 8 }));

    resume_with(&mut vm, "9");

    // The rest of the iteration is skipped and the loop is not re-tested
    assert_eq!(
        drain_events(&mut vm),
        vec![
            OutputEvent::output(Val::Str("after".to_string())),
            OutputEvent::system(COMPLETION_MESSAGE),
        ]
    );
    assert_eq!(
        env_values(&vm),
        hashmap! {
            "n".to_string() => Val::Num(9.0),
            "count".to_string() => Val::Num(0.0),
        }
    );
}

#[test]
fn test_input_exits_all_enclosing_loops() {
    let source = r#"
        shard core v;
        shard core i = 0;
        pulse (i < 3) {
            i = i + 1;
            probe (i > 0) {
                pulse (1) {
                    listen v;
                    broadcast "inner";
                }
                broadcast "branch";
            }
            broadcast "outer";
        }
        broadcast i;
    "#;

    let mut vm = run_program(source);
    assert_eq!(vm.control, Control::Suspend("v".to_string()));
    assert_eq!(vm.frames.len(), 1);

    resume_with(&mut vm, "1");

    assert_eq!(outputs(&vm), vec![Val::Num(1.0)]);
    assert_eq!(vm.control, Control::Finished);
}

#[test]
fn test_input_in_branch_outside_loop_continues_block() {
    let source = r#"
        shard core v;
        probe (1) {
            listen v;
            broadcast v;
        }
        broadcast "done";
    "#;

    let mut vm = run_program(source);
    resume_with(&mut vm, "3");

    assert_eq!(
        outputs(&vm),
        vec![Val::Num(3.0), Val::Str("done".to_string())]
    );
}

#[test]
fn test_serialize_mid_loop_suspension() {
    let source = r#"
        shard core total = 0;
        shard core x;
        shard core i = 0;
        pulse (i < 2) {
            total = total + 5;
            listen x;
            i = i + 1;
        }
        broadcast total + x;
    "#;

    let mut vm = run_program(source);
    assert_eq!(vm.pending_input(), Some("x"));

    let mut restored = round_trip(&vm);
    assert_eq!(restored.frames, vm.frames);
    assert_eq!(restored.env, vm.env);

    resume_with(&mut restored, "40");

    assert_eq!(outputs(&restored), vec![Val::Num(45.0)]);
    let values = restored
        .env
        .iter()
        .map(|(name, slot)| (name.as_str(), slot.value.clone()))
        .collect::<std::collections::HashMap<_, _>>();
    assert_eq!(
        values,
        hashmap! {
            "total" => Val::Num(5.0),
            "x" => Val::Num(40.0),
            "i" => Val::Num(0.0),
        }
    );
}
