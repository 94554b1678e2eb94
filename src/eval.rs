//! The netlist evaluator: signal environment and topological scheduling.

use std::collections::HashMap;

use log::debug;

use crate::context::Context;
use crate::netlist::{Gate, GateKind, Netlist};
use crate::node::NodeId;
use crate::op::BoolOp;
use crate::order::VarOrder;

/// Builds a fresh context ordered by the netlist's primary-input
/// declaration order and evaluates the netlist in it.
pub fn build(netlist: &Netlist) -> (Context, NodeId) {
    build_with_order(netlist, VarOrder::new(netlist.inputs.iter().cloned()))
}

/// Evaluates the netlist in a fresh context under the given order.
pub fn build_with_order(netlist: &Netlist, order: VarOrder) -> (Context, NodeId) {
    let mut cx = Context::new(order);
    let root = evaluate(&mut cx, netlist);
    (cx, root)
}

/// Computes the diagram of every gate output and returns the diagram of
/// the first declared primary output, or the zero diagram when none is
/// declared.
///
/// Gates are evaluated in passes: each pass takes, in list order, every
/// gate whose inputs are all bound in the signal environment. When a pass
/// makes no progress the remaining gates are evaluated in list order with
/// missing inputs read as zero. That fallback guarantees termination on
/// cyclic or malformed netlists; the diagrams it produces for the affected
/// signals are structurally valid but carry no meaning.
pub fn evaluate(cx: &mut Context, netlist: &Netlist) -> NodeId {
    let mut env: HashMap<String, NodeId> = HashMap::new();

    for name in &netlist.inputs {
        if let Some(var) = cx.order().var(name) {
            let node = cx.mk_var(var);
            env.insert(name.clone(), node);
        }
    }

    let mut pending: Vec<&Gate> = netlist.gates.iter().collect();
    while !pending.is_empty() {
        let mut deferred: Vec<&Gate> = Vec::new();
        let mut progressed = false;

        for gate in pending {
            let ready = gate.inputs.iter().all(|name| env.contains_key(name));
            if ready {
                let node = eval_gate(cx, &env, gate);
                debug!("evaluate: {} <- {}", gate.output, node);
                env.insert(gate.output.clone(), node);
                progressed = true;
            } else {
                deferred.push(gate);
            }
        }

        if !progressed {
            debug!("evaluate: stalled with {} gates left, forcing list order", deferred.len());
            for gate in deferred {
                let node = eval_gate(cx, &env, gate);
                env.insert(gate.output.clone(), node);
            }
            break;
        }
        pending = deferred;
    }

    match netlist.outputs.first() {
        Some(name) => env.get(name).copied().unwrap_or(NodeId::ZERO),
        None => NodeId::ZERO,
    }
}

/// Evaluates one gate against the current bindings. Unknown kinds and
/// missing inputs read as zero.
fn eval_gate(cx: &mut Context, env: &HashMap<String, NodeId>, gate: &Gate) -> NodeId {
    let kind = match gate.kind {
        Some(kind) => kind,
        None => return NodeId::ZERO,
    };

    let fetch = |name: &String| env.get(name).copied().unwrap_or(NodeId::ZERO);

    if kind == GateKind::Not {
        return match gate.inputs.first() {
            Some(name) => {
                let f = fetch(name);
                cx.apply_not(f)
            }
            None => NodeId::ZERO,
        };
    }

    let op = match kind {
        GateKind::And => BoolOp::AND,
        GateKind::Or => BoolOp::OR,
        GateKind::Xor => BoolOp::XOR,
        GateKind::Nand => BoolOp::NAND,
        GateKind::Nor => BoolOp::NOR,
        GateKind::Not => unreachable!(),
    };

    // Left fold over the inputs. Note that this makes a multi-input NAND
    // compute NAND(NAND(a, b), c), not ¬(a ∧ b ∧ c); same for NOR.
    let mut inputs = gate.inputs.iter();
    let mut acc = match inputs.next() {
        Some(name) => fetch(name),
        None => return NodeId::ZERO,
    };
    for name in inputs {
        let rhs = fetch(name);
        acc = cx.apply(acc, rhs, op);
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::node::Node;

    use test_log::test;

    #[test]
    fn test_xor_structure() {
        let netlist = Netlist::parse(
            "input a, b;\n\
             output y;\n\
             xor g1(y, a, b);\n\
             endmodule\n",
        );
        let (cx, root) = build(&netlist);

        let a = cx.order().var("a").unwrap();
        let b = cx.order().var("b").unwrap();

        let (low, high) = match *cx.node(root) {
            Node::Decision { var, low, high } => {
                assert_eq!(var, a);
                (low, high)
            }
            _ => panic!("Root should test a"),
        };
        assert_eq!(
            *cx.node(low),
            Node::Decision { var: b, low: NodeId::ZERO, high: NodeId::ONE }
        );
        assert_eq!(
            *cx.node(high),
            Node::Decision { var: b, low: NodeId::ONE, high: NodeId::ZERO }
        );
        assert_eq!(cx.count_decision_nodes(root), 3);
    }

    #[test]
    fn test_redundant_gate() {
        let netlist = Netlist::parse(
            "input a;\n\
             output y;\n\
             and g1(y, a, a);\n\
             endmodule\n",
        );
        let (cx, root) = build(&netlist);

        let a = cx.order().var("a").unwrap();
        assert_eq!(
            *cx.node(root),
            Node::Decision { var: a, low: NodeId::ZERO, high: NodeId::ONE }
        );
        assert_eq!(cx.count_decision_nodes(root), 1);
    }

    #[test]
    fn test_constant_output() {
        let netlist = Netlist::parse(
            "input a;\n\
             output y;\n\
             xor g1(y, a, a);\n\
             endmodule\n",
        );
        let (cx, root) = build(&netlist);
        assert_eq!(root, NodeId::ZERO);
        assert_eq!(cx.count_decision_nodes(root), 0);
    }

    #[test]
    fn test_no_output_declared() {
        let netlist = Netlist::parse("input a;\nand g1(y, a, a);\nendmodule\n");
        let (_, root) = build(&netlist);
        assert_eq!(root, NodeId::ZERO);
    }

    #[test]
    fn test_gate_order_does_not_matter() {
        let in_order = Netlist::parse(
            "input a, b, c;\n\
             output y;\n\
             and g1(t, a, b);\n\
             or g2(y, t, c);\n\
             endmodule\n",
        );
        let reversed = Netlist::parse(
            "input a, b, c;\n\
             output y;\n\
             or g2(y, t, c);\n\
             and g1(t, a, b);\n\
             endmodule\n",
        );

        // Evaluating both in the same context makes canonicity directly
        // observable: equal functions get equal ids.
        let mut cx = Context::new(VarOrder::new(["a", "b", "c"]));
        let first = evaluate(&mut cx, &in_order);
        let second = evaluate(&mut cx, &reversed);
        assert_eq!(first, second);
    }

    #[test]
    fn test_canonicity_across_netlists() {
        let direct = Netlist::parse(
            "input a, b;\n\
             output y;\n\
             and g1(y, a, b);\n\
             endmodule\n",
        );
        let negated = Netlist::parse(
            "input a, b;\n\
             output y;\n\
             nand g1(t, a, b);\n\
             not g2(y, t);\n\
             endmodule\n",
        );

        let mut cx = Context::new(VarOrder::new(["a", "b"]));
        let first = evaluate(&mut cx, &direct);
        let second = evaluate(&mut cx, &negated);
        assert_eq!(first, second);
    }

    #[test]
    fn test_nor_gate() {
        let netlist = Netlist::parse(
            "input a, b;\n\
             output y;\n\
             nor g1(y, a, b);\n\
             endmodule\n",
        );
        let (cx, root) = build(&netlist);

        let a = cx.order().var("a").unwrap();
        let b = cx.order().var("b").unwrap();
        for (av, bv) in [(false, false), (false, true), (true, false), (true, true)] {
            let res = cx.eval_with(root, |v| if v == a { av } else { bv });
            assert_eq!(res, !(av || bv));
        }
    }

    #[test]
    fn test_nand_folds_left() {
        let netlist = Netlist::parse(
            "input a, b, c;\n\
             output y;\n\
             nand g1(y, a, b, c);\n\
             endmodule\n",
        );
        let (cx, root) = build(&netlist);

        let a = cx.order().var("a").unwrap();
        let b = cx.order().var("b").unwrap();
        for assignment in 0..8u32 {
            let (av, bv, cv) = (assignment & 1 != 0, assignment & 2 != 0, assignment & 4 != 0);
            let expected = !(!(av && bv) && cv);
            let res = cx.eval_with(root, |v| {
                if v == a {
                    av
                } else if v == b {
                    bv
                } else {
                    cv
                }
            });
            assert_eq!(res, expected, "Mismatch for a={} b={} c={}", av, bv, cv);
        }
    }

    #[test]
    fn test_unknown_kind_yields_zero() {
        let netlist = Netlist::parse(
            "input a;\n\
             output y;\n\
             buf g1(y, a);\n\
             endmodule\n",
        );
        let (_, root) = build(&netlist);
        assert_eq!(root, NodeId::ZERO);
    }

    #[test]
    fn test_missing_input_reads_as_zero() {
        let netlist = Netlist::parse(
            "input a;\n\
             output y;\n\
             or g1(y, a, phantom);\n\
             endmodule\n",
        );
        let (cx, root) = build(&netlist);

        // a OR 0 is just a.
        let a = cx.order().var("a").unwrap();
        assert_eq!(
            *cx.node(root),
            Node::Decision { var: a, low: NodeId::ZERO, high: NodeId::ONE }
        );
    }

    #[test]
    fn test_cycle_terminates() {
        let netlist = Netlist::parse(
            "input a;\n\
             output y;\n\
             and g1(t1, a, t2);\n\
             and g2(t2, a, t1);\n\
             or g3(y, t1, t2);\n\
             endmodule\n",
        );
        let (cx, root) = build(&netlist);

        // The resulting diagram carries no meaning, but it must be a
        // valid node of the store.
        let _ = cx.node(root);
        let _ = cx.eval_with(root, |_| true);
    }
}
