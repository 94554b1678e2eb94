//! Variable reordering by sifting.
//!
//! Diagram size is highly sensitive to the variable order. For
//! `(a₁ ∧ b₁) ∨ (a₂ ∧ b₂) ∨ … ∨ (aₙ ∧ bₙ)` the interleaved order
//! `a₁, b₁, a₂, b₂, …` yields a number of nodes linear in `n`, while
//! `a₁, …, aₙ, b₁, …, bₙ` yields an exponential one: related variables far
//! apart prevent sharing. Finding an optimal order is NP-complete, so this
//! module implements Rudell's sifting heuristic, which moves each variable
//! in turn through every position and keeps the best one found.
//!
//! Each trial position is probed by a full rebuild of the diagram from the
//! netlist in a fresh context, and the size recorded is the total live
//! node count of that context's store. Probing every position for every
//! variable costs `O(n²)` rebuilds for `n` variables; an optimized
//! implementation could instead swap two adjacent levels in place, as long
//! as it reaches the same final order.
//!
//! The search is local: a variable's best position is measured against the
//! order in effect when its sweep starts, so a later variable's move can
//! undo an earlier gain. A single pass over the variables is made, with no
//! convergence loop.
//!
//! # References
//!
//! - R. Rudell. "Dynamic variable ordering for ordered binary decision
//!   diagrams." ICCAD 1993.

use log::debug;

use crate::context::Context;
use crate::eval;
use crate::netlist::Netlist;
use crate::node::NodeId;
use crate::order::VarOrder;
use crate::types::Var;

/// Statistics collected during sifting.
#[derive(Debug, Clone, Default)]
pub struct SiftStats {
    /// Full rebuilds performed
    pub rebuilds: usize,
    /// Store size under the declared order
    pub initial_size: usize,
    /// Store size under the final order
    pub final_size: usize,
    /// Smallest store size among kept placements
    pub best_size: usize,
    /// Number of variables sifted
    pub variables_processed: usize,
}

impl SiftStats {
    /// Size reduction as a ratio of the initial size.
    pub fn reduction_ratio(&self) -> f64 {
        if self.initial_size == 0 {
            return 0.0;
        }
        1.0 - (self.final_size as f64 / self.initial_size as f64)
    }

    /// Size reduction as a percentage.
    pub fn reduction_percent(&self) -> f64 {
        self.reduction_ratio() * 100.0
    }
}

/// Sifts every variable once, starting from the netlist's declared input
/// order, and returns the context and root diagram built under the final
/// order.
///
/// For a variable at position `i`, the upward sweep probes every position
/// from `i − 1` down to `0` and the downward sweep every position from
/// `i + 1` up to `n − 1`, each through an adjacent swap followed by a full
/// rebuild. The variable is then moved to the best probed position iff
/// that strictly beat the size at `i`; ties keep the variable where it is.
/// After each placement the diagram is rebuilt once under the order left
/// in effect, so the returned diagram always matches the returned order.
pub fn sift(netlist: &Netlist) -> (Context, NodeId, SiftStats) {
    let mut order = VarOrder::new(netlist.inputs.iter().cloned());
    let n = order.len();

    let (mut cx, mut root) = eval::build_with_order(netlist, order.clone());
    let mut stats = SiftStats {
        rebuilds: 1,
        initial_size: cx.num_nodes(),
        final_size: cx.num_nodes(),
        best_size: cx.num_nodes(),
        variables_processed: 0,
    };
    debug!("sift: initial size {} under {:?}", stats.initial_size, order.ordered_names().collect::<Vec<_>>());

    let vars: Vec<Var> = order.ordered_vars().to_vec();
    for &var in &vars {
        let i = order.rank(var).index();
        let start = order.clone();
        let start_size = cx.num_nodes();

        let mut best_pos = i;
        let mut best_size = start_size;

        // Upward sweep: probe positions i-1 down to 0.
        for j in (0..i).rev() {
            order.swap_adjacent(j);
            let (trial, _) = eval::build_with_order(netlist, order.clone());
            stats.rebuilds += 1;
            let size = trial.num_nodes();
            debug!("sift: {} at position {}: size {}", order.name(var), j, size);
            if size < best_size {
                best_size = size;
                best_pos = j;
            }
        }

        // Downward sweep, again from the starting order: probe i+1 up to
        // n-1.
        order = start.clone();
        for j in i + 1..n {
            order.swap_adjacent(j - 1);
            let (trial, _) = eval::build_with_order(netlist, order.clone());
            stats.rebuilds += 1;
            let size = trial.num_nodes();
            debug!("sift: {} at position {}: size {}", order.name(var), j, size);
            if size < best_size {
                best_size = size;
                best_pos = j;
            }
        }

        order = start;
        if best_pos != i {
            debug!(
                "sift: moving {} from position {} to {} (size {} -> {})",
                order.name(var),
                i,
                best_pos,
                start_size,
                best_size
            );
            order.move_var(i, best_pos);
        }

        let (rebuilt, rebuilt_root) = eval::build_with_order(netlist, order.clone());
        stats.rebuilds += 1;
        cx = rebuilt;
        root = rebuilt_root;
        stats.variables_processed += 1;
        if cx.num_nodes() < stats.best_size {
            stats.best_size = cx.num_nodes();
        }
    }

    stats.final_size = cx.num_nodes();
    debug!(
        "sift: size {} -> {} ({:.1}% reduction) in {} rebuilds",
        stats.initial_size,
        stats.final_size,
        stats.reduction_percent(),
        stats.rebuilds
    );
    (cx, root, stats)
}
