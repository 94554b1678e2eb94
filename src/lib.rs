//! # netbdd: ROBDDs for gate-level netlists
//!
//! **`netbdd`** builds a Reduced Ordered Binary Decision Diagram (ROBDD)
//! for the Boolean function computed by a combinational netlist written in
//! a small Verilog-like gate-level subset, searches for a smaller variable
//! order with Rudell-style sifting, and prints the result as an indented
//! tree.
//!
//! ## What is a ROBDD?
//!
//! A binary decision diagram represents a Boolean function as a DAG of
//! decision nodes over a fixed variable order. Kept *reduced* (no node
//! tests a variable redundantly, no two nodes are structurally identical)
//! and *ordered*, the diagram is **canonical**: every function has exactly
//! one diagram, so semantic equality becomes equality of node ids.
//!
//! ## Key pieces
//!
//! - **Manager-centric construction**: all operations go through a
//!   [`Context`][crate::context::Context], which owns the node store, the
//!   variable order, and the operation caches. Hash consing in
//!   [`store`] maintains the canonical form.
//! - **[`netlist`]** parses the gate-level subset; **[`eval`]** evaluates
//!   the gates in topological passes against a signal environment.
//! - **[`reorder`]** implements sifting: each variable is trialled at
//!   every position through full rebuilds and kept at its locally best
//!   one.
//!
//! ## Basic usage
//!
//! ```rust
//! use netbdd::eval;
//! use netbdd::netlist::Netlist;
//!
//! let netlist = Netlist::parse(
//!     "input a, b;\n\
//!      output y;\n\
//!      and g1(y, a, b);\n\
//!      endmodule\n",
//! );
//! let (cx, root) = eval::build(&netlist);
//!
//! // a AND b holds only under the all-ones assignment.
//! assert!(cx.eval_with(root, |_| true));
//! assert!(!cx.eval_with(root, |_| false));
//!
//! print!("{}", cx.to_tree_string(root));
//! ```

pub mod cache;
pub mod context;
pub mod eval;
pub mod netlist;
pub mod node;
pub mod op;
pub mod order;
pub mod print;
pub mod reorder;
pub mod store;
pub mod types;
pub mod utils;
