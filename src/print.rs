//! The indented tree printer.

use crate::context::Context;
use crate::node::{Node, NodeId};

impl Context {
    /// Renders the diagram rooted at `root` as an indented tree.
    ///
    /// Terminals print as `0` and `1`, decision nodes as their variable
    /// name, with the low child before the high child. The tree view
    /// unfolds the underlying DAG, so shared subdiagrams appear once per
    /// reference; the output is illustrative, not a serialization.
    pub fn to_tree_string(&self, root: NodeId) -> String {
        let mut out = String::new();
        self.write_tree(&mut out, root, "");
        out
    }

    fn write_tree(&self, out: &mut String, id: NodeId, prefix: &str) {
        match *self.node(id) {
            Node::Zero => out.push_str("0\n"),
            Node::One => out.push_str("1\n"),
            Node::Decision { var, low, high } => {
                out.push_str(self.order().name(var));
                out.push('\n');

                out.push_str(prefix);
                out.push_str("├── ");
                self.write_tree(out, low, &format!("{}│   ", prefix));

                out.push_str(prefix);
                out.push_str("└── ");
                self.write_tree(out, high, &format!("{}    ", prefix));
            }
        }
    }
}
