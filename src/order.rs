//! The variable order registry.

use std::collections::HashMap;

use log::debug;

use crate::types::{Rank, Var};

/// An ordered registry of variable names.
///
/// Names are interned on registration; registration order defines both the
/// variable ids and the initial order. Permutations (`set_order`,
/// `swap_adjacent`, `move_var`) change ranks only, never ids.
///
/// Any permutation invalidates diagrams built under the previous order. In
/// this crate reorderings always go through a full rebuild in a fresh
/// [`Context`][crate::context::Context], so a registry never has to patch a
/// live store.
#[derive(Debug, Clone, Default)]
pub struct VarOrder {
    /// Variable id to name.
    names: Vec<String>,
    by_name: HashMap<String, Var>,
    /// Rank to variable.
    order: Vec<Var>,
    /// Variable id to rank.
    ranks: Vec<usize>,
}

impl VarOrder {
    /// Creates a registry from names in declaration order. Duplicate names
    /// are registered once, at their first occurrence.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut this = VarOrder::default();
        for name in names {
            this.register(name.into());
        }
        this
    }

    fn register(&mut self, name: String) {
        if self.by_name.contains_key(&name) {
            return;
        }
        let var = Var::new(self.names.len() as u32);
        self.by_name.insert(name.clone(), var);
        self.names.push(name);
        self.ranks.push(self.order.len());
        self.order.push(var);
    }

    /// Number of registered variables.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Looks up a variable by name.
    pub fn var(&self, name: &str) -> Option<Var> {
        self.by_name.get(name).copied()
    }

    /// The name of a registered variable.
    pub fn name(&self, var: Var) -> &str {
        &self.names[var.index()]
    }

    /// The rank of `var` in the current order, or [`Rank::TERMINAL`] when
    /// `var` is not registered.
    pub fn rank(&self, var: Var) -> Rank {
        match self.ranks.get(var.index()) {
            Some(&position) => Rank::new(position),
            None => Rank::TERMINAL,
        }
    }

    /// Variables in current order, nearest the root first.
    pub fn ordered_vars(&self) -> &[Var] {
        &self.order
    }

    /// Names in current order, nearest the root first.
    pub fn ordered_names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|&var| self.name(var))
    }

    /// Replaces the order with the given permutation of the registered
    /// names.
    ///
    /// # Panics
    ///
    /// Panics if `names` is not a permutation of the registered names.
    pub fn set_order<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let order: Vec<Var> = names
            .into_iter()
            .map(|name| {
                let name = name.as_ref();
                self.var(name)
                    .unwrap_or_else(|| panic!("Unknown variable {:?} in order", name))
            })
            .collect();
        assert_eq!(
            order.len(),
            self.names.len(),
            "Order must mention every registered variable"
        );
        self.order = order;
        self.rebuild_ranks();
        debug!("set_order: {:?}", self.order);
        assert!(
            self.order.iter().enumerate().all(|(i, &v)| self.ranks[v.index()] == i),
            "Order must not repeat variables"
        );
    }

    /// Exchanges positions `i` and `i + 1`.
    pub fn swap_adjacent(&mut self, i: usize) {
        self.order.swap(i, i + 1);
        self.ranks[self.order[i].index()] = i;
        self.ranks[self.order[i + 1].index()] = i + 1;
    }

    /// Removes the variable at position `from` and reinserts it at `to`.
    pub fn move_var(&mut self, from: usize, to: usize) {
        let var = self.order.remove(from);
        self.order.insert(to, var);
        self.rebuild_ranks();
    }

    fn rebuild_ranks(&mut self) {
        for (position, &var) in self.order.iter().enumerate() {
            self.ranks[var.index()] = position;
        }
    }
}
