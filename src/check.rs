//! Tree printing and the invariant checker.

use std::io::{self, Write};
use std::fmt::Display;
use bit_vec::BitVec;

use super::{IntervalMap, IndexType, Slot};

impl<T: PartialOrd + Copy + Display, V, Ix: IndexType> IntervalMap<T, V, Ix> {
    /// Writes a pre-order rendering of the tree, one node per line:
    /// indentation by depth, position prefix (`L`/`R`), color letter
    /// (`B`/`R`), the interval in `[low, high]` form and the cached subtree
    /// maximum after `|`. An empty tree prints `(nil)`.
    ///
    /// Afterwards runs [check_invariants](#method.check_invariants), so a
    /// corrupted tree panics instead of printing garbage.
    pub fn print<W: Write>(&self, mut writer: W) -> io::Result<()> {
        if !self.root.defined() {
            writeln!(writer, "(nil)")?;
        } else {
            self.print_node(&mut writer, self.root, 0, "")?;
        }
        self.check_invariants();
        Ok(())
    }

    fn print_node<W: Write>(&self, writer: &mut W, index: Ix, depth: usize, prefix: &str) -> io::Result<()> {
        let node = self.node(index);
        writeln!(writer, "{:indent$}{}{} {} | {}",
            "", prefix,
            if node.is_black() { "B" } else { "R" },
            node.interval, node.subtree_max,
            indent = 2 * depth)?;
        if node.left.defined() {
            self.print_node(writer, node.left, depth + 1, "L")?;
        }
        if node.right.defined() {
            self.print_node(writer, node.right, depth + 1, "R")?;
        }
        Ok(())
    }
}

impl<T: PartialOrd + Copy, V, Ix: IndexType> IntervalMap<T, V, Ix> {
    /// Checks every structural invariant of the tree: search order on
    /// `(low, high)` keys, black root, no red node with a red child, equal
    /// number of black nodes on every root-to-leaf path, `low <= high` for
    /// every stored interval, cached subtree maxima, parent links, absence of
    /// cycles, and the free-list bookkeeping. Panics on any violation.
    ///
    /// Runs in *O(N)*; meant for tests and debugging.
    pub fn check_invariants(&self) {
        let mut free_slots = 0;
        let mut free = self.free_head;
        while free.defined() {
            free_slots += 1;
            assert!(free_slots <= self.nodes.len(), "Free list contains a cycle");
            free = match &self.nodes[free.get()] {
                Slot::Vacant(next) => *next,
                Slot::Occupied(_) => panic!("Free list points to a live node {}", free),
            };
        }
        let vacant = self.nodes.iter().filter(|slot| matches!(slot, Slot::Vacant(_))).count();
        assert_eq!(vacant, free_slots, "Not all vacant slots are on the free list");
        assert_eq!(self.nodes.len() - vacant, self.len, "Tree size does not match its node count");

        if !self.root.defined() {
            assert_eq!(self.len, 0, "Tree without a root contains {} nodes", self.len);
            return;
        }
        assert!(self.node(self.root).is_black(), "Tree root must be black");
        assert!(!self.node(self.root).parent.defined(), "Tree root {} has a parent", self.root);

        let mut visited = BitVec::from_elem(self.nodes.len(), false);
        let mut black_height = None;
        self.check_node(self.root, 0, &mut black_height, &mut visited);

        for i in 0..self.nodes.len() {
            if let Slot::Occupied(_) = self.nodes[i] {
                assert!(visited[i], "The tree is disjoint: node {} has no connection to the root", i);
            }
        }
    }

    /// Returns the recomputed subtree maximum.
    fn check_node(&self, index: Ix, cur_black_height: u32, black_height: &mut Option<u32>, visited: &mut BitVec) -> T {
        assert!(!visited[index.get()], "The tree contains a cycle: node {} was visited twice", index);
        visited.set(index.get(), true);
        let node = self.node(index);

        if node.is_red() {
            assert!(self.is_black_or_nil(node.left) && self.is_black_or_nil(node.right),
                "Red node {} has a red child", index);
        }
        assert!(node.interval.low <= node.interval.high, "Node {} holds an empty interval", index);

        // Every path through a missing child ends here.
        if !node.left.defined() || !node.right.defined() {
            match *black_height {
                None => *black_height = Some(cur_black_height),
                Some(expected) => assert_eq!(expected, cur_black_height,
                    "Node {} breaks the black-height balance", index),
            }
        }

        let mut max = node.interval.high;
        if node.left.defined() {
            let left = self.node(node.left);
            assert!(left.parent == index, "Node {} has a wrong parent link", node.left);
            assert!(left.interval <= node.interval, "Node {} breaks the search order", node.left);
            let add = if left.is_black() { 1 } else { 0 };
            let left_max = self.check_node(node.left, cur_black_height + add, black_height, visited);
            if left_max > max {
                max = left_max;
            }
        }
        if node.right.defined() {
            let right = self.node(node.right);
            assert!(right.parent == index, "Node {} has a wrong parent link", node.right);
            assert!(node.interval <= right.interval, "Node {} breaks the search order", node.right);
            let add = if right.is_black() { 1 } else { 0 };
            let right_max = self.check_node(node.right, cur_black_height + add, black_height, visited);
            if right_max > max {
                max = right_max;
            }
        }
        assert!(node.subtree_max == max, "Node {} caches a wrong subtree maximum", index);
        max
    }
}

#[cfg(feature = "dot")]
impl<T: PartialOrd + Copy + Display, V: Display, Ix: IndexType> IntervalMap<T, V, Ix> {
    /// Writes the tree in Graphviz dot format. `T` and `V` should implement `Display`.
    pub fn write_dot<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writeln!(writer, "digraph {{")?;
        for i in 0..self.nodes.len() {
            if let Slot::Occupied(node) = &self.nodes[i] {
                writeln!(writer, "    {} [label=\"i={}\\n{}: {}\\n{}\", fillcolor={}, style=filled]",
                    i, i, node.interval, node.value, node.subtree_max,
                    if node.is_red() { "salmon" } else { "grey65" })?;
                if node.left.defined() {
                    writeln!(writer, "    {} -> {} [label=\"L\"]", i, node.left)?;
                }
                if node.right.defined() {
                    writeln!(writer, "    {} -> {} [label=\"R\"]", i, node.right)?;
                }
            }
        }
        writeln!(writer, "}}")
    }
}
