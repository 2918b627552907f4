use super::*;

impl<T: PartialOrd + Copy, V, Ix: IndexType> IntervalMap<T, V, Ix> {
    /// Index of the node with the smallest key in the subtree rooted at `index`.
    fn tree_minimum(&self, mut index: Ix) -> Ix {
        while self.node(index).left.defined() {
            index = self.node(index).left;
        }
        index
    }

    /// Links `child` (possibly absent) in place of `index`.
    fn transplant(&mut self, index: Ix, child: Ix) {
        let parent = self.node(index).parent;
        if !parent.defined() {
            self.root = child;
        } else if self.node(parent).left == index {
            self.node_mut(parent).left = child;
        } else {
            self.node_mut(parent).right = child;
        }
        if child.defined() {
            self.node_mut(child).parent = parent;
        }
    }

    pub(crate) fn remove_at(&mut self, index: Ix) -> V {
        let node = self.node(index);
        let left = node.left;
        let right = node.right;
        let mut spliced_black = node.is_black();
        let fix_child;
        let fix_parent;

        if !left.defined() {
            // No left subtree, link the right subtree in place of the node.
            fix_child = right;
            fix_parent = node.parent;
            self.transplant(index, right);
            self.update_max_up(fix_parent);
        } else if !right.defined() {
            // No right subtree, link the left subtree in place of the node.
            fix_child = left;
            fix_parent = node.parent;
            self.transplant(index, left);
            self.update_max_up(fix_parent);
        } else {
            // The in-order successor (leftmost node of the right subtree, it has
            // no left child) is unlinked from its position and relinked into the
            // removed node's position, color included. Only links are rewritten,
            // so every other node keeps its index.
            let successor = self.tree_minimum(right);
            spliced_black = self.node(successor).is_black();
            fix_child = self.node(successor).right;
            let lowest_touched;
            if self.node(successor).parent == index {
                fix_parent = successor;
                lowest_touched = successor;
            } else {
                fix_parent = self.node(successor).parent;
                lowest_touched = fix_parent;
                self.transplant(successor, fix_child);
                self.node_mut(successor).right = right;
                self.node_mut(right).parent = successor;
            }
            self.transplant(index, successor);
            self.node_mut(successor).left = left;
            self.node_mut(left).parent = successor;
            let was_red = self.node(index).is_red();
            self.node_mut(successor).red_color = was_red;
            // Maxima may shrink, recompute from the lowest touched position
            // to the root.
            self.update_max_up(lowest_touched);
        }

        if spliced_black {
            self.remove_repair(fix_child, fix_parent);
        }

        let slot = mem::replace(&mut self.nodes[index.get()], Slot::Vacant(self.free_head));
        self.free_head = index;
        self.len -= 1;
        match slot {
            Slot::Occupied(node) => node.value,
            Slot::Vacant(_) => unreachable!(),
        }
    }

    /// Restores the balance invariants after splicing out a black node.
    /// `index` is the position where the black-height deficit starts. The node
    /// there may be absent, so its `parent` is tracked explicitly.
    fn remove_repair(&mut self, mut index: Ix, mut parent: Ix) {
        while index != self.root && self.is_black_or_nil(index) {
            let node_is_left = self.node(parent).left == index;
            let mut sibling = if node_is_left {
                self.node(parent).right
            } else {
                self.node(parent).left
            };

            if self.is_red(sibling) {
                // Case: red sibling. Rotate it above the parent, the new
                // sibling is black.
                self.node_mut(sibling).set_black();
                self.node_mut(parent).set_red();
                if node_is_left {
                    self.rotate_left(parent);
                } else {
                    self.rotate_right(parent);
                }
                sibling = if node_is_left {
                    self.node(parent).right
                } else {
                    self.node(parent).left
                };
            }

            let (close_nephew, distant_nephew) = {
                let sibling_node = self.node(sibling);
                if node_is_left {
                    (sibling_node.left, sibling_node.right)
                } else {
                    (sibling_node.right, sibling_node.left)
                }
            };

            if self.is_black_or_nil(close_nephew) && self.is_black_or_nil(distant_nephew) {
                // Case: black sibling with black nephews. Push the deficit
                // one level up.
                self.node_mut(sibling).set_red();
                index = parent;
                parent = self.node(index).parent;
            } else {
                if self.is_black_or_nil(distant_nephew) {
                    // Case: the close nephew is red. Rotate it into the
                    // distant position.
                    self.node_mut(close_nephew).set_black();
                    self.node_mut(sibling).set_red();
                    if node_is_left {
                        self.rotate_right(sibling);
                    } else {
                        self.rotate_left(sibling);
                    }
                    sibling = if node_is_left {
                        self.node(parent).right
                    } else {
                        self.node(parent).left
                    };
                }
                // Case (terminal): the distant nephew is red. The sibling takes
                // the parent's color and the rotation restores the black height.
                let distant_nephew = if node_is_left {
                    self.node(sibling).right
                } else {
                    self.node(sibling).left
                };
                let parent_red = self.node(parent).is_red();
                self.node_mut(sibling).red_color = parent_red;
                self.node_mut(parent).set_black();
                self.node_mut(distant_nephew).set_black();
                if node_is_left {
                    self.rotate_left(parent);
                } else {
                    self.rotate_right(parent);
                }
                index = self.root;
                parent = Ix::MAX;
            }
        }
        if index.defined() {
            self.node_mut(index).set_black();
        }
    }
}
